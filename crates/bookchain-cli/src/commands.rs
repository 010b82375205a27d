use std::path::Path;
use std::thread;

use anyhow::Context;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookchain_ledger::{
    AppendOutcome, Block, InMemoryLedger, LedgerReader, LedgerWriter, TracingSink,
};
use bookchain_server::{AppState, BookchainServer, ServerConfig};
use bookchain_types::CheckoutRecord;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.verbose),
        Command::Demo(args) => cmd_demo(args, cli.verbose),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(default_filter: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.no_trace {
        config.request_trace = false;
    }
    init_tracing(&config.log_filter, verbose);
    info!(
        bind = %config.bind_addr,
        request_trace = config.request_trace,
        "starting bookchain server"
    );

    let state = AppState::new().context("initializing ledger")?;
    let server = BookchainServer::new(config, state);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_demo(args: DemoArgs, verbose: bool) -> anyhow::Result<()> {
    init_tracing("warn", verbose);

    let ledger = InMemoryLedger::with_sink(TracingSink)?;
    let threads = args.threads.max(1);
    let per_thread = args.checkouts.div_ceil(threads);
    info!(checkouts = args.checkouts, threads, "running checkout demo");

    let results: Vec<anyhow::Result<usize>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let ledger = &ledger;
                let start = t * per_thread;
                let end = (start + per_thread).min(args.checkouts);
                scope.spawn(move || -> anyhow::Result<usize> {
                    let mut committed = 0;
                    for n in start..end {
                        let record = CheckoutRecord::new(
                            format!("book-{n}"),
                            format!("user-{t}"),
                            "2024-01-01",
                        );
                        if let AppendOutcome::Committed(_) = ledger.append(record)? {
                            committed += 1;
                        }
                    }
                    Ok(committed)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(anyhow::anyhow!("checkout thread panicked")))
            })
            .collect()
    });

    let mut committed = 0;
    for result in results {
        committed += result?;
    }

    let blocks = ledger.snapshot()?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
        OutputFormat::Text => print_chain(&blocks),
    }

    let report = ledger.validation_report()?;
    if report.is_valid() {
        ledger.verify_integrity()?;
        println!(
            "{} {} of {} checkouts committed; chain of {} blocks verified",
            "✓".green().bold(),
            committed.to_string().bold(),
            args.checkouts,
            report.length.to_string().bold()
        );
    } else {
        for v in &report.violations {
            println!("{} block {}: {}", "✗".red().bold(), v.position, v.description);
        }
        anyhow::bail!("chain failed validation");
    }
    Ok(())
}

fn print_chain(blocks: &[Block]) {
    for block in blocks {
        let label = if block.is_genesis() {
            "genesis".yellow().to_string()
        } else {
            format!("{} -> {}", block.payload.book_id, block.payload.user_id)
        };
        println!("{} {}", format!("#{}", block.position).bold(), label);
        println!("  {}  {}", "hash:".dimmed(), block.hash.as_str().cyan());
        if !block.previous_hash.is_empty() {
            println!("  {}  {}", "prev:".dimmed(), block.previous_hash.as_str());
        }
        println!("  {}    {}", "at:".dimmed(), block.timestamp);
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
