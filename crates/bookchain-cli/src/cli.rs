use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bookchain",
    about = "Bookchain: hash-linked ledger of book checkouts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Build an in-process ledger from concurrent checkouts and audit it
    Demo(DemoArgs),
    /// Print the effective server configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to bind, overriding the configuration file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Disable per-request tracing
    #[arg(long)]
    pub no_trace: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(short = 'n', long, default_value = "8")]
    pub checkouts: usize,
    #[arg(long, default_value = "4")]
    pub threads: usize,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::parse_from([
            "bookchain",
            "serve",
            "--bind",
            "127.0.0.1:4000",
            "--no-trace",
        ]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, Some("127.0.0.1:4000".parse().unwrap()));
                assert!(args.no_trace);
                assert!(args.config.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn demo_defaults() {
        let cli = Cli::parse_from(["bookchain", "demo"]);
        match cli.command {
            Command::Demo(args) => {
                assert_eq!(args.checkouts, 8);
                assert_eq!(args.threads, 4);
                assert!(matches!(args.format, OutputFormat::Text));
            }
            _ => panic!("expected demo"),
        }
    }
}
