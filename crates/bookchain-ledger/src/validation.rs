use serde::Serialize;

use crate::block::Block;

/// Why a candidate block may not extend its predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    #[error("candidate previous hash does not match predecessor hash")]
    LinkageMismatch,

    #[error("candidate hash does not match its recomputed digest")]
    HashMismatch,

    #[error("candidate position is not predecessor position + 1")]
    PositionGap,
}

impl RejectReason {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkageMismatch => "linkage-mismatch",
            Self::HashMismatch => "hash-mismatch",
            Self::PositionGap => "position-gap",
        }
    }
}

/// Result of auditing a whole chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub length: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub position: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    InvalidGenesis,
    LinkageMismatch,
    HashMismatch,
    PositionGap,
}

impl From<RejectReason> for ViolationKind {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::LinkageMismatch => Self::LinkageMismatch,
            RejectReason::HashMismatch => Self::HashMismatch,
            RejectReason::PositionGap => Self::PositionGap,
        }
    }
}

/// Pure successor and chain validation. No locks, no I/O.
pub struct ChainValidator;

impl ChainValidator {
    /// Decide whether `candidate` legally extends `previous`.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. linkage: `candidate.previous_hash == previous.hash`
    /// 2. integrity: recomputed digest equals `candidate.hash`
    /// 3. ordering: `candidate.position == previous.position + 1`
    pub fn validate_successor(candidate: &Block, previous: &Block) -> Result<(), RejectReason> {
        if candidate.previous_hash != previous.hash {
            return Err(RejectReason::LinkageMismatch);
        }

        // A payload that cannot be re-encoded cannot be shown to match its hash.
        match candidate.digest() {
            Ok(computed) if computed == candidate.hash => {}
            _ => return Err(RejectReason::HashMismatch),
        }

        if previous.position.checked_add(1) != Some(candidate.position) {
            return Err(RejectReason::PositionGap);
        }

        Ok(())
    }

    pub fn is_valid_successor(candidate: &Block, previous: &Block) -> bool {
        Self::validate_successor(candidate, previous).is_ok()
    }

    /// Audit every block of a chain, collecting all violations.
    ///
    /// Unlike [`validate_successor`](Self::validate_successor), each adjacent
    /// pair is checked for linkage and ordering independently, and every
    /// block (genesis included) is checked for hash integrity.
    pub fn validate_chain(blocks: &[Block]) -> ValidationReport {
        let mut violations = Vec::new();

        match blocks.first() {
            None => violations.push(Violation {
                position: 0,
                kind: ViolationKind::InvalidGenesis,
                description: "chain has no genesis block".into(),
            }),
            Some(genesis) => {
                if genesis.position != 0 {
                    violations.push(Violation {
                        position: genesis.position,
                        kind: ViolationKind::InvalidGenesis,
                        description: format!(
                            "genesis at position {}, expected 0",
                            genesis.position
                        ),
                    });
                }
                if !genesis.previous_hash.is_empty() {
                    violations.push(Violation {
                        position: genesis.position,
                        kind: ViolationKind::InvalidGenesis,
                        description: "genesis has a previous hash".into(),
                    });
                }
            }
        }

        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                let prev = &blocks[index - 1];
                if block.previous_hash != prev.hash {
                    violations.push(Violation {
                        position: block.position,
                        kind: ViolationKind::LinkageMismatch,
                        description: format!(
                            "previous hash {} does not match block {} hash {}",
                            block.previous_hash.short(),
                            prev.position,
                            prev.hash.short()
                        ),
                    });
                }
                if prev.position.checked_add(1) != Some(block.position) {
                    violations.push(Violation {
                        position: block.position,
                        kind: ViolationKind::PositionGap,
                        description: format!(
                            "expected position {}, found {}",
                            prev.position.saturating_add(1),
                            block.position
                        ),
                    });
                }
            }

            match block.digest() {
                Ok(computed) if computed == block.hash => {}
                Ok(computed) => violations.push(Violation {
                    position: block.position,
                    kind: ViolationKind::HashMismatch,
                    description: format!(
                        "stored hash {} differs from computed {}",
                        block.hash.short(),
                        computed.short()
                    ),
                }),
                Err(e) => violations.push(Violation {
                    position: block.position,
                    kind: ViolationKind::HashMismatch,
                    description: format!("digest could not be computed: {e}"),
                }),
            }
        }

        ValidationReport {
            length: blocks.len(),
            violations,
        }
    }
}
