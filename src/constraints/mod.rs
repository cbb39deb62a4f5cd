/// Constraint evaluator: decides whether a message may be remotely deleted
/// or edited, both when issuing the action and when receiving it.
///
/// The evaluator is a pure function of its arguments plus a fixed
/// `ConstraintConfig`. It never reads a clock: every operation takes the
/// relevant timestamp in milliseconds. Two read-only collaborators supply
/// what message snapshots cannot carry:
///
/// - `GroupAdminLookup` — admin set of a group (remote acceptance only)
/// - `MessageLookup` — original record of an edit chain (edit sending only)
///
/// # Module structure
/// - `error` — `Rejection` reasons and `ConstraintError`
/// - `remote` — accepting remote deletes and edits
/// - `send` — issuing deletes and edits locally
pub mod error;
mod remote;
mod send;

pub use error::{BatchRejection, ConstraintError, Rejection};

use crate::config::{ConfigError, ConstraintConfig};
use crate::lookup::{GroupAdminLookup, MessageLookup};

#[derive(Debug, Clone)]
pub struct ConstraintEvaluator<G, M> {
    config: ConstraintConfig,
    groups: G,
    messages: M,
}

impl<G: GroupAdminLookup, M: MessageLookup> ConstraintEvaluator<G, M> {
    /// Create an evaluator with a validated configuration.
    pub fn new(config: ConstraintConfig, groups: G, messages: M) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            groups,
            messages,
        })
    }

    /// Create with default thresholds (2 days receive, 1 day send, 10 edits).
    pub fn with_defaults(groups: G, messages: M) -> Self {
        Self {
            config: ConstraintConfig::default(),
            groups,
            messages,
        }
    }

    pub fn config(&self) -> &ConstraintConfig {
        &self.config
    }

    /// Send-side window in whole hours, for user-facing copy.
    pub fn edit_threshold_hours(&self) -> u64 {
        self.config.send_threshold.as_secs() / 3600
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
