//! # Shield Message Constraints
//!
//! **Edit and remote-delete policy for sent and received messages.**
//!
//! Every participant of a conversation applies a delete or edit on its own
//! schedule. This crate answers one question the same way on every device:
//! *is this action valid right now, given what I was told?*
//!
//! - **Sending**: may the local user delete or edit a message they sent?
//! - **Receiving**: should a remote delete or edit from another participant
//!   be applied, including group-admin overrides?
//!
//! ## Quick Start
//!
//! ```rust
//! use shield_message_constraints::{
//!     ConstraintEvaluator, ConversationTarget, GroupDirectory, MessageId, MessageRecord,
//!     MessageTable, Participant, ParticipantId,
//! };
//!
//! let me = Participant::local(ParticipantId::from_pubkey(&[0x01; 32]));
//! let alice = Participant::remote(ParticipantId::from_pubkey(&[0x02; 32]));
//!
//! let groups = GroupDirectory::new();
//! let messages = MessageTable::new();
//! let eval = ConstraintEvaluator::with_defaults(&groups, &messages);
//!
//! let msg = MessageRecord::outgoing(MessageId(1), me, ConversationTarget::Participant(alice), 0);
//! assert!(eval.can_send_delete(&msg, 60_000));
//! assert_eq!(eval.can_send_edit(&msg, 60_000), Ok(true));
//! assert_eq!(eval.edit_threshold_hours(), 24);
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ids`] | Participant, group and message identifiers |
//! | [`model`] | Read-only message, participant and group snapshots |
//! | [`lookup`] | Group-admin and original-message collaborators, in-memory arenas |
//! | [`config`] | Thresholds and edit ceiling |
//! | [`constraints`] | The evaluator: send and receive rules, rejection reasons |

// Crate-level lint configuration — suppress stylistic warnings that don't affect correctness.
#![allow(clippy::empty_line_after_doc_comments, clippy::doc_lazy_continuation)]

// ── Public modules ──────────────────────────────────────────────────────────

/// Identity types: `ParticipantId`, `GroupId`, `MessageId`.
pub mod ids;

/// Message, participant and group snapshots.
pub mod model;

/// Lookup collaborators and in-memory implementations.
pub mod lookup;

/// Evaluator configuration.
pub mod config;

/// Delete and edit constraint evaluation.
pub mod constraints;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use config::{ConfigError, ConstraintConfig};
pub use constraints::{BatchRejection, ConstraintError, ConstraintEvaluator, Rejection};
pub use ids::{GroupId, MessageId, ParticipantId};
pub use lookup::{
    AdminLookup, GroupAdminLookup, GroupDirectory, MessageLookup, MessageTable, TableError,
};
pub use model::{
    ContentFlags, ConversationTarget, Direction, GroupRecord, MessageRecord, Participant,
};

// ── Library metadata ────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────
