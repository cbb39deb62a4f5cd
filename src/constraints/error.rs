use thiserror::Error;

use crate::ids::MessageId;

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a delete or edit is not permitted. A negative decision, not a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    // Remote delete / edit acceptance
    #[error("Sender and message direction do not match")]
    InvalidDirection,

    #[error("Sender is neither the author, self, nor a group admin")]
    SenderMismatch,

    #[error("Remote action arrived {elapsed_ms} ms after the message (limit {limit_ms} ms)")]
    ReceiveWindowExpired { elapsed_ms: i64, limit_ms: i64 },

    // Local delete
    #[error("Update messages cannot be deleted or edited")]
    UpdateMessage,

    #[error("Only outgoing messages can be deleted or edited")]
    NotOutgoing,

    #[error("Message was not sent over the push transport")]
    UnsupportedTransport,

    #[error("Group is no longer active")]
    InactiveGroup,

    #[error("Message already remote-deleted")]
    AlreadyRemoteDeleted,

    #[error("Gift badge messages cannot be deleted or edited")]
    GiftBadge,

    #[error("Payment notifications cannot be deleted or edited")]
    PaymentNotification,

    #[error("Payment tombstones cannot be deleted or edited")]
    PaymentTombstone,

    #[error("Message sent {elapsed_ms} ms ago (limit {limit_ms} ms)")]
    SendWindowExpired { elapsed_ms: i64, limit_ms: i64 },

    // Local edit
    #[error("Message has {revision} edits (limit {max})")]
    EditLimitReached { revision: u32, max: u32 },

    #[error("View-once messages cannot be edited")]
    ViewOnce,

    #[error("Audio messages cannot be edited")]
    Audio,

    #[error("Shared contacts cannot be edited")]
    SharedContact,

    #[error("Stickers cannot be edited")]
    Sticker,

    #[error("Polls cannot be edited")]
    Poll,
}

/// First message of a batch that failed the delete check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Message {message} cannot be deleted: {reason}")]
pub struct BatchRejection {
    pub message: MessageId,
    pub reason: Rejection,
}

// ---------------------------------------------------------------------------
// ConstraintError
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    /// The edit record names an original the message lookup cannot resolve.
    /// This is a wiring defect between storage and the caller.
    #[error("Original message not found: {0}")]
    OriginalMessageNotFound(MessageId),
}
