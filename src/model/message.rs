/// Read-only message snapshot consumed by the constraint evaluator.
///
/// A `MessageRecord` is either an original message or a later revision of
/// one. Revisions carry `original_id` and a `revision` greater than or equal to
/// the original's; the original itself has `original_id == None`.
use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, MessageId};
use crate::model::participant::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Sent from this device.
    Outgoing,
    /// Received from another participant.
    Incoming,
}

/// Who the conversation is with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationTarget {
    /// One-to-one conversation. Note-to-self when the participant is self.
    Participant(Participant),
    /// Group conversation, usually built with `GroupRecord::conversation`.
    /// `active` mirrors the group record at snapshot time.
    Group { id: GroupId, active: bool },
}

/// Content-kind flags. All default to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFlags {
    pub view_once: bool,
    pub has_audio: bool,
    pub has_shared_contact: bool,
    pub has_sticker: bool,
    pub has_poll: bool,
    pub has_gift_badge: bool,
    pub payment_notification: bool,
    pub payment_tombstone: bool,
    pub remote_deleted: bool,
    /// Group updates, profile changes, and other non-content records.
    pub update_message: bool,
    /// Delivered over the push transport (as opposed to SMS/MMS).
    pub push_transport: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    /// Client-assigned send time (ms since epoch).
    pub origin_timestamp_ms: i64,
    /// Delivery-backend timestamp (ms since epoch).
    pub server_timestamp_ms: i64,
    pub direction: Direction,
    /// Number of prior edits; 0 for a never-edited message.
    pub revision: u32,
    pub conversation: ConversationTarget,
    pub author: Participant,
    pub flags: ContentFlags,
    /// Set on edit records: the id of the original message of the chain.
    pub original_id: Option<MessageId>,
}

impl MessageRecord {
    /// An outgoing push message authored by `author` at `sent_at_ms`.
    pub fn outgoing(
        id: MessageId,
        author: Participant,
        conversation: ConversationTarget,
        sent_at_ms: i64,
    ) -> Self {
        MessageRecord {
            id,
            origin_timestamp_ms: sent_at_ms,
            server_timestamp_ms: sent_at_ms,
            direction: Direction::Outgoing,
            revision: 0,
            conversation,
            author,
            flags: ContentFlags {
                push_transport: true,
                ..ContentFlags::default()
            },
            original_id: None,
        }
    }

    /// An incoming push message from `author`, stamped by the server at
    /// `server_ms`.
    pub fn incoming(
        id: MessageId,
        author: Participant,
        conversation: ConversationTarget,
        sent_at_ms: i64,
        server_ms: i64,
    ) -> Self {
        MessageRecord {
            id,
            origin_timestamp_ms: sent_at_ms,
            server_timestamp_ms: server_ms,
            direction: Direction::Incoming,
            revision: 0,
            conversation,
            author,
            flags: ContentFlags {
                push_transport: true,
                ..ContentFlags::default()
            },
            original_id: None,
        }
    }

    /// Build the next revision of this message, pointing back at the chain's
    /// original.
    pub fn revised(&self, id: MessageId, sent_at_ms: i64, server_ms: i64) -> Self {
        MessageRecord {
            id,
            origin_timestamp_ms: sent_at_ms,
            server_timestamp_ms: server_ms,
            revision: self.revision.saturating_add(1),
            original_id: Some(self.original_id.unwrap_or(self.id)),
            ..self.clone()
        }
    }

    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }

    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }

    /// True for revision records (they carry a link to their original).
    pub fn is_edit(&self) -> bool {
        self.original_id.is_some()
    }

    pub fn group_id(&self) -> Option<&GroupId> {
        match &self.conversation {
            ConversationTarget::Group { id, .. } => Some(id),
            ConversationTarget::Participant(_) => None,
        }
    }

    /// The conversation target is the local user.
    pub fn targets_self(&self) -> bool {
        matches!(self.conversation, ConversationTarget::Participant(p) if p.is_self)
    }

    /// Recipient and author are both the local user.
    pub fn is_note_to_self(&self) -> bool {
        self.targets_self() && self.author.is_self
    }

    /// Not a group, or a group the local user is still active in.
    pub fn in_active_conversation(&self) -> bool {
        match self.conversation {
            ConversationTarget::Participant(_) => true,
            ConversationTarget::Group { active, .. } => active,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
