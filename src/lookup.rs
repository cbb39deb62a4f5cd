/// Read-only lookup collaborators and their in-memory implementations.
///
/// The evaluator never owns message or group storage. It asks two questions:
/// who administers a group, and which record is the original of an edit chain.
/// `GroupDirectory` and `MessageTable` answer them from memory; an application
/// backed by a database implements the traits directly.
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use crate::ids::{GroupId, MessageId, ParticipantId};
use crate::model::{GroupRecord, MessageRecord};

// ---------------------------------------------------------------------------
// Collaborator contracts
// ---------------------------------------------------------------------------

/// Result of resolving a group's admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminLookup {
    Found(BTreeSet<ParticipantId>),
    NotFound,
}

impl AdminLookup {
    /// `NotFound` collapses to "not an admin".
    pub fn contains(&self, participant: &ParticipantId) -> bool {
        match self {
            AdminLookup::Found(admins) => admins.contains(participant),
            AdminLookup::NotFound => false,
        }
    }
}

pub trait GroupAdminLookup {
    fn group_admins(&self, group: &GroupId) -> AdminLookup;
}

pub trait MessageLookup {
    /// Fetch a message record by id, or `None` if storage has no such row.
    fn message(&self, id: &MessageId) -> Option<MessageRecord>;
}

impl<T: GroupAdminLookup + ?Sized> GroupAdminLookup for &T {
    fn group_admins(&self, group: &GroupId) -> AdminLookup {
        (**self).group_admins(group)
    }
}

impl<T: GroupAdminLookup + ?Sized> GroupAdminLookup for Arc<T> {
    fn group_admins(&self, group: &GroupId) -> AdminLookup {
        (**self).group_admins(group)
    }
}

impl<T: MessageLookup + ?Sized> MessageLookup for &T {
    fn message(&self, id: &MessageId) -> Option<MessageRecord> {
        (**self).message(id)
    }
}

impl<T: MessageLookup + ?Sized> MessageLookup for Arc<T> {
    fn message(&self, id: &MessageId) -> Option<MessageRecord> {
        (**self).message(id)
    }
}

// ---------------------------------------------------------------------------
// GroupDirectory
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct GroupDirectory {
    groups: BTreeMap<GroupId, GroupRecord>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a group record. Returns the previous record, if any.
    pub fn insert(&mut self, group: GroupRecord) -> Option<GroupRecord> {
        self.groups.insert(group.id, group)
    }

    pub fn get(&self, id: &GroupId) -> Option<&GroupRecord> {
        self.groups.get(id)
    }

    pub fn remove(&mut self, id: &GroupId) -> Option<GroupRecord> {
        self.groups.remove(id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl GroupAdminLookup for GroupDirectory {
    fn group_admins(&self, group: &GroupId) -> AdminLookup {
        match self.groups.get(group) {
            Some(record) => AdminLookup::Found(record.admins.clone()),
            None => AdminLookup::NotFound,
        }
    }
}

// ---------------------------------------------------------------------------
// MessageTable
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Message {0} already exists")]
    DuplicateMessage(MessageId),

    #[error("Edit {edit} references missing original {original}")]
    OriginalMissing { edit: MessageId, original: MessageId },

    #[error("Edit {edit} references {original}, which is itself an edit")]
    NestedEdit { edit: MessageId, original: MessageId },

    #[error("Edit {edit} has revision {revision}, below chain revision {latest_revision}")]
    RevisionRegressed {
        edit: MessageId,
        revision: u32,
        latest_revision: u32,
    },
}

/// Arena of message records keyed by id.
///
/// Every edit record points directly at the original of its chain, so
/// resolving an original is a single indexed lookup.
#[derive(Clone, Debug, Default)]
pub struct MessageTable {
    messages: BTreeMap<MessageId, MessageRecord>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Originals must be inserted before their edits.
    pub fn insert(&mut self, record: MessageRecord) -> Result<(), TableError> {
        if self.messages.contains_key(&record.id) {
            return Err(TableError::DuplicateMessage(record.id));
        }

        if let Some(original_id) = record.original_id.filter(|id| *id != record.id) {
            let original = self
                .messages
                .get(&original_id)
                .ok_or(TableError::OriginalMissing {
                    edit: record.id,
                    original: original_id,
                })?;

            if original.original_id.is_some_and(|id| id != original.id) {
                return Err(TableError::NestedEdit {
                    edit: record.id,
                    original: original_id,
                });
            }

            // Compare against the newest record of the chain, not just the root.
            let latest = self.latest_revision(&original_id).unwrap_or(original);
            if record.revision < latest.revision {
                return Err(TableError::RevisionRegressed {
                    edit: record.id,
                    revision: record.revision,
                    latest_revision: latest.revision,
                });
            }
        }

        self.messages.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: &MessageId) -> Option<&MessageRecord> {
        self.messages.get(id)
    }

    /// The highest revision of the chain rooted at `original`, or the original
    /// itself if it was never edited.
    pub fn latest_revision(&self, original: &MessageId) -> Option<&MessageRecord> {
        let root = self.messages.get(original)?;
        let latest = self
            .messages
            .values()
            .filter(|m| m.original_id == Some(*original) && m.id != *original)
            .max_by_key(|m| (m.revision, m.id));
        Some(latest.unwrap_or(root))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageLookup for MessageTable {
    fn message(&self, id: &MessageId) -> Option<MessageRecord> {
        self.messages.get(id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
