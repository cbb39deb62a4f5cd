use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{GroupId, ParticipantId};
use crate::model::message::ConversationTarget;

/// Snapshot of a group as held by group-membership storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub admins: BTreeSet<ParticipantId>,
    /// False once the local user has left or been removed.
    pub active: bool,
}

impl GroupRecord {
    pub fn new(id: GroupId, admins: impl IntoIterator<Item = ParticipantId>) -> Self {
        GroupRecord {
            id,
            admins: admins.into_iter().collect(),
            active: true,
        }
    }

    pub fn is_admin(&self, participant: &ParticipantId) -> bool {
        self.admins.contains(participant)
    }

    /// Conversation target for messages in this group, carrying the current
    /// `active` state into the message snapshot.
    pub fn conversation(&self) -> ConversationTarget {
        ConversationTarget::Group {
            id: self.id,
            active: self.active,
        }
    }
}
