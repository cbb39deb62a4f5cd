use serde::{Deserialize, Serialize};

use crate::ids::ParticipantId;

/// A conversation party as seen by the local session.
///
/// `is_self` is resolved by the caller for the current session. At most one
/// participant per evaluation context carries the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub is_self: bool,
}

impl Participant {
    /// The local user.
    pub fn local(id: ParticipantId) -> Self {
        Participant { id, is_self: true }
    }

    /// Anyone other than the local user.
    pub fn remote(id: ParticipantId) -> Self {
        Participant { id, is_self: false }
    }
}
