/// Acceptance rules for remote deletes and edits.
///
/// A remote action is applied only if all three gates pass:
/// 1. **Direction**: the sender may act on a message flowing this way.
/// 2. **Identity**: the sender authored the message, is self acting on an
///    outgoing message, or administers the group.
/// 3. **Timing**: the action's server timestamp falls inside the receive
///    window, unless self is acting on its own message or a group admin
///    (other than self) issued it.
///
/// Edits share the delete envelope exactly.
use crate::constraints::error::Rejection;
use crate::constraints::ConstraintEvaluator;
use crate::lookup::{GroupAdminLookup, MessageLookup};
use crate::model::{MessageRecord, Participant};

impl<G: GroupAdminLookup, M: MessageLookup> ConstraintEvaluator<G, M> {
    /// Check an incoming remote delete of `target` sent by `sender`.
    pub fn check_remote_delete(
        &self,
        target: &MessageRecord,
        sender: &Participant,
        server_timestamp_ms: i64,
    ) -> Result<(), Rejection> {
        let result = self.remote_envelope(target, sender, server_timestamp_ms);
        if let Err(reason) = &result {
            log::debug!(
                "Remote delete of {} from {} rejected: {}",
                target.id,
                sender.id,
                reason
            );
        }
        result
    }

    pub fn can_accept_remote_delete(
        &self,
        target: &MessageRecord,
        sender: &Participant,
        server_timestamp_ms: i64,
    ) -> bool {
        self.check_remote_delete(target, sender, server_timestamp_ms)
            .is_ok()
    }

    /// Check an incoming remote edit. Same gates as a remote delete.
    pub fn check_remote_edit(
        &self,
        target: &MessageRecord,
        sender: &Participant,
        server_timestamp_ms: i64,
    ) -> Result<(), Rejection> {
        let result = self.remote_envelope(target, sender, server_timestamp_ms);
        if let Err(reason) = &result {
            log::debug!(
                "Remote edit of {} from {} rejected: {}",
                target.id,
                sender.id,
                reason
            );
        }
        result
    }

    pub fn can_accept_remote_edit(
        &self,
        target: &MessageRecord,
        sender: &Participant,
        server_timestamp_ms: i64,
    ) -> bool {
        self.check_remote_edit(target, sender, server_timestamp_ms)
            .is_ok()
    }

    fn remote_envelope(
        &self,
        target: &MessageRecord,
        sender: &Participant,
        server_timestamp_ms: i64,
    ) -> Result<(), Rejection> {
        let self_is_sender = sender.is_self;
        let outgoing = target.is_outgoing();
        let self_own_message = self_is_sender && outgoing;
        let sent_by_admin = self.sent_by_admin(target, sender);

        let valid_direction = self_own_message
            || (!self_is_sender && target.is_incoming())
            || (sent_by_admin && outgoing);
        if !valid_direction {
            return Err(Rejection::InvalidDirection);
        }

        let valid_sender = target.author.id == sender.id || self_own_message || sent_by_admin;
        if !valid_sender {
            return Err(Rejection::SenderMismatch);
        }

        // Self acting on its own message is timed from the local send time,
        // everyone else from the server timestamp.
        let effective_ms = if self_own_message {
            target.origin_timestamp_ms
        } else {
            target.server_timestamp_ms
        };
        let elapsed_ms = server_timestamp_ms.saturating_sub(effective_ms);
        let limit_ms = self.config.receive_threshold_ms();

        let within_window = elapsed_ms < limit_ms;
        let admin_bypass = !self_is_sender && sent_by_admin;
        if !(within_window || self_own_message || admin_bypass) {
            return Err(Rejection::ReceiveWindowExpired {
                elapsed_ms,
                limit_ms,
            });
        }

        Ok(())
    }

    /// Sender is an admin of the message's group. Unknown groups and 1:1
    /// conversations yield false.
    fn sent_by_admin(&self, target: &MessageRecord, sender: &Participant) -> bool {
        match target.group_id() {
            Some(group) => self.groups.group_admins(group).contains(&sender.id),
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
