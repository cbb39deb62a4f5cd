/// Rules for issuing a delete or edit from this device.
///
/// Only the author may delete or edit, only within the send window (measured
/// from the message's own send time), and only for ordinary content. An edit
/// is additionally gated on the delete eligibility of the chain's original
/// and on a per-message edit ceiling.
use std::borrow::Cow;

use crate::constraints::error::{BatchRejection, ConstraintError, Rejection};
use crate::constraints::ConstraintEvaluator;
use crate::lookup::{GroupAdminLookup, MessageLookup};
use crate::model::MessageRecord;

impl<G: GroupAdminLookup, M: MessageLookup> ConstraintEvaluator<G, M> {
    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Check whether the local user may delete `message` for everyone at `now_ms`.
    pub fn check_send_delete(&self, message: &MessageRecord, now_ms: i64) -> Result<(), Rejection> {
        let result = self.send_delete_rules(message, now_ms);
        if let Err(reason) = &result {
            log::debug!("Delete of {} not allowed: {}", message.id, reason);
        }
        result
    }

    pub fn can_send_delete(&self, message: &MessageRecord, now_ms: i64) -> bool {
        self.check_send_delete(message, now_ms).is_ok()
    }

    /// Check every message of a batch; reports the first that fails.
    pub fn check_send_delete_batch<'m, I>(
        &self,
        messages: I,
        now_ms: i64,
    ) -> Result<(), BatchRejection>
    where
        I: IntoIterator<Item = &'m MessageRecord>,
    {
        for message in messages {
            self.check_send_delete(message, now_ms)
                .map_err(|reason| BatchRejection {
                    message: message.id,
                    reason,
                })?;
        }
        Ok(())
    }

    /// True iff every message may be deleted. An empty batch is allowed.
    pub fn can_send_delete_batch<'m, I>(&self, messages: I, now_ms: i64) -> bool
    where
        I: IntoIterator<Item = &'m MessageRecord>,
    {
        self.check_send_delete_batch(messages, now_ms).is_ok()
    }

    fn send_delete_rules(&self, message: &MessageRecord, now_ms: i64) -> Result<(), Rejection> {
        let flags = &message.flags;

        if flags.update_message {
            return Err(Rejection::UpdateMessage);
        }
        if !message.is_outgoing() {
            return Err(Rejection::NotOutgoing);
        }
        if !flags.push_transport {
            return Err(Rejection::UnsupportedTransport);
        }
        if !message.in_active_conversation() {
            return Err(Rejection::InactiveGroup);
        }
        if flags.remote_deleted {
            return Err(Rejection::AlreadyRemoteDeleted);
        }
        if flags.has_gift_badge {
            return Err(Rejection::GiftBadge);
        }
        if flags.payment_notification {
            return Err(Rejection::PaymentNotification);
        }
        if flags.payment_tombstone {
            return Err(Rejection::PaymentTombstone);
        }

        // Note-to-self has no send window.
        let elapsed_ms = now_ms.saturating_sub(message.origin_timestamp_ms);
        let limit_ms = self.config.send_threshold_ms();
        if elapsed_ms >= limit_ms && !message.targets_self() {
            return Err(Rejection::SendWindowExpired {
                elapsed_ms,
                limit_ms,
            });
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Edit
    // -----------------------------------------------------------------------

    pub fn within_edit_limit(&self, message: &MessageRecord) -> bool {
        message.revision < self.config.max_edit_count
    }

    /// Check whether the local user may edit `target` at `now_ms`.
    ///
    /// `target` is the latest revision the user is looking at. The send
    /// window and content rules of deletion apply to the chain's original.
    pub fn check_send_edit(
        &self,
        target: &MessageRecord,
        now_ms: i64,
    ) -> Result<(), ConstraintError> {
        let original = self.resolve_original(target)?;

        let result = self.send_edit_rules(target, &original, now_ms);
        if let Err(reason) = &result {
            log::debug!("Edit of {} not allowed: {}", target.id, reason);
        }
        result.map_err(ConstraintError::from)
    }

    /// `Ok(false)` for a rejected edit; `Err` only when the chain's original
    /// cannot be resolved.
    pub fn can_send_edit(
        &self,
        target: &MessageRecord,
        now_ms: i64,
    ) -> Result<bool, ConstraintError> {
        match self.check_send_edit(target, now_ms) {
            Ok(()) => Ok(true),
            Err(ConstraintError::Rejected(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// `can_send_edit` evaluated at the target's own send time.
    pub fn can_send_edit_at_send_time(
        &self,
        target: &MessageRecord,
    ) -> Result<bool, ConstraintError> {
        self.can_send_edit(target, target.origin_timestamp_ms)
    }

    fn send_edit_rules(
        &self,
        target: &MessageRecord,
        original: &MessageRecord,
        now_ms: i64,
    ) -> Result<(), Rejection> {
        self.send_delete_rules(original, now_ms)?;

        if !target.is_note_to_self() && !self.within_edit_limit(target) {
            return Err(Rejection::EditLimitReached {
                revision: target.revision,
                max: self.config.max_edit_count,
            });
        }

        let flags = &target.flags;
        if flags.view_once {
            return Err(Rejection::ViewOnce);
        }
        if flags.has_audio {
            return Err(Rejection::Audio);
        }
        if flags.has_shared_contact {
            return Err(Rejection::SharedContact);
        }
        if flags.has_sticker {
            return Err(Rejection::Sticker);
        }
        if flags.has_poll {
            return Err(Rejection::Poll);
        }

        Ok(())
    }

    /// The original of `target`'s edit chain, or `target` itself when it is
    /// not a revision.
    fn resolve_original<'t>(
        &self,
        target: &'t MessageRecord,
    ) -> Result<Cow<'t, MessageRecord>, ConstraintError> {
        match target.original_id {
            Some(original_id) if original_id != target.id => {
                match self.messages.message(&original_id) {
                    Some(original) => Ok(Cow::Owned(original)),
                    None => {
                        log::warn!(
                            "Edit {} references original {} missing from storage",
                            target.id,
                            original_id
                        );
                        Err(ConstraintError::OriginalMessageNotFound(original_id))
                    }
                }
            }
            _ => Ok(Cow::Borrowed(target)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
