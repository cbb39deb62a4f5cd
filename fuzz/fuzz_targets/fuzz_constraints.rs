#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shield_message_constraints::{
    ConstraintEvaluator, ContentFlags, ConversationTarget, Direction, GroupDirectory, GroupId,
    GroupRecord, MessageId, MessageRecord, MessageTable, Participant, ParticipantId,
};

/// Fuzz the constraint evaluator.
///
/// Tests:
/// - No operation panics on extreme timestamps or revision numbers
/// - Boolean operations agree with their `check_*` counterparts
/// - Edit resolution against a table that may or may not hold the original

#[derive(Arbitrary, Debug)]
struct MessageInput {
    origin_ms: i64,
    server_ms: i64,
    outgoing: bool,
    revision: u32,
    author: u8,
    author_is_self: bool,
    in_group: bool,
    group_active: bool,
    peer: u8,
    peer_is_self: bool,
    flags: u16,
    original: Option<u8>,
}

#[derive(Arbitrary, Debug)]
struct ConstraintInput {
    message: MessageInput,
    sender: u8,
    sender_is_self: bool,
    admins: Vec<u8>,
    action_ms: i64,
    store_original: bool,
}

fn participant(tag: u8, is_self: bool) -> Participant {
    Participant {
        id: ParticipantId::from_bytes([tag; 16]),
        is_self,
    }
}

fn build(input: &MessageInput) -> MessageRecord {
    let bit = |n: u16| input.flags & (1 << n) != 0;
    MessageRecord {
        id: MessageId(1),
        origin_timestamp_ms: input.origin_ms,
        server_timestamp_ms: input.server_ms,
        direction: if input.outgoing {
            Direction::Outgoing
        } else {
            Direction::Incoming
        },
        revision: input.revision,
        conversation: if input.in_group {
            ConversationTarget::Group {
                id: GroupId::from_bytes([0x01; 32]),
                active: input.group_active,
            }
        } else {
            ConversationTarget::Participant(participant(input.peer, input.peer_is_self))
        },
        author: participant(input.author, input.author_is_self),
        flags: ContentFlags {
            view_once: bit(0),
            has_audio: bit(1),
            has_shared_contact: bit(2),
            has_sticker: bit(3),
            has_poll: bit(4),
            has_gift_badge: bit(5),
            payment_notification: bit(6),
            payment_tombstone: bit(7),
            remote_deleted: bit(8),
            update_message: bit(9),
            push_transport: bit(10),
        },
        original_id: input.original.map(|id| MessageId(u64::from(id))),
    }
}

fuzz_target!(|input: ConstraintInput| {
    if input.admins.len() > 64 {
        return;
    }

    let mut groups = GroupDirectory::new();
    groups.insert(GroupRecord::new(
        GroupId::from_bytes([0x01; 32]),
        input.admins.iter().map(|a| ParticipantId::from_bytes([*a; 16])),
    ));

    let target = build(&input.message);
    let mut table = MessageTable::new();
    if input.store_original {
        if let Some(original_id) = target.original_id {
            let mut original = target.clone();
            original.id = original_id;
            original.original_id = None;
            original.revision = 0;
            let _ = table.insert(original);
        }
    }

    let eval = ConstraintEvaluator::with_defaults(&groups, &table);
    let sender = participant(input.sender, input.sender_is_self);

    assert_eq!(
        eval.can_accept_remote_delete(&target, &sender, input.action_ms),
        eval.check_remote_delete(&target, &sender, input.action_ms).is_ok()
    );
    assert_eq!(
        eval.can_accept_remote_edit(&target, &sender, input.action_ms),
        eval.can_accept_remote_delete(&target, &sender, input.action_ms)
    );
    assert_eq!(
        eval.can_send_delete(&target, input.action_ms),
        eval.check_send_delete(&target, input.action_ms).is_ok()
    );
    let _ = eval.can_send_delete_batch([&target], input.action_ms);
    let _ = eval.within_edit_limit(&target);
    let _ = eval.can_send_edit(&target, input.action_ms);
    let _ = eval.can_send_edit_at_send_time(&target);
});
