//! End-to-end scenarios: one group conversation seen from two devices.
//!
//! Each device builds its own evaluator over its own storage snapshot and the
//! same delete/edit must be judged identically on both.

use shield_message_constraints::{
    ConstraintConfig, ConstraintError, ConstraintEvaluator, ConversationTarget, GroupDirectory,
    GroupId, GroupRecord, MessageId, MessageRecord, MessageTable, Participant, ParticipantId,
    Rejection,
};
use std::sync::Arc;
use std::time::Duration;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn alice_id() -> ParticipantId {
    ParticipantId::from_pubkey(&[0xA1; 32])
}

fn bob_id() -> ParticipantId {
    ParticipantId::from_pubkey(&[0xB0; 32])
}

fn carol_id() -> ParticipantId {
    ParticipantId::from_pubkey(&[0xC4; 32])
}

fn group() -> GroupId {
    GroupId::from_bytes([0x42; 32])
}

/// The group as every member sees it: carol administers it.
fn group_record() -> GroupRecord {
    GroupRecord::new(group(), [carol_id()])
}

fn shared_directory() -> Arc<GroupDirectory> {
    let mut directory = GroupDirectory::new();
    directory.insert(group_record());
    Arc::new(directory)
}

fn conversation() -> ConversationTarget {
    group_record().conversation()
}

#[test]
fn admin_delete_is_accepted_by_author_and_members_alike() {
    init_logging();
    let groups = shared_directory();
    let eval = ConstraintEvaluator::with_defaults(groups.clone(), MessageTable::new());

    // Alice's device: her own outgoing message.
    let on_alice = MessageRecord::outgoing(
        MessageId(1),
        Participant::local(alice_id()),
        conversation(),
        1_000,
    );
    // Bob's device: the same message, incoming.
    let on_bob = MessageRecord::incoming(
        MessageId(77),
        Participant::remote(alice_id()),
        conversation(),
        1_000,
        1_200,
    );

    let carol = Participant::remote(carol_id());
    let much_later = 1_200 + 30 * DAY_MS;
    assert!(eval.can_accept_remote_delete(&on_alice, &carol, much_later));
    assert!(eval.can_accept_remote_delete(&on_bob, &carol, much_later));
}

#[test]
fn non_admin_member_delete_is_rejected_everywhere() {
    init_logging();
    let eval = ConstraintEvaluator::with_defaults(shared_directory(), MessageTable::new());

    let on_alice = MessageRecord::outgoing(
        MessageId(1),
        Participant::local(alice_id()),
        conversation(),
        1_000,
    );
    let on_carol = MessageRecord::incoming(
        MessageId(5),
        Participant::remote(alice_id()),
        conversation(),
        1_000,
        1_200,
    );

    let bob = Participant::remote(bob_id());
    assert_eq!(
        eval.check_remote_delete(&on_alice, &bob, 2_000),
        Err(Rejection::InvalidDirection)
    );
    assert_eq!(
        eval.check_remote_delete(&on_carol, &bob, 2_000),
        Err(Rejection::SenderMismatch)
    );
}

#[test]
fn author_edit_chain_until_ceiling() {
    init_logging();
    let me = Participant::local(alice_id());
    let mut table = MessageTable::new();

    let original = MessageRecord::outgoing(MessageId(100), me, conversation(), 0);
    table.insert(original.clone()).unwrap();

    let mut latest = original;
    for step in 1..=10u64 {
        let at = step as i64 * 60_000;
        latest = latest.revised(MessageId(100 + step), at, at);
        table.insert(latest.clone()).unwrap();
    }
    assert_eq!(table.latest_revision(&MessageId(100)).unwrap().revision, 10);

    let eval = ConstraintEvaluator::with_defaults(shared_directory(), &table);
    let ninth = table.get(&MessageId(109)).unwrap();
    assert_eq!(eval.can_send_edit(ninth, HOUR_MS), Ok(true));
    assert!(!eval.within_edit_limit(&latest));
    assert_eq!(eval.can_send_edit(&latest, HOUR_MS), Ok(false));

    // Receivers accept the author's edits inside the window.
    let on_bob = MessageRecord::incoming(
        MessageId(9),
        Participant::remote(alice_id()),
        conversation(),
        0,
        10,
    );
    assert!(eval.can_accept_remote_edit(&on_bob, &Participant::remote(alice_id()), DAY_MS));
}

#[test]
fn dangling_original_reference_is_reported() {
    init_logging();
    let me = Participant::local(alice_id());
    let original = MessageRecord::outgoing(MessageId(1), me, conversation(), 0);
    let revision = original.revised(MessageId(2), 10, 10);

    let eval = ConstraintEvaluator::with_defaults(shared_directory(), MessageTable::new());
    assert_eq!(
        eval.check_send_edit(&revision, 20),
        Err(ConstraintError::OriginalMessageNotFound(MessageId(1)))
    );
}

#[test]
fn custom_config_from_json() {
    init_logging();
    let config = ConstraintConfig::from_json(
        r#"{"receive_threshold_ms":3600000,"send_threshold_ms":7200000,"max_edit_count":2}"#,
    )
    .unwrap();
    assert_eq!(config.send_threshold, Duration::from_secs(2 * 60 * 60));

    let eval = ConstraintEvaluator::new(config, shared_directory(), MessageTable::new()).unwrap();
    assert_eq!(eval.edit_threshold_hours(), 2);

    let mut msg = MessageRecord::outgoing(
        MessageId(1),
        Participant::local(alice_id()),
        conversation(),
        0,
    );
    assert!(eval.can_send_delete(&msg, 2 * HOUR_MS - 1));
    assert!(!eval.can_send_delete(&msg, 2 * HOUR_MS));

    msg.revision = 2;
    assert_eq!(eval.can_send_edit(&msg, 1), Ok(false));

    let incoming = MessageRecord::incoming(
        MessageId(2),
        Participant::remote(bob_id()),
        conversation(),
        0,
        0,
    );
    let bob = Participant::remote(bob_id());
    assert!(eval.can_accept_remote_delete(&incoming, &bob, HOUR_MS - 1));
    assert!(!eval.can_accept_remote_delete(&incoming, &bob, HOUR_MS));
}

#[test]
fn batch_delete_over_mixed_selection() {
    init_logging();
    let me = Participant::local(alice_id());
    let eval = ConstraintEvaluator::with_defaults(shared_directory(), MessageTable::new());

    let selection: Vec<MessageRecord> = (0..5)
        .map(|i| MessageRecord::outgoing(MessageId(i), me, conversation(), i as i64 * HOUR_MS))
        .collect();
    assert!(eval.can_send_delete_batch(&selection, 5 * HOUR_MS));
    assert!(!eval.can_send_delete_batch(&selection, DAY_MS + HOUR_MS / 2));

    let rejection = eval
        .check_send_delete_batch(&selection, DAY_MS + HOUR_MS / 2)
        .unwrap_err();
    assert_eq!(rejection.message, MessageId(0));
}

#[test]
fn leaving_the_group_blocks_local_deletes_but_not_remote_ones() {
    init_logging();
    let me = Participant::local(alice_id());
    let mut record = group_record();
    record.active = false;

    let mut directory = GroupDirectory::new();
    directory.insert(record.clone());
    let eval = ConstraintEvaluator::with_defaults(directory, MessageTable::new());

    let msg = MessageRecord::outgoing(MessageId(1), me, record.conversation(), 0);
    assert_eq!(eval.check_send_delete(&msg, HOUR_MS), Err(Rejection::InactiveGroup));

    // Admin authority comes from the directory, not the local membership state.
    let carol = Participant::remote(carol_id());
    assert!(eval.can_accept_remote_delete(&msg, &carol, 3 * DAY_MS));
}
