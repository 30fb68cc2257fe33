//! Ticket store lookups and mutations over the shared fixtures.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::sync::Arc;
use ticket_desk_core::{
    StoreError, TicketDocument, TicketEnvironment, TicketStatus, TicketStore,
};
use ticket_desk_testing::{
    FIXED_STATUS_CHANGE, TicketBuilder, moderation_queue, test_clock,
};

fn store() -> TicketStore {
    TicketStore::new(
        moderation_queue(),
        TicketEnvironment::new(Arc::new(test_clock()), "mod-1"),
    )
    .unwrap()
}

#[test]
fn rejects_duplicate_ticket_ids() {
    let mut document = moderation_queue();
    document.tickets.push(TicketBuilder::new("t2", "m2").build());

    let err = TicketStore::new(document, TicketEnvironment::default()).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateTicket { ticket_id } if ticket_id == "t2"));
}

#[test]
fn list_joins_originating_message() {
    let store = store();
    let views = store.list_tickets(None);

    let ids: Vec<_> = views.iter().map(|v| v.ticket.id.as_str()).collect();
    assert_eq!(ids, ["t1", "t2", "t3"]);
    assert_eq!(views[0].msg.as_ref().map(|m| m.id.as_str()), Some("m1"));
    assert_eq!(views[1].msg, None);
    assert_eq!(views[2].msg.as_ref().map(|m| m.id.as_str()), Some("m3"));
}

#[test]
fn list_does_not_touch_stored_tickets() {
    let store = store();
    let _ = store.list_tickets(None);
    assert_eq!(store.document(), &moderation_queue());
}

#[test]
fn list_on_empty_store_is_empty() {
    let store = TicketStore::new(TicketDocument::default(), TicketEnvironment::default()).unwrap();
    assert!(store.list_tickets(Some(5)).is_empty());
}

#[test]
fn find_message_handles_misses() {
    let store = store();
    assert_eq!(
        store.find_message_for_ticket("t1").map(|m| m.id.as_str()),
        Some("m1")
    );
    assert!(store.find_message_for_ticket("t2").is_none());
    assert!(store.find_message_for_ticket("nope").is_none());
}

#[test]
fn resolve_open_ticket() {
    let mut store = store();
    let resolved = store.resolve_ticket("t1").unwrap();

    assert_eq!(resolved.status, TicketStatus::Resolved);
    assert_eq!(resolved.resolved_by.as_deref(), Some("mod-1"));
    assert_eq!(
        resolved.ts_last_status_change.as_deref(),
        Some(FIXED_STATUS_CHANGE)
    );
    assert_eq!(store.get_ticket("t1"), Some(&resolved));
}

#[test]
fn resolve_twice_is_invalid_state() {
    let mut store = store();
    store.resolve_ticket("t1").unwrap();

    let err = store.resolve_ticket("t1").unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidState {
            status: TicketStatus::Resolved,
            ..
        }
    ));
}

#[test]
fn resolve_missing_ticket_is_not_found() {
    let mut store = store();
    let err = store.resolve_ticket("nope").unwrap_err();
    assert!(matches!(err, StoreError::TicketNotFound { ticket_id } if ticket_id == "nope"));
}

#[test]
fn remove_is_not_idempotent() {
    let mut store = store();
    let removed = store.remove_ticket("t2").unwrap();

    assert_eq!(removed.id, "t2");
    assert_eq!(store.ticket_count(), 2);
    assert!(store.get_ticket("t2").is_none());
    assert!(matches!(
        store.remove_ticket("t2"),
        Err(StoreError::TicketNotFound { .. })
    ));
    assert!(matches!(
        store.resolve_ticket("t2"),
        Err(StoreError::TicketNotFound { .. })
    ));
}

#[test]
fn context_messages_follow_store_order() {
    let store = store();
    let messages = store.context_messages("t1").unwrap();

    let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[test]
fn context_messages_skip_unknown_ids() {
    let store = store();
    let ids: Vec<_> = store
        .context_messages("t3")
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, ["m3"]);
}

#[test]
fn context_messages_for_missing_ticket_is_not_found() {
    let store = store();
    assert!(matches!(
        store.context_messages("nope"),
        Err(StoreError::TicketNotFound { .. })
    ));
}

proptest! {
    #[test]
    fn limited_list_is_prefix_of_full_list(limit in 0usize..6) {
        let store = store();
        let full = store.list_tickets(None);
        let limited = store.list_tickets(Some(limit));

        prop_assert!(limited.len() <= limit);
        prop_assert_eq!(&full[..limited.len()], &limited[..]);
    }
}
