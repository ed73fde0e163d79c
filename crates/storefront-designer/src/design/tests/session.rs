use super::common::*;
use serde_json::json;

use crate::design::catalog::HEADER_ID;
use crate::design::document::DesignDocument;
use crate::design::ordering::{Direction, EditError};
use crate::design::reconcile::reconcile;
use crate::design::session::{
    DesignEdit, DesignSession, SessionError, SessionNotice, SessionPhase,
};
use crate::design::store::{DesignStore, StoreError};

fn hide(section_id: &str) -> DesignEdit {
    DesignEdit::SetVisibility {
        section_id: section_id.to_string(),
        visible: false,
    }
}

#[test]
fn load_failure_falls_back_to_defaults_with_notice() {
    let session = DesignSession::load(store_id(), &UnavailableStore);

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(!session.is_dirty());
    assert_eq!(session.document(), &reconcile(None));
    assert!(matches!(
        session.notices(),
        [SessionNotice::LoadFallback { .. }]
    ));
}

#[test]
fn malformed_stored_payload_falls_back_with_notice() {
    let store = MemoryDesignStore::with_payload(&store_id(), json!({ "sections": "oops" }));
    let session = DesignSession::load(store_id(), &store);

    assert_eq!(session.document(), &reconcile(None));
    assert_eq!(session.notices().len(), 1);
}

#[test]
fn loaded_documents_are_reconciled() {
    let store = MemoryDesignStore::with_payload(&store_id(), legacy_payload());
    let session = DesignSession::load(store_id(), &store);

    let expected = reconcile(DesignDocument::from_value(&legacy_payload()).expect("decodes"));
    assert_eq!(session.document(), &expected);
    // The entry with a numeric id is unreadable and gets reported.
    assert!(matches!(
        session.notices(),
        [SessionNotice::LoadRepaired { .. }]
    ));
}

#[test]
fn unreadable_section_settings_keep_the_users_choices() {
    let store = MemoryDesignStore::with_payload(
        &store_id(),
        json!({
            "sections": [
                { "id": "salary", "title": "お給料", "visible": false, "settings": "oops" }
            ]
        }),
    );
    let session = DesignSession::load(store_id(), &store);

    let salary = session.document().section("salary").expect("salary kept");
    assert!(!salary.visible);
    assert_eq!(salary.title, "お給料");
    assert_eq!(session.notices().len(), 1);
    let notice = &session.notices()[0];
    assert!(matches!(notice, SessionNotice::LoadRepaired { .. }));
    assert!(notice.message().contains("salary"));
}

#[test]
fn clean_payloads_load_without_notices() {
    let store = MemoryDesignStore::with_payload(
        &store_id(),
        json!({ "sections": [{ "id": "salary", "order": 1, "visible": false }] }),
    );
    let session = DesignSession::load(store_id(), &store);
    assert!(session.notices().is_empty());
}

#[test]
fn edits_are_rejected_while_loading() {
    let mut session = DesignSession::new(store_id());
    assert!(matches!(
        session.apply(hide("gallery")),
        Err(SessionError::NotReady)
    ));
    assert!(matches!(session.begin_save(), Err(SessionError::NotReady)));
}

#[test]
fn mutations_mark_the_session_dirty() {
    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    assert!(!session.is_dirty());

    session.apply(hide("gallery")).expect("hide gallery");
    assert!(session.is_dirty());
    assert!(!session.document().section("gallery").expect("gallery").visible);
}

#[test]
fn no_op_edits_leave_the_session_clean() {
    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    let first = page_order(session.document())[0].clone();

    session
        .apply(DesignEdit::Move {
            section_id: first,
            direction: Direction::Up,
        })
        .expect("boundary move");
    assert!(!session.is_dirty());
}

#[test]
fn failed_edits_surface_and_keep_state() {
    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    let before = session.document().clone();

    let result = session.apply(hide(HEADER_ID));
    assert!(matches!(result, Err(SessionError::Edit(EditError::Pinned))));
    assert_eq!(session.document(), &before);
    assert!(!session.is_dirty());
}

#[test]
fn successful_save_cleans_and_round_trips() {
    let store = MemoryDesignStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session.apply(hide("blog")).expect("hide blog");

    session.save(&store).expect("save succeeds");
    assert!(!session.is_dirty());
    assert_eq!(session.phase(), SessionPhase::Ready);

    let reloaded = DesignSession::load(store_id(), &store);
    assert_eq!(reloaded.document(), session.document());
}

#[test]
fn failed_save_keeps_the_session_dirty() {
    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    session.apply(hide("blog")).expect("hide blog");

    let result = session.save(&RejectingStore);
    assert!(matches!(
        result,
        Err(SessionError::Save(StoreError::Rejected(_)))
    ));
    assert!(session.is_dirty());
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(matches!(
        session.notices(),
        [SessionNotice::SaveFailed { .. }]
    ));
    assert!(!session.document().section("blog").expect("blog").visible);
}

#[test]
fn edits_during_an_in_flight_save_stay_dirty() {
    let store = MemoryDesignStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session.apply(hide("blog")).expect("hide blog");

    let ticket = session.begin_save().expect("begin save");
    assert_eq!(session.phase(), SessionPhase::Saving);
    assert!(matches!(session.begin_save(), Err(SessionError::SaveInFlight)));

    session.apply(hide("gallery")).expect("edit while saving");

    let outcome = store.save(session.store_id(), ticket.document());
    session.complete_save(ticket, outcome).expect("save completes");

    assert!(session.is_dirty());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn stale_tickets_are_refused() {
    let store = MemoryDesignStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session.apply(hide("blog")).expect("hide blog");

    let ticket = session.begin_save().expect("begin save");
    let stale = ticket.clone();
    session.complete_save(ticket, Ok(())).expect("first completion");

    assert!(matches!(
        session.complete_save(stale, Ok(())),
        Err(SessionError::UnknownTicket)
    ));
}

#[test]
fn tickets_from_an_earlier_save_cannot_settle_the_current_one() {
    let store = MemoryDesignStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session.apply(hide("blog")).expect("hide blog");

    let first = session.begin_save().expect("first save");
    let stale = first.clone();
    session
        .complete_save(first, Err(StoreError::Unavailable("timeout".to_string())))
        .expect_err("first save fails");

    let second = session.begin_save().expect("retry");
    assert_eq!(stale.revision(), second.revision());
    assert!(second.sequence() > stale.sequence());

    assert!(matches!(
        session.complete_save(stale, Ok(())),
        Err(SessionError::UnknownTicket)
    ));
    assert_eq!(session.phase(), SessionPhase::Saving);
    assert!(session.is_dirty());

    session.complete_save(second, Ok(())).expect("retry completes");
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(!session.is_dirty());
}

#[test]
fn preview_reflects_unsaved_edits() {
    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    let before = session.preview(&Default::default()).len();

    session.apply(hide("gallery")).expect("hide gallery");
    let blocks = session.preview(&Default::default());

    assert_eq!(blocks.len(), before - 1);
    assert!(blocks.iter().all(|block| block.section_id != "gallery"));
}

#[test]
fn edits_deserialize_from_tagged_json() {
    let edit: DesignEdit = serde_json::from_value(json!({
        "action": "reorder",
        "section_id": "blog",
        "destination": 0
    }))
    .expect("edit decodes");

    let mut session = DesignSession::load(store_id(), &MemoryDesignStore::default());
    session.apply(edit).expect("reorder applies");
    assert_eq!(page_order(session.document())[0], "blog");
}
