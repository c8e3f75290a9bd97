use assert_matches::assert_matches;

use booking_queue_cell::*;
use doctor_cell::{DoctorId, TokenStatus};
use super::{assert_queue_invariants, doctor, ClinicTestUtils};

#[test]
fn test_transition_unknown_doctor_and_token() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    service.book_consultation("A", Some(doctor_id)).unwrap();

    assert_matches!(
        service.mark_completed(DoctorId::new(), 1),
        Err(QueueError::DoctorNotFound(_))
    );
    assert_matches!(
        service.mark_no_show(doctor_id, 42),
        Err(QueueError::TokenNotFound { token_id: 42, .. })
    );
}

#[test]
fn test_completed_sets_timestamp_and_stats() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    let a = service.book_consultation("A", Some(doctor_id)).unwrap();

    let done = service.mark_completed(doctor_id, a.id).unwrap();

    assert_eq!(done.status, TokenStatus::Completed);
    assert!(done.completed_at.is_some());
    assert!(done.cancelled_at.is_none());
    // Terminal tokens keep their last estimate
    assert_eq!(done.estimated_slot.as_deref(), Some("9:00 AM"));
    assert_eq!(doctor(&service, doctor_id).stats.completed, 1);
}

#[test]
fn test_terminal_token_is_left_alone() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    let a = service.book_consultation("A", Some(doctor_id)).unwrap();

    let first = service.mark_completed(doctor_id, a.id).unwrap();
    let again = service.mark_completed(doctor_id, a.id).unwrap();
    let flipped = service.mark_no_show(doctor_id, a.id).unwrap();

    assert_eq!(again, first);
    assert_eq!(flipped.status, TokenStatus::Completed);
    let d = doctor(&service, doctor_id);
    assert_eq!(d.stats.completed, 1);
    assert_eq!(d.stats.no_show, 0);
}

#[test]
fn test_waiting_token_can_be_completed() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 1, 10, 0);
    let a = service.book_consultation("A", Some(doctor_id)).unwrap();
    let b = service.book_consultation("B", Some(doctor_id)).unwrap();
    assert_eq!(b.status, TokenStatus::Waiting);

    let done = service.mark_completed(doctor_id, b.id).unwrap();

    assert_eq!(done.status, TokenStatus::Completed);
    assert!(done.completed_at.is_some());
    let d = doctor(&service, doctor_id);
    assert_eq!(d.stats.completed, 1);
    // The one slot is used up, so A drops back to the waiting list
    assert_eq!(d.patient(a.id).unwrap().status, TokenStatus::Waiting);
    assert_eq!(d.allocated_count(), 0);
    assert_queue_invariants(&service, doctor_id);
    assert_matches!(
        service.book_consultation("C", Some(doctor_id)),
        Err(QueueError::SessionComplete { .. })
    );
}

#[test]
fn test_no_show_promotes_first_waiting() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    let a = service.book_consultation("A", Some(doctor_id)).unwrap();
    let b = service.book_consultation("B", Some(doctor_id)).unwrap();
    let c = service.book_consultation("C", Some(doctor_id)).unwrap();
    let d_token = service.book_consultation("D", Some(doctor_id)).unwrap();

    let gone = service.mark_no_show(doctor_id, a.id).unwrap();
    assert_eq!(gone.status, TokenStatus::NoShow);
    assert!(gone.cancelled_at.is_some());

    let d = doctor(&service, doctor_id);
    assert_eq!(d.patient(b.id).unwrap().estimated_slot.as_deref(), Some("9:00 AM"));
    assert_eq!(d.patient(c.id).unwrap().status, TokenStatus::Allocated);
    assert_eq!(d.patient(c.id).unwrap().estimated_slot.as_deref(), Some("9:10 AM"));
    assert_eq!(d.patient(d_token.id).unwrap().status, TokenStatus::Waiting);
    assert_eq!(d.stats.no_show, 1);
    assert_queue_invariants(&service, doctor_id);
}

#[test]
fn test_waiting_token_can_be_cancelled() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 1, 10, 0);
    service.book_consultation("A", Some(doctor_id)).unwrap();
    let b = service.book_consultation("B", Some(doctor_id)).unwrap();

    let cancelled = service.cancel(doctor_id, b.id).unwrap();

    assert_eq!(cancelled.status, TokenStatus::NoShow);
    assert_eq!(doctor(&service, doctor_id).waiting_count(), 0);
}

#[test]
fn test_leave_queue_clears_session() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    let a = service.book_consultation("A", Some(doctor_id)).unwrap();
    assert!(service.current_session().unwrap().is_some());

    let left = service.leave_queue(doctor_id, a.id).unwrap();

    assert_eq!(left.status, TokenStatus::NoShow);
    assert_eq!(service.current_session().unwrap(), None);
}

#[test]
fn test_failed_transition_keeps_session() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 2, 10, 0);
    service.book_consultation("A", Some(doctor_id)).unwrap();

    assert_matches!(service.leave_queue(doctor_id, 9), Err(QueueError::TokenNotFound { .. }));
    assert!(service.current_session().unwrap().is_some());
}
