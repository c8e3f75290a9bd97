use assert_matches::assert_matches;

use booking_queue_cell::*;
use doctor_cell::{CreateDoctorRequest, DoctorId, TokenStatus};
use super::{doctor, ClinicTestUtils};

#[test]
fn test_book_without_doctor_uses_first_active() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let first = utils.add_doctor(&mut service, 3, 10, 0);
    utils.add_doctor(&mut service, 3, 10, 0);

    let booked = service.book_consultation("Asha", None).expect("Failed to book");

    assert_eq!(booked.doctor_id, first);
    assert_eq!(booked.id, 1);
    assert_eq!(booked.doctor_name, "Dr. Test");
}

#[test]
fn test_book_without_any_doctor() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();

    let result = service.book_consultation("Asha", None);
    assert_matches!(result, Err(QueueError::NoActiveDoctor));
}

#[test]
fn test_book_unknown_doctor() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    utils.add_doctor(&mut service, 3, 10, 0);

    let missing = DoctorId::new();
    let result = service.book_consultation("Asha", Some(missing));
    assert_matches!(result, Err(QueueError::DoctorNotFound(id)) if id == missing);
}

#[test]
fn test_book_rejects_blank_name() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 3, 10, 0);

    let result = service.book_consultation("   ", Some(doctor_id));
    assert_matches!(result, Err(QueueError::ValidationError(_)));
    assert!(doctor(&service, doctor_id).patients.is_empty());
}

#[test]
fn test_token_ids_follow_list_length_and_are_never_reused() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 5, 10, 0);

    let a = service.book_consultation("A", Some(doctor_id)).unwrap();
    let b = service.book_consultation("B", Some(doctor_id)).unwrap();
    service.cancel(doctor_id, a.id).unwrap();
    let c = service.book_consultation("C", Some(doctor_id)).unwrap();

    assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    // Terminal tokens stay in the list for history
    let d = doctor(&service, doctor_id);
    assert_eq!(d.patients.len(), 3);
    assert_eq!(d.patient(a.id).unwrap().status, TokenStatus::NoShow);
    assert_eq!(d.stats.no_show, 1);
}

#[test]
fn test_booking_persists_user_session() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 3, 10, 0);

    let booked = service.book_consultation("Ravi", Some(doctor_id)).unwrap();

    let session = service.current_session().unwrap().expect("Session should be stored");
    assert_eq!(session.token, booked.id);
    assert_eq!(session.name, "Ravi");
    assert_eq!(session.queue_type, QueueType::Consultation);
    assert_eq!(session.doctor_id, Some(doctor_id));
}

#[test]
fn test_book_token_dispatches_by_queue_type() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let doctor_id = utils.add_doctor(&mut service, 3, 10, 0);

    let consultation = service.book_token("Meera", "Consultation", Some(doctor_id)).unwrap();
    assert_matches!(consultation, TokenReceipt::Consultation(ref b) if b.status == TokenStatus::Allocated);

    let pharmacy = service.book_token("Meera", "pharmacy", None).unwrap();
    assert_matches!(pharmacy, TokenReceipt::Counter(ref t) if t.id == 1);
    assert_eq!(service.current_session().unwrap().unwrap().queue_type, QueueType::Pharmacy);

    let invalid = service.book_token("Meera", "radiology", None);
    assert_matches!(invalid, Err(QueueError::QueueTypeInvalid(_)));
}

#[test]
fn test_deleted_doctor_cannot_be_booked() {
    let utils = ClinicTestUtils::new();
    let mut service = utils.service();
    let request = CreateDoctorRequest::count("Dr. Late", 2);
    let late = service.create_doctor(request).unwrap();
    service.delete_doctor(late.id).unwrap();

    assert_matches!(service.book_consultation("A", None), Err(QueueError::NoActiveDoctor));
    assert_matches!(
        service.book_consultation("A", Some(late.id)),
        Err(QueueError::DoctorNotFound(_))
    );
}
