#![allow(clippy::unwrap_used, clippy::expect_used)]

use msgflow_core::errors::{ExError, ExErrorKind, MsgFlowError};
use msgflow_core::logging_facility::test_capture::init_test_capture;
use msgflow_core::{log_op_end, log_op_error, log_op_start};
use msgflow_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_SERVICES_LEN,
};

#[test]
fn test_log_op_start_records_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, services_len = 2);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field(FIELD_SERVICES_LEN), Some("2"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    capture.assert_event_exists(op_name, EVENT_END);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_records_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = MsgFlowError::Render {
        message: "d2 exited with 1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_RENDER"));
    assert_eq!(errors[0].field(FIELD_ERR_KIND), Some("Render"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Cancelled).with_op(op_name);
    log_op_error!(op_name, err, duration_ms = 0);

    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)
            && e.field("err_code") == Some("ERR_CANCELLED")),
        1
    );
}
