//! `log_op_start!`, `log_op_end!` and `log_op_error!`
//!
//! Each orchestration operation emits one start event and exactly one end or
//! end_error event. Every event carries `component` (the calling module),
//! `op` and `event`; extra `key = value` fields pass through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)+)?) => {
        $crate::__private::tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::$event,
            $($($field)+)?
        )
    };
}

/// Operation started
///
/// ```
/// # use msgflow_core::log_op_start;
/// log_op_start!("generate_docs");
/// log_op_start!("generate_docs", services_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)+)?)
    };
}

/// Operation finished successfully
///
/// ```
/// # use msgflow_core::log_op_end;
/// log_op_end!("load_schema", duration_ms = 12, services_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(info, $op, EVENT_END, duration_ms = $duration $(, $($field)+)?)
    };
}

/// Operation failed; `err` is anything convertible into `ExError`
///
/// ```
/// # use msgflow_core::{log_op_error, errors::MsgFlowError};
/// let err = MsgFlowError::Render { message: "d2 exited with 1".to_string() };
/// log_op_error!("draw_diagram", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)+)?
        )
    }};
}
