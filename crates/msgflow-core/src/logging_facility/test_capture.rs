//! In-memory capture of log events for tests.
//!
//! The capture layer is installed once as the global subscriber; every test
//! gets a handle onto the same buffer and filters by operation name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use msgflow_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};

/// One recorded event, every field rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: BTreeMap<String, String>) -> Self {
        Self {
            level,
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Numbers and booleans arrive through `record_debug`, whose output for
/// them matches `Display`
struct TextFields(BTreeMap<String, String>);

impl Visit for TextFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    buffer: Buffer,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = TextFields(BTreeMap::new());
        event.record(&mut fields);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), fields.0);

        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(captured);
        }
    }
}

/// Read side of the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    /// Events of one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        let mut events = self.events();
        events.retain(|e| e.op.as_deref() == Some(op));
        events
    }

    /// # Panics
    ///
    /// Panics when no event of `op` carries `event` as its event name.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let for_op = self.events_for_op(op);
        let seen: Vec<&str> = for_op.iter().filter_map(|e| e.event.as_deref()).collect();
        assert!(
            seen.contains(&event),
            "no `{}` event for op `{}`; saw {:?}",
            event,
            op,
            seen
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer (first call only) and return a handle to it
///
/// ```
/// use msgflow_core::logging_facility::test_capture::init_test_capture;
/// use msgflow_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let buffer = Buffer::default();
            tracing_subscriber::registry()
                .with(CaptureLayer {
                    buffer: Arc::clone(&buffer),
                })
                .init();
            TestCapture { buffer }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_fields_are_lifted() {
        let fields: BTreeMap<String, String> = [
            (FIELD_OP, "generate_docs"),
            (FIELD_EVENT, "start"),
            ("services_len", "3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let event = CapturedEvent::from_fields(Level::INFO, fields);

        assert_eq!(event.op.as_deref(), Some("generate_docs"));
        assert_eq!(event.event.as_deref(), Some("start"));
        assert_eq!(event.component, None);
        assert_eq!(event.field("services_len"), Some("3"));
    }
}
