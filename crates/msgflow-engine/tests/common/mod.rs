use std::path::PathBuf;
use std::sync::Mutex;

use msgflow_core::{
    Channel, FormatOptions, FormattedSchema, Message, MsgFlowError, Operation, Result, Schema,
    SchemaFormatter, SchemaRenderer, Service, Target, TargetCapabilities, TargetType,
};

/// Target that records what it was asked to draw
///
/// The description is `mode|service|channel`; the image is that text
/// wrapped in `<svg>` tags.
#[derive(Default)]
pub struct RecordingTarget {
    pub calls: Mutex<Vec<FormatOptions>>,
    /// Channel whose rendering fails
    pub fail_channel: Option<String>,
    /// Channel whose formatting panics
    pub panic_channel: Option<String>,
    pub can_render: bool,
}

#[allow(dead_code)]
impl RecordingTarget {
    pub fn new() -> Self {
        Self {
            can_render: true,
            ..Self::default()
        }
    }

    pub fn failing_on(channel: &str) -> Self {
        Self {
            fail_channel: Some(channel.to_string()),
            ..Self::new()
        }
    }

    pub fn panicking_on(channel: &str) -> Self {
        Self {
            panic_channel: Some(channel.to_string()),
            ..Self::new()
        }
    }

    pub fn format_only() -> Self {
        Self::default()
    }

    pub fn calls_len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SchemaFormatter for RecordingTarget {
    fn format_schema(&self, _schema: &Schema, options: &FormatOptions) -> Result<FormattedSchema> {
        if options.channel.is_some() && options.channel == self.panic_channel {
            panic!("formatter blew up");
        }
        self.calls.lock().unwrap().push(options.clone());
        let text = format!(
            "{}|{}|{}",
            options.mode,
            options.service.as_deref().unwrap_or(""),
            options.channel.as_deref().unwrap_or("")
        );
        Ok(FormattedSchema {
            target_type: TargetType::new("recording"),
            data: text.into_bytes(),
        })
    }
}

impl SchemaRenderer for RecordingTarget {
    fn render_schema(&self, formatted: &FormattedSchema) -> Result<Vec<u8>> {
        let text = String::from_utf8_lossy(&formatted.data).to_string();
        if let Some(channel) = &self.fail_channel {
            if text.ends_with(&format!("|{}", channel)) {
                return Err(MsgFlowError::Render {
                    message: format!("cannot draw {}", channel),
                });
            }
        }
        Ok(format!("<svg>{}</svg>", text).into_bytes())
    }
}

impl Target for RecordingTarget {
    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            format: true,
            render: self.can_render,
        }
    }
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../msgflow-store/tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

#[allow(dead_code)]
pub fn notification_service() -> Service {
    Service::new("NotificationService", "Delivers notifications to users").with_operation(
        Operation::send(Channel::new(
            "user.info.request",
            vec![Message::new("UserInfoRequest", "{\n  \"user_id\": \"string[uuid]\"\n}")],
        ))
        .with_reply(Channel::new(
            "user.info.reply",
            vec![Message::new(
                "UserInfoReply",
                "{\n  \"email\": \"string[email]\"\n}",
            )],
        )),
    )
}

#[allow(dead_code)]
pub fn user_service() -> Service {
    Service::new("UserService", "Owns user profiles").with_operation(
        Operation::receive(Channel::new(
            "user.info.request",
            vec![Message::new("UserInfoRequest", "{\n  \"user_id\": \"string[uuid]\"\n}")],
        ))
        .with_reply(Channel::new(
            "user.info.reply",
            vec![Message::new(
                "UserInfoReply",
                "{\n  \"email\": \"string[email]\"\n}",
            )],
        )),
    )
}

#[allow(dead_code)]
pub fn analytics_service() -> Service {
    Service::new("AnalyticsService", "").with_operation(Operation::send(Channel::new(
        "notification.analytics",
        vec![Message::new("AnalyticsEvent", "{\n  \"kind\": \"string\"\n}")],
    )))
}

#[allow(dead_code)]
pub fn example_schema() -> Schema {
    Schema::new(vec![user_service(), notification_service()])
}
