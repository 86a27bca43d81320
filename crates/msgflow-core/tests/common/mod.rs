use chrono::{DateTime, TimeZone, Utc};
use msgflow_core::{Channel, Message, Operation, Schema, Service};

/// Fixed instant for reproducible changelogs
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn user_info_request() -> Message {
    Message::new("UserInfoRequest", "{\n  \"user_id\": \"string[uuid]\"\n}")
}

#[allow(dead_code)]
pub fn user_info_reply() -> Message {
    Message::new(
        "UserInfoReply",
        "{\n  \"email\": \"string[email]\",\n  \"user_id\": \"string[uuid]\"\n}",
    )
}

#[allow(dead_code)]
pub fn analytics_event() -> Message {
    Message::new(
        "AnalyticsEvent",
        "{\n  \"kind\": \"string[enum:sent,opened]\"\n}",
    )
}

/// Sends a user lookup request and consumes analytics events
#[allow(dead_code)]
pub fn notification_service() -> Service {
    Service::new("NotificationService", "Delivers notifications to users")
        .with_operation(
            Operation::send(Channel::new("user.info.request", vec![user_info_request()]))
                .with_reply(Channel::new("user.info.reply", vec![user_info_reply()])),
        )
        .with_operation(Operation::receive(Channel::new(
            "notification.analytics",
            vec![analytics_event()],
        )))
}

/// Answers user lookup requests
#[allow(dead_code)]
pub fn user_service() -> Service {
    Service::new("UserService", "Owns user profiles").with_operation(
        Operation::receive(Channel::new("user.info.request", vec![user_info_request()]))
            .with_reply(Channel::new("user.info.reply", vec![user_info_reply()])),
    )
}

/// Publishes analytics events
#[allow(dead_code)]
pub fn analytics_service() -> Service {
    Service::new("AnalyticsService", "").with_operation(Operation::send(Channel::new(
        "notification.analytics",
        vec![analytics_event()],
    )))
}

#[allow(dead_code)]
pub fn example_schema() -> Schema {
    Schema::new(vec![notification_service(), user_service()])
}
