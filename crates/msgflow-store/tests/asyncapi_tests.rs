use std::path::PathBuf;

use msgflow_core::{Action, MsgFlowError, SchemaExtractor};
use msgflow_store::AsyncApiSource;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_extracts_service_info_and_operations_in_id_order() {
    let schema = AsyncApiSource::new(fixture("notification.yaml"))
        .extract_schema()
        .unwrap();

    assert_eq!(schema.services.len(), 1);
    let service = &schema.services[0];
    assert_eq!(service.name, "NotificationService");
    assert!(service.description.starts_with("Delivers notifications"));

    let channels: Vec<_> = service
        .operations
        .iter()
        .map(|op| op.channel.name.as_str())
        .collect();
    // publishAnalytics, receivePush, requestUserInfo
    assert_eq!(
        channels,
        vec![
            "notification.analytics",
            "notification.user.{user_id}.push",
            "user.info.request"
        ]
    );
}

#[test]
fn test_request_reply_operation() {
    let schema = AsyncApiSource::new(fixture("notification.yaml"))
        .extract_schema()
        .unwrap();
    let op = &schema.services[0].operations[2];

    assert_eq!(op.action, Action::Send);
    assert_eq!(op.channel.messages[0].name, "UserInfoRequest");
    assert_eq!(
        op.channel.messages[0].payload,
        "{\n  \"user_id\": \"string[uuid]\"\n}"
    );

    let reply = op.reply.as_ref().unwrap();
    assert_eq!(reply.name, "user.info.reply");
    assert_eq!(reply.messages[0].name, "UserInfoReply");
    assert_eq!(
        reply.messages[0].payload,
        concat!(
            "{\n",
            "  \"email\": \"string[email]\",\n",
            "  \"metadata\": \"object\",\n",
            "  \"preferences\": {\n",
            "    \"channels\": [\n",
            "      \"string[enum:push,email]\"\n",
            "    ],\n",
            "    \"language\": \"string\"\n",
            "  },\n",
            "  \"user_id\": \"string[uuid]\"\n",
            "}"
        )
    );
}

#[test]
fn test_message_name_falls_back_to_referenced_key() {
    let schema = AsyncApiSource::new(fixture("notification.yaml"))
        .extract_schema()
        .unwrap();
    let analytics = &schema.services[0].operations[0];

    assert_eq!(analytics.channel.messages[0].name, "AnalyticsEvent");
    assert_eq!(
        analytics.channel.messages[0].payload,
        concat!(
            "{\n",
            "  \"event_type\": \"string[enum:sent,delivered,opened]\",\n",
            "  \"occurred_at\": \"string[date-time]\",\n",
            "  \"tags\": [\n",
            "    \"string\"\n",
            "  ]\n",
            "}"
        )
    );
}

#[test]
fn test_operation_without_messages_uses_channel_messages() {
    let schema = AsyncApiSource::new(fixture("notification.yaml"))
        .extract_schema()
        .unwrap();
    let push = &schema.services[0].operations[1];

    assert_eq!(push.action, Action::Receive);
    assert_eq!(push.channel.messages.len(), 1);
    assert_eq!(push.channel.messages[0].name, "PushNotification");
}

#[test]
fn test_json_document_and_channel_key_fallback() {
    let schema = AsyncApiSource::new(fixture("analytics.json"))
        .extract_schema()
        .unwrap();
    let service = &schema.services[0];

    assert_eq!(service.name, "AnalyticsService");
    assert_eq!(service.description, "");
    assert_eq!(service.operations[0].channel.name, "notification.analytics");
    assert_eq!(service.operations[0].channel.messages[0].name, "AnalyticsEvent");
}

#[test]
fn test_unresolved_reference_is_fatal() {
    let err = AsyncApiSource::new(fixture("broken_ref.yaml"))
        .extract_schema()
        .unwrap_err();

    match err {
        MsgFlowError::UnresolvedReference { path, reference } => {
            assert!(path.ends_with("broken_ref.yaml"));
            assert_eq!(reference, "#/components/messages/Missing");
        }
        other => panic!("expected unresolved reference, got {:?}", other),
    }
}

#[test]
fn test_missing_title_is_fatal() {
    let err = AsyncApiSource::new(fixture("untitled.yaml"))
        .extract_schema()
        .unwrap_err();
    assert!(err.to_string().contains("missing info.title"));
}

#[test]
fn test_missing_file_names_the_path() {
    let err = AsyncApiSource::new("does/not/exist.yaml")
        .extract_schema()
        .unwrap_err();
    assert!(matches!(err, MsgFlowError::Extraction { ref path, .. } if path == "does/not/exist.yaml"));
}
