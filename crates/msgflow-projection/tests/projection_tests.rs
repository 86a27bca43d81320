mod common;

use common::*;
use msgflow_core::{Channel, Operation, Schema, Service, ViewSpec};
use msgflow_projection::{
    channel_services_view, context_view, infer_connections, project, service_neighbors_view,
    Connection, ConnectionLabel, ViewPayload,
};

#[test]
fn test_example_context_has_one_request_connection() {
    let view = context_view(&example_schema());

    assert_eq!(view.services.len(), 2);
    assert_eq!(
        view.connections,
        vec![Connection {
            from: "NotificationService".to_string(),
            to: "UserService".to_string(),
            label: ConnectionLabel::Req,
            bidirectional: false,
        }]
    );
}

#[test]
fn test_example_neighbors_of_notification_service() {
    let view = service_neighbors_view(&example_schema(), Some("NotificationService"));

    assert_eq!(view.main.name, "NotificationService");
    let names: Vec<_> = view.neighbors.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["UserService"]);
}

#[test]
fn test_neighbors_follow_schema_order() {
    let view = service_neighbors_view(&three_service_schema(), Some("NotificationService"));
    let names: Vec<_> = view.neighbors.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["UserService", "AnalyticsService"]);
}

#[test]
fn test_bidirectional_connection_uses_smaller_name_first() {
    let schema = Schema::new(vec![
        Service::new("Zeta", "")
            .with_operation(Operation::send(Channel::new("x", vec![])))
            .with_operation(Operation::receive(Channel::new("y", vec![]))),
        Service::new("Alpha", "")
            .with_operation(Operation::receive(Channel::new("x", vec![])))
            .with_operation(Operation::send(Channel::new("y", vec![]))),
    ]);

    let connections = infer_connections(&schema);

    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].from, "Alpha");
    assert_eq!(connections[0].to, "Zeta");
    assert!(connections[0].bidirectional);
    assert_eq!(connections[0].label, ConnectionLabel::Pub);
}

#[test]
fn test_connections_are_sorted_by_key() {
    let connections = infer_connections(&three_service_schema());
    let keys: Vec<_> = connections.iter().map(Connection::key).collect();
    assert_eq!(
        keys,
        vec![
            "AnalyticsService->NotificationService",
            "NotificationService->UserService"
        ]
    );
    assert_eq!(connections[0].label, ConnectionLabel::Pub);
}

#[test]
fn test_channel_view_lists_sender_and_receiver() {
    let view = channel_services_view(&three_service_schema(), "notification.analytics", false);

    assert_eq!(view.senders, vec!["AnalyticsService"]);
    assert_eq!(view.receivers, vec!["NotificationService"]);
    assert_eq!(view.message.unwrap().name, "AnalyticsEvent");
    assert!(view.reply.is_none());
}

#[test]
fn test_request_channel_carries_reply_message() {
    let view = channel_services_view(&example_schema(), "user.info.request", false);

    assert_eq!(view.senders, vec!["NotificationService"]);
    assert_eq!(view.receivers, vec!["UserService"]);
    assert_eq!(view.message.unwrap().name, "UserInfoRequest");
    let reply = view.reply.unwrap();
    assert_eq!(reply.name, "UserInfoReply");
    assert_eq!(reply.payload, Some(user_info_reply().payload));
}

#[test]
fn test_reply_channel_flips_roles() {
    let view = channel_services_view(&example_schema(), "user.info.reply", true);

    assert_eq!(view.senders, vec!["UserService"]);
    assert_eq!(view.receivers, vec!["NotificationService"]);
    assert!(view.message.is_none());
    let reply = view.reply.unwrap();
    assert_eq!(reply.name, "UserInfoReply");
    assert!(reply.payload.is_none());
}

#[test]
fn test_context_reflows_long_descriptions() {
    let schema = Schema::new(vec![Service::new(
        "Verbose",
        "this description is clearly longer than seven words",
    )]);
    let view = context_view(&schema);
    assert_eq!(
        view.services[0].description,
        "this description is clearly longer than seven  \nwords"
    );
}

#[test]
fn test_project_dispatches_on_view_spec() {
    let schema = example_schema();

    match project(&schema, &ViewSpec::ServiceChannels { service: Some("UserService".to_string()) }) {
        ViewPayload::ServiceChannels(service) => assert_eq!(service.operations.len(), 1),
        other => panic!("unexpected payload {:?}", other),
    }

    let payload = project(
        &schema,
        &ViewSpec::ChannelServices {
            channel: "missing".to_string(),
            omit_payloads: false,
        },
    );
    match payload {
        ViewPayload::ChannelServices(view) => assert!(view.is_empty()),
        other => panic!("unexpected payload {:?}", other),
    }
}
