mod common;

use common::*;
use msgflow_core::{merge_schemas, Channel, Message, Operation, Schema, Service};

#[test]
fn test_merge_collects_services_in_first_appearance_order() {
    let merged = merge_schemas(&[
        Schema::new(vec![user_service()]),
        Schema::new(vec![notification_service()]),
        Schema::new(vec![analytics_service()]),
    ]);

    let names: Vec<_> = merged.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["UserService", "NotificationService", "AnalyticsService"]
    );
}

#[test]
fn test_merge_unions_operations_of_a_shared_service() {
    let extra = Service::new("UserService", "").with_operation(Operation::send(Channel::new(
        "user.deleted",
        vec![Message::new("UserDeleted", "{}")],
    )));

    let merged = merge_schemas(&[
        Schema::new(vec![user_service()]),
        Schema::new(vec![extra]),
    ]);

    assert_eq!(merged.services.len(), 1);
    assert_eq!(merged.services[0].operations.len(), 2);
    assert_eq!(merged.services[0].description, "Owns user profiles");
}

#[test]
fn test_merge_last_input_wins_for_three_inputs() {
    let version = |payload: &str| {
        Schema::new(vec![Service::new("UserService", "").with_operation(
            Operation::receive(Channel::new(
                "user.info.request",
                vec![Message::new("UserInfoRequest", payload)],
            )),
        )])
    };

    let merged = merge_schemas(&[version("{}"), version("{\"a\": 1}"), version("{\"b\": 2}")]);

    let ops = &merged.services[0].operations;
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].channel.messages[0].payload, "{\"b\": 2}");
}

#[test]
fn test_merge_then_sort_is_deterministic() {
    let a = merge_schemas(&[
        Schema::new(vec![user_service()]),
        Schema::new(vec![notification_service()]),
    ])
    .sorted();
    let b = merge_schemas(&[
        Schema::new(vec![notification_service()]),
        Schema::new(vec![user_service()]),
    ])
    .sorted();

    assert_eq!(a, b);
    assert_eq!(a.services[0].name, "NotificationService");
    // receive sorts before send
    assert_eq!(
        a.services[0].operations[0].channel.name,
        "notification.analytics"
    );
}

#[test]
fn test_merge_keeps_operations_whose_key_text_coincides() {
    let dashed_channel = Schema::new(vec![Service::new("Orders", "").with_operation(
        Operation::send(Channel::new(
            "orders-created",
            vec![Message::new("Event", "{}")],
        )),
    )]);
    let dashed_message = Schema::new(vec![Service::new("Orders", "").with_operation(
        Operation::send(Channel::new(
            "orders",
            vec![Message::new("created-Event", "{}")],
        )),
    )]);

    let merged = merge_schemas(&[dashed_channel, dashed_message]);

    let channels: Vec<_> = merged.services[0]
        .operations
        .iter()
        .map(|op| op.channel.name.as_str())
        .collect();
    assert_eq!(channels, vec!["orders-created", "orders"]);
}
