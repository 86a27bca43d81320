//! Schema comparison engine.
//!
//! The entry points are [`compare_schemas`] and [`compare_schemas_at`].

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::{Change, ChangeCategory, ChangeType, Changelog};
use crate::model::{Message, Operation, OperationKey, Schema, Service};

/// Compare two snapshots, stamping every change with the current time
pub fn compare_schemas(previous: &Schema, current: &Schema) -> Changelog {
    compare_schemas_at(previous, current, Utc::now())
}

/// Compare two snapshots at an explicit instant
///
/// Order of the result: added services, removed services, then the
/// operation changes of every shared service. Services are visited by name,
/// operations by key.
pub fn compare_schemas_at(previous: &Schema, current: &Schema, at: DateTime<Utc>) -> Changelog {
    let prev = index_services(previous);
    let curr = index_services(current);
    let mut changes = Vec::new();

    for name in curr.keys().filter(|name| !prev.contains_key(*name)) {
        changes.push(change(
            ChangeType::Added,
            ChangeCategory::Service,
            name.to_string(),
            format!("'{}' was added", name),
            String::new(),
            at,
        ));
    }

    for name in prev.keys().filter(|name| !curr.contains_key(*name)) {
        changes.push(change(
            ChangeType::Removed,
            ChangeCategory::Service,
            name.to_string(),
            format!("'{}' was removed", name),
            String::new(),
            at,
        ));
    }

    for (name, prev_service) in &prev {
        if let Some(curr_service) = curr.get(name) {
            compare_operations(prev_service, curr_service, at, &mut changes);
        }
    }

    tracing::debug!(changes_len = changes.len(), "compared schemas");

    Changelog { date: at, changes }
}

/// Services by name, last occurrence winning
fn index_services(schema: &Schema) -> BTreeMap<&str, &Service> {
    schema
        .services
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect()
}

/// Operations by key, last occurrence winning
fn index_operations(service: &Service) -> BTreeMap<OperationKey, &Operation> {
    service.operations.iter().map(|op| (op.key(), op)).collect()
}

fn compare_operations(
    prev_service: &Service,
    curr_service: &Service,
    at: DateTime<Utc>,
    changes: &mut Vec<Change>,
) {
    let service = curr_service.name.as_str();
    let prev = index_operations(prev_service);
    let curr = index_operations(curr_service);
    let keys: BTreeSet<&OperationKey> = prev.keys().chain(curr.keys()).collect();

    for key in keys {
        let name = format!("{}:{}", service, key);
        match (prev.get(key), curr.get(key)) {
            (None, Some(op)) => changes.push(change(
                ChangeType::Added,
                ChangeCategory::Channel,
                name,
                format!(
                    "'{}' on channel '{}' was added to service '{}'",
                    op.action, op.channel.name, service
                ),
                String::new(),
                at,
            )),
            (Some(op), None) => changes.push(change(
                ChangeType::Removed,
                ChangeCategory::Channel,
                name,
                format!(
                    "'{}' on channel '{}' was removed from service '{}'",
                    op.action, op.channel.name, service
                ),
                String::new(),
                at,
            )),
            (Some(old), Some(new)) => {
                compare_matched(service, &name, old, new, at, changes);
            }
            (None, None) => {}
        }
    }
}

/// Changes of two operations sharing one key
fn compare_matched(
    service: &str,
    name: &str,
    old: &Operation,
    new: &Operation,
    at: DateTime<Utc>,
    changes: &mut Vec<Change>,
) {
    let subject = format!(
        "operation '{}' on channel '{}' in service '{}'",
        new.action, new.channel.name, service
    );

    if old.channel.messages != new.channel.messages {
        changes.push(change(
            ChangeType::Changed,
            ChangeCategory::Message,
            name.to_string(),
            format!("Messages changed for {}", subject),
            messages_diff("messages", &old.channel.messages, &new.channel.messages),
            at,
        ));
    }

    let reply_name = format!("{}:reply", name);
    match (&old.reply, &new.reply) {
        (Some(old_reply), Some(new_reply)) => {
            if old_reply.messages != new_reply.messages {
                changes.push(change(
                    ChangeType::Changed,
                    ChangeCategory::Message,
                    reply_name,
                    format!("Reply messages changed for {}", subject),
                    messages_diff("reply.messages", &old_reply.messages, &new_reply.messages),
                    at,
                ));
            }
        }
        (None, Some(_)) => changes.push(change(
            ChangeType::Added,
            ChangeCategory::Channel,
            reply_name,
            format!("Reply channel added for {}", subject),
            String::new(),
            at,
        )),
        (Some(_), None) => changes.push(change(
            ChangeType::Removed,
            ChangeCategory::Channel,
            reply_name,
            format!("Reply channel removed for {}", subject),
            String::new(),
            at,
        )),
        (None, None) => {}
    }
}

fn change(
    change_type: ChangeType,
    category: ChangeCategory,
    name: String,
    details: String,
    diff: String,
    timestamp: DateTime<Utc>,
) -> Change {
    Change {
        change_type,
        category,
        name,
        details,
        diff,
        timestamp,
    }
}

/// Line-oriented structural diff of two message lists
fn messages_diff(prefix: &str, old: &[Message], new: &[Message]) -> String {
    let mut lines = Vec::new();

    for index in 0..old.len().max(new.len()) {
        let path = format!("{}[{}]", prefix, index);
        match (old.get(index), new.get(index)) {
            (Some(o), None) => lines.push(format!("- {}: {}", path, o.name)),
            (None, Some(n)) => lines.push(format!("+ {}: {}", path, n.name)),
            (Some(o), Some(n)) => {
                if o.name != n.name {
                    lines.push(format!("~ {}.name: {} -> {}", path, o.name, n.name));
                }
                payload_diff(&format!("{}.payload", path), &o.payload, &n.payload, &mut lines);
            }
            (None, None) => {}
        }
    }

    lines.join("\n")
}

fn payload_diff(path: &str, old: &str, new: &str, lines: &mut Vec<String>) {
    if old == new {
        return;
    }
    match (
        serde_json::from_str::<Value>(old),
        serde_json::from_str::<Value>(new),
    ) {
        (Ok(o), Ok(n)) => value_diff(path, &o, &n, lines),
        _ => lines.push(format!("~ {}: {} -> {}", path, old, new)),
    }
}

fn value_diff(path: &str, old: &Value, new: &Value, lines: &mut Vec<String>) {
    match (old, new) {
        (Value::Object(o), Value::Object(n)) => {
            let keys: BTreeSet<&String> = o.keys().chain(n.keys()).collect();
            for key in keys {
                let child = format!("{}.{}", path, key);
                match (o.get(key), n.get(key)) {
                    (Some(ov), None) => lines.push(format!("- {}: {}", child, ov)),
                    (None, Some(nv)) => lines.push(format!("+ {}: {}", child, nv)),
                    (Some(ov), Some(nv)) => value_diff(&child, ov, nv, lines),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(o), Value::Array(n)) => {
            for index in 0..o.len().max(n.len()) {
                let child = format!("{}[{}]", path, index);
                match (o.get(index), n.get(index)) {
                    (Some(ov), None) => lines.push(format!("- {}: {}", child, ov)),
                    (None, Some(nv)) => lines.push(format!("+ {}: {}", child, nv)),
                    (Some(ov), Some(nv)) => value_diff(&child, ov, nv, lines),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if old != new {
                lines.push(format!("~ {}: {} -> {}", path, old, new));
            }
        }
    }
}
