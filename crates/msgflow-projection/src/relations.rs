//! Relationship inference between services.
//!
//! A service A is connected to B when A sends on a channel that B receives
//! on. Two opposite connections collapse into one bidirectional connection
//! whose `from` is the lexicographically smaller name.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use msgflow_core::{Action, Schema, Service};

/// Communication pattern observed on a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionLabel {
    /// Fire-and-forget publishing only
    Pub,
    /// Request/reply only
    Req,
    /// Both patterns across the shared channels
    PubReq,
}

impl ConnectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionLabel::Pub => "Pub",
            ConnectionLabel::Req => "Req",
            ConnectionLabel::PubReq => "Pub/Req",
        }
    }
}

impl fmt::Display for ConnectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inferred service-to-service edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub label: ConnectionLabel,
    pub bidirectional: bool,
}

impl Connection {
    /// Canonical `from->to` key used for deduplication and ordering
    pub fn key(&self) -> String {
        format!("{}->{}", self.from, self.to)
    }
}

/// Infer all service connections, sorted by canonical key
pub fn infer_connections(schema: &Schema) -> Vec<Connection> {
    let directed = directed_pairs(schema);
    let mut connections: BTreeMap<String, Connection> = BTreeMap::new();

    for (sender, receiver) in &directed {
        let bidirectional = directed.contains(&(*receiver, *sender));
        let (from, to) = if bidirectional && receiver < sender {
            (*receiver, *sender)
        } else {
            (*sender, *receiver)
        };

        let connection = Connection {
            from: from.to_string(),
            to: to.to_string(),
            label: connection_label(schema, from, to),
            bidirectional,
        };
        connections.insert(connection.key(), connection);
    }

    tracing::debug!(
        connections_len = connections.len(),
        "inferred service connections"
    );

    connections.into_values().collect()
}

/// Every (sender, receiver) pair sharing at least one channel name
fn directed_pairs(schema: &Schema) -> BTreeSet<(&str, &str)> {
    let mut pairs = BTreeSet::new();

    for sender in &schema.services {
        for channel in sender.channels_for(Action::Send) {
            for receiver in &schema.services {
                if receiver.name == sender.name {
                    continue;
                }
                if receiver.channels_for(Action::Receive).any(|c| c == channel) {
                    pairs.insert((sender.name.as_str(), receiver.name.as_str()));
                }
            }
        }
    }

    pairs
}

/// Classify the traffic between two services over all their shared channels
fn connection_label(schema: &Schema, first: &str, second: &str) -> ConnectionLabel {
    let (Some(a), Some(b)) = (schema.service(first), schema.service(second)) else {
        return ConnectionLabel::Pub;
    };

    let (has_pub, has_req) = traffic_kinds(a, b);
    match (has_pub, has_req) {
        (true, true) => ConnectionLabel::PubReq,
        (false, true) => ConnectionLabel::Req,
        _ => ConnectionLabel::Pub,
    }
}

/// Whether publish and request/reply traffic flows between `a` and `b`
///
/// Traffic counts as request/reply when the sending side's operation carries
/// a reply channel.
fn traffic_kinds(a: &Service, b: &Service) -> (bool, bool) {
    let mut has_pub = false;
    let mut has_req = false;

    for op_a in &a.operations {
        for op_b in &b.operations {
            if op_a.channel.name != op_b.channel.name {
                continue;
            }
            let sending = match (op_a.action, op_b.action) {
                (Action::Send, Action::Receive) => op_a,
                (Action::Receive, Action::Send) => op_b,
                _ => continue,
            };
            if sending.reply.is_some() {
                has_req = true;
            } else {
                has_pub = true;
            }
        }
    }

    (has_pub, has_req)
}
