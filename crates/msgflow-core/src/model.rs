//! Normalized message-flow model
//!
//! Services own operations, operations use channels, channels carry messages.
//! Values are plain data: every transformation (merge, sort, diff, projection)
//! produces new values instead of mutating a shared model.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::cmp::Ordering;
use std::fmt;

use crate::errors::Result;

/// The unified message-flow model of a set of services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub services: Vec<Service>,
}

/// One independently specified participant of the message flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Identity key, unique within a schema
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Direction of an operation from the owning service's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Send,
    Receive,
}

/// A directional use of a channel, optionally paired with a reply channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<Channel>,
}

/// A named, addressable message destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Topic or queue name, may contain path parameters such as `{user_id}`
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A message shape carried by a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    /// Normalized structural description of the body (pretty JSON, sorted keys)
    pub payload: String,
}

/// Structural identity of an operation inside a service
///
/// The action, the channel name and its first message name, plus the reply
/// channel name and its first message name for request/reply operations.
/// A missing message counts as the empty name. Keys order by action tag,
/// then field by field.
///
/// Displayed as `{action}-{channel}-{message}`, with
/// `-reply-{reply channel}-{reply message}` appended when there is a reply.
/// The text only names changes; two different keys may display alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    action: Action,
    channel: String,
    message: String,
    reply: Option<(String, String)>,
}

impl OperationKey {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Reply channel and reply message names
    pub fn reply(&self) -> Option<(&str, &str)> {
        self.reply
            .as_ref()
            .map(|(channel, message)| (channel.as_str(), message.as_str()))
    }
}

impl Ord for OperationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.action
            .as_str()
            .cmp(other.action.as_str())
            .then_with(|| self.channel.cmp(&other.channel))
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.reply.cmp(&other.reply))
    }
}

impl PartialOrd for OperationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.action, self.channel, self.message)?;
        if let Some((channel, message)) = &self.reply {
            write!(f, "-reply-{}-{}", channel, message)?;
        }
        Ok(())
    }
}

impl Action {
    /// Wire tag, also the sort key
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Send => "send",
            Action::Receive => "receive",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Message {
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

impl Channel {
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            messages,
        }
    }

    fn first_message_name(&self) -> &str {
        self.messages.first().map(|m| m.name.as_str()).unwrap_or("")
    }
}

impl Operation {
    /// A `send` operation without reply
    pub fn send(channel: Channel) -> Self {
        Self {
            action: Action::Send,
            channel,
            reply: None,
        }
    }

    /// A `receive` operation without reply
    pub fn receive(channel: Channel) -> Self {
        Self {
            action: Action::Receive,
            channel,
            reply: None,
        }
    }

    /// Attach a reply channel, turning this into a request/reply operation
    pub fn with_reply(mut self, reply: Channel) -> Self {
        self.reply = Some(reply);
        self
    }

    /// Compute the operation key used by merge and diff
    pub fn key(&self) -> OperationKey {
        OperationKey {
            action: self.action,
            channel: self.channel.name.clone(),
            message: self.channel.first_message_name().to_string(),
            reply: self.reply.as_ref().map(|reply| {
                (reply.name.clone(), reply.first_message_name().to_string())
            }),
        }
    }

    /// Display order: action, channel, then first message name
    ///
    /// An operation with messages sorts before one without.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.action
            .as_str()
            .cmp(other.action.as_str())
            .then_with(|| self.channel.name.cmp(&other.channel.name))
            .then_with(|| {
                match (self.channel.messages.first(), other.channel.messages.first()) {
                    (Some(a), Some(b)) => a.name.cmp(&b.name),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            })
    }
}

impl Service {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            operations: Vec::new(),
        }
    }

    /// Builder-style operation append
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Iterate the channel names this service uses with the given action
    pub fn channels_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.operations
            .iter()
            .filter(move |op| op.action == action)
            .map(|op| op.channel.name.as_str())
    }
}

impl Schema {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Sort operations inside each service, then services by name
    ///
    /// Both sorts are stable, so semantically identical schemas always
    /// produce identical output.
    pub fn sort(&mut self) {
        for service in &mut self.services {
            service.operations.sort_by(Operation::display_cmp);
        }
        self.services.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Consuming variant of [`Schema::sort`]
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    /// SHA-256 hex digest over the JSON form of the schema
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the schema cannot be encoded.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
