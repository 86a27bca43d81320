//! AsyncAPI v3 extraction adapter
//!
//! Reads one AsyncAPI document (YAML or JSON) and turns it into a schema
//! holding a single service. Only the parts needed for the message-flow
//! model are interpreted; the document is not validated.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use msgflow_core::{
    Action, Channel, Message, MsgFlowError, Operation, Result, Schema, SchemaExtractor, Service,
};

/// One AsyncAPI document on disk
#[derive(Debug, Clone)]
pub struct AsyncApiSource {
    path: PathBuf,
}

impl AsyncApiSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, reason: impl Into<String>) -> MsgFlowError {
        MsgFlowError::Extraction {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl SchemaExtractor for AsyncApiSource {
    fn extract_schema(&self) -> Result<Schema> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| self.error(format!("reading file: {}", e)))?;
        let document: Value = serde_yaml::from_str(&text)
            .map_err(|e| self.error(format!("parsing document: {}", e)))?;

        let service = Document {
            root: &document,
            path: self.path.display().to_string(),
        }
        .service()?;

        tracing::debug!(
            path = %self.path.display(),
            service = %service.name,
            operations_len = service.operations.len(),
            "extracted service"
        );

        Ok(Schema::new(vec![service]))
    }
}

/// A parsed document plus the file name used in errors
struct Document<'a> {
    root: &'a Value,
    path: String,
}

/// A resolved node and the key it was stored under, if reached by reference
struct Resolved<'a> {
    node: &'a Value,
    key: Option<String>,
    refs: Vec<String>,
}

impl<'a> Document<'a> {
    fn error(&self, reason: impl Into<String>) -> MsgFlowError {
        MsgFlowError::Extraction {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn service(&self) -> Result<Service> {
        let info = self.root.get("info");
        let name = info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| self.error("missing info.title"))?;
        let description = info
            .and_then(|i| i.get("description"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        let mut service = Service::new(name, description);

        if let Some(operations) = self.root.get("operations").and_then(Value::as_mapping) {
            let mut entries: Vec<(&str, &Value)> = operations
                .iter()
                .filter_map(|(id, op)| id.as_str().map(|id| (id, op)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            for (id, op) in entries {
                service.operations.push(self.operation(id, op)?);
            }
        }

        Ok(service)
    }

    fn operation(&self, id: &str, value: &'a Value) -> Result<Operation> {
        let op = self.follow(value)?.node;

        let action = match op.get("action").and_then(Value::as_str) {
            Some("send") => Action::Send,
            Some("receive") => Action::Receive,
            other => {
                return Err(self.error(format!(
                    "operation {} has unsupported action {:?}",
                    id,
                    other.unwrap_or("")
                )))
            }
        };

        let channel_ref = op
            .get("channel")
            .ok_or_else(|| self.error(format!("operation {} has no channel", id)))?;
        let channel = self.channel(channel_ref, op.get("messages"))?;

        let reply = match op.get("reply") {
            Some(reply) => {
                let reply = self.follow(reply)?.node;
                match reply.get("channel") {
                    Some(reply_channel) => Some(self.channel(reply_channel, reply.get("messages"))?),
                    None => None,
                }
            }
            None => None,
        };

        Ok(Operation {
            action,
            channel,
            reply,
        })
    }

    /// Build a channel from its reference and the operation's message list
    ///
    /// Without an explicit list every message of the channel is used.
    fn channel(&self, reference: &'a Value, messages: Option<&'a Value>) -> Result<Channel> {
        let resolved = self.follow(reference)?;
        let node = resolved.node;
        let name = node
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(resolved.key)
            .unwrap_or_default();

        let mut list = Vec::new();
        match messages.and_then(Value::as_sequence) {
            Some(items) => {
                for item in items {
                    list.push(self.message(item, None)?);
                }
            }
            None => {
                if let Some(map) = node.get("messages").and_then(Value::as_mapping) {
                    for (key, item) in map {
                        list.push(self.message(item, key.as_str())?);
                    }
                }
            }
        }

        Ok(Channel::new(name, list))
    }

    fn message(&self, value: &'a Value, key: Option<&str>) -> Result<Message> {
        let resolved = self.follow(value)?;
        let node = resolved.node;
        let name = node
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(resolved.key)
            .or_else(|| key.map(str::to_string))
            .unwrap_or_default();

        let payload = match node.get("payload") {
            Some(payload) => self.payload(payload)?,
            None => String::new(),
        };

        Ok(Message::new(name, payload))
    }

    /// Top-level payload: the property map as pretty JSON with sorted keys
    fn payload(&self, value: &'a Value) -> Result<String> {
        let mut stack = Vec::new();
        let schema = self.enter(value, &mut stack)?;

        let mut shape = serde_json::Map::new();
        if let Some(properties) = schema.get("properties").and_then(Value::as_mapping) {
            for (name, property) in properties {
                let Some(name) = name.as_str() else { continue };
                shape.insert(name.to_string(), self.shape(property, &mut stack)?);
            }
        }

        serde_json::to_string_pretty(&serde_json::Value::Object(shape))
            .map_err(|e| self.error(format!("encoding payload: {}", e)))
    }

    /// Structural shape of one schema node
    fn shape(&self, value: &'a Value, stack: &mut Vec<String>) -> Result<serde_json::Value> {
        let depth = stack.len();
        let schema = self.enter(value, stack)?;
        let kind = schema.get("type").and_then(Value::as_str).unwrap_or("");

        let shape = match kind {
            "array" => match schema.get("items") {
                Some(items) => serde_json::Value::Array(vec![self.shape(items, stack)?]),
                None => serde_json::Value::Array(Vec::new()),
            },
            "object" => match schema.get("properties").and_then(Value::as_mapping) {
                Some(properties) if !properties.is_empty() => {
                    let mut map = serde_json::Map::new();
                    for (name, property) in properties {
                        let Some(name) = name.as_str() else { continue };
                        map.insert(name.to_string(), self.shape(property, stack)?);
                    }
                    serde_json::Value::Object(map)
                }
                _ => serde_json::Value::String("object".to_string()),
            },
            "" => serde_json::Value::String("string".to_string()),
            kind => serde_json::Value::String(primitive_tag(kind, schema)),
        };

        stack.truncate(depth);
        Ok(shape)
    }

    /// Follow references of a schema node, refusing to re-enter one that is
    /// already being expanded
    fn enter(&self, value: &'a Value, stack: &mut Vec<String>) -> Result<&'a Value> {
        let resolved = self.follow(value)?;
        for reference in resolved.refs {
            if stack.contains(&reference) {
                return Err(self.error(format!("cyclic reference {}", reference)));
            }
            stack.push(reference);
        }
        Ok(resolved.node)
    }

    /// Follow a chain of local `$ref`s
    fn follow(&self, value: &'a Value) -> Result<Resolved<'a>> {
        let mut node = value;
        let mut key = None;
        let mut refs = Vec::new();
        let mut seen = HashSet::new();

        while let Some(reference) = node.get("$ref").and_then(Value::as_str) {
            if !seen.insert(reference.to_string()) {
                return Err(self.error(format!("cyclic reference {}", reference)));
            }
            let (target, last) = self.lookup(reference)?;
            node = target;
            key = last;
            refs.push(reference.to_string());
        }

        Ok(Resolved { node, key, refs })
    }

    /// Resolve a `#/a/b` pointer against the document root
    fn lookup(&self, reference: &str) -> Result<(&'a Value, Option<String>)> {
        let unresolved = || MsgFlowError::UnresolvedReference {
            path: self.path.clone(),
            reference: reference.to_string(),
        };

        let pointer = reference.strip_prefix("#/").ok_or_else(unresolved)?;
        let mut node = self.root;
        let mut last = None;

        for raw in pointer.split('/') {
            let segment = raw.replace("~1", "/").replace("~0", "~");
            node = match node {
                Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                other => other.get(segment.as_str()),
            }
            .ok_or_else(unresolved)?;
            last = Some(segment);
        }

        Ok((node, last))
    }
}

/// `type`, `type[format]` or `type[enum:a,b,c]`
fn primitive_tag(kind: &str, schema: &Value) -> String {
    if let Some(format) = schema.get("format").and_then(Value::as_str) {
        if !format.is_empty() {
            return format!("{}[{}]", kind, format);
        }
    }
    if let Some(values) = schema.get("enum").and_then(Value::as_sequence) {
        if !values.is_empty() {
            let values: Vec<String> = values.iter().map(plain_scalar).collect();
            return format!("{}[enum:{}]", kind, values.join(","));
        }
    }
    kind.to_string()
}

fn plain_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
