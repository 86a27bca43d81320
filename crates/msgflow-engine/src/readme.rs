//! README for a generated documentation site.
//!
//! The README links every diagram written by
//! [`generate_docs`](crate::commands::docs::generate_docs), so file names
//! here and there must agree; both go through [`DiagramNames`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use msgflow_core::{render_changelog_markdown, Action, Changelog, Result, Schema, Service};

/// Diagrams directory relative to the output directory
pub const DIAGRAMS_DIR: &str = "diagrams";

/// Slug used for a service or channel in links and diagram names
///
/// Lower-cased; spaces become `-`; `.`, `_`, `{` and `}` are dropped.
pub fn anchor(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| !matches!(c, '.' | '_' | '{' | '}'))
        .collect()
}

pub fn context_diagram() -> String {
    "context.svg".to_string()
}

/// Diagram file of every service and channel of a schema
///
/// Files are `service_{anchor}.svg` and `channel_{anchor}.svg`. Names sharing
/// an anchor are numbered in name order: the first keeps the plain file, the
/// next ones get `_2`, `_3`, ... Anchors never contain `_`, so a numbered
/// file cannot clash with a plain one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramNames {
    services: BTreeMap<String, String>,
    channels: BTreeMap<String, String>,
}

impl DiagramNames {
    pub fn new(schema: &Schema) -> Self {
        let services: BTreeSet<&str> = schema.services.iter().map(|s| s.name.as_str()).collect();
        Self {
            services: number_files("service", services),
            channels: number_files("channel", unique_channels(schema)),
        }
    }

    /// Diagram of `service`, or `None` when the schema has no such service
    pub fn service(&self, service: &str) -> Option<&str> {
        self.services.get(service).map(String::as_str)
    }

    /// Diagram of `channel`, or `None` when no operation uses it
    pub fn channel(&self, channel: &str) -> Option<&str> {
        self.channels.get(channel).map(String::as_str)
    }

    /// Services and their diagrams, by service name
    pub fn services(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Channels and their diagrams, by channel name
    pub fn channels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.channels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn number_files<I, S>(prefix: &str, sorted_names: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    sorted_names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let slug = anchor(name);
            let count = seen.entry(slug.clone()).or_insert(0);
            *count += 1;
            let file = match *count {
                1 => format!("{}_{}.svg", prefix, slug),
                n => format!("{}_{}_{}.svg", prefix, slug, n),
            };
            (name.to_string(), file)
        })
        .collect()
}

/// Every channel name used by an operation, reply channels included, sorted
pub fn unique_channels(schema: &Schema) -> Vec<String> {
    let names: BTreeSet<&str> = schema
        .services
        .iter()
        .flat_map(|s| &s.operations)
        .flat_map(|op| std::iter::once(&op.channel).chain(op.reply.as_ref()))
        .map(|c| c.name.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Role a message plays in a channel section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Reply,
    Receive,
    Send,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Request => "request",
            Direction::Reply => "reply",
            Direction::Receive => "receive",
            Direction::Send => "send",
        }
    }
}

/// A message listed under a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub name: String,
    pub payload: String,
    pub direction: Direction,
    pub service: String,
}

/// The most relevant messages of a channel
///
/// When any operation on the channel has a reply, the first such operation's
/// request and reply messages are listed. Otherwise the first receiving
/// operation's messages, otherwise the first sending one's. Only primary
/// channels are considered, so a channel used solely as a reply lists nothing.
pub fn channel_messages(schema: &Schema, channel: &str) -> Vec<ChannelMessage> {
    let operations: Vec<(&Service, &msgflow_core::Operation)> = schema
        .services
        .iter()
        .flat_map(|s| s.operations.iter().map(move |op| (s, op)))
        .filter(|(_, op)| op.channel.name == channel)
        .collect();

    let listed = |service: &Service, channel: &msgflow_core::Channel, direction| {
        channel
            .messages
            .iter()
            .map(|m| ChannelMessage {
                name: m.name.clone(),
                payload: m.payload.clone(),
                direction,
                service: service.name.clone(),
            })
            .collect::<Vec<_>>()
    };

    if let Some((service, op, reply)) = operations
        .iter()
        .find_map(|(s, op)| op.reply.as_ref().map(|r| (*s, *op, r)))
    {
        let mut messages = listed(service, &op.channel, Direction::Request);
        messages.extend(listed(service, reply, Direction::Reply));
        return messages;
    }

    for (action, direction) in [
        (Action::Receive, Direction::Receive),
        (Action::Send, Direction::Send),
    ] {
        if let Some((service, op)) = operations.iter().find(|(_, op)| op.action == action) {
            return listed(service, &op.channel, direction);
        }
    }

    Vec::new()
}

/// Render the README
///
/// Services appear by name and channels in [`unique_channels`] order. The
/// changelog section lists `changelogs` newest first.
///
/// # Errors
///
/// Returns `Serialization` when the schema fingerprint cannot be computed.
pub fn render_readme(schema: &Schema, title: &str, changelogs: &[Changelog]) -> Result<String> {
    let mut services: Vec<&Service> = schema.services.iter().collect();
    services.sort_by(|a, b| a.name.cmp(&b.name));
    let diagrams = DiagramNames::new(schema);

    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", title));
    out.push_str(&format!(
        "![Context]({}/{})\n\n",
        DIAGRAMS_DIR,
        context_diagram()
    ));

    out.push_str("## Table of Contents\n\n");
    out.push_str("- [Services](#services)\n");
    for service in &services {
        out.push_str(&format!("  - [{}](#{})\n", service.name, anchor(&service.name)));
    }
    out.push_str("- [Channels](#channels)\n");
    for (channel, _) in diagrams.channels() {
        out.push_str(&format!("  - [`{}`](#{})\n", channel, anchor(channel)));
    }
    out.push_str("- [Changelog](#changelog)\n\n");

    out.push_str("## Services\n\n");
    for service in &services {
        write_service(&mut out, service, diagrams.service(&service.name));
    }

    out.push_str("## Channels\n\n");
    for (channel, file) in diagrams.channels() {
        write_channel(&mut out, schema, channel, file);
    }

    out.push_str("## Changelog\n\n");
    out.push_str(&render_changelog_markdown(changelogs));

    out.push_str("\n---\n\n");
    out.push_str(&format!("Schema fingerprint: `{}`\n", schema.fingerprint()?));

    Ok(out)
}

fn write_service(out: &mut String, service: &Service, diagram: Option<&str>) {
    out.push_str(&format!("### {}\n\n", service.name));
    if !service.description.is_empty() {
        out.push_str(&format!("{}\n\n", service.description.trim()));
    }
    if let Some(file) = diagram {
        out.push_str(&format!(
            "![{}]({}/{})\n\n",
            service.name, DIAGRAMS_DIR, file
        ));
    }

    if service.operations.is_empty() {
        out.push_str("_No operations._\n\n");
        return;
    }

    out.push_str("| Action | Channel | Messages | Reply |\n");
    out.push_str("|--------|---------|----------|-------|\n");
    for op in &service.operations {
        let messages: Vec<&str> = op.channel.messages.iter().map(|m| m.name.as_str()).collect();
        let reply = match &op.reply {
            Some(reply) => format!("[`{}`](#{})", reply.name, anchor(&reply.name)),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "| {} | [`{}`](#{}) | {} | {} |\n",
            op.action,
            op.channel.name,
            anchor(&op.channel.name),
            messages.join(", "),
            reply
        ));
    }
    out.push('\n');
}

fn write_channel(out: &mut String, schema: &Schema, channel: &str, diagram: &str) {
    out.push_str(&format!("### `{}`\n\n", channel));
    out.push_str(&format!("![{}]({}/{})\n\n", channel, DIAGRAMS_DIR, diagram));

    for message in channel_messages(schema, channel) {
        out.push_str(&format!(
            "**{}** `{}` ({})\n\n",
            message.direction.as_str(),
            message.name,
            message.service
        ));
        if !message.payload.is_empty() {
            out.push_str(&format!("```json\n{}\n```\n\n", message.payload));
        }
    }
}
