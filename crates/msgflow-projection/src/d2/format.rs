//! D2 source writers, one per view.

use std::collections::BTreeSet;

use msgflow_core::{Action, Message, Service};

use crate::channel::{ChannelServicesView, ViewMessage};
use crate::context::ContextView;
use crate::d2::D2Style;
use crate::describe::reflow_description;
use crate::service::ServiceNeighborsView;
use crate::ViewPayload;

const DASHED: &str = "{style.stroke-dash: 3}";

/// Write the D2 description of a projected view
pub fn write_view(style: &D2Style, payload: &ViewPayload) -> String {
    let mut out = format!("direction: {}\n\n", style.direction);
    match payload {
        ViewPayload::Context(view) => write_context(&mut out, style, view),
        ViewPayload::ServiceChannels(service) => write_service_channels(&mut out, style, service),
        ViewPayload::ChannelServices(view) => write_channel_services(&mut out, style, view),
        ViewPayload::ServiceNeighbors(view) => write_service_neighbors(&mut out, style, view),
    }
    out
}

/// Quote a D2 identifier or string
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Shortest run of pipes that does not occur in `text`
fn block_delimiter(text: &str) -> String {
    let mut delimiter = "|".to_string();
    while text.contains(delimiter.as_str()) {
        delimiter.push('|');
    }
    delimiter
}

/// Node key of a channel
///
/// Services are keyed by their bare name; channels live under their own
/// prefix so a channel named like a service stays a separate node. The
/// visible label is unaffected.
pub fn channel_key(name: &str) -> String {
    format!("channel:{}", name)
}

fn write_node(out: &mut String, name: &str, shape: &str, markdown: &str) {
    let delimiter = block_delimiter(markdown);
    out.push_str(&format!("{}: {{\n", quote(name)));
    out.push_str(&format!("  shape: {}\n", shape));
    out.push_str(&format!("  label: {}md\n", delimiter));
    for line in markdown.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out.push_str(&format!("  {}\n", delimiter));
    out.push_str("}\n");
}

fn write_plain_node(out: &mut String, name: &str, shape: &str) {
    out.push_str(&format!("{}: {{shape: {}}}\n", quote(name), shape));
}

fn write_edge(out: &mut String, from: &str, arrow: &str, to: &str, attributes: Option<&str>) {
    out.push_str(&format!("{} {} {}", quote(from), arrow, quote(to)));
    if let Some(attributes) = attributes {
        out.push_str(&format!(": {}", attributes));
    }
    out.push('\n');
}

fn service_markdown(name: &str, description: &str) -> String {
    if description.is_empty() {
        format!("### {}", name)
    } else {
        format!("### {}\n\n{}", name, description)
    }
}

fn payload_markdown(payload: &str) -> String {
    format!("```json\n{}\n```", payload)
}

fn write_context(out: &mut String, style: &D2Style, view: &ContextView) {
    for service in &view.services {
        write_node(
            out,
            &service.name,
            &style.service_shape,
            &service_markdown(&service.name, &service.description),
        );
        out.push('\n');
    }

    for connection in &view.connections {
        let arrow = if connection.bidirectional { "<->" } else { "->" };
        write_edge(
            out,
            &connection.from,
            arrow,
            &connection.to,
            Some(&quote(connection.label.as_str())),
        );
    }
}

fn channel_markdown(name: &str, messages: &[Message]) -> String {
    let mut markdown = format!("### `{}`", name);
    for message in messages {
        markdown.push_str(&format!(
            "\n\n**{}**\n\n{}",
            message.name,
            payload_markdown(&message.payload)
        ));
    }
    markdown
}

fn write_service_channels(out: &mut String, style: &D2Style, service: &Service) {
    if service.name.is_empty() {
        return;
    }

    write_node(
        out,
        &service.name,
        &style.service_shape,
        &service_markdown(&service.name, &reflow_description(&service.description)),
    );
    out.push('\n');

    let mut declared: BTreeSet<&str> = BTreeSet::new();
    let channels = service
        .operations
        .iter()
        .flat_map(|op| std::iter::once(&op.channel).chain(op.reply.as_ref()));
    for channel in channels {
        if declared.insert(channel.name.as_str()) {
            write_node(
                out,
                &channel_key(&channel.name),
                &style.channel_shape,
                &channel_markdown(&channel.name, &channel.messages),
            );
            out.push('\n');
        }
    }

    for op in &service.operations {
        let channel = channel_key(&op.channel.name);
        let reply = op.reply.as_ref().map(|r| channel_key(&r.name));
        match op.action {
            Action::Send => {
                write_edge(out, &service.name, "->", &channel, None);
                if let Some(reply) = &reply {
                    write_edge(out, reply, "->", &service.name, Some(DASHED));
                }
            }
            Action::Receive => {
                write_edge(out, &channel, "->", &service.name, None);
                if let Some(reply) = &reply {
                    write_edge(out, &service.name, "->", reply, Some(DASHED));
                }
            }
        }
    }
}

fn view_message_markdown(title: &str, message: &ViewMessage) -> String {
    let mut markdown = format!("\n\n**{}**: `{}`", title, message.name);
    if let Some(payload) = &message.payload {
        markdown.push_str(&format!("\n\n{}", payload_markdown(payload)));
    }
    markdown
}

fn write_channel_services(out: &mut String, style: &D2Style, view: &ChannelServicesView) {
    let mut markdown = format!("### `{}`", view.channel);
    if let Some(message) = &view.message {
        markdown.push_str(&view_message_markdown("Message", message));
    }
    if let Some(reply) = &view.reply {
        markdown.push_str(&view_message_markdown("Reply", reply));
    }
    let channel = channel_key(&view.channel);
    write_node(out, &channel, &style.channel_shape, &markdown);
    out.push('\n');

    let mut declared: BTreeSet<&str> = BTreeSet::new();
    for name in view.senders.iter().chain(&view.receivers) {
        if declared.insert(name.as_str()) {
            write_plain_node(out, name, &style.service_shape);
        }
    }
    out.push('\n');

    for sender in &view.senders {
        write_edge(out, sender, "->", &channel, None);
    }
    for receiver in &view.receivers {
        write_edge(out, &channel, "->", receiver, None);
    }
}

fn write_service_neighbors(out: &mut String, style: &D2Style, view: &ServiceNeighborsView) {
    if view.main.name.is_empty() {
        return;
    }

    for service in std::iter::once(&view.main).chain(&view.neighbors) {
        write_node(
            out,
            &service.name,
            &style.service_shape,
            &service_markdown(&service.name, &reflow_description(&service.description)),
        );
        out.push('\n');
    }

    let mut edges: BTreeSet<(&str, &str, &str)> = BTreeSet::new();
    for neighbor in &view.neighbors {
        for (sender, receiver) in [(&view.main, neighbor), (neighbor, &view.main)] {
            for channel in sender.channels_for(Action::Send) {
                if receiver.channels_for(Action::Receive).any(|c| c == channel) {
                    edges.insert((sender.name.as_str(), receiver.name.as_str(), channel));
                }
            }
        }
    }

    for (from, to, channel) in edges {
        write_edge(out, from, "->", to, Some(&quote(channel)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes_backslashes_and_quotes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(
            quote("notification.user.{user_id}.push"),
            "\"notification.user.{user_id}.push\""
        );
    }

    #[test]
    fn test_block_delimiter_avoids_content_pipes() {
        assert_eq!(block_delimiter("plain"), "|");
        assert_eq!(block_delimiter("a | b"), "||");
        assert_eq!(block_delimiter("a || b"), "|||");
    }
}
