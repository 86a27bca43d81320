//! Channel view: who sends and who receives on one channel.

use msgflow_core::{Action, Message, Schema};

/// A representative message shown on a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMessage {
    pub name: String,
    /// `None` when payloads are omitted
    pub payload: Option<String>,
}

/// Participants and representative messages of one channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelServicesView {
    pub channel: String,
    pub message: Option<ViewMessage>,
    pub reply: Option<ViewMessage>,
    pub senders: Vec<String>,
    pub receivers: Vec<String>,
    pub omit_payloads: bool,
}

impl ChannelServicesView {
    /// True when no service uses the channel
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty() && self.receivers.is_empty()
    }
}

/// Keeps the candidate with the longest payload, first one on ties
#[derive(Default)]
struct Representative<'a>(Option<&'a Message>);

impl<'a> Representative<'a> {
    fn offer(&mut self, candidate: &'a Message) {
        match self.0 {
            Some(current) if candidate.payload.len() <= current.payload.len() => {}
            _ => self.0 = Some(candidate),
        }
    }

    fn into_view(self, omit_payloads: bool) -> Option<ViewMessage> {
        self.0.map(|m| ViewMessage {
            name: m.name.clone(),
            payload: (!omit_payloads).then(|| m.payload.clone()),
        })
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

/// Project one channel
///
/// An operation takes part when its primary or its reply channel carries the
/// requested name. On a reply channel the roles flip: the requester receives
/// and the responder sends.
pub fn channel_services_view(
    schema: &Schema,
    channel: &str,
    omit_payloads: bool,
) -> ChannelServicesView {
    let mut view = ChannelServicesView {
        channel: channel.to_string(),
        omit_payloads,
        ..ChannelServicesView::default()
    };
    let mut message = Representative::default();
    let mut reply = Representative::default();

    for service in &schema.services {
        for op in &service.operations {
            let on_primary = op.channel.name == channel;
            let on_reply = op.reply.as_ref().is_some_and(|r| r.name == channel);
            if !on_primary && !on_reply {
                continue;
            }

            if on_primary {
                match op.action {
                    Action::Send => push_unique(&mut view.senders, &service.name),
                    Action::Receive => push_unique(&mut view.receivers, &service.name),
                }
                op.channel.messages.iter().for_each(|m| message.offer(m));
            }
            if on_reply {
                match op.action {
                    Action::Send => push_unique(&mut view.receivers, &service.name),
                    Action::Receive => push_unique(&mut view.senders, &service.name),
                }
            }
            if let Some(reply_channel) = &op.reply {
                reply_channel.messages.iter().for_each(|m| reply.offer(m));
            }
        }
    }

    view.message = message.into_view(omit_payloads);
    view.reply = reply.into_view(omit_payloads);
    view
}
