//! msgflow Projection - derived views over the normalized model
//!
//! Every view is a pure read of a [`Schema`]:
//! - context: all services plus inferred service-to-service connections
//! - service channels: one service with its operations
//! - channel services: senders, receivers and representative messages of one channel
//! - service neighbors: one service with the services it talks to directly
//!
//! The [`d2`] module turns views into D2 diagram descriptions and renders them
//! through the `d2` command line tool.

pub mod channel;
pub mod context;
pub mod d2;
pub mod describe;
pub mod relations;
pub mod service;

pub use channel::{channel_services_view, ChannelServicesView, ViewMessage};
pub use context::{context_view, ContextView};
pub use d2::{D2RenderOptions, D2Renderer, D2Style, D2Target};
pub use describe::reflow_description;
pub use relations::{infer_connections, Connection, ConnectionLabel};
pub use service::{service_channels_view, service_neighbors_view, ServiceNeighborsView};

use msgflow_core::{FormatMode, Schema, Service, ViewSpec};

/// Result of projecting a schema through one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPayload {
    Context(ContextView),
    ServiceChannels(Service),
    ChannelServices(ChannelServicesView),
    ServiceNeighbors(ServiceNeighborsView),
}

impl ViewPayload {
    pub fn mode(&self) -> FormatMode {
        match self {
            ViewPayload::Context(_) => FormatMode::ContextServices,
            ViewPayload::ServiceChannels(_) => FormatMode::ServiceChannels,
            ViewPayload::ChannelServices(_) => FormatMode::ChannelServices,
            ViewPayload::ServiceNeighbors(_) => FormatMode::ServiceServices,
        }
    }
}

/// Project a schema through the requested view
///
/// Unknown service or channel names are not errors: they produce empty
/// payloads that callers can check.
pub fn project(schema: &Schema, view: &ViewSpec) -> ViewPayload {
    match view {
        ViewSpec::Context => ViewPayload::Context(context_view(schema)),
        ViewSpec::ServiceChannels { service } => {
            ViewPayload::ServiceChannels(service_channels_view(schema, service.as_deref()))
        }
        ViewSpec::ChannelServices {
            channel,
            omit_payloads,
        } => ViewPayload::ChannelServices(channel_services_view(schema, channel, *omit_payloads)),
        ViewSpec::ServiceNeighbors { service } => {
            ViewPayload::ServiceNeighbors(service_neighbors_view(schema, service.as_deref()))
        }
    }
}
