//! Context view: the whole system at a glance.

use msgflow_core::{Schema, Service};

use crate::describe::reflow_description;
use crate::relations::{infer_connections, Connection};

/// All services with display-ready descriptions plus their connections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextView {
    pub services: Vec<Service>,
    pub connections: Vec<Connection>,
}

pub fn context_view(schema: &Schema) -> ContextView {
    let services = schema
        .services
        .iter()
        .map(|service| Service {
            description: reflow_description(&service.description),
            ..service.clone()
        })
        .collect();

    ContextView {
        services,
        connections: infer_connections(schema),
    }
}
