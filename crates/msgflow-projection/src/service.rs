//! Service-centric views.

use std::collections::HashSet;

use msgflow_core::{Action, Schema, Service};

/// One service and the services it exchanges messages with directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNeighborsView {
    pub main: Service,
    /// Neighbors in schema order, never containing `main`
    pub neighbors: Vec<Service>,
}

/// Resolve the main service of a service-scoped view
///
/// Without a name, a single-service schema selects its only service. An
/// unknown name selects an empty service.
fn resolve_service(schema: &Schema, name: Option<&str>) -> Service {
    let found = match name {
        None | Some("") if schema.services.len() == 1 => schema.services.first(),
        Some(name) => schema.service(name),
        None => None,
    };
    found
        .cloned()
        .unwrap_or_else(|| Service::new(name.unwrap_or_default(), ""))
}

/// The service with all of its operations
pub fn service_channels_view(schema: &Schema, service: Option<&str>) -> Service {
    resolve_service(schema, service)
}

/// The service and every service that receives what it sends or sends what
/// it receives
pub fn service_neighbors_view(schema: &Schema, service: Option<&str>) -> ServiceNeighborsView {
    let main = resolve_service(schema, service);
    let sends: HashSet<&str> = main.channels_for(Action::Send).collect();
    let receives: HashSet<&str> = main.channels_for(Action::Receive).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut neighbors = Vec::new();

    for candidate in &schema.services {
        if candidate.name == main.name || seen.contains(candidate.name.as_str()) {
            continue;
        }
        let is_neighbor = candidate
            .channels_for(Action::Send)
            .any(|c| receives.contains(c))
            || candidate
                .channels_for(Action::Receive)
                .any(|c| sends.contains(c));
        if is_neighbor {
            seen.insert(candidate.name.as_str());
            neighbors.push(candidate.clone());
        }
    }

    tracing::debug!(
        service = %main.name,
        neighbors_len = neighbors.len(),
        "resolved service neighbors"
    );

    ServiceNeighborsView { main, neighbors }
}
