//! Merge of independently extracted schemas
//!
//! Services are keyed by name, operations by [`OperationKey`]. Inputs are
//! folded left to right, so for a repeated key the last input wins.

use std::collections::HashMap;

use crate::model::{Operation, OperationKey, Schema, Service};

/// Merge schemas into one, keeping first-appearance service order
///
/// An empty input yields an empty schema.
pub fn merge_schemas(schemas: &[Schema]) -> Schema {
    merge_schemas_owned(schemas.to_vec())
}

/// Owning variant of [`merge_schemas`]
pub fn merge_schemas_owned(schemas: Vec<Schema>) -> Schema {
    let inputs = schemas.len();
    let mut services: Vec<Service> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for service in schemas.into_iter().flat_map(|s| s.services) {
        let Service {
            name,
            description,
            operations,
        } = service;

        let index = match positions.get(&name) {
            Some(&index) => index,
            None => {
                positions.insert(name.clone(), services.len());
                services.push(Service::new(name, String::new()));
                services.len() - 1
            }
        };

        let target = &mut services[index];
        if target.description.is_empty() {
            target.description = description;
        }
        absorb_operations(&mut target.operations, operations);
    }

    tracing::debug!(
        inputs = inputs,
        services_len = services.len(),
        "merged schemas"
    );

    Schema { services }
}

/// Union `incoming` into `existing` by operation key
///
/// A repeated key replaces the earlier operation in place; new keys append.
fn absorb_operations(existing: &mut Vec<Operation>, incoming: Vec<Operation>) {
    let mut positions: HashMap<OperationKey, usize> = HashMap::new();
    let mut deduped: Vec<Operation> = Vec::with_capacity(existing.len() + incoming.len());

    for op in existing.drain(..).chain(incoming) {
        let key = op.key();
        match positions.get(&key) {
            Some(&index) => deduped[index] = op,
            None => {
                positions.insert(key, deduped.len());
                deduped.push(op);
            }
        }
    }

    *existing = deduped;
}
