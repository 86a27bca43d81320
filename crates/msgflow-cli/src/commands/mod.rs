pub mod gen_docs;
pub mod gen_schema;

use std::path::Path;

use msgflow_projection::d2::{D2RenderOptions, D2Renderer, D2Style, D2Target, D2_TARGET_TYPE};

/// Build the target named on the command line
pub fn pick_target(name: &str, d2_bin: &Path) -> Result<D2Target, Box<dyn std::error::Error>> {
    match name {
        D2_TARGET_TYPE => Ok(D2Target::new(
            D2Style::default(),
            D2Renderer::new(D2RenderOptions {
                bin: d2_bin.to_path_buf(),
                ..D2RenderOptions::default()
            }),
        )),
        other => Err(format!("unknown target '{}', expected {}", other, D2_TARGET_TYPE).into()),
    }
}
