//! D2 diagram target.
//!
//! [`D2Target`] formats views as D2 source and renders them to SVG through
//! the external `d2` tool. Styling is fixed at construction time.

pub mod format;
pub mod render;

pub use render::{D2RenderOptions, D2Renderer};

use msgflow_core::{
    FormatOptions, FormattedSchema, MsgFlowError, Result, Schema, SchemaFormatter,
    SchemaRenderer, Target, TargetCapabilities, TargetType, ViewSpec,
};

use crate::project;

/// Tag carried by every description this target produces
pub const D2_TARGET_TYPE: &str = "d2";

/// Layout and shape settings applied to every diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct D2Style {
    /// `right`, `down`, `left` or `up`
    pub direction: String,
    pub service_shape: String,
    pub channel_shape: String,
}

impl Default for D2Style {
    fn default() -> Self {
        Self {
            direction: "right".to_string(),
            service_shape: "rectangle".to_string(),
            channel_shape: "queue".to_string(),
        }
    }
}

/// Formats views as D2 and renders them with the `d2` binary
#[derive(Debug, Clone, Default)]
pub struct D2Target {
    style: D2Style,
    renderer: D2Renderer,
}

impl D2Target {
    pub fn new(style: D2Style, renderer: D2Renderer) -> Self {
        Self { style, renderer }
    }

    pub fn style(&self) -> &D2Style {
        &self.style
    }

    pub fn target_type() -> TargetType {
        TargetType::new(D2_TARGET_TYPE)
    }
}

impl SchemaFormatter for D2Target {
    fn format_schema(&self, schema: &Schema, options: &FormatOptions) -> Result<FormattedSchema> {
        let payload = project(schema, &ViewSpec::from(options));
        let text = format::write_view(&self.style, &payload);
        Ok(FormattedSchema {
            target_type: Self::target_type(),
            data: text.into_bytes(),
        })
    }
}

impl SchemaRenderer for D2Target {
    fn render_schema(&self, formatted: &FormattedSchema) -> Result<Vec<u8>> {
        if formatted.target_type.as_str() != D2_TARGET_TYPE {
            return Err(MsgFlowError::UnsupportedFormat {
                given: formatted.target_type.to_string(),
                expected: D2_TARGET_TYPE.to_string(),
            });
        }
        self.renderer.render(&formatted.data)
    }
}

impl Target for D2Target {
    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            format: true,
            render: true,
        }
    }
}
