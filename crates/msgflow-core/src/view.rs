//! View selection: which projection to compute and with what parameters.

use std::fmt;
use std::str::FromStr;

use crate::errors::MsgFlowError;

/// The projection a formatter is asked to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatMode {
    /// Every service plus the inferred connections between them
    ContextServices,
    /// One service with all of its operations
    #[default]
    ServiceChannels,
    /// One channel with its senders and receivers
    ChannelServices,
    /// One service with its direct neighbors
    ServiceServices,
}

impl FormatMode {
    /// All supported modes, in display order
    pub const ALL: [FormatMode; 4] = [
        FormatMode::ContextServices,
        FormatMode::ServiceChannels,
        FormatMode::ChannelServices,
        FormatMode::ServiceServices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatMode::ContextServices => "context_services",
            FormatMode::ServiceChannels => "service_channels",
            FormatMode::ChannelServices => "channel_services",
            FormatMode::ServiceServices => "service_services",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatMode {
    type Err = MsgFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| MsgFlowError::UnsupportedFormatMode {
                given: s.to_string(),
                expected: FormatMode::ALL
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            })
    }
}

/// Formatter input as it arrives from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub mode: FormatMode,
    pub service: Option<String>,
    pub channel: Option<String>,
    pub omit_payloads: bool,
}

impl FormatOptions {
    pub fn new(mode: FormatMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn omitting_payloads(mut self) -> Self {
        self.omit_payloads = true;
        self
    }
}

/// A fully resolved projection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSpec {
    Context,
    ServiceChannels { service: Option<String> },
    ChannelServices { channel: String, omit_payloads: bool },
    ServiceNeighbors { service: Option<String> },
}

impl ViewSpec {
    pub fn mode(&self) -> FormatMode {
        match self {
            ViewSpec::Context => FormatMode::ContextServices,
            ViewSpec::ServiceChannels { .. } => FormatMode::ServiceChannels,
            ViewSpec::ChannelServices { .. } => FormatMode::ChannelServices,
            ViewSpec::ServiceNeighbors { .. } => FormatMode::ServiceServices,
        }
    }
}

impl From<&FormatOptions> for ViewSpec {
    fn from(options: &FormatOptions) -> Self {
        match options.mode {
            FormatMode::ContextServices => ViewSpec::Context,
            FormatMode::ServiceChannels => ViewSpec::ServiceChannels {
                service: options.service.clone(),
            },
            FormatMode::ChannelServices => ViewSpec::ChannelServices {
                // An absent channel matches nothing and yields an empty view
                channel: options.channel.clone().unwrap_or_default(),
                omit_payloads: options.omit_payloads,
            },
            FormatMode::ServiceServices => ViewSpec::ServiceNeighbors {
                service: options.service.clone(),
            },
        }
    }
}
