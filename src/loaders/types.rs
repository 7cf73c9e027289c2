use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A storage destination that collected data is written to
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Bucket {
    pub organization: String,
    pub organization_id: String,
    pub name: String,
    pub id: String,
}

/// The bucket the wizard writes into. Always built from a single `Bucket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSelection {
    pub org: String,
    pub org_id: String,
    pub bucket: String,
    pub bucket_id: String,
}

impl From<&Bucket> for BucketSelection {
    fn from(b: &Bucket) -> Self {
        Self {
            org: b.organization.clone(),
            org_id: b.organization_id.clone(),
            bucket: b.name.clone(),
            bucket_id: b.id.clone(),
        }
    }
}

/// Kind of data loader being set up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLoaderType {
    /// Explicitly unset. Distinct from `None` when used as a starting value.
    #[default]
    Empty,
    Csv,
    Streaming,
    LineProtocol,
    Scraping,
}

impl DataLoaderType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DataLoaderType::Empty => "(none)",
            DataLoaderType::Csv => "CSV",
            DataLoaderType::Streaming => "Streaming",
            DataLoaderType::LineProtocol => "Line Protocol",
            DataLoaderType::Scraping => "Scraping",
        }
    }
}

/// Failure to read a loader type or substep from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown data loader type: {0}")]
    LoaderType(String),

    #[error("invalid substep: {0}")]
    Substep(String),
}

impl FromStr for DataLoaderType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "empty" | "none" => Ok(DataLoaderType::Empty),
            "csv" => Ok(DataLoaderType::Csv),
            "streaming" => Ok(DataLoaderType::Streaming),
            "line-protocol" | "line_protocol" | "lp" => Ok(DataLoaderType::LineProtocol),
            "scraping" => Ok(DataLoaderType::Scraping),
            other => Err(ParseError::LoaderType(other.to_string())),
        }
    }
}

/// Coarse steps of the collectors wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorsStep {
    Select = 0,
    Configure = 1,
    Verify = 2,
}

impl CollectorsStep {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CollectorsStep::Select),
            1 => Some(CollectorsStep::Configure),
            2 => Some(CollectorsStep::Verify),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            CollectorsStep::Select => "Select",
            CollectorsStep::Configure => "Configure",
            CollectorsStep::Verify => "Verify",
        }
    }
}

/// Position inside a step, used to resume partial progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substep {
    Index(usize),
    Streaming,
    Config,
}

impl FromStr for Substep {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "streaming" => Ok(Substep::Streaming),
            "config" => Ok(Substep::Config),
            other => other
                .parse::<usize>()
                .map(Substep::Index)
                .map_err(|_| ParseError::Substep(other.to_string())),
        }
    }
}

impl fmt::Display for Substep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substep::Index(i) => write!(f, "{i}"),
            Substep::Streaming => f.write_str("streaming"),
            Substep::Config => f.write_str("config"),
        }
    }
}

/// Endpoint metadata handed to step views
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Links {
    pub buckets: String,
    pub telegrafs: String,
    pub write: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            buckets: "/api/v2/buckets".to_string(),
            telegrafs: "/api/v2/telegrafs".to_string(),
            write: "/api/v2/write".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// Message sent through the shared notification channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}
