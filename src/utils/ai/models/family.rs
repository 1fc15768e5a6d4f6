//! Model family classification
//!
//! Every counting decision branches once on the family of a normalized model
//! name instead of scattering substring checks through the counter.

use serde::Serialize;

/// Substring identifying models whose tokens are counted by the provider
pub const REMOTE_COUNTED_MARKER: &str = "claude-";

const LEGACY_TURBO_0301: &str = "gpt-3.5-turbo-0301";

/// Snapshots with the current chat formatting overhead
const KNOWN_SNAPSHOTS: &[&str] = &[
    "gpt-3.5-turbo-0613",
    "gpt-3.5-turbo-16k-0613",
    "gpt-4-0314",
    "gpt-4-32k-0314",
    "gpt-4-0613",
    "gpt-4-32k-0613",
    "gpt-4-turbo",
    "gpt-4-turbo-2024-04-09",
    "gpt-4o",
    "gpt-4o-2024-05-13",
];

/// Versionless aliases and the snapshot each is counted as. Order matters:
/// `gpt-4o` must be tried before `gpt-4`.
const ALIASES: &[(&str, &str)] = &[
    ("gpt-3.5-turbo", "gpt-3.5-turbo-0613"),
    ("gpt-4o", "gpt-4o-2024-05-13"),
    ("gpt-4", "gpt-4-0613"),
];

/// Per-message and per-name token overhead of the chat prompt format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageOverhead {
    pub per_message: i64,
    pub per_name: i64,
}

impl MessageOverhead {
    pub const CURRENT: Self = Self {
        per_message: 3,
        per_name: 1,
    };

    pub const LEGACY: Self = Self {
        per_message: 4,
        per_name: -1,
    };
}

/// Tokens priming every assistant reply (`<|start|>assistant<|message|>`)
pub const REPLY_PRIMER_TOKENS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ModelFamily {
    /// Explicitly known snapshot counted locally
    Generic,
    /// `gpt-3.5-turbo-0301`, the only snapshot with the legacy overhead
    LegacyTurbo0301,
    /// Alias whose target changes over time, counted as `snapshot`
    Alias { snapshot: &'static str },
    /// Counted by the provider's count endpoint
    RemoteCounted,
    /// Not recognized, counted locally with the current overhead
    Unknown,
}

impl ModelFamily {
    /// Classify a lower-cased model name
    pub fn classify(model: &str) -> Self {
        if model.contains(REMOTE_COUNTED_MARKER) {
            return Self::RemoteCounted;
        }

        if model.contains(LEGACY_TURBO_0301) {
            return Self::LegacyTurbo0301;
        }

        if KNOWN_SNAPSHOTS.iter().any(|snapshot| *snapshot == model) {
            return Self::Generic;
        }

        ALIASES
            .iter()
            .find(|&&(alias, _)| model.contains(alias))
            .map(|&(_, snapshot)| Self::Alias { snapshot })
            .unwrap_or(Self::Unknown)
    }

    /// Whether `model` belongs to the remotely counted family
    pub fn is_remote_counted(model: &str) -> bool {
        Self::classify(model) == Self::RemoteCounted
    }

    /// Overhead for families counted locally without re-dispatch
    pub fn message_overhead(&self) -> Option<MessageOverhead> {
        match self {
            Self::Generic | Self::Unknown => Some(MessageOverhead::CURRENT),
            Self::LegacyTurbo0301 => Some(MessageOverhead::LEGACY),
            Self::Alias { .. } | Self::RemoteCounted => None,
        }
    }
}
