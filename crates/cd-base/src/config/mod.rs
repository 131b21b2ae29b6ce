//! YAML configuration for the channel registry, bot replies and UI strings.
use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::channel::{ChannelId, MessageTemplate};
use crate::command::CommandSpec;
use crate::error::ConfigError;

pub mod constants;

use constants::{ENV_GAP_MS, ENV_TYPING_MS, INTER_MESSAGE_GAP_MS, INTERFACE_SHOW_DELAY_MS, TYPING_DURATION_MS};

// ============================================================================
// Channel Registry
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChannelsConfig {
    /// Channel shown when the entry location names nothing usable
    pub home: ChannelId,
    /// Sidebar order
    pub channels: Vec<ChannelEntry>,
    pub commands: Vec<CommandSpec>,
    /// Authored blocks keyed by `{channel}-content`
    #[serde(default)]
    pub content: HashMap<String, Vec<MessageTemplate>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelEntry {
    pub id: ChannelId,
    #[serde(default)]
    pub topic: String,
}

impl ChannelsConfig {
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.channels.iter().map(|c| c.id.clone()).collect()
    }

    pub fn topic(&self, id: &ChannelId) -> Option<&str> {
        self.channels.iter().find(|c| &c.id == id).map(|c| c.topic.as_str())
    }
}

// ============================================================================
// Replies & UI Strings
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub responses: Responses,
    pub ui: UiStrings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Responses {
    pub demo: String,
    pub unknown_command: String,
    pub command_item: String,
    pub help: String,
    pub help_item: String,
    pub empty_channel: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiStrings {
    pub title: String,
    pub input_placeholder: String,
    pub typing_label: String,
    pub hidden_input_hint: String,
}

impl Responses {
    pub fn empty_channel(&self, channel: &ChannelId) -> String {
        self.empty_channel.replace("{channel}", channel.as_str())
    }

    /// `command` is whatever the user typed, so it is escaped and never re-scanned for placeholders.
    pub fn unknown_command<'a>(&self, command: &str, names: impl IntoIterator<Item = &'a str>) -> String {
        let commands: Vec<String> = names.into_iter().map(|n| self.command_item.replace("{name}", n)).collect();
        fill(&self.unknown_command, &[("command", &escape_markup(command)), ("commands", &commands.join(", "))])
    }

    pub fn help<'a>(&self, entries: impl IntoIterator<Item = &'a CommandSpec>) -> String {
        let lines: Vec<String> = entries
            .into_iter()
            .map(|c| self.help_item.replace("{name}", &c.name).replace("{description}", &c.description))
            .collect();
        self.help.replace("{commands}", &lines.join("<br>"))
    }
}

/// Substitute `{key}` placeholders in a single left-to-right pass. Unknown placeholders stay as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            values.iter().find(|(k, _)| *k == key).map(|(_, v)| (close, *v))
        });
        match value {
            Some((close, v)) => {
                out.push_str(v);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Make user text inert inside a markup body.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// ============================================================================
// Animation Timings
// ============================================================================

/// Delays driving the reveal animation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Timings {
    pub typing_ms: u64,
    pub gap_ms: u64,
    pub interface_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self { typing_ms: TYPING_DURATION_MS, gap_ms: INTER_MESSAGE_GAP_MS, interface_delay_ms: INTERFACE_SHOW_DELAY_MS }
    }
}

impl Timings {
    /// Offset of message `index`'s typing indicator from the start of its sequence.
    pub fn delay(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.typing_ms.saturating_add(self.gap_ms))
    }

    /// Offset of message `index`'s reveal from the start of its sequence.
    pub fn reveal_offset(&self, index: usize) -> u64 {
        self.delay(index).saturating_add(self.typing_ms)
    }

    /// Apply `CHANNEL_DUNGEONS_TYPING_MS` / `CHANNEL_DUNGEONS_GAP_MS` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_TYPING_MS) {
            self.typing_ms = parse_ms(ENV_TYPING_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GAP_MS) {
            self.gap_ms = parse_ms(ENV_GAP_MS, &raw)?;
        }
        Ok(self)
    }
}

pub fn parse_ms(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber { name: name.to_string(), value: raw.to_string() })
}

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (lazy static, embedded at compile time)
// ============================================================================

pub static CHANNELS: LazyLock<ChannelsConfig> =
    LazyLock::new(|| parse_yaml("channels.yaml", include_str!("../../../../yamls/channels.yaml")));
pub static CONFIG: LazyLock<AppConfig> =
    LazyLock::new(|| parse_yaml("config.yaml", include_str!("../../../../yamls/config.yaml")));
