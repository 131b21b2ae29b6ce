//! Scripted, hand-clocked replay of a session. Prints the final state as JSON.
//!
//! One instruction per line:
//! - `/command` or free text: submitted to the command bar
//! - `:wait <ms>`: let time pass
//! - `:settle`: run until nothing is pending
//! - `:click <channel>`: sidebar click
//! - `:back` / `:forward`: walk location history
//!
//! Blank lines and lines starting with `;` are ignored.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use cd_base::channel::{ChannelId, RenderedMessage};
use cd_base::config::constants::MAX_WAIT_MS;
use cd_base::config::parse_ms;
use cd_base::error::{ConfigError, SessionError};
use cd_base::replay::ReplayDriver;
use cd_base::session::{ChannelSession, SessionConfig, SwitchOrigin};

use crate::cli::CliArgs;
use crate::ui::markup::strip_markup;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: ConfigError,
    },
    #[error("line {line}: {source}")]
    Session {
        line: usize,
        #[source]
        source: SessionError,
    },
    #[error("line {line}: no channel named {channel:?}")]
    UnknownChannel { line: usize, channel: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Input(String),
    Wait(u64),
    Settle,
    Click(String),
    Back,
    Forward,
}

pub fn parse_line(raw: &str) -> Result<Option<ScriptLine>, ConfigError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(';') {
        return Ok(None);
    }
    let Some(directive) = line.strip_prefix(':') else {
        return Ok(Some(ScriptLine::Input(line.to_string())));
    };
    let (name, arg) = directive.split_once(char::is_whitespace).unwrap_or((directive, ""));
    let arg = arg.trim();
    let parsed = match (name, arg.is_empty()) {
        ("wait", false) => ScriptLine::Wait(parse_wait(arg)?),
        ("click", false) => ScriptLine::Click(arg.to_string()),
        ("settle", true) => ScriptLine::Settle,
        ("back", true) => ScriptLine::Back,
        ("forward", true) => ScriptLine::Forward,
        _ => return Err(ConfigError::Usage(format!("unknown directive {:?}", line))),
    };
    Ok(Some(parsed))
}

fn parse_wait(arg: &str) -> Result<u64, ConfigError> {
    let ms = parse_ms(":wait", arg)?;
    if ms > MAX_WAIT_MS {
        return Err(ConfigError::InvalidNumber { name: ":wait".to_string(), value: arg.to_string() });
    }
    Ok(ms)
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub channel: &'a str,
    pub fragment: &'a str,
    pub interface_shown: bool,
    pub typing: bool,
    pub elapsed_ms: u64,
    pub transcript: Vec<SnapshotMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotMessage<'a> {
    #[serde(flatten)]
    pub message: &'a RenderedMessage,
    /// Body without markup
    pub text: String,
}

impl<'a> Snapshot<'a> {
    pub fn capture(session: &'a ChannelSession) -> Self {
        Self {
            channel: session.current().as_str(),
            fragment: session.location().fragment(),
            interface_shown: session.interface_shown(),
            typing: session.is_typing(),
            elapsed_ms: session.now_ms(),
            transcript: session
                .transcript()
                .iter()
                .map(|message| SnapshotMessage { message, text: strip_markup(&message.body) })
                .collect(),
        }
    }
}

/// Replay each script line against the driver.
pub fn replay(driver: &mut ReplayDriver, script: impl BufRead) -> Result<(), ReplayError> {
    for (index, raw) in script.lines().enumerate() {
        let line = index + 1;
        let Some(step) = parse_line(&raw?).map_err(|source| ReplayError::Script { line, source })? else {
            continue;
        };
        match step {
            ScriptLine::Input(text) => {
                driver.session_mut().submit(&text);
            }
            ScriptLine::Wait(ms) => driver.advance(ms),
            ScriptLine::Settle => {
                driver.settle();
            }
            ScriptLine::Click(channel) => {
                let known = ChannelId::new(channel.as_str())
                    .is_ok_and(|id| driver.session().channels().contains(&id));
                if !known {
                    return Err(ReplayError::UnknownChannel { line, channel });
                }
                driver
                    .session_mut()
                    .try_switch_to_name(&channel, SwitchOrigin::User)
                    .map_err(|source| ReplayError::Session { line, source })?;
            }
            ScriptLine::Back => {
                driver.session_mut().back();
            }
            ScriptLine::Forward => {
                driver.session_mut().forward();
            }
        }
    }
    Ok(())
}

/// `--headless`: start at the entry location, replay stdin, print the snapshot.
pub fn run(args: &CliArgs, script: impl BufRead, mut out: impl Write) -> Result<(), ReplayError> {
    let config = SessionConfig::embedded(args.timings()?)?;
    let mut driver = ReplayDriver::new(config, args.template_source()?);
    driver.session_mut().start(&args.entry);
    replay(&mut driver, script)?;

    info!(channel = %driver.session().current(), elapsed_ms = driver.now_ms(), "replay finished");
    serde_json::to_writer_pretty(&mut out, &Snapshot::capture(driver.session()))?;
    writeln!(out)?;
    Ok(())
}
