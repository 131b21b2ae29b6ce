use std::path::PathBuf;

use cd_base::config::constants::ENV_CONTENT_DIR;
use cd_base::config::{CHANNELS, Timings, parse_ms};
use cd_base::error::ConfigError;
use cd_base::templates::{DirectorySource, TemplateRegistry, TemplateSource};

pub const USAGE: &str =
    "Usage: channel-dungeons [#channel] [--content <dir>] [--typing-ms <n>] [--gap-ms <n>] [--headless]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Entry location, e.g. `#about`; empty lands on the home channel with the full intro
    pub entry: String,
    pub content_dir: Option<PathBuf>,
    pub typing_ms: Option<u64>,
    pub gap_ms: Option<u64>,
    /// Replay a stdin script instead of opening the terminal UI
    pub headless: bool,
    pub help: bool,
}

/// Parse arguments (program name already skipped).
pub fn parse_args(args: &[String]) -> Result<CliArgs, ConfigError> {
    let mut parsed = CliArgs::default();
    let mut entry = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--content" | "--typing-ms" | "--gap-ms" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(ConfigError::Usage(format!("{} needs a value", arg)));
                };
                match arg {
                    "--content" => parsed.content_dir = Some(PathBuf::from(value)),
                    "--typing-ms" => parsed.typing_ms = Some(parse_ms(arg, value)?),
                    _ => parsed.gap_ms = Some(parse_ms(arg, value)?),
                }
                i += 2;
                continue;
            }
            "--headless" => parsed.headless = true,
            "-h" | "--help" => parsed.help = true,
            _ if arg.starts_with("--") => return Err(ConfigError::Usage(format!("Unknown argument: {}", arg))),
            _ if entry.is_some() => return Err(ConfigError::Usage(format!("Unexpected argument: {}", arg))),
            _ => entry = Some(arg.to_string()),
        }
        i += 1;
    }

    parsed.entry = entry.unwrap_or_default();
    Ok(parsed)
}

impl CliArgs {
    /// Defaults, then environment, then flags.
    pub fn timings(&self) -> Result<Timings, ConfigError> {
        let mut timings = Timings::default().with_env_overrides()?;
        if let Some(ms) = self.typing_ms {
            timings.typing_ms = ms;
        }
        if let Some(ms) = self.gap_ms {
            timings.gap_ms = ms;
        }
        Ok(timings)
    }

    /// `--content` wins over `CHANNEL_DUNGEONS_CONTENT_DIR`.
    pub fn content_dir(&self) -> Option<PathBuf> {
        self.content_dir.clone().or_else(|| std::env::var_os(ENV_CONTENT_DIR).map(PathBuf::from))
    }

    /// Embedded content, overlaid by a content directory when one is configured.
    pub fn template_source(&self) -> Result<Box<dyn TemplateSource>, ConfigError> {
        let registry = TemplateRegistry::from_config(&CHANNELS);
        Ok(match self.content_dir() {
            Some(dir) => Box::new(DirectorySource::new(dir, registry)?),
            None => Box::new(registry),
        })
    }
}
