//! Configuration: file discovery, CLI overrides, validation.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::SystemTime;

/// Bridge spawned when neither the CLI nor a config file names one.
pub const DEFAULT_BRIDGE_COMMAND: &str = "claude";

/// Config file discovered by walking up from the current directory.
pub const CONFIG_FILE: &str = "chatfold.toml";

/// Parsed `chatfold.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub bridge: BridgeSection,
}

/// `[bridge]` section of the config file.
#[derive(Debug, Default, Deserialize)]
pub struct BridgeSection {
    /// Program to spawn.
    pub command: Option<String>,
    /// Extra args inserted before the prompt.
    #[serde(default)]
    pub args: Vec<String>,
    /// Model forwarded via `--model`.
    pub model: Option<String>,
}

/// Locate and parse the nearest `chatfold.toml`, walking up the directory
/// tree from the current directory. `None` when no file exists.
pub fn discover_file_config() -> Result<Option<FileConfig>> {
    let start = std::env::current_dir().context("failed to get current directory")?;
    discover_from(&start)
}

fn discover_from(start: &Path) -> Result<Option<FileConfig>> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            let raw = std::fs::read_to_string(&candidate)
                .with_context(|| format!("failed to read {}", candidate.display()))?;
            let parsed: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("failed to parse {}", candidate.display()))?;
            return Ok(Some(parsed));
        }
        dir = current.parent();
    }
    Ok(None)
}

/// Generate a unique request ID: `req-{8 hex chars}`.
/// Uses a hash of timestamp and process ID.
fn generate_request_id() -> String {
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    std::process::id().hash(&mut hasher);
    let hash = hasher.finish();
    format!("req-{:08x}", hash as u32)
}

/// Resolved configuration for one `chatfold run` invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Program to spawn.
    pub bridge_cmd: String,
    /// Extra args inserted before the prompt.
    pub bridge_args: Vec<String>,
    /// Model forwarded via `--model`, if any.
    pub model: Option<String>,
    /// Whether to append the raw stream to a log file.
    pub log_raw: bool,
    /// Unique request ID for this run (format: req-{8 hex chars}).
    pub request_id: String,
}

impl Config {
    /// Build config from run command args and the discovered file config.
    ///
    /// A `--bridge` override is split with shell quoting rules and replaces
    /// both the file's command and its extra args; otherwise the file's
    /// values (or the default command) apply.
    pub fn from_run_args(
        bridge: Option<String>,
        model: Option<String>,
        no_log: bool,
        file: Option<FileConfig>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let (bridge_cmd, bridge_args) = match bridge {
            Some(raw) => split_bridge_command(&raw)?,
            None => (
                file.bridge
                    .command
                    .unwrap_or_else(|| DEFAULT_BRIDGE_COMMAND.to_string()),
                file.bridge.args,
            ),
        };

        if bridge_cmd.is_empty() {
            bail!("bridge command must not be empty");
        }

        Ok(Config {
            bridge_cmd,
            bridge_args,
            model: model.or(file.bridge.model),
            log_raw: !no_log,
            request_id: generate_request_id(),
        })
    }
}

/// Split a `--bridge "cmd args..."` override into program + args.
fn split_bridge_command(raw: &str) -> Result<(String, Vec<String>)> {
    let parts = shlex::split(raw).with_context(|| format!("invalid bridge command '{raw}'"))?;
    let mut parts = parts.into_iter();
    match parts.next() {
        Some(command) => Ok((command, parts.collect())),
        None => bail!("bridge command must not be empty"),
    }
}
