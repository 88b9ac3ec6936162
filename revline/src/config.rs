//! Configuration loading for revline.
//!
//! Settings live in `$XDG_CONFIG_HOME/revline/config.toml` (falling back to
//! `~/.config/revline/config.toml`). Config errors are always soft: a
//! missing or unparseable file yields defaults with a note on stderr, never
//! a startup failure. Loading happens before terminal init, so stderr is
//! still a plain terminal at that point.
//!
//! ```toml
//! theme = "catppuccin-mocha"
//!
//! [reviewer]
//! command = "my-reviewer --json=false"
//! prompt = "Focus on error handling."
//! ```
//!
//! The reviewer command is run via `sh -c`; the selected file's content
//! arrives on its stdin, `REVLINE_FILE` carries the path and
//! `REVLINE_PROMPT` the instruction, and stdout is taken as the review.

use std::path::PathBuf;

use serde::Deserialize;

use crate::review::DEFAULT_PROMPT;

/// Top-level configuration, deserialized from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name resolved via `Theme::from_name`.
    pub theme: String,
    /// External reviewer settings.
    pub reviewer: ReviewerConfig,
}

/// Settings for the external reviewer subprocess.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewerConfig {
    /// Shell command producing review text on stdout. `None` disables the
    /// `r` keybinding with an in-UI note.
    pub command: Option<String>,
    /// Instruction passed to the command via `REVLINE_PROMPT`.
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            reviewer: ReviewerConfig::default(),
        }
    }
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self {
            command: None,
            prompt: DEFAULT_PROMPT.to_owned(),
        }
    }
}

/// Returns the path to the revline config file.
///
/// Prefers `$XDG_CONFIG_HOME/revline/config.toml`; falls back to
/// `~/.config/revline/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("revline").join("config.toml")
}

/// Loads the configuration, degrading to defaults on any failure.
///
/// A missing file is silent; a parse error is noted on stderr so a config
/// typo never prevents startup.
pub fn load() -> Config {
    load_from(&config_path())
}

fn load_from(path: &std::path::Path) -> Config {
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("revline: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let config: Config = toml::from_str(
            "theme = \"dark\"\n[reviewer]\ncommand = \"rev\"\nprompt = \"short\"\n",
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.reviewer.command.as_deref(), Some("rev"));
        assert_eq!(config.reviewer.prompt, "short");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("theme = \"dark\"\n").unwrap();
        assert!(config.reviewer.command.is_none());
        assert_eq!(config.reviewer.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn empty_config_is_the_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();

        let config = load_from(&path);
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn missing_file_is_silent_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = load_from(&dir.path().join("nope.toml"));
        assert!(config.reviewer.command.is_none());
    }
}
