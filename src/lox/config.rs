//! Configuration loading for the lox front end.
//!
//! The defaults in `defaults/lox.default.toml` are compiled in, so a missing
//! or partial user file still yields a complete [`LoxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/lox.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoxConfig {
    pub repl: ReplConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplConfig {
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Processing format string, see [`ProcessingSpec::from_string`](crate::lox::processor::ProcessingSpec::from_string)
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Name of the per-project file picked up from the working directory
pub const PROJECT_FILE: &str = "lox.toml";

/// Builds a [`LoxConfig`] in layers: embedded defaults, then the project
/// file, then an explicit `--config` file, then `--format`. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// [`PROJECT_FILE`] inside `dir`, skipped when there is none
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(PROJECT_FILE), false)
    }

    /// A file the user named explicitly; building fails if it is missing
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// The `--format` flag, if given, replaces `output.format`
    pub fn with_cli_format(mut self, format: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(format) = format {
            self.builder = self.builder.set_override("output.format", format)?;
        }
        Ok(self)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        log::debug!("config layer {} (required: {})", path.display(), required);
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    pub fn build(self) -> Result<LoxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<LoxConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.repl.prompt, "> ");
        assert_eq!(config.output.format, "ast-sexpr");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn cli_format_overrides_files() {
        let config = Loader::new()
            .with_cli_format(Some("token-json"))
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "token-json");
        assert_eq!(config.repl.prompt, "> ");

        let config = Loader::new()
            .with_cli_format(None)
            .expect("no override")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "ast-sexpr");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[repl]\nprompt = \"lox> \"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.repl.prompt, "lox> ");
        assert_eq!(config.output.format, "ast-sexpr");
    }

    #[test]
    fn project_file_is_optional() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Loader::new()
            .with_project_dir(dir.path())
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn explicit_file_beats_project_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "[output]\nformat = \"token-yaml\"\n[logging]\nlevel = \"info\"\n",
        )
        .expect("write project file");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[output]\nformat = \"ast-json\"\n").expect("write file");

        let config = Loader::new()
            .with_project_dir(dir.path())
            .with_file(&explicit)
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "ast-json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new().with_file("does/not/exist.toml").build().is_err());
    }
}
