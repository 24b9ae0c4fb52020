//! Command-line configuration.
use std::path::PathBuf;

use clap::Parser;

/// Browse, search and sort a remote user directory in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "user-directory", version, about)]
pub struct Config {
    /// Start with the dark palette.
    #[arg(long)]
    pub dark: bool,

    /// Log filter directive, e.g. `info` or `user_directory=debug`.
    #[arg(long, env = "USER_DIRECTORY_LOG", default_value = "info")]
    pub log_level: String,

    /// Log file; the terminal itself is taken by the UI.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Keybinding overrides (`Action = Key` per line).
    #[arg(long)]
    pub keybinds: Option<PathBuf>,
}

impl Config {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("user-directory.log"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark: false,
            log_level: "info".to_string(),
            log_file: None,
            keybinds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cfg = Config::try_parse_from(["user-directory"]).unwrap();
        assert!(!cfg.dark);
        assert!(cfg.keybinds.is_none());
        assert!(cfg.log_path().ends_with("user-directory.log"));
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "user-directory",
            "--dark",
            "--log-file",
            "/tmp/ud.log",
        ])
        .unwrap();
        assert!(cfg.dark);
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/ud.log"));
    }

    #[test]
    fn endpoint_cannot_be_overridden() {
        let res = Config::try_parse_from(["user-directory", "--endpoint", "http://127.0.0.1:9"]);
        assert!(res.is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
