//! Driver configuration: CLI flags layered over an optional `tacc.toml`
//! project file layered over built-in defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::Result;

/// Which fixture family a run exercises — selects the `<root>/<target>/*.in`
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Lexer,
    Parser,
}

impl Target {
    pub fn as_dir(&self) -> &'static str {
        match self {
            Target::Lexer => "lexer",
            Target::Parser => "parser",
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::Parser
    }
}

/// Command-line surface, built with `clap`'s derive API.
#[derive(Parser, Debug)]
#[command(name = "tacc-drv")]
#[command(about = "Runs the tacc lexer/parser over a directory of fixture files")]
pub struct CliArgs {
    /// Which phase's fixtures to run.
    #[arg(short, long, env = "TACC_TARGET")]
    pub target: Option<Target>,

    /// Use `tests/benchmark/` instead of `tests/` as the fixture root.
    #[arg(short, long, env = "TACC_BENCHMARK")]
    pub benchmark: bool,

    /// Suppress writing `.result` files; still emits to stdout.
    #[arg(short, long, env = "TACC_SILENT")]
    pub silent: bool,

    /// Restrict to a comma-separated allow-list of file stems.
    #[arg(short = 'f', long, value_delimiter = ',')]
    pub files: Option<Vec<String>>,

    /// Path to a `tacc.toml` overriding built-in defaults.
    #[arg(short, long, env = "TACC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// The subset of [`Config`] a `tacc.toml` project file may set.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaccFileConfig {
    pub root: Option<PathBuf>,
    pub target: Option<Target>,
}

impl TaccFileConfig {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: TaccFileConfig = toml::from_str(&text)?;
        Ok(config)
    }
}

/// Resolved configuration for one driver run: CLI flags win over file
/// config, file config wins over these built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub benchmark: bool,
    pub silent: bool,
    pub only: Option<Vec<String>>,
    pub root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::default(),
            benchmark: false,
            silent: false,
            only: None,
            root: PathBuf::from("tests"),
        }
    }
}

impl Config {
    /// Layers `cli` over an optional file config (loaded from `cli.config`
    /// if given) over the defaults above.
    pub fn resolve(cli: CliArgs) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TaccFileConfig::load(path)?,
            None => TaccFileConfig::default(),
        };

        let mut config = Config::default();
        if let Some(root) = file.root {
            config.root = root;
        }
        if let Some(target) = file.target {
            config.target = target;
        }

        if let Some(target) = cli.target {
            config.target = target;
        }
        config.benchmark = cli.benchmark;
        config.silent = cli.silent;
        config.only = cli.files;

        if config.benchmark {
            config.root = config.root.join("benchmark");
        }

        Ok(config)
    }

    /// The directory this run reads `*.in` fixtures from:
    /// `<root>/<target>/`.
    pub fn fixture_dir(&self) -> PathBuf {
        self.root.join(self.target.as_dir())
    }

    /// The directory this run writes `<name>.result` files to:
    /// `<root>/<target>/result/`.
    pub fn result_dir(&self) -> PathBuf {
        self.fixture_dir().join("result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_parser_fixtures_under_tests() {
        let config = Config::default();
        assert_eq!(config.target, Target::Parser);
        assert_eq!(config.fixture_dir(), PathBuf::from("tests/parser"));
    }

    #[test]
    fn benchmark_flag_redirects_root_under_benchmark() {
        let cli = CliArgs {
            target: None,
            benchmark: true,
            silent: false,
            files: None,
            config: None,
        };
        let config = Config::resolve(cli).unwrap();
        assert_eq!(config.root, PathBuf::from("tests/benchmark"));
    }

    #[test]
    fn cli_target_overrides_the_default() {
        let cli = CliArgs {
            target: Some(Target::Lexer),
            benchmark: false,
            silent: false,
            files: None,
            config: None,
        };
        let config = Config::resolve(cli).unwrap();
        assert_eq!(config.target, Target::Lexer);
        assert_eq!(config.fixture_dir(), PathBuf::from("tests/lexer"));
    }

    #[test]
    fn file_config_is_overridden_by_cli_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tacc.toml");
        std::fs::write(&path, "target = \"lexer\"\n").unwrap();

        let cli = CliArgs {
            target: Some(Target::Parser),
            benchmark: false,
            silent: false,
            files: None,
            config: Some(path),
        };
        let config = Config::resolve(cli).unwrap();
        assert_eq!(config.target, Target::Parser);
    }
}
