//! Configuration discovery and effective settings resolution.
//!
//! odflog reads `odflog.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `log`: `/odf-errors.log`
//! - `root`: `/github/workspace/`
//! - `strip_root`: false (root prefix left in annotation paths)
//! - `escape`: false (messages emitted verbatim)
//! - `output`: `github`
//! - `extension`: `.ods`
//! - `fail_on_error`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::classify::DEFAULT_EXTENSION;
use crate::emit::DEFAULT_ROOT_PREFIX;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Log location used by the validator container.
pub const DEFAULT_LOG: &str = "/odf-errors.log";

const CONFIG_NAMES: [&str; 3] = ["odflog.toml", "odflog.yaml", "odflog.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `odflog.toml|yaml`.
pub struct OdflogConfig {
    pub log: Option<String>,
    pub root: Option<String>,
    pub strip_root: Option<bool>,
    pub escape: Option<bool>,
    pub output: Option<String>,
    pub extension: Option<String>,
    pub fail_on_error: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Whether a config file was found and parsed.
pub enum ConfigStatus {
    Missing,
    Loaded(PathBuf),
    /// Present but unreadable or malformed; defaults were used.
    Invalid(PathBuf),
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub log: PathBuf,
    pub root: String,
    pub strip_root: bool,
    pub escape: bool,
    pub output: String,
    pub extension: String,
    pub fail_on_error: bool,
    pub config: ConfigStatus,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `odflog.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// First config file present under `root`, if any.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.exists())
}

/// Parse a config file; TOML by extension, YAML otherwise.
pub fn parse_config(path: &Path) -> Option<OdflogConfig> {
    let s = fs::read_to_string(path).ok()?;
    if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&s).ok()
    } else {
        serde_yaml::from_str(&s).ok()
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_log: Option<&str>,
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_strip_root: Option<bool>,
    cli_escape: Option<bool>,
    cli_fail_on_error: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (cfg, config) = match config_path(&repo_root) {
        None => (OdflogConfig::default(), ConfigStatus::Missing),
        Some(p) => match parse_config(&p) {
            Some(cfg) => (cfg, ConfigStatus::Loaded(p)),
            None => (OdflogConfig::default(), ConfigStatus::Invalid(p)),
        },
    };

    // Relative log paths from config are anchored at the repo root; CLI paths
    // stay relative to the working directory.
    let log = match (cli_log, cfg.log) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => repo_root.join(p),
        (None, None) => PathBuf::from(DEFAULT_LOG),
    };
    let root = cli_root
        .map(|s| s.to_string())
        .or(cfg.root)
        .unwrap_or_else(|| DEFAULT_ROOT_PREFIX.to_string());
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "github".to_string());
    let extension = cfg
        .extension
        .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    Effective {
        repo_root,
        log,
        root,
        strip_root: cli_strip_root.or(cfg.strip_root).unwrap_or(false),
        escape: cli_escape.or(cfg.escape).unwrap_or(false),
        output,
        extension,
        fail_on_error: cli_fail_on_error.or(cfg.fail_on_error).unwrap_or(false),
        config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None, None, None, None);
        assert_eq!(eff.log, PathBuf::from(DEFAULT_LOG));
        assert_eq!(eff.root, DEFAULT_ROOT_PREFIX);
        assert_eq!(eff.output, "github");
        assert_eq!(eff.extension, ".ods");
        assert!(!eff.strip_root);
        assert!(!eff.escape);
        assert!(!eff.fail_on_error);
        assert_eq!(eff.config, ConfigStatus::Missing);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("odflog.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
log = "build/odf-errors.log"
root = "/work/"
strip_root = true
output = "human"
extension = "odt"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.log, root.join("build/odf-errors.log"));
        assert_eq!(eff.root, "/work/");
        assert!(eff.strip_root);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.extension, ".odt");
        assert_eq!(eff.config, ConfigStatus::Loaded(root.join("odflog.toml")));
    }

    #[test]
    fn test_load_yaml_from_nested_start() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("odflog.yml"), "escape: true\nfail_on_error: true\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let eff = resolve_effective(nested.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.repo_root, root.to_path_buf());
        assert!(eff.escape);
        assert!(eff.fail_on_error);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("odflog.toml"),
            "log = \"cfg.log\"\noutput = \"json\"\nescape = true\n",
        )
        .unwrap();
        let eff = resolve_effective(
            root.to_str(),
            Some("/tmp/cli.log"),
            Some("/ci/"),
            Some("github"),
            None,
            Some(false),
            None,
        );
        assert_eq!(eff.log, PathBuf::from("/tmp/cli.log"));
        assert_eq!(eff.root, "/ci/");
        assert_eq!(eff.output, "github");
        assert!(!eff.escape);
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("odflog.toml"), "output = [not valid").unwrap();
        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.config, ConfigStatus::Invalid(root.join("odflog.toml")));
        assert_eq!(eff.output, "github");
    }
}
