//! Layered configuration for shelf.
//!
//! Sources are merged with [`figment`], later layers overriding earlier ones:
//!
//! 1. Compiled-in defaults ([`Config::default`]).
//! 2. `config.toml` in the platform configuration directory, if present
//!    ([`Config::default_path`]).
//! 3. An explicitly requested file (`.toml`, `.yaml`/`.yml` or `.json`), which
//!    must exist.
//! 4. Environment variables prefixed with `SHELF_`, with `__` separating
//!    nested keys: `SHELF_RANKING__PHRASE_WEIGHT=5`.
//!
//! The merged result is validated before it is handed out.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use shelf_catalog::Ranking;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SHELF_";

/// Fully merged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query scoring weights and tie-breaking.
    pub ranking: Ranking,
    pub log: Logging,
    /// Book manifest to load when none is given on the command line.
    pub library: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Loads, merges and validates every configuration layer.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(explicit)?.extract().or_raise(|| ErrorKind::Malformed)?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Builds the layered [`Figment`] without extracting it.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = Self::default_path() {
            // Missing files are skipped by `Toml::file`.
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = Self::merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Location of the per-user configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_lowercase();
        Ok(match extension.as_str() {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            "json" => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(extension)),
        })
    }

    /// Rejects values the catalog cannot sensibly rank with.
    pub fn validate(&self) -> Result<()> {
        if self.ranking.word_weight == 0 {
            exn::bail!(ErrorKind::InvalidValue { field: "ranking.word_weight", reason: "must be greater than zero" });
        }
        if self.ranking.phrase_weight == 0 {
            exn::bail!(ErrorKind::InvalidValue { field: "ranking.phrase_weight", reason: "must be greater than zero" });
        }
        if self.ranking.phrase_weight < self.ranking.word_weight {
            exn::bail!(ErrorKind::InvalidValue {
                field: "ranking.phrase_weight",
                reason: "must not be lower than ranking.word_weight",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    /// Runs `test` in a jail with no `SHELF_*` variables and the per-user
    /// configuration directory pointed inside the jail.
    fn isolated(test: impl FnOnce(&mut Jail)) {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let home = jail.directory().to_path_buf();
            jail.set_env("HOME", home.display());
            jail.set_env("XDG_CONFIG_HOME", home.join(".config").display());
            test(jail);
            Ok(())
        });
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ranking, Ranking::default());
        assert_eq!(config.log.level, "info");
        assert!(config.library.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources() {
        isolated(|_| {
            assert_eq!(Config::load(None).unwrap(), Config::default());
        });
    }

    #[rstest]
    #[case("shelf.toml", "library = \"books.json\"\n[ranking]\nphrase_weight = 7\n[log]\nlevel = \"debug\"\n")]
    #[case("shelf.yaml", "library: books.json\nranking:\n  phrase_weight: 7\nlog:\n  level: debug\n")]
    #[case("shelf.json", r#"{"library": "books.json", "ranking": {"phrase_weight": 7}, "log": {"level": "debug"}}"#)]
    fn test_explicit_file_formats(#[case] name: &str, #[case] contents: &str) {
        isolated(|jail| {
            jail.create_file(name, contents).unwrap();
            let config = Config::load(Some(Path::new(name))).unwrap();
            assert_eq!(config.ranking.phrase_weight, 7);
            // Keys absent from the file keep their defaults.
            assert_eq!(config.ranking.word_weight, 1);
            assert!(config.ranking.popularity_tiebreak);
            assert_eq!(config.log.level, "debug");
            assert_eq!(config.library, Some(PathBuf::from("books.json")));
        });
    }

    #[test]
    fn test_user_file_is_overridden_by_explicit_file() {
        isolated(|jail| {
            let user = Config::default_path().unwrap();
            assert!(user.starts_with(jail.directory()));
            std::fs::create_dir_all(user.parent().unwrap()).unwrap();
            std::fs::write(&user, "library = \"user.json\"\n[ranking]\nphrase_weight = 5\n").unwrap();

            assert_eq!(Config::load(None).unwrap().ranking.phrase_weight, 5);

            jail.create_file("shelf.toml", "[ranking]\nphrase_weight = 8\n").unwrap();
            let config = Config::load(Some(Path::new("shelf.toml"))).unwrap();
            assert_eq!(config.ranking.phrase_weight, 8);
            assert_eq!(config.library, Some(PathBuf::from("user.json")));
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        isolated(|_| {
            let err = Config::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("missing.toml")));
            assert!(err.is_retryable());
        });
    }

    #[test]
    fn test_unsupported_format() {
        isolated(|jail| {
            jail.create_file("shelf.ini", "[ranking]\n").unwrap();
            let err = Config::load(Some(Path::new("shelf.ini"))).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFormat("ini".to_string()));
        });
    }

    #[test]
    fn test_malformed_file() {
        isolated(|jail| {
            jail.create_file("shelf.toml", "[ranking]\nphrase_weight = \"heavy\"\n").unwrap();
            let err = Config::load(Some(Path::new("shelf.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Malformed);
        });
    }

    #[rstest]
    #[case(3, 0, "ranking.word_weight")]
    #[case(0, 1, "ranking.phrase_weight")]
    #[case(1, 2, "ranking.phrase_weight")]
    fn test_validation(#[case] phrase_weight: u32, #[case] word_weight: u32, #[case] expected: &str) {
        let config = Config { ranking: Ranking { phrase_weight, word_weight, ..Ranking::default() }, ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(*err, ErrorKind::InvalidValue { field, .. } if field == expected));
    }

    #[test]
    fn test_environment_overrides_file() {
        isolated(|jail| {
            jail.create_file("shelf.toml", "[ranking]\nphrase_weight = 7\nword_weight = 2\n").unwrap();
            jail.set_env("SHELF_RANKING__PHRASE_WEIGHT", "9");
            jail.set_env("SHELF_LOG__LEVEL", "trace");
            let config = Config::load(Some(Path::new("shelf.toml"))).unwrap();
            assert_eq!(config.ranking.phrase_weight, 9);
            assert_eq!(config.ranking.word_weight, 2);
            assert_eq!(config.log.level, "trace");
        });
    }

    #[test]
    fn test_invalid_environment_value_is_rejected() {
        isolated(|jail| {
            jail.set_env("SHELF_RANKING__WORD_WEIGHT", "0");
            let err = Config::load(None).unwrap_err();
            assert!(matches!(*err, ErrorKind::InvalidValue { field: "ranking.word_weight", .. }));
        });
    }
}
