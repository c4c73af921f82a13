mod schema;

pub use schema::{Config, DEFAULT_LIMIT};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory")
}

/// Get the config directory path (~/.config/kart-ranker/)
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".config").join("kart-ranker"))
}

/// Get the default config file path (~/.config/kart-ranker/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Get the default catalog database path (~/.local/share/kart-ranker/catalog.db)
pub fn get_database_path() -> Result<PathBuf> {
    Ok(home_dir()?
        .join(".local")
        .join("share")
        .join("kart-ranker")
        .join("catalog.db"))
}

/// Ensure the parent directory of a file exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// With no explicit path a missing ~/.config/kart-ranker/config.yaml yields
/// the defaults. An explicit path must exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed or has unknown keys
/// - A preset holds an invalid directive
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    if let Err(errors) = crate::query::validate_presets(&config.presets) {
        anyhow::bail!(
            "Invalid presets in {}:\n  - {}",
            config_path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(config)
}

/// Resolve the catalog path: command line, then config, then the default.
pub fn resolve_database(cli: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match cli.or_else(|| config.database.clone()) {
        Some(path) => Ok(path),
        None => get_database_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Algorithm;
    use std::env;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let path = write_temp(
            "kart_ranker_test_full_config.yaml",
            r#"
database: /tmp/karts.db
algorithm: medrank
limit: 3
seed: 42
max_iterations: 20
presets:
  speedy:
    - weight_ground_speed=1
    - sort_score=-1
"#,
        );

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/karts.db")));
        assert_eq!(config.algorithm, Algorithm::Medrank);
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.preset("speedy").unwrap().len(), 2);
        assert!(config.preset("missing").is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let path = write_temp("kart_ranker_test_empty_config.yaml", "{}\n");
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limit, Some(DEFAULT_LIMIT));
        assert_eq!(config.algorithm, Algorithm::TopK);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_null_limit_is_unbounded() {
        let path = write_temp("kart_ranker_test_null_limit.yaml", "limit: null\n");
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.limit, None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let path = write_temp("kart_ranker_test_unknown_key.yaml", "queries: []\n");
        assert!(load_config(Some(path.clone())).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_preset_rejected() {
        let path = write_temp(
            "kart_ranker_test_bad_preset.yaml",
            "presets:\n  broken:\n    - weight_top_speed=1\n",
        );
        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("presets.broken[0]"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = env::temp_dir().join("kart_ranker_test_does_not_exist.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = Config {
            database: Some(PathBuf::from("from-config.db")),
            ..Config::default()
        };
        assert_eq!(
            resolve_database(Some(PathBuf::from("cli.db")), &config).unwrap(),
            PathBuf::from("cli.db")
        );
        assert_eq!(
            resolve_database(None, &config).unwrap(),
            PathBuf::from("from-config.db")
        );
        assert!(resolve_database(None, &Config::default())
            .unwrap()
            .ends_with("kart-ranker/catalog.db"));
    }
}
