//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Self {
            schema: parse_schema(content)?,
            path: None,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [".rideshare.toml", "rideshare.toml"]
        .into_iter()
        .map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("rideshare").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    parse_schema(&content).map_err(|e| e.with_context(format!("Config file: {}", path.display())))
}

fn parse_schema(content: &str) -> Result<ConfigSchema> {
    let schema: ConfigSchema = toml::from_str(content)?;
    schema
        .validate()
        .to_result_with(ErrorCode::ConfigValidationError)?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.default_sort, "distance");
        assert_eq!(config.schema.search.missing_coordinates, "origin");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[search]
default_sort = "price"
max_results = 20

[pool]
path = "/var/lib/rideshare/rides.json"
fetch_timeout_ms = 250

[telemetry]
log_level = "debug"
json = true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.path.as_deref(), Some(file.path()));
        assert_eq!(config.schema.search.default_sort, "price");
        assert_eq!(config.schema.search.max_results, Some(20));
        assert_eq!(config.schema.pool.fetch_timeout_ms, 250);
        assert!(config.schema.telemetry.json);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml_str("[search\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_validation_error() {
        let err = Config::from_toml_str("[search]\nmissing_coordinates = \"drop\"\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("search.missing_coordinates"));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config = Config::from_toml_str("[pool]\npath = \"rides.json\"\n").unwrap();
        assert_eq!(config.schema.pool.fetch_timeout_ms, 5000);
        assert_eq!(config.schema.telemetry.log_level, "warn");
    }
}
