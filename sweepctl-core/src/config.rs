use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one exerciser run
///
/// Every field has a default matching the stock test setup (a local
/// TestEngine checkout driven from its `test/` directory), so a missing
/// config file is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Invocation prefix of the external CLI, e.g. `node ../bin/testengine.js`
    pub base_cli: String,
    /// License server `host:port` used by the `license install` variants
    pub license_server: String,
    /// Server host used by the diagnostics stage (`-H http://<host>`)
    pub server_host: String,
    /// Admin login config passed with `-c` when starting and listing jobs
    pub admin_config: String,
    /// Project that finishes quickly; its job feeds the `jobs` stage
    pub fast_project: String,
    /// Project that runs long enough to be cancelled
    pub slow_project: String,
    /// 1-based line of `jobs list` output that holds the newest job
    pub job_list_line: usize,
    /// Shell used to interpret each command line
    pub shell: String,
    /// Directory the external CLI runs in (defaults to the current one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            base_cli: "node ../bin/testengine.js".to_string(),
            license_server: "localhost:1194".to_string(),
            server_host: "localhost:8080".to_string(),
            admin_config: "admin.config".to_string(),
            fast_project: "successful.xml".to_string(),
            slow_project: "slow.xml".to_string(),
            job_list_line: 3,
            shell: default_shell().to_string(),
            working_dir: None,
        }
    }
}

#[cfg(unix)]
fn default_shell() -> &'static str {
    "sh"
}

#[cfg(not(unix))]
fn default_shell() -> &'static str {
    "cmd"
}

impl SweepConfig {
    /// Load config from an explicit path, or from ~/.sweepctl/config.toml
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(SweepError::config_not_found(path));
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Get config file path: ~/.sweepctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sweepctl/config.toml")
    }

    /// Parse a TOML document into a config (no validation)
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|source| SweepError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        config.expand_variables();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&content, path)
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        base_cli: Option<String>,
        license_server: Option<String>,
    ) -> Result<Self> {
        if let Some(base_cli) = base_cli {
            self.base_cli = base_cli;
        }
        if let Some(license_server) = license_server {
            self.license_server = license_server;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values that would make every invocation meaningless
    pub fn validate(&self) -> Result<()> {
        if self.base_cli.trim().is_empty() {
            return Err(SweepError::config("base_cli must not be empty"));
        }
        if self.shell.trim().is_empty() {
            return Err(SweepError::config("shell must not be empty"));
        }
        if self.job_list_line == 0 {
            return Err(SweepError::config(
                "job_list_line is 1-based and must be at least 1",
            ));
        }
        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(SweepError::config(format!(
                    "working_dir {:?} does not exist or is not a directory",
                    dir
                )));
            }
        }
        Ok(())
    }

    /// Expand ${var} references in working_dir
    fn expand_variables(&mut self) {
        let mut vars = HashMap::new();
        vars.insert("HOME".to_string(), env::var("HOME").unwrap_or_default());

        if let Some(ref dir) = self.working_dir {
            let expanded = Self::expand_string(&dir.display().to_string(), &vars);
            self.working_dir = Some(PathBuf::from(expanded));
        }
    }

    /// Expand ${var} references in a string
    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SweepError::config(e.to_string()))
    }

    /// Save config to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_stock_setup() {
        let config = SweepConfig::default();
        assert_eq!(config.base_cli, "node ../bin/testengine.js");
        assert_eq!(config.license_server, "localhost:1194");
        assert_eq!(config.job_list_line, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SweepConfig::from_toml_str(
            "base_cli = \"./testengine\"\nslow_project = \"long.xml\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();

        assert_eq!(config.base_cli, "./testengine");
        assert_eq!(config.slow_project, "long.xml");
        assert_eq!(config.fast_project, "successful.xml");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SweepConfig::from_toml_str("retries = 3\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, SweepError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let err = SweepConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, SweepError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "job_list_line = 0\n").unwrap();

        let err = SweepConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("job_list_line"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = SweepConfig::default();
        config.license_server = "licenses.internal:1194".to_string();
        config.save_to(&path).unwrap();

        let loaded = SweepConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides_win_and_validate() {
        let config = SweepConfig::default()
            .with_overrides(Some("echo".to_string()), None)
            .unwrap();
        assert_eq!(config.base_cli, "echo");
        assert_eq!(config.license_server, "localhost:1194");

        assert!(SweepConfig::default()
            .with_overrides(Some("  ".to_string()), None)
            .is_err());
    }

    #[test]
    fn test_working_dir_must_be_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "working_dir = \"/nonexistent/dir\"\n").unwrap();
        let err = SweepConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, SweepError::Config { .. }));
        assert!(err.to_string().contains("working_dir"));
        assert!(err.to_string().contains("/nonexistent/dir"));

        let file = temp_dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();
        let config = SweepConfig {
            working_dir: Some(file),
            ..SweepConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SweepConfig {
            working_dir: Some(temp_dir.path().to_path_buf()),
            ..SweepConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_working_dir_expands_home() {
        let home = env::var("HOME").unwrap_or_default();
        let config = SweepConfig::from_toml_str(
            "working_dir = \"${HOME}/testengine/test\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();

        assert_eq!(
            config.working_dir,
            Some(PathBuf::from(format!("{}/testengine/test", home)))
        );
    }
}
