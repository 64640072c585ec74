//! Configuration management for Vagas.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/vagas/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing site and pagination settings
    pub scraper: ScraperConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Spreadsheet output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    ///
    /// Supports the following environment variables:
    /// - `VAGAS_MAX_PAGES`: Override the number of listing pages to read
    /// - `VAGAS_HEADLESS`: Override browser headless mode (true/false)
    /// - `VAGAS_OUTPUT`: Override the spreadsheet path
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("VAGAS_MAX_PAGES") {
            if let Ok(pages) = val.parse() {
                self.scraper.max_pages = pages;
                tracing::debug!("Override scraper.max_pages from env: {}", pages);
            }
        }

        if let Some(val) = lookup("VAGAS_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("VAGAS_OUTPUT") {
            if !val.is_empty() {
                tracing::debug!("Override output.path from env: {}", val);
                self.output.path = PathBuf::from(val);
            }
        }
    }

    /// Check values that would make a scrape run meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scraper.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scraper.max_pages".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.scraper.start_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scraper.start_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(reason) = sheet_name_problem(&self.output.sheet_name) {
            return Err(ConfigError::InvalidValue {
                field: "output.sheet_name".to_string(),
                reason: reason.to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/vagas/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "vagas", "vagas").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Longest worksheet name a workbook accepts.
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Characters a worksheet name may not contain.
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Why `name` cannot be used as a worksheet name, if it cannot.
fn sheet_name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.chars().count() > MAX_SHEET_NAME_CHARS {
        Some("must be at most 31 characters")
    } else if name.contains(FORBIDDEN_SHEET_CHARS) {
        Some("must not contain any of [ ] : * ? / \\")
    } else if name.starts_with('\'') || name.ends_with('\'') {
        Some("must not start or end with an apostrophe")
    } else {
        None
    }
}

/// Listing site and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Search page that lists the openings
    pub start_url: String,
    /// Number of result pages to read
    pub max_pages: u32,
    /// Selector of the button that submits the initial search
    pub submit_selector: String,
    /// `name` attribute of the page-number input
    pub page_field_name: String,
    /// Selector of the button that confirms the page-number input
    pub page_button_selector: String,
    /// Maximum wait for the submit button, in seconds
    pub submit_timeout_secs: u64,
    /// Pause before reading each page so the table renders, in milliseconds
    pub page_settle_ms: u64,
    /// Pause after scrolling to the pagination controls, in milliseconds
    pub scroll_settle_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.apinfo.com/apinfo/inc/list4.cfm".to_string(),
            max_pages: 20,
            submit_selector: "input[type='submit']".to_string(),
            page_field_name: "pag".to_string(),
            page_button_selector: "input[value='OK']".to_string(),
            submit_timeout_secs: 10,
            page_settle_ms: 3000,
            scroll_settle_ms: 1000,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Minimum delay between navigations to the same host, in milliseconds
    pub min_navigation_delay_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            min_navigation_delay_ms: 1000,
        }
    }
}

/// Spreadsheet output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Workbook that accumulates listings across runs
    pub path: PathBuf,
    /// Name of the worksheet written to the workbook
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("vagas_apinfo.xlsx"),
            sheet_name: "Vagas".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scraper.max_pages, 20);
        assert_eq!(config.scraper.page_field_name, "pag");
        assert!(config.browser.headless);
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.output.path, PathBuf::from("vagas_apinfo.xlsx"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[scraper]"));
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[output]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.scraper.start_url, config.scraper.start_url);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.scraper.max_pages = 5;
        config.output.path = PathBuf::from("out.xlsx");

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.scraper.max_pages, 5);
        assert_eq!(loaded.output.path, PathBuf::from("out.xlsx"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VAGAS_MAX_PAGES", "3"),
            ("VAGAS_HEADLESS", "false"),
            ("VAGAS_OUTPUT", "/tmp/vagas.xlsx"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.scraper.max_pages, 3);
        assert!(!config.browser.headless);
        assert_eq!(config.output.path, PathBuf::from("/tmp/vagas.xlsx"));
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "VAGAS_MAX_PAGES" => Some("many".to_string()),
            "VAGAS_HEADLESS" => Some("maybe".to_string()),
            _ => None,
        });

        assert_eq!(config.scraper.max_pages, 20);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scraper]
max_pages = 2

[output]
path = "custom.xlsx"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.scraper.max_pages, 2);
        assert_eq!(config.output.path, PathBuf::from("custom.xlsx"));
        // These should be defaults
        assert_eq!(config.scraper.submit_timeout_secs, 10);
        assert_eq!(config.output.sheet_name, "Vagas");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_validate_rejects_zero_pages() {
        let mut config = AppConfig::default();
        config.scraper.max_pages = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scraper.max_pages"));
    }

    #[test]
    fn test_validate_rejects_empty_output() {
        let mut config = AppConfig::default();
        config.output.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_sheet_name() {
        let mut config = AppConfig::default();

        for name in [
            "Vagas coletadas no APInfo em 2024",
            "Vagas 2024/03",
            "[Vagas]",
            "Vagas?",
            "'Vagas'",
            "  ",
        ] {
            config.output.sheet_name = name.to_string();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { field, .. } if field == "output.sheet_name"),
                "{name:?} accepted: {err}"
            );
        }

        config.output.sheet_name = "Vagas de TI - São Paulo 2024".to_string();
        assert!(config.validate().is_ok());
    }
}
