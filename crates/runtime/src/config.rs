//! Runtime configuration via a TOML file
//!
//! Single mode reads one configuration file at startup. Every field has a
//! default, so an empty file is valid and runs every control part.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use ttcn_core::{Error, Result, UNBOUND_MARKER};

/// Logging section (`[logging]`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` (default: "info")
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Token written for unbound values (default: "<unbound>")
    #[serde(default = "default_unbound_marker")]
    pub unbound_marker: String,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_unbound_marker() -> String {
    UNBOUND_MARKER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            unbound_marker: default_unbound_marker(),
        }
    }
}

/// Runtime configuration loaded from a TOML file
///
/// # Example
///
/// ```toml
/// execute = ["Demo", "Demo.tc_echo"]
///
/// [logging]
/// filter = "ttcn=debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Logging options
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Items to run, in order: `"Module"` or `"Module.testcase"`
    #[serde(default)]
    pub execute: Vec<String>,
}

impl RuntimeConfig {
    /// Returns a commented default configuration file
    pub fn default_toml() -> &'static str {
        r#"# TTCN runtime configuration
#
# Items to execute in order. "Module" runs the module's control part,
# "Module.testcase" runs a single testcase. Empty: run every control part.
execute = []

[logging]
# tracing filter directive; RUST_LOG takes precedence when set
filter = "info"
# token written in place of unbound values
unbound_marker = "<unbound>"
"#
    }

    /// Parse configuration text
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Invalid configuration: {}", e)))
    }

    /// Read and parse config from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse the `execute` list
    ///
    /// # Errors
    ///
    /// Returns a configuration error for the first malformed item.
    pub fn execute_items(&self) -> Result<Vec<ExecuteItem>> {
        self.execute.iter().map(|s| s.parse()).collect()
    }
}

/// One entry of the `execute` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteItem {
    /// Run a module's control part
    Control {
        /// Module name
        module: String,
    },
    /// Run a single testcase
    Testcase {
        /// Module name
        module: String,
        /// Testcase name
        testcase: String,
    },
}

impl FromStr for ExecuteItem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let is_ident = |part: &str| {
            !part.is_empty()
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !part.starts_with(|c: char| c.is_ascii_digit())
        };
        match s.split_once('.') {
            None if is_ident(s) => Ok(ExecuteItem::Control {
                module: s.to_string(),
            }),
            Some((module, testcase)) if is_ident(module) && is_ident(testcase) => {
                Ok(ExecuteItem::Testcase {
                    module: module.to_string(),
                    testcase: testcase.to_string(),
                })
            }
            _ => Err(Error::config(format!(
                "Invalid execute item '{}'. Expected \"Module\" or \"Module.testcase\".",
                s
            ))),
        }
    }
}

impl fmt::Display for ExecuteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteItem::Control { module } => write!(f, "{}", module),
            ExecuteItem::Testcase { module, testcase } => write!(f, "{}.{}", module, testcase),
        }
    }
}
