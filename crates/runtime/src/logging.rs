//! Logging setup and value rendering
//!
//! Runtime events go through `tracing`. Values are rendered into text with
//! their `log` implementation and emitted as a single event, so value types
//! never depend on the subscriber.

use crate::config::LoggingConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ttcn_core::{BaseValue, Error, MarkerSink, Result, UNBOUND_MARKER};

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `config.filter`. Installing twice is
/// harmless: the first subscriber stays in place.
///
/// # Errors
///
/// Returns a configuration error if the filter directive is invalid.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            Error::config(format!("Invalid log filter '{}': {}", config.filter, e))
        })?,
    };
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        debug!(target: "ttcn::log", "Subscriber already installed, keeping it");
    }
    Ok(())
}

/// Renders values and emits them as log events
#[derive(Debug, Clone)]
pub struct ValueLogger {
    unbound_marker: String,
}

impl Default for ValueLogger {
    fn default() -> Self {
        Self::new(UNBOUND_MARKER)
    }
}

impl ValueLogger {
    /// Create a logger rendering unbound values as `unbound_marker`
    pub fn new(unbound_marker: impl Into<String>) -> Self {
        ValueLogger {
            unbound_marker: unbound_marker.into(),
        }
    }

    /// Create a logger from the `[logging]` section
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.unbound_marker.clone())
    }

    /// Render a value to text
    pub fn render<T: BaseValue>(&self, value: &T) -> String {
        let mut out = String::new();
        value.log(&mut MarkerSink::new(&mut out, &self.unbound_marker));
        out
    }

    /// Render a value and emit it as an `info` event, returning the text
    pub fn log_value<T: BaseValue>(&self, label: &str, value: &T) -> String {
        let text = self.render(value);
        info!(target: "ttcn::value", label, value = %text);
        text
    }
}
