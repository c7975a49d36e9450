//! Runtime glue for TTCN test modules
//!
//! This crate hosts everything around the value types:
//! - `config`: TOML runtime configuration
//! - `logging`: `tracing` setup and value rendering
//! - `defaults`: registry of activated defaults
//! - `module`: module lifecycle, verdicts and the module registry
//! - `single`: the single-mode entry point

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod defaults;
pub mod logging;
pub mod module;
pub mod single;

pub use config::{ExecuteItem, LoggingConfig, RuntimeConfig};
pub use defaults::{DefaultEntry, DefaultRegistry};
pub use logging::{init_logging, ValueLogger};
pub use module::{
    register_module, registered_modules, ExecutionContext, Module, ModuleFactory, ModuleList,
    Testcase, TestcaseFn, TestcaseResult, Verdict,
};
pub use single::{run_single, RunSummary, SingleMain};
