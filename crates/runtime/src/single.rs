//! Single-mode entry point
//!
//! Single mode runs every testcase on one test component in the current
//! process. There is no main test component and no inter-component
//! messaging.

use crate::config::{ExecuteItem, RuntimeConfig};
use crate::logging::{init_logging, ValueLogger};
use crate::module::{registered_modules, ExecutionContext, ModuleList, TestcaseResult, Verdict};
use std::path::Path;
use tracing::{error, info, warn};
use ttcn_core::Result;

/// Outcome of a single-mode run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Results in execution order
    pub results: Vec<TestcaseResult>,
    /// Worst verdict over all results
    pub overall: Verdict,
}

impl RunSummary {
    fn from_results(results: Vec<TestcaseResult>) -> Self {
        let overall = results
            .iter()
            .fold(Verdict::None, |acc, r| acc.overwrite(r.verdict));
        RunSummary { results, overall }
    }

    /// Process exit status: 0 when nothing is worse than `pass`, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.overall.is_success() {
            0
        } else {
            1
        }
    }

    /// Count of results with the given verdict
    pub fn count(&self, verdict: Verdict) -> usize {
        self.results.iter().filter(|r| r.verdict == verdict).count()
    }
}

/// Single-mode driver
#[derive(Debug)]
pub struct SingleMain {
    config: RuntimeConfig,
    modules: ModuleList,
}

impl SingleMain {
    /// Create a driver over `modules`
    pub fn new(config: RuntimeConfig, modules: ModuleList) -> Self {
        SingleMain { config, modules }
    }

    /// Run the configured items
    ///
    /// Module initialization runs first; an initialization failure stops
    /// the run. Items that cannot be resolved are logged and recorded with
    /// the `error` verdict, and execution continues with the next item.
    ///
    /// # Errors
    ///
    /// Returns an error if the `execute` list is malformed or a module
    /// initialization hook fails. Modules are cleaned up in both cases.
    pub fn run(mut self) -> Result<RunSummary> {
        info!(target: "ttcn::single", modules = self.modules.len(), "TTCN runtime started in single mode");
        let mut ctx = ExecutionContext::new(ValueLogger::from_config(&self.config.logging));

        let outcome = self.run_items(&mut ctx);
        self.modules.cleanup_all();
        outcome?;

        let summary = RunSummary::from_results(ctx.take_results());
        info!(
            target: "ttcn::single",
            executed = summary.results.len(),
            overall = %summary.overall,
            "TTCN runtime finished"
        );
        Ok(summary)
    }

    fn run_items(&mut self, ctx: &mut ExecutionContext) -> Result<()> {
        let items = self.config.execute_items()?;
        self.modules.pre_init_all(ctx)?;
        self.modules.post_init_all(ctx)?;

        let items = if items.is_empty() {
            self.control_items()
        } else {
            items
        };
        if items.is_empty() {
            warn!(target: "ttcn::single", "Nothing to execute");
        }

        for item in &items {
            // Testcase bodies that fail are recorded by the context itself;
            // errors here are unresolved items or aborted control parts.
            if let Err(e) = self.modules.execute_item(item, ctx) {
                error!(target: "ttcn::single", item = %item, error = %e, "Execution failed");
                ctx.record(item.to_string(), Verdict::Error);
            }
        }
        Ok(())
    }

    fn control_items(&self) -> Vec<ExecuteItem> {
        self.modules
            .names()
            .into_iter()
            .filter(|name| self.modules.lookup(name).map_or(false, |m| m.has_control()))
            .map(|name| ExecuteItem::Control {
                module: name.to_string(),
            })
            .collect()
    }
}

/// Load `config_path`, install logging and run every registered module
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, logging cannot
/// be installed, or the run itself fails.
pub fn run_single(config_path: &Path) -> Result<RunSummary> {
    let config = RuntimeConfig::from_file(config_path)?;
    init_logging(&config.logging)?;
    let modules = registered_modules()?;
    SingleMain::new(config, modules).run()
}
