//! Module lifecycle
//!
//! Every compiled test module plugs into the runtime through the [`Module`]
//! trait. The runtime calls the hooks in a fixed order:
//!
//! 1. `pre_init` on every module, in registration order
//! 2. `post_init` on every module, in registration order
//! 3. control parts and testcases, as configured
//! 4. `cleanup` on every module
//!
//! Each initialization hook runs at most once per module list.

use crate::config::ExecuteItem;
use crate::defaults::DefaultRegistry;
use crate::logging::ValueLogger;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, error, info};
use ttcn_core::{Error, Result};

// ============================================================================
// Verdicts
// ============================================================================

/// Testcase verdict, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verdict {
    /// No verdict set
    #[default]
    None,
    /// Passed
    Pass,
    /// Inconclusive
    Inconc,
    /// Failed
    Fail,
    /// Runtime error
    Error,
}

impl Verdict {
    /// Combine with `other`; the worse verdict wins
    pub fn overwrite(self, other: Verdict) -> Verdict {
        self.max(other)
    }

    /// Check if the verdict is no worse than `pass`
    pub fn is_success(self) -> bool {
        self <= Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::None => "none",
            Verdict::Pass => "pass",
            Verdict::Inconc => "inconc",
            Verdict::Fail => "fail",
            Verdict::Error => "error",
        })
    }
}

/// Outcome of one executed testcase or control part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestcaseResult {
    /// Qualified name, `Module.testcase`
    pub name: String,
    /// Final verdict
    pub verdict: Verdict,
}

// ============================================================================
// Execution context
// ============================================================================

/// Body of a testcase
pub type TestcaseFn = fn(&mut ExecutionContext) -> Result<()>;

/// A testcase exported by a module
#[derive(Debug, Clone, Copy)]
pub struct Testcase {
    /// Testcase name, unqualified
    pub name: &'static str,
    /// Body to run
    pub body: TestcaseFn,
}

/// State of the single test component running in single mode
#[derive(Debug, Default)]
pub struct ExecutionContext {
    defaults: DefaultRegistry,
    verdict: Verdict,
    logger: ValueLogger,
    results: Vec<TestcaseResult>,
}

impl ExecutionContext {
    /// Create a context that renders values with `logger`
    pub fn new(logger: ValueLogger) -> Self {
        ExecutionContext {
            logger,
            ..Self::default()
        }
    }

    /// Activated defaults
    pub fn defaults(&self) -> &DefaultRegistry {
        &self.defaults
    }

    /// Activated defaults, for activation and deactivation
    pub fn defaults_mut(&mut self) -> &mut DefaultRegistry {
        &mut self.defaults
    }

    /// Value logger
    pub fn logger(&self) -> &ValueLogger {
        &self.logger
    }

    /// Verdict of the running testcase
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Update the verdict; a better verdict never replaces a worse one
    pub fn set_verdict(&mut self, verdict: Verdict) {
        let combined = self.verdict.overwrite(verdict);
        debug!(target: "ttcn::verdict", requested = %verdict, current = %combined, "setverdict");
        self.verdict = combined;
    }

    /// Run a testcase and record its result
    ///
    /// The verdict starts at `none`. A body returning an error gets the
    /// `error` verdict. All defaults are deactivated afterwards.
    pub fn execute(&mut self, module: &str, testcase: &Testcase) -> Verdict {
        let name = format!("{}.{}", module, testcase.name);
        info!(target: "ttcn::testcase", testcase = %name, "Test case started");
        self.verdict = Verdict::None;
        if let Err(e) = (testcase.body)(self) {
            error!(target: "ttcn::testcase", testcase = %name, error = %e, "Test case aborted");
            self.verdict = Verdict::Error;
        }
        self.defaults.deactivate_all();
        let verdict = self.verdict;
        info!(target: "ttcn::testcase", testcase = %name, %verdict, "Test case finished");
        self.results.push(TestcaseResult { name, verdict });
        verdict
    }

    /// Record an outcome that did not come from `execute`
    pub fn record(&mut self, name: impl Into<String>, verdict: Verdict) {
        self.results.push(TestcaseResult {
            name: name.into(),
            verdict,
        });
    }

    /// Results recorded so far
    pub fn results(&self) -> &[TestcaseResult] {
        &self.results
    }

    /// Take the recorded results, leaving none behind
    pub fn take_results(&mut self) -> Vec<TestcaseResult> {
        std::mem::take(&mut self.results)
    }
}

// ============================================================================
// Module trait
// ============================================================================

/// A compiled test module
///
/// Only `name` is required; every hook defaults to doing nothing.
pub trait Module: Send {
    /// Module name as used in `execute` items
    fn name(&self) -> &str;

    /// First initialization phase
    fn pre_init(&mut self, _ctx: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Second initialization phase, after every module's `pre_init`
    fn post_init(&mut self, _ctx: &mut ExecutionContext) -> Result<()> {
        Ok(())
    }

    /// Check if the module has a control part
    fn has_control(&self) -> bool {
        false
    }

    /// Run the control part
    fn control(&mut self, _ctx: &mut ExecutionContext) -> Result<()> {
        Err(Error::module(format!(
            "Module {} does not have control part.",
            self.name()
        )))
    }

    /// Testcases exported by the module
    fn testcases(&self) -> Vec<Testcase> {
        Vec::new()
    }

    /// Release resources at shutdown
    fn cleanup(&mut self) {}
}

struct ModuleEntry {
    module: Box<dyn Module>,
    pre_init_done: bool,
    post_init_done: bool,
}

/// Ordered set of modules, unique by name
#[derive(Default)]
pub struct ModuleList {
    entries: Vec<ModuleEntry>,
}

impl fmt::Debug for ModuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ModuleList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module
    ///
    /// # Errors
    ///
    /// Returns a module error if a module with the same name exists.
    pub fn add(&mut self, module: Box<dyn Module>) -> Result<()> {
        if self.lookup(module.name()).is_some() {
            return Err(Error::module(format!(
                "Module {} is registered more than once.",
                module.name()
            )));
        }
        self.entries.push(ModuleEntry {
            module,
            pre_init_done: false,
            post_init_done: false,
        });
        Ok(())
    }

    /// Module names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.module.name()).collect()
    }

    /// Find a module by name
    pub fn lookup(&self, name: &str) -> Option<&dyn Module> {
        self.entries
            .iter()
            .find(|e| e.module.name() == name)
            .map(|e| e.module.as_ref())
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut (dyn Module + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.module.name() == name)
            .map(|e| e.module.as_mut())
            .ok_or_else(|| Error::module(format!("Module {} does not exist.", name)))
    }

    /// Run `pre_init` on every module not yet pre-initialized
    ///
    /// # Errors
    ///
    /// Stops at and returns the first hook failure.
    pub fn pre_init_all(&mut self, ctx: &mut ExecutionContext) -> Result<()> {
        for entry in self.entries.iter_mut().filter(|e| !e.pre_init_done) {
            debug!(target: "ttcn::module", module = entry.module.name(), "pre_init");
            entry.pre_init_done = true;
            entry.module.pre_init(ctx)?;
        }
        Ok(())
    }

    /// Run `post_init` on every module not yet post-initialized
    ///
    /// # Errors
    ///
    /// Stops at and returns the first hook failure.
    pub fn post_init_all(&mut self, ctx: &mut ExecutionContext) -> Result<()> {
        for entry in self.entries.iter_mut().filter(|e| !e.post_init_done) {
            debug!(target: "ttcn::module", module = entry.module.name(), "post_init");
            entry.post_init_done = true;
            entry.module.post_init(ctx)?;
        }
        Ok(())
    }

    /// Run `cleanup` on every module, in reverse order
    pub fn cleanup_all(&mut self) {
        for entry in self.entries.iter_mut().rev() {
            entry.module.cleanup();
        }
    }

    /// Run a module's control part
    ///
    /// # Errors
    ///
    /// Returns a module error if the module is unknown or has no control
    /// part, or whatever the control part returns.
    pub fn execute_control(&mut self, module: &str, ctx: &mut ExecutionContext) -> Result<()> {
        let m = self.lookup_mut(module)?;
        if !m.has_control() {
            return Err(Error::module(format!(
                "Module {} does not have control part.",
                module
            )));
        }
        info!(target: "ttcn::module", module, "Execution of control part started");
        let result = m.control(ctx);
        info!(target: "ttcn::module", module, "Execution of control part finished");
        result
    }

    /// Run one testcase of a module
    ///
    /// # Errors
    ///
    /// Returns a module error if the module or testcase is unknown.
    pub fn execute_testcase(
        &mut self,
        module: &str,
        testcase: &str,
        ctx: &mut ExecutionContext,
    ) -> Result<Verdict> {
        let m = self.lookup_mut(module)?;
        let tc = m
            .testcases()
            .into_iter()
            .find(|tc| tc.name == testcase)
            .ok_or_else(|| {
                Error::module(format!(
                    "Test case {} does not exist in module {}.",
                    testcase, module
                ))
            })?;
        Ok(ctx.execute(module, &tc))
    }

    /// Run one configured item
    ///
    /// # Errors
    ///
    /// See [`execute_control`](Self::execute_control) and
    /// [`execute_testcase`](Self::execute_testcase).
    pub fn execute_item(&mut self, item: &ExecuteItem, ctx: &mut ExecutionContext) -> Result<()> {
        match item {
            ExecuteItem::Control { module } => self.execute_control(module, ctx),
            ExecuteItem::Testcase { module, testcase } => {
                self.execute_testcase(module, testcase, ctx).map(|_| ())
            }
        }
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no module is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Process-wide registry
// ============================================================================

/// Constructor of a module instance
pub type ModuleFactory = fn() -> Box<dyn Module>;

/// Factories of every module linked into the executable
///
/// Uses parking_lot::Mutex so a panicking registration cannot poison it.
static REGISTERED_MODULES: Lazy<Mutex<Vec<ModuleFactory>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Register a module factory with the process-wide registry
pub fn register_module(factory: ModuleFactory) {
    REGISTERED_MODULES.lock().push(factory);
}

/// Instantiate every registered module, in registration order
///
/// # Errors
///
/// Returns a module error if two factories produce the same module name.
pub fn registered_modules() -> Result<ModuleList> {
    let factories = REGISTERED_MODULES.lock().clone();
    let mut list = ModuleList::new();
    for factory in factories {
        list.add(factory())?;
    }
    Ok(list)
}
