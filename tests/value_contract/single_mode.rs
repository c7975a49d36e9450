//! Single-mode execution of registered modules

use std::io::Write;
use ttcn::{
    register_module, run_single, BaseValue, ExecutionContext, Integer, Module, ModuleList,
    Result, RuntimeConfig, SingleMain, Testcase, Verdict,
};

fn tc_defaults_cleared(ctx: &mut ExecutionContext) -> Result<()> {
    assert!(ctx.defaults().is_empty());
    ctx.defaults_mut().activate("as_guard");
    ctx.set_verdict(Verdict::Pass);
    Ok(())
}

fn tc_unbound_read(ctx: &mut ExecutionContext) -> Result<()> {
    ctx.set_verdict(Verdict::Pass);
    let value = Integer::default();
    ctx.logger().log_value("value", &value);
    value.get()?;
    Ok(())
}

struct Codec;

impl Module for Codec {
    fn name(&self) -> &str {
        "Codec"
    }

    fn has_control(&self) -> bool {
        true
    }

    fn control(&mut self, ctx: &mut ExecutionContext) -> Result<()> {
        for tc in self.testcases() {
            ctx.execute(self.name(), &tc);
        }
        Ok(())
    }

    fn testcases(&self) -> Vec<Testcase> {
        vec![
            Testcase { name: "tc_defaults_cleared", body: tc_defaults_cleared },
            Testcase { name: "tc_unbound_read", body: tc_unbound_read },
        ]
    }
}

fn config(execute: &[&str]) -> RuntimeConfig {
    RuntimeConfig {
        execute: execute.iter().map(|s| s.to_string()).collect(),
        ..RuntimeConfig::default()
    }
}

#[test]
fn control_part_runs_every_testcase() {
    let mut modules = ModuleList::new();
    modules.add(Box::new(Codec)).unwrap();
    let summary = SingleMain::new(config(&[]), modules).run().unwrap();

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.count(Verdict::Pass), 1);
    assert_eq!(summary.count(Verdict::Error), 1);
    assert_eq!(summary.overall, Verdict::Error);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn defaults_do_not_leak_between_testcases() {
    let mut modules = ModuleList::new();
    modules.add(Box::new(Codec)).unwrap();
    let summary = SingleMain::new(
        config(&["Codec.tc_defaults_cleared", "Codec.tc_defaults_cleared"]),
        modules,
    )
    .run()
    .unwrap();
    assert_eq!(summary.overall, Verdict::Pass);
    assert_eq!(summary.exit_code(), 0);
}

struct FromRegistry;

impl Module for FromRegistry {
    fn name(&self) -> &str {
        "FromRegistry"
    }

    fn testcases(&self) -> Vec<Testcase> {
        vec![Testcase { name: "tc_ok", body: tc_defaults_cleared }]
    }
}

fn make_from_registry() -> Box<dyn Module> {
    Box::new(FromRegistry)
}

#[test]
fn run_single_uses_config_file_and_registry() {
    register_module(make_from_registry);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "execute = [\"FromRegistry.tc_ok\"]").unwrap();
    writeln!(file, "[logging]\nfilter = \"warn\"").unwrap();

    let summary = run_single(file.path()).unwrap();
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].name, "FromRegistry.tc_ok");
    assert_eq!(summary.exit_code(), 0);
}
