//! Subcommand handlers

use crate::commands::{CheckArgs, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;
use guion::{
    PageFixture, RunnerConfig, Scenario, ScenarioRunner, ScriptedDriver, TimeoutPolicy,
};
use std::path::Path;

fn load_scenario(path: &Path) -> CliResult<Scenario> {
    let yaml = std::fs::read_to_string(path)?;
    Scenario::from_yaml(&yaml)
        .map_err(guion::GuionError::from)
        .map_err(CliError::from)
}

/// Validate a scenario file without executing it.
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    let scenario = load_scenario(&args.scenario)?;

    if config.verbosity.is_verbose() {
        for step in &scenario.steps {
            printer.info(&format!("  {}", step.label()));
        }
    }
    printer.success(&format!(
        "{}: {} steps, {} assertions",
        scenario.name,
        scenario.steps.len(),
        scenario.expected_assertions
    ));
    Ok(())
}

/// Run a scenario against a scripted page fixture.
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());

    let scenario = load_scenario(&args.scenario)?;
    let fixture_yaml = std::fs::read_to_string(&args.page)?;
    let fixture = PageFixture::from_yaml(&fixture_yaml)?;
    let driver = ScriptedDriver::from_fixture(fixture);

    let mut runner_config = RunnerConfig::new().with_checkpoint_timeout(args.timeout);
    if let Some(url) = &args.base_url {
        runner_config = runner_config.with_base_url(url.clone());
    }
    if args.lenient_timeouts {
        runner_config = runner_config.with_timeout_policy(TimeoutPolicy::Continue);
    }
    if !args.record {
        runner_config = runner_config.without_frame_capture();
    }

    let mut runner = ScenarioRunner::new(driver, runner_config);
    if args.record {
        runner = runner.with_recorder(build_recorder(args)?);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let report = runtime.block_on(runner.run(&scenario))?;

    printer.report(&report);
    if report.success() {
        Ok(())
    } else {
        Err(CliError::scenario_failed(format!(
            "{} of {} assertions failed",
            report.summary.failed + report.summary.skipped,
            report.summary.expected
        )))
    }
}

#[cfg(feature = "media")]
fn build_recorder(args: &RunArgs) -> CliResult<Box<dyn guion::RecordingSink>> {
    use guion::{GifConfig, GifSink};

    let config = GifConfig::default().with_fps(args.fps);
    Ok(Box::new(GifSink::new(args.output.clone(), config)))
}

#[cfg(not(feature = "media"))]
fn build_recorder(_args: &RunArgs) -> CliResult<Box<dyn guion::RecordingSink>> {
    Err(CliError::invalid_argument(
        "--record requires the media feature",
    ))
}
