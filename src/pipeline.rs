// src/pipeline.rs
use serde::Serialize;
use std::time::Instant;

use crate::config::AppConfig;
use crate::errors::RunnerError;
use crate::process::ProcessRunner;
use crate::workspace::Workspace;

/// Which stage, if any, stopped the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedStage {
    None,
    Compile,
    Simulate,
    Unexpected,
}

impl std::fmt::Display for FailedStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailedStage::None => write!(f, "none"),
            FailedStage::Compile => write!(f, "compile"),
            FailedStage::Simulate => write!(f, "simulate"),
            FailedStage::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Merged console output of a compile-and-simulate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutcome {
    pub combined_output: String,
    pub failed_stage: FailedStage,
}

impl PipelineOutcome {
    fn simulated(output: String) -> Self {
        Self { combined_output: output, failed_stage: FailedStage::None }
    }

    fn compile_failed(output: String) -> Self {
        Self { combined_output: output, failed_stage: FailedStage::Compile }
    }

    fn unexpected(stage: FailedStage, error: &RunnerError) -> Self {
        Self {
            combined_output: format!("Unexpected error: {}", error),
            failed_stage: stage,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed_stage == FailedStage::None
    }
}

/// `<compiler...> -o <binary> <source>`
pub fn compile_argv(config: &AppConfig, workspace: &Workspace) -> Vec<String> {
    let mut argv = config.compiler.clone();
    argv.push("-o".to_string());
    argv.push(workspace.binary_path().display().to_string());
    argv.push(workspace.source_path().display().to_string());
    argv
}

/// `<simulator...> <binary>`
pub fn simulate_argv(config: &AppConfig, workspace: &Workspace) -> Vec<String> {
    let mut argv = config.simulator.clone();
    argv.push(workspace.binary_path().display().to_string());
    argv
}

/// Compile `code` and, if that succeeds, simulate the result.
///
/// Runs inside a fresh workspace that is removed before this returns, or
/// during unwinding if a stage panics. Never fails: every error ends up as
/// text in the outcome.
pub async fn run_pipeline(
    config: &AppConfig,
    runner: &dyn ProcessRunner,
    code: &str,
) -> PipelineOutcome {
    let started = Instant::now();

    let workspace = match Workspace::acquire(config.workspace_dir.as_deref()) {
        Ok(workspace) => workspace,
        Err(e) => {
            log::error!("Could not create workspace: {}", e);
            return PipelineOutcome::unexpected(FailedStage::Unexpected, &e);
        }
    };

    let outcome = run_stages(config, runner, &workspace, code).await;
    workspace.release();

    log::info!(
        "Pipeline finished in {}ms (failed stage: {})",
        started.elapsed().as_millis(),
        outcome.failed_stage
    );
    outcome
}

async fn run_stages(
    config: &AppConfig,
    runner: &dyn ProcessRunner,
    workspace: &Workspace,
    code: &str,
) -> PipelineOutcome {
    if let Err(e) = workspace.write_source(code).await {
        log::error!("Could not write source file: {}", e);
        return PipelineOutcome::unexpected(FailedStage::Unexpected, &e);
    }

    let compiled = match runner.run(&compile_argv(config, workspace)).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Compilation error: {}", e);
            return PipelineOutcome::compile_failed(e.to_string());
        }
    };
    if !compiled.success() {
        let diagnostics = compiled.stderr_lossy();
        log::error!(
            "Compilation failed with status {}: {}",
            compiled.exit_status(),
            diagnostics
        );
        return PipelineOutcome::compile_failed(diagnostics);
    }

    // The simulator's exit status is informative only.
    match runner.run(&simulate_argv(config, workspace)).await {
        Ok(simulated) => {
            let mut output = simulated.stdout_lossy();
            output.push_str(&simulated.stderr_lossy());
            log::info!("Simulation output: {}", output);
            PipelineOutcome::simulated(output)
        }
        Err(e) => {
            log::error!("Simulation error: {}", e);
            PipelineOutcome::unexpected(FailedStage::Simulate, &e)
        }
    }
}
