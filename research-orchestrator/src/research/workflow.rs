//! Workflow orchestration for the research loop
//!
//! This module contains the main orchestration logic that sequences the
//! phases, validates configuration, and manages artifact persistence.
//!
//! The primary entry point is [`run_research_workflow`], which drives the
//! complete workflow against a caller-supplied collaborator.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

use research_orchestrator_sdk::{
    log_phase_complete, log_phase_start, log_state_file, ResearchCollaborator,
};

use crate::research::{
    phase0_plan::draft_plan,
    phase1_confirm::{confirm_plan, PlanDecision},
    phase2_answers::answer_questions,
    phase3_synthesize::synthesize_report,
    store::ArtifactStore,
    types::ResearchOutcome,
};

const TOTAL_PHASES: usize = 4;

/// Configuration for the research workflow
///
/// `topic` and `plan_name` are required; the remaining fields have working
/// defaults.
///
/// # Examples
///
/// ```no_run
/// use research_orchestrator::research::WorkflowConfig;
///
/// let config = WorkflowConfig {
///     topic: Some("solar panel efficiency".to_string()),
///     plan_name: Some("p1".to_string()),
///     output_dir: Some("./runs".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Research topic (required)
    pub topic: Option<String>,
    /// Base name for the artifact files (required; a bare file name, the
    /// plan lands in `{plan_name}.txt`)
    pub plan_name: Option<String>,
    /// Directory the artifact files are written to (default: current
    /// directory; created if missing)
    pub output_dir: Option<String>,
    /// Search/answer/evaluate cycles allowed per question before the last
    /// candidate answer is recorded as best-effort
    pub max_search_attempts: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            topic: None,
            plan_name: None,
            output_dir: None,
            max_search_attempts: 5,
        }
    }
}

/// Run the complete research workflow with the given configuration
///
/// Drives all four phases in strict program order:
///
/// - **Phase 0**: Draft a research plan and save it to `{plan_name}.txt`
/// - **Phase 1**: Let the user confirm, revise, or abandon the plan
/// - **Phase 2**: Answer each plan step and append the results to
///   `{plan_name}_research_answers.md`
/// - **Phase 3**: Summarize the answers into `{plan_name}_research_report.txt`
///
/// The workflow resolves to [`ResearchOutcome::Completed`] with the report
/// text, or [`ResearchOutcome::Abandoned`] when the user exits during plan
/// review (the plan file is removed on the way out).
///
/// # Errors
///
/// Returns an error if:
/// - Required configuration is missing or invalid
/// - Any artifact read or write fails (all persistence failures are fatal;
///   only the exit-time plan cleanup is best-effort)
/// - A collaborator call fails
///
/// # Examples
///
/// ```no_run
/// use research_orchestrator::research::{run_research_workflow, WorkflowConfig};
/// use research_orchestrator_sdk::ResearchCollaborator;
///
/// # async fn example(collaborator: &dyn ResearchCollaborator) -> anyhow::Result<()> {
/// let config = WorkflowConfig {
///     topic: Some("solar panel efficiency".to_string()),
///     plan_name: Some("p1".to_string()),
///     ..Default::default()
/// };
///
/// let outcome = run_research_workflow(config, collaborator).await?;
/// if let Some(report) = outcome.report() {
///     println!("{}", report);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_research_workflow(
    config: WorkflowConfig,
    collaborator: &dyn ResearchCollaborator,
) -> Result<ResearchOutcome> {
    // Validate required arguments up front
    let topic = match config.topic.as_deref() {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => anyhow::bail!("topic is required"),
    };
    let plan_name = match config.plan_name.as_deref() {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => anyhow::bail!("plan_name is required"),
    };
    if plan_name.contains('/') || plan_name.contains('\\') {
        anyhow::bail!("plan_name must be a bare file name, got: {}", plan_name);
    }
    if config.max_search_attempts == 0 {
        anyhow::bail!("max_search_attempts must be at least 1");
    }

    let base_dir = config
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&base_dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", base_dir.display()))?;

    let store = ArtifactStore::new(base_dir, plan_name);

    // Phase 0: Draft plan
    log_phase_start!(0, "Draft Plan", TOTAL_PHASES);
    println!("{}", "=".repeat(80));
    println!("PHASE 0: Drafting Research Plan");
    println!("{}", "=".repeat(80));

    draft_plan(collaborator, &topic, &store).await?;

    log_state_file!(0, store.plan_path().display().to_string(), "Research plan");
    log_phase_complete!(0, "Draft Plan");

    // Phase 1: Confirm plan
    log_phase_start!(1, "Confirm Plan", TOTAL_PHASES);
    println!("\n{}", "=".repeat(80));
    println!("PHASE 1: Plan Review");
    println!("{}", "=".repeat(80));

    let steps = match confirm_plan(collaborator, &topic, &store).await? {
        PlanDecision::Confirmed(steps) => steps,
        PlanDecision::Abandoned => {
            println!("\nResearch abandoned during plan review.");
            log_phase_complete!(1, "Confirm Plan");
            return Ok(ResearchOutcome::Abandoned);
        }
    };
    log_phase_complete!(1, "Confirm Plan");

    // Phase 2: Answer questions
    log_phase_start!(2, "Answer Questions", TOTAL_PHASES);
    println!("\n{}", "=".repeat(80));
    println!("PHASE 2: Answering {} Research Questions", steps.len());
    println!("{}", "=".repeat(80));

    let answered =
        answer_questions(collaborator, &topic, &steps, &store, config.max_search_attempts).await?;

    log_state_file!(
        2,
        store.answers_path().display().to_string(),
        "Accumulated research answers"
    );
    log_phase_complete!(2, "Answer Questions");

    // Phase 3: Synthesize report
    log_phase_start!(3, "Synthesize Report", TOTAL_PHASES);
    println!("\n{}", "=".repeat(80));
    println!("PHASE 3: Report Synthesis");
    println!("{}", "=".repeat(80));

    let report = synthesize_report(collaborator, &topic, &store).await?;

    log_state_file!(
        3,
        store.report_path().display().to_string(),
        "Final research report"
    );
    log_phase_complete!(3, "Synthesize Report");

    println!("\n{}", "=".repeat(80));
    println!(
        "Research complete! Report saved to: {}",
        store.report_path().display()
    );
    println!("{}", "=".repeat(80));

    let best_effort = answered.iter().filter(|a| !a.accepted).count();
    if best_effort > 0 {
        println!(
            "{} of {} answers are best-effort (the evaluator did not accept them).",
            best_effort,
            answered.len()
        );
    }

    Ok(ResearchOutcome::Completed { report })
}
