//! Phase 3: Report synthesis
//!
//! Reads the accumulated answers file as one text blob, asks the
//! collaborator to condense it into a report on the topic, and persists the
//! result. The report text is also the workflow's return value.

use anyhow::Result;
use research_orchestrator_sdk::{
    log_file_saved, log_operation_complete, log_operation_start, ResearchCollaborator,
};

use crate::research::collaborator_error;
use crate::research::store::ArtifactStore;

/// Summarize the accumulated answers into the final report
pub async fn synthesize_report(
    collaborator: &dyn ResearchCollaborator,
    topic: &str,
    store: &ArtifactStore,
) -> Result<String> {
    let task_id = "synthesize";

    let full_text = store.read_answers().await?;

    log_operation_start!(
        task_id,
        "summarize",
        format!("Summarizing findings on: {}", topic)
    );

    let report = collaborator
        .summarize(&full_text, topic)
        .await
        .map_err(|e| collaborator_error("summarize", e))?;

    log_operation_complete!(task_id, "summarize", format!("{} chars", report.len()));

    store.write_report(&report).await?;
    log_file_saved!(store.report_path().display());

    Ok(report)
}
