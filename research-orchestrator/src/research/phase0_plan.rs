//! Phase 0: Plan drafting
//!
//! Asks the collaborator for an ordered list of research questions covering
//! the topic and persists the result as the plan file. The plan stays on
//! disk for the whole review window: it is only removed if the user exits.

use anyhow::Result;
use research_orchestrator_sdk::{
    log_operation_complete, log_operation_start, ResearchCollaborator,
};

use crate::research::collaborator_error;
use crate::research::store::ArtifactStore;

/// Draft the initial research plan and persist it
pub async fn draft_plan(
    collaborator: &dyn ResearchCollaborator,
    topic: &str,
    store: &ArtifactStore,
) -> Result<Vec<String>> {
    let task_id = "draft_plan";

    log_operation_start!(
        task_id,
        "generate_research_plan",
        format!("Drafting plan for: {}", topic)
    );

    let steps = collaborator
        .generate_research_plan(topic)
        .await
        .map_err(|e| collaborator_error("generate_research_plan", e))?;

    log_operation_complete!(
        task_id,
        "generate_research_plan",
        format!("{} plan steps", steps.len())
    );

    println!("\nProposed research plan:");
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    store.write_plan(&steps).await?;

    Ok(steps)
}
