//! Phase 1: Plan confirmation loop
//!
//! The user reviews the drafted plan and either confirms it, asks for a
//! revision, or abandons the research. The intent signal comes from the
//! collaborator; this loop only displays prompts, applies revisions to the
//! plan file, and resolves the decision.

use anyhow::Result;
use research_orchestrator_sdk::{
    log_task_complete, log_task_start, log_warning, ResearchCollaborator, UserIntent,
};

use crate::research::collaborator_error;
use crate::research::store::ArtifactStore;

/// Resolution of the confirmation loop
#[derive(Debug, Clone)]
pub enum PlanDecision {
    /// The user accepted the plan; research proceeds on these steps
    Confirmed(Vec<String>),
    /// The user abandoned the research; the plan file has been removed
    Abandoned,
}

/// Run the confirm/update/exit loop until the plan is accepted or abandoned
pub async fn confirm_plan(
    collaborator: &dyn ResearchCollaborator,
    topic: &str,
    store: &ArtifactStore,
) -> Result<PlanDecision> {
    let options = UserIntent::options();
    let mut iteration = 0;

    loop {
        iteration += 1;
        let task_id = format!("review_{}", iteration);
        log_task_start!(1, &task_id, "Waiting for plan review decision");

        println!(
            "\nReview the proposed plan. Give feedback to revise it, confirm it to start \
             the research, or exit to abandon it."
        );

        let intent = collaborator
            .select_user_intent(&options)
            .await
            .map_err(|e| collaborator_error("select_user_intent", e))?;

        log_task_complete!(&task_id, format!("Selected intent: {}", intent));

        match intent {
            UserIntent::Update => {
                let current = store.read_plan().await?;
                let revised = collaborator
                    .update_research_plan(topic, &current)
                    .await
                    .map_err(|e| collaborator_error("update_research_plan", e))?;

                println!("\nRevised research plan:");
                for (i, step) in revised.iter().enumerate() {
                    println!("  {}. {}", i + 1, step);
                }

                store.write_plan(&revised).await?;
            }
            UserIntent::Exit => {
                // Best-effort cleanup; the exit decision stands either way
                if let Err(e) = store.delete_plan().await {
                    log_warning!("Could not remove plan file: {:#}", e);
                }
                return Ok(PlanDecision::Abandoned);
            }
            UserIntent::Confirm => {
                let steps = store.read_plan().await?;
                return Ok(PlanDecision::Confirmed(steps));
            }
        }
    }
}
