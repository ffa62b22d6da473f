//! Research workflow module
//!
//! This module sequences the four phases of the research loop: plan
//! drafting, plan confirmation, question answering, and report synthesis.
//! All external intelligence (plan generation, search, evaluation,
//! summarization, user-intent classification) is reached through the
//! [`ResearchCollaborator`] trait from `research-orchestrator-sdk`.
//!
//! [`ResearchCollaborator`]: research_orchestrator_sdk::ResearchCollaborator

pub mod types;
pub mod store;
pub mod phase0_plan;
pub mod phase1_confirm;
pub mod phase2_answers;
pub mod phase3_synthesize;
pub mod workflow;

// Re-export commonly used types
pub use phase1_confirm::PlanDecision;
pub use store::ArtifactStore;
pub use types::{AnsweredQuestion, ResearchOutcome};
pub use workflow::{run_research_workflow, WorkflowConfig};

use research_orchestrator_sdk::CollaboratorError;

/// Wrap a collaborator failure with the operation that raised it
pub(crate) fn collaborator_error(operation: &str, err: CollaboratorError) -> anyhow::Error {
    anyhow::anyhow!(err).context(format!("Collaborator call `{}` failed", operation))
}
