// Re-export async trait for convenience
pub use async_trait::async_trait;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxed error type produced by collaborator implementations
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for collaborator operations
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// The classified decision governing whether the plan proceeds, is revised,
/// or the research is abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserIntent {
    Confirm,
    Update,
    Exit,
}

impl UserIntent {
    /// Stable key identifying this intent within an option set
    pub fn key(&self) -> &'static str {
        match self {
            UserIntent::Confirm => "confirm",
            UserIntent::Update => "update",
            UserIntent::Exit => "exit",
        }
    }

    /// The fixed option set presented to the intent selector
    pub fn options() -> Vec<IntentOption> {
        vec![
            IntentOption {
                intent: UserIntent::Confirm,
                key: "confirm",
                description: "The plan looks good, start researching the questions",
            },
            IntentOption {
                intent: UserIntent::Update,
                key: "update",
                description: "Revise the plan based on the user's feedback",
            },
            IntentOption {
                intent: UserIntent::Exit,
                key: "exit",
                description: "Abandon the research and discard the plan",
            },
        ]
    }
}

impl fmt::Display for UserIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One selectable intent with a natural-language description
#[derive(Debug, Clone, Serialize)]
pub struct IntentOption {
    pub intent: UserIntent,
    pub key: &'static str,
    pub description: &'static str,
}

/// A prior rejected search attempt and the evaluator's reasoning, handed
/// back to the search operation so it can avoid unproductive queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousSearch {
    pub query: String,
    pub reasoning: String,
}

/// The evaluator's verdict on a candidate answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub is_good: bool,
    pub reasoning: String,
}

/// Typed interface to the external research capabilities.
///
/// The orchestrator never talks to a model, a search index, or a user
/// directly; every piece of intelligence is reached through one of these
/// methods. Implementations typically delegate to a language-model-backed
/// service, but the orchestrator only depends on the contracts below.
#[async_trait]
pub trait ResearchCollaborator: Send + Sync {
    /// Produce an ordered list of research questions covering `topic`
    async fn generate_research_plan(&self, topic: &str) -> CollaboratorResult<Vec<String>>;

    /// Revise `current_plan` using whatever feedback the collaborator has
    /// gathered from the user
    async fn update_research_plan(
        &self,
        topic: &str,
        current_plan: &[String],
    ) -> CollaboratorResult<Vec<String>>;

    /// Classify the user's decision into exactly one of the given options
    async fn select_user_intent(&self, options: &[IntentOption]) -> CollaboratorResult<UserIntent>;

    /// Retrieve content for `query`, steering away from the rejected
    /// attempts recorded in `previous_searches`
    async fn web_search(
        &self,
        query: &str,
        previous_searches: &[PreviousSearch],
    ) -> CollaboratorResult<String>;

    /// Extract an answer to `question` from the retrieved `content`
    async fn answer_question_about_content(
        &self,
        content: &str,
        question: &str,
    ) -> CollaboratorResult<String>;

    /// Judge whether `answer` adequately answers `question`
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> CollaboratorResult<AnswerEvaluation>;

    /// Condense the accumulated answers into a final report on `topic`
    async fn summarize(&self, full_text: &str, topic: &str) -> CollaboratorResult<String>;
}

/// Structured logging events emitted by workflows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowLog {
    /// Phase started
    PhaseStarted {
        phase: usize,
        name: String,
        total_phases: usize,
    },
    /// Phase completed
    PhaseCompleted {
        phase: usize,
        name: String,
    },
    /// Phase failed
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// Task started
    TaskStarted {
        phase: usize,
        task_id: String,
        description: String,
        total_tasks: Option<usize>,
    },
    /// Task progress update
    TaskProgress {
        task_id: String,
        message: String,
    },
    /// Task completed
    TaskCompleted {
        task_id: String,
        result: Option<String>,
    },
    /// Task failed
    TaskFailed {
        task_id: String,
        error: String,
    },
    /// Collaborator operation started (within a task)
    OperationStarted {
        task_id: String,
        operation: String,
        detail: String,
    },
    /// Collaborator operation completed
    OperationCompleted {
        task_id: String,
        operation: String,
        result: Option<String>,
    },
    /// Collaborator operation failed
    OperationFailed {
        task_id: String,
        operation: String,
        error: String,
    },
    /// State file created (intermediate outputs)
    StateFileCreated {
        phase: usize,
        file_path: String,
        description: String,
    },
}

#[derive(Serialize)]
struct TimestampedLog<'a> {
    ts: DateTime<Local>,
    #[serde(flatten)]
    event: &'a WorkflowLog,
}

impl WorkflowLog {
    /// Emit this log event to stderr for host UI parsing
    pub fn emit(&self) {
        let entry = TimestampedLog {
            ts: Local::now(),
            event: self,
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            use std::io::Write;
            eprintln!("__WF_EVENT__:{}", json);
            // Force flush stderr in async contexts
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for workflow logging
#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr, $total:expr) => {
        $crate::WorkflowLog::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr) => {
        $crate::WorkflowLog::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_failed {
    ($phase:expr, $name:expr, $error:expr) => {
        $crate::WorkflowLog::PhaseFailed {
            phase: $phase,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_start {
    ($phase:expr, $task_id:expr, $desc:expr) => {
        $crate::WorkflowLog::TaskStarted {
            phase: $phase,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: None,
        }
        .emit();
    };
    ($phase:expr, $task_id:expr, $desc:expr, $total:expr) => {
        $crate::WorkflowLog::TaskStarted {
            phase: $phase,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: Some($total),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_progress {
    ($task_id:expr, $msg:expr) => {
        $crate::WorkflowLog::TaskProgress {
            task_id: $task_id.to_string(),
            message: $msg.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_complete {
    ($task_id:expr) => {
        $crate::WorkflowLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $result:expr) => {
        $crate::WorkflowLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_failed {
    ($task_id:expr, $error:expr) => {
        $crate::WorkflowLog::TaskFailed {
            task_id: $task_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_operation_start {
    ($task_id:expr, $operation:expr, $detail:expr) => {
        $crate::WorkflowLog::OperationStarted {
            task_id: $task_id.to_string(),
            operation: $operation.to_string(),
            detail: $detail.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_operation_complete {
    ($task_id:expr, $operation:expr) => {
        $crate::WorkflowLog::OperationCompleted {
            task_id: $task_id.to_string(),
            operation: $operation.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $operation:expr, $result:expr) => {
        $crate::WorkflowLog::OperationCompleted {
            task_id: $task_id.to_string(),
            operation: $operation.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_operation_failed {
    ($task_id:expr, $operation:expr, $error:expr) => {
        $crate::WorkflowLog::OperationFailed {
            task_id: $task_id.to_string(),
            operation: $operation.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_state_file {
    ($phase:expr, $path:expr, $desc:expr) => {
        $crate::WorkflowLog::StateFileCreated {
            phase: $phase,
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// These macros provide colored console output for human-readable logs,
// complementing the structured WorkflowLog events parsed by host UIs.
// ============================================================================

/// Logs an informational message.
///
/// # Example
/// ```
/// use research_orchestrator_sdk::log_info;
/// log_info!("Loading saved plan...");
/// ```
///
/// Outputs:
/// ```text
/// ℹ Loading saved plan...
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// # Example
/// ```
/// use research_orchestrator_sdk::log_warning;
/// log_warning!("Answer budget exhausted");
/// ```
///
/// Outputs:
/// ```text
/// ⚠ Warning: Answer budget exhausted
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
///
/// # Example
/// ```
/// use research_orchestrator_sdk::log_file_saved;
/// log_file_saved!("./p1_research_report.txt");
/// ```
///
/// Outputs:
/// ```text
/// ✓ Saved: ./p1_research_report.txt
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

/// Logs progress of an operation.
///
/// # Example
/// ```
/// use research_orchestrator_sdk::log_progress;
/// log_progress!(3, 5, "questions");
/// ```
///
/// Outputs:
/// ```text
/// Progress: 3/5 questions
/// ```
#[macro_export]
macro_rules! log_progress {
    ($current:expr, $total:expr, $item_type:expr) => {
        println!(
            "\x1b[36mProgress: {}/{} {}\x1b[0m",
            $current, $total, $item_type
        );
    };
}
