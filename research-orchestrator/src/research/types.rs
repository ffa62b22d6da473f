//! Data structures for the research workflow

/// Terminal result of a workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    /// Every question was answered and the report file was written
    Completed { report: String },
    /// The user chose to exit during plan review; the plan file was removed
    Abandoned,
}

impl ResearchOutcome {
    /// The final report text, if the workflow ran to completion
    pub fn report(&self) -> Option<&str> {
        match self {
            ResearchOutcome::Completed { report } => Some(report),
            ResearchOutcome::Abandoned => None,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, ResearchOutcome::Abandoned)
    }
}

/// Record of one answered plan step
#[derive(Debug, Clone)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
    /// Search/answer/evaluate cycles spent on this question
    pub attempts: usize,
    /// False when the attempt budget ran out and the answer is best-effort
    pub accepted: bool,
}
