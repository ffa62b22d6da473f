//! Phase 2: Question answering
//!
//! Walks the confirmed plan in order. Each question runs a bounded
//! search/answer/evaluate cycle: rejected attempts are remembered as
//! (query, reasoning) pairs and handed back to the search operation so it
//! can steer away from unproductive queries. When the attempt budget runs
//! out the last candidate answer is recorded as best-effort instead of
//! retrying forever.

use anyhow::Result;
use research_orchestrator_sdk::{
    log_progress, log_task_complete, log_task_start, log_warning, PreviousSearch,
    ResearchCollaborator,
};

use crate::research::collaborator_error;
use crate::research::store::ArtifactStore;
use crate::research::types::AnsweredQuestion;

/// Answer every plan step and append the results to the answers file
pub async fn answer_questions(
    collaborator: &dyn ResearchCollaborator,
    topic: &str,
    steps: &[String],
    store: &ArtifactStore,
    max_search_attempts: usize,
) -> Result<Vec<AnsweredQuestion>> {
    store.create_answers(topic).await?;

    let total = steps.len();
    let mut answered = Vec::with_capacity(total);

    for (i, question) in steps.iter().enumerate() {
        let task_id = format!("answer_{}", i + 1);
        log_task_start!(2, &task_id, format!("Answering: {}", question), total);
        log_progress!(i + 1, total, "questions");

        let record = answer_question(collaborator, question, max_search_attempts).await?;

        if record.accepted {
            log_task_complete!(
                &task_id,
                format!("Accepted after {} attempt(s)", record.attempts)
            );
        } else {
            log_warning!(
                "No accepted answer for '{}' after {} attempts, recording best effort",
                question,
                record.attempts
            );
            log_task_complete!(&task_id, "Recorded best-effort answer");
        }

        store.append_answer(question, &record.answer).await?;
        answered.push(record);
    }

    Ok(answered)
}

/// Run the search/answer/evaluate cycle for a single question
async fn answer_question(
    collaborator: &dyn ResearchCollaborator,
    question: &str,
    max_search_attempts: usize,
) -> Result<AnsweredQuestion> {
    let mut previous_searches: Vec<PreviousSearch> = Vec::new();
    let mut attempts = 0;

    loop {
        attempts += 1;

        let content = collaborator
            .web_search(question, &previous_searches)
            .await
            .map_err(|e| collaborator_error("web_search", e))?;

        let answer = collaborator
            .answer_question_about_content(&content, question)
            .await
            .map_err(|e| collaborator_error("answer_question_about_content", e))?;

        let evaluation = collaborator
            .evaluate_answer(question, &answer)
            .await
            .map_err(|e| collaborator_error("evaluate_answer", e))?;

        if evaluation.is_good {
            return Ok(AnsweredQuestion {
                question: question.to_string(),
                answer,
                attempts,
                accepted: true,
            });
        }

        if attempts >= max_search_attempts {
            return Ok(AnsweredQuestion {
                question: question.to_string(),
                answer,
                attempts,
                accepted: false,
            });
        }

        // The query itself never changes; only the rejection history grows
        previous_searches.push(PreviousSearch {
            query: question.to_string(),
            reasoning: evaluation.reasoning,
        });
    }
}
