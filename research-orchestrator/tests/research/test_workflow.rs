//! End-to-end workflow tests against a scripted collaborator

use research_orchestrator::research::{run_research_workflow, ResearchOutcome, WorkflowConfig};
use research_orchestrator_sdk::UserIntent;
use std::path::Path;

use super::common::{accepted, cleanup_temp_dir, create_temp_dir, rejected, MockCollaborator};

fn config_for(dir: &Path, plan_name: &str, topic: &str) -> WorkflowConfig {
    WorkflowConfig {
        topic: Some(topic.to_string()),
        plan_name: Some(plan_name.to_string()),
        output_dir: Some(dir.to_string_lossy().into_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_immediate_confirm_produces_all_artifacts() {
    let temp_dir = create_temp_dir("confirm_happy_path");
    let collaborator = MockCollaborator::new(vec!["History", "Current tech"], "FINAL REPORT");

    let outcome = run_research_workflow(
        config_for(&temp_dir, "p1", "solar panel efficiency"),
        &collaborator,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        ResearchOutcome::Completed {
            report: "FINAL REPORT".to_string()
        }
    );

    // The plan survives confirmation; it is only deleted on exit
    let plan_json = std::fs::read_to_string(temp_dir.join("p1.txt")).unwrap();
    let plan: Vec<String> = serde_json::from_str(&plan_json).unwrap();
    assert_eq!(plan, vec!["History", "Current tech"]);

    let answers = std::fs::read_to_string(temp_dir.join("p1_research_answers.md")).unwrap();
    assert!(answers.starts_with("# Detailed Exploration of solar panel efficiency\n\n"));
    let history_pos = answers.find("## History\n\n").unwrap();
    let tech_pos = answers.find("## Current tech\n\n").unwrap();
    assert!(history_pos < tech_pos);

    let report = std::fs::read_to_string(temp_dir.join("p1_research_report.txt")).unwrap();
    assert_eq!(report, "FINAL REPORT");

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_answers_are_appended_verbatim() {
    let temp_dir = create_temp_dir("answers_verbatim");
    let collaborator = MockCollaborator::new(vec!["History"], "report");

    run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    let answers = std::fs::read_to_string(temp_dir.join("p1_research_answers.md")).unwrap();
    assert_eq!(
        answers,
        "# Detailed Exploration of topic\n\n\
         ## History\n\nanswer to 'History' from 'content about History'\n\n"
    );

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_update_loop_rewrites_plan_until_confirm() {
    let temp_dir = create_temp_dir("update_then_confirm");
    let collaborator = MockCollaborator::new(vec!["Original"], "report")
        .with_intents(vec![
            UserIntent::Update,
            UserIntent::Update,
            UserIntent::Confirm,
        ])
        .with_revisions(vec![vec!["First pass"], vec!["First pass", "Second pass"]]);

    let outcome = run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    assert_eq!(outcome.report(), Some("report"));

    // The plan file holds the latest revision
    let plan_json = std::fs::read_to_string(temp_dir.join("p1.txt")).unwrap();
    let plan: Vec<String> = serde_json::from_str(&plan_json).unwrap();
    assert_eq!(plan, vec!["First pass", "Second pass"]);

    // The research ran over the revised steps, in order
    let answers = std::fs::read_to_string(temp_dir.join("p1_research_answers.md")).unwrap();
    assert!(!answers.contains("## Original"));
    let first = answers.find("## First pass\n\n").unwrap();
    let second = answers.find("## Second pass\n\n").unwrap();
    assert!(first < second);

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_exit_deletes_plan_and_abandons() {
    let temp_dir = create_temp_dir("exit_abandons");
    let collaborator =
        MockCollaborator::new(vec!["History"], "report").with_intents(vec![UserIntent::Exit]);

    let outcome = run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    assert!(outcome.is_abandoned());
    assert!(!temp_dir.join("p1.txt").exists());
    assert!(!temp_dir.join("p1_research_answers.md").exists());
    assert!(!temp_dir.join("p1_research_report.txt").exists());

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_exit_after_updates_still_abandons() {
    let temp_dir = create_temp_dir("exit_after_update");
    let collaborator = MockCollaborator::new(vec!["Original"], "report")
        .with_intents(vec![UserIntent::Update, UserIntent::Exit])
        .with_revisions(vec![vec!["Revised"]]);

    let outcome = run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    assert!(outcome.is_abandoned());
    assert!(!temp_dir.join("p1.txt").exists());

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_rejected_attempts_grow_search_history() {
    let temp_dir = create_temp_dir("retry_history");
    let collaborator = MockCollaborator::new(vec!["History"], "report").with_evaluations(vec![
        rejected("too shallow"),
        rejected("still too shallow"),
        accepted(),
    ]);

    let outcome = run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    assert_eq!(outcome.report(), Some("report"));

    // One history entry per rejected attempt, never cleared mid-loop
    let sizes = collaborator.search_history_sizes.lock().unwrap().clone();
    assert_eq!(sizes, vec![0, 1, 2]);

    // The answer lands in the file exactly once
    let answers = std::fs::read_to_string(temp_dir.join("p1_research_answers.md")).unwrap();
    assert_eq!(answers.matches("## History").count(), 1);

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_history_resets_between_questions() {
    let temp_dir = create_temp_dir("history_per_question");
    let collaborator = MockCollaborator::new(vec!["Q1", "Q2"], "report")
        .with_evaluations(vec![rejected("off-topic"), accepted(), accepted()]);

    run_research_workflow(config_for(&temp_dir, "p1", "topic"), &collaborator)
        .await
        .unwrap();

    // Q1 retried once, Q2 started with a fresh history
    let sizes = collaborator.search_history_sizes.lock().unwrap().clone();
    assert_eq!(sizes, vec![0, 1, 0]);

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_exhausted_budget_records_best_effort_answer() {
    let temp_dir = create_temp_dir("budget_exhausted");
    let collaborator = MockCollaborator::new(vec!["History"], "report").with_evaluations(vec![
        rejected("bad"),
        rejected("still bad"),
        rejected("never good"),
    ]);

    let mut config = config_for(&temp_dir, "p1", "topic");
    config.max_search_attempts = 2;

    let outcome = run_research_workflow(config, &collaborator)
        .await
        .unwrap();

    // The workflow still completes and the last candidate answer is kept
    assert_eq!(outcome.report(), Some("report"));
    let answers = std::fs::read_to_string(temp_dir.join("p1_research_answers.md")).unwrap();
    assert_eq!(answers.matches("## History").count(), 1);

    // Exactly two attempts ran
    let sizes = collaborator.search_history_sizes.lock().unwrap().clone();
    assert_eq!(sizes, vec![0, 1]);

    cleanup_temp_dir(&temp_dir);
}

#[tokio::test]
async fn test_unwritable_output_dir_is_an_error() {
    let temp_dir = create_temp_dir("unwritable_output");
    // A file where the output directory should be
    let blocker = temp_dir.join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let collaborator = MockCollaborator::new(vec!["History"], "report");
    let outcome = run_research_workflow(
        config_for(&blocker, "p1", "topic"),
        &collaborator,
    )
    .await;

    assert!(outcome.is_err());

    cleanup_temp_dir(&temp_dir);
}
