//! File persistence for workflow artifacts
//!
//! All intermediate and final state lives in three flat files derived from
//! the plan name:
//!
//! - `{plan_name}.txt`: the plan as indented JSON, overwritten on each
//!   revision and deleted when the user exits
//! - `{plan_name}_research_answers.md`: append-only Markdown log of
//!   answered questions
//! - `{plan_name}_research_report.txt`: the final report, written once

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Paths and I/O for the artifact files of one research run
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    base_dir: PathBuf,
    plan_name: String,
}

impl ArtifactStore {
    pub fn new(base_dir: impl Into<PathBuf>, plan_name: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            plan_name: plan_name.into(),
        }
    }

    pub fn plan_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.txt", self.plan_name))
    }

    pub fn answers_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}_research_answers.md", self.plan_name))
    }

    pub fn report_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}_research_report.txt", self.plan_name))
    }

    /// Overwrite the plan file with the given steps as indented JSON
    pub async fn write_plan(&self, steps: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(steps)?;
        let path = self.plan_path();
        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write plan file: {}", path.display()))
    }

    pub async fn read_plan(&self) -> Result<Vec<String>> {
        let path = self.plan_path();
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plan JSON from: {}", path.display()))
    }

    pub async fn delete_plan(&self) -> Result<()> {
        let path = self.plan_path();
        fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to delete plan file: {}", path.display()))
    }

    /// Create the answers file with its document heading, truncating any
    /// content left over from an earlier run under the same plan name
    pub async fn create_answers(&self, topic: &str) -> Result<()> {
        let path = self.answers_path();
        fs::write(&path, format!("# Detailed Exploration of {}\n\n", topic))
            .await
            .with_context(|| format!("Failed to create answers file: {}", path.display()))
    }

    /// Append one answered question as a `##` section
    pub async fn append_answer(&self, question: &str, answer: &str) -> Result<()> {
        let path = self.answers_path();
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open answers file: {}", path.display()))?;
        file.write_all(format!("## {}\n\n{}\n\n", question, answer).as_bytes())
            .await
            .with_context(|| format!("Failed to append to answers file: {}", path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to flush answers file: {}", path.display()))
    }

    pub async fn read_answers(&self) -> Result<String> {
        let path = self.answers_path();
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read answers file: {}", path.display()))
    }

    pub async fn write_report(&self, report: &str) -> Result<()> {
        let path = self.report_path();
        fs::write(&path, report)
            .await
            .with_context(|| format!("Failed to write report file: {}", path.display()))
    }
}
