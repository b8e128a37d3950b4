//! Markdown project tracking document.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::GenerateError;

pub const COMPLETED_HEADING: &str = "### Completed";
pub const IN_PROGRESS_HEADING: &str = "### In progress";
pub const PENDING_HEADING: &str = "### Pending";
pub const HISTORY_HEADING: &str = "## History";

/// Skeleton written when the tracking document does not exist yet.
pub fn initial_document() -> String {
    format!(
        "# Project Tracking\n\n## Status\n\n{COMPLETED_HEADING}\n\n{IN_PROGRESS_HEADING}\n\n{PENDING_HEADING}\n\n{HISTORY_HEADING}\n"
    )
}

/// A finished task, parsed from `NAME:KIND[:NOTES]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTask {
    pub name: String,
    /// Component kind the task produced, free text
    pub kind: String,
    pub notes: Option<String>,
}

/// A task to schedule, parsed from `NAME:PRIORITY:ESTIMATE[:DESCRIPTION]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub name: String,
    pub priority: String,
    pub estimate: String,
    pub description: Option<String>,
}

/// Split `raw` into `required` fields plus an optional remainder that may
/// itself contain colons.
fn split_fields<'a>(
    raw: &'a str,
    required: usize,
    format: &str,
) -> Result<(Vec<&'a str>, Option<&'a str>), GenerateError> {
    let mut parts = raw.splitn(required + 1, ':');
    let mut fields = Vec::with_capacity(required);
    for _ in 0..required {
        match parts.next().map(str::trim) {
            Some(field) if !field.is_empty() => fields.push(field),
            _ => {
                return Err(GenerateError::contract(format!(
                    "malformed task '{raw}' (expected {format})"
                )))
            }
        }
    }
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());
    Ok((fields, rest))
}

impl FromStr for CompletedTask {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (fields, notes) = split_fields(s, 2, "NAME:KIND[:NOTES]")?;
        Ok(CompletedTask {
            name: fields[0].to_string(),
            kind: fields[1].to_string(),
            notes: notes.map(str::to_string),
        })
    }
}

impl FromStr for NewTask {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (fields, description) = split_fields(s, 3, "NAME:PRIORITY:ESTIMATE[:DESCRIPTION]")?;
        Ok(NewTask {
            name: fields[0].to_string(),
            priority: fields[1].to_string(),
            estimate: fields[2].to_string(),
            description: description.map(str::to_string),
        })
    }
}

impl CompletedTask {
    fn to_markdown(&self, date: NaiveDate) -> String {
        let mut out = format!(
            "- [x] **{}** ({})\n  - Component: {}\n",
            self.name,
            date.format("%Y-%m-%d"),
            self.kind
        );
        if let Some(notes) = &self.notes {
            out.push_str(&format!("  - Notes: {notes}\n"));
        }
        out
    }
}

impl NewTask {
    fn to_markdown(&self) -> String {
        let mut out = format!("- [ ] **{}** (priority: {})\n", self.name, self.priority);
        if let Some(description) = &self.description {
            out.push_str(&format!("  - {description}\n"));
        }
        out.push_str(&format!("  - Estimate: {}\n", self.estimate));
        out
    }
}

/// Insert `block` on the lines right after `heading`; append the heading
/// and block at the end when the heading is missing.
fn insert_after_heading(content: &str, heading: &str, block: &str) -> String {
    let mut out = String::with_capacity(content.len() + block.len() + heading.len() + 2);
    let mut inserted = false;
    for line in content.split_inclusive('\n') {
        out.push_str(line);
        if !inserted && line.trim_end() == heading {
            if !line.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(block);
            inserted = true;
        }
    }
    if !inserted {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        out.push_str(block);
    }
    out
}

/// Apply an update to the tracking document.
///
/// Completed tasks go under the "Completed" heading, new tasks under
/// "Pending", and a dated entry summarising both under "History". A missing
/// document starts from [`initial_document`].
pub fn apply_tracking_update(
    current: Option<&str>,
    completed: &[CompletedTask],
    new_tasks: &[NewTask],
    date: NaiveDate,
) -> String {
    let mut content = current.map_or_else(initial_document, str::to_string);

    if !completed.is_empty() {
        let block: String = completed.iter().map(|t| t.to_markdown(date)).collect();
        content = insert_after_heading(&content, COMPLETED_HEADING, &block);
    }
    if !new_tasks.is_empty() {
        let block: String = new_tasks.iter().map(NewTask::to_markdown).collect();
        content = insert_after_heading(&content, PENDING_HEADING, &block);
    }

    let mut history = format!("### {} - Update\n", date.format("%Y-%m-%d"));
    if !completed.is_empty() {
        let names: Vec<&str> = completed.iter().map(|t| t.name.as_str()).collect();
        history.push_str(&format!("- Completed: {}\n", names.join(", ")));
    }
    if !new_tasks.is_empty() {
        let names: Vec<&str> = new_tasks.iter().map(|t| t.name.as_str()).collect();
        history.push_str(&format!("- Added: {}\n", names.join(", ")));
    }
    insert_after_heading(&content, HISTORY_HEADING, &history)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn parses_completed_task_with_colons_in_notes() {
        let task: CompletedTask = "Product entity:entity:fields: id, name".parse().unwrap();
        assert_eq!(task.name, "Product entity");
        assert_eq!(task.kind, "entity");
        assert_eq!(task.notes.as_deref(), Some("fields: id, name"));
    }

    #[test]
    fn parses_new_task_without_description() {
        let task: NewTask = "Stock sync:high:2h".parse().unwrap();
        assert_eq!(task.priority, "high");
        assert_eq!(task.estimate, "2h");
        assert!(task.description.is_none());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!("only-a-name".parse::<CompletedTask>().is_err());
        assert!("name:high".parse::<NewTask>().is_err());
        assert!("name::2h".parse::<NewTask>().is_err());
    }

    #[test]
    fn new_document_gets_every_section() {
        let completed: Vec<CompletedTask> = vec!["Product entity:entity".parse().unwrap()];
        let pending: Vec<NewTask> = vec!["Controller:high:1h:REST endpoints".parse().unwrap()];
        let doc = apply_tracking_update(None, &completed, &pending, day());

        let completed_at = doc.find("- [x] **Product entity** (2024-03-01)").unwrap();
        let pending_at = doc.find("- [ ] **Controller** (priority: high)").unwrap();
        let history_at = doc.find("### 2024-03-01 - Update").unwrap();
        assert!(doc.find(COMPLETED_HEADING).unwrap() < completed_at);
        assert!(doc.find(PENDING_HEADING).unwrap() < pending_at);
        assert!(doc.find(HISTORY_HEADING).unwrap() < history_at);
        assert!(doc.contains("  - REST endpoints\n  - Estimate: 1h\n"));
        assert!(doc.contains("- Completed: Product entity\n- Added: Controller\n"));
    }

    #[test]
    fn newest_entries_come_first() {
        let first: Vec<CompletedTask> = vec!["first:entity".parse().unwrap()];
        let second: Vec<CompletedTask> = vec!["second:port".parse().unwrap()];
        let doc = apply_tracking_update(None, &first, &[], day());
        let doc = apply_tracking_update(Some(&doc), &second, &[], day());
        assert!(doc.find("**second**").unwrap() < doc.find("**first**").unwrap());
    }

    #[test]
    fn missing_heading_is_appended() {
        let doc = apply_tracking_update(
            Some("# Notes\nhand written"),
            &["x:entity".parse::<CompletedTask>().unwrap()],
            &[],
            day(),
        );
        assert!(doc.starts_with("# Notes\nhand written\n"));
        assert!(doc.contains("### Completed\n- [x] **x**"));
        assert!(doc.contains("## History\n### 2024-03-01 - Update\n"));
    }
}
