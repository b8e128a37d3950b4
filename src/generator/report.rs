use std::path::{Path, PathBuf};

use serde::Serialize;

use super::kinds::ArtifactKind;
use super::materialize::WriteOutcome;

/// What a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Directory,
    Artifact(ArtifactKind),
    /// Module-shared `errors.go`
    Exception,
    CurlScript,
    PostmanCollection,
    TrackingDocument,
}

/// One structured entry of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub kind: RecordKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Accumulates records during a run. Formatting is left to the caller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub records: Vec<ArtifactRecord>,
    /// Follow-ups the caller has to do by hand
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: RecordKind, path: impl AsRef<Path>, outcome: WriteOutcome) {
        self.records.push(ArtifactRecord {
            kind,
            path: path.as_ref().to_path_buf(),
            outcome,
        });
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn extend(&mut self, other: GenerationReport) {
        self.records.extend(other.records);
        self.notes.extend(other.notes);
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.with_outcome(WriteOutcome::Written)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.with_outcome(WriteOutcome::Skipped)
    }

    pub fn with_outcome(&self, outcome: WriteOutcome) -> impl Iterator<Item = &ArtifactRecord> {
        self.records.iter().filter(move |r| r.outcome == outcome)
    }

    /// The record of a given artifact kind, if one was produced.
    pub fn find(&self, kind: RecordKind) -> Option<&ArtifactRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
