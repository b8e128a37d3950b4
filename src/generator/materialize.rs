//! Filesystem side of generation.
//!
//! Create-once artifacts are written with `create_new`, so an existing file is
//! never truncated, even when two callers race for the same path. Overwrite
//! artifacts are last-writer-wins.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::kinds::WritePolicy;
use crate::error::{GenerateError, GenerateResult};

/// What happened to one target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Written,
    /// Create-once target already existed and was left untouched
    Skipped,
    /// Dry run: nothing touched
    Planned,
}

/// Writes rendered artifacts under a write policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Materializer {
    dry_run: bool,
}

impl Materializer {
    pub fn new(dry_run: bool) -> Self {
        Materializer { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Create `dir` and its parents. Succeeds if it already exists.
    pub fn ensure_dir(&self, dir: &Path) -> GenerateResult<()> {
        if self.dry_run {
            debug!(path = %dir.display(), "dry run: would create directory");
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| GenerateError::io(dir, e))
    }

    /// Write `content` to `path` under `policy`, creating parent directories.
    pub fn write(
        &self,
        policy: WritePolicy,
        path: &Path,
        content: &str,
    ) -> GenerateResult<WriteOutcome> {
        if self.dry_run {
            let outcome = match policy {
                WritePolicy::CreateOnce if path.exists() => WriteOutcome::Skipped,
                _ => WriteOutcome::Planned,
            };
            debug!(path = %path.display(), ?outcome, "dry run");
            return Ok(outcome);
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        match policy {
            WritePolicy::Overwrite => {
                fs::write(path, content).map_err(|e| GenerateError::io(path, e))?;
            }
            WritePolicy::CreateOnce => {
                let file = OpenOptions::new().write(true).create_new(true).open(path);
                let mut file = match file {
                    Ok(file) => file,
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                        warn!(path = %path.display(), "keeping existing file");
                        return Ok(WriteOutcome::Skipped);
                    }
                    Err(e) => return Err(GenerateError::io(path, e)),
                };
                file.write_all(content.as_bytes())
                    .map_err(|e| GenerateError::io(path, e))?;
            }
        }
        info!(path = %path.display(), bytes = content.len(), "wrote artifact");
        Ok(WriteOutcome::Written)
    }
}
