//! Service inventory of a project.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use super::project::ProjectLayout;
use crate::error::{GenerateError, GenerateResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Has a `go.mod`
    Go,
    /// Has a `package.json`
    NodeJs,
    Unknown,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceKind::Go => "Go",
            ServiceKind::NodeJs => "Node.js",
            ServiceKind::Unknown => "Unknown",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub kind: ServiceKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatus {
    pub root: PathBuf,
    pub services_root: PathBuf,
    pub services: Vec<ServiceStatus>,
}

/// List every service directory, sorted by name, with its detected kind.
pub fn project_status(layout: &ProjectLayout) -> GenerateResult<ProjectStatus> {
    let services_root = layout.services_root();
    if !services_root.is_dir() {
        return Err(GenerateError::not_found(
            format!("services directory {}", services_root.display()),
            "Pass --root pointing at the project or set services_dir in hexgen.toml.",
        ));
    }

    let entries = fs::read_dir(&services_root).map_err(|e| GenerateError::io(&services_root, e))?;
    let mut services = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GenerateError::io(&services_root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let kind = if path.join("go.mod").exists() {
            ServiceKind::Go
        } else if path.join("package.json").exists() {
            ServiceKind::NodeJs
        } else {
            ServiceKind::Unknown
        };
        services.push(ServiceStatus {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }
    services.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(ProjectStatus {
        root: layout.root().to_path_buf(),
        services_root,
        services,
    })
}
