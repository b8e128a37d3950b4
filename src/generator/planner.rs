//! Component dependency graph.
//!
//! The order is advisory: [`next_kind`] suggests what to generate next but
//! never blocks generation of any kind.

use std::fmt;

use serde::Serialize;

use super::kinds::ArtifactKind;

/// The step that naturally follows a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Kind(ArtifactKind),
    /// Export curl and Postman scripts for the finished module
    IntegrationScripts,
    /// Off the primary chain: review the roadmap
    Roadmap,
}

/// entity → port → repository → usecase → request → response → mapper →
/// controller → integration_test
pub const PRIMARY_CHAIN: [ArtifactKind; 9] = [
    ArtifactKind::Entity,
    ArtifactKind::Port,
    ArtifactKind::Repository,
    ArtifactKind::Usecase,
    ArtifactKind::Request,
    ArtifactKind::Response,
    ArtifactKind::Mapper,
    ArtifactKind::Controller,
    ArtifactKind::IntegrationTest,
];

/// Total over [`ArtifactKind`]: every kind has exactly one next step.
pub const fn next_kind(kind: ArtifactKind) -> NextStep {
    match kind {
        ArtifactKind::Entity => NextStep::Kind(ArtifactKind::Port),
        ArtifactKind::Port => NextStep::Kind(ArtifactKind::Repository),
        ArtifactKind::Repository => NextStep::Kind(ArtifactKind::Usecase),
        ArtifactKind::Usecase => NextStep::Kind(ArtifactKind::Request),
        ArtifactKind::Request => NextStep::Kind(ArtifactKind::Response),
        ArtifactKind::Response => NextStep::Kind(ArtifactKind::Mapper),
        ArtifactKind::Mapper => NextStep::Kind(ArtifactKind::Controller),
        ArtifactKind::Controller => NextStep::Kind(ArtifactKind::IntegrationTest),
        ArtifactKind::IntegrationTest => NextStep::IntegrationScripts,
        ArtifactKind::CriteriaBuilder | ArtifactKind::ObjectMother => NextStep::Roadmap,
    }
}

/// Kinds that sit outside the primary chain.
pub fn is_auxiliary(kind: ArtifactKind) -> bool {
    !PRIMARY_CHAIN.contains(&kind)
}

impl NextStep {
    /// Human suggestion printed after a component is generated.
    pub fn suggestion(self) -> String {
        match self {
            NextStep::Kind(ArtifactKind::Port) => {
                "generate the repository port (--kind port)".to_string()
            }
            NextStep::Kind(ArtifactKind::Repository) => {
                "implement the PostgreSQL repository (--kind repository)".to_string()
            }
            NextStep::Kind(ArtifactKind::Usecase) => {
                "write the use cases (--kind usecase --operation <op>)".to_string()
            }
            NextStep::Kind(ArtifactKind::Request) => {
                "generate the request DTO (--kind request --operation <op>)".to_string()
            }
            NextStep::Kind(ArtifactKind::Response) => {
                "generate the matching response DTO (--kind response --operation <op>)".to_string()
            }
            NextStep::Kind(ArtifactKind::Mapper) => {
                "add the entity to response mapper (--kind mapper)".to_string()
            }
            NextStep::Kind(ArtifactKind::Controller) => {
                "wire the HTTP controller (--kind controller)".to_string()
            }
            NextStep::Kind(ArtifactKind::IntegrationTest) => {
                "cover the repository with an integration test (--kind integration_test)"
                    .to_string()
            }
            NextStep::Kind(kind) => format!("generate the {kind} (--kind {kind})"),
            NextStep::IntegrationScripts => {
                "export curl and Postman scripts (hexgen scripts)".to_string()
            }
            NextStep::Roadmap => "review the full roadmap (hexgen roadmap)".to_string(),
        }
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::Kind(kind) => write!(f, "{kind}"),
            NextStep::IntegrationScripts => f.write_str("integration_scripts"),
            NextStep::Roadmap => f.write_str("roadmap"),
        }
    }
}
