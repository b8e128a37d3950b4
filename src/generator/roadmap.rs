//! Workflow roadmap planner.
//!
//! Pure and side-effect free: a plan is a function of its four inputs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::operations::OperationKind;
use crate::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    CrudComplete,
    BusinessFlow,
    IntegrationFlow,
    Custom,
}

impl WorkflowType {
    pub const ALL: [WorkflowType; 4] = [
        WorkflowType::CrudComplete,
        WorkflowType::BusinessFlow,
        WorkflowType::IntegrationFlow,
        WorkflowType::Custom,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            WorkflowType::CrudComplete => "crud_complete",
            WorkflowType::BusinessFlow => "business_flow",
            WorkflowType::IntegrationFlow => "integration_flow",
            WorkflowType::Custom => "custom",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            WorkflowType::CrudComplete => "Complete CRUD",
            WorkflowType::BusinessFlow => "Business flow",
            WorkflowType::IntegrationFlow => "Integration flow",
            WorkflowType::Custom => "Custom flow",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            WorkflowType::CrudComplete => "Create, read, update, delete and list end to end",
            WorkflowType::BusinessFlow => "A specific business flow with its validations",
            WorkflowType::IntegrationFlow => "Integration with external services",
            WorkflowType::Custom => "Tailored to the stated requirements",
        }
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WorkflowType {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        WorkflowType::ALL
            .into_iter()
            .find(|w| w.key() == key)
            .ok_or_else(|| {
                GenerateError::contract(format!(
                    "unknown workflow '{s}' (expected crud_complete, business_flow, integration_flow or custom)"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl Complexity {
    /// Time multiplier in tenths (0.7, 1.0, 1.5), kept integral so rounding is exact.
    pub const fn multiplier_tenths(self) -> u32 {
        match self {
            Complexity::Simple => 7,
            Complexity::Medium => 10,
            Complexity::Complex => 15,
        }
    }

    pub fn multiplier(self) -> f64 {
        f64::from(self.multiplier_tenths()) / 10.0
    }

    pub const fn key(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Complexity {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Complexity::Simple),
            "medium" => Ok(Complexity::Medium),
            "complex" => Ok(Complexity::Complex),
            other => Err(GenerateError::contract(format!(
                "unknown complexity '{other}' (expected simple, medium or complex)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub number: u8,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Phase {
    pub fn minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.estimated_minutes).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub after_phase: u8,
    pub name: String,
    pub validation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapPlan {
    pub workflow: WorkflowType,
    pub workflow_name: String,
    pub workflow_description: String,
    pub entity: String,
    pub operations: Vec<OperationKind>,
    pub complexity: Complexity,
    pub phases: Vec<Phase>,
    pub checkpoints: Vec<Checkpoint>,
    pub total_minutes: u32,
}

/// Operations planned when the caller names none.
pub const DEFAULT_ROADMAP_OPERATIONS: [OperationKind; 5] = [
    OperationKind::Create,
    OperationKind::Get,
    OperationKind::Update,
    OperationKind::Delete,
    OperationKind::List,
];

const APPLICATION_TASK_MINUTES: u32 = 15;

fn task(
    id: &str,
    name: impl Into<String>,
    description: impl Into<String>,
    minutes: u32,
    priority: Priority,
) -> Task {
    Task {
        id: id.to_string(),
        name: name.into(),
        description: description.into(),
        estimated_minutes: minutes,
        priority,
    }
}

fn unique_operations(operations: &[OperationKind]) -> Vec<OperationKind> {
    let mut unique = Vec::with_capacity(operations.len());
    for op in operations {
        if !unique.contains(op) {
            unique.push(*op);
        }
    }
    unique
}

/// Build the phased roadmap for one entity.
///
/// `total_minutes` is the sum of every task estimate scaled by the
/// complexity multiplier and rounded to the nearest minute. `operations` is
/// treated as a set: repeats are dropped, first occurrence wins. The
/// application phase is omitted when it is empty.
pub fn plan(
    workflow: WorkflowType,
    entity: &str,
    operations: &[OperationKind],
    complexity: Complexity,
) -> RoadmapPlan {
    use Priority::{High, Medium};

    let operations = unique_operations(operations);
    let mut phases = vec![
        Phase {
            number: 1,
            name: "Preparation and analysis".to_string(),
            tasks: vec![
                task(
                    "prep-1",
                    "Analyse business requirements",
                    format!("Define the expected behaviour of {entity}"),
                    10,
                    High,
                ),
                task(
                    "prep-2",
                    "Design the data structure",
                    "Fields, relations and constraints",
                    15,
                    High,
                ),
                task("prep-3", "Identify validations", "List every business rule", 10, Medium),
            ],
        },
        Phase {
            number: 2,
            name: "Domain layer".to_string(),
            tasks: vec![
                task(
                    "domain-1",
                    format!("Create the {entity} entity"),
                    "Entity with fields and business methods",
                    20,
                    High,
                ),
                task(
                    "domain-2",
                    "Define the repository port",
                    "Interface with the required methods",
                    10,
                    High,
                ),
                task("domain-3", "Create domain errors", "Business specific errors", 10, Medium),
            ],
        },
    ];

    if !operations.is_empty() {
        phases.push(Phase {
            number: 3,
            name: "Application layer".to_string(),
            tasks: operations
                .iter()
                .map(|op| Task {
                    id: format!("app-{op}"),
                    name: format!("Implement the {op} use case"),
                    description: format!("Business logic to {op} {entity}"),
                    estimated_minutes: APPLICATION_TASK_MINUTES,
                    priority: High,
                })
                .collect(),
        });
    }

    phases.push(Phase {
        number: 4,
        name: "Infrastructure layer".to_string(),
        tasks: vec![
            task(
                "infra-1",
                "Implement the PostgreSQL repository",
                "Full CRUD with SQL queries",
                30,
                High,
            ),
            task(
                "infra-2",
                "Create the HTTP controller",
                "REST endpoints with validation",
                25,
                High,
            ),
            task("infra-3", "Implement DTOs", "Requests and responses with mappers", 20, Medium),
        ],
    });
    phases.push(Phase {
        number: 5,
        name: "Integration and testing".to_string(),
        tasks: vec![
            task("test-1", "Write SQL migrations", "Tables and indexes", 15, High),
            task("test-2", "Write unit tests", "Use cases and entities", 30, Medium),
            task("test-3", "Register the module", "Wire the module into main.go", 10, High),
            task("test-4", "Exercise the endpoints", "Manual run with curl or Postman", 15, Medium),
        ],
    });

    let checkpoints = vec![
        Checkpoint {
            after_phase: 2,
            name: "Domain complete".to_string(),
            validation: "Entity created, repository defined, errors declared".to_string(),
        },
        Checkpoint {
            after_phase: 3,
            name: "Business logic ready".to_string(),
            validation: "Every use case implemented and tested".to_string(),
        },
        Checkpoint {
            after_phase: 5,
            name: "Module functional".to_string(),
            validation: "Endpoints respond and data persists".to_string(),
        },
    ];

    let base: u32 = phases.iter().map(Phase::minutes).sum();
    // round half up
    let total_minutes = (base * complexity.multiplier_tenths() + 5) / 10;

    RoadmapPlan {
        workflow,
        workflow_name: workflow.display_name().to_string(),
        workflow_description: workflow.description().to_string(),
        entity: entity.to_string(),
        operations,
        complexity,
        phases,
        checkpoints,
        total_minutes,
    }
}
