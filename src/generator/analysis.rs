//! Free-text use-case analysis.
//!
//! Detects operations and entities from an English or Spanish description
//! and lays out the components and implementation steps a module needs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::naming::class_form;
use super::operations::OperationKind;

/// Keyword stems per operation, in detection order.
static OPERATION_KEYWORDS: Lazy<Vec<(OperationKind, Regex)>> = Lazy::new(|| {
    [
        (OperationKind::Create, r"(?i)\b(?:create|crear)"),
        (OperationKind::Update, r"(?i)\b(?:update|actualizar)"),
        (OperationKind::Delete, r"(?i)\b(?:delete|eliminar)"),
        (OperationKind::List, r"(?i)\b(?:list|search|listar|buscar)"),
        (OperationKind::Get, r"(?i)\b(?:get|obtener)"),
    ]
    .into_iter()
    .map(|(op, pattern)| (op, Regex::new(pattern).expect("operation keyword regex should be valid")))
    .collect()
});

/// Bilingual entity vocabulary, normalised to the English base form.
static ENTITY_VOCABULARY: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("category", r"(?i)\b(?:categor(?:y|ies|ía|ia|ías|ias))"),
        ("product", r"(?i)\b(?:product|producto)"),
        ("user", r"(?i)\b(?:user|usuario)"),
        ("customer", r"(?i)\b(?:customer|cliente)"),
        ("order", r"(?i)\b(?:order|orden)"),
        ("invoice", r"(?i)\b(?:invoice|factura)"),
        ("inventory", r"(?i)\b(?:inventory|inventario)"),
        ("stock", r"(?i)\bstock"),
        ("attribute", r"(?i)\b(?:attribute|atributo)"),
        ("variant", r"(?i)\b(?:variant|variante)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("entity vocabulary regex should be valid")))
    .collect()
});

/// Planned when the description mentions no operation.
pub const DEFAULT_OPERATIONS: [OperationKind; 3] =
    [OperationKind::Create, OperationKind::Get, OperationKind::List];

#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub service: &'a str,
    pub module: &'a str,
    pub description: &'a str,
    pub business_rules: &'a [String],
    pub integration_points: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementationStep {
    pub number: u8,
    pub name: String,
    pub tasks: Vec<String>,
    pub estimated_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsecaseAnalysis {
    pub service: String,
    pub module: String,
    pub description: String,
    pub operations: Vec<OperationKind>,
    pub entities: Vec<String>,
    pub components: Vec<String>,
    pub steps: Vec<ImplementationStep>,
    pub total_minutes: u32,
    pub business_rules: Vec<String>,
    pub integration_points: Vec<String>,
}

impl UsecaseAnalysis {
    /// Entities to pass to module scaffolding; the module name when none were detected.
    pub fn scaffold_entities(&self) -> Vec<String> {
        if self.entities.is_empty() {
            vec![self.module.clone()]
        } else {
            self.entities.clone()
        }
    }
}

pub fn detect_operations(description: &str) -> Vec<OperationKind> {
    let found: Vec<OperationKind> = OPERATION_KEYWORDS
        .iter()
        .filter(|(_, re)| re.is_match(description))
        .map(|(op, _)| *op)
        .collect();
    if found.is_empty() {
        DEFAULT_OPERATIONS.to_vec()
    } else {
        found
    }
}

pub fn detect_entities(description: &str) -> Vec<String> {
    ENTITY_VOCABULARY
        .iter()
        .filter(|(_, re)| re.is_match(description))
        .map(|(name, _)| (*name).to_string())
        .collect()
}

fn step(number: u8, name: &str, tasks: Vec<String>, minutes: u32) -> ImplementationStep {
    ImplementationStep {
        number,
        name: name.to_string(),
        tasks,
        estimated_minutes: minutes,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn analyze_usecase(req: &AnalysisRequest<'_>) -> UsecaseAnalysis {
    let operations = detect_operations(req.description);
    let entities = detect_entities(req.description);
    let primary = class_form(entities.first().map_or(req.module, String::as_str));

    let mut components = Vec::new();
    for entity in &entities {
        components.push(format!("Entity: {}", class_form(entity)));
    }
    for entity in &entities {
        components.push(format!("Port: {}Repository", class_form(entity)));
    }
    for entity in &entities {
        components.push(format!("Repository: {}PostgresRepository", class_form(entity)));
    }
    for op in &operations {
        components.push(format!("UseCase: {}{primary}", op.class_form()));
    }
    for op in &operations {
        components.push(format!("Request: {}{primary}Request", op.class_form()));
    }
    for op in &operations {
        components.push(format!("Response: {}{primary}Response", op.class_form()));
    }
    components.push("Controller: HTTP handler with REST endpoints".to_string());
    components.push("Migrations: SQL tables for the entities".to_string());
    if !req.business_rules.is_empty() {
        components.push("Validators: business specific rules".to_string());
    }
    if !req.integration_points.is_empty() {
        components.push("Clients: integrations with other services".to_string());
    }

    let steps = vec![
        step(
            1,
            "Scaffold the module",
            strings(&["Run add-module to create the layout", "Check the created directories"]),
            5,
        ),
        step(
            2,
            "Define domain entities",
            strings(&["Add the required fields", "Add business methods", "Add basic validation"]),
            15,
        ),
        step(
            3,
            "Implement repositories",
            strings(&[
                "Complete the PostgreSQL repositories",
                "Add business specific queries",
                "Support criteria searches",
            ]),
            30,
        ),
        step(
            4,
            "Write use cases",
            operations.iter().map(|op| format!("Implement the {op} use case")).collect(),
            45,
        ),
        step(
            5,
            "Implement DTOs",
            strings(&["Request and response structs", "Binding validation", "Mappers"]),
            20,
        ),
        step(
            6,
            "Complete the HTTP controllers",
            strings(&["REST endpoints", "Connect the use cases", "Error handling"]),
            20,
        ),
        step(
            7,
            "Write migrations",
            strings(&["Table layout", "Required indexes", "Up and down scripts"]),
            15,
        ),
        step(
            8,
            "Integrate with the service",
            strings(&["Register the module in main.go", "Wire dependency injection", "Expose the routes"]),
            10,
        ),
        step(
            9,
            "Testing",
            strings(&["Unit tests", "Integration tests", "Manual endpoint checks"]),
            45,
        ),
    ];
    let total_minutes = steps.iter().map(|s| s.estimated_minutes).sum();

    UsecaseAnalysis {
        service: req.service.to_string(),
        module: req.module.to_string(),
        description: req.description.to_string(),
        operations,
        entities,
        components,
        steps,
        total_minutes,
        business_rules: req.business_rules.to_vec(),
        integration_points: req.integration_points.to_vec(),
    }
}

/// `3h 25min` or `45 minutes`.
pub fn format_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{minutes} minutes")
    }
}
