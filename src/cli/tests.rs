//! Unit tests for CLI commands

use std::fs;

use crate::cli::{execute, Cli, Commands, OutputFormat};
use crate::generator::{ArtifactKind, Complexity, OperationKind, Scenario, WorkflowType};
use clap::Parser;

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    execute(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_component_command_parses_typed_values() {
    let cli = Cli::try_parse_from([
        "hexgen",
        "component",
        "--service",
        "saas-mt-pim-service",
        "--module",
        "catalog",
        "--kind",
        "criteria-builder",
        "--entity",
        "product",
        "--operation",
        "read",
        "--rule",
        "name is unique",
    ])
    .unwrap();

    match cli.command {
        Commands::Component {
            kind,
            operation,
            rules,
            ..
        } => {
            assert_eq!(kind, ArtifactKind::CriteriaBuilder);
            assert_eq!(operation, Some(OperationKind::Get));
            assert_eq!(rules, vec!["name is unique".to_string()]);
        }
        _ => panic!("Expected Component command"),
    }
}

#[test]
fn test_unknown_kind_is_rejected_by_the_parser() {
    let result = Cli::try_parse_from([
        "hexgen", "component", "-s", "svc", "-m", "mod", "--kind", "widget", "-e", "product",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_roadmap_defaults() {
    let cli = Cli::try_parse_from([
        "hexgen",
        "roadmap",
        "--workflow",
        "crud_complete",
        "--entity",
        "product",
    ])
    .unwrap();
    assert_eq!(cli.format, OutputFormat::Text);
    match cli.command {
        Commands::Roadmap {
            workflow,
            operations,
            complexity,
            ..
        } => {
            assert_eq!(workflow, WorkflowType::CrudComplete);
            assert!(operations.is_empty());
            assert_eq!(complexity, Complexity::Medium);
        }
        _ => panic!("Expected Roadmap command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "hexgen",
        "scripts",
        "-s",
        "svc",
        "-m",
        "catalog",
        "-e",
        "product",
        "--scenario",
        "happy_path,not_found",
        "--dry-run",
        "--root",
        "/tmp/project",
    ])
    .unwrap();
    assert!(cli.dry_run);
    assert_eq!(cli.root.as_deref(), Some(std::path::Path::new("/tmp/project")));
    match cli.command {
        Commands::Scripts { scenarios, .. } => {
            assert_eq!(scenarios, vec![Scenario::HappyPath, Scenario::NotFound]);
        }
        _ => panic!("Expected Scripts command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["hexgen", "add-module", "-s", "svc", "-m", "catalog"],
        vec!["hexgen", "add-module", "-s", "svc", "-m", "catalog", "-e", "product,variant"],
        vec!["hexgen", "component", "-s", "svc", "-m", "catalog", "-k", "entity", "-e", "product"],
        vec!["hexgen", "roadmap", "-w", "custom", "-e", "product", "-o", "create,list"],
        vec!["hexgen", "analyze", "-s", "svc", "-m", "catalog", "-d", "create products"],
        vec!["hexgen", "status"],
        vec!["hexgen", "scripts", "-s", "svc", "-m", "catalog", "-e", "product"],
        vec!["hexgen", "track", "--done", "a:entity", "--todo", "b:high:1h"],
        vec!["hexgen", "next", "--kind", "mapper"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_malformed_track_entry_is_rejected() {
    let result = Cli::try_parse_from(["hexgen", "track", "--todo", "missing-fields"]);
    assert!(result.is_err());
}

#[test]
fn test_roadmap_text_output() {
    let out = run(&[
        "hexgen",
        "roadmap",
        "--workflow",
        "crud_complete",
        "--entity",
        "product",
        "--complexity",
        "complex",
    ])
    .unwrap();
    assert!(out.contains("Complete CRUD for product"));
    assert!(out.contains("Phase 3: Application layer (75 min)"));
    assert!(out.contains("(443 minutes, x1.5)"));
}

#[test]
fn test_roadmap_json_output() {
    let out = run(&[
        "hexgen", "roadmap", "-w", "business_flow", "-e", "order", "-c", "simple", "--format",
        "json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["workflow"], "business_flow");
    assert_eq!(value["total_minutes"], 207);
}

#[test]
fn test_next_command_needs_no_project() {
    let out = run(&["hexgen", "next", "--kind", "integration_test", "--root", "/nonexistent"]).unwrap();
    assert!(out.contains("hexgen scripts"));
}

#[test]
fn test_add_module_against_a_project() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("services/saas-mt-pim-service")).unwrap();
    let root = dir.path().to_str().unwrap();

    let out = run(&[
        "hexgen",
        "add-module",
        "--root",
        root,
        "-s",
        "saas-mt-pim-service",
        "-m",
        "catalog",
        "-e",
        "product",
    ])
    .unwrap();
    assert!(out.contains("✅ wrote services/saas-mt-pim-service/src/catalog/domain/entity/product.go"));
    assert!(out.contains("5 written, 0 kept, 0 planned"));
}

#[test]
fn test_missing_service_error_lists_available_ones() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("services/saas-mt-stock-service")).unwrap();
    let root = dir.path().to_str().unwrap();

    let err = run(&[
        "hexgen", "add-module", "--root", root, "-s", "saas-mt-pim-service", "-m", "catalog",
    ])
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to scaffold module catalog"));
    assert!(message.contains("Available services: saas-mt-stock-service."));
}

#[test]
fn test_status_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let go = dir.path().join("services/saas-mt-pim-service");
    fs::create_dir_all(&go).unwrap();
    fs::write(go.join("go.mod"), "module pim\n").unwrap();
    let root = dir.path().to_str().unwrap();

    let out = run(&["hexgen", "status", "--root", root, "--format", "yaml"]).unwrap();
    assert!(out.contains("name: saas-mt-pim-service"));
    assert!(out.contains("kind: go"));
}

#[test]
fn test_roadmap_alias_does_not_duplicate_tasks() {
    let out = run(&[
        "hexgen", "roadmap", "-w", "custom", "-e", "order", "-o", "read,get", "--format", "json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["operations"], serde_json::json!(["get"]));
    assert_eq!(value["total_minutes"], 235);
}

#[test]
fn test_kept_errors_file_prints_a_hint() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("services/saas-mt-pim-service")).unwrap();
    let root = dir.path().to_str().unwrap();
    let base = ["hexgen", "add-module", "--root", root, "-s", "saas-mt-pim-service", "-m", "catalog"];

    let with_entity = |entity: &'static str| {
        let mut args = base.to_vec();
        args.extend(["-e", entity]);
        args
    };

    run(&with_entity("product")).unwrap();
    let out = run(&with_entity("order")).unwrap();
    assert!(out.contains("⚠️  domain/exception/errors.go was kept and does not declare ErrOrderNotFound"));
}
