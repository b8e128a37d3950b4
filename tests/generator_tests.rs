#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use hexgen::config::GeneratorConfig;
use hexgen::generator::{
    ArtifactKind, CompletedTask, ComponentRequest, Generator, Layer, ModuleRequest, NewTask,
    NextStep, OperationKind, ProjectLayout, RecordKind, Scenario, ScriptRequest, WriteOutcome,
    EXCEPTION_FILE,
};
use hexgen::GenerateError;
use tempfile::TempDir;

const SERVICE: &str = "saas-mt-pim-service";

fn project() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let service = dir.path().join("services").join(SERVICE);
    fs::create_dir_all(&service).unwrap();
    (dir, service)
}

fn generator(root: &Path, dry_run: bool) -> Generator {
    Generator::new(ProjectLayout::new(root, GeneratorConfig::default()), dry_run)
}

fn module_request(entities: &[&str]) -> ModuleRequest {
    ModuleRequest {
        service: SERVICE.to_string(),
        module: "catalog".to_string(),
        entities: entities.iter().map(|e| e.to_string()).collect(),
    }
}

fn component(kind: ArtifactKind, operation: Option<OperationKind>) -> ComponentRequest {
    ComponentRequest {
        service: SERVICE.to_string(),
        module: "catalog".to_string(),
        kind,
        entity: "product".to_string(),
        operation,
        business_rules: Vec::new(),
        dependencies: Vec::new(),
    }
}

#[test]
fn test_add_module_creates_layers_and_base_artifacts() {
    let (dir, service) = project();
    let report = generator(dir.path(), false)
        .add_module(&module_request(&["product"]))
        .unwrap();

    let module = service.join("src").join("catalog");
    for layer in Layer::SCAFFOLD {
        assert!(module.join(layer.rel_dir()).is_dir(), "{}", layer.rel_dir());
    }
    for file in [
        "domain/entity/product.go",
        "domain/port/product_repository.go",
        "infrastructure/persistence/repository/product_postgres_repository.go",
        EXCEPTION_FILE,
        "infrastructure/controller/http_handler.go",
    ] {
        assert!(module.join(file).is_file(), "{file}");
    }

    let files: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.kind != RecordKind::Directory)
        .collect();
    assert_eq!(files.len(), 5);
    assert!(files.iter().all(|r| r.outcome == WriteOutcome::Written));

    let entity = fs::read_to_string(module.join("domain/entity/product.go")).unwrap();
    assert!(entity.starts_with("package entity\n"));
    assert!(entity.contains("func NewProduct(tenantID, name string) (*Product, error) {"));
}

#[test]
fn test_rerun_keeps_module_shared_files() {
    let (dir, service) = project();
    let gen = generator(dir.path(), false);
    gen.add_module(&module_request(&["product"])).unwrap();

    let module = service.join("src").join("catalog");
    let controller = module.join("infrastructure/controller/http_handler.go");
    let exceptions = module.join(EXCEPTION_FILE);
    let entity = module.join("domain/entity/product.go");
    fs::write(&controller, "// hand written\n").unwrap();
    fs::write(&exceptions, "// hand written\n").unwrap();
    fs::write(&entity, "// stale\n").unwrap();

    let report = gen.add_module(&module_request(&["product"])).unwrap();

    assert_eq!(fs::read_to_string(&controller).unwrap(), "// hand written\n");
    assert_eq!(fs::read_to_string(&exceptions).unwrap(), "// hand written\n");
    // entity-scoped artifacts are regenerated
    assert!(fs::read_to_string(&entity).unwrap().starts_with("package entity"));

    let skipped: Vec<&Path> = report.skipped().map(|r| r.path.as_path()).collect();
    assert_eq!(skipped, vec![exceptions.as_path(), controller.as_path()]);
}

#[test]
fn test_empty_module_names_shared_files_after_the_module() {
    let (dir, service) = project();
    generator(dir.path(), false)
        .add_module(&module_request(&[]))
        .unwrap();

    let module = service.join("src").join("catalog");
    let exceptions = fs::read_to_string(module.join(EXCEPTION_FILE)).unwrap();
    assert!(exceptions.contains("ErrCatalogNotFound"));
    let controller =
        fs::read_to_string(module.join("infrastructure/controller/http_handler.go")).unwrap();
    assert!(controller.contains("type CatalogHandler struct"));
    assert!(!module.join("domain/entity").read_dir().unwrap().any(|_| true));
}

#[test]
fn test_exception_file_covers_every_entity() {
    let (dir, service) = project();
    generator(dir.path(), false)
        .add_module(&module_request(&["product", "variant"]))
        .unwrap();

    let exceptions =
        fs::read_to_string(service.join("src/catalog").join(EXCEPTION_FILE)).unwrap();
    assert!(exceptions.contains("ErrProductAlreadyExists"));
    assert!(exceptions.contains("ErrVariantDeleteFailed"));
}

#[test]
fn test_missing_service_is_target_not_found() {
    let (dir, _service) = project();
    let mut req = module_request(&["product"]);
    req.service = "saas-mt-billing-service".to_string();

    let err = generator(dir.path(), false).add_module(&req).unwrap_err();
    match err {
        GenerateError::TargetNotFound { target, suggestion } => {
            assert_eq!(target, "service saas-mt-billing-service");
            assert_eq!(suggestion, format!("Available services: {SERVICE}."));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("services/saas-mt-billing-service").exists());
}

#[test]
fn test_component_requires_a_scaffolded_module() {
    let (dir, _service) = project();
    let err = generator(dir.path(), false)
        .generate_component(&component(ArtifactKind::Mapper, None))
        .unwrap_err();
    assert!(matches!(err, GenerateError::TargetNotFound { .. }));
    assert!(err.to_string().contains("hexgen add-module"));
}

#[test]
fn test_component_writes_usecase_and_suggests_request() {
    let (dir, service) = project();
    let gen = generator(dir.path(), false);
    gen.add_module(&module_request(&["product"])).unwrap();

    let outcome = gen
        .generate_component(&component(ArtifactKind::Usecase, Some(OperationKind::Create)))
        .unwrap();

    let path = service.join("src/catalog/application/usecase/create_product.go");
    assert!(path.is_file());
    assert_eq!(outcome.report.records.len(), 1);
    assert_eq!(outcome.report.records[0].path, path);
    assert_eq!(outcome.next, NextStep::Kind(ArtifactKind::Request));

    let usecase = fs::read_to_string(path).unwrap();
    assert!(usecase.contains("\"pim/src/catalog/domain/port\""));
}

#[test]
fn test_component_without_operation_writes_nothing() {
    let (dir, service) = project();
    let gen = generator(dir.path(), false);
    gen.add_module(&module_request(&["product"])).unwrap();

    let err = gen
        .generate_component(&component(ArtifactKind::Response, None))
        .unwrap_err();
    assert!(matches!(err, GenerateError::InputContractViolation { .. }));
    let responses = service.join("src/catalog/application/response");
    assert_eq!(fs::read_dir(responses).unwrap().count(), 0);
}

#[test]
fn test_dry_run_touches_nothing() {
    let (dir, service) = project();
    let report = generator(dir.path(), true)
        .add_module(&module_request(&["product"]))
        .unwrap();

    assert!(!service.join("src").exists());
    assert!(report
        .records
        .iter()
        .all(|r| r.outcome == WriteOutcome::Planned));
    assert_eq!(report.records.len(), Layer::SCAFFOLD.len() + 5);
}

#[test]
fn test_dry_run_reports_existing_shared_files_as_kept() {
    let (dir, service) = project();
    generator(dir.path(), false)
        .add_module(&module_request(&["product"]))
        .unwrap();
    let entity = service.join("src/catalog/domain/entity/product.go");
    fs::write(&entity, "// edited\n").unwrap();

    let report = generator(dir.path(), true)
        .add_module(&module_request(&["product"]))
        .unwrap();
    assert_eq!(report.skipped().count(), 2);
    assert_eq!(fs::read_to_string(entity).unwrap(), "// edited\n");
}

#[test]
fn test_integration_scripts_are_exported() {
    let (dir, service) = project();
    let outcome = generator(dir.path(), false)
        .generate_integration_scripts(&ScriptRequest {
            service: SERVICE.to_string(),
            module: "catalog".to_string(),
            entity: "product".to_string(),
            scenarios: vec![Scenario::HappyPath, Scenario::NotFound],
        })
        .unwrap();

    assert_eq!(outcome.port, 8090);
    let scripts = service.join("scripts/integration/catalog");
    assert_eq!(outcome.directory, scripts);

    let curl = fs::read_to_string(scripts.join("product_curl.sh")).unwrap();
    assert!(curl.starts_with("#!/usr/bin/env bash"));
    assert!(curl.contains("http://localhost:8090"));

    let postman = fs::read_to_string(scripts.join("product_postman.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&postman).unwrap();
    assert_eq!(value["variable"][0]["value"], "http://localhost:8090");
    assert_eq!(value["item"].as_array().unwrap().len(), 5);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(scripts.join("product_curl.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn test_tracking_document_is_created_then_extended() {
    let (dir, _service) = project();
    let gen = generator(dir.path(), false);
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    let done: Vec<CompletedTask> = vec!["Product entity:entity".parse().unwrap()];
    gen.update_tracking(None, &done, &[], date).unwrap();

    let path = dir.path().join("documentation/PROJECT_TRACKING.md");
    let first = fs::read_to_string(&path).unwrap();
    assert!(first.contains("- [x] **Product entity** (2024-03-01)"));

    let todo: Vec<NewTask> = vec!["Stock sync:high:2h:pull levels nightly".parse().unwrap()];
    gen.update_tracking(None, &[], &todo, date).unwrap();

    let second = fs::read_to_string(&path).unwrap();
    assert!(second.contains("- [x] **Product entity** (2024-03-01)"));
    assert!(second.contains("- [ ] **Stock sync** (priority: high)"));
    assert_eq!(second.matches("### 2024-03-01 - Update").count(), 2);
}

#[test]
fn test_tracking_without_tasks_is_rejected() {
    let (dir, _service) = project();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let err = generator(dir.path(), false)
        .update_tracking(Some("TRACKING.md"), &[], &[], date)
        .unwrap_err();
    assert!(matches!(err, GenerateError::InputContractViolation { .. }));
    assert!(!dir.path().join("TRACKING.md").exists());
}

#[test]
fn test_kept_errors_file_reports_missing_entity_block() {
    let (dir, _service) = project();
    let gen = generator(dir.path(), false);
    let first = gen.add_module(&module_request(&["product"])).unwrap();
    assert!(first.notes.is_empty());

    let second = gen.add_module(&module_request(&["order"])).unwrap();
    assert_eq!(second.notes.len(), 1);
    assert!(second.notes[0].contains("ErrOrderNotFound"));

    let mut req = component(ArtifactKind::Repository, None);
    req.entity = "order".to_string();
    let outcome = gen.generate_component(&req).unwrap();
    assert_eq!(outcome.report.notes.len(), 1);
    assert!(outcome.report.notes[0].contains("add the ErrOrder* errors by hand"));

    // product is declared, and the mapper references no errors
    let repo = gen
        .generate_component(&component(ArtifactKind::Repository, None))
        .unwrap();
    assert!(repo.report.notes.is_empty());
    let mut mapper = component(ArtifactKind::Mapper, None);
    mapper.entity = "order".to_string();
    assert!(gen.generate_component(&mapper).unwrap().report.notes.is_empty());
}

#[test]
fn test_names_with_path_segments_are_rejected() {
    let (dir, service) = project();
    let gen = generator(dir.path(), false);
    for entity in ["../../../../../escaped", "nested/product", "back\\slash", ".."] {
        let err = gen.add_module(&module_request(&[entity])).unwrap_err();
        assert!(
            matches!(err, GenerateError::InputContractViolation { .. }),
            "{entity}: {err}"
        );
    }
    let mut req = module_request(&["product"]);
    req.module = "../catalog".to_string();
    assert!(matches!(
        gen.add_module(&req).unwrap_err(),
        GenerateError::InputContractViolation { .. }
    ));
    assert!(!service.join("src").exists());
    assert!(!dir.path().join("escaped").exists());
}
