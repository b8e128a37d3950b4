//! Project layout and the generation entry points.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::analysis::{analyze_usecase, AnalysisRequest, UsecaseAnalysis};
use super::kinds::{ArtifactKind, Layer, WritePolicy, EXCEPTION_FILE};
use super::materialize::{Materializer, WriteOutcome};
use super::naming::{derive_service_name, EntityDescriptor, ModuleContext};
use super::operations::OperationKind;
use super::planner::{next_kind, NextStep};
use super::report::{GenerationReport, RecordKind};
use super::schema::ErrorKind;
use super::scripts::{default_endpoints, postman_collection, render_curl_script, Scenario};
use super::templates::{render_artifact, render_exceptions, RenderRequest};
use super::tracking::{apply_tracking_update, CompletedTask, NewTask};
use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult};

/// Where services and modules live under a project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    config: GeneratorConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: GeneratorConfig) -> Self {
        ProjectLayout {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn services_root(&self) -> PathBuf {
        self.root.join(&self.config.services_dir)
    }

    pub fn service_dir(&self, service: &str) -> PathBuf {
        self.services_root().join(service)
    }

    pub fn module_dir(&self, service: &str, module: &str) -> PathBuf {
        self.service_dir(service)
            .join(&self.config.source_dir)
            .join(module)
    }

    /// Service directories carrying the configured prefix, sorted.
    pub fn available_services(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.services_root()) else {
            return Vec::new();
        };
        let mut services: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| name.starts_with(&self.config.service_prefix))
            .collect();
        services.sort();
        services
    }

    pub fn require_service(&self, service: &str) -> GenerateResult<PathBuf> {
        let dir = self.service_dir(service);
        if dir.is_dir() {
            return Ok(dir);
        }
        let available = self.available_services();
        let suggestion = if available.is_empty() {
            format!("No services found under {}.", self.services_root().display())
        } else {
            format!("Available services: {}.", available.join(", "))
        };
        Err(GenerateError::not_found(
            format!("service {service}"),
            suggestion,
        ))
    }

    pub fn require_module(&self, service: &str, module: &str) -> GenerateResult<PathBuf> {
        self.require_service(service)?;
        let dir = self.module_dir(service, module);
        if dir.is_dir() {
            return Ok(dir);
        }
        Err(GenerateError::not_found(
            format!("module {module}"),
            format!("Run `hexgen add-module --service {service} --module {module}` first."),
        ))
    }

    pub fn module_context(&self, service: &str, module: &str) -> ModuleContext {
        ModuleContext {
            service_path: service.to_string(),
            service_name: derive_service_name(
                service,
                &self.config.service_prefix,
                &self.config.service_suffix,
            ),
            module_name: module.to_string(),
            source_dir: self.config.source_dir.clone(),
            shared_import_root: self.config.shared_import_root.clone(),
        }
    }
}

/// Names become path segments, so they must not contain separators or `..`.
fn require_name(field: &str, value: &str) -> GenerateResult<()> {
    if value.trim().is_empty() {
        return Err(GenerateError::contract(format!("{field} must not be empty")));
    }
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(GenerateError::contract(format!(
            "{field} '{value}' must be a plain name without path separators or '..'"
        )));
    }
    Ok(())
}

/// Hint for an existing errors.go that lacks the error block of `entity`.
fn missing_error_block(module_dir: &Path, entity: &EntityDescriptor) -> Option<String> {
    let declared = fs::read_to_string(module_dir.join(EXCEPTION_FILE)).ok()?;
    let ident = ErrorKind::NotFound.ident(&entity.class_form);
    if declared.contains(&ident) {
        return None;
    }
    Some(format!(
        "{EXCEPTION_FILE} was kept and does not declare {ident}; add the Err{}* errors by hand",
        entity.class_form
    ))
}

#[derive(Debug, Clone, Default)]
pub struct ModuleRequest {
    pub service: String,
    pub module: String,
    pub entities: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ComponentRequest {
    pub service: String,
    pub module: String,
    pub kind: ArtifactKind,
    pub entity: String,
    pub operation: Option<OperationKind>,
    pub business_rules: Vec<String>,
    /// Recorded for the caller; rendering does not depend on it
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentOutcome {
    pub report: GenerationReport,
    pub next: NextStep,
}

#[derive(Debug, Clone)]
pub struct ScriptRequest {
    pub service: String,
    pub module: String,
    pub entity: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptOutcome {
    pub report: GenerationReport,
    pub port: u16,
    pub directory: PathBuf,
}

/// Renders and materializes artifacts into a project.
#[derive(Debug, Clone)]
pub struct Generator {
    layout: ProjectLayout,
    materializer: Materializer,
}

impl Generator {
    pub fn new(layout: ProjectLayout, dry_run: bool) -> Self {
        Generator {
            layout,
            materializer: Materializer::new(dry_run),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    fn dir_outcome(&self) -> WriteOutcome {
        if self.materializer.is_dry_run() {
            WriteOutcome::Planned
        } else {
            WriteOutcome::Written
        }
    }

    /// Scaffold a module: layer directories, entity/port/repository per
    /// entity, then the shared exception file and the controller, both
    /// create-once.
    ///
    /// Files written before a failure are kept.
    pub fn add_module(&self, req: &ModuleRequest) -> GenerateResult<GenerationReport> {
        require_name("service", &req.service)?;
        require_name("module", &req.module)?;
        for entity in &req.entities {
            require_name("entity", entity)?;
        }
        self.layout.require_service(&req.service)?;

        let module_dir = self.layout.module_dir(&req.service, &req.module);
        let ctx = self.layout.module_context(&req.service, &req.module);
        debug!(service = %ctx.service_name, module = %ctx.module_name, "derived module context");

        let mut report = GenerationReport::new();
        for layer in Layer::SCAFFOLD {
            let dir = module_dir.join(layer.rel_dir());
            self.materializer.ensure_dir(&dir)?;
            report.push(RecordKind::Directory, dir, self.dir_outcome());
        }

        let entities: Vec<EntityDescriptor> = req
            .entities
            .iter()
            .map(|raw| EntityDescriptor::derive(raw))
            .collect();
        for entity in &entities {
            debug!(entity = %entity.name, class = %entity.class_form, "derived entity names");
            for kind in [ArtifactKind::Entity, ArtifactKind::Port, ArtifactKind::Repository] {
                self.materialize_kind(&mut report, &module_dir, kind, entity, &ctx, None, &[])?;
            }
        }

        // Module-level artifacts are named after the first entity, or the
        // module itself when it was scaffolded empty.
        let owners = if entities.is_empty() {
            vec![EntityDescriptor::derive(&req.module)]
        } else {
            entities
        };
        let exceptions = render_exceptions(&owners)?;
        let exception_path = module_dir.join(EXCEPTION_FILE);
        let outcome = self
            .materializer
            .write(WritePolicy::CreateOnce, &exception_path, &exceptions)?;
        report.push(RecordKind::Exception, exception_path, outcome);
        if outcome == WriteOutcome::Skipped {
            for owner in &owners {
                if let Some(hint) = missing_error_block(&module_dir, owner) {
                    warn!(entity = %owner.name, "{hint}");
                    report.note(hint);
                }
            }
        }

        if let Some(owner) = owners.first() {
            self.materialize_kind(
                &mut report,
                &module_dir,
                ArtifactKind::Controller,
                owner,
                &ctx,
                None,
                &[],
            )?;
        }

        info!(
            service = %req.service,
            module = %req.module,
            entities = req.entities.len(),
            "module scaffolded"
        );
        Ok(report)
    }

    /// Render and write one artifact, then report the suggested next step.
    pub fn generate_component(&self, req: &ComponentRequest) -> GenerateResult<ComponentOutcome> {
        require_name("service", &req.service)?;
        require_name("module", &req.module)?;
        require_name("entity", &req.entity)?;
        req.kind.require_operation(req.operation)?;
        let module_dir = self.layout.require_module(&req.service, &req.module)?;

        let ctx = self.layout.module_context(&req.service, &req.module);
        let entity = EntityDescriptor::derive(&req.entity);
        if !req.dependencies.is_empty() {
            debug!(dependencies = ?req.dependencies, "component dependencies");
        }

        let mut report = GenerationReport::new();
        let content = self.materialize_kind(
            &mut report,
            &module_dir,
            req.kind,
            &entity,
            &ctx,
            req.operation,
            &req.business_rules,
        )?;
        if content.contains("exception.Err") {
            if let Some(hint) = missing_error_block(&module_dir, &entity) {
                warn!(entity = %entity.name, "{hint}");
                report.note(hint);
            }
        }
        Ok(ComponentOutcome {
            report,
            next: next_kind(req.kind),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn materialize_kind(
        &self,
        report: &mut GenerationReport,
        module_dir: &Path,
        kind: ArtifactKind,
        entity: &EntityDescriptor,
        ctx: &ModuleContext,
        operation: Option<OperationKind>,
        business_rules: &[String],
    ) -> GenerateResult<String> {
        let content = render_artifact(&RenderRequest {
            kind,
            entity,
            module: ctx,
            operation,
            business_rules,
        })?;
        let path = module_dir.join(kind.relative_path(entity, operation)?);
        let outcome = self.materializer.write(kind.policy(), &path, &content)?;
        report.push(RecordKind::Artifact(kind), path, outcome);
        Ok(content)
    }

    /// Analyze a use-case description for an existing service.
    pub fn analyze(&self, req: &AnalysisRequest<'_>) -> GenerateResult<UsecaseAnalysis> {
        require_name("service", req.service)?;
        require_name("module", req.module)?;
        self.layout.require_service(req.service)?;
        let analysis = analyze_usecase(req);
        debug!(
            operations = analysis.operations.len(),
            entities = ?analysis.entities,
            "analyzed use case"
        );
        Ok(analysis)
    }

    /// Write the curl script and Postman collection for an entity's endpoints.
    pub fn generate_integration_scripts(&self, req: &ScriptRequest) -> GenerateResult<ScriptOutcome> {
        require_name("service", &req.service)?;
        require_name("module", &req.module)?;
        require_name("entity", &req.entity)?;
        let service_dir = self.layout.require_service(&req.service)?;

        let entity = EntityDescriptor::derive(&req.entity);
        let port = self.layout.config().port_for(&req.service);
        let scenarios = if req.scenarios.is_empty() {
            Scenario::ALL.to_vec()
        } else {
            req.scenarios.clone()
        };
        let endpoints = default_endpoints(&entity);

        let directory = service_dir
            .join("scripts")
            .join("integration")
            .join(&req.module);
        self.materializer.ensure_dir(&directory)?;

        let mut report = GenerationReport::new();
        let curl = render_curl_script(&entity, &req.module, port, &scenarios)?;
        let curl_path = directory.join(format!("{}_curl.sh", entity.name));
        let outcome = self
            .materializer
            .write(WritePolicy::Overwrite, &curl_path, &curl)?;
        if outcome == WriteOutcome::Written {
            make_executable(&curl_path)?;
        }
        report.push(RecordKind::CurlScript, curl_path, outcome);

        let collection = postman_collection(&req.service, &req.module, &entity, port, &endpoints);
        let mut json = serde_json::to_string_pretty(&collection)?;
        json.push('\n');
        let postman_path = directory.join(format!("{}_postman.json", entity.name));
        let outcome = self
            .materializer
            .write(WritePolicy::Overwrite, &postman_path, &json)?;
        report.push(RecordKind::PostmanCollection, postman_path, outcome);

        info!(service = %req.service, port, "integration scripts exported");
        Ok(ScriptOutcome {
            report,
            port,
            directory,
        })
    }

    /// Record completed and new tasks in the tracking document.
    ///
    /// `file` is relative to the project root and defaults to the configured
    /// tracking file. The document is created with its section headings when
    /// absent.
    pub fn update_tracking(
        &self,
        file: Option<&str>,
        completed: &[CompletedTask],
        new_tasks: &[NewTask],
        today: NaiveDate,
    ) -> GenerateResult<GenerationReport> {
        if completed.is_empty() && new_tasks.is_empty() {
            return Err(GenerateError::contract(
                "nothing to record: pass at least one completed or new task",
            ));
        }
        let path = self
            .layout
            .root()
            .join(file.unwrap_or(&self.layout.config().tracking_file));
        let current = match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(GenerateError::io(&path, e)),
        };

        let updated = apply_tracking_update(current.as_deref(), completed, new_tasks, today);
        let outcome = self
            .materializer
            .write(WritePolicy::Overwrite, &path, &updated)?;

        let mut report = GenerationReport::new();
        report.push(RecordKind::TrackingDocument, path, outcome);
        Ok(report)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> GenerateResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .map_err(|e| GenerateError::io(path, e))?
        .permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).map_err(|e| GenerateError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> GenerateResult<()> {
    Ok(())
}
