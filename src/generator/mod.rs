//! # Generator Module
//!
//! Emits the source artifacts of a hexagonal Go service module from a few
//! names: service, module, entity and, for some kinds, an operation.
//!
//! ## Overview
//!
//! A module is laid out in layers:
//!
//! ```text
//! services/{service}/src/{module}/
//! ├── domain/
//! │   ├── entity/                          # {entity}.go
//! │   ├── port/                            # {entity}_repository.go
//! │   ├── exception/                       # errors.go (create-once)
//! │   └── criteria/                        # {entity}_criteria.go
//! ├── application/
//! │   ├── usecase/                         # {op}_{entity}.go
//! │   ├── request/                         # {op}_{entity}_request.go
//! │   ├── response/                        # {op}_{entity}_response.go
//! │   └── mapper/                          # {entity}_mapper.go
//! ├── infrastructure/
//! │   ├── persistence/repository/          # {entity}_postgres_repository.go
//! │   └── controller/                      # http_handler.go (create-once)
//! └── test/
//!     ├── mother/                          # {entity}_mother.go
//!     └── integration/                     # {entity}_test.go
//! ```
//!
//! ## Architecture
//!
//! ```text
//! names → naming (EntityDescriptor, ModuleContext) → templates (Askama)
//!       → materialize (write policy) → report (GenerationReport)
//! ```
//!
//! 1. **Naming** - derives the class form, plural and import paths
//! 2. **Schema** - the single field set every artifact is rendered from
//! 3. **Templates** - pure rendering; the same inputs yield identical bytes
//! 4. **Materialize** - overwrite or create-once writes, dry-run aware
//! 5. **Project** - the entry points tying the above to a project root
//!
//! The planner, roadmap and analysis modules are pure and never touch the
//! filesystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hexgen::config::GeneratorConfig;
//! use hexgen::generator::{Generator, ModuleRequest, ProjectLayout};
//!
//! let layout = ProjectLayout::new("/path/to/project", GeneratorConfig::default());
//! let report = Generator::new(layout, false).add_module(&ModuleRequest {
//!     service: "saas-mt-pim-service".into(),
//!     module: "catalog".into(),
//!     entities: vec!["product".into()],
//! })?;
//! for record in report.written() {
//!     println!("{}", record.path.display());
//! }
//! ```

mod analysis;
mod kinds;
mod materialize;
mod naming;
mod operations;
mod planner;
mod project;
mod report;
mod roadmap;
mod schema;
mod scripts;
mod status;
mod templates;
mod tracking;

pub use analysis::{
    analyze_usecase, detect_entities, detect_operations, format_minutes, AnalysisRequest,
    ImplementationStep, UsecaseAnalysis,
};
pub use kinds::{ArtifactKind, Layer, WritePolicy, EXCEPTION_FILE};
pub use materialize::{Materializer, WriteOutcome};
pub use naming::{class_form, derive_service_name, EntityDescriptor, ModuleContext};
pub use operations::{OperationKind, ReturnShape, UseCaseBody, NAME_MAX_LEN, NAME_MIN_LEN};
pub use planner::{is_auxiliary, next_kind, NextStep, PRIMARY_CHAIN};
pub use project::{
    ComponentOutcome, ComponentRequest, Generator, ModuleRequest, ProjectLayout, ScriptOutcome,
    ScriptRequest,
};
pub use report::{ArtifactRecord, GenerationReport, RecordKind};
pub use roadmap::{
    plan, Checkpoint, Complexity, Phase, Priority, RoadmapPlan, Task, WorkflowType,
    DEFAULT_ROADMAP_OPERATIONS,
};
pub use schema::{ErrorGroup, ErrorKind, FieldSpec, ENTITY_FIELDS};
pub use scripts::{default_endpoints, postman_collection, render_curl_script, Endpoint, Scenario};
pub use status::{project_status, ProjectStatus, ServiceKind, ServiceStatus};
pub use templates::{render_artifact, render_exceptions, RenderRequest};
pub use tracking::{apply_tracking_update, initial_document, CompletedTask, NewTask};
