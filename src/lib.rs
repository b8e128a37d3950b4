//! # hexgen
//!
//! **hexgen** scaffolds hexagonal-architecture modules for Go services. From a
//! service, a module and a handful of entity names it emits entities,
//! repository ports, PostgreSQL repositories, use cases, DTOs, mappers,
//! criteria builders, HTTP controllers and test fixtures, all rendered from
//! one shared field set so the layers agree with each other.
//!
//! ## Architecture
//!
//! - **[`generator`]** - naming, templates, write policies, planning and the
//!   [`generator::Generator`] entry points
//! - **[`config`]** - `hexgen.toml` loading and project root resolution
//! - **[`error`]** - the [`error::GenerateError`] taxonomy
//! - **[`cli`]** - the `hexgen` command-line interface
//! - **[`otel`]** - structured logging setup
//!
//! ### Generation Flow
//!
//! ```text
//! CLI ─▶ ProjectLayout (root + hexgen.toml)
//!     ─▶ Generator::add_module / generate_component
//!         ├─ naming: EntityDescriptor, ModuleContext
//!         ├─ templates: Askama render (pure, deterministic)
//!         ├─ materialize: overwrite or create-once
//!         └─ report: GenerationReport of written / kept / planned paths
//! ```
//!
//! Module-shared files (the module's `errors.go` and its HTTP controller) are
//! created only when absent so hand edits survive regeneration. Every other
//! artifact is regenerated on each call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hexgen::config::GeneratorConfig;
//! use hexgen::generator::{Generator, ModuleRequest, ProjectLayout};
//!
//! let layout = ProjectLayout::new("/path/to/project", GeneratorConfig::default());
//! let report = Generator::new(layout, false)
//!     .add_module(&ModuleRequest {
//!         service: "saas-mt-pim-service".into(),
//!         module: "catalog".into(),
//!         entities: vec!["product".into()],
//!     })
//!     .expect("scaffolding failed");
//! println!("{} files written", report.written().count());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod otel;

pub use error::{GenerateError, GenerateResult};
