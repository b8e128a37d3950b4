use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use super::output;
use crate::config::{resolve_config, resolve_root, ROOT_ENV};
use crate::generator::{
    next_kind, plan, project_status, AnalysisRequest, ArtifactKind, CompletedTask, Complexity,
    ComponentRequest, Generator, ModuleRequest, NewTask, OperationKind, ProjectLayout, Scenario,
    ScriptRequest, WorkflowType, DEFAULT_ROADMAP_OPERATIONS,
};
use crate::otel::{init_logging_with_config, LogConfig};

/// Command-line interface for hexgen
///
/// Scaffolds hexagonal Go modules, renders single components and plans the
/// work around them.
#[derive(Parser, Debug)]
#[command(name = "hexgen", version)]
#[command(about = "Hexagonal module scaffolding for Go services", long_about = None)]
pub struct Cli {
    /// Project root holding the services directory
    #[arg(long, global = true, env = ROOT_ENV)]
    pub root: Option<PathBuf>,

    /// Path to hexgen.toml (default: auto-detect in the project root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show what would be written without touching the filesystem
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available hexgen commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a module: layer directories plus entity, port and repository per entity
    ///
    /// The module's errors.go and HTTP controller are only written when absent.
    AddModule {
        /// Service directory name (e.g. saas-mt-pim-service)
        #[arg(short, long)]
        service: String,

        /// Module name (e.g. catalog)
        #[arg(short, long)]
        module: String,

        /// Entities to scaffold (repeated or comma-separated)
        #[arg(short, long = "entity", value_delimiter = ',')]
        entities: Vec<String>,
    },
    /// Generate one component and suggest the next one
    Component {
        #[arg(short, long)]
        service: String,

        #[arg(short, long)]
        module: String,

        /// entity, port, usecase, request, response, repository, controller,
        /// criteria_builder, mapper, object_mother or integration_test
        #[arg(short, long)]
        kind: ArtifactKind,

        #[arg(short, long)]
        entity: String,

        /// Required for usecase, request and response
        #[arg(short, long)]
        operation: Option<OperationKind>,

        /// Business rule to mark in a use case (repeatable)
        #[arg(long = "rule")]
        rules: Vec<String>,

        /// Other components this one depends on (repeatable)
        #[arg(long = "dependency")]
        dependencies: Vec<String>,
    },
    /// Plan the phases of a workflow with time estimates
    Roadmap {
        /// crud_complete, business_flow, integration_flow or custom
        #[arg(short, long)]
        workflow: WorkflowType,

        #[arg(short, long)]
        entity: String,

        /// Operations to plan (default: create, get, update, delete, list)
        #[arg(short, long = "operation", value_delimiter = ',')]
        operations: Vec<OperationKind>,

        /// simple, medium or complex
        #[arg(short, long, default_value = "medium")]
        complexity: Complexity,
    },
    /// Analyze a use-case description and propose components and steps
    Analyze {
        #[arg(short, long)]
        service: String,

        #[arg(short, long)]
        module: String,

        /// Free-text description, English or Spanish
        #[arg(short, long)]
        description: String,

        #[arg(long = "rule")]
        rules: Vec<String>,

        /// Services or systems this use case integrates with
        #[arg(long = "integration")]
        integrations: Vec<String>,
    },
    /// List the services of the project and their kind
    Status,
    /// Export a curl script and a Postman collection for an entity
    Scripts {
        #[arg(short, long)]
        service: String,

        #[arg(short, long)]
        module: String,

        #[arg(short, long)]
        entity: String,

        /// happy_path, validation_errors, not_found or unauthorized (default: all)
        #[arg(long = "scenario", value_delimiter = ',')]
        scenarios: Vec<Scenario>,
    },
    /// Record progress in the project tracking document
    Track {
        /// Tracking file relative to the root (default from hexgen.toml)
        #[arg(short, long)]
        file: Option<String>,

        /// Completed task as NAME:KIND[:NOTES] (repeatable)
        #[arg(long)]
        done: Vec<CompletedTask>,

        /// New task as NAME:PRIORITY:ESTIMATE[:DESCRIPTION] (repeatable)
        #[arg(long)]
        todo: Vec<NewTask>,
    },
    /// Print the component that naturally follows a kind
    Next {
        #[arg(short, long)]
        kind: ArtifactKind,
    },
}

/// How command results are printed on stdout
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable
    Text,
    Json,
    Yaml,
}

/// Parse arguments, initialize logging and run the command on stdout
///
/// # Errors
///
/// Returns the first failure of the command with its context chain.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err:#}");
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run a parsed command, writing its output to `out`
pub fn execute(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    // pure commands need no project
    match &cli.command {
        Commands::Roadmap {
            workflow,
            entity,
            operations,
            complexity,
        } => {
            let operations = if operations.is_empty() {
                DEFAULT_ROADMAP_OPERATIONS.to_vec()
            } else {
                operations.clone()
            };
            let roadmap = plan(*workflow, entity, &operations, *complexity);
            return emit(out, cli.format, &roadmap, |out| output::write_roadmap(out, &roadmap));
        }
        Commands::Next { kind } => {
            let next = next_kind(*kind);
            return emit(out, cli.format, &next, |out| {
                writeln!(out, "➡️  After {kind}: {}", next.suggestion())?;
                Ok(())
            });
        }
        _ => {}
    }

    let root = resolve_root(cli.root.as_deref())?;
    let config = resolve_config(cli.config.as_deref(), &root)?;
    let generator = Generator::new(ProjectLayout::new(&root, config), cli.dry_run);
    if cli.dry_run && cli.format == OutputFormat::Text {
        writeln!(out, "🔍 Dry run: nothing will be written")?;
    }

    match &cli.command {
        Commands::AddModule {
            service,
            module,
            entities,
        } => {
            let report = generator
                .add_module(&ModuleRequest {
                    service: service.clone(),
                    module: module.clone(),
                    entities: entities.clone(),
                })
                .with_context(|| format!("Failed to scaffold module {module} in {service}"))?;
            emit(out, cli.format, &report, |out| {
                output::write_report(out, &report, &root)?;
                writeln!(
                    out,
                    "\n➡️  Next: hexgen component --service {service} --module {module} --kind usecase --entity <entity> --operation create"
                )?;
                Ok(())
            })
        }
        Commands::Component {
            service,
            module,
            kind,
            entity,
            operation,
            rules,
            dependencies,
        } => {
            let outcome = generator
                .generate_component(&ComponentRequest {
                    service: service.clone(),
                    module: module.clone(),
                    kind: *kind,
                    entity: entity.clone(),
                    operation: *operation,
                    business_rules: rules.clone(),
                    dependencies: dependencies.clone(),
                })
                .with_context(|| format!("Failed to generate {kind} for {entity}"))?;
            emit(out, cli.format, &outcome, |out| {
                output::write_report(out, &outcome.report, &root)?;
                writeln!(out, "\n➡️  Next: {}", outcome.next.suggestion())?;
                Ok(())
            })
        }
        Commands::Analyze {
            service,
            module,
            description,
            rules,
            integrations,
        } => {
            let analysis = generator
                .analyze(&AnalysisRequest {
                    service,
                    module,
                    description,
                    business_rules: rules,
                    integration_points: integrations,
                })
                .context("Failed to analyze use case")?;
            emit(out, cli.format, &analysis, |out| output::write_analysis(out, &analysis))
        }
        Commands::Status => {
            let status = project_status(generator.layout()).context("Failed to read project status")?;
            emit(out, cli.format, &status, |out| output::write_status(out, &status))
        }
        Commands::Scripts {
            service,
            module,
            entity,
            scenarios,
        } => {
            let outcome = generator
                .generate_integration_scripts(&ScriptRequest {
                    service: service.clone(),
                    module: module.clone(),
                    entity: entity.clone(),
                    scenarios: scenarios.clone(),
                })
                .with_context(|| format!("Failed to export scripts for {entity}"))?;
            emit(out, cli.format, &outcome, |out| {
                output::write_report(out, &outcome.report, &root)?;
                writeln!(out, "\n🔌 Service port: {}", outcome.port)?;
                Ok(())
            })
        }
        Commands::Track { file, done, todo } => {
            let today = chrono::Local::now().date_naive();
            let report = generator
                .update_tracking(file.as_deref(), done, todo, today)
                .context("Failed to update the tracking document")?;
            emit(out, cli.format, &report, |out| output::write_report(out, &report, &root))
        }
        Commands::Roadmap { .. } | Commands::Next { .. } => Ok(()),
    }
}

/// Print `value` as JSON/YAML, or through `text` for the text format
fn emit<T, F>(out: &mut dyn Write, format: OutputFormat, value: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
{
    match format {
        OutputFormat::Text => text(out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value).context("Failed to write JSON")?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(value).context("Failed to serialize YAML")?;
            out.write_all(yaml.as_bytes())?;
            Ok(())
        }
    }
}

/// `path` relative to `root` when it lies underneath it
pub(crate) fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
