//! Text rendering of command results.

use std::io::Write;
use std::path::Path;

use super::commands::display_path;
use crate::generator::{
    format_minutes, GenerationReport, ProjectStatus, RecordKind, RoadmapPlan, UsecaseAnalysis,
    WriteOutcome,
};

pub fn write_report(out: &mut dyn Write, report: &GenerationReport, root: &Path) -> anyhow::Result<()> {
    if report.is_empty() {
        writeln!(out, "Nothing to do.")?;
        return Ok(());
    }
    for record in &report.records {
        let path = display_path(&record.path, root);
        let line = match (record.kind, record.outcome) {
            (RecordKind::Directory, WriteOutcome::Planned) => format!("📁 would create {path}/"),
            (RecordKind::Directory, _) => format!("📁 {path}/"),
            (_, WriteOutcome::Written) => format!("✅ wrote {path}"),
            (_, WriteOutcome::Skipped) => format!("⏭️  kept {path} (already exists)"),
            (_, WriteOutcome::Planned) => format!("📝 would write {path}"),
        };
        writeln!(out, "{line}")?;
    }

    let files = report
        .records
        .iter()
        .filter(|r| r.kind != RecordKind::Directory);
    let (mut written, mut kept, mut planned) = (0, 0, 0);
    for record in files {
        match record.outcome {
            WriteOutcome::Written => written += 1,
            WriteOutcome::Skipped => kept += 1,
            WriteOutcome::Planned => planned += 1,
        }
    }
    writeln!(out, "\n   {written} written, {kept} kept, {planned} planned")?;
    for note in &report.notes {
        writeln!(out, "⚠️  {note}")?;
    }
    Ok(())
}

pub fn write_roadmap(out: &mut dyn Write, roadmap: &RoadmapPlan) -> anyhow::Result<()> {
    writeln!(
        out,
        "🗺️  {} for {} (complexity: {})",
        roadmap.workflow_name, roadmap.entity, roadmap.complexity
    )?;
    writeln!(out, "   {}", roadmap.workflow_description)?;

    for phase in &roadmap.phases {
        writeln!(
            out,
            "\nPhase {}: {} ({} min)",
            phase.number,
            phase.name,
            phase.minutes()
        )?;
        for task in &phase.tasks {
            writeln!(
                out,
                "   [{}] {} - {} ({} min)",
                task.priority, task.id, task.name, task.estimated_minutes
            )?;
            writeln!(out, "       {}", task.description)?;
        }
        for checkpoint in roadmap
            .checkpoints
            .iter()
            .filter(|c| c.after_phase == phase.number)
        {
            writeln!(out, "   ✓ Checkpoint: {}", checkpoint.name)?;
            writeln!(out, "       {}", checkpoint.validation)?;
        }
    }

    writeln!(
        out,
        "\n⏱️  Total: {} ({} minutes, x{})",
        format_minutes(roadmap.total_minutes),
        roadmap.total_minutes,
        roadmap.complexity.multiplier()
    )?;
    Ok(())
}

pub fn write_analysis(out: &mut dyn Write, analysis: &UsecaseAnalysis) -> anyhow::Result<()> {
    writeln!(out, "🔎 Use case: {}", analysis.description)?;
    writeln!(out, "   Service: {}  Module: {}", analysis.service, analysis.module)?;

    let operations: Vec<&str> = analysis.operations.iter().map(|op| op.as_str()).collect();
    writeln!(out, "\nOperations: {}", operations.join(", "))?;
    if analysis.entities.is_empty() {
        writeln!(out, "Entities: none detected")?;
    } else {
        writeln!(out, "Entities: {}", analysis.entities.join(", "))?;
    }

    writeln!(out, "\nComponents:")?;
    for component in &analysis.components {
        writeln!(out, "   - {component}")?;
    }

    writeln!(out, "\nSteps:")?;
    for step in &analysis.steps {
        writeln!(
            out,
            "   {}. {} ({} min)",
            step.number, step.name, step.estimated_minutes
        )?;
        for task in &step.tasks {
            writeln!(out, "      - {task}")?;
        }
    }

    if !analysis.business_rules.is_empty() {
        writeln!(out, "\nBusiness rules:")?;
        for rule in &analysis.business_rules {
            writeln!(out, "   - {rule}")?;
        }
    }
    if !analysis.integration_points.is_empty() {
        writeln!(out, "\nIntegrations:")?;
        for point in &analysis.integration_points {
            writeln!(out, "   - {point}")?;
        }
    }

    writeln!(out, "\n⏱️  Estimated: {}", format_minutes(analysis.total_minutes))?;
    let entity_flags: String = analysis
        .scaffold_entities()
        .iter()
        .map(|e| format!(" --entity {e}"))
        .collect();
    writeln!(
        out,
        "\n➡️  Start with: hexgen add-module --service {} --module {}{entity_flags}",
        analysis.service, analysis.module
    )?;
    Ok(())
}

pub fn write_status(out: &mut dyn Write, status: &ProjectStatus) -> anyhow::Result<()> {
    writeln!(out, "📦 Project: {}", status.root.display())?;
    if status.services.is_empty() {
        writeln!(out, "   No services under {}", status.services_root.display())?;
        return Ok(());
    }
    writeln!(out, "   {} service(s):", status.services.len())?;
    for service in &status.services {
        writeln!(out, "   - {} ({})", service.name, service.kind)?;
    }
    Ok(())
}
