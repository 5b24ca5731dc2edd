use crate::infra::{build_engine, template_ids};
use clap::Args;
use flock_insights::diagnostics::cohort::ShareEntry;
use flock_insights::diagnostics::{
    CohortSummary, DiagnosticsService, HealthStatus, IndividualReport, InMemoryResponseStore,
    TemplateFilter,
};
use flock_insights::error::AppError;
use flock_insights::surveys::{ImportedDataset, PersonId, ResponseImporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SAMPLE_EXPORT: &[u8] =
    include_bytes!("../../../crates/flock-insights/fixtures/congregation_responses.csv");
const SAMPLE_PERSON: &str = "p-luis";

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// Long-format response export (CSV)
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Optional template catalog (JSON) replacing the built-in templates
    #[arg(long)]
    pub(crate) templates: Option<PathBuf>,
    /// Restrict the cohort to these template ids (repeatable, comma-separated allowed)
    #[arg(long)]
    pub(crate) template: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Long-format response export (CSV)
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Optional template catalog (JSON) replacing the built-in templates
    #[arg(long)]
    pub(crate) templates: Option<PathBuf>,
    /// Person id to report on
    #[arg(long)]
    pub(crate) person: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Person from the sample export to print a report for
    #[arg(long)]
    pub(crate) person: Option<String>,
    /// Restrict the sample cohort to these template ids
    #[arg(long)]
    pub(crate) template: Vec<String>,
}

pub(crate) fn run_cohort(args: CohortArgs) -> Result<(), AppError> {
    let service = service_from_path(&args.responses, args.templates.as_deref())?;
    let filter = TemplateFilter::any_of(template_ids(&args.template));
    let summary = service.cohort_summary(&filter)?;

    for line in cohort_lines(&summary) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_person_report(args: ReportArgs) -> Result<(), AppError> {
    let service = service_from_path(&args.responses, args.templates.as_deref())?;
    let report = service.person_report(&PersonId(args.person))?;

    for line in report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let dataset = ResponseImporter::from_reader(SAMPLE_EXPORT)?;
    println!(
        "Discipleship diagnostics demo ({} people, {} responses)",
        dataset.people.len(),
        dataset.responses.len()
    );

    let service = service_from_dataset(dataset, None)?;
    let filter = TemplateFilter::any_of(template_ids(&args.template));
    let summary = service.cohort_summary(&filter)?;
    println!();
    for line in cohort_lines(&summary) {
        println!("{line}");
    }

    let person = args.person.unwrap_or_else(|| SAMPLE_PERSON.to_string());
    let report = service.person_report(&PersonId(person))?;
    println!();
    for line in report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

fn service_from_path(
    responses: &Path,
    templates: Option<&Path>,
) -> Result<DiagnosticsService<InMemoryResponseStore>, AppError> {
    let dataset = ResponseImporter::from_path(responses)?;
    service_from_dataset(dataset, templates)
}

fn service_from_dataset(
    dataset: ImportedDataset,
    templates: Option<&Path>,
) -> Result<DiagnosticsService<InMemoryResponseStore>, AppError> {
    let engine = build_engine(templates)?;
    Ok(DiagnosticsService::new(
        Arc::new(engine),
        Arc::new(InMemoryResponseStore::from_dataset(dataset)),
    ))
}

pub(crate) fn cohort_lines(summary: &CohortSummary) -> Vec<String> {
    let scope = if summary.template_ids.is_empty() {
        "all templates".to_string()
    } else {
        summary
            .template_ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![format!("Cohort summary ({scope})")];
    if !summary.has_data {
        lines.push("No responses for the selected templates".to_string());
        return lines;
    }

    let members = &summary.new_members;
    if members.responses > 0 {
        lines.push(format!("New members: {} responses", members.responses));
        lines.push(format!(
            "- Foundation index {} ({})",
            display_index(members.foundation_index),
            display_health(members.foundation_health)
        ));
        lines.push(format!(
            "- Commitment index {}",
            display_index(members.commitment_index)
        ));
        lines.push(format!(
            "- Solid foundation {} | crisis seekers {} | relationally driven {}",
            display_pct(members.foundation_solid_pct),
            display_pct(members.crisis_seeker_pct),
            display_pct(members.relationally_driven_pct)
        ));
        lines.push("Profiles:".to_string());
        lines.extend(share_lines(&members.profiles));
        let barriers: Vec<_> = members
            .barriers
            .iter()
            .filter(|entry| entry.count > 0)
            .cloned()
            .collect();
        if !barriers.is_empty() {
            lines.push("Barriers:".to_string());
            lines.extend(share_lines(&barriers));
        }
    }

    let transition = &summary.transition;
    if transition.responses > 0 {
        lines.push(format!("Transition: {} responses", transition.responses));
        lines.push(format!(
            "- Hope {} | change {} | trust {} ({})",
            display_index(transition.hope_index),
            display_index(transition.change_index),
            display_index(transition.trust_index),
            display_health(transition.trust_health)
        ));
    }

    if !summary.alerts.is_empty() {
        lines.push("Alerts:".to_string());
        for alert in &summary.alerts {
            lines.push(format!("  [{}] {}", alert.severity_label, alert.message));
        }
    }

    lines
}

pub(crate) fn report_lines(report: &IndividualReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Discipleship report: {} ({})",
        report.person.display_name, report.person.id
    )];

    if let Some(card) = &report.card {
        lines.push(format!("Profile {:?}: {}", card.label, card.title));
        lines.push(format!("  {}", card.description));
    }
    if let Some(completed_at) = report.completed_at {
        lines.push(format!("Completed {}", completed_at.format("%Y-%m-%d")));
    }
    for observation in &report.observations {
        lines.push(format!("- {observation}"));
    }
    if !report.recommended_actions.is_empty() {
        lines.push("Recommended actions:".to_string());
        for (position, action) in report.recommended_actions.iter().enumerate() {
            lines.push(format!("  {}. {action}", position + 1));
        }
    }

    lines
}

fn share_lines<K>(entries: &[ShareEntry<K>]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            format!(
                "  - {}: {} ({})",
                entry.label,
                entry.count,
                display_pct(entry.pct)
            )
        })
        .collect()
}

fn display_index(value: Option<u8>) -> String {
    value.map_or_else(|| "n/a".to_string(), |index| index.to_string())
}

fn display_pct(value: Option<u8>) -> String {
    value.map_or_else(|| "n/a".to_string(), |pct| format!("{pct}%"))
}

fn display_health(value: Option<HealthStatus>) -> &'static str {
    value.map_or("no data", HealthStatus::label)
}
