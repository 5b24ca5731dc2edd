use flock_insights::config::DataConfig;
use flock_insights::diagnostics::{DiagnosticEngine, DiagnosticsService, InMemoryResponseStore};
use flock_insights::error::AppError;
use flock_insights::surveys::{ImportedDataset, ResponseImporter, TemplateCatalog, TemplateId};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Built-in templates unless a catalog file is configured.
pub(crate) fn load_catalog(templates_path: Option<&Path>) -> Result<TemplateCatalog, AppError> {
    match templates_path {
        Some(path) => {
            info!(path = %path.display(), "loading template catalog");
            Ok(TemplateCatalog::from_path(path)?)
        }
        None => Ok(TemplateCatalog::standard()),
    }
}

pub(crate) fn load_dataset(responses_path: Option<&Path>) -> Result<ImportedDataset, AppError> {
    match responses_path {
        Some(path) => {
            info!(path = %path.display(), "importing response export");
            Ok(ResponseImporter::from_path(path)?)
        }
        None => Ok(ImportedDataset::default()),
    }
}

pub(crate) fn build_engine(templates_path: Option<&Path>) -> Result<DiagnosticEngine, AppError> {
    let catalog = load_catalog(templates_path)?;
    Ok(DiagnosticEngine::from_catalog(&catalog)?)
}

pub(crate) fn build_service(
    data: &DataConfig,
) -> Result<Arc<DiagnosticsService<InMemoryResponseStore>>, AppError> {
    let engine = build_engine(data.templates_path.as_deref())?;
    let dataset = load_dataset(data.responses_path.as_deref())?;
    let store = InMemoryResponseStore::from_dataset(dataset);

    Ok(Arc::new(DiagnosticsService::new(
        Arc::new(engine),
        Arc::new(store),
    )))
}

pub(crate) fn template_ids(raw: &[String]) -> Vec<TemplateId> {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(TemplateId::new)
        .collect()
}
