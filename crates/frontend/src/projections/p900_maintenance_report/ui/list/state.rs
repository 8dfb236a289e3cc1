use crate::shared::api::{RestClient, Transport};
use crate::shared::artifact::{ArtifactSlot, ObjectUrls};
use crate::shared::date_utils::format_date;
use contracts::projections::p900_maintenance_report::dto::{
    ReportFilters, ReportOutput, ReportRow,
};
use leptos::prelude::*;

pub const REPORT_PATH: &str = "/reportes";
pub const EMPTY_FILTERS_MESSAGE: &str = "Por favor ingrese al menos un filtro para buscar.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded,
}

/// Raw values of the filter controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInputs {
    pub date_from: String,
    pub date_to: String,
    pub plate: String,
    pub kind: String,
    pub supplier: String,
}

impl ReportInputs {
    pub fn filters(&self) -> ReportFilters {
        ReportFilters::from_inputs(
            &self.date_from,
            &self.date_to,
            &self.plate,
            &self.kind,
            &self.supplier,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    pub inputs: ReportInputs,
    pub rows: Vec<ReportRow>,
    pub status: ReportStatus,
    /// Informational message, e.g. when no filter was given
    pub info: Option<String>,
    /// Failure of an export or chart request
    pub action_error: Option<String>,
    pub chart: ArtifactSlot,
}

impl ReportState {
    pub fn set_plate(&mut self, raw: &str) {
        self.inputs.plate = raw.to_uppercase();
    }

    pub fn is_loading(&self) -> bool {
        self.status == ReportStatus::Loading
    }

    /// Spreadsheet and chart need results and no search in flight
    pub fn can_export(&self) -> bool {
        !self.rows.is_empty() && !self.is_loading()
    }

    /// Start a search. `None` means nothing should be requested: with no
    /// filter at all the results and the chart are dropped and an
    /// informational message is shown instead.
    pub fn begin_search(&mut self, urls: &dyn ObjectUrls) -> Option<ReportFilters> {
        self.info = None;
        self.action_error = None;
        let filters = self.inputs.filters();
        if filters.is_empty() {
            self.rows.clear();
            self.chart.release(urls);
            self.status = ReportStatus::Idle;
            self.info = Some(EMPTY_FILTERS_MESSAGE.to_string());
            return None;
        }
        self.status = ReportStatus::Loading;
        Some(filters)
    }

    pub fn finish_search(&mut self, result: Result<Vec<ReportRow>, String>) {
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.status = ReportStatus::Loaded;
            }
            Err(message) => self.status = ReportStatus::Error(message),
        }
    }

    /// Expose a freshly rendered chart, releasing the previous one first
    pub fn show_chart(&mut self, urls: &dyn ObjectUrls, result: Result<Vec<u8>, String>) {
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(message) => {
                self.action_error = Some(message);
                return;
            }
        };
        if let Err(e) = self.chart.replace(urls, &bytes, ReportOutput::Chart.mime_type()) {
            log::error!("No se pudo mostrar el gráfico: {}", e);
            self.action_error = Some(format!("Error al generar gráfico: {}", e));
        }
    }

    /// Back to the initial screen; the chart URL is released
    pub fn clear(&mut self, urls: &dyn ObjectUrls) {
        self.chart.release(urls);
        *self = Self::default();
    }
}

/// `POST /reportes`; a body that is not a list counts as no rows
pub async fn fetch_rows<T: Transport>(
    api: &RestClient<T>,
    filters: &ReportFilters,
) -> Result<Vec<ReportRow>, String> {
    let body: serde_json::Value = api
        .post_json(REPORT_PATH, filters)
        .await
        .map_err(|e| format!("Error cargando reportes: {}", e))?;
    if !body.is_array() {
        log::warn!("Respuesta de reportes no es una lista");
        return Ok(Vec::new());
    }
    serde_json::from_value(body).map_err(|e| format!("Error cargando reportes: {}", e))
}

/// `POST /reportes?<flag>=true`, answer kept as bytes
pub async fn fetch_artifact<T: Transport>(
    api: &RestClient<T>,
    filters: &ReportFilters,
    output: ReportOutput,
) -> Result<Vec<u8>, String> {
    let query: Vec<(&str, &str)> = output.query_flag().into_iter().collect();
    api.post_binary(REPORT_PATH, &query, filters)
        .await
        .map_err(|e| match output {
            ReportOutput::Chart => format!("Error al generar gráfico: {}", e),
            _ => format!("Error al descargar Excel: {}", e),
        })
}

/// `DD.MM.YYYY`, or a dash
pub fn display_date(date: Option<&str>) -> String {
    match date {
        Some(d) if !d.trim().is_empty() => format_date(d).replace('-', "."),
        _ => "-".to_string(),
    }
}

pub fn create_state() -> RwSignal<ReportState> {
    RwSignal::new(ReportState::default())
}
