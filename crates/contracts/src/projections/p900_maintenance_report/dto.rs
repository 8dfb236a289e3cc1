use serde::{Deserialize, Serialize};

/// Maintenance category accepted by the report filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    Preventiva,
    Correctiva,
}

impl MaintenanceKind {
    pub const ALL: [MaintenanceKind; 2] = [MaintenanceKind::Preventiva, MaintenanceKind::Correctiva];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preventiva => "preventiva",
            Self::Correctiva => "correctiva",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Preventiva => "Preventiva",
            Self::Correctiva => "Correctiva",
        }
    }
}

/// Body of `POST /reportes`. Empty filters travel as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub patente: Option<String>,
    pub tipo_mantencion: Option<String>,
    pub proveedor: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ReportFilters {
    /// Build filters from raw control values; blank controls become `None`.
    pub fn from_inputs(
        date_from: &str,
        date_to: &str,
        plate: &str,
        kind: &str,
        supplier: &str,
    ) -> Self {
        Self {
            fecha_desde: non_empty(date_from),
            fecha_hasta: non_empty(date_to),
            patente: non_empty(plate).map(|p| p.to_uppercase()),
            tipo_mantencion: non_empty(kind),
            proveedor: non_empty(supplier),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fecha_desde.is_none()
            && self.fecha_hasta.is_none()
            && self.patente.is_none()
            && self.tipo_mantencion.is_none()
            && self.proveedor.is_none()
    }
}

/// One row of the report list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: i64,

    #[serde(rename = "vehiculoPatente")]
    pub vehicle_plate: String,

    #[serde(rename = "tipoMantencion")]
    pub maintenance_type: String,

    #[serde(rename = "proveedor")]
    pub supplier: String,

    #[serde(rename = "fecha", default)]
    pub date: Option<String>,

    #[serde(rename = "costo", default)]
    pub cost: Option<f64>,
}

/// The three shapes `POST /reportes` can answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutput {
    Rows,
    Spreadsheet,
    Chart,
}

impl ReportOutput {
    /// Query flag switching the response away from the JSON list
    pub fn query_flag(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Rows => None,
            Self::Spreadsheet => Some(("exportar_excel", "true")),
            Self::Chart => Some(("generar_grafico", "true")),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Rows => "application/json",
            Self::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Chart => "image/png",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Rows => "reporte_mantenciones.json",
            Self::Spreadsheet => "reporte_mantenciones.xlsx",
            Self::Chart => "grafico_mantenciones.png",
        }
    }
}
