use serde::Deserialize;

/// Failure of a backend call, classified by what the UI has to say about it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// 409: a record with the same key already exists
    #[error("registro duplicado")]
    Conflict,
    /// Delete refused because other records reference the target
    #[error("el registro tiene registros dependientes")]
    Dependency,
    /// Any other non-2xx answer
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },
    /// Network failure, the request never got an answer
    #[error("error de conexión: {0}")]
    Connection(String),
    /// The answer could not be decoded
    #[error("respuesta inválida: {0}")]
    Parse(String),
}

/// User-facing texts of an entity form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMessages {
    pub created: &'static str,
    pub updated: &'static str,
    pub conflict: &'static str,
    pub save_failed: &'static str,
}

/// User-facing texts of a list that offers deleting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMessages {
    pub confirm: &'static str,
    pub deleted: &'static str,
    pub dependency: &'static str,
    pub failed: &'static str,
}

pub const CONNECTION_MESSAGE: &str = "Error de conexión con el servidor";

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<serde_json::Value>,
    code: Option<String>,
}

impl ErrorBody {
    fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn text(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            _ => None,
        }
    }
}

impl ApiError {
    /// Classify a non-2xx answer. `deleting` turns 400/403 into a dependency
    /// conflict, as the backend answers that way when references exist.
    pub fn from_status(status: u16, body: &[u8], deleting: bool) -> Self {
        let parsed = ErrorBody::parse(body);
        if status == 409 {
            return Self::Conflict;
        }
        if deleting
            && (status == 400 || status == 403 || parsed.code.as_deref() == Some("DEPENDENCY_ERROR"))
        {
            return Self::Dependency;
        }
        Self::Status {
            status,
            message: parsed.text(),
        }
    }

    /// Message shown after a failed create/update
    pub fn save_message(&self, messages: &EntityMessages) -> String {
        match self {
            Self::Conflict => messages.conflict.to_string(),
            Self::Connection(_) => CONNECTION_MESSAGE.to_string(),
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => messages.save_failed.to_string(),
        }
    }

    /// Message shown after a failed delete
    pub fn delete_message(&self, messages: &DeleteMessages) -> String {
        match self {
            Self::Dependency => messages.dependency.to_string(),
            Self::Connection(_) => CONNECTION_MESSAGE.to_string(),
            _ => messages.failed.to_string(),
        }
    }
}
