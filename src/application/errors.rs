// Dashboard error taxonomy
use crate::domain::widget::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Method {0} not allowed.")]
    MethodNotAllowed(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("No such widget type: {0}")]
    UnknownWidgetType(String),
    #[error("No such widget: {0}")]
    UnknownWidget(BlockId),
    #[error("Module {0} has no options.")]
    NoConfiguration(String),
    /// A store or extension failed; not handled at this layer
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl DashboardError {
    /// Envelope status for validation errors; `None` for collaborator failures
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::MethodNotAllowed(_) => Some(405),
            DashboardError::UnknownAction(_)
            | DashboardError::MissingField(_)
            | DashboardError::InvalidField { .. } => Some(400),
            DashboardError::UnknownWidgetType(_)
            | DashboardError::UnknownWidget(_)
            | DashboardError::NoConfiguration(_) => Some(404),
            DashboardError::Collaborator(_) => None,
        }
    }
}
