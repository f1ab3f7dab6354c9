// HTTP response utilities for the status envelope and raw HTML renders
use crate::application::widget_actions::{ActionOutcome, ActionReply, Region};
use crate::infrastructure::templates::{render_form, render_modules};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// `{status, message, payload?}`; payload maps region names to HTML fragments
#[derive(Debug, Serialize)]
pub struct AjaxResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<BTreeMap<String, String>>,
}

impl AjaxResponse {
    pub fn from_reply(reply: &ActionReply) -> Result<Self, askama::Error> {
        let payload = if reply.regions.is_empty() {
            None
        } else {
            let mut fragments = BTreeMap::new();
            for region in &reply.regions {
                let html = match region {
                    Region::Modules(widgets) => render_modules(widgets)?,
                    Region::Module(form) => render_form(form)?,
                };
                fragments.insert(region.name().to_string(), html);
            }
            Some(fragments)
        };

        Ok(Self {
            status: reply.status,
            message: reply.message.clone(),
            payload,
        })
    }
}

impl IntoResponse for AjaxResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Turns a dispatcher outcome into the response sent to the client
pub fn outcome_response(outcome: &ActionOutcome) -> Result<Response, askama::Error> {
    match outcome {
        ActionOutcome::Envelope(reply) => Ok(AjaxResponse::from_reply(reply)?.into_response()),
        ActionOutcome::RawRender(form) => Ok(Html(render_form(form)?).into_response()),
    }
}
