// HTTP request handlers
use crate::application::widget_actions::ActionFields;
use crate::infrastructure::http_response::outcome_response;
use crate::infrastructure::templates::render_dashboard;
use crate::presentation::app_state::AppState;
use crate::presentation::current_user::CurrentUser;
use crate::presentation::errors::ApiError;
use axum::{
    extract::State,
    http::Method,
    response::{Html, Response},
    Form,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard page; GET and POST behave the same
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, ApiError> {
    let view = state.dashboard_service.build_dashboard(&user).await?;
    Ok(Html(render_dashboard(&user, &view)?))
}

/// Asynchronous widget management. Accepts every verb so that non-POST requests
/// get the same rejection envelope whatever their action.
pub async fn ajax_dashboard(
    method: Method,
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    form: Option<Form<Vec<(String, String)>>>,
) -> Result<Response, ApiError> {
    let fields = ActionFields::new(form.map(|Form(pairs)| pairs).unwrap_or_default());
    let outcome = state.widget_actions.handle(&method, &user, &fields).await?;
    Ok(outcome_response(&outcome)?)
}
