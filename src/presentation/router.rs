// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{ajax_dashboard, get_dashboard, health_check};
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/admin/dashboard", get(get_dashboard).post(get_dashboard))
        .route("/admin/ajax/dashboard", any(ajax_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::extensions::{Extensions, BLOCK_LIST_TOPIC};
    use crate::domain::user::UserContext;
    use crate::domain::widget::WidgetCatalog;
    use crate::presentation::current_user::{
        USER_CAPABILITIES_HEADER, USER_ID_HEADER, USER_NAME_HEADER,
    };
    use crate::test_support::{admin, reader, Fixture};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, "1")
            .header(USER_NAME_HEADER, "admin")
            .header(USER_CAPABILITIES_HEADER, "manage_all_comments, manage_dash_modules")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(fixture: &Fixture, request: Request<Body>) -> (StatusCode, String, String) {
        let response = router(fixture.state()).oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let fixture = Fixture::new().await;
        let (status, _, body) = send(&fixture, request("GET", "/healthz", "")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));
    }

    #[tokio::test]
    async fn test_identity_is_required() {
        let fixture = Fixture::new().await;
        let anonymous = Request::builder()
            .uri("/admin/dashboard")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&fixture, anonymous).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let malformed = Request::builder()
            .uri("/admin/dashboard")
            .header(USER_ID_HEADER, "admin")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&fixture, malformed).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_page_via_get_and_post() {
        let fixture = Fixture::new().await;
        fixture.seed_widgets(&["rss"]).await;

        let (status, content_type, body) = send(&fixture, request("GET", "/admin/dashboard", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("Welcome, admin!"));
        assert!(body.contains("RSS Feed"));
        assert!(body.contains("Add Item"));

        let (status, _, body) = send(&fixture, request("POST", "/admin/dashboard", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("Welcome, admin!"));
    }

    #[tokio::test]
    async fn test_ajax_rejects_non_post() {
        let fixture = Fixture::new().await;
        for method in ["GET", "PUT", "DELETE"] {
            let (status, _, body) = send(
                &fixture,
                request(method, "/admin/ajax/dashboard?action=addModule&module_name=rss", ""),
            )
            .await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["status"], 405);
            assert!(json.get("payload").is_none());
        }
        let widgets = fixture.dashboard.widget_list(&admin()).await.unwrap();
        assert_eq!(widgets.len(), 1);
    }

    #[tokio::test]
    async fn test_ajax_add_and_reorder() {
        let fixture = Fixture::new().await;
        let ids = fixture.seed_widgets(&["latest_entries"]).await;

        let (status, content_type, body) = send(
            &fixture,
            request("POST", "/admin/ajax/dashboard", "action=addModule&module_name=rss"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("application/json"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "Added module RSS Feed.");
        assert!(json["payload"]["modules"].as_str().unwrap().contains("RSS Feed"));

        let new_id = ids[0] + 1;
        let body = format!(
            "action=updateModules&moduleOrder%5B%5D={}&moduleOrder%5B%5D={}",
            new_id, ids[0]
        );
        let (status, _, body) = send(&fixture, request("POST", "/admin/ajax/dashboard", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Modules updated."));

        let titles: Vec<String> = fixture
            .dashboard
            .widget_list(&reader())
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.title)
            .collect();
        assert_eq!(titles, vec!["RSS Feed".to_string(), "Latest Entries".to_string()]);
    }

    #[tokio::test]
    async fn test_ajax_configure_is_raw_html() {
        let fixture = Fixture::new().await;
        let ids = fixture.seed_widgets(&["rss"]).await;

        let (status, content_type, body) = send(
            &fixture,
            request(
                "POST",
                "/admin/ajax/dashboard",
                &format!("action=configModule&moduleid={}", ids[0]),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.trim_start().starts_with("<form"));
        assert!(body.contains("value=\"configModule\""));
    }

    #[tokio::test]
    async fn test_ajax_unknown_type_is_a_failure_envelope() {
        let fixture = Fixture::new().await;
        let (status, _, body) = send(
            &fixture,
            request("POST", "/admin/ajax/dashboard", "action=addModule&module_name=nonexistent"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "No such widget type: nonexistent");
    }

    #[tokio::test]
    async fn test_broken_extension_during_action_is_a_server_error() {
        let mut extensions = Extensions::new();
        extensions.block_list.register(
            BLOCK_LIST_TOPIC,
            |_: WidgetCatalog, _: &UserContext| Err(anyhow::anyhow!("catalog plugin exploded")),
        );
        let fixture = Fixture::with_extensions(extensions).await;

        let (status, _, _) = send(
            &fixture,
            request("POST", "/admin/ajax/dashboard", "action=addModule&module_name=rss"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
