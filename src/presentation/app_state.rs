// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::widget_actions::WidgetActionService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub widget_actions: WidgetActionService,
}
