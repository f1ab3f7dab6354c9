// askama views for the dashboard page, the module list fragment and forms
use crate::domain::dashboard::DashboardView;
use crate::domain::form::{FormControl, FormSpec};
use crate::domain::stats::StatsSnapshot;
use crate::domain::user::UserContext;
use crate::domain::widget::WidgetDescriptor;
use askama::Template;

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct ControlView {
    pub kind: &'static str,
    pub name: String,
    pub label: String,
    pub value: String,
    pub checked: bool,
    pub options: Vec<OptionView>,
}

impl ControlView {
    fn from_control(control: &FormControl) -> Self {
        match control {
            FormControl::Hidden { name, value } => Self {
                kind: "hidden",
                name: name.clone(),
                label: String::new(),
                value: value.clone(),
                checked: false,
                options: Vec::new(),
            },
            FormControl::Submit { name, caption } => Self {
                kind: "submit",
                name: name.clone(),
                label: caption.clone(),
                value: String::new(),
                checked: false,
                options: Vec::new(),
            },
            FormControl::Custom(custom) => Self {
                kind: custom.kind.as_str(),
                name: custom.name.clone(),
                label: custom.label.clone(),
                value: custom.value.clone(),
                checked: !custom.value.is_empty(),
                options: custom
                    .options
                    .iter()
                    .map(|(value, label)| OptionView {
                        value: value.clone(),
                        label: label.clone(),
                        selected: *value == custom.value,
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub name: String,
    pub ajax: bool,
    pub success_message: String,
    pub controls: Vec<ControlView>,
}

impl FormTemplate {
    pub fn new(form: &FormSpec) -> Self {
        Self {
            name: form.name.clone(),
            ajax: form.ajax,
            success_message: form.success_message.clone().unwrap_or_default(),
            controls: form.controls().iter().map(ControlView::from_control).collect(),
        }
    }
}

pub struct ModuleView {
    pub id: String,
    pub name: String,
    pub title: String,
    pub content: String,
    pub sortable: bool,
    pub has_options: bool,
    pub form_html: String,
}

#[derive(Template)]
#[template(path = "dashboard_modules.html")]
pub struct ModulesTemplate {
    pub modules: Vec<ModuleView>,
}

pub struct UpdateView {
    pub name: String,
    pub version: String,
    pub url: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub first_run: bool,
    pub active_since: String,
    pub stats: StatsSnapshot,
    pub updates: Vec<UpdateView>,
    pub modules_html: String,
}

pub fn render_form(form: &FormSpec) -> askama::Result<String> {
    FormTemplate::new(form).render()
}

pub fn render_modules(widgets: &[WidgetDescriptor]) -> askama::Result<String> {
    let modules = widgets
        .iter()
        .map(|widget| {
            let form_html = match &widget.config_form {
                Some(form) => render_form(form)?,
                None => String::new(),
            };
            Ok(ModuleView {
                id: widget.id.clone(),
                name: widget.name.clone(),
                title: widget.title.clone(),
                content: widget.content.clone(),
                sortable: widget.is_sortable(),
                has_options: widget.config_form.is_some(),
                form_html,
            })
        })
        .collect::<askama::Result<Vec<_>>>()?;

    ModulesTemplate { modules }.render()
}

pub fn render_dashboard(user: &UserContext, view: &DashboardView) -> askama::Result<String> {
    DashboardTemplate {
        username: user.username.clone(),
        first_run: view.first_run,
        active_since: view
            .active_since
            .map(|since| since.format("%B %-d, %Y").to_string())
            .unwrap_or_default(),
        stats: view.stats.clone(),
        updates: view
            .updates
            .iter()
            .map(|u| UpdateView {
                name: u.name.clone(),
                version: u.version.clone(),
                url: u.url.clone().unwrap_or_default(),
            })
            .collect(),
        modules_html: render_modules(&view.widgets)?,
    }
    .render()
}
