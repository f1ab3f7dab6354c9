// Widget action service - Asynchronous add/remove/reorder/configure requests
use crate::application::dashboard_service::DashboardService;
use crate::application::errors::DashboardError;
use crate::domain::form::{FormControl, FormSpec};
use crate::domain::user::UserContext;
use crate::domain::widget::{BlockId, NewBlock, WidgetDescriptor};
use axum::http::Method;
use std::collections::HashMap;

pub const CONFIG_SAVED_MESSAGE: &str = "Module Configuration Saved.";

/// Form-encoded request fields, in submission order. Repeated keys are kept.
#[derive(Debug, Clone, Default)]
pub struct ActionFields {
    pairs: Vec<(String, String)>,
}

impl ActionFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `name`, also accepting the `name[]` array form
    pub fn all(&self, name: &str) -> Vec<&str> {
        let array_name = format!("{}[]", name);
        self.pairs
            .iter()
            .filter(|(k, _)| k == name || *k == array_name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First value of every field, for applying to a form
    pub fn submitted(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for (k, v) in &self.pairs {
            map.entry(k.clone()).or_insert_with(|| v.clone());
        }
        map
    }

    fn required(&self, name: &'static str) -> Result<&str, DashboardError> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .ok_or(DashboardError::MissingField(name))
    }

    fn block_id(&self, name: &'static str) -> Result<BlockId, DashboardError> {
        parse_block_id(name, self.required(name)?)
    }
}

fn parse_block_id(field: &'static str, value: &str) -> Result<BlockId, DashboardError> {
    value
        .trim()
        .parse()
        .map_err(|_| DashboardError::InvalidField {
            field,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    ReorderWidgets(Vec<BlockId>),
    RefreshWidgetMarkup { id: String, label: String },
    AddWidget(String),
    RemoveWidget(BlockId),
    ConfigureWidget(BlockId),
}

impl WidgetAction {
    pub fn parse(fields: &ActionFields) -> Result<Self, DashboardError> {
        let action = fields.required("action")?;
        match action {
            "updateModules" => {
                let ids = fields.all("moduleOrder");
                if ids.is_empty() {
                    return Err(DashboardError::MissingField("moduleOrder"));
                }
                let ids = ids
                    .into_iter()
                    .map(|id| parse_block_id("moduleOrder", id))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(WidgetAction::ReorderWidgets(ids))
            }
            "updateModule" => {
                let slugger = fields.required("slugger")?;
                let (id, label) =
                    slugger
                        .split_once(':')
                        .ok_or_else(|| DashboardError::InvalidField {
                            field: "slugger",
                            value: slugger.to_string(),
                        })?;
                Ok(WidgetAction::RefreshWidgetMarkup {
                    id: id.to_string(),
                    label: label.to_string(),
                })
            }
            "addModule" => Ok(WidgetAction::AddWidget(
                fields.required("module_name")?.to_string(),
            )),
            "removeModule" => Ok(WidgetAction::RemoveWidget(fields.block_id("moduleid")?)),
            "configModule" => Ok(WidgetAction::ConfigureWidget(fields.block_id("moduleid")?)),
            other => Err(DashboardError::UnknownAction(other.to_string())),
        }
    }
}

/// Named HTML region refreshed by a reply
#[derive(Debug, Clone)]
pub enum Region {
    /// The whole widget list
    Modules(Vec<WidgetDescriptor>),
    /// One widget's options form
    Module(FormSpec),
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Modules(_) => "modules",
            Region::Module(_) => "module",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionReply {
    pub status: u16,
    pub message: String,
    pub regions: Vec<Region>,
}

impl ActionReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            regions: Vec::new(),
        }
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            regions: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }
}

#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// Status envelope with optional refreshed regions
    Envelope(ActionReply),
    /// The response is this form and nothing else
    RawRender(FormSpec),
}

#[derive(Clone)]
pub struct WidgetActionService {
    dashboard: DashboardService,
}

impl WidgetActionService {
    pub fn new(dashboard: DashboardService) -> Self {
        Self { dashboard }
    }

    /// Validation failures become a failure envelope with nothing mutated.
    /// Store and extension failures are returned as errors.
    pub async fn handle(
        &self,
        method: &Method,
        user: &UserContext,
        fields: &ActionFields,
    ) -> anyhow::Result<ActionOutcome> {
        match self.dispatch(method, user, fields).await {
            Ok(outcome) => Ok(outcome),
            Err(DashboardError::Collaborator(e)) => Err(e),
            Err(e) => {
                let status = e.status().unwrap_or(400);
                tracing::warn!("Rejected dashboard action from {}: {}", user.username, e);
                Ok(ActionOutcome::Envelope(ActionReply::failure(
                    status,
                    e.to_string(),
                )))
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        user: &UserContext,
        fields: &ActionFields,
    ) -> Result<ActionOutcome, DashboardError> {
        if *method != Method::POST {
            return Err(DashboardError::MethodNotAllowed(method.to_string()));
        }

        let reply = match WidgetAction::parse(fields)? {
            WidgetAction::ReorderWidgets(ids) => self.reorder(&ids).await?,
            WidgetAction::RefreshWidgetMarkup { id, label } => self.refresh(user, &id, &label)?,
            WidgetAction::AddWidget(kind) => self.add(user, kind).await?,
            WidgetAction::RemoveWidget(id) => self.remove(user, id).await?,
            WidgetAction::ConfigureWidget(id) => {
                return self.configure(id, fields).await.map(ActionOutcome::RawRender);
            }
        };

        Ok(ActionOutcome::Envelope(reply))
    }

    async fn reorder(&self, ids: &[BlockId]) -> Result<ActionReply, DashboardError> {
        let settings = self.dashboard.settings();
        self.dashboard
            .registry()
            .reorder(&settings.area, settings.scope, ids)
            .await?;

        tracing::info!("Reordered {} dashboard module(s)", ids.len());
        Ok(ActionReply::ok("Modules updated."))
    }

    fn refresh(
        &self,
        user: &UserContext,
        id: &str,
        label: &str,
    ) -> Result<ActionReply, DashboardError> {
        let widget = self.dashboard.composer(user)?.compose(id, label)?;
        let form = widget
            .config_form
            .ok_or_else(|| DashboardError::NoConfiguration(label.to_string()))?;

        Ok(ActionReply::ok("Module updated.").with_region(Region::Module(form)))
    }

    async fn add(&self, user: &UserContext, kind: String) -> Result<ActionReply, DashboardError> {
        let catalog = self.dashboard.extensions().available_widgets(user)?;
        let title = catalog
            .label(&kind)
            .ok_or_else(|| DashboardError::UnknownWidgetType(kind.clone()))?
            .to_string();

        let settings = self.dashboard.settings();
        let registry = self.dashboard.registry();
        let previous = registry
            .max_display_order(&settings.area, settings.scope)
            .await?;
        let registration = registry
            .append(
                &settings.area,
                settings.scope,
                NewBlock {
                    title: title.clone(),
                    kind,
                },
            )
            .await?;
        if previous.is_some_and(|max| registration.display_order <= max) {
            tracing::warn!(
                "Block {} placed at {} although position {:?} was already taken",
                registration.block_id,
                registration.display_order,
                previous
            );
        }
        tracing::info!(
            "Added module {} as block {} at position {}",
            title,
            registration.block_id,
            registration.display_order
        );

        let widgets = self.dashboard.widget_list(user).await?;
        Ok(ActionReply::ok(format!("Added module {}.", title))
            .with_region(Region::Modules(widgets)))
    }

    async fn remove(&self, user: &UserContext, id: BlockId) -> Result<ActionReply, DashboardError> {
        if !self.dashboard.registry().remove(id).await? {
            return Err(DashboardError::UnknownWidget(id));
        }
        tracing::info!("Removed module block {}", id);

        let widgets = self.dashboard.widget_list(user).await?;
        Ok(ActionReply::ok("Removed module.").with_region(Region::Modules(widgets)))
    }

    /// Renders the block's configuration form. When the request carries values for
    /// the form's own controls they are saved to the block first.
    async fn configure(&self, id: BlockId, fields: &ActionFields) -> Result<FormSpec, DashboardError> {
        let registry = self.dashboard.registry();
        let mut block = registry
            .find_block(id)
            .await?
            .ok_or(DashboardError::UnknownWidget(id))?;

        let mut form = self.dashboard.extensions().block_form(&block)?;
        if form.apply(&fields.submitted()) {
            for (name, value) in form.editable_values() {
                if name == "title" {
                    block.title = value;
                } else {
                    block.data.insert(name, value);
                }
            }
            if !registry.update_block(&block).await? {
                return Err(DashboardError::UnknownWidget(id));
            }
            tracing::info!("Saved configuration of block {}", id);
            form.success_message = Some(CONFIG_SAVED_MESSAGE.to_string());
        }

        form.append(FormControl::hidden("moduleid", id.to_string()));
        form.append(FormControl::hidden("action", "configModule"));
        Ok(form)
    }
}
