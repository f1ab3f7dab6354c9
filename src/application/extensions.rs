// Extension points other code can hook into
use crate::application::hook_bus::HookBus;
use crate::domain::form::FormSpec;
use crate::domain::user::UserContext;
use crate::domain::widget::{Block, WidgetCatalog, WidgetDraft};

/// Filter topic listing the widget types that can be added to the dashboard
pub const BLOCK_LIST_TOPIC: &str = "dashboard_block_list";

pub fn module_topic(slug: &str) -> String {
    format!("dash_module_{}", slug)
}

pub fn block_form_topic(kind: &str) -> String {
    format!("block_form_{}", kind)
}

/// Render context handed to `dash_module_<slug>` hooks
#[derive(Debug, Clone)]
pub struct ModuleContext {
    pub widget_id: String,
    pub user: UserContext,
    pub catalog: WidgetCatalog,
}

#[derive(Clone, Default)]
pub struct Extensions {
    /// `dash_module_<slug>`: customise a widget's descriptor and options form
    pub modules: HookBus<WidgetDraft, ModuleContext>,
    /// `dashboard_block_list`: contribute addable widget types
    pub block_list: HookBus<WidgetCatalog, UserContext>,
    /// `block_form_<type>`: build a block's configuration form
    pub block_forms: HookBus<FormSpec, Block>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of addable widget types as seen by `user`
    pub fn available_widgets(&self, user: &UserContext) -> anyhow::Result<WidgetCatalog> {
        self.block_list
            .invoke(BLOCK_LIST_TOPIC, WidgetCatalog::new(), user)
    }

    /// Configuration form of a stored block; empty when no extension contributes one
    pub fn block_form(&self, block: &Block) -> anyhow::Result<FormSpec> {
        let form = FormSpec::new(format!("block_admin_{}", block.id)).ajax();
        self.block_forms
            .invoke(&block_form_topic(&block.kind), form, block)
    }
}
