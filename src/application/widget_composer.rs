// Widget composer - Builds renderable widget descriptors through the module hooks
use crate::application::extensions::{module_topic, Extensions, ModuleContext};
use crate::application::hook_bus::HookBus;
use crate::domain::form::{FormControl, FormSpec};
use crate::domain::user::{Capability, UserContext};
use crate::domain::widget::{
    widget_slug, ActiveWidget, WidgetCatalog, WidgetDescriptor, WidgetDraft, ADD_ITEM_ID,
    ADD_ITEM_LABEL,
};

/// Name of the hidden control every options form starts with
pub const MODULE_ID_FIELD: &str = "module_id";

/// One widget to compose. `label` is its type's label and picks the hook topic;
/// `title` is the block's own, user-editable heading.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEntry {
    pub id: String,
    pub label: String,
    pub title: String,
}

impl WidgetEntry {
    /// Entry whose title is its type label, as for refreshes and the "Add Item" widget
    pub fn untitled(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            title: label.clone(),
            label,
        }
    }
}

/// Composer for a single request. Holds its own copy of the module hooks so the
/// "Add Item" hook registered for this requester never leaks into other requests.
pub struct WidgetComposer {
    modules: HookBus<WidgetDraft, ModuleContext>,
    user: UserContext,
    catalog: WidgetCatalog,
}

impl WidgetComposer {
    pub fn new(extensions: &Extensions, user: &UserContext, catalog: WidgetCatalog) -> Self {
        let mut modules = extensions.modules.clone();
        if user.can(Capability::ManageDashModules) {
            modules.register(module_topic(&widget_slug(ADD_ITEM_LABEL)), add_item_hook);
        }

        Self {
            modules,
            user: user.clone(),
            catalog,
        }
    }

    /// Entries to compose, in display order. Each widget is labelled by its type, so
    /// renaming a block never moves it to another hook topic. Types missing from the
    /// catalog fall back to the block title. Requesters who manage modules get the
    /// "Add Item" pseudo-widget appended.
    pub fn entries(&self, active: &[ActiveWidget]) -> Vec<WidgetEntry> {
        let mut entries: Vec<WidgetEntry> = active
            .iter()
            .map(|w| WidgetEntry {
                id: w.block_id.to_string(),
                label: self.catalog.label(&w.kind).unwrap_or(w.title.as_str()).to_string(),
                title: w.title.clone(),
            })
            .collect();

        if self.user.can(Capability::ManageDashModules) {
            entries.push(WidgetEntry::untitled(ADD_ITEM_ID, ADD_ITEM_LABEL));
        }

        entries
    }

    /// Composes a widget titled with its type label
    pub fn compose(&self, id: &str, label: &str) -> anyhow::Result<WidgetDescriptor> {
        self.compose_entry(&WidgetEntry::untitled(id, label))
    }

    /// Hook failures propagate; the caller decides whether to degrade or abort.
    pub fn compose_entry(&self, entry: &WidgetEntry) -> anyhow::Result<WidgetDescriptor> {
        let WidgetEntry { id, label, title } = entry;
        let slug = widget_slug(label);

        let mut form = FormSpec::new(format!("dash_module_options_{}", id)).ajax();
        form.append(FormControl::hidden(MODULE_ID_FIELD, id));

        let draft = WidgetDraft {
            id: id.to_string(),
            name: label.to_string(),
            title: title.to_string(),
            content: String::new(),
            form,
        };
        let ctx = ModuleContext {
            widget_id: id.to_string(),
            user: self.user.clone(),
            catalog: self.catalog.clone(),
        };

        let topic = module_topic(&slug);
        tracing::debug!(
            "Composing module {} via {} (hooked: {})",
            id,
            topic,
            self.modules.has_hooks(&topic)
        );
        let draft = self.modules.invoke(&topic, draft, &ctx)?;
        let WidgetDraft {
            id,
            name,
            title,
            content,
            mut form,
        } = draft;

        let (config_form, options) = if form.len() > 1 {
            form.append(FormControl::submit("save", "Save"));
            let options = form.values();
            (Some(form), Some(options))
        } else {
            (None, None)
        };

        tracing::debug!(
            "Module {} options form {}",
            id,
            if config_form.is_some() { "attached" } else { "absent" }
        );

        Ok(WidgetDescriptor {
            id,
            name,
            title,
            content,
            config_form,
            options,
        })
    }
}

/// Fills the "Add Item" form with the addable widget types
fn add_item_hook(mut draft: WidgetDraft, ctx: &ModuleContext) -> anyhow::Result<WidgetDraft> {
    let choices: Vec<(String, String)> = ctx
        .catalog
        .iter()
        .map(|(kind, label)| (kind.to_string(), label.to_string()))
        .collect();

    if choices.is_empty() {
        draft.content = "No modules are available to add.".to_string();
        return Ok(draft);
    }

    draft.form.append(FormControl::select("module_name", "Module", choices));
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin, catalog, reader};

    fn extensions_with_notes_options() -> Extensions {
        let mut extensions = Extensions::new();
        extensions
            .modules
            .register("dash_module_notes", |mut draft: WidgetDraft, ctx: &ModuleContext| {
                draft.content = format!("notes for {}", ctx.user.username);
                draft.form.append(FormControl::text("lines", "Lines", "3"));
                Ok(draft)
            });
        extensions
            .modules
            .register("dash_module_latest_entries", |mut draft: WidgetDraft, _: &ModuleContext| {
                draft.content = "<ul></ul>".to_string();
                Ok(draft)
            });
        extensions
    }

    #[test]
    fn test_no_extra_controls_means_no_config_form() {
        let composer = WidgetComposer::new(&extensions_with_notes_options(), &reader(), catalog());

        let widget = composer.compose("3", "Latest Entries").unwrap();
        assert_eq!(widget.content, "<ul></ul>");
        assert!(widget.config_form.is_none());
        assert!(widget.options.is_none());

        let untouched = composer.compose("5", "Nobody Hooks Me").unwrap();
        assert_eq!(untouched.title, "Nobody Hooks Me");
        assert!(untouched.content.is_empty());
        assert!(untouched.config_form.is_none());
    }

    #[test]
    fn test_extra_controls_attach_the_form() {
        let composer = WidgetComposer::new(&extensions_with_notes_options(), &reader(), catalog());

        let widget = composer.compose("8", "Notes").unwrap();
        assert_eq!(widget.content, "notes for reader");

        let form = widget.config_form.expect("options form");
        assert_eq!(form.name, "dash_module_options_8");
        assert!(form.ajax);
        assert_eq!(form.get(MODULE_ID_FIELD).and_then(|c| c.value()), Some("8"));
        assert!(form.get("lines").is_some());
        assert!(form.get("save").is_some());

        let options = widget.options.expect("flattened values");
        assert_eq!(options["lines"], "3");
        assert_eq!(options[MODULE_ID_FIELD], "8");
    }

    #[test]
    fn test_add_item_only_for_module_managers() {
        let active = vec![ActiveWidget {
            block_id: 3,
            kind: "latest_entries".into(),
            title: "Latest Entries".into(),
            display_order: 1,
        }];

        let for_reader = WidgetComposer::new(&Extensions::new(), &reader(), catalog());
        assert_eq!(for_reader.entries(&active).len(), 1);
        assert!(for_reader.compose(ADD_ITEM_ID, ADD_ITEM_LABEL).unwrap().config_form.is_none());

        let for_admin = WidgetComposer::new(&Extensions::new(), &admin(), catalog());
        let entries = for_admin.entries(&active);
        assert_eq!(entries.last(), Some(&WidgetEntry::untitled(ADD_ITEM_ID, ADD_ITEM_LABEL)));

        let add_item = for_admin.compose(ADD_ITEM_ID, ADD_ITEM_LABEL).unwrap();
        let form = add_item.config_form.expect("add item form");
        match form.get("module_name") {
            Some(FormControl::Custom(select)) => {
                assert_eq!(select.options.len(), catalog().len());
                assert!(select.options.iter().any(|(kind, _)| kind == "rss"));
            }
            other => panic!("unexpected control: {:?}", other),
        }
    }

    #[test]
    fn test_entries_are_labelled_by_type() {
        let active = vec![
            ActiveWidget {
                block_id: 4,
                kind: "rss".into(),
                title: "Planet".into(),
                display_order: 1,
            },
            ActiveWidget {
                block_id: 5,
                kind: "retired".into(),
                title: "Old Notes".into(),
                display_order: 2,
            },
        ];
        let composer = WidgetComposer::new(&Extensions::new(), &reader(), catalog());

        let entries = composer.entries(&active);
        assert_eq!(entries[0].label, "RSS Feed");
        assert_eq!(entries[0].title, "Planet");
        assert_eq!(entries[1].label, "Old Notes");
    }

    #[test]
    fn test_renamed_widget_keeps_its_hook() {
        let composer = WidgetComposer::new(&extensions_with_notes_options(), &reader(), catalog());
        let entry = WidgetEntry {
            id: "8".into(),
            label: "Notes".into(),
            title: "Shopping list".into(),
        };

        let widget = composer.compose_entry(&entry).unwrap();
        assert_eq!(widget.title, "Shopping list");
        assert_eq!(widget.name, "Notes");
        assert_eq!(widget.content, "notes for reader");
        assert!(widget.config_form.is_some());
    }

    #[test]
    fn test_add_item_hook_is_request_scoped() {
        let extensions = Extensions::new();
        let _admin_composer = WidgetComposer::new(&extensions, &admin(), catalog());
        assert!(!extensions.modules.has_hooks("dash_module_add_item"));
    }

    #[test]
    fn test_hook_failure_propagates() {
        let mut extensions = Extensions::new();
        extensions
            .modules
            .register("dash_module_notes", |_: WidgetDraft, _: &ModuleContext| {
                Err(anyhow::anyhow!("notes plugin exploded"))
            });

        let composer = WidgetComposer::new(&extensions, &reader(), catalog());
        let err = composer.compose("8", "Notes").unwrap_err();
        assert_eq!(err.to_string(), "notes plugin exploded");
    }
}
