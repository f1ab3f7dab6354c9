// Core modules - Built-in widget types registered through the same hooks extensions use
use crate::application::extensions::{
    block_form_topic, module_topic, Extensions, ModuleContext, BLOCK_LIST_TOPIC,
};
use crate::domain::form::{FormControl, FormSpec};
use crate::domain::user::UserContext;
use crate::domain::widget::{widget_slug, Block, WidgetCatalog, WidgetDraft};
use crate::infrastructure::config::CatalogEntry;

pub const RSS_TYPE: &str = "rss";

pub fn register_core_modules(extensions: &mut Extensions, catalog: &[CatalogEntry]) {
    let entries = catalog.to_vec();
    extensions.block_list.register(
        BLOCK_LIST_TOPIC,
        move |mut available: WidgetCatalog, _: &UserContext| {
            for entry in &entries {
                available.insert(entry.kind.clone(), entry.label.clone());
            }
            Ok(available)
        },
    );

    for entry in catalog {
        extensions
            .block_forms
            .register(block_form_topic(&entry.kind), title_control);

        if entry.kind == RSS_TYPE {
            extensions
                .block_forms
                .register(block_form_topic(&entry.kind), rss_block_form);
            extensions
                .modules
                .register(module_topic(&widget_slug(&entry.label)), rss_module);
        }
    }

    tracing::debug!("Registered {} core module type(s)", catalog.len());
}

fn title_control(mut form: FormSpec, block: &Block) -> anyhow::Result<FormSpec> {
    form.append(FormControl::text("title", "Title", block.title.clone()));
    Ok(form)
}

fn rss_block_form(mut form: FormSpec, block: &Block) -> anyhow::Result<FormSpec> {
    let url = block.data.get("url").cloned().unwrap_or_default();
    let summaries = block.data.get("summaries").is_some_and(|v| !v.is_empty());
    form.append(FormControl::text("url", "Feed URL", url));
    form.append(FormControl::checkbox("summaries", "Show item summaries", summaries));
    Ok(form)
}

fn rss_module(mut draft: WidgetDraft, _: &ModuleContext) -> anyhow::Result<WidgetDraft> {
    draft.form.append(FormControl::text("items", "Items to show", "5"));
    Ok(draft)
}
