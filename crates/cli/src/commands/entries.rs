//! Entry management commands

use std::fs;
use std::path::Path;

use littrack_common::{
    errors::{AppError, Result},
    export::parse_import,
    filters::FilterSet,
    models::{EntryId, NewEntry},
};

use super::{Context, EntryArgs};
use crate::render;

pub fn init(ctx: &Context, sample: bool) -> Result<String> {
    let mut store = ctx.load_store()?;
    let added = if sample { store.load_sample() } else { 0 };
    ctx.save_store(&store)?;

    Ok(format!(
        "Initialized {} ({} entries, {} samples added)",
        ctx.location(),
        store.len(),
        added
    ))
}

pub fn add(ctx: &Context, args: EntryArgs) -> Result<String> {
    let mut store = ctx.load_store()?;
    let id = store.add(args.apply_to(NewEntry::default()))?.id.clone();
    ctx.save_store(&store)?;

    Ok(format!("Added entry {}", id))
}

pub fn edit(ctx: &Context, id: &str, args: EntryArgs) -> Result<String> {
    let mut store = ctx.load_store()?;
    let id = EntryId::from(id);
    let current = store
        .get(&id)
        .map(NewEntry::from)
        .ok_or_else(|| AppError::EntryNotFound { id: id.to_string() })?;

    store.update(&id, args.apply_to(current))?;
    ctx.save_store(&store)?;

    Ok(format!("Updated entry {}", id))
}

pub fn delete(ctx: &Context, id: &str) -> Result<String> {
    let mut store = ctx.load_store()?;
    let removed = store.remove(&EntryId::from(id))?;
    ctx.save_store(&store)?;

    Ok(format!("Deleted entry {} ({})", removed.id, removed.citation))
}

pub fn list(ctx: &Context, filters: FilterSet, json: bool) -> Result<String> {
    let store = ctx.load_store()?;
    let entries = filters.apply(store.entries());

    if json {
        return render::to_json(&entries);
    }
    Ok(render::entry_table(&entries, store.len()))
}

pub fn stats(ctx: &Context) -> Result<String> {
    let store = ctx.load_store()?;
    Ok(render::summary(&store.summary(), ctx.research_question(&store)))
}

pub fn question(ctx: &Context, text: Option<String>, clear: bool) -> Result<String> {
    let mut store = ctx.load_store()?;

    if clear || text.is_some() {
        store.set_research_question(text);
        ctx.save_store(&store)?;
    }

    Ok(match ctx.research_question(&store) {
        Some(question) => question.to_string(),
        None => "No research question set".to_string(),
    })
}

pub fn import(ctx: &Context, file: &Path) -> Result<String> {
    let text = fs::read_to_string(file).map_err(|e| AppError::Storage {
        path: file.display().to_string(),
        message: e.to_string(),
    })?;
    let imported = parse_import(&text)?;

    let mut store = ctx.load_store()?;
    let count = store.replace_all(imported.entries)?;
    if imported.research_question.is_some() {
        store.set_research_question(imported.research_question);
    }
    ctx.save_store(&store)?;

    Ok(format!("Imported {} entries from {}", count, file.display()))
}
