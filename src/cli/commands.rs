use std::io::Write;

use anyhow::{Context, Result};

use super::{Cli, Command};
use crate::backend::build_backend;
use crate::catalog::{BookDraft, Record, RecordEdit, RecordId};
use crate::config::Config;
use crate::store::CatalogStore;
use crate::ui::view::{SearchScope, ViewState};

/// Load config, open the configured backend, run `cli.command`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(backend) = cli.backend {
        config.storage.backend = backend.into();
        config.validate()?;
    }

    let backend = build_backend(&config).context("Failed to set up backend")?;
    let mut store = CatalogStore::open(
        backend,
        ViewState::with_page_size(config.view.page_size),
        config.view.search_scope,
    )
    .await
    .context("Failed to load catalogue")?;

    execute(&mut store, cli.command, out).await
}

pub async fn execute(
    store: &mut CatalogStore,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List {
            search,
            page,
            all_fields,
        } => {
            if all_fields {
                store.set_scope(SearchScope::AllFields);
            }
            store.search(search);
            store.go_to_page(page);
            write_page(store, out)?;
        }
        Command::Add {
            title,
            author,
            year,
        } => {
            let record = store.add(BookDraft::new(title, author, year)).await?;
            writeln!(out, "Added {}", format_record(&record))?;
        }
        Command::Edit {
            id,
            title,
            author,
            year,
        } => {
            let id = RecordId::from(id);
            let edit = RecordEdit {
                title,
                author,
                year,
            };
            if edit.is_empty() {
                writeln!(out, "Nothing to change for {}", id)?;
                return Ok(());
            }
            match store.edit(&id, edit).await? {
                Some(record) => writeln!(out, "Updated {}", format_record(&record))?,
                None => writeln!(out, "No book with id {}", id)?,
            }
        }
        Command::Remove { id } => {
            let id = RecordId::from(id);
            if store.remove(&id).await? {
                writeln!(out, "Removed {}", id)?;
            } else {
                writeln!(out, "No book with id {}", id)?;
            }
        }
        Command::Show { id } => {
            let id = RecordId::from(id);
            match store.collection().get(&id) {
                Some(record) => writeln!(out, "{}", format_record(record))?,
                None => writeln!(out, "No book with id {}", id)?,
            }
        }
        Command::Export => {
            let json = serde_json::to_string_pretty(store.collection())
                .context("Failed to serialize catalogue")?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

fn write_page(store: &CatalogStore, out: &mut impl Write) -> Result<()> {
    let projection = store.projection();
    if projection.filtered.is_empty() {
        writeln!(out, "No books found.")?;
        return Ok(());
    }

    for record in &projection.page {
        writeln!(out, "{}", format_record(record))?;
    }
    writeln!(
        out,
        "page {}/{} ({} matching)",
        store.view().page,
        projection.page_count,
        projection.filtered.len()
    )?;
    Ok(())
}

fn format_record(record: &Record) -> String {
    format!(
        "[{}] {} by {} ({})",
        record.id, record.title, record.author, record.year
    )
}
