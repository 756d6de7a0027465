//! Search the dashboard listing in a server data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use teamconnect_core::error::AppError;
use teamconnect_core::types::format_timestamp;
use teamconnect_ui::view::DASHBOARD_TABS;
use teamconnect_ui::{ContentFilter, FileEntry, MessageEntry, SnippetEntry, TabSet};

use crate::output::{self, OutputFormat};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for; empty lists everything
    #[arg(default_value = "")]
    pub term: String,

    /// Server data directory holding files.json, snippets.json and messages.json
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Only search one tab: files, snippets or messages
    #[arg(short, long)]
    pub tab: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileRecord {
    original_name: String,
    uploaded_by: String,
    #[serde(default)]
    upload_date: String,
}

#[derive(Debug, Deserialize)]
struct SnippetRecord {
    title: String,
    code: String,
    #[serde(default)]
    posted_by: String,
    #[serde(default)]
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct MessageRecord {
    content: String,
    #[serde(default)]
    posted_by: String,
    #[serde(default)]
    created_at: String,
}

/// Matching listing item for table output
#[derive(Debug, Serialize, Tabled)]
struct SearchRow {
    /// Tab the item is listed under
    #[tabled(rename = "Tab")]
    tab: &'static str,
    /// Server id
    #[tabled(rename = "ID")]
    id: String,
    /// File name, snippet title or message text
    #[tabled(rename = "Title")]
    title: String,
    /// Author
    #[tabled(rename = "By")]
    author: String,
    /// When it was posted
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(skip)]
    #[serde(skip)]
    sort_key: String,
}

/// Execute the search command
pub fn execute(args: &SearchArgs, format: OutputFormat) -> Result<(), AppError> {
    let tabs = selected_tabs(args.tab.as_deref())?;
    let rows = search(&args.data_dir, &args.term, &tabs, &Local::now())?;
    output::print_list(&rows, format);
    Ok(())
}

/// Tabs to search: the one asked for, or all of them.
fn selected_tabs(tab: Option<&str>) -> Result<Vec<String>, AppError> {
    let mut tabs = TabSet::new(DASHBOARD_TABS);
    match tab {
        Some(id) if tabs.switch(id) => Ok(tabs.active().into_iter().map(str::to_string).collect()),
        Some(id) => Err(AppError::validation(format!(
            "Unknown tab '{id}' (expected one of: {})",
            DASHBOARD_TABS.join(", ")
        ))),
        None => Ok(tabs.ids().map(str::to_string).collect()),
    }
}

fn search(
    data_dir: &Path,
    term: &str,
    tabs: &[String],
    now: &DateTime<Local>,
) -> Result<Vec<SearchRow>, AppError> {
    let filter = ContentFilter::new(term);
    let mut rows = Vec::new();

    for tab in tabs {
        match tab.as_str() {
            "files" => {
                for (id, record) in load::<FileRecord>(data_dir, "files.json")? {
                    let entry = FileEntry {
                        name: record.original_name,
                        author: record.uploaded_by,
                    };
                    if filter.matches(&entry) {
                        rows.push(row("files", id, entry.name, entry.author, record.upload_date, now));
                    }
                }
            }
            "snippets" => {
                for (id, record) in load::<SnippetRecord>(data_dir, "snippets.json")? {
                    let entry = SnippetEntry {
                        title: record.title,
                        code: record.code,
                        author: record.posted_by,
                    };
                    if filter.matches(&entry) {
                        rows.push(row("snippets", id, entry.title, entry.author, record.created_at, now));
                    }
                }
            }
            "messages" => {
                for (id, record) in load::<MessageRecord>(data_dir, "messages.json")? {
                    let entry = MessageEntry {
                        content: record.content,
                        author: record.posted_by,
                    };
                    if filter.matches(&entry) {
                        rows.push(row("messages", id, entry.content, entry.author, record.created_at, now));
                    }
                }
            }
            _ => {}
        }
    }

    // Newest first; server timestamps are ISO-8601 and sort as text.
    rows.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    Ok(rows)
}

fn row(
    tab: &'static str,
    id: String,
    title: String,
    author: String,
    timestamp: String,
    now: &DateTime<Local>,
) -> SearchRow {
    SearchRow {
        tab,
        id,
        title,
        author,
        posted: format_timestamp(&timestamp, now),
        sort_key: timestamp,
    }
}

/// Read one `{id: record}` data file. A missing file is an empty listing.
fn load<T: DeserializeOwned>(data_dir: &Path, name: &str) -> Result<BTreeMap<String, T>, AppError> {
    let path = data_dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(text) => serde_json::from_str(&text).map_err(|e| {
            AppError::validation(format!("Malformed data file '{}': {e}", path.display()))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(AppError::internal(format!(
            "Cannot read '{}': {e}",
            path.display()
        ))),
    }
}
