//! Terminal output
//!
//! Rendering functions return strings so they can be tested; the [`Status`]
//! helpers print directly.

use clap::ValueEnum;
use dictsearch_core::Element;
use dictsearch_engine::{RankedHit, SearchState};
use dictsearch_search::MatchRecord;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write as _;

/// Longest description shown in a result row
const ROW_DESCRIPTION_WIDTH: usize = 70;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when stdout is a terminal
    #[default]
    Text,
    /// One JSON document
    Json,
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Full detail block for one element
pub fn render_element(element: &Element) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", element.name.bold());

    let fields = [
        ("Type", element.data_type.as_str()),
        ("Description", element.description.as_str()),
        ("Value range", element.value_range.as_str()),
        ("Notes", element.notes.as_str()),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            let _ = writeln!(out, "  {:<12} {}", format!("{label}:").dimmed(), value);
        }
    }
    if !element.structures.is_empty() {
        let _ = writeln!(
            out,
            "  {:<12} {}",
            "Structures:".dimmed(),
            element.structures.join(", ")
        );
    }
    out
}

/// Numbered result list, one row per record
pub fn render_records(records: &[MatchRecord]) -> String {
    let width = records.len().to_string().len();
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>width$}. {} {} {}",
            i + 1,
            record.element.name.bold(),
            format!("[{} {:.0}]", record.match_type, record.relevance_score).dimmed(),
            truncate(&record.element.description, ROW_DESCRIPTION_WIDTH),
        );
        let _ = writeln!(out, "{:>width$}  {}", "", format!("in {}", record.source_structure).dimmed());
    }
    out
}

/// Reranked full-text hits, one row per hit
pub fn render_ranked_hits(hits: &[RankedHit]) -> String {
    let mut out = String::new();
    for hit in hits {
        let _ = writeln!(
            out,
            "{} {} {}",
            hit.element.name.bold(),
            format!("[{:.1} / upstream {:.2}]", hit.relevance, hit.upstream_score).dimmed(),
            truncate(&hit.element.description, ROW_DESCRIPTION_WIDTH),
        );
    }
    out
}

/// Text for a terminal search state
pub fn render_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => String::new(),
        SearchState::ExactHit { element } => render_element(element),
        SearchState::PartialInProgress { total_batches: 0, .. } => "Discovering data structures\n".to_string(),
        SearchState::PartialInProgress {
            batch_index,
            total_batches,
            matches_so_far,
        } => format!(
            "Searching batch {batch_index}/{total_batches}, {}\n",
            format_count(*matches_so_far, "match", "matches")
        ),
        SearchState::PartialResult { records } => format!(
            "{}\n{}",
            format_count(records.len(), "match", "matches").bold(),
            render_records(records)
        ),
        SearchState::NoMatch { message, .. } => format!("{message}\n"),
        SearchState::Failed { reason } => format!("{reason}\n"),
    }
}

/// Pretty JSON for any serializable value
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
