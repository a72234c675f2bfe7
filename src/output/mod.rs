pub mod report;

use serde::Serialize;

use crate::links::LinkResolver;
use crate::view::DisplayRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Serializable projection of a display row with its variant identifiers
/// resolved to actionable targets. An absent variant stays `None` and renders
/// as a placeholder, never as an error.
#[derive(Clone, Debug, Serialize)]
pub struct RowRecord {
    pub position: usize,
    pub title: String,
    pub pdf_url: Option<String>,
    pub audio_url: Option<String>,
    pub cover_url: Option<String>,
}

pub fn build_records(rows: &[DisplayRow], links: &LinkResolver) -> Vec<RowRecord> {
    rows.iter()
        .map(|row| RowRecord {
            position: row.position,
            title: row.title.clone(),
            pdf_url: row.files.pdf.as_deref().map(|id| links.download_url(id)),
            audio_url: row.files.audio.as_deref().map(|id| links.download_url(id)),
            cover_url: row.files.cover.as_deref().map(|name| links.cover_path(name)),
        })
        .collect()
}

const NOT_AVAILABLE: &str = "N/A";

pub fn render_text(records: &[RowRecord]) -> Vec<u8> {
    fn column_width<'a>(header: &str, cells: impl Iterator<Item = Option<&'a str>>) -> usize {
        cells
            .map(|cell| cell.unwrap_or(NOT_AVAILABLE).chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
    }

    let title_width = column_width("Title", records.iter().map(|r| Some(r.title.as_str())));
    let pdf_width = column_width("PDF", records.iter().map(|r| r.pdf_url.as_deref()));
    let audio_width = column_width("Audio", records.iter().map(|r| r.audio_url.as_deref()));

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<title_width$} {:<pdf_width$} {:<audio_width$} {}\n",
        "No.", "Title", "PDF", "Audio", "Cover"
    ));
    for r in records {
        out.push_str(&format!(
            "{:<4} {:<title_width$} {:<pdf_width$} {:<audio_width$} {}\n",
            r.position,
            r.title,
            r.pdf_url.as_deref().unwrap_or(NOT_AVAILABLE),
            r.audio_url.as_deref().unwrap_or(NOT_AVAILABLE),
            r.cover_url.as_deref().unwrap_or(NOT_AVAILABLE),
        ));
    }
    out.into_bytes()
}

pub fn render_json(records: &[RowRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(records: &[RowRecord]) -> Vec<u8> {
    report::render_html(records)
}
