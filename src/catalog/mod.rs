use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// One of the file kinds that can be attached to a book title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Pdf,
    Audio,
    Cover,
}

impl Variant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(Self::Pdf),
            "audio" => Some(Self::Audio),
            "cover" => Some(Self::Cover),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Audio => "audio",
            Self::Cover => "cover",
        }
    }
}

/// One entry of the source data file. Field names follow the upstream JSON,
/// which uses PascalCase keys. `FileId` carries the remote identifier for
/// `pdf` and `audio` records, `CoverFile` the local filename for `cover`
/// records; whichever does not apply is absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BookFileRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "FileId", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(rename = "CoverFile", skip_serializing_if = "Option::is_none")]
    pub cover_file: Option<String>,
}

impl BookFileRecord {
    fn identifier(&self) -> Option<&str> {
        match Variant::parse(&self.kind)? {
            Variant::Cover => self.cover_file.as_deref(),
            Variant::Pdf | Variant::Audio => self.file_id.as_deref(),
        }
    }
}

/// At most one identifier per variant. Later records for the same
/// (title, variant) pair overwrite earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VariantFiles {
    pub pdf: Option<String>,
    pub audio: Option<String>,
    pub cover: Option<String>,
}

impl VariantFiles {
    pub fn get(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Pdf => self.pdf.as_deref(),
            Variant::Audio => self.audio.as_deref(),
            Variant::Cover => self.cover.as_deref(),
        }
    }

    pub fn set(&mut self, variant: Variant, identifier: String) {
        let slot = match variant {
            Variant::Pdf => &mut self.pdf,
            Variant::Audio => &mut self.audio,
            Variant::Cover => &mut self.cover,
        };
        *slot = Some(identifier);
    }

    pub fn is_empty(&self) -> bool {
        self.pdf.is_none() && self.audio.is_none() && self.cover.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookEntry {
    pub title: String,
    pub files: VariantFiles,
}

/// The grouped mapping of title -> available file variants. Titles are keyed
/// exactly (case-sensitive) and iterate in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<BookEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a flat record sequence into the grouped mapping. Records with an
    /// unrecognized type or a missing identifier contribute nothing but still
    /// create the title's entry; duplicate (title, variant) pairs resolve
    /// last-write-wins.
    pub fn group(records: &[BookFileRecord]) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.upsert(record);
        }
        catalog
    }

    fn upsert(&mut self, record: &BookFileRecord) {
        let idx = match self.index.get(&record.title) {
            Some(idx) => *idx,
            None => {
                self.entries.push(BookEntry {
                    title: record.title.clone(),
                    files: VariantFiles::default(),
                });
                let idx = self.entries.len() - 1;
                self.index.insert(record.title.clone(), idx);
                idx
            }
        };
        let variant = match Variant::parse(&record.kind) {
            Some(variant) => variant,
            None => return,
        };
        if let Some(identifier) = record.identifier() {
            self.entries[idx].files.set(variant, identifier.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order (first appearance of each title).
    pub fn entries(&self) -> &[BookEntry] {
        &self.entries
    }

    pub fn get(&self, title: &str) -> Option<&BookEntry> {
        self.index.get(title).map(|idx| &self.entries[*idx])
    }

    /// Narrows the catalog to titles containing the query as a
    /// case-insensitive substring. The query is trimmed first; an empty or
    /// whitespace-only query returns the catalog unchanged. Matching is not
    /// anchored, not tokenized, and not accent-normalized.
    pub fn filter(&self, query: &str) -> Catalog {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let mut filtered = Catalog::new();
        for entry in self.entries.iter() {
            if entry.title.to_lowercase().contains(&needle) {
                filtered.index.insert(entry.title.clone(), filtered.entries.len());
                filtered.entries.push(entry.clone());
            }
        }
        filtered
    }
}
