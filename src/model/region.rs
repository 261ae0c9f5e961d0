//! Region-level types.

use super::{Quad, TableCells};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a region within its page.
///
/// Payloads use integers or strings interchangeably, so equality and
/// hashing go through the canonical string form: `ContentId::from(5)`
/// equals `ContentId::from("5")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    /// Numeric id
    Number(i64),
    /// String id
    Text(String),
}

impl ContentId {
    /// Canonical string form used for all comparisons.
    pub fn canonical(&self) -> String {
        match self {
            ContentId::Number(n) => n.to_string(),
            ContentId::Text(s) => s.clone(),
        }
    }

    /// Compare against a raw canonical string.
    pub fn matches(&self, canonical: &str) -> bool {
        match self {
            ContentId::Number(n) => n.to_string() == canonical,
            ContentId::Text(s) => s == canonical,
        }
    }
}

impl PartialEq for ContentId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContentId::Number(a), ContentId::Number(b)) => a == b,
            (ContentId::Text(a), ContentId::Text(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for ContentId {}

impl Hash for ContentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentId::Number(n) => write!(f, "{}", n),
            ContentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ContentId {
    fn from(n: i64) -> Self {
        ContentId::Number(n)
    }
}

impl From<i32> for ContentId {
    fn from(n: i32) -> Self {
        ContentId::Number(n as i64)
    }
}

impl From<u32> for ContentId {
    fn from(n: u32) -> Self {
        ContentId::Number(n as i64)
    }
}

impl From<usize> for ContentId {
    fn from(n: usize) -> Self {
        ContentId::Number(n as i64)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        ContentId::Text(s.to_string())
    }
}

impl From<String> for ContentId {
    fn from(s: String) -> Self {
        ContentId::Text(s)
    }
}

/// Kind of structural element detected on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionType {
    /// Body paragraph
    Paragraph,
    /// Title or heading
    Title,
    /// Table with optional cell structure
    Table,
    /// Image or figure
    Image,
    /// Plain text line or block
    #[default]
    Text,
    /// Mathematical formula
    Formula,
    /// Handwritten content
    Handwriting,
    /// Any type this crate does not know about
    Other(String),
}

impl RegionType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            RegionType::Paragraph => "paragraph",
            RegionType::Title => "title",
            RegionType::Table => "table",
            RegionType::Image => "image",
            RegionType::Text => "text",
            RegionType::Formula => "formula",
            RegionType::Handwriting => "handwriting",
            RegionType::Other(name) => name,
        }
    }

    /// Human-readable label for list views.
    ///
    /// Unknown types share one generic label.
    pub fn label(&self) -> &'static str {
        match self {
            RegionType::Paragraph => "Paragraph",
            RegionType::Title => "Title",
            RegionType::Table => "Table",
            RegionType::Image => "Image",
            RegionType::Text => "Text",
            RegionType::Formula => "Formula",
            RegionType::Handwriting => "Handwriting",
            RegionType::Other(_) => "Element",
        }
    }

    /// Check if this is a type the crate has no dedicated variant for.
    pub fn is_unknown(&self) -> bool {
        matches!(self, RegionType::Other(_))
    }
}

impl From<&str> for RegionType {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "paragraph" => RegionType::Paragraph,
            "title" => RegionType::Title,
            "table" => RegionType::Table,
            "image" => RegionType::Image,
            "" | "text" | "textblock" => RegionType::Text,
            "formula" => RegionType::Formula,
            "handwriting" => RegionType::Handwriting,
            _ => RegionType::Other(name.to_string()),
        }
    }
}

impl From<String> for RegionType {
    fn from(name: String) -> Self {
        RegionType::from(name.as_str())
    }
}

impl From<RegionType> for String {
    fn from(kind: RegionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected structural element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier, unique within the page
    pub content_id: ContentId,

    /// Page this region belongs to
    pub page_id: u32,

    /// Element kind
    #[serde(rename = "type")]
    pub kind: RegionType,

    /// Finer-grained kind reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,

    /// Outline in source page coordinates
    pub position: Quad,

    /// Recognized text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Cell structure for table regions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableCells>,

    /// Reference to the extracted image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    /// Heading level for titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u32>,

    /// Short badge text drawn next to the outline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether clicks on the overlay may select this region
    pub clickable: bool,
}

impl Region {
    /// Create a region with the required fields.
    pub fn new(
        content_id: impl Into<ContentId>,
        page_id: u32,
        kind: RegionType,
        position: Quad,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            page_id,
            kind,
            sub_type: None,
            position,
            text: None,
            table: None,
            image_ref: None,
            outline_level: None,
            label: None,
            clickable: true,
        }
    }

    /// Set text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set table cells and return self.
    pub fn with_table(mut self, table: TableCells) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the image reference and return self.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Set clickability and return self.
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Check if the region carries non-blank text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Check if the region has table cells.
    pub fn has_cells(&self) -> bool {
        self.table.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Check if this region is a table.
    pub fn is_table(&self) -> bool {
        self.kind == RegionType::Table || self.has_cells()
    }

    /// Check if this region is an image.
    pub fn is_image(&self) -> bool {
        self.kind == RegionType::Image || self.image_ref.is_some()
    }
}
