//! # regionlink
//!
//! Region overlay and selection synchronization for document-analysis results.
//!
//! An analysis backend reports, for every page of a document, the outlines of
//! the paragraphs, titles, tables and images it recognized. This library
//! normalizes those results, maps outlines between the backend's coordinate
//! space and the rendered page, and keeps a single selection in sync between
//! a page overlay and a content list.
//!
//! ## Quick Start
//!
//! ```
//! use regionlink::geometry::{ViewContext, ViewOptions};
//! use regionlink::model::{ContentId, Point};
//! use regionlink::sync::SelectionSynchronizer;
//! use std::sync::Arc;
//!
//! fn main() -> regionlink::Result<()> {
//!     let payload = r#"{"pages": [{"page_id": 1, "width": 300, "height": 450,
//!         "structured": [{"id": 4, "type": "paragraph", "text": "Hello",
//!                         "pos": [30, 60, 60, 60, 60, 90, 30, 90]}]}]}"#;
//!     let index = regionlink::load_str(payload)?;
//!
//!     // The page is rendered 200 pixels wide at zoom 1.
//!     let view = ViewContext::new(200.0, 300.0);
//!     let hit = index.hit_at(1, Point::new(30.0, 50.0), &view, &ViewOptions::default())?;
//!     let id = hit.map(|h| h.region.content_id.clone()).unwrap_or(ContentId::from(0));
//!
//!     let mut sync = SelectionSynchronizer::new(Arc::new(index));
//!     let notification = sync.activate_from_overlay(&id, 1, None)?;
//!     assert_eq!(notification.content_id, ContentId::from(4));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Schema tolerance**: `rects`, `structured`, `content` and `detail`
//!   payload shapes, with or without a `result` envelope
//! - **Coordinate reconciliation**: resolution fallback chain, DPI scaling,
//!   quarter-turn rotation, view-box sizing and click hit-testing
//! - **Table cells**: stable compound cell tokens that round-trip
//! - **Selection sync**: one selection, two observers, stale loads ignored
//! - **Parallel processing**: uses Rayon to normalize multi-page payloads

pub mod codec;
pub mod error;
pub mod geometry;
pub mod index;
pub mod model;
pub mod sync;

// Re-export commonly used types
pub use codec::{CellIdentifierCodec, CompoundCellId};
pub use error::{Error, Result};
pub use geometry::{ViewBox, ViewContext, ViewOptions};
pub use index::{
    Hit, IndexOptions, JsonFormat, PageProjection, PayloadShape, RegionIndex, RegionRef,
};
pub use model::{
    BoundingBox, ContentId, Page, PageMetric, Point, Quad, Region, RegionType, TableCell,
    TableCells,
};
pub use sync::{
    ChannelObserver, DocumentSession, LoadOutcome, LoadTicket, SelectionNotification,
    SelectionObserver, SelectionState, SelectionSynchronizer,
};

use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Build a region index from payload text.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text is not JSON. A JSON document that does
/// not look like an analysis result yields an empty index instead.
///
/// # Example
///
/// ```
/// let index = regionlink::load_str(r#"{"pages": []}"#).unwrap();
/// assert!(index.is_empty());
/// ```
pub fn load_str(payload: &str) -> Result<RegionIndex> {
    load_str_with_options(payload, &IndexOptions::default())
}

/// Build a region index from payload text with custom options.
pub fn load_str_with_options(payload: &str, options: &IndexOptions) -> Result<RegionIndex> {
    let value: Value = serde_json::from_str(payload)?;
    Ok(RegionIndex::build_with_options(&value, options))
}

/// Build a region index from payload bytes.
pub fn load_bytes(data: &[u8]) -> Result<RegionIndex> {
    load_bytes_with_options(data, &IndexOptions::default())
}

/// Build a region index from payload bytes with custom options.
pub fn load_bytes_with_options(data: &[u8], options: &IndexOptions) -> Result<RegionIndex> {
    let value: Value = serde_json::from_slice(data)?;
    Ok(RegionIndex::build_with_options(&value, options))
}

/// Build a region index from a payload file.
///
/// # Example
///
/// ```no_run
/// use regionlink::load_file;
///
/// let index = load_file("analysis.json").unwrap();
/// println!("Pages: {}", index.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RegionIndex> {
    load_file_with_options(path, &IndexOptions::default())
}

/// Build a region index from a payload file with custom options.
///
/// # Example
///
/// ```no_run
/// use regionlink::{load_file_with_options, IndexOptions};
///
/// let options = IndexOptions::new().sequential();
/// let index = load_file_with_options("analysis.json", &options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &IndexOptions,
) -> Result<RegionIndex> {
    let path = path.as_ref();
    log::debug!("Loading analysis payload from {}", path.display());
    let data = std::fs::read(path)?;
    load_bytes_with_options(&data, options)
}

/// Build a region index from a reader.
///
/// # Example
///
/// ```no_run
/// use regionlink::load_reader;
/// use std::fs::File;
///
/// let file = File::open("analysis.json").unwrap();
/// let index = load_reader(file).unwrap();
/// ```
pub fn load_reader<R: Read>(reader: R) -> Result<RegionIndex> {
    load_reader_with_options(reader, &IndexOptions::default())
}

/// Build a region index from a reader with custom options.
pub fn load_reader_with_options<R: Read>(
    mut reader: R,
    options: &IndexOptions,
) -> Result<RegionIndex> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load_bytes_with_options(&data, options)
}

/// Normalize a payload file and export the index as JSON.
///
/// # Example
///
/// ```no_run
/// use regionlink::{to_json, JsonFormat};
///
/// let json = to_json("analysis.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("normalized.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    load_file(path)?.to_json(format)
}
