//! Normalized, queryable view of an analysis payload.
//!
//! [`RegionIndex::build`] turns a loosely-structured analysis result into
//! per-page [`Region`] lists and a flat content-id lookup. Building never
//! fails: entries that cannot be understood are dropped and logged.
//!
//! # Example
//!
//! ```
//! use regionlink::index::RegionIndex;
//! use regionlink::model::ContentId;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "pages": [{
//!         "page_id": 1,
//!         "content": [{"pos": [0, 0, 10, 0, 10, 10, 0, 10], "text": "hello"}]
//!     }]
//! });
//! let index = RegionIndex::build(&payload);
//! let found = index.lookup(&ContentId::from(0)).unwrap();
//! assert_eq!(found.region.text.as_deref(), Some("hello"));
//! ```

mod hit;
mod json;
mod options;
mod payload;
mod projection;

pub use hit::{hit_test, Hit};
pub use json::{to_json, JsonFormat};
pub use options::IndexOptions;
pub use payload::PayloadShape;
pub use projection::{PageProjection, ProjectedCell, ProjectedRegion};

use crate::error::{Error, Result};
use crate::geometry::{click_to_source_point, resolve_resolution_with, ViewContext, ViewOptions};
use crate::model::{ContentId, Page, PageMetric, Point, Region};
use projection::PageFrame;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A region found by id, with the position of its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRef<'a> {
    /// The region
    pub region: &'a Region,

    /// Zero-based position of the page in the index
    pub page_index: usize,
}

impl RegionRef<'_> {
    /// Page number the region belongs to.
    pub fn page_id(&self) -> u32 {
        self.region.page_id
    }
}

/// Pages and regions of one analyzed document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionIndex {
    pages: Vec<Page>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    metrics: Vec<PageMetric>,

    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<String>,

    #[serde(skip)]
    shapes: Vec<Option<PayloadShape>>,

    /// Canonical content id -> (page position, region position)
    #[serde(skip)]
    by_id: HashMap<String, (usize, usize)>,
}

impl RegionIndex {
    /// Build an index from a raw payload with default options.
    pub fn build(payload: &Value) -> Self {
        Self::build_with_options(payload, &IndexOptions::default())
    }

    /// Build an index from a raw payload.
    pub fn build_with_options(payload: &Value, options: &IndexOptions) -> Self {
        let normalized = payload::normalize(payload, options);
        let mut index = Self {
            pages: normalized.pages,
            metrics: normalized.metrics,
            markdown: normalized.markdown,
            shapes: normalized.shapes,
            by_id: HashMap::new(),
        };
        index.rebuild_lookup();

        log::debug!(
            "Built region index: {} pages, {} regions",
            index.page_count(),
            index.region_count()
        );
        index
    }

    /// Build an index from already-normalized pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut index = Self {
            shapes: vec![None; pages.len()],
            pages,
            ..Default::default()
        };
        index.rebuild_lookup();
        index
    }

    /// Attach a metrics side table and return self.
    pub fn with_metrics(mut self, metrics: Vec<PageMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    fn rebuild_lookup(&mut self) {
        self.by_id.clear();
        for (page_index, page) in self.pages.iter().enumerate() {
            for (region_index, region) in page.regions.iter().enumerate() {
                self.by_id
                    .entry(region.content_id.canonical())
                    .or_insert((page_index, region_index));
            }
        }
    }

    /// All pages in document order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get a page by its page number.
    pub fn page(&self, page_id: u32) -> Option<&Page> {
        self.page_index(page_id).map(|i| &self.pages[i])
    }

    /// Position of a page in [`pages`](Self::pages).
    pub fn page_index(&self, page_id: u32) -> Option<usize> {
        self.pages.iter().position(|p| p.page_id == page_id)
    }

    /// Check if the index holds the given page.
    pub fn contains_page(&self, page_id: u32) -> bool {
        self.page_index(page_id).is_some()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of regions across all pages.
    pub fn region_count(&self) -> usize {
        self.pages.iter().map(Page::region_count).sum()
    }

    /// Check if the index has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The payload's metrics side table.
    pub fn metrics(&self) -> &[PageMetric] {
        &self.metrics
    }

    /// Document markdown carried by the payload.
    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    /// Payload shape a page's regions were read from.
    ///
    /// `None` for pages without region data and for indexes built with
    /// [`from_pages`](Self::from_pages).
    pub fn page_shape(&self, page_id: u32) -> Option<PayloadShape> {
        self.page_index(page_id)
            .and_then(|i| self.shapes.get(i).copied().flatten())
    }

    /// Find a region by id anywhere in the document.
    ///
    /// Ids are compared in canonical string form. When several pages reuse
    /// an id the earliest page wins; use [`lookup_on_page`](Self::lookup_on_page)
    /// to disambiguate.
    pub fn lookup(&self, content_id: &ContentId) -> Option<RegionRef<'_>> {
        let &(page_index, region_index) = self.by_id.get(&content_id.canonical())?;
        Some(RegionRef {
            region: &self.pages[page_index].regions[region_index],
            page_index,
        })
    }

    /// Find a region by id on one page.
    pub fn lookup_on_page(&self, page_id: u32, content_id: &ContentId) -> Option<&Region> {
        self.page(page_id)?.region(content_id)
    }

    /// Regions a content list shows for a page.
    ///
    /// Text regions with blank text are left out; images and tables are
    /// always listed.
    pub fn list_entries(&self, page_id: u32) -> Vec<&Region> {
        self.page(page_id)
            .map(|page| {
                page.regions
                    .iter()
                    .filter(|r| r.has_text() || r.is_image() || r.is_table())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolution of a page's coordinates, given the rendered width at zoom 1.
    pub fn resolution(
        &self,
        page_id: u32,
        rendered_base_width: f64,
        options: &ViewOptions,
    ) -> Option<f64> {
        let page = self.page(page_id)?;
        Some(resolve_resolution_with(
            page,
            &self.metrics,
            rendered_base_width,
            options,
        ))
    }

    /// Overlay geometry of a page under the given view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageNotFound`] for an unknown page and
    /// [`Error::InvalidArgument`] for a non-positive zoom.
    pub fn project_page(
        &self,
        page_id: u32,
        view: &ViewContext,
        options: &ViewOptions,
    ) -> Result<PageProjection> {
        let page = self.page(page_id).ok_or(Error::PageNotFound(page_id))?;
        let frame = PageFrame::resolve(page, &self.metrics, view, options)?;
        Ok(projection::project_page(page, &frame, view))
    }

    /// Resolve a click in view pixels to the region under it.
    ///
    /// # Errors
    ///
    /// Same as [`project_page`](Self::project_page).
    pub fn hit_at(
        &self,
        page_id: u32,
        click: Point,
        view: &ViewContext,
        options: &ViewOptions,
    ) -> Result<Option<Hit<'_>>> {
        let page = self.page(page_id).ok_or(Error::PageNotFound(page_id))?;
        let frame = PageFrame::resolve(page, &self.metrics, view, options)?;
        let source = click_to_source_point(click, view, frame.dpi_scale, &frame.view_box)?;
        Ok(hit_test(&page.regions, source))
    }

    /// Export the normalized index as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quad, RegionType};
    use serde_json::json;

    fn quad(x: f64, y: f64) -> Quad {
        Quad::from_rect(x, y, 20.0, 20.0).unwrap()
    }

    fn two_page_index() -> RegionIndex {
        let mut first = Page::new(1);
        first.add_region(Region::new(0, 1, RegionType::Paragraph, quad(0.0, 0.0)).with_text("a"));
        first.add_region(Region::new("T", 1, RegionType::Table, quad(50.0, 0.0)));
        first.add_region(Region::new(2, 1, RegionType::Text, quad(0.0, 50.0)).with_text("  "));

        let mut second = Page::new(2);
        second.add_region(Region::new(0, 2, RegionType::Paragraph, quad(0.0, 0.0)).with_text("b"));
        second.add_region(Region::new(9, 2, RegionType::Image, quad(0.0, 0.0)));

        RegionIndex::from_pages(vec![first, second])
    }

    #[test]
    fn test_counts() {
        let index = two_page_index();
        assert_eq!(index.page_count(), 2);
        assert_eq!(index.region_count(), 5);
        assert!(!index.is_empty());
        assert!(RegionIndex::default().is_empty());
    }

    #[test]
    fn test_lookup_first_page_wins() {
        let index = two_page_index();
        let found = index.lookup(&ContentId::from("0")).unwrap();
        assert_eq!(found.page_index, 0);
        assert_eq!(found.page_id(), 1);

        let found = index.lookup(&ContentId::from(9)).unwrap();
        assert_eq!(found.page_index, 1);
        assert!(index.lookup(&ContentId::from("missing")).is_none());
    }

    #[test]
    fn test_lookup_on_page() {
        let index = two_page_index();
        let region = index.lookup_on_page(2, &ContentId::from(0)).unwrap();
        assert_eq!(region.text.as_deref(), Some("b"));
        assert!(index.lookup_on_page(3, &ContentId::from(0)).is_none());
        assert!(index.lookup_on_page(1, &ContentId::from(9)).is_none());
    }

    #[test]
    fn test_list_entries_skip_blank_text() {
        let index = two_page_index();
        let ids: Vec<String> = index
            .list_entries(1)
            .iter()
            .map(|r| r.content_id.canonical())
            .collect();
        assert_eq!(ids, vec!["0", "T"]);
        assert_eq!(index.list_entries(2).len(), 2);
        assert!(index.list_entries(7).is_empty());
    }

    #[test]
    fn test_build_records_shapes() {
        let payload = json!({
            "pages": [
                {"page_id": 1, "rects": [{"position": [0,0,1,0,1,1,0,1]}]},
                {"page_id": 2}
            ],
            "markdown": "text"
        });
        let index = RegionIndex::build_with_options(&payload, &IndexOptions::new().sequential());
        assert_eq!(index.page_shape(1), Some(PayloadShape::Rects));
        assert_eq!(index.page_shape(2), None);
        assert_eq!(index.markdown(), Some("text"));
    }

    #[test]
    fn test_project_unknown_page() {
        let index = two_page_index();
        let view = ViewContext::new(100.0, 100.0);
        let result = index.project_page(5, &view, &ViewOptions::default());
        assert!(matches!(result, Err(Error::PageNotFound(5))));
    }

    #[test]
    fn test_hit_at() {
        let mut page = Page::new(1).with_size(300.0, 450.0);
        page.add_region(Region::new(4, 1, RegionType::Paragraph, Quad::from_rect(30.0, 60.0, 30.0, 30.0).unwrap()));
        let index = RegionIndex::from_pages(vec![page]);

        // 300 source units over 200 rendered pixels: dpi scale 2/3
        let view = ViewContext::new(200.0, 300.0);
        let options = ViewOptions::default();
        let hit = index.hit_at(1, Point::new(30.0, 50.0), &view, &options).unwrap();
        assert_eq!(hit.unwrap().region.content_id, ContentId::from(4));
        assert!(index.hit_at(1, Point::new(5.0, 5.0), &view, &options).unwrap().is_none());
    }

    #[test]
    fn test_to_json_skips_lookup() {
        let json = two_page_index().to_json(JsonFormat::Compact).unwrap();
        assert!(json.starts_with("{\"pages\":"));
        assert!(!json.contains("by_id"));
    }
}
