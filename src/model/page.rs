//! Page-level types.

use super::{ContentId, Region};
use serde::{Deserialize, Serialize};

/// A single analyzed page with its regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_id: u32,

    /// Page width in the analysis coordinate space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Page height in the analysis coordinate space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Skew angle reported by the backend, in degrees
    pub angle: f64,

    /// Pixel density the coordinates were produced at (DPI/PPI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,

    /// Regions in paint order
    pub regions: Vec<Region>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_id: u32) -> Self {
        Self {
            page_id,
            width: None,
            height: None,
            angle: 0.0,
            resolution: None,
            regions: Vec::new(),
        }
    }

    /// Set the source page size and return self.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the source resolution and return self.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Add a region to the page.
    pub fn add_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Find a region by id.
    pub fn region(&self, content_id: &ContentId) -> Option<&Region> {
        self.regions.iter().find(|r| &r.content_id == content_id)
    }

    /// Check if the page has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Get the number of regions on the page.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Source dimensions when both are known and positive.
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        }
    }
}

/// Per-page entry of the payload's `metrics` side table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetric {
    /// Page number (1-indexed)
    pub page_id: u32,

    /// Page angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,

    /// Dots per inch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<f64>,

    /// Pixels per inch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppi: Option<f64>,
}

impl PageMetric {
    /// First positive density, dpi before ppi.
    pub fn resolution(&self) -> Option<f64> {
        [self.dpi, self.ppi]
            .into_iter()
            .flatten()
            .find(|v| v.is_finite() && *v > 0.0)
    }
}
