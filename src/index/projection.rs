//! Overlay geometry for one page in the current view.

use crate::codec;
use crate::error::Result;
use crate::geometry::{
    dpi_scale, project_quad, resolve_resolution_with, resolve_view_box_size_with, ViewBox,
    ViewContext, ViewOptions,
};
use crate::model::{ContentId, Page, PageMetric, Quad, RegionType};
use serde::Serialize;

/// Everything an overlay renderer needs to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageProjection {
    /// Page number (1-indexed)
    pub page_id: u32,

    /// Density the page's coordinates were produced at
    pub resolution: f64,

    /// Viewer density divided by `resolution`
    pub dpi_scale: f64,

    /// Overlay coordinate system in source units
    pub view_box: ViewBox,

    /// Regions in paint order
    pub regions: Vec<ProjectedRegion>,
}

/// A region mapped into view pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRegion {
    /// Region identifier
    pub content_id: ContentId,

    /// Element kind
    #[serde(rename = "type")]
    pub kind: RegionType,

    /// Badge text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether the outline reacts to clicks
    pub clickable: bool,

    /// Outline in view pixels
    pub quad: Quad,

    /// Table cells in view pixels
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<ProjectedCell>,
}

/// A table cell mapped into view pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedCell {
    /// Compound cell token
    pub token: String,

    /// Outline in view pixels
    pub quad: Quad,
}

/// Density, scale and view box of a page under a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PageFrame {
    pub resolution: f64,
    pub dpi_scale: f64,
    pub view_box: ViewBox,
}

impl PageFrame {
    pub(crate) fn resolve(
        page: &Page,
        metrics: &[PageMetric],
        view: &ViewContext,
        options: &ViewOptions,
    ) -> Result<Self> {
        let resolution =
            resolve_resolution_with(page, metrics, view.rendered_page_width, options);
        let dpi_scale = dpi_scale(options.viewer_dpi(), resolution)?;
        let view_box = resolve_view_box_size_with(
            page.width,
            page.height,
            view.scaled_width(),
            view.scaled_height(),
            view.zoom,
            dpi_scale,
            options,
        )?;
        Ok(Self {
            resolution,
            dpi_scale,
            view_box,
        })
    }
}

pub(crate) fn project_page(page: &Page, frame: &PageFrame, view: &ViewContext) -> PageProjection {
    let project = |quad: &Quad| project_quad(quad, view, frame.dpi_scale, &frame.view_box);

    let regions = page
        .regions
        .iter()
        .filter_map(|region| {
            let Some(quad) = project(&region.position) else {
                log::debug!(
                    "Page {}: region {} projects outside finite space",
                    page.page_id,
                    region.content_id
                );
                return None;
            };
            let cells = region
                .table
                .iter()
                .flat_map(|t| t.iter())
                .filter_map(|cell| {
                    Some(ProjectedCell {
                        token: codec::encode(&region.content_id, cell),
                        quad: project(&cell.position)?,
                    })
                })
                .collect();
            Some(ProjectedRegion {
                content_id: region.content_id.clone(),
                kind: region.kind.clone(),
                label: region.label.clone(),
                clickable: region.clickable,
                quad,
                cells,
            })
        })
        .collect();

    PageProjection {
        page_id: page.page_id,
        resolution: frame.resolution,
        dpi_scale: frame.dpi_scale,
        view_box: frame.view_box,
        regions,
    }
}
