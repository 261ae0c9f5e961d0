//! Resolution determination and DPI scaling.

use super::options::ViewOptions;
use crate::error::{Error, Result};
use crate::model::{Page, PageMetric};

/// Determine the pixel density an analysis page was produced at.
///
/// Rules are tried in order and the first match wins:
///
/// 1. an explicit positive resolution on the page;
/// 2. a page width that differs from the renderer's base width at zoom 1,
///    giving `viewer_dpi * page.width / rendered_base_width`;
/// 3. a positive dpi/ppi in the metrics entry for this page;
/// 4. the fallback density (144).
///
/// The result is always positive.
///
/// # Example
///
/// ```
/// use regionlink::geometry::resolve_resolution;
/// use regionlink::model::Page;
///
/// let page = Page::new(1).with_size(300.0, 400.0);
/// assert_eq!(resolve_resolution(&page, &[], 200.0), 144.0);
/// ```
pub fn resolve_resolution(page: &Page, metrics: &[PageMetric], rendered_base_width: f64) -> f64 {
    resolve_resolution_with(page, metrics, rendered_base_width, &ViewOptions::default())
}

/// [`resolve_resolution`] with explicit viewer options.
pub fn resolve_resolution_with(
    page: &Page,
    metrics: &[PageMetric],
    rendered_base_width: f64,
    options: &ViewOptions,
) -> f64 {
    if let Some(dpi) = page.resolution.filter(|v| is_positive(*v)) {
        return dpi;
    }

    if let Some(width) = page.width.filter(|v| is_positive(*v)) {
        if is_positive(rendered_base_width) && (width - rendered_base_width).abs() > f64::EPSILON {
            return options.viewer_dpi() * (width / rendered_base_width);
        }
    }

    if let Some(dpi) = metrics
        .iter()
        .find(|m| m.page_id == page.page_id)
        .and_then(PageMetric::resolution)
    {
        return dpi;
    }

    options.fallback_dpi()
}

/// Ratio between the renderer's density and the result's density.
///
/// A non-positive `result_resolution` is a caller bug: the fallback chain in
/// [`resolve_resolution`] never produces one.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if either density is zero, negative or
/// not finite.
pub fn dpi_scale(viewer_resolution: f64, result_resolution: f64) -> Result<f64> {
    if !is_positive(result_resolution) {
        return Err(Error::InvalidArgument(format!(
            "result resolution must be positive, got {}",
            result_resolution
        )));
    }
    if !is_positive(viewer_resolution) {
        return Err(Error::InvalidArgument(format!(
            "viewer resolution must be positive, got {}",
            viewer_resolution
        )));
    }
    Ok(viewer_resolution / result_resolution)
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
