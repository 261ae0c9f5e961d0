//! Renderer view state and the mapping between source and view space.

use super::options::ViewOptions;
use super::resolution::is_positive;
use super::transform::{quarter_turn, rotate_point, scale_point, unrotate_point};
use crate::error::{Error, Result};
use crate::model::{Point, Quad};
use serde::{Deserialize, Serialize};

/// What the rendering collaborator reports about the page on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    /// Rendered page width in pixels at zoom 1
    pub rendered_page_width: f64,

    /// Rendered page height in pixels at zoom 1
    pub rendered_page_height: f64,

    /// Current zoom factor
    pub zoom: f64,

    /// Current rotation (0, 90, 180, 270)
    pub rotation_degrees: u16,

    /// Page currently shown (1-indexed)
    pub current_page: u32,
}

impl ViewContext {
    /// Create a view of page 1 at zoom 1 with no rotation.
    pub fn new(rendered_page_width: f64, rendered_page_height: f64) -> Self {
        Self {
            rendered_page_width,
            rendered_page_height,
            zoom: 1.0,
            rotation_degrees: 0,
            current_page: 1,
        }
    }

    /// Set zoom and return self.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set rotation and return self. Any angle is reduced to a quarter turn.
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation_degrees = quarter_turn(degrees);
        self
    }

    /// Set the current page and return self.
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    /// Rendered width at the current zoom.
    pub fn scaled_width(&self) -> f64 {
        self.rendered_page_width * self.zoom
    }

    /// Rendered height at the current zoom.
    pub fn scaled_height(&self) -> f64 {
        self.rendered_page_height * self.zoom
    }

    fn rotation(&self) -> i32 {
        self.rotation_degrees as i32
    }
}

/// Size of the overlay coordinate system in source units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Width in source coordinates
    pub width: f64,
    /// Height in source coordinates
    pub height: f64,
}

impl ViewBox {
    /// SVG `viewBox` attribute form.
    pub fn to_svg_attr(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Decide the overlay view box.
///
/// A known positive source dimension is used as is. A missing one is derived
/// from the rendered size as `rendered / zoom / dpi_scale`, rounded to two
/// decimals.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when a dimension must be derived and
/// `zoom` or `dpi_scale` is not positive.
pub fn resolve_view_box_size(
    source_width: Option<f64>,
    source_height: Option<f64>,
    rendered_width: f64,
    rendered_height: f64,
    zoom: f64,
    dpi_scale: f64,
) -> Result<ViewBox> {
    resolve_view_box_size_with(
        source_width,
        source_height,
        rendered_width,
        rendered_height,
        zoom,
        dpi_scale,
        &ViewOptions::default(),
    )
}

/// [`resolve_view_box_size`] with explicit viewer options.
pub fn resolve_view_box_size_with(
    source_width: Option<f64>,
    source_height: Option<f64>,
    rendered_width: f64,
    rendered_height: f64,
    zoom: f64,
    dpi_scale: f64,
    options: &ViewOptions,
) -> Result<ViewBox> {
    let derive = |rendered: f64| -> Result<f64> {
        let factor = view_factor(zoom, dpi_scale)?;
        Ok(round_to(rendered / factor, options.view_box_precision))
    };

    let width = match source_width.filter(|w| is_positive(*w)) {
        Some(w) => w,
        None => derive(rendered_width)?,
    };
    let height = match source_height.filter(|h| is_positive(*h)) {
        Some(h) => h,
        None => derive(rendered_height)?,
    };

    Ok(ViewBox { width, height })
}

/// Map a source-space quad into view pixels.
///
/// Each vertex is rotated inside the view box, then scaled by
/// `zoom * dpi_scale`. Returns `None` if the transform produces a
/// non-finite coordinate.
pub fn project_quad(
    quad: &Quad,
    view: &ViewContext,
    dpi_scale: f64,
    view_box: &ViewBox,
) -> Option<Quad> {
    quad.map_points(|p| {
        let rotated = rotate_point(p, view.rotation(), view_box.width, view_box.height);
        scale_point(rotated, view.zoom, dpi_scale)
    })
}

/// Map a click in view pixels back into source space.
///
/// This is the inverse of [`project_quad`] for a single point.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `zoom` or `dpi_scale` is not positive.
pub fn click_to_source_point(
    click: Point,
    view: &ViewContext,
    dpi_scale: f64,
    view_box: &ViewBox,
) -> Result<Point> {
    let factor = view_factor(view.zoom, dpi_scale)?;
    let unscaled = Point::new(click.x / factor, click.y / factor);
    Ok(unrotate_point(
        unscaled,
        view.rotation(),
        view_box.width,
        view_box.height,
    ))
}

fn view_factor(zoom: f64, dpi_scale: f64) -> Result<f64> {
    if !is_positive(zoom) {
        return Err(Error::InvalidArgument(format!(
            "zoom must be positive, got {}",
            zoom
        )));
    }
    if !is_positive(dpi_scale) {
        return Err(Error::InvalidArgument(format!(
            "dpi scale must be positive, got {}",
            dpi_scale
        )));
    }
    Ok(zoom * dpi_scale)
}

fn round_to(value: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(d) => {
            let factor = 10f64.powi(d as i32);
            (value * factor).round() / factor
        }
        None => value,
    }
}
