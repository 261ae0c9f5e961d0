//! Coordinate math shared by every overlay transform.
//!
//! Analysis backends report region outlines at their own pixel density,
//! while the document renderer draws at 96 DPI, at a user-chosen zoom and
//! possibly rotated. Everything here is a pure function over plain values:
//! the resolution fallback chain, the DPI ratio, rotation and scaling of
//! points, hit-testing and the overlay view-box policy.
//!
//! # Example
//!
//! ```
//! use regionlink::geometry::{dpi_scale, resolve_resolution, resolve_view_box_size};
//! use regionlink::model::Page;
//!
//! # fn main() -> regionlink::Result<()> {
//! let page = Page::new(1).with_size(300.0, 450.0);
//! let dpi = resolve_resolution(&page, &[], 200.0);
//! let scale = dpi_scale(96.0, dpi)?;
//! let vb = resolve_view_box_size(page.width, page.height, 200.0, 300.0, 1.0, scale)?;
//! assert_eq!(vb.width, 300.0);
//! # Ok(())
//! # }
//! ```

mod options;
mod resolution;
mod transform;
mod view;

pub use options::{ViewOptions, DEFAULT_RESULT_RESOLUTION, VIEWER_RESOLUTION};
pub use resolution::{dpi_scale, resolve_resolution, resolve_resolution_with};
pub use transform::{
    bounding_box, point_in_polygon, quarter_turn, rotate_point, rotated_dimensions, scale_point,
    unrotate_point,
};
pub use view::{
    click_to_source_point, project_quad, resolve_view_box_size, resolve_view_box_size_with,
    ViewBox, ViewContext,
};
