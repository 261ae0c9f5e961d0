//! Normalized analysis model.
//!
//! These types are what every other module works with once a raw backend
//! payload has gone through [`crate::index::RegionIndex::build`]. Positions
//! are always in the source page coordinate space of the analysis result.

mod page;
mod quad;
mod region;
mod table;

pub use page::{Page, PageMetric};
pub use quad::{BoundingBox, Point, Quad};
pub use region::{ContentId, Region, RegionType};
pub use table::{TableCell, TableCells};
