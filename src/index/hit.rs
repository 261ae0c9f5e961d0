//! Point-in-region lookup for overlay clicks.

use crate::codec;
use crate::geometry::point_in_polygon;
use crate::model::{Point, Region, TableCell};

/// What a click landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    /// Region under the point
    pub region: &'a Region,

    /// Table cell under the point, if the region is a table
    pub cell: Option<&'a TableCell>,

    /// Compound token of `cell`
    pub cell_token: Option<String>,
}

impl<'a> Hit<'a> {
    /// Check if the hit landed on a table cell.
    pub fn is_cell(&self) -> bool {
        self.cell.is_some()
    }
}

/// Find the top-most clickable region containing `point`.
///
/// Regions are painted in list order, so the search runs back to front.
/// Inside a table the cells are tested before the table outline, again
/// last painted first. `point` is in source page coordinates.
pub fn hit_test(regions: &[Region], point: Point) -> Option<Hit<'_>> {
    for region in regions.iter().rev().filter(|r| r.clickable) {
        if let Some(cell) = region
            .table
            .as_ref()
            .and_then(|t| t.iter().rev().find(|c| point_in_polygon(point, &c.position)))
        {
            return Some(Hit {
                region,
                cell: Some(cell),
                cell_token: Some(codec::encode(&region.content_id, cell)),
            });
        }

        if point_in_polygon(point, &region.position) {
            return Some(Hit {
                region,
                cell: None,
                cell_token: None,
            });
        }
    }
    None
}
