//! Point and quad transforms.

use crate::model::{BoundingBox, Point, Quad};

/// Scale a point by the viewer zoom and the DPI ratio.
pub fn scale_point(p: Point, zoom: f64, dpi_scale: f64) -> Point {
    let factor = zoom * dpi_scale;
    Point::new(p.x * factor, p.y * factor)
}

/// Reduce any angle to a quarter turn in `{0, 90, 180, 270}`.
///
/// Angles that are not a multiple of 90 after reduction map to 0.
pub fn quarter_turn(degrees: i32) -> u16 {
    match degrees.rem_euclid(360) {
        90 => 90,
        180 => 180,
        270 => 270,
        _ => 0,
    }
}

/// Rotate a point within a `width` x `height` page.
///
/// - 90: `(y, height - x)`
/// - 180: `(width - x, height - y)`
/// - 270: `(width - y, x)`
/// - otherwise: unchanged
pub fn rotate_point(p: Point, degrees: i32, width: f64, height: f64) -> Point {
    match quarter_turn(degrees) {
        90 => Point::new(p.y, height - p.x),
        180 => Point::new(width - p.x, height - p.y),
        270 => Point::new(width - p.y, p.x),
        _ => p,
    }
}

/// Page dimensions after a rotation: quarter turns swap the axes.
pub fn rotated_dimensions(width: f64, height: f64, degrees: i32) -> (f64, f64) {
    match quarter_turn(degrees) {
        90 | 270 => (height, width),
        _ => (width, height),
    }
}

/// Undo [`rotate_point`] called with the same arguments.
///
/// The reverse turn `360 - degrees` is applied in the rotated frame, so for
/// quarter turns the page dimensions are exchanged. For every point and page
/// size, `unrotate_point(rotate_point(p, r, w, h), r, w, h)` returns `p`.
pub fn unrotate_point(p: Point, degrees: i32, width: f64, height: f64) -> Point {
    let turn = quarter_turn(degrees) as i32;
    let (w, h) = rotated_dimensions(width, height, turn);
    rotate_point(p, 360 - turn, w, h)
}

/// Ray-casting parity test of `point` against the quad's four edges.
///
/// Points lying exactly on an edge may report either result.
pub fn point_in_polygon(point: Point, quad: &Quad) -> bool {
    let vertices = quad.points();
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box of a quad.
pub fn bounding_box(quad: &Quad) -> BoundingBox {
    let points = quad.points();
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    BoundingBox {
        min_x,
        min_y,
        max_x,
        max_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn rect() -> Quad {
        Quad::from_slice(&[10.0, 10.0, 100.0, 10.0, 100.0, 30.0, 10.0, 30.0]).unwrap()
    }

    #[test]
    fn test_scale_point() {
        let p = scale_point(Point::new(30.0, 60.0), 1.5, 2.0 / 3.0);
        assert!(p.approx_eq(&Point::new(30.0, 60.0), EPS));
    }

    #[test]
    fn test_rotate_point_formulas() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(rotate_point(p, 0, 100.0, 200.0), p);
        assert_eq!(rotate_point(p, 90, 100.0, 200.0), Point::new(20.0, 190.0));
        assert_eq!(rotate_point(p, 180, 100.0, 200.0), Point::new(90.0, 180.0));
        assert_eq!(rotate_point(p, 270, 100.0, 200.0), Point::new(80.0, 10.0));
    }

    #[test]
    fn test_rotation_is_normalized() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(rotate_point(p, -90, 100.0, 200.0), rotate_point(p, 270, 100.0, 200.0));
        assert_eq!(rotate_point(p, 450, 100.0, 200.0), rotate_point(p, 90, 100.0, 200.0));
        assert_eq!(rotate_point(p, 45, 100.0, 200.0), p);
        assert_eq!(quarter_turn(-180), 180);
    }

    #[test]
    fn test_unrotate_round_trip() {
        let points = [Point::new(0.0, 0.0), Point::new(12.5, 80.0), Point::new(99.0, 3.0)];
        for degrees in [0, 90, 180, 270, -90, 630] {
            for p in points {
                let rotated = rotate_point(p, degrees, 100.0, 240.0);
                let back = unrotate_point(rotated, degrees, 100.0, 240.0);
                assert!(back.approx_eq(&p, EPS), "{} deg: {:?} -> {:?}", degrees, p, back);
            }
        }
    }

    #[test]
    fn test_reverse_rotation_on_square_page() {
        let p = Point::new(17.0, 42.0);
        for degrees in [0, 90, 180, 270] {
            let rotated = rotate_point(p, degrees, 50.0, 50.0);
            let back = rotate_point(rotated, (360 - degrees).rem_euclid(360), 50.0, 50.0);
            assert!(back.approx_eq(&p, EPS));
        }
    }

    #[test]
    fn test_point_in_polygon() {
        let quad = rect();
        assert!(point_in_polygon(Point::new(50.0, 20.0), &quad));
        assert!(!point_in_polygon(Point::new(5.0, 20.0), &quad));
        assert!(!point_in_polygon(Point::new(50.0, 31.0), &quad));
    }

    #[test]
    fn test_point_in_skewed_polygon() {
        let quad = Quad::from_slice(&[0.0, 0.0, 10.0, 2.0, 12.0, 12.0, 2.0, 10.0]).unwrap();
        assert!(point_in_polygon(Point::new(6.0, 6.0), &quad));
        assert!(!point_in_polygon(Point::new(0.5, 9.0), &quad));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = bounding_box(&rect());
        assert_eq!(bbox.min_x, 10.0);
        assert_eq!(bbox.max_y, 30.0);
        assert_eq!(bbox.width, 90.0);
        assert_eq!(bbox.height, 20.0);
        assert_eq!(bbox.center(), Point::new(55.0, 20.0));
    }
}
