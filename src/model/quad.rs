//! Quadrilateral positions and simple planar types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in some page coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A region outline: four (x, y) vertices stored as 8 numbers.
///
/// Vertices are ordered top-left, top-right, bottom-right, bottom-left by
/// convention. Every value is finite; construction rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Quad([f64; 8]);

impl Quad {
    /// Number of coordinates in a quad.
    pub const LEN: usize = 8;

    /// Build a quad from a slice of exactly 8 finite numbers.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() != Self::LEN || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut coords = [0.0; 8];
        coords.copy_from_slice(values);
        Some(Self(coords))
    }

    /// Build a quad from its four vertices.
    pub fn from_points(points: [Point; 4]) -> Option<Self> {
        let mut coords = [0.0; 8];
        for (i, p) in points.iter().enumerate() {
            coords[i * 2] = p.x;
            coords[i * 2 + 1] = p.y;
        }
        Self::from_slice(&coords)
    }

    /// Build an axis-aligned quad from two corners.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        Self::from_slice(&[
            x,
            y,
            x + width,
            y,
            x + width,
            y + height,
            x,
            y + height,
        ])
    }

    /// Raw coordinates `[x1, y1, x2, y2, x3, y3, x4, y4]`.
    pub fn coords(&self) -> &[f64; 8] {
        &self.0
    }

    /// The four vertices in stored order.
    pub fn points(&self) -> [Point; 4] {
        let c = &self.0;
        [
            Point::new(c[0], c[1]),
            Point::new(c[2], c[3]),
            Point::new(c[4], c[5]),
            Point::new(c[6], c[7]),
        ]
    }

    /// Apply `f` to every vertex.
    ///
    /// Returns `None` if `f` produces a non-finite coordinate.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Option<Self> {
        let [a, b, c, d] = self.points();
        Self::from_points([f(a), f(b), f(c), f(d)])
    }

    /// SVG `points` attribute form: `"x1,y1 x2,y2 x3,y3 x4,y4"`.
    pub fn to_svg_points(&self) -> String {
        self.points()
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// SVG path data form: `"M x1 y1 L x2 y2 L x3 y3 L x4 y4 Z"`.
    pub fn to_svg_path(&self) -> String {
        let mut commands: Vec<String> = self
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{} {} {}", command, p.x, p.y)
            })
            .collect();
        commands.push("Z".to_string());
        commands.join(" ")
    }
}

impl TryFrom<Vec<f64>> for Quad {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Quad::from_slice(&values).ok_or_else(|| {
            format!(
                "quad needs {} finite numbers, got {}",
                Quad::LEN,
                values.len()
            )
        })
    }
}

impl From<Quad> for Vec<f64> {
    fn from(quad: Quad) -> Self {
        quad.0.to_vec()
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| format!("{:.2}", v)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Axis-aligned extent of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x
    pub min_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest x
    pub max_x: f64,
    /// Largest y
    pub max_y: f64,
    /// `max_x - min_x`
    pub width: f64,
    /// `max_y - min_y`
    pub height: f64,
}

impl BoundingBox {
    /// Center point of the box.
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width / 2.0,
            self.min_y + self.height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_from_slice() {
        assert!(Quad::from_slice(&[10.0, 10.0, 100.0, 10.0, 100.0, 30.0, 10.0, 30.0]).is_some());
        assert!(Quad::from_slice(&[1.0, 2.0, 3.0]).is_none());
        assert!(Quad::from_slice(&[0.0; 9]).is_none());
    }

    #[test]
    fn test_quad_rejects_non_finite() {
        let mut values = [0.0; 8];
        values[3] = f64::NAN;
        assert!(Quad::from_slice(&values).is_none());
        values[3] = f64::INFINITY;
        assert!(Quad::from_slice(&values).is_none());
    }

    #[test]
    fn test_quad_serde_shape() {
        let quad = Quad::from_rect(0.0, 0.0, 2.0, 1.0).unwrap();
        let json = serde_json::to_string(&quad).unwrap();
        assert_eq!(json, "[0.0,0.0,2.0,0.0,2.0,1.0,0.0,1.0]");

        assert!(serde_json::from_str::<Quad>("[1,2,3,4]").is_err());
    }

    #[test]
    fn test_svg_forms() {
        let quad = Quad::from_rect(1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(quad.to_svg_points(), "1,2 4,2 4,6 1,6");
        assert_eq!(quad.to_svg_path(), "M 1 2 L 4 2 L 4 6 L 1 6 Z");
    }
}
