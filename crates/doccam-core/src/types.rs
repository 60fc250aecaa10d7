// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometric types for document detection.

use serde::{Deserialize, Serialize};

/// A point on the pixel grid (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`, computed exactly.
    pub fn distance_squared(&self, other: GridPoint) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Promote to floating point for use in geometric transforms.
    pub fn to_f64(self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cross product of the vectors (origin -> a) and (origin -> b).
///
/// Negative when `b` lies clockwise of `a` in a y-up frame, which is
/// counter-clockwise on screen where y grows downward.
pub fn cross(origin: GridPoint, a: GridPoint, b: GridPoint) -> i64 {
    let (ax, ay) = (
        i64::from(a.x) - i64::from(origin.x),
        i64::from(a.y) - i64::from(origin.y),
    );
    let (bx, by) = (
        i64::from(b.x) - i64::from(origin.x),
        i64::from(b.y) - i64::from(origin.y),
    );
    ax * by - bx * ay
}

/// Area enclosed by a closed polygon, via the shoelace formula.
pub fn polygon_area(points: &[GridPoint]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area: i64 = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += i64::from(points[i].x) * i64::from(points[j].y);
        twice_area -= i64::from(points[j].x) * i64::from(points[i].y);
    }
    twice_area.abs() as f64 / 2.0
}

/// A closed boundary curve on the pixel grid.
///
/// The sequence wraps: the last point is adjacent to the first. A contour
/// always holds at least three points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<GridPoint>,
}

impl Contour {
    /// Minimum number of points in a closed contour.
    pub const MIN_POINTS: usize = 3;

    /// Wrap a point sequence, or `None` if it is too short to be closed.
    pub fn new(points: Vec<GridPoint>) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GridPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area in square pixels.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

/// Minimal-area rectangle enclosing a point set.
///
/// `width` is measured along the side whose direction is closest to the
/// image x-axis, so an upright landscape page has `width > height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRectangle {
    pub center: (f32, f32),
    pub width: f32,
    pub height: f32,
    /// Rotation of the width side against the x-axis, in (-90, 90].
    pub angle_degrees: f32,
}

impl OrientedRectangle {
    /// Build from the four corners of a rectangle, in any order.
    pub fn from_corners(corners: &[GridPoint; 4]) -> Self {
        // The corner farthest from the first one is its diagonal partner; the
        // other two share a side with it.
        let origin = corners[0];
        let diagonal = (1..4)
            .max_by_key(|&i| origin.distance_squared(corners[i]))
            .unwrap_or(2);
        let mut adjacent = (1..4).filter(|&i| i != diagonal).map(|i| corners[i]);
        let first = adjacent.next().unwrap_or(origin);
        let second = adjacent.next().unwrap_or(origin);

        let side = |p: GridPoint| ((p.x - origin.x) as f32, (p.y - origin.y) as f32);
        let (ax, ay) = side(first);
        let (bx, by) = side(second);
        let len_a = ax.hypot(ay);
        let len_b = bx.hypot(by);

        let (dx, dy, width, height) = if ax.abs() * len_b >= bx.abs() * len_a {
            (ax, ay, len_a, len_b)
        } else {
            (bx, by, len_b, len_a)
        };

        let mut angle = dy.atan2(dx).to_degrees();
        if angle > 90.0 {
            angle -= 180.0;
        } else if angle <= -90.0 {
            angle += 180.0;
        }

        let cx = corners.iter().map(|p| p.x as f32).sum::<f32>() / 4.0;
        let cy = corners.iter().map(|p| p.y as f32).sum::<f32>() / 4.0;

        Self {
            center: (cx, cy),
            width,
            height,
            angle_degrees: angle,
        }
    }

    /// `height / width`. Not finite when the rectangle has collapsed.
    pub fn aspect_ratio(&self) -> f32 {
        self.height / self.width
    }

    /// Aspect ratio seen from a canonically ordered `quad`, whose corner 0 to
    /// corner 3 edge becomes the output width.
    ///
    /// When that edge lies along the rectangle's height side rather than its
    /// width side, the ratio is inverted to `width / height`.
    pub fn aspect_ratio_along(&self, quad: &Quadrilateral) -> f32 {
        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();
        let origin = quad.corners[0];
        // |cos| of the angle between the width side and the edge to `to`.
        let alignment = |to: GridPoint| {
            let (dx, dy) = ((to.x - origin.x) as f32, (to.y - origin.y) as f32);
            (dx * cos + dy * sin).abs() / dx.hypot(dy)
        };
        if alignment(quad.corners[1]) > alignment(quad.corners[3]) {
            self.width / self.height
        } else {
            self.aspect_ratio()
        }
    }
}

/// Four document corners.
///
/// Unordered straight out of simplification; after canonicalization the
/// corners run counter-clockwise on screen starting from the corner nearest
/// the image origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [GridPoint; 4],
}

impl Quadrilateral {
    pub fn new(corners: [GridPoint; 4]) -> Self {
        Self { corners }
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.corners)
    }

    /// Whether any three of the four corners lie on one line.
    pub fn has_collinear_triple(&self) -> bool {
        let c = &self.corners;
        [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)]
            .iter()
            .any(|&(i, j, k)| cross(c[i], c[j], c[k]) == 0)
    }
}

/// Everything learned about the document before rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Canonically ordered corners.
    pub quadrilateral: Quadrilateral,
    /// Output height over output width: the oriented rectangle's sides,
    /// with the side along corner 0 to corner 3 taken as the width.
    pub aspect_ratio: f32,
    pub oriented_rect: OrientedRectangle,
    /// Approximation tolerance (pixels) at which the hull became 4 vertices.
    pub tolerance: u32,
    /// Boundary area divided by frame area.
    pub area_ratio: f64,
    pub contour_points: usize,
    pub hull_points: usize,
}

impl Detection {
    /// Output height for a given output width, truncated like the warp does.
    pub fn dest_height(&self, dest_width: u32) -> u32 {
        (dest_width as f32 * self.aspect_ratio) as u32
    }
}
