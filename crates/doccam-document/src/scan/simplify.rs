// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral simplification — reduce the boundary's convex hull to four
// corners and measure the document's aspect ratio.

use doccam_core::config::SimplifyConfig;
use doccam_core::error::PipelineFailure;
use doccam_core::{Contour, GridPoint, OrientedRectangle, Quadrilateral};
use imageproc::geometry;
use imageproc::point::Point;
use tracing::{debug, info, instrument};

/// Four corners plus the measurements taken on the way to them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedQuad {
    /// Corners in the order the approximation produced them.
    pub quadrilateral: Quadrilateral,
    /// `height / width` of `oriented_rect`.
    pub aspect_ratio: f32,
    pub oriented_rect: OrientedRectangle,
    /// Tolerance (pixels) at which the hull first collapsed to 4 vertices.
    pub tolerance: u32,
    pub hull: Contour,
}

fn to_imageproc(points: &[GridPoint]) -> Vec<Point<i32>> {
    points.iter().map(|p| Point::new(p.x, p.y)).collect()
}

fn from_imageproc(points: &[Point<i32>]) -> Vec<GridPoint> {
    points.iter().map(|p| GridPoint::new(p.x, p.y)).collect()
}

/// Smallest convex polygon containing every point.
pub fn convex_hull(points: &[GridPoint]) -> Vec<GridPoint> {
    let input = to_imageproc(points);
    from_imageproc(&geometry::convex_hull(input.as_slice()))
}

/// Minimal-area rectangle around a point set.
pub fn oriented_rectangle(points: &[GridPoint]) -> OrientedRectangle {
    let input = to_imageproc(points);
    let corners = geometry::min_area_rect(input.as_slice());
    OrientedRectangle::from_corners(&corners.map(|p| GridPoint::new(p.x, p.y)))
}

/// Distance from `p` to the infinite line through `a` and `b`, or to `a`
/// when the two coincide.
fn line_distance(p: GridPoint, a: GridPoint, b: GridPoint) -> f64 {
    let (px, py) = p.to_f64();
    let (ax, ay) = a.to_f64();
    let (bx, by) = b.to_f64();
    let (dx, dy) = (bx - ax, by - ay);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return (px - ax).hypot(py - ay);
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / len
}

/// Douglas–Peucker over an open chain; returns which points survive.
fn douglas_peucker(chain: &[GridPoint], tolerance: f64) -> Vec<bool> {
    let mut keep = vec![false; chain.len()];
    if chain.is_empty() {
        return keep;
    }
    let last = chain.len() - 1;
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in start + 1..end {
            let d = line_distance(chain[i], chain[start], chain[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }
    keep
}

fn farthest_from(points: &[GridPoint], from: usize) -> usize {
    let origin = points[from];
    let mut best = from;
    let mut best_dist = 0;
    for (i, p) in points.iter().enumerate() {
        let d = origin.distance_squared(*p);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Approximate a closed polygon with fewer vertices, each dropped vertex
/// lying within `tolerance` pixels of the simplified outline.
///
/// The ring is cut at two mutually distant vertices and each half is
/// simplified as an open chain. The result never repeats a vertex.
pub fn approximate_closed_polygon(points: &[GridPoint], tolerance: f64) -> Vec<GridPoint> {
    let n = points.len();
    if n <= 3 {
        return points.to_vec();
    }

    let far = farthest_from(points, 0);
    let start = farthest_from(points, far);
    if start == far {
        return vec![points[start]];
    }

    let walk = |from: usize, to: usize| -> Vec<GridPoint> {
        let len = (to + n - from) % n + 1;
        (0..len).map(|k| points[(from + k) % n]).collect()
    };
    let first = walk(start, far);
    let second = walk(far, start);

    let mut out = Vec::new();
    for chain in [&first, &second] {
        let keep = douglas_peucker(chain, tolerance);
        // Drop the chain's end point; it opens the next chain.
        out.extend(
            chain[..chain.len() - 1]
                .iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(p, _)| *p),
        );
    }
    out
}

/// Reduce a boundary contour to a quadrilateral.
///
/// The contour's convex hull is approximated at increasing integer
/// tolerances until exactly four vertices remain. The aspect ratio comes
/// from the minimal-area rectangle around the hull.
#[instrument(skip_all, fields(contour_points = contour.len()))]
pub fn simplify_to_quad(
    contour: &Contour,
    config: &SimplifyConfig,
) -> Result<SimplifiedQuad, PipelineFailure> {
    let hull_points = convex_hull(contour.points());
    let hull_len = hull_points.len();
    let Some(hull) = Contour::new(hull_points) else {
        debug!(hull_points = hull_len, "Boundary hull is degenerate");
        return Err(PipelineFailure::CannotSimplifyToQuad {
            last_vertex_count: hull_len,
        });
    };

    let oriented_rect = oriented_rectangle(hull.points());
    let aspect_ratio = oriented_rect.aspect_ratio();
    debug!(
        hull_points = hull.len(),
        width = oriented_rect.width,
        height = oriented_rect.height,
        angle = oriented_rect.angle_degrees,
        "Measured oriented rectangle"
    );

    let mut last_vertex_count = hull.len();
    for tolerance in config.tolerance_start..=config.tolerance_max {
        let approx = approximate_closed_polygon(hull.points(), f64::from(tolerance));
        last_vertex_count = approx.len();
        if let &[a, b, c, d] = approx.as_slice() {
            info!(tolerance, aspect_ratio, "Boundary simplified to 4 corners");
            return Ok(SimplifiedQuad {
                quadrilateral: Quadrilateral::new([a, b, c, d]),
                aspect_ratio,
                oriented_rect,
                tolerance,
                hull,
            });
        }
    }

    debug!(last_vertex_count, "Tolerance range exhausted");
    Err(PipelineFailure::CannotSimplifyToQuad { last_vertex_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::fixtures::gp;
    use approx::assert_relative_eq;

    fn contour(raw: &[(i32, i32)]) -> Contour {
        Contour::new(raw.iter().copied().map(GridPoint::from).collect()).unwrap()
    }

    fn octagon() -> Contour {
        // 100x80 rectangle with 10px corners cut off.
        contour(&[
            (10, 0),
            (90, 0),
            (100, 10),
            (100, 70),
            (90, 80),
            (10, 80),
            (0, 70),
            (0, 10),
        ])
    }

    #[test]
    fn hull_drops_interior_points() {
        let hull = convex_hull(&[gp(0, 0), gp(10, 0), gp(5, 5), gp(10, 10), gp(0, 10)]);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&gp(5, 5)));
    }

    #[test]
    fn closed_approximation_keeps_square_corners() {
        let square = [
            gp(0, 0),
            gp(5, 0),
            gp(10, 0),
            gp(10, 5),
            gp(10, 10),
            gp(5, 10),
            gp(0, 10),
            gp(0, 5),
        ];
        let approx = approximate_closed_polygon(&square, 1.0);
        assert_eq!(approx.len(), 4);
        for corner in [gp(0, 0), gp(10, 0), gp(10, 10), gp(0, 10)] {
            assert!(approx.contains(&corner), "missing {corner}");
        }
    }

    #[test]
    fn closed_approximation_respects_tolerance() {
        let points = octagon().into_points();
        assert_eq!(approximate_closed_polygon(&points, 8.0).len(), 8);
        assert_eq!(approximate_closed_polygon(&points, 9.0).len(), 6);
        assert_eq!(approximate_closed_polygon(&points, 10.0).len(), 4);
    }

    #[test]
    fn rectangle_simplifies_at_first_tolerance() {
        let rect = contour(&[(0, 0), (0, 30), (0, 60), (40, 60), (80, 60), (80, 0)]);
        let quad = simplify_to_quad(&rect, &SimplifyConfig::default()).unwrap();
        assert_eq!(quad.tolerance, 1);
        assert_relative_eq!(quad.aspect_ratio, 0.75, epsilon = 1e-6);
        for corner in [gp(0, 0), gp(0, 60), gp(80, 60), gp(80, 0)] {
            assert!(quad.quadrilateral.corners.contains(&corner));
        }
    }

    #[test]
    fn cut_corners_need_a_larger_tolerance() {
        let quad = simplify_to_quad(&octagon(), &SimplifyConfig::default()).unwrap();
        assert_eq!(quad.tolerance, 10);
        assert_eq!(quad.hull.len(), 8);
        let vertices = octagon().into_points();
        for corner in quad.quadrilateral.corners {
            assert!(vertices.contains(&corner), "{corner} is not a hull vertex");
        }
        assert!(!quad.quadrilateral.has_collinear_triple());
    }

    #[test]
    fn search_starts_at_configured_tolerance() {
        let config = SimplifyConfig {
            tolerance_start: 12,
            tolerance_max: 20,
        };
        let quad = simplify_to_quad(&octagon(), &config).unwrap();
        assert_eq!(quad.tolerance, 12);
    }

    #[test]
    fn triangle_cannot_become_a_quadrilateral() {
        let triangle = contour(&[(0, 0), (50, 0), (25, 40)]);
        let err = simplify_to_quad(&triangle, &SimplifyConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PipelineFailure::CannotSimplifyToQuad {
                last_vertex_count: 3
            }
        );
    }

    #[test]
    fn large_circle_exhausts_tolerance_range() {
        let points: Vec<(i32, i32)> = (0..720)
            .map(|i| {
                let t = (i as f64 / 2.0).to_radians();
                (
                    (500.0 + 400.0 * t.cos()).round() as i32,
                    (500.0 + 400.0 * t.sin()).round() as i32,
                )
            })
            .collect();
        let err = simplify_to_quad(&contour(&points), &SimplifyConfig::default()).unwrap_err();
        match err {
            PipelineFailure::CannotSimplifyToQuad { last_vertex_count } => {
                assert!(last_vertex_count > 4, "got {last_vertex_count}");
            }
            other => panic!("unexpected failure {other:?}"),
        }
    }
}
