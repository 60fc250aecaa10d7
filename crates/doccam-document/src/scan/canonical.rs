// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — put four detected corners into a fixed rotational order
// starting from a reproducible corner.

use std::cmp::Ordering;

use doccam_core::types::cross;
use doccam_core::{GridPoint, Quadrilateral};
use tracing::debug;

const ORIGIN: GridPoint = GridPoint::new(0, 0);

/// Mean of the corners, truncated toward zero.
pub fn centroid(points: &[GridPoint; 4]) -> GridPoint {
    let sx: i64 = points.iter().map(|p| i64::from(p.x)).sum();
    let sy: i64 = points.iter().map(|p| i64::from(p.y)).sum();
    GridPoint::new((sx / 4) as i32, (sy / 4) as i32)
}

/// Order two points by a counter-clockwise sweep around `centre`, with y
/// growing downward.
///
/// `Less` means `a` comes before `b`:
///
/// 1. A point with `x >= centre.x` precedes one with `x < centre.x`.
/// 2. Two points both on the vertical through `centre` order by y: larger
///    y first if either sits at or below the centre, smaller y first
///    otherwise.
/// 3. Otherwise a negative cross product of (centre→a, centre→b) puts `a`
///    first and a positive one puts `b` first.
/// 4. Points collinear with the centre order farthest first.
pub fn counter_clockwise(centre: GridPoint, a: GridPoint, b: GridPoint) -> Ordering {
    let a_right = a.x >= centre.x;
    let b_right = b.x >= centre.x;
    if a_right != b_right {
        return if a_right {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    if a.x == centre.x && b.x == centre.x {
        return if a.y >= centre.y || b.y >= centre.y {
            b.y.cmp(&a.y)
        } else {
            a.y.cmp(&b.y)
        };
    }

    match cross(centre, a, b).cmp(&0) {
        Ordering::Less => Ordering::Less,
        Ordering::Greater => Ordering::Greater,
        Ordering::Equal => centre
            .distance_squared(b)
            .cmp(&centre.distance_squared(a)),
    }
}

/// Sort four corners counter-clockwise around their centroid, then rotate
/// the sequence so the corner nearest the image origin comes first.
///
/// On an upright page this yields top-left, bottom-left, bottom-right,
/// top-right. Equally near corners keep the one that sorted first. The
/// result does not depend on the input order, and canonicalizing it again
/// returns it unchanged.
pub fn canonicalize(points: [GridPoint; 4]) -> Quadrilateral {
    let centre = centroid(&points);
    let mut corners = points;
    corners.sort_by(|a, b| counter_clockwise(centre, *a, *b));

    let first = corners
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.distance_squared(ORIGIN))
        .map_or(0, |(i, _)| i);
    corners.rotate_left(first);

    debug!(
        centre = %centre,
        first = %corners[0],
        "Canonicalized corners"
    );
    Quadrilateral::new(corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::fixtures::gp;

    /// Every ordering of four items.
    fn permutations(items: [GridPoint; 4]) -> Vec<[GridPoint; 4]> {
        let mut out = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let idx = [a, b, c, d];
                        let mut seen = [false; 4];
                        idx.iter().for_each(|&i| seen[i] = true);
                        if seen.iter().all(|s| *s) {
                            out.push(idx.map(|i| items[i]));
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn centroid_truncates() {
        assert_eq!(centroid(&[gp(0, 0), gp(1, 0), gp(1, 1), gp(0, 1)]), gp(0, 0));
        assert_eq!(
            centroid(&[gp(100, 200), gp(900, 200), gp(900, 800), gp(100, 800)]),
            gp(500, 500)
        );
    }

    #[test]
    fn upright_rectangle_starts_top_left() {
        let quad = canonicalize([gp(900, 200), gp(100, 800), gp(100, 200), gp(900, 800)]);
        assert_eq!(
            quad.corners,
            [gp(100, 200), gp(100, 800), gp(900, 800), gp(900, 200)]
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let quad = canonicalize([gp(60, 50), gp(330, 360), gp(350, 80), gp(40, 330)]);
        assert_eq!(canonicalize(quad.corners), quad);
    }

    #[test]
    fn input_order_does_not_matter() {
        for corners in [
            [gp(100, 200), gp(900, 200), gp(900, 800), gp(100, 800)],
            [gp(60, 50), gp(350, 80), gp(330, 360), gp(40, 330)],
            [gp(50, 0), gp(100, 50), gp(50, 100), gp(0, 50)],
        ] {
            let expected = canonicalize(corners);
            for perm in permutations(corners) {
                assert_eq!(canonicalize(perm), expected, "permutation {perm:?}");
            }
        }
    }

    #[test]
    fn skewed_quad_runs_counter_clockwise() {
        let quad = canonicalize([gp(330, 360), gp(60, 50), gp(40, 330), gp(350, 80)]);
        assert_eq!(
            quad.corners,
            [gp(60, 50), gp(40, 330), gp(330, 360), gp(350, 80)]
        );
    }

    #[test]
    fn vertical_axis_ties_resolve_consistently() {
        // Top and bottom corners sit on the centroid's vertical; left and top
        // are equally near the origin.
        let quad = canonicalize([gp(0, 50), gp(50, 100), gp(100, 50), gp(50, 0)]);
        assert_eq!(
            quad.corners,
            [gp(50, 0), gp(0, 50), gp(50, 100), gp(100, 50)]
        );
    }

    #[test]
    fn comparator_rules() {
        let c = gp(0, 0);
        // Right half-plane first.
        assert_eq!(counter_clockwise(c, gp(1, 5), gp(-1, 5)), Ordering::Less);
        assert_eq!(counter_clockwise(c, gp(-1, 5), gp(0, 5)), Ordering::Greater);
        // Both on the vertical axis.
        assert_eq!(counter_clockwise(c, gp(0, 3), gp(0, -3)), Ordering::Less);
        assert_eq!(counter_clockwise(c, gp(0, -5), gp(0, -2)), Ordering::Less);
        // Cross product sign.
        assert_eq!(counter_clockwise(c, gp(3, 3), gp(3, -3)), Ordering::Less);
        assert_eq!(counter_clockwise(c, gp(3, -3), gp(3, 3)), Ordering::Greater);
        // Collinear: farther first.
        assert_eq!(counter_clockwise(c, gp(4, 4), gp(2, 2)), Ordering::Less);
        assert_eq!(counter_clockwise(c, gp(2, 2), gp(2, 2)), Ordering::Equal);
    }
}
