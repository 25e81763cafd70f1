//! Trimming a ring with a hand-drawn open line.
//!
//! The two ends of the cut snap onto the ring's boundary, splitting the boundary into two arcs.
//! Pairing each arc with the cut (walked once backwards, once forwards) gives the two closed loops
//! the cut implies, with no general polygon clipping involved. The bigger loop is kept, so a cut
//! always takes a bite out of the shape rather than asking which half was meant.

use std::collections::HashSet;

use geo::Contains;
use serde::{Deserialize, Serialize};

use crate::{
    clean_ring, signed_area, HashablePt2D, PolyLine, Pt2D, Ring, EPSILON_AREA, EPSILON_DIST,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// The ends of a cut only snap onto the ring if they're within this fraction of the ring's
    /// perimeter from it. Scaling by the perimeter makes the tolerance work the same for a city
    /// block and a whole region.
    pub snap_tolerance_fraction: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            snap_tolerance_fraction: 0.05,
        }
    }
}

/// Cuts `ring` with `cut` using the default options. See `split_with`.
pub fn split(ring: &Ring, cut: &PolyLine) -> Option<Ring> {
    split_with(ring, cut, &SplitOptions::default())
}

/// Cuts `ring` with `cut`, returning the larger of the two pieces. Returns `None` when the cut
/// doesn't meaningfully cross the ring: an end is too far from the boundary, both ends snap to the
/// same place, neither piece has any area, or the kept piece wouldn't be any smaller than the
/// original. The caller should leave the original untouched then.
pub fn split_with(ring: &Ring, cut: &PolyLine, opts: &SplitOptions) -> Option<Ring> {
    let boundary = ring.to_boundary();
    let tolerance = opts.snap_tolerance_fraction * boundary.length();

    // The box contains the whole boundary, so an end this far from the box can't snap. Skip the
    // per-segment work.
    let bounds = ring.get_bounds();
    if bounds.dist_to_pt(cut.first_pt()) > tolerance || bounds.dist_to_pt(cut.last_pt()) > tolerance
    {
        return None;
    }

    let snap_start = boundary.nearest_location(cut.first_pt())?;
    let snap_end = boundary.nearest_location(cut.last_pt())?;
    if snap_start.dist_away > tolerance || snap_end.dist_away > tolerance {
        debug!("Cut ends are too far from the boundary to snap");
        return None;
    }
    if (snap_start.dist_along - snap_end.dist_along).abs() < EPSILON_DIST {
        debug!("Both ends of the cut snap to {}", snap_start.pt);
        return None;
    }

    let bridge = bridge_to_boundary(ring, cut, snap_start.pt, snap_end.pt);
    // Orient everything by position along the boundary
    let (lo, hi, bridge_lo_to_hi) = if snap_start.dist_along < snap_end.dist_along {
        (snap_start, snap_end, bridge)
    } else {
        let mut reversed = bridge;
        reversed.reverse();
        (snap_end, snap_start, reversed)
    };

    // The arc not passing through the boundary's first point, closed by the cut walked backwards
    let mut loop_a = boundary.slice_between(&lo, &hi);
    loop_a.extend(bridge_lo_to_hi.iter().rev().cloned());

    // The arc wrapping around the boundary's first point, closed by the cut walked forwards
    let mut loop_b = boundary.slice_between(&hi, &boundary.end_location());
    loop_b.extend(boundary.slice_between(&boundary.start_location(), &lo));
    loop_b.extend(bridge_lo_to_hi.iter().cloned());

    let a = Candidate::new(loop_a);
    let b = Candidate::new(loop_b);
    let best = if b.area > a.area { b } else { a };
    let result = best.ring?;

    // A cut hugging the outside of the ring can produce a loop as big as the original, or bigger.
    // That's not trimming anything.
    if best.area >= ring.area() - EPSILON_AREA {
        debug!(
            "Cut wouldn't shrink the ring (area {} becomes {})",
            ring.area(),
            best.area
        );
        return None;
    }
    Some(result)
}

/// The cut, pinned to the two snapped boundary points. Vertices at either end of the cut that
/// overshoot the ring are dropped, so the result doesn't have zero-width spikes poking outside.
fn bridge_to_boundary(ring: &Ring, cut: &PolyLine, start: Pt2D, end: Pt2D) -> Vec<Pt2D> {
    let polygon = ring.to_geo();
    let inside = |pt: &Pt2D| polygon.contains(&geo::Point::from(*pt));

    let pts = cut.points();
    let mut result = vec![start];
    if let Some(first_inside) = pts.iter().position(inside) {
        // position found one, so rposition will too
        let last_inside = pts.iter().rposition(inside).unwrap_or(first_inside);
        result.extend(pts[first_inside..=last_inside].iter().cloned());
    }
    result.push(end);
    result
}

/// One of the two loops a cut produces. Malformed loops score zero area instead of failing, so
/// one bad loop never prevents considering the other.
struct Candidate {
    ring: Option<Ring>,
    area: f64,
}

impl Candidate {
    fn new(raw: Vec<Pt2D>) -> Candidate {
        let mut pts = clean_ring(&raw);
        match (pts.first().cloned(), pts.last().cloned()) {
            (Some(first), Some(last)) if pts.len() > 1 && last.approx_eq(first, EPSILON_DIST) => {
                let idx = pts.len() - 1;
                pts[idx] = first;
            }
            (Some(first), _) => {
                pts.push(first);
            }
            (None, _) => {}
        }

        let distinct: HashSet<HashablePt2D> = pts
            .iter()
            .skip(1)
            .map(|pt| pt.to_hashable())
            .collect();
        if distinct.len() < 3 {
            return Candidate::empty();
        }
        let area = signed_area(&pts).abs();
        if area < EPSILON_AREA {
            return Candidate::empty();
        }
        match Ring::new(pts) {
            Ok(ring) => Candidate {
                ring: Some(ring),
                area,
            },
            Err(_) => Candidate::empty(),
        }
    }

    fn empty() -> Candidate {
        Candidate {
            ring: None,
            area: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn square() -> Ring {
        Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 10.0),
            Pt2D::new(0.0, 10.0),
            Pt2D::new(0.0, 0.0),
        ])
    }

    fn line(pts: Vec<(f64, f64)>) -> PolyLine {
        PolyLine::must_new(pts.into_iter().map(|(x, y)| Pt2D::new(x, y)).collect())
    }

    #[test]
    fn square_cut_in_half() {
        let cut = line(vec![(5.0, -1.0), (5.0, 11.0)]);
        let result = split(&square(), &cut).unwrap();
        assert_eq!(result.area(), 50.0);
        assert_eq!(
            result.points(),
            &vec![
                Pt2D::new(5.0, 0.0),
                Pt2D::new(10.0, 0.0),
                Pt2D::new(10.0, 10.0),
                Pt2D::new(5.0, 10.0),
                Pt2D::new(5.0, 0.0),
            ]
        );

        for _ in 0..10 {
            assert_eq!(split(&square(), &cut), Some(result.clone()));
        }
    }

    #[test]
    fn cut_direction_does_not_matter() {
        let forwards = split(&square(), &line(vec![(3.0, -1.0), (3.0, 11.0)])).unwrap();
        let backwards = split(&square(), &line(vec![(3.0, 11.0), (3.0, -1.0)])).unwrap();
        assert_eq!(forwards.area(), 70.0);
        assert_eq!(backwards.area(), 70.0);
        assert_eq!(forwards.get_bounds().min_x, 3.0);
        assert_eq!(backwards.get_bounds().min_x, 3.0);
    }

    #[test]
    fn keeps_larger_piece() {
        // Trims the left 3 units off
        let result = split(&square(), &line(vec![(3.0, -1.0), (3.0, 11.0)])).unwrap();
        assert_eq!(result.area(), 70.0);
        assert!(result.contains_pt(Pt2D::new(8.0, 5.0)));
        assert!(!result.contains_pt(Pt2D::new(1.0, 5.0)));

        // Trims the right 3 units off
        let result = split(&square(), &line(vec![(7.0, 11.0), (7.0, -1.0)])).unwrap();
        assert_eq!(result.area(), 70.0);
        assert!(result.contains_pt(Pt2D::new(2.0, 5.0)));
    }

    #[test]
    fn bent_cut() {
        // Up from the bottom edge to the middle, then out the right edge. Bites off the
        // bottom-right quarter.
        let cut = line(vec![(5.0, -1.0), (5.0, 5.0), (11.0, 5.0)]);
        let result = split(&square(), &cut).unwrap();
        assert_eq!(result.area(), 75.0);
        assert!(!result.contains_pt(Pt2D::new(8.0, 2.0)));
        assert!(result.contains_pt(Pt2D::new(2.0, 8.0)));
        // No spikes left outside the original
        assert!(result
            .points()
            .iter()
            .all(|pt| square().get_bounds().contains(*pt)));
    }

    #[test]
    fn cut_starting_inside() {
        // The first point stops short of the boundary; it snaps out to it
        let cut = line(vec![(5.0, 0.5), (5.0, 11.0)]);
        let result = split(&square(), &cut).unwrap();
        assert_eq!(result.area(), 50.0);
    }

    #[test]
    fn far_outside() {
        assert_eq!(
            split(&square(), &line(vec![(20.0, -5.0), (20.0, 15.0)])),
            None
        );
        assert_eq!(
            split(&square(), &line(vec![(20.0, 20.0), (30.0, 30.0)])),
            None
        );
    }

    #[test]
    fn tolerance_is_configurable() {
        let cut = line(vec![(5.0, -3.0), (5.0, 13.0)]);
        // 3 units away, but the default tolerance is 5% of 40
        assert_eq!(split(&square(), &cut), None);
        let opts = SplitOptions {
            snap_tolerance_fraction: 0.1,
        };
        assert_eq!(split_with(&square(), &cut, &opts).unwrap().area(), 50.0);
    }

    #[test]
    fn both_ends_snap_to_the_same_place() {
        assert_eq!(
            split(&square(), &line(vec![(5.0, -1.0), (5.0, -0.5)])),
            None
        );
    }

    #[test]
    fn hugging_the_outside_trims_nothing() {
        assert_eq!(
            split(&square(), &line(vec![(-1.0, -1.0), (11.0, -1.0)])),
            None
        );
    }

    #[test]
    fn degenerate_ring() {
        let ring = Ring::must_new(vec![Pt2D::new(1.0, 1.0); 4]);
        assert_eq!(split(&ring, &line(vec![(0.0, 0.0), (2.0, 2.0)])), None);
    }

    #[test]
    fn never_grows_and_is_deterministic() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let mut successes = 0;
        for _ in 0..500 {
            // A star-shaped polygon around the origin
            let n = rng.gen_range(3..10);
            let mut angles: Vec<f64> = (0..n)
                .map(|_| rng.gen_range(0.0..std::f64::consts::TAU))
                .collect();
            angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut pts: Vec<Pt2D> = angles
                .iter()
                .map(|theta| {
                    let r = rng.gen_range(5.0..10.0);
                    Pt2D::new(r * theta.cos(), r * theta.sin())
                })
                .collect();
            pts.push(pts[0]);
            let ring = match Ring::new(pts) {
                Ok(ring) => ring,
                Err(_) => continue,
            };

            let mut cut_pts = Vec::new();
            for _ in 0..rng.gen_range(2..5) {
                cut_pts.push(Pt2D::new(
                    rng.gen_range(-12.0..12.0),
                    rng.gen_range(-12.0..12.0),
                ));
            }
            if cut_pts[0] == *cut_pts.last().unwrap() {
                continue;
            }
            let cut = PolyLine::must_new(cut_pts);

            let result = split(&ring, &cut);
            if let Some(ref trimmed) = result {
                successes += 1;
                assert!(trimmed.area() <= ring.area());
                assert!(trimmed.points().len() >= 4);
            }
            assert_eq!(split(&ring, &cut), result);
        }
        // Make sure the check above isn't vacuous
        assert!(successes > 0);
    }
}
