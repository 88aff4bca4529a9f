use super::options::HoughOptions;
use super::segment::LineSegment;
use crate::image::GrayImageU8;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-point fraction bits used while stepping along a traced line.
const SHIFT: u32 = 16;

/// Progressive probabilistic Hough transform over a binary edge map.
///
/// Edge points are drawn one at a time in a seeded pseudo-random order and
/// vote into a (θ, ρ) accumulator. As soon as a cell reaches the vote
/// threshold, the line through the current point is traced in both
/// directions across the edge mask, bridging gaps up to `max_line_gap`.
/// Pixels on the traced span are consumed; if the span is long enough it is
/// emitted and the votes its pixels already cast are withdrawn so they cannot
/// support another line. Pixels that never voted leave the accumulator alone,
/// so cells never go negative.
pub(super) struct ProbabilisticHough<'a> {
    edges: &'a GrayImageU8,
    width: usize,
    height: usize,
    num_angle: usize,
    num_rho: usize,
    trig: Vec<[f32; 2]>,
    accum: Vec<i32>,
    mask: Vec<bool>,
    voted: Vec<bool>,
    options: HoughOptions,
}

impl<'a> ProbabilisticHough<'a> {
    pub(super) fn new(edges: &'a GrayImageU8, options: HoughOptions) -> Self {
        let width = edges.width();
        let height = edges.height();
        let irho = 1.0 / options.rho;
        let num_angle = ((std::f32::consts::PI / options.theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f32 / options.rho).round() as usize).max(1);
        let trig = (0..num_angle)
            .map(|n| {
                let ang = n as f32 * options.theta;
                [ang.cos() * irho, ang.sin() * irho]
            })
            .collect();

        Self {
            edges,
            width,
            height,
            num_angle,
            num_rho,
            trig,
            accum: vec![0; num_angle * num_rho],
            mask: vec![false; width * height],
            voted: vec![false; width * height],
            options,
        }
    }

    pub(super) fn run(mut self) -> Vec<LineSegment> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.edges.get(x, y) != 0 {
                    self.mask[y * self.width + x] = true;
                    points.push((x as i32, y as i32));
                }
            }
        }

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut lines = Vec::new();
        let threshold = self.options.threshold.max(1) as i32;

        let mut count = points.len();
        while count > 0 {
            let idx = rng.gen_range(0..count);
            let (x, y) = points[idx];
            points[idx] = points[count - 1];
            count -= 1;

            // Already consumed by a previously traced line.
            if !self.mask[y as usize * self.width + x as usize] {
                continue;
            }

            let (best_n, best_votes) = self.vote(x, y);
            if best_votes < threshold {
                continue;
            }

            let walker = LineWalker::new(x, y, self.trig[best_n]);
            let ends = [self.trace_end(&walker, false), self.trace_end(&walker, true)];

            let min_len = self.options.min_line_length as i32;
            let good_line =
                (ends[1].0 - ends[0].0).abs() >= min_len || (ends[1].1 - ends[0].1).abs() >= min_len;

            self.consume(&walker, false, ends[0], good_line);
            self.consume(&walker, true, ends[1], good_line);

            if good_line {
                lines.push(LineSegment::new(ends[0].0, ends[0].1, ends[1].0, ends[1].1));
                if self.options.max_lines.is_some_and(|max| lines.len() >= max) {
                    break;
                }
            }
        }

        lines
    }

    #[inline]
    fn rho_index(&self, n: usize, x: i32, y: i32) -> usize {
        let [c, s] = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i64 + (self.num_rho as i64 - 1) / 2;
        n * self.num_rho + r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Add the point's votes; returns the strongest angle bin and its count.
    fn vote(&mut self, x: i32, y: i32) -> (usize, i32) {
        self.voted[y as usize * self.width + x as usize] = true;
        let mut best_n = 0;
        let mut best_votes = 0;
        for n in 0..self.num_angle {
            let cell = self.rho_index(n, x, y);
            self.accum[cell] += 1;
            let votes = self.accum[cell];
            if votes > best_votes {
                best_votes = votes;
                best_n = n;
            }
        }
        (best_n, best_votes)
    }

    fn unvote(&mut self, x: i32, y: i32) {
        for n in 0..self.num_angle {
            let cell = self.rho_index(n, x, y);
            self.accum[cell] -= 1;
        }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Walk away from the seed until more than `max_line_gap` misses in a row;
    /// returns the last edge pixel seen.
    fn trace_end(&self, walker: &LineWalker, backwards: bool) -> (i32, i32) {
        let max_gap = self.options.max_line_gap;
        let mut end = (walker.seed_x, walker.seed_y);
        let mut gap = 0;
        for (px, py) in walker.steps(backwards) {
            if !self.in_bounds(px, py) {
                break;
            }
            if self.mask[py as usize * self.width + px as usize] {
                gap = 0;
                end = (px, py);
            } else {
                gap += 1;
                if gap > max_gap {
                    break;
                }
            }
        }
        end
    }

    /// Clear the mask between the seed and `end`, withdrawing votes of a
    /// kept line.
    fn consume(&mut self, walker: &LineWalker, backwards: bool, end: (i32, i32), good_line: bool) {
        for (px, py) in walker.steps(backwards) {
            if !self.in_bounds(px, py) {
                break;
            }
            let idx = py as usize * self.width + px as usize;
            if self.mask[idx] {
                if good_line && self.voted[idx] {
                    self.unvote(px, py);
                }
                self.mask[idx] = false;
            }
            if (px, py) == end {
                break;
            }
        }
    }
}

/// Fixed-point DDA stepping along the line through a seed point.
///
/// The major axis advances by one pixel per step; the minor axis advances by
/// a 16.16 fixed-point increment, starting at the pixel centre.
struct LineWalker {
    seed_x: i32,
    seed_y: i32,
    x_major: bool,
    start: (i64, i64),
    step: (i64, i64),
}

impl LineWalker {
    fn new(seed_x: i32, seed_y: i32, trig: [f32; 2]) -> Self {
        // Line direction is perpendicular to the (cos θ, sin θ) normal.
        let a = -trig[1];
        let b = trig[0];
        let half = 1i64 << (SHIFT - 1);
        let one = (1i64 << SHIFT) as f32;
        if a.abs() > b.abs() {
            let dx = if a > 0.0 { 1 } else { -1 };
            let dy = (b * one / a.abs()).round() as i64;
            Self {
                seed_x,
                seed_y,
                x_major: true,
                start: (seed_x as i64, ((seed_y as i64) << SHIFT) + half),
                step: (dx, dy),
            }
        } else {
            let dy = if b > 0.0 { 1 } else { -1 };
            let dx = (a * one / b.abs()).round() as i64;
            Self {
                seed_x,
                seed_y,
                x_major: false,
                start: (((seed_x as i64) << SHIFT) + half, seed_y as i64),
                step: (dx, dy),
            }
        }
    }

    /// Pixel positions starting at the seed itself.
    fn steps(&self, backwards: bool) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (sx, sy) = if backwards {
            (-self.step.0, -self.step.1)
        } else {
            self.step
        };
        (0i64..).map(move |k| {
            let x = self.start.0 + k * sx;
            let y = self.start.1 + k * sy;
            if self.x_major {
                (x as i32, (y >> SHIFT) as i32)
            } else {
                ((x >> SHIFT) as i32, y as i32)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_map(width: usize, height: usize, pixels: impl IntoIterator<Item = (usize, usize)>) -> GrayImageU8 {
        let mut map = GrayImageU8::zeros(width, height);
        for (x, y) in pixels {
            map.set(x, y, 255);
        }
        map
    }

    #[test]
    fn horizontal_run_becomes_one_segment() {
        let map = edge_map(120, 40, (10..110).map(|x| (x, 20)));
        let lines = ProbabilisticHough::new(&map, HoughOptions::default()).run();
        assert_eq!(lines.len(), 1, "{lines:?}");
        let l = lines[0];
        assert_eq!(l.p0[1], 20);
        assert_eq!(l.p1[1], 20);
        let (lo, hi) = (l.p0[0].min(l.p1[0]), l.p0[0].max(l.p1[0]));
        assert_eq!((lo, hi), (10, 109));
    }

    #[test]
    fn small_gap_is_bridged_large_gap_splits() {
        let bridged = edge_map(
            160,
            30,
            (5..70).chain(73..140).map(|x| (x, 10)),
        );
        let lines = ProbabilisticHough::new(&bridged, HoughOptions::default()).run();
        assert_eq!(lines.len(), 1, "gap of 3 should be bridged: {lines:?}");

        let split = edge_map(
            200,
            30,
            (5..80).chain(100..180).map(|x| (x, 10)),
        );
        let lines = ProbabilisticHough::new(&split, HoughOptions::default()).run();
        assert_eq!(lines.len(), 2, "gap of 20 should split: {lines:?}");
    }

    #[test]
    fn short_runs_are_rejected() {
        let map = edge_map(100, 100, (0..20).map(|x| (x + 40, 50)));
        let opts = HoughOptions {
            threshold: 10,
            ..Default::default()
        };
        assert!(ProbabilisticHough::new(&map, opts).run().is_empty());
    }

    #[test]
    fn same_seed_gives_same_order() {
        let pixels: Vec<(usize, usize)> = (10..110)
            .map(|x| (x, 15))
            .chain((20..90).map(|y| (60, y)))
            .collect();
        let map = edge_map(128, 100, pixels);
        let a = ProbabilisticHough::new(&map, HoughOptions::default()).run();
        let b = ProbabilisticHough::new(&map, HoughOptions::default()).run();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2, "{a:?}");
    }

    #[test]
    fn diagonal_runs_become_one_segment_each() {
        let falling = edge_map(128, 128, (0..120).map(|x| (x, x)));
        let lines = ProbabilisticHough::new(&falling, HoughOptions::default()).run();
        assert_eq!(lines.len(), 1, "{lines:?}");
        let mut ends = [lines[0].p0, lines[0].p1];
        ends.sort();
        assert_eq!(ends, [[0, 0], [119, 119]]);

        let rising = edge_map(128, 128, (0..120).map(|x| (x, 119 - x)));
        let lines = ProbabilisticHough::new(&rising, HoughOptions::default()).run();
        assert_eq!(lines.len(), 1, "{lines:?}");
        let mut ends = [lines[0].p0, lines[0].p1];
        ends.sort();
        assert_eq!(ends, [[0, 119], [119, 0]]);
    }

    fn walker_at(seed: (i32, i32), theta_deg: u32) -> LineWalker {
        let ang = theta_deg as f32 * std::f32::consts::PI / 180.0;
        LineWalker::new(seed.0, seed.1, [ang.cos(), ang.sin()])
    }

    #[test]
    fn steep_walk_advances_x_by_fixed_point_fraction() {
        // Normal at 150°: the line runs 60° from the x axis, one row per step.
        let walker = walker_at((50, 50), 150);
        assert!(!walker.x_major);
        let forward: Vec<_> = walker.steps(false).take(4).collect();
        assert_eq!(forward, [(50, 50), (49, 49), (49, 48), (48, 47)]);
        let backward: Vec<_> = walker.steps(true).take(4).collect();
        assert_eq!(backward, [(50, 50), (51, 51), (51, 52), (52, 53)]);

        let slope = (30f64).to_radians().tan();
        for (k, (x, y)) in walker.steps(true).take(200).enumerate() {
            let ideal = 50.5 + k as f64 * slope;
            assert_eq!(y, 50 + k as i32);
            assert!((x as f64 + 0.5 - ideal).abs() <= 0.51, "step {k}: x {x}, ideal {ideal}");
        }
    }

    #[test]
    fn shallow_walk_advances_y_by_fixed_point_fraction() {
        // Normal at 120°: the line runs 30° from the x axis, one column per step.
        let walker = walker_at((50, 50), 120);
        assert!(walker.x_major);
        let forward: Vec<_> = walker.steps(false).take(4).collect();
        assert_eq!(forward, [(50, 50), (49, 49), (48, 49), (47, 48)]);
        let backward: Vec<_> = walker.steps(true).take(4).collect();
        assert_eq!(backward, [(50, 50), (51, 51), (52, 51), (53, 52)]);

        let slope = (30f64).to_radians().tan();
        for (k, (x, y)) in walker.steps(false).take(200).enumerate() {
            let ideal = 50.5 - k as f64 * slope;
            assert_eq!(x, 50 - k as i32);
            assert!((y as f64 + 0.5 - ideal).abs() <= 0.51, "step {k}: y {y}, ideal {ideal}");
        }
    }
}
