//! Polyline geometry with arc-length stationing.

use serde::{Deserialize, Serialize};

use super::types::{BoundingBox, GeometryError, Point};

/// Result of projecting a point onto a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// The closest point on the polyline.
    pub point: Point,
    /// Arc-length position of that point from the start, in metres.
    pub station: f64,
    /// Distance from the query point to the polyline, in metres.
    pub distance: f64,
    /// Index of the segment the closest point falls on.
    pub segment: usize,
}

/// An ordered, direction-aware polyline in projected planar coordinates.
///
/// Vertices may repeat (real survey data contains duplicate points), but the
/// total length must be non-zero. Stationing runs from `0.0` at the first
/// vertex to [`Polyline::length`] at the last; the vertex order defines the
/// line's direction, which side-of-way and direction-valued attributes are
/// relative to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline from ordered vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if fewer than two vertices are given, any
    /// coordinate is non-finite, or the total length is zero.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        for (i, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate(i));
            }
        }
        let line = Self { points };
        if line.length() <= 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        Ok(line)
    }

    /// The ordered vertices.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// First vertex.
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Last vertex.
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Total arc length in metres.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(w[1]))
            .sum()
    }

    /// Axis-aligned bounding box of all vertices.
    pub fn bbox(&self) -> BoundingBox {
        let mut bb = BoundingBox::of_point(self.points[0]);
        for p in &self.points[1..] {
            bb.expand_to(*p);
        }
        bb
    }

    /// The point at arc-length `station`, clamped to the line's extent.
    pub fn point_at(&self, station: f64) -> Point {
        let (idx, t) = self.locate(station);
        self.points[idx].lerp(self.points[idx + 1], t)
    }

    /// Unit direction vector of the segment containing `station`.
    ///
    /// Zero-length segments are skipped; the direction of the nearest
    /// non-degenerate segment is returned instead.
    pub fn direction_at(&self, station: f64) -> Point {
        let (idx, _) = self.locate(station);
        self.segment_direction(idx)
    }

    /// Unit direction of segment `idx`, falling back to the closest
    /// non-degenerate segment when `idx` is zero-length.
    pub fn segment_direction(&self, idx: usize) -> Point {
        // Search outward from idx for a segment with extent.
        let n = self.points.len() - 1;
        for d in 0..n {
            for candidate in [idx.saturating_sub(d), (idx + d).min(n - 1)] {
                let v = self.points[candidate].offset_to(self.points[candidate + 1]);
                let len = v.norm();
                if len > 0.0 {
                    return Point::new(v.x / len, v.y / len);
                }
            }
        }
        // Unreachable for a constructed polyline (total length > 0).
        Point::new(1.0, 0.0)
    }

    /// Project `p` onto the polyline and return the closest point with its
    /// station, distance and segment index.
    pub fn nearest_point(&self, p: Point) -> NearestPoint {
        let mut best = NearestPoint {
            point: self.points[0],
            station: 0.0,
            distance: p.distance_to(self.points[0]),
            segment: 0,
        };
        let mut cum = 0.0;
        for (i, w) in self.points.windows(2).enumerate() {
            let (a, b) = (w[0], w[1]);
            let seg = a.offset_to(b);
            let seg_len = seg.norm();
            let t = if seg_len > 0.0 {
                (a.offset_to(p).dot(seg) / (seg_len * seg_len)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let candidate = a.lerp(b, t);
            let distance = p.distance_to(candidate);
            if distance < best.distance {
                best = NearestPoint {
                    point: candidate,
                    station: cum + t * seg_len,
                    distance,
                    segment: i,
                };
            }
            cum += seg_len;
        }
        best
    }

    /// Extract the sub-line between two stations.
    ///
    /// Stations are clamped to the line's extent; `from` must come before
    /// `to` after clamping.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLength`] when the clamped interval is
    /// degenerate.
    pub fn substring(&self, from: f64, to: f64) -> Result<Polyline, GeometryError> {
        let total = self.length();
        let from = from.clamp(0.0, total);
        let to = to.clamp(0.0, total);
        if to <= from {
            return Err(GeometryError::ZeroLength);
        }

        let mut out = vec![self.point_at(from)];
        let mut cum = 0.0;
        for w in self.points.windows(2) {
            cum += w[0].distance_to(w[1]);
            if cum > from && cum < to {
                out.push(w[1]);
            }
        }
        out.push(self.point_at(to));
        Polyline::new(out)
    }

    /// Sample `count` points at equal arc-length intervals, endpoints
    /// included. `count` is raised to 2 when smaller.
    pub fn sample_points(&self, count: usize) -> Vec<Point> {
        let count = count.max(2);
        let total = self.length();
        let step = total / (count - 1) as f64;
        (0..count)
            .map(|i| self.point_at(step * i as f64))
            .collect()
    }

    /// Locate a station: index of the containing segment and the parameter
    /// within it. The station is clamped to `[0, length]`.
    fn locate(&self, station: f64) -> (usize, f64) {
        let total = self.length();
        let station = station.clamp(0.0, total);
        let mut cum = 0.0;
        for (i, w) in self.points.windows(2).enumerate() {
            let seg_len = w[0].distance_to(w[1]);
            if seg_len > 0.0 && station <= cum + seg_len {
                return (i, (station - cum) / seg_len);
            }
            cum += seg_len;
        }
        (self.points.len() - 2, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_100m() -> Polyline {
        Polyline::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap()
    }

    fn l_shape() -> Polyline {
        // 100 m east, then 50 m north.
        Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_single_point() {
        let result = Polyline::new(vec![Point::new(0.0, 0.0)]);
        assert!(matches!(result, Err(GeometryError::TooFewPoints(1))));
    }

    #[test]
    fn test_new_rejects_zero_length() {
        let result = Polyline::new(vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0)]);
        assert!(matches!(result, Err(GeometryError::ZeroLength)));
    }

    #[test]
    fn test_new_rejects_nan() {
        let result = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]);
        assert!(matches!(result, Err(GeometryError::NonFiniteCoordinate(1))));
    }

    #[test]
    fn test_new_allows_duplicate_vertices() {
        let line = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
        ])
        .unwrap();
        assert_eq!(line.length(), 100.0);
    }

    #[test]
    fn test_length_l_shape() {
        assert_eq!(l_shape().length(), 150.0);
    }

    #[test]
    fn test_point_at_interpolates() {
        let line = l_shape();
        assert_eq!(line.point_at(50.0), Point::new(50.0, 0.0));
        assert_eq!(line.point_at(125.0), Point::new(100.0, 25.0));
    }

    #[test]
    fn test_point_at_clamps() {
        let line = straight_100m();
        assert_eq!(line.point_at(-10.0), Point::new(0.0, 0.0));
        assert_eq!(line.point_at(500.0), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_direction_at_both_legs() {
        let line = l_shape();
        assert_eq!(line.direction_at(10.0), Point::new(1.0, 0.0));
        assert_eq!(line.direction_at(120.0), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_nearest_point_on_first_leg() {
        let line = l_shape();
        let np = line.nearest_point(Point::new(30.0, 10.0));
        assert_eq!(np.point, Point::new(30.0, 0.0));
        assert_eq!(np.station, 30.0);
        assert_eq!(np.distance, 10.0);
        assert_eq!(np.segment, 0);
    }

    #[test]
    fn test_nearest_point_beyond_end_clamps_to_vertex() {
        let line = straight_100m();
        let np = line.nearest_point(Point::new(110.0, 5.0));
        assert_eq!(np.point, Point::new(100.0, 0.0));
        assert_eq!(np.station, 100.0);
    }

    #[test]
    fn test_substring_middle() {
        let line = straight_100m();
        let sub = line.substring(20.0, 80.0).unwrap();
        assert_eq!(sub.first(), Point::new(20.0, 0.0));
        assert_eq!(sub.last(), Point::new(80.0, 0.0));
        assert_eq!(sub.length(), 60.0);
    }

    #[test]
    fn test_substring_across_vertex_keeps_it() {
        let line = l_shape();
        let sub = line.substring(50.0, 125.0).unwrap();
        assert_eq!(sub.points().len(), 3);
        assert_eq!(sub.points()[1], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_substring_degenerate_is_error() {
        let line = straight_100m();
        assert!(line.substring(40.0, 40.0).is_err());
        assert!(line.substring(80.0, 20.0).is_err());
    }

    #[test]
    fn test_sample_points_endpoints_included() {
        let line = straight_100m();
        let samples = line.sample_points(5);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], Point::new(0.0, 0.0));
        assert_eq!(samples[2], Point::new(50.0, 0.0));
        assert_eq!(samples[4], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_bbox_covers_all_vertices() {
        let bb = l_shape().bbox();
        assert_eq!(bb.min, Point::new(0.0, 0.0));
        assert_eq!(bb.max, Point::new(100.0, 50.0));
    }
}
