use std::{
    error::Error as StdError,
    f64::consts::TAU,
    fmt::{Display, Formatter, Result as FmtResult},
};

use crate::{math_util, parse::PathType, Pos2};

/// Sampling quality of bezier and catmull curves; higher is finer.
pub const SLIDER_QUALITY: f64 = 50.0;
/// Bezier step for a single-point segment, divided further by the segment's point count.
pub const BEZIER_TOLERANCE: f64 = 0.25;
/// Catmull step per segment.
pub const CATMULL_TOLERANCE: f64 = 2.5;
/// Distance between samples when drawing a perfect curve.
pub const PERFECT_PATH_STEP: f64 = 5.0;

/// The points of a perfect curve do not define a single circular arc.
///
/// Either there are not exactly three of them or they lie on a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DegenerateArc;

impl Display for DegenerateArc {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("perfect curve needs three points that are not collinear")
    }
}

impl StdError for DegenerateArc {}

/// A polyline together with the running length at each of its points.
#[derive(Clone, Debug, PartialEq)]
pub struct Points {
    points: Vec<Pos2>,
    lengths: Vec<f64>,
}

impl Points {
    fn new(points: Vec<Pos2>) -> Self {
        let lengths = math_util::cumulative_lengths(&points);

        Self { points, lengths }
    }

    fn dist(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn point_at_distance(&self, dist: f64) -> Pos2 {
        math_util::point_at_distance(&self.points, &self.lengths, dist)
    }
}

/// The path of a slider.
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    Linear(Points),
    Bezier(Points),
    Catmull(Points),
    Perfect {
        origin: Pos2,
        center: Pos2,
        /// Negative if the arc runs clockwise.
        radius: f64,
        /// Length of the arc from the first to the last control point.
        dist: f64,
    },
}

impl Curve {
    /// Create the curve of the given kind through `points`.
    ///
    /// Only [`PathType::PerfectCurve`] can fail, see [`Curve::perfect`].
    pub fn new(points: &[Pos2], kind: PathType) -> Result<Self, DegenerateArc> {
        match kind {
            PathType::Linear => Ok(Self::linear(points)),
            PathType::Bezier => Ok(Self::bezier(points)),
            PathType::Catmull => Ok(Self::catmull(points)),
            PathType::PerfectCurve => Self::perfect(points),
        }
    }

    pub fn linear(points: &[Pos2]) -> Self {
        Self::Linear(Points::new(points.to_vec()))
    }

    /// A repeated point ends the current bezier segment and starts the next one.
    pub fn bezier(points: &[Pos2]) -> Self {
        let mut result = Vec::new();
        let mut start = 0;

        // the final point never splits
        for end in 1..points.len().saturating_sub(1) {
            if end - start > 1 && points[end] == points[end - 1] {
                Self::bezier_segment(&mut result, &points[start..end]);
                start = end;
            }
        }

        Self::bezier_segment(&mut result, &points[start..]);

        Self::Bezier(Points::new(result))
    }

    fn bezier_segment(result: &mut Vec<Pos2>, points: &[Pos2]) {
        if points.is_empty() {
            return;
        }

        let step = BEZIER_TOLERANCE / SLIDER_QUALITY / points.len() as f64;
        let steps = (1.0 / step).ceil() as usize;
        let n = points.len() as i32 - 1;

        result.reserve(steps + 1);

        for i in 0..=steps {
            let t = i as f64 / steps as f64;

            let point = (0..).zip(points).fold(Pos2::zero(), |point, (p, curr)| {
                let factor = math_util::cpn(p, n) * (1.0 - t).powi(n - p) * t.powi(p);

                point + *curr * factor
            });

            result.push(point);
        }
    }

    pub fn catmull(points: &[Pos2]) -> Self {
        if points.len() < 2 {
            return Self::Catmull(Points::new(points.to_vec()));
        }

        let order = points.len();
        let steps = (SLIDER_QUALITY / CATMULL_TOLERANCE).round() as usize;
        let mut result = Vec::with_capacity((order - 1) * (steps + 1));

        for i in 0..order - 1 {
            let v1 = points[i.saturating_sub(1)];
            let v2 = points[i];

            let v3 = match points.get(i + 1) {
                Some(v3) => *v3,
                None => v1.reflect(v2),
            };

            let v4 = match points.get(i + 2) {
                Some(v4) => *v4,
                None => v2.reflect(v3),
            };

            for c in 0..=steps {
                let t = c as f64 / steps as f64;
                result.push(Self::catmull_point(v1, v2, v3, v4, t));
            }
        }

        Self::Catmull(Points::new(result))
    }

    #[inline]
    fn catmull_point(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f64) -> Pos2 {
        Pos2 {
            x: math_util::catmull(p0.x, p1.x, p2.x, p3.x, t),
            y: math_util::catmull(p0.y, p1.y, p2.y, p3.y, t),
        }
    }

    /// The arc from the first through the second to the third point.
    ///
    /// Expects exactly three points, anything else is a [`DegenerateArc`].
    pub fn perfect(points: &[Pos2]) -> Result<Self, DegenerateArc> {
        let &[a, b, c] = points else {
            return Err(DegenerateArc);
        };

        let (center, mut radius) = math_util::get_circum_circle(a, b, c).ok_or(DegenerateArc)?;

        if math_util::is_left(a, b, c) {
            radius = -radius;
        }

        let start_angle = (a.y - center.y).atan2(a.x - center.x);
        let end_angle = (c.y - center.y).atan2(c.x - center.x);

        let sweep = if radius > 0.0 {
            (end_angle - start_angle).rem_euclid(TAU)
        } else {
            (start_angle - end_angle).rem_euclid(TAU)
        };

        Ok(Self::Perfect {
            origin: a,
            center,
            radius,
            dist: sweep * radius.abs(),
        })
    }

    /// The position after travelling `dist` along the curve.
    ///
    /// Meant for `0 <= dist <= self.dist()`. Sampled curves clamp
    /// outside of that range, perfect curves keep going around the circle.
    pub fn point_at_distance(&self, dist: f64) -> Pos2 {
        match self {
            Self::Linear(points) | Self::Bezier(points) | Self::Catmull(points) => {
                points.point_at_distance(dist)
            }
            Self::Perfect {
                origin,
                center,
                radius,
                ..
            } => math_util::rotate(*center, *origin, dist / *radius),
        }
    }

    /// The natural length of the curve.
    pub fn dist(&self) -> f64 {
        match self {
            Self::Linear(points) | Self::Bezier(points) | Self::Catmull(points) => points.dist(),
            Self::Perfect { dist, .. } => *dist,
        }
    }

    /// The points that make up the curve.
    ///
    /// For linear curves these are the control points, for bezier and catmull
    /// the sampled points. Perfect curves are not sampled so this is `None`.
    pub fn points(&self) -> Option<&[Pos2]> {
        match self {
            Self::Linear(points) | Self::Bezier(points) | Self::Catmull(points) => {
                Some(&points.points)
            }
            Self::Perfect { .. } => None,
        }
    }

    /// The kind of curve.
    pub const fn path_type(&self) -> PathType {
        match self {
            Self::Linear(_) => PathType::Linear,
            Self::Bezier(_) => PathType::Bezier,
            Self::Catmull(_) => PathType::Catmull,
            Self::Perfect { .. } => PathType::PerfectCurve,
        }
    }
}
