use crate::Pos2;

/// Binomial coefficient `n choose p`.
#[inline]
pub(crate) fn cpn(mut p: i32, n: i32) -> f64 {
    if p < 0 || p > n {
        return 0.0;
    }

    p = p.min(n - p);
    let mut out = 1.0;

    for i in 1..=p {
        out *= f64::from(n - p + i) / f64::from(i);
    }

    out
}

#[inline]
pub(crate) fn catmull(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t.powi(2)
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t.powi(3))
}

/// Center and radius of the circle through `a`, `b`, and `c`.
///
/// `None` if the points are collinear.
pub(crate) fn get_circum_circle(a: Pos2, b: Pos2, c: Pos2) -> Option<(Pos2, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() < f64::EPSILON {
        return None;
    }

    let a_sq = a.x * a.x + a.y * a.y;
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;

    let center = Pos2 {
        x: (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        y: (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    };

    Some((center, center.distance(a)))
}

/// Whether `a -> b -> c` turns clockwise, i.e. their cross product is negative.
#[inline]
pub(crate) fn is_left(a: Pos2, b: Pos2, c: Pos2) -> bool {
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)) < 0.0
}

/// Rotate `p` around `center` by `radians`.
#[inline]
pub(crate) fn rotate(center: Pos2, p: Pos2, radians: f64) -> Pos2 {
    let (sin, cos) = radians.sin_cos();
    let offset = p - center;

    Pos2 {
        x: cos * offset.x - sin * offset.y + center.x,
        y: sin * offset.x + cos * offset.y + center.y,
    }
}

/// Running total of the distances between consecutive points, starting at 0.
pub(crate) fn cumulative_lengths(points: &[Pos2]) -> Vec<f64> {
    let mut total = 0.0;
    let mut lengths = Vec::with_capacity(points.len());

    if !points.is_empty() {
        lengths.push(0.0);
    }

    for (prev, curr) in points.iter().zip(points.iter().skip(1)) {
        total += prev.distance(*curr);
        lengths.push(total);
    }

    lengths
}

/// Position at `dist` along the polyline `points` whose running lengths are `lengths`.
///
/// Clamps to the first and last point.
pub(crate) fn point_at_distance(points: &[Pos2], lengths: &[f64], dist: f64) -> Pos2 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Pos2::zero(),
    };

    let total = lengths.last().copied().unwrap_or(0.0);

    if dist <= 0.0 {
        return first;
    } else if dist >= total {
        return last;
    }

    // first index whose running length reaches `dist`, never 0 since dist > 0
    let i = lengths.partition_point(|&len| len < dist);
    let (prev_len, next_len) = (lengths[i - 1], lengths[i]);
    let segment_len = next_len - prev_len;

    if segment_len <= 0.0 {
        return points[i];
    }

    points[i - 1].lerp(points[i], (dist - prev_len) / segment_len)
}
