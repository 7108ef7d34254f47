use nalgebra as na;
use std::cmp::Ordering;

const BOUNDARY_EPSILON: f64 = 1e-6;

/// Downward edge detector: true iff the row moved from above `line_y` to on
/// or below it between two frames. Upward motion never triggers.
#[inline]
pub fn crossed_line(prev_y: f32, curr_y: f32, line_y: f32) -> bool {
    prev_y < line_y && line_y <= curr_y
}

#[inline]
fn cross(o: &na::Point2<f32>, a: &na::Point2<f32>, b: &na::Point2<f32>) -> f64 {
    let (ox, oy) = (o.x as f64, o.y as f64);

    (a.x as f64 - ox) * (b.y as f64 - oy) - (a.y as f64 - oy) * (b.x as f64 - ox)
}

/// Monotone chain convex hull. Collinear points are dropped, the result is
/// counter-clockwise in a y-up frame (clockwise on screen).
pub fn convex_hull(points: &[na::Point2<f32>]) -> Vec<na::Point2<f32>> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        ord => ord,
    });
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<na::Point2<f32>> = Vec::with_capacity(pts.len() * 2);

    // lower chain
    for p in &pts {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }

    // upper chain, never pops into the lower one
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }

    // closing point duplicates the first one
    hull.pop();
    hull
}

fn on_segment(p: &na::Point2<f32>, a: &na::Point2<f32>, b: &na::Point2<f32>) -> bool {
    let len = na::distance(a, b) as f64;

    if cross(a, b, p).abs() > BOUNDARY_EPSILON * len.max(1.0) {
        return false;
    }

    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Boundary-inclusive point-in-polygon test: edges and vertices count as inside.
pub fn point_in_polygon(p: na::Point2<f32>, poly: &[na::Point2<f32>]) -> bool {
    let n = poly.len();
    if n == 0 {
        return false;
    }

    let mut p1 = poly[0];
    for i in 1..=n {
        let p2 = poly[i % n];
        if on_segment(&p, &p1, &p2) {
            return true;
        }
        p1 = p2;
    }

    let mut inside = false;
    let mut p1 = poly[0];

    for i in 1..=n {
        let p2 = poly[i % n];

        if (p1.y > p.y) != (p2.y > p.y) {
            let xints = (p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;

            if p.x < xints {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}

/// Membership in a quadrilateral zone: hull of the points first, then the
/// boundary-inclusive test. Anything short of four points is never a zone.
pub fn point_in_zone(p: na::Point2<f32>, quad: &[na::Point2<f32>]) -> bool {
    if quad.len() < 4 {
        return false;
    }

    point_in_polygon(p, &convex_hull(quad))
}
