use crate::error::Error;
use crate::geometry::{convex_hull, point_in_polygon};
use nalgebra as na;

/// No-parking quadrilateral. The corners are kept in the order they were
/// given, membership is tested against their convex hull.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictedZone {
    corners: [na::Point2<f32>; 4],
    hull: Vec<na::Point2<f32>>,
}

impl RestrictedZone {
    pub fn new(points: &[na::Point2<f32>]) -> Result<Self, Error> {
        let corners: [na::Point2<f32>; 4] = points.try_into().map_err(|_| {
            Error::InvalidZone(format!("expected 4 points, got {}", points.len()))
        })?;

        if let Some(p) = corners.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(Error::InvalidZone(format!("non-finite point {}", p)));
        }

        let hull = convex_hull(&corners);
        if hull.len() < 3 {
            return Err(Error::InvalidZone("points are collinear".into()));
        }

        Ok(Self { corners, hull })
    }

    /// Same as `new` for `[x, y]` pairs, the shape used in config files.
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self, Error> {
        let points: Vec<_> = pairs.iter().map(|p| na::Point2::new(p[0], p[1])).collect();

        Self::new(&points)
    }

    #[inline]
    pub fn corners(&self) -> &[na::Point2<f32>; 4] {
        &self.corners
    }

    #[inline]
    pub fn hull(&self) -> &[na::Point2<f32>] {
        &self.hull
    }

    #[inline]
    pub fn contains(&self, p: na::Point2<f32>) -> bool {
        point_in_polygon(p, &self.hull)
    }
}

/// Only stationary objects can be parked wrongly, and only inside a zone.
#[inline]
pub fn parked_wrongly(
    is_stationary: bool,
    ground_point: na::Point2<f32>,
    zone: Option<&RestrictedZone>,
) -> bool {
    is_stationary && zone.map_or(false, |z| z.contains(ground_point))
}
