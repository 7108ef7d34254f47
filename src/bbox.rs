use nalgebra as na;
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox<F: BBoxFormat>([f32; 4], PhantomData<F>);

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        BBox([x1, y1, x2, y2], Default::default())
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.right() - self.left()
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.bottom() - self.top()
    }

    /// Bottom-center of the box, where the vehicle touches the road.
    #[inline]
    pub fn ground_point(&self) -> na::Point2<f32> {
        na::Point2::new((self.left() + self.right()) / 2.0, self.bottom())
    }

    /// Row used for line crossing: the top edge shifted up by `offset` pixels.
    #[inline]
    pub fn rear_y(&self, offset: f32) -> f32 {
        self.top() - offset
    }

    /// Finite corners with right >= left and bottom >= top.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.width() >= 0.0 && self.height() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let bbox = BBox::ltrb(100.0, 205.0, 180.0, 260.0);

        assert_eq!(bbox.rear_y(5.0), 200.0);
        assert_eq!(bbox.ground_point(), na::Point2::new(140.0, 260.0));
        assert_eq!((bbox.width(), bbox.height()), (80.0, 55.0));
    }

    #[test]
    fn test_invalid_boxes() {
        assert!(!BBox::ltrb(10.0, 10.0, 5.0, 20.0).is_valid());
        assert!(!BBox::ltrb(f32::NAN, 0.0, 5.0, 20.0).is_valid());
        assert!(BBox::ltrb(0.0, 0.0, 0.0, 0.0).is_valid());
    }
}
