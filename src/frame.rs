use crate::detection::Detection;

pub struct Frame {
    pub number: u64,
    pub detections: Vec<Detection>,
    pub timestamp: f64, // in seconds
}

impl Frame {
    pub fn new(number: u64, timestamp: f64, detections: Vec<Detection>) -> Self {
        Self {
            number,
            detections,
            timestamp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
