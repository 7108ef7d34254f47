use crate::crossing::CrossingState;
use crate::motion::MotionState;

/// Everything remembered about one identity between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: u32,
    pub class: i32,
    // crossing row on the last frame this identity was seen
    pub prev_y: Option<f32>,
    pub last_seen: u64,
    pub motion: MotionState,
    pub crossing: CrossingState,
    pub counted: bool,
}

impl Track {
    pub fn new(id: u32, class: i32, frame_number: u64) -> Self {
        Self {
            id,
            class,
            prev_y: None,
            last_seen: frame_number,
            motion: MotionState::Unseen,
            crossing: CrossingState::NoCrossing,
            counted: false,
        }
    }

    #[inline]
    pub fn frames_missing(&self, frame_number: u64) -> u64 {
        frame_number.saturating_sub(self.last_seen)
    }
}
