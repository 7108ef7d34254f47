use crate::bbox::{BBox, Ltrb};
use serde_derive::Serialize;

pub const STATIONARY_TEXT: &str = "STATIONARY";
pub const PARKED_WRONGLY_TEXT: &str = "PARKED WRONGLY";
pub const CALCULATING_TEXT: &str = "Calculating...";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorState {
    /// passed both lines, speed is known
    CrossedBoth,
    InProgress,
}

/// Everything a renderer needs to draw one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: u32,
    pub class: i32,
    pub label: String,
    /// detector score, 1.0 when the detector gives none
    pub confidence: f32,
    pub bbox: BBox<Ltrb>,
    pub color: ColorState,
    pub speed_kmh: Option<f64>,
    pub stationary: bool,
    pub parked_wrongly: bool,
}

impl Annotation {
    /// Shortest decimal form of the rounded speed, always with a fractional
    /// part: `18.0 km/h`, `5.14 km/h`.
    pub fn speed_text(&self) -> String {
        match self.speed_kmh {
            Some(speed) => {
                let mut text = speed.to_string();
                if !text.contains('.') {
                    text.push_str(".0");
                }
                format!("{} km/h", text)
            }
            None => CALCULATING_TEXT.to_string(),
        }
    }

    /// Text drawn above the box.
    pub fn caption(&self) -> String {
        format!("{} {}", self.label, self.speed_text())
    }

    /// Status lines drawn below the box, top to bottom.
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::with_capacity(2);
        if self.stationary {
            flags.push(STATIONARY_TEXT);
        }
        if self.parked_wrongly {
            flags.push(PARKED_WRONGLY_TEXT);
        }
        flags
    }
}

/// One-time signal that an identity passed both lines.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CrossingEvent {
    pub id: u32,
    pub class: i32,
    pub label: String,
    pub speed_kmh: f64,
    pub frame_number: u64,
    pub timestamp: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassCount {
    pub class: i32,
    pub label: String,
    pub count: u64,
}

/// Per-class totals in the order classes were first counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleCounts {
    counts: Vec<(i32, u64)>,
}

impl VehicleCounts {
    pub fn increment(&mut self, class: i32) -> u64 {
        if let Some((_, count)) = self.counts.iter_mut().find(|(c, _)| *c == class) {
            *count += 1;
            return *count;
        }

        self.counts.push((class, 1));
        1
    }

    #[inline]
    pub fn get(&self, class: i32) -> u64 {
        self.counts
            .iter()
            .find(|(c, _)| *c == class)
            .map_or(0, |(_, count)| *count)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts.iter().copied()
    }
}

/// Result of one processed frame, the only thing handed to renderers and sinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame_number: u64,
    pub timestamp: f64,
    pub annotations: Vec<Annotation>,
    pub counts: Vec<ClassCount>,
    pub total: u64,
    pub events: Vec<CrossingEvent>,
}

impl FrameReport {
    /// Counter overlay: one `LABEL: n` line per class, then the total.
    pub fn count_lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|c| format!("{}: {}", c.label.to_uppercase(), c.count))
            .chain(std::iter::once(format!("Total: {}", self.total)))
            .collect()
    }

    pub fn annotation(&self, id: u32) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn count_of(&self, label: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.label == label)
            .map_or(0, |c| c.count)
    }
}
