use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// One tracked box for a single frame: the tracker identity, the class id and
/// the (x1, y1, x2, y2) corners in pixels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub id: u32,
    #[serde(rename = "c")]
    pub class: i32,
    #[serde(rename = "p", default = "default_confidence")]
    pub confidence: f32,
    #[serde(rename = "xyxy")]
    pub ltrb: [f32; 4],
}

fn default_confidence() -> f32 {
    1.0
}

impl Detection {
    pub fn new(id: u32, class: i32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            id,
            class,
            confidence: 1.0,
            ltrb: [x1, y1, x2, y2],
        }
    }

    #[inline(always)]
    pub fn bbox(&self) -> BBox<Ltrb> {
        BBox::ltrb(self.ltrb[0], self.ltrb[1], self.ltrb[2], self.ltrb[3])
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.bbox().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_keys() {
        let det: Detection =
            serde_json::from_str(r#"{"id": 3, "c": 2, "xyxy": [1.0, 2.0, 3.0, 4.0]}"#).unwrap();

        assert_eq!(det, Detection::new(3, 2, 1.0, 2.0, 3.0, 4.0));
    }
}
