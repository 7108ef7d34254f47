use crate::error::Error;

/// The 80 COCO labels, so ids from a stock detector map 1:1.
pub const COCO_LABELS: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// Validated mapping from detector class id to label; the id is the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRegistry {
    labels: Vec<String>,
}

impl ClassRegistry {
    pub fn new(labels: Vec<String>) -> Result<Self, Error> {
        if labels.is_empty() {
            return Err(Error::InvalidConfig("class list is empty".into()));
        }

        for (idx, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("class {} has an empty label", idx)));
            }

            if labels[..idx].contains(label) {
                return Err(Error::InvalidConfig(format!("duplicate class label `{}`", label)));
            }
        }

        Ok(Self { labels })
    }

    pub fn coco() -> Self {
        Self {
            labels: COCO_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[inline]
    pub fn label(&self, class: i32) -> Option<&str> {
        usize::try_from(class)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    #[inline]
    pub fn class_of(&self, label: &str) -> Option<i32> {
        self.labels.iter().position(|l| l == label).map(|i| i as i32)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::coco()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coco_ids() {
        let classes = ClassRegistry::coco();

        assert_eq!(classes.label(2), Some("car"));
        assert_eq!(classes.label(7), Some("truck"));
        assert_eq!(classes.label(8), Some("boat"));
        assert_eq!(classes.label(79), Some("toothbrush"));
        assert_eq!(classes.label(80), None);
        assert_eq!(classes.label(-1), None);
        assert_eq!(classes.class_of("bus"), Some(5));
        assert_eq!(classes.len(), 80);
    }

    #[test]
    fn test_rejects_bad_labels() {
        assert!(ClassRegistry::new(vec![]).is_err());
        assert!(ClassRegistry::new(vec!["car".into(), " ".into()]).is_err());
        assert!(ClassRegistry::new(vec!["car".into(), "car".into()]).is_err());
    }
}
