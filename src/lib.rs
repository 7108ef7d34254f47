pub mod bbox;
pub mod class;
pub mod clock;
pub mod config;
pub mod crossing;
pub mod detection;
pub mod detector;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod report;
pub mod scene;
pub mod sink;
pub mod zone;

mod track;

pub use config::{ConfigUpdate, TrackingConfig};
pub use detection::Detection;
pub use error::Error;
pub use frame::Frame;
pub use report::{CrossingEvent, FrameReport};
pub use scene::Scene;
pub use track::Track;
