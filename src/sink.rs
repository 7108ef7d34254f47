use crate::error::Error;
use crate::report::CrossingEvent;

use serde_derive::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const SAVED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One stored crossing: where the snapshot went, when, and how fast.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CrossingRecordRow {
    pub id: u32,
    pub class: String,
    pub speed_kmh: f64,
    pub frame_number: u64,
    pub image_path: String,
    pub saved_time: String,
}

impl CrossingRecordRow {
    pub fn new(event: &CrossingEvent, image_path: &Path, saved_time: String) -> Self {
        Self {
            id: event.id,
            class: event.label.clone(),
            speed_kmh: event.speed_kmh,
            frame_number: event.frame_number,
            image_path: image_path.to_string_lossy().into_owned(),
            saved_time,
        }
    }
}

pub trait PersistenceSink {
    fn persist(&mut self, row: &CrossingRecordRow) -> Result<(), Error>;
}

/// Writes every row as one JSON line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PersistenceSink for JsonLinesSink<W> {
    fn persist(&mut self, row: &CrossingRecordRow) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<CrossingRecordRow>,
}

impl PersistenceSink for MemorySink {
    fn persist(&mut self, row: &CrossingRecordRow) -> Result<(), Error> {
        self.rows.push(row.clone());
        Ok(())
    }
}

/// `<root>/<video file stem>`, the folder snapshots of one video go to.
pub fn output_dir(root: &Path, video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());

    root.join(stem)
}

pub fn snapshot_path(dir: &Path, frame_number: u64, id: u32) -> PathBuf {
    dir.join(format!("frame{}_id{}.jpg", frame_number, id))
}

/// Hands every event to the sink once. Failures are logged and returned
/// with the identity they belong to; nothing is retried.
pub fn persist_events<S: PersistenceSink + ?Sized>(
    sink: &mut S,
    events: &[CrossingEvent],
    snapshot_dir: &Path,
) -> Vec<(u32, Error)> {
    let mut failures = Vec::new();

    for event in events {
        let path = snapshot_path(snapshot_dir, event.frame_number, event.id);
        let saved_time = chrono::Local::now().format(SAVED_TIME_FORMAT).to_string();
        let row = CrossingRecordRow::new(event, &path, saved_time);

        match sink.persist(&row) {
            Ok(()) => info!(
                "record saved: {}, speed: {} km/h",
                row.image_path, row.speed_kmh
            ),
            Err(err) => {
                error!("error saving record for {}: {}", row.image_path, err);
                failures.push((event.id, err));
            }
        }
    }

    failures
}
