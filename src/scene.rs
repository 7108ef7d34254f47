use std::collections::{HashMap, HashSet};

use crate::class::ClassRegistry;
use crate::config::{ConfigUpdate, ReferenceLines, TrackingConfig};
use crate::crossing::CrossingEngine;
use crate::error::Error;
use crate::frame::Frame;
use crate::motion::MotionClassifier;
use crate::report::{Annotation, ClassCount, ColorState, CrossingEvent, FrameReport, VehicleCounts};
use crate::track::Track;
use crate::zone::{parked_wrongly, RestrictedZone};

use nalgebra as na;
use tracing::{debug, info, warn};

/// Per-frame orchestrator: owns the identity store, the counters and the
/// runtime line and zone settings. Frames must be fed in order.
pub struct Scene {
    config: TrackingConfig,
    lines: ReferenceLines,
    zone: Option<RestrictedZone>,
    classes: ClassRegistry,
    motion: MotionClassifier,
    crossing: CrossingEngine,
    tracks: HashMap<u32, Track>,
    // counted identities that were evicted; a reused id is not counted again
    retired: HashSet<u32>,
    warned_classes: HashSet<i32>,
    counts: VehicleCounts,
    last_frame: Option<u64>,
}

impl Scene {
    pub fn new(config: TrackingConfig) -> Result<Self, Error> {
        config.validate()?;

        let classes = ClassRegistry::new(config.classes.clone())?;

        Ok(Self {
            lines: config.lines(),
            zone: config.restricted_zone(),
            classes,
            motion: MotionClassifier::new(config.movement_threshold_px, config.dwell_seconds),
            crossing: CrossingEngine::new(config.distance_meters),
            tracks: HashMap::with_capacity(64),
            retired: HashSet::new(),
            warned_classes: HashSet::new(),
            counts: VehicleCounts::default(),
            last_frame: None,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    #[inline]
    pub fn lines(&self) -> ReferenceLines {
        self.lines
    }

    #[inline]
    pub fn zone(&self) -> Option<&RestrictedZone> {
        self.zone.as_ref()
    }

    #[inline]
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Replaces both lines. A non-finite row disables its line.
    pub fn set_lines(&mut self, entry_y: f32, exit_y: f32) {
        self.lines = ReferenceLines::new(Some(entry_y), Some(exit_y));
        self.config.line_entry_y = self.lines.entry_y;
        self.config.line_exit_y = self.lines.exit_y;

        info!("lines set: entry y={}, exit y={}", entry_y, exit_y);
    }

    pub fn clear_lines(&mut self) {
        self.lines = ReferenceLines::default();
        self.config.line_entry_y = None;
        self.config.line_exit_y = None;
    }

    /// Replaces the zone. On a malformed zone the previous one is dropped as
    /// well and the error is returned.
    pub fn set_zone(&mut self, points: &[na::Point2<f32>]) -> Result<(), Error> {
        match RestrictedZone::new(points) {
            Ok(zone) => {
                info!("restricted zone set: {:?}", zone.corners());
                self.config.zone = Some(zone.corners().iter().map(|p| [p.x, p.y]).collect());
                self.zone = Some(zone);
                Ok(())
            }
            Err(err) => {
                warn!("restricted zone disabled: {}", err);
                self.clear_zone();
                Err(err)
            }
        }
    }

    pub fn clear_zone(&mut self) {
        self.zone = None;
        self.config.zone = None;
    }

    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), Error> {
        match update {
            ConfigUpdate::Lines { entry_y, exit_y } => self.set_lines(entry_y, exit_y),
            ConfigUpdate::Zone(points) => self.set_zone(&points)?,
            ConfigUpdate::ClearLines => self.clear_lines(),
            ConfigUpdate::ClearZone => self.clear_zone(),
        }

        Ok(())
    }

    #[inline]
    pub fn track(&self, id: u32) -> Option<&Track> {
        self.tracks.get(&id)
    }

    #[inline]
    pub fn is_stationary(&self, id: u32) -> bool {
        self.tracks
            .get(&id)
            .map_or(false, |t| t.motion.is_stationary())
    }

    #[inline]
    pub fn counts(&self) -> &VehicleCounts {
        &self.counts
    }

    /// Number of identities currently remembered.
    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn update(&mut self, frame: &Frame) -> FrameReport {
        if let Some(last) = self.last_frame {
            if frame.number <= last {
                warn!(
                    "frame {} arrived after frame {}, skipped",
                    frame.number, last
                );
                return self.report(frame, Vec::new(), Vec::new());
            }
        }
        self.last_frame = Some(frame.number);

        let now = frame.timestamp;
        let mut seen = HashSet::with_capacity(frame.len());
        let mut annotations = Vec::with_capacity(frame.len());
        let mut events = Vec::new();

        for det in frame.iter() {
            if !det.is_valid() {
                warn!("frame {}: malformed box for track {} dropped", frame.number, det.id);
                continue;
            }

            let label = match self.classes.label(det.class) {
                Some(label) => label.to_string(),
                None => {
                    if self.warned_classes.insert(det.class) {
                        warn!(
                            "frame {}: unknown class {}, its detections are dropped",
                            frame.number, det.class
                        );
                    }
                    continue;
                }
            };

            if !seen.insert(det.id) {
                warn!("frame {}: duplicate track {} dropped", frame.number, det.id);
                continue;
            }

            let bbox = det.bbox();
            let curr_y = bbox.rear_y(self.config.rear_offset_px);

            let retired = &self.retired;
            let track = self.tracks.entry(det.id).or_insert_with(|| {
                let mut track = Track::new(det.id, det.class, frame.number);
                track.counted = retired.contains(&det.id);
                track
            });
            track.class = det.class;
            track.last_seen = frame.number;

            let prev_y = track.prev_y;
            self.motion
                .observe(det.id, &mut track.motion, prev_y, curr_y, now);

            if let Some(prev_y) = prev_y {
                let completed = self.crossing.observe(
                    det.id,
                    &mut track.crossing,
                    &self.lines,
                    prev_y,
                    curr_y,
                    now,
                );

                if let Some(speed_kmh) = completed {
                    if !track.counted {
                        track.counted = true;
                        let count = self.counts.increment(det.class);

                        info!(
                            "track {} ({}) crossed both lines: {:.2} km/h, {} {} so far",
                            det.id, label, speed_kmh, count, label
                        );

                        events.push(CrossingEvent {
                            id: det.id,
                            class: det.class,
                            label: label.clone(),
                            speed_kmh,
                            frame_number: frame.number,
                            timestamp: now,
                        });
                    }
                }
            }

            track.prev_y = Some(curr_y);

            let stationary = track.motion.is_stationary();

            annotations.push(Annotation {
                id: det.id,
                class: det.class,
                label,
                confidence: det.confidence,
                bbox,
                color: if track.crossing.is_completed() {
                    ColorState::CrossedBoth
                } else {
                    ColorState::InProgress
                },
                speed_kmh: track.crossing.speed_kmh(),
                stationary,
                parked_wrongly: parked_wrongly(stationary, bbox.ground_point(), self.zone.as_ref()),
            });
        }

        self.evict(frame.number);

        self.report(frame, annotations, events)
    }

    fn evict(&mut self, frame_number: u64) {
        let max_missing = self.config.max_missing_frames;
        let before = self.tracks.len();
        let retired = &mut self.retired;

        self.tracks.retain(|id, t| {
            let keep = t.frames_missing(frame_number) <= max_missing;
            if !keep && t.counted {
                retired.insert(*id);
            }
            keep
        });

        let evicted = before - self.tracks.len();
        if evicted > 0 {
            debug!("frame {}: forgot {} track(s)", frame_number, evicted);
        }
    }

    fn report(
        &self,
        frame: &Frame,
        annotations: Vec<Annotation>,
        events: Vec<CrossingEvent>,
    ) -> FrameReport {
        let counts = self
            .counts
            .iter()
            .map(|(class, count)| ClassCount {
                class,
                label: self.classes.label(class).unwrap_or_default().to_string(),
                count,
            })
            .collect();

        FrameReport {
            frame_number: frame.number,
            timestamp: frame.timestamp,
            annotations,
            counts,
            total: self.counts.total(),
            events,
        }
    }
}
