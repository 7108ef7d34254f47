use linespeed::detector::ReplayDetector;
use linespeed::sink::{output_dir, persist_events, JsonLinesSink};
use linespeed::{Scene, TrackingConfig};

use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linespeed=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().expect("expected config file name");
    let dump_path = args.next().expect("expected detections file name");
    let snapshots_root = args.next().unwrap_or_else(|| "captured_frames".to_string());

    let config = TrackingConfig::load(&config_path)?;
    info!("config loaded from {}", config_path);

    let mut scene = Scene::new(config)?;
    let snapshot_dir = output_dir(Path::new(&snapshots_root), Path::new(&dump_path));

    let dump = std::io::BufReader::new(std::fs::File::open(&dump_path)?);
    let mut sink = JsonLinesSink::new(std::io::stdout().lock());

    let mut frames = 0u64;
    let mut last = None;
    for frame in ReplayDetector::new(dump) {
        let report = scene.update(&frame);
        frames += 1;

        for (id, err) in persist_events(&mut sink, &report.events, &snapshot_dir) {
            warn!("crossing of track {} not stored: {}", id, err);
        }

        for ann in report.annotations.iter().filter(|a| a.parked_wrongly) {
            warn!("frame {}: track {} parked wrongly", report.frame_number, ann.id);
        }

        last = Some(report);
    }

    info!("processed {} frames", frames);
    if let Some(report) = last {
        for line in report.count_lines() {
            info!("{}", line);
        }
    }

    Ok(())
}
