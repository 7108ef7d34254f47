use crate::detection::Detection;
use crate::error::Error;
use crate::frame::Frame;

use std::io::BufRead;
use tracing::warn;

/// External detector and tracker: boxes with identities that stay stable
/// across frames for the same object.
pub trait Detector {
    type Input: ?Sized;

    fn detect(&mut self, input: &Self::Input) -> Result<Vec<Detection>, Error>;
}

/// A failing detector yields an empty frame, never an error.
pub fn detect_or_empty<D: Detector>(
    detector: &mut D,
    input: &D::Input,
    frame_number: u64,
) -> Vec<Detection> {
    match detector.detect(input) {
        Ok(dets) => dets,
        Err(err) => {
            warn!("frame {}: detector failed: {}", frame_number, err);
            Vec::new()
        }
    }
}

/// Detections encoded as a JSON array, the payload of a dump line.
#[derive(Debug, Default)]
pub struct JsonDetector;

impl Detector for JsonDetector {
    type Input = str;

    fn detect(&mut self, input: &str) -> Result<Vec<Detection>, Error> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Replays dumped tracker output, one frame per line in the
/// `<timestamp_us>:<json array of detections>` format. Frames are numbered
/// by their line in the dump.
pub struct ReplayDetector<R: BufRead> {
    lines: std::io::Lines<R>,
    line_number: u64,
    parser: JsonDetector,
}

impl<R: BufRead> ReplayDetector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            parser: JsonDetector,
        }
    }

    fn split(line: &str) -> Result<(f64, &str), Error> {
        let idx = line
            .find(':')
            .ok_or_else(|| Error::Detector("expected `:`".into()))?;
        let (ts, vector) = line.split_at(idx);

        let ts_us: u64 = ts
            .trim()
            .parse()
            .map_err(|_| Error::Detector(format!("bad timestamp `{}`", ts)))?;

        Ok((ts_us as f64 / 1_000_000.0, &vector[1..]))
    }
}

impl<R: BufRead> Iterator for ReplayDetector<R> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    warn!("replay stopped at line {}: {}", self.line_number + 1, err);
                    return None;
                }
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            // without a timestamp the line cannot be placed in time
            match Self::split(&line) {
                Ok((ts, payload)) => {
                    let dets = detect_or_empty(&mut self.parser, payload, self.line_number);
                    return Some(Frame::new(self.line_number, ts, dets));
                }
                Err(err) => warn!("wrong file format at line {}: {}", self.line_number, err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flaky(bool);

    impl Detector for Flaky {
        type Input = ();

        fn detect(&mut self, _: &()) -> Result<Vec<Detection>, Error> {
            self.0 = !self.0;
            if self.0 {
                Ok(vec![Detection::new(1, 2, 0.0, 0.0, 1.0, 1.0)])
            } else {
                Err(Error::Detector("no device".into()))
            }
        }
    }

    #[test]
    fn test_failure_means_no_detections() {
        let mut det = Flaky(false);

        assert_eq!(detect_or_empty(&mut det, &(), 1).len(), 1);
        assert!(detect_or_empty(&mut det, &(), 2).is_empty());
    }

    #[test]
    fn test_replay_keeps_frame_numbers() {
        let dump = "1000000:[{\"id\":1,\"c\":2,\"xyxy\":[0,10,5,20]}]\n\
                    garbage\n\
                    1500000:[]\n\
                    2000000:{\"not\":\"an array\"}\n\
                    \n\
                    3000000:[{\"id\":4,\"c\":7,\"xyxy\":[0,10,5,20]}]\n";

        let frames: Vec<_> = ReplayDetector::new(dump.as_bytes())
            .map(|f| (f.number, f.timestamp, f.len()))
            .collect();

        // unreadable timestamp: no frame; unreadable detections: empty frame
        assert_eq!(
            frames,
            vec![(1, 1.0, 1), (3, 1.5, 0), (4, 2.0, 0), (6, 3.0, 1)]
        );
    }

    #[test]
    fn test_json_detector() {
        let mut parser = JsonDetector;

        assert_eq!(parser.detect("[]").unwrap().len(), 0);
        assert!(parser.detect("{oops}").is_err());
        assert!(detect_or_empty(&mut parser, "{oops}", 1).is_empty());
    }
}
