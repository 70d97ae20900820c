//! Loading keypoint sequences from OpenPose `--write_json` output.
//!
//! OpenPose writes one JSON record per video frame:
//!
//! ```json
//! { "version": 1.3, "people": [ { "pose_keypoints_2d": [x0, y0, c0, x1, y1, c1, ...] } ] }
//! ```
//!
//! Only the first person's `(x, y)` pairs are kept; confidences are dropped.
//! Records without a usable pose are skipped rather than turned into
//! all-zero frames.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimilarityError};
use crate::frame::KeypointFrame;

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    #[serde(default)]
    pose_keypoints_2d: Vec<f64>,
}

/// Parse one OpenPose JSON record into a frame.
///
/// Returns `Ok(None)` when the record has no people, an empty keypoint
/// array, or only zero values.
///
/// # Errors
///
/// Returns [`SimilarityError::InvalidRecord`] if the text is not a valid
/// OpenPose record.
pub fn parse_keypoint_record(json: &str) -> Result<Option<KeypointFrame>> {
    let record: Record =
        serde_json::from_str(json).map_err(|e| SimilarityError::invalid_record(e.to_string()))?;

    let Some(person) = record.people.into_iter().next() else {
        return Ok(None);
    };
    let keypoints = person.pose_keypoints_2d;
    if keypoints.iter().all(|&v| v == 0.0) {
        return Ok(None);
    }

    let coords = keypoints
        .chunks(3)
        .flat_map(|triple| triple.iter().take(2).copied())
        .collect();

    Ok(Some(KeypointFrame::new(coords)))
}

/// Load every `*.json` record of a folder, in file name order.
///
/// A missing folder yields an empty sequence. Records that fail to parse or
/// hold no pose are skipped.
///
/// # Errors
///
/// Returns an I/O error if an existing folder cannot be listed.
pub fn load_sequence(dir: impl AsRef<Path>) -> Result<Vec<KeypointFrame>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut sequence = Vec::with_capacity(files.len());
    for path in &files {
        let parsed = fs::read_to_string(path)
            .map_err(SimilarityError::from)
            .and_then(|text| parse_keypoint_record(&text));

        match parsed {
            Ok(Some(frame)) => sequence.push(frame),
            Ok(None) => tracing::debug!(path = %path.display(), "no pose in record"),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping record"),
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        files = files.len(),
        frames = sequence.len(),
        "loaded keypoint sequence"
    );
    Ok(sequence)
}
