//! Observation data model and the landmark provider boundary.
//!
//! The landmark-detection model is an external collaborator: given a video
//! frame it returns named keypoints for up to two hands and one face, with
//! normalized coordinates. This module defines the observation types that
//! cross that boundary, the [`LandmarkProvider`] trait consumed by a
//! presentation loop, and a trace-backed provider for replay and tests.

use crate::constants::{MIN_FACE_LANDMARKS, NUM_HAND_LANDMARKS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single named keypoint with normalized coordinates.
///
/// `x` and `y` are unitless in `[0, 1]` relative to the frame dimensions.
/// Depth (`z`) is optional in recorded traces and defaults to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Keypoint {
    /// Create a 2-D keypoint
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Classification of a detected hand as left or right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Stable string form, matching the session log column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// One detected hand in one frame.
///
/// Keypoints are positionally indexed by MediaPipe hand-landmark id
/// (0 = wrist, 4 = thumb tip, 8 = index tip, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandObservation {
    /// Left or right hand
    pub handedness: Handedness,
    /// Fixed-size landmark set, indexed by anatomical landmark id
    pub keypoints: [Keypoint; NUM_HAND_LANDMARKS],
    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

impl HandObservation {
    /// Build an observation from a dynamically-sized keypoint list.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the list does not contain exactly
    /// [`NUM_HAND_LANDMARKS`] keypoints.
    pub fn from_keypoints(
        handedness: Handedness,
        keypoints: Vec<Keypoint>,
        confidence: f32,
    ) -> Result<Self> {
        let len = keypoints.len();
        let keypoints: [Keypoint; NUM_HAND_LANDMARKS] = keypoints
            .try_into()
            .map_err(|_| Error::InvalidInput(format!("expected {NUM_HAND_LANDMARKS} hand keypoints, got {len}")))?;
        Ok(Self {
            handedness,
            keypoints,
            confidence,
        })
    }
}

/// One detected face in one frame.
///
/// Keypoints are positionally indexed by MediaPipe face-mesh id. A full
/// mesh carries at least [`MIN_FACE_LANDMARKS`] points; the classifier
/// ignores observations that are too short to index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceObservation {
    pub keypoints: Vec<Keypoint>,
}

impl FaceObservation {
    #[must_use]
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Whether the observation carries a full mesh the classifier can index
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.keypoints.len() >= MIN_FACE_LANDMARKS
    }
}

/// Everything the landmark provider extracted from one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameObservations {
    /// Zero to two detected hands
    #[serde(default)]
    pub hands: Vec<HandObservation>,
    /// Zero or one detected face
    #[serde(default)]
    pub face: Option<FaceObservation>,
}

/// Landmark extraction boundary.
///
/// Implementations wrap a pretrained perception model (or, for tests and
/// replay, a recorded trace). The `Frame` type is whatever the hosting
/// capture loop hands around: pixel data for a live model, a frame index
/// for a trace.
pub trait LandmarkProvider {
    type Frame;

    /// Detect zero to two hands in the frame
    fn detect_hands(&mut self, frame: &Self::Frame) -> Result<Vec<HandObservation>>;

    /// Detect zero or one face in the frame
    fn detect_face(&mut self, frame: &Self::Frame) -> Result<Option<FaceObservation>>;
}

/// One entry of a recorded observation trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Seconds since the start of the recording
    pub time: f64,
    #[serde(flatten)]
    pub observations: FrameObservations,
}

/// Landmark provider backed by a recorded trace, indexed by frame number
pub struct TraceProvider {
    frames: Vec<TraceFrame>,
}

impl TraceProvider {
    #[must_use]
    pub fn new(frames: Vec<TraceFrame>) -> Self {
        Self { frames }
    }

    /// Load a JSON trace from disk
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Trace`
    /// if it does not parse as a frame list.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let frames: Vec<TraceFrame> =
            serde_json::from_str(&content).map_err(|e| Error::Trace(format!("failed to parse trace: {e}")))?;
        Ok(Self::new(frames))
    }

    /// Number of recorded frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Recording timestamp of a frame, in seconds from the start
    #[must_use]
    pub fn time_of(&self, index: usize) -> Option<f64> {
        self.frames.get(index).map(|f| f.time)
    }

    fn frame(&self, index: usize) -> Result<&TraceFrame> {
        self.frames
            .get(index)
            .ok_or_else(|| Error::Trace(format!("frame index {index} out of range")))
    }
}

impl LandmarkProvider for TraceProvider {
    type Frame = usize;

    fn detect_hands(&mut self, frame: &usize) -> Result<Vec<HandObservation>> {
        Ok(self.frame(*frame)?.observations.hands.clone())
    }

    fn detect_face(&mut self, frame: &usize) -> Result<Option<FaceObservation>> {
        Ok(self.frame(*frame)?.observations.face.clone())
    }
}
