//! Gesture control library for mapping webcam hand and face gestures to
//! operating-system input actions.
//!
//! The perception model is an external collaborator behind the
//! [`landmarks::LandmarkProvider`] boundary; this crate supplies the rule
//! logic that runs on its output:
//! 1. Gesture classification from normalized landmark coordinates
//! 2. Debounce/cooldown gating so a held gesture fires once
//! 3. Dispatch through the [`dispatch::ActionDispatcher`] OS boundary
//! 4. A durable append-only session log
//!
//! # Examples
//!
//! ## Classifying a hand observation
//!
//! ```
//! use gesture_control::gesture::{Action, GestureClassifier, GestureLabel};
//! use gesture_control::landmarks::{HandObservation, Handedness, Keypoint};
//!
//! let classifier = GestureClassifier::default();
//!
//! // All fingertips level with their reference joints reads as a fist
//! let hand = HandObservation {
//!     handedness: Handedness::Right,
//!     keypoints: [Keypoint::new(0.5, 0.6); 21],
//!     confidence: 0.9,
//! };
//!
//! let result = classifier.classify_hand(&hand);
//! assert_eq!(result.label, GestureLabel::Fist);
//! assert_eq!(result.action, Some(Action::MinimizeAll));
//! ```
//!
//! ## Driving a session
//!
//! ```
//! use gesture_control::config::Config;
//! use gesture_control::dispatch::RecordingDispatcher;
//! use gesture_control::landmarks::FrameObservations;
//! use gesture_control::session::GestureSession;
//! use std::time::Instant;
//!
//! # fn main() -> gesture_control::Result<()> {
//! let mut config = Config::default();
//! config.log.enabled = false;
//!
//! let mut session = GestureSession::new(&config, RecordingDispatcher::new())?;
//! session.start()?;
//!
//! // The presentation loop feeds one frame of observations per tick
//! let report = session.process_frame(&FrameObservations::default(), Instant::now())?;
//! assert!(report.dispatched.is_empty());
//! assert_eq!(report.hud_line(), "No gesture detected");
//!
//! session.stop();
//! # Ok(())
//! # }
//! ```

/// Observation data model and the landmark provider boundary
pub mod landmarks;

/// Gesture classification from hand and face keypoints
pub mod gesture;

/// Debounce and cooldown gating for gesture dispatch
pub mod debounce;

/// Action dispatch boundary to OS input simulation
pub mod dispatch;

/// Durable append-only log of dispatched actions
pub mod session_log;

/// Capture session lifecycle and per-frame pipeline
pub mod session;

/// Error types and result handling
pub mod error;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

pub use error::{Error, Result};
