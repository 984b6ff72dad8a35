//! Constants used throughout the application

/// Number of hand landmarks per detected hand (MediaPipe hand model)
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Minimum number of face-mesh landmarks for a usable face observation
pub const MIN_FACE_LANDMARKS: usize = 468;

/// Fingertip landmark ids, thumb first
pub const FINGER_TIP_IDS: [usize; 5] = [4, 8, 12, 16, 20];

/// Face-mesh landmark ids for the vertical eye opening
pub const LEFT_EYE_TOP: usize = 159;
pub const LEFT_EYE_BOTTOM: usize = 145;
pub const RIGHT_EYE_TOP: usize = 386;
pub const RIGHT_EYE_BOTTOM: usize = 374;

/// Face-mesh landmark ids for the vertical mouth opening
pub const MOUTH_TOP: usize = 13;
pub const MOUTH_BOTTOM: usize = 14;

/// Default eye-opening distance below which both eyes count as closed.
/// Normalized to frame height, so it drifts with face size and distance.
pub const DEFAULT_BLINK_THRESHOLD: f32 = 0.012;

/// Default mouth-opening distance above which the mouth counts as open
pub const DEFAULT_MOUTH_OPEN_THRESHOLD: f32 = 0.04;

/// Default minimum elapsed time between two dispatched actions
pub const DEFAULT_COOLDOWN_SECONDS: f64 = 1.5;

/// Default presentation-loop tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 30;

/// Default session log location
pub const DEFAULT_LOG_PATH: &str = "logs/gesture_log.csv";

/// Header row written to a fresh session log
pub const LOG_HEADER: &str = "Timestamp,Hand,Gesture,Action,Confidence,Duration(s)";

/// Timestamp format used in session log rows
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
