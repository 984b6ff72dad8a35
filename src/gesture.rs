//! Gesture classification from hand and face keypoints.
//!
//! Pure threshold logic over normalized landmark coordinates. Hand
//! classification derives a per-finger extended flag and looks the
//! resulting bit vector up in a fixed decision table; face classification
//! compares eye and mouth opening distances against configurable
//! thresholds. No state is kept between frames.

use crate::constants::{
    FINGER_TIP_IDS, LEFT_EYE_BOTTOM, LEFT_EYE_TOP, MOUTH_BOTTOM, MOUTH_TOP, RIGHT_EYE_BOTTOM, RIGHT_EYE_TOP,
};
use crate::landmarks::{FaceObservation, HandObservation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// OS input actions a gesture can trigger.
///
/// "No action" is expressed as `Option::None` at the classification
/// boundary rather than a sentinel variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Minimize all windows (show desktop)
    MinimizeAll,
    /// Toggle media playback
    PlayPauseMedia,
    /// Raise system volume one step
    VolumeUp,
    /// Lower system volume one step
    VolumeDown,
    /// Raise display brightness one step
    BrightnessUp,
    /// Lower display brightness one step
    BrightnessDown,
    /// Toggle volume mute
    MuteVolume,
}

impl Action {
    /// Stable name used in the session log and dispatch reporting
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinimizeAll => "Minimize All",
            Self::PlayPauseMedia => "Play/Pause Media",
            Self::VolumeUp => "Volume Up",
            Self::VolumeDown => "Volume Down",
            Self::BrightnessUp => "Increase Brightness",
            Self::BrightnessDown => "Decrease Brightness",
            Self::MuteVolume => "Mute Volume",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete gesture label produced by classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    Fist,
    OpenPalm,
    Point,
    Peace,
    ThumbsUp,
    ThumbsDown,
    /// Unmapped hand shape, tagged with its extended-finger count
    Fingers(u8),
    Blink,
    MouthOpen,
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fist => f.write_str("Fist"),
            Self::OpenPalm => f.write_str("Open Palm"),
            Self::Point => f.write_str("Point"),
            Self::Peace => f.write_str("Peace"),
            Self::ThumbsUp => f.write_str("Thumbs Up"),
            Self::ThumbsDown => f.write_str("Thumbs Down"),
            Self::Fingers(n) => write!(f, "{n} Fingers"),
            Self::Blink => f.write_str("Blink"),
            Self::MouthOpen => f.write_str("Mouth Open"),
        }
    }
}

/// A classified gesture and the action it maps to, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureResult {
    pub label: GestureLabel,
    pub action: Option<Action>,
}

/// Per-finger extended flags, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerFlags {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerFlags {
    /// Number of extended fingers
    #[must_use]
    pub const fn count(self) -> u8 {
        self.thumb as u8 + self.index as u8 + self.middle as u8 + self.ring as u8 + self.pinky as u8
    }
}

/// Classification thresholds for face gestures.
///
/// Both distances are normalized to frame height, which does not correct
/// for face size or distance from the camera. The defaults work at a
/// typical webcam seating distance; treat them as configuration, not
/// ground truth.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierThresholds {
    /// Eye opening below this counts as closed
    pub blink: f32,
    /// Mouth opening above this counts as open
    pub mouth_open: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            blink: crate::constants::DEFAULT_BLINK_THRESHOLD,
            mouth_open: crate::constants::DEFAULT_MOUTH_OPEN_THRESHOLD,
        }
    }
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: ClassifierThresholds,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    /// Derive the extended flag for each finger.
    ///
    /// A finger is extended when its tip sits above the joint two ids
    /// proximal (smaller y is higher in image coordinates). The thumb
    /// extends sideways, so it compares x against the joint one id
    /// proximal instead.
    #[must_use]
    pub fn finger_flags(hand: &HandObservation) -> FingerFlags {
        let kp = &hand.keypoints;
        let extended_up = |tip: usize| kp[tip].y < kp[tip - 2].y;

        FingerFlags {
            thumb: kp[FINGER_TIP_IDS[0]].x < kp[FINGER_TIP_IDS[0] - 1].x,
            index: extended_up(FINGER_TIP_IDS[1]),
            middle: extended_up(FINGER_TIP_IDS[2]),
            ring: extended_up(FINGER_TIP_IDS[3]),
            pinky: extended_up(FINGER_TIP_IDS[4]),
        }
    }

    /// Classify one hand observation.
    ///
    /// The decision table is keyed on the extended-finger bit vector and
    /// its population count; shapes with no mapping get a counting label
    /// and no action.
    #[must_use]
    pub fn classify_hand(&self, hand: &HandObservation) -> GestureResult {
        let flags = Self::finger_flags(hand);
        let count = flags.count();

        let (label, action) = match (count, flags) {
            (0, _) => (GestureLabel::Fist, Some(Action::MinimizeAll)),
            (5, _) => (GestureLabel::OpenPalm, Some(Action::PlayPauseMedia)),
            (1, f) if f.index => (GestureLabel::Point, Some(Action::VolumeUp)),
            (2, f) if f.index && f.middle => (GestureLabel::Peace, Some(Action::VolumeDown)),
            (1, f) if f.thumb => (GestureLabel::ThumbsUp, Some(Action::BrightnessUp)),
            (1, f) if f.pinky => (GestureLabel::ThumbsDown, Some(Action::BrightnessDown)),
            (n, _) => (GestureLabel::Fingers(n), None),
        };

        GestureResult { label, action }
    }

    /// Classify one face observation, if it expresses a gesture.
    ///
    /// Returns `None` for an incomplete mesh or a neutral face. A blink
    /// requires both eyes under the threshold; a one-eyed wink does not
    /// trigger.
    #[must_use]
    pub fn classify_face(&self, face: &FaceObservation) -> Option<GestureResult> {
        if !face.is_complete() {
            return None;
        }
        let kp = &face.keypoints;

        let left_eye = (kp[LEFT_EYE_TOP].y - kp[LEFT_EYE_BOTTOM].y).abs();
        let right_eye = (kp[RIGHT_EYE_TOP].y - kp[RIGHT_EYE_BOTTOM].y).abs();
        let mouth = (kp[MOUTH_TOP].y - kp[MOUTH_BOTTOM].y).abs();

        if left_eye < self.thresholds.blink && right_eye < self.thresholds.blink {
            return Some(GestureResult {
                label: GestureLabel::Blink,
                action: Some(Action::PlayPauseMedia),
            });
        }
        if mouth > self.thresholds.mouth_open {
            return Some(GestureResult {
                label: GestureLabel::MouthOpen,
                action: Some(Action::MuteVolume),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MIN_FACE_LANDMARKS;
    use crate::landmarks::{FaceObservation, HandObservation, Handedness, Keypoint};

    /// Synthetic hand with the requested extended-finger pose, thumb first
    fn hand_with_fingers(handedness: Handedness, flags: [bool; 5]) -> HandObservation {
        let mut kp = [Keypoint::new(0.5, 0.6); crate::constants::NUM_HAND_LANDMARKS];

        // Thumb: ip joint at 3, tip at 4, extends along x
        kp[3] = Keypoint::new(0.45, 0.55);
        kp[4] = if flags[0] {
            Keypoint::new(0.38, 0.52)
        } else {
            Keypoint::new(0.48, 0.56)
        };

        // Remaining fingers: pip joints at tip - 2, tips above or below them
        for (i, &tip) in FINGER_TIP_IDS.iter().enumerate().skip(1) {
            let x = 0.45 + 0.04 * i as f32;
            kp[tip - 2] = Keypoint::new(x, 0.45);
            kp[tip] = if flags[i] {
                Keypoint::new(x, 0.30)
            } else {
                Keypoint::new(x, 0.52)
            };
        }

        HandObservation {
            handedness,
            keypoints: kp,
            confidence: 0.95,
        }
    }

    /// Synthetic full face mesh with given eye and mouth opening distances
    fn face_with_openings(left_eye: f32, right_eye: f32, mouth: f32) -> FaceObservation {
        let mut kp = vec![Keypoint::new(0.5, 0.5); MIN_FACE_LANDMARKS];
        kp[LEFT_EYE_TOP] = Keypoint::new(0.4, 0.40);
        kp[LEFT_EYE_BOTTOM] = Keypoint::new(0.4, 0.40 + left_eye);
        kp[RIGHT_EYE_TOP] = Keypoint::new(0.6, 0.40);
        kp[RIGHT_EYE_BOTTOM] = Keypoint::new(0.6, 0.40 + right_eye);
        kp[MOUTH_TOP] = Keypoint::new(0.5, 0.60);
        kp[MOUTH_BOTTOM] = Keypoint::new(0.5, 0.60 + mouth);
        FaceObservation::new(kp)
    }

    #[test]
    fn test_fist_maps_to_minimize_all() {
        let hand = hand_with_fingers(Handedness::Right, [false; 5]);
        let result = GestureClassifier::default().classify_hand(&hand);
        assert_eq!(result.label, GestureLabel::Fist);
        assert_eq!(result.action, Some(Action::MinimizeAll));
    }

    #[test]
    fn test_open_palm_maps_to_play_pause() {
        let hand = hand_with_fingers(Handedness::Left, [true; 5]);
        let result = GestureClassifier::default().classify_hand(&hand);
        assert_eq!(result.label, GestureLabel::OpenPalm);
        assert_eq!(result.action, Some(Action::PlayPauseMedia));
    }

    #[test]
    fn test_point_and_peace() {
        let classifier = GestureClassifier::default();

        let point = hand_with_fingers(Handedness::Right, [false, true, false, false, false]);
        let result = classifier.classify_hand(&point);
        assert_eq!(result.label, GestureLabel::Point);
        assert_eq!(result.action, Some(Action::VolumeUp));

        let peace = hand_with_fingers(Handedness::Right, [false, true, true, false, false]);
        let result = classifier.classify_hand(&peace);
        assert_eq!(result.label, GestureLabel::Peace);
        assert_eq!(result.action, Some(Action::VolumeDown));
    }

    #[test]
    fn test_thumb_only_and_pinky_only() {
        let classifier = GestureClassifier::default();

        let thumbs_up = hand_with_fingers(Handedness::Right, [true, false, false, false, false]);
        let result = classifier.classify_hand(&thumbs_up);
        assert_eq!(result.label, GestureLabel::ThumbsUp);
        assert_eq!(result.action, Some(Action::BrightnessUp));

        let thumbs_down = hand_with_fingers(Handedness::Right, [false, false, false, false, true]);
        let result = classifier.classify_hand(&thumbs_down);
        assert_eq!(result.label, GestureLabel::ThumbsDown);
        assert_eq!(result.action, Some(Action::BrightnessDown));
    }

    #[test]
    fn test_unmapped_shapes_get_counting_label() {
        let classifier = GestureClassifier::default();

        // Middle finger alone: count 1 but not index/thumb/pinky
        let hand = hand_with_fingers(Handedness::Right, [false, false, true, false, false]);
        let result = classifier.classify_hand(&hand);
        assert_eq!(result.label, GestureLabel::Fingers(1));
        assert_eq!(result.action, None);

        // Three fingers
        let hand = hand_with_fingers(Handedness::Right, [false, true, true, true, false]);
        let result = classifier.classify_hand(&hand);
        assert_eq!(result.label, GestureLabel::Fingers(3));
        assert_eq!(result.action, None);
    }

    #[test]
    fn test_classification_is_translation_invariant() {
        let classifier = GestureClassifier::default();
        let poses: [[bool; 5]; 4] = [
            [false; 5],
            [true; 5],
            [false, true, false, false, false],
            [false, true, true, false, false],
        ];

        for pose in poses {
            let hand = hand_with_fingers(Handedness::Right, pose);
            let baseline = classifier.classify_hand(&hand);

            let mut shifted = hand.clone();
            for kp in &mut shifted.keypoints {
                kp.x += 0.21;
                kp.y -= 0.13;
            }
            let moved = classifier.classify_hand(&shifted);
            assert_eq!(baseline, moved, "translation changed classification of {pose:?}");
        }
    }

    #[test]
    fn test_blink_requires_both_eyes() {
        let classifier = GestureClassifier::default();

        let both_closed = face_with_openings(0.005, 0.005, 0.01);
        let result = classifier.classify_face(&both_closed).unwrap();
        assert_eq!(result.label, GestureLabel::Blink);
        assert_eq!(result.action, Some(Action::PlayPauseMedia));

        // Wink: one eye open keeps the face neutral
        let wink = face_with_openings(0.005, 0.03, 0.01);
        assert!(classifier.classify_face(&wink).is_none());
    }

    #[test]
    fn test_mouth_open_maps_to_mute() {
        let classifier = GestureClassifier::default();
        let face = face_with_openings(0.03, 0.03, 0.08);
        let result = classifier.classify_face(&face).unwrap();
        assert_eq!(result.label, GestureLabel::MouthOpen);
        assert_eq!(result.action, Some(Action::MuteVolume));
    }

    #[test]
    fn test_blink_wins_over_mouth_open() {
        // Both conditions met in one frame: blink is checked first
        let classifier = GestureClassifier::default();
        let face = face_with_openings(0.005, 0.005, 0.08);
        let result = classifier.classify_face(&face).unwrap();
        assert_eq!(result.label, GestureLabel::Blink);
    }

    #[test]
    fn test_incomplete_mesh_is_ignored() {
        let classifier = GestureClassifier::default();
        let face = crate::landmarks::FaceObservation::new(vec![Keypoint::default(); 20]);
        assert!(classifier.classify_face(&face).is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        // Raise the blink threshold so a half-closed eye counts
        let classifier = GestureClassifier::new(ClassifierThresholds {
            blink: 0.05,
            mouth_open: 0.04,
        });
        let face = face_with_openings(0.03, 0.03, 0.01);
        let result = classifier.classify_face(&face).unwrap();
        assert_eq!(result.label, GestureLabel::Blink);
    }

    #[test]
    fn test_finger_pose_helper_round_trips() {
        // The synthetic hand builder must produce the flags it was asked for
        let pose = [true, false, true, false, true];
        let hand = hand_with_fingers(Handedness::Right, pose);
        let flags = GestureClassifier::finger_flags(&hand);
        assert_eq!(
            [flags.thumb, flags.index, flags.middle, flags.ring, flags.pinky],
            pose
        );
        assert_eq!(flags.count(), 3);
    }
}
