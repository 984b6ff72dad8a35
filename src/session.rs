//! Capture session: lifecycle and the per-frame pipeline.
//!
//! A session owns the classifier, the debounce gate, the session log and
//! the dispatch boundary, and turns one frame of observations into gated,
//! dispatched, logged actions. Sessions are explicit objects with a
//! start/stop lifecycle so tests can run several independently; all
//! processing is synchronous on the caller's thread, driven by a periodic
//! tick in the hosting presentation loop.

use crate::config::Config;
use crate::debounce::{DebounceGate, SourceKey};
use crate::dispatch::{ActionDispatcher, DispatchOutcome};
use crate::gesture::{Action, GestureClassifier, GestureLabel, GestureResult};
use crate::landmarks::FrameObservations;
use crate::session_log::SessionLogger;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// What happened to the session log for one dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    /// A row was appended
    Logged,
    /// The row could not be written; reported, never fatal
    Failed(String),
    /// Logging is disabled in configuration
    Disabled,
}

/// One action that passed the gate this frame
#[derive(Debug, Clone)]
pub struct DispatchedAction {
    pub source: SourceKey,
    pub label: GestureLabel,
    pub action: Action,
    pub outcome: DispatchOutcome,
    pub log: LogOutcome,
}

/// Result of processing one frame of observations
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Classified gesture per source, in processing order. Hands always
    /// appear; the face appears only when it expresses a gesture.
    pub gestures: Vec<(SourceKey, GestureLabel)>,
    /// Actions that passed the gate, with their boundary outcomes
    pub dispatched: Vec<DispatchedAction>,
    /// Time until the global gate reopens, zero when ready
    pub cooldown_remaining: Duration,
}

impl FrameReport {
    /// One-line gesture summary for a status display
    #[must_use]
    pub fn hud_line(&self) -> String {
        if self.gestures.is_empty() {
            return "No gesture detected".to_string();
        }
        self.gestures
            .iter()
            .map(|(source, label)| format!("{}: {label}", source.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A gesture capture session
pub struct GestureSession<D: ActionDispatcher> {
    classifier: GestureClassifier,
    gate: DebounceGate,
    logger: Option<SessionLogger>,
    dispatcher: D,
    running: bool,
}

impl<D: ActionDispatcher> GestureSession<D> {
    /// Create a session from configuration and a dispatch boundary.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings and an I/O error
    /// if the session log cannot be created.
    pub fn new(config: &Config, dispatcher: D) -> Result<Self> {
        config.validate()?;

        let logger = if config.log.enabled {
            Some(SessionLogger::create(&config.log.path)?)
        } else {
            None
        };

        info!(
            "Session created: cooldown {:.2}s, dispatcher {}, log {}",
            config.gate.cooldown_seconds,
            dispatcher.name(),
            logger.as_ref().map_or_else(|| "disabled".to_string(), |l| l.path().display().to_string()),
        );

        Ok(Self {
            classifier: GestureClassifier::new(config.classifier_thresholds()),
            gate: DebounceGate::new(config.cooldown()),
            logger,
            dispatcher,
            running: false,
        })
    }

    /// Begin a capture session, clearing all debounce state.
    ///
    /// # Errors
    ///
    /// Returns a session error if the session is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(Error::Session("session already running".to_string()));
        }
        self.gate.reset();
        self.running = true;
        info!("Session started");
        Ok(())
    }

    /// End the capture session. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            info!("Session stopped");
        }
        self.running = false;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Dispatch boundary, mainly for inspection in tests
    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Session log location, if logging is enabled
    #[must_use]
    pub fn log_path(&self) -> Option<&std::path::Path> {
        self.logger.as_ref().map(SessionLogger::path)
    }

    /// Run one read-classify-debounce-dispatch-log cycle.
    ///
    /// Hands are processed in observation order, then the face; within one
    /// frame a given action name dispatches at most once even when several
    /// sources trigger it. Dispatch and log failures are captured in the
    /// report and never interrupt processing.
    ///
    /// # Errors
    ///
    /// Returns a session error if called before `start`.
    pub fn process_frame(&mut self, observations: &FrameObservations, now: Instant) -> Result<FrameReport> {
        if !self.running {
            return Err(Error::Session("session not started".to_string()));
        }

        let mut report = FrameReport::default();
        let mut performed: Vec<Action> = Vec::new();

        for hand in &observations.hands {
            let source = SourceKey::from(hand.handedness);
            let result = self.classifier.classify_hand(hand);
            report.gestures.push((source, result.label));
            self.consider(source, result, hand.confidence, now, &mut performed, &mut report.dispatched);
        }

        if let Some(face) = &observations.face {
            if let Some(result) = self.classifier.classify_face(face) {
                report.gestures.push((SourceKey::Face, result.label));
                // Face-mesh detection carries no per-observation score
                self.consider(SourceKey::Face, result, 1.0, now, &mut performed, &mut report.dispatched);
            }
        }

        report.cooldown_remaining = self.gate.cooldown_remaining(now);
        Ok(report)
    }

    /// Gate one classified gesture and, if it passes, push it through the
    /// dispatch and log boundaries.
    fn consider(
        &mut self,
        source: SourceKey,
        result: GestureResult,
        confidence: f32,
        now: Instant,
        performed: &mut Vec<Action>,
        dispatched: &mut Vec<DispatchedAction>,
    ) {
        let Some(action) = result.action else {
            return;
        };
        if performed.contains(&action) {
            debug!("{} already dispatched this frame, skipping {}", action, source.as_str());
            return;
        }

        // Duration column: seconds since this source last dispatched,
        // captured before the gate overwrites it
        let duration = self.gate.seconds_since_dispatch(source, now);

        if !self.gate.should_dispatch(source, result.label, Some(action), now) {
            return;
        }
        performed.push(action);

        let outcome = match self.dispatcher.dispatch(action) {
            Ok(()) => DispatchOutcome::Dispatched,
            Err(e) => {
                warn!("Dispatch failed for {action}: {e}");
                DispatchOutcome::Failed(e.to_string())
            }
        };

        let log = match &self.logger {
            None => LogOutcome::Disabled,
            Some(logger) => match logger.append(source, &result.label.to_string(), action, confidence, duration) {
                Ok(()) => LogOutcome::Logged,
                Err(e) => {
                    warn!("Log write failed: {e}");
                    LogOutcome::Failed(e.to_string())
                }
            },
        };

        dispatched.push(DispatchedAction {
            source,
            label: result.label,
            action,
            outcome,
            log,
        });
    }
}
