//! Action dispatch boundary to OS input simulation.
//!
//! Translating an action name into a synthetic key press is the job of an
//! external collaborator; this module defines the trait that boundary
//! implements plus stand-ins for replay and tests. A dispatch failure is
//! surfaced as a typed outcome and must never take down the capture loop.

use crate::gesture::Action;
use crate::Result;
use log::info;

/// Key chord an action maps to on the OS side.
///
/// Kept here so every dispatcher implementation reports the same mapping.
#[must_use]
pub const fn key_chord(action: Action) -> &'static str {
    match action {
        Action::MinimizeAll => "super+d",
        Action::PlayPauseMedia => "playpause",
        Action::VolumeUp => "volumeup",
        Action::VolumeDown => "volumedown",
        Action::BrightnessUp => "brightnessup",
        Action::BrightnessDown => "brightnessdown",
        Action::MuteVolume => "volumemute",
    }
}

/// OS input simulation boundary
pub trait ActionDispatcher {
    /// Perform the OS call for one action.
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` when the underlying input-simulation call
    /// fails. Callers report the failure and continue.
    fn dispatch(&mut self, action: Action) -> Result<()>;

    /// Dispatcher name for logs and reports
    fn name(&self) -> &str;
}

/// What happened to one gated action at the dispatch boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The OS call was made
    Dispatched,
    /// The OS call failed; the reason is reported, never propagated
    Failed(String),
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// Dispatcher that reports the key chord it would press.
///
/// Used by the replay binary, where actually injecting input would be
/// unwelcome.
#[derive(Debug, Default)]
pub struct ConsoleDispatcher;

impl ActionDispatcher for ConsoleDispatcher {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        info!("dispatch: {} ({})", action, key_chord(action));
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Dispatcher that drops every action
#[derive(Debug, Default)]
pub struct NullDispatcher;

impl ActionDispatcher for NullDispatcher {
    fn dispatch(&mut self, _action: Action) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Dispatcher that records what was dispatched, with an optional injected
/// failure, for exercising the degrade-gracefully path in tests
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    /// Every action that reached the boundary, in dispatch order
    pub dispatched: Vec<Action>,
    fail_on: Option<Action>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording dispatcher that fails whenever `action` is dispatched
    #[must_use]
    pub fn failing_on(action: Action) -> Self {
        Self {
            dispatched: Vec::new(),
            fail_on: Some(action),
        }
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        if self.fail_on == Some(action) {
            return Err(crate::Error::Dispatch(format!("injected failure for {action}")));
        }
        self.dispatched.push(action);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
