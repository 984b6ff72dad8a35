//! Durable append-only log of dispatched actions.
//!
//! One delimited-text row per dispatched action, created with a header on
//! first use. Rows are never mutated or deleted. Write failures are typed
//! errors the session reports and survives.

use crate::constants::{LOG_HEADER, LOG_TIMESTAMP_FORMAT};
use crate::debounce::SourceKey;
use crate::gesture::Action;
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One parsed session-log row
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub source: SourceKey,
    /// Human-readable gesture tag as logged
    pub gesture: String,
    pub action: Action,
    /// Detection confidence, rounded to two decimals on write
    pub confidence: f32,
    /// Seconds since the same source's previous dispatch, 0 if none
    pub duration_secs: f64,
}

impl LogRecord {
    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return Err(Error::Log(format!("expected 6 fields, got {}: {line}", fields.len())));
        }

        let timestamp = NaiveDateTime::parse_from_str(fields[0], LOG_TIMESTAMP_FORMAT)
            .map_err(|e| Error::Log(format!("bad timestamp {:?}: {e}", fields[0])))?;
        let source = match fields[1] {
            "Left" => SourceKey::LeftHand,
            "Right" => SourceKey::RightHand,
            "Face" => SourceKey::Face,
            other => return Err(Error::Log(format!("unknown source {other:?}"))),
        };
        let action = parse_action(fields[3])?;
        let confidence: f32 = fields[4]
            .parse()
            .map_err(|_| Error::Log(format!("bad confidence {:?}", fields[4])))?;
        let duration_secs: f64 = fields[5]
            .parse()
            .map_err(|_| Error::Log(format!("bad duration {:?}", fields[5])))?;

        Ok(Self {
            timestamp,
            source,
            gesture: fields[2].to_string(),
            action,
            confidence,
            duration_secs,
        })
    }
}

fn parse_action(name: &str) -> Result<Action> {
    match name {
        "Minimize All" => Ok(Action::MinimizeAll),
        "Play/Pause Media" => Ok(Action::PlayPauseMedia),
        "Volume Up" => Ok(Action::VolumeUp),
        "Volume Down" => Ok(Action::VolumeDown),
        "Increase Brightness" => Ok(Action::BrightnessUp),
        "Decrease Brightness" => Ok(Action::BrightnessDown),
        "Mute Volume" => Ok(Action::MuteVolume),
        other => Err(Error::Log(format!("unknown action {other:?}"))),
    }
}

/// Append-only session log backed by a delimited-text file
#[derive(Debug)]
pub struct SessionLogger {
    path: PathBuf,
}

impl SessionLogger {
    /// Open a session log, creating the parent directory and writing the
    /// header row if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory or file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            fs::write(&path, format!("{LOG_HEADER}\n"))?;
        }
        Ok(Self { path })
    }

    /// Log file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row for a dispatched action, stamped with local time.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` when the row cannot be written. The caller is
    /// expected to report this and keep running.
    pub fn append(
        &self,
        source: SourceKey,
        gesture: &str,
        action: Action,
        confidence: f32,
        duration_secs: f64,
    ) -> Result<()> {
        let timestamp = Local::now().format(LOG_TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(
            file,
            "{timestamp},{},{gesture},{},{confidence:.2},{duration_secs:.2}",
            source.as_str(),
            action.as_str(),
        )?;
        debug!("log: {} - {gesture} -> {action}", source.as_str());
        Ok(())
    }

    /// Parse every logged row back into records, skipping the header.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` on a malformed row or a missing header.
    pub fn read_records(&self) -> Result<Vec<LogRecord>> {
        let content = fs::read_to_string(&self.path)?;
        let mut lines = content.lines();
        match lines.next() {
            Some(header) if header == LOG_HEADER => {}
            other => return Err(Error::Log(format!("missing header row, found {other:?}"))),
        }
        lines.map(LogRecord::parse_line).collect()
    }
}
