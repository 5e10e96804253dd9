//! Event Configuration
//!
//! Loads the JSON document that customises the screensaver for an event:
//! subtitle, rotating status verbs, the agenda, venue details and the
//! escalating "time to leave" messages.
//!
//! # Failure Policy
//!
//! - Missing file: every field takes its built-in default.
//! - Unreadable file or invalid JSON syntax: fatal, returned as [`ConfigError`].
//! - A field with the wrong shape: that field alone falls back to its default
//!   and a warning is logged. The rest of the document is still used.
//!
//! # Example
//!
//! ```json
//! {
//!   "subtitle": "CODE CURIOUS",
//!   "agenda": [
//!     { "time": "18:00", "label": "Doors open" },
//!     { "time": "20:00", "label": "Time to go home!" }
//!   ],
//!   "event_date": "16 October 2026",
//!   "venue": "The Old Library",
//!   "wifi": "guest / curious123",
//!   "urgency_start_minutes_before_end": 40
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Subtitle word shown under the logo
pub const DEFAULT_SUBTITLE: &str = "CODE CURIOUS";

/// Rotating status verbs
pub const DEFAULT_VERBS: &[&str] = &[
    "Reticulating splines...",
    "Compiling thoughts...",
    "Grepping for meaning...",
    "Rebasing reality...",
    "Initializing curiosity...",
    "Parsing the void...",
    "Optimizing vibes...",
    "Aligning tokens...",
    "Hydrating the cache...",
    "Unwinding the stack...",
    "Resolving dependencies...",
    "Defragmenting ideas...",
    "Warming up the neurons...",
    "Indexing possibilities...",
    "Negotiating with the compiler...",
    "Untangling spaghetti...",
    "Calibrating enthusiasm...",
    "Consulting the oracle...",
    "Deploying butterflies...",
    "Refactoring the universe...",
];

/// Messages cycled through once the final agenda time has passed
pub const DEFAULT_GO_HOME_MESSAGES: &[&str] = &[
    "Time to go home!",
    "Your sofa misses you",
    "The pub is calling...",
    "Last one out gets the light",
    "git commit -m 'gone home'",
];

/// Minutes before the final agenda entry at which urgency starts ramping
pub const DEFAULT_URGENCY_LEAD_MINUTES: f64 = 40.0;

/// Fixed frame interval (~12 fps)
pub const DEFAULT_TICK_MS: u64 = 80;

/// How long each status verb stays on screen
pub const DEFAULT_VERB_INTERVAL_SECS: u64 = 8;

/// Separator placed between each subtitle letter
const SUBTITLE_LETTER_GAP: &str = "   ";

/// Urgency anchor used when no agenda is configured
const NO_AGENDA_ANCHOR_MINUTES: f64 = 23.0 * 60.0 + 59.0;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: io::Error,
    },

    /// The file is not valid JSON
    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Schedule
// =============================================================================

/// One agenda line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgendaEntry {
    /// Time as written in the config (shown verbatim)
    pub time_text: String,
    /// Parsed time of day
    pub time: NaiveTime,
    /// What happens at that time
    pub label: String,
}

impl AgendaEntry {
    /// Parse an entry; `None` if the time is not `H:MM` / `HH:MM`
    pub fn parse(time_text: &str, label: &str) -> Option<Self> {
        let time = parse_time_of_day(time_text)?;
        Some(Self {
            time_text: time_text.trim().to_string(),
            time,
            label: label.to_string(),
        })
    }

    /// The line as drawn on screen
    pub fn line(&self) -> String {
        self.line_with_label(&self.label)
    }

    /// The line with a different label (used for the go-home messages)
    pub fn line_with_label(&self, label: &str) -> String {
        format!("{}   {}", self.time_text, label)
    }
}

/// Ordered agenda; the last entry drives urgency
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<AgendaEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<AgendaEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AgendaEntry] {
        &self.entries
    }

    /// The distinguished final entry
    pub fn end(&self) -> Option<&AgendaEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `H:MM` or `HH:MM` into a time of day
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Minutes since midnight, including fractional seconds
pub fn minutes_of_day(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 60.0 + f64::from(time.nanosecond()) / 60e9
}

// =============================================================================
// Urgency Window
// =============================================================================

/// When the go-home ramp starts and how long it takes to reach 1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UrgencyWindow {
    /// Ramp start, minutes since midnight
    pub start_minutes: f64,
    /// Ramp length in minutes (reaching 1.0 at the end entry)
    pub ramp_minutes: f64,
}

impl UrgencyWindow {
    /// Derive the window from the schedule's final entry
    ///
    /// With no agenda the window collapses to a one-minute ramp starting at
    /// 23:59, which keeps the ramp effectively disabled.
    pub fn for_schedule(schedule: &Schedule, lead_minutes: f64) -> Self {
        match schedule.end() {
            Some(end) => {
                let end_minutes = f64::from(end.time.hour() * 60 + end.time.minute());
                Self {
                    start_minutes: (end_minutes - lead_minutes).rem_euclid(MINUTES_PER_DAY),
                    ramp_minutes: lead_minutes,
                }
            }
            None => Self {
                start_minutes: NO_AGENDA_ANCHOR_MINUTES,
                ramp_minutes: 1.0,
            },
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Everything the scene and sprites need, resolved once at startup
#[derive(Clone, Debug, PartialEq)]
pub struct ScreensaverConfig {
    /// Letter-spaced subtitle (e.g. `C   O   D   E`)
    pub subtitle: String,
    /// Rotating status verbs (never empty)
    pub verbs: Vec<String>,
    /// Agenda
    pub schedule: Schedule,
    /// `date  ·  venue`, empty when either part is missing
    pub date_line: String,
    /// `WiFi:  ...`, empty when unset
    pub wifi_line: String,
    /// Escalating go-home messages (never empty)
    pub go_home_messages: Vec<String>,
    /// Urgency ramp
    pub urgency: UrgencyWindow,
    /// Frame interval
    pub tick: Duration,
    /// Verb rotation interval
    pub verb_interval: Duration,
}

impl Default for ScreensaverConfig {
    fn default() -> Self {
        Self::from_value(&Value::Null)
    }
}

#[derive(Deserialize)]
struct RawAgendaItem {
    time: String,
    label: String,
}

impl ScreensaverConfig {
    /// Parse a JSON document; only syntax errors are fatal
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let doc: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&doc))
    }

    /// Resolve a parsed document, substituting defaults field by field
    pub fn from_value(doc: &Value) -> Self {
        if !doc.is_object() && !doc.is_null() {
            tracing::warn!("Config root is not a JSON object, using defaults");
        }

        let subtitle_word: String =
            field(doc, "subtitle").unwrap_or_else(|| DEFAULT_SUBTITLE.to_string());
        let verbs = non_empty_list(doc, "verbs", DEFAULT_VERBS);
        let go_home_messages = non_empty_list(doc, "go_home_messages", DEFAULT_GO_HOME_MESSAGES);
        let schedule = parse_agenda(doc);

        let event_date: String = field(doc, "event_date").unwrap_or_default();
        let venue: String = field(doc, "venue").unwrap_or_default();
        let date_line = if !event_date.is_empty() && !venue.is_empty() {
            format!("{event_date}  ·  {venue}")
        } else {
            String::new()
        };

        let wifi: String = field(doc, "wifi").unwrap_or_default();
        let wifi_line = if wifi.is_empty() {
            String::new()
        } else {
            format!("WiFi:  {wifi}")
        };

        let lead_minutes = match field::<f64>(doc, "urgency_start_minutes_before_end") {
            Some(lead) if lead.is_finite() && lead > 0.0 => lead,
            Some(lead) => {
                tracing::warn!(lead, "Urgency lead must be positive, using default");
                DEFAULT_URGENCY_LEAD_MINUTES
            }
            None => DEFAULT_URGENCY_LEAD_MINUTES,
        };
        let urgency = UrgencyWindow::for_schedule(&schedule, lead_minutes);

        let tick_ms = field::<u64>(doc, "tick_ms")
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);
        let verb_secs =
            field::<u64>(doc, "verb_interval_secs").unwrap_or(DEFAULT_VERB_INTERVAL_SECS);

        Self {
            subtitle: letter_space(&subtitle_word),
            verbs,
            schedule,
            date_line,
            wifi_line,
            go_home_messages,
            urgency,
            tick: Duration::from_millis(tick_ms),
            verb_interval: Duration::from_secs(verb_secs),
        }
    }
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or is not valid
/// JSON. A missing file is not an error (defaults are used).
pub fn load_config_from_path(path: &Path) -> Result<ScreensaverConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(ScreensaverConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ScreensaverConfig::from_json_str(&text)?;

    tracing::info!(
        path = %path.display(),
        agenda = config.schedule.len(),
        verbs = config.verbs.len(),
        "Loaded configuration from file"
    );
    Ok(config)
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Extract one field, warning (and returning `None`) when it has the wrong type
fn field<T: DeserializeOwned>(doc: &Value, key: &str) -> Option<T> {
    let value = doc.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed config field");
            None
        }
    }
}

fn non_empty_list(doc: &Value, key: &str, default: &[&str]) -> Vec<String> {
    match field::<Vec<String>>(doc, key) {
        Some(list) if !list.is_empty() => list,
        Some(_) => {
            tracing::warn!(key, "Config list is empty, using defaults");
            default.iter().map(|s| s.to_string()).collect()
        }
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

fn parse_agenda(doc: &Value) -> Schedule {
    let items: Vec<RawAgendaItem> = field(doc, "agenda").unwrap_or_default();
    let entries = items
        .iter()
        .filter_map(|item| {
            let entry = AgendaEntry::parse(&item.time, &item.label);
            if entry.is_none() {
                tracing::warn!(time = %item.time, label = %item.label, "Skipping agenda entry with bad time");
            }
            entry
        })
        .collect();
    Schedule::new(entries)
}

fn letter_space(word: &str) -> String {
    let letters: Vec<String> = word.chars().map(String::from).collect();
    letters.join(SUBTITLE_LETTER_GAP)
}
