//! Timestamp utilities
//!
//! Journal entries carry a human-readable wall-clock timestamp such as
//! `November 03, 2025 — 4:07 PM (PST)`. The offset and zone label come from
//! configuration; the defaults reproduce Pacific Standard Time.

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::TimestampConfig;
use crate::{Error, Result};

/// Display format for journal timestamps
pub const JOURNAL_TIMESTAMP_FORMAT: &str = "%B %d, %Y — %-I:%M %p";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Produces journal timestamp strings in a fixed zone
#[derive(Debug, Clone)]
pub struct JournalClock {
    offset: FixedOffset,
    zone_label: String,
}

impl JournalClock {
    pub fn new(config: &TimestampConfig) -> Result<Self> {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::Config(format!(
                    "UTC offset out of range: {} minutes",
                    config.utc_offset_minutes
                ))
            })?;

        Ok(Self {
            offset,
            zone_label: config.zone_label.clone(),
        })
    }

    /// Format an instant for storage in the journal
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.offset);
        format!(
            "{} ({})",
            local.format(JOURNAL_TIMESTAMP_FORMAT),
            self.zone_label
        )
    }

    /// Timestamp for an entry being saved right now
    pub fn stamp(&self) -> String {
        self.format(now())
    }
}
