//! # Journal Common Library
//!
//! Shared code for the mood journal binaries including:
//! - Mood tag models (sentiment, stress, energy)
//! - Configuration loading and root folder resolution
//! - Append-only JSON journal store
//! - Timestamp formatting

pub mod config;
pub mod error;
pub mod journal;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{Level, MoodTags, Sentiment};
