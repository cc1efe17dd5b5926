//! Devotional content playback and navigation engine
//!
//! Sessions for Quran recitation, post-prayer invocations, the Jawshan
//! litany and the call to prayer, sharing one now-playing store.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod selection;
pub mod session;
pub mod source;
pub mod view;
