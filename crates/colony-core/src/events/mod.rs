//! Report output.

pub mod logger;

pub use logger::EventLogger;
