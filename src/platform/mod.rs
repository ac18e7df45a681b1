//! Platform abstraction layer
//!
//! Handles browser/native differences for input. Key events arrive
//! asynchronously and only toggle flags; the simulation samples them once
//! at the start of each step.

pub mod input;

pub use input::InputLatch;
