//! Models module for ABC tunes
//!
//! This module contains the data structures the parser produces:
//! tunes with their header attributes, bars and the notation inside them.

pub mod barlines;
pub mod notation;
pub mod tune;

// Re-export commonly used types
pub use barlines::*;
pub use notation::*;
pub use tune::*;
