//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals

mod sweeper;

pub use sweeper::SweepTask;
