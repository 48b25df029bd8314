//! Route definitions

pub mod clinic;
pub mod metrics;
