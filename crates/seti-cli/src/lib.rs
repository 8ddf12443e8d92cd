//! CLI library components for the SETI-IPRESS generator.

pub mod input;
pub mod logging;
