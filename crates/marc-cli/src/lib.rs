//! Library side of the MARCXML normalizer CLI.

pub mod failure_report;
pub mod logging;
pub mod pipeline;
