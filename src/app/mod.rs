//! Use cases driven by the command line.

mod clean_use_case;

pub use clean_use_case::{CleanRun, CleanUseCase};
