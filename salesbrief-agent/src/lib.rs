//! # Salesbrief Agent
//!
//! The two-stage report pipeline:
//!
//! - [`Stage`] - A persona plus a task and the tools it may call
//! - [`StageRunner`] - The bounded model/tool conversation loop
//! - [`SequentialPipeline`] - Analyst then writer, documents written per stage

pub mod pipeline;
pub mod runner;
pub mod stage;

pub use pipeline::{RunSummary, SequentialPipeline, StageReport};
pub use runner::{DEFAULT_MAX_TURNS, StageOutcome, StageRunner};
pub use stage::{ANALYSIS_FILE, REPORT_FILE, Stage, analyst_stage, writer_stage};
