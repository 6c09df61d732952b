//! # salesbrief-core
//!
//! Shared foundation for the salesbrief reporting pipeline.
//!
//! This crate provides the abstractions the rest of the workspace builds on:
//!
//! - [`Llm`] - Trait for chat models with function calling
//! - [`Tool`] - Trait for capabilities a pipeline stage can invoke
//! - [`Content`] / [`Part`] - Conversation content model
//! - [`BriefError`] / [`Result`] - Unified error handling

pub mod error;
pub mod model;
pub mod tool;
pub mod types;

pub use error::{BriefError, Result};
pub use model::{FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata};
pub use tool::Tool;
pub use types::{Content, FunctionResponseData, Part};
