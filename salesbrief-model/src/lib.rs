//! # salesbrief-model
//!
//! Chat model integrations for the salesbrief pipeline.
//!
//! ## Overview
//!
//! - [`OpenAIClient`] - OpenAI-compatible chat completions with function calling
//! - [`MockLlm`] - Scripted model for tests and offline runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesbrief_model::openai::{OpenAIClient, OpenAIConfig};
//!
//! let api_key = std::env::var("OPENAI_API_KEY").unwrap();
//! let model = OpenAIClient::new(OpenAIConfig::gpt4o_mini(api_key)).unwrap();
//! ```

pub mod mock;
pub mod openai;

pub use mock::MockLlm;
pub use openai::{OpenAIClient, OpenAIConfig};
