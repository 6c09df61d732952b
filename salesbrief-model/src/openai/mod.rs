//! OpenAI-compatible provider implementation.
//!
//! This module speaks the chat completions wire format shared by OpenAI and
//! the many compatible endpoints (set a custom base URL to point elsewhere).
//!
//! # Example
//!
//! ```rust,ignore
//! use salesbrief_model::openai::{OpenAIClient, OpenAIConfig};
//!
//! let client = OpenAIClient::new(OpenAIConfig::gpt4o_mini(
//!     std::env::var("OPENAI_API_KEY").unwrap()
//! ))?;
//! ```

mod client;
mod config;
mod convert;

pub use client::OpenAIClient;
pub use config::{OPENAI_API_BASE, OpenAIConfig};
