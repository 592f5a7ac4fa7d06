//! # Hotel Agent
//!
//! A conversational assistant that searches and books hotels.
//!
//! This library provides:
//! - An HTTP API that accepts a user message and returns the assistant's reply
//! - A bounded tool-calling agent loop
//! - An in-memory hotel catalog and booking ledger exposed as tools
//! - An OpenAI-compatible completion client
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Seed the transcript with the system prompt and the user's message
//! 2. Call the LLM with the `searchHotels` and `bookHotel` tools
//! 3. Execute requested tool calls in order and feed the results back
//! 4. Repeat until the LLM answers in text or the tool-call budget runs out
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hotel_agent::{agent::Agent, config::Config, store::HotelStore};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config, Arc::new(HotelStore::default()))?;
//! let run = agent.run("Find me a hotel in Vancouver under $150").await?;
//! println!("{}", run.response);
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod store;
pub mod tools;

pub use config::Config;
