//! coach-api: HTTP client for the learning coach agent service
//!
//! Wraps the single `POST /agents/interact` endpoint: serialize a typed
//! request, deserialize a typed response, surface transport/protocol/decode
//! failures to the caller. No retries, no timeouts, no session state.

pub mod client;
pub mod error;
pub mod types;

pub use client::AgentClient;
pub use error::{Error, Result};
pub use types::{InteractRequest, InteractResponse, StateMap};
