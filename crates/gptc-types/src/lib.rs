//! Shared domain types for gptc.
//!
//! This crate contains the types exchanged with the hosted Assistants service:
//! Assistant, Thread, Message, Run, File, their error type, and the local
//! configuration types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod assistant;
pub mod config;
pub mod error;
pub mod message;
pub mod run;
