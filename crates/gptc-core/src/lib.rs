//! Conversation logic for gptc.
//!
//! This crate defines the [`client::AssistantsClient`] port that the
//! infrastructure layer implements, plus everything that runs locally around
//! it: input collection, instruction resolution, run polling, citation
//! rewriting and the per-turn session driver. It depends only on
//! `gptc-types` -- never on `gptc-infra` or any HTTP crate.

pub mod citation;
pub mod client;
pub mod error;
pub mod input;
pub mod instructions;
pub mod poll;
pub mod session;
