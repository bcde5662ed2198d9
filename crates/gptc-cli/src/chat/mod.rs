//! Interactive chat experience for gptc.
//!
//! Collects questions from the terminal, drives one assistant run per
//! question, and renders the replies as markdown. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod renderer;
