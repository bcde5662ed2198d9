//! Observability for gptc: tracing subscriber setup and the GenAI span
//! attribute values used to instrument Assistants API calls.

pub mod genai_attrs;
pub mod tracing_setup;
