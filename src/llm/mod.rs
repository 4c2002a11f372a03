//! Language model adapters.
//!
//! Two narrow interfaces sit in front of the Gemini API: a
//! [`VesselTranslator`] that turns free text into a vessel record and an
//! [`ExplanationGenerator`] that describes a finished breakdown. The tariff
//! arithmetic never depends on either.

mod client;
mod error;
mod explanation;
mod translator;

pub use client::GeminiClient;
pub use error::LlmError;
pub use explanation::{EXPLANATION_UNAVAILABLE, ExplanationGenerator, explanation_prompt};
pub use translator::{
    VesselTranslator, clean_json_response, fallback_description, normalize_description,
    parse_datetime, translation_prompt,
};
