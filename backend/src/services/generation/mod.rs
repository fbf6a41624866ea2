//! Prompt & Generation Pipeline
//!
//! Builds a context-dependent natural-language instruction for the resolved
//! category, sends it to a generative-AI provider behind the
//! `SentenceGenerator` trait, and decodes the constrained JSON reply into an
//! ordered list of sentence texts.
//!
//! The trait is the seam for providers and for tests; `GeminiClient` is the
//! production implementation.

mod client;
mod prompts;

pub use client::{GeminiClient, SentenceGenerator, parse_generated_sentences};
pub use prompts::{GENERATED_SENTENCES_KEY, PromptContext, build_prompt};
