//! The external captioning capability.
//!
//! Provides a provider abstraction over caption backends (a local Ollama
//! model server, or any OpenAI-compatible endpoint). The selected provider
//! is constructed once at process start and shared by reference for every
//! caption call.

pub(crate) mod ollama;
pub(crate) mod openai;
pub(crate) mod provider;

pub use provider::{CaptionRequest, CaptionResponse, Captioner, CaptionerFactory, ImageInput};
