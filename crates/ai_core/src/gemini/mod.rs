//! Google Gemini `generateContent` adapter
//!
//! Gemini has no system role inside `contents`: system turns move to
//! `systemInstruction` and assistant turns are sent as role `model`.

mod client;

pub use client::GeminiChatProvider;
