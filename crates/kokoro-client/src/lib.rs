//! Thin client for the remote generative-language API.
//!
//! Translates an ordered chat history plus a persona instruction into a
//! single `generateContent` call with fixed sampling parameters.

pub mod client;
pub mod models;

pub use client::CompletionClient;

#[cfg(test)]
mod tests;
