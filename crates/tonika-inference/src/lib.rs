//! # Tonika Inference
//!
//! Sentiment inference against a text-classification server that speaks
//! the text-embeddings-inference `/predict` protocol.

pub mod client;

pub use client::{ClassifierClient, ModelInfo};
