//! Inference backend adapters
//!
//! HTTP clients for a Hugging Face-style inference endpoint. All response
//! shape handling is contained here; the pipeline only ever sees
//! `ClassifierSignal` values and normalized vectors.

pub mod classifier;
pub mod embedder;
pub mod inference_client;

pub use classifier::{normalize_classification, HfClassificationAdapter, HfTextClassifier};
pub use embedder::{l2_normalize, HfEmbeddingClient};
pub use inference_client::InferenceClient;
