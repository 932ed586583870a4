//! Sentence embedding adapter
//!
//! Feature-extraction endpoints return either a sentence vector (`[f32]`), a
//! batch of sentence vectors (`[[f32]]`), or token vectors for a single input
//! (`[[f32]]` with one row per token, mean-pooled here). Every vector leaving
//! this module is L2-normalized.

use crate::adapters::InferenceClient;
use crate::types::{AdapterError, Embedder};
use journal_common::config::BackendConfig;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Texts per request when embedding the reference corpus
const BATCH_SIZE: usize = 32;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEmbedding {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

/// Scale a vector to unit length (zero vectors are returned unchanged)
pub fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
    vector
}

fn mean_pool(rows: Vec<Vec<f32>>) -> Result<Vec<f32>, AdapterError> {
    let dim = rows
        .first()
        .map(|r| r.len())
        .ok_or_else(|| AdapterError::Parse("Embedding response is empty".to_string()))?;
    if rows.iter().any(|r| r.len() != dim) {
        return Err(AdapterError::Parse(
            "Embedding rows have inconsistent dimensions".to_string(),
        ));
    }

    let count = rows.len() as f32;
    let mut pooled = vec![0.0f32; dim];
    for row in rows {
        for (acc, x) in pooled.iter_mut().zip(row) {
            *acc += x;
        }
    }
    for x in pooled.iter_mut() {
        *x /= count;
    }
    Ok(pooled)
}

fn parse_single(raw: Value) -> Result<Vec<f32>, AdapterError> {
    let parsed: RawEmbedding = serde_json::from_value(raw)
        .map_err(|e| AdapterError::Parse(format!("Unrecognized embedding response: {}", e)))?;

    let vector = match parsed {
        RawEmbedding::Flat(v) => v,
        RawEmbedding::Nested(rows) => mean_pool(rows)?,
    };
    if vector.is_empty() {
        return Err(AdapterError::Parse("Embedding vector is empty".to_string()));
    }
    Ok(l2_normalize(vector))
}

fn parse_batch(raw: Value, expected: usize) -> Result<Vec<Vec<f32>>, AdapterError> {
    let parsed: RawEmbedding = serde_json::from_value(raw)
        .map_err(|e| AdapterError::Parse(format!("Unrecognized embedding response: {}", e)))?;

    let rows = match parsed {
        RawEmbedding::Nested(rows) => rows,
        RawEmbedding::Flat(v) if expected == 1 => vec![v],
        RawEmbedding::Flat(_) => {
            return Err(AdapterError::Parse(format!(
                "Expected {} embeddings, got a single vector",
                expected
            )))
        }
    };
    if rows.len() != expected {
        return Err(AdapterError::Parse(format!(
            "Expected {} embeddings, got {}",
            expected,
            rows.len()
        )));
    }
    Ok(rows.into_iter().map(l2_normalize).collect())
}

/// Hosted sentence-embedding model
pub struct HfEmbeddingClient {
    client: InferenceClient,
    model: String,
}

impl HfEmbeddingClient {
    pub fn new(config: &BackendConfig) -> Result<Self, AdapterError> {
        Ok(Self {
            client: InferenceClient::new(config)?,
            model: config.embedding_model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Embedder for HfEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AdapterError> {
        let raw = self.client.infer(&self.model, Value::from(text)).await?;
        parse_single(raw)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AdapterError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            let raw = self.client.infer(&self.model, Value::from(chunk.to_vec())).await?;
            vectors.extend(parse_batch(raw, chunk.len())?);
            debug!(
                model = %self.model,
                embedded = vectors.len(),
                total = texts.len(),
                "Embedding batch complete"
            );
        }
        Ok(vectors)
    }
}
