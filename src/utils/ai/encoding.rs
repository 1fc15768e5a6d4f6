//! Encoding resolution
//!
//! Maps a model name to its byte-pair encoding. Unknown models fall back to
//! `cl100k_base`, so every model name has a usable encoding.

use crate::utils::error::{Result, TokenCostError};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};
use tiktoken_rs::{CoreBPE, get_bpe_from_tokenizer};
use tracing::{debug, warn};

/// Encoding used for models without a registered one
pub const DEFAULT_ENCODING: Tokenizer = Tokenizer::Cl100kBase;

/// Loaded BPE tables, one per encoding
static LOADED: Lazy<DashMap<&'static str, Arc<CoreBPE>>> = Lazy::new(DashMap::new);

/// A resolved encoding
#[derive(Clone)]
pub struct Encoding {
    name: &'static str,
    bpe: Arc<CoreBPE>,
    fallback: bool,
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoding")
            .field("name", &self.name)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Encoding {
    /// Encoding name, e.g. `cl100k_base`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is the default used for an unrecognized model
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Token ids for `text`. Special-token markers are encoded as plain text.
    pub fn encode(&self, text: &str) -> Vec<usize> {
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|id| id as usize)
            .collect()
    }

    /// Number of tokens in `text`
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

fn encoding_name(tokenizer: Tokenizer) -> Option<&'static str> {
    match tokenizer {
        Tokenizer::O200kBase => Some("o200k_base"),
        Tokenizer::Cl100kBase => Some("cl100k_base"),
        Tokenizer::P50kBase => Some("p50k_base"),
        Tokenizer::P50kEdit => Some("p50k_edit"),
        Tokenizer::R50kBase => Some("r50k_base"),
        Tokenizer::Gpt2 => Some("gpt2"),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

pub struct EncodingResolver;

impl EncodingResolver {
    /// Resolve the encoding registered for `model`, or the default one
    pub fn resolve(model: &str) -> Result<Encoding> {
        if let Some(tokenizer) = get_tokenizer(model) {
            match Self::load(tokenizer, false) {
                Ok(encoding) => return Ok(encoding),
                Err(e) => debug!("Registered encoding for {} unavailable: {}", model, e),
            }
        }

        warn!("Model {} not found. Using cl100k_base encoding.", model);
        Self::default_encoding()
    }

    /// The fallback encoding
    pub fn default_encoding() -> Result<Encoding> {
        Self::load(DEFAULT_ENCODING, true)
    }

    fn load(tokenizer: Tokenizer, fallback: bool) -> Result<Encoding> {
        let name = encoding_name(tokenizer)
            .ok_or_else(|| TokenCostError::encoding(format!("Unsupported tokenizer {:?}", tokenizer)))?;

        if let Some(bpe) = LOADED.get(name) {
            return Ok(Encoding {
                name,
                bpe: Arc::clone(bpe.value()),
                fallback,
            });
        }

        let bpe = get_bpe_from_tokenizer(tokenizer)
            .map_err(|e| TokenCostError::encoding(format!("Failed to load {}: {}", name, e)))?;
        debug!("Loaded {} encoding", name);

        let bpe = Arc::clone(LOADED.entry(name).or_insert_with(|| Arc::new(bpe)).value());
        Ok(Encoding {
            name,
            bpe,
            fallback,
        })
    }
}
