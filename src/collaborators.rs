// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Interfaces to the services that consume extraction output
//!
//! The scraper itself calls none of these. They describe the narrow surface a
//! downstream pipeline needs, so implementations can be constructed at startup
//! and injected as handles (`Arc<dyn GenerativeText>` etc.) rather than held
//! as globals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Prompt in, JSON document out
#[async_trait]
pub trait GenerativeText: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> anyhow::Result<serde_json::Value>;
}

/// Prompt in, image URL out
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Write-only blob store
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()>;
}

/// Structured record sink
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, record: serde_json::Value) -> anyhow::Result<()>;
}

/// Voice selection for speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub language_code: String,
    pub voice_name: String,
    /// Audio container, e.g. "mp3"
    pub audio_encoding: String,
}

#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    /// `ssml` is a complete `<speak>` document
    async fn synthesize(&self, ssml: &str, voice: &VoiceConfig) -> anyhow::Result<Vec<u8>>;
}
