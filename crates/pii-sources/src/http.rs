//! External NER service over HTTP
//!
//! Sends `{"text": ...}` and accepts either `{"entities": [...]}` or a bare
//! array of `{"start", "end", "label"}` objects.

use anyhow::Context;
use async_trait::async_trait;
use pii_config::OffsetUnit;
use pii_core::{CharOffsets, EntityLabel, EntitySpan};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::source::EntitySource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NerResponse {
    Wrapped { entities: Vec<NerEntity> },
    Bare(Vec<NerEntity>),
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    start: usize,
    end: usize,
    #[serde(alias = "label_", alias = "entity", alias = "type")]
    label: String,
}

pub struct HttpEntitySource {
    client: reqwest::Client,
    url: String,
    offsets: OffsetUnit,
}

impl HttpEntitySource {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        offsets: OffsetUnit,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pii-redact/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            offsets,
        })
    }

    fn to_spans(&self, text: &str, entities: Vec<NerEntity>) -> anyhow::Result<Vec<EntitySpan>> {
        match self.offsets {
            OffsetUnit::Bytes => Ok(entities
                .into_iter()
                .map(|e| EntitySpan::new(e.start, e.end, EntityLabel::from_recognizer(&e.label)))
                .collect()),
            OffsetUnit::Chars => {
                let offsets = CharOffsets::new(text);
                entities
                    .into_iter()
                    .map(|e| {
                        let (Some(start), Some(end)) =
                            (offsets.to_byte(e.start), offsets.to_byte(e.end))
                        else {
                            anyhow::bail!(
                                "Entity {}..{} lies outside text of {} characters",
                                e.start,
                                e.end,
                                offsets.char_len()
                            );
                        };
                        Ok(EntitySpan::new(
                            start,
                            end,
                            EntityLabel::from_recognizer(&e.label),
                        ))
                    })
                    .collect()
            }
        }
    }
}

#[async_trait]
impl EntitySource for HttpEntitySource {
    async fn recognize(&self, text: &str) -> anyhow::Result<Vec<EntitySpan>> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .with_context(|| format!("Failed to reach recognizer at {}", self.url))?
            .error_for_status()
            .context("Recognizer returned an error status")?;

        let body: NerResponse = response
            .json()
            .await
            .context("Recognizer returned an unreadable body")?;

        let entities = match body {
            NerResponse::Wrapped { entities } => entities,
            NerResponse::Bare(entities) => entities,
        };
        debug!(count = entities.len(), "Recognizer returned entities");

        self.to_spans(text, entities)
    }

    fn name(&self) -> &str {
        "http"
    }
}
