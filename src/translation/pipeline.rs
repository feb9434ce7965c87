/*!
 * Pipeline orchestrator: segmentation, then one translation per segment.
 *
 * Calls are awaited strictly one after another, in segment order. The first
 * failure aborts the run and nothing collected so far is returned.
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::errors::PipelineError;
use crate::providers::Provider;

use super::core::translate;
use super::segmentation::{segment, SegmentParsing};

/// One translated phrase. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Phrase as produced by the segmentation call
    pub source: String,
    /// Model output for the phrase, verbatim
    pub translation: String,
}

impl ResultItem {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
        }
    }
}

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Locale every segment is translated into, e.g. `en-US`
    pub target_language: String,

    /// How the segmentation answer is decoded
    pub segment_parsing: SegmentParsing,
}

impl PipelineConfig {
    /// Create a new pipeline configuration with strict segment parsing.
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            segment_parsing: SegmentParsing::Strict,
        }
    }

    /// Set how the segmentation answer is decoded.
    pub fn with_segment_parsing(mut self, parsing: SegmentParsing) -> Self {
        self.segment_parsing = parsing;
        self
    }
}

/// Phases of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Waiting for the segmentation answer
    Segmenting,
    /// Segment `index` of `total` has just been translated
    Translating { index: usize, total: usize },
    /// Every segment is translated
    Done { total: usize },
}

/// Segments a text and translates each segment with one provider.
#[derive(Debug)]
pub struct TranslationPipeline<P: Provider> {
    provider: P,
    config: PipelineConfig,
}

impl<P: Provider> TranslationPipeline<P> {
    /// Create a new pipeline.
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// The provider calls are sent to.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline on `text`.
    pub async fn run(&self, text: &str) -> Result<Vec<ResultItem>, PipelineError> {
        self.run_with_progress(text, |_| {}).await
    }

    /// Run the pipeline on `text`, reporting each phase change to `on_progress`.
    pub async fn run_with_progress<F>(&self, text: &str, mut on_progress: F) -> Result<Vec<ResultItem>, PipelineError>
    where
        F: FnMut(PipelinePhase),
    {
        let start = Instant::now();

        on_progress(PipelinePhase::Segmenting);
        let segments = segment(&self.provider, text, self.config.segment_parsing).await?;
        info!("Text split into {} segment(s)", segments.len());

        let total = segments.len();
        let mut results = Vec::with_capacity(total);

        for (index, source) in segments.into_iter().enumerate() {
            let translation = translate(&self.provider, &source, &self.config.target_language).await?;
            results.push(ResultItem { source, translation });
            on_progress(PipelinePhase::Translating { index, total });
        }

        on_progress(PipelinePhase::Done { total });
        debug!("Pipeline finished in {:.2}s", start.elapsed().as_secs_f32());

        Ok(results)
    }
}

/// Render results as a JSON array indented with four spaces.
pub fn to_json(results: &[ResultItem]) -> Result<String, PipelineError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    results.serialize(&mut serializer)
        .map_err(|e| PipelineError::Output(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| PipelineError::Output(e.to_string()))
}
