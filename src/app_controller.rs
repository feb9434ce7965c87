use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::ollama::Ollama;
use crate::translation::{to_json, PipelineConfig, PipelinePhase, ResultItem, SegmentParsing, TranslationPipeline};

// @module: Application controller for phrase segmentation and translation

/// Main application controller
pub struct Controller<P: Provider = Ollama> {
    // @field: App configuration
    config: Config,
    // @field: Pipeline bound to the configured endpoint and locale
    pipeline: TranslationPipeline<P>,
    // @field: Draw a progress bar on stderr while translating
    show_progress: bool,
}

impl Controller<Ollama> {
    // @method: Create a controller talking to the configured Ollama endpoint
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let provider = Ollama::from_url(config.llm_host.clone());
        Self::with_provider(config, provider)
    }
}

impl<P: Provider> Controller<P> {
    // @method: Create a controller with an explicit provider
    pub fn with_provider(config: Config, provider: P) -> Result<Self, AppError> {
        if !language_utils::is_known_locale(&config.translation_language) {
            warn!(
                "'{}' does not start with a known ISO 639 language code; passing it to the model as is",
                config.translation_language
            );
        }

        let parsing = if config.lenient_json {
            SegmentParsing::Lenient
        } else {
            SegmentParsing::Strict
        };
        let pipeline_config = PipelineConfig::new(&config.translation_language).with_segment_parsing(parsing);

        Ok(Self {
            pipeline: TranslationPipeline::new(provider, pipeline_config),
            config,
            show_progress: true,
        })
    }

    /// Enable or disable the stderr progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The configuration this controller was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The provider requests are sent to
    pub fn provider(&self) -> &P {
        self.pipeline.provider()
    }

    /// Segment and translate `text`, returning the result list
    pub async fn analyse(&self, text: &str) -> Result<Vec<ResultItem>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Input("Text to analyse must not be empty".to_string()));
        }

        let start_time = Instant::now();
        info!(
            "Segmenting and translating into {} via {}",
            language_utils::describe_locale(&self.config.translation_language),
            self.config.llm_host
        );

        let progress_bar = self.progress_bar();
        let pb = progress_bar.clone();

        let result = self.pipeline.run_with_progress(text, move |phase| match phase {
            PipelinePhase::Segmenting => pb.set_message("Segmenting"),
            PipelinePhase::Translating { index, total } => {
                if index == 0 {
                    pb.set_length(total as u64);
                    pb.set_message("Translating");
                }
                pb.set_position(index as u64 + 1);
            }
            PipelinePhase::Done { .. } => {}
        }).await;

        progress_bar.finish_and_clear();
        let results = result?;

        info!(
            "Translated {} segment(s) in {:.2}s",
            results.len(),
            start_time.elapsed().as_secs_f32()
        );
        Ok(results)
    }

    /// Segment and translate `text`, returning the rendered JSON document
    pub async fn run(&self, text: &str) -> Result<String, AppError> {
        let results = self.analyse(text).await?;
        Ok(to_json(&results)?)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        // Length is unknown until the segmentation answer arrives
        let progress_bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.enable_steady_tick(Duration::from_millis(120));
        progress_bar
    }
}
