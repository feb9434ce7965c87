/*!
 * # phrasecut - split text into phrases and translate them with a local LLM
 *
 * A Rust library and CLI that asks a local Ollama instance to divide a text
 * into small, grammatically coherent phrases and then to translate each
 * phrase into a target locale.
 *
 * ## Features
 *
 * - Segmentation prompt with a worked example, answered as a JSON array
 * - One translation call per phrase, strictly in phrase order
 * - Deterministic, 4-space-indented JSON output of `(source, translation)` pairs
 * - Flag, environment variable and literal default layering for settings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Setting resolution and validation
 * - `translation`: The segmentation/translation pipeline:
 *   - `translation::prompts`: Prompt templates
 *   - `translation::segmentation`: Segmentation call and inner array decoding
 *   - `translation::core`: Single phrase translation
 *   - `translation::pipeline`: Orchestration and JSON rendering
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities for the target locale
 * - `providers`: Generation backends:
 *   - `providers::ollama`: Ollama `/api/generate` client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use translation::{ResultItem, TranslationPipeline};
pub use language_utils::{describe_locale, get_language_name};
pub use errors::{AppError, ErrorKind, PipelineError, ProviderError};
