/*!
 * Phrase segmentation and translation using a text generation provider.
 *
 * - `prompts`: Prompt templates for both calls
 * - `segmentation`: Splits the source text into ordered phrases
 * - `core`: Translates a single phrase
 * - `pipeline`: Runs segmentation then translation and renders the JSON output
 */

/// The only model this tool talks to
pub const GENERATION_MODEL: &str = "llama3";

// Re-export main types for easier usage
pub use self::core::translate;
pub use self::pipeline::{to_json, PipelineConfig, PipelinePhase, ResultItem, TranslationPipeline};
pub use self::prompts::PromptTemplate;
pub use self::segmentation::{parse_segments, segment, SegmentParsing};

// Submodules
pub mod core;
pub mod pipeline;
pub mod prompts;
pub mod segmentation;
