/*!
 * Segmentation stage: splits the source text into ordered phrases.
 *
 * The model's answer arrives as the `response` string of the envelope and
 * must itself be a JSON array of strings. That inner payload is decoded
 * here, separately from the envelope decoded by the provider.
 */

use log::{debug, warn};

use crate::errors::PipelineError;
use crate::providers::Provider;

use super::prompts::segmentation_prompt;
use super::GENERATION_MODEL;

/// How strictly the segmentation answer is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentParsing {
    /// The whole answer must be a JSON array of strings
    #[default]
    Strict,
    /// Fall back to the span from the first `[` to the last `]`
    Lenient,
}

/// Ask the model to split `text` into phrases, in source order.
pub async fn segment<P: Provider + ?Sized>(
    provider: &P,
    text: &str,
    parsing: SegmentParsing,
) -> Result<Vec<String>, PipelineError> {
    let prompt = segmentation_prompt(text);
    debug!("Requesting segmentation of {} chars", text.chars().count());

    let raw = provider.generate(GENERATION_MODEL, &prompt).await?;
    let segments = parse_segments(&raw, parsing)?;

    debug!("Model returned {} segment(s)", segments.len());
    Ok(segments)
}

/// Decode the model's segmentation answer.
pub fn parse_segments(raw: &str, parsing: SegmentParsing) -> Result<Vec<String>, PipelineError> {
    let strict_error = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(segments) => return Ok(segments),
        Err(e) => e,
    };

    if parsing == SegmentParsing::Lenient {
        if let Some(segments) = extract_array(raw) {
            warn!("Segmentation answer contained text around the JSON array; using the embedded array");
            return Ok(segments);
        }
    }

    Err(PipelineError::SegmentDecode(strict_error.to_string()))
}

fn extract_array(raw: &str) -> Option<Vec<String>> {
    let (start, end) = (raw.find('[')?, raw.rfind(']')?);
    if start >= end {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}
