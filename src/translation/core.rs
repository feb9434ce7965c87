/*!
 * Translation stage: translates one phrase into the target locale.
 */

use log::trace;

use crate::errors::PipelineError;
use crate::providers::Provider;

use super::prompts::translation_prompt;
use super::GENERATION_MODEL;

/// Translate a single segment.
///
/// The generated text is returned exactly as the model produced it; it is
/// not trimmed and not decoded any further.
pub async fn translate<P: Provider + ?Sized>(
    provider: &P,
    segment: &str,
    target_language: &str,
) -> Result<String, PipelineError> {
    let prompt = translation_prompt(segment, target_language);
    let translation = provider.generate(GENERATION_MODEL, &prompt).await?;
    trace!("{:?} -> {:?}", segment, translation);
    Ok(translation)
}
