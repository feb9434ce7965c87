/*!
 * Prompt construction for the segmentation and translation calls.
 */

pub mod templates;

// Re-export main types
pub use templates::{segmentation_prompt, translation_prompt, PromptTemplate};
