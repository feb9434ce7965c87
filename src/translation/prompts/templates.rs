/*!
 * Prompt templates for phrase segmentation and phrase translation.
 *
 * Both templates ask the model for bare output: a JSON array for the
 * segmentation prompt, the translated text alone for the translation prompt.
 */

/// A prompt with `{placeholder}` slots.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Splits a text into small grammatical sections, answered as a JSON array.
    pub const SEGMENTATION: &'static str = r#"Divide the text below into small sections, each representing a particular thought or idea. Use grammar as a basis and avoid creating a section with a single word. You can break a phrase into subject and predicate.

Example text:

Hey, kannst du mir den heutigen Mittagsmenü schicken? Ich bin gerade total eingebunden bei der Arbeit und schaffe es nicht reinzukommen.

Example output:

[
    "Hey",
    "kannst du mir",
    "den heutigen Mittagsmenü schicken?",
    "Ich bin gerade",
    "total eingebunden",
    "bei der Arbeit",
    "und",
    "schaffe es nicht reinzukommen."
]

Actual text:

{text}

Actual output:

Provide only the JSON array as the output without any additional text or explanation."#;

    /// Translates one section into the target locale.
    pub const TRANSLATION: &'static str = r#"Translate the following text to {target_language}:

{text}

Provide only the translation without any additional text or explanation."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the segmentation template.
    pub fn segmentation() -> Self {
        Self::new(Self::SEGMENTATION)
    }

    /// Create the translation template.
    pub fn translation() -> Self {
        Self::new(Self::TRANSLATION)
    }

    /// Render the template with the given variables.
    ///
    /// Placeholders are resolved in a single left-to-right pass, so neither
    /// value is scanned for further placeholders.
    pub fn render(&self, text: &str, target_language: &str) -> String {
        let mut rendered = String::with_capacity(self.template.len() + text.len() + target_language.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{text}") {
                rendered.push_str(text);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{target_language}") {
                rendered.push_str(target_language);
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
        rendered.push_str(rest);
        rendered
    }
}

/// Render the segmentation prompt for `text`.
pub fn segmentation_prompt(text: &str) -> String {
    PromptTemplate::segmentation().render(text, "")
}

/// Render the translation prompt for one `segment`.
pub fn translation_prompt(segment: &str, target_language: &str) -> String {
    PromptTemplate::translation().render(segment, target_language)
}
