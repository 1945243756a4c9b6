//! LLM prompt assembly for structured extraction

use structify_llm::ChatMessage;

/// Builds the chat prompt for a structuring run
pub struct PromptBuilder {
    text: String,
    examples: Vec<String>,
}

impl PromptBuilder {
    /// Create a builder for the given unstructured text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            examples: Vec::new(),
        }
    }

    /// Add few-shot examples from a raw examples document.
    ///
    /// The document holds example outputs separated by `separator`
    /// tokens; blank blocks are dropped.
    pub fn with_examples_text(mut self, raw: &str, separator: &str) -> Self {
        self.examples = raw
            .split(separator)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    /// Build the chat messages: system instruction (plus examples, if
    /// any) followed by the text to structure as the user message.
    pub fn build(&self) -> Vec<ChatMessage> {
        let mut system = String::from(SYSTEM_INSTRUCTIONS);

        if !self.examples.is_empty() {
            system.push_str("\n\nExamples of correctly structured output:\n");
            for (idx, example) in self.examples.iter().enumerate() {
                system.push_str(&format!("\nExample {}:\n{}\n", idx + 1, example));
            }
        }

        vec![
            ChatMessage::system(system),
            ChatMessage::user(self.text.clone()),
        ]
    }
}

const SYSTEM_INSTRUCTIONS: &str = "You are a data extraction assistant specializing in \
transforming unstructured text into structured JSON. Extract information from the provided \
text and organize it into a JSON document following the supplied JSON schema. Ensure every \
extracted value matches the structure and data type the schema declares.\n\n\
Before extracting, apply named entity recognition to identify relevant entities and map the \
relationships between them. Use these to populate the schema fields accurately.\n\n\
If a value for a schema key is not present in the text and cannot be confidently inferred, \
return null for that key.\n\n\
Input:\n\
- Text: a block of unstructured text.\n\
- Schema: a JSON schema defining the expected keys and data types.\n\n\
Output:\n\
- A JSON object populated with data extracted from the text, and nothing else.";
