//! Core engine implementation

use crate::completion::parse_completion;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::prompt::PromptBuilder;
use crate::types::{StructureMetadata, StructureOutcome, StructureRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use structify_llm::{CompletionProvider, CompletionRequest};
use structify_schema::{ResponseFormat, SchemaSynthesizer};
use structify_validator::StructureValidator;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Engine turns unstructured text into schema-conforming JSON.
///
/// One run synthesizes a response format from the request's template,
/// prompts the LLM under that constraint, parses the completion, and
/// validates it against the synthesized schema. Runs are independent;
/// the engine holds no per-request state and can serve concurrent
/// requests from behind an `Arc`.
pub struct Engine<P: CompletionProvider> {
    provider: Arc<P>,
    synthesizer: SchemaSynthesizer,
    validator: StructureValidator,
    config: EngineConfig,
}

impl<P: CompletionProvider> Engine<P> {
    /// Create a new Engine
    pub fn new(provider: P, config: EngineConfig) -> Self {
        let synthesizer = SchemaSynthesizer::new(config.synthesizer.clone());
        Self {
            provider: Arc::new(provider),
            synthesizer,
            validator: StructureValidator::new(),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the model answering requests
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Synthesize the response format for a template without running
    /// the extraction pipeline.
    pub fn response_format_for(
        &self,
        template: &Value,
        schema_name: Option<&str>,
    ) -> Result<ResponseFormat, EngineError> {
        let name = schema_name.unwrap_or(&self.config.schema_name);
        Ok(self.synthesizer.synthesize_response_format(template, name)?)
    }

    /// Run the full structuring pipeline for one request
    pub async fn structure(
        &self,
        request: StructureRequest,
    ) -> Result<StructureOutcome, EngineError> {
        if request.text.len() > self.config.max_text_length {
            return Err(EngineError::TextTooLong(
                request.text.len(),
                self.config.max_text_length,
            ));
        }

        let schema_name = request
            .schema_name
            .unwrap_or_else(|| self.config.schema_name.clone());

        info!(
            "Structuring {} chars of text against schema '{}'",
            request.text.len(),
            schema_name
        );

        let start = Instant::now();

        let format = self
            .synthesizer
            .synthesize_response_format(&request.template, &schema_name)?;
        self.dump_schema(&format);

        let mut prompt = PromptBuilder::new(&request.text);
        if let Some(examples) = &request.examples {
            prompt = prompt.with_examples_text(examples, &self.config.examples_separator);
        }
        let messages = prompt.build();

        let completion_request =
            CompletionRequest::new(messages).with_response_format(serde_json::to_value(&format)?);

        let completion = timeout(
            self.config.completion_timeout(),
            self.provider.complete(&completion_request),
        )
        .await
        .map_err(|_| EngineError::Timeout)??;

        debug!("Completion length: {} chars", completion.len());

        let document = parse_completion(&completion)?;
        self.validator
            .validate(&document, &format.json_schema.schema)?;

        let metadata = StructureMetadata {
            schema_name,
            model_name: self.provider.model_name().to_string(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Structuring complete in {} ms using model '{}'",
            metadata.processing_time_ms, metadata.model_name
        );

        Ok(StructureOutcome { document, metadata })
    }

    /// Dump the synthesized schema for inspection when configured.
    ///
    /// A failure here is logged and does not fail the run: the dump is
    /// a debugging convenience and validation never reads it.
    fn dump_schema(&self, format: &ResponseFormat) {
        if let Some(path) = &self.config.schema_dump_path {
            if let Err(e) = self.synthesizer.write_schema_file(format, path) {
                warn!("Failed to dump schema to '{}': {}", path.display(), e);
            }
        }
    }
}
