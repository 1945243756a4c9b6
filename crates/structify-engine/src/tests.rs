//! End-to-end tests for the Engine

#[cfg(test)]
mod tests {
    use crate::{Engine, EngineConfig, EngineError, StructureRequest};
    use serde_json::json;
    use structify_llm::MockProvider;
    use structify_validator::ValidatorError;

    fn template() -> serde_json::Value {
        json!({
            "response_schema": {"title": "string", "count": 1}
        })
    }

    #[tokio::test]
    async fn test_full_structuring_flow() {
        let llm = MockProvider::new(r#"{"title": "Pasta", "count": 4}"#);
        let engine = Engine::new(llm, EngineConfig::default());

        let request = StructureRequest::new("Pasta for four people.", template());
        let outcome = engine.structure(request).await.unwrap();

        assert_eq!(outcome.document, json!({"title": "Pasta", "count": 4}));
        assert_eq!(outcome.metadata.model_name, "mock");
        assert_eq!(outcome.metadata.schema_name, "structured_output");
    }

    #[tokio::test]
    async fn test_response_format_is_passed_to_provider() {
        let llm = MockProvider::new(r#"{"title": "Pasta", "count": 4}"#);
        let engine = Engine::new(llm.clone(), EngineConfig::default());

        let mut request = StructureRequest::new("text", template());
        request.schema_name = Some("recipe".to_string());
        engine.structure(request).await.unwrap();

        let captured = llm.last_request().unwrap();
        let format = captured.response_format.unwrap();
        assert_eq!(format["type"], json!("json_schema"));
        assert_eq!(format["json_schema"]["name"], json!("recipe"));
        assert_eq!(format["json_schema"]["strict"], json!(true));
        assert_eq!(
            format["json_schema"]["schema"]["required"],
            json!(["title", "count"])
        );
    }

    #[tokio::test]
    async fn test_fenced_completion_is_parsed() {
        let llm = MockProvider::new("```json\n{\"title\": \"Pasta\", \"count\": 4}\n```");
        let engine = Engine::new(llm, EngineConfig::default());

        let outcome = engine
            .structure(StructureRequest::new("text", template()))
            .await
            .unwrap();
        assert_eq!(outcome.document["title"], json!("Pasta"));
    }

    #[tokio::test]
    async fn test_non_json_completion_is_malformed_document() {
        let llm = MockProvider::new("I could not extract anything.");
        let engine = Engine::new(llm, EngineConfig::default());

        let err = engine
            .structure(StructureRequest::new("text", template()))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedDocument(_)));
    }

    #[tokio::test]
    async fn test_schema_violating_completion_fails_validation() {
        // Missing the required 'count' field.
        let llm = MockProvider::new(r#"{"title": "Pasta"}"#);
        let engine = Engine::new(llm, EngineConfig::default());

        let err = engine
            .structure(StructureRequest::new("text", template()))
            .await
            .unwrap_err();

        match err {
            EngineError::Validation(ValidatorError::InvalidDocument { violations }) => {
                assert!(violations.violations()[0].message.contains("count"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_text_too_long_is_rejected_before_llm_call() {
        let llm = MockProvider::new("{}");
        let mut config = EngineConfig::default();
        config.max_text_length = 10;
        let engine = Engine::new(llm.clone(), config);

        let err = engine
            .structure(StructureRequest::new("x".repeat(11), template()))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::TextTooLong(11, 10)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_template_is_rejected_before_llm_call() {
        let llm = MockProvider::new("{}");
        let engine = Engine::new(llm.clone(), EngineConfig::default());

        let err = engine
            .structure(StructureRequest::new(
                "text",
                json!({"shape": {"title": "x"}}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Template(_)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_llm_error() {
        let llm = MockProvider::failing("backend down");
        let engine = Engine::new(llm, EngineConfig::default());

        let err = engine
            .structure(StructureRequest::new("text", template()))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Llm(_)));
    }

    #[tokio::test]
    async fn test_examples_reach_the_prompt() {
        let llm = MockProvider::new(r#"{"title": "Pasta", "count": 4}"#);
        let engine = Engine::new(llm.clone(), EngineConfig::default());

        let mut request = StructureRequest::new("text", template());
        request.examples = Some("{\"title\": \"A\", \"count\": 1}\n###\n{\"title\": \"B\", \"count\": 2}".to_string());
        engine.structure(request).await.unwrap();

        let captured = llm.last_request().unwrap();
        assert!(captured.messages[0].content.contains("Example 2:"));
    }

    #[tokio::test]
    async fn test_schema_dump_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let dump_path = dir.path().join("schema.json");

        let llm = MockProvider::new(r#"{"title": "Pasta", "count": 4}"#);
        let mut config = EngineConfig::default();
        config.schema_dump_path = Some(dump_path.clone());
        let engine = Engine::new(llm, config);

        engine
            .structure(StructureRequest::new("text", template()))
            .await
            .unwrap();

        assert!(dump_path.exists());
    }

    #[test]
    fn test_response_format_for_uses_config_name_by_default() {
        let engine = Engine::new(MockProvider::default(), EngineConfig::default());

        let format = engine.response_format_for(&template(), None).unwrap();
        assert_eq!(format.json_schema.name, "structured_output");

        let format = engine.response_format_for(&template(), Some("recipe")).unwrap();
        assert_eq!(format.json_schema.name, "recipe");
    }
}
