//! End-to-end: Hugging Face classifier (mocked over HTTP) → engine → renderer.

use async_trait::async_trait;
use empathy_engine::emotion::HuggingFaceClassifier;
use empathy_engine::engine::{ClassifierConfig, RenderRequest};
use empathy_engine::{
    EmotionLabel, EmpathyEngine, EngineConfig, EngineError, Result, SpeechRenderer,
};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes the SSML next to where the audio would go.
struct SsmlFileRenderer {
    dir: PathBuf,
}

#[async_trait]
impl SpeechRenderer for SsmlFileRenderer {
    fn id(&self) -> String {
        "ssml-file".to_string()
    }

    async fn render(&self, request: &RenderRequest) -> Result<PathBuf> {
        let path = self.dir.join(&request.file_name);
        tokio::fs::write(&path, request.ssml.as_str())
            .await
            .map_err(|e| EngineError::RenderFailed(e.to_string()))?;
        Ok(path)
    }
}

async fn classifier_returning(body: serde_json::Value) -> (MockServer, HuggingFaceClassifier) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    let classifier = HuggingFaceClassifier::from_config(&ClassifierConfig {
        endpoint: format!("{}/models/sentiment", server.uri()),
        api_key: Some("hf_test".to_string()),
        timeout_secs: 5,
        max_retries: 0,
        retry_delay_ms: 1,
    });
    (server, classifier)
}

#[tokio::test]
async fn negative_text_renders_slow_soft_speech() {
    let (_server, classifier) = classifier_returning(serde_json::json!([[
        { "label": "negative", "score": 0.75 },
        { "label": "neutral", "score": 0.2 },
        { "label": "positive", "score": 0.05 }
    ]]))
    .await;
    let tmp = TempDir::new().unwrap();
    let renderer = SsmlFileRenderer {
        dir: tmp.path().to_path_buf(),
    };
    let engine = EmpathyEngine::new(&EngineConfig::default()).unwrap();

    let response = engine
        .speak(
            "I am disappointed we missed the deadline. Let's regroup tomorrow.",
            &classifier,
            &renderer,
            None,
        )
        .await
        .unwrap();

    let outcome = &response.outcome;
    assert_eq!(outcome.emotion, EmotionLabel::Negative);
    assert!((130..=140).contains(&outcome.parameters.rate));
    assert!(outcome.parameters.volume < 0.7);

    assert_eq!(response.audio_path, tmp.path().join("empathy_negative.wav"));
    let written = std::fs::read_to_string(&response.audio_path).unwrap();
    assert_eq!(written, outcome.ssml.as_str());
    assert_eq!(written.matches("<break time=\"250ms\"/>").count(), 1);
}

#[tokio::test]
async fn unrecognized_labels_fail_without_rendering() {
    let (_server, classifier) = classifier_returning(serde_json::json!([
        { "label": "joy", "score": 0.9 },
        { "label": "anger", "score": 0.1 }
    ]))
    .await;
    let tmp = TempDir::new().unwrap();
    let renderer = SsmlFileRenderer {
        dir: tmp.path().to_path_buf(),
    };
    let engine = EmpathyEngine::new(&EngineConfig::default()).unwrap();

    let err = engine
        .speak("What a day!", &classifier, &renderer, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ClassificationUnavailable(_)));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unreachable_classifier_is_unavailable() {
    let classifier = HuggingFaceClassifier::from_config(&ClassifierConfig {
        endpoint: "http://127.0.0.1:9/models/sentiment".to_string(),
        api_key: None,
        timeout_secs: 2,
        max_retries: 0,
        retry_delay_ms: 1,
    });
    let engine = EmpathyEngine::new(&EngineConfig::default()).unwrap();

    let err = engine.analyze("Hello there.", &classifier).await.unwrap_err();
    assert!(matches!(err, EngineError::ClassificationUnavailable(_)));
}
