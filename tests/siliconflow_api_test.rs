use serde_json::json;
use siliconflow_imagegen::{
    GenerationConfig, GeneratorRegistry, ImageGenError, ImageGenerator, SiliconFlowImageGenerator,
    StylePreset,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATIONS_PATH: &str = "/v1/images/generations";

fn generator_for(server: &MockServer) -> SiliconFlowImageGenerator {
    SiliconFlowImageGenerator::new(
        GenerationConfig::new()
            .with_api_key("sk-test")
            .with_endpoint(format!("{}{}", server.uri(), GENERATIONS_PATH))
            .with_retry_delay(Duration::ZERO),
    )
    .expect("valid config")
}

fn image_response() -> serde_json::Value {
    json!({ "data": [{ "b64_json": "iVBORw0KGgo=", "seed": 1234 }] })
}

#[tokio::test]
async fn posts_expected_payload_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "a lighthouse at dawn",
            "negative_prompt": "low quality, blurry, malformed",
            "width": 1024,
            "height": 1024,
            "steps": 50,
            "style_preset": "digital-art",
            "num_images": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = generator_for(&server)
        .generate_image("a lighthouse at dawn", None)
        .await
        .expect("image");

    assert_eq!(result.url, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(result.seed, 1234);
    assert_eq!(result.metadata.model, "SiliconFlow-v2");
    assert_eq!(result.metadata.style, StylePreset::DigitalArt);
    assert_eq!(result.image_bytes().unwrap(), b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response()))
        .expect(1)
        .mount(&server)
        .await;

    let result = generator_for(&server)
        .generate_image("a fox", Some("text"))
        .await
        .expect("image after retries");
    assert_eq!(result.seed, 1234);
}

#[tokio::test]
async fn gives_up_after_retry_count_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate_image("a fox", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ImageGenError::GenerationFailed { .. }));
    assert_eq!(err.to_string(), "Image generation failed: Network failure: HTTP 401");
    assert!(matches!(
        err.root_cause(),
        ImageGenError::NetworkFailure {
            status: Some(401),
            ..
        }
    ));
}

#[tokio::test]
async fn non_json_body_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate_image("a fox", None)
        .await
        .unwrap_err();
    assert!(err.root_cause().is_retryable());
}

#[tokio::test]
async fn empty_data_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate_image("a fox", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ImageGenError::MalformedResponse(_)
    ));
}

#[tokio::test]
async fn missing_image_field_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "seed": 5 }] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate_image("a fox", None)
        .await
        .unwrap_err();
    assert!(matches!(err.root_cause(), ImageGenError::MissingImageData));
}

#[derive(Default)]
struct TestRegistry {
    generators: Vec<Arc<dyn ImageGenerator>>,
}

impl GeneratorRegistry for TestRegistry {
    fn register(&mut self, generator: Arc<dyn ImageGenerator>) {
        self.generators.push(generator);
    }
}

#[tokio::test]
async fn registered_generator_is_usable_through_the_trait() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response()))
        .mount(&server)
        .await;

    let mut registry = TestRegistry::default();
    Arc::new(generator_for(&server)).register(&mut registry);

    assert_eq!(registry.generators.len(), 1);
    let generator = registry.generators[0].clone();
    assert_eq!(generator.id(), "SiliconFlow");
    assert_eq!(generator.display_name(), "SiliconFlow Image");
    assert!(generator.settings_view().field("api_key").is_some());

    let result = generator.generate_image("a fox", None).await.expect("image");
    assert_eq!(result.seed, 1234);
}
