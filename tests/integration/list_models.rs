//! Integration tests for the models-listing probe

use crate::integration::mock_server::{output, MockServerFixture};
use llm_probe::{Error, ProbeClient, ProbeConfig, ProbeStatus, Prober};
use std::time::Duration;

#[tokio::test]
async fn test_prints_one_line_per_model_in_order() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_models(
            200,
            r#"{"object":"list","data":[{"id":"m1","object":"model"},{"id":"m2","object":"model"}]}"#,
        )
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.list_models(&mut buf).await.unwrap();

    mock.assert_async().await;
    assert_eq!(output(buf), "m1\nm2\n");
    assert_eq!(outcome.status, ProbeStatus::Ok);
    assert_eq!(outcome.target, format!("{}models", fixture.base_url));
}

#[tokio::test]
async fn test_reads_gemini_native_shape() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_models(
            200,
            r#"{"models":[{"name":"models/gemini-1.5-flash"},{"name":"models/gemini-2.0-flash"}]}"#,
        )
        .await;

    let config = fixture.config();
    let client = ProbeClient::new(&config).unwrap();
    let models = client.list_models().await.unwrap();
    assert_eq!(
        models,
        vec!["models/gemini-1.5-flash", "models/gemini-2.0-flash"]
    );
}

#[tokio::test]
async fn test_auth_failure_is_printed_not_raised() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_models(
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.list_models(&mut buf).await.unwrap();

    assert_eq!(
        output(buf),
        "Error listing models: Remote error: HTTP 401 (authentication): Incorrect API key provided\n"
    );
    assert_eq!(outcome.status, ProbeStatus::Failed);
}

#[tokio::test]
async fn test_unrecognised_listing_is_printed_not_listed_as_empty() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_models(200, "{}").await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.list_models(&mut buf).await.unwrap();

    assert_eq!(
        output(buf),
        "Error listing models: Invalid response: expected a `data` or `models` array\n"
    );
    assert_eq!(outcome.status, ProbeStatus::Failed);

    let client = ProbeClient::new(&config).unwrap();
    assert!(matches!(
        client.list_models().await,
        Err(Error::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_empty_listing_is_ok() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_models(200, r#"{"object":"list","data":[]}"#).await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.list_models(&mut buf).await.unwrap();

    assert_eq!(output(buf), "");
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn test_unreachable_host_is_printed_not_raised() {
    // Nothing listens on port 1.
    let config = ProbeConfig::new("k", "http://127.0.0.1:1/v1")
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.list_models(&mut buf).await.unwrap();

    assert!(output(buf).starts_with("Error listing models: Network transport error"));
    assert!(!outcome.is_ok());
}
