//! Integration tests for the hand-built HTTP probe

use crate::integration::mock_server::{completion_body, output, MockServerFixture, TEST_KEY};
use llm_probe::{ProbeStatus, Prober};
use mockito::Matcher;

#[tokio::test]
async fn test_requests_chat_completions_with_or_without_trailing_slash() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_chat_expect(None, 200, &completion_body("hi"), 2)
        .await;

    let with_slash = fixture.base_url.clone();
    let without_slash = with_slash.trim_end_matches('/').to_string();

    for base in [with_slash, without_slash] {
        let config = fixture.config_for(&base);
        let prober = Prober::new(&config).unwrap();
        let mut buf = Vec::new();
        let outcome = prober.direct(&mut buf).await.unwrap();
        assert!(outcome.is_ok(), "base {base}: {:?}", outcome.error);
        assert!(output(buf).contains("/v1/chat/completions\n"));
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_prints_request_then_status_and_body() {
    let fixture = MockServerFixture::new().await;
    let mut server = fixture.server.lock().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", format!("Bearer {}", TEST_KEY).as_str())
        .match_body(Matcher::Json(serde_json::json!({
            "model": "m-ok",
            "messages": [{"role": "user", "content": "ping"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("pong"))
        .create_async()
        .await;
    drop(server);

    let config = fixture.config().with_prompt("ping");
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    prober.direct(&mut buf).await.unwrap();
    mock.assert_async().await;

    let text = output(buf);
    let url_line = format!("URL: {}chat/completions", fixture.base_url);
    assert!(text.starts_with(&url_line));
    assert!(text.contains("  Authorization: Bearer ****1234\n"));
    assert!(!text.contains(TEST_KEY));
    assert!(text.contains("  Content-Type: application/json\n"));
    assert!(text.contains("\"content\": \"ping\""));
    assert!(text.contains("Status: 200\n"));
    assert!(text.contains("\"content\": \"pong\""));

    let body_pos = text.find("Body:").unwrap();
    let status_pos = text.find("Status:").unwrap();
    assert!(body_pos < status_pos);
}

#[tokio::test]
async fn test_error_status_is_printed_and_marked_failed() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_chat(
            None,
            400,
            r#"[{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}]"#,
        )
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.direct(&mut buf).await.unwrap();

    let text = output(buf);
    assert!(text.contains("Status: 400\n"));
    assert!(text.contains("\"message\": \"API key not valid.\""));
    assert_eq!(outcome.status, ProbeStatus::Failed);
    assert_eq!(outcome.error.as_deref(), Some("HTTP 400"));
}
