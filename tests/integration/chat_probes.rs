//! Integration tests for the client-mediated probe and the model-name sweep

use crate::integration::mock_server::{completion_body, output, MockServerFixture};
use llm_probe::{Error, ProbeClient, ProbeStatus, Prober};

#[tokio::test]
async fn test_long_reply_is_truncated_with_marker() {
    let fixture = MockServerFixture::new().await;
    let reply = "x".repeat(100) + &"y".repeat(60);
    let _mock = fixture
        .mock_chat(Some("m-ok"), 200, &completion_body(&reply))
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcome = prober.client_chat("m-ok", &mut buf).await.unwrap();

    assert_eq!(output(buf), format!("[m-ok] {}...\n", "x".repeat(100)));
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn test_short_reply_is_printed_whole() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_chat(None, 200, &completion_body("AI learns patterns from data."))
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    prober.client_chat("m-ok", &mut buf).await.unwrap();

    assert_eq!(output(buf), "[m-ok] AI learns patterns from data.\n");
}

#[tokio::test]
async fn test_sweep_continues_past_auth_failure() {
    let fixture = MockServerFixture::new().await;
    let bad = fixture
        .mock_chat(
            Some("bad-model"),
            401,
            r#"{"error":{"message":"API key not valid","code":401}}"#,
        )
        .await;
    let good = fixture
        .mock_chat(Some("good-model"), 200, &completion_body("hello"))
        .await;

    let config = fixture
        .config()
        .with_candidates(vec!["bad-model".to_string(), "good-model".to_string()]);
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcomes = prober.sweep(&mut buf).await.unwrap();

    bad.assert_async().await;
    good.assert_async().await;
    assert_eq!(
        output(buf),
        "[bad-model] Error: Remote error: HTTP 401 (authentication): API key not valid\n\
         [good-model] hello\n"
    );
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, ProbeStatus::Failed);
    assert_eq!(outcomes[1].status, ProbeStatus::Ok);
}

#[tokio::test]
async fn test_default_sweep_tries_both_spellings() {
    let fixture = MockServerFixture::new().await;
    let bare = fixture
        .mock_chat(Some("m-ok"), 200, &completion_body("bare ok"))
        .await;
    let prefixed = fixture
        .mock_chat(
            Some("models/m-ok"),
            404,
            r#"[{"error":{"code":404,"message":"models/models/m-ok is not found","status":"NOT_FOUND"}}]"#,
        )
        .await;

    let config = fixture.config();
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    prober.sweep(&mut buf).await.unwrap();

    bare.assert_async().await;
    prefixed.assert_async().await;
    let text = output(buf);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[m-ok] bare ok");
    assert_eq!(
        lines[1],
        "[models/m-ok] Error: Remote error: HTTP 404 (not_found): models/models/m-ok is not found"
    );
}

#[tokio::test]
async fn test_client_surfaces_remote_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_chat(None, 429, r#"{"error":{"message":"Resource has been exhausted"}}"#)
        .await;

    let config = fixture.config();
    let client = ProbeClient::new(&config).unwrap();
    let err = client.chat_text("m-ok", "hi").await.unwrap_err();

    match err {
        Error::Remote {
            status,
            class,
            message,
        } => {
            assert_eq!(status, 429);
            assert_eq!(class, "rate_limited");
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_without_choice_content_is_a_failure() {
    let fixture = MockServerFixture::new().await;
    let _empty = fixture
        .mock_chat(Some("no-choices"), 200, r#"{"choices":[]}"#)
        .await;
    let _null = fixture
        .mock_chat(
            Some("null-content"),
            200,
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#,
        )
        .await;
    let _bare = fixture.mock_chat(Some("bare-object"), 200, "{}").await;

    let config = fixture.config().with_candidates(vec![
        "no-choices".to_string(),
        "null-content".to_string(),
        "bare-object".to_string(),
    ]);
    let prober = Prober::new(&config).unwrap();
    let mut buf = Vec::new();
    let outcomes = prober.sweep(&mut buf).await.unwrap();

    assert_eq!(
        output(buf),
        "[no-choices] Error: Invalid response: no choices in completion\n\
         [null-content] Error: Invalid response: first choice has no message content\n\
         [bare-object] Error: Invalid response: no choices in completion\n"
    );
    assert!(outcomes.iter().all(|o| o.status == ProbeStatus::Failed));
}

#[tokio::test]
async fn test_client_rejects_completion_without_content() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_chat(None, 200, r#"{"choices":[]}"#).await;

    let config = fixture.config();
    let client = ProbeClient::new(&config).unwrap();
    let err = client.chat_text("m-ok", "hi").await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}
