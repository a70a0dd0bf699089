//! AssemblyAI adapter tests against a local mock server

use std::io::Write;
use std::time::{Duration as StdDuration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assembly_transcribe::application::ports::{ApiError, MediaUploader, TranscriptService};
use assembly_transcribe::application::{
    AudioSource, TranscribeCallbacks, TranscribeError, TranscribeFileUseCase, TranscribeInput,
};
use assembly_transcribe::domain::polling::{Duration, PollPolicy};
use assembly_transcribe::domain::transcript::{ApiToken, AudioUrl, TranscriptId, TranscriptState};
use assembly_transcribe::infrastructure::{AssemblyAiClient, TokioClock};

const AUDIO: &[u8] = b"hello audio";
const TOKEN: &str = "test-token";

fn client(server: &MockServer) -> AssemblyAiClient {
    AssemblyAiClient::with_base_url(ApiToken::new(TOKEN).unwrap(), server.uri())
}

fn audio_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(AUDIO).unwrap();
    file
}

fn fast_policy() -> PollPolicy {
    PollPolicy::every(Duration::from_millis(10))
}

async fn mount_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .and(header("authorization", TOKEN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"upload_url": "https://cdn.example/upload/1"})),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_submit(server: &MockServer, audio_url: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .and(header("authorization", TOKEN))
        .and(body_json(json!({"audio_url": audio_url})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "status": "queued"})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn upload_streams_file_with_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .and(header("authorization", TOKEN))
        .and(header("content-type", "application/octet-stream"))
        .and(header("content-length", AUDIO.len().to_string().as_str()))
        .and(body_bytes(AUDIO))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"upload_url": "https://cdn.example/upload/1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = audio_file();
    let url = client(&server).upload(file.path()).await.unwrap();

    assert_eq!(url.as_str(), "https://cdn.example/upload/1");
}

#[tokio::test]
async fn upload_unauthorized_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Authentication error"})),
        )
        .mount(&server)
        .await;

    let file = audio_file();
    let err = client(&server).upload(file.path()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    match err {
        ApiError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Authentication error"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn upload_without_url_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let file = audio_file();
    let err = client(&server).upload(file.path()).await.unwrap_err();

    assert!(matches!(err, ApiError::Protocol(_)), "got {:?}", err);
}

#[tokio::test]
async fn submit_sends_audio_url() {
    let server = MockServer::start().await;
    mount_submit(&server, "https://cdn.example/upload/1").await;

    let id = client(&server)
        .submit(&AudioUrl::new("https://cdn.example/upload/1"))
        .await
        .unwrap();

    assert_eq!(id.as_str(), "t1");
}

#[tokio::test]
async fn submit_without_id_names_missing_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .submit(&AudioUrl::new("https://cdn.example/upload/1"))
        .await
        .unwrap_err();

    match err {
        ApiError::Protocol(message) => assert!(message.contains("`id`"), "got {}", message),
        other => panic!("Expected Protocol, got {:?}", other),
    }
}

#[tokio::test]
async fn submit_server_error_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server)
        .submit(&AudioUrl::new("https://cdn.example/upload/1"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApiError::HttpStatus { status: 500, message: None, .. }),
        "got {:?}",
        err
    );
}

#[tokio::test]
async fn fetch_not_found_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Transcript not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch(&TranscriptId::new("missing"))
        .await
        .unwrap_err();

    match err {
        ApiError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Transcript not found"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_non_json_body_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch(&TranscriptId::new("t1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Protocol(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client =
        AssemblyAiClient::with_base_url(ApiToken::new(TOKEN).unwrap(), "http://127.0.0.1:1");

    let err = client
        .submit(&AudioUrl::new("https://cdn.example/upload/1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn deadline_aborts_pending_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "t1"}))
                .set_delay(StdDuration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());
    let policy = fast_policy().with_timeout(Some(Duration::from_millis(300)));

    let started = Instant::now();
    let err = use_case
        .request_transcript(&AudioUrl::new("https://media.example/a.m4a"), policy)
        .await
        .unwrap_err();

    assert!(
        matches!(err, TranscribeError::DeadlineExceeded(t) if t == Duration::from_millis(300)),
        "got {:?}",
        err
    );
    assert!(started.elapsed() < StdDuration::from_secs(2));
}

#[tokio::test]
async fn cancel_aborts_pending_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/transcript"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "t1"}))
                .set_delay(StdDuration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());
    let token = use_case.cancel_token();
    let audio_url = AudioUrl::new("https://media.example/a.m4a");

    let started = Instant::now();
    let (result, ()) = tokio::join!(
        use_case.request_transcript(&audio_url, fast_policy()),
        async {
            tokio::time::sleep(StdDuration::from_millis(100)).await;
            token.cancel();
        }
    );

    assert!(
        matches!(result, Err(TranscribeError::Cancelled)),
        "got {:?}",
        result
    );
    assert!(started.elapsed() < StdDuration::from_secs(2));
}

#[tokio::test]
async fn fetch_unknown_status_is_unrecognized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "status": "weird"})))
        .mount(&server)
        .await;

    let snapshot = client(&server)
        .fetch(&TranscriptId::new("t1"))
        .await
        .unwrap();

    assert_eq!(
        snapshot.state,
        TranscriptState::Unrecognized("weird".to_string())
    );
}

#[tokio::test]
async fn workflow_polls_until_completed() {
    let server = MockServer::start().await;
    mount_upload(&server).await;
    mount_submit(&server, "https://cdn.example/upload/1").await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "status": "processing"})),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "status": "completed",
            "text": "hello world"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());
    let file = audio_file();

    let output = use_case
        .execute(
            TranscribeInput {
                source: AudioSource::File(file.path().to_path_buf()),
                policy: fast_policy(),
            },
            TranscribeCallbacks::default(),
        )
        .await
        .unwrap();

    assert_eq!(output.transcript.text, "hello world");
    assert_eq!(output.transcript.id.as_str(), "t1");
    assert_eq!(output.polls, 3);
}

#[tokio::test]
async fn workflow_reports_error_status() {
    let server = MockServer::start().await;
    mount_submit(&server, "https://media.example/a.m4a").await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "status": "error",
            "error": "Download error, unable to download https://media.example/a.m4a"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());

    let err = use_case
        .request_transcript(&AudioUrl::new("https://media.example/a.m4a"), fast_policy())
        .await
        .unwrap_err();

    match err {
        TranscribeError::Transcription(message) => {
            assert_eq!(
                message,
                "Download error, unable to download https://media.example/a.m4a"
            );
        }
        other => panic!("Expected Transcription error, got {:?}", other),
    }
}

#[tokio::test]
async fn workflow_stops_on_unrecognized_status() {
    let server = MockServer::start().await;
    mount_submit(&server, "https://media.example/a.m4a").await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "status": "weird"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let use_case = TranscribeFileUseCase::new(client.clone(), client, TokioClock::new());

    let err = use_case
        .request_transcript(&AudioUrl::new("https://media.example/a.m4a"), fast_policy())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TranscribeError::UnrecognizedStatus(ref s) if s == "weird"),
        "got {:?}",
        err
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_prints_transcript_json() {
    let server = MockServer::start().await;
    mount_upload(&server).await;
    mount_submit(&server, "https://cdn.example/upload/1").await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "status": "completed",
            "text": "hello world",
            "confidence": 0.93
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = audio_file();
    let home = tempfile::tempdir().unwrap();
    let base_url = server.uri();
    let file_path = file.path().to_path_buf();
    let home_path = home.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("assembly-transcribe")
            .unwrap()
            .env("ASSEMBLY_AI_API_KEY", TOKEN)
            .env("HOME", &home_path)
            .env("XDG_CONFIG_HOME", &home_path)
            .arg("--base-url")
            .arg(&base_url)
            .args(["--poll-interval", "10ms", "--json"])
            .arg(&file_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"confidence\""))
            .stdout(predicate::str::contains("hello world"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_transcribes_remote_url_with_base_url_from_env() {
    let server = MockServer::start().await;
    mount_submit(&server, "https://media.example/a.m4a").await;
    Mock::given(method("GET"))
        .and(path("/v2/transcript/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "status": "completed",
            "text": "hello world"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let base_url = server.uri();
    let home_path = home.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("assembly-transcribe")
            .unwrap()
            .env("ASSEMBLY_AI_API_KEY", TOKEN)
            .env("HOME", &home_path)
            .env("XDG_CONFIG_HOME", &home_path)
            .env("ASSEMBLY_AI_BASE_URL", &base_url)
            .args(["--audio-url", "https://media.example/a.m4a"])
            .assert()
            .success()
            .stdout("hello world\n");
    })
    .await
    .unwrap();
}
