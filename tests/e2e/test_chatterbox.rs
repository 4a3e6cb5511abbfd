use crate::e2e::helpers;

use helpers::fake_chatterbox::FakeChatterbox;
use helpers::fixtures::wav_samples;
use helpers::TestContext;
use pretty_assertions::assert_eq;
use script_narrator::domain::voice::VoiceConfig;
use script_narrator::infrastructure::processors::{AudioProcessor, WavProcessor};
use script_narrator::infrastructure::repositories::{
    ChatterboxTtsRepository, TtsRepository, TtsRepositoryError,
};
use script_narrator::NarrationPipeline;
use std::sync::Arc;
use std::time::Duration;
use test_context::test_context;

fn repository(base_url: &str) -> ChatterboxTtsRepository {
    ChatterboxTtsRepository::new(base_url, Duration::from_secs(5))
        .expect("Failed to build Chatterbox client")
}

#[tokio::test]
async fn it_should_post_text_and_voice_to_synthesize_wav() {
    let server = FakeChatterbox::start(None, true).await;
    let repo = repository(&server.base_url);
    let voice = VoiceConfig {
        exaggeration: Some(0.5),
        top_k: Some(30),
        ..VoiceConfig::preset("conversational")
    };

    let audio = repo.synthesize("Hello there.", &voice).await.unwrap();

    assert_eq!(wav_samples(&audio), vec![1]);
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["text"], "Hello there.");
    assert_eq!(requests[0]["voice_preset"], "conversational");
    assert_eq!(requests[0]["exaggeration"], 0.5);
    assert_eq!(requests[0]["top_k"], 30);
    assert!(requests[0].get("temperature").is_none());
}

#[tokio::test]
async fn it_should_map_server_error_to_status() {
    let server = FakeChatterbox::start(Some("explode"), true).await;
    let repo = repository(&server.base_url);

    let result = repo.synthesize("please explode", &VoiceConfig::default()).await;

    match result {
        Err(TtsRepositoryError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "synthesis failed");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn it_should_report_transport_error_when_server_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let repo = repository(&format!("http://{}", addr));

    let result = repo.synthesize("Anyone there?", &VoiceConfig::default()).await;

    assert!(matches!(result, Err(TtsRepositoryError::Transport(_))));
}

#[tokio::test]
async fn it_should_read_health_from_server() {
    let ready = FakeChatterbox::start(None, true).await;
    let loading = FakeChatterbox::start(None, false).await;

    let ready_status = repository(&ready.base_url).check_health().await.unwrap();
    let loading_status = repository(&loading.base_url).check_health().await.unwrap();

    assert!(ready_status.is_healthy());
    assert_eq!(ready_status.device.as_deref(), Some("cpu"));
    assert!(!loading_status.is_healthy());
    assert_eq!(loading_status.status, "initializing");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_narrate_to_wav_through_http_backend(ctx: &TestContext) {
    let server = FakeChatterbox::start(Some("Skip"), true).await;
    let mut config = ctx.config();
    config.backend_url = server.base_url.clone();
    let repo = Arc::new(repository(&config.backend_url));
    let processors: Vec<Arc<dyn AudioProcessor>> = vec![Arc::new(WavProcessor::new())];
    let pipeline = NarrationPipeline::new(config, repo, processors);
    let output = ctx.output("episode.wav");

    let readiness = pipeline.check_readiness().await;
    let summary = pipeline
        .run("Intro line.\n\nSkip this one.\n\nOutro line.", &output)
        .await
        .unwrap();

    assert!(readiness.is_ready());
    assert_eq!(summary.unit_count, 3);
    assert_eq!(summary.failed_units, vec![1]);
    assert_eq!(wav_samples(&std::fs::read(&output).unwrap()), vec![1, 3]);
    assert_eq!(server.requests().len(), 3);
    assert!(ctx.leftover_temp_files().is_empty());
}
