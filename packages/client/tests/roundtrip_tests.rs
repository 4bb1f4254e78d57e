//! Client against a live server on an ephemeral port

use pagecraft_client::{ClientError, LayoutClient, LayoutListCache};
use pagecraft_editor::{ComposerError, ControlInput, Credentials, MediaTarget, PageComposer, SaveOutcome};
use pagecraft_model::{CacheInvalidation, ContentMap, Section};
use pagecraft_server::{build_state, router, Config, NewLayout, SharedState, ADMIN_USER};
use serde_json::json;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::sync::broadcast;

const TOKEN: &str = "secret";

struct Running {
    _dir: TempDir,
    state: SharedState,
    client: LayoutClient,
}

async fn start() -> Running {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        admin_tokens: vec![TOKEN.to_string()],
        ..Config::default()
    };
    let state = build_state(config, dir.path()).await.unwrap();

    let mut hero = ContentMap::new();
    hero.insert("title".to_string(), json!("Integrating"));
    state
        .repo
        .create(
            NewLayout {
                id: Some("home".to_string()),
                slug: "home".to_string(),
                name: "Home".to_string(),
                sections: vec![Section::with_content("hero-1", "hero", hero)],
            },
            ADMIN_USER,
        )
        .await
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Running {
        _dir: dir,
        state,
        client: LayoutClient::new(&format!("http://{}", addr)),
    }
}

#[tokio::test]
async fn test_composer_publishes_through_client() {
    let server = start().await;
    let layout = server.client.layout_by_slug("home").await.unwrap();

    let mut composer = PageComposer::new(&layout, server.client.clone(), Credentials::with_session(TOKEN));
    composer
        .apply_input("hero-1", ControlInput::set("title", "Building Tomorrow"))
        .unwrap();
    let outcome = composer.save(false, Some("New headline".to_string())).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Published);
    assert_eq!(composer.versions().len(), 2);

    let stored = server.client.layout("home").await.unwrap();
    assert_eq!(stored.sections[0].content["title"], json!("Building Tomorrow"));
    assert_eq!(stored.versions[1].notes.as_deref(), Some("New headline"));
}

#[tokio::test]
async fn test_rejected_token_reads_as_not_logged_in() {
    let server = start().await;
    let layout = server.client.layout("home").await.unwrap();

    let mut composer = PageComposer::new(&layout, server.client.clone(), Credentials::with_session("stale"));
    composer
        .apply_input("hero-1", ControlInput::set("title", "Unsaved"))
        .unwrap();
    let err = composer.save(false, None).await.unwrap_err();

    assert_eq!(err, ComposerError::NotLoggedIn);
    assert_eq!(composer.section("hero-1").unwrap().content["title"], json!("Unsaved"));
    assert_eq!(server.client.layout("home").await.unwrap().versions.len(), 1);
}

#[tokio::test]
async fn test_not_found_and_revert() {
    let server = start().await;

    let err = server.client.layout("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(message) if message.contains("missing")));

    let err = server.client.revert_layout("home", "v7", TOKEN).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let state = server.client.revert_layout("home", "v1", TOKEN).await.unwrap();
    assert_eq!(state.versions.len(), 2);
    assert_eq!(state.versions[1].notes.as_deref(), Some("Reverted to v1"));
}

#[tokio::test]
async fn test_media_upload_sets_field() {
    let server = start().await;
    let layout = server.client.layout("home").await.unwrap();
    let mut composer = PageComposer::new(&layout, server.client.clone(), Credentials::with_session(TOKEN));

    let url = composer
        .upload_media(
            &server.client,
            "hero-1",
            MediaTarget::Field("backgroundImage".to_string()),
            "site.jpg",
            vec![0xff, 0xd8, 0xff],
        )
        .await
        .unwrap();

    assert!(url.starts_with("/media/"));
    assert_eq!(composer.section("hero-1").unwrap().content["backgroundImage"], json!(url));
}

#[tokio::test]
async fn test_published_event_drops_cached_list() {
    let server = start().await;
    let (sender, receiver) = broadcast::channel::<CacheInvalidation>(8);
    let mut seen = sender.subscribe();
    let mut cache = LayoutListCache::default().with_invalidations(receiver);

    let watcher = server.client.clone();
    tokio::spawn(async move { watcher.watch_invalidations(sender).await });

    let now = Instant::now();
    let list = cache.layouts(&server.client).await.unwrap();
    assert_eq!(list.len(), 1);
    assert!(cache.get(now).is_some());

    tokio::time::timeout(Duration::from_secs(5), async {
        while server.state.subscriber_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    let request = pagecraft_model::SaveVersionRequest {
        sections: vec![],
        is_draft: false,
        notes: None,
    };
    server
        .client
        .save_layout_version("home", &request, TOKEN)
        .await
        .unwrap();

    let signal = tokio::time::timeout(Duration::from_secs(5), seen.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(signal.layout_id, "home");
    assert!(cache.get(now).is_none());
}
