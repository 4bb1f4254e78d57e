//! In-memory collaborators shared by the editor integration tests

#![allow(dead_code)]

use pagecraft_model::{
    ContentMap, Layout, LayoutState, LayoutStore, MediaUploader, SaveVersionRequest, Section,
    StoreError,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "secret";

struct Inner {
    layout: Mutex<Layout>,
    failure: Mutex<Option<StoreError>>,
    requests: Mutex<Vec<SaveVersionRequest>>,
}

/// Layout store backed by one in-memory `Layout`
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new(layout: Layout) -> Self {
        Self {
            inner: Arc::new(Inner {
                layout: Mutex::new(layout),
                failure: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every following call fails with `err`
    pub fn fail_with(&self, err: StoreError) {
        *self.inner.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.inner.failure.lock().unwrap() = None;
    }

    pub fn requests(&self) -> Vec<SaveVersionRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn layout(&self) -> Layout {
        self.inner.layout.lock().unwrap().clone()
    }

    fn check(&self, token: &str) -> Result<(), StoreError> {
        if token != TOKEN {
            return Err(StoreError::Unauthorized);
        }
        match self.inner.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl LayoutStore for MemoryStore {
    async fn save_version(
        &self,
        _layout_id: &str,
        request: &SaveVersionRequest,
        token: &str,
    ) -> Result<LayoutState, StoreError> {
        self.check(token)?;
        self.inner.requests.lock().unwrap().push(request.clone());

        let mut layout = self.inner.layout.lock().unwrap();
        layout.record_save(
            request.sections.clone(),
            request.is_draft,
            request.notes.clone(),
            "tester",
        );
        Ok(layout.state())
    }

    async fn revert(
        &self,
        _layout_id: &str,
        version_id: &str,
        token: &str,
    ) -> Result<LayoutState, StoreError> {
        self.check(token)?;

        let mut layout = self.inner.layout.lock().unwrap();
        layout
            .revert_to(version_id, "tester")
            .map_err(|err| StoreError::NotFound(err.to_string()))?;
        Ok(layout.state())
    }
}

/// Store whose calls never complete
#[derive(Clone, Copy)]
pub struct StalledStore;

impl LayoutStore for StalledStore {
    async fn save_version(
        &self,
        _layout_id: &str,
        _request: &SaveVersionRequest,
        _token: &str,
    ) -> Result<LayoutState, StoreError> {
        std::future::pending().await
    }

    async fn revert(
        &self,
        _layout_id: &str,
        _version_id: &str,
        _token: &str,
    ) -> Result<LayoutState, StoreError> {
        std::future::pending().await
    }
}

/// Uploader that hands back a fixed media URL
pub struct FakeUploader;

impl MediaUploader for FakeUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>, token: &str) -> Result<String, StoreError> {
        if token != TOKEN {
            return Err(StoreError::Unauthorized);
        }
        if bytes.is_empty() {
            return Err(StoreError::Rejected {
                status: 400,
                message: "empty upload".to_string(),
            });
        }
        Ok(format!("/media/{}", file_name))
    }
}

pub fn content(value: Value) -> ContentMap {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

/// Home page with a hero, services and one section of an unregistered type
pub fn home_layout() -> Layout {
    let mut layout = Layout::new("layout-home", "home", "Home");
    let sections = vec![
        Section::with_content("hero-1", "hero", ContentMap::new()),
        Section::with_content("services-1", "home-services", ContentMap::new()),
        Section::with_content(
            "custom-1",
            "pricing-table",
            content(serde_json::json!({ "title": "Plans", "tiers": [] })),
        ),
    ];
    layout.record_save(sections, false, Some("Initial".to_string()), "seed");
    layout
}
