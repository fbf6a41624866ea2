// Common test utilities and helpers

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::db;
use crate::models::GeoPoint;
use crate::services::{CandidatePlace, PlaceCategory, PlacesClient, SentenceGenerator};
use crate::utils::{ApiError, ApiResult};

/// Create an in-memory SQLite database with the application schema
pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    db::init_schema(&pool).await.expect("Failed to initialize schema");

    pool
}

/// Scripted places provider: per-category canned candidates plus a list of
/// categories whose lookups fail. Counts calls so tests can assert that a
/// resolution path was (or was not) taken.
#[derive(Default)]
pub struct FakePlacesClient {
    pub places: Vec<CandidatePlace>,
    pub failing: Vec<PlaceCategory>,
    pub calls: AtomicUsize,
}

impl FakePlacesClient {
    pub fn with_places(places: Vec<CandidatePlace>) -> Self {
        Self { places, ..Default::default() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesClient for FakePlacesClient {
    async fn nearest(
        &self,
        category: PlaceCategory,
        _point: GeoPoint,
    ) -> ApiResult<Option<CandidatePlace>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&category) {
            return Err(ApiError::upstream("kakao", "connection refused"));
        }
        Ok(self.places.iter().find(|p| p.category == category).cloned())
    }
}

/// Scripted generator that returns fixed sentences and records the prompt
/// it was last called with.
#[derive(Default)]
pub struct FakeGenerator {
    pub sentences: Vec<String>,
    pub last_prompt: Mutex<Option<String>>,
    pub calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn with_sentences(sentences: &[&str]) -> Self {
        Self {
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentenceGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> ApiResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.sentences.clone())
    }
}

/// Generator that always fails with an upstream transport error
pub struct FailingGenerator;

#[async_trait]
impl SentenceGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> ApiResult<Vec<String>> {
        Err(ApiError::upstream("gemini", "request timed out"))
    }
}
