//! Location Resolver
//!
//! Resolves a single category string from one of three mutually exclusive
//! signals, checked in fixed precedence order:
//!
//! 1. Manual category selection (used verbatim)
//! 2. QR code, via the location trigger store (a miss falls through)
//! 3. GPS coordinates, via nearest-category geosearch
//! 4. Fallback to the casual-conversation category when a conversation
//!    is already under way
//!
//! Exactly one path produces the category per call; when none applies the
//! resolution fails with `LocationUnresolved`.

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::models::GeoPoint;
use crate::services::places_client::{CandidatePlace, PlaceCategory, PlacesClient};
use crate::services::trigger::TriggerStore;
use crate::utils::{ApiError, ApiResult};

/// Category used when no location signal resolves but a conversation is ongoing
pub const CASUAL_CATEGORY: &str = "casual conversation";

/// Raw signals a resolution call may carry
pub struct ResolveInput<'a> {
    pub manual_category: Option<&'a str>,
    pub qr_code: Option<&'a str>,
    pub geo: Option<GeoPoint>,
    pub has_previous_sentence: bool,
}

pub struct LocationResolver {
    places: Arc<dyn PlacesClient>,
    triggers: Arc<TriggerStore>,
}

impl LocationResolver {
    pub fn new(places: Arc<dyn PlacesClient>, triggers: Arc<TriggerStore>) -> Self {
        Self { places, triggers }
    }

    /// Resolve a category, first matching signal wins
    pub async fn resolve(&self, input: ResolveInput<'_>) -> ApiResult<String> {
        if let Some(manual) = input.manual_category.filter(|s| !s.trim().is_empty()) {
            tracing::debug!("Category resolved from manual selection: {}", manual);
            return Ok(manual.to_string());
        }

        if let Some(qr) = input.qr_code.filter(|s| !s.is_empty()) {
            if let Some(category) = self.triggers.category_for_qr(qr).await? {
                return Ok(category);
            }
            tracing::debug!("QR payload '{}' has no registered trigger, falling through", qr);
        }

        if let Some(point) = input.geo {
            if let Some(category) = self.nearest_category(point).await {
                return Ok(category);
            }
        }

        if input.has_previous_sentence {
            tracing::debug!("No location signal, continuing conversation as '{}'", CASUAL_CATEGORY);
            return Ok(CASUAL_CATEGORY.to_string());
        }

        Err(ApiError::LocationUnresolved)
    }

    /// Nearest-category geosearch: one concurrent lookup per category code,
    /// tolerant of per-branch failures. A failed lookup contributes no
    /// candidate and never aborts its siblings.
    async fn nearest_category(&self, point: GeoPoint) -> Option<String> {
        let mut lookups = JoinSet::new();
        for category in PlaceCategory::ALL {
            let places = Arc::clone(&self.places);
            lookups.spawn(async move { places.nearest(category, point).await });
        }

        let mut candidates: Vec<CandidatePlace> = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok(Ok(Some(place))) => candidates.push(place),
                Ok(Ok(None)) => {},
                Ok(Err(e)) => tracing::warn!("Geosearch lookup failed: {}", e),
                Err(e) => tracing::warn!("Geosearch task failed to complete: {}", e),
            }
        }

        let closest = closest_candidate(&candidates)?;
        tracing::info!(
            "Nearest place is '{}' at {}m",
            closest.category.label(),
            closest.distance_m
        );
        Some(closest.category.label().to_string())
    }
}

/// Reduce gathered candidates to the closest one.
///
/// Candidates are visited in enumeration order and compared with strict
/// less-than against the running minimum, so equal distances keep the
/// earlier category.
fn closest_candidate(candidates: &[CandidatePlace]) -> Option<&CandidatePlace> {
    let mut closest: Option<&CandidatePlace> = None;
    for category in PlaceCategory::ALL {
        let Some(candidate) = candidates.iter().find(|c| c.category == category) else {
            continue;
        };
        match closest {
            Some(current) if candidate.distance_m < current.distance_m => {
                closest = Some(candidate)
            },
            None => closest = Some(candidate),
            _ => {},
        }
    }
    closest
}
