use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::KakaoConfig;
use crate::models::GeoPoint;
use crate::utils::{ApiError, ApiResult};

/// Fixed enumeration of place categories probed during geosearch.
///
/// The order is significant: distance ties between candidates are broken
/// in favor of the category that appears earlier in `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Hospital,
    Restaurant,
    ConvenienceStore,
    SubwayStation,
    Cafe,
    School,
    CulturalFacility,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 7] = [
        PlaceCategory::Hospital,
        PlaceCategory::Restaurant,
        PlaceCategory::ConvenienceStore,
        PlaceCategory::SubwayStation,
        PlaceCategory::Cafe,
        PlaceCategory::School,
        PlaceCategory::CulturalFacility,
    ];

    /// Kakao Local category group code for this place kind
    pub fn group_code(self) -> &'static str {
        match self {
            Self::Hospital => "HP8",
            Self::Restaurant => "FD6",
            Self::ConvenienceStore => "CS2",
            Self::SubwayStation => "SW8",
            Self::Cafe => "CE7",
            Self::School => "SC4",
            Self::CulturalFacility => "CT1",
        }
    }

    /// Label used as the resolved category string fed into generation
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Restaurant => "restaurant",
            Self::ConvenienceStore => "convenience store",
            Self::SubwayStation => "subway station",
            Self::Cafe => "cafe",
            Self::School => "school",
            Self::CulturalFacility => "cultural facility",
        }
    }
}

/// Transient result of a single per-category nearest-place lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePlace {
    pub category: PlaceCategory,
    pub distance_m: u32,
}

/// Per-category nearest-place lookup against a places-search provider
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Nearest match for one category around the given point, or None
    /// when nothing is within the configured radius
    async fn nearest(
        &self,
        category: PlaceCategory,
        point: GeoPoint,
    ) -> ApiResult<Option<CandidatePlace>>;
}

const KAKAO_CATEGORY_SEARCH_URL: &str = "https://dapi.kakao.com/v2/local/search/category.json";

/// Kakao Local implementation of the per-category nearest-place lookup
pub struct KakaoPlacesClient {
    http_client: Client,
    api_key: String,
    radius_m: u32,
}

impl KakaoPlacesClient {
    pub fn new(config: &KakaoConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { http_client, api_key: config.api_key.clone(), radius_m: config.radius_m }
    }
}

#[derive(Debug, Deserialize)]
struct KakaoSearchResponse {
    #[serde(default)]
    documents: Vec<KakaoDocument>,
}

#[derive(Debug, Deserialize)]
struct KakaoDocument {
    // Kakao reports distance in meters as a decimal string
    distance: Option<String>,
}

#[async_trait]
impl PlacesClient for KakaoPlacesClient {
    async fn nearest(
        &self,
        category: PlaceCategory,
        point: GeoPoint,
    ) -> ApiResult<Option<CandidatePlace>> {
        tracing::debug!(
            "Searching nearest '{}' around ({}, {})",
            category.label(),
            point.latitude,
            point.longitude
        );

        let response = self
            .http_client
            .get(KAKAO_CATEGORY_SEARCH_URL)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[
                ("category_group_code", category.group_code().to_string()),
                ("x", point.longitude.to_string()),
                ("y", point.latitude.to_string()),
                ("radius", self.radius_m.to_string()),
                ("size", "1".to_string()),
                ("sort", "distance".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::upstream("kakao", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream("kakao", format!("status {}: {}", status, body)));
        }

        let result: KakaoSearchResponse =
            response.json().await.map_err(|e| ApiError::malformed("kakao", e.to_string()))?;

        Ok(result.documents.first().map(|doc| CandidatePlace {
            category,
            distance_m: doc.distance.as_deref().and_then(|d| d.parse().ok()).unwrap_or(999),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_codes_are_unique() {
        let mut codes: Vec<_> = PlaceCategory::ALL.iter().map(|c| c.group_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), PlaceCategory::ALL.len());
    }

    #[test]
    fn test_document_distance_parsing() {
        let json = r#"{"documents": [{"distance": "150", "place_name": "A clinic"}]}"#;
        let parsed: KakaoSearchResponse = serde_json::from_str(json).unwrap();
        let distance = parsed.documents[0]
            .distance
            .as_deref()
            .and_then(|d| d.parse::<u32>().ok())
            .unwrap_or(999);
        assert_eq!(distance, 150);
    }
}
