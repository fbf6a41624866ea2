use std::sync::Arc;

use crate::models::{RecommendationRequest, Sentence};
use crate::services::{
    CandidatePlace, LocationResolver, PlaceCategory, RecommendationService, TriggerStore,
};
use crate::tests::common::{FailingGenerator, FakeGenerator, FakePlacesClient, create_test_db};
use crate::utils::ApiError;

async fn service_with(
    places: FakePlacesClient,
    generator: FakeGenerator,
) -> (RecommendationService, Arc<FakePlacesClient>, Arc<FakeGenerator>) {
    let pool = create_test_db().await;
    let places = Arc::new(places);
    let generator = Arc::new(generator);

    let places_dyn: Arc<dyn crate::services::PlacesClient> = places.clone();
    let generator_dyn: Arc<dyn crate::services::SentenceGenerator> = generator.clone();

    let resolver = LocationResolver::new(places_dyn, Arc::new(TriggerStore::new(pool)));
    (RecommendationService::new(resolver, generator_dyn), places, generator)
}

fn manual_request(category: &str) -> RecommendationRequest {
    RecommendationRequest { manual_category: Some(category.to_string()), ..Default::default() }
}

#[tokio::test]
async fn test_round_trip_assigns_sequential_ids() {
    let (service, _, _) = service_with(
        FakePlacesClient::default(),
        FakeGenerator::with_sentences(&["Order please.", "Thank you."]),
    )
    .await;

    let response = service.recommend(&manual_request("restaurant")).await.unwrap();

    assert_eq!(response.category, "restaurant");
    assert_eq!(
        response.recommended_sentences,
        vec![
            Sentence { id: 1, text: "Order please.".to_string() },
            Sentence { id: 2, text: "Thank you.".to_string() },
        ]
    );
}

#[tokio::test]
async fn test_ids_follow_generation_order_without_sorting() {
    let (service, _, _) = service_with(
        FakePlacesClient::default(),
        FakeGenerator::with_sentences(&["c", "a", "b"]),
    )
    .await;

    let response = service.recommend(&manual_request("school")).await.unwrap();

    let ids: Vec<i64> = response.recommended_sentences.iter().map(|s| s.id).collect();
    let texts: Vec<&str> =
        response.recommended_sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(texts, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_empty_generation_is_a_distinct_error() {
    let (service, _, _) =
        service_with(FakePlacesClient::default(), FakeGenerator::with_sentences(&[])).await;

    let err = service.recommend(&manual_request("hospital")).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyGeneration));
}

#[tokio::test]
async fn test_generator_transport_failure_is_fatal() {
    let pool = create_test_db().await;
    let places_dyn: Arc<dyn crate::services::PlacesClient> =
        Arc::new(FakePlacesClient::default());
    let resolver = LocationResolver::new(places_dyn, Arc::new(TriggerStore::new(pool)));
    let service = RecommendationService::new(resolver, Arc::new(FailingGenerator));

    let err = service.recommend(&manual_request("hospital")).await.unwrap_err();
    assert!(matches!(err, ApiError::UpstreamTransport { provider: "gemini", .. }));
}

#[tokio::test]
async fn test_manual_category_bypasses_providers_entirely() {
    let (service, places, generator) = service_with(
        FakePlacesClient::with_places(vec![CandidatePlace {
            category: PlaceCategory::Cafe,
            distance_m: 10,
        }]),
        FakeGenerator::with_sentences(&["My head hurts."]),
    )
    .await;

    let request = RecommendationRequest {
        manual_category: Some("hospital".to_string()),
        keywords: Some("headache".to_string()),
        ..Default::default()
    };
    let response = service.recommend(&request).await.unwrap();

    assert_eq!(response.category, "hospital");
    assert_eq!(places.call_count(), 0);
    // The keyword made it into the prompt
    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("headache"));
    assert!(prompt.contains("hospital"));
}

#[tokio::test]
async fn test_geo_request_generates_for_nearest_category() {
    let (service, _, generator) = service_with(
        FakePlacesClient::with_places(vec![
            CandidatePlace { category: PlaceCategory::Hospital, distance_m: 150 },
            CandidatePlace { category: PlaceCategory::Cafe, distance_m: 80 },
        ]),
        FakeGenerator::with_sentences(&["One iced americano, please."]),
    )
    .await;

    let request = RecommendationRequest {
        latitude: Some(37.50),
        longitude: Some(127.00),
        ..Default::default()
    };
    let response = service.recommend(&request).await.unwrap();

    assert_eq!(response.category, "cafe");
    assert!(generator.last_prompt().unwrap().contains("cafe"));
}

#[tokio::test]
async fn test_continuation_request_uses_continuation_prompt() {
    let (service, _, generator) = service_with(
        FakePlacesClient::default(),
        FakeGenerator::with_sentences(&["Since this morning."]),
    )
    .await;

    let request = RecommendationRequest {
        manual_category: Some("hospital".to_string()),
        previous_sentence: Some("My head hurts.".to_string()),
        opponent_dialogue: Some("Since when?".to_string()),
        ..Default::default()
    };
    service.recommend(&request).await.unwrap();

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("middle of a conversation"));
    assert!(prompt.contains("My head hurts."));
    assert!(prompt.contains("Since when?"));
}
