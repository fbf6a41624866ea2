use crate::services::favorite::{DEFAULT_USER_ID, FavoriteService};
use crate::tests::common::create_test_db;
use crate::utils::ApiError;

async fn create_service() -> FavoriteService {
    FavoriteService::new(create_test_db().await)
}

#[tokio::test]
async fn test_list_empty() {
    let service = create_service().await;
    let favorites = service.list(DEFAULT_USER_ID).await.unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_add_appends_in_display_order() {
    let service = create_service().await;

    service.add(DEFAULT_USER_ID, "This one please").await.unwrap();
    service.add(DEFAULT_USER_ID, "Thank you").await.unwrap();
    let third = service.add(DEFAULT_USER_ID, "Where is the restroom?").await.unwrap();

    assert_eq!(third.display_order, 3);

    let favorites = service.list(DEFAULT_USER_ID).await.unwrap();
    let sentences: Vec<&str> = favorites.iter().map(|f| f.sentence.as_str()).collect();
    assert_eq!(sentences, vec!["This one please", "Thank you", "Where is the restroom?"]);
    let orders: Vec<i64> = favorites.iter().map(|f| f.display_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_delete_favorite() {
    let service = create_service().await;

    let favorite = service.add(DEFAULT_USER_ID, "Thank you").await.unwrap();
    service.delete(DEFAULT_USER_ID, favorite.id).await.unwrap();

    let favorites = service.list(DEFAULT_USER_ID).await.unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_delete_missing_favorite_is_not_found() {
    let service = create_service().await;

    let err = service.delete(DEFAULT_USER_ID, 9999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_reorder_replaces_display_order() {
    let service = create_service().await;

    let a = service.add(DEFAULT_USER_ID, "a").await.unwrap();
    let b = service.add(DEFAULT_USER_ID, "b").await.unwrap();
    let c = service.add(DEFAULT_USER_ID, "c").await.unwrap();

    service.reorder(DEFAULT_USER_ID, &[c.id, a.id, b.id]).await.unwrap();

    let favorites = service.list(DEFAULT_USER_ID).await.unwrap();
    let sentences: Vec<&str> = favorites.iter().map(|f| f.sentence.as_str()).collect();
    assert_eq!(sentences, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_reorder_rejects_incomplete_id_set() {
    let service = create_service().await;

    let a = service.add(DEFAULT_USER_ID, "a").await.unwrap();
    let _b = service.add(DEFAULT_USER_ID, "b").await.unwrap();

    let err = service.reorder(DEFAULT_USER_ID, &[a.id]).await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[tokio::test]
async fn test_reorder_rejects_foreign_ids() {
    let service = create_service().await;

    let a = service.add(DEFAULT_USER_ID, "a").await.unwrap();
    let err = service.reorder(DEFAULT_USER_ID, &[a.id, 9999]).await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[tokio::test]
async fn test_favorites_are_isolated_per_user() {
    let service = create_service().await;

    service.add("alice", "Hi, it's me").await.unwrap();
    service.add("bob", "Good morning").await.unwrap();

    let alice = service.list("alice").await.unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].sentence, "Hi, it's me");
    // Each user's ordering starts at 1
    assert_eq!(service.list("bob").await.unwrap()[0].display_order, 1);
}
