pub mod favorite;
pub mod recommendation;

pub use favorite::{CreateFavoriteRequest, Favorite, ReorderFavoritesRequest};
pub use recommendation::{
    ConversationTurn, GeoPoint, RecommendationRequest, RecommendationResponse, Sentence,
};
