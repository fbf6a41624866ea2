pub mod favorite;
pub mod generation;
pub mod location;
pub mod places_client;
pub mod recommendation;
pub mod trigger;

pub use favorite::{DEFAULT_USER_ID, FavoriteService};
pub use generation::{GeminiClient, SentenceGenerator};
pub use location::{CASUAL_CATEGORY, LocationResolver, ResolveInput};
pub use places_client::{CandidatePlace, KakaoPlacesClient, PlaceCategory, PlacesClient};
pub use recommendation::RecommendationService;
pub use trigger::TriggerStore;
