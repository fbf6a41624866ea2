use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Inbound recommendation request.
///
/// All fields are optional, but at least one location-resolving signal
/// (manual_category, qr_code, or a full coordinate pair) or a
/// previous_sentence must be present for resolution to succeed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_geo_pair"))]
pub struct RecommendationRequest {
    /// Current latitude in signed degrees; valid only together with longitude
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Current longitude in signed degrees; valid only together with latitude
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    /// Opaque payload scanned from a QR code at the location
    pub qr_code: Option<String>,
    /// Category selected directly by the user; always wins when present
    pub manual_category: Option<String>,
    /// Free-text keywords the user wants the sentences to reflect
    pub keywords: Option<String>,
    /// The user's own description of the current situation; takes
    /// precedence over keywords during generation
    pub situation: Option<String>,
    /// The sentence the user last spoke, when continuing a conversation
    pub previous_sentence: Option<String>,
    /// What the conversation partner last said
    pub opponent_dialogue: Option<String>,
    /// Recent conversation history, oldest first
    #[serde(default)]
    pub conversation: Vec<ConversationTurn>,
    /// Favorited sentences, used only as a tone hint for generation
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl RecommendationRequest {
    /// Coordinate pair, present only when both halves were supplied
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        }
    }

    pub fn has_previous_sentence(&self) -> bool {
        self.previous_sentence.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

fn validate_geo_pair(req: &RecommendationRequest) -> Result<(), ValidationError> {
    if req.latitude.is_some() != req.longitude.is_some() {
        return Err(ValidationError::new("incomplete_coordinate_pair"));
    }
    Ok(())
}

/// A latitude/longitude pair in signed degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One line of the running conversation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationTurn {
    /// Who spoke this line, e.g. "user" or "partner"
    pub speaker: String,
    pub message: String,
}

/// A recommended sentence with its 1-based position in generation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sentence {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecommendationResponse {
    /// The resolved category the sentences were generated for
    pub category: String,
    pub recommended_sentences: Vec<Sentence>,
}
