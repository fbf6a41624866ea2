use std::sync::Arc;

use crate::models::{RecommendationRequest, RecommendationResponse, Sentence};
use crate::services::generation::{PromptContext, SentenceGenerator, build_prompt};
use crate::services::location::{LocationResolver, ResolveInput};
use crate::utils::{ApiError, ApiResult};

/// Orchestrates one recommendation call: resolve the category, build the
/// prompt, run generation, and number the results.
pub struct RecommendationService {
    resolver: LocationResolver,
    generator: Arc<dyn SentenceGenerator>,
}

impl RecommendationService {
    pub fn new(resolver: LocationResolver, generator: Arc<dyn SentenceGenerator>) -> Self {
        Self { resolver, generator }
    }

    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> ApiResult<RecommendationResponse> {
        let category = self
            .resolver
            .resolve(ResolveInput {
                manual_category: request.manual_category.as_deref(),
                qr_code: request.qr_code.as_deref(),
                geo: request.geo_point(),
                has_previous_sentence: request.has_previous_sentence(),
            })
            .await?;

        let prompt = build_prompt(&PromptContext {
            category: &category,
            keywords: request.keywords.as_deref(),
            situation: request.situation.as_deref(),
            previous_sentence: request.previous_sentence.as_deref(),
            opponent_dialogue: request.opponent_dialogue.as_deref(),
            conversation: &request.conversation,
            favorites: &request.favorites,
        });

        let texts = self.generator.generate(&prompt).await?;
        if texts.is_empty() {
            tracing::warn!("Generation call succeeded but produced no sentences");
            return Err(ApiError::EmptyGeneration);
        }

        // Ids are 1-based and follow the model's output order exactly;
        // no reordering, dedup, or ranking happens here.
        let recommended_sentences = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Sentence { id: i as i64 + 1, text })
            .collect();

        Ok(RecommendationResponse { category, recommended_sentences })
    }
}
