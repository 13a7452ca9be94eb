//! Public façade over the insight pipelines.
//!
//! Construct one `InsightService` at process start and share it by
//! reference; the cache inside it is the only shared mutable state in the
//! core. Every operation propagates gateway errors unchanged — no retries,
//! no substituted fallback text. Callers that lose interest in a result
//! simply drop the future.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::cache::InsightCache;
use crate::gateway::{ChatGateway, GatewayError};
use crate::models::{CachedInsight, MessageSuggestion, Property, SearchContext, UserProfile};
use crate::parsers::{parse_message_suggestion, parse_ranking, RankedProperties};
use crate::prompts;

pub struct InsightService {
    gateway: Arc<dyn ChatGateway>,
    cache: InsightCache,
}

impl InsightService {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            cache: InsightCache::new(),
        }
    }

    /// The shared insight cache; exposed for stale reads after a failed
    /// regeneration.
    pub fn cache(&self) -> &InsightCache {
        &self.cache
    }

    /// Cached insight for a property regardless of freshness.
    pub fn cached_insight(&self, property_id: &str) -> Option<CachedInsight> {
        self.cache.peek(property_id)
    }

    /// One-property insight, memoized for 24 hours per property id.
    ///
    /// A failed regeneration leaves any stale entry in place and returns the
    /// error; the cache is only written on success.
    pub async fn generate_property_insight(
        &self,
        property: &Property,
    ) -> Result<String, GatewayError> {
        if let Some(content) = self.cache.fresh_content(&property.id, Utc::now()) {
            return Ok(content);
        }

        debug!(property_id = %property.id, "Insight cache miss, generating");
        let turns = prompts::insight_prompt(property);
        let content = self.gateway.complete(&turns).await?;

        self.cache.store(&property.id, content.clone(), Utc::now());
        info!(property_id = %property.id, "Generated and cached property insight");
        Ok(content)
    }

    /// Rank candidates for a buyer. Not cached: the result depends on the
    /// candidate set and profile, and the call is cheap enough per use.
    ///
    /// The prompt carries only the first ten candidates, but parsed ids are
    /// checked against the full list.
    pub async fn rank_properties(
        &self,
        properties: &[Property],
        profile: Option<&UserProfile>,
    ) -> Result<RankedProperties, GatewayError> {
        let turns = prompts::ranking_prompt(properties, profile);
        let raw = self.gateway.complete(&turns).await?;

        let ranked = parse_ranking(&raw, properties);
        info!(
            candidates = properties.len(),
            picks = ranked.top_picks.len(),
            "Ranked properties"
        );
        Ok(ranked)
    }

    /// Rewrite a buyer's draft message for one property. Not cached.
    pub async fn rewrite_message(
        &self,
        original_message: &str,
        property: &Property,
    ) -> Result<MessageSuggestion, GatewayError> {
        let turns = prompts::rewrite_prompt(original_message, property);
        let raw = self.gateway.complete(&turns).await?;
        Ok(parse_message_suggestion(&raw))
    }

    /// Free-form Q&A; the model's text is returned unparsed. Not cached.
    pub async fn ask_question(
        &self,
        question: &str,
        context: Option<&SearchContext>,
    ) -> Result<String, GatewayError> {
        let turns = prompts::question_prompt(question, context);
        self.gateway.complete(&turns).await
    }
}
