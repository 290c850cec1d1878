// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategic recommendations. Also serves general conversation.

use std::sync::Arc;

use async_trait::async_trait;
use atrium_config::model::OpenAiConfig;
use atrium_core::traits::{CompletionAdapter, Recommender};
use atrium_core::types::CompletionRequest;
use atrium_core::AtriumError;

pub const RECOMMENDATION_UNAVAILABLE: &str = "Recommendation Engine Unavailable (No API Key).";

const TEMPERATURE: f32 = 0.3;

pub struct RecommendationHandler {
    completion: Option<Arc<dyn CompletionAdapter>>,
    model: String,
}

impl RecommendationHandler {
    pub fn new(completion: Option<Arc<dyn CompletionAdapter>>, openai: &OpenAiConfig) -> Self {
        Self {
            completion,
            model: openai.chat_model.clone(),
        }
    }
}

pub fn build_prompt(query: &str) -> String {
    format!(
        "You are a Strategic Business Advisor.\n\n\
         User Context/Query: {query}\n\n\
         Based on general business best practices (and any provided context), provide a clear, actionable recommendation.\n\
         Format your response as:\n\
         1. Observation\n\
         2. Recommended Action\n\
         3. Expected Outcome\n\n\
         Recommendation:"
    )
}

#[async_trait]
impl Recommender for RecommendationHandler {
    /// Completion errors propagate to the caller.
    async fn recommend(&self, query: &str) -> Result<String, AtriumError> {
        let Some(completion) = self.completion.as_deref() else {
            return Ok(RECOMMENDATION_UNAVAILABLE.to_string());
        };

        let request =
            CompletionRequest::new(self.model.clone(), build_prompt(query)).with_temperature(TEMPERATURE);
        Ok(completion.complete(request).await?.content)
    }
}
