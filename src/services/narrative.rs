use crate::constants::STORY_CONTINUATION_FALLBACK;
use crate::error::{AppError, Result};
use crate::models::{RealtimeContext, SuggestedRoute, Theme};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub title: String,
    pub story: String,
}

/// Narrative gateway. Callers always recover from its errors locally.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// `previous_story` is set when re-narrating a recalculated route, so the
    /// new text can pick up where the old one left off.
    async fn generate_title_and_story(
        &self,
        route: &SuggestedRoute,
        theme: Theme,
        context: &RealtimeContext,
        previous_story: Option<&str>,
    ) -> Result<Narrative>;
}

fn spot_names(route: &SuggestedRoute) -> String {
    route
        .pois
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Narrative used when the gateway fails for a fresh proposal
pub fn fallback_narrative(route: &SuggestedRoute) -> Narrative {
    Narrative {
        title: route.name.clone(),
        story: format!(
            "A {}-minute walk that takes you past {}. Enjoy every stop along the way.",
            route.total_duration_minutes,
            spot_names(route)
        ),
    }
}

/// Story used when re-narration fails: the old story plus a fixed sentence
pub fn continuation_fallback(previous_story: &str) -> String {
    if previous_story.trim().is_empty() {
        STORY_CONTINUATION_FALLBACK.to_string()
    } else {
        format!("{} {}", previous_story.trim_end(), STORY_CONTINUATION_FALLBACK)
    }
}

pub fn build_prompt(
    route: &SuggestedRoute,
    theme: Theme,
    context: &RealtimeContext,
    previous_story: Option<&str>,
) -> String {
    let mut prompt = format!(
        "You are a storyteller for a walking tour app.\n\
         Theme: {}\n\
         Route: {}\n\
         Spots in order: {}\n\
         Weather: {}\n\
         Time of day: {}\n",
        theme.display_name(),
        route.name,
        spot_names(route),
        context.weather_or_default(),
        context.time_of_day_or_default(),
    );

    if let Some(previous) = previous_story {
        prompt.push_str(&format!(
            "The walker changed course mid-walk. Continue this story without restarting it:\n{}\n",
            previous
        ));
    }

    prompt.push_str(
        "Reply in exactly this format:\n\
         Title: <a title under 30 characters>\n\
         Story: <a story of 2-3 sentences matching the theme, weather and time of day>",
    );
    prompt
}

/// Parse a `Title: ... / Story: ...` reply. Story text may span lines.
pub fn parse_narrative(text: &str) -> Option<Narrative> {
    let mut title = None;
    let mut story_lines: Vec<&str> = Vec::new();
    let mut in_story = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Title:") {
            title = Some(rest.trim().to_string());
            in_story = false;
        } else if let Some(rest) = trimmed.strip_prefix("Story:") {
            story_lines.push(rest.trim());
            in_story = true;
        } else if in_story && !trimmed.is_empty() {
            story_lines.push(trimmed);
        }
    }

    let title = title.filter(|t| !t.is_empty())?;
    let story = story_lines.join(" ");
    if story.is_empty() {
        return None;
    }
    Some(Narrative { title, story })
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        GeminiClient {
            client: Client::new(),
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiClient {
    async fn generate_title_and_story(
        &self,
        route: &SuggestedRoute,
        theme: Theme,
        context: &RealtimeContext,
        previous_story: Option<&str>,
    ) -> Result<Narrative> {
        let prompt = build_prompt(route, theme, context, previous_story);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(model = %self.model, route = %route.name, "Gemini narrative request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .map_err(|e| AppError::NarrativeApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::NarrativeApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::NarrativeApi(format!("Failed to parse response: {}", e)))?;

        let text = body
            .text()
            .ok_or_else(|| AppError::NarrativeApi("Empty candidate list".to_string()))?;

        parse_narrative(&text)
            .ok_or_else(|| AppError::NarrativeApi("Reply missing title or story".to_string()))
    }
}

/// Offline narrator used when no model API key is configured
pub struct TemplateNarrator;

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    async fn generate_title_and_story(
        &self,
        route: &SuggestedRoute,
        theme: Theme,
        context: &RealtimeContext,
        previous_story: Option<&str>,
    ) -> Result<Narrative> {
        let mut story = format!(
            "A {} {} walk through {}, about {} minutes on a {} day.",
            context.time_of_day_or_default(),
            theme.display_name().to_lowercase(),
            spot_names(route),
            route.total_duration_minutes,
            context.weather_or_default(),
        );
        if let Some(previous) = previous_story {
            story = format!("{} {}", previous.trim_end(), story);
        }
        Ok(Narrative {
            title: route.name.clone(),
            story,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Poi, PoiCategory};

    fn route() -> SuggestedRoute {
        let at = Coordinates::new(35.0, 135.77).unwrap();
        SuggestedRoute {
            name: "[Park Tour] Nature - Maruyama Park to Kamo River (42 min)".into(),
            pois: vec![
                Poi::new("a", "Maruyama Park", at, &[PoiCategory::Park], 4.4),
                Poi::new("b", "Kamo River", at, &[PoiCategory::NaturalFeature], 4.6),
            ],
            total_duration_minutes: 42,
            polyline: String::new(),
        }
    }

    #[test]
    fn test_parse_narrative() {
        let text = "Title: Green Kyoto\nStory: Start under the trees.\nThen follow the water.";
        let narrative = parse_narrative(text).unwrap();
        assert_eq!(narrative.title, "Green Kyoto");
        assert_eq!(narrative.story, "Start under the trees. Then follow the water.");
    }

    #[test]
    fn test_parse_narrative_rejects_missing_parts() {
        assert!(parse_narrative("Title: Only a title").is_none());
        assert!(parse_narrative("Story: no title here").is_none());
    }

    #[test]
    fn test_prompt_defaults_and_continuation() {
        let prompt = build_prompt(&route(), Theme::Nature, &RealtimeContext::default(), None);
        assert!(prompt.contains("Weather: sunny"));
        assert!(prompt.contains("Time of day: daytime"));
        assert!(prompt.contains("Maruyama Park, Kamo River"));
        assert!(!prompt.contains("changed course"));

        let ctx = RealtimeContext {
            weather: Some("rainy".into()),
            time_of_day: Some("evening".into()),
        };
        let prompt = build_prompt(&route(), Theme::Nature, &ctx, Some("Earlier story."));
        assert!(prompt.contains("Weather: rainy"));
        assert!(prompt.contains("Earlier story."));
    }

    #[test]
    fn test_fallbacks() {
        let fallback = fallback_narrative(&route());
        assert_eq!(fallback.title, route().name);
        assert!(fallback.story.contains("Maruyama Park, Kamo River"));

        assert_eq!(
            continuation_fallback("We crossed the bridge."),
            "We crossed the bridge. New discoveries are enriching your walk."
        );
        assert_eq!(continuation_fallback(""), STORY_CONTINUATION_FALLBACK);
    }

    #[test]
    fn test_gemini_response_text() {
        let body: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Title: A\n"},{"text":"Story: B"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().unwrap(), "Title: A\nStory: B");

        let empty: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.text().is_none());
    }

    #[tokio::test]
    async fn test_template_narrator_uses_context() {
        let ctx = RealtimeContext {
            weather: Some("cloudy".into()),
            time_of_day: None,
        };
        let narrative = TemplateNarrator
            .generate_title_and_story(&route(), Theme::Nature, &ctx, Some("Before."))
            .await
            .unwrap();
        assert_eq!(narrative.title, route().name);
        assert!(narrative.story.starts_with("Before. "));
        assert!(narrative.story.contains("cloudy"));
    }
}
