// src/estimator.rs
//
// Fair-price estimation via the Gemini REST API. This is a boundary
// call: the negotiation engine never depends on it, and every field of
// the response is fallback-filled so a ragged model answer still yields
// a well-formed estimate.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::Listing;
use crate::errors::ServerError;

const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_INSTRUCTION: &str = "\
You are a conservative market analyst specializing in used goods pricing. \
Your job is to provide realistic, buyer-focused market value estimates for \
second-hand marketplace listings. Be CONSERVATIVE - most estimates should be \
10-30% LOWER than asking price (New = 100%, Like New = 80-90%, Good = 60-75%, \
Fair = 40-60%, Poor = 20-40%). Respond with JSON only, with keys \
estimatedPrice (number), priceRange {low, high}, confidence (0-100), \
reasoning (string), marketFactors (string array), conditionImpact (string). \
Remember: your goal is to help buyers avoid overpaying.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    pub estimated_price: f64,
    pub price_range: PriceRange,
    /// 0-100, higher is more confident.
    pub confidence: f64,
    pub reasoning: String,
    pub market_factors: Vec<String>,
    pub condition_impact: String,
}

pub struct Estimator {
    client: Client,
    api_key: String,
    model: String,
}

impl Estimator {
    /// Reads `GEMINI_API_KEY`; without it the estimate endpoint degrades
    /// to an error payload instead of the server refusing to start.
    pub fn from_env() -> Result<Self, ServerError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ServerError::UpstreamError("GEMINI_API_KEY environment variable not set".into())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ServerError::UpstreamError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn estimate(&self, listing: &Listing) -> Result<PriceEstimate, ServerError> {
        const MAX_ATTEMPTS: u64 = 3;
        const MAX_BACKOFF_SECS: u64 = 8;
        const JITTER_MAX_SECS: u64 = 2;

        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let start = std::time::Instant::now();

            match self.try_estimate(listing) {
                Ok(estimate) => {
                    eprintln!(
                        "✅ Estimator success attempt {attempt} in {:?}",
                        start.elapsed()
                    );
                    return Ok(estimate);
                }
                Err(e) => {
                    eprintln!(
                        "⚠️ Estimator attempt {attempt} failed in {:?}: {e}",
                        start.elapsed()
                    );

                    last_err = Some(e);

                    // backoff
                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    std::thread::sleep(Duration::from_secs(base + jitter));
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ServerError::UpstreamError("estimator retry loop failed".into())))
    }

    fn try_estimate(&self, listing: &Listing) -> Result<PriceEstimate, ServerError> {
        let prompt = build_prompt(listing);

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "generationConfig": {
                "temperature": 0.3,
                "topP": 0.8,
                "topK": 32,
                "responseMimeType": "application/json"
            }
        });

        let mut params = HashMap::new();
        params.insert("key", self.api_key.as_str());

        let url = format!("{GEMINI_ENDPOINT}/{}:generateContent", self.model);
        let resp = self
            .client
            .post(&url)
            .query(&params)
            .json(&body)
            .send()
            .map_err(|e| ServerError::UpstreamError(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ServerError::UpstreamError(e.to_string()))?;

        if !status.is_success() {
            return Err(ServerError::UpstreamError(format!(
                "Gemini HTTP {status}: {text}"
            )));
        }

        let envelope: Value = serde_json::from_str(&text)
            .map_err(|e| ServerError::UpstreamError(e.to_string()))?;
        let model_text = envelope["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ServerError::UpstreamError("Gemini response missing candidate text".into())
            })?;

        Ok(estimate_from_model_text(model_text))
    }
}

fn build_prompt(listing: &Listing) -> String {
    format!(
        "ANALYZE THIS LISTING FOR FAIR MARKET VALUE:\n\n\
         Title: {}\n\
         Description: {}\n\
         Condition: {}\n\
         Current Asking Price: {}\n\n\
         Consider comparable items, condition and age, brand reputation, and \
         current market demand. Say whether the asking price is fair, \
         overpriced, or underpriced.",
        listing.title, listing.description, listing.condition, listing.price
    )
}

/// Turns whatever the model produced into a complete estimate. Tries the
/// text as JSON directly, then the outermost `{...}` span (models like to
/// wrap their JSON in prose or fences); each missing or malformed field
/// gets a conservative fallback.
pub fn estimate_from_model_text(text: &str) -> PriceEstimate {
    let parsed: Value = serde_json::from_str(text)
        .ok()
        .or_else(|| {
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            serde_json::from_str(&text[start..=end]).ok()
        })
        .unwrap_or(Value::Null);

    let estimated_price = parsed["estimatedPrice"].as_f64().unwrap_or(0.0).max(0.0);

    let low = parsed["priceRange"]["low"]
        .as_f64()
        .unwrap_or(estimated_price * 0.8)
        .max(0.0);
    let high = parsed["priceRange"]["high"]
        .as_f64()
        .unwrap_or(estimated_price * 1.2)
        .max(0.0);

    let confidence = parsed["confidence"]
        .as_f64()
        .map(|c| c.clamp(0.0, 100.0))
        .unwrap_or(50.0);

    let reasoning = parsed["reasoning"]
        .as_str()
        .unwrap_or("Analysis unavailable")
        .to_string();

    let market_factors = parsed["marketFactors"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec!["Market analysis unavailable".to_string()]);

    let condition_impact = parsed["conditionImpact"]
        .as_str()
        .unwrap_or("Condition impact analysis unavailable")
        .to_string();

    PriceEstimate {
        estimated_price,
        price_range: PriceRange { low, high },
        confidence,
        reasoning,
        market_factors,
        condition_impact,
    }
}
