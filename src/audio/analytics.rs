use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::ResponseFormatError;

/// Speaking rate assumed when the model's duration estimate is unusable.
pub const FALLBACK_WPM: u32 = 150;
pub const FALLBACK_TOPIC: &str = "General Discussion";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    #[serde(deserialize_with = "lenient_count")]
    pub mentions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub word_count: usize,
    pub speaking_speed_wpm: u32,
    pub estimated_duration_minutes: f64,
    pub frequently_mentioned_topics: Vec<Topic>,
}

impl Analytics {
    /// Combines the transcript with the raw duration and topic replies.
    ///
    /// Unusable replies fall back to [`FALLBACK_WPM`] and a single
    /// [`FALLBACK_TOPIC`] entry.
    pub fn from_replies(transcript: &str, duration_reply: &str, topics_reply: &str) -> Self {
        let word_count = word_count(transcript);

        let estimate = parse_duration(duration_reply).and_then(|minutes| {
            speaking_rate(word_count, minutes).map(|wpm| (wpm, minutes))
        });
        let (speaking_speed_wpm, duration) = match estimate {
            Ok(estimate) => estimate,
            Err(err) => {
                warn!("{err}; assuming {FALLBACK_WPM} words per minute");
                (FALLBACK_WPM, word_count as f64 / f64::from(FALLBACK_WPM))
            }
        };

        let frequently_mentioned_topics = parse_topics(topics_reply).unwrap_or_else(|err| {
            warn!("{err}; using a placeholder topic");
            vec![Topic {
                topic: FALLBACK_TOPIC.to_string(),
                mentions: 1,
            }]
        });

        Self {
            word_count,
            speaking_speed_wpm,
            estimated_duration_minutes: round_tenth(duration),
            frequently_mentioned_topics,
        }
    }
}

pub fn word_count(transcript: &str) -> usize {
    transcript.split_whitespace().count()
}

/// Parses a bare number of minutes. Zero, negative and non-finite values are rejected.
pub fn parse_duration(reply: &str) -> Result<f64, ResponseFormatError> {
    let trimmed = reply.trim();
    let minutes = trimmed
        .parse::<f64>()
        .map_err(|_| ResponseFormatError::NonNumericDuration(trimmed.to_string()))?;
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(ResponseFormatError::NonPositiveDuration(minutes));
    }
    Ok(minutes)
}

/// Parses a JSON topic array, tolerating markdown code fences around it.
pub fn parse_topics(reply: &str) -> Result<Vec<Topic>, ResponseFormatError> {
    serde_json::from_str(&strip_code_fences(reply)).map_err(ResponseFormatError::InvalidTopics)
}

pub fn strip_code_fences(reply: &str) -> String {
    reply
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Words per minute for a positive duration. Estimates that round to zero
/// minutes, or rates beyond `u32`, are rejected.
fn speaking_rate(word_count: usize, minutes: f64) -> Result<u32, ResponseFormatError> {
    let rate = (word_count as f64 / minutes).round();
    if round_tenth(minutes) == 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&rate) {
        return Err(ResponseFormatError::ImplausibleDuration(minutes));
    }
    Ok(rate as u32)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Whole(u32),
    Number(f64),
    Text(String),
}

/// Accepts `4`, `4.0` and `"4"`. Fractional, negative or oversized counts are errors.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match CountRepr::deserialize(deserializer)? {
        CountRepr::Whole(count) => return Ok(count),
        CountRepr::Number(value) => value,
        CountRepr::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("'{text}' is not a count")))?,
    };
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("{value} is not a whole count")))
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
