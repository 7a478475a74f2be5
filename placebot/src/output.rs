//! Strict parsing of model completions into schema types.
//!
//! Models often wrap JSON in prose or Markdown code fences. The JSON object
//! is located first, then deserialized without any coercion: a missing
//! field, an unknown field or a mistyped value is a [`ValidationError`].

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ValidationError;
use crate::venue::{Category, ParkingVenue, SushiVenue, Venue};

/// Parse a completion into `T`.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the failing field path when the
/// completion holds no JSON object or the object does not match `T`.
pub fn parse<T: DeserializeOwned>(completion: &str) -> Result<T, ValidationError> {
    let json = extract_json(completion)
        .ok_or_else(|| ValidationError::new("no JSON object found in completion", completion))?;

    let mut de = serde_json::Deserializer::from_str(json);
    let value: T = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        let message = if path == "." {
            e.into_inner().to_string()
        } else {
            format!("{path}: {}", e.into_inner())
        };
        ValidationError::new(message, completion)
    })?;
    de.end()
        .map_err(|e| ValidationError::new(e.to_string(), completion))?;

    Ok(value)
}

/// Parse a completion into the record type of `category`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_venue(category: Category, completion: &str) -> Result<Venue, ValidationError> {
    match category {
        Category::Sushi => parse::<SushiVenue>(completion).map(Venue::from),
        Category::Parking => parse::<ParkingVenue>(completion).map(Venue::from),
    }
}

/// Locate the JSON object in a completion.
///
/// A fenced code block wins unless the text itself starts with `{`.
/// Otherwise the first complete JSON value starting at the first `{` is
/// taken, and whatever follows it is ignored. If that value is malformed the
/// rest of the text is returned so the parser can report the syntax error.
fn extract_json(completion: &str) -> Option<&str> {
    let trimmed = completion.trim();
    if !trimmed.starts_with('{')
        && let Some(block) = fenced_block(trimmed)
    {
        return Some(block);
    }

    let rest = &trimmed[trimmed.find('{')?..];
    let mut values = serde_json::Deserializer::from_str(rest).into_iter::<IgnoredAny>();
    match values.next() {
        Some(Ok(_)) => Some(&rest[..values.byte_offset()]),
        _ => Some(rest),
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string, e.g. "json".
    let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    let block = body[..close].trim();
    (!block.is_empty()).then_some(block)
}
