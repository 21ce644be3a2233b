//! Normalization of discovery API responses into [`Item`]s.
//!
//! Provider payloads are untrusted: any level of the expected structure may
//! be missing, `null`, or of the wrong type. Each probe degrades only the
//! field it feeds; nothing in this module returns an error.

use std::collections::BTreeSet;

use eventscout_core::Item;
use serde_json::Value;

const ADDRESS_LINE_KEYS: [&str; 3] = ["line1", "line2", "line3"];

/// Parses a raw response body and normalizes every event it contains.
///
/// Returns an empty list when the body is not JSON or lacks the
/// `_embedded.events` array (the shape of provider error payloads).
#[must_use]
pub fn normalize_events(raw_body: &str) -> Vec<Item> {
    match serde_json::from_str::<Value>(raw_body) {
        Ok(document) => normalize_document(&document),
        Err(error) => {
            tracing::debug!(%error, "discovery response body is not valid JSON");
            Vec::new()
        }
    }
}

/// Normalizes an already-parsed response document.
///
/// Events are emitted in array order. Entries that are not JSON objects are
/// skipped.
#[must_use]
pub fn normalize_document(document: &Value) -> Vec<Item> {
    let Some(events) = child(document, "_embedded")
        .and_then(|embedded| child(embedded, "events"))
        .and_then(Value::as_array)
    else {
        tracing::debug!("discovery response has no _embedded.events array");
        return Vec::new();
    };

    let items: Vec<Item> = events
        .iter()
        .filter(|event| event.is_object())
        .map(normalize_event)
        .collect();
    tracing::debug!(
        events = events.len(),
        items = items.len(),
        "normalized discovery events"
    );
    items
}

fn normalize_event(event: &Value) -> Item {
    let mut builder = Item::builder();
    if let Some(id) = string_field(event, "id") {
        builder.item_id(id);
    }
    if let Some(name) = string_field(event, "name") {
        builder.name(name);
    }
    if let Some(url) = string_field(event, "url") {
        builder.url(url);
    }
    if let Some(distance) = child(event, "distance").and_then(Value::as_f64) {
        builder.distance(distance);
    }
    builder
        .address(extract_address(event))
        .categories(extract_categories(event))
        .image_url(extract_image_url(event));
    builder.build()
}

/// Returns the first venue whose assembled address line is non-empty.
///
/// Later venues are consulted only when every earlier one yields nothing.
fn extract_address(event: &Value) -> String {
    array_field(child(event, "_embedded"), "venues")
        .map(venue_address_line)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// Joins `address.line1..3` and `city.name` with commas, skipping absent or
/// empty parts.
fn venue_address_line(venue: &Value) -> String {
    let address = child(venue, "address");
    let mut parts: Vec<&str> = ADDRESS_LINE_KEYS
        .iter()
        .filter_map(|key| address.and_then(|a| non_empty_field(a, key)))
        .collect();
    if let Some(city) = child(venue, "city").and_then(|c| non_empty_field(c, "name")) {
        parts.push(city);
    }
    parts.join(",")
}

/// First image entry carrying a `url` wins, even an empty one; no resolution
/// preference.
fn extract_image_url(event: &Value) -> String {
    array_field(Some(event), "images")
        .find_map(|image| string_field(image, "url"))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Collects `segment.name` across all classifications. Repeats collapse.
fn extract_categories(event: &Value) -> BTreeSet<String> {
    array_field(Some(event), "classifications")
        .filter_map(|classification| child(classification, "segment"))
        .filter_map(|segment| string_field(segment, "name"))
        .map(str::to_string)
        .collect()
}

/// Child value under `key`, treating an explicit `null` as absent.
fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// String under `key`; an empty string still counts as present.
fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    child(value, key).and_then(Value::as_str)
}

fn non_empty_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    string_field(value, key).filter(|s| !s.is_empty())
}

/// Elements of the array under `key`, or nothing if any step is missing.
fn array_field<'a>(value: Option<&'a Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .and_then(|v| child(v, key))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
