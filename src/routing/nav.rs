//! Navigation helper: carry allow-listed session parameters across links.

use url::form_urlencoded;

use super::RoutingEngine;
use crate::query::SearchParams;

impl RoutingEngine {
    /// Re-attach the configured `[navigation] keep_params` from
    /// `current_search` to `destination`.
    ///
    /// `None` propagates unchanged.
    pub fn keep_vse(&self, current_search: &str, destination: Option<&str>) -> Option<String> {
        destination.map(|destination| {
            keep_params(current_search, destination, &self.config.navigation.keep_params)
        })
    }
}

/// Append each `allowed` parameter present in `current_search` but missing
/// from `destination`.
///
/// The destination is extended, never re-serialized: existing parameters
/// keep their exact spelling and order, and any `#fragment` stays last.
pub fn keep_params<S: AsRef<str>>(current_search: &str, destination: &str, allowed: &[S]) -> String {
    let current = SearchParams::parse(current_search);
    if current.is_empty() {
        return destination.to_string();
    }

    let (head, fragment) = match destination.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (destination, None),
    };
    let existing = SearchParams::parse(head.split_once('?').map_or("", |(_, query)| query));

    let mut carried: Vec<(&str, &str)> = Vec::new();
    for name in allowed.iter().map(AsRef::as_ref) {
        if existing.has(name) || carried.iter().any(|(key, _)| *key == name) {
            continue;
        }
        if let Some(value) = current.get(name) {
            carried.push((name, value));
        }
    }
    if carried.is_empty() {
        return destination.to_string();
    }

    let mut url = head.to_string();
    for (name, value) in carried {
        push_separator(&mut url);
        url.extend(form_urlencoded::byte_serialize(name.as_bytes()));
        if !value.is_empty() {
            url.push('=');
            url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn push_separator(url: &mut String) {
    if !url.contains('?') {
        url.push('?');
    } else if !url.ends_with(['?', '&']) {
        url.push('&');
    }
}
