//! Path lookups and partial-update merging over host JSON data.

use serde_json::{Map, Value};

/// Resolve a slash-separated path (`resources/focus/value`) inside a document.
///
/// Numeric segments index into arrays. An empty path returns the root.
pub fn value_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Apply a host partial update onto `base`.
///
/// Nested objects merge key by key; any other value replaces what was there.
/// A `-=key` entry deletes `key`.
pub fn merge_partial(base: &mut Map<String, Value>, partial: &Map<String, Value>) {
    for (key, value) in partial {
        if let Some(removed) = key.strip_prefix("-=") {
            base.remove(removed);
            continue;
        }
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(patch)) => merge_partial(existing, patch),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
