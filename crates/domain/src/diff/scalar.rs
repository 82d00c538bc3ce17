//! Single-value diffs: resource pools and item fields.

use serde_json::Value;

use crate::events::{ChangeEvent, ItemField};
use crate::value_objects::normalize_opt;

/// Report a resource pool change if the normalized values differ.
pub fn diff_resource(
    actor: &str,
    resource: &str,
    old: Option<&Value>,
    new: Option<&Value>,
) -> Option<ChangeEvent> {
    let (old_value, new_value) = (normalize_opt(old), normalize_opt(new));
    (old_value != new_value).then(|| ChangeEvent::ResourceChanged {
        actor: actor.to_string(),
        resource: resource.to_string(),
        old_value,
        new_value,
    })
}

/// Report an item field change if the normalized values differ.
pub fn diff_item_field(
    actor: &str,
    item_name: &str,
    field: ItemField,
    old: Option<&Value>,
    new: Option<&Value>,
) -> Option<ChangeEvent> {
    let (old_value, new_value) = (normalize_opt(old), normalize_opt(new));
    (old_value != new_value).then(|| ChangeEvent::ItemFieldChanged {
        actor: actor.to_string(),
        item_name: item_name.to_string(),
        field,
        old_value,
        new_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_change_is_reported() {
        let event = diff_resource("Ezren", "Focus", Some(&json!(2)), Some(&json!(1)));
        assert_eq!(
            event,
            Some(ChangeEvent::ResourceChanged {
                actor: "Ezren".into(),
                resource: "Focus".into(),
                old_value: 2.0,
                new_value: 1.0,
            })
        );
    }

    #[test]
    fn resource_shape_changes_alone_are_not_reported() {
        let old = json!({ "value": 1, "max": 2 });
        assert_eq!(diff_resource("Ezren", "Focus", Some(&old), Some(&json!(1))), None);
    }

    #[test]
    fn missing_old_value_counts_as_zero() {
        let event = diff_resource("Ezren", "Focus", None, Some(&json!(1)));
        assert!(matches!(event, Some(ChangeEvent::ResourceChanged { old_value, .. }) if old_value == 0.0));
    }

    #[test]
    fn item_field_change_is_reported() {
        let event = diff_item_field(
            "Ezren",
            "Healing Potion",
            ItemField::Quantity,
            Some(&json!(3)),
            Some(&json!(2)),
        );
        assert!(matches!(
            event,
            Some(ChangeEvent::ItemFieldChanged { field: ItemField::Quantity, old_value, new_value, .. })
                if old_value == 3.0 && new_value == 2.0
        ));
    }

    #[test]
    fn unchanged_item_field_produces_nothing() {
        let value = json!(4);
        assert_eq!(
            diff_item_field("Ezren", "Wand", ItemField::Charges, Some(&value), Some(&value)),
            None
        );
    }
}
