//! The page-grouped wire transform.
//!
//! The document API persists field layouts as `[{pageNumber, pos: [...]}]`
//! where each bucket's fields omit their page number. The editor works on a
//! flat list tagged with pages. This module is the single bidirectional
//! mapping between the two shapes; both the load and the save path go
//! through it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{Field, PlacedField};

/// One page's bucket of fields in the wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    pub pos: Vec<PlacedField>,
}

/// Group a flat field list into page buckets, ordered by page number.
/// Within a bucket, fields keep their relative order from the input.
/// Pages without fields produce no bucket.
pub fn group_by_page(fields: Vec<Field>) -> Vec<Placeholder> {
    let mut by_page: BTreeMap<u32, Vec<PlacedField>> = BTreeMap::new();
    for field in fields {
        let (page, placed) = field.into_placed();
        by_page.entry(page).or_default().push(placed);
    }
    by_page
        .into_iter()
        .map(|(page_number, pos)| Placeholder { page_number, pos })
        .collect()
}

/// Flatten page buckets back into a tagged field list, reattaching each
/// bucket's page number to its fields.
pub fn flatten_placeholders(placeholders: Vec<Placeholder>) -> Vec<Field> {
    placeholders
        .into_iter()
        .flat_map(|bucket| {
            let page = bucket.page_number;
            bucket.pos.into_iter().map(move |placed| placed.into_field(page))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldOptions};
    use pretty_assertions::assert_eq;

    fn field(key: &str, page: u32) -> Field {
        Field {
            key: key.into(),
            kind: FieldKind::Text,
            x_position: 10.0,
            y_position: 20.0,
            width: 200.0,
            height: 50.0,
            page_number: page,
            recipient_id: Some("recipient-current-user".into()),
            response: None,
            options: FieldOptions::generated(FieldKind::Text, key),
        }
    }

    #[test]
    fn groups_in_page_order_preserving_bucket_order() {
        let grouped = group_by_page(vec![field("f3", 3), field("f1", 1), field("f2", 1)]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].page_number, 1);
        assert_eq!(grouped[0].pos.len(), 2);
        assert_eq!(grouped[0].pos[0].key, "f1");
        assert_eq!(grouped[0].pos[1].key, "f2");
        assert_eq!(grouped[1].page_number, 3);
        assert_eq!(grouped[1].pos[0].key, "f3");
    }

    #[test]
    fn flatten_reattaches_page_numbers() {
        let original = vec![field("a", 2), field("b", 2), field("c", 5)];
        let flat = flatten_placeholders(group_by_page(original.clone()));

        assert_eq!(flat.len(), 3);
        for restored in &flat {
            let source = original.iter().find(|f| f.key == restored.key).unwrap();
            assert_eq!(restored, source);
        }
    }

    #[test]
    fn wire_shape_matches_contract() {
        let grouped = group_by_page(vec![field("f1", 1), field("f2", 1), field("f3", 3)]);
        let json = serde_json::to_value(&grouped).unwrap();

        assert_eq!(json[0]["pageNumber"], 1);
        assert_eq!(json[0]["pos"].as_array().unwrap().len(), 2);
        assert!(json[0]["pos"][0].get("pageNumber").is_none());
        assert_eq!(json[1]["pageNumber"], 3);
    }

    #[test]
    fn empty_list_round_trips() {
        assert!(group_by_page(Vec::new()).is_empty());
        assert!(flatten_placeholders(Vec::new()).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::field::{FieldKind, FieldOptions};
    use proptest::prelude::*;

    fn arb_kind() -> impl Strategy<Value = FieldKind> {
        prop_oneof![
            Just(FieldKind::Signature),
            Just(FieldKind::Initials),
            Just(FieldKind::Stamp),
            Just(FieldKind::Text),
            Just(FieldKind::Date),
            Just(FieldKind::Checkbox),
        ]
    }

    fn arb_field() -> impl Strategy<Value = Field> {
        (
            arb_kind(),
            0.0f64..1000.0,
            0.0f64..1000.0,
            20.0f64..400.0,
            20.0f64..400.0,
            1u32..10,
            proptest::option::of("[a-z]{4,12}"),
            proptest::option::of("[A-Za-z ]{1,20}"),
        )
            .prop_map(|(kind, x, y, w, h, page, recipient, response)| Field {
                key: String::new(),
                kind,
                x_position: x,
                y_position: y,
                width: w,
                height: h,
                page_number: page,
                recipient_id: recipient,
                response,
                options: FieldOptions::default(),
            })
    }

    fn arb_fields() -> impl Strategy<Value = Vec<Field>> {
        // Keys are unique within a document; number them after generation.
        prop::collection::vec(arb_field(), 0..24).prop_map(|fields| {
            fields
                .into_iter()
                .enumerate()
                .map(|(i, mut field)| {
                    field.key = format!("field-{i}");
                    field.options = FieldOptions::generated(field.kind, &field.key);
                    field
                })
                .collect()
        })
    }

    proptest! {
        /// Grouping then flattening loses no field and no attribute.
        #[test]
        fn round_trip_is_lossless(fields in arb_fields()) {
            let mut flat = flatten_placeholders(group_by_page(fields.clone()));

            prop_assert_eq!(flat.len(), fields.len());
            flat.sort_by(|a, b| a.key.cmp(&b.key));
            let mut expected = fields;
            expected.sort_by(|a, b| a.key.cmp(&b.key));
            prop_assert_eq!(flat, expected);
        }

        /// The grouping transform is idempotent: regrouping a flattened
        /// grouping reproduces the same buckets.
        #[test]
        fn grouping_is_idempotent(fields in arb_fields()) {
            let once = group_by_page(fields);
            let twice = group_by_page(flatten_placeholders(once.clone()));
            prop_assert_eq!(once, twice);
        }

        /// Buckets are sorted by page and contain only their own page's
        /// fields.
        #[test]
        fn buckets_are_sorted_and_nonempty(fields in arb_fields()) {
            let grouped = group_by_page(fields);
            for window in grouped.windows(2) {
                prop_assert!(window[0].page_number < window[1].page_number);
            }
            for bucket in &grouped {
                prop_assert!(!bucket.pos.is_empty());
            }
        }
    }
}
