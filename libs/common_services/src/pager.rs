use serde_json::Value;
use std::collections::BTreeMap;

/// The filter fields that identify a pager subset. Anything else in the
/// query (page number, tokens, destination data) must not change the hash,
/// otherwise unrelated parameters would shatter the token cache.
pub const FILTER_KEYS: [&str; 4] = ["date_from", "date_to", "is_range", "date_list"];

/// Derives the cache key for a filter set. The whitelisted fields are pulled
/// into an ordered map first so that key order in the incoming query does
/// not matter.
#[must_use]
pub fn filters_hash(filters: &Value) -> String {
    let mut whitelisted = BTreeMap::new();
    if let Some(map) = filters.as_object() {
        for key in FILTER_KEYS {
            match map.get(key) {
                Some(value) if !value.is_null() => {
                    whitelisted.insert(key, value);
                }
                _ => {}
            }
        }
    }

    let canonical = serde_json::to_string(&whitelisted).unwrap_or_default();
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn extraneous_parameters_do_not_change_the_hash() {
        let plain = json!({
            "date_from": "2021-01-01",
            "date_to": "2021-02-01",
            "is_range": true,
        });
        let noisy = json!({
            "is_range": true,
            "date_to": "2021-02-01",
            "date_from": "2021-01-01",
            "page": 4,
            "next_page_token": "CkYauw",
            "destination": "gallery-12",
        });

        assert_eq!(filters_hash(&plain), filters_hash(&noisy));
    }

    #[rstest]
    #[case(json!({"date_from": "2021-01-01"}), json!({"date_from": "2021-01-02"}))]
    #[case(json!({"is_range": true}), json!({"is_range": false}))]
    #[case(
        json!({"date_list": {"year": 2020, "month": 5}}),
        json!({"date_list": {"year": 2020, "month": 6}})
    )]
    fn different_whitelisted_values_hash_differently(#[case] a: Value, #[case] b: Value) {
        assert_ne!(filters_hash(&a), filters_hash(&b));
    }

    #[test]
    fn null_fields_hash_like_absent_fields() {
        let explicit = json!({"date_from": null, "is_range": true});
        let implicit = json!({"is_range": true});

        assert_eq!(filters_hash(&explicit), filters_hash(&implicit));
    }

    #[test]
    fn empty_filters_still_produce_a_key() {
        assert!(!filters_hash(&json!({})).is_empty());
    }
}
