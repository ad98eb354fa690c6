//! Tolerant traversal of parsed page data
//!
//! Page data has no fixed schema and changes between regions and seasons,
//! so every lookup goes through [`dig`]: a miss is never an error, it is a
//! `None` (or the caller's default) plus a debug log line.
//!
//! ```
//! use serde_json::json;
//! use southpark_core::path;
//! use southpark_core::path::dig_str;
//!
//! let data = json!({"children": [{"type": "Header"}, {"type": "MainContainer", "id": "m"}]});
//! assert_eq!(dig_str(&data, &path!["children", "type|MainContainer", "id"]), "m");
//! assert_eq!(dig_str(&data, &path!["children", 5usize, "id"]), "");
//! ```

use std::fmt;

use serde_json::Value;
use tracing::debug;

/// One step of a lookup path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    /// Mapping key
    Key(&'p str),
    /// Sequence index
    Index(usize),
    /// First mapping in a sequence whose `field` equals `value`
    Match {
        /// Field compared on each element
        field: &'p str,
        /// Expected string value
        value: &'p str,
    },
}

impl<'p> From<&'p str> for Segment<'p> {
    /// `"field|value"` becomes [`Segment::Match`], anything else a key
    fn from(s: &'p str) -> Self {
        match s.split_once('|') {
            Some((field, value)) => Segment::Match { field, value },
            None => Segment::Key(s),
        }
    }
}

impl From<usize> for Segment<'_> {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "\"{}\"", key),
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Match { field, value } => write!(f, "\"{}|{}\"", field, value),
        }
    }
}

/// Build a `[Segment; N]` lookup path from keys, indices and `field|value` selectors
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        [$($crate::path::Segment::from($segment)),*]
    };
}

/// Walk `root` along `path`
///
/// Returns `None` when any step misses: the current value is a scalar, a key
/// is absent, an index is out of bounds, or a `field|value` selector finds no
/// match. A selector also misses as soon as it meets an element lacking
/// `field`. Applied to a mapping, a selector is looked up as a literal key.
/// An empty path yields `root` itself.
pub fn dig<'a>(root: &'a Value, path: &[Segment<'_>]) -> Option<&'a Value> {
    let mut current = root;

    for segment in path {
        let next = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(*key),
            (Segment::Index(index), Value::Array(items)) => items.get(*index),
            (Segment::Match { field, value }, Value::Array(items)) => {
                find_match(items, field, value)
            }
            (Segment::Match { field, value }, Value::Object(map)) => {
                map.get(&format!("{}|{}", field, value))
            }
            _ => None,
        };

        match next {
            Some(value) => current = value,
            None => {
                debug!("not found: {} -> {}", segment, format_path(path));
                return None;
            }
        }
    }

    Some(current)
}

/// Like [`dig`], answering misses with `default`
pub fn dig_or<'a>(root: &'a Value, path: &[Segment<'_>], default: &'a Value) -> &'a Value {
    dig(root, path).unwrap_or(default)
}

/// Look up a text field, defaulting to an empty string
///
/// Numbers and booleans are rendered as text; null, arrays and objects
/// count as missing.
pub fn dig_str(root: &Value, path: &[Segment<'_>]) -> String {
    match dig(root, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Look up a sequence, defaulting to an empty slice
pub fn dig_array<'a>(root: &'a Value, path: &[Segment<'_>]) -> &'a [Value] {
    match dig(root, path) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

fn find_match<'a>(items: &'a [Value], field: &str, value: &str) -> Option<&'a Value> {
    for item in items {
        match item.get(field) {
            None => return None,
            Some(Value::String(s)) if s == value => return Some(item),
            Some(_) => {}
        }
    }
    None
}

fn format_path(path: &[Segment<'_>]) -> String {
    let parts: Vec<String> = path.iter().map(|s| s.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "children": [
                {"type": "Header"},
                {
                    "type": "MainContainer",
                    "children": [
                        {"type": "SeasonSelector", "props": {"items": [{"url": "/s/1"}]}},
                        {"type": "LineList", "props": {"items": []}}
                    ]
                }
            ],
            "count": 3,
            "flag": true
        })
    }

    #[test]
    fn test_empty_path_returns_root() {
        let data = sample();
        assert_eq!(dig(&data, &[]), Some(&data));

        let scalar = json!("plain");
        assert_eq!(dig(&scalar, &[]), Some(&scalar));
    }

    #[test]
    fn test_nested_lookup() {
        let data = sample();
        let found = dig(
            &data,
            &path![
                "children",
                "type|MainContainer",
                "children",
                "type|SeasonSelector",
                "props",
                "items",
                0usize,
                "url"
            ],
        );
        assert_eq!(found, Some(&json!("/s/1")));
    }

    #[test]
    fn test_missing_key() {
        let data = sample();
        assert_eq!(dig(&data, &path!["nope"]), None);
        assert_eq!(dig_str(&data, &path!["nope", "deeper"]), "");
    }

    #[test]
    fn test_index_out_of_bounds() {
        let data = sample();
        assert_eq!(dig(&data, &path!["children", 2usize]), None);
    }

    #[test]
    fn test_descent_into_scalar_fails() {
        let data = sample();
        assert_eq!(dig(&data, &path!["count", "x"]), None);
        assert_eq!(dig(&data, &path!["count", 0usize]), None);
    }

    #[test]
    fn test_key_on_sequence_fails() {
        let data = sample();
        assert_eq!(dig(&data, &path!["children", "type"]), None);
    }

    #[test]
    fn test_match_returns_first_equal() {
        let items = json!([
            {"type": "A", "n": 1},
            {"type": "B", "n": 2},
            {"type": "B", "n": 3}
        ]);
        assert_eq!(dig(&items, &path!["type|B", "n"]), Some(&json!(2)));
    }

    #[test]
    fn test_match_no_element_matches() {
        let items = json!([{"type": "A"}, {"type": "C"}]);
        assert_eq!(dig(&items, &path!["type|B"]), None);
    }

    #[test]
    fn test_match_element_missing_field() {
        let items = json!([{"type": "A"}, {"other": 1}, {"type": "B"}]);
        assert_eq!(dig(&items, &path!["type|B"]), None);

        // a match found before the incomplete element still wins
        let items = json!([{"type": "B"}, {"other": 1}]);
        assert_eq!(dig(&items, &path!["type|B"]), Some(&json!({"type": "B"})));
    }

    #[test]
    fn test_match_compares_strings_only() {
        let items = json!([{"n": 1}]);
        assert_eq!(dig(&items, &path!["n|1"]), None);
    }

    #[test]
    fn test_match_on_mapping_is_literal_key() {
        let data = json!({"a|b": 7});
        assert_eq!(dig(&data, &path!["a|b"]), Some(&json!(7)));
    }

    #[test]
    fn test_dig_or_default() {
        let data = sample();
        let default = json!([]);
        assert_eq!(dig_or(&data, &path!["missing"], &default), &default);
        assert_eq!(dig_or(&data, &path!["count"], &default), &json!(3));
    }

    #[test]
    fn test_dig_str_renders_scalars() {
        let data = sample();
        assert_eq!(dig_str(&data, &path!["count"]), "3");
        assert_eq!(dig_str(&data, &path!["flag"]), "true");
        assert_eq!(dig_str(&data, &path!["children"]), "");
        assert_eq!(dig_str(&json!({"x": null}), &path!["x"]), "");
    }

    #[test]
    fn test_dig_array() {
        let data = sample();
        assert_eq!(dig_array(&data, &path!["children"]).len(), 2);
        assert!(dig_array(&data, &path!["count"]).is_empty());
        assert!(dig_array(&data, &path!["missing"]).is_empty());
    }

    #[test]
    fn test_segment_from_str() {
        assert_eq!(Segment::from("key"), Segment::Key("key"));
        assert_eq!(
            Segment::from("type|LineList"),
            Segment::Match {
                field: "type",
                value: "LineList"
            }
        );
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-c|]{0,3}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_dig_never_panics(
            data in arb_json(),
            keys in prop::collection::vec("[a-c|]{0,4}", 0..5),
            index in 0usize..5,
        ) {
            let mut segments: Vec<Segment<'_>> = keys.iter().map(|k| Segment::from(k.as_str())).collect();
            segments.push(Segment::Index(index));
            let default = Value::Null;
            let _ = dig_or(&data, &segments, &default);
            let _ = dig_str(&data, &segments);
        }

        #[test]
        fn prop_found_value_is_reachable_again(data in arb_json(), key in "[a-c]{1,2}") {
            let segments = [Segment::Key(key.as_str())];
            if let Some(found) = dig(&data, &segments) {
                prop_assert_eq!(Some(found), data.get(key.as_str()));
            }
        }
    }
}
