/* src/server/injector/rust/src/helpers.rs */

use serde_json::Value;

/// Walk a dotted path. Array segments accept numeric indices (`items.0`).
pub(crate) fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
  let mut current = data;
  for key in path.split('.') {
    current = match current {
      Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
      other => other.get(key)?,
    };
  }
  Some(current)
}

/// Text form of a resolved value. `None` for null so callers can treat it
/// as unresolved.
pub(crate) fn stringify(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::Bool(b) => Some(b.to_string()),
    Value::Number(n) => Some(n.to_string()),
    Value::String(s) => Some(s.clone()),
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn resolve_simple_key() {
    let data = json!({"name": "Alan"});
    assert_eq!(resolve("name", &data), Some(&json!("Alan")));
  }

  #[test]
  fn resolve_nested_path() {
    let data = json!({"a": {"b": {"c": 42}}});
    assert_eq!(resolve("a.b.c", &data), Some(&json!(42)));
  }

  #[test]
  fn resolve_array_index() {
    let data = json!({"links": [{"href": "/a"}, {"href": "/b"}]});
    assert_eq!(resolve("links.1.href", &data), Some(&json!("/b")));
    assert_eq!(resolve("links.x.href", &data), None);
  }

  #[test]
  fn resolve_missing_and_partial() {
    assert_eq!(resolve("missing", &json!({})), None);
    assert_eq!(resolve("a.b", &json!({"a": 1})), None);
    assert_eq!(resolve("a.b", &json!({"a": null})), None);
  }

  #[test]
  fn stringify_values() {
    assert_eq!(stringify(&json!(null)), None);
    assert_eq!(stringify(&json!(7)).as_deref(), Some("7"));
    assert_eq!(stringify(&json!(false)).as_deref(), Some("false"));
    assert_eq!(stringify(&json!("<b>x</b>")).as_deref(), Some("<b>x</b>"));
    assert_eq!(stringify(&json!([1, 2])).as_deref(), Some("[1,2]"));
  }
}
