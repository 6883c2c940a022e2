//! Lenient XML-to-value decoding for plugin descriptors
//!
//! `plugin.xml` is decoded into a generic `serde_json::Value` tree the same way
//! lenient XML-to-JSON converters do it: elements become objects, attributes
//! become string-valued keys, repeated child elements collapse into arrays and
//! element text lands under a `"$t"` key. Consumers must therefore treat every
//! repeatable field as either a single object or a sequence; `OneOrMany` is the
//! single normalization point for that ambiguity.

use roxmltree::{Document, Node};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which element text is stored when the element also has
/// attributes or children. Text-only elements decode to a plain string.
pub const TEXT_KEY: &str = "$t";

/// Decoding failure for a plugin descriptor document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid plugin descriptor XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// A field that may decode as one object or a sequence of objects.
///
/// `Many` is declared first: untagged deserialization tries variants in
/// order, and a sequence must never collapse into `One` when `T` is itself a
/// permissive type like `Value`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to an ordered sequence. Selection predicates run on the
    /// result of this, never on the raw shape.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Decode an XML document into a generic value tree.
///
/// The root element becomes the single key of the returned object, so a
/// `<plugin>` document yields `{"plugin": {...}}`.
pub fn decode(xml: &str) -> Result<Value, DocumentError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    let mut map = Map::new();
    map.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(map))
}

/// Qualified name with the original prefix restored, so `android:name`
/// survives the round trip through a namespace-aware parser.
fn qualified_name(node: Node, local: &str, namespace: Option<&str>) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

fn element_to_value(node: Node) -> Value {
    let mut map = Map::new();

    for attr in node.attributes() {
        map.insert(
            qualified_name(node, attr.name(), attr.namespace()),
            Value::String(attr.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let tag = child.tag_name();
            let name = qualified_name(child, tag.name(), tag.namespace());
            let value = element_to_value(child);
            match map.get_mut(&name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    map.insert(name, Value::Array(vec![first, value]));
                }
                None => {
                    map.insert(name, value);
                }
            }
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or(""));
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return Value::String(text.to_string());
    }
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

/// Render a fragment payload back to indented XML.
///
/// Inverse of the decoding convention: string-valued keys become attributes,
/// object/array-valued keys become child elements, `"$t"` becomes text.
/// Used when merging an extracted manifest fragment into an application
/// manifest template.
pub fn encode_fragment(payload: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (name, value) in payload {
        write_element(&mut out, name, value, 0);
    }
    out
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize) {
    let indent = "    ".repeat(depth);
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item, depth);
            }
        }
        Value::Object(map) => {
            out.push_str(&indent);
            out.push('<');
            out.push_str(name);

            for (key, attr) in map {
                if key == TEXT_KEY {
                    continue;
                }
                if let Value::String(text) = attr {
                    out.push_str(&format!(" {}=\"{}\"", key, escape(text)));
                }
            }

            let children: Vec<(&String, &Value)> = map
                .iter()
                .filter(|(key, value)| {
                    key.as_str() != TEXT_KEY
                        && matches!(value, Value::Object(_) | Value::Array(_))
                })
                .collect();
            let text = map.get(TEXT_KEY).and_then(Value::as_str);

            if children.is_empty() && text.is_none() {
                out.push_str(" />\n");
                return;
            }

            out.push_str(">\n");
            if let Some(text) = text {
                out.push_str(&"    ".repeat(depth + 1));
                out.push_str(&escape(text));
                out.push('\n');
            }
            for (child_name, child) in children {
                write_element(out, child_name, child, depth + 1);
            }
            out.push_str(&indent);
            out.push_str(&format!("</{}>\n", name));
        }
        Value::String(text) => {
            out.push_str(&indent);
            out.push_str(&format!("<{}>{}</{}>\n", name, escape(text), name));
        }
        _ => {}
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_attributes_become_keys() {
        let doc = decode(r#"<plugin id="cordova-plugin-test" version="1.0.0"/>"#).unwrap();
        assert_eq!(doc["plugin"]["id"], "cordova-plugin-test");
        assert_eq!(doc["plugin"]["version"], "1.0.0");
    }

    #[test]
    fn test_decode_repeated_children_collapse_to_array() {
        let doc = decode(
            r#"<plugin>
                 <platform name="android"/>
                 <platform name="ios"/>
               </plugin>"#,
        )
        .unwrap();
        let platforms = doc["plugin"]["platform"].as_array().unwrap();
        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[0]["name"], "android");
        assert_eq!(platforms[1]["name"], "ios");
    }

    #[test]
    fn test_decode_single_child_stays_single_object() {
        let doc = decode(r#"<plugin><platform name="android"/></plugin>"#).unwrap();
        assert!(doc["plugin"]["platform"].is_object());
    }

    #[test]
    fn test_decode_text_only_element_becomes_string() {
        let doc = decode(r#"<plugin><name>Device Plugin</name></plugin>"#).unwrap();
        assert_eq!(doc["plugin"]["name"], "Device Plugin");
    }

    #[test]
    fn test_decode_mixed_element_stores_text_under_text_key() {
        let doc = decode(r#"<plugin><name short="dev">Device Plugin</name></plugin>"#).unwrap();
        assert_eq!(doc["plugin"]["name"]["short"], "dev");
        assert_eq!(doc["plugin"]["name"][TEXT_KEY], "Device Plugin");
    }

    #[test]
    fn test_decode_preserves_namespace_prefixes() {
        let doc = decode(
            r#"<plugin xmlns:android="http://schemas.android.com/apk/res/android">
                 <config-file target="AndroidManifest.xml">
                   <uses-permission android:name="android.permission.CAMERA"/>
                 </config-file>
               </plugin>"#,
        )
        .unwrap();
        assert_eq!(
            doc["plugin"]["config-file"]["uses-permission"]["android:name"],
            "android.permission.CAMERA"
        );
    }

    #[test]
    fn test_decode_invalid_xml_is_an_error() {
        assert!(decode("<plugin><unterminated").is_err());
    }

    #[test]
    fn test_one_or_many_normalization() {
        let one: OneOrMany<Value> = serde_json::from_value(json!({"name": "android"})).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: OneOrMany<Value> =
            serde_json::from_value(json!([{"name": "android"}, {"name": "ios"}])).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_encode_fragment_attributes_and_children() {
        let payload = json!({
            "meta-data": {
                "name": "com.example.API_KEY",
                "value": "abc123"
            }
        });
        let rendered = encode_fragment(payload.as_object().unwrap());
        assert_eq!(
            rendered,
            "<meta-data name=\"com.example.API_KEY\" value=\"abc123\" />\n"
        );
    }

    #[test]
    fn test_encode_fragment_arrays_repeat_elements() {
        let payload = json!({
            "uses-permission": [
                { "name": "android.permission.CAMERA" },
                { "name": "android.permission.INTERNET" }
            ]
        });
        let rendered = encode_fragment(payload.as_object().unwrap());
        assert_eq!(rendered.matches("<uses-permission").count(), 2);
    }

    #[test]
    fn test_encode_fragment_escapes_attribute_values() {
        let payload = json!({ "meta-data": { "value": "a<b&\"c\"" } });
        let rendered = encode_fragment(payload.as_object().unwrap());
        assert!(rendered.contains("a&lt;b&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_encode_round_trips_decoded_children() {
        let doc = decode(
            r#"<config-file target="AndroidManifest.xml" parent="/manifest/application">
                 <service name="com.example.SyncService" exported="false"/>
               </config-file>"#,
        )
        .unwrap();
        let mut payload = doc["config-file"].as_object().unwrap().clone();
        payload.remove("target");
        payload.remove("parent");
        let rendered = encode_fragment(&payload);
        assert!(rendered.contains("<service name=\"com.example.SyncService\" exported=\"false\" />"));
    }
}
