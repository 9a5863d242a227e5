// Case-insensitive JSON deserialization
//
// Wraps a parsed `serde_json::Value` tree in a `serde::Deserializer` that
// matches struct field names case-insensitively at every nesting level.
// An exact key match always wins; otherwise the first field whose
// serialized name matches the key ignoring ASCII case is used. Everything
// else forwards with ordinary JSON semantics.

use serde::de::value::StrDeserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer,
    MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{Map, Value};

type Error = serde_json::Error;

/// Deserialize `T` out of a parsed `Value` tree with case-insensitive
/// struct field matching.
pub(crate) fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    T::deserialize(ValueDeserializer::new(value))
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                de::Unexpected::Unsigned(u)
            } else if let Some(i) = n.as_i64() {
                de::Unexpected::Signed(i)
            } else {
                de::Unexpected::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

struct ValueDeserializer<'a> {
    value: &'a Value,
}

impl<'a> ValueDeserializer<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }
}

impl<'de, 'a> Deserializer<'de> for ValueDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    visitor.visit_i64(i)
                } else if let Some(u) = n.as_u64() {
                    visitor.visit_u64(u)
                } else if let Some(f) = n.as_f64() {
                    visitor.visit_f64(f)
                } else {
                    Err(de::Error::custom("unrepresentable JSON number"))
                }
            }
            Value::String(s) => visitor.visit_str(s),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer { iter: items.iter() }),
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map, None)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map, Some(fields))),
            _ => Err(de::Error::invalid_type(unexpected(self.value), &visitor)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            _ => Err(de::Error::invalid_type(unexpected(self.value), &visitor)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            // Unit variant spelled as its symbolic name.
            Value::String(s) => visitor.visit_enum(s.as_str().into_deserializer()),
            // `{"Variant": <payload>}` form for data-carrying variants.
            Value::Object(map) => {
                let mut iter = map.iter();
                let Some((variant, value)) = iter.next() else {
                    return Err(de::Error::custom(
                        "expected a single-key object for an enum variant",
                    ));
                };
                if iter.next().is_some() {
                    return Err(de::Error::custom(
                        "expected a single-key object for an enum variant",
                    ));
                }
                visitor.visit_enum(EnumDeserializer {
                    variant: variant.as_str(),
                    value,
                })
            }
            _ => Err(de::Error::invalid_type(unexpected(self.value), &visitor)),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map identifier ignored_any
    }
}

struct SeqDeserializer<'a> {
    iter: std::slice::Iter<'a, Value>,
}

impl<'de, 'a> SeqAccess<'de> for SeqDeserializer<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Error>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'a> {
    iter: serde_json::map::Iter<'a>,
    pending: Option<&'a Value>,
    fields: Option<&'static [&'static str]>,
}

impl<'a> MapDeserializer<'a> {
    fn new(map: &'a Map<String, Value>, fields: Option<&'static [&'static str]>) -> Self {
        Self {
            iter: map.iter(),
            pending: None,
            fields,
        }
    }

    fn resolve_key(&self, key: &'a str) -> &'a str {
        let Some(fields) = self.fields else {
            return key;
        };
        if fields.iter().any(|field| *field == key) {
            return key;
        }
        fields
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(key))
            .unwrap_or(key)
    }
}

impl<'de, 'a> MapAccess<'de> for MapDeserializer<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                let key = self.resolve_key(key);
                seed.deserialize(StrDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(de::Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer<'a> {
    variant: &'a str,
    value: &'a Value,
}

impl<'de, 'a> EnumAccess<'de> for EnumDeserializer<'a> {
    type Error = Error;
    type Variant = VariantDeserializer<'a>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Error>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(StrDeserializer::new(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer<'a> {
    value: &'a Value,
}

impl<'de, 'a> VariantAccess<'de> for VariantDeserializer<'a> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(de::Error::invalid_type(
                unexpected(self.value),
                &"unit variant",
            )),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer { iter: items.iter() }),
            _ => Err(de::Error::invalid_type(
                unexpected(self.value),
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map, Some(fields))),
            _ => Err(de::Error::invalid_type(
                unexpected(self.value),
                &"struct variant",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Inner {
        line_width: f32,
        visible: bool,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Outer {
        name: String,
        inner: Inner,
        tags: Vec<String>,
    }

    fn parse<T: DeserializeOwned>(text: &str) -> T {
        let value: Value = serde_json::from_str(text).unwrap();
        from_value(&value).unwrap()
    }

    #[test]
    fn exact_case_fields() {
        let outer: Outer = parse(
            r#"{"Name": "grid", "Inner": {"LineWidth": 1.5, "Visible": true}, "Tags": ["a"]}"#,
        );
        assert_eq!(outer.name, "grid");
        assert_eq!(outer.inner.line_width, 1.5);
    }

    #[test]
    fn mixed_case_fields_match_at_every_level() {
        let exact: Outer = parse(
            r#"{"Name": "grid", "Inner": {"LineWidth": 1.5, "Visible": true}, "Tags": ["a"]}"#,
        );
        let mixed: Outer = parse(
            r#"{"name": "grid", "INNER": {"linewidth": 1.5, "VISIBLE": true}, "tags": ["a"]}"#,
        );
        assert_eq!(exact, mixed);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let outer: Outer = parse(
            r#"{"Name": "grid", "Inner": {"LineWidth": 1.0, "Visible": false}, "Tags": [], "Legacy": 3}"#,
        );
        assert_eq!(outer.name, "grid");
    }

    #[test]
    fn plain_maps_keep_their_keys_verbatim() {
        let map: HashMap<String, u32> = parse(r#"{"Alpha": 1, "alpha": 2}"#);
        assert_eq!(map.len(), 2);
        assert_eq!(map["Alpha"], 1);
        assert_eq!(map["alpha"], 2);
    }

    #[test]
    fn unit_enum_from_symbolic_name() {
        #[derive(Debug, PartialEq, Deserialize)]
        enum Mode {
            AutoZoom,
            LockZoom,
        }

        let mode: Mode = parse(r#""LockZoom""#);
        assert_eq!(mode, Mode::LockZoom);
    }

    #[test]
    fn enum_variant_names_are_exact() {
        #[derive(Debug, PartialEq, Deserialize)]
        enum Mode {
            AutoZoom,
        }

        let value: Value = serde_json::from_str(r#""autozoom""#).unwrap();
        assert!(from_value::<Mode>(&value).is_err());
    }

    #[test]
    fn struct_variant_fields_are_case_insensitive() {
        #[derive(Debug, PartialEq, Deserialize)]
        enum Source {
            Custom { path: String },
        }

        let source: Source = parse(r#"{"Custom": {"PATH": "/tmp/theme.json"}}"#);
        assert_eq!(
            source,
            Source::Custom {
                path: "/tmp/theme.json".into()
            }
        );
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let value: Value = serde_json::from_str(r#"{"Name": 7, "Inner": {}, "Tags": []}"#).unwrap();
        assert!(from_value::<Outer>(&value).is_err());
    }

    #[test]
    fn numbers_coerce_to_floats() {
        #[derive(Debug, Deserialize)]
        struct F {
            v: f32,
        }

        let f: F = parse(r#"{"v": 3}"#);
        assert_eq!(f.v, 3.0);
    }
}
