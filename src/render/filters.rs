//! Template filters registered into the rendering environment.

use minijinja::ErrorKind;
use serde::Serialize;
use serde_json::{Map, Number, Value as Json, ser::PrettyFormatter};
use serde_yaml::Value as Yaml;
use std::string::FromUtf8Error;
use thiserror::Error;

pub const DEFAULT_INDENT: usize = 2;

/// `{{ text | json }}` / `{{ text | json(4) }}`: parse `text` as a single
/// YAML document and pretty-print it as JSON.
pub fn json(input: &str, indent: Option<usize>) -> Result<String, minijinja::Error> {
    yaml_to_json(input, indent.unwrap_or(DEFAULT_INDENT)).map_err(|err| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "cannot convert YAML to JSON")
            .with_source(err)
    })
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON output is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("unsupported YAML construct: {0}")]
    Unsupported(String),
}

/// Convert a YAML document to JSON text indented by `indent` spaces.
///
/// Plain scalars resolve per the YAML 1.2 core schema: `yes`/`on` stay
/// strings, `0o17` is an octal integer, `017` is a string.
pub fn yaml_to_json(input: &str, indent: usize) -> Result<String, ConvertError> {
    let mut doc = if input.trim().is_empty() {
        Yaml::Null
    } else {
        serde_yaml::from_str::<Yaml>(input)?
    };
    doc.apply_merge()?;

    let value = to_json(doc)?;

    let pad = vec![b' '; indent];
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&pad));
    value.serialize(&mut ser)?;

    Ok(String::from_utf8(out)?)
}

fn to_json(value: Yaml) -> Result<Json, ConvertError> {
    Ok(match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => number(&n),
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => {
            Json::Array(items.into_iter().map(to_json).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(mapping) => {
            let mut obj = Map::new();
            for (k, v) in mapping {
                obj.insert(key_text(k)?, to_json(v)?);
            }
            Json::Object(obj)
        }
        Yaml::Tagged(tagged) => {
            return Err(ConvertError::Unsupported(format!("tag {}", tagged.tag)));
        }
    })
}

fn number(n: &serde_yaml::Number) -> Json {
    if let Some(i) = n.as_i64() {
        Json::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Json::Number(u.into())
    } else {
        // Non-finite floats have no JSON form.
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Json::Null, Json::Number)
    }
}

/// JSON object keys are strings; scalar YAML keys become their JSON text.
fn key_text(key: Yaml) -> Result<String, ConvertError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Null => Ok("null".to_owned()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(number(&n).to_string()),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err(ConvertError::Unsupported("non-scalar mapping key".to_owned()))
        }
        Yaml::Tagged(tagged) => Err(ConvertError::Unsupported(format!("tag {}", tagged.tag))),
    }
}
