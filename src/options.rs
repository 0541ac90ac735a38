//! Raw, untyped input collected from one channel.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;

use crate::parameter::Parameter;
use crate::value::External;

/// A loosely typed input value, before coercion into a slot.
///
/// Flags and environment variables always produce [`Raw::Text`]. Structured
/// files produce whatever their decoder yields; JSON numbers that do not fit
/// an integer arrive as [`Raw::Float`].
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Duration(Duration),
    External(External),
    /// Arrays, tables, nulls: never assignable to a scalar slot.
    Nested { kind: &'static str, text: String },
}

impl Raw {
    /// Short name of the input's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Raw::Bool(_) => "bool",
            Raw::Int(_) | Raw::Uint(_) => "integer",
            Raw::Float(_) => "float",
            Raw::Text(_) => "string",
            Raw::Duration(_) => "duration",
            Raw::External(_) => "external",
            Raw::Nested { kind, .. } => kind,
        }
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Bool(b) => write!(f, "{b}"),
            Raw::Int(i) => write!(f, "{i}"),
            Raw::Uint(u) => write!(f, "{u}"),
            Raw::Float(x) => write!(f, "{x}"),
            Raw::Text(s) => f.write_str(s),
            Raw::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
            Raw::External(e) => write!(f, "{e}"),
            Raw::Nested { text, .. } => f.write_str(text),
        }
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::Text(s.to_string())
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw::Text(s)
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Bool(b)
    }
}

impl From<i64> for Raw {
    fn from(i: i64) -> Self {
        Raw::Int(i)
    }
}

impl From<u64> for Raw {
    fn from(u: u64) -> Self {
        Raw::Uint(u)
    }
}

impl From<f64> for Raw {
    fn from(x: f64) -> Self {
        Raw::Float(x)
    }
}

impl From<Duration> for Raw {
    fn from(d: Duration) -> Self {
        Raw::Duration(d)
    }
}

impl From<External> for Raw {
    fn from(e: External) -> Self {
        Raw::External(e)
    }
}

impl From<serde_json::Value> for Raw {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Bool(b) => Raw::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Raw::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Raw::Uint(u)
                } else {
                    Raw::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Raw::Text(s),
            Value::Null => Raw::Nested {
                kind: "null",
                text: "null".into(),
            },
            Value::Array(_) => Raw::Nested {
                kind: "array",
                text: value.to_string(),
            },
            Value::Object(_) => Raw::Nested {
                kind: "object",
                text: value.to_string(),
            },
        }
    }
}

impl From<toml::Value> for Raw {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::Boolean(b) => Raw::Bool(b),
            Value::Integer(i) => Raw::Int(i),
            Value::Float(x) => Raw::Float(x),
            Value::String(s) => Raw::Text(s),
            Value::Datetime(d) => Raw::Text(d.to_string()),
            Value::Array(_) => Raw::Nested {
                kind: "array",
                text: value.to_string(),
            },
            Value::Table(_) => Raw::Nested {
                kind: "table",
                text: value.to_string(),
            },
        }
    }
}

/// Parameter to raw value pairs gathered from one channel, consumed by a
/// single mapping pass.
///
/// Iteration follows insertion order: argument order for flags, declaration
/// order for environment variables, document order for files. Inserting an
/// existing parameter replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(IndexMap<Parameter, Raw>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter: Parameter, raw: impl Into<Raw>) {
        self.0.insert(parameter, raw.into());
    }

    pub fn get(&self, parameter: &Parameter) -> Option<&Raw> {
        self.0.get(parameter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Parameter, &Raw)> {
        self.0.iter()
    }
}

impl IntoIterator for Options {
    type Item = (Parameter, Raw);
    type IntoIter = indexmap::map::IntoIter<Parameter, Raw>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Parameter, Raw)> for Options {
    fn from_iter<I: IntoIterator<Item = (Parameter, Raw)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders as `[full_name:value, ...]`, sorted by full name.
impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(String, &Raw)> =
            self.0.iter().map(|(p, raw)| (p.full_name(), raw)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let rendered: Vec<String> = entries
            .into_iter()
            .map(|(name, raw)| format!("{name}:{raw}"))
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}
