//! Addressable names for a setting, one per channel.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::error::ValueError;
use crate::source::{Source, Sources};

/// One name through which a setting can be reached on one channel.
///
/// Identity is the `(name, sources)` pair. `stub` is the environment prefix,
/// injected just before resolution and ignored for equality.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    pub name: String,
    pub sources: Sources,
    pub stub: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            sources: source.as_set(),
            stub: String::new(),
        }
    }

    /// A parameter accepting any channel in `sources`.
    pub fn accepting(name: impl Into<String>, sources: Sources) -> Self {
        Self {
            name: name.into(),
            sources,
            stub: String::new(),
        }
    }

    /// The reserved parameter naming an external configuration file.
    pub fn config_file(uri: impl Into<String>) -> Self {
        Self::new(uri, Source::ConfigFile)
    }

    /// The concrete channel, when this parameter names exactly one.
    pub fn source(&self) -> Option<Source> {
        self.sources.single()
    }

    /// The name as it appears on its channel. Environment variables get the
    /// `<stub>_` prefix and dashes become underscores.
    pub fn full_name(&self) -> String {
        if self.source() != Some(Source::EnvVar) {
            return self.name.clone();
        }
        let name = self.name.replace('-', "_");
        if self.stub.is_empty() {
            name
        } else {
            format!("{}_{name}", self.stub)
        }
    }

    /// True if `other` has the same name and arrives on a channel this
    /// parameter accepts.
    pub fn matches(&self, other: &Parameter) -> bool {
        self.name == other.name && self.sources.intersects(other.sources)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sources == other.sources
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sources.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Some(Source::Flag) => write!(f, "--{}", self.name),
            Some(Source::ShortFlag) => write!(f, "-{}", self.name),
            Some(Source::EnvVar) => write!(f, "env {}", self.full_name()),
            Some(Source::Key) => write!(f, "JSON key: {:?}", self.name),
            Some(Source::ConfigFile) => write!(f, "file: {}", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

/// The parameters of one setting, in channel order: key, environment
/// variable, short flag, long flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Expand a logical name into one parameter per requested channel.
    ///
    /// Keys and long flags use the name verbatim, environment variables the
    /// uppercased name, and short flags its first character.
    pub fn new(name: &str, sources: Sources) -> Result<Self, ValueError> {
        let Some(first) = name.chars().next() else {
            return Err(ValueError::EmptyParameterName);
        };

        let mut parameters = Vec::new();
        if sources.accepts(Source::Key) {
            parameters.push(Parameter::new(name, Source::Key));
        }
        if sources.accepts(Source::EnvVar) {
            parameters.push(Parameter::new(name.to_uppercase(), Source::EnvVar));
        }
        if sources.accepts(Source::ShortFlag) {
            parameters.push(Parameter::new(first.to_string(), Source::ShortFlag));
        }
        if sources.accepts(Source::Flag) {
            parameters.push(Parameter::new(name, Source::Flag));
        }
        Ok(Self(parameters))
    }

    /// Set the environment prefix on every parameter.
    pub fn set_stub(&mut self, stub: &str) {
        for parameter in &mut self.0 {
            parameter.stub = stub.to_string();
        }
    }

    /// Render every form, e.g. `[JSON key: "port", env APP_PORT, -p, --port]`.
    pub fn format(&self, prefix: &str) -> String {
        let forms: Vec<String> = self
            .0
            .iter()
            .map(|p| {
                let mut p = p.clone();
                p.stub = prefix.to_string();
                p.to_string()
            })
            .collect();
        format!("[{}]", forms.join(", "))
    }
}

impl Deref for Parameters {
    type Target = [Parameter];

    fn deref(&self) -> &[Parameter] {
        &self.0
    }
}

impl From<Vec<Parameter>> for Parameters {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self(parameters)
    }
}

impl<'p> IntoIterator for &'p Parameters {
    type Item = &'p Parameter;
    type IntoIter = std::slice::Iter<'p, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders with each parameter's own stub.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forms: Vec<String> = self.0.iter().map(Parameter::to_string).collect();
        write!(f, "[{}]", forms.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_all_sources_in_channel_order() {
        let p = Parameters::new("param", Sources::ALL_SOURCES).unwrap();
        assert_eq!(p.to_string(), "[JSON key: \"param\", env PARAM, -p, --param]");
    }

    #[test]
    fn format_applies_prefix() {
        let p = Parameters::new("param", Sources::ALL_SOURCES).unwrap();
        assert_eq!(
            p.format("STUB"),
            "[JSON key: \"param\", env STUB_PARAM, -p, --param]"
        );
    }

    #[test]
    fn no_sources_yields_no_parameters() {
        let p = Parameters::new("param", Sources::empty()).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.format(""), "[]");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            Parameters::new("", Sources::empty()),
            Err(ValueError::EmptyParameterName)
        );
    }

    #[test]
    fn short_flag_uses_first_char() {
        let p = Parameters::new("über", Sources::SHORT_FLAG).unwrap();
        assert_eq!(p[0].name, "ü");
    }

    #[test]
    fn full_name_with_and_without_stub() {
        let mut p = Parameter::new("TEST", Source::EnvVar);
        assert_eq!(p.full_name(), "TEST");
        p.stub = "A".into();
        assert_eq!(p.full_name(), "A_TEST");
    }

    #[test]
    fn full_name_normalizes_dashes() {
        let mut p = Parameter::new("DASH-TEST", Source::EnvVar);
        p.stub = "A".into();
        assert_eq!(p.full_name(), "A_DASH_TEST");
    }

    #[test]
    fn full_name_ignores_stub_off_env() {
        let mut p = Parameter::new("dash-test", Source::Flag);
        p.stub = "A".into();
        assert_eq!(p.full_name(), "dash-test");
    }

    #[test]
    fn matches_within_accepted_set() {
        let all = Parameter::accepting("param", Sources::ALL_SOURCES);
        let flag = Parameter::new("param", Source::Flag);
        let short = Parameter::new("param", Source::ShortFlag);

        assert!(all.matches(&flag));
        assert!(!flag.matches(&short));
        assert!(flag.matches(&all));
        assert!(!short.matches(&flag));
        assert!(flag.matches(&flag.clone()));
    }

    #[test]
    fn matches_requires_same_name() {
        let a = Parameter::new("a", Source::Flag);
        let b = Parameter::new("b", Source::Flag);
        assert!(!a.matches(&b));
    }

    #[test]
    fn equality_ignores_stub() {
        let mut a = Parameter::new("TEST", Source::EnvVar);
        let b = Parameter::new("TEST", Source::EnvVar);
        a.stub = "X".into();
        assert_eq!(a, b);
    }

    #[test]
    fn display_per_channel() {
        assert_eq!(Parameter::new("name", Source::Flag).to_string(), "--name");
        assert_eq!(Parameter::new("n", Source::ShortFlag).to_string(), "-n");
        assert_eq!(Parameter::new("name", Source::Key).to_string(), "JSON key: \"name\"");
        assert_eq!(Parameter::config_file("a.json").to_string(), "file: a.json");
        assert_eq!(
            Parameter::accepting("/invalid", Sources::COMMAND_LINE).to_string(),
            "/invalid"
        );
    }
}
