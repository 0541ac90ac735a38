use thiserror::Error;

use crate::parameter::{Parameter, Parameters};
use crate::value::Kind;

/// A malformed declaration, or a raw value that cannot be coerced into its
/// slot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("value name is empty")]
    MissingName,

    #[error("value description is empty (value {0})")]
    MissingDescription(String),

    #[error("value has no storage bound (value {0})")]
    NilPointer(String),

    #[error("invalid type: cannot assign {found} to {expected}{}", reason_suffix(.reason))]
    InvalidType {
        expected: Kind,
        found: String,
        /// The underlying parse failure, when the input was text.
        reason: Option<String>,
    },

    #[error("parameter name is empty")]
    EmptyParameterName,
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

/// Broad category of a [`RankfigError`], used to selectively ignore errors
/// while mapping options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedArgument,
    InvalidValue,
    MissingRequiredOption,
    LoadingConfig,
    ParsingConfig,
    Declaration,
}

#[derive(Debug, Error)]
pub enum RankfigError {
    #[error("unexpected argument: {parameters}")]
    UnexpectedArgument { parameters: Parameters },

    #[error("invalid value '{raw}' for {parameters}: {source}")]
    InvalidValue {
        raw: String,
        parameters: Parameters,
        source: ValueError,
    },

    #[error("missing required option: {parameters}")]
    MissingRequiredOption { parameters: Parameters },

    #[error("error loading config from {uri:?}: {reason}")]
    LoadingConfig { uri: String, reason: String },

    #[error("error parsing config {uri:?}: {reason}")]
    ParsingConfig { uri: String, reason: String },

    /// A declaration error lifted with `?` in caller code that returns
    /// `RankfigError`. The library itself never produces this variant.
    #[error(transparent)]
    Declaration(#[from] ValueError),
}

impl RankfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankfigError::UnexpectedArgument { .. } => ErrorKind::UnexpectedArgument,
            RankfigError::InvalidValue { .. } => ErrorKind::InvalidValue,
            RankfigError::MissingRequiredOption { .. } => ErrorKind::MissingRequiredOption,
            RankfigError::LoadingConfig { .. } => ErrorKind::LoadingConfig,
            RankfigError::ParsingConfig { .. } => ErrorKind::ParsingConfig,
            RankfigError::Declaration(_) => ErrorKind::Declaration,
        }
    }

    /// The parameters the error is about, if any.
    pub fn parameters(&self) -> Option<Parameters> {
        match self {
            RankfigError::UnexpectedArgument { parameters }
            | RankfigError::InvalidValue { parameters, .. }
            | RankfigError::MissingRequiredOption { parameters } => Some(parameters.clone()),
            RankfigError::LoadingConfig { uri, .. } | RankfigError::ParsingConfig { uri, .. } => {
                Some(Parameters::from(vec![Parameter::config_file(uri)]))
            }
            RankfigError::Declaration(_) => None,
        }
    }

    /// Short phrase naming what went wrong, without technical detail.
    pub fn cause(&self) -> String {
        match self {
            RankfigError::UnexpectedArgument { .. } => "unexpected argument".into(),
            RankfigError::InvalidValue { raw, .. } => format!("invalid value '{raw}'"),
            RankfigError::MissingRequiredOption { .. } => "missing required option".into(),
            RankfigError::LoadingConfig { .. } | RankfigError::ParsingConfig { .. } => {
                "error loading config".into()
            }
            RankfigError::Declaration(e) => e.to_string(),
        }
    }

    /// User-facing message: `<cause>: [<parameter forms>]`, with environment
    /// variables rendered under `prefix`.
    pub fn format(&self, prefix: &str) -> String {
        match self.parameters() {
            Some(parameters) => format!("{}: {}", self.cause(), parameters.format(prefix)),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Sources;

    #[test]
    fn invalid_type_includes_reason() {
        let err = ValueError::InvalidType {
            expected: Kind::I64,
            found: "\"s\"".into(),
            reason: Some("invalid digit found in string".into()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("invalid type"));
        assert!(msg.contains("i64"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn invalid_type_without_reason() {
        let err = ValueError::InvalidType {
            expected: Kind::String,
            found: "integer".into(),
            reason: None,
        };
        assert_eq!(err.to_string(), "invalid type: cannot assign integer to string");
    }

    #[test]
    fn missing_required_formats_all_forms() {
        let parameters = Parameters::new("required", Sources::ALL_SOURCES).unwrap();
        let err = RankfigError::MissingRequiredOption { parameters };
        assert_eq!(
            err.format("TEST"),
            "missing required option: [JSON key: \"required\", env TEST_REQUIRED, -r, --required]"
        );
    }

    #[test]
    fn loading_errors_name_the_file() {
        let err = RankfigError::LoadingConfig {
            uri: "/does/not/exist".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(err.format(""), "error loading config: [file: /does/not/exist]");
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn declaration_errors_pass_through() {
        let err = RankfigError::from(ValueError::MissingName);
        assert_eq!(err.format("ANY"), "value name is empty");
        assert_eq!(err.kind(), ErrorKind::Declaration);
    }
}
