//! Settings bind a [`Value`] to the [`Parameters`] that may set it, and apply
//! incoming options under the precedence rule.

use tracing::trace;

use crate::error::{ErrorKind, RankfigError, ValueError};
use crate::mask::{self, Mask};
use crate::options::{Options, Raw};
use crate::parameter::{Parameter, Parameters};
use crate::source::{Source, Sources};
use crate::value::{Scalar, Value};

/// A [`Value`], the parameters that may set it, and how to report it.
#[derive(Debug, Default)]
pub struct Setting<'a> {
    pub value: Value<'a>,
    pub parameters: Parameters,
    pub mask: Mask,
}

impl<'a> Setting<'a> {
    /// A setting that falls back to `default` when no channel supplies it.
    ///
    /// `param` is expanded into one parameter per channel in `sources` (see
    /// [`Parameters::new`]). The default is written to `target` immediately.
    pub fn optional<T: Scalar>(
        name: &str,
        param: &str,
        target: &'a mut T,
        default: T,
        sources: Sources,
        mask: Mask,
        description: &str,
    ) -> Result<Self, ValueError> {
        Ok(Self {
            value: Value::new(name, description, target, Some(default))?,
            parameters: Parameters::new(param, sources)?,
            mask,
        })
    }

    /// A setting that must be supplied by one of its parameters.
    pub fn required<T: Scalar>(
        name: &str,
        param: &str,
        target: &'a mut T,
        sources: Sources,
        mask: Mask,
        description: &str,
    ) -> Result<Self, ValueError> {
        Ok(Self {
            value: Value::new(name, description, target, None)?,
            parameters: Parameters::new(param, sources)?,
            mask,
        })
    }

    /// True if one of this setting's parameters matches `parameter` and the
    /// incoming channel strictly outranks the current provenance.
    pub fn accepts(&self, parameter: &Parameter) -> bool {
        let Some(incoming) = parameter.source() else {
            return false;
        };
        self.parameters.iter().any(|p| p.matches(parameter))
            && self.value.source.is_overridden_by(incoming)
    }

    /// True if one of this setting's parameters matches `parameter`,
    /// regardless of rank.
    pub fn declares(&self, parameter: &Parameter) -> bool {
        self.parameters.iter().any(|p| p.matches(parameter))
    }

    /// The value as it should be reported, or `None` if the mask hides it.
    ///
    /// A value that fails validation reports as `INVALID`.
    pub fn display(&self) -> Option<String> {
        let rendered = match self.value.validate() {
            Ok(()) => self.value.render().unwrap_or_default(),
            Err(_) => mask::INVALID.to_string(),
        };
        self.mask.apply(rendered, self.is_set())
    }

    /// True if a channel (or, with [`Mask::DEFAULT_IS_SET`], a default) has
    /// supplied the value.
    pub fn is_set(&self) -> bool {
        match self.value.source {
            Source::None => false,
            Source::Default => self.mask.contains(Mask::DEFAULT_IS_SET),
            _ => true,
        }
    }
}

/// Every setting taking part in one resolution pass, in declaration order.
#[derive(Debug, Default)]
pub struct Settings<'s, 'a> {
    items: Vec<&'s mut Setting<'a>>,
}

impl<'s, 'a> Settings<'s, 'a> {
    pub fn new(items: Vec<&'s mut Setting<'a>>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Setting<'a>> {
        self.items.iter().map(|s| &**s)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Setting<'a>> {
        self.items.iter_mut().map(|s| &mut **s)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Non-empty external file paths held by file-reference settings.
    pub fn external(&self) -> Vec<String> {
        self.iter()
            .filter_map(|s| s.value.external().map(str::to_string))
            .collect()
    }

    /// Assign `raw` to the first setting, in declaration order, that accepts
    /// `parameter`.
    ///
    /// A parameter no setting declares is an unexpected argument. A declared
    /// parameter that loses on precedence is dropped silently.
    pub fn apply(&mut self, parameter: &Parameter, raw: &Raw) -> Result<(), RankfigError> {
        let mut declared = false;
        for setting in self.iter_mut() {
            if !setting.accepts(parameter) {
                declared |= setting.declares(parameter);
                continue;
            }
            let source = parameter.source().unwrap_or_default();
            return setting
                .value
                .assign(raw, source)
                .map_err(|source| RankfigError::InvalidValue {
                    raw: raw.to_string(),
                    parameters: Parameters::from(vec![parameter.clone()]),
                    source,
                });
        }

        if declared {
            trace!(parameter = %parameter, "outranked, ignoring");
            return Ok(());
        }
        Err(RankfigError::UnexpectedArgument {
            parameters: Parameters::from(vec![parameter.clone()]),
        })
    }

    /// Apply every option in order. Errors whose kind is listed in `ignore`
    /// are skipped; the first other error aborts the pass.
    pub fn map(&mut self, options: &Options, ignore: &[ErrorKind]) -> Result<(), RankfigError> {
        for (parameter, raw) in options.iter() {
            match self.apply(parameter, raw) {
                Err(e) if ignore.contains(&e.kind()) => {
                    trace!(parameter = %parameter, error = %e, "ignored");
                }
                other => other?,
            }
        }
        Ok(())
    }
}

impl<'s, 'a> FromIterator<&'s mut Setting<'a>> for Settings<'s, 'a> {
    fn from_iter<I: IntoIterator<Item = &'s mut Setting<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{NOT_SET, SET};

    const ASSIGNED: &str = "value";

    fn display_with(mask: Mask, set: bool) -> Option<String> {
        let mut value = String::new();
        let mut setting = Setting::required(
            "setting",
            "setting",
            &mut value,
            Sources::ALL_SOURCES,
            mask,
            "Example Setting",
        )
        .unwrap();
        if set {
            setting.value.assign(&ASSIGNED.into(), Source::Flag).unwrap();
        }
        setting.display()
    }

    #[test]
    fn display_mask_table() {
        let cases = [
            (Mask::REPORT_VALUE, false, Some("")),
            (Mask::REPORT_VALUE, true, Some(ASSIGNED)),
            (Mask::HIDE_SET, false, Some("")),
            (Mask::HIDE_SET, true, None),
            (Mask::HIDE_UNSET, false, None),
            (Mask::HIDE_UNSET, true, Some(ASSIGNED)),
            (Mask::MASK_SET, false, Some("")),
            (Mask::MASK_SET, true, Some(SET)),
            (Mask::MASK_UNSET, false, Some(NOT_SET)),
            (Mask::MASK_UNSET, true, Some(ASSIGNED)),
        ];
        for (mask, set, expect) in cases {
            assert_eq!(
                display_with(mask, set).as_deref(),
                expect,
                "{mask} (set: {set})"
            );
        }
    }

    #[test]
    fn default_counts_as_unset() {
        let mut port = 0u16;
        let setting = Setting::optional(
            "Port",
            "port",
            &mut port,
            8080,
            Sources::FLAG,
            Mask::MASK_UNSET,
            "port",
        )
        .unwrap();
        assert_eq!(setting.display().as_deref(), Some(NOT_SET));
    }

    #[test]
    fn default_is_set_opt_in() {
        let mut port = 0u16;
        let setting = Setting::optional(
            "Port",
            "port",
            &mut port,
            8080,
            Sources::FLAG,
            Mask::MASK_SET | Mask::DEFAULT_IS_SET,
            "port",
        )
        .unwrap();
        assert_eq!(setting.display().as_deref(), Some(SET));
    }

    #[test]
    fn invalid_setting_displays_as_such() {
        let setting = Setting::default();
        assert_eq!(setting.display().as_deref(), Some(mask::INVALID));
    }

    #[test]
    fn invalid_setting_respects_mask() {
        let setting = Setting {
            mask: Mask::HIDE_VALUE,
            ..Setting::default()
        };
        assert_eq!(setting.display(), None);
    }

    #[test]
    fn required_leaves_provenance_none() {
        let mut v = 0i64;
        let setting =
            Setting::required("V", "v", &mut v, Sources::FLAG, Mask::REPORT_VALUE, "v").unwrap();
        assert_eq!(setting.value.source, Source::None);
    }

    #[test]
    fn declaration_errors_surface() {
        let mut v = 0i64;
        let err = Setting::required("V", "", &mut v, Sources::FLAG, Mask::REPORT_VALUE, "v")
            .unwrap_err();
        assert_eq!(err, ValueError::EmptyParameterName);

        let mut v = 0i64;
        let err = Setting::required("", "v", &mut v, Sources::FLAG, Mask::REPORT_VALUE, "v")
            .unwrap_err();
        assert_eq!(err, ValueError::MissingName);
    }

    #[test]
    fn accepts_only_higher_rank() {
        let mut v = String::new();
        let mut setting = Setting::optional(
            "V",
            "v",
            &mut v,
            String::new(),
            Sources::ALL_SOURCES,
            Mask::REPORT_VALUE,
            "v",
        )
        .unwrap();
        let key = Parameter::new("v", Source::Key);
        let flag = Parameter::new("v", Source::Flag);

        assert!(setting.accepts(&key));
        setting.value.assign(&"f".into(), Source::Flag).unwrap();
        assert!(!setting.accepts(&key));
        assert!(!setting.accepts(&flag));
    }

    #[test]
    fn accepts_rejects_undeclared_channel() {
        let mut v = String::new();
        let setting =
            Setting::required("V", "v", &mut v, Sources::FLAG, Mask::REPORT_VALUE, "v").unwrap();
        assert!(!setting.accepts(&Parameter::new("v", Source::Key)));
        assert!(!setting.accepts(&Parameter::accepting("v", Sources::COMMAND_LINE)));
    }

    #[test]
    fn map_errors_on_extra_parameters() {
        let mut value = 0i64;
        let mut setting = Setting::required(
            "arg",
            "arg",
            &mut value,
            Sources::ALL_SOURCES,
            Mask::REPORT_VALUE,
            "test setting",
        )
        .unwrap();
        let mut settings = Settings::new(vec![&mut setting]);
        let mut options = Options::new();
        options.insert(Parameter::new("extra", Source::Key), "string");

        let err = settings.map(&options, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedArgument);
    }

    #[test]
    fn map_errors_when_option_cannot_be_coerced() {
        let mut value = 0i64;
        let mut setting = Setting::required(
            "arg",
            "arg",
            &mut value,
            Sources::ALL_SOURCES,
            Mask::REPORT_VALUE,
            "test setting",
        )
        .unwrap();
        let mut settings = Settings::new(vec![&mut setting]);
        let mut options = Options::new();
        options.insert(Parameter::new("arg", Source::Flag), "string");

        let err = settings.map(&options, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.format(""), "invalid value 'string': [--arg]");
    }

    #[test]
    fn map_ignores_listed_errors() {
        let mut value = 0i64;
        let mut setting = Setting::required(
            "arg",
            "arg",
            &mut value,
            Sources::ALL_SOURCES,
            Mask::REPORT_VALUE,
            "test setting",
        )
        .unwrap();
        let mut settings = Settings::new(vec![&mut setting]);
        let mut options = Options::new();
        options.insert(Parameter::new("extra", Source::Key), "string");

        assert!(settings.map(&options, &[ErrorKind::UnexpectedArgument]).is_ok());
    }

    #[test]
    fn outranked_input_is_dropped_without_error() {
        let mut name = String::new();
        let mut setting = Setting::required(
            "Name",
            "name",
            &mut name,
            Sources::ALL_SOURCES,
            Mask::REPORT_VALUE,
            "name",
        )
        .unwrap();
        let mut settings = Settings::new(vec![&mut setting]);
        settings
            .apply(&Parameter::new("name", Source::Flag), &"flag".into())
            .unwrap();
        settings
            .apply(&Parameter::new("name", Source::Key), &"file".into())
            .unwrap();
        drop(settings);
        assert_eq!(setting.value.source, Source::Flag);
        drop(setting);
        assert_eq!(name, "flag");
    }

    #[test]
    fn apply_uses_first_accepting_setting() {
        let (mut a, mut b) = (String::new(), String::new());
        let mut first =
            Setting::required("A", "x", &mut a, Sources::FLAG, Mask::REPORT_VALUE, "a").unwrap();
        let mut second =
            Setting::required("B", "x", &mut b, Sources::FLAG, Mask::REPORT_VALUE, "b").unwrap();
        let mut settings = Settings::new(vec![&mut first, &mut second]);
        settings
            .apply(&Parameter::new("x", Source::Flag), &"1".into())
            .unwrap();
        drop(settings);
        assert_eq!(first.value.source, Source::Flag);
        assert_eq!(second.value.source, Source::None);
    }

    #[test]
    fn external_lists_non_empty_paths() {
        let mut file = crate::value::External::default();
        let mut setting = Setting::optional(
            "Config",
            "config",
            &mut file,
            crate::value::External::default(),
            Sources::FLAG,
            Mask::REPORT_VALUE,
            "config file",
        )
        .unwrap();
        let mut settings = Settings::new(vec![&mut setting]);
        assert!(settings.external().is_empty());
        settings
            .apply(&Parameter::new("config", Source::Flag), &"a.json".into())
            .unwrap();
        assert_eq!(settings.external(), vec!["a.json".to_string()]);
    }
}
