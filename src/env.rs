use crate::options::Options;
use crate::setting::Settings;
use crate::source::Source;

/// Build options from the environment variables the settings declare.
///
/// Only declared environment parameters are looked up, as `<PREFIX>_<NAME>`
/// (or `<NAME>` with an empty prefix) with dashes turned into underscores.
/// Undeclared variables are never read. An empty value counts as unset.
///
/// Takes a lookup function so tests can pass synthetic data instead of
/// [`process_var`].
pub fn environment(
    prefix: &str,
    settings: &Settings<'_, '_>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Options {
    let mut options = Options::new();

    for setting in settings.iter() {
        for parameter in &setting.parameters {
            if parameter.source() != Some(Source::EnvVar) || parameter.name.is_empty() {
                continue;
            }
            let mut parameter = parameter.clone();
            parameter.stub = prefix.to_string();

            if let Some(value) = lookup(&parameter.full_name()).filter(|v| !v.is_empty()) {
                options.insert(parameter, value);
            }
        }
    }

    options
}

/// Read a variable from the process environment. Non-unicode values count as
/// unset.
pub fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
