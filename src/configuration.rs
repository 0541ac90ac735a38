//! The root object: groups of settings, resolved together.

use std::collections::HashMap;
use std::error::Error;

use tracing::info;

use crate::env;
use crate::error::{RankfigError, ValueError};
use crate::file;
use crate::group::{Group, GroupReport};
use crate::mask::Mask;
use crate::resolve::{ResolveInput, resolve};
use crate::setting::{Setting, Settings};
use crate::source::Sources;
use crate::value::External;

const INTERNAL_GROUP: &str = "internal";
const HELP: &str = "Help";
const CONFIG_FILE: &str = "Config File";

/// Every setting a program declares, grouped for display, plus the
/// environment prefix used to name its variables.
///
/// Settings borrow the caller's variables for `'a`. Once [`parse`] returns,
/// drop the configuration (or let it go out of scope) to read them.
///
/// [`parse`]: Configuration::parse
#[derive(Debug, Default)]
pub struct Configuration<'a> {
    prefix: String,
    groups: Vec<Group<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> Configuration<'a> {
    /// A configuration whose environment variables are named `<PREFIX>_<NAME>`.
    /// An empty prefix leaves variable names bare.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    /// The group called `name`, created on first use. Groups keep the order
    /// in which they were first requested.
    pub fn group(&mut self, name: &str) -> &mut Group<'a> {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.groups.push(Group::new(name));
                let i = self.groups.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.groups[i]
    }

    /// Add a `--help` flag (and `-h` if `sources` includes short flags) to the
    /// internal group. Other channels in `sources` are ignored.
    pub fn add_help(&mut self, target: &'a mut bool, sources: Sources) -> Result<(), ValueError> {
        let setting = Setting::optional(
            HELP,
            "help",
            target,
            false,
            command_line(sources),
            Mask::HIDE_VALUE,
            "Display usage information",
        )?;
        self.group(INTERNAL_GROUP).add(setting);
        Ok(())
    }

    /// Add a `--config` flag (and `-c` if `sources` includes short flags)
    /// naming an external file to load.
    pub fn add_config_file(
        &mut self,
        target: &'a mut External,
        sources: Sources,
    ) -> Result<(), ValueError> {
        let setting = Setting::optional(
            CONFIG_FILE,
            "config",
            target,
            External::default(),
            command_line(sources),
            Mask::REPORT_VALUE,
            "Provide configuration from an external JSON file",
        )?;
        self.group(INTERNAL_GROUP).add(setting);
        Ok(())
    }

    /// True if the help flag was added and set.
    pub fn help(&self) -> bool {
        self.index
            .get(INTERNAL_GROUP)
            .and_then(|&i| self.groups[i].settings.iter().find(|s| s.value.name == HELP))
            .and_then(|s| s.value.as_bool())
            .unwrap_or(false)
    }

    /// Resolve from the process arguments and environment.
    pub fn parse(&mut self) -> Result<(), RankfigError> {
        self.parse_with(std::env::args().skip(1), env::process_var)
    }

    /// Resolve from `args` (program name excluded) and the process
    /// environment.
    pub fn parse_using<I, S>(&mut self, args: I) -> Result<(), RankfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(args, env::process_var)
    }

    /// Resolve from `args` and an environment `lookup`.
    pub fn parse_with<I, S>(
        &mut self,
        args: I,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), RankfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings: Settings = self
            .groups
            .iter_mut()
            .flat_map(|g| g.settings.iter_mut())
            .collect();

        resolve(
            &mut settings,
            ResolveInput {
                args: args.into_iter().map(Into::into).collect(),
                prefix: &self.prefix,
                env: &lookup,
                load: &file::load,
            },
        )
    }

    /// Usage text: each setting with at least one parameter, in group then
    /// declaration order. `[no options]` if there are none.
    pub fn usage(&self) -> String {
        let blocks: Vec<String> = self
            .groups
            .iter()
            .flat_map(|g| &g.settings)
            .filter(|s| !s.parameters.is_empty())
            .map(|s| {
                format!(
                    "  {} {}\n    {}{}\n",
                    s.value.name,
                    s.parameters.format(&self.prefix),
                    s.value.description,
                    annotation(s),
                )
            })
            .collect();

        if blocks.is_empty() {
            return "[no options]".to_string();
        }
        format!("usage:\n{}", blocks.join("\n"))
    }

    /// Masked values of every group that has any to show.
    pub fn report(&self) -> Vec<GroupReport> {
        self.groups
            .iter()
            .map(Group::report)
            .filter(|r| !r.values.is_empty())
            .collect()
    }

    /// Emit one `info` event per reported group.
    pub fn log(&self) {
        for report in self.report() {
            let values = serde_json::to_string(&report.values).unwrap_or_default();
            info!(group = %report.name, values = %values, "{} configuration", report.name);
        }
    }

    /// A terse message for the user: `<cause>: [<parameter forms>]` for
    /// resolution errors, the plain message for anything else.
    pub fn format(&self, err: &(dyn Error + 'static)) -> String {
        match err.downcast_ref::<RankfigError>() {
            Some(err) => err.format(&self.prefix),
            None => err.to_string(),
        }
    }
}

fn command_line(sources: Sources) -> Sources {
    if sources.contains(Sources::SHORT_FLAG) {
        Sources::FLAG | Sources::SHORT_FLAG
    } else {
        Sources::FLAG
    }
}

fn annotation(setting: &Setting<'_>) -> String {
    match setting.value.default_value() {
        None => " (required)".to_string(),
        Some(default) if !default.is_empty() && setting.mask.reveals_default() => {
            format!(" (default: {default})")
        }
        Some(_) => String::new(),
    }
}
