//! Ranked, multi-source settings for command line programs. Bind your
//! variables, declare where they may come from, and parse.
//!
//! Rankfig fills caller-owned variables from command line flags, environment
//! variables, an external JSON (or TOML) file, and compiled defaults. Every
//! channel has a fixed rank, and a value is only ever replaced by input from
//! a strictly higher-ranked channel, so the outcome never depends on the
//! order in which channels are read.
//!
//! ```ignore
//! let (mut help, mut file) = (false, External::default());
//! let (mut name, mut port) = (String::new(), 0u16);
//!
//! let mut config = Configuration::new("MYAPP");
//! config.add_help(&mut help, Sources::COMMAND_LINE)?;
//! config.add_config_file(&mut file, Sources::COMMAND_LINE)?;
//! config
//!     .group("server")
//!     .add(Setting::required("Name", "name", &mut name,
//!         Sources::ALL_SOURCES, Mask::REPORT_VALUE, "Server name")?)
//!     .add(Setting::optional("Port", "port", &mut port, 8080,
//!         Sources::NAMED_SOURCES, Mask::REPORT_VALUE, "Listen port")?);
//!
//! if let Err(err) = config.parse() {
//!     eprintln!("{}\n{}", config.format(&err), config.usage());
//!     std::process::exit(1);
//! }
//! ```
//!
//! That declares `--name`, `-n`, `MYAPP_NAME`, and the JSON key `"name"` for
//! one setting, and `--port`, `MYAPP_PORT`, and `"port"` for another, plus
//! `--help`/`-h` and `--config`/`-c`.
//!
//! # Channel precedence
//!
//! ```text
//! Default            Setting::optional(.., default, ..)
//!        ↑ overridden by
//! File key           {"name": ...} in the --config file
//!        ↑ overridden by
//! Environment        MYAPP_NAME
//!        ↑ overridden by
//! Short flag         -n
//!        ↑ overridden by
//! Long flag          --name
//! ```
//!
//! Each setting records which channel last filled it, its provenance
//! ([`Source`]). Input from an equal or lower rank is dropped silently: a
//! file key never overwrites a flag, even though files are read last.
//!
//! A setting declared with [`Setting::required`] starts with provenance
//! [`Source::None`]. If no channel supplies it, parsing fails with
//! [`RankfigError::MissingRequiredOption`].
//!
//! # Declaring channels
//!
//! [`Sources`] is the set of channels a setting listens on. A logical name
//! expands into one [`Parameter`] per channel:
//!
//! | Channel | Name `dash-name` becomes |
//! |---------|--------------------------|
//! | File key | `"dash-name"` |
//! | Environment | `PREFIX_DASH_NAME` (or `DASH_NAME` with no prefix) |
//! | Short flag | `-d` |
//! | Long flag | `--dash-name` |
//!
//! Presets cover the usual cases: [`Sources::COMMAND_LINE`],
//! [`Sources::NAMED_SOURCES`], [`Sources::ALL_SOURCES`].
//!
//! # Command line grammar
//!
//! `--name` and `-n` take the next token as their value, unless there is no
//! next token or it starts with `-`, in which case the value is `"true"`.
//! Any token that is not a flag or a flag's value is an error, and so is a
//! flag no setting declares.
//!
//! # Environment variables
//!
//! Only the variables the settings declare are read. Stray variables with
//! the same prefix are never an error. An empty variable counts as unset.
//!
//! # External files
//!
//! Any setting bound to an [`External`] names a file to load after flags and
//! environment. Local paths are read from disk; `http://` and `https://` URIs
//! are fetched when the `http` feature (on by default) is enabled. The body
//! must be a flat object. Keys are matched against file-key parameters, and
//! keys that match nothing are ignored.
//!
//! # Supported types
//!
//! A setting can bind any [`Scalar`]: `bool`, every fixed and pointer-sized
//! integer, `f32`, `f64`, `String`, [`Duration`](std::time::Duration), and
//! [`External`]. Text is parsed per type (`"1m30s"` for durations, `"t"` or
//! `"TRUE"` for booleans). A floating point number arriving for an integer
//! slot, as JSON numbers often do, is truncated toward zero.
//!
//! # Reporting
//!
//! [`Configuration::usage`] renders help text. [`Configuration::report`] and
//! [`Configuration::log`] expose the resolved values, filtered through each
//! setting's [`Mask`]: hide a secret when set, print `UNSET` when a value
//! was never supplied, and so on.
//!
//! # Error handling
//!
//! Declarations return [`ValueError`] for programmer mistakes (empty name or
//! description). Parsing returns [`RankfigError`]. Its `Display` keeps the
//! technical detail; [`Configuration::format`] gives the terse user-facing
//! form, e.g. `invalid value 'soon': [env MYAPP_TIMEOUT]`. A `ValueError`
//! converts into [`RankfigError::Declaration`], so one function can declare
//! and parse with `?` throughout.

pub mod error;
pub mod version;

mod configuration;
mod env;
mod file;
mod flags;
mod group;
mod mask;
mod options;
mod parameter;
mod resolve;
mod setting;
mod source;
mod value;

#[cfg(test)]
mod fixtures;

pub use configuration::Configuration;
pub use env::{environment, process_var};
pub use error::{ErrorKind, RankfigError, ValueError};
pub use file::{decode, load};
pub use flags::flags;
pub use group::{Group, GroupReport};
pub use mask::{INVALID, Mask, NOT_SET, SET};
pub use options::{Options, Raw};
pub use parameter::{Parameter, Parameters};
pub use resolve::{EnvLookup, Loader, ResolveInput, resolve};
pub use setting::{Setting, Settings};
pub use source::{Source, Sources};
pub use value::{External, Kind, Scalar, Target, Value};
