//! Input channels and their precedence.
//!
//! Two types model the two jobs a channel identifier does:
//!
//! - [`Source`] is exactly one channel. It is what a [`Value`](crate::Value)
//!   records as its provenance and what an incoming parameter carries. Sources
//!   are totally ordered by rank, least to most authoritative:
//!
//!   ```text
//!   None < Default < Key < EnvVar < ShortFlag < Flag
//!   ```
//!
//! - [`Sources`] is a set of channels, used when declaring which channels may
//!   set a setting (`Sources::FLAG | Sources::ENV_VAR`). Sets have no ordering,
//!   so a combined mask can never take part in a precedence comparison.

use std::cmp::Ordering;
use std::fmt;

use bitflags::bitflags;

/// A single input channel.
///
/// Ordering is precedence: a value may only be replaced by input from a
/// strictly higher-ranked source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Source {
    /// Nothing has set the value.
    #[default]
    None,
    /// The declared default is in use.
    Default,
    /// A key in an external configuration file.
    Key,
    /// An environment variable.
    EnvVar,
    /// A single-dash command line flag.
    ShortFlag,
    /// A double-dash command line flag.
    Flag,
    /// Names an external configuration file in error reports. Never recorded
    /// as the provenance of a value.
    ConfigFile,
}

impl Source {
    /// Every real channel, lowest rank first.
    pub const CHANNELS: [Source; 6] = [
        Source::None,
        Source::Default,
        Source::Key,
        Source::EnvVar,
        Source::ShortFlag,
        Source::Flag,
    ];

    /// Position in the precedence order. Higher wins.
    pub fn rank(self) -> u8 {
        match self {
            Source::None => 0,
            Source::Default => 1,
            Source::Key => 2,
            Source::EnvVar => 3,
            Source::ShortFlag => 4,
            Source::Flag => 5,
            Source::ConfigFile => u8::MAX,
        }
    }

    /// True if `incoming` may replace a value currently held from `self`.
    pub fn is_overridden_by(self, incoming: Source) -> bool {
        incoming > self
    }

    /// The single-channel set for this source.
    pub fn as_set(self) -> Sources {
        match self {
            Source::None => Sources::NONE,
            Source::Default => Sources::DEFAULT,
            Source::Key => Sources::KEY,
            Source::EnvVar => Sources::ENV_VAR,
            Source::ShortFlag => Sources::SHORT_FLAG,
            Source::Flag => Sources::FLAG,
            Source::ConfigFile => Sources::CONFIG_FILE,
        }
    }
}

impl PartialOrd for Source {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Source {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::None => "none",
            Source::Default => "default value",
            Source::Key => "config file key",
            Source::EnvVar => "environment value",
            Source::ShortFlag => "short flag",
            Source::Flag => "flag",
            Source::ConfigFile => "config file",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// A set of channels a setting accepts input from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sources: u8 {
        const NONE = 1;
        const DEFAULT = 1 << 1;
        const KEY = 1 << 2;
        const ENV_VAR = 1 << 3;
        const SHORT_FLAG = 1 << 4;
        const FLAG = 1 << 5;
        /// Reserved for error reports naming an external file.
        const CONFIG_FILE = 1 << 7;

        /// Short or long command line flag.
        const COMMAND_LINE = Self::FLAG.bits() | Self::SHORT_FLAG.bits();
        /// Long flag, environment variable, or file key.
        const NAMED_SOURCES = Self::FLAG.bits() | Self::ENV_VAR.bits() | Self::KEY.bits();
        /// Every channel a caller can declare.
        const ALL_SOURCES = Self::NAMED_SOURCES.bits() | Self::SHORT_FLAG.bits();
    }
}

impl Sources {
    /// True if the set includes the given channel.
    pub fn accepts(self, source: Source) -> bool {
        self.intersects(source.as_set())
    }

    /// The channel this set names, if it names exactly one.
    pub fn single(self) -> Option<Source> {
        Source::CHANNELS
            .into_iter()
            .chain(std::iter::once(Source::ConfigFile))
            .find(|s| s.as_set() == self)
    }
}

impl From<Source> for Sources {
    fn from(source: Source) -> Self {
        source.as_set()
    }
}
