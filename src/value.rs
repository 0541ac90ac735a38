//! Typed slots bound to caller-owned storage, and coercion from raw input.
//!
//! A [`Value`] borrows one of the caller's variables for as long as the
//! configuration lives. The set of types a slot can hold is closed: every
//! supported type implements the sealed [`Scalar`] trait and binds to one
//! variant of [`Target`]. Assignment dispatches on that variant.
//!
//! Coercion rules, shared by every slot:
//!
//! - Input already of the slot's type is used as is.
//! - Text is parsed: base-10 numbers, `humantime` durations, and the boolean
//!   spellings `1 t T TRUE true True` / `0 f F FALSE false False`.
//! - A float headed for an integer slot is truncated toward zero.
//!   Out-of-range floats saturate.
//! - Integers headed for a float slot are widened.
//! - Anything else is an [`InvalidType`](ValueError::InvalidType) error.

use std::fmt;
use std::ops::Deref;
use std::time::Duration;

use crate::error::ValueError;
use crate::options::Raw;
use crate::source::Source;

/// Path or URI of an external configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct External(String);

impl External {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for External {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for External {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for External {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for External {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type a [`Value`] can hold.
pub trait Scalar: sealed::Sealed + Sized {
    const KIND: Kind;

    /// Convert raw input into this type.
    fn coerce(raw: &Raw) -> Result<Self, ValueError>;

    /// Render for reports and usage text. Coercing the rendered text yields
    /// an equal value.
    fn render(&self) -> String;

    fn bind(&mut self) -> Target<'_>;
}

macro_rules! slots {
    ($($variant:ident($ty:ty) => $name:literal),* $(,)?) => {
        /// The type tag of a slot.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Kind {
            $($variant),*
        }

        impl fmt::Display for Kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Kind::$variant => f.write_str($name)),*
                }
            }
        }

        /// Mutable access to a caller's variable of a supported type.
        #[derive(Debug)]
        pub enum Target<'a> {
            $($variant(&'a mut $ty)),*
        }

        impl Target<'_> {
            pub fn kind(&self) -> Kind {
                match self {
                    $(Target::$variant(_) => Kind::$variant),*
                }
            }

            pub fn render(&self) -> String {
                match self {
                    $(Target::$variant(slot) => Scalar::render(&**slot)),*
                }
            }

            fn assign(&mut self, raw: &Raw) -> Result<(), ValueError> {
                match self {
                    $(Target::$variant(slot) => **slot = <$ty as Scalar>::coerce(raw)?),*
                }
                Ok(())
            }
        }

        $(impl sealed::Sealed for $ty {})*
    };
}

slots! {
    Bool(bool) => "bool",
    I8(i8) => "i8",
    I16(i16) => "i16",
    I32(i32) => "i32",
    I64(i64) => "i64",
    Isize(isize) => "isize",
    U8(u8) => "u8",
    U16(u16) => "u16",
    U32(u32) => "u32",
    U64(u64) => "u64",
    Usize(usize) => "usize",
    F32(f32) => "f32",
    F64(f64) => "f64",
    String(String) => "string",
    Duration(Duration) => "duration",
    External(External) => "external",
}

fn mismatch(expected: Kind, raw: &Raw) -> ValueError {
    ValueError::InvalidType {
        expected,
        found: raw.type_name().to_string(),
        reason: None,
    }
}

fn unparsable(expected: Kind, text: &str, reason: impl fmt::Display) -> ValueError {
    ValueError::InvalidType {
        expected,
        found: format!("{text:?}"),
        reason: Some(reason.to_string()),
    }
}

macro_rules! integer_scalars {
    ($($variant:ident($ty:ty)),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: Kind = Kind::$variant;

            fn coerce(raw: &Raw) -> Result<Self, ValueError> {
                match raw {
                    Raw::Int(i) => <$ty>::try_from(*i)
                        .map_err(|e| unparsable(Self::KIND, &i.to_string(), e)),
                    Raw::Uint(u) => <$ty>::try_from(*u)
                        .map_err(|e| unparsable(Self::KIND, &u.to_string(), e)),
                    Raw::Float(x) => Ok(x.trunc() as $ty),
                    Raw::Text(s) => s.parse::<$ty>().map_err(|e| unparsable(Self::KIND, s, e)),
                    other => Err(mismatch(Self::KIND, other)),
                }
            }

            fn render(&self) -> String {
                self.to_string()
            }

            fn bind(&mut self) -> Target<'_> {
                Target::$variant(self)
            }
        }
    )*};
}

integer_scalars! {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
}

macro_rules! float_scalars {
    ($($variant:ident($ty:ty)),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: Kind = Kind::$variant;

            fn coerce(raw: &Raw) -> Result<Self, ValueError> {
                match raw {
                    Raw::Float(x) => Ok(*x as $ty),
                    Raw::Int(i) => Ok(*i as $ty),
                    Raw::Uint(u) => Ok(*u as $ty),
                    Raw::Text(s) => s.parse::<$ty>().map_err(|e| unparsable(Self::KIND, s, e)),
                    other => Err(mismatch(Self::KIND, other)),
                }
            }

            fn render(&self) -> String {
                self.to_string()
            }

            fn bind(&mut self) -> Target<'_> {
                Target::$variant(self)
            }
        }
    )*};
}

float_scalars! {
    F32(f32),
    F64(f64),
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err("invalid boolean syntax".to_string()),
    }
}

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;

    fn coerce(raw: &Raw) -> Result<Self, ValueError> {
        match raw {
            Raw::Bool(b) => Ok(*b),
            Raw::Text(s) => parse_bool(s).map_err(|e| unparsable(Self::KIND, s, e)),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bind(&mut self) -> Target<'_> {
        Target::Bool(self)
    }
}

impl Scalar for String {
    const KIND: Kind = Kind::String;

    fn coerce(raw: &Raw) -> Result<Self, ValueError> {
        match raw {
            Raw::Text(s) => Ok(s.clone()),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn bind(&mut self) -> Target<'_> {
        Target::String(self)
    }
}

impl Scalar for Duration {
    const KIND: Kind = Kind::Duration;

    fn coerce(raw: &Raw) -> Result<Self, ValueError> {
        match raw {
            Raw::Duration(d) => Ok(*d),
            Raw::Text(s) => humantime::parse_duration(s).map_err(|e| unparsable(Self::KIND, s, e)),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }

    fn bind(&mut self) -> Target<'_> {
        Target::Duration(self)
    }
}

impl Scalar for External {
    const KIND: Kind = Kind::External;

    fn coerce(raw: &Raw) -> Result<Self, ValueError> {
        match raw {
            Raw::External(e) => Ok(e.clone()),
            Raw::Text(s) => Ok(External::new(s.clone())),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn render(&self) -> String {
        self.0.clone()
    }

    fn bind(&mut self) -> Target<'_> {
        Target::External(self)
    }
}

/// A named, described slot and the channel that last filled it.
#[derive(Debug, Default)]
pub struct Value<'a> {
    pub name: String,
    pub description: String,
    /// Provenance. Always a single channel.
    pub source: Source,
    target: Option<Target<'a>>,
    base: Option<String>,
}

impl<'a> Value<'a> {
    /// Bind a slot to `target`. With a default, the default is written to
    /// the target immediately and the provenance starts at
    /// [`Source::Default`]; without one the target is left untouched and the
    /// provenance is [`Source::None`].
    pub fn new<T: Scalar>(
        name: &str,
        description: &str,
        target: &'a mut T,
        default: Option<T>,
    ) -> Result<Self, ValueError> {
        let mut value = Value {
            name: name.to_string(),
            description: description.to_string(),
            source: Source::None,
            target: None,
            base: None,
        };
        value.check_labels()?;
        if let Some(default) = default {
            value.base = Some(default.render());
            value.source = Source::Default;
            *target = default;
        }
        value.target = Some(T::bind(target));
        Ok(value)
    }

    /// A value with no storage. It never validates; useful only as a
    /// placeholder.
    pub fn unbound(name: &str, description: &str) -> Self {
        Value {
            name: name.to_string(),
            description: description.to_string(),
            ..Value::default()
        }
    }

    /// Checks, in order: name, description, storage.
    pub fn validate(&self) -> Result<(), ValueError> {
        self.check_labels()?;
        if self.target.is_none() {
            return Err(ValueError::NilPointer(self.name.clone()));
        }
        Ok(())
    }

    fn check_labels(&self) -> Result<(), ValueError> {
        if self.name.is_empty() {
            return Err(ValueError::MissingName);
        }
        if self.description.is_empty() {
            return Err(ValueError::MissingDescription(self.name.clone()));
        }
        Ok(())
    }

    /// Coerce `raw` into the slot and record `source` as its provenance.
    /// On failure the slot and provenance are unchanged.
    pub fn assign(&mut self, raw: &Raw, source: Source) -> Result<(), ValueError> {
        self.validate()?;
        if let Some(target) = self.target.as_mut() {
            target.assign(raw)?;
        }
        self.source = source;
        Ok(())
    }

    pub fn kind(&self) -> Option<Kind> {
        self.target.as_ref().map(Target::kind)
    }

    /// The current contents of the slot, rendered.
    pub fn render(&self) -> Option<String> {
        self.target.as_ref().map(Target::render)
    }

    /// The declared default, rendered. `None` for required values.
    pub fn default_value(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.base.is_none()
    }

    /// The current contents of a boolean slot.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.target {
            Some(Target::Bool(b)) => Some(**b),
            _ => None,
        }
    }

    /// The current contents of an external-file slot, when non-empty.
    pub fn external(&self) -> Option<&str> {
        match &self.target {
            Some(Target::External(e)) if !e.is_empty() => Some(e.as_str()),
            _ => None,
        }
    }
}
