//! Display policy for reported values.

use std::fmt;

use bitflags::bitflags;

/// Shown instead of the value when [`Mask::MASK_SET`] applies.
pub const SET: &str = "SET";

/// Shown instead of the value when [`Mask::MASK_UNSET`] applies.
pub const NOT_SET: &str = "UNSET";

/// Shown when a value fails validation.
pub const INVALID: &str = "INVALID";

bitflags! {
    /// Controls how a setting's value appears in reports and logs.
    ///
    /// A value is *unset* when nothing has supplied it, or when only its
    /// default is in use (unless [`Mask::DEFAULT_IS_SET`] is given).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mask: u8 {
        /// Hide the value when it is set.
        const HIDE_SET = 1;
        /// Hide the value when it is unset.
        const HIDE_UNSET = 1 << 1;
        /// Report `SET` rather than the value when it is set.
        const MASK_SET = 1 << 2;
        /// Report `UNSET` rather than the value when it is unset.
        const MASK_UNSET = 1 << 3;
        /// Treat a default value as set.
        const DEFAULT_IS_SET = 1 << 4;

        const HIDE_VALUE = Self::HIDE_SET.bits() | Self::HIDE_UNSET.bits();
        const MASK_VALUE = Self::MASK_SET.bits() | Self::MASK_UNSET.bits();
    }
}

impl Mask {
    /// Report the literal value.
    pub const REPORT_VALUE: Mask = Mask::empty();

    /// Apply this policy to a rendered value. Returns `None` when the value
    /// should not be shown at all.
    pub fn apply(self, value: String, is_set: bool) -> Option<String> {
        if is_set {
            if self.contains(Mask::HIDE_SET) {
                None
            } else if self.contains(Mask::MASK_SET) {
                Some(SET.to_string())
            } else {
                Some(value)
            }
        } else if self.contains(Mask::HIDE_UNSET) {
            None
        } else if self.contains(Mask::MASK_UNSET) {
            Some(NOT_SET.to_string())
        } else {
            Some(value)
        }
    }

    /// True if a declared default may be shown in usage text.
    pub fn reveals_default(self) -> bool {
        !self.intersects(Mask::HIDE_VALUE | Mask::MASK_VALUE)
    }
}

const NAMES: [(Mask, &str); 7] = [
    (Mask::REPORT_VALUE, "Report value"),
    (Mask::HIDE_SET, "Hide value if set"),
    (Mask::HIDE_UNSET, "Hide value if unset"),
    (Mask::MASK_SET, "Mask value if set"),
    (Mask::MASK_UNSET, "Mask value if unset"),
    (Mask::HIDE_VALUE, "Hide value"),
    (Mask::MASK_VALUE, "Mask value"),
];

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NAMES.iter().find(|(mask, _)| mask == self) {
            Some((_, name)) => f.write_str(name),
            None => write!(f, "Mask value: {}", self.bits()),
        }
    }
}
