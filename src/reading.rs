// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Values that may be unavailable.
//!
//! Solar-side values need a location (and a date inside the model's range).
//! When either is missing the value is not an error, it is a
//! [`Reading::Unavailable`] that renders as `---` and remembers why.

use std::fmt;

/// Placeholder shown in place of an unavailable value.
pub const UNAVAILABLE_TEXT: &str = "---";

/// Why a reading could not be produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "reason"))]
pub enum Unavailable {
    /// No location is known, or location access was denied.
    NoLocation,
    /// The date lies outside 2000–2099.
    OutOfRangeDate { year: i32 },
    /// The sunrise/sunset collaborator failed.
    SunCalculationFailed,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::NoLocation => f.write_str("location unknown"),
            Unavailable::OutOfRangeDate { year } => {
                write!(f, "year {year} outside 2000-2099")
            }
            Unavailable::SunCalculationFailed => f.write_str("sunrise/sunset unavailable"),
        }
    }
}

/// A value, or the reason it is missing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Reading<T> {
    Value(T),
    Unavailable(Unavailable),
}

impl<T> Reading<T> {
    #[inline]
    pub const fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }

    /// The value, if there is one.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable(_) => None,
        }
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable(_) => None,
        }
    }

    /// Why the value is missing, if it is.
    #[inline]
    pub fn reason(&self) -> Option<Unavailable> {
        match self {
            Reading::Value(_) => None,
            Reading::Unavailable(why) => Some(*why),
        }
    }

    #[inline]
    pub fn as_ref(&self) -> Reading<&T> {
        match self {
            Reading::Value(v) => Reading::Value(v),
            Reading::Unavailable(why) => Reading::Unavailable(*why),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        match self {
            Reading::Value(v) => Reading::Value(f(v)),
            Reading::Unavailable(why) => Reading::Unavailable(why),
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Reading<U>>(self, f: F) -> Reading<U> {
        match self {
            Reading::Value(v) => f(v),
            Reading::Unavailable(why) => Reading::Unavailable(why),
        }
    }
}

impl<T> From<Result<T, Unavailable>> for Reading<T> {
    fn from(value: Result<T, Unavailable>) -> Self {
        match value {
            Ok(v) => Reading::Value(v),
            Err(why) => Reading::Unavailable(why),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => v.fmt(f),
            Reading::Unavailable(_) => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}
