//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary. Numeric values accept either JSON numbers or numeric strings,
//! since hosted tables frequently hand prices back as text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// Text could not be read as a number.
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    /// Rating outside of the 0..=5 scale.
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Generates a trimmed string newtype. The `url` arm additionally validates
/// the value as an absolute URL.
macro_rules! string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        string_newtype!(@define $name, $doc, $field, |_value: &str| Ok(()));
    };
    ($name:ident, $doc:expr, $field:expr, url) => {
        string_newtype!(@define $name, $doc, $field, |value: &str| {
            if value.validate_url() {
                Ok(())
            } else {
                Err(TypeConstraintError::InvalidUrl($field))
            }
        });
    };
    (@define $name:ident, $doc:expr, $field:expr, $check:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Trims the input and rejects values that violate the type's constraint.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                let check: fn(&str) -> Result<(), TypeConstraintError> = $check;
                check(&trimmed)?;
                Ok(Self(trimmed))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

string_newtype!(
    ProductId,
    "Opaque product identifier assigned by the store on insert.",
    "product id"
);
string_newtype!(ProductTitle, "Product title shown on cards.", "title");
string_newtype!(CategoryName, "Category label shared by products.", "category");
string_newtype!(
    ImageSource,
    "Raw image field; may hold several URLs separated by commas or newlines.",
    "image url"
);
string_newtype!(ImageUrl, "A single product image URL.", "image url", url);
string_newtype!(
    AffiliateLink,
    "Outbound marketplace URL credited to the storefront.",
    "affiliate link",
    url
);

impl ImageSource {
    /// Splits the raw field into individual, non-empty entries.
    pub fn urls(&self) -> Vec<&str> {
        self.0
            .split([',', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// First listed image, falling back to the raw value.
    pub fn primary(&self) -> &str {
        self.urls().first().copied().unwrap_or(self.as_str())
    }
}

/// Numeric input that may arrive as a JSON number or as text.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// True when the input is text consisting only of whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Reads the value as `f64`, reporting `field` on failure.
    pub fn to_f64(&self, field: &'static str) -> Result<f64, TypeConstraintError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| TypeConstraintError::InvalidNumber(field)),
        }
    }
}

impl Display for NumericInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Non-negative price value in rupees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "NumericInput", into = "f64")]
pub struct ProductPrice(f64);

impl ProductPrice {
    /// Constructs a finite price that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ProductPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<NumericInput> for ProductPrice {
    type Error = TypeConstraintError;

    fn try_from(value: NumericInput) -> Result<Self, Self::Error> {
        Self::new(value.to_f64("price")?)
    }
}

impl From<ProductPrice> for f64 {
    fn from(value: ProductPrice) -> Self {
        value.0
    }
}

impl PartialEq<f64> for ProductPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Star rating on the inclusive 0..=5 scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "NumericInput", into = "f64")]
pub struct ProductRating(f64);

impl ProductRating {
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::RatingOutOfRange)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ProductRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<NumericInput> for ProductRating {
    type Error = TypeConstraintError;

    fn try_from(value: NumericInput) -> Result<Self, Self::Error> {
        Self::new(value.to_f64("rating")?)
    }
}

impl From<ProductRating> for f64 {
    fn from(value: ProductRating) -> Self {
        value.0
    }
}
