//! Closed categorical value sets and the domain error raised when external
//! input names a value outside of them.

use thiserror::Error;

/// Errors raised while populating a [`PatientRiskRecord`](super::PatientRiskRecord).
///
/// These never originate in the score engine: a record that was built
/// successfully can always be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("unknown {field} value '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("age {0} is invalid: must be a finite number of years >= 0")]
    InvalidAge(f64),

    #[error("IRSAD decile must be between 1 and 10, got {0}")]
    DecileOutOfRange(i64),

    #[error("BMI {0} is outside the modelled range [7, 200]")]
    BmiOutOfRange(f64),
}

/// A closed set of named values populating one record field.
pub trait Categorical: Copy + std::str::FromStr<Err = RecordError> + 'static {
    /// Name of the record field this type populates.
    const FIELD: &'static str;
}

/// Declares a closed categorical type with a stable wire name per variant.
///
/// Variant order is significant: coefficient tables are indexed by
/// discriminant, so tables and declarations must list variants in the same
/// order.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Number of variants.
            pub const COUNT: usize = Self::ALL.len();

            /// Name of the record field this type populates.
            pub const FIELD: &'static str = $field;

            /// Wire name of this variant.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Position of this variant in [`Self::ALL`].
            #[must_use]
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl $crate::domain::Categorical for $name {
            const FIELD: &'static str = $field;
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::RecordError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| $crate::domain::RecordError::UnknownVariant {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use categorical;

#[cfg(test)]
mod tests {
    use super::*;

    categorical! {
        enum Colour in "Colour" {
            Red => "RED",
            Green => "GREEN",
        }
    }

    #[test]
    fn test_wire_names_round_trip() {
        for colour in Colour::ALL {
            assert_eq!(colour.as_str().parse::<Colour>(), Ok(*colour));
        }
        assert_eq!(Colour::COUNT, 2);
        assert_eq!(Colour::Green.index(), 1);
    }

    #[test]
    fn test_unknown_variant_names_field() {
        let err = "BLUE".parse::<Colour>().unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownVariant {
                field: "Colour",
                value: "BLUE".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown Colour value 'BLUE'");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("red".parse::<Colour>().is_err());
    }
}
