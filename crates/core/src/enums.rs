//! Closed string vocabularies shared by the data model.
//!
//! Stored rows carry tiers, levels and statuses as lowercase strings. Parsing
//! from user input is strict (`FromStr`), while deserializing persisted data is
//! lossy: an unknown value degrades to the lowest variant instead of failing
//! the whole record.

/// Error returned when strict parsing of a vocabulary value fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Vocabulary being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$doc:meta])*
        pub enum $name:ident (fallback = $fallback:ident) {
            $( $(#[$vdoc:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vdoc])* $variant, )+
        }

        impl $name {
            /// Every variant, lowest first.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lowercase name used in storage and JSON.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Parse persisted data. Unknown values map to the fallback variant.
            pub fn parse_lossy(s: &str) -> Self {
                s.parse().unwrap_or_else(|_| {
                    tracing::warn!(
                        kind = stringify!($name),
                        value = s,
                        fallback = $name::$fallback.as_str(),
                        "unknown value, using fallback"
                    );
                    $name::$fallback
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $text => Ok($name::$variant), )+
                    _ => Err($crate::enums::ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::parse_lossy(&raw))
            }
        }
    };
}

pub(crate) use string_enum;
