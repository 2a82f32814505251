//! Macro for defining validated string newtypes.
//!
//! Each newtype wraps a `String` that has passed a validation function
//! supplied at the macro call site. Construction through `try_new`,
//! `TryFrom`, or serde all go through the same check.

/// Define a strongly-typed string newtype guarded by `validate`.
///
/// `validate` has the signature `fn(&str) -> Result<(), &'static str>`.
///
/// Generates:
/// - The struct with `Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize`
/// - Custom `Deserialize` (runs the validator)
/// - `new()` (panics on invalid input), `try_new()`, `as_str()`, `into_inner()`
/// - `Display`, `AsRef<str>`, `Deref<Target=str>`, `Borrow<str>`
/// - `TryFrom<String>`, `TryFrom<&str>`
/// - `PartialEq<str>`, `PartialEq<&str>`, `PartialEq<String>`
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
        validate = $validate:path;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::try_new(s).map_err(serde::de::Error::custom)
            }
        }

        impl $Name {
            /// Create a new instance, panicking if validation fails.
            ///
            /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
            pub fn new(value: impl Into<String>) -> Self {
                match Self::try_new(value) {
                    Ok(v) => v,
                    Err(reason) => panic!("invalid {}: {}", stringify!($Name), reason),
                }
            }

            /// Try to create a new instance, returning the validation failure.
            pub fn try_new(value: impl Into<String>) -> Result<Self, &'static str> {
                let s = value.into();
                $validate(&s)?;
                Ok(Self(s))
            }

            /// Return the underlying value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl TryFrom<String> for $Name {
            type Error = &'static str;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::try_new(s)
            }
        }

        impl TryFrom<&str> for $Name {
            type Error = &'static str;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::try_new(s)
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }

        impl PartialEq<String> for $Name {
            fn eq(&self, other: &String) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_newtype_string;
