//! Declarative macros for wire-string enums
//!
//! The command catalog and its companion enums are closed sets of values
//! that travel as fixed strings. `wire_enum!` generates the enum, its wire
//! string mapping, serde support, `Display` and `FromStr` from one table.

/// Define a closed enum whose variants map one-to-one onto wire strings
///
/// # Example
/// ```rust,ignore
/// wire_enum! {
///     /// Execution schedule of a command
///     pub enum Schedule: "schedule" {
///         /// Run as soon as the device checks in
///         Immediate => "IMMEDIATE",
///         Window => "WINDOW",
///     }
/// }
/// ```
macro_rules! wire_enum {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident : $parameter:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The string sent over the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::command::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)*
                    other => Err($crate::command::ValidationError::invalid_value(
                        $parameter,
                        other,
                        concat!("not a known ", $parameter),
                    )),
                }
            }
        }
    };
}

pub(crate) use wire_enum;
