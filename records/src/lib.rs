//! Data model and screen logic for the document-processing admin suite.
//!
//! This crate is UI-framework agnostic: the Leptos client and the operator
//! console both consume it directly. It knows the shape of every REST
//! resource and log record, how to validate and filter them, and how to fold
//! push-channel frames into an already-fetched list. It never performs I/O.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`resource`] | `Row`, `Resource` and `LogRecord` traits |
//! | [`resources`] | Editable entities (tokens, endpoints, rules, …) |
//! | [`logs`] | Immutable log record types |
//! | [`form`] | Field specs and form values for generated forms |
//! | [`validation`] | Field-level validation helpers |
//! | [`table`] | Search/filter/paging state for list screens |
//! | [`optimistic`] | Apply-then-rollback active-flag toggles |
//! | [`feed`] | Live list maintenance from push events |
//! | [`remote`] | Remote-processing request/result correlation |
//! | [`error`] | Error categories surfaced to the user |

/// Closed set of wire strings with display labels, usable as a form select
/// and as an enum filter.
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            #[must_use]
            pub fn from_value(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub mod error;
pub mod feed;
pub mod form;
pub mod logs;
pub mod optimistic;
pub mod remote;
pub mod resource;
pub mod resources;
pub mod table;
pub mod validation;

/// Server-assigned record identifier.
pub type RecordId = i64;

pub use error::ApiError;
pub use resource::{LogRecord, Resource, Row};
pub use validation::ValidationErrors;
