//! Typed identifiers.
//!
//! Every identifier is a string newtype so a `TemplateId` can never be passed where a
//! `ValueId` is expected. They serialize as bare strings.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a [`Category`](super::Category).
    CategoryId
);
string_id!(
    /// Identifies a [`VariantTemplate`](super::VariantTemplate).
    TemplateId
);
string_id!(
    /// Identifies a [`VariantValue`](super::VariantValue) within its template.
    ValueId
);
string_id!(
    /// Identifies a [`Product`](super::Product).
    ProductId
);
