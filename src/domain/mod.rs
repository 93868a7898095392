pub mod deletion;
pub mod order;
pub mod review;

pub use deletion::*;
pub use order::*;
pub use review::*;

use std::fmt;

/// Which table a record lives in. Used to label errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Order,
    Review,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Order => write!(f, "Order"),
            EntityKind::Review => write!(f, "Review"),
        }
    }
}

/// Store-issued row identifier.
pub trait RecordId: Copy + Eq + fmt::Display + fmt::Debug + Send + Sync + 'static {
    fn from_raw(raw: i64) -> Self;
    fn raw(self) -> i64;
}

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl RecordId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(OrderId);
record_id!(ReviewId);
