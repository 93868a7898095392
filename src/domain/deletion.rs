use chrono::{DateTime, Utc};

/// Soft-delete state of a row.
///
/// Stored as the nullable `deleted_at` column: `NULL` is [`Deletion::Active`],
/// a timestamp is [`Deletion::Deleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deletion {
    #[default]
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Deletion {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Deletion::Deleted { .. })
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Deletion::Active => None,
            Deletion::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Deletion {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Deletion::Deleted { at },
            None => Deletion::Active,
        }
    }
}
