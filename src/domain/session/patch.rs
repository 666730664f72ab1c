//! Sparse updates.
//!
//! `FieldUpdate` separates "the client did not mention this field" from
//! "the client explicitly set it to null", which a plain `Option` cannot.

use chrono::{DateTime, FixedOffset};

use super::sales::SalesInfo;

/// One optional slot of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Field absent from the request: keep the stored value.
    #[default]
    Unchanged,
    /// Field present but null: clear the stored value.
    Clear,
    /// Field present with a value: overwrite.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// `None` clears, `Some` sets.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Clear,
        }
    }

    /// Maps the `Option<Option<T>>` shape produced by serde for nullable
    /// fields that may also be absent.
    pub fn from_nullable(value: Option<Option<T>>) -> Self {
        match value {
            None => FieldUpdate::Unchanged,
            Some(inner) => FieldUpdate::from_option(inner),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    /// Applies the update to a nullable slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => *slot = None,
            FieldUpdate::Set(v) => *slot = Some(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
            FieldUpdate::Clear => FieldUpdate::Clear,
            FieldUpdate::Set(v) => FieldUpdate::Set(f(v)),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FieldUpdate<U>, E> {
        Ok(match self {
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
            FieldUpdate::Clear => FieldUpdate::Clear,
            FieldUpdate::Set(v) => FieldUpdate::Set(f(v)?),
        })
    }
}

/// Sparse update of a session's base columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPatch {
    /// The date-time column is not nullable, so it can only be replaced.
    pub datetime: Option<DateTime<FixedOffset>>,
    pub table_number: FieldUpdate<String>,
    pub memo: FieldUpdate<String>,
    pub sales_info: FieldUpdate<SalesInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_keeps_slot() {
        let mut slot = Some("A-1".to_string());
        FieldUpdate::Unchanged.apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("A-1"));
    }

    #[test]
    fn clear_empties_slot() {
        let mut slot = Some("A-1".to_string());
        FieldUpdate::<String>::Clear.apply_to(&mut slot);
        assert!(slot.is_none());
    }

    #[test]
    fn set_overwrites_slot() {
        let mut slot = None;
        FieldUpdate::Set("B-2".to_string()).apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("B-2"));
    }

    #[test]
    fn nullable_shape_maps_to_three_states() {
        assert_eq!(FieldUpdate::<i32>::from_nullable(None), FieldUpdate::Unchanged);
        assert_eq!(FieldUpdate::<i32>::from_nullable(Some(None)), FieldUpdate::Clear);
        assert_eq!(FieldUpdate::from_nullable(Some(Some(5))), FieldUpdate::Set(5));
    }
}
