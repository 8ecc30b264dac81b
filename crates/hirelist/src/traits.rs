//! The accessor trait every list item implements.

use crate::record::RecordId;
use crate::value::Value;

/// Trait for types that can flow through the list pipeline.
///
/// [`Record`](crate::Record) implements it for schema-less data. Typed
/// entities can implement it by hand, which is how callers supply their
/// own field accessors.
///
/// ```
/// use hirelist::{Number, RecordId, Seekable, Value};
///
/// struct Offer {
///     id: u32,
///     candidate: String,
///     amount: u64,
/// }
///
/// impl Seekable for Offer {
///     fn record_id(&self) -> RecordId {
///         RecordId::from(self.id)
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "candidate" => Value::String(&self.candidate),
///             "amount" => Value::Number(Number::U64(self.amount)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the record's identity, used for selection bookkeeping.
    fn record_id(&self) -> RecordId;

    /// Returns the value of a field, or [`Value::None`] if the field
    /// doesn't exist on this item.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Function-pointer form of [`field_value`](Seekable::field_value).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct Interview {
        id: u32,
        stage: String,
        round: i32,
    }

    impl Seekable for Interview {
        fn record_id(&self) -> RecordId {
            RecordId::from(self.id)
        }

        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "stage" => Value::String(&self.stage),
                "round" => Value::Number(Number::I64(self.round as i64)),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn seekable_manual_impl() {
        let item = Interview {
            id: 9,
            stage: "onsite".to_string(),
            round: 2,
        };

        assert_eq!(item.record_id().as_str(), "9");
        assert_eq!(item.field_value("stage"), Value::String("onsite"));
        assert_eq!(
            Interview::accessor(&item, "round"),
            Value::Number(Number::I64(2))
        );
        assert_eq!(item.field_value("unknown"), Value::None);
    }
}
