// Module name shadows the `serde` crate, use `::serde` for the external crate.

/// Calendar dates on the wire as `YYYY-MM-DD`.
///
/// An unknown date serializes as `null`. On input both `null` and the empty
/// string mean "unknown". Use with `#[serde(with = "cinema_core::serde::date_opt", default)]`.
pub mod date_opt {
    use ::serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use chrono::NaiveDate;

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), FORMAT)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid date {raw:?}: {e}"))),
        }
    }
}

/// Read `null` as `T::default()`. Pair with `#[serde(default)]` so a missing
/// field behaves the same.
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: ::serde::Deserializer<'de>,
    T: ::serde::Deserialize<'de> + Default,
{
    <Option<T> as ::serde::Deserialize>::deserialize(d).map(Option::unwrap_or_default)
}
