//! `YYYY-MM-DD` calendar dates on the wire.

use serde::{Deserialize, Deserializer, Serializer};
use time::Date;
use time::macros::format_description;

pub(crate) fn fmt_date(d: Date) -> String {
    d.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| d.to_string())
}

pub(super) fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
}

pub(super) fn serialize<S: Serializer>(d: &Date, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&fmt_date(*d))
}

pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(d)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(super) mod option {
    use super::*;

    pub(in crate::model) fn serialize<S: Serializer>(
        d: &Option<Date>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => super::serialize(d, s),
            None => s.serialize_none(),
        }
    }

    pub(in crate::model) fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.is_empty() => parse_date(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
