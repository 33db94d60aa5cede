//! Serde helpers for integers the node encodes as JSON strings.
//!
//! Tendermint-style nodes send 64-bit integers (heights, voting power) as
//! decimal strings so JavaScript clients don't lose precision. Older nodes
//! and hand-written fixtures sometimes send plain numbers, so decoding
//! accepts both. Encoding always writes the string form.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber<T> {
    String(String),
    Number(T),
}

/// Deserialize an integer from either `"123"` or `123`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match StringOrNumber::<T>::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.trim().parse().map_err(de::Error::custom),
        StringOrNumber::Number(n) => Ok(n),
    }
}

/// Serialize an integer as a decimal string.
pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.collect_str(value)
}
