//! Directory records as served by the users endpoint.
//!
//! Only the fields the browser displays are kept; anything else in the
//! payload is ignored. String fields that are absent or `null` decode as
//! empty strings so search and sort never have to deal with holes.
use serde::{Deserialize, Deserializer};

/// Base URL of the avatar service; the user id is appended as `u=<id>`.
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/100";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
}

/// One entry of the directory. Read-only once loaded.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl User {
    /// Avatar image location for this user.
    pub fn avatar_url(&self) -> String {
        format!("{AVATAR_BASE_URL}?u={}", self.id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
