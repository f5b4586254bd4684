//! Canonical-map round trip shared by every entity.
//!
//! The canonical map is the JSON object an entity serializes to. Absent
//! optional fields are omitted rather than written as `null`, so
//! `from_map(to_map(x)) == x` holds for every entity.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

pub type CanonicalObject = Map<String, Value>;

pub trait CanonicalMap: Sized {
    fn to_map(&self) -> Result<CanonicalObject>;

    fn from_map(map: CanonicalObject) -> Result<Self>;

    fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Value::Object(self.to_map()?))?)
    }

    fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str(json)? {
            Value::Object(map) => Self::from_map(map),
            _ => Err(ModelError::NotAMap {
                type_name: std::any::type_name::<Self>(),
            }),
        }
    }
}

impl<T> CanonicalMap for T
where
    T: Serialize + DeserializeOwned,
{
    fn to_map(&self) -> Result<CanonicalObject> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(ModelError::NotAMap {
                type_name: std::any::type_name::<T>(),
            }),
        }
    }

    fn from_map(map: CanonicalObject) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}
