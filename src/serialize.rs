//! Saving and loading as JSON, to strings and files.
//!
//! Anything serde can round-trip gets [Persist] for free; populations, single networks and
//! configs are all stored this way.

use crate::error::NeatError;
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

pub trait Persist: Sized {
    fn to_json(&self) -> Result<String, NeatError>;

    fn from_json(s: &str) -> Result<Self, NeatError>;

    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), NeatError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NeatError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl<T: Serialize + DeserializeOwned> Persist for T {
    fn to_json(&self) -> Result<String, NeatError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_json(s: &str) -> Result<Self, NeatError> {
        Ok(serde_json::from_str(s)?)
    }
}
