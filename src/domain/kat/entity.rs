//! Kat entity and related types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{validate_kat_id, validate_kat_name, KatValidationError};

/// Kat identifier - auto-assigned by the persistence layer, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct KatId(i64);

impl KatId {
    /// Create a new KatId after validation
    pub fn new(id: i64) -> Result<Self, KatValidationError> {
        validate_kat_id(id)?;
        Ok(Self(id))
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for KatId {
    type Error = KatValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KatId> for i64 {
    fn from(id: KatId) -> Self {
        id.0
    }
}

impl FromStr for KatId {
    type Err = KatValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| KatValidationError::InvalidId)?;
        Self::new(id)
    }
}

impl fmt::Display for KatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kat that has not been persisted yet and therefore has no ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKat {
    name: String,
    age: i32,
}

impl NewKat {
    pub fn new(name: impl Into<String>, age: i32) -> Result<Self, KatValidationError> {
        let name = name.into();
        validate_kat_name(&name)?;

        Ok(Self { name, age })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Attach the identifier assigned by the persistence layer
    pub fn into_kat(self, id: KatId) -> Kat {
        Kat {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

/// Kat entity - one kitten record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kat {
    id: KatId,
    /// The name of the kat
    name: String,
    age: i32,
}

impl Kat {
    pub fn new(id: KatId, name: impl Into<String>, age: i32) -> Result<Self, KatValidationError> {
        Ok(NewKat::new(name, age)?.into_kat(id))
    }

    // Getters

    pub fn id(&self) -> KatId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), KatValidationError> {
        let name = name.into();
        validate_kat_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }
}

impl fmt::Display for Kat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.age)
    }
}
