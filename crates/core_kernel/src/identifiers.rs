//! Strongly-typed identifiers
//!
//! Sales are not persisted as entities, but every recorded sale gets an
//! identifier so that log lines and outcomes can be correlated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

const SALE_PREFIX: &str = "SALE";

/// Identifier of a single recorded sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Creates a new time-ordered identifier (v7), so ids sort by recording time
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", SALE_PREFIX, self.0)
    }
}

impl FromStr for SaleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(SALE_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(s);
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| CoreError::validation(format!("invalid sale id {:?}: {}", s, e)))
    }
}

impl From<Uuid> for SaleId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
