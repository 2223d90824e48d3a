use crate::model::OrderError;
use crate::shelf::ShelfError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// An order as supplied by the order feed.
///
/// Orders are immutable once received. The field names follow the feed's JSON
/// (`id`, `name`, `temp`, `shelfLife`, `decayRate`) so a batch can be read with
/// `serde_json` directly.
///
/// The temperature is kept as the raw feed string; it is resolved against the
/// fixed [`Temperature`] set at the shelf registry, where unknown values are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub name: String,
    pub temp: String,
    /// Seconds the order stays fresh before any decay is applied.
    pub shelf_life: u32,
    pub decay_rate: f32,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        temp: impl Into<String>,
        shelf_life: u32,
        decay_rate: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temp: temp.into(),
            shelf_life,
            decay_rate,
        }
    }

    /// Resolves the raw temperature string.
    pub fn temperature(&self) -> Result<Temperature, ShelfError> {
        self.temp.parse()
    }

    /// Structural checks the feed is expected to guarantee.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::Validation("empty order id".to_string()));
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(OrderError::Validation(format!(
                "order {} has invalid decay rate {}",
                self.id, self.decay_rate
            )));
        }
        self.temperature()?;
        Ok(())
    }
}

/// The fixed set of temperature classes, one home shelf and one overflow
/// compartment each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    pub const ALL: [Temperature; 3] = [Temperature::Hot, Temperature::Cold, Temperature::Frozen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Frozen => "frozen",
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Temperature {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Temperature::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShelfError::UnknownTemperature(s.to_string()))
    }
}
