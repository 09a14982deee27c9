//! Raw deal records as they appear in the dataset document.
//!
//! Every field is optional at this level so that a missing field is reported
//! as a `DataError` naming the field and the deal, rather than as an opaque
//! JSON error. Durations, costs and discounts are accepted either as JSON
//! numbers or as numeric strings (`"h": "05"`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DataError, Deal, Location, Reference, Transport, TravelTime};
use crate::graph::GraphModel;

use super::error::DatasetError;

/// Duration as listed in the dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDuration {
    pub h: Option<Value>,
    pub m: Option<Value>,
}

/// One deal as listed in the dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDeal {
    pub transport: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration: Option<RawDuration>,
    pub cost: Option<Value>,
    pub discount: Option<Value>,
    pub reference: Option<String>,
}

/// The dataset document: a currency and a flat list of deals.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DealSet {
    #[serde(default)]
    pub currency: Option<String>,
    pub deals: Vec<RawDeal>,
}

impl DealSet {
    /// Parse a dataset document.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })
    }

    /// Read and parse a dataset document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate every record, keeping source order.
    pub fn into_deals(self) -> Result<Vec<Deal>, DataError> {
        self.deals
            .into_iter()
            .enumerate()
            .map(|(position, raw)| raw.into_deal(position))
            .collect()
    }

    /// Validate every record and build the graph.
    pub fn into_graph(self) -> Result<GraphModel, DataError> {
        GraphModel::new(self.into_deals()?)
    }
}

impl RawDeal {
    /// Validate this record. `position` labels the deal in errors when it
    /// has no reference.
    pub fn into_deal(self, position: usize) -> Result<Deal, DataError> {
        let label = self
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{position}"));

        let reference = self
            .reference
            .as_deref()
            .and_then(Reference::parse)
            .ok_or_else(|| missing(&label, "reference"))?;
        let departure = location(self.departure.as_deref(), "departure", &label)?;
        let arrival = location(self.arrival.as_deref(), "arrival", &label)?;
        let transport = self
            .transport
            .map(Transport::new)
            .ok_or_else(|| missing(&label, "transport"))?;

        let duration = self.duration.ok_or_else(|| missing(&label, "duration"))?;
        let hours = whole_number(duration.h.as_ref(), "duration.h", &label)?;
        let minutes = whole_number(duration.m.as_ref(), "duration.m", &label)?;

        let cost = amount(self.cost.as_ref(), "cost", &label)?;
        let discount = match self.discount {
            Some(value) => whole_number(Some(&value), "discount", &label)?,
            None => 0,
        };

        Deal::new(
            reference,
            departure,
            arrival,
            transport,
            TravelTime::new(hours, minutes),
            cost,
            discount,
        )
    }
}

fn missing(deal: &str, field: &'static str) -> DataError {
    DataError::MissingField {
        deal: deal.to_string(),
        field,
    }
}

fn invalid(deal: &str, field: &'static str, reason: String) -> DataError {
    DataError::InvalidField {
        deal: deal.to_string(),
        field,
        reason,
    }
}

fn location(value: Option<&str>, field: &'static str, deal: &str) -> Result<Location, DataError> {
    let value = value.ok_or_else(|| missing(deal, field))?;
    Location::parse(value).map_err(|e| invalid(deal, field, e.to_string()))
}

fn whole_number(value: Option<&Value>, field: &'static str, deal: &str) -> Result<u32, DataError> {
    let value = value.ok_or_else(|| missing(deal, field))?;
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        invalid(
            deal,
            field,
            format!("expected a non-negative whole number, got {value}"),
        )
    })
}

fn amount(value: Option<&Value>, field: &'static str, deal: &str) -> Result<f64, DataError> {
    let value = value.ok_or_else(|| missing(deal, field))?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(deal, field, format!("expected a number, got {value}")))
}
