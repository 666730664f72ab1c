//! Sales sub-document attached to a session.
//!
//! Stored and returned as a single embedded document. Members the client
//! leaves out default to zero/empty so partially-filled forms round-trip.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How the patron came to this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    #[default]
    Normal,
    First,
    /// The patron nominated a specific staff member.
    Shimei,
}

/// One itemized order line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub amount: f64,
}

/// Charge breakdown for a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesInfo {
    pub table_charge: f64,
    pub order_items: Vec<OrderItem>,
    pub visit_type: VisitType,
    pub stay_hours: f64,
    pub shimei_fee: f64,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

impl SalesInfo {
    /// Reads a client-supplied document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::invalid_format("salesInfo", e.to_string()))
    }
}
