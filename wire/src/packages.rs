//! Dancing group and special package payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dancing group package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DancingPackage {
    pub id: Uuid,
    pub name: String,
    pub details: String,
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for a dancing group package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DancingPackageRequest {
    pub name: String,
    pub details: String,
    pub price: f64,
}

/// A special (bundled) package. The backend derives `priceWithoutTransport`
/// from price and discount; the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialPackage {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub free_of_charge_items: Option<String>,
    pub price: f64,
    pub discount: f64,
    #[serde(default)]
    pub price_without_transport: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for a special package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialPackageRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_of_charge_items: Option<String>,
    pub price: f64,
    pub discount_percentage: f64,
}
