//! Wire types for the statistics API.
//!
//! Field names follow the backend's JSON. Shipment payloads use Spanish keys
//! (`almacen`, `envios`, `tienda`, `productos`, `producto`, `tallas`); they
//! are renamed to English on the Rust side.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Overview widgets
// ---------------------------------------------------------------------------

/// `GET /api/basic_stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicStats {
    pub warehouse_count: u64,
    pub product_count: u64,
    pub store_count: u64,
}

/// A `(name, count)` pair in a categorical distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

/// `GET /api/brand_stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandStats {
    #[serde(default)]
    pub brands: Vec<NamedCount>,
}

/// `GET /api/warehouse_countries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryStats {
    #[serde(default)]
    pub countries: Vec<NamedCount>,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// One size bucket from `GET /api/inventory_by_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryBySize {
    #[serde(default)]
    pub sizes: Vec<SizeQuantity>,
}

/// One row of `GET /api/top_products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopProducts {
    #[serde(default)]
    pub products: Vec<ProductQuantity>,
}

// ---------------------------------------------------------------------------
// Shipments
// ---------------------------------------------------------------------------

/// One product's entry within a shipment. Repeated sizes are separate units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    #[serde(rename = "producto")]
    pub product_id: String,
    #[serde(rename = "tallas", default)]
    pub sizes: Vec<String>,
}

/// One store's delivery record from a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "tienda")]
    pub store_id: String,
    #[serde(rename = "productos", default)]
    pub products: Vec<ProductLine>,
}

/// A warehouse and the shipments it sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseShipmentSet {
    #[serde(rename = "almacen")]
    pub warehouse_id: String,
    #[serde(rename = "envios", alias = "envíos", default)]
    pub shipments: Vec<Shipment>,
}

/// `GET /api/warehouse_shipments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseList {
    #[serde(rename = "almacenes", default)]
    pub warehouses: Vec<WarehouseShipmentSet>,
}

/// `GET /api/warehouse_shipments/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseDetail {
    #[serde(rename = "envios", alias = "envíos", default)]
    pub shipments: Vec<Shipment>,
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// `POST /api/ask_gemini` request body.
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// `POST /api/ask_gemini` success body. The answer is HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// `GET /api/get_insights`. The insights are HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct Insights {
    pub insights: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
