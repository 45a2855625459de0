//! HTTP client for the statistics API.
//!
//! Uses the synchronous `ureq` client. Every endpoint is exposed through the
//! [`StatsSource`] trait so widgets and views can be driven by a fake source
//! in tests.
//!
//! Any body that carries a string `error` field is treated as a server error,
//! whatever the HTTP status says.

pub mod error;
pub mod models;

use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use error::FetchError;
use models::{
    AskRequest, AskResponse, BasicStats, BrandStats, CountryStats, Insights, InventoryBySize,
    TopProducts, WarehouseDetail, WarehouseList,
};

use crate::config::schema::ApiConfig;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

pub const BASIC_STATS: &str = "/api/basic_stats";
pub const BRAND_STATS: &str = "/api/brand_stats";
pub const WAREHOUSE_COUNTRIES: &str = "/api/warehouse_countries";
pub const INVENTORY_BY_SIZE: &str = "/api/inventory_by_size";
pub const TOP_PRODUCTS: &str = "/api/top_products";
pub const WAREHOUSE_SHIPMENTS: &str = "/api/warehouse_shipments";
pub const ASK: &str = "/api/ask_gemini";
pub const INSIGHTS: &str = "/api/get_insights";

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Everything the dashboard reads from the backend.
pub trait StatsSource: Sync {
    fn basic_stats(&self) -> error::Result<BasicStats>;
    fn brand_stats(&self) -> error::Result<BrandStats>;
    fn warehouse_countries(&self) -> error::Result<CountryStats>;
    fn inventory_by_size(&self) -> error::Result<InventoryBySize>;
    fn top_products(&self) -> error::Result<TopProducts>;
    fn warehouse_list(&self) -> error::Result<WarehouseList>;
    fn warehouse_detail(&self, warehouse_id: &str) -> error::Result<WarehouseDetail>;

    /// Forward a question to the assistant; returns the answer HTML.
    fn ask(&self, question: &str) -> error::Result<String>;

    /// Precomputed assistant insights as HTML.
    fn insights(&self) -> error::Result<String>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// `ureq`-backed [`StatsSource`].
///
/// Cheap to clone: the underlying agent shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
    ask_timeout: Duration,
}

impl ApiClient {
    /// Build a client from the resolved `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
            ask_timeout: Duration::from_millis(config.ask_timeout_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> error::Result<T> {
        let started = Instant::now();
        let result = self.agent.get(&self.url(path)).call();
        debug!(path, elapsed_ms = started.elapsed().as_millis() as u64, "GET");
        decode_response(path, result)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> error::Result<T> {
        let started = Instant::now();
        let result = self.agent.post(&self.url(path)).timeout(timeout).send_json(body);
        debug!(path, elapsed_ms = started.elapsed().as_millis() as u64, "POST");
        decode_response(path, result)
    }
}

impl StatsSource for ApiClient {
    fn basic_stats(&self) -> error::Result<BasicStats> {
        self.get_json(BASIC_STATS)
    }

    fn brand_stats(&self) -> error::Result<BrandStats> {
        self.get_json(BRAND_STATS)
    }

    fn warehouse_countries(&self) -> error::Result<CountryStats> {
        self.get_json(WAREHOUSE_COUNTRIES)
    }

    fn inventory_by_size(&self) -> error::Result<InventoryBySize> {
        self.get_json(INVENTORY_BY_SIZE)
    }

    fn top_products(&self) -> error::Result<TopProducts> {
        self.get_json(TOP_PRODUCTS)
    }

    fn warehouse_list(&self) -> error::Result<WarehouseList> {
        self.get_json(WAREHOUSE_SHIPMENTS)
    }

    fn warehouse_detail(&self, warehouse_id: &str) -> error::Result<WarehouseDetail> {
        let path = format!(
            "{WAREHOUSE_SHIPMENTS}/{}",
            urlencoding::encode(warehouse_id)
        );
        self.get_json(&path)
    }

    fn ask(&self, question: &str) -> error::Result<String> {
        let resp: AskResponse =
            self.post_json(ASK, &AskRequest { question }, self.ask_timeout)?;
        Ok(resp.answer)
    }

    fn insights(&self) -> error::Result<String> {
        let resp: Insights = self.get_json(INSIGHTS)?;
        Ok(resp.insights)
    }
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

fn decode_response<T: DeserializeOwned>(
    path: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> error::Result<T> {
    match result {
        Ok(resp) => {
            let body = resp
                .into_string()
                .map_err(|e| FetchError::Network(format!("{path}: {e}")))?;
            decode_body(&body)
        }
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            let message = server_error_message(&body).unwrap_or_else(|| format!("HTTP {code}"));
            warn!(path, code, %message, "request rejected");
            Err(FetchError::Server(message))
        }
        Err(ureq::Error::Transport(transport)) => {
            warn!(path, error = %transport, "transport failure");
            Err(FetchError::Network(transport.to_string()))
        }
    }
}

/// Parse a successful body, surfacing an embedded `error` field first.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> error::Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(message) = error_field(&value) {
        return Err(FetchError::Server(message));
    }

    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

fn server_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    error_field(&value)
}

fn error_field(value: &serde_json::Value) -> Option<String> {
    value.get("error")?.as_str().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
