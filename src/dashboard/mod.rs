//! Widget loading for the combined dashboard.
//!
//! Each widget is fetched on its own scoped thread and caught on its own, so
//! a failing endpoint only replaces its widget with an inline message. The
//! overview is the one join: basic, brand and country stats are fetched
//! together and the widget fails if any of the three fails.

use std::thread;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::models::{BasicStats, ProductQuantity, WarehouseList};
use crate::api::{FetchError, StatsSource};
use crate::config::schema::DisplayConfig;
use crate::metrics::distribution::{self, ChartSlice, DistributionLine, SizeRow};
use crate::view::Layout;
use crate::view::render;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A valid response with zero records.
    #[error("no data")]
    Empty,

    #[error("widget loader crashed")]
    Crashed,
}

pub type WidgetResult<T> = Result<T, WidgetError>;

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Basic counts plus brand and country shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub basic: BasicStats,
    pub brands: Vec<DistributionLine>,
    pub countries: Vec<DistributionLine>,
}

/// Fetch basic, brand and country stats concurrently; all must succeed.
pub fn load_overview<S: StatsSource + ?Sized>(source: &S) -> WidgetResult<Overview> {
    let (basic, brands, countries) = thread::scope(|scope| {
        let basic = scope.spawn(|| source.basic_stats());
        let brands = scope.spawn(|| source.brand_stats());
        let countries = scope.spawn(|| source.warehouse_countries());
        (join(basic), join(brands), join(countries))
    });

    let basic = basic?;
    let brands = brands?;
    let countries = countries?;

    Ok(Overview {
        brands: distribution::with_shares(&brands.brands, basic.product_count),
        countries: distribution::with_shares(&countries.countries, basic.warehouse_count),
        basic,
    })
}

pub fn load_size_chart<S: StatsSource + ?Sized>(
    source: &S,
    slices: usize,
) -> WidgetResult<Vec<ChartSlice>> {
    let inventory = source.inventory_by_size()?;
    if inventory.sizes.is_empty() {
        return Err(WidgetError::Empty);
    }
    Ok(distribution::size_chart(&inventory.sizes, slices))
}

pub fn load_size_table<S: StatsSource + ?Sized>(source: &S) -> WidgetResult<Vec<SizeRow>> {
    let inventory = source.inventory_by_size()?;
    if inventory.sizes.is_empty() {
        return Err(WidgetError::Empty);
    }
    Ok(distribution::size_table(&inventory.sizes))
}

pub fn load_top_products<S: StatsSource + ?Sized>(
    source: &S,
) -> WidgetResult<Vec<ProductQuantity>> {
    let top = source.top_products()?;
    if top.products.is_empty() {
        return Err(WidgetError::Empty);
    }
    Ok(top.products)
}

pub fn load_warehouses<S: StatsSource + ?Sized>(source: &S) -> WidgetResult<WarehouseList> {
    let list = source.warehouse_list()?;
    if list.warehouses.is_empty() {
        return Err(WidgetError::Empty);
    }
    Ok(list)
}

pub fn load_insights<S: StatsSource + ?Sized>(source: &S) -> WidgetResult<String> {
    let html = source.insights()?;
    if html.trim().is_empty() {
        return Err(WidgetError::Empty);
    }
    Ok(html)
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T, FetchError>>) -> WidgetResult<T> {
    match handle.join() {
        Ok(result) => result.map_err(WidgetError::from),
        Err(_) => Err(WidgetError::Crashed),
    }
}

fn join_widget<T>(handle: thread::ScopedJoinHandle<'_, WidgetResult<T>>) -> WidgetResult<T> {
    handle.join().unwrap_or(Err(WidgetError::Crashed))
}

// ---------------------------------------------------------------------------
// Combined dashboard
// ---------------------------------------------------------------------------

/// Every widget's independent outcome.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub overview: WidgetResult<Overview>,
    pub sizes: WidgetResult<Vec<ChartSlice>>,
    pub products: WidgetResult<Vec<ProductQuantity>>,
    pub warehouses: WidgetResult<WarehouseList>,
    pub insights: WidgetResult<String>,
}

/// Load every widget concurrently. Arrival order does not matter.
pub fn load_all<S: StatsSource + ?Sized>(source: &S, display: &DisplayConfig) -> Dashboard {
    let dashboard = thread::scope(|scope| {
        let overview = scope.spawn(|| load_overview(source));
        let sizes = scope.spawn(|| load_size_chart(source, display.chart_slices));
        let products = scope.spawn(|| load_top_products(source));
        let warehouses = scope.spawn(|| load_warehouses(source));
        let insights = scope.spawn(|| load_insights(source));

        Dashboard {
            overview: join_widget(overview),
            sizes: join_widget(sizes),
            products: join_widget(products),
            warehouses: join_widget(warehouses),
            insights: join_widget(insights),
        }
    });

    for (name, outcome) in dashboard.outcomes() {
        match outcome {
            Some(WidgetError::Empty) | None => debug!(widget = name, "loaded"),
            Some(error) => warn!(widget = name, %error, "widget failed"),
        }
    }

    dashboard
}

impl Dashboard {
    fn outcomes(&self) -> [(&'static str, Option<&WidgetError>); 5] {
        [
            ("overview", self.overview.as_ref().err()),
            ("sizes", self.sizes.as_ref().err()),
            ("products", self.products.as_ref().err()),
            ("warehouses", self.warehouses.as_ref().err()),
            ("insights", self.insights.as_ref().err()),
        ]
    }

    /// Number of widgets that failed with a fetch error or crash.
    pub fn failed_count(&self) -> usize {
        self.outcomes()
            .iter()
            .filter(|(_, e)| matches!(e, Some(err) if **err != WidgetError::Empty))
            .count()
    }

    /// Render every widget, replacing failed ones with inline messages.
    pub fn render(&self, layout: Layout, bar_width: usize) -> String {
        let sections = [
            render_widget("Overview", &self.overview, |o| {
                render::overview(&o.basic, &o.brands, &o.countries)
            }),
            render_widget("Inventory by size", &self.sizes, |s| {
                render::size_chart(s, layout, bar_width)
            }),
            render_widget("Top products", &self.products, |p| render::top_products(p)),
            render_widget("Warehouses", &self.warehouses, render::warehouse_list),
            render_widget("Insights", &self.insights, |html| {
                render::assistant_text("Insights", html)
            }),
        ];
        sections.join("\n")
    }
}

fn render_widget<T>(
    title: &str,
    result: &WidgetResult<T>,
    render_ok: impl Fn(&T) -> String,
) -> String {
    match result {
        Ok(value) => render_ok(value),
        Err(WidgetError::Empty) => render::widget_empty(title),
        Err(error) => render::widget_error(title, &error.to_string()),
    }
}
