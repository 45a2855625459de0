/// Widget isolation, the overview join and the assistant, driven by an
/// in-memory [`StatsSource`].
use std::sync::atomic::{AtomicUsize, Ordering};

use stockdash::api::models::{
    BasicStats, BrandStats, CountryStats, InventoryBySize, NamedCount, ProductQuantity,
    SizeQuantity, TopProducts, WarehouseDetail, WarehouseList, WarehouseShipmentSet,
};
use stockdash::api::{FetchError, StatsSource, error};
use stockdash::assistant::{self, AskError, history};
use stockdash::config::schema::DisplayConfig;
use stockdash::dashboard::{self, WidgetError};
use stockdash::view::Layout;

// ---------------------------------------------------------------------------
// Fake source
// ---------------------------------------------------------------------------

/// Serves canned payloads; endpoints listed in `failing` return a network
/// failure instead.
#[derive(Default)]
struct FakeSource {
    failing: Vec<&'static str>,
    empty_sizes: bool,
    asks: AtomicUsize,
}

impl FakeSource {
    fn failing(endpoints: &[&'static str]) -> Self {
        Self {
            failing: endpoints.to_vec(),
            ..Self::default()
        }
    }

    fn check(&self, endpoint: &str) -> error::Result<()> {
        if self.failing.iter().any(|f| *f == endpoint) {
            Err(FetchError::Network(format!("{endpoint} unreachable")))
        } else {
            Ok(())
        }
    }
}

fn named(name: &str, count: u64) -> NamedCount {
    NamedCount {
        name: name.to_string(),
        count,
    }
}

impl StatsSource for FakeSource {
    fn basic_stats(&self) -> error::Result<BasicStats> {
        self.check("basic")?;
        Ok(BasicStats {
            warehouse_count: 2,
            product_count: 10,
            store_count: 5,
        })
    }

    fn brand_stats(&self) -> error::Result<BrandStats> {
        self.check("brands")?;
        Ok(BrandStats {
            brands: vec![named("Nike", 7), named("Puma", 3)],
        })
    }

    fn warehouse_countries(&self) -> error::Result<CountryStats> {
        self.check("countries")?;
        Ok(CountryStats {
            countries: vec![named("España", 2)],
        })
    }

    fn inventory_by_size(&self) -> error::Result<InventoryBySize> {
        self.check("sizes")?;
        if self.empty_sizes {
            return Ok(InventoryBySize::default());
        }
        Ok(InventoryBySize {
            sizes: vec![
                SizeQuantity {
                    size: "S".to_string(),
                    quantity: 25,
                },
                SizeQuantity {
                    size: "M".to_string(),
                    quantity: 75,
                },
            ],
        })
    }

    fn top_products(&self) -> error::Result<TopProducts> {
        self.check("products")?;
        Ok(TopProducts {
            products: vec![ProductQuantity {
                id: "P1".to_string(),
                quantity: 90,
            }],
        })
    }

    fn warehouse_list(&self) -> error::Result<WarehouseList> {
        self.check("warehouses")?;
        Ok(WarehouseList {
            warehouses: vec![WarehouseShipmentSet {
                warehouse_id: "ALM-1".to_string(),
                shipments: vec![],
            }],
        })
    }

    fn warehouse_detail(&self, _warehouse_id: &str) -> error::Result<WarehouseDetail> {
        self.check("detail")?;
        Ok(WarehouseDetail::default())
    }

    fn ask(&self, question: &str) -> error::Result<String> {
        self.asks.fetch_add(1, Ordering::SeqCst);
        self.check("ask")?;
        Ok(format!("<p>Respuesta a: {question}</p>"))
    }

    fn insights(&self) -> error::Result<String> {
        self.check("insights")?;
        Ok("<ul><li>Reponer M</li></ul>".to_string())
    }
}

// ---------------------------------------------------------------------------
// Widget isolation
// ---------------------------------------------------------------------------

#[test]
fn every_widget_loads_from_healthy_source() {
    let board = dashboard::load_all(&FakeSource::default(), &DisplayConfig::default());

    assert_eq!(board.failed_count(), 0);
    let overview = board.overview.as_ref().unwrap();
    assert_eq!(overview.brands[0].percent, "70.0%");
    assert_eq!(overview.countries[0].percent, "100.0%");

    let sizes = board.sizes.as_ref().unwrap();
    assert_eq!(sizes[0].label, "M");
    assert_eq!(sizes[0].share, "75.0%");
}

#[test]
fn one_failing_widget_leaves_the_rest_intact() {
    let source = FakeSource::failing(&["products"]);
    let board = dashboard::load_all(&source, &DisplayConfig::default());

    assert!(matches!(
        board.products,
        Err(WidgetError::Fetch(FetchError::Network(_)))
    ));
    assert!(board.overview.is_ok());
    assert!(board.sizes.is_ok());
    assert!(board.warehouses.is_ok());
    assert!(board.insights.is_ok());
    assert_eq!(board.failed_count(), 1);

    colored::control::set_override(false);
    let text = board.render(Layout::Wide, 20);
    assert!(text.contains("products unreachable"));
    assert!(text.contains("Inventory by size"));
    assert!(text.contains("ALM-1"));
    assert!(text.contains("• Reponer M"));
}

#[test]
fn overview_fails_when_any_part_fails() {
    for part in ["basic", "brands", "countries"] {
        let source = FakeSource::failing(&[part]);
        let result = dashboard::load_overview(&source);
        assert!(
            matches!(result, Err(WidgetError::Fetch(FetchError::Network(ref m))) if m.contains(part)),
            "{part}: {result:?}"
        );
    }
}

#[test]
fn empty_inventory_is_empty_not_failure() {
    let source = FakeSource {
        empty_sizes: true,
        ..FakeSource::default()
    };
    let board = dashboard::load_all(&source, &DisplayConfig::default());

    assert_eq!(board.sizes, Err(WidgetError::Empty));
    assert_eq!(board.failed_count(), 0);

    colored::control::set_override(false);
    let text = board.render(Layout::Compact, 20);
    assert!(text.contains("Inventory by size\n  no data"));
}

#[test]
fn chart_slices_follow_display_config() {
    let display = DisplayConfig {
        chart_slices: 1,
        ..DisplayConfig::default()
    };
    let board = dashboard::load_all(&FakeSource::default(), &display);
    let sizes = board.sizes.unwrap();
    assert_eq!(sizes.len(), 1);
    assert_eq!(sizes[0].share, "100.0%");
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

#[test]
fn blank_question_is_refused_without_a_request() {
    let source = FakeSource::default();
    assert_eq!(
        assistant::ask(&source, "   \n", None),
        Err(AskError::EmptyQuestion)
    );
    assert_eq!(source.asks.load(Ordering::SeqCst), 0);
}

#[test]
fn answered_and_failed_questions_are_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("ask-history.jsonl");

    let answer = assistant::ask(&FakeSource::default(), " ¿Stock? ", Some(path.as_path())).unwrap();
    assert_eq!(answer, "<p>Respuesta a: ¿Stock?</p>");

    let failing = FakeSource::failing(&["ask"]);
    let err = assistant::ask(&failing, "¿Y ahora?", Some(path.as_path())).unwrap_err();
    assert!(matches!(err, AskError::Fetch(FetchError::Network(_))));

    let entries = history::read_all(&path);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].question, "¿Stock?");
    assert_eq!(entries[0].outcome, "answered");
    assert_eq!(
        entries[0].answer_excerpt.as_deref(),
        Some("Respuesta a: ¿Stock?")
    );
    assert_eq!(entries[1].outcome, "failed");
    assert_eq!(entries[1].error_kind.as_deref(), Some("network"));

    let recent = history::recent(&path, 1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].question, "¿Y ahora?");
}

#[test]
fn history_reader_skips_garbage_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ask-history.jsonl");

    assistant::ask(&FakeSource::default(), "uno", Some(path.as_path())).unwrap();
    {
        use std::io::Write;
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json").unwrap();
    }
    assistant::ask(&FakeSource::default(), "dos", Some(path.as_path())).unwrap();

    let questions: Vec<String> = history::read_all(&path)
        .into_iter()
        .map(|e| e.question)
        .collect();
    assert_eq!(questions, ["uno", "dos"]);
}

#[test]
fn missing_history_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(history::read_all(&dir.path().join("absent.jsonl")).is_empty());
}
