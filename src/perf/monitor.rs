//! Live timing of a running list server
//!
//! Once a monitor is built, everything prints to stdout and swallows
//! failures: an unreachable server shows up as a `✗` line, never as an
//! error exit.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;

use crate::{
    domain::source::TransportError,
    infrastructure::http_source::HttpDataSource,
    perf::report::{compare_performance, format_comparison, PerformanceSample},
};

const SERVICE_CHECK_TIMEOUT: Duration = Duration::from_secs(2);
const SAMPLE_TIMEOUT: Duration = Duration::from_secs(10);
const RULE_WIDTH: usize = 70;

/// Page size loaded on first screen by the lazily paged list
pub const LAZY_PAGE_SIZE: u32 = 10;
/// Page size of the eager variant that loads everything at once
pub const EAGER_PAGE_SIZE: u32 = 100;

/// Figures of the fixed demo comparison, before lazy paging
pub const DEMO_BEFORE: PerformanceSample = PerformanceSample {
    first_render_ms: 1000.0,
    fmp_ms: 1200.0,
    data_load_ms: 350.0,
    list_item_count: 100,
};

/// Figures of the fixed demo comparison, after lazy paging
pub const DEMO_AFTER: PerformanceSample = PerformanceSample {
    first_render_ms: 200.0,
    fmp_ms: 420.0,
    data_load_ms: 120.0,
    list_item_count: 10,
};

/// One timed request of the first page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApiSample {
    pub page_size: u32,
    pub elapsed_ms: f64,
    pub item_count: usize,
    pub is_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Paged list, only the first page is rendered
    Lazy,
    /// Everything rendered up front
    Eager,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEstimate {
    pub api_ms: f64,
    pub first_render_ms: f64,
    pub fmp_ms: f64,
    pub item_count: usize,
}

impl From<&RenderEstimate> for PerformanceSample {
    fn from(estimate: &RenderEstimate) -> Self {
        Self {
            first_render_ms: estimate.first_render_ms,
            fmp_ms: estimate.fmp_ms,
            data_load_ms: estimate.api_ms,
            list_item_count: estimate.item_count,
        }
    }
}

/// Rough render figures derived from the API latency alone
pub fn estimate_render(sample: &ApiSample, strategy: RenderStrategy) -> RenderEstimate {
    let api_ms = sample.elapsed_ms.round();
    let (render_overhead, first_render_share) = match strategy {
        RenderStrategy::Lazy => (50.0, 0.3),
        RenderStrategy::Eager => (200.0, 0.6),
    };
    RenderEstimate {
        api_ms,
        first_render_ms: (api_ms * first_render_share).floor(),
        fmp_ms: api_ms + render_overhead,
        item_count: sample.item_count,
    }
}

/// The fixed before/after comparison
pub fn demo_comparison() -> String {
    format_comparison(
        "Performance comparison (demo figures)",
        &compare_performance(&DEMO_BEFORE, &DEMO_AFTER),
    )
}

pub struct Monitor {
    client: reqwest::Client,
    source: HttpDataSource,
    app_url: String,
}

impl Monitor {
    pub fn new(api_url: &str, app_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SERVICE_CHECK_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            source: HttpDataSource::new(api_url, SAMPLE_TIMEOUT)?,
            app_url: app_url.to_string(),
        })
    }

    pub async fn run(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("Performance monitor");
        println!("{}", "=".repeat(RULE_WIDTH));

        self.check_services().await;
        self.test_api_performance().await;
        self.estimate_render_performance().await;
        self.show_optimization_comparison().await;
    }

    /// Whether anything answers at `url`, whatever the status
    pub async fn is_running(&self, url: &str) -> bool {
        self.client.get(url).send().await.is_ok()
    }

    pub async fn check_services(&self) -> Vec<(String, bool)> {
        println!("\nChecking services...");
        let services = [
            ("List API", format!("{}/", self.source.base_url())),
            ("App", self.app_url.clone()),
        ];

        let mut statuses = Vec::with_capacity(services.len());
        for (name, url) in services {
            let running = self.is_running(&url).await;
            if running {
                println!("  ✓ {name} ({url}) is running");
            } else {
                println!("  ✗ {name} ({url}) is not running");
            }
            statuses.push((name.to_string(), running));
        }
        statuses
    }

    pub async fn sample(&self, page_size: u32) -> Result<ApiSample, TransportError> {
        let started = Instant::now();
        let response = self.source.fetch_records(1, page_size).await?;
        Ok(ApiSample {
            page_size,
            elapsed_ms: started.elapsed().as_micros() as f64 / 1000.0,
            item_count: response.data.len(),
            is_end: response.is_end,
        })
    }

    pub async fn test_api_performance(&self) {
        println!("\nTesting API performance...");
        for (page_size, description) in [
            (LAZY_PAGE_SIZE, "first screen"),
            (EAGER_PAGE_SIZE, "full load"),
        ] {
            match self.sample(page_size).await {
                Ok(sample) => {
                    println!("\n  ✓ {description} ({page_size} items)");
                    println!("    ├─ response time: {:.0} ms", sample.elapsed_ms);
                    println!("    ├─ items: {}", sample.item_count);
                    println!("    └─ end of list: {}", if sample.is_end { "yes" } else { "no" });
                }
                Err(e) => println!("  ✗ {description} ({page_size} items) failed: {e}"),
            }
        }
    }

    pub async fn estimate_render_performance(&self) {
        match self.sample(LAZY_PAGE_SIZE).await {
            Ok(sample) => {
                let estimate = estimate_render(&sample, RenderStrategy::Lazy);
                println!("\n  Measured figures:");
                println!("    ├─ API response time: {} ms", estimate.api_ms);
                println!("    ├─ items: {}", estimate.item_count);
                println!("    ├─ estimated first render: ~{} ms", estimate.first_render_ms);
                println!("    └─ estimated FMP: ~{} ms", estimate.fmp_ms);
            }
            Err(e) => println!("  ✗ measurement failed: {e}"),
        }
    }

    pub async fn show_optimization_comparison(&self) {
        let after = match self.sample(LAZY_PAGE_SIZE).await {
            Ok(sample) => estimate_render(&sample, RenderStrategy::Lazy),
            Err(e) => {
                println!("\n✗ unable to collect performance figures: {e}\n");
                return;
            }
        };
        println!("\nMeasuring the eager variant ({EAGER_PAGE_SIZE} items)...");
        let before = match self.sample(EAGER_PAGE_SIZE).await {
            Ok(sample) => estimate_render(&sample, RenderStrategy::Eager),
            Err(e) => {
                println!("\n✗ unable to collect performance figures: {e}\n");
                return;
            }
        };

        let comparisons = compare_performance(&(&before).into(), &(&after).into());
        println!(
            "\n{}",
            format_comparison("Lazy paging vs eager loading", &comparisons)
        );
        println!("Summary:");
        println!("  - eager API: {} ms ({} items)", before.api_ms, before.item_count);
        println!("  - lazy API: {} ms ({} items)", after.api_ms, after.item_count);
        println!("  - eager FMP: ~{} ms", before.fmp_ms);
        println!("  - lazy FMP: ~{} ms", after.fmp_ms);
        println!("{}\n", "=".repeat(RULE_WIDTH));
    }
}
