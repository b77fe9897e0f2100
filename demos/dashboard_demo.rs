//! Dashboard demo building a two-symbol dashboard with alpha overlays.
//!
//! Run with: cargo run --example dashboard_demo

use chrono::{DateTime, Duration, Utc};
use polars::prelude::*;

use chart_lab::chart::TimeAxis;
use chart_lab::dashboard::{add_to_plot, plot, save_plot_as_html};
use chart_lab::{plot_alphas, GraphDescriptor, MarkerSymbol, SeriesKind, Trace};

fn main() -> chart_lab::Result<()> {
    chart_lab::init_logger();

    let bar_count = 200;
    // Single start time so price and alpha timestamps line up exactly.
    let start = Utc::now() - Duration::minutes(bar_count as i64);
    let price_df = sample_price_frame(bar_count, start);

    // One figure per symbol
    let mut target = plot(&price_df, "", TimeAxis::Date)?;

    // Overlay indicators onto the first symbol's figure
    let alpha_df = sample_alpha_frame(bar_count, start);
    let descriptors = vec![
        GraphDescriptor::new("sma", SeriesKind::Line, true).with_color("rgb(255, 160, 0)"),
        GraphDescriptor::new("momentum", SeriesKind::Bar, false).with_panel(1),
        GraphDescriptor::category("Up", "signal", 1.0, SeriesKind::Scatter)
            .with_marker(MarkerSymbol::Triangle)
            .with_color("rgb(0, 160, 0)"),
        GraphDescriptor::category("Down", "signal", -1.0, SeriesKind::Scatter)
            .with_marker(MarkerSymbol::TriangleDown)
            .with_color("rgb(200, 0, 0)"),
    ];
    plot_alphas(&mut target.figures_mut()[0], &alpha_df, &descriptors)?;

    // Append an extra trace to the second symbol by title lookup
    let extra = Trace::line(
        "level",
        vec![
            "2024-01-01 00:00:00".to_string(),
            "2024-01-01 03:00:00".to_string(),
        ],
        vec![20.0, 20.0],
    );
    add_to_plot(&mut target, extra, Some("ETHUSDT"))?;

    save_plot_as_html(&target, "dashboard.html")?;
    println!("wrote dashboard.html with {} charts", target.figures().len());
    Ok(())
}

/// Build a two-symbol OHLCV frame with a random-walk price path.
fn sample_price_frame(count: usize, start: DateTime<Utc>) -> DataFrame {
    let mut datetimes = Vec::new();
    let mut opens = Vec::new();
    let mut highs = Vec::new();
    let mut lows = Vec::new();
    let mut closes = Vec::new();
    let mut volumes = Vec::new();
    let mut symbols = Vec::new();

    let mut rng = Lcg::new(7);
    for (symbol, base) in [("BTCUSDT 1m", 100.0_f64), ("ETHUSDT 1m", 20.0_f64)] {
        let mut price = base;
        for i in 0..count {
            let change = (rng.next_f64() - 0.5) * 2.0;
            let open = price;
            let close = price + change;
            datetimes.push((start + Duration::minutes(i as i64)).timestamp_millis());
            opens.push(open);
            highs.push(open.max(close) + rng.next_f64() * 0.5);
            lows.push(open.min(close) - rng.next_f64() * 0.5);
            closes.push(close);
            volumes.push(1000.0 + rng.next_f64() * 500.0);
            symbols.push(symbol);
            price = close;
        }
    }

    DataFrame::new(vec![
        Column::new("datetime".into(), datetimes),
        Column::new("open".into(), opens),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("close".into(), closes),
        Column::new("volume".into(), volumes),
        Column::new("symbol".into(), symbols),
    ])
    .expect("valid sample frame")
}

/// Build an alpha frame with a moving average, a momentum series and a
/// discretized entry/exit signal.
fn sample_alpha_frame(count: usize, start: DateTime<Utc>) -> DataFrame {
    let mut datetimes = Vec::new();
    let mut sma = Vec::new();
    let mut momentum = Vec::new();
    let mut signal = Vec::new();

    let mut rng = Lcg::new(7);
    let mut price = 100.0_f64;
    let mut window: Vec<f64> = Vec::new();
    for i in 0..count {
        let change = (rng.next_f64() - 0.5) * 2.0;
        price += change;
        window.push(price);
        if window.len() > 20 {
            window.remove(0);
        }

        datetimes.push((start + Duration::minutes(i as i64)).timestamp_millis());
        sma.push(if window.len() == 20 {
            Some(window.iter().sum::<f64>() / 20.0)
        } else {
            None
        });
        momentum.push(Some(change));
        signal.push(Some(if change > 0.8 {
            1.0
        } else if change < -0.8 {
            -1.0
        } else {
            0.0
        }));
    }

    DataFrame::new(vec![
        Column::new("datetime".into(), datetimes),
        Column::new("sma".into(), sma),
        Column::new("momentum".into(), momentum),
        Column::new("signal".into(), signal),
    ])
    .expect("valid alpha frame")
}

/// Small deterministic generator so repeated runs produce the same page.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1),
        }
    }

    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }
}
