//! Testing harness for chart-gauge widgets.
//!
//! ```
//! use chart_gauge_test::GaugeHarness;
//! use chart_gauge_widgets::GaugeConfig;
//!
//! let mut harness = GaugeHarness::new(GaugeConfig::new(0.0).units("%")).unwrap();
//! harness.set_value(75.0).settle();
//! harness.assert_text(".gauge-value", "75%").assert_needle_at(75.0);
//! ```

mod harness;
mod selector;

pub use harness::{GaugeHarness, FRAME_MS};
pub use selector::{Selector, SelectorError, SelectorParser};
