//! Charting interaction: the selected tool and how clicks mutate the chart.

pub mod controller;

pub use controller::{ChartChange, ChartingController, NOMINAL_SURFACE};
