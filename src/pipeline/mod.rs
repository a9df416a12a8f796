//! Run observers and reporting
//!
//! - Progress, metrics and history observers for the trainer
//! - Rolling success series and CSV export
//! - Accumulating evaluation rounds

pub mod observers;
pub mod report;

pub use observers::{HistoryObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use report::{
    EvaluationAccumulator, HistoryRow, ROLLING_WINDOW, export_history_csv, rolling_success_counts,
    rolling_success_rates, success_percentage, write_history_csv,
};

pub use crate::ports::Observer;
