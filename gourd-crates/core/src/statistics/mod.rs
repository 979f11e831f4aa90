//! Reporting of search statistics on a dedicated channel, separate from the diagnostics which go
//! through the `log` facade.

mod statistic_logging;

pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
