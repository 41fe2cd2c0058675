//! Report generation
//!
//! - **Console**: the resolved versions and every metric, printed before export
//! - **Excel**: a two-sheet `.xlsx` workbook with clickable query links and a data row
//!
//! # Implementation Model
//!
//! Both generators read the same [`MetricsTable`](crate::metrics::MetricsTable). The
//! Excel generator renders into a buffer; [`write_report`] then decides where the bytes
//! land, so a report on disk is always complete.

mod console;
mod excel;
mod export;

pub use console::generate as generate_console;
pub use excel::generate as generate_xlsx;
pub use export::write_report;
