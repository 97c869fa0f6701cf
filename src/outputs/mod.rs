//! Output generation for the daily report.
//!
//! # Submodules
//!
//! - [`report`]: Renders the HTML report a delivery collaborator sends out
//! - [`json`]: Writes the [`crate::models::DailyReport`] as a JSON API file
//!
//! # Output Structure
//!
//! ```text
//! report_output_dir/
//! └── 2024-01-05.html
//!
//! json_output_dir/
//! └── 2024-01-05.json
//! ```

pub mod json;
pub mod report;
