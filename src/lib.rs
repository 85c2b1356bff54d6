//! Jira Dashboard - SLA summary sheet builder for Jira ticket exports
//!
//! Reads an .xlsx export of support tickets, renames its first sheet to
//! `Base_Dados` and appends a `Dashboard` sheet with live formulas counting
//! tickets, SLA breaches, the breach ratio and the average delay.
//!
//! # Features
//!
//! - Formulas localized to English (`COUNTA`, `,`) or Portuguese
//!   (`CONT.VALORES`, `;`) function names
//! - Division-by-zero guarded ratio
//! - Idempotent: the summary sheet is rebuilt on every run
//! - The input is edited in place: styles, widths and other sheets survive
//!
//! # Example
//!
//! ```no_run
//! use jira_dashboard::build_dashboard;
//!
//! let out = build_dashboard("chamados.xlsx", "reports/Dashboard.xlsx", "pt")?;
//! println!("Dashboard saved to {}", out.display());
//! # Ok::<(), jira_dashboard::error::DashboardError>(())
//! ```

pub mod cli;
pub mod dashboard;
pub mod error;
pub mod evaluator;
pub mod excel;
pub mod formula;
pub mod locale;
pub mod metrics;
pub mod sample;
pub mod types;

// Re-export commonly used types
pub use dashboard::build_dashboard;
pub use error::{DashboardError, DashboardResult};
pub use formula::safe_division_formula;
pub use locale::LocaleProfile;
pub use types::{Cell, CellRef, CellValue, Sheet, Workbook};
