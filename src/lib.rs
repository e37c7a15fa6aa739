//! # pnlsim
//!
//! Multi-variable P&L scenario simulator.
//!
//! Seven independent business levers (price, volume, store growth, overseas,
//! beef mix, marketing efficiency, purchase cost) are expressed as signed
//! EBITDA contributions. The evaluator grosses the revenue-moving ones up to
//! revenue, rebuilds a projected P&L from the prior-period actuals and
//! derives EBITDA, gross, franchise-gross and operating margins. Named
//! scenarios are compared side by side and exported as a spreadsheet.
//!
//! - Deterministic: a pure function of (contributions, global parameters)
//! - Stateless: reference data is compiled in and read-only
//! - Guarded: ratios are 0, never NaN, when projected revenue is not positive
//!
//! ## Example
//!
//! ```rust
//! use pnlsim::prelude::*;
//!
//! let plan = catalog().default_values();
//! let result = evaluate(&plan, &GlobalParams::new()).unwrap();
//! assert!(result.ebitda_projected > result.ebitda_prior);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,  // Formulas are kept in their business form
    clippy::missing_const_for_fn,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scenarios;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::{catalog, Catalog, GlobalParamId, LineItem, VariableId};
    pub use crate::config::{ExportOptions, RunConfig};
    pub use crate::error::{PnlError, PnlResult};
    pub use crate::report::{build_report, Report};
    pub use crate::scenarios::{
        compare, contribution_of, evaluate, GlobalParams, NamedResult, ScenarioInput,
        ScenarioResult, VarValues,
    };
}

/// Re-export for public API
pub use error::{PnlError, PnlResult};
