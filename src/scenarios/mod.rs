//! Scenario evaluation and comparison.
//!
//! - [`evaluate`]: one set of variable contributions → projected P&L
//! - [`compare`]: a list of named scenarios → results in input order

pub mod comparator;
pub mod evaluator;
pub mod input;

pub use comparator::{compare, compare_with, NamedResult};
pub use evaluator::{
    evaluate, evaluate_with, percent_of, revenue_of, round_to, ProjectedPnl, ScenarioResult,
};
pub use input::{contribution_of, GlobalParams, ScenarioInput, VarValues};
