//! Query side of the ledger
//!
//! Pure functions over expense snapshots: filtering, aggregation, insight
//! generation and budget evaluation. None of them mutate or log.

pub mod budget_status;
pub mod filter;
pub mod insights;
pub mod summary;

pub use budget_status::{evaluate, evaluate_all, matching_spend, BudgetEvaluation, BudgetStatus};
pub use filter::{filter, filter_on, CategoryFilter, DateFilter, FilterSpec, RelativeWindow};
pub use insights::{
    generate_insights, percent_change, Insight, InsightKind, TrendDirection,
    MIN_EXPENSES_FOR_INSIGHTS,
};
pub use summary::{round_percentages, summarize, CategoryTotal, MerchantTotal, MonthBucket, Summary};
