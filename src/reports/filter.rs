//! Expense filtering
//!
//! A [`FilterSpec`] is a set of optional constraints combined with AND.
//! An unset field places no constraint on that dimension. Filtering never
//! fails; an empty input or a spec matching nothing yields an empty vec.

use chrono::{Duration, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, Expense, Money};

/// Category constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every category, including uncategorized expenses
    All,
    /// Exactly this category
    Only(CategoryId),
    /// Only expenses without a category
    Uncategorized,
}

impl CategoryFilter {
    /// Parse a category selector; `"all"` is the wildcard
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(CategoryId::from(s))
        }
    }

    fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => expense.category_id.as_ref() == Some(id),
            Self::Uncategorized => expense.category_id.is_none(),
        }
    }
}

/// Named window ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeWindow {
    Today,
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear,
    All,
}

impl RelativeWindow {
    /// Parse a window name such as `last30days`
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "today" => Some(Self::Today),
            "last7days" | "7d" => Some(Self::Last7Days),
            "last30days" | "30d" => Some(Self::Last30Days),
            "last90days" | "90d" => Some(Self::Last90Days),
            "lastyear" | "1y" => Some(Self::LastYear),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Inclusive range relative to `today`; `None` means unbounded
    pub fn range_ending(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = match self {
            Self::Today => today,
            Self::Last7Days => today - Duration::days(7),
            Self::Last30Days => today - Duration::days(30),
            Self::Last90Days => today - Duration::days(90),
            Self::LastYear => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
            Self::All => return None,
        };
        Some((start, today))
    }
}

/// Date constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFilter {
    /// Explicit inclusive range
    Range { start: NaiveDate, end: NaiveDate },
    /// Window computed from the date of the call
    Relative(RelativeWindow),
}

impl DateFilter {
    fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Range { start, end } => Some((*start, *end)),
            Self::Relative(window) => window.range_ending(today),
        }
    }
}

/// Filter specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: Option<CategoryFilter>,
    pub date: Option<DateFilter>,
    /// Inclusive lower bound on the amount
    pub min_amount: Option<Money>,
    /// Inclusive upper bound on the amount
    pub max_amount: Option<Money>,
    /// Case-insensitive merchant substring
    pub merchant: Option<String>,
    /// Case-insensitive substring of title or merchant
    pub search: Option<String>,
}

impl FilterSpec {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date = Some(DateFilter::Range { start, end });
        self
    }

    pub fn window(mut self, window: RelativeWindow) -> Self {
        self.date = Some(DateFilter::Relative(window));
        self
    }

    pub fn amount_between(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Combine two specs; fields set in `other` take precedence
    pub fn merge(self, other: FilterSpec) -> FilterSpec {
        FilterSpec {
            category: other.category.or(self.category),
            date: other.date.or(self.date),
            min_amount: other.min_amount.or(self.min_amount),
            max_amount: other.max_amount.or(self.max_amount),
            merchant: other.merchant.or(self.merchant),
            search: other.search.or(self.search),
        }
    }

    /// Whether no dimension is constrained
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Check an expense against every active dimension
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        self.compile(today).matches(expense)
    }

    /// Lower-case needles and resolve the date window once per call
    fn compile(&self, today: NaiveDate) -> CompiledFilter<'_> {
        CompiledFilter {
            category: self.category.as_ref(),
            bounds: self.date.and_then(|d| d.bounds(today)),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            merchant: non_blank_lower(self.merchant.as_deref()),
            search: non_blank_lower(self.search.as_deref()),
        }
    }
}

fn non_blank_lower(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

struct CompiledFilter<'a> {
    category: Option<&'a CategoryFilter>,
    bounds: Option<(NaiveDate, NaiveDate)>,
    min_amount: Option<Money>,
    max_amount: Option<Money>,
    merchant: Option<String>,
    search: Option<String>,
}

impl CompiledFilter<'_> {
    fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if !category.matches(expense) {
                return false;
            }
        }

        if let Some((start, end)) = self.bounds {
            if expense.date < start || expense.date > end {
                return false;
            }
        }

        if let Some(min) = self.min_amount {
            if expense.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if expense.amount > max {
                return false;
            }
        }

        if let Some(ref merchant) = self.merchant {
            if !expense.merchant.to_lowercase().contains(merchant) {
                return false;
            }
        }

        if let Some(ref needle) = self.search {
            if !expense.mentions(needle) {
                return false;
            }
        }

        true
    }
}

/// Select the expenses matching `spec`, relative to today's local date
pub fn filter(expenses: &[Expense], spec: &FilterSpec) -> Vec<Expense> {
    filter_on(expenses, spec, Local::now().date_naive())
}

/// Select the expenses matching `spec`, with relative windows ending at `today`
pub fn filter_on(expenses: &[Expense], spec: &FilterSpec, today: NaiveDate) -> Vec<Expense> {
    let compiled = spec.compile(today);
    expenses
        .iter()
        .filter(|e| compiled.matches(e))
        .cloned()
        .collect()
}
