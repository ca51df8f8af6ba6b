//! Argument parsing shared by several commands

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, Wallet};
use crate::reports::{CategoryFilter, FilterSpec, RelativeWindow};
use crate::store::LedgerStore;

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Parse an amount such as `12.50` or `$1,200`
pub fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Look up a category by id or name
pub fn resolve_category(store: &LedgerStore, identifier: &str) -> LedgerResult<Category> {
    store
        .find_category(identifier)?
        .ok_or_else(|| LedgerError::category_not_found(identifier))
}

/// Look up a wallet by id or name
pub fn resolve_wallet(store: &LedgerStore, identifier: &str) -> LedgerResult<Wallet> {
    store
        .find_wallet(identifier)?
        .ok_or_else(|| LedgerError::wallet_not_found(identifier))
}

/// Expense filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Category name or ID ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only expenses without a category
    #[arg(long, conflicts_with = "category")]
    pub uncategorized: bool,

    /// Relative window: today, last7days, last30days, last90days, lastyear, all
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub window: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum amount
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount
    #[arg(long)]
    pub max: Option<String>,

    /// Merchant name contains
    #[arg(short, long)]
    pub merchant: Option<String>,

    /// Title or merchant contains
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build a filter spec, resolving category names against the store
    pub fn to_spec(&self, store: &LedgerStore) -> LedgerResult<FilterSpec> {
        let mut spec = FilterSpec::new();

        if self.uncategorized {
            spec = spec.category(CategoryFilter::Uncategorized);
        } else if let Some(ref category) = self.category {
            spec = match CategoryFilter::parse(category) {
                CategoryFilter::All => spec.category(CategoryFilter::All),
                _ => spec.category(CategoryFilter::Only(resolve_category(store, category)?.id)),
            };
        }

        if let Some(ref window) = self.window {
            let window = RelativeWindow::parse(window).ok_or_else(|| {
                LedgerError::Validation(format!("Unknown window '{}'", window))
            })?;
            spec = spec.window(window);
        } else if self.from.is_some() || self.to.is_some() {
            let start = match self.from {
                Some(ref s) => parse_date(s)?,
                None => NaiveDate::MIN,
            };
            let end = match self.to {
                Some(ref s) => parse_date(s)?,
                None => NaiveDate::MAX,
            };
            spec = spec.date_range(start, end);
        }

        let min = self.min.as_deref().map(parse_amount).transpose()?;
        let max = self.max.as_deref().map(parse_amount).transpose()?;
        spec = spec.amount_between(min, max);

        if let Some(ref merchant) = self.merchant {
            spec = spec.merchant(merchant.clone());
        }
        if let Some(ref search) = self.search {
            spec = spec.search(search.clone());
        }

        Ok(spec)
    }

    /// First day covered by the filter, if it has one
    pub fn period_start(&self, today: NaiveDate) -> LedgerResult<Option<NaiveDate>> {
        if let Some(ref window) = self.window {
            return Ok(RelativeWindow::parse(window)
                .and_then(|w| w.range_ending(today))
                .map(|(start, _)| start));
        }
        self.from.as_deref().map(parse_date).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use crate::store::NewCategory;

    fn store() -> LedgerStore {
        let store = LedgerStore::new();
        store
            .add_category(NewCategory::new("Food").with_id("food"))
            .unwrap();
        store
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("29/02/2024").unwrap_err().is_validation());
        assert_eq!(parse_amount("$1,200.50").unwrap().cents(), 120050);
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_filter_args_resolve_category_by_name() {
        let args = FilterArgs {
            category: Some("FOOD".into()),
            min: Some("10".into()),
            ..Default::default()
        };
        let spec = args.to_spec(&store()).unwrap();
        assert_eq!(
            spec.category,
            Some(CategoryFilter::Only(CategoryId::from("food")))
        );
        assert_eq!(spec.min_amount, Some(Money::from_cents(1000)));
        assert_eq!(spec.max_amount, None);
    }

    #[test]
    fn test_filter_args_all_and_unknown() {
        let all = FilterArgs {
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(
            all.to_spec(&store()).unwrap().category,
            Some(CategoryFilter::All)
        );

        let unknown = FilterArgs {
            category: Some("rent".into()),
            ..Default::default()
        };
        assert!(unknown.to_spec(&store()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_filter_args_dates() {
        let args = FilterArgs {
            from: Some("2024-01-01".into()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            args.period_start(today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );

        let window = FilterArgs {
            window: Some("last7days".into()),
            ..Default::default()
        };
        assert_eq!(
            window.period_start(today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 23)
        );
        assert!(FilterArgs {
            window: Some("fortnight".into()),
            ..Default::default()
        }
        .to_spec(&store())
        .is_err());
    }
}
