//! Transaction data aggregation for the insights page.
//!
//! Pure functions that fold a snapshot of transactions into the summaries the
//! insights charts and tables display: spending by category, income and
//! expenses by month, spending by day, and top merchants. The callers are
//! expected to pass validated records, so amounts are assumed to be finite and
//! non-negative.

use std::cmp::Ordering;
use std::collections::HashMap;

use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::transaction::{Transaction, TransactionType};

/// The category label used for payments without a category.
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// The number of merchants shown on the insights page.
pub const TOP_MERCHANTS_LIMIT: usize = 5;

/// The color used for categories that are not in the lookup table.
const FALLBACK_CATEGORY_COLOR: &str = "#6b7280";

/// Display colors for well-known categories, keyed by lowercase name.
const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("dining", "#f97316"),
    ("entertainment", "#8b5cf6"),
    ("groceries", "#22c55e"),
    ("health", "#ec4899"),
    ("housing", "#0ea5e9"),
    ("shopping", "#a855f7"),
    ("subscriptions", "#6366f1"),
    ("transport", "#3b82f6"),
    ("travel", "#14b8a6"),
    ("utilities", "#eab308"),
];

/// Total spending for one payment category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// The category label, "Other" for uncategorized payments.
    pub category: String,
    /// The summed payment amount for the category.
    pub amount: f64,
    /// The display color for the category.
    pub color: &'static str,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The display label for the month, e.g. "Jan 2024".
    pub month: String,
    /// The summed deposit amount for the month.
    pub income: f64,
    /// The summed payment amount for the month.
    pub expenses: f64,
}

/// Total spending for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpending {
    /// The calendar date, in UTC.
    pub date: Date,
    /// The display label for the date, e.g. "Jan 5".
    pub label: String,
    /// The summed payment amount for the day.
    pub amount: f64,
}

/// Total spending and transaction count for one merchant.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantSummary {
    /// The recipient name payments were grouped by.
    pub merchant: String,
    /// The summed payment amount for the merchant.
    pub amount: f64,
    /// The number of payments made to the merchant.
    pub transactions: usize,
}

/// Look up the display color for `category`, ignoring case.
fn category_color(category: &str) -> &'static str {
    let needle = category.to_lowercase();

    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_CATEGORY_COLOR)
}

/// The UTC calendar date a transaction happened on.
fn utc_date(created_at: OffsetDateTime) -> Date {
    created_at.to_offset(UtcOffset::UTC).date()
}

/// The three-letter abbreviation for `month`, e.g. "Jan".
fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Sum payments by category.
///
/// Payments without a category (or with an empty one) are grouped under
/// [UNCATEGORIZED_LABEL]. Deposits are ignored. The output is sorted by
/// category name so repeated calls with the same snapshot produce the same
/// chart.
pub fn by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Payment)
    {
        let category = transaction
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL);

        *totals.entry(category.to_owned()).or_insert(0.0) += transaction.amount;
    }

    let mut summaries: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(category, amount)| CategorySummary {
            color: category_color(&category),
            category,
            amount,
        })
        .collect();

    summaries.sort_by(|a, b| a.category.cmp(&b.category));

    summaries
}

/// Sum income (deposits) and expenses (payments) by UTC calendar month.
///
/// Only months with at least one transaction appear in the output, in
/// chronological order.
pub fn by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let month = utc_date(transaction.created_at).replace_day(1).unwrap();
        let (income, expenses) = totals.entry(month).or_insert((0.0, 0.0));

        match transaction.transaction_type {
            TransactionType::Deposit => *income += transaction.amount,
            TransactionType::Payment => *expenses += transaction.amount,
        }
    }

    let mut sorted_months: Vec<Date> = totals.keys().copied().collect();
    sorted_months.sort();

    sorted_months
        .into_iter()
        .map(|month| {
            let (income, expenses) = totals[&month];

            MonthlySummary {
                month: format!("{} {}", short_month_name(month.month()), month.year()),
                income,
                expenses,
            }
        })
        .collect()
}

/// Sum payments by UTC calendar day.
///
/// The output is sorted ascending on the date itself, before the display
/// label is attached, so "Apr 2" never sorts ahead of "Jan 10".
pub fn by_day(transactions: &[Transaction]) -> Vec<DailySpending> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Payment)
    {
        let date = utc_date(transaction.created_at);
        *totals.entry(date).or_insert(0.0) += transaction.amount;
    }

    let mut sorted_days: Vec<Date> = totals.keys().copied().collect();
    sorted_days.sort();

    sorted_days
        .into_iter()
        .map(|date| DailySpending {
            label: format!("{} {}", short_month_name(date.month()), date.day()),
            amount: totals[&date],
            date,
        })
        .collect()
}

/// Sum payments by recipient and return the `limit` biggest recipients.
///
/// Payments without a recipient name (or with an empty one) are skipped.
/// The sort is stable and descending by summed amount, so merchants with
/// equal totals keep the order they were first seen in.
pub fn top_merchants(transactions: &[Transaction], limit: usize) -> Vec<MerchantSummary> {
    let mut summaries: Vec<MerchantSummary> = Vec::new();
    let mut index_by_merchant: HashMap<String, usize> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Payment)
    {
        let Some(merchant) = transaction
            .recipient_name
            .as_deref()
            .filter(|name| !name.is_empty())
        else {
            continue;
        };

        match index_by_merchant.get(merchant) {
            Some(&index) => {
                summaries[index].amount += transaction.amount;
                summaries[index].transactions += 1;
            }
            None => {
                index_by_merchant.insert(merchant.to_owned(), summaries.len());
                summaries.push(MerchantSummary {
                    merchant: merchant.to_owned(),
                    amount: transaction.amount,
                    transactions: 1,
                });
            }
        }
    }

    summaries.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
    });
    summaries.truncate(limit);

    summaries
}
