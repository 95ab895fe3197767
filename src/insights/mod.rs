//! Spending insights: aggregation of transaction data and the page that
//! displays it.

mod aggregation;
mod charts;
mod handlers;
mod tables;

pub use aggregation::{
    CategorySummary, DailySpending, MerchantSummary, MonthlySummary, TOP_MERCHANTS_LIMIT,
    by_category, by_day, by_month, top_merchants,
};
pub use handlers::{InsightsState, get_insights_page};
