//! Insights HTTP handlers and view rendering.
//!
//! Fetches a snapshot of all transactions, runs the aggregation functions
//! over it, and renders the charts and the top merchants table.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error, endpoints,
    html::{HeadElement, base, link},
    insights::{
        aggregation::{TOP_MERCHANTS_LIMIT, by_category, by_day, by_month, top_merchants},
        charts::{
            InsightsChart, charts_script, charts_view, daily_spending_chart,
            income_and_expenses_chart, spending_by_category_chart,
        },
        tables::top_merchants_table,
    },
    navigation::NavBar,
    transaction::{Transaction, get_all_transactions},
};

/// The state needed for displaying the insights page.
#[derive(Debug, Clone)]
pub struct InsightsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for InsightsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with charts and tables summarizing the user's spending.
pub async fn get_insights_page(State(state): State<InsightsState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::INSIGHTS_VIEW);

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if transactions.is_empty() {
        return Ok(insights_no_data_view(nav_bar).into_response());
    }

    let charts = build_insights_charts(&transactions);
    let merchants = top_merchants(&transactions, TOP_MERCHANTS_LIMIT);

    Ok(insights_view(nav_bar, &charts, &top_merchants_table(&merchants)).into_response())
}

/// Creates the array of insights charts from transaction data.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_insights_charts(transactions: &[Transaction]) -> [InsightsChart; 3] {
    [
        InsightsChart {
            id: "category-chart",
            options: spending_by_category_chart(&by_category(transactions)).to_string(),
        },
        InsightsChart {
            id: "monthly-chart",
            options: income_and_expenses_chart(&by_month(transactions)).to_string(),
        },
        InsightsChart {
            id: "daily-chart",
            options: daily_spending_chart(&by_day(transactions)).to_string(),
        },
    ]
}

/// Renders the insights page when no transaction data exists.
fn insights_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "recording a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                Start by " (new_transaction_link) "."
            }
        }
    );

    base("Insights", &[], &content)
}

/// Renders the main insights page with charts and the top merchants table.
fn insights_view(nav_bar: NavBar, charts: &[InsightsChart], merchants_table: &Markup) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="insights-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (charts_view(charts))

            div class="mb-8 w-full"
            {
                (merchants_table)
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Insights", &scripts, &content)
}
