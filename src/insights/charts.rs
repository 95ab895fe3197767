//! Chart generation and rendering for the insights page.
//!
//! Three ECharts visualizations are built from the aggregated transaction
//! data:
//! - **Spending by Category**: pie chart of payment totals per category
//! - **Income & Expenses**: monthly bar chart with one series per direction
//! - **Daily Spending**: line chart of payment totals per day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    insights::aggregation::{CategorySummary, DailySpending, MonthlySummary},
};

/// An insights chart with its HTML container ID and ECharts configuration.
pub(super) struct InsightsChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the insights charts.
pub(super) fn charts_view(charts: &[InsightsChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the insights charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[InsightsChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn spending_by_category_chart(categories: &[CategorySummary]) -> Chart {
    let data: Vec<DataPointItem> = categories
        .iter()
        .map(|summary| {
            DataPointItem::new(summary.amount)
                .name(summary.category.clone())
                .item_style(ItemStyle::new().color(summary.color))
        })
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Spending by Category")
                .subtext("Payments only"),
        )
        .tooltip(Tooltip::new().value_formatter(currency_formatter()))
        .series(Pie::new().name("Spending").radius("55%").data(data))
}

pub(super) fn income_and_expenses_chart(months: &[MonthlySummary]) -> Chart {
    let labels: Vec<String> = months.iter().map(|summary| summary.month.clone()).collect();
    let income: Vec<f64> = months.iter().map(|summary| summary.income).collect();
    let expenses: Vec<f64> = months.iter().map(|summary| summary.expenses).collect();

    Chart::new()
        .title(Title::new().text("Income & Expenses").subtext("By month"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%").right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color("#22c55e"))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color("#ef4444"))
                .data(expenses),
        )
}

pub(super) fn daily_spending_chart(days: &[DailySpending]) -> Chart {
    let labels: Vec<String> = days.iter().map(|day| day.label.clone()).collect();
    let values: Vec<f64> = days.iter().map(|day| day.amount).collect();

    Chart::new()
        .title(Title::new().text("Daily Spending").subtext("Payments only"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Spending").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
