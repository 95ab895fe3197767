//! Table views for insights data display.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    insights::aggregation::MerchantSummary,
};

/// Renders a table of the merchants with the highest summed payments.
///
/// Renders nothing when there are no merchants to show.
pub(super) fn top_merchants_table(merchants: &[MerchantSummary]) -> Markup {
    if merchants.is_empty() {
        return html! {};
    }

    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { "Top Merchants" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Merchant" }
                            th scope="col" class="px-6 py-3 text-right" { "Transactions" }
                            th scope="col" class="px-6 py-3 text-right" { "Total" }
                        }
                    }

                    tbody {
                        @for merchant in merchants {
                            tr class=(TABLE_ROW_STYLE) {
                                th
                                    scope="row"
                                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                                {
                                    (merchant.merchant)
                                }

                                td class="px-6 py-4 text-right" { (merchant.transactions) }

                                td class="px-6 py-4 text-right text-red-600 dark:text-red-400" {
                                    (format_currency(merchant.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod top_merchants_table_tests {
    use scraper::{Html, Selector};

    use crate::insights::aggregation::MerchantSummary;

    use super::top_merchants_table;

    #[test]
    fn renders_one_row_per_merchant() {
        let merchants = vec![
            MerchantSummary {
                merchant: "Amazon".to_owned(),
                amount: 100.0,
                transactions: 1,
            },
            MerchantSummary {
                merchant: "Netflix".to_owned(),
                amount: 25.0,
                transactions: 2,
            },
        ];

        let html = Html::parse_fragment(&top_merchants_table(&merchants).into_string());
        let row_selector = Selector::parse("tbody tr").unwrap();

        assert_eq!(html.select(&row_selector).count(), 2);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Amazon"));
        assert!(text.contains("$100.00"));
        assert!(text.contains("Netflix"));
        assert!(text.contains("$25.00"));
    }

    #[test]
    fn renders_nothing_for_no_merchants() {
        assert_eq!(top_merchants_table(&[]).into_string(), "");
    }
}
