//! Home view: headline statistics.

use common::{funding_amount::format_amount, search_result::Statistics};

pub fn render_home_page(stats: &Statistics) -> String {
    let rows = [
        ("Active Opportunities", stats.active_opportunities.to_string()),
        ("Total Funding Available", format_amount(Some(stats.total_funding))),
        ("Countries", stats.countries.to_string()),
        ("Funding Sources", stats.funding_sources.to_string()),
    ];
    let mut out = String::from("Find research funding\n\n");
    for (label, value) in rows {
        out.push_str(&format!("  {label:<24} {value}\n"));
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_are_listed_with_money_formatting() {
        let stats = Statistics { active_opportunities: 52, total_funding: 65_100_000, countries: 8, funding_sources: 10 };
        let page = render_home_page(&stats);
        assert!(page.contains("Active Opportunities     52"));
        assert!(page.contains("$65.1M"));
        assert!(page.contains("Funding Sources          10"));
    }
}
