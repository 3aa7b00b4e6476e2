//! Listing view: one page of opportunities as plain text.

use std::fmt::Write;

use common::{
    funding_amount::{AmountRange, format_amount},
    search_query::FilterState,
    search_result::{FilterOptions, Opportunity},
};

use crate::data_definitions::listing_session::ListingSession;

pub fn render_opportunity_card(o: &Opportunity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", o.title, format_amount(o.headline_amount()));
    let _ = writeln!(out, "  Organization: {}", o.organization);
    if o.research_area.is_empty() {
        let _ = writeln!(out, "  Location: {}", o.country);
    } else {
        let _ = writeln!(out, "  Location: {} • {}", o.country, o.research_area);
    }
    if let Some(deadline) = o.deadline {
        let _ = writeln!(out, "  Deadline: {}", deadline.format("%Y-%m-%d"));
    }
    if !o.description.is_empty() {
        let _ = writeln!(out, "  {}", o.description);
    }
    if !o.tags.is_empty() {
        let _ = writeln!(out, "  Tags: {}", o.tags.join(", "));
    }
    if !o.application_url.is_empty() {
        let _ = writeln!(out, "  Apply: {}", o.application_url);
    }
    out
}

fn render_active_filters(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filters.keyword.is_empty() {
        parts.push(format!("\"{}\"", filters.keyword));
    }
    for value in [&filters.country, &filters.organization, &filters.research_area] {
        if !value.is_empty() {
            parts.push(value.clone());
        }
    }
    parts.extend(filters.tags.iter().cloned());
    if filters.amount_range != AmountRange::Any {
        parts.push(filters.amount_range.label().to_string());
    }
    format!("Filtered by: {}", parts.join(", "))
}

pub fn render_find_funding_page(session: &ListingSession) -> String {
    let result = session.result();
    let mut out = String::new();
    let _ = writeln!(out, "Funding Opportunities ({})", session.showing_summary());
    if session.filters.has_active_filters() {
        let _ = writeln!(out, "{}", render_active_filters(&session.filters));
    }
    out.push('\n');

    if result.items.is_empty() {
        let _ = writeln!(out, "No opportunities found.");
        if session.filters.has_active_filters() {
            let _ = writeln!(out, "Try adjusting your search terms or filters.");
        }
        return out;
    }

    for opportunity in &result.items {
        out.push_str(&render_opportunity_card(opportunity));
        out.push('\n');
    }
    if result.total_pages > 1 {
        let _ = writeln!(out, "Page {} of {}", session.filters.current_page(), result.total_pages);
        let mut previous = session.clone();
        if previous.previous_page() {
            let _ = writeln!(out, "  previous: --page {}", previous.filters.current_page());
        }
        let mut next = session.clone();
        if next.next_page() {
            let _ = writeln!(out, "  next: --page {}", next.filters.current_page());
        }
    }
    out
}

pub fn render_filter_options(options: &FilterOptions) -> String {
    let sections = [
        ("Country", &options.countries),
        ("Funding Organization", &options.organizations),
        ("Research Area", &options.research_areas),
        ("Tags", &options.tags),
    ];
    let mut out = String::new();
    for (title, values) in sections {
        let _ = writeln!(out, "{title}:");
        for value in values {
            let _ = writeln!(out, "  - {value}");
        }
    }
    let _ = writeln!(out, "Funding Amount (--amount):");
    for range in AmountRange::ALL {
        let _ = writeln!(out, "  - {} ({})", range.label(), range.token());
    }
    out
}
