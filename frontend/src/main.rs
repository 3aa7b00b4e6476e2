//! Terminal front end for the funding search API.

use std::num::NonZeroU32;

use clap::{Parser, Subcommand};
use common::{funding_amount::AmountRange, search_query::FilterState};
use frontend::{
    api::search_api::{DEFAULT_API_URL, SearchApi},
    data_definitions::listing_session::{Facet, ListingSession},
    pages::{
        find_funding_page::{render_filter_options, render_find_funding_page},
        home_page::render_home_page,
    },
};
use tracing::warn;

#[derive(Parser)]
#[command(name = "funding", about = "Discover research funding opportunities")]
struct Cli {
    /// Base URL of the search API
    #[arg(long, env = "FUNDING_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headline statistics
    Stats,
    /// Show the available filter values
    Filters,
    /// List matching opportunities
    List {
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        research_area: Option<String>,
        /// May be given several times
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// One of: any, 0-100k, 100k-500k, 500k-1m, 1m+ (unknown means any)
        #[arg(long, default_value = "any")]
        amount: String,
        #[arg(long)]
        page: Option<NonZeroU32>,
        #[arg(long)]
        per_page: Option<NonZeroU32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("frontend=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = SearchApi::new(cli.api_url)?;

    match cli.command {
        Commands::Stats => {
            print!("{}", render_home_page(&api.statistics().await));
        }
        Commands::Filters => {
            print!("{}", render_filter_options(&api.filter_options().await));
        }
        Commands::List { keyword, country, organization, research_area, tags, amount, page, per_page } => {
            let mut session = ListingSession::new(FilterState { page_size: per_page, ..FilterState::default() });
            session.filters.set_keyword(keyword);
            if let Err(e) = amount.parse::<AmountRange>() {
                warn!("{e}, not filtering by amount");
            }
            session.filters.set_amount_range(AmountRange::from_token_lenient(&amount));

            let wants_facets = country.is_some() || organization.is_some() || research_area.is_some() || !tags.is_empty();
            if wants_facets {
                session.load_options(&api).await;
            }
            let selections = [(Facet::Country, country), (Facet::Organization, organization), (Facet::ResearchArea, research_area)]
                .into_iter()
                .filter_map(|(facet, value)| value.map(|v| (facet, v)))
                .chain(tags.into_iter().map(|t| (Facet::Tag, t)));
            for (facet, value) in selections {
                if !session.select_facet(facet, &value) {
                    warn!("{value:?} is not an available {facet:?} filter, ignoring it");
                }
            }
            // facet selection resets the cursor, so the page goes last
            session.filters.page = page;

            session.refresh(&api).await;
            print!("{}", render_find_funding_page(&session));
        }
    }
    Ok(())
}
