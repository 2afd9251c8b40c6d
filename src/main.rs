use std::time::Duration;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobboard::config::{Command, Config};
use jobboard::routes::{self, AppState};
use jobboard::search::{FacetValue, SearchEngine};
use jobboard::search::filter::Facet;
use jobboard::source::refresh::{self, Catalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobboard=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match config.resolved_command() {
        Command::Serve {
            listen_addr,
            refresh_interval,
        } => serve(&config, &listen_addr, refresh_interval).await,
        Command::Search {
            search,
            job_types,
            location_types,
            locations,
            pages,
        } => {
            let facets = [
                (Facet::JobType, job_types),
                (Facet::LocationType, location_types),
                (Facet::Location, locations),
            ];
            search_once(&config, search, facets, pages).await
        }
    }
}

async fn serve(config: &Config, listen_addr: &str, refresh_interval: u64) -> anyhow::Result<()> {
    let source = config.job_source().await?;
    let catalog = Catalog::new();

    // Serve a populated catalog from the start when the source is reachable.
    if let Err(e) = catalog.refresh(source.as_ref()).await {
        tracing::warn!("Initial job fetch failed: {e}");
    }

    let refresher = tokio::spawn(refresh::run(
        catalog.clone(),
        source,
        Duration::from_secs(refresh_interval.max(1)),
    ));

    let app = routes::router(AppState {
        catalog,
        page_size: config.page_size,
    })
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!("Listening on {listen_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    refresher.abort();
    Ok(())
}

async fn search_once(
    config: &Config,
    search: Option<String>,
    facets: [(Facet, Vec<String>); 3],
    pages: usize,
) -> anyhow::Result<()> {
    let source = config.job_source().await?;
    let mut engine = SearchEngine::new(config.page_size);

    let stamp = engine.begin_fetch();
    let jobs = source.fetch_jobs().await?;
    engine.complete_fetch(stamp, jobs);

    if let Some(term) = search {
        engine.set_search_term(term);
        engine.submit_search();
    }
    for (facet, values) in facets {
        for raw in values {
            engine.toggle_facet_value(FacetValue::parse(facet, &raw)?, true);
        }
    }
    for _ in 1..pages {
        if !engine.load_more() {
            break;
        }
    }

    let summary = engine.summary();
    tracing::info!(
        "{} of {} jobs match, showing {}",
        summary.filtered,
        summary.total,
        summary.visible
    );

    let output = serde_json::json!({
        "jobs": engine.visible_jobs(),
        "summary": summary,
        "facets": engine.facet_options(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
