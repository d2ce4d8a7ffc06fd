//! Wiring & DI. Entry point: bootstrap adapters, inject into the query
//! service, run the interactive UI. No business logic here.

use dotenv::dotenv;
use mealgrid::adapters::neis::NeisClient;
use mealgrid::adapters::ui::tui::TuiInputPort;
use mealgrid::ports::{InputPort, MealService, SchoolDirectory};
use mealgrid::shared::config::AppConfig;
use mealgrid::shared::roster::taebaek_roster;
use mealgrid::usecases::MenuQueryService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    mealgrid::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();
    let Some(api_key) = cfg.api_key() else {
        anyhow::bail!(
            "Set NEIS_API_KEY (env or .env). Get a key from https://open.neis.go.kr"
        );
    };

    let office_code = cfg.office_code_or_default();
    let max_concurrency = cfg.max_concurrency_or_default();
    let timeout = Duration::from_secs(cfg.timeout_secs_or_default());
    info!(
        office = %office_code,
        max_concurrency,
        timeout_secs = timeout.as_secs(),
        "configuration loaded"
    );

    // --- NEIS adapter (one pooled client behind both ports) ---
    let neis = Arc::new(NeisClient::new(api_key, timeout).map_err(|e| anyhow::anyhow!("{e}"))?);
    let directory: Arc<dyn SchoolDirectory> = Arc::clone(&neis) as Arc<dyn SchoolDirectory>;
    let meals: Arc<dyn MealService> = Arc::clone(&neis) as Arc<dyn MealService>;

    // --- Query service + roster ---
    let service = Arc::new(MenuQueryService::new(
        directory,
        meals,
        office_code,
        max_concurrency,
    ));
    let roster = taebaek_roster();
    info!(schools = roster.len(), "roster loaded");

    // --- Run (date/slot prompt -> bounded fan-out -> grouped table) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service, roster));
    input_port.run().await.map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
