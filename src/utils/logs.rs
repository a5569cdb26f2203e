use tracing::Level;

pub(crate) const LOG_LEVEL_ENV: &str = "CATALOG_LOG_LEVEL";

// JSON lines without ANSI colors or timestamps; CloudWatch adds the ingestion time.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(log_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .init();
}

fn log_level(level: Option<&str>) -> Level {
    level.and_then(|l| l.trim().parse::<Level>().ok()).unwrap_or(Level::INFO)
}
