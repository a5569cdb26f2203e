include!("../../lib.rs");
use std::sync::Arc;
use lambda_http::{run, Error};
use crate::catalog::controller::routes;
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const STORE_ENV: &str = "CATALOG_STORE";

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let store = RepositoryStore::from(std::env::var(STORE_ENV).unwrap_or_default());
    let config = if store == RepositoryStore::DynamoDB {
        Configuration::new("prod")
    } else {
        // dev mode runs under the runtime interface emulator
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        Configuration::new("dev")
    };
    tracing::info!(?store, branch_id = config.branch_id.as_str(), "starting catalog service");

    let catalog = Arc::from(create_catalog_service(&config, store).await);
    let app = routes::<lambda_http::Body>(AppState::new(config, catalog));

    run(app).await
}
