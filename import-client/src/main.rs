//! End-to-end smoke check for the import flow.
//!
//! Resolves configuration from the environment, reports database
//! availability, fires one import request and, when the database side is
//! configured, checks whether the imported row is visible.

use std::sync::Arc;

use db_access::{DatabaseContext, PersonStore};
use import_client::ImportClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SMOKE_PERSON_ID: i64 = 111;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let ctx = Arc::new(DatabaseContext::from_env());
    info!(configured = ctx.is_configured(), "database context resolved");
    info!(available = ctx.is_available().await, "database probe finished");

    let client =
        ImportClient::from_env()?.with_store(Arc::new(PersonStore::new(ctx.clone())));

    let outcome = client.import_person(SMOKE_PERSON_ID).await?;
    info!(
        status = outcome.status,
        success = outcome.is_success(),
        "import call finished"
    );
    if let Some(data) = outcome.json() {
        info!(%data, "response body decoded");
    }

    let present = client.verify_imported(SMOKE_PERSON_ID).await;
    info!(person_id = SMOKE_PERSON_ID, present, "post-import database check");

    Ok(())
}
