use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use wish_sync::{MemorySyncClient, SyncClient, WishQuery};
use wish_wall::{
    ip_lookup::HttpIpLookup,
    types::Environment,
    wall::{self, WishForm, INPUT_PLACEHOLDER},
    wish::{SystemClock, ThreadRandom, WishFactory},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON logs for staging/production, regular format for development
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let client = Arc::new(MemorySyncClient::new());
    let sync_client: Arc<dyn SyncClient> = client.clone();

    let factory = WishFactory::new(
        client,
        Arc::new(ThreadRandom),
        Arc::new(SystemClock),
        Arc::new(HttpIpLookup::new(environment.ip_lookup_url())),
    );
    let form = WishForm::new(factory, sync_client.clone());

    let mut views = wall::wall_views(
        sync_client.as_ref(),
        WishQuery::recent(environment.wish_query_limit()),
    );
    let renderer = tokio::spawn(async move {
        while let Some(view) = views.next().await {
            println!("----\n{view}");
        }
    });

    info!("Wish wall started in {environment:?} environment");
    println!("{INPUT_PLACEHOLDER}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(err) = form.submit(&line).await {
            error!("Wish submission failed: {err}");
            println!("{}", err.user_message());
        }
    }

    renderer.abort();
    info!("Wish wall stopped");
    Ok(())
}
