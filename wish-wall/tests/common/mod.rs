#![allow(dead_code)]

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use futures::{Stream, StreamExt};
use tokio::net::TcpListener;
use wish_sync::{MemorySyncClient, SyncClient, WishQuery};
use wish_wall::{
    ip_lookup::mock::StaticIpLookup,
    wall::{self, Placement, WallView, WishForm},
    wish::{SeededRandom, SystemClock, WishFactory},
};

/// A wall client wired to an in-memory sync store
pub struct TestContext {
    pub client: Arc<MemorySyncClient>,
    pub lookup: Arc<StaticIpLookup>,
    pub form: WishForm,
}

impl TestContext {
    pub fn new(ip_address: &str) -> Self {
        Self::with_client(Arc::new(MemorySyncClient::new()), ip_address, 1)
    }

    /// A second caller sharing the same store
    pub fn with_client(client: Arc<MemorySyncClient>, ip_address: &str, seed: u64) -> Self {
        let lookup = Arc::new(StaticIpLookup::new(ip_address));
        let factory = WishFactory::new(
            client.clone(),
            Arc::new(SeededRandom::new(seed)),
            Arc::new(SystemClock),
            lookup.clone(),
        );
        let form = WishForm::new(factory, client.clone());

        Self {
            client,
            lookup,
            form,
        }
    }

    pub fn failing_lookup() -> Self {
        let client = Arc::new(MemorySyncClient::new());
        let lookup = Arc::new(StaticIpLookup::failing());
        let factory = WishFactory::new(
            client.clone(),
            Arc::new(SeededRandom::new(1)),
            Arc::new(SystemClock),
            lookup.clone(),
        );
        let form = WishForm::new(factory, client.clone());

        Self {
            client,
            lookup,
            form,
        }
    }

    pub fn views(&self) -> impl Stream<Item = WallView> + Send + Unpin + 'static {
        Box::pin(wall::wall_views(
            self.client.as_ref() as &dyn SyncClient,
            WishQuery::default(),
        ))
    }
}

/// Skips loading views and returns the placements of the next snapshot
pub async fn next_placements<S>(views: &mut S) -> Vec<Placement>
where
    S: Stream<Item = WallView> + Unpin,
{
    loop {
        match views.next().await.expect("view stream ended") {
            WallView::Loading => continue,
            WallView::Unavailable => panic!("wall unexpectedly unavailable"),
            WallView::Wishes(placements) => return placements,
        }
    }
}

/// Serves `body` with `status` on a random local port, returning its URL
pub async fn spawn_echo_server(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind echo server");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Echo server failed");
    });

    format!("http://{addr}/")
}
