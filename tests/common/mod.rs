//! Shared test support.
//!
//! `fixtures` holds an in-memory `StatsSource` for tests that need no server.
//! `MongoTestContainer` wraps one MongoDB 7.0 container per test binary;
//! every test namespaces its databases with a short UUID suffix.
//!
//! The collector under test blocks on its own runtime, so these helpers are
//! synchronous: seeding runs on a private current-thread runtime owned by the
//! handle, and tests are plain `#[test]` functions.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::OnceLock;

use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, IndexModel};
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::runtime::Runtime;

use mongo_index_stats::models::ConnectionTarget;

struct SharedContainer {
    host: String,
    port: u16,
}

static SHARED: OnceLock<SharedContainer> = OnceLock::new();

/// Kept for the exit hook, which removes the container.
static CONTAINER_ID: OnceLock<String> = OnceLock::new();

unsafe extern "C" {
    fn atexit(f: extern "C" fn()) -> i32;
}

extern "C" fn remove_container() {
    if let Some(id) = CONTAINER_ID.get() {
        let _ = std::process::Command::new("docker")
            .args(["rm", "-f", id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
    }
}

/// Start the container once; it lives on a parked background thread until
/// the process exits.
fn shared() -> &'static SharedContainer {
    SHARED.get_or_init(|| {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create container runtime");

            rt.block_on(async {
                let container = Mongo::default()
                    .with_tag("7.0")
                    .start()
                    .await
                    .expect("Failed to start MongoDB container");

                let _ = CONTAINER_ID.set(container.id().to_string());
                unsafe {
                    atexit(remove_container);
                }

                let host = container.get_host().await.expect("Failed to get host").to_string();
                let port = container.get_host_port_ipv4(27017).await.expect("Failed to get port");

                let probe = Client::with_uri_str(format!("mongodb://{host}:{port}"))
                    .await
                    .expect("Failed to create probe");
                for _ in 0..30 {
                    if probe.list_database_names().await.is_ok() {
                        break;
                    }
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
                drop(probe);

                tx.send(SharedContainer { host, port }).expect("Failed to send container address");
                std::future::pending::<()>().await;
            });
        });

        rx.recv().expect("Failed to receive container address")
    })
}

/// Handle to the shared container with a per-test database namespace.
pub struct MongoTestContainer {
    runtime: Runtime,
    pub client: Client,
    pub host: String,
    pub port: u16,
    test_id: String,
}

impl MongoTestContainer {
    pub fn start() -> Self {
        let shared = shared();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create seeding runtime");
        let client = runtime
            .block_on(Client::with_uri_str(format!("mongodb://{}:{}", shared.host, shared.port)))
            .expect("Failed to create client");
        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        Self { runtime, client, host: shared.host.clone(), port: shared.port, test_id }
    }

    /// Where the collector should connect.
    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget::new(self.host.clone(), self.port)
    }

    /// Namespaced database name for this test.
    pub fn db_name(&self, name: &str) -> String {
        format!("{}_{}", name, self.test_id)
    }

    /// Insert documents into a (namespaced) collection.
    pub fn seed(&self, db: &str, collection: &str, docs: Vec<Document>) {
        let coll = self.client.database(&self.db_name(db)).collection::<Document>(collection);
        self.runtime.block_on(async { coll.insert_many(docs).await }).expect("Failed to insert");
    }

    /// Create a named single-field ascending index.
    pub fn create_index(&self, db: &str, collection: &str, field: &str, name: &str) {
        let coll = self.client.database(&self.db_name(db)).collection::<Document>(collection);
        let mut keys = Document::new();
        keys.insert(field, 1);
        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().name(name.to_string()).build())
            .build();
        self.runtime
            .block_on(async { coll.create_index(model).await })
            .expect("Failed to create index");
    }

    /// Create a view over a collection.
    pub fn create_view(&self, db: &str, view: &str, source: &str) {
        let database = self.client.database(&self.db_name(db));
        self.runtime
            .block_on(async {
                let command = doc! { "create": view, "viewOn": source, "pipeline": [] };
                database.run_command(command).await
            })
            .expect("Failed to create view");
    }
}
