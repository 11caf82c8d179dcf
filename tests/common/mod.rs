#![allow(dead_code)]

use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::oneshot;

pub use randocube::model::{Category, Item, ItemDraft, ItemId, Priority};
pub use randocube::remote::{RemoteStore, StoreError};

#[path = "../../src/tests/support/fake_store.rs"]
mod fake_store;

pub use self::fake_store::FakeStore;

pub const HEALTH_MESSAGE: &str = "RandoCube is up and running!";
pub const RELOAD_MESSAGE: &str = "RandoCube has reloaded from the save file!";

#[derive(Clone)]
struct Stub {
    store: Arc<Mutex<FakeStore>>,
    posted: Arc<Mutex<Vec<(String, Value)>>>,
    garbled: Arc<AtomicBool>,
}

/// An HTTP store on a random local port, answering from a [`FakeStore`].
pub struct StubServer {
    pub base_url: String,
    stub: Stub,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    pub fn with_store<R>(&self, f: impl FnOnce(&FakeStore) -> R) -> R {
        let store = self.stub.store.lock().unwrap();
        f(&store)
    }

    /// Bodies of every POST so far, with their paths.
    pub fn posted(&self) -> Vec<(String, Value)> {
        self.stub.posted.lock().unwrap().clone()
    }

    /// Answer `/getCategories` with a body that is not JSON.
    pub fn garble_categories(&self) {
        self.stub.garbled.store(true, Ordering::SeqCst);
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

pub fn spawn_stub(store: FakeStore) -> Result<StubServer> {
    let stub = Stub {
        store: Arc::new(Mutex::new(store)),
        posted: Arc::new(Mutex::new(Vec::new())),
        garbled: Arc::new(AtomicBool::new(false)),
    };
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind stub listener")?;
    listener
        .set_nonblocking(true)
        .context("set stub listener nonblocking")?;
    let addr = listener.local_addr().context("stub listener address")?;
    let app = router(stub.clone());
    let (tx, rx) = oneshot::channel::<()>();

    let thread = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("stub runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("stub server");
        });
    });

    let base_url = format!("http://{}", addr);
    let server = StubServer {
        base_url,
        stub,
        shutdown: Some(tx),
        thread: Some(thread),
    };
    wait_for_health(&server.base_url)?;
    Ok(server)
}

pub fn wait_for_health(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("stub store did not come up at {}/health", base_url);
        }
        match client.get(format!("{}/health", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => thread::sleep(Duration::from_millis(20)),
        }
    }
}

/// Run the `rando` binary against `base_url` with a throwaway config file.
pub fn run_rando(base_url: &str, args: &[&str]) -> Result<std::process::Output> {
    let dir = tempfile::tempdir().context("create cli tempdir")?;
    let config = dir.path().join("rando.json");
    let out = Command::new(env!("CARGO_BIN_EXE_rando"))
        .arg("--config")
        .arg(&config)
        .args(["--url", base_url])
        .args(args)
        .env_remove("RANDO_LOG")
        .output()
        .with_context(|| format!("run rando {:?}", args))?;
    Ok(out)
}

pub fn rando_ok(base_url: &str, args: &[&str]) -> Result<String> {
    let out = run_rando(base_url, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "rando {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

fn router(stub: Stub) -> Router {
    Router::new()
        .route("/health", get(|| async { HEALTH_MESSAGE }))
        .route("/reload", get(|| async { RELOAD_MESSAGE }))
        .route("/getCategories", get(get_categories))
        .route("/getFullList", get(get_full_list))
        .route("/getCompletedList", get(get_completed_list))
        .route("/getRandomSet", get(get_random_set))
        .route("/addCategory", post(add_category))
        .route("/editCategory", post(edit_category))
        .route("/removeCategory", post(remove_category))
        .route("/saveItem", post(save_item))
        .route("/removeItem", post(remove_item))
        .route("/markCompleted", post(mark_completed))
        .with_state(stub)
}

/// `{key: payload}` on success, `{key: null, error}` on failure.
fn reply<T: serde::Serialize>(key: &str, res: Result<T, StoreError>) -> Json<Value> {
    let mut body = serde_json::Map::new();
    match res {
        Ok(v) => {
            body.insert(key.to_string(), serde_json::to_value(v).unwrap());
            body.insert("error".to_string(), Value::Null);
        }
        Err(err) => {
            body.insert(key.to_string(), Value::Null);
            body.insert("error".to_string(), Value::String(err.0));
        }
    }
    Json(Value::Object(body))
}

fn ack<B: DeserializeOwned>(
    stub: &Stub,
    path: &str,
    body: Value,
    f: impl FnOnce(&FakeStore, B) -> Result<(), StoreError>,
) -> Json<Value> {
    stub.posted
        .lock()
        .unwrap()
        .push((path.to_string(), body.clone()));
    let res = serde_json::from_value::<B>(body)
        .map_err(|e| StoreError::new(e.to_string()))
        .and_then(|req| f(&stub.store.lock().unwrap(), req));
    match res {
        Ok(()) => Json(json!({ "error": null })),
        Err(err) => Json(json!({ "error": err.0 })),
    }
}

#[derive(Deserialize)]
struct ListQuery {
    category: Option<String>,
}

impl ListQuery {
    fn category(&self) -> Option<Category> {
        self.category.as_deref().map(Category::from)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RandomQuery {
    category: String,
    #[serde(default = "use_last_default")]
    use_last: bool,
}

fn use_last_default() -> bool {
    true
}

async fn get_categories(State(stub): State<Stub>) -> Response {
    let res = stub.store.lock().unwrap().list_categories();
    if stub.garbled.load(Ordering::SeqCst) {
        return "not json".into_response();
    }
    reply("categories", res).into_response()
}

async fn get_full_list(State(stub): State<Stub>, Query(q): Query<ListQuery>) -> Json<Value> {
    let res = stub
        .store
        .lock()
        .unwrap()
        .list_active_items(q.category().as_ref());
    reply("items", res)
}

async fn get_completed_list(State(stub): State<Stub>, Query(q): Query<ListQuery>) -> Json<Value> {
    let res = stub
        .store
        .lock()
        .unwrap()
        .list_completed_items(q.category().as_ref());
    reply("items", res)
}

async fn get_random_set(State(stub): State<Stub>, Query(q): Query<RandomQuery>) -> Json<Value> {
    let res = stub
        .store
        .lock()
        .unwrap()
        .random_set(&Category::from(q.category), q.use_last);
    reply("items", res)
}

#[derive(Deserialize)]
struct AddCategoryBody {
    category: Category,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditCategoryBody {
    old_category: Category,
    new_category: Category,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveCategoryBody {
    category: Category,
    #[serde(default)]
    migrate_to: Option<Category>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveItemBody {
    item: ItemDraft,
    #[serde(default)]
    ignore_duplicate: bool,
}

#[derive(Deserialize)]
struct IdBody {
    id: ItemId,
    #[serde(default)]
    unmark: bool,
}

async fn add_category(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/addCategory", body, |s, b: AddCategoryBody| {
        s.add_category(&b.category)
    })
}

async fn edit_category(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/editCategory", body, |s, b: EditCategoryBody| {
        s.rename_category(&b.old_category, &b.new_category)
    })
}

async fn remove_category(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/removeCategory", body, |s, b: RemoveCategoryBody| {
        s.delete_category(&b.category, b.migrate_to.as_ref())
    })
}

async fn save_item(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/saveItem", body, |s, b: SaveItemBody| {
        s.save_item(&b.item, b.ignore_duplicate)
    })
}

async fn remove_item(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/removeItem", body, |s, b: IdBody| s.delete_item(b.id))
}

async fn mark_completed(State(stub): State<Stub>, Json(body): Json<Value>) -> Json<Value> {
    ack(&stub, "/markCompleted", body, |s, b: IdBody| {
        s.set_completed(b.id, b.unmark)
    })
}

/// Two categories with a few items, the shape most tests start from.
pub fn books_and_games() -> FakeStore {
    let store = FakeStore::with_categories(&["Books", "Games"]);
    store.seed_item("Dune", "Books", Priority::High);
    store.seed_item("Emma", "Books", Priority::Low);
    store.seed_item("Go", "Books", Priority::Medium);
    store.seed_item("Ulysses", "Books", Priority::Medium);
    store.seed_item("Chess", "Games", Priority::Medium);
    store
}
