//! In-process stand-in for the carbon entry service, served with axum on a
//! random local port from a background runtime.

#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use green_ledger::models::{
    CarbonEntry, CarbonSummary, CategoryBreakdown, EntryPatch, MonthlyData, NewCarbonEntry,
};

#[derive(Clone, Default)]
pub struct FakeService {
    /// Newest first, like the real service's listing.
    pub entries: Arc<Mutex<Vec<CarbonEntry>>>,
    pub fail: Arc<AtomicBool>,
    pub raw_entries: Arc<Mutex<Option<String>>>,
    pub raw_summary: Arc<Mutex<Option<String>>>,
    next_id: Arc<AtomicU64>,
}

impl FakeService {
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn seed(&self, entry: NewCarbonEntry) -> CarbonEntry {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = entry.with_id(id);
        self.entries.lock().unwrap().insert(0, created.clone());
        created
    }

    fn failing(&self) -> bool {
        self.fail.load(Ordering::SeqCst)
    }

    fn summary(&self) -> CarbonSummary {
        let entries = self.entries.lock().unwrap();
        let mut breakdown = CategoryBreakdown::new();
        let mut months: BTreeMap<String, f64> = BTreeMap::new();
        let mut total = 0.0;
        for e in entries.iter() {
            total += e.carbon_amount;
            let prev = breakdown.get(&e.category).unwrap_or(0.0);
            breakdown.insert(e.category.clone(), prev + e.carbon_amount);
            *months.entry(e.timestamp.format("%Y-%m").to_string()).or_default() += e.carbon_amount;
        }
        CarbonSummary {
            total_carbon: total,
            category_breakdown: breakdown,
            monthly_data: months
                .into_iter()
                .rev()
                .map(|(month, carbon_amount)| MonthlyData {
                    month,
                    carbon_amount,
                })
                .collect(),
        }
    }
}

fn raw_json(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn list(State(svc): State<FakeService>) -> Response {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if let Some(raw) = svc.raw_entries.lock().unwrap().clone() {
        return raw_json(raw);
    }
    let entries = svc.entries.lock().unwrap().clone();
    Json(entries).into_response()
}

async fn create(State(svc): State<FakeService>, Json(mut entry): Json<NewCarbonEntry>) -> Response {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if entry.activity.trim().is_empty() || entry.carbon_amount <= 0.0 {
        return StatusCode::BAD_REQUEST.into_response();
    }
    entry.timestamp = Utc::now();
    Json(svc.seed(entry)).into_response()
}

async fn summary(State(svc): State<FakeService>) -> Response {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if let Some(raw) = svc.raw_summary.lock().unwrap().clone() {
        return raw_json(raw);
    }
    Json(svc.summary()).into_response()
}

async fn get_one(State(svc): State<FakeService>, Path(id): Path<u64>) -> Response {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let found = svc
        .entries
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.id == Some(id))
        .cloned();
    match found {
        Some(entry) => Json(entry).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(
    State(svc): State<FakeService>,
    Path(id): Path<u64>,
    Json(patch): Json<EntryPatch>,
) -> Response {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let mut entries = svc.entries.lock().unwrap();
    match entries.iter_mut().find(|e| e.id == Some(id)) {
        Some(entry) => {
            patch.apply_to(entry);
            Json(entry.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(svc): State<FakeService>, Path(id): Path<u64>) -> StatusCode {
    if svc.failing() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let mut entries = svc.entries.lock().unwrap();
    let before = entries.len();
    entries.retain(|e| e.id != Some(id));
    if entries.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

fn router(svc: FakeService) -> Router {
    Router::new()
        .route("/api/carbon-entries", get(list).post(create))
        .route("/api/carbon-entries/summary", get(summary))
        .route("/api/carbon-entries/:id", get(get_one).put(update).delete(remove))
        .with_state(svc)
}

pub struct RunningService {
    pub base_url: String,
    pub state: FakeService,
}

/// Start a fresh service. The runtime thread lives until the test process exits.
pub fn start() -> RunningService {
    let state = FakeService::default();
    let app = router(state.clone());
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind random port");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("send addr");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    let addr = rx.recv().expect("service address");
    RunningService {
        base_url: format!("http://{addr}/api"),
        state,
    }
}
