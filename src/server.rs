use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, middleware, web};
use log::{info, warn};
use serde_json::json;

use crate::algorithm::{self, build_dashboard};
use crate::api_json::{RangeQuery, TicksUpload, resolve_range};
use crate::ingest::{self, LoadError};
use crate::models::Dataset;

/// Wide-open CSP, as the visualizer pulls map tiles and chart assets from
/// third-party CDNs.
const CSP: &str = "default-src * 'unsafe-inline' 'unsafe-eval'; script-src * 'unsafe-inline' 'unsafe-eval'; connect-src * 'unsafe-inline'; img-src * data: blob: 'unsafe-inline'; frame-src *; style-src * 'unsafe-inline'";

/// The active dataset snapshot. GET handlers clone it under a read lock so a
/// recomputation always sees one consistent record set; POST /ticks swaps it
/// atomically under the write lock (last write wins).
pub struct AppState {
    pub dataset: RwLock<Dataset>,
}

fn snapshot(state: &web::Data<AppState>) -> Result<Dataset, HttpResponse> {
    match state.dataset.read() {
        Ok(guard) => Ok(guard.clone()),
        Err(e) => Err(HttpResponse::InternalServerError()
            .json(json!({"error": format!("dataset lock poisoned: {}", e)}))),
    }
}

/// Resolve the query range against the current snapshot, mapping range
/// errors to a 400 without touching any state.
fn snapshot_with_range(
    state: &web::Data<AppState>,
    query: &RangeQuery,
) -> Result<(Dataset, chrono::NaiveDate, chrono::NaiveDate), HttpResponse> {
    let dataset = snapshot(state)?;
    match resolve_range(query, &dataset) {
        Ok((start, end)) => Ok((dataset, start, end)),
        Err(e) => Err(HttpResponse::BadRequest().json(json!({"error": format!("{}", e)}))),
    }
}

/// GET /dashboard?start=YYYY-MM-DD&end=YYYY-MM-DD
/// Every derived view for one recomputation pass in a single response.
async fn dashboard_handler(
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => HttpResponse::Ok().json(build_dashboard(&dataset, start, end)),
        Err(resp) => resp,
    }
}

/// GET /stats — the stats table only (yearly + selected range + all time).
async fn stats_handler(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => {
            let filtered = algorithm::filter_by_range(&dataset.records, start, end);
            HttpResponse::Ok().json(algorithm::stats_table(&dataset.records, &filtered))
        }
        Err(resp) => resp,
    }
}

/// GET /grades — sorted grade -> count pairs for the distribution chart.
async fn grades_handler(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => {
            let filtered = algorithm::filter_by_range(&dataset.records, start, end);
            HttpResponse::Ok().json(algorithm::grade_distribution(&filtered))
        }
        Err(resp) => resp,
    }
}

/// GET /crags — distinct crag paths in the selected range, lexically sorted.
async fn crags_handler(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => {
            let filtered = algorithm::filter_by_range(&dataset.records, start, end);
            HttpResponse::Ok().json(algorithm::crag_list(&filtered))
        }
        Err(resp) => resp,
    }
}

/// GET /journal — noted climbs in the selected range, most recent first.
async fn journal_handler(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => {
            let filtered = algorithm::filter_by_range(&dataset.records, start, end);
            HttpResponse::Ok().json(algorithm::journal(&filtered))
        }
        Err(resp) => resp,
    }
}

/// GET /map — region markers for the selected range. Regions without known
/// coordinates are logged server-side and omitted here.
async fn map_handler(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    match snapshot_with_range(&state, &query) {
        Ok((dataset, start, end)) => {
            let filtered = algorithm::filter_by_range(&dataset.records, start, end);
            HttpResponse::Ok().json(algorithm::region_markers(&filtered))
        }
        Err(resp) => resp,
    }
}

/// POST /ticks
/// Replace the active dataset with pasted CSV text. On any parse failure the
/// previous dataset stays active and the client gets a 400.
async fn upload_ticks_handler(
    state: web::Data<AppState>,
    body: web::Json<TicksUpload>,
) -> impl Responder {
    let upload = body.into_inner();
    if upload.csv.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "csv text is empty"}));
    }

    let dataset = match ingest::dataset_from_csv(&upload.csv) {
        Ok(d) => d,
        Err(e @ (LoadError::Parse(_) | LoadError::NoValidRecords)) => {
            return HttpResponse::BadRequest().json(json!({"error": format!("{}", e)}));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({"error": format!("{}", e)}));
        }
    };

    let summary = algorithm::dataset_summary(&dataset);
    match state.dataset.write() {
        Ok(mut guard) => *guard = dataset,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("dataset lock poisoned: {}", e)}));
        }
    }
    info!("dataset replaced: {} records", summary["records"]);
    HttpResponse::Ok().json(json!({"status": "ok", "summary": summary}))
}

/// GET /ticks/summary — record count and date bounds of the active dataset.
async fn ticks_summary_handler(state: web::Data<AppState>) -> impl Responder {
    match snapshot(&state) {
        Ok(dataset) => HttpResponse::Ok().json(algorithm::dataset_summary(&dataset)),
        Err(resp) => resp,
    }
}

/// GET /help — expected formats and an example payload.
async fn help_handler() -> impl Responder {
    let example = TicksUpload {
        csv: "Date,Route,Rating,Location,Length,Notes\n\
              2024-01-05,Playin' Hooky,5.9 R,Colorado > Clear Creek Canyon,80,Windy but fun\n\
              2024-02-10,The Bulge,5.10a,Colorado > Boulder Canyon,120,"
            .to_string(),
    };
    let help = json!({
        "description": "Climbing-log visualizer API. GET endpoints accept optional start/end query \
                        parameters (YYYY-MM-DD, inclusive); missing bounds default to the loaded \
                        dataset's date interval. POST /ticks replaces the dataset with pasted CSV.",
        "endpoints": ["/dashboard", "/stats", "/grades", "/crags", "/journal", "/map",
                      "/ticks (POST)", "/ticks/summary"],
        "get_example_query": "/dashboard?start=2024-01-01&end=2024-12-31",
        "post_example": example,
        "csv_columns": ["Date", "Route", "Rating", "Location", "Length", "Notes"],
        "note": "Rows missing Date or Route are dropped. Location is a ' > '-delimited path; \
                 international routes start with 'International' and carry the country third."
    });
    HttpResponse::Ok().json(help)
}

/// Load the bundled default dataset, degrading to an empty dataset (paste-in
/// still works) instead of refusing to start.
pub fn load_startup_dataset(data_path: &str) -> Dataset {
    match ingest::load_default(data_path) {
        Ok(dataset) => {
            info!("loaded default dataset '{}': {} records", data_path, dataset.records.len());
            dataset
        }
        Err(e) => {
            warn!("could not load default dataset '{}': {}. Starting empty.", data_path, e);
            Dataset::default()
        }
    }
}

/// Route table, shared between `run_server` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard_handler))
        .route("/stats", web::get().to(stats_handler))
        .route("/grades", web::get().to(grades_handler))
        .route("/crags", web::get().to(crags_handler))
        .route("/journal", web::get().to(journal_handler))
        .route("/map", web::get().to(map_handler))
        .route("/ticks", web::post().to(upload_ticks_handler))
        .route("/ticks/summary", web::get().to(ticks_summary_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, data_path: &str, static_dir: &str) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        dataset: RwLock::new(load_startup_dataset(data_path)),
    });
    let static_dir = static_dir.to_string();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::DefaultHeaders::new().add(("Content-Security-Policy", CSP)))
            .configure(configure)
            .service(actix_files::Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind(bind_addr)?
    .run()
    .await
}
