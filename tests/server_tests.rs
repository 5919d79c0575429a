use std::sync::RwLock;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use tickboard::ingest::dataset_from_csv;
use tickboard::server::{AppState, configure};

const SAMPLE: &str = "\
Date,Route,Rating,Location,Length,Notes
2024-01-05,A,5.9,Colorado > X,80,good day
2024-02-10,B,5.10a,Colorado > Y,120,
";

fn sample_state() -> web::Data<AppState> {
    web::Data::new(AppState {
        dataset: RwLock::new(dataset_from_csv(SAMPLE).unwrap()),
    })
}

#[actix_web::test]
async fn test_dashboard_filters_by_range() {
    let state = sample_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = test::TestRequest::get()
        .uri("/dashboard?start=2024-01-01&end=2024-01-31")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let range_row = body["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["period"] == "Selected Range")
        .unwrap();
    assert_eq!(range_row["total_climbs"], 1);
    assert_eq!(range_row["total_feet"], 80);
    assert_eq!(body["journal"].as_array().unwrap().len(), 1);
    assert_eq!(body["crags"], json!(["Colorado > X"]));
}

#[actix_web::test]
async fn test_missing_bounds_default_to_dataset_interval() {
    let state = sample_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let all_row = body["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["period"] == "Selected Range")
        .unwrap();
    assert_eq!(all_row["total_climbs"], 2);
}

#[actix_web::test]
async fn test_invalid_range_is_rejected_without_recompute() {
    let state = sample_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    for uri in [
        "/dashboard?start=bogus&end=2024-01-31",
        "/dashboard?start=2024-02-01&end=2024-01-01",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[actix_web::test]
async fn test_upload_replaces_dataset() {
    let state = sample_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let replacement = "Date,Route,Rating,Location,Length,Notes\n\
                       2025-03-01,C,5.11a,Utah > Moab,90,\n";
    let req = test::TestRequest::post()
        .uri("/ticks")
        .set_json(json!({"csv": replacement}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let guard = state.dataset.read().unwrap();
    assert_eq!(guard.records.len(), 1);
    assert_eq!(guard.records[0].route, "C");
}

#[actix_web::test]
async fn test_failed_upload_preserves_previous_dataset() {
    let state = sample_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    // Parses but no row carries Date+Route.
    let req = test::TestRequest::post()
        .uri("/ticks")
        .set_json(json!({"csv": "Date,Route,Rating,Location,Length,Notes\n,,,,,\n"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let guard = state.dataset.read().unwrap();
    assert_eq!(guard.records.len(), 2);
    assert_eq!(guard.records[0].route, "A");
}

#[actix_web::test]
async fn test_map_omits_unknown_regions() {
    let state = web::Data::new(AppState {
        dataset: RwLock::new(
            dataset_from_csv(
                "Date,Route,Rating,Location,Length,Notes\n\
                 2024-01-05,A,5.9,Colorado > X,80,\n\
                 2024-01-06,B,5.8,Atlantis > Y,70,\n",
            )
            .unwrap(),
        ),
    });
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/map").to_request();
    let markers: Value = test::call_and_read_body_json(&app, req).await;
    let regions: Vec<&str> = markers
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["region"].as_str().unwrap())
        .collect();
    assert_eq!(regions, vec!["Colorado"]);
}
