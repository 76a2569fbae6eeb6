mod common;

use common::{request, test_app};
use hyper::StatusCode;
use serde_json::json;

#[tokio::test]
async fn plots_get_placeholder_names_in_order() {
    let app = test_app();

    let (status, first) = request(&app, "POST", "/plots", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "Plot 1");
    assert_eq!(first["crop_name"], "Maize");
    assert_eq!(first["area_acres"], 1.0);

    let (_, second) = request(
        &app,
        "POST",
        "/plots",
        None,
        Some(json!({"name": "South paddock", "area_acres": 2.5, "crop": "Beans"})),
    )
    .await;
    assert_eq!(second["name"], "South paddock");

    let (status, list) = request(&app, "GET", "/plots", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Plot 1", "South paddock"]);
}

#[tokio::test]
async fn plot_creation_is_validated() {
    let app = test_app();

    let (status, body) =
        request(&app, "POST", "/plots", None, Some(json!({"area_acres": -1.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_ACREAGE");

    let (status, body) =
        request(&app, "POST", "/plots", None, Some(json!({"crop": "Kale"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_CROP");

    let (_, list) = request(&app, "GET", "/plots", None, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn created_plots_carry_the_pinned_timestamp() {
    let app = test_app();
    let (_, plot) = request(&app, "POST", "/plots", None, Some(json!({}))).await;
    assert!(plot["created_at"].as_str().unwrap().starts_with("2024-06-01T12:00:00"));
}

#[tokio::test]
async fn activating_and_deleting_the_active_plot() {
    let app = test_app();

    let (_, plot) = request(&app, "POST", "/plots", None, Some(json!({"name": "a"}))).await;
    let id = plot["id"].as_str().unwrap().to_owned();

    let (_, active) = request(&app, "GET", "/plots/active", None, None).await;
    assert!(active.is_null());

    let (status, body) =
        request(&app, "POST", &format!("/plots/{}/activate", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activated"], true);

    let (_, active) = request(&app, "GET", "/plots/active", None, None).await;
    assert_eq!(active["id"].as_str().unwrap(), id);

    // deleting the active plot clears the marker too
    let (_, body) = request(&app, "DELETE", &format!("/plots/{}", id), None, None).await;
    assert_eq!(body["deleted"], true);
    let (_, active) = request(&app, "GET", "/plots/active", None, None).await;
    assert!(active.is_null());

    // a second delete has nothing left to remove
    let (status, body) = request(&app, "DELETE", &format!("/plots/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn activating_a_missing_plot_is_reported_not_failed() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "POST",
        "/plots/00000000-0000-0000-0000-00000000beef/activate",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activated"], false);
}

#[tokio::test]
async fn clearing_the_marker_without_deleting() {
    let app = test_app();
    let (_, plot) = request(&app, "POST", "/plots", None, Some(json!({"name": "a"}))).await;
    let id = plot["id"].as_str().unwrap().to_owned();
    request(&app, "POST", &format!("/plots/{}/activate", id), None, None).await;

    let (_, body) = request(&app, "DELETE", "/plots/active", None, None).await;
    assert_eq!(body["cleared"], true);

    let (_, list) = request(&app, "GET", "/plots", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1); // the plot itself survives

    let (_, body) = request(&app, "DELETE", "/plots/active", None, None).await;
    assert_eq!(body["cleared"], false);
}

#[tokio::test]
async fn clear_all_empties_registry_and_marker_together() {
    let app = test_app();
    for name in ["a", "b", "c"] {
        request(&app, "POST", "/plots", None, Some(json!({"name": name}))).await;
    }
    let (_, list) = request(&app, "GET", "/plots", None, None).await;
    let id = list[1]["id"].as_str().unwrap().to_owned();
    request(&app, "POST", &format!("/plots/{}/activate", id), None, None).await;

    let (_, body) = request(&app, "DELETE", "/plots", None, None).await;
    assert_eq!(body["removed"], 3);

    let (_, list) = request(&app, "GET", "/plots", None, None).await;
    assert!(list.as_array().unwrap().is_empty());
    let (_, active) = request(&app, "GET", "/plots/active", None, None).await;
    assert!(active.is_null());
}

#[tokio::test]
async fn the_active_plot_feeds_the_balance() {
    let app = test_app();
    let (_, plot) = request(
        &app,
        "POST",
        "/plots",
        None,
        Some(json!({"name": "beans", "area_acres": 2.0, "crop": "Beans"})),
    )
    .await;
    let id = plot["id"].as_str().unwrap().to_owned();
    request(&app, "POST", &format!("/plots/{}/activate", id), None, None).await;

    let (status, entry) = request(&app, "POST", "/balance", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["crop_name"], "Beans");
    assert_eq!(entry["area_acres"], 2.0);

    // explicit request values still win over the active plot
    let (_, entry) =
        request(&app, "POST", "/balance", None, Some(json!({"crop": "Tomatoes"}))).await;
    assert_eq!(entry["crop_name"], "Tomatoes");
    assert_eq!(entry["area_acres"], 2.0);
}

#[tokio::test]
async fn weather_log_drives_the_default_eto() {
    let app = test_app();

    // default session ETo is 5.0; Maize Initial daily use would be 1.5 mm
    let (_, entry) = request(&app, "POST", "/balance", None, Some(json!({}))).await;
    let daily = entry["result"]["stages"][0]["daily_use_mm"].as_f64().unwrap();
    assert!((daily - 1.5).abs() < 1e-9);

    let (status, _) =
        request(&app, "POST", "/weather", None, Some(json!({"eto_mm_day": 8.0}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, entry) = request(&app, "POST", "/balance", None, Some(json!({}))).await;
    let daily = entry["result"]["stages"][0]["daily_use_mm"].as_f64().unwrap();
    assert!((daily - 2.4).abs() < 1e-9); // 0.3 * 8.0
}

#[tokio::test]
async fn weather_defaults_fill_missing_fields() {
    let app = test_app();
    let (_, record) = request(&app, "POST", "/weather", None, Some(json!({}))).await;

    assert_eq!(record["date"], "2024-06-01"); // pinned clock
    assert_eq!(record["temperature_c"], 25.0);
    assert_eq!(record["rainfall_mm"], 0.0);
    assert_eq!(record["eto_mm_day"], 5.0);
}

#[tokio::test]
async fn weather_summary_aggregates_the_log() {
    let app = test_app();

    let (_, summary) = request(&app, "GET", "/weather/summary", None, None).await;
    assert!(summary.is_null()); // nothing logged yet

    for (temp, rain, eto) in [(20.0, 0.0, 4.0), (30.0, 6.0, 6.0)] {
        request(
            &app,
            "POST",
            "/weather",
            None,
            Some(json!({"temperature_c": temp, "rainfall_mm": rain, "eto_mm_day": eto})),
        )
        .await;
    }

    let (_, summary) = request(&app, "GET", "/weather/summary", None, None).await;
    assert_eq!(summary["days"], 2);
    assert_eq!(summary["mean_temperature_c"], 25.0);
    assert_eq!(summary["total_rainfall_mm"], 6.0);
    assert_eq!(summary["mean_eto_mm_day"], 5.0);

    let (_, records) = request(&app, "GET", "/weather", None, None).await;
    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn sessions_do_not_see_each_other() {
    let app = test_app();
    let alice = "11111111-1111-1111-1111-111111111111";
    let bob = "22222222-2222-2222-2222-222222222222";

    request(&app, "POST", "/plots", Some(alice), Some(json!({"name": "alice's"}))).await;
    request(&app, "POST", "/weather", Some(alice), Some(json!({"eto_mm_day": 9.0}))).await;

    let (_, plots) = request(&app, "GET", "/plots", Some(bob), None).await;
    assert!(plots.as_array().unwrap().is_empty());
    let (_, summary) = request(&app, "GET", "/weather/summary", Some(bob), None).await;
    assert!(summary.is_null());

    // and the headerless default session is its own world too
    let (_, plots) = request(&app, "GET", "/plots", None, None).await;
    assert!(plots.as_array().unwrap().is_empty());

    let (_, plots) = request(&app, "GET", "/plots", Some(alice), None).await;
    assert_eq!(plots.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_session_ids_share_the_default_session() {
    let app = test_app();
    request(&app, "POST", "/plots", Some("not-a-uuid"), Some(json!({"name": "x"}))).await;

    let (_, plots) = request(&app, "GET", "/plots", None, None).await;
    assert_eq!(plots.as_array().unwrap().len(), 1);
}
