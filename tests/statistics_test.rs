mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::Value;

fn bucket<'a>(stats: &'a Value, name: &str) -> Option<&'a Value> {
    stats["facultyStats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["name"] == name)
}

#[tokio::test]
async fn signup_shows_up_in_the_engineering_bucket() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, before) = app.get("/api/v1/admin/statistics", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let engineering_ft = bucket(&before, "Engineering").map_or(0, |b| b["FT"].as_u64().unwrap());
    let mode_ft = before["modeStats"]["FT"].as_u64().unwrap();

    app.signup("asha@uni.edu", "PhD engg-CSE", "FT").await;

    let (_, after) = app.get("/api/v1/admin/statistics", &admin).await;
    let engineering = bucket(&after, "Engineering").expect("Engineering bucket");
    assert_eq!(engineering["FT"].as_u64().unwrap(), engineering_ft + 1);
    assert_eq!(after["modeStats"]["FT"].as_u64().unwrap(), mode_ft + 1);
}

#[tokio::test]
async fn buckets_are_sorted_and_drillable() {
    let app = TestApp::new().await;
    app.signup("a@uni.edu", "PhD engg-CSE", "FT").await;
    app.signup("b@uni.edu", "cse", "IPT").await;
    app.signup("c@uni.edu", "ECE", "FT").await;
    app.signup("d@uni.edu", "Pharmacy Practice", "EPT").await;

    let admin = app.admin_token().await;
    let (_, stats) = app.get("/api/v1/admin/statistics", &admin).await;

    let totals: Vec<u64> = stats["facultyStats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["total"].as_u64().unwrap())
        .collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(bucket(&stats, "Engineering").unwrap()["total"], 3);
    assert_eq!(bucket(&stats, "Pharmacy").unwrap()["total"], 1);
    assert!(stats.get("rawRecords").is_none());

    let (_, drill) = app
        .get("/api/v1/admin/statistics?faculty=Engineering", &admin)
        .await;
    assert_eq!(drill["rawRecords"].as_array().unwrap().len(), 3);
    assert_eq!(drill["departmentStats"][0]["name"], "CSE");
    assert_eq!(drill["departmentStats"][0]["total"], 2);
}

#[tokio::test]
async fn export_is_csv() {
    let app = TestApp::new().await;
    app.signup("a@uni.edu", "CSE", "FT").await;
    let admin = app.admin_token().await;

    let request = http::Request::builder()
        .uri("/api/v1/admin/statistics/export")
        .header(http::header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, bytes) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let csv = String::from_utf8(bytes).unwrap();
    assert!(csv.starts_with("faculty,FT,IPT,EPT,unspecified,total"));
    assert!(csv.contains("Engineering,1,0,0,0,1"));
}
