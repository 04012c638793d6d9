mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn reply_appends_exactly_one_entry() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;

    let (status, discussion) = app
        .post(
            "/api/v1/collaborations/discussions",
            Some(&scholar.token),
            json!({ "title": "Seminar 2 prep", "content": "Who is presenting?" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(discussion["replies"], json!([]));
    assert_eq!(discussion["authorName"], "Asha Nair");

    let replier = app.signup("ravi@uni.edu", "ECE", "IPT").await;
    let uri = format!(
        "/api/v1/collaborations/discussions/{}/reply",
        discussion["discussionId"].as_str().unwrap()
    );
    let (status, updated) = app
        .post(&uri, Some(&replier.token), json!({ "content": "I am" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let replies = updated["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["content"], "I am");
    assert_eq!(replies[0]["authorId"], replier.user_id.to_string());
    assert_ne!(updated["updatedAt"], discussion["updatedAt"]);

    let (status, _) = app
        .post(&uri, Some(&replier.token), json!({ "content": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn meetings_are_for_admins_and_supervisors() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;
    let meeting = json!({
        "title": "DC meeting",
        "description": "Progress review",
        "date": "2026-03-14",
        "time": "14:30",
        "location": "Seminar Hall 2"
    });

    let (status, _) = app
        .post("/api/v1/collaborations/meetings", Some(&scholar.token), meeting.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let supervisor = app.supervisor("meera@uni.edu", "Meera", "Rao").await;
    let (status, created) = app
        .post("/api/v1/collaborations/meetings", Some(&supervisor), meeting)
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["organizerName"], "Meera Rao");

    let uri = format!(
        "/api/v1/collaborations/meetings/{}/comment",
        created["id"].as_str().unwrap()
    );
    let (status, commented) = app
        .post(&uri, Some(&scholar.token), json!({ "content": "Will attend" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(commented["comments"].as_array().unwrap().len(), 1);

    let (_, meetings) = app
        .get("/api/v1/collaborations/meetings", &scholar.token)
        .await;
    assert_eq!(meetings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn events_need_date_time_and_location() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .post(
            "/api/v1/collaborations/events",
            Some(&admin),
            json!({ "title": "Research day", "date": "2026-04-01", "time": "10:00", "location": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/collaborations/events",
            Some(&admin),
            json!({ "title": "Research day", "date": "April 1", "time": "10:00", "location": "Hall" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, event) = app
        .post(
            "/api/v1/collaborations/events",
            Some(&admin),
            json!({ "title": "Research day", "date": "2026-04-01", "time": "10:00", "location": "Hall" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/v1/collaborations/events/{}", event["id"].as_str().unwrap());
    let (status, fetched) = app.get(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["date"], "2026-04-01");
    assert_eq!(fetched["time"], "10:00");

    let (status, _) = app
        .get(
            &format!("/api/v1/collaborations/events/{}", uuid::Uuid::new_v4()),
            &admin,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_replies_are_all_kept() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;

    let (status, discussion) = app
        .post(
            "/api/v1/collaborations/discussions",
            Some(&scholar.token),
            json!({ "title": "Lab slots", "content": "Sign up below" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let discussion_id = discussion["discussionId"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/collaborations/discussions/{discussion_id}/reply");

    let (a, b, c, d, e) = tokio::join!(
        app.post(&uri, Some(&scholar.token), json!({ "content": "slot 1" })),
        app.post(&uri, Some(&scholar.token), json!({ "content": "slot 2" })),
        app.post(&uri, Some(&scholar.token), json!({ "content": "slot 3" })),
        app.post(&uri, Some(&scholar.token), json!({ "content": "slot 4" })),
        app.post(&uri, Some(&scholar.token), json!({ "content": "slot 5" })),
    );

    let mut accepted = Vec::new();
    for (status, body) in [a, b, c, d, e] {
        if status == StatusCode::OK {
            accepted.push(body["replies"].as_array().unwrap().len());
        } else {
            assert_eq!(status, StatusCode::CONFLICT, "{body}");
        }
    }
    assert!(!accepted.is_empty());

    let (status, stored) = app
        .get(&format!("/api/v1/collaborations/discussions/{discussion_id}"), &scholar.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let replies = stored["replies"].as_array().unwrap();
    assert_eq!(replies.len(), accepted.len());

    // Every accepted reply saw a distinct thread length
    accepted.sort_unstable();
    accepted.dedup();
    assert_eq!(accepted.len(), replies.len());
}
