mod common;

use common::TestApp;
use http::StatusCode;
use phd_portal::repositories::UserRepository;
use serde_json::json;

#[tokio::test]
async fn signup_record_has_every_fixed_slot() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "PhD engg-CSE", "FT").await;

    let uri = format!("/api/v1/user/phd-scholar/{}", scholar.scholar_id);
    let (status, record) = app.get(&uri, &scholar.token).await;
    assert_eq!(status, StatusCode::OK);

    for slot in ["courseWork1", "courseWork2", "courseWork3", "courseWork4"] {
        assert!(record[slot].is_object(), "{slot} missing");
        assert_eq!(record[slot]["subjectCode"], "");
    }
    for seminar in ["seminar1", "seminar2", "seminar3", "seminar4"] {
        assert!(record["phdMilestones"][seminar].is_object(), "{seminar} missing");
    }
    assert_eq!(record["personalDetails"]["firstName"], "Asha");
    assert_eq!(record["admissionDetails"]["department"], "PhD engg-CSE");
    assert_eq!(record["version"], 1);
}

#[tokio::test]
async fn renaming_the_scholar_renames_the_account() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;

    let uri = format!("/api/v1/user/phd-scholar/{}", scholar.scholar_id);
    let (status, body) = app
        .put(
            &uri,
            &scholar.token,
            json!({ "personalDetails": { "firstName": "Ashwini", "lastName": "Menon" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["firstName"], "Ashwini");
    assert_eq!(body["scholar"]["version"], 2);

    let user = UserRepository::new(&app.state.db)
        .find_by_id(scholar.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Ashwini");
    assert_eq!(user.last_name, "Menon");
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;

    let uri = format!("/api/v1/user/phd-scholar/{}", scholar.scholar_id);
    let (status, body) = app
        .put(
            &uri,
            &scholar.token,
            json!({ "courseWork2": { "subjectCode": "CS902", "grade": "A" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].is_null());

    let (_, record) = app.get(&uri, &scholar.token).await;
    assert_eq!(record["courseWork2"]["subjectCode"], "CS902");
    assert_eq!(record["admissionDetails"]["modeOfProgram"], "FT");
    assert_eq!(record["personalDetails"]["lastName"], "Nair");
}

#[tokio::test]
async fn rejects_unknown_slots_and_stale_versions() {
    let app = TestApp::new().await;
    let scholar = app.signup("asha@uni.edu", "CSE", "FT").await;
    let uri = format!("/api/v1/user/phd-scholar/{}", scholar.scholar_id);

    let (status, body) = app
        .put(&uri, &scholar.token, json!({ "courseWork5": { "subjectCode": "X" } }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");

    let (status, _) = app
        .put(&uri, &scholar.token, json!({ "version": 1, "researchSupervisor": "Dr. Rao" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put(&uri, &scholar.token, json!({ "version": 1, "researchSupervisor": "Dr. Iyer" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn only_owner_or_admin_may_edit() {
    let app = TestApp::new().await;
    let owner = app.signup("asha@uni.edu", "CSE", "FT").await;
    let other = app.signup("ravi@uni.edu", "ECE", "IPT").await;
    let uri = format!("/api/v1/user/phd-scholar/{}", owner.scholar_id);

    let (status, _) = app.get(&uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .put(&uri, &other.token, json!({ "researchSupervisor": "x" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, _) = app
        .put(&uri, &admin, json!({ "admissionDetails": { "usn": "1XX22PCS01" } }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_scholar_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let uri = format!("/api/v1/user/phd-scholar/{}", uuid::Uuid::new_v4());
    let (status, body) = app.put(&uri, &admin, json!({ "researchSupervisor": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn supervisor_sees_only_their_scholars() {
    let app = TestApp::new().await;
    let supervised = app.signup("asha@uni.edu", "CSE", "FT").await;
    let (status, _) = app
        .put(
            &format!("/api/v1/user/phd-scholar/{}", supervised.scholar_id),
            &supervised.token,
            json!({ "researchSupervisor": "Dr. Meera Rao" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let other = app.signup("ravi@uni.edu", "ECE", "IPT").await;
    app.put(
        &format!("/api/v1/user/phd-scholar/{}", other.scholar_id),
        &other.token,
        json!({ "researchSupervisor": "Prof. Suresh" }),
    )
    .await;

    let supervisor = app.supervisor("meera@uni.edu", "Meera", "Rao").await;
    let (status, body) = app.get("/api/v1/supervisor/phd-scholars", &supervisor).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["scholars"][0]["scholarId"], supervised.scholar_id.to_string());

    let (status, _) = app.get("/api/v1/supervisor/phd-scholars", &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (_, all) = app.get("/api/v1/admin/phd-scholars?search=ECE", &admin).await;
    assert_eq!(all["total"], 1);
    assert_eq!(all["scholars"][0]["scholarId"], other.scholar_id.to_string());
}

#[tokio::test]
async fn signup_keeps_values_sent_in_nested_profile() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/api/v1/signup",
            None,
            json!({
                "email": "ravi@uni.edu",
                "password": common::PASSWORD,
                "firstName": "Ravi",
                "lastName": "Kumar",
                "usn": "1XX22PEC04",
                "profile": {
                    "personalDetails": { "mobile": "98860", "dateOfBirth": "1996-04-12" },
                    "admissionDetails": {
                        "department": "PhD engg-ECE",
                        "modeOfProgram": "IPT",
                        "admissionDate": "2023-08-01",
                        "usn": "overridden"
                    },
                    "researchSupervisor": "Dr. Meera Rao"
                }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let token = app.login("ravi@uni.edu", common::PASSWORD).await;
    let uri = format!("/api/v1/user/phd-scholar/{}", body["scholarId"].as_str().unwrap());
    let (status, record) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);

    let admission = &record["admissionDetails"];
    assert_eq!(admission["department"], "PhD engg-ECE");
    assert_eq!(admission["modeOfProgram"], "IPT");
    assert_eq!(admission["admissionDate"], "2023-08-01");
    assert_eq!(admission["usn"], "1XX22PEC04");
    assert_eq!(record["personalDetails"]["mobile"], "98860");
    assert_eq!(record["personalDetails"]["dateOfBirth"], "1996-04-12");
    assert_eq!(record["personalDetails"]["firstName"], "Ravi");
    assert_eq!(record["researchSupervisor"], "Dr. Meera Rao");
}
