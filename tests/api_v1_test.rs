//! Handler-level tests for the JSON API.

mod common;

use actix_web::{App, test, web};
use serde_json::Value;

use common::*;
use grantdesk::handlers;

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .service(web::scope("/api/v1").configure(handlers::api_v1::configure)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_focus_area_catalog_endpoint() {
    let (_dir, pool) = setup_test_pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/v1/focus-areas").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), 10);
    assert_eq!(body[0]["id"], "arts-culture");
    assert_eq!(body[0]["label"], "Arts & Culture");
    assert_eq!(body[9]["id"], "other");
}

#[actix_rt::test]
async fn test_opportunities_require_context() {
    let (_dir, pool) = setup_test_pool();
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/v1/opportunities").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_opportunities_list_with_match_ranking() {
    let (_dir, pool) = setup_test_pool();
    {
        let conn = pool.get().unwrap();
        insert_opportunity(&conn, "opp-miss", "Unrelated", None, "open", None, None, &["international"], None, None);
        insert_opportunity(&conn, "opp-hit", "Literacy", None, "open", None, None, &["education", "health"], None, None);
    }
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/opportunities?context_type=organization&context_id={ORG_ID}&match_areas=education,health"
        ))
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"], "opp-hit");
    assert_eq!(body[0]["match_score"], 100);
    assert_eq!(body[1]["match_score"], 0);
}

#[actix_rt::test]
async fn test_mutations_require_json_content_type() {
    let (_dir, pool) = setup_test_pool();
    {
        let conn = pool.get().unwrap();
        insert_opportunity(&conn, "opp-1", "Grant", None, "open", None, None, &[], None, None);
    }
    let app = test_app!(pool);

    let uri = format!(
        "/api/v1/opportunities/opp-1/bookmark?context_type=freelancer&context_id={CLIENT_ID}&user_id={FREELANCER_USER}"
    );

    // Form-encoded mutation is rejected by the guard
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("is_bookmarked=false")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // JSON goes through
    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(serde_json::json!({ "is_bookmarked": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
}

#[actix_rt::test]
async fn test_proposal_crud_round_trip() {
    let (_dir, pool) = setup_test_pool();
    let app = test_app!(pool);

    let base = format!("context_type=organization&context_id={ORG_ID}&context_name=Helping%20Hands");

    // Create
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/proposals?{base}"))
        .set_json(serde_json::json!({
            "opportunity_id": "opp-1",
            "opportunity_name": "Riverside Literacy Grant",
            "owner_name": "Dana",
            "context_type": "organization",
            "context_id": ORG_ID,
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["status"], "draft");
    assert_eq!(created["progress"], 0);
    assert_eq!(created["checklist_status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    // Update with a draft
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/proposals/{id}?{base}"))
        .set_json(serde_json::json!({
            "status": "submitted",
            "draft": { "html": "<p>Narrative</p>" },
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "submitted");
    assert_eq!(updated["draft"]["html"], "<p>Narrative</p>");

    // Fetch
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/proposals/{id}?{base}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["context_name"], "Helping Hands");

    // Delete (the guard wants JSON on mutations), then the fetch 404s
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/proposals/{id}?{base}"))
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/proposals/{id}?{base}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
