use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common;

// ── Events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn event_create_update_publish_delete() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let mut body = common::event_body("Cloud Bootcamp");
    body["is_published"] = json!(false);
    body["location"] = json!("");
    let event = common::create_event(&app, &admin, body.clone()).await;
    let id = event["id"].as_str().unwrap().to_string();
    assert_eq!(event["location"], serde_json::Value::Null);

    body["title"] = json!("Cloud Bootcamp 2.0");
    body["max_participants"] = json!(40);
    let (status, updated) =
        common::put_json(&app, &format!("/api/admin/events/{id}"), body, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Cloud Bootcamp 2.0");
    assert_eq!(updated["max_participants"], 40);
    assert_eq!(updated["created_at"], event["created_at"]);

    let (status, published) = common::patch_json(
        &app,
        &format!("/api/admin/events/{id}/publish"),
        json!({ "is_published": true }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["is_published"], true);

    let (status, _) = common::delete(&app, &format!("/api/admin/events/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = common::delete(&app, &format!("/api/admin/events/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn event_requires_title_and_positive_capacity() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let mut body = common::event_body("");
    body["max_participants"] = json!(0);
    let (status, body) = common::post_json(&app, "/api/admin/events", body, Some(&admin)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["title"], "Title is required");
    assert_eq!(body["field_errors"]["max_participants"], "Capacity must be at least 1");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, body) = common::delete(&app, "/api/admin/events/42", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid UUID format");
}

#[tokio::test]
async fn deleting_an_event_removes_its_registrations() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("Hack Night")).await;
    let id = event["id"].as_str().unwrap();
    common::post_json(
        &app,
        &format!("/api/events/{id}/registrations"),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;

    let (_, rows) = common::get(&app, "/api/admin/registrations", Some(&admin)).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["event_title"], "Hack Night");

    common::delete(&app, &format!("/api/admin/events/{id}"), Some(&admin)).await;
    let (_, rows) = common::get(&app, "/api/admin/registrations", Some(&admin)).await;
    assert!(rows.as_array().unwrap().is_empty());
}

// ── Registrations ───────────────────────────────────────────────────

#[tokio::test]
async fn registration_status_can_be_changed_and_deleted() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("AI Workshop")).await;
    let (_, reg) = common::post_json(
        &app,
        &format!("/api/events/{}/registrations", event["id"].as_str().unwrap()),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;
    let id = reg["id"].as_str().unwrap();

    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/registrations/{id}/status"),
        json!({ "status": "accepted" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    let (status, _) = common::patch_json(
        &app,
        &format!("/api/admin/registrations/{id}/status"),
        json!({ "status": "maybe" }),
        Some(&admin),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _) =
        common::delete(&app, &format!("/api/admin/registrations/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ── Applications ────────────────────────────────────────────────────

#[tokio::test]
async fn applications_filter_by_kind_and_update_status() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/applications", common::application_body("internship"), None).await;
    common::post_json(&app, "/api/applications", common::application_body("career"), None).await;

    let (_, all) = common::get(&app, "/api/admin/applications", Some(&admin)).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, interns) = common::get(&app, "/api/admin/applications?kind=internship", Some(&admin)).await;
    let interns = interns.as_array().unwrap();
    assert_eq!(interns.len(), 1);
    assert_eq!(interns[0]["kind"], "internship");

    let id = interns[0]["id"].as_str().unwrap();
    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/applications/{id}/status"),
        json!({ "status": "reviewed" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reviewed");

    let (status, _) =
        common::delete(&app, &format!("/api/admin/applications/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, all) = common::get(&app, "/api/admin/applications", Some(&admin)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

// ── Contacts and newsletter ─────────────────────────────────────────

#[tokio::test]
async fn contact_can_be_marked_read() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (_, contact) = common::post_json(
        &app,
        "/api/contact",
        json!({ "name": "Meera", "email": "meera@example.com", "message": "Hello" }),
        None,
    )
    .await;
    let id = contact["id"].as_str().unwrap();

    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/contacts/{id}/read"),
        json!({ "is_read": true }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_read"], true);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/contacts/{missing}/read"),
        json!({ "is_read": true }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Contact not found");
}

#[tokio::test]
async fn subscription_can_be_deactivated_by_admin() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (_, sub) =
        common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;

    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/newsletter/{}/active", sub["id"].as_str().unwrap()),
        json!({ "is_active": false }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
}

// ── Blog ────────────────────────────────────────────────────────────

#[tokio::test]
async fn blog_slug_is_derived_and_unique() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let post = json!({ "title": "Getting Started  with IoT!", "content": "Body", "category": "tutorials" });

    let (status, body) = common::post_json(&app, "/api/admin/blog", post.clone(), Some(&admin)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "getting-started-with-iot");
    assert_eq!(body["published_at"], serde_json::Value::Null);

    let (status, body) = common::post_json(&app, "/api/admin/blog", post, Some(&admin)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "A blog post with this slug already exists");

    let (status, body) = common::post_json(
        &app,
        "/api/admin/blog",
        json!({ "title": "!!!", "content": "Body" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["slug"], "Slug cannot be empty");
}

#[tokio::test]
async fn publishing_a_post_stamps_published_at_once() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (_, post) = common::post_json(
        &app,
        "/api/admin/blog",
        json!({ "title": "Launch", "content": "We launched" }),
        Some(&admin),
    )
    .await;
    let uri = format!("/api/admin/blog/{}/publish", post["id"].as_str().unwrap());

    let (_, first) = common::patch_json(&app, &uri, json!({ "is_published": true }), Some(&admin)).await;
    let stamped = first["published_at"].clone();
    assert!(stamped.is_string());

    let (_, again) = common::patch_json(&app, &uri, json!({ "is_published": true }), Some(&admin)).await;
    assert_eq!(again["published_at"], stamped);

    let (_, hidden) = common::patch_json(&app, &uri, json!({ "is_published": false }), Some(&admin)).await;
    assert_eq!(hidden["published_at"], serde_json::Value::Null);
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test]
async fn product_technologies_are_cleaned_and_feature_toggles() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, product) = common::post_json(
        &app,
        "/api/admin/products",
        json!({
            "name": "SmartFarm",
            "description": "Soil sensors",
            "category": "iot",
            "technologies": [" Rust ", "", "MQTT"],
        }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["technologies"], json!(["Rust", "MQTT"]));
    assert_eq!(product["is_featured"], false);

    let (status, body) = common::patch_json(
        &app,
        &format!("/api/admin/products/{}/feature", product["id"].as_str().unwrap()),
        json!({ "is_featured": true }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_featured"], true);
}

#[tokio::test]
async fn product_requires_name() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, body) = common::post_json(
        &app,
        "/api/admin/products",
        json!({ "name": "", "description": "Soil sensors" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["name"], "Product name is required");
}

// ── Testimonials ────────────────────────────────────────────────────

#[tokio::test]
async fn testimonial_defaults_and_moderation() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, t) = common::post_json(
        &app,
        "/api/admin/testimonials",
        json!({ "name": "Kavya", "content": "Loved the bootcamp" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(t["rating"], 5);
    assert_eq!(t["is_approved"], false);

    let id = t["id"].as_str().unwrap();
    let (_, approved) = common::patch_json(
        &app,
        &format!("/api/admin/testimonials/{id}/approve"),
        json!({ "is_approved": true }),
        Some(&admin),
    )
    .await;
    assert_eq!(approved["is_approved"], true);

    let (status, body) = common::put_json(
        &app,
        &format!("/api/admin/testimonials/{id}"),
        json!({ "name": "Kavya", "content": "Loved it", "rating": 6 }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["rating"], "Rating must be between 1 and 5");
}

// ── Team ────────────────────────────────────────────────────────────

#[tokio::test]
async fn role_can_be_removed() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::register(&app, "mentor@example.com").await;
    let (_, team) = common::get(&app, "/api/admin/team", Some(&admin)).await;
    let mentor = team
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["email"] == "mentor@example.com")
        .unwrap()
        .clone();
    let uri = format!("/api/admin/team/{}/role", mentor["id"].as_str().unwrap());

    let (status, _) = common::put_json(&app, &uri, json!({ "role": "moderator" }), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::delete(&app, &uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ── Stats ───────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_count_each_table() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("AI Workshop")).await;
    common::post_json(
        &app,
        &format!("/api/events/{}/registrations", event["id"].as_str().unwrap()),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;
    common::post_json(&app, "/api/applications", common::application_body("internship"), None).await;
    common::post_json(&app, "/api/applications", common::application_body("internship"), None).await;
    common::post_json(&app, "/api/applications", common::application_body("career"), None).await;
    common::post_json(
        &app,
        "/api/contact",
        json!({ "name": "Meera", "email": "meera@example.com", "message": "Hi" }),
        None,
    )
    .await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;

    let (status, stats) = common::get(&app, "/api/admin/stats", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "total_events": 1,
            "internship_applications": 2,
            "career_applications": 1,
            "unread_contacts": 1,
            "active_subscribers": 1,
            "pending_registrations": 1,
        })
    );
}
