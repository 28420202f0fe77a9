use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common;

#[tokio::test]
async fn empty_tables_fall_back_to_sample_content() {
    let app = common::test_app();
    for uri in [
        "/api/public/events",
        "/api/public/blog",
        "/api/public/products",
        "/api/public/testimonials",
    ] {
        let (status, body) = common::get(&app, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["source"], "fallback", "{uri}");
        assert!(!body["items"].as_array().unwrap().is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn public_events_hide_drafts_and_report_open_registration() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::create_event(&app, &admin, common::event_body("Open Workshop")).await;
    let mut draft = common::event_body("Hidden Draft");
    draft["is_published"] = json!(false);
    common::create_event(&app, &admin, draft).await;

    let (_, body) = common::get(&app, "/api/public/events", None).await;
    assert_eq!(body["source"], "live");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Open Workshop");
    assert_eq!(items[0]["registration_open"], true);
}

#[tokio::test]
async fn blog_lists_published_posts_and_filters_by_category() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    for (title, category, published) in [
        ("Rust on Microcontrollers", "tech", true),
        ("Hackathon Recap", "events", true),
        ("Unfinished Draft", "tech", false),
    ] {
        common::post_json(
            &app,
            "/api/admin/blog",
            json!({ "title": title, "content": "Body", "category": category, "is_published": published }),
            Some(&admin),
        )
        .await;
    }

    let (_, all) = common::get(&app, "/api/public/blog", None).await;
    assert_eq!(all["items"].as_array().unwrap().len(), 2);

    let (_, tech) = common::get(&app, "/api/public/blog?category=Tech", None).await;
    let tech = tech["items"].as_array().unwrap();
    assert_eq!(tech.len(), 1);
    assert_eq!(tech[0]["slug"], "rust-on-microcontrollers");

    let (_, everything) = common::get(&app, "/api/public/blog?category=all", None).await;
    assert_eq!(everything["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn blog_post_by_slug_requires_publication() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(
        &app,
        "/api/admin/blog",
        json!({ "title": "Draft Post", "content": "Body" }),
        Some(&admin),
    )
    .await;
    common::post_json(
        &app,
        "/api/admin/blog",
        json!({ "title": "Live Post", "content": "Body", "is_published": true }),
        Some(&admin),
    )
    .await;

    let (status, post) = common::get(&app, "/api/public/blog/live-post", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["title"], "Live Post");

    let (status, body) = common::get(&app, "/api/public/blog/draft-post", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog post not found");
}

#[tokio::test]
async fn featured_products_come_first() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    for (name, category, featured) in [
        ("Chatbot", "ai", false),
        ("SmartFarm", "iot", true),
        ("Portfolio Kit", "web", false),
    ] {
        common::post_json(
            &app,
            "/api/admin/products",
            json!({
                "name": name,
                "description": "Demo",
                "category": category,
                "is_published": true,
                "is_featured": featured,
            }),
            Some(&admin),
        )
        .await;
    }

    let (_, body) = common::get(&app, "/api/public/products", None).await;
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["SmartFarm", "Portfolio Kit", "Chatbot"]);

    let (_, ai) = common::get(&app, "/api/public/products?category=ai", None).await;
    assert_eq!(ai["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn testimonials_need_approval_and_feature_and_are_capped() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(
        &app,
        "/api/admin/testimonials",
        json!({ "name": "Hidden", "content": "Not approved", "is_featured": true }),
        Some(&admin),
    )
    .await;
    for i in 0..8 {
        common::post_json(
            &app,
            "/api/admin/testimonials",
            json!({
                "name": format!("Student {i}"),
                "content": "Great mentors",
                "is_approved": true,
                "is_featured": true,
            }),
            Some(&admin),
        )
        .await;
    }

    let (_, body) = common::get(&app, "/api/public/testimonials", None).await;
    assert_eq!(body["source"], "live");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert!(items.iter().all(|t| t["name"] != "Hidden"));
    assert_eq!(items[0]["name"], "Student 7");
}

#[tokio::test]
async fn gallery_filters_by_category() {
    let app = common::test_app();
    let (_, all) = common::get(&app, "/api/public/gallery", None).await;
    let all = all["items"].as_array().unwrap().len();

    let (_, videos) = common::get(&app, "/api/public/gallery?category=Video", None).await;
    let videos = videos["items"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["type"], "video");
    assert!(videos[0]["video_url"].is_string());
    assert!(all > videos.len());
}

#[tokio::test]
async fn positions_by_kind() {
    let app = common::test_app();
    let (_, interns) = common::get(&app, "/api/public/positions?kind=internship", None).await;
    let (_, careers) = common::get(&app, "/api/public/positions?kind=career", None).await;
    let (_, both) = common::get(&app, "/api/public/positions", None).await;

    let interns = interns.as_array().unwrap();
    let careers = careers.as_array().unwrap();
    assert!(interns.iter().all(|p| p["kind"] == "internship"));
    assert!(careers.iter().all(|p| p["kind"] == "career"));
    assert_eq!(both.as_array().unwrap().len(), interns.len() + careers.len());
}

#[tokio::test]
async fn health_reports_store() {
    let app = common::test_app();
    let (status, body) = common::get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory: connected");
}
