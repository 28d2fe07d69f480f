mod common;

use axum::http::{header, StatusCode};
use axum::response::Response;
use brochure_api::pages::CACHE_TAG_HEADER;
use common::{app, text_body};
use serde_json::{json, Value};

fn site_documents() -> Vec<Value> {
    vec![
        json!({"_id": "hero-1", "_type": "hero", "heading": "Grow with us", "order": 1}),
        json!({"_id": "co-1", "_type": "company", "name": "Initech"}),
        json!({
            "_id": "t-1", "_type": "testimonial", "quote": "Superb.",
            "authorName": "Pat", "featured": true,
        }),
        json!({"_id": "t-2", "_type": "testimonial", "quote": "Solid.", "authorName": "Sam"}),
        json!({"_id": "p-1", "_type": "person", "name": "Robin Lead", "group": "leadership"}),
        json!({"_id": "p-2", "_type": "person", "name": "Kim Manager", "group": "management"}),
        json!({"_id": "p-3", "_type": "person", "name": "Alex Staff"}),
        json!({
            "_id": "b-1", "_type": "blog", "title": "Hello World",
            "slug": {"current": "hello-world"},
            "publishedAt": "2024-03-01T09:00:00Z",
            "excerpt": "First post",
            "body": ["Paragraph one."],
        }),
        json!({"_id": "cat-1", "_type": "category", "title": "News"}),
        json!({"_id": "g-1", "_type": "gallery", "title": "Summit 2024", "eventDate": "2024-05-02"}),
        json!({"_id": "tp-1", "_type": "trainingProgram", "title": "Leadership 101"}),
    ]
}

fn cache_tags(response: &Response) -> Vec<String> {
    response
        .headers()
        .get(CACHE_TAG_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

fn cache_control(response: &Response) -> &str {
    response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn pages_declare_cache_headers() {
    let app = app(site_documents());
    let cases: [(&str, &[&str]); 7] = [
        (
            "/",
            &[
                "hero-slides",
                "companies",
                "homepage-companies",
                "featured-testimonials",
                "leadership-team",
                "blog-list",
            ],
        ),
        ("/insights/blogs", &["blog-list", "blog-posts", "categories", "authors"]),
        (
            "/insights/blogs/hello-world",
            &["blog-hello-world", "blog-posts", "authors", "categories"],
        ),
        ("/about/gallery", &["gallery-items"]),
        ("/about/customer-stories", &["testimonials"]),
        (
            "/about/our-people",
            &["team-members", "leadership-team", "management-team"],
        ),
        ("/services/training", &["training-programs"]),
    ];

    for (path, tags) in cases {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(
            cache_control(&response),
            "public, s-maxage=60, stale-while-revalidate",
            "{path}"
        );
        assert_eq!(cache_tags(&response), tags.to_vec(), "{path}");
    }
}

#[tokio::test]
async fn page_tags_are_purged_by_the_webhook_mapping() {
    use brochure_core::revalidate::{ContentKind, RevalidationPlan};

    let purged: Vec<String> = ContentKind::ALL
        .iter()
        .flat_map(|kind| kind.plan(Some("hello-world")).tags)
        .collect();

    let app = app(site_documents());
    for path in [
        "/",
        "/insights/blogs",
        "/insights/blogs/hello-world",
        "/about/gallery",
        "/about/customer-stories",
        "/about/our-people",
    ] {
        let response = app.get(path).await;
        for tag in cache_tags(&response) {
            assert!(purged.contains(&tag), "{path}: {tag} is never purged");
        }
    }
    assert_eq!(RevalidationPlan::for_type(None, None).paths, vec!["/"]);
}

#[tokio::test]
async fn home_page_renders_featured_content() {
    let app = app(site_documents());
    let html = text_body(app.get("/").await).await;
    assert!(html.contains("Grow with us"));
    assert!(html.contains("Initech"));
    assert!(html.contains("Superb."));
    assert!(!html.contains("Solid."));
    assert!(html.contains("Robin Lead"));
    assert!(!html.contains("Alex Staff"));
    assert!(html.contains("Hello World"));
}

#[tokio::test]
async fn blog_post_renders_body() {
    let app = app(site_documents());
    let response = app.get("/insights/blogs/hello-world").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("Hello World"));
    assert!(html.contains("Paragraph one."));
}

#[tokio::test]
async fn missing_blog_post_is_a_404() {
    let app = app(site_documents());
    let response = app.get("/insights/blogs/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        cache_tags(&response),
        vec!["blog-nope", "blog-posts", "authors", "categories"]
    );
}

#[tokio::test]
async fn unknown_path_is_a_404_page() {
    let app = app(vec![]);
    let response = app.get("/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text_body(response).await.contains("<html"));
}

#[tokio::test]
async fn cms_failure_renders_an_uncached_500() {
    let app = app(site_documents());
    app.store.set_unavailable(true);
    let response = app.get("/about/gallery").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(cache_control(&response), "no-store");
    assert!(response.headers().get(CACHE_TAG_HEADER).is_none());
}

#[tokio::test]
async fn our_people_groups_members() {
    let app = app(site_documents());
    let html = text_body(app.get("/about/our-people").await).await;
    let lead = html.find("Robin Lead").expect("leader rendered");
    let manager = html.find("Kim Manager").expect("manager rendered");
    let staff = html.find("Alex Staff").expect("staff rendered");
    assert!(lead < manager && manager < staff);
}

#[tokio::test]
async fn half_filled_documents_do_not_break_pages() {
    let mut documents = site_documents();
    documents.extend([
        json!({"_id": "t-3", "_type": "testimonial", "quote": "Great", "featured": true}),
        json!({"_id": "p-4", "_type": "person", "name": "Jo Board", "group": "board"}),
        json!({"_id": "b-2", "_type": "blog", "title": "Draft without slug"}),
    ]);
    let app = app(documents);

    let home = app.get("/").await;
    assert_eq!(home.status(), StatusCode::OK);
    let html = text_body(home).await;
    assert!(html.contains("Superb."));
    assert!(!html.contains("Great"));

    let people = app.get("/about/our-people").await;
    assert_eq!(people.status(), StatusCode::OK);
    assert!(text_body(people).await.contains("Jo Board"));

    let blog = app.get("/insights/blogs").await;
    assert_eq!(blog.status(), StatusCode::OK);
    let html = text_body(blog).await;
    assert!(html.contains("Hello World"));
    assert!(!html.contains("Draft without slug"));
}
