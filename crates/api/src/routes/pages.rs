use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use brochure_core::content::catalog;
use brochure_core::content::types::TeamGroup;

use crate::pages::home::HomeContent;
use crate::pages::{about, blog, home, layout, services, CachedPage, PageFailure};
use crate::state::AppState;

// Cache tags per page. They match the tags the revalidation webhook purges.
pub const HOME_TAGS: [&str; 6] = [
    "hero-slides",
    "companies",
    "homepage-companies",
    "featured-testimonials",
    "leadership-team",
    "blog-list",
];
pub const BLOG_LIST_TAGS: [&str; 4] = ["blog-list", "blog-posts", "categories", "authors"];
pub const GALLERY_TAGS: [&str; 1] = ["gallery-items"];
pub const CUSTOMER_STORIES_TAGS: [&str; 1] = ["testimonials"];
pub const OUR_PEOPLE_TAGS: [&str; 3] = ["team-members", "leadership-team", "management-team"];
/// Not purged by the webhook; expires with the revalidation interval.
pub const TRAINING_TAGS: [&str; 1] = ["training-programs"];

const LATEST_POSTS: usize = 3;

type PageResult = Result<CachedPage, PageFailure>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/insights/blogs", get(blog_list))
        .route("/insights/blogs/{slug}", get(blog_detail))
        .route("/about/gallery", get(gallery))
        .route("/about/customer-stories", get(customer_stories))
        .route("/about/our-people", get(our_people))
        .route("/services/training", get(training))
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn blog_post_tags(slug: &str) -> Vec<String> {
    let mut tags = vec![format!("blog-{slug}")];
    tags.extend(["blog-posts", "authors", "categories"].map(String::from));
    tags
}

fn cached(state: &AppState, markup: maud::Markup, page_tags: Vec<String>) -> CachedPage {
    CachedPage::new(markup, page_tags, state.config().page_revalidate_seconds)
}

async fn home_page(State(state): State<AppState>) -> PageResult {
    let store = state.content();
    let content = HomeContent {
        hero_slides: catalog::hero_slides(store).await?,
        companies: catalog::companies(store).await?,
        testimonials: catalog::testimonials(store, true).await?,
        leaders: catalog::team_members(store)
            .await?
            .into_iter()
            .filter(|m| m.group == TeamGroup::Leadership)
            .collect(),
        latest_posts: catalog::blog_posts(store, Some(LATEST_POSTS)).await?,
    };
    let markup = home::render(&state.config().site_name, &content);
    Ok(cached(&state, markup, tags(&HOME_TAGS)))
}

async fn blog_list(State(state): State<AppState>) -> PageResult {
    let store = state.content();
    let posts = catalog::blog_posts(store, None).await?;
    let categories = catalog::categories(store).await?;
    let markup = blog::list(&state.config().site_name, &posts, &categories);
    Ok(cached(&state, markup, tags(&BLOG_LIST_TAGS)))
}

async fn blog_detail(State(state): State<AppState>, Path(slug): Path<String>) -> PageResult {
    let site_name = &state.config().site_name;
    // Tagged even when missing, so publishing the post purges the 404.
    match catalog::blog_post(state.content(), &slug).await? {
        Some(post) => Ok(cached(&state, blog::detail(site_name, &post), blog_post_tags(&slug))),
        None => {
            tracing::debug!(%slug, "blog post not found");
            Ok(
                cached(&state, layout::not_found_page(site_name), blog_post_tags(&slug))
                    .with_status(StatusCode::NOT_FOUND),
            )
        }
    }
}

async fn gallery(State(state): State<AppState>) -> PageResult {
    let items = catalog::gallery_items(state.content()).await?;
    let markup = about::gallery(&state.config().site_name, &items);
    Ok(cached(&state, markup, tags(&GALLERY_TAGS)))
}

async fn customer_stories(State(state): State<AppState>) -> PageResult {
    let testimonials = catalog::testimonials(state.content(), false).await?;
    let markup = about::customer_stories(&state.config().site_name, &testimonials);
    Ok(cached(&state, markup, tags(&CUSTOMER_STORIES_TAGS)))
}

async fn our_people(State(state): State<AppState>) -> PageResult {
    let members = catalog::team_members(state.content()).await?;
    let markup = about::our_people(&state.config().site_name, &members);
    Ok(cached(&state, markup, tags(&OUR_PEOPLE_TAGS)))
}

async fn training(State(state): State<AppState>) -> PageResult {
    let programs = catalog::training_programs(state.content()).await?;
    let markup = services::training(&state.config().site_name, &programs);
    Ok(cached(&state, markup, tags(&TRAINING_TAGS)))
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> CachedPage {
    cached(&state, layout::not_found_page(&state.config().site_name), Vec::new())
        .with_status(StatusCode::NOT_FOUND)
}
