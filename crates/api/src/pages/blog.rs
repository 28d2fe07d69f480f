use brochure_core::content::types::{BlogPost, Category};
use maud::{html, Markup};

use super::layout;

fn post_href(post: &BlogPost) -> String {
    format!("/insights/blogs/{}", post.slug.as_str())
}

/// Summary card used on listings.
pub fn post_card(post: &BlogPost) -> Markup {
    html! {
        article.post-card {
            h3 { a href=(post_href(post)) { (post.title) } }
            @if let Some(date) = &post.published_at {
                time datetime=(date.to_rfc3339()) { (layout::format_date(date)) }
            }
            @if let Some(excerpt) = &post.excerpt { p { (excerpt) } }
        }
    }
}

pub fn list(site_name: &str, posts: &[BlogPost], categories: &[Category]) -> Markup {
    layout::page(
        site_name,
        "Insights",
        html! {
            h1 { "Insights" }
            @if !categories.is_empty() {
                ul.categories {
                    @for category in categories { li { (category.title) } }
                }
            }
            @if posts.is_empty() {
                p { "No posts yet. Check back soon." }
            } @else {
                @for post in posts { (post_card(post)) }
            }
        },
    )
}

pub fn detail(site_name: &str, post: &BlogPost) -> Markup {
    layout::page(
        site_name,
        &post.title,
        html! {
            article.post {
                h1 { (post.title) }
                p.meta {
                    @if let Some(author) = &post.author { "By " (author.name) }
                    @if let Some(date) = &post.published_at {
                        " · " time datetime=(date.to_rfc3339()) { (layout::format_date(date)) }
                    }
                }
                @if let Some(url) = post.main_image.as_ref().and_then(|i| i.url.as_deref()) {
                    img src=(url) alt=(post.main_image.as_ref().and_then(|i| i.alt.as_deref()).unwrap_or(post.title.as_str()));
                }
                @for paragraph in &post.body { p { (paragraph) } }
                @if !post.categories.is_empty() {
                    ul.categories {
                        @for category in &post.categories { li { (category.title) } }
                    }
                }
                @if let Some(bio) = post.author.as_ref().and_then(|a| a.bio.as_deref()) {
                    aside.author-bio { p { (bio) } }
                }
            }
            a href="/insights/blogs" { "All insights" }
        },
    )
}
