use brochure_core::content::types::{GalleryItem, TeamGroup, TeamMember, Testimonial};
use maud::{html, Markup};

use super::layout;

pub fn gallery(site_name: &str, items: &[GalleryItem]) -> Markup {
    layout::page(
        site_name,
        "Gallery",
        html! {
            h1 { "Events gallery" }
            @for item in items {
                article.gallery-item {
                    h2 { (item.title) }
                    p.meta {
                        @if let Some(date) = &item.event_date { (layout::format_day(date)) }
                        @if let Some(location) = &item.location { " · " (location) }
                    }
                    @if let Some(description) = &item.description { p { (description) } }
                    div.images {
                        @for image in &item.images {
                            @if let Some(url) = &image.url {
                                img src=(url) alt=(image.alt.as_deref().unwrap_or(item.title.as_str())) loading="lazy";
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn customer_stories(site_name: &str, testimonials: &[Testimonial]) -> Markup {
    layout::page(
        site_name,
        "Customer Stories",
        html! {
            h1 { "Customer stories" }
            @for t in testimonials {
                blockquote.testimonial {
                    p { (t.quote) }
                    footer {
                        strong { (t.author_name) }
                        @if let Some(title) = &t.author_title { ", " (title) }
                        @if let Some(company) = &t.company { ", " (company) }
                    }
                }
            }
        },
    )
}

fn people_section(heading: &str, members: &[&TeamMember]) -> Markup {
    html! {
        @if !members.is_empty() {
            section.team {
                h2 { (heading) }
                ul {
                    @for person in members {
                        li {
                            @if let Some(url) = person.photo.as_ref().and_then(|p| p.url.as_deref()) {
                                img src=(url) alt=(person.name);
                            }
                            strong { (person.name) }
                            @if let Some(role) = &person.role { span.role { (role) } }
                            @if let Some(bio) = &person.bio { p { (bio) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn our_people(site_name: &str, members: &[TeamMember]) -> Markup {
    let group = |g: TeamGroup| members.iter().filter(|m| m.group == g).collect::<Vec<_>>();
    layout::page(
        site_name,
        "Our People",
        html! {
            h1 { "Our people" }
            (people_section("Leadership team", &group(TeamGroup::Leadership)))
            (people_section("Management team", &group(TeamGroup::Management)))
            (people_section("Our team", &group(TeamGroup::Staff)))
        },
    )
}
