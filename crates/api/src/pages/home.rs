use brochure_core::content::types::{BlogPost, Company, HeroSlide, TeamMember, Testimonial};
use maud::{html, Markup};

use super::blog::post_card;
use super::layout;

pub struct HomeContent {
    pub hero_slides: Vec<HeroSlide>,
    pub companies: Vec<Company>,
    pub testimonials: Vec<Testimonial>,
    pub leaders: Vec<TeamMember>,
    pub latest_posts: Vec<BlogPost>,
}

pub fn render(site_name: &str, content: &HomeContent) -> Markup {
    layout::page(
        site_name,
        "Home",
        html! {
            @if !content.hero_slides.is_empty() {
                section.hero {
                    @for slide in &content.hero_slides {
                        article.hero-slide {
                            @if let Some(url) = slide.image.as_ref().and_then(|i| i.url.as_deref()) {
                                img src=(url) alt=(slide.image.as_ref().and_then(|i| i.alt.as_deref()).unwrap_or(""));
                            }
                            h1 { (slide.heading) }
                            @if let Some(sub) = &slide.subheading { p { (sub) } }
                            @if let (Some(label), Some(href)) = (&slide.cta_label, &slide.cta_href) {
                                a.cta href=(href) { (label) }
                            }
                        }
                    }
                }
            }
            @if !content.companies.is_empty() {
                section.companies {
                    h2 { "Trusted by" }
                    ul.logos {
                        @for company in &content.companies {
                            li {
                                @match company.logo.as_ref().and_then(|l| l.url.as_deref()) {
                                    Some(url) => {
                                        img src=(url) alt=(company.name);
                                    }
                                    None => {
                                        span { (company.name) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @if !content.testimonials.is_empty() {
                section.testimonials {
                    h2 { "What our clients say" }
                    @for t in &content.testimonials {
                        blockquote {
                            p { (t.quote) }
                            footer { (t.author_name) @if let Some(c) = &t.company { ", " (c) } }
                        }
                    }
                    a href="/about/customer-stories" { "More customer stories" }
                }
            }
            @if !content.leaders.is_empty() {
                section.leadership {
                    h2 { "Leadership" }
                    ul {
                        @for person in &content.leaders {
                            li { strong { (person.name) } @if let Some(role) = &person.role { " - " (role) } }
                        }
                    }
                }
            }
            @if !content.latest_posts.is_empty() {
                section.latest-posts {
                    h2 { "Latest insights" }
                    @for post in &content.latest_posts { (post_card(post)) }
                }
            }
            section id="contact" {
                h2 { "Get in touch" }
                p { "Send us a message and we will get back to you." }
                form method="post" action="/api/contact" data-json="true" {
                    input name="firstName" placeholder="First name" required;
                    input name="lastName" placeholder="Last name" required;
                    input name="email" type="email" placeholder="Email" required;
                    input name="howDidYouHear" placeholder="How did you hear about us?" required;
                    input name="serviceInterested" placeholder="Service you are interested in" required;
                    textarea name="message" placeholder="Message" required {}
                    label { input name="agreeToPrivacy" type="checkbox" value="true" required; " I agree to the privacy policy" }
                    button type="submit" { "Send" }
                    p.form-status role="status" {}
                }
            }
        },
    )
}
