//! Typed content records as projected from the CMS.
//!
//! Field names follow the CMS schema (camelCase). Optional fields may be left
//! blank by editors; a record missing a required field (a post's slug, a
//! testimonial's author) is skipped by the catalog rather than failing the
//! whole listing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::document::model::Slug;

/// CMS `_type` names for the documents this site reads and writes.
pub mod doc_type {
    pub const BLOG: &str = "blog";
    pub const CATEGORY: &str = "category";
    pub const AUTHOR: &str = "author";
    pub const GALLERY: &str = "gallery";
    pub const TESTIMONIAL: &str = "testimonial";
    pub const PERSON: &str = "person";
    pub const COMPANY: &str = "company";
    pub const HERO: &str = "hero";
    pub const TRAINING_PROGRAM: &str = "trainingProgram";
    pub const WEBINAR: &str = "webinar";
    pub const CONTACT_SUBMISSION: &str = "contactSubmission";
    pub const NEWSLETTER_SUBSCRIPTION: &str = "newsletterSubscription";
}

/// Projections yield `null` for fields the editor never filled in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Plain-text body paragraphs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub main_image: Option<Image>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

/// An entry of the events gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: String,
    pub quote: String,
    pub author_name: String,
    #[serde(default)]
    pub author_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamGroup {
    Leadership,
    Management,
    /// Also any group this site does not know about.
    #[default]
    #[serde(other)]
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: TeamGroup,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo: Option<Image>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<Image>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    #[serde(rename = "_id")]
    pub id: String,
    pub heading: String,
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_href: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub delivery_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webinar {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub recording_url: Option<String>,
}
