//! Typed read helpers over a [`ContentStore`], one per listing the site
//! renders. Projections dereference CMS references so every helper returns
//! self-contained records.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::page::{Page, PageRequest};
use super::query::DocumentQuery;
use super::store::{ContentError, ContentStore};
use super::types::{
    doc_type, BlogPost, Category, Company, GalleryItem, HeroSlide, TeamMember, Testimonial,
    TrainingProgram, Webinar,
};

const BLOG_PROJECTION: &str = r#"{
  _id, title, slug, excerpt, publishedAt,
  "body": body[_type == "block"]{"text": pt::text(@)}[].text,
  "mainImage": mainImage{"url": asset->url, "alt": alt},
  "author": author->{_id, name, bio, "image": image{"url": asset->url, "alt": alt}},
  "categories": coalesce(categories[]->{_id, title, slug}, [])
}"#;

const GALLERY_PROJECTION: &str =
    r#"{_id, title, description, eventDate, location, "images": coalesce(images[]{"url": asset->url, "alt": alt}, [])}"#;

const PERSON_PROJECTION: &str =
    r#"{_id, name, role, group, bio, order, "photo": photo{"url": asset->url, "alt": alt}}"#;

const COMPANY_PROJECTION: &str = r#"{_id, name, website, "logo": logo{"url": asset->url, "alt": alt}}"#;

const HERO_PROJECTION: &str =
    r#"{_id, heading, subheading, ctaLabel, ctaHref, "image": image{"url": asset->url, "alt": alt}}"#;

/// Decode one record, skipping it with a warning if it does not fit the type.
fn decode<T: DeserializeOwned>(doc_type: &str, value: Value) -> Option<T> {
    let id = value
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or("<no id>")
        .to_string();
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(doc_type, document_id = %id, error = %e, "skipping malformed document");
            None
        }
    }
}

fn decode_all<T: DeserializeOwned>(doc_type: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| decode(doc_type, value))
        .collect()
}

pub async fn hero_slides(store: &dyn ContentStore) -> Result<Vec<HeroSlide>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::HERO)
        .order_by("order", false)
        .project(HERO_PROJECTION);
    Ok(decode_all(doc_type::HERO, store.fetch(&query).await?))
}

pub async fn companies(store: &dyn ContentStore) -> Result<Vec<Company>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::COMPANY)
        .order_by("name", false)
        .project(COMPANY_PROJECTION);
    Ok(decode_all(doc_type::COMPANY, store.fetch(&query).await?))
}

pub async fn testimonials(
    store: &dyn ContentStore,
    featured_only: bool,
) -> Result<Vec<Testimonial>, ContentError> {
    let mut query = DocumentQuery::of_type(doc_type::TESTIMONIAL);
    if featured_only {
        query = query.where_eq("featured", true);
    }
    let query = query
        .order_by("_createdAt", true)
        .project("{_id, quote, authorName, authorTitle, company, \"featured\": coalesce(featured, false)}");
    Ok(decode_all(doc_type::TESTIMONIAL, store.fetch(&query).await?))
}

pub async fn team_members(store: &dyn ContentStore) -> Result<Vec<TeamMember>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::PERSON)
        .order_by("order", false)
        .order_by("name", false)
        .project(PERSON_PROJECTION);
    Ok(decode_all(doc_type::PERSON, store.fetch(&query).await?))
}

/// Posts newest first, optionally capped in the query itself.
pub async fn blog_posts(
    store: &dyn ContentStore,
    limit: Option<usize>,
) -> Result<Vec<BlogPost>, ContentError> {
    let mut query = DocumentQuery::of_type(doc_type::BLOG).order_by("publishedAt", true);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    let query = query.project(BLOG_PROJECTION);
    Ok(decode_all(doc_type::BLOG, store.fetch(&query).await?))
}

pub async fn blog_post(
    store: &dyn ContentStore,
    slug: &str,
) -> Result<Option<BlogPost>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::BLOG)
        .where_eq("slug.current", slug)
        .project(BLOG_PROJECTION);
    // A post that no longer decodes renders as missing rather than failing.
    Ok(store
        .fetch_first(&query)
        .await?
        .and_then(|doc| decode(doc_type::BLOG, doc)))
}

pub async fn categories(store: &dyn ContentStore) -> Result<Vec<Category>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::CATEGORY)
        .order_by("title", false)
        .project("{_id, title, slug}");
    Ok(decode_all(doc_type::CATEGORY, store.fetch(&query).await?))
}

pub async fn gallery_items(store: &dyn ContentStore) -> Result<Vec<GalleryItem>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::GALLERY)
        .order_by("eventDate", true)
        .project(GALLERY_PROJECTION);
    Ok(decode_all(doc_type::GALLERY, store.fetch(&query).await?))
}

pub async fn training_programs(
    store: &dyn ContentStore,
) -> Result<Vec<TrainingProgram>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::TRAINING_PROGRAM)
        .order_by("order", false)
        .order_by("title", false)
        .project("{_id, title, summary, duration, deliveryFormat}");
    Ok(decode_all(doc_type::TRAINING_PROGRAM, store.fetch(&query).await?))
}

/// Webinars newest first, one window at a time.
pub async fn webinars(
    store: &dyn ContentStore,
    request: &PageRequest,
) -> Result<Page<Webinar>, ContentError> {
    let query = DocumentQuery::of_type(doc_type::WEBINAR)
        .order_by("date", true)
        .project("{_id, title, slug, date, description, registrationUrl, recordingUrl}");
    let (items, total) = store.fetch_page(&query, request).await?;
    // `hasMore` follows the window the CMS returned, even if a record in it
    // was skipped.
    let fetched = items.len() as u64;
    Ok(Page {
        items: decode_all(doc_type::WEBINAR, items),
        total_count: total,
        has_more: request.offset() + fetched < total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::memory::MemoryContentStore;
    use serde_json::json;

    fn webinar(id: &str, date: &str) -> Value {
        json!({"_id": id, "_type": "webinar", "title": format!("Webinar {id}"), "date": date})
    }

    #[tokio::test]
    async fn webinar_pages_walk_the_listing() {
        let store = MemoryContentStore::with_documents(vec![
            webinar("w1", "2024-01-01T00:00:00Z"),
            webinar("w2", "2024-02-01T00:00:00Z"),
            webinar("w3", "2024-03-01T00:00:00Z"),
        ]);

        let first = webinars(&store, &PageRequest::new(0, 2).unwrap()).await.unwrap();
        assert_eq!(first.total_count, 3);
        assert!(first.has_more);
        let ids: Vec<&str> = first.items.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w3", "w2"]);

        let second = webinars(&store, &PageRequest::new(2, 2).unwrap()).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_more);

        let past_end = webinars(&store, &PageRequest::new(9, 2).unwrap()).await.unwrap();
        assert!(past_end.items.is_empty());
        assert!(!past_end.has_more);
    }

    #[tokio::test]
    async fn blog_post_by_slug() {
        let store = MemoryContentStore::with_documents(vec![json!({
            "_id": "p1", "_type": "blog", "title": "Hello", "slug": {"current": "hello"}
        })]);
        assert!(blog_post(&store, "hello").await.unwrap().is_some());
        assert!(blog_post(&store, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn featured_testimonials_only() {
        let store = MemoryContentStore::with_documents(vec![
            json!({"_id": "t1", "_type": "testimonial", "quote": "Great", "authorName": "A", "featured": true}),
            json!({"_id": "t2", "_type": "testimonial", "quote": "Fine", "authorName": "B"}),
        ]);
        assert_eq!(testimonials(&store, true).await.unwrap().len(), 1);
        assert_eq!(testimonials(&store, false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn latest_posts_are_capped() {
        let docs = (1..=5)
            .map(|i| {
                json!({"_id": format!("p{i}"), "_type": "blog", "title": "t",
                       "slug": {"current": format!("s{i}")},
                       "publishedAt": format!("2024-0{i}-01T00:00:00Z")})
            })
            .collect();
        let store = MemoryContentStore::with_documents(docs);
        let posts = blog_posts(&store, Some(3)).await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].id, "p5");
    }

    /// Records the GROQ of every list query it forwards.
    #[derive(Default)]
    struct QueryLog {
        inner: MemoryContentStore,
        queries: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ContentStore for QueryLog {
        fn backend_tag(&self) -> &'static str {
            "query-log"
        }

        async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError> {
            self.queries.lock().unwrap().push(query.list_groq());
            self.inner.fetch(query).await
        }

        async fn fetch_first(&self, query: &DocumentQuery) -> Result<Option<Value>, ContentError> {
            self.inner.fetch_first(query).await
        }

        async fn fetch_page(
            &self,
            query: &DocumentQuery,
            page: &PageRequest,
        ) -> Result<(Vec<Value>, u64), ContentError> {
            self.inner.fetch_page(query, page).await
        }

        async fn mutate(
            &self,
            mutations: Vec<crate::mutation::types::Mutation>,
        ) -> Result<crate::mutation::types::MutationResponse, ContentError> {
            self.inner.mutate(mutations).await
        }
    }

    #[tokio::test]
    async fn latest_posts_limit_is_part_of_the_query() {
        let store = QueryLog::default();
        blog_posts(&store, Some(3)).await.unwrap();
        blog_posts(&store, None).await.unwrap();
        let queries = store.queries.lock().unwrap().clone();
        assert!(queries[0].contains("order(publishedAt desc)[0...3]"), "{}", queries[0]);
        assert!(!queries[1].contains("[0..."), "{}", queries[1]);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let store = MemoryContentStore::with_documents(vec![
            json!({"_id": "t1", "_type": "testimonial", "quote": "Great", "authorName": "A"}),
            json!({"_id": "t2", "_type": "testimonial", "quote": "No author"}),
            json!({"_id": "p1", "_type": "blog", "title": "Has slug", "slug": {"current": "ok"}}),
            json!({"_id": "p2", "_type": "blog", "title": "No slug"}),
        ]);

        let stories = testimonials(&store, false).await.unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "t1");

        let posts = blog_posts(&store, None).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "p1");
    }

    #[tokio::test]
    async fn undecodable_post_reads_as_missing() {
        let store = MemoryContentStore::with_documents(vec![json!({
            "_id": "p1", "_type": "blog", "slug": {"current": "untitled"}
        })]);
        assert!(blog_post(&store, "untitled").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn skipped_webinar_keeps_window_accounting() {
        let store = MemoryContentStore::with_documents(vec![
            webinar("w1", "2024-01-01T00:00:00Z"),
            json!({"_id": "w2", "_type": "webinar", "date": "2024-02-01T00:00:00Z"}),
            webinar("w3", "2024-03-01T00:00:00Z"),
        ]);
        let page = webinars(&store, &PageRequest::new(0, 2).unwrap()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 3);
        assert!(page.has_more);
    }
}
