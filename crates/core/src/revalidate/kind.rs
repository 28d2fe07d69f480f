use serde::Serialize;

/// Content types whose changes invalidate more than the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Company,
    Hero,
    Blog,
    Category,
    Author,
    Gallery,
    Testimonial,
    Person,
}

impl ContentKind {
    pub const ALL: [ContentKind; 8] = [
        ContentKind::Company,
        ContentKind::Hero,
        ContentKind::Blog,
        ContentKind::Category,
        ContentKind::Author,
        ContentKind::Gallery,
        ContentKind::Testimonial,
        ContentKind::Person,
    ];

    pub fn from_type(doc_type: &str) -> Option<Self> {
        match doc_type {
            "company" => Some(ContentKind::Company),
            "hero" => Some(ContentKind::Hero),
            "blog" => Some(ContentKind::Blog),
            "category" => Some(ContentKind::Category),
            "author" => Some(ContentKind::Author),
            "gallery" => Some(ContentKind::Gallery),
            "testimonial" => Some(ContentKind::Testimonial),
            "person" => Some(ContentKind::Person),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Company => "company",
            ContentKind::Hero => "hero",
            ContentKind::Blog => "blog",
            ContentKind::Category => "category",
            ContentKind::Author => "author",
            ContentKind::Gallery => "gallery",
            ContentKind::Testimonial => "testimonial",
            ContentKind::Person => "person",
        }
    }

    /// Tags and paths made stale by a change to a document of this kind.
    pub fn plan(&self, slug: Option<&str>) -> RevalidationPlan {
        match self {
            ContentKind::Company => RevalidationPlan {
                tags: owned(&["companies", "homepage-companies"]),
                paths: owned(&["/"]),
            },
            ContentKind::Hero => RevalidationPlan {
                tags: owned(&["hero-slides"]),
                paths: owned(&["/"]),
            },
            ContentKind::Blog => {
                let mut plan = RevalidationPlan {
                    tags: owned(&["blog-posts", "blog-list"]),
                    paths: Vec::new(),
                };
                if let Some(slug) = slug {
                    plan.tags.push(format!("blog-{slug}"));
                    plan.paths.push(format!("/insights/blogs/{slug}"));
                }
                plan.paths.push("/insights/blogs".into());
                plan.paths.push("/".into());
                plan
            }
            ContentKind::Category => RevalidationPlan {
                tags: owned(&["categories"]),
                paths: owned(&["/insights/blogs"]),
            },
            ContentKind::Author => RevalidationPlan {
                tags: owned(&["authors"]),
                paths: owned(&["/insights/blogs"]),
            },
            ContentKind::Gallery => RevalidationPlan {
                tags: owned(&["gallery-items"]),
                paths: owned(&["/about/gallery"]),
            },
            ContentKind::Testimonial => RevalidationPlan {
                tags: owned(&["testimonials", "featured-testimonials"]),
                paths: owned(&["/about/customer-stories", "/"]),
            },
            ContentKind::Person => RevalidationPlan {
                tags: owned(&["team-members", "leadership-team", "management-team"]),
                paths: owned(&["/about/our-people", "/"]),
            },
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ordered invalidation work for one event: tags first, then paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevalidationPlan {
    pub tags: Vec<String>,
    pub paths: Vec<String>,
}

impl RevalidationPlan {
    /// Plan for a raw content type; unknown types only refresh the home page.
    pub fn for_type(doc_type: Option<&str>, slug: Option<&str>) -> Self {
        match doc_type.and_then(ContentKind::from_type) {
            Some(kind) => kind.plan(slug),
            None => RevalidationPlan {
                tags: Vec::new(),
                paths: vec!["/".into()],
            },
        }
    }
}
