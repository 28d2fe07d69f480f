//! HTTP surface of the brochure site: server-rendered pages, form
//! endpoints, and the CMS revalidation webhook.

pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::build_router;
pub use state::AppState;
