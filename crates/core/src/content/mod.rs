pub mod catalog;
pub mod memory;
pub mod page;
pub mod query;
pub mod store;
pub mod types;

pub use memory::MemoryContentStore;
pub use page::{Page, PageError, PageRequest};
pub use query::DocumentQuery;
pub use store::{ContentError, ContentStore};
