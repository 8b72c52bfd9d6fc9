pub mod api;
pub mod http;
pub mod logging;
pub mod pages;
pub mod workspace;

// Re-export key types for easier usage
pub use api::{Api, ApiError, Database, DatabaseInput, DatabasePatch, Page, PageContent, PageInput};
pub use http::HttpApi;
pub use pages::PageSession;
pub use workspace::{AutomationPanel, DatabaseWorkspace};
