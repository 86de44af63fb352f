pub mod entry_service;
pub mod query_service;
pub mod summary_service;

pub use entry_service::EntryService;
pub use query_service::QueryService;
pub use summary_service::SummaryService;
