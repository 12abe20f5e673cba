//! Business logic services.

pub mod address;
pub mod compositor;
pub mod fetcher;
pub mod mailer;
pub mod reconcile;
pub mod storage;

pub use fetcher::ImageFetcher;
pub use mailer::Mailer;
pub use storage::Storage;
