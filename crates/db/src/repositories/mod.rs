//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod download_repo;
pub mod like_repo;

pub use download_repo::DownloadRepo;
pub use like_repo::LikeRepo;
