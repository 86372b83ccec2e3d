//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads take
//! `&PgPool`; methods that take part in a multi-statement workflow take
//! `&mut PgConnection` so the caller can pass an open transaction.

pub mod cart_repo;
pub mod chapter_repo;
pub mod comic_repo;
pub mod comment_repo;
pub mod history_repo;
pub mod notification_repo;
pub mod page_repo;
pub mod premium_plan_repo;
pub mod product_repo;
pub mod receipt_repo;
pub mod thread_repo;
pub mod user_repo;
pub mod waitlist_repo;

pub use cart_repo::CartRepo;
pub use chapter_repo::ChapterRepo;
pub use comic_repo::ComicRepo;
pub use comment_repo::CommentRepo;
pub use history_repo::HistoryRepo;
pub use notification_repo::NotificationRepo;
pub use page_repo::PageRepo;
pub use premium_plan_repo::PremiumPlanRepo;
pub use product_repo::ProductRepo;
pub use receipt_repo::ReceiptRepo;
pub use thread_repo::ThreadRepo;
pub use user_repo::UserRepo;
pub use waitlist_repo::WaitlistRepo;
