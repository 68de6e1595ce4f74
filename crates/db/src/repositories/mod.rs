//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod carousel_repo;
pub mod character_repo;
pub mod order_repo;
pub mod password_reset_repo;
pub mod post_repo;
pub mod product_repo;
pub mod quiz_repo;

pub use admin_repo::AdminRepo;
pub use carousel_repo::CarouselSlideRepo;
pub use character_repo::CharacterRepo;
pub use order_repo::OrderRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use post_repo::PostRepo;
pub use product_repo::ProductRepo;
pub use quiz_repo::QuizRepo;
