pub mod admin;
pub mod carousel;
pub mod character;
pub mod order;
pub mod password_reset;
pub mod post;
pub mod product;
pub mod quiz;
