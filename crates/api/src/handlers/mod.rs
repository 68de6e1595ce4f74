pub mod admin;
pub mod carousel;
pub mod characters;
pub mod chatbot;
pub mod orders;
pub mod payment;
pub mod posts;
pub mod products;
pub mod quiz;
pub mod uploads;
