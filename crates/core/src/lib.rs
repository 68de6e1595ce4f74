//! Domain logic for the Việt Sử platform: order/payment rules, the VNPay
//! signature protocol, slug generation, and input validation.
//!
//! This crate has no I/O and no internal dependencies so it can be used by
//! the repository layer, the API server, and any future CLI tooling.

pub mod error;
pub mod order;
pub mod payment;
pub mod slug;
pub mod types;
pub mod validation;
