//! QR Codes

pub mod action;
pub mod data;
pub mod errors;
pub mod links;
pub mod models;
pub mod records;
pub mod repository;
pub mod service;
pub mod target;
pub mod validation;

pub use errors::QrCodesServiceError;
pub use service::*;
