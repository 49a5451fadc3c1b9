//! QR code records, catalog hydration and the form controller.

pub mod catalog;
pub mod context;
pub mod database;
pub mod domain;
pub mod form;
pub mod images;

#[cfg(test)]
mod test;
