//! QR Code Handlers

pub(crate) mod action;
pub(crate) mod index;
pub(crate) mod load;
pub(crate) mod scan;
