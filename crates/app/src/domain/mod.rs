//! QR Code Admin Domain Concerns

pub mod qr_codes;
pub mod sessions;
