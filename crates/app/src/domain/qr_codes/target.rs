//! QR Code Route Targets

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

use crate::domain::qr_codes::records::QrCodeId;

/// Path segment naming a record that does not exist yet.
pub const DRAFT_SEGMENT: &str = "new";

/// What a `/qrcodes/{id}` route points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QrCodeTarget {
    /// An unsaved record with no identifier.
    #[default]
    Draft,

    /// A persisted record.
    Existing(QrCodeId),
}

impl QrCodeTarget {
    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }

    pub const fn id(self) -> Option<QrCodeId> {
        match self {
            Self::Draft => None,
            Self::Existing(id) => Some(id),
        }
    }
}

impl From<QrCodeId> for QrCodeTarget {
    fn from(id: QrCodeId) -> Self {
        Self::Existing(id)
    }
}

impl Display for QrCodeTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Draft => f.write_str(DRAFT_SEGMENT),
            Self::Existing(id) => Display::fmt(id, f),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("\"{0}\" is neither \"new\" nor a QR code id")]
pub struct InvalidQrCodeTarget(pub String);

impl FromStr for QrCodeTarget {
    type Err = InvalidQrCodeTarget;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if segment == DRAFT_SEGMENT {
            return Ok(Self::Draft);
        }

        match segment.parse::<QrCodeId>() {
            Ok(id) if id.into_inner() > 0 => Ok(Self::Existing(id)),
            Ok(_) | Err(_) => Err(InvalidQrCodeTarget(segment.to_string())),
        }
    }
}
