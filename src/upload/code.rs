//! Numeric result codes emitted by the upload pipeline.
//!
//! The pipeline only ever emits codes; human-readable text comes from the
//! [`MessageCatalog`](super::MessageCatalog).

use std::fmt;

use serde::{Serialize, Serializer};

/// Result code reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// Request or item succeeded.
    Success,
    /// The request carried no form fields at all.
    MissingFields,
    /// A required field is absent, blank, or malformed.
    InvalidFields,
    /// File exceeds the declared size limit.
    FileTooLarge,
    /// File content type is not in the allowed list.
    UnsupportedType,
    /// The request carried no files.
    NoFiles,
    /// Moving the staged file into the upload root failed.
    PlacementFailed,
    /// The HTTP layer could not stage an uploaded file.
    StagingFailed,
}

impl ResultCode {
    /// Every code, in catalog order.
    pub const ALL: [ResultCode; 8] = [
        ResultCode::Success,
        ResultCode::MissingFields,
        ResultCode::InvalidFields,
        ResultCode::FileTooLarge,
        ResultCode::UnsupportedType,
        ResultCode::NoFiles,
        ResultCode::PlacementFailed,
        ResultCode::StagingFailed,
    ];

    /// Numeric value of this code.
    pub fn as_u32(self) -> u32 {
        match self {
            ResultCode::Success => 0,
            ResultCode::MissingFields => 10001,
            ResultCode::InvalidFields => 10002,
            ResultCode::FileTooLarge => 50001,
            ResultCode::UnsupportedType => 50002,
            ResultCode::NoFiles => 50003,
            ResultCode::PlacementFailed => 50004,
            ResultCode::StagingFailed => 50005,
        }
    }

    /// Look up a code by its numeric value.
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u32() == value)
    }

    /// Whether this code denotes success.
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_u32())
    }
}
