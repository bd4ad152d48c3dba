//! Concrete pipeline stages for qrsheet.
//!
//! Each stage implements the engine's [`Stage`](qrsheet_engine::Stage) seam:
//! - [`ShareLinkStage`] derives the public view link from a remote file id
//! - [`UploadStage`] uploads a local video and emits its watch link
//! - [`QrCodeStage`] encodes the link into a PNG artifact

pub mod link;
pub mod qr;
pub mod upload;

pub use link::{share_link, ShareLinkStage};
pub use qr::QrCodeStage;
pub use upload::UploadStage;
