//! Paginated QR sheet rendering for qrsheet.
//!
//! [`geometry`] holds the pure grid math; [`sheet`] draws the cells into a
//! PDF with `printpdf`.

pub mod error;
pub mod geometry;
pub mod sheet;

pub use error::{RenderError, RenderResult};
pub use geometry::{CellPlacement, SheetGeometry};
pub use sheet::{cells_from_records, SheetCell, SheetRenderer};
