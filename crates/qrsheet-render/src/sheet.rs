//! PDF sheet renderer.
//!
//! Lays the QR artifacts out on A4 pages: a colored cell per video with the
//! QR image centered and two caption lines beneath it.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    path::PaintMode, BuiltinFont, Color, Image, ImageTransform, Mm, PdfDocument, Rect, Rgb,
};
use tracing::info;

use qrsheet_models::{display_name, Record, FIELD_QR_PATH};

use crate::error::{RenderError, RenderResult};
use crate::geometry::{CellPlacement, SheetGeometry, POINTS_PER_INCH};

/// Cell background, a deep navy.
const CELL_COLOR: (f64, f64, f64) = (15.0 / 255.0, 34.0 / 255.0, 93.0 / 255.0);

const CAPTION_SIZE: f64 = 10.0;

/// Approximate glyph advance of Helvetica-Bold relative to the font size.
/// Builtin font metrics are not exposed, so captions are centered by
/// estimate.
const CAPTION_ADVANCE: f64 = 0.55;

/// One cell on the sheet: a caption name and the QR artifact to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub name: String,
    pub qr_path: PathBuf,
}

/// Map the final record set to sheet cells.
///
/// Fails when a record has no QR artifact field; the caption name is the
/// digit-stripped display form of the identity.
pub fn cells_from_records(records: &[Record]) -> RenderResult<Vec<SheetCell>> {
    records
        .iter()
        .map(|record| {
            let qr_path = record.get(FIELD_QR_PATH).ok_or_else(|| {
                RenderError::artifact(format!("record '{}' has no QR artifact", record.title()))
            })?;
            Ok(SheetCell {
                name: display_name(record.title()),
                qr_path: PathBuf::from(qr_path),
            })
        })
        .collect()
}

/// Renders the paginated QR sheet to a single PDF file.
#[derive(Debug, Clone, Default)]
pub struct SheetRenderer {
    geometry: SheetGeometry,
}

impl SheetRenderer {
    pub fn new(geometry: SheetGeometry) -> Self {
        Self { geometry }
    }

    /// Render all cells to `out_path`, row-major, breaking pages at the
    /// grid capacity.
    pub fn render(&self, cells: &[SheetCell], out_path: &Path) -> RenderResult<()> {
        let g = &self.geometry;
        let (doc, first_page, first_layer) = PdfDocument::new(
            "QR code sheet",
            mm(g.page_width),
            mm(g.page_height),
            "cells",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::pdf(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut current_page = 0usize;

        for (index, cell) in cells.iter().enumerate() {
            let placement = g.place(index);
            if placement.page != current_page {
                let (page, layer_index) =
                    doc.add_page(mm(g.page_width), mm(g.page_height), "cells");
                layer = doc.get_page(page).get_layer(layer_index);
                current_page = placement.page;
            }
            self.draw_cell(&layer, &font, cell, &placement)?;
        }

        let file = File::create(out_path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| RenderError::pdf(e.to_string()))?;

        info!(
            path = %out_path.display(),
            cells = cells.len(),
            pages = g.pages_needed(cells.len().max(1)),
            "Rendered QR sheet"
        );
        Ok(())
    }

    fn draw_cell(
        &self,
        layer: &printpdf::PdfLayerReference,
        font: &printpdf::IndirectFontRef,
        cell: &SheetCell,
        placement: &CellPlacement,
    ) -> RenderResult<()> {
        let g = &self.geometry;

        // Cell background
        let (r, gr, b) = CELL_COLOR;
        layer.set_fill_color(Color::Rgb(Rgb::new(r as f32, gr as f32, b as f32, None)));
        layer.add_rect(
            Rect::new(
                mm(placement.x),
                mm(placement.y_top - g.cell_height),
                mm(placement.x + g.cell_width),
                mm(placement.y_top),
            )
            .with_mode(PaintMode::Fill),
        );

        // QR image, centered horizontally
        let artifact = image::open(&cell.qr_path).map_err(|e| {
            RenderError::artifact(format!("{}: {}", cell.qr_path.display(), e))
        })?;
        let scale = g.qr_size / artifact.width() as f64;
        let qr_x = g.qr_x(placement);
        let qr_y = g.qr_y(placement);
        Image::from_dynamic_image(&artifact).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(mm(qr_x)),
                translate_y: Some(mm(qr_y)),
                scale_x: Some(scale as f32),
                scale_y: Some(scale as f32),
                dpi: Some(POINTS_PER_INCH as f32),
                ..Default::default()
            },
        );

        // Captions below the QR code
        layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
        let center_x = placement.x + g.cell_width / 2.0;
        self.draw_centered(
            layer,
            font,
            &format!("Hey {},", cell.name),
            center_x,
            qr_y - 0.2 * POINTS_PER_INCH,
        );
        self.draw_centered(
            layer,
            font,
            "Scan me :)",
            center_x,
            qr_y - 0.35 * POINTS_PER_INCH,
        );
        Ok(())
    }

    fn draw_centered(
        &self,
        layer: &printpdf::PdfLayerReference,
        font: &printpdf::IndirectFontRef,
        text: &str,
        center_x: f64,
        baseline_y: f64,
    ) {
        let width = text.chars().count() as f64 * CAPTION_SIZE * CAPTION_ADVANCE;
        layer.use_text(
            text,
            CAPTION_SIZE as f32,
            mm(center_x - width / 2.0),
            mm(baseline_y),
            font,
        );
    }
}

/// Points to millimeters.
fn mm(points: f64) -> Mm {
    Mm((points * 25.4 / 72.0) as f32)
}
