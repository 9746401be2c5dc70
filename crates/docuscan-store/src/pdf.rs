// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rendering of captured documents using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::RgbaImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use docuscan_core::config::OutputConfig;
use docuscan_core::error::Result;
use docuscan_core::types::PaperSize;

/// Renders a captured frame as a single-page PDF.
///
/// The image is scaled to fit within the page margins while preserving its
/// aspect ratio, then centred on the page. Images smaller than the usable
/// area are never upscaled.
pub struct PdfComposer {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

/// Page margin around the placed image.
const MARGIN_MM: f32 = 15.0;

/// Resolution the image is placed at before fit-scaling.
const PLACEMENT_DPI: f32 = 150.0;

impl PdfComposer {
    /// Create a new composer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a composer from the output configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.paper_size)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Render a single-page PDF containing the given frame.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn compose(&self, frame: &RgbaImage) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Scanned Document");

        info!(paper = ?self.paper_size, title, "rendering capture as PDF");

        let img_width = frame.width() as usize;
        let img_height = frame.height() as usize;

        // RGB8 is the pixel format printpdf embeds.
        let rgb = image::DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let usable_w_pt = Mm(page_w.0 - 2.0 * MARGIN_MM).into_pt().0;
        let usable_h_pt = Mm(page_h.0 - 2.0 * MARGIN_MM).into_pt().0;

        let img_w_pt = img_width as f32 / PLACEMENT_DPI * 72.0;
        let img_h_pt = img_height as f32 / PLACEMENT_DPI * 72.0;

        // Scale to fit while preserving aspect ratio; do not upscale.
        let scale_x = usable_w_pt / img_w_pt;
        let scale_y = usable_h_pt / img_h_pt;
        let scale = scale_x.min(scale_y).min(1.0);

        let rendered_w_pt = img_w_pt * scale;
        let rendered_h_pt = img_h_pt * scale;

        // Centre the image on the page.
        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let x_offset = margin_pt + (usable_w_pt - rendered_w_pt) / 2.0;
        let y_offset = margin_pt + (usable_h_pt - rendered_h_pt) / 2.0;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_offset)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(PLACEMENT_DPI),
                rotate: None,
            },
        }];

        let page = PdfPage::new(page_w, page_h, ops);
        doc.with_pages(vec![page]);

        debug!(rendered_w_pt, rendered_h_pt, scale, "image placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        Ok(output)
    }
}
