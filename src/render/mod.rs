//! PDF report rendering.
//!
//! Layout is computed up front by [`layout`], then painted with `printpdf`
//! using the built-in Helvetica family, so no font files are needed.

pub mod layout;

use chrono::{DateTime, Utc};
use printpdf::{
    image_crate, BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point,
};
use thiserror::Error;

use crate::errors::AppError;
use layout::*;

/// Rendering failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font setup failed: {0}")]
    Font(String),

    #[error("PDF serialization failed: {0}")]
    Save(String),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::render(err.to_string())
    }
}

/// Text content of a generated report
#[derive(Debug, Clone)]
pub struct ReportContent {
    pub title: String,
    pub institution_name: String,
    pub address: String,
    pub phone: String,
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Render a report to PDF bytes.
///
/// `logo` is optional raw image data; if it cannot be decoded the report
/// is rendered without it.
pub fn render_report(content: &ReportContent, logo: Option<&[u8]>) -> Result<Vec<u8>, RenderError> {
    let pages = layout_body(&content.body);
    let total = pages.len();
    let generated = content.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let (doc, first_page, first_layer) =
        PdfDocument::new(&content.title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let fonts = Fonts {
        regular: builtin(&doc, BuiltinFont::Helvetica)?,
        bold: builtin(&doc, BuiltinFont::HelveticaBold)?,
        italic: builtin(&doc, BuiltinFont::HelveticaOblique)?,
    };

    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        if index == 0 {
            if let Some(bytes) = logo {
                paint_logo(&layer, bytes);
            }
            paint_header(&layer, &fonts, content);
        }

        for line in lines.iter().filter(|line| !line.text.is_empty()) {
            layer.use_text(
                line.text.as_str(),
                BODY_FONT_PT,
                Mm(MARGIN_MM),
                from_top(line.y_mm),
                &fonts.regular,
            );
        }

        let footer = footer_text(index + 1, total, &generated);
        layer.use_text(
            footer.as_str(),
            FOOTER_FONT_PT,
            Mm(centered_x_mm(&footer, FOOTER_FONT_PT)),
            from_top(FOOTER_Y_MM),
            &fonts.italic,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Save(e.to_string()))
}

fn builtin(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::Font(e.to_string()))
}

/// printpdf measures from the bottom edge
fn from_top(y_mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y_mm)
}

fn centered(layer: &PdfLayerReference, text: &str, font_pt: f32, y_mm: f32, font: &IndirectFontRef) {
    layer.use_text(text, font_pt, Mm(centered_x_mm(text, font_pt)), from_top(y_mm), font);
}

fn paint_header(layer: &PdfLayerReference, fonts: &Fonts, content: &ReportContent) {
    centered(layer, &content.institution_name, INSTITUTION_FONT_PT, INSTITUTION_Y_MM, &fonts.bold);
    centered(layer, &content.address, CONTACT_FONT_PT, ADDRESS_Y_MM, &fonts.regular);
    centered(
        layer,
        &format!("Contact: {}", content.phone),
        CONTACT_FONT_PT,
        PHONE_Y_MM,
        &fonts.regular,
    );

    layer.set_outline_thickness(SEPARATOR_THICKNESS_PT);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), from_top(SEPARATOR_Y_MM)), false),
            (
                Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), from_top(SEPARATOR_Y_MM)),
                false,
            ),
        ],
        is_closed: false,
    });

    layer.use_text(
        content.title.as_str(),
        TITLE_FONT_PT,
        Mm(MARGIN_MM),
        from_top(TITLE_Y_MM),
        &fonts.bold,
    );
    layer.use_text(
        format!("Generated on: {}", content.generated_at.format("%d %B %Y")),
        GENERATED_ON_FONT_PT,
        Mm(MARGIN_MM),
        from_top(GENERATED_ON_Y_MM),
        &fonts.italic,
    );
}

fn paint_logo(layer: &PdfLayerReference, bytes: &[u8]) {
    const DPI: f32 = 300.0;

    let decoded = match image_crate::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Logo image could not be decoded, skipping: {}", e);
            return;
        }
    };

    // PDF image XObjects here carry no alpha channel
    let rgb = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let (width_px, height_px) = (rgb.width() as f32, rgb.height() as f32);
    if width_px == 0.0 || height_px == 0.0 {
        return;
    }

    let natural_width_mm = width_px / DPI * 25.4;
    let scale = LOGO_WIDTH_MM / natural_width_mm;
    let height_mm = height_px / DPI * 25.4 * scale;

    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_MM)),
            translate_y: Some(from_top(MARGIN_MM + height_mm)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(DPI),
            ..Default::default()
        },
    );
}
