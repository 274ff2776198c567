use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use crate::assets::LogoAsset;
use crate::error::AppError;
use crate::layout::{
    BoundingBox, FOOTER_BASELINE, LINE_SPACING, PAGE_MARGIN, PageLayout, PageSize, TITLE_FONT,
    TITLE_FONT_SIZE, TITLE_TEXT, compute_layout,
};
use crate::models::ReportRecord;

use super::fonts::{StandardFont, encode_win_ansi};

pub const NO_LOGO_HEADER: &str = "Reporte SARLAFT - FinNova Bank (¡SIN LOGO!)";
pub const SUBTITLE_TEXT: &str = "Generado por FinNova Bank - Automatización Regulatoria";

const LOGO_RESOURCE: &str = "Logo";
const BULLET_INDENT: f32 = 92.0;

type Rgb = (f32, f32, f32);

const BLACK: Rgb = (0.0, 0.0, 0.0);
const DARK_BLUE: Rgb = (0.0, 0.0, 0.545);
const GRAY: Rgb = (0.502, 0.502, 0.502);
const LIGHT_GREY: Rgb = (0.827, 0.827, 0.827);

/// Operations of a single page content stream.
#[derive(Default)]
struct PageContent {
    operations: Vec<Operation>,
}

impl PageContent {
    fn fill_color(&mut self, (r, g, b): Rgb) {
        self.operations.push(Operation::new(
            "rg",
            vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        ));
    }

    fn stroke_color(&mut self, (r, g, b): Rgb) {
        self.operations.push(Operation::new(
            "RG",
            vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        ));
    }

    fn text(&mut self, font: StandardFont, size: f32, x: f32, y: f32, text: &str) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().into()), Object::Real(size)],
        ));
        self.operations
            .push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.operations
            .push(Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]));
        self.operations
            .push(Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]));
        self.operations.push(Operation::new("S", vec![]));
    }

    fn image(&mut self, name: &str, placement: &BoundingBox) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new(
            "cm",
            vec![
                Object::Real(placement.width()),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(placement.height()),
                Object::Real(placement.left),
                Object::Real(placement.bottom),
            ],
        ));
        self.operations
            .push(Operation::new("Do", vec![Object::Name(name.into())]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    fn section(&mut self, heading_y: f32, heading: &str, lines: &[String]) {
        self.text(StandardFont::HelveticaBold, 14.0, PAGE_MARGIN, heading_y, heading);
        for (i, line) in lines.iter().enumerate() {
            let y = heading_y - 20.0 - LINE_SPACING * i as f32;
            self.text(StandardFont::Helvetica, 10.0, BULLET_INDENT, y, &format!("• {line}"));
        }
    }

    fn encode(self) -> Result<Vec<u8>, AppError> {
        Ok(Content {
            operations: self.operations,
        }
        .encode()?)
    }
}

/// Renders the report as a single US Letter page.
///
/// The logo is drawn top-right when present; otherwise a plain header line
/// takes its place. Everything below the header follows [`compute_layout`].
#[tracing::instrument(
    name = "render_pdf",
    skip_all,
    fields(report.id = %record.report_id, report.has_logo = logo.is_some())
)]
pub fn render_pdf(record: &ReportRecord, logo: Option<&LogoAsset>) -> Result<Vec<u8>, AppError> {
    let page = PageSize::LETTER;
    let layout = compute_layout(page, logo.map(|l| (l.width, l.height)));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in StandardFont::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let mut resources = dictionary! {
        "Font" => fonts,
    };

    let mut content = PageContent::default();

    match (logo, layout.logo) {
        (Some(asset), Some(placement)) => {
            let image_id = doc.add_object(
                Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => asset.width as i64,
                        "Height" => asset.height as i64,
                        "ColorSpace" => asset.color_space.pdf_name(),
                        "BitsPerComponent" => 8,
                        "Filter" => "DCTDecode",
                    },
                    asset.bytes.clone(),
                )
                .with_compression(false),
            );
            resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
            content.image(LOGO_RESOURCE, &placement);
        }
        _ => {
            content.fill_color(BLACK);
            content.text(
                StandardFont::HelveticaBold,
                18.0,
                PAGE_MARGIN,
                page.height - PAGE_MARGIN,
                NO_LOGO_HEADER,
            );
        }
    }

    draw_body(&mut content, record, &layout);

    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(page.width), Object::Real(page.height)],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(format!("Reporte SARLAFT {}", record.report_id)),
        "Producer" => Object::string_literal("sarlaft-report-service"),
        "CreationDate" => Object::string_literal(
            record.date_generated.format("D:%Y%m%d%H%M%S").to_string(),
        ),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Render(format!("failed to serialize PDF: {e}")))?;

    tracing::debug!(bytes = buffer.len(), title_baseline = layout.title_baseline, "PDF rendered");

    Ok(buffer)
}

fn draw_body(content: &mut PageContent, record: &ReportRecord, layout: &PageLayout) {
    let width = layout.page.width;

    content.fill_color(DARK_BLUE);
    content.text(TITLE_FONT, TITLE_FONT_SIZE, PAGE_MARGIN, layout.title_baseline, TITLE_TEXT);

    content.fill_color(GRAY);
    content.text(
        StandardFont::Helvetica,
        10.0,
        PAGE_MARGIN,
        layout.subtitle_baseline,
        SUBTITLE_TEXT,
    );

    content.stroke_color(LIGHT_GREY);
    content.line(PAGE_MARGIN, layout.rule_y, width - PAGE_MARGIN, layout.rule_y);

    content.fill_color(BLACK);
    content.section(
        layout.section_top(0),
        "Información General del Reporte:",
        &[
            format!("ID de Reporte: {}", record.report_id),
            format!("Regulador: {}", record.regulator),
            format!("Fecha de Generación: {}", record.display_date()),
            format!("Estado de Cumplimiento: {}", record.compliance_status.as_str()),
        ],
    );

    let summary = &record.data_summary;
    content.section(
        layout.section_top(1),
        "Resumen de Datos Analizados:",
        &[
            format!("Transacciones Analizadas: {}", summary.transactions_analyzed),
            format!("Alertas Sospechosas (Baja): {}", summary.suspicious_alerts_low),
            format!("Alertas Sospechosas (Alta): {}", summary.suspicious_alerts_high),
            format!("Casos Reportables a UIAF: {}", summary.reportable_cases),
        ],
    );

    content.section(
        layout.section_top(2),
        "Notas y Observaciones Regulatorias:",
        &record.regulatory_notes,
    );

    content.fill_color(GRAY);
    content.text(
        StandardFont::HelveticaOblique,
        9.0,
        PAGE_MARGIN,
        FOOTER_BASELINE,
        &record.disclaimer,
    );
}
