//! PDF assembly
//!
//! Builds the block sequence of a report, lays it out and writes the pages
//! with printpdf. The file is written to a temporary path next to the target
//! and renamed into place, so an interrupted run never leaves a partial PDF.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::image_crate::codecs::jpeg::JpegEncoder;
use printpdf::image_crate::ColorType;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageFilter, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};
use tracing::{debug, info};

use super::layout::{paginate, Block, Geometry, Op, Page};
use super::tables::TableData;
use super::{ReportData, ReportLayout};
use crate::charts::{Chart, ChartImage, ChartRenderer};
use crate::config::report_file;
use crate::error::{ReportError, ReportResult};

/// Width of the two charts on the first page
const OVERVIEW_CHART_WIDTH: f64 = 120.0;
/// Width of the category charts on the second page
const CATEGORY_CHART_WIDTH: f64 = 160.0;
const SPACER: f64 = 4.0;
const JPEG_QUALITY: u8 = 90;
const LAYER: &str = "Content";

/// Lays out report data into a PDF file
#[derive(Debug, Clone, Default)]
pub struct PdfAssembler {
    geometry: Geometry,
}

impl PdfAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the report of `data` into `output_dir`
    ///
    /// Returns the path of the written file. An existing report for the same
    /// month is replaced.
    pub fn assemble(
        &self,
        data: &ReportData,
        renderer: &dyn ChartRenderer,
        output_dir: &Path,
    ) -> ReportResult<PathBuf> {
        fs::create_dir_all(output_dir).map_err(|e| {
            ReportError::Io(format!(
                "Failed to create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;

        let blocks = self.blocks(data, renderer);
        let pages = paginate(&blocks, &self.geometry);
        debug!(blocks = blocks.len(), pages = pages.len(), "Laid out report");

        let path = report_file(output_dir, data.month);
        let doc = self.document(&title(data), &pages)?;
        write_pdf_atomic(doc, &path)?;

        info!(path = %path.display(), pages = pages.len(), "Wrote report");
        Ok(path)
    }

    /// The report content in reading order
    pub fn blocks(&self, data: &ReportData, renderer: &dyn ChartRenderer) -> Vec<Block> {
        let symbol = data.options.currency_symbol.as_str();
        let render = |chart: Chart<'_>, width: f64| Block::Image {
            image: renderer.render(&chart),
            width,
        };

        let mut blocks = vec![
            Block::Title(title(data)),
            render(
                Chart::Balance {
                    month: data.month,
                    reference_months: &data.reference_months,
                    rows: &data.balance,
                },
                OVERVIEW_CHART_WIDTH,
            ),
            Block::Spacer(SPACER),
            render(
                Chart::IncomeExpense {
                    rows: &data.income_expense,
                },
                OVERVIEW_CHART_WIDTH,
            ),
            Block::Spacer(SPACER),
        ];
        push_table(
            &mut blocks,
            "Top expenses",
            TableData::top_spending(&data.top_spending, symbol),
        );

        blocks.push(Block::PageBreak);
        blocks.push(render(
            Chart::Category {
                rows: &data.categories,
                axis_max: data.options.category_axis_max,
            },
            CATEGORY_CHART_WIDTH,
        ));
        blocks.push(Block::Spacer(SPACER));
        blocks.push(render(
            Chart::SubCategory {
                rows: &data.sub_categories,
                axis_max: data.options.sub_category_axis_max,
            },
            CATEGORY_CHART_WIDTH,
        ));

        if data.options.layout == ReportLayout::Detailed {
            blocks.push(Block::PageBreak);
            push_table(
                &mut blocks,
                "Top expenses per category",
                TableData::top_per_category(&data.top_per_category, symbol),
            );
            blocks.push(Block::Spacer(SPACER));
            push_table(
                &mut blocks,
                "Categories",
                TableData::categories(&data.categories, symbol),
            );
            blocks.push(Block::Spacer(SPACER));
            push_table(
                &mut blocks,
                "Sub-categories",
                TableData::sub_categories(&data.sub_categories, symbol),
            );
        }

        blocks
    }

    fn document(&self, title: &str, pages: &[Page<'_>]) -> ReportResult<PdfDocumentReference> {
        let width = Mm(self.geometry.page_width as f32);
        let height = Mm(self.geometry.page_height as f32);
        let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("Failed to add font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("Failed to add font: {}", e)))?;
        let fonts = Fonts { regular, bold };

        for (i, page) in pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) = doc.add_page(width, height, LAYER);
                doc.get_page(page_index).get_layer(layer_index)
            };
            draw_page(&layer, page, &fonts)?;
        }

        Ok(doc)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn title(data: &ReportData) -> String {
    format!("Spending Report {}", data.month)
}

fn push_table(blocks: &mut Vec<Block>, heading: &str, table: TableData) {
    blocks.push(Block::Heading(heading.to_string()));
    if table.is_empty() {
        blocks.push(Block::Paragraph("No expenses in this month.".to_string()));
    } else {
        blocks.push(Block::Table(table));
    }
}

fn draw_page(layer: &PdfLayerReference, page: &Page<'_>, fonts: &Fonts) -> ReportResult<()> {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(0.5);

    for op in &page.ops {
        match op {
            Op::Text {
                text,
                x,
                y,
                size,
                bold,
            } => {
                let font = if *bold { &fonts.bold } else { &fonts.regular };
                layer.use_text(text.as_str(), *size as f32, Mm(*x as f32), Mm(*y as f32), font);
            }
            Op::Image {
                image,
                x,
                y,
                width,
                ..
            } => {
                let dpi = image.width as f64 * 25.4 / width;
                jpeg_image(image)?.add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(*x as f32)),
                        translate_y: Some(Mm(*y as f32)),
                        dpi: Some(dpi as f32),
                        ..Default::default()
                    },
                );
            }
            Op::Rule { x1, x2, y } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1 as f32), Mm(*y as f32)), false),
                        (Point::new(Mm(*x2 as f32), Mm(*y as f32)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }

    Ok(())
}

/// Embed a chart as a JPEG stream
///
/// Raw RGB buffers are only compressed in release builds, JPEG keeps the file
/// small in every build.
fn jpeg_image(image: &ChartImage) -> ReportResult<Image> {
    if image.pixels.len() != image.width as usize * image.height as usize * 3 {
        return Err(ReportError::Pdf(format!(
            "Chart buffer does not match its size {}x{}",
            image.width, image.height
        )));
    }

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY)
        .encode(&image.pixels, image.width, image.height, ColorType::Rgb8)
        .map_err(|e| ReportError::Pdf(format!("Failed to encode chart: {}", e)))?;

    Ok(Image::from(ImageXObject {
        width: Px(image.width as usize),
        height: Px(image.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: data,
        image_filter: Some(ImageFilter::DCT),
        smask: None,
        clipping_bbox: None,
    }))
}

/// Write the document to a temporary file, then rename it over `path`
fn write_pdf_atomic(doc: PdfDocumentReference, path: &Path) -> ReportResult<()> {
    let temp_path = path.with_extension("pdf.tmp");

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| ReportError::Io(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| ReportError::Pdf(format!("Failed to write PDF: {}", e)))?;
        writer
            .flush()
            .map_err(|e| ReportError::Io(format!("Failed to flush PDF: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ReportError::Io(format!("Failed to sync PDF: {}", e)))?;
        fs::rename(&temp_path, path)
            .map_err(|e| ReportError::Io(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
