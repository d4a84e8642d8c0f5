//! Flow layout of report pages
//!
//! Blocks are placed top-down on A4 pages. A block that does not fit on the
//! rest of a page starts a new one; tables are split row by row and repeat
//! their header on every page they continue on. The result is a list of
//! positioned drawing operations in PDF coordinates (millimetres from the
//! bottom-left corner).

use super::tables::{Align, TableData};
use crate::charts::ChartImage;
use crate::display::truncate;

const PT_TO_MM: f64 = 0.3528;
// average glyph width of Helvetica relative to the font size
const GLYPH_WIDTH: f64 = 0.55;

/// Page size, margins and type sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub title_size: f64,
    pub heading_size: f64,
    pub text_size: f64,
    pub row_height: f64,
    pub cell_padding: f64,
}

impl Geometry {
    /// A4 portrait with 15 mm margins
    pub fn a4() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 15.0,
            title_size: 18.0,
            heading_size: 12.0,
            text_size: 8.0,
            row_height: 5.0,
            cell_padding: 1.5,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    fn top(&self) -> f64 {
        self.page_height - self.margin
    }

    fn usable_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }

    fn title_height(&self) -> f64 {
        self.title_size * PT_TO_MM * 2.0
    }

    fn heading_height(&self) -> f64 {
        self.heading_size * PT_TO_MM * 2.0
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Estimated width of a text in millimetres
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH * PT_TO_MM
}

/// Content of a report, in reading order
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),
    /// A chart drawn at the given width, height following its aspect ratio
    Image { image: ChartImage, width: f64 },
    Table(TableData),
    Spacer(f64),
    PageBreak,
}

/// A positioned drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op<'a> {
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
    },
    Image {
        image: &'a ChartImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
    },
}

/// Operations of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page<'a> {
    pub ops: Vec<Op<'a>>,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Place blocks onto pages
pub fn paginate<'a>(blocks: &'a [Block], geometry: &Geometry) -> Vec<Page<'a>> {
    let mut flow = Flow::new(*geometry);
    for block in blocks {
        flow.place(block);
    }
    flow.finish()
}

struct Flow<'a> {
    geometry: Geometry,
    pages: Vec<Page<'a>>,
    current: Page<'a>,
    /// Distance of the next block's top edge from the page bottom
    cursor: f64,
}

impl<'a> Flow<'a> {
    fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: geometry.top(),
        }
    }

    fn remaining(&self) -> f64 {
        self.cursor - self.geometry.margin
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.cursor = self.geometry.top();
    }

    /// Start a new page unless `height` still fits or the page is empty
    fn reserve(&mut self, height: f64) {
        if height > self.remaining() && !self.current.is_empty() {
            self.new_page();
        }
    }

    fn text(&mut self, text: String, x: f64, height: f64, size: f64, bold: bool) {
        // baseline sits a little above the bottom of the line box
        let y = self.cursor - height + height * 0.3;
        self.current.ops.push(Op::Text {
            text,
            x,
            y,
            size,
            bold,
        });
    }

    fn place(&mut self, block: &'a Block) {
        let g = self.geometry;
        match block {
            Block::Title(title) => {
                let height = g.title_height();
                self.reserve(height);
                self.text(title.clone(), g.margin, height, g.title_size, true);
                self.cursor -= height;
            }
            Block::Heading(heading) => {
                // keep the heading together with the first rows that follow it
                let height = g.heading_height();
                self.reserve(height + 2.0 * g.row_height);
                self.text(heading.clone(), g.margin, height, g.heading_size, true);
                self.cursor -= height;
            }
            Block::Paragraph(text) => {
                self.reserve(g.row_height);
                self.text(text.clone(), g.margin, g.row_height, g.text_size, false);
                self.cursor -= g.row_height;
            }
            Block::Image { image, width } => {
                let (width, height) = image_size(image, *width, &g);
                self.reserve(height);
                let x = g.margin + (g.content_width() - width) / 2.0;
                self.current.ops.push(Op::Image {
                    image,
                    x,
                    y: self.cursor - height,
                    width,
                    height,
                });
                self.cursor -= height;
            }
            Block::Table(table) => self.table(table),
            Block::Spacer(height) => {
                self.cursor = (self.cursor - height).max(g.margin);
            }
            Block::PageBreak => {
                if !self.current.is_empty() {
                    self.new_page();
                }
            }
        }
    }

    fn table(&mut self, table: &TableData) {
        let row_height = self.geometry.row_height;
        self.reserve(2.0 * row_height);
        self.table_header(table);

        for row in &table.rows {
            if row_height > self.remaining() {
                self.new_page();
                self.table_header(table);
            }
            self.table_row(table, row, false);
        }
    }

    fn table_header(&mut self, table: &TableData) {
        let headers: Vec<String> = table.columns.iter().map(|c| c.header.clone()).collect();
        self.table_row(table, &headers, true);

        let x1 = self.geometry.margin;
        let x2 = x1 + table.width();
        self.current.ops.push(Op::Rule {
            x1,
            x2,
            y: self.cursor + 0.5,
        });
    }

    fn table_row(&mut self, table: &TableData, cells: &[String], bold: bool) {
        let g = self.geometry;
        let mut x = g.margin;
        for (column, cell) in table.columns.iter().zip(cells) {
            let inner = (column.width - 2.0 * g.cell_padding).max(0.0);
            let max_chars = (inner / (g.text_size * GLYPH_WIDTH * PT_TO_MM)).floor() as usize;
            let text = truncate(cell, max_chars.max(1));
            let text_x = match column.align {
                Align::Left => x + g.cell_padding,
                Align::Right => x + column.width - g.cell_padding - text_width(&text, g.text_size),
            };
            if !text.is_empty() {
                self.text(text, text_x, g.row_height, g.text_size, bold);
            }
            x += column.width;
        }
        self.cursor -= g.row_height;
    }

    fn finish(mut self) -> Vec<Page<'a>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Size an image to the requested width, shrinking it to fit one page
fn image_size(image: &ChartImage, width: f64, g: &Geometry) -> (f64, f64) {
    let width = width.min(g.content_width());
    let aspect = if image.width == 0 {
        0.75
    } else {
        image.height as f64 / image.width as f64
    };
    let height = width * aspect;
    if height > g.usable_height() {
        (g.usable_height() / aspect, g.usable_height())
    } else {
        (width, height)
    }
}
