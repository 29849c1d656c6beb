//! Character-grid surface for terminal output and snapshots.
//!
//! Each canvas unit is one character cell. Text is written one character per
//! cell; bars fill their cells with the style's fill character. Lines are drawn
//! top to bottom, and within a line primitives are drawn in order, so later
//! primitives overwrite earlier ones.
//!
//! The canvas is rasterized into ratatui [`Buffer`]s, split into bands small
//! enough for a buffer's `u16` area, and written out through crossterm.

use super::styles::{bar_fill, ColorConfig, GlyphStyles};
use crate::view_state::element::{Element, Primitive};
use crate::view_state::geometry::{BoundingBox, Translation};
use crate::view_state::surface::{ContentHandle, HandleAllocator, Surface};
use crate::view_state::types::LineIndex;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetForegroundColor};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use std::collections::HashMap;
use std::io::{self, Write};

#[derive(Debug, Default, Clone)]
struct Placed {
    origin: Translation,
    primitives: Vec<Primitive>,
}

/// Surface that rasterizes lines into a character grid.
#[derive(Debug, Clone)]
pub struct AsciiSurface {
    width: u16,
    handles: HandleAllocator,
    content: HashMap<ContentHandle, Placed>,
    canvas_height: u32,
}

impl AsciiSurface {
    /// Create a surface `width` cells wide.
    pub fn new(width: u32) -> Self {
        Self {
            width: u16::try_from(width).unwrap_or(u16::MAX),
            handles: HandleAllocator::default(),
            content: HashMap::new(),
            canvas_height: 0,
        }
    }

    /// Canvas height in rows.
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Rows per buffer, keeping each buffer's cell count within `u16`.
    fn band_rows(&self) -> u32 {
        match self.width {
            0 => u32::from(u16::MAX),
            width => u32::from(u16::MAX / width),
        }
    }

    /// Rasterize the canvas into buffers covering consecutive row bands.
    fn bands(&self, styles: &GlyphStyles) -> Vec<Buffer> {
        let mut placed: Vec<&Placed> = self.content.values().collect();
        placed.sort_by_key(|p| (p.origin.y, p.origin.x));

        let mut bands = Vec::new();
        let mut band_top = 0u32;
        while band_top < self.canvas_height {
            let rows = (self.canvas_height - band_top).min(self.band_rows());
            let height = u16::try_from(rows).unwrap_or(u16::MAX);
            let mut buffer = Buffer::empty(Rect::new(0, 0, self.width, height));
            let top = i64::from(band_top);

            for item in &placed {
                for primitive in &item.primitives {
                    let bounds = primitive.bounds().translated(item.origin.x, item.origin.y);
                    match primitive {
                        Primitive::Bar { style, .. } => {
                            let fill_style = styles.style_for(*style);
                            fill(&mut buffer, &bounds, top, bar_fill(*style), fill_style);
                        }
                        Primitive::Text { text, style, .. } => {
                            let y = i64::from(bounds.top) - top;
                            for (i, ch) in text.chars().enumerate() {
                                let x = i64::from(bounds.left) + i as i64;
                                put(&mut buffer, x, y, ch, styles.style_for(*style));
                            }
                        }
                    }
                }
            }
            bands.push(buffer);
            band_top += rows;
        }
        bands
    }

    /// Rows of plain text, trailing blanks trimmed.
    pub fn rows(&self) -> Vec<String> {
        let styles = GlyphStyles::with_color_config(ColorConfig::disabled());
        self.bands(&styles)
            .iter()
            .flat_map(|buffer| {
                let area = buffer.area;
                (area.top()..area.bottom()).map(move |y| {
                    let mut line = String::new();
                    for x in area.left()..area.right() {
                        line.push_str(buffer[(x, y)].symbol());
                    }
                    line.trim_end().to_string()
                })
            })
            .collect()
    }

    /// Write the whole canvas to `out`, one row per line, optionally colored.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised by `out`.
    pub fn write_canvas(&self, out: &mut impl Write, colors: ColorConfig) -> io::Result<()> {
        let styles = GlyphStyles::with_color_config(colors);
        for buffer in self.bands(&styles) {
            let area = buffer.area;
            for y in area.top()..area.bottom() {
                let cells: Vec<&Cell> = (area.left()..area.right())
                    .map(|x| &buffer[(x, y)])
                    .collect();
                let last = cells
                    .iter()
                    .rposition(|cell| cell.symbol() != " ")
                    .map_or(0, |i| i + 1);

                let mut run = String::new();
                let mut run_color = Color::Reset;
                for cell in &cells[..last] {
                    if cell.fg != run_color {
                        write_run(out, &run, run_color)?;
                        run.clear();
                        run_color = cell.fg;
                    }
                    run.push_str(cell.symbol());
                }
                write_run(out, &run, run_color)?;
                queue!(out, Print('\n'))?;
            }
        }
        out.flush()
    }
}

fn write_run(out: &mut impl Write, run: &str, color: Color) -> io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    match term_color(color) {
        Some(color) => queue!(out, SetForegroundColor(color), Print(run), ResetColor),
        None => queue!(out, Print(run)),
    }
}

/// Terminal color for a cell foreground; `None` leaves the terminal default.
fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Green => Some(TermColor::DarkGreen),
        Color::Cyan => Some(TermColor::DarkCyan),
        Color::DarkGray => Some(TermColor::DarkGrey),
        Color::Yellow => Some(TermColor::DarkYellow),
        Color::Red => Some(TermColor::DarkRed),
        _ => None,
    }
}

fn put(buffer: &mut Buffer, x: i64, y: i64, ch: char, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

fn fill(buffer: &mut Buffer, bounds: &BoundingBox, top: i64, ch: char, style: Style) {
    let area = buffer.area;
    let rows = (i64::from(bounds.top) - top).max(0)
        ..(i64::from(bounds.bottom) - top).min(i64::from(area.height));
    let columns = i64::from(bounds.left).max(0)..i64::from(bounds.right).min(i64::from(area.width));
    for y in rows {
        for x in columns.clone() {
            put(buffer, x, y, ch, style);
        }
    }
}

impl Surface for AsciiSurface {
    fn acquire(&mut self, _line: LineIndex) -> ContentHandle {
        let handle = self.handles.allocate();
        self.content.insert(handle, Placed::default());
        handle
    }

    fn clear(&mut self, handle: ContentHandle) {
        if let Some(placed) = self.content.get_mut(&handle) {
            placed.primitives.clear();
        }
    }

    fn draw(&mut self, handle: ContentHandle, origin: Translation, elements: &[Element]) {
        if let Some(placed) = self.content.get_mut(&handle) {
            placed.origin = origin;
            placed
                .primitives
                .extend(elements.iter().flat_map(|e| e.primitives().iter().cloned()));
        }
    }

    fn translate(&mut self, handle: ContentHandle, origin: Translation) {
        if let Some(placed) = self.content.get_mut(&handle) {
            placed.origin = origin;
        }
    }

    fn release(&mut self, handle: ContentHandle) {
        self.content.remove(&handle);
    }

    fn set_canvas_height(&mut self, height: u32) {
        self.canvas_height = height;
    }
}
