//! LineRenderer: writes a framebuffer to any `Write` sink, one text line per row.
//!
//! Output is append-only (no cursor movement or screen clearing), so it works
//! for a line-oriented prompt as well as for pipes and log files.

use std::io::Write;

use anyhow::Result;

use crossterm::{
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct LineRenderer<W: Write> {
    out: W,
    color: bool,
    buf: Vec<u8>,
}

impl<W: Write> LineRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    /// Write every row of `fb`, followed by a blank line.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_lines_into(fb, self.color, &mut self.buf)?;
        self.buf.push(b'\n');
        self.flush_buf()
    }

    /// Write one line of plain text.
    pub fn line(&mut self, text: &str) -> Result<()> {
        self.buf.clear();
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(b'\n');
        self.flush_buf()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode every row of `fb` into `out`, trailing blanks trimmed.
///
/// With `color` off only the characters are written.
pub fn encode_lines_into(fb: &FrameBuffer, color: bool, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..fb.height() {
        let row = fb.row(y);
        let visible = row
            .iter()
            .rposition(|cell| cell.ch != ' ' || cell.style.bg.is_some())
            .map_or(0, |last| last + 1);

        let mut current_style: Option<CellStyle> = None;
        for cell in &row[..visible] {
            if color && current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        if color && current_style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        out.queue(Print('\n'))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    match style.bg {
        Some(bg) => out.queue(SetBackgroundColor(rgb_to_color(bg)))?,
        None => out.queue(SetBackgroundColor(Color::Reset))?,
    };
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escapes() {
        let mut fb = FrameBuffer::new(6, 2);
        fb.put_str(0, 0, "ab", CellStyle::fg(Rgb::new(255, 0, 0)));
        fb.put_str(1, 1, "c", CellStyle::default());

        let mut out = Vec::new();
        encode_lines_into(&fb, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\n c\n");
    }

    #[test]
    fn colour_output_wraps_styles() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "x", CellStyle::fg(Rgb::new(1, 2, 3)).on(Rgb::new(4, 5, 6)));

        let mut out = Vec::new();
        encode_lines_into(&fb, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[38;2;1;2;3m"));
        assert!(text.contains("\x1b[48;2;4;5;6m"));
        assert!(text.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn renderer_writes_to_sink() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(0, 0, "ok", CellStyle::default());

        let mut renderer = LineRenderer::new(Vec::new(), false);
        renderer.draw(&fb).unwrap();
        renderer.line("done").unwrap();
        assert_eq!(renderer.into_inner(), b"ok\n\ndone\n".to_vec());
    }
}
