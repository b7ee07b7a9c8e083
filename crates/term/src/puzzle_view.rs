//! PuzzleView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::packing::PackingPuzzle;
use crate::core::pieces::{occupied_cells, Piece};
use crate::core::sliding::SlidingPuzzle;
use crate::core::types::Coordinate;
use crate::core::{format_time, next_tier, rank, GameState, PackingCell};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Framebuffer width; the packing tray needs the most room.
const VIEW_WIDTH: u16 = 60;
/// Rows above the board: title, stats, blank, column labels.
const HEADER_ROWS: u16 = 4;
/// Left margin holding the row labels.
const LABEL_COLS: u16 = 3;

const BORDER: Rgb = Rgb::new(200, 200, 200);
const MUTED: Rgb = Rgb::new(110, 110, 120);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const HIGHLIGHT: Rgb = Rgb::new(240, 200, 80);
const BLOCKER: Rgb = Rgb::new(70, 70, 80);
const SOLVED: Rgb = Rgb::new(100, 220, 120);

/// Session details shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub title: &'a str,
    pub puzzle_number: Option<u32>,
}

/// Lays a puzzle out as a labelled grid plus a status block.
pub struct PuzzleView {
    /// Terminal columns per sliding tile.
    tile_w: u16,
    /// Terminal columns per packing cell.
    cell_w: u16,
}

impl Default for PuzzleView {
    fn default() -> Self {
        Self { tile_w: 4, cell_w: 3 }
    }
}

impl PuzzleView {
    pub fn new(tile_w: u16, cell_w: u16) -> Self {
        Self {
            tile_w: tile_w.max(3),
            cell_w: cell_w.max(3),
        }
    }

    /// Render into an existing framebuffer, resizing it to fit.
    pub fn render_into(&self, game: &GameState, header: Header<'_>, fb: &mut FrameBuffer) {
        match game {
            GameState::Sliding(puzzle) => self.render_sliding(puzzle, header, fb),
            GameState::Packing(puzzle) => self.render_packing(puzzle, header, fb),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, game: &GameState, header: Header<'_>) -> FrameBuffer {
        let mut fb = FrameBuffer::new(VIEW_WIDTH, 1);
        self.render_into(game, header, &mut fb);
        fb
    }

    fn render_sliding(&self, puzzle: &SlidingPuzzle, header: Header<'_>, fb: &mut FrameBuffer) {
        let size = puzzle.size() as u16;
        let status_y = HEADER_ROWS + size + 3;
        fb.reset(VIEW_WIDTH, status_y + 3);

        self.draw_header(fb, header, puzzle.moves(), puzzle.elapsed_ms());
        self.draw_frame(fb, size, self.tile_w);

        let movable = puzzle.movable_tiles();
        for (idx, tile) in puzzle.grid().iter().enumerate() {
            let at = Coordinate::from_index(idx, puzzle.size());
            let (x, y) = self.cell_origin(at, self.tile_w);
            match tile {
                Some(label) => {
                    let style = if movable.contains(&idx) {
                        CellStyle::fg(HIGHLIGHT).bold()
                    } else {
                        CellStyle::fg(TEXT)
                    };
                    let text = format!("{:>width$}", label, width = (self.tile_w - 1) as usize);
                    fb.put_str(x, y, &text, style);
                }
                None => {
                    let text = format!("{:>width$}", '·', width = (self.tile_w - 1) as usize);
                    fb.put_str(x, y, &text, CellStyle::fg(MUTED).dim());
                }
            }
        }

        let mut y = status_y;
        if puzzle.is_complete() {
            let tier = puzzle.ranking();
            let done = format!("Solved in {} moves ({})", puzzle.moves(), format_time(puzzle.elapsed_ms()));
            fb.put_str(0, y, &done, CellStyle::fg(SOLVED).bold());
            y += 1;
            fb.put_str(0, y, &format!("{} - {}", tier.title, tier.description), CellStyle::fg(TEXT));
            y += 1;
            if let Some(better) = next_tier(tier) {
                let hint = format!("Next rank: {} (≤{} moves)", better.title, better.max_moves);
                fb.put_str(0, y, &hint, CellStyle::fg(MUTED));
            }
        } else {
            let pace = rank(puzzle.moves());
            let text = format!("Pace: {}", pace.title);
            fb.put_str(0, y, &text, CellStyle::fg(MUTED));
        }
    }

    fn render_packing(&self, puzzle: &PackingPuzzle, header: Header<'_>, fb: &mut FrameBuffer) {
        let size = puzzle.board().size() as u16;
        let board_bottom = HEADER_ROWS + size + 2;
        let tray_bottom = HEADER_ROWS + puzzle.pieces().len() as u16 + 7;
        let status_y = board_bottom.max(tray_bottom) + 1;
        fb.reset(VIEW_WIDTH, status_y + 2);

        self.draw_header(fb, header, puzzle.moves(), puzzle.elapsed_ms());
        self.draw_frame(fb, size, self.cell_w);

        for (idx, cell) in puzzle.board().cells().iter().enumerate() {
            let at = Coordinate::from_index(idx, puzzle.board().size());
            let (x, y) = self.cell_origin(at, self.cell_w);
            match cell {
                PackingCell::Empty => {
                    fb.put_str(x, y, &centered('·', self.cell_w), CellStyle::fg(MUTED).dim());
                }
                PackingCell::Blocker => {
                    fb.fill_rect(x, y, self.cell_w, 1, '▓', CellStyle::fg(BLOCKER));
                }
                PackingCell::Piece(id) => {
                    let Some(slot) = puzzle.pieces().iter().position(|p| p.id == *id) else {
                        continue;
                    };
                    let colour = piece_colour(&puzzle.pieces()[slot]);
                    let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold().on(colour);
                    fb.put_str(x, y, &centered(tray_glyph(slot), self.cell_w), style);
                }
            }
        }

        let panel_x = LABEL_COLS + size * self.cell_w + 4;
        self.draw_tray(fb, puzzle, panel_x);

        let y = status_y;
        if puzzle.is_complete() {
            let done = format!("Board filled in {} moves ({})", puzzle.moves(), format_time(puzzle.elapsed_ms()));
            fb.put_str(0, y, &done, CellStyle::fg(SOLVED).bold());
        } else {
            let left = format!(
                "Open cells {}  tray cells {}",
                puzzle.board().empty_count(),
                puzzle.tray_cells_left()
            );
            fb.put_str(0, y, &left, CellStyle::fg(MUTED));
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, header: Header<'_>, moves: u32, elapsed_ms: u64) {
        let end = fb.put_str(0, 0, header.title, CellStyle::fg(TEXT).bold());
        if let Some(number) = header.puzzle_number {
            fb.put_str(end + 1, 0, &format!("#{number}"), CellStyle::fg(MUTED));
        }
        let stats = format!("Moves {moves}  Time {}", format_time(elapsed_ms));
        fb.put_str(0, 1, &stats, CellStyle::fg(TEXT));
    }

    /// Column labels, row labels and the border around a `size`-square grid.
    fn draw_frame(&self, fb: &mut FrameBuffer, size: u16, cell_w: u16) {
        let label = CellStyle::fg(MUTED);
        for n in 0..size {
            let x = LABEL_COLS + 1 + n * cell_w;
            fb.put_str(x, HEADER_ROWS - 1, &centered(n + 1, cell_w), label);
            fb.put_str(0, HEADER_ROWS + 1 + n, &format!("{:>2}", n + 1), label);
        }
        draw_border(fb, LABEL_COLS, HEADER_ROWS, size * cell_w + 2, size + 2, CellStyle::fg(BORDER));
    }

    fn cell_origin(&self, at: Coordinate, cell_w: u16) -> (u16, u16) {
        let x = LABEL_COLS + 1 + at.col as u16 * cell_w;
        let y = HEADER_ROWS + 1 + at.row as u16;
        (x, y)
    }

    fn draw_tray(&self, fb: &mut FrameBuffer, puzzle: &PackingPuzzle, panel_x: u16) {
        let mut y = HEADER_ROWS;
        fb.put_str(panel_x, y, "TRAY", CellStyle::fg(TEXT).bold());
        y += 1;

        for (slot, piece) in puzzle.pieces().iter().enumerate() {
            let selected = puzzle.selected() == Some(piece.id);
            let swatch = CellStyle::fg(Rgb::new(255, 255, 255)).on(piece_colour(piece));
            let x = fb.put_str(panel_x, y, &format!(" {} ", tray_glyph(slot)), swatch);
            let (status, style) = if piece.placed {
                ("placed", CellStyle::fg(MUTED).dim())
            } else if selected {
                ("selected", CellStyle::fg(HIGHLIGHT).bold())
            } else {
                ("", CellStyle::fg(TEXT))
            };
            let text = format!(" {:<4}{} {}", piece.name, rotation_marker(piece.rotation), status);
            fb.put_str(x, y, text.trim_end(), style);
            y += 1;
        }

        let Some(piece) = puzzle.selected().and_then(|id| puzzle.piece(id)) else {
            return;
        };
        y += 1;
        fb.put_str(panel_x, y, "SELECTED", CellStyle::fg(TEXT).bold());
        y += 1;
        let style = CellStyle::fg(piece_colour(piece));
        for (r, c) in occupied_cells(&piece.shape) {
            fb.fill_rect(panel_x + c as u16 * 2, y + r as u16, 2, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn centered(value: impl std::fmt::Display, width: u16) -> String {
    format!("{:^width$}", value.to_string(), width = width as usize)
}

/// Single-character tray label: 1-9, then a-z.
fn tray_glyph(slot: usize) -> char {
    match slot {
        0..=8 => char::from(b'1' + slot as u8),
        9..=34 => char::from(b'a' + (slot - 9) as u8),
        _ => '*',
    }
}

fn rotation_marker(rotation: u8) -> &'static str {
    match rotation % 4 {
        0 => "   ",
        1 => "90°",
        2 => "180",
        _ => "270",
    }
}

fn piece_colour(piece: &Piece) -> Rgb {
    Rgb::from_hex(&piece.color).unwrap_or(MUTED)
}
