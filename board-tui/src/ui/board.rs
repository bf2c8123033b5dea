//! Terminal rendition of the board.
//!
//! [`TerminalBoard`] is the render adapter the interaction controller drives;
//! it only records what should be visible. [`BoardWidget`] turns that record
//! into cells every frame.

use crate::config::{SQUARE_COLS, SQUARE_ROWS};
use crate::render::{Notice, RenderAdapter};
use crate::ui::theme::Theme;
use board::{Piece, PieceColor, PixelPoint, Position, Square};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use std::collections::HashSet;

/// Columns reserved left of the board for rank labels.
const LABEL_WIDTH: u16 = 2;

/// Smallest area the widget needs: board, labels, status line and borders.
pub const MIN_WIDTH: u16 = SQUARE_COLS * 8 + LABEL_WIDTH + 2;
pub const MIN_HEIGHT: u16 = SQUARE_ROWS * 8 + 2 + 2;

const INDICATOR: &str = "•";

/// Terminal cell of square (0, 0) when the widget is drawn in `area`.
pub fn board_origin(area: Rect) -> (u16, u16) {
    (area.x + 1 + LABEL_WIDTH, area.y + 1)
}

/// Convert a mouse position in terminal cells into board-relative pixels.
/// Positions left of or above the board come out negative.
pub fn pointer_to_board(area: Rect, column: u16, row: u16) -> PixelPoint {
    let (x0, y0) = board_origin(area);
    PixelPoint::new(
        (i32::from(column) - i32::from(x0)) as f32,
        (i32::from(row) - i32::from(y0)) as f32,
    )
}

/// What the board should currently show.
#[derive(Debug, Default)]
pub struct TerminalBoard {
    position: Position,
    indicators: HashSet<Square>,
    /// Piece drawn away from its square, with the cell-space origin it is
    /// drawn at.
    floating: Option<(Square, PixelPoint)>,
    status: Option<Notice>,
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn indicators(&self) -> &HashSet<Square> {
        &self.indicators
    }

    pub fn floating(&self) -> Option<(Square, PixelPoint)> {
        self.floating
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }
}

impl RenderAdapter for TerminalBoard {
    fn redraw(&mut self, position: &Position) {
        self.position = position.clone();
        self.indicators.clear();
        self.floating = None;
        self.status = None;
    }

    fn show_move_indicators(&mut self, squares: &[Square]) {
        self.indicators.extend(squares.iter().copied());
    }

    fn hide_move_indicators(&mut self) {
        self.indicators.clear();
    }

    fn move_piece(&mut self, piece: Square, to: PixelPoint) {
        if self.position.piece_at(piece).is_none() {
            tracing::debug!(square = %piece, "No piece to move on the drawn board");
            return;
        }
        self.floating = Some((piece, to));
    }

    fn notify(&mut self, notice: Notice) {
        self.status = Some(notice);
    }
}

pub struct BoardWidget<'a> {
    pub board: &'a TerminalBoard,
    pub theme: &'a Theme,
    pub side_to_move: Option<PieceColor>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(board: &'a TerminalBoard, theme: &'a Theme) -> Self {
        Self {
            board,
            theme,
            side_to_move: None,
        }
    }

    pub fn side_to_move(mut self, side: Option<PieceColor>) -> Self {
        self.side_to_move = side;
        self
    }

    fn piece_style(&self, piece: Piece) -> Style {
        let fg = match piece.color {
            PieceColor::White => self.theme.white_piece,
            PieceColor::Black => self.theme.black_piece,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.side_to_move {
            Some(PieceColor::White) => " ♟ Board · White to move ",
            Some(PieceColor::Black) => " ♟ Board · Black to move ",
            None => " ♟ Board ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.board_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let (x0, y0) = board_origin(area);
        let label_style = Style::default().fg(self.theme.board_label);

        for square in Square::all() {
            let (col, row) = square.grid();
            let x = x0 + col as u16 * SQUARE_COLS;
            let y = y0 + row as u16 * SQUARE_ROWS;
            let highlighted = self.board.indicators.contains(&square);
            let bg = self.theme.square_bg(square.is_light(), highlighted);
            render_square(buf, x, y, Style::default().bg(bg), inner);

            let (cx, cy) = (x + SQUARE_COLS / 2, y + SQUARE_ROWS / 2);
            let lifted = self.board.floating.map(|(sq, _)| sq) == Some(square);
            match self.board.position.piece_at(square) {
                Some(piece) if !lifted => {
                    let glyph = piece.kind.to_char_upper().to_string();
                    set_cell(buf, cx, cy, &glyph, self.piece_style(piece), inner);
                }
                _ if highlighted => {
                    let style = Style::default().fg(self.theme.move_indicator);
                    set_cell(buf, cx, cy, INDICATOR, style, inner);
                }
                _ => {}
            }

            if col == 0 {
                let label = square.rank_char().to_string();
                set_cell(buf, inner.x, cy, &label, label_style, inner);
            }
            if row == 7 {
                let label = square.file_char().to_string();
                set_cell(buf, cx, y0 + 8 * SQUARE_ROWS, &label, label_style, inner);
            }
        }

        // Drawn last so it sits above every square it is dragged across.
        if let Some((square, origin)) = self.board.floating {
            if let Some(piece) = self.board.position.piece_at(square) {
                let px = f32::from(x0) + origin.x + f32::from(SQUARE_COLS / 2);
                let py = f32::from(y0) + origin.y + f32::from(SQUARE_ROWS / 2);
                if px >= 0.0 && py >= 0.0 {
                    let glyph = piece.kind.to_char_upper().to_string();
                    set_cell(
                        buf,
                        px.floor() as u16,
                        py.floor() as u16,
                        &glyph,
                        self.piece_style(piece),
                        inner,
                    );
                }
            }
        }

        let status_y = y0 + 8 * SQUARE_ROWS + 1;
        if status_y < inner.bottom() {
            let (text, style) = match &self.board.status {
                Some(Notice::Warning(text)) => {
                    (text.as_str(), Style::default().fg(self.theme.warning))
                }
                Some(Notice::Info(text)) => (text.as_str(), Style::default().fg(self.theme.info)),
                None => (
                    "drag pieces with the mouse · r resync · q quit",
                    Style::default().fg(self.theme.muted),
                ),
            };
            buf.set_stringn(inner.x, status_y, text, inner.width as usize, style);
        }
    }
}

fn render_square(buf: &mut Buffer, x: u16, y: u16, style: Style, bounds: Rect) {
    for dy in 0..SQUARE_ROWS {
        for dx in 0..SQUARE_COLS {
            let px = x + dx;
            let py = y + dy;
            if px < bounds.right() && py < bounds.bottom() {
                buf[(px, py)].set_style(style);
            }
        }
    }
}

/// Write one glyph, keeping the cell's background.
fn set_cell(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style, bounds: Rect) {
    if x >= bounds.left() && x < bounds.right() && y >= bounds.top() && y < bounds.bottom() {
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}
