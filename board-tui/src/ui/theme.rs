use ratatui::style::Color;

/// All colors used by the board client, grouped by purpose.
/// Swap between presets (Dark / Light) to adapt to the terminal background.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // ── Board ──────────────────────────────────────────────────────
    pub light_square: Color,
    pub dark_square: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub board_border: Color,
    pub board_label: Color,

    // ── Overlays (light-square variant, dark-square variant) ──────
    pub overlay_legal_move: (Color, Color),
    pub move_indicator: Color,

    // ── Status line ───────────────────────────────────────────────
    pub warning: Color,
    pub info: Color,
    pub muted: Color,
}

impl Theme {
    /// Designed for terminals with a dark background.
    pub fn dark() -> Self {
        Self {
            light_square: Color::Rgb(240, 217, 181),
            dark_square: Color::Rgb(181, 136, 99),
            // Explicit RGB: many terminals remap ANSI White/Black.
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_border: Color::Cyan,
            board_label: Color::Yellow,

            overlay_legal_move: (Color::LightBlue, Color::Blue),
            move_indicator: Color::Rgb(20, 60, 20),

            warning: Color::Yellow,
            info: Color::Cyan,
            muted: Color::DarkGray,
        }
    }

    /// Designed for terminals with a light background. Darker squares so
    /// white pieces keep their contrast.
    pub fn light() -> Self {
        Self {
            light_square: Color::Rgb(210, 180, 140),
            dark_square: Color::Rgb(150, 110, 70),
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(30, 30, 30),
            board_border: Color::Rgb(60, 60, 60),
            board_label: Color::Rgb(100, 80, 50),

            overlay_legal_move: (Color::Rgb(100, 160, 220), Color::Rgb(60, 120, 180)),
            move_indicator: Color::Rgb(20, 60, 20),

            warning: Color::Rgb(180, 140, 0),
            info: Color::Rgb(30, 120, 150),
            muted: Color::Rgb(150, 150, 150),
        }
    }

    /// Detect theme from the `BOARD_SYNC_THEME` environment variable.
    ///
    /// Set `BOARD_SYNC_THEME=light` for light terminals. Defaults to dark.
    pub fn detect() -> Self {
        Self::from_preference(std::env::var("BOARD_SYNC_THEME").ok().as_deref())
    }

    /// Returns dark for any unrecognized or `None` value.
    pub fn from_preference(pref: Option<&str>) -> Self {
        match pref {
            Some("light") => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Background of a square, with or without the legal-move overlay.
    pub fn square_bg(&self, is_light: bool, highlighted: bool) -> Color {
        match (highlighted, is_light) {
            (true, true) => self.overlay_legal_move.0,
            (true, false) => self.overlay_legal_move.1,
            (false, true) => self.light_square,
            (false, false) => self.dark_square,
        }
    }
}
