/// Box-drawing characters for one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

/// Light single-line box: `┌─┐ │ └─┘`.
pub const LIGHT: BorderGlyphs = BorderGlyphs {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    horizontal: "─",
    vertical: "│",
};

/// Double-line box used for title bars: `╔═╗ ║ ╚═╝`.
pub const DOUBLE: BorderGlyphs = BorderGlyphs {
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    horizontal: "═",
    vertical: "║",
};
