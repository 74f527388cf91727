//! Colours shared by every screen.

use crate::fb::{CellStyle, Rgb};

pub const BG: Rgb = Rgb::new(12, 22, 16);
pub const PANEL: Rgb = Rgb::new(22, 38, 28);

pub const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 230, 220), BG);
pub const MUTED: CellStyle = CellStyle::new(Rgb::new(130, 150, 135), BG);
pub const TITLE: CellStyle = CellStyle::new(Rgb::new(120, 220, 140), BG).bold();
pub const ACCENT: CellStyle = CellStyle::new(Rgb::new(250, 210, 90), BG).bold();
pub const GOOD: CellStyle = CellStyle::new(Rgb::new(110, 220, 120), BG).bold();
pub const BAD: CellStyle = CellStyle::new(Rgb::new(235, 100, 90), BG).bold();
pub const BORDER: CellStyle = CellStyle::new(Rgb::new(70, 110, 80), BG);
pub const SELECTED: CellStyle = CellStyle::new(Rgb::new(12, 22, 16), Rgb::new(120, 220, 140)).bold();
pub const FIELD: CellStyle = CellStyle::new(Rgb::new(220, 230, 220), PANEL);
pub const ME: CellStyle = CellStyle::new(Rgb::new(250, 210, 90), PANEL).bold();
