use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::celebration::CelebrationAnimation;

const PALETTE: [Color; crate::celebration::CONFETTI_COLORS] = [
    Color::Rgb(236, 38, 95),
    Color::Rgb(38, 236, 180),
    Color::Rgb(255, 215, 0),
    Color::Rgb(255, 105, 180),
];

/// Draw the confetti on top of whatever is already in `buf`
pub fn render_confetti(celebration: &CelebrationAnimation, area: Rect, buf: &mut Buffer) {
    for piece in &celebration.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let (x, y) = (piece.x as u16, piece.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = PALETTE[piece.color_index % PALETTE.len()];
        let style = if piece.is_text {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&piece.symbol.to_string());
            cell.set_style(style);
        }
    }
}
