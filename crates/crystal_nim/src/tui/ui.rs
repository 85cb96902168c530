//! Drawing primitives shared by the screens.
//!
//! Everything is positioned in absolute terminal cells matching the core
//! [`Layout`](crystal_nim_core::Layout) and clipped to the frame, so a small
//! terminal truncates instead of panicking.

use crystal_nim_core::Region;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

/// Screen background.
pub const BACKGROUND: (u8, u8, u8) = (14, 16, 30);

/// Crystal colour of each row.
pub const ROW_COLORS: [(u8, u8, u8); 4] = [
    (90, 220, 255),
    (220, 110, 255),
    (110, 255, 150),
    (255, 200, 80),
];

/// Mixes `rgb` over the background with opacity `alpha`.
pub fn blend(rgb: (u8, u8, u8), alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (f32::from(bg) + (f32::from(fg) - f32::from(bg)) * a).round() as u8;
    Color::Rgb(
        mix(rgb.0, BACKGROUND.0),
        mix(rgb.1, BACKGROUND.1),
        mix(rgb.2, BACKGROUND.2),
    )
}

/// Converts a layout region into a terminal rectangle clipped to the frame.
pub fn clip(frame: &Frame, region: Region) -> Rect {
    Rect::new(region.x, region.y, region.width, region.height).intersection(frame.area())
}

/// Fills the whole frame with the background colour.
pub fn clear(frame: &mut Frame) {
    let area = frame.area();
    let bg = Block::default().style(Style::default().bg(blend(BACKGROUND, 1.0)));
    frame.render_widget(bg, area);
}

/// Single line of text starting at `(x, y)`.
pub fn text(frame: &mut Frame, x: u16, y: u16, content: &str, style: Style) {
    let width = content.chars().count() as u16;
    let area = clip(frame, Region::new(x, y, width, 1));
    if area.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(content.to_string()).style(style), area);
}

/// Text centred inside `region`.
pub fn centered(frame: &mut Frame, region: Region, content: &str, style: Style) {
    let area = clip(frame, region);
    if area.is_empty() {
        return;
    }
    frame.render_widget(
        Paragraph::new(content.to_string())
            .style(style)
            .alignment(Alignment::Center),
        area,
    );
}

/// Bordered button with a centred label.
pub fn button(frame: &mut Frame, region: Region, label: &str, color: Color, highlighted: bool) {
    let area = clip(frame, region);
    if area.is_empty() {
        return;
    }
    let mut style = Style::default().fg(color);
    if highlighted {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(Line::from(label.to_string()))
            .style(style)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// One crystal drawn as a small rounded box.
pub fn crystal(frame: &mut Frame, region: Region, color: Color, selected: bool) {
    let area = clip(frame, region);
    if area.is_empty() {
        return;
    }
    let border = if selected {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new("◆")
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Bordered window with its area cleared first.
pub fn window(frame: &mut Frame, region: Region, title: &str) {
    let area = clip(frame, region);
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(blend((40, 44, 70), 1.0)).fg(Color::White));
    frame.render_widget(block, area);
}
