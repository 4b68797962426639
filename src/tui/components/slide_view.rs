//! Slide area renderer
//!
//! Draws every layer of a `PresenterFrame`. Each slide is rendered into an
//! offscreen buffer the size of its scaled box, then copied onto the frame
//! shifted by `offset_x` slide-widths and faded toward the background by
//! its opacity. Blank cells are not copied, so an exiting slide shows
//! through the gaps of the one entering above it.

use crate::deck::transition::{PhaseStyle, PresenterFrame};
use crate::deck::{Deck, Slide};
use crate::tui::markdown::render_markdown;
use crate::tui::theme::{fade, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Padding, Paragraph, Widget},
    Frame,
};

/// Layers fainter than this are skipped entirely
const MIN_VISIBLE_OPACITY: f64 = 0.02;
/// Below this, text also gets the terminal's DIM attribute
const DIM_BELOW_OPACITY: f64 = 0.5;

pub fn render(f: &mut Frame, area: Rect, deck: &Deck, frame: &PresenterFrame, theme: &Theme) {
    for layer in &frame.layers {
        let Some(slide) = deck.get(layer.slide) else {
            continue;
        };
        let footer = if slide.is_contact() { deck.footer() } else { None };
        draw_layer(f.buffer_mut(), area, slide, footer, layer.style, theme);
    }
}

/// Box for a slide at `scale`, centered in `area`
pub fn scaled_rect(area: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let inset_x = ((1.0 - scale) * area.width as f64 / 2.0).round() as u16;
    let inset_y = ((1.0 - scale) * area.height as f64 / 2.0).round() as u16;
    Rect::new(
        area.x + inset_x,
        area.y + inset_y,
        area.width.saturating_sub(inset_x * 2),
        area.height.saturating_sub(inset_y * 2),
    )
}

fn draw_layer(
    target: &mut Buffer,
    area: Rect,
    slide: &Slide,
    footer: Option<&str>,
    style: PhaseStyle,
    theme: &Theme,
) {
    if style.opacity < MIN_VISIBLE_OPACITY {
        return;
    }

    let inner = scaled_rect(area, style.scale);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut offscreen = Buffer::empty(Rect::new(0, 0, inner.width, inner.height));
    slide_paragraph(slide, footer, inner.width, theme).render(offscreen.area, &mut offscreen);

    let dx = (style.offset_x * area.width as f64).round() as i32;

    for y in 0..inner.height {
        for x in 0..inner.width {
            let Some(cell) = offscreen.cell((x, y)) else {
                continue;
            };
            if cell.symbol() == " " {
                continue;
            }

            let tx = inner.x as i32 + x as i32 + dx;
            if tx < area.x as i32 || tx >= area.right() as i32 {
                continue;
            }
            let ty = inner.y + y;

            if let Some(dst) = target.cell_mut((tx as u16, ty)) {
                *dst = cell.clone();
                dst.fg = fade(cell.fg, theme.background, style.opacity);
                dst.bg = theme.background;
                if style.opacity < DIM_BELOW_OPACITY {
                    dst.modifier.insert(Modifier::DIM);
                }
            }
        }
    }
}

fn slide_paragraph(
    slide: &Slide,
    footer: Option<&str>,
    width: u16,
    theme: &Theme,
) -> Paragraph<'static> {
    let padding = Padding::new(3, 3, 1, 0);
    let text_width = width.saturating_sub(padding.left + padding.right);

    let mut lines = vec![Line::styled(
        slide.title.clone(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(subtitle) = &slide.subtitle {
        lines.push(Line::styled(
            subtitle.clone(),
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    if !slide.body.is_empty() {
        lines.push(Line::default());
        lines.extend(render_markdown(&slide.body, text_width, theme));
    }
    if let Some(footer) = footer {
        lines.push(Line::default());
        lines.push(Line::styled(footer.to_string(), Style::default().fg(theme.muted)));
    }

    Paragraph::new(lines)
        .style(Style::default().fg(theme.foreground))
        .block(ratatui::widgets::Block::default().padding(padding))
}
