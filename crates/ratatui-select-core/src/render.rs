use ratatui::buffer::Buffer;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Writes `input` at `(x, y)`, never exceeding `max_cols` terminal columns.
///
/// Wide characters that would straddle the limit are dropped instead of being cut in half.
/// Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }

    dx
}

/// Like [`render_str_clipped`] for a run of styled spans. Returns the columns written.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    let mut used = 0u16;
    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            span.style
        };
        let remaining = max_cols.saturating_sub(used);
        if remaining == 0 {
            break;
        }
        let written = render_str_clipped(x + used, y, remaining, buf, &span.content, style);
        used += written;
        if written < str_width(&span.content) {
            break;
        }
    }
    used
}

/// Display width of `s` in terminal columns, saturating at `u16::MAX`.
pub fn str_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}
