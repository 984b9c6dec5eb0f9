use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::transcript::TextStyle;
use crate::App;

fn style_for(style: TextStyle) -> Style {
    match style {
        TextStyle::Plain => Style::default(),
        TextStyle::Info => Style::default().fg(Color::Cyan),
        TextStyle::Error => Style::default().fg(Color::Red),
        TextStyle::Success => Style::default().fg(Color::Green),
        TextStyle::TypingText => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Hard character wrap, the way a terminal breaks long lines. Embedded
/// newlines start a new row; zero-width characters never force a break.
fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for segment in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for ch in segment.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += w;
        }
        rows.push(row);
    }
    rows
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let session = &self.session;

        let mut lines: Vec<Line> = Vec::new();
        for entry in session.transcript.entries() {
            let style = style_for(entry.style);
            for row in wrap_to_width(&entry.text, width) {
                lines.push(Line::from(Span::styled(row, style)));
            }
        }

        // the live input line, with a block cursor after the pending text
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
        let pending = format!("{} {}", session.transcript.prompt(), session.input);
        let mut pending_rows = wrap_to_width(&pending, width);
        let last_row = pending_rows.pop().unwrap_or_default();
        for row in pending_rows {
            lines.push(Line::from(row));
        }
        if last_row.chars().filter_map(|c| c.width()).sum::<usize>() >= width {
            // input reached the right edge; the cursor flows onto a new row
            lines.push(Line::from(last_row));
            lines.push(Line::from(Span::styled(" ", cursor_style)));
        } else {
            lines.push(Line::from(vec![
                Span::raw(last_row),
                Span::styled(" ", cursor_style),
            ]));
        }

        // anchor to the bottom once the transcript outgrows the screen
        let height = area.height as usize;
        let visible = if lines.len() > height {
            lines.split_off(lines.len() - height)
        } else {
            lines
        };

        Paragraph::new(visible).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::runtime::ShutdownTimer;
    use crate::session::Session;
    use crate::transcript::Transcript;
    use crate::{App, RuntimeSettings, SupportedCorpus};
    use ratatui::{buffer::Buffer, layout::Rect};

    fn create_test_app(custom_text: &str) -> App {
        let corpus = Corpus::new("classic".to_string());
        let transcript = Transcript::new("welcome".to_string(), "user@test:~$".to_string());
        let session = Session::new(corpus, Some(custom_text.to_string()), transcript);

        App {
            session,
            shutdown: ShutdownTimer::new(),
            settings: RuntimeSettings {
                corpus: SupportedCorpus::Classic,
                custom_text: Some(custom_text.to_string()),
                prompt: "user@test:~$".to_string(),
                exit_delay_ms: 1000,
            },
        }
    }

    fn render_to_string(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_banner_and_prompt() {
        let app = create_test_app("abc");
        let rendered = render_to_string(&app, Rect::new(0, 0, 80, 24));

        assert!(rendered.contains("welcome"));
        assert!(rendered.contains("user@test:~$"));
    }

    #[test]
    fn test_renders_pending_input() {
        let mut app = create_test_app("abc");
        app.session.push_char('h');
        app.session.push_char('i');

        let rendered = render_to_string(&app, Rect::new(0, 0, 80, 24));
        assert!(rendered.contains("user@test:~$ hi"));
    }

    #[test]
    fn test_cursor_is_reversed_block_after_input() {
        let mut app = create_test_app("abc");
        app.session.push_char('h');
        app.session.push_char('i');

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        // row 0 is the banner, row 1 is "user@test:~$ hi" plus the cursor
        let cursor_x = "user@test:~$ hi".len() as u16;
        let cell = buffer.cell((cursor_x, 1)).unwrap();
        assert!(cell.style().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_bottom_anchors_long_transcript() {
        let mut app = create_test_app("abc");
        for i in 0..50 {
            app.session.transcript.plain(format!("scroll line {i}"));
        }

        let rendered = render_to_string(&app, Rect::new(0, 0, 40, 6));
        assert!(rendered.contains("scroll line 49"));
        assert!(!rendered.contains("welcome"));
    }

    #[test]
    fn test_multiline_entries_render_every_row() {
        let mut app = create_test_app("abc");
        app.session.transcript.info("first row\nsecond row");

        let rendered = render_to_string(&app, Rect::new(0, 0, 80, 24));
        assert!(rendered.contains("first row"));
        assert!(rendered.contains("second row"));
    }

    #[test]
    fn test_long_lines_hard_wrap() {
        let mut app = create_test_app("abc");
        app.session
            .transcript
            .plain("abcdefghij0123456789xyz");

        let rendered = render_to_string(&app, Rect::new(0, 0, 10, 24));
        assert!(rendered.contains("abcdefghij"));
        assert!(rendered.contains("0123456789"));
        assert!(rendered.contains("xyz"));
    }

    #[test]
    fn test_zero_sized_area_does_not_panic() {
        let app = create_test_app("abc");
        for area in [Rect::new(0, 0, 0, 0), Rect::new(0, 0, 0, 5), Rect::new(0, 0, 5, 0)] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
        }
    }

    #[test]
    fn test_wrap_to_width_plain() {
        assert_eq!(wrap_to_width("", 10), vec![String::new()]);
        assert_eq!(wrap_to_width("short", 10), vec!["short".to_string()]);
        assert_eq!(
            wrap_to_width("exactlyten", 10),
            vec!["exactlyten".to_string()]
        );
        assert_eq!(
            wrap_to_width("elevenchars", 10),
            vec!["elevenchar".to_string(), "s".to_string()]
        );
    }

    #[test]
    fn test_wrap_to_width_newlines() {
        assert_eq!(
            wrap_to_width("a\n\nb", 10),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn test_wrap_to_width_wide_chars() {
        // each ideograph is two cells wide, so only two fit per row
        assert_eq!(
            wrap_to_width("日本語", 4),
            vec!["日本".to_string(), "語".to_string()]
        );
    }
}
