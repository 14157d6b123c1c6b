//! Create/edit test case modal

use canary_app::form::{FormField, TestCaseForm};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 72;
/// Two rows per field plus error, footer, and borders
const MODAL_HEIGHT: u16 = FormField::ALL.len() as u16 * 2 + 6;

pub struct TestCaseFormModal<'a> {
    form: &'a TestCaseForm,
}

impl<'a> TestCaseFormModal<'a> {
    pub fn new(form: &'a TestCaseForm) -> Self {
        Self { form }
    }

    fn label_line(&self, field: FormField) -> Line<'static> {
        let style = if field == self.form.focus {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        let mut spans = vec![Span::styled(field.label(), style)];
        if field.is_required() {
            spans.push(Span::styled(" *", styles::status_red()));
        }
        Line::from(spans)
    }

    fn value_line(&self, field: FormField, width: usize) -> Line<'a> {
        let focused = field == self.form.focus;
        let bg = if focused {
            palette::INPUT_ACTIVE_BG
        } else {
            palette::INPUT_BG
        };
        let value = self.form.value(field);

        let mut spans = Vec::new();
        if field.is_text() {
            // Keep the tail visible while typing past the box width
            let shown = tail(value, width.saturating_sub(2));
            if shown.is_empty() && !focused {
                spans.push(Span::styled(
                    format!(" {}", field.placeholder()),
                    styles::text_muted(),
                ));
            } else {
                spans.push(Span::styled(format!(" {}", shown), styles::text_primary()));
                if focused {
                    spans.push(Span::styled("_", styles::accent()));
                }
            }
        } else {
            let arrows = if focused {
                styles::accent()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(" ◀ ", arrows));
            spans.push(Span::styled(value.to_string(), styles::text_primary()));
            spans.push(Span::styled(" ▶", arrows));
        }
        Line::from(spans).style(Style::default().bg(bg))
    }

    fn footer_line(&self) -> Line<'static> {
        if self.form.submitting {
            return Line::styled("Saving...", styles::accent());
        }
        Line::from(vec![
            Span::styled("ctrl+s", styles::keybinding()),
            Span::styled(format!(" {} Test Case", self.form.submit_label()), styles::text_muted()),
            Span::raw("   "),
            Span::styled("esc", styles::keybinding()),
            Span::styled(" Cancel", styles::text_muted()),
        ])
    }
}

/// Last `width` columns of `text`
fn tail(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

impl Widget for TestCaseFormModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::open_modal(MODAL_WIDTH, MODAL_HEIGHT, area, buf);

        let title = format!(" {} ", self.form.title());
        let block = styles::modal_block(&title);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let mut constraints: Vec<Constraint> = FormField::ALL
            .iter()
            .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
            .collect();
        constraints.extend([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ]);
        let rows = Layout::vertical(constraints).split(inner);

        let width = inner.width as usize;
        for (i, field) in FormField::ALL.iter().enumerate() {
            Paragraph::new(self.label_line(*field)).render(rows[i * 2], buf);
            Paragraph::new(self.value_line(*field, width)).render(rows[i * 2 + 1], buf);
        }

        let base = FormField::ALL.len() * 2;
        if let Some(error) = &self.form.error {
            Paragraph::new(Line::styled(error.as_str(), styles::status_red()))
                .render(rows[base + 1], buf);
        }
        Paragraph::new(self.footer_line())
            .alignment(Alignment::Right)
            .render(rows[base + 2], buf);
    }
}
