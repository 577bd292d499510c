use focusflow_core::{AccessibilitySettings, SupportMode};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::settings::{SETTINGS_LAYOUT, SettingField, SettingItem};
use crate::theme::{self, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let boosted = app.contrast_boosted();
    let settings = app.accessibility();
    let mode = app
        .dashboard
        .as_ref()
        .and_then(|dash| dash.session().support_mode());
    let accent = app
        .dashboard
        .as_ref()
        .map_or(Theme::ACCENT_TEAL, |dash| theme::accent_color(&dash.profile()));

    let block = Theme::block_dim()
        .title(" Settings ")
        .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut field_idx = 0usize;

    for item in SETTINGS_LAYOUT.iter() {
        match item {
            SettingItem::Header(title) => {
                if !lines.is_empty() {
                    lines.push(Line::raw(""));
                }
                lines.push(Line::styled(
                    format!("\u{2500}\u{2500} {title} \u{2500}\u{2500}"),
                    Style::new().fg(accent).bold(),
                ));
                lines.push(Line::raw(""));
            }
            SettingItem::Field {
                field,
                label,
                description,
            } => {
                let selected = field_idx == app.settings_cursor;
                field_idx += 1;

                let marker = if selected { "\u{25b8} " } else { "  " };
                let name_style = if selected {
                    Style::new().fg(Theme::text(boosted)).bold()
                } else {
                    Style::new().fg(Theme::dim(boosted))
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::new().fg(accent).bold()),
                    Span::styled(format!("{label:<16}"), name_style),
                    value_span(*field, &settings, mode),
                ]));
                if selected {
                    lines.push(Line::styled(
                        format!("      {description}"),
                        Style::new().fg(Theme::TEXT_HINT),
                    ));
                }
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn value_span(
    field: SettingField,
    settings: &AccessibilitySettings,
    mode: Option<SupportMode>,
) -> Span<'static> {
    let text = field.display_value(settings, mode);
    let style = if field.is_toggle() {
        if text == "On" {
            Style::new().fg(Theme::TOGGLE_ON)
        } else {
            Style::new().fg(Theme::TOGGLE_OFF)
        }
    } else {
        Style::new().fg(Theme::FIELD_VALUE)
    };
    Span::styled(text, style)
}
