use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, LoginField};
use crate::theme::Theme;
use crate::views::centered;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let boosted = app.contrast_boosted();
    let height = if app.login.signup { 16 } else { 14 };
    let card = centered(area, 56, height);

    let title = if app.login.signup {
        " FocusFlow · Create account "
    } else {
        " FocusFlow · Sign in "
    };
    let block = Theme::block().title(title).padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines = vec![
        field_line(
            "Email",
            &app.login.email,
            app.login.focus == LoginField::Email,
            boosted,
        ),
        Line::raw(""),
        field_line(
            "Password",
            &mask(&app.login.password),
            app.login.focus == LoginField::Password,
            boosted,
        ),
        Line::raw(""),
    ];
    if app.login.signup {
        lines.push(field_line(
            "Name",
            &app.login.name,
            app.login.focus == LoginField::Name,
            boosted,
        ));
        lines.push(Line::raw(""));
    }

    let switch_label = if app.login.signup {
        "Have an account? Sign in"
    } else {
        "Need an account? Create one"
    };
    lines.push(switch_line(
        switch_label,
        app.login.focus == LoginField::SwitchMode,
    ));

    if let Some(status) = app.login.status.as_deref() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::new().fg(Theme::ACCENT_RED),
        )));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Tab ", Style::new().fg(Theme::TEXT_KEY)),
        Span::styled("next  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
        Span::styled("Enter ", Style::new().fg(Theme::TEXT_KEY)),
        Span::styled("submit  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
        Span::styled("Esc ", Style::new().fg(Theme::TEXT_KEY)),
        Span::styled("quit", Style::new().fg(Theme::TEXT_KEY_DESC)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(label: &str, value: &str, selected: bool, boosted: bool) -> Line<'static> {
    let pointer = if selected { "\u{25b8}" } else { " " };
    let label_style = if selected {
        Style::new().fg(Theme::text(boosted)).bold()
    } else {
        Style::new().fg(Theme::dim(boosted))
    };
    let cursor = if selected { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{pointer} {label:<9} "), label_style),
        Span::styled(
            format!("{value}{cursor}"),
            Style::new().fg(Theme::text(boosted)),
        ),
    ])
}

fn switch_line(label: &str, selected: bool) -> Line<'static> {
    let pointer = if selected { "\u{25b8}" } else { " " };
    let style = if selected {
        Style::new().fg(Theme::ACCENT_TEAL).bold()
    } else {
        Style::new().fg(Theme::TEXT_MUTED)
    };
    Line::from(Span::styled(format!("{pointer} {label}"), style))
}

fn mask(password: &str) -> String {
    "\u{2022}".repeat(password.chars().count())
}
