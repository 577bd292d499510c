use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{App, DashFocus, Screen};
use crate::theme::{self, Theme};
use crate::views::{dashboard, login, onboarding, settings};

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        // Login and onboarding are full-screen cards
        Screen::Login => {
            login::render(frame, app, frame.area());
            render_toast(frame, app);
            return;
        }
        Screen::Onboarding => {
            onboarding::render(frame, app, frame.area());
            render_toast(frame, app);
            return;
        }
        Screen::Dashboard | Screen::Settings => {}
    }

    // Zen strips the header and footer; only the task card remains.
    if app.screen == Screen::Dashboard && app.accessibility().zen_mode {
        dashboard::render(frame, app, frame.area());
        render_toast(frame, app);
        return;
    }

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);

    match app.screen {
        Screen::Dashboard => dashboard::render(frame, app, body_area),
        Screen::Settings => settings::render(frame, app, body_area),
        Screen::Login | Screen::Onboarding => {}
    }

    render_footer(frame, app, footer_area);
    render_toast(frame, app);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let boosted = app.contrast_boosted();
    let block = Theme::block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(dash) = app.dashboard.as_ref() else {
        return;
    };
    let profile = dash.profile();
    let accent = theme::accent_color(&profile);
    let (done, total) = dash.progress();

    let mut spans = vec![
        Span::styled(" FocusFlow ", Style::new().fg(accent).bold()),
        Span::styled(
            format!("{} mode", profile.mode.label()),
            Style::new().fg(Theme::dim(boosted)),
        ),
    ];
    if let Some(user) = dash.session().user() {
        spans.push(Span::styled(
            format!("  \u{00b7}  {}", user.name),
            Style::new().fg(Theme::dim(boosted)),
        ));
    }
    if total > 0 {
        spans.push(Span::styled(
            format!("  \u{00b7}  {done}/{total} done"),
            Style::new().fg(Theme::dim(boosted)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let help = match app.screen {
        Screen::Dashboard => match app.dash_focus {
            DashFocus::QuickAdd => Line::from(vec![
                Span::styled(" Enter ", key_style),
                Span::styled("add task  ", desc_style),
                Span::styled("Esc ", key_style),
                Span::styled("back", desc_style),
            ]),
            DashFocus::AiPanel => Line::from(vec![
                Span::styled(" Enter ", key_style),
                Span::styled("break down  ", desc_style),
                Span::styled("Esc ", key_style),
                Span::styled("close", desc_style),
            ]),
            DashFocus::Browse => {
                let mut spans = vec![
                    Span::styled(" r ", key_style),
                    Span::styled("refresh  ", desc_style),
                    Span::styled("c ", key_style),
                    Span::styled("complete  ", desc_style),
                ];
                if let Some(dash) = app.dashboard.as_ref() {
                    if dash.profile().quick_add {
                        spans.push(Span::styled("a ", key_style));
                        spans.push(Span::styled("add  ", desc_style));
                    }
                    if dash.profile().ai_decompose {
                        spans.push(Span::styled("i ", key_style));
                        spans.push(Span::styled("break down  ", desc_style));
                    }
                    let has_steps = dash
                        .session()
                        .current_task()
                        .is_some_and(|task| !task.steps.is_empty());
                    if has_steps {
                        spans.push(Span::styled("1-9 ", key_style));
                        spans.push(Span::styled("steps  ", desc_style));
                    }
                }
                spans.extend([
                    Span::styled("z ", key_style),
                    Span::styled("zen  ", desc_style),
                    Span::styled("s ", key_style),
                    Span::styled("settings  ", desc_style),
                    Span::styled("q ", key_style),
                    Span::styled("quit", desc_style),
                ]);
                Line::from(spans)
            }
        },
        Screen::Settings => Line::from(vec![
            Span::styled(" j/k ", key_style),
            Span::styled("navigate  ", desc_style),
            Span::styled("Enter ", key_style),
            Span::styled("change  ", desc_style),
            Span::styled("m ", key_style),
            Span::styled("mode  ", desc_style),
            Span::styled("x ", key_style),
            Span::styled("log out  ", desc_style),
            Span::styled("Esc ", key_style),
            Span::styled("back", desc_style),
        ]),
        Screen::Login | Screen::Onboarding => Line::raw(""),
    };
    frame.render_widget(Paragraph::new(help), area);
}

/// One-line error banner on the bottom row, cleared on the next key press.
fn render_toast(frame: &mut Frame, app: &App) {
    let Some(toast) = app.toast.as_deref() else {
        return;
    };
    let area = frame.area();
    if area.height < 2 {
        return;
    }
    let line = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Clear, line);
    frame.render_widget(
        Paragraph::new(format!(" {toast}")).style(Style::new().fg(Theme::ACCENT_RED)),
        line,
    );
}
