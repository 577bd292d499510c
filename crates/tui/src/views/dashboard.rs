use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use focusflow_api_client::ApiClient;
use focusflow_core::{Dashboard, LetterSpacing, LineSpacing, SupportMode, Task, ViewState};

use crate::app::{App, DashFocus};
use crate::theme::{self, Theme};
use crate::views::centered;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dash) = app.dashboard.as_ref() else {
        return;
    };
    let profile = dash.profile();

    // Zen keeps the task card and drops everything around it.
    if dash.session().accessibility().zen_mode {
        render_state(frame, app, dash, area);
        return;
    }

    let show_dots = profile.mode == SupportMode::Autism && !dash.session().tasks().is_empty();
    let show_quick_add = profile.quick_add;
    let show_ai = profile.ai_decompose && dash.ai_panel_open;

    let mut constraints = Vec::new();
    if show_dots {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Fill(1));
    if show_quick_add {
        constraints.push(Constraint::Length(3));
    }
    if show_ai {
        constraints.push(Constraint::Length(3));
    }
    let areas = Layout::vertical(constraints).split(area);

    let mut next = 0;
    if show_dots {
        render_progress_dots(frame, dash, areas[next]);
        next += 1;
    }
    render_state(frame, app, dash, areas[next]);
    next += 1;
    if show_quick_add {
        render_quick_add(frame, app, dash, areas[next]);
        next += 1;
    }
    if show_ai {
        render_ai_panel(frame, app, dash, areas[next]);
    }
}

fn render_state(frame: &mut Frame, app: &App, dash: &Dashboard<ApiClient>, area: Rect) {
    match dash.view_state() {
        ViewState::Loading => render_message(frame, "Loading your tasks...", area),
        ViewState::Empty => render_message(frame, "No tasks yet. Add one to get started.", area),
        ViewState::AllDone => render_all_done(frame, app, dash, area),
        ViewState::Active => render_task_card(frame, app, dash, area),
    }
}

fn render_message(frame: &mut Frame, message: &str, area: Rect) {
    let card = centered(area, 48, 5);
    let block = Theme::block_dim().padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);
    frame.render_widget(
        Paragraph::new(message.to_string()).style(Style::new().fg(Theme::TEXT_SECONDARY)),
        inner,
    );
}

fn render_all_done(frame: &mut Frame, app: &App, dash: &Dashboard<ApiClient>, area: Rect) {
    let boosted = app.contrast_boosted();
    let accent = theme::accent_color(&dash.profile());
    let (done, total) = dash.progress();

    let card = centered(area, 48, 7);
    let block = Theme::block_accent(accent).padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let lines = vec![
        Line::from(Span::styled(
            "All tasks complete. Take a break!",
            Style::new().fg(Theme::text(boosted)).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("{done} of {total} finished today"),
            Style::new().fg(Theme::dim(boosted)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_task_card(frame: &mut Frame, app: &App, dash: &Dashboard<ApiClient>, area: Rect) {
    let Some(task) = dash.session().current_task() else {
        return;
    };
    let boosted = app.contrast_boosted();
    let settings = dash.session().accessibility();
    let profile = dash.profile();
    let accent = theme::accent_color(&profile);
    let (_, total) = dash.progress();
    let position = dash.session().current_task_index() + 1;

    let spread = letter_spread(app, profile.mode);
    let loose =
        profile.mode == SupportMode::Dyslexia && settings.line_spacing == LineSpacing::Loose;

    let block = Theme::block_accent(accent)
        .title(format!(" Task {position} of {total} "))
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        spaced(&task.title, spread),
        Style::new().fg(Theme::text(boosted)).bold(),
    ))];
    if let Some(description) = task.description.as_deref() {
        lines.push(Line::from(Span::styled(
            spaced(description, spread),
            Style::new().fg(Theme::dim(boosted)),
        )));
    }

    if !task.steps.is_empty() {
        lines.push(Line::raw(""));
        push_steps(&mut lines, task, spread, loose, accent, boosted);
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{} of {} steps done", task.steps_done(), task.steps.len()),
            Style::new().fg(Theme::dim(boosted)),
        )));
    }

    lines.push(Line::raw(""));
    if dash.can_complete_current() {
        lines.push(Line::from(vec![
            Span::styled("c ", Style::new().fg(Theme::TEXT_KEY)),
            Span::styled("mark this task complete", Style::new().fg(Theme::TEXT_KEY_DESC)),
        ]));
    } else if profile.steps_gate_completion && !task.all_steps_done() {
        lines.push(Line::from(Span::styled(
            "Finish every step to complete this task",
            Style::new().fg(Theme::TEXT_MUTED),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn push_steps(
    lines: &mut Vec<Line<'static>>,
    task: &Task,
    spread: LetterSpacing,
    loose: bool,
    accent: Color,
    boosted: bool,
) {
    for (index, step) in task.steps.iter().enumerate() {
        if loose && index > 0 {
            lines.push(Line::raw(""));
        }
        let (mark, style) = if step.completed {
            ("[x]", Style::new().fg(Theme::DONE))
        } else {
            ("[ ]", Style::new().fg(Theme::text(boosted)))
        };
        let mut spans = vec![
            Span::styled(format!("{:>2}. ", index + 1), Style::new().fg(accent)),
            Span::styled(format!("{mark} "), style),
        ];
        let content = spaced(&step.content, spread);
        if step.completed {
            spans.push(Span::styled(
                content,
                Style::new().fg(Theme::TEXT_MUTED).crossed_out(),
            ));
        } else {
            spans.push(Span::styled(content, Style::new().fg(Theme::text(boosted))));
        }
        lines.push(Line::from(spans));
    }
}

/// One dot per task; filled dots are finished.
fn render_progress_dots(frame: &mut Frame, dash: &Dashboard<ApiClient>, area: Rect) {
    let accent = theme::accent_color(&dash.profile());
    let mut spans = vec![Span::raw(" ")];
    for task in dash.session().tasks() {
        let (dot, style) = if task.completed {
            ("\u{25cf} ", Style::new().fg(accent))
        } else {
            ("\u{25cb} ", Style::new().fg(Theme::TEXT_MUTED))
        };
        spans.push(Span::styled(dot, style));
    }
    let (done, total) = dash.progress();
    spans.push(Span::styled(
        format!(" {done}/{total}"),
        Style::new().fg(Theme::TEXT_SECONDARY),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_quick_add(frame: &mut Frame, app: &App, dash: &Dashboard<ApiClient>, area: Rect) {
    let accent = theme::accent_color(&dash.profile());
    let focused = app.dash_focus == DashFocus::QuickAdd;
    let block = if focused {
        Theme::block_accent(accent)
    } else {
        Theme::block_dim()
    }
    .title(" Add a task (a) ")
    .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = input_line(&dash.quick_input, "What needs doing?", focused);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_ai_panel(frame: &mut Frame, app: &App, dash: &Dashboard<ApiClient>, area: Rect) {
    let accent = theme::accent_color(&dash.profile());
    let focused = app.dash_focus == DashFocus::AiPanel;
    let block = if focused {
        Theme::block_accent(accent)
    } else {
        Theme::block_dim()
    }
    .title(" Break a task into steps (i) ")
    .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = input_line(&dash.ai_input, "Describe the task to split up", focused);
    frame.render_widget(Paragraph::new(line), inner);
}

fn input_line(value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    if value.is_empty() && !focused {
        return Line::from(Span::styled(
            placeholder.to_string(),
            Style::new().fg(Theme::TEXT_HINT),
        ));
    }
    let cursor = if focused { "_" } else { "" };
    Line::from(Span::styled(
        format!("{value}{cursor}"),
        Style::new().fg(Theme::TEXT_PRIMARY),
    ))
}

/// Letter spacing actually rendered: the dyslexia reading surface honors the
/// preference directly; everywhere else only zen's document-wide tracking
/// applies.
fn letter_spread(app: &App, mode: SupportMode) -> LetterSpacing {
    if mode == SupportMode::Dyslexia {
        app.accessibility().letter_spacing
    } else if app.applier.target().contains("tracking-wide") {
        LetterSpacing::Wide
    } else {
        LetterSpacing::Normal
    }
}

fn spaced(text: &str, spacing: LetterSpacing) -> String {
    let gap = match spacing {
        LetterSpacing::Normal => return text.to_string(),
        LetterSpacing::Wide => " ",
        LetterSpacing::Wider => "  ",
    };
    let mut out = String::with_capacity(text.len() * 2);
    for (index, c) in text.chars().enumerate() {
        if index > 0 {
            out.push_str(gap);
        }
        out.push(c);
    }
    out
}
