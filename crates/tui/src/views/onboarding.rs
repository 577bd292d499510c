use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use focusflow_core::{ModeProfile, SupportMode};

use crate::app::App;
use crate::theme::{self, Theme};
use crate::views::centered;

/// Short pitch shown under each mode card.
fn blurb(mode: SupportMode) -> &'static str {
    match mode {
        SupportMode::Adhd => "Quick capture and one task in focus at a time",
        SupportMode::Autism => "Predictable layout with steady progress markers",
        SupportMode::Dyslexia => "Readable type and step-by-step completion",
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let card = centered(area, 62, 20);
    let block = Theme::block()
        .title(" FocusFlow · Choose your support mode ")
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let greeting = match &app.pending_user {
        Some(user) => format!("Welcome, {}! Pick the mode that fits how you work.", user.name),
        None => "Pick the mode that fits how you work.".to_string(),
    };

    let [greeting_area, cards_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(greeting).style(Style::new().fg(Theme::TEXT_PRIMARY)),
        greeting_area,
    );

    let card_areas = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ])
    .split(cards_area);

    for (index, mode) in SupportMode::ALL.iter().enumerate() {
        let selected = index == app.onboarding_index;
        let accent = theme::accent_color(&ModeProfile::for_mode(*mode));
        let block = if selected {
            Theme::block_accent(accent)
        } else {
            Theme::block_dim()
        };
        let card_inner = block.inner(card_areas[index]);
        frame.render_widget(block, card_areas[index]);

        let title_style = if selected {
            Style::new().fg(accent).bold()
        } else {
            Style::new().fg(Theme::TEXT_SECONDARY)
        };
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}. {}", index + 1, mode.label()),
                title_style,
            )),
            Line::from(Span::styled(
                format!("    {}", blurb(*mode)),
                Style::new().fg(Theme::TEXT_MUTED),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), card_inner);
    }

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("j/k ", Style::new().fg(Theme::TEXT_KEY)),
            Span::styled("select  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
            Span::styled("Enter ", Style::new().fg(Theme::TEXT_KEY)),
            Span::styled("confirm  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
            Span::styled("Esc ", Style::new().fg(Theme::TEXT_KEY)),
            Span::styled("sign out", Style::new().fg(Theme::TEXT_KEY_DESC)),
        ])),
        hint_area,
    );
}
