use crate::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

mod detail;
mod overlays;
mod results;
mod search_bar;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + throbber
            Constraint::Length(3), // Search + filter pills
            Constraint::Min(0),    // Results
            Constraint::Length(5), // Detail
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_title(frame, app, root[0]);
    let search_area = search_bar::render_search_row(frame, app, root[1]);
    if app.focus == Focus::Detail {
        detail::render_restaurant(frame, app, root[2].union(root[3]));
    } else {
        results::render_results(frame, app, root[2]);
        results::render_detail(frame, app, root[3]);
    }
    render_controls(frame, app, root[4]);

    if app.engine.show_suggestions() {
        overlays::render_suggestions(frame, app, search_area);
    }
    if app.picker.is_some() {
        overlays::render_picker(frame, app);
    }
    // Notice renders on top of everything
    if app.engine.notice().is_some() {
        overlays::render_notice(frame, app);
    }
}

fn render_title(frame: &mut Frame, app: &mut App, area: Rect) {
    const LABEL: &str = " Restaurant Directory";

    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_busy() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);

    let state = app.engine.page_state();
    let summary = if state.has_more {
        format!("{} loaded, more available ", state.rows.len())
    } else {
        format!("{} results ", state.rows.len())
    };
    let line = Line::from(vec![
        Span::styled(LABEL, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  page {}", state.page),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), label_area);
    frame.render_widget(
        Paragraph::new(Span::styled(summary, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        label_area,
    );
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    use utils::key_hint;

    let mut spans: Vec<Span> = Vec::new();
    if app.picker.is_some() {
        spans.extend(key_hint("Type", ": Filter  "));
        spans.extend(key_hint("↑↓", ": Navigate  "));
        spans.extend(key_hint("Enter", ": Apply  "));
        spans.extend(key_hint("Esc", ": Cancel"));
    } else {
        match app.focus {
            Focus::Search => {
                spans.extend(key_hint("Enter", ": Search  "));
                spans.extend(key_hint("↓", ": Suggestions  "));
                spans.extend(key_hint("Ctrl+X", ": Clear  "));
                spans.extend(key_hint("Tab/Esc", ": Results"));
            }
            Focus::Suggestions => {
                spans.extend(key_hint("↑↓", ": Navigate  "));
                spans.extend(key_hint("Enter", ": Pick  "));
                spans.extend(key_hint("Esc", ": Hide"));
            }
            Focus::Detail => {
                spans.extend(key_hint("↑↓/j/k", ": Scroll  "));
                spans.extend(key_hint("t", ": Menu type  "));
                spans.extend(key_hint("Esc", ": Back"));
            }
            Focus::List => {
                spans.extend(key_hint("↑↓/j/k", ": Scroll  "));
                spans.extend(key_hint("Enter", ": Open  "));
                spans.extend(key_hint("/", ": Search  "));
                spans.extend(key_hint("c", ": Category  "));
                spans.extend(key_hint("l", ": Locality  "));
                spans.extend(key_hint("q", ": Quit"));
            }
        }
    }

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}
