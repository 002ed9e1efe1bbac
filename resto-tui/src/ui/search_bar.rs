use super::*;

/// Draws the search box and both filter pills. Returns the search box area so
/// the suggestion dropdown can anchor to it.
pub fn render_search_row(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Search input
            Constraint::Length(24), // Category
            Constraint::Length(24), // Locality
        ])
        .split(area);

    let editing = matches!(app.focus, Focus::Search | Focus::Suggestions) && app.picker.is_none();
    let search_text = if app.search_input.value.is_empty() {
        if app.focus == Focus::Search {
            "█".to_string()
        } else {
            "Search restaurants or categories...".to_string()
        }
    } else if app.focus == Focus::Search {
        let (before, after) = app.search_input.split_at_cursor();
        format!("{}█{}", before, after)
    } else {
        app.search_input.value.clone()
    };
    let text_style = if app.search_input.value.is_empty() && app.focus != Focus::Search {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let search_box = Paragraph::new(search_text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(editing))
            .title(" Search ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(search_box, cols[0]);

    render_pill(frame, cols[1], " Category [c] ", app.engine.category());
    render_pill(frame, cols[2], " Locality [l] ", app.engine.locality());

    cols[0]
}

fn render_pill(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let pill = Paragraph::new(Span::styled(
        value.to_string(),
        Style::default().fg(Color::Cyan),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(pill, area);
}

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
