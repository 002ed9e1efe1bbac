use super::*;
use crate::app::PickerTarget;

const HIDE_SUGGESTIONS: &str = "Hide suggestions";

pub fn render_suggestions(frame: &mut Frame, app: &App, anchor: Rect) {
    let suggestions = app.engine.suggestions();
    let highlighted = (app.focus == Focus::Suggestions).then_some(app.suggestion_index);

    let mut items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if highlighted == Some(i) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(s.label.clone(), style))
        })
        .collect();
    let hide_style = if highlighted == Some(suggestions.len()) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    items.push(ListItem::new(Span::styled(HIDE_SUGGESTIONS, hide_style)));

    // Entries plus the top and bottom border.
    let height = items.len() as u16 + 2;
    let area = utils::dropdown_rect(anchor, height, frame.area());
    frame.render_widget(Clear, area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, area);
}

pub fn render_picker(frame: &mut Frame, app: &App) {
    let Some(picker) = &app.picker else {
        return;
    };

    let area = utils::centered_rect(44, 18, frame.area());
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (before, after) = picker.input.split_at_cursor();
    let input = Paragraph::new(format!("{}█{}", before, after))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", picker.title()))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(input, chunks[0]);

    let (loading, error) = match picker.target {
        PickerTarget::Filter(_) => {
            let options = app.engine.filter_options();
            (options.loading, options.error.clone())
        }
        PickerTarget::MenuType => (false, None),
    };
    let mut items: Vec<ListItem> = picker
        .filtered
        .iter()
        .map(|option| ListItem::new(option.clone()))
        .collect();
    if loading {
        items.push(ListItem::new(Span::styled(
            "Loading options...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(error) = error {
        items.push(ListItem::new(Span::styled(
            error,
            Style::default().fg(Color::Red),
        )));
    }

    let title = format!(" {}/{} ", picker.filtered.len(), picker.options.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(picker.index));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

pub fn render_notice(frame: &mut Frame, app: &App) {
    let Some(message) = app.engine.notice() else {
        return;
    };

    let area = utils::centered_rect(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(utils::key_hint("Enter", ": Dismiss").to_vec()),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(" Error ", Style::default().fg(Color::Red)))
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(paragraph, area);
}
