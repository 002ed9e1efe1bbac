use super::*;
use resto_search::Row;

pub fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.engine.rows();
    let list_focused = app.focus == Focus::List && app.picker.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if list_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(format!(" Results ({}) ", rows.len()))
        .padding(Padding::horizontal(1));

    if rows.is_empty() {
        let message = if app.engine.loading() {
            "Loading..."
        } else {
            "No restaurants match these filters."
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row_item(row, i == app.selected_row))
        .collect();
    if app.engine.loading() {
        items.push(ListItem::new(Span::styled(
            "Loading more...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected(Some(app.selected_row));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &Row, selected: bool) -> ListItem<'static> {
    let name_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let badge = match row.is_open {
        Some(true) => Span::styled(" open ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled(" closed ", Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };

    let mut spans = vec![Span::styled(row.name.clone(), name_style), badge];
    if !row.types.is_empty() {
        spans.push(Span::styled(
            format!(" {}", row.types.join(", ")),
            Style::default().fg(Color::Cyan),
        ));
    }
    let locality = row.city.display();
    if !locality.is_empty() {
        spans.push(Span::styled(
            format!("  {}", locality),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Details ")
        .padding(Padding::horizontal(1));

    let Some(row) = app.selected() else {
        frame.render_widget(block, area);
        return;
    };

    let muted = Style::default().fg(Color::DarkGray);
    let field = |label: &'static str, value: Option<String>| {
        Line::from(vec![
            Span::styled(label, muted),
            Span::raw(value.unwrap_or_else(|| "-".to_string())),
        ])
    };
    let lines = vec![
        Line::from(vec![
            field("Address: ", row.address.clone()).spans,
            vec![Span::raw("   ")],
            field("Phone: ", row.phone.clone()).spans,
            vec![Span::raw("   ")],
            field("Price: ", row.price_range.clone()).spans,
        ]
        .concat()),
        field("Image: ", app.image_url(row)),
        field("Web: ", row.web.clone()),
    ];

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}
