use super::*;
use resto_search::{DetailState, MenuItem, RestaurantDetail};

pub fn render_restaurant(frame: &mut Frame, app: &App, area: Rect) {
    let detail = match app.engine.detail_state() {
        DetailState::Ready(detail) => detail,
        DetailState::Loading(_) | DetailState::Closed => {
            let loading = Paragraph::new(Span::styled(
                "Loading restaurant...",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .block(screen_block(" Restaurant "));
            frame.render_widget(loading, area);
            return;
        }
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(label) = detail.type_label() {
        lines.push(Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Cyan),
        )));
    }
    if let Some(description) = detail.restaurant.description.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(description.to_string()));
    }

    lines.push(Line::from(""));
    lines.push(heading("Information"));
    lines.push(field("Address: ", detail.full_address()));
    lines.push(field("Payment: ", detail.restaurant.pago.clone()));
    let hours = detail.opening_hours();
    lines.push(field("Hours: ", (!hours.is_empty()).then_some(hours)));
    lines.push(field("Image: ", app.resolve_image(detail.banner_image())));

    let links = detail.contact_links();
    lines.push(Line::from(""));
    lines.push(heading("Contact"));
    lines.push(field("Call: ", links.call));
    lines.push(field("WhatsApp: ", links.whatsapp));
    lines.push(field("Directions: ", links.directions));
    lines.push(field("Web: ", links.web));

    lines.push(Line::from(""));
    lines.extend(menu_lines(detail, &app.menu_filter));

    let title = format!(" {} ", detail.restaurant.name);
    let paragraph = Paragraph::new(lines)
        .block(screen_block(&title))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn screen_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &'static str, value: Option<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value.unwrap_or_else(|| "-".to_string())),
    ])
}

fn menu_lines(detail: &RestaurantDetail, filter: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Menu",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({})", filter), Style::default().fg(Color::DarkGray)),
    ])];
    if detail.menu.is_empty() {
        lines.push(Line::from(Span::styled(
            "No menu published.",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for section in detail.menu_sections(filter) {
        lines.push(Line::from(Span::styled(
            section.name.clone(),
            Style::default().fg(Color::Yellow),
        )));
        if section.items.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No dishes in this section.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for item in section.items {
            lines.extend(dish_lines(item));
        }
    }
    lines
}

fn dish_lines(item: &MenuItem) -> Vec<Line<'static>> {
    let mut name = vec![Span::raw(format!("  {}", item.name))];
    if let Some(price) = item.price_label() {
        name.push(Span::styled(
            format!("  {}", price),
            Style::default().fg(Color::Green),
        ));
    }
    let mut lines = vec![Line::from(name)];
    if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("    {}", description.trim()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !item.allergens.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    Allergens: {}", item.allergens.join(", ")),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}
