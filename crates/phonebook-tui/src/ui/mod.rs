use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use phonebook_core::domain::Field;

use crate::app::{App, ConfirmState, FormFocus, Mode};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_list(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help(frame, size);
    }

    match &app.mode {
        Mode::Confirm(state) => render_confirm(frame, size, state),
        Mode::Notice(message) => render_notice(frame, size, message),
        _ => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let filter_display = if app.filter.is_empty() {
        "(none)".to_string()
    } else {
        app.filter_input.clone()
    };
    let filter_style = if matches!(app.mode, Mode::FilterEditing) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::raw(format!("contacts: {}  filter: ", app.total_contacts)),
        Span::styled(filter_display, filter_style),
    ]);

    let block = Block::default().borders(Borders::ALL).title("phonebook");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let active = matches!(app.mode, Mode::Form);
    let mut lines = Vec::new();
    for (field, focus) in [(Field::Name, FormFocus::Name), (Field::Number, FormFocus::Number)] {
        let focused = active && app.form_focus == focus;
        lines.push(field_line(field.label(), app.form.value(field), focused));
        let error = app
            .form
            .visible_error(field)
            .map(|err| err.message)
            .unwrap_or("");
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));

    let button_style = if active && app.form_focus == FormFocus::Submit {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    lines.push(Line::from(Span::styled("[Add contact]", button_style)));

    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Add Contact");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.contacts.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint())
            .block(Block::default().borders(Borders::ALL).title("Contacts"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .contacts
        .iter()
        .map(|contact| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    contact.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(": "),
                Span::raw(contact.number.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !matches!(app.mode, Mode::Form) {
        state.select(Some(app.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Contacts"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Form => "tab next  shift+tab prev  enter add  ctrl+u clear field  esc list  ctrl+c quit",
        Mode::List => "j/k move  / filter  c clear filter  d delete  a add  q quit  ? help",
        Mode::FilterEditing => "type to filter  enter/esc done",
        Mode::Confirm(_) => "y confirm  n cancel",
        Mode::Notice(_) => "enter dismiss",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press enter to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Notice"),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: Ctrl+C quit"),
        Line::from("Form: tab/shift+tab move, enter on [Add contact] submits, Ctrl+U clear, Ctrl+W delete word, esc to list"),
        Line::from("List: j/k move, / filter, c clear filter, d delete, a back to form, q quit, ? help"),
        Line::from(""),
        Line::from("Names: letters, apostrophe, dash and spaces, at least 3 characters"),
        Line::from("Numbers: 7 to 15 characters, optional leading +, optional (area code), digits and dashes"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
