use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;
use crate::app::App;
use crate::list::{wrap_text, Item};
use crate::message::Origin;
use crate::widget::Focus;

const SEND_BUTTON_WIDTH: u16 = 10;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, conversation, input row, footer
    let [header_area, chat_area, input_row, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [input_area, send_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SEND_BUTTON_WIDTH),
    ])
    .areas(input_row);

    // Store areas for mouse hit-testing
    app.chat_area = Some(chat_area);
    app.input_area = Some(input_area);
    app.send_area = Some(send_area);

    render_header(app, frame, header_area);
    render_messages(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_send_button(app, frame, send_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let pending = app.widget.in_flight();
    let pending_indicator = if pending > 0 {
        format!(" [{} pending]", pending)
    } else {
        String::new()
    };

    let header = Line::from(vec![
        Span::styled(
            " Handbook Chat ",
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", app.server), Style::default().fg(Color::DarkGray)),
        Span::styled(pending_indicator, Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(header), area);
}

fn origin_style(origin: Origin) -> Style {
    let color = match origin {
        Origin::User => Color::Cyan,
        Origin::Bot => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Three dots with the current animation frame highlighted
fn loading_dots(frame: u8) -> Line<'static> {
    let mut spans = Vec::with_capacity(5);
    for i in 0..3u8 {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if i == frame {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(".", style));
    }
    Line::from(spans)
}

fn render_messages(app: &mut App, frame: &mut Frame, area: Rect) {
    // Inner size minus borders drives wrapping and the scroll extent
    app.widget
        .list_mut()
        .set_viewport(area.width.saturating_sub(2), area.height.saturating_sub(2));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Conversation ");

    let list = app.widget.list();

    let (text, skip) = if list.is_empty() {
        let hint = Text::from(Span::styled(
            "Ask a question about the handbook...",
            Style::default().fg(Color::DarkGray),
        ));
        (hint, 0)
    } else {
        let width = list.wrap_width();
        let mut lines: Vec<Line> = Vec::new();

        // Only the items in view are laid out; the list may be far taller
        // than a u16 row offset can reach.
        let (skip, items) = list.visible_items();
        for item in items {
            match item {
                Item::Message(message) => {
                    lines.push(Line::from(Span::styled(
                        message.origin.label(),
                        origin_style(message.origin),
                    )));
                    // Raw spans: message text is shown exactly as received
                    for row in wrap_text(&message.text, width) {
                        lines.push(Line::from(Span::raw(row)));
                    }
                }
                Item::Loading(_) => {
                    lines.push(Line::from(Span::styled(
                        Origin::Bot.label(),
                        origin_style(Origin::Bot),
                    )));
                    lines.push(loading_dots(app.widget.animation_frame()));
                }
            }
            lines.push(Line::default());
        }

        (Text::from(lines), skip)
    };

    // `skip` is less than the height of a single item
    let paragraph = Paragraph::new(text)
        .block(block)
        .scroll((u16::try_from(skip).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

/// The tail of the input that fits in `width` columns with the cursor in
/// view, and the cursor column inside that tail.
fn input_window(text: &str, cursor: usize, width: u16) -> (&str, u16) {
    let limit = usize::from(width.saturating_sub(1));
    let before: Vec<(usize, char)> = text.char_indices().take(cursor).collect();
    let cursor_byte = text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i);

    let mut start = before.len();
    let mut column = 0;
    while start > 0 {
        let char_width = before[start - 1].1.width().unwrap_or(0);
        if column + char_width > limit {
            break;
        }
        column += char_width;
        start -= 1;
    }

    let start_byte = before.get(start).map_or(cursor_byte, |(i, _)| *i);
    // column <= limit, which came from a u16
    (&text[start_byte..], u16::try_from(column).unwrap_or(0))
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.widget.focus() == Focus::Input;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Question ");

    let input = app.widget.input();
    // Keep the cursor visible when the text is wider than the box
    let (visible, column) = input_window(input.text(), input.cursor(), area.width.saturating_sub(2));

    let paragraph = Paragraph::new(visible).block(block);
    frame.render_widget(paragraph, area);

    if focused {
        frame.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
    }
}

fn render_send_button(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.widget.focus() == Focus::Send;
    let (border_color, label_style) = if focused {
        (
            Color::Cyan,
            Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(Color::White))
    };

    let button = Paragraph::new(Span::styled(" Send ", label_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(button, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ];

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
