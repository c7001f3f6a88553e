use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::App;
use crate::tui::AppEvent;
use crate::widget::Focus;

/// Lines moved per mouse wheel notch
const WHEEL_STEP: usize = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        // The loop redraws after every event, which picks up the new size
        AppEvent::Resize => {}
        AppEvent::Tick => app.widget.tick(),
        AppEvent::Reply(reply) => app.widget.resolve(reply),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work with either focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,

        // Both the input and the send button submit on Enter
        KeyCode::Enter => {
            app.widget.submit();
        }

        KeyCode::Tab | KeyCode::BackTab => app.widget.toggle_focus(),

        // Conversation scrolling
        KeyCode::PageUp => {
            let page = app.widget.list().page_height();
            app.widget.list_mut().scroll_up(page);
        }
        KeyCode::PageDown => {
            let page = app.widget.list().page_height();
            app.widget.list_mut().scroll_down(page);
        }
        KeyCode::Up => app.widget.list_mut().scroll_up(1),
        KeyCode::Down => app.widget.list_mut().scroll_down(1),

        _ => match app.widget.focus() {
            Focus::Input => handle_input_key(app, key),
            Focus::Send => {
                if key.code == KeyCode::Char(' ') {
                    app.widget.submit();
                }
            }
        },
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    let input = app.widget.input_mut();
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    let in_area = |area: Option<Rect>| area.map_or(false, |rect| point_in_rect(x, y, rect));

    match mouse.kind {
        MouseEventKind::ScrollDown if in_area(app.chat_area) => {
            app.widget.list_mut().scroll_down(WHEEL_STEP);
        }
        MouseEventKind::ScrollUp if in_area(app.chat_area) => {
            app.widget.list_mut().scroll_up(WHEEL_STEP);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if in_area(app.send_area) {
                app.widget.set_focus(Focus::Send);
                app.widget.submit();
            } else if in_area(app.input_area) {
                app.widget.set_focus(Focus::Input);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Answer, Transport};
    use crate::error::AskError;
    use crate::message::Origin;
    use crate::widget::ChatWidget;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Never answers; keeps the placeholder on screen
    struct SilentTransport;

    #[async_trait]
    impl Transport for SilentTransport {
        async fn ask(&self, _question: &str) -> Result<Answer, AskError> {
            std::future::pending().await
        }
    }

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let widget = ChatWidget::new(Arc::new(SilentTransport), tx);
        App::with_widget("http://test".to_string(), widget)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn user_messages(app: &App) -> Vec<String> {
        app.widget
            .list()
            .messages()
            .filter(|m| m.origin == Origin::User)
            .map(|m| m.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_enter_in_input_submits() {
        let mut app = test_app();
        type_text(&mut app, "hi there");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(user_messages(&app), vec!["hi there".to_string()]);
        assert_eq!(app.widget.input().text(), "");
        assert_eq!(app.widget.list().loading_count(), 1);
    }

    #[tokio::test]
    async fn test_enter_on_empty_input_does_nothing() {
        let mut app = test_app();
        type_text(&mut app, "  ");
        handle_event(&mut app, key(KeyCode::Enter));

        assert!(app.widget.list().is_empty());
        assert_eq!(app.widget.input().text(), "  ");
    }

    #[tokio::test]
    async fn test_send_button_click_submits() {
        let mut app = test_app();
        app.send_area = Some(Rect::new(40, 10, 10, 3));
        type_text(&mut app, "clicked");

        handle_event(&mut app, click(5, 5));
        assert!(app.widget.list().is_empty());

        handle_event(&mut app, click(42, 11));
        assert_eq!(user_messages(&app), vec!["clicked".to_string()]);
        assert_eq!(app.widget.focus(), Focus::Send);
    }

    #[tokio::test]
    async fn test_space_on_send_button_submits() {
        let mut app = test_app();
        type_text(&mut app, "via button");
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.widget.focus(), Focus::Send);

        handle_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(user_messages(&app), vec!["via button".to_string()]);
    }

    #[tokio::test]
    async fn test_rapid_double_enter_sends_twice() {
        let mut app = test_app();
        type_text(&mut app, "one");
        handle_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "two");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(user_messages(&app), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(app.widget.list().loading_count(), 2);
    }

    #[test]
    fn test_resize_leaves_conversation_untouched() {
        let mut app = test_app();
        type_text(&mut app, "draft");
        handle_event(&mut app, AppEvent::Resize);
        assert!(!app.should_quit);
        assert_eq!(app.widget.input().text(), "draft");
        assert!(app.widget.list().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit);

        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_editing_keys_reach_input() {
        let mut app = test_app();
        type_text(&mut app, "helo");
        handle_event(&mut app, key(KeyCode::Left));
        handle_event(&mut app, key(KeyCode::Char('l')));
        handle_event(&mut app, key(KeyCode::End));
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.widget.input().text(), "hell");
    }

    #[test]
    fn test_point_in_rect() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(point_in_rect(10, 10, rect));
        assert!(point_in_rect(14, 14, rect));
        assert!(!point_in_rect(15, 10, rect));
        assert!(!point_in_rect(9, 12, rect));
    }
}
