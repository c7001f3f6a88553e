use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::client::AskClient;
use crate::config::Config;
use crate::tui::AppEvent;
use crate::widget::ChatWidget;

pub struct App {
    pub should_quit: bool,
    pub server: String,
    pub widget: ChatWidget,

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub input_area: Option<Rect>,
    pub send_area: Option<Rect>,
}

impl App {
    pub fn new(config: &Config, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let client = AskClient::new(&config.server);
        tracing::info!(url = client.url(), single_in_flight = config.single_in_flight, "chat widget ready");

        let widget = ChatWidget::new(Arc::new(client), events)
            .with_single_in_flight(config.single_in_flight);

        Self::with_widget(config.server.clone(), widget)
    }

    pub fn with_widget(server: String, widget: ChatWidget) -> Self {
        Self {
            should_quit: false,
            server,
            widget,
            chat_area: None,
            input_area: None,
            send_area: None,
        }
    }
}
