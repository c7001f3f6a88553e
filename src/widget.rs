//! The chat widget: input, message list and the request lifecycle.
//!
//! All state here is owned by the UI task. Requests run in spawned tasks
//! that only hold the transport and a channel sender; their outcome comes
//! back as an [`AppEvent::Reply`] and is applied with [`ChatWidget::resolve`].

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::{Answer, Transport};
use crate::error::AskError;
use crate::input::InputBuffer;
use crate::list::{MessageList, PendingId};
use crate::message::Message;
use crate::tui::AppEvent;

/// Outcome of one request, tagged with the placeholder it replaces
#[derive(Debug)]
pub struct Reply {
    pub pending: PendingId,
    pub result: Result<Answer, AskError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Send,
}

pub struct ChatWidget {
    list: MessageList,
    input: InputBuffer,
    focus: Focus,
    transport: Arc<dyn Transport>,
    events: mpsc::UnboundedSender<AppEvent>,
    in_flight: usize,
    single_in_flight: bool,
    animation_frame: u8, // 0-2 for the loading dots
}

impl ChatWidget {
    pub fn new(transport: Arc<dyn Transport>, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            list: MessageList::new(),
            input: InputBuffer::new(),
            focus: Focus::Input,
            transport,
            events,
            in_flight: 0,
            single_in_flight: false,
            animation_frame: 0,
        }
    }

    /// Refuse new submissions while a request is outstanding.
    pub fn with_single_in_flight(mut self, enabled: bool) -> Self {
        self.single_in_flight = enabled;
        self
    }

    pub fn list(&self) -> &MessageList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut MessageList {
        &mut self.list
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Send,
            Focus::Send => Focus::Input,
        };
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn animation_frame(&self) -> u8 {
        self.animation_frame
    }

    /// Send the typed question.
    ///
    /// Returns the placeholder handle for the request, or None when the
    /// input was blank (or a request is pending and the single in-flight
    /// guard is on). A no-op leaves the input untouched.
    pub fn submit(&mut self) -> Option<PendingId> {
        if self.single_in_flight && self.in_flight > 0 {
            tracing::debug!("submission ignored, request already pending");
            return None;
        }

        let question = self.input.trimmed()?.to_string();

        self.list.add_message(Message::user(question.clone()));
        self.input.clear();
        let pending = self.list.show_loading();
        self.in_flight += 1;

        tracing::info!(in_flight = self.in_flight, "question submitted");

        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = transport.ask(&question).await;
            // Receiver is gone once the UI has shut down
            let _ = events.send(AppEvent::Reply(Reply { pending, result }));
        });

        Some(pending)
    }

    /// Replace a placeholder with the answer, or with the fallback message
    /// if the request failed.
    pub fn resolve(&mut self, reply: Reply) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.list.remove_loading(reply.pending);

        match reply.result {
            Ok(answer) => self.list.add_message(Message::bot(answer.answer)),
            Err(err) => {
                tracing::error!(error = %err, "answer unavailable");
                self.list.add_message(Message::fallback());
            }
        }
    }

    /// Advance the loading animation (called by Tick event)
    pub fn tick(&mut self) {
        if self.list.loading_count() > 0 {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
