//! The rendered message list
//!
//! `MessageList` is the single owner of the conversation: messages and
//! loading placeholders live here in display order, together with the
//! scroll state of the pane that shows them.

use unicode_width::UnicodeWidthChar;

use crate::message::Message;

/// Fallbacks used before the first render reports the real pane size
const DEFAULT_WRAP_WIDTH: u16 = 50;
const DEFAULT_VIEWPORT_HEIGHT: u16 = 20;

/// Rows taken by a loading placeholder: label, dots, blank separator
const LOADING_LINES: usize = 3;

/// Handle to a loading placeholder, returned by [`MessageList::show_loading`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Message(Message),
    Loading(PendingId),
}

/// Scroll positions are row indices into the whole list, so they are
/// `usize`; only the rows in view are handed to the terminal.
#[derive(Debug, Default)]
pub struct MessageList {
    items: Vec<Item>,
    next_pending: u64,
    // Rows of all items at the current wrap width
    line_count: usize,
    scroll: usize,
    viewport_width: u16,
    viewport_height: u16,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and bring it into view.
    pub fn add_message(&mut self, message: Message) {
        let item = Item::Message(message);
        self.line_count += item_lines(&item, self.wrap_width());
        self.items.push(item);
        self.scroll_to_bottom();
    }

    /// Append an empty placeholder item and bring it into view.
    pub fn show_loading(&mut self) -> PendingId {
        let id = PendingId(self.next_pending);
        self.next_pending += 1;
        self.items.push(Item::Loading(id));
        self.line_count += LOADING_LINES;
        self.scroll_to_bottom();
        id
    }

    /// Remove a placeholder. Returns false if it was already gone.
    pub fn remove_loading(&mut self, id: PendingId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| *item != Item::Loading(id));
        let removed = self.items.len() != before;
        if removed {
            self.line_count -= LOADING_LINES;
            self.scroll = self.scroll.min(self.max_scroll());
        }
        removed
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.items.iter().filter_map(|item| match item {
            Item::Message(message) => Some(message),
            Item::Loading(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn loading_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, Item::Loading(_)))
            .count()
    }

    // Scrolling

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Record the inner size of the pane. Called on every render.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        let was_at_bottom = self.scroll >= self.max_scroll();
        let rewrap = width != self.viewport_width;
        self.viewport_width = width;
        self.viewport_height = height;
        if rewrap {
            let width = self.wrap_width();
            self.line_count = self.items.iter().map(|item| item_lines(item, width)).sum();
        }
        if was_at_bottom {
            self.scroll_to_bottom();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    pub fn wrap_width(&self) -> u16 {
        if self.viewport_width > 0 {
            self.viewport_width
        } else {
            DEFAULT_WRAP_WIDTH
        }
    }

    fn visible_height(&self) -> usize {
        if self.viewport_height > 0 {
            usize::from(self.viewport_height)
        } else {
            usize::from(DEFAULT_VIEWPORT_HEIGHT)
        }
    }

    /// Number of terminal rows the whole list occupies at the current width
    pub fn total_lines(&self) -> usize {
        self.line_count
    }

    pub fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(self.visible_height())
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn page_height(&self) -> usize {
        self.visible_height()
    }

    /// Items overlapping the visible rows, with the number of rows of the
    /// first one that sit above the viewport.
    pub fn visible_items(&self) -> (usize, &[Item]) {
        let width = self.wrap_width();
        let bottom = self.scroll + self.visible_height();

        let mut row = 0;
        let mut first = self.items.len();
        let mut skip = 0;
        for (idx, item) in self.items.iter().enumerate() {
            let height = item_lines(item, width);
            if row + height > self.scroll {
                first = idx;
                skip = self.scroll - row;
                break;
            }
            row += height;
        }

        let mut last = first;
        while last < self.items.len() && row < bottom {
            row += item_lines(&self.items[last], width);
            last += 1;
        }

        (skip, &self.items[first..last])
    }
}

/// Rows taken by one item: a label row, its wrapped body, a blank separator.
pub fn item_lines(item: &Item, width: u16) -> usize {
    match item {
        Item::Message(message) => 2 + wrap_text(&message.text, width).len(),
        Item::Loading(_) => LOADING_LINES,
    }
}

/// Split text into rows no wider than `width` terminal columns, keeping
/// explicit line breaks. An empty line still occupies one row. A character
/// wider than the whole row gets a row of its own.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut row = String::new();
        let mut row_width = 0;
        for c in line.chars() {
            let char_width = c.width().unwrap_or(0);
            if row_width + char_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += char_width;
        }
        rows.push(row);
    }

    rows
}
