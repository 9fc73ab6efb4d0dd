//! State machine definition
//!
//! Mode, scroll position and refresh timer are a function of the previous
//! state and one event. Requests to the producer are returned, never sent
//! from here.

use postboard_protocol::Request;

use super::events::ViewEvent;
use crate::config::ViewConfig;
use crate::layout::{estimate_height, SizeProfile};

/// Viewing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Post summary, refreshed periodically
    Summary,
    /// Scrollable full text of the post
    FullText,
}

/// Scroll position of the full-text view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    offset: i32,
    max_offset: i32,
    content_height: Option<i32>,
}

impl ScrollState {
    /// Current scroll offset
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Largest offset, valid once the content height is known
    pub fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Estimated content height, `None` until the next layout pass
    pub fn content_height(&self) -> Option<i32> {
        self.content_height
    }

    /// Check if the view is scrolled to the end
    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset
    }

    /// Back to the top and forget the content height
    fn invalidate(&mut self) {
        *self = Self::default();
    }
}

/// What the caller must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reaction {
    /// Request to send to the producer
    pub request: Option<Request>,
    /// The screen is stale
    pub redraw: bool,
}

impl Reaction {
    const NONE: Self = Self {
        request: None,
        redraw: false,
    };

    const REDRAW: Self = Self {
        request: None,
        redraw: true,
    };

    const fn request(request: Request) -> Self {
        Self {
            request: Some(request),
            redraw: false,
        }
    }
}

/// View state machine
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    mode: Mode,
    scroll: ScrollState,
    /// When the last summary request went out (ms)
    last_request_ms: u32,
    refresh_interval_ms: u32,
    scroll_step: i32,
}

impl ViewStateMachine {
    /// Create a machine in summary mode
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            mode: Mode::Summary,
            scroll: ScrollState::default(),
            last_request_ms: 0,
            refresh_interval_ms: config.refresh_interval_ms,
            scroll_step: config.scroll_step,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current scroll state
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Initial summary request; starts the refresh timer
    pub fn start(&mut self, now_ms: u32) -> Request {
        self.last_request_ms = now_ms;
        Request::Latest
    }

    /// Process an event
    pub fn handle(&mut self, event: ViewEvent) -> Reaction {
        use ViewEvent::*;

        match (self.mode, event) {
            (Mode::Summary, ButtonPress { .. }) => {
                self.mode = Mode::FullText;
                self.scroll.invalidate();
                Reaction::request(Request::PlainText)
            }
            (Mode::Summary, Tick { now_ms }) => {
                if now_ms.wrapping_sub(self.last_request_ms) >= self.refresh_interval_ms {
                    self.last_request_ms = now_ms;
                    Reaction::request(Request::Latest)
                } else {
                    Reaction::NONE
                }
            }
            (Mode::FullText, ButtonPress { now_ms }) => {
                if self.scroll.at_end() {
                    self.mode = Mode::Summary;
                    self.scroll.offset = 0;
                    self.last_request_ms = now_ms;
                    Reaction::request(Request::Latest)
                } else {
                    self.scroll.offset =
                        (self.scroll.offset + self.scroll_step).min(self.scroll.max_offset);
                    Reaction::REDRAW
                }
            }
            // No refresh while reading
            (Mode::FullText, Tick { .. }) => Reaction::NONE,

            (mode, SummaryReceived) => Reaction {
                request: None,
                redraw: mode == Mode::Summary,
            },
            (_, FullTextReceived) => {
                self.scroll.invalidate();
                Reaction::REDRAW
            }
        }
    }

    /// Compute the scroll bound if it is not cached, and clamp the offset
    ///
    /// Called on every full-text render. Returns the maximum offset.
    pub fn ensure_layout(&mut self, text: &str, profile: SizeProfile, visible_height: i32) -> i32 {
        if self.scroll.content_height.is_none() {
            let height = estimate_height(text, profile);
            self.scroll.content_height = Some(height);
            self.scroll.max_offset = (height - visible_height).max(0);
        }
        self.scroll.offset = self.scroll.offset.clamp(0, self.scroll.max_offset);
        self.scroll.max_offset
    }
}
