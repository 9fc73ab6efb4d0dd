//! Controller
//!
//! Owns the decoder, the post model, the view state machine and the button
//! debouncer, and runs one cooperative step of the main loop at a time:
//! button, then incoming bytes, then the refresh timer. The caller performs
//! the resulting I/O (sending requests, redrawing).

use heapless::Vec;
use postboard_hal::Level;
use postboard_protocol::{FrameError, LineDecoder, Message, Request};

use crate::config::ViewConfig;
use crate::debounce::ButtonDebouncer;
use crate::layout::{layout, LayoutResult};
use crate::model::{PostModel, PostSummary};
use crate::state::{Mode, Reaction, ScrollState, ViewEvent, ViewStateMachine};

/// Result of one poll step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Requests to send, in order
    pub requests: Vec<Request, 2>,
    /// The screen must be redrawn
    pub redraw: bool,
    /// Lines dropped by the decoder
    pub frame_errors: u16,
    /// Most recent decoder error
    pub last_error: Option<FrameError>,
}

impl Outcome {
    fn absorb(&mut self, reaction: Reaction) {
        if let Some(request) = reaction.request {
            // One slot each for the button and the timer
            let _ = self.requests.push(request);
        }
        self.redraw |= reaction.redraw;
    }

    fn record_error(&mut self, error: FrameError) {
        self.frame_errors = self.frame_errors.saturating_add(1);
        self.last_error = Some(error);
    }

    /// Check if the step requires no action
    pub fn is_idle(&self) -> bool {
        self.requests.is_empty() && !self.redraw && self.frame_errors == 0
    }
}

/// Footer hint of the full-text view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollHint {
    /// More text below; progress through the scroll range
    Scroll { percent: u8 },
    /// At the end; the next press returns to the summary
    Back,
}

impl ScrollHint {
    /// Hint for a scroll state, `None` if the text fits on screen
    pub fn from_scroll(scroll: &ScrollState) -> Option<Self> {
        let max = scroll.max_offset();
        if max <= 0 {
            None
        } else if scroll.offset() < max {
            let percent = (scroll.offset().max(0) as i64 * 100 / max as i64) as u8;
            Some(ScrollHint::Scroll { percent })
        } else {
            Some(ScrollHint::Back)
        }
    }
}

/// Everything needed to draw the full-text view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullTextScreen<'a> {
    pub subreddit: &'a str,
    /// Lines inside the viewport, offsets in content space
    pub lines: LayoutResult<'a>,
    pub offset: i32,
    pub max_offset: i32,
    pub content_height: i32,
    pub hint: Option<ScrollHint>,
}

/// What the display should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen<'a> {
    Summary(&'a PostSummary),
    FullText(FullTextScreen<'a>),
}

/// Post viewer controller
#[derive(Debug)]
pub struct Controller {
    config: ViewConfig,
    decoder: LineDecoder,
    model: PostModel,
    view: ViewStateMachine,
    button: ButtonDebouncer,
}

impl Controller {
    /// Create a controller in summary mode with an empty model
    pub fn new(config: ViewConfig) -> Self {
        Self {
            decoder: LineDecoder::new(),
            model: PostModel::new(),
            view: ViewStateMachine::new(&config),
            button: ButtonDebouncer::new(config.debounce_ms),
            config,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.view.mode()
    }

    pub fn model(&self) -> &PostModel {
        &self.model
    }

    pub fn scroll(&self) -> &ScrollState {
        self.view.scroll()
    }

    /// Startup request for the first summary
    pub fn boot(&mut self, now_ms: u32) -> Request {
        self.view.start(now_ms)
    }

    /// Feed one raw button sample
    fn sample_button(&mut self, level: Level, now_ms: u32, outcome: &mut Outcome) {
        if self.button.sample(level, now_ms) {
            outcome.absorb(self.view.handle(ViewEvent::ButtonPress { now_ms }));
        }
    }

    /// Decode received bytes and apply every complete message
    fn receive(&mut self, bytes: &[u8], outcome: &mut Outcome) {
        let model = &mut self.model;
        let view = &mut self.view;
        self.decoder.feed_bytes(bytes, |frame| match frame {
            Ok(message) => {
                let event = match message {
                    Message::Summary(_) => ViewEvent::SummaryReceived,
                    Message::FullText(_) => ViewEvent::FullTextReceived,
                };
                model.apply(message);
                outcome.absorb(view.handle(event));
            }
            Err(error) => outcome.record_error(error),
        });
    }

    /// Advance the refresh timer
    fn tick(&mut self, now_ms: u32, outcome: &mut Outcome) {
        outcome.absorb(self.view.handle(ViewEvent::Tick { now_ms }));
    }

    /// Run one loop step: button, received bytes, timer
    ///
    /// `bytes` is everything drained from the link since the previous step;
    /// it may hold several messages or end mid-line.
    pub fn poll(&mut self, level: Level, bytes: &[u8], now_ms: u32) -> Outcome {
        let mut outcome = Outcome::default();
        self.sample_button(level, now_ms, &mut outcome);
        self.receive(bytes, &mut outcome);
        self.tick(now_ms, &mut outcome);
        outcome
    }

    /// Describe the current screen
    ///
    /// In full-text mode this computes the scroll bound on first use after
    /// new text arrives and clamps the offset, so it takes `&mut self`.
    pub fn screen(&mut self) -> Screen<'_> {
        match self.view.mode() {
            Mode::Summary => Screen::Summary(self.model.summary()),
            Mode::FullText => {
                let config = &self.config;
                let text = self.model.display_text();
                let max_offset =
                    self.view
                        .ensure_layout(text, config.text_size, config.visible_height());
                let scroll = self.view.scroll();
                let offset = scroll.offset();
                let (top, bottom) = config.viewport(offset);

                Screen::FullText(FullTextScreen {
                    subreddit: &self.model.summary().subreddit,
                    lines: layout(text, config.text_size, top, bottom),
                    offset,
                    max_offset,
                    content_height: scroll.content_height().unwrap_or(0),
                    hint: ScrollHint::from_scroll(scroll),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{wrap, SizeProfile, MAX_LAYOUT_LINES};
    use std::format;
    use std::string::String;

    const LONG_BODY_WORDS: usize = 60;

    fn long_plaintext() -> String {
        let mut line = String::from("PLAINTEXT:");
        for i in 0..LONG_BODY_WORDS {
            line.push_str(&format!("word{} ", i));
            if i == 20 {
                line.push_str("[NL] ");
            }
        }
        line.push('\n');
        line
    }

    struct Harness {
        controller: Controller,
        now: u32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                controller: Controller::new(ViewConfig::default()),
                now: 1_000,
            }
        }

        /// Press and release, well outside the debounce window
        fn press(&mut self) -> Outcome {
            self.now += 100;
            let mut outcome = self.controller.poll(Level::Low, &[], self.now);
            let release = self.controller.poll(Level::High, &[], self.now + 10);
            outcome.requests.extend(release.requests);
            outcome.redraw |= release.redraw;
            outcome
        }

        fn receive(&mut self, bytes: &[u8]) -> Outcome {
            self.now += 10;
            self.controller.poll(Level::High, bytes, self.now)
        }
    }

    #[test]
    fn test_boot_requests_latest() {
        let mut harness = Harness::new();
        assert_eq!(harness.controller.boot(0), Request::Latest);
        assert_eq!(harness.controller.mode(), Mode::Summary);
    }

    #[test]
    fn test_summary_message_updates_model() {
        let mut harness = Harness::new();
        let outcome = harness.receive(b"LATEST:rust|Hello world|alice|42\n");
        assert!(outcome.redraw);
        assert!(outcome.requests.is_empty());
        let summary = harness.controller.model().summary();
        assert_eq!(summary.subreddit.as_str(), "rust");
        assert_eq!(summary.title.as_str(), "Hello world");
        assert_eq!(summary.author.as_str(), "alice");
        assert_eq!(summary.score, 42);
        assert!(matches!(harness.controller.screen(), Screen::Summary(s) if s.score == 42));
    }

    #[test]
    fn test_press_requests_plaintext_once() {
        let mut harness = Harness::new();
        harness.controller.boot(harness.now);
        let outcome = harness.press();
        assert_eq!(outcome.requests.as_slice(), &[Request::PlainText]);
        assert!(!outcome.redraw);
        assert_eq!(harness.controller.mode(), Mode::FullText);
    }

    #[test]
    fn test_full_scroll_cycle() {
        let mut harness = Harness::new();
        harness.controller.boot(harness.now);
        harness.receive(b"LATEST:rust|A long post|bob|-3\n");
        harness.press();

        let outcome = harness.receive(long_plaintext().as_bytes());
        assert!(outcome.redraw);

        let max = match harness.controller.screen() {
            Screen::FullText(screen) => {
                assert_eq!(screen.subreddit, "rust");
                assert_eq!(screen.offset, 0);
                assert!(!screen.lines.is_empty());
                assert_eq!(screen.lines[0].y, 0);
                assert_eq!(screen.hint, Some(ScrollHint::Scroll { percent: 0 }));
                screen.max_offset
            }
            Screen::Summary(_) => panic!("expected full text"),
        };
        assert!(max > 0);

        let mut presses = 0;
        while !harness.controller.scroll().at_end() {
            let outcome = harness.press();
            assert!(outcome.redraw);
            assert!(outcome.requests.is_empty());
            assert!(harness.controller.scroll().offset() <= max);
            presses += 1;
            assert!(presses < 1_000);
        }
        match harness.controller.screen() {
            Screen::FullText(screen) => assert_eq!(screen.hint, Some(ScrollHint::Back)),
            Screen::Summary(_) => panic!("expected full text"),
        }

        let outcome = harness.press();
        assert_eq!(outcome.requests.as_slice(), &[Request::Latest]);
        assert_eq!(harness.controller.mode(), Mode::Summary);
        assert_eq!(harness.controller.scroll().offset(), 0);
    }

    #[test]
    fn test_short_text_has_no_hint() {
        let mut harness = Harness::new();
        harness.press();
        harness.receive(b"PLAINTEXT:Short body\n");
        match harness.controller.screen() {
            Screen::FullText(screen) => {
                assert_eq!(screen.max_offset, 0);
                assert_eq!(screen.hint, None);
                assert_eq!(screen.lines.len(), 1);
                assert_eq!(screen.lines[0].text, "Short body");
            }
            Screen::Summary(_) => panic!("expected full text"),
        };
    }

    #[test]
    fn test_full_text_falls_back_to_title() {
        let mut harness = Harness::new();
        harness.receive(b"LATEST:rust|Just a title|bob|1\n");
        harness.press();
        match harness.controller.screen() {
            Screen::FullText(screen) => assert_eq!(screen.lines[0].text, "Just a title"),
            Screen::Summary(_) => panic!("expected full text"),
        };
    }

    #[test]
    fn test_refresh_only_in_summary_mode() {
        let mut harness = Harness::new();
        harness.controller.boot(0);

        let outcome = harness.controller.poll(Level::High, &[], 30_000);
        assert_eq!(outcome.requests.as_slice(), &[Request::Latest]);
        let outcome = harness.controller.poll(Level::High, &[], 30_010);
        assert!(outcome.requests.is_empty());

        harness.now = 31_000;
        harness.press();
        let outcome = harness.controller.poll(Level::High, &[], 120_000);
        assert!(outcome.requests.is_empty());
    }

    #[test]
    fn test_summary_redraws_only_in_summary_mode() {
        let mut harness = Harness::new();
        assert!(harness.receive(b"LATEST:a|b|c|1\n").redraw);
        harness.press();
        let outcome = harness.receive(b"LATEST:x|y|z|2\n");
        assert!(!outcome.redraw);
        // Model still updated
        assert_eq!(harness.controller.model().summary().subreddit.as_str(), "x");
        assert_eq!(harness.controller.mode(), Mode::FullText);
    }

    #[test]
    fn test_malformed_line_counted() {
        let mut harness = Harness::new();
        harness.receive(b"LATEST:rust|Title|alice|5\n");
        let outcome = harness.receive(b"LATEST:missing fields\n");
        assert_eq!(outcome.frame_errors, 1);
        assert_eq!(outcome.last_error, Some(FrameError::MalformedFrame));
        assert!(!outcome.redraw);
        assert_eq!(harness.controller.model().summary().title.as_str(), "Title");
    }

    #[test]
    fn test_message_split_across_polls() {
        let mut harness = Harness::new();
        assert!(harness.receive(b"LATEST:rust|Ti").is_idle());
        let outcome = harness.receive(b"tle|alice|5\n");
        assert!(outcome.redraw);
        assert_eq!(harness.controller.model().summary().title.as_str(), "Title");
    }

    #[test]
    fn test_press_and_batch_in_one_step() {
        let mut harness = Harness::new();
        harness.controller.boot(harness.now);
        harness.now += 100;
        let outcome = harness.controller.poll(
            Level::Low,
            b"LATEST:rust|First|alice|1\nLATEST:rust|Second|bob|2\nPLAINTEXT:Bo",
            harness.now,
        );
        // The press is handled before the bytes, so the summaries arrive in
        // full-text mode and the partial body waits for the next step
        assert_eq!(outcome.requests.as_slice(), &[Request::PlainText]);
        assert!(!outcome.redraw);
        assert_eq!(harness.controller.model().summary().title.as_str(), "Second");

        let outcome = harness.receive(b"dy text\n");
        assert!(outcome.redraw);
        match harness.controller.screen() {
            Screen::FullText(screen) => assert_eq!(screen.lines[0].text, "Body text"),
            Screen::Summary(_) => panic!("expected full text"),
        };
    }

    #[test]
    fn test_every_visible_line_materialised_at_capacity() {
        let config = ViewConfig {
            screen_height: 436,
            text_size: SizeProfile::Small,
            ..ViewConfig::DEFAULT
        };
        assert!(config.fits_layout());
        assert_eq!(config.max_visible_lines(), MAX_LAYOUT_LINES);

        let mut harness = Harness::new();
        harness.controller = Controller::new(config);
        harness.press();
        let mut body = String::from("PLAINTEXT:");
        for i in 0..400 {
            body.push_str(&format!("w{} ", i));
        }
        body.push('\n');
        harness.receive(body.as_bytes());

        let (top, bottom) = config.viewport(0);
        let expected = wrap(&body["PLAINTEXT:".len()..body.len() - 1], config.text_size)
            .filter(|line| line.y >= top && line.y < bottom)
            .count();
        match harness.controller.screen() {
            Screen::FullText(screen) => {
                assert_eq!(expected, MAX_LAYOUT_LINES);
                assert_eq!(screen.lines.len(), expected);
            }
            Screen::Summary(_) => panic!("expected full text"),
        };
    }

    #[test]
    fn test_scroll_bound_known_after_first_render() {
        let mut harness = Harness::new();
        harness.press();
        harness.receive(long_plaintext().as_bytes());
        assert_eq!(harness.controller.scroll().content_height(), None);
        assert_eq!(ScrollHint::from_scroll(harness.controller.scroll()), None);

        let _ = harness.controller.screen();
        harness.press();
        let scroll = harness.controller.scroll();
        let expected = (scroll.offset() * 100 / scroll.max_offset()) as u8;
        assert_eq!(
            ScrollHint::from_scroll(scroll),
            Some(ScrollHint::Scroll { percent: expected })
        );
    }
}
