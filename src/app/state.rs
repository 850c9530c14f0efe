//! Viewer state management
//!
//! Tracks the selected variation, source, pane and presentation unit, and
//! maps keyboard events onto navigation actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::util::units::TimeUnit;

/// Panes of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// One source table at a time
    #[default]
    Sources,
    /// Averages across every source
    Averages,
    /// Line chart of the averages
    Chart,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Sources, Pane::Averages, Pane::Chart];

    pub fn title(&self) -> &'static str {
        match self {
            Pane::Sources => "Sources",
            Pane::Averages => "Averages",
            Pane::Chart => "Chart",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Previous source (arrow up, k)
    Up,
    /// Next source (arrow down, j)
    Down,
    /// Previous variation (arrow left, h)
    Left,
    /// Next variation (arrow right, l)
    Right,
    /// Next pane (Tab)
    Next,
    /// Previous pane (Shift+Tab)
    Previous,
    /// Switch to the next presentation unit (u)
    CycleUnit,
    /// Quit viewer (q, Q, Esc, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Current selection of the viewer
#[derive(Debug, Clone)]
pub struct ViewState {
    variation: usize,
    variation_count: usize,
    source: usize,
    source_count: usize,
    pane: Pane,
    unit: TimeUnit,
    should_quit: bool,
}

impl ViewState {
    pub fn new(variation_count: usize, source_count: usize, unit: TimeUnit) -> Self {
        Self {
            variation: 0,
            variation_count,
            source: 0,
            source_count,
            pane: Pane::default(),
            unit,
            should_quit: false,
        }
    }

    /// Index of the selected variation
    pub fn variation(&self) -> usize {
        self.variation
    }

    /// Index of the selected source
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn step(current: usize, count: usize, forward: bool) -> usize {
        if count == 0 {
            0
        } else if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        }
    }

    /// Apply a navigation action
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.should_quit = true,
            NavigationAction::Left => {
                self.variation = Self::step(self.variation, self.variation_count, false)
            }
            NavigationAction::Right => {
                self.variation = Self::step(self.variation, self.variation_count, true)
            }
            NavigationAction::Up => self.source = Self::step(self.source, self.source_count, false),
            NavigationAction::Down => self.source = Self::step(self.source, self.source_count, true),
            NavigationAction::Next => self.pane = self.pane.next(),
            NavigationAction::Previous => self.pane = self.pane.previous(),
            NavigationAction::CycleUnit => self.unit = self.unit.next(),
            NavigationAction::None => {}
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }
            KeyCode::BackTab => NavigationAction::Previous,

            KeyCode::Char('u') | KeyCode::Char('U') => NavigationAction::CycleUnit,

            _ => NavigationAction::None,
        }
    }

    /// Handle a keyboard event and update state accordingly
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let action = Self::key_to_navigation(key);
        self.handle_navigation(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::new(6, 2, TimeUnit::Millisecond);
        assert_eq!(state.variation(), 0);
        assert_eq!(state.source(), 0);
        assert_eq!(state.pane(), Pane::Sources);
        assert_eq!(state.unit(), TimeUnit::Millisecond);
        assert!(!state.should_quit());
    }

    #[test]
    fn test_variation_wraps() {
        let mut state = ViewState::new(3, 1, TimeUnit::Nanosecond);
        state.handle_navigation(NavigationAction::Left);
        assert_eq!(state.variation(), 2);
        state.handle_navigation(NavigationAction::Right);
        assert_eq!(state.variation(), 0);
    }

    #[test]
    fn test_source_navigation_without_sources() {
        let mut state = ViewState::new(1, 0, TimeUnit::Nanosecond);
        state.handle_navigation(NavigationAction::Down);
        assert_eq!(state.source(), 0);
        state.handle_navigation(NavigationAction::Up);
        assert_eq!(state.source(), 0);
    }

    #[test]
    fn test_pane_cycle() {
        let mut state = ViewState::new(1, 1, TimeUnit::Nanosecond);
        state.handle_navigation(NavigationAction::Next);
        assert_eq!(state.pane(), Pane::Averages);
        state.handle_navigation(NavigationAction::Next);
        assert_eq!(state.pane(), Pane::Chart);
        state.handle_navigation(NavigationAction::Next);
        assert_eq!(state.pane(), Pane::Sources);
        state.handle_navigation(NavigationAction::Previous);
        assert_eq!(state.pane(), Pane::Chart);
    }

    #[test]
    fn test_unit_cycle() {
        let mut state = ViewState::new(1, 1, TimeUnit::Hour);
        state.handle_key_event(key(KeyCode::Char('u')));
        assert_eq!(state.unit(), TimeUnit::Nanosecond);
    }

    #[test]
    fn test_key_to_navigation() {
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Char('q'))), NavigationAction::Quit);
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Esc)), NavigationAction::Quit);
        assert_eq!(
            ViewState::key_to_navigation(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Char('c'))), NavigationAction::None);
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Char('l'))), NavigationAction::Right);
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Up)), NavigationAction::Up);
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::Tab)), NavigationAction::Next);
        assert_eq!(
            ViewState::key_to_navigation(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
        assert_eq!(ViewState::key_to_navigation(key(KeyCode::BackTab)), NavigationAction::Previous);
    }

    #[test]
    fn test_quit_key() {
        let mut state = ViewState::new(1, 1, TimeUnit::Nanosecond);
        state.handle_key_event(key(KeyCode::Char('Q')));
        assert!(state.should_quit());
    }
}
