//! Terminal key events to held/pressed game keys.
//!
//! Terminals that support the kitty keyboard protocol report releases, so a
//! key is down from its press to its release. Everywhere else a key only ever
//! produces press events (auto-repeat included). There a key stays held long
//! enough for the OS repeat delay to pass, then for a short window after each
//! repeat.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::platform::Key;

/// Covers the usual auto-repeat delay between the first press and the first repeat
const INITIAL_HOLD: Duration = Duration::from_millis(550);
/// Covers the gap between two auto-repeats
const REPEAT_HOLD: Duration = Duration::from_millis(90);

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::LeftUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::LeftDown),
        KeyCode::Up => Some(Key::RightUp),
        KeyCode::Down => Some(Key::RightDown),
        KeyCode::Char(' ') => Some(Key::Reset),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    first: Instant,
    last: Instant,
}

impl Hold {
    fn window(&self) -> Duration {
        if self.last == self.first {
            INITIAL_HOLD
        } else {
            REPEAT_HOLD
        }
    }
}

#[derive(Debug)]
pub struct KeyTracker {
    release_events: bool,
    holds: HashMap<Key, Hold>,
    pressed: HashSet<Key>,
    quit: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            holds: HashMap::new(),
            pressed: HashSet::new(),
            quit: false,
        }
    }

    /// Forget edge presses; call before draining a new batch of events
    pub fn start_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn handle(&mut self, event: KeyEvent, now: Instant) {
        if event.kind != KeyEventKind::Release && is_quit(&event) {
            self.quit = true;
            return;
        }
        let Some(key) = map_key(event.code) else {
            return;
        };

        match event.kind {
            // Without release events an auto-repeat also arrives as a press
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.is_down(key, now) {
                    if let Some(hold) = self.holds.get_mut(&key) {
                        hold.last = now;
                    }
                } else {
                    if event.kind == KeyEventKind::Press {
                        self.pressed.insert(key);
                    }
                    self.holds.insert(key, Hold { first: now, last: now });
                }
            }
            KeyEventKind::Release => {
                self.holds.remove(&key);
            }
        }
    }

    pub fn is_down(&self, key: Key, now: Instant) -> bool {
        match self.holds.get(&key) {
            Some(_) if self.release_events => true,
            Some(hold) => now.saturating_duration_since(hold.last) < hold.window(),
            None => false,
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(map_key(KeyCode::Char('w')), Some(Key::LeftUp));
        assert_eq!(map_key(KeyCode::Char('S')), Some(Key::LeftDown));
        assert_eq!(map_key(KeyCode::Up), Some(Key::RightUp));
        assert_eq!(map_key(KeyCode::Down), Some(Key::RightDown));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Reset));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_release_events_hold_until_release() {
        let mut keys = KeyTracker::new(true);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Up, KeyEventKind::Press), t0);

        assert!(keys.is_down(Key::RightUp, t0 + Duration::from_secs(2)));

        keys.handle(event(KeyCode::Up, KeyEventKind::Release), t0 + Duration::from_secs(2));
        assert!(!keys.is_down(Key::RightUp, t0 + Duration::from_secs(2)));
    }

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn test_press_only_terminal_holds_through_repeat_delay() {
        let mut keys = KeyTracker::new(false);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Char('w'), KeyEventKind::Press), t0);

        // No repeat yet: still held while the OS waits to start repeating
        assert!(keys.is_down(Key::LeftUp, ms(t0, 50)));
        assert!(keys.is_down(Key::LeftUp, ms(t0, 500)));
        assert!(!keys.is_down(Key::LeftUp, ms(t0, 600)), "Tap expires");
    }

    #[test]
    fn test_press_only_terminal_repeats_keep_key_down() {
        let mut keys = KeyTracker::new(false);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Char('w'), KeyEventKind::Press), t0);
        for millis in [500, 530, 560] {
            keys.handle(event(KeyCode::Char('w'), KeyEventKind::Press), ms(t0, millis));
        }

        assert!(keys.is_down(Key::LeftUp, ms(t0, 600)));
        // Repeats stopped at 560: released within one repeat gap
        assert!(!keys.is_down(Key::LeftUp, ms(t0, 700)));
    }

    #[test]
    fn test_held_space_resets_once() {
        let mut keys = KeyTracker::new(false);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Char(' '), KeyEventKind::Press), t0);
        assert!(keys.is_pressed(Key::Reset));

        // First auto-repeat after a typical 500 ms delay, then steady repeats
        for millis in [500, 533, 566, 600] {
            keys.start_frame();
            keys.handle(event(KeyCode::Char(' '), KeyEventKind::Press), ms(t0, millis));
            assert!(!keys.is_pressed(Key::Reset), "Repeat at {millis} ms is not a press");
        }
    }

    #[test]
    fn test_press_after_release_is_new_press() {
        let mut keys = KeyTracker::new(false);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Char(' '), KeyEventKind::Press), t0);
        keys.start_frame();

        keys.handle(event(KeyCode::Char(' '), KeyEventKind::Press), ms(t0, 2000));
        assert!(keys.is_pressed(Key::Reset));
    }

    #[test]
    fn test_enhanced_repeat_event_is_not_a_press() {
        let mut keys = KeyTracker::new(true);
        let t0 = Instant::now();
        keys.handle(event(KeyCode::Char(' '), KeyEventKind::Press), t0);
        keys.start_frame();

        keys.handle(event(KeyCode::Char(' '), KeyEventKind::Repeat), ms(t0, 500));
        assert!(!keys.is_pressed(Key::Reset));
        assert!(keys.is_down(Key::Reset, ms(t0, 5000)));
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Esc, KeyCode::Char('q')] {
            let mut keys = KeyTracker::new(true);
            keys.handle(event(code, KeyEventKind::Press), Instant::now());
            assert!(keys.quit_requested(), "{code:?}");
        }

        let mut keys = KeyTracker::new(true);
        keys.handle(
            KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
            Instant::now(),
        );
        assert!(keys.quit_requested());

        let mut keys = KeyTracker::new(true);
        keys.handle(event(KeyCode::Char('c'), KeyEventKind::Press), Instant::now());
        assert!(!keys.quit_requested(), "Plain 'c' is not quit");
    }
}
