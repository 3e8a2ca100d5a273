use crate::state::{State, TrendsPanel, View};
use crate::error::{AppError, AppResult};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    /// Render cadence.
    Tick,
    /// One second of the work timer passed.
    TimerTick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => (),
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, tx }
    }

    /// Sender into the same channel, for other event producers.
    ///
    pub fn sender(&self) -> mpsc::Sender<Event<KeyEvent>> {
        self.tx.clone()
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> AppResult<bool> {
        let event = self
            .rx
            .recv()
            .map_err(|e| AppError::Terminal(format!("event channel closed: {}", e)))?;
        match event {
            Event::Input(key) => return Ok(handle_key(state, key)),
            Event::Tick => {
                if state.is_matching() || state.is_scraping() {
                    state.advance_spinner_index();
                }
            }
            Event::TimerTick => {
                state.tick_timer();
            }
        }
        Ok(true)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    if state.is_form_open() {
        handle_form_key(state, key);
        return true;
    }
    if state.has_delete_confirmation() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.cancel_delete_confirmation();
            }
            _ => debug!("Awaiting delete confirmation, skipping '{:?}'...", key),
        }
        return true;
    }

    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Tab => {
            state.next_view();
        }
        KeyCode::BackTab => {
            state.previous_view();
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(view) = View::from_digit(c) {
                state.select_view(view);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_index();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_index();
        }
        KeyCode::Char('l') => {
            state.toggle_log();
        }
        KeyCode::Esc => {
            state.clear_status();
        }
        _ => handle_view_key(state, key),
    }
    true
}

fn handle_form_key(state: &mut State, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.close_form();
        }
        KeyCode::Enter => {
            state.submit_form();
        }
        KeyCode::Tab | KeyCode::Down => {
            state.form_next_field();
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.form_previous_field();
        }
        KeyCode::Backspace => {
            state.form_pop_char();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.form_push_char(c);
        }
        _ => debug!("Skipping processing of form event '{:?}'...", key),
    }
}

fn handle_view_key(state: &mut State, key: KeyEvent) {
    match (*state.current_view(), key.code) {
        (View::Projects, KeyCode::Char('s')) => {
            state.start_timer();
        }
        (View::Projects, KeyCode::Char('p')) => {
            state.pause_timer();
        }
        (View::Projects, KeyCode::Char('r')) => {
            state.resume_timer();
        }
        (View::Projects, KeyCode::Char('x')) => {
            state.stop_timer();
        }
        (View::Projects, KeyCode::Char(']')) => {
            state.next_stage();
        }
        (View::Projects, KeyCode::Char('[')) => {
            state.previous_stage();
        }
        (View::Materials, KeyCode::Char('+')) | (View::Materials, KeyCode::Char('=')) => {
            state.increase_stock();
        }
        (View::Materials, KeyCode::Char('-')) => {
            state.decrease_stock();
        }
        (View::Projects | View::Materials | View::Items, KeyCode::Char('n')) => {
            state.open_new_form();
        }
        (View::Projects | View::Materials | View::Items, KeyCode::Char('e')) => {
            state.open_edit_form();
        }
        (View::Projects | View::Materials | View::Items, KeyCode::Char('d')) => {
            state.request_delete();
        }
        (View::Trends, KeyCode::Char('m')) => {
            state.request_trend_matches();
        }
        (View::Trends, KeyCode::Char('w')) => {
            state.request_scrape();
        }
        (View::Trends, KeyCode::Left) | (View::Trends, KeyCode::Right) => {
            state.toggle_trends_panel();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TimerPhase;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut State, text: &str) {
        for c in text.chars() {
            assert!(handle_key(state, press(KeyCode::Char(c))));
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = State::default();
        assert!(!handle_key(&mut state, press(KeyCode::Char('q'))));
        assert!(!handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn digits_and_tab_switch_views() {
        let mut state = State::default();
        handle_key(&mut state, press(KeyCode::Char('3')));
        assert_eq!(*state.current_view(), View::Items);
        handle_key(&mut state, press(KeyCode::Tab));
        assert_eq!(*state.current_view(), View::Trends);
        handle_key(&mut state, press(KeyCode::BackTab));
        assert_eq!(*state.current_view(), View::Items);
    }

    #[test]
    fn form_captures_quit_key() {
        let mut state = State::default();
        handle_key(&mut state, press(KeyCode::Char('2')));
        handle_key(&mut state, press(KeyCode::Char('n')));
        assert!(state.is_form_open());
        type_str(&mut state, "quilt");
        assert_eq!(state.get_form().unwrap().fields[0].value, "quilt");
        handle_key(&mut state, press(KeyCode::Esc));
        assert!(!state.is_form_open());
    }

    #[test]
    fn form_submits_on_enter() {
        let mut state = State::default();
        handle_key(&mut state, press(KeyCode::Char('2')));
        handle_key(&mut state, press(KeyCode::Char('n')));
        type_str(&mut state, "Test Yarn");
        handle_key(&mut state, press(KeyCode::Down));
        type_str(&mut state, "50");
        handle_key(&mut state, press(KeyCode::Enter));
        assert!(!state.is_form_open());
        assert_eq!(state.app_state().raw_materials().len(), 1);
        assert_eq!(state.app_state().raw_materials()[0].name, "Test Yarn");
    }

    #[test]
    fn timer_keys_outside_projects_view_are_ignored() {
        let mut state = State::default();
        handle_key(&mut state, press(KeyCode::Char('4')));
        handle_key(&mut state, press(KeyCode::Char('s')));
        assert_eq!(state.timer_phase(), TimerPhase::Idle);
        assert_eq!(state.get_status(), None);
    }

    #[test]
    fn trends_arrows_toggle_panel() {
        let mut state = State::default();
        handle_key(&mut state, press(KeyCode::Char('4')));
        handle_key(&mut state, press(KeyCode::Right));
        assert_eq!(state.trends_panel(), TrendsPanel::Scraped);
    }
}
