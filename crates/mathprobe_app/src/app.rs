use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use mathprobe_core::{update, AppState, Msg};

use crate::config::AppConfig;
use crate::effects::{EffectRunner, Feedback};
use crate::ui::{self, Screen};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut terminal, config);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
) -> Result<()> {
    let runner = EffectRunner::new(config);
    let mut state = AppState::new();
    let mut screen = Screen::new(&state.view().topic);
    let mut redraw = true;
    let mut next_tick = Instant::now() + TICK_INTERVAL;

    loop {
        for feedback in runner.poll() {
            match feedback {
                Feedback::Update(msg) => dispatch(&mut state, &runner, msg),
                Feedback::Notice(text) => {
                    screen.notice = Some(text);
                    redraw = true;
                }
            }
        }

        if state.consume_follow() {
            screen.scroll_back = 0;
        }
        if state.consume_dirty() {
            redraw = true;
        }

        if redraw {
            let view = state.view();
            if view.generating {
                // A fresh run makes any print notice stale.
                screen.notice = None;
            }
            screen.spinner.set_running(view.generating);
            terminal.draw(|frame| ui::draw(frame, &view, &screen))?;
            redraw = false;
        }

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key(key, &mut screen) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Dispatch(msg) => dispatch(&mut state, &runner, msg),
                        KeyAction::Redraw => redraw = true,
                        KeyAction::None => {}
                    }
                }
                Event::Resize(..) => redraw = true,
                _ => {}
            }
        }

        if Instant::now() >= next_tick {
            next_tick = Instant::now() + TICK_INTERVAL;
            dispatch(&mut state, &runner, Msg::Tick);
            if screen.spinner.tick() {
                redraw = true;
            }
        }
    }
}

fn dispatch(state: &mut AppState, runner: &EffectRunner, msg: Msg) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
}

#[derive(Debug, PartialEq)]
enum KeyAction {
    Quit,
    Dispatch(Msg),
    Redraw,
    None,
}

fn handle_key(key: KeyEvent, screen: &mut Screen) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            KeyCode::Char('p') => KeyAction::Dispatch(Msg::PrintClicked),
            _ => KeyAction::None,
        };
    }
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Dispatch(Msg::GenerateClicked),
        KeyCode::Up => scroll(screen, 1),
        KeyCode::Down => scroll(screen, -1),
        KeyCode::PageUp => scroll(screen, 10),
        KeyCode::PageDown => scroll(screen, -10),
        _ => {
            if screen.composer.on_key(key) {
                KeyAction::Dispatch(Msg::TopicChanged(screen.composer.text().to_string()))
            } else {
                // Cursor-only movement still needs a repaint.
                KeyAction::Redraw
            }
        }
    }
}

fn scroll(screen: &mut Screen, delta: i32) -> KeyAction {
    let back = i64::from(screen.scroll_back) + i64::from(delta);
    // The renderer clamps against the actual line count; here we only
    // keep the counter non-negative.
    screen.scroll_back = back.clamp(0, u16::MAX as i64) as u16;
    KeyAction::Redraw
}

#[cfg(test)]
mod tests {
    use super::{handle_key, KeyAction};
    use crate::ui::Screen;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use mathprobe_core::Msg;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut screen = Screen::new("");
        assert_eq!(handle_key(press(KeyCode::Esc), &mut screen), KeyAction::Quit);
        assert_eq!(handle_key(ctrl('c'), &mut screen), KeyAction::Quit);
    }

    #[test]
    fn enter_requests_generation() {
        let mut screen = Screen::new("分数");
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut screen),
            KeyAction::Dispatch(Msg::GenerateClicked)
        );
    }

    #[test]
    fn ctrl_p_requests_print() {
        let mut screen = Screen::new("分数");
        assert_eq!(
            handle_key(ctrl('p'), &mut screen),
            KeyAction::Dispatch(Msg::PrintClicked)
        );
    }

    #[test]
    fn typing_reports_the_full_topic() {
        let mut screen = Screen::new("分数");
        let action = handle_key(press(KeyCode::Char('乘')), &mut screen);
        assert_eq!(
            action,
            KeyAction::Dispatch(Msg::TopicChanged("分数乘".to_string()))
        );
    }

    #[test]
    fn arrows_walk_the_scrollback() {
        let mut screen = Screen::new("");
        handle_key(press(KeyCode::Up), &mut screen);
        handle_key(press(KeyCode::Up), &mut screen);
        assert_eq!(screen.scroll_back, 2);
        handle_key(press(KeyCode::Down), &mut screen);
        assert_eq!(screen.scroll_back, 1);
    }

    #[test]
    fn scrollback_never_underflows() {
        let mut screen = Screen::new("");
        handle_key(press(KeyCode::PageDown), &mut screen);
        assert_eq!(screen.scroll_back, 0);
        handle_key(press(KeyCode::PageUp), &mut screen);
        assert_eq!(screen.scroll_back, 10);
    }

    #[test]
    fn cursor_moves_only_repaint() {
        let mut screen = Screen::new("abc");
        assert_eq!(
            handle_key(press(KeyCode::Left), &mut screen),
            KeyAction::Redraw
        );
        assert_eq!(screen.composer.text(), "abc");
    }

    #[test]
    fn unhandled_control_chords_do_nothing() {
        let mut screen = Screen::new("abc");
        assert_eq!(handle_key(ctrl('x'), &mut screen), KeyAction::None);
        assert_eq!(screen.composer.text(), "abc");
    }
}
