use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    collections::VecDeque,
    error::Error,
    io::{self, stdin},
};

use pomo::catalog::{self, SessionTime, TimerOption};
use pomo::menu::{Menu, Selection};
use pomo::runtime::{CrosstermEventSource, FixedTicker, PomoEvent, PomoEventSource, Runner, Ticker};
use pomo::session::{Boundary, Command, Effect, Pomodoro, SessionEvent};
use pomo::ui;

/// minimal pomodoro timer tui with menu-driven sessions and keyboard control
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    ignore_errors = true,
    long_about = "A minimal Pomodoro timer TUI: pick study and break durations from a fixed menu, then drive the countdown with start/pause, reset, and quit keys."
)]
pub struct Cli {
    /// append short debug durations (0:10 study, 0:05 break) to the menus
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = Runner::new(CrosstermEventSource::new(), FixedTicker::clock_interval());
    let result = run(&mut terminal, &events, &cli);

    // Teardown runs on every exit path, early menu cancellation included
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B, E, T>(
    terminal: &mut Terminal<B>,
    events: &Runner<E, T>,
    cli: &Cli,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: PomoEventSource,
    T: Ticker,
{
    let study_options = catalog::study_options(cli.debug);
    let break_options = catalog::break_options(cli.debug);

    let study = match select_time(terminal, events, "Select Study Time:", &study_options)? {
        Some(time) => time,
        None => return Ok(()),
    };
    let brk = match select_time(terminal, events, "Select Break Time:", &break_options)? {
        Some(time) => time,
        None => return Ok(()),
    };

    let mut session = Pomodoro::new(study, brk);
    run_session(terminal, events, &mut session)
}

/// Blocking duration menu. Returns None when the user picks the Quit slot.
fn select_time<B, E, T>(
    terminal: &mut Terminal<B>,
    events: &Runner<E, T>,
    prompt: &str,
    options: &[TimerOption],
) -> Result<Option<SessionTime>, Box<dyn Error>>
where
    B: Backend,
    E: PomoEventSource,
    T: Ticker,
{
    let mut menu = Menu::new(prompt, catalog::labels(options), true);
    loop {
        terminal.draw(|f| ui::draw_menu(f, &menu))?;
        if let PomoEvent::Key(key) = events.step() {
            if let Some(selection) = menu.handle_key(key.code) {
                return Ok(match selection {
                    Selection::Choice(index) => Some(options[index].time),
                    Selection::Quit => None,
                });
            }
        }
    }
}

/// Blocking phase-boundary prompt: any key continues, 'q'/'Q' declines.
fn confirm_continue<B, E, T>(
    terminal: &mut Terminal<B>,
    events: &Runner<E, T>,
    boundary: Boundary,
    study: SessionTime,
    brk: SessionTime,
) -> Result<bool, Box<dyn Error>>
where
    B: Backend,
    E: PomoEventSource,
    T: Ticker,
{
    terminal.draw(|f| ui::draw_confirm(f, boundary, study, brk))?;
    loop {
        if let PomoEvent::Key(key) = events.step() {
            return Ok(!matches!(
                key.code,
                KeyCode::Char('q') | KeyCode::Char('Q')
            ));
        }
    }
}

fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('s') => Some(Command::StartPause),
        KeyCode::Char('r') => Some(Command::Reset),
        _ => None,
    }
}

fn run_session<B, E, T>(
    terminal: &mut Terminal<B>,
    events: &Runner<E, T>,
    session: &mut Pomodoro,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: PomoEventSource,
    T: Ticker,
{
    terminal.draw(|f| ui::draw_timer(f, &session.view()))?;

    loop {
        let effects = match events.step() {
            PomoEvent::Key(key) => match map_key(key) {
                Some(command) => session.step(SessionEvent::Command(command)),
                None => Vec::new(),
            },
            PomoEvent::Tick => session.step(SessionEvent::Tick),
            PomoEvent::Resize => vec![Effect::Redraw],
        };

        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Redraw => {
                    terminal.draw(|f| ui::draw_timer(f, &session.view()))?;
                }
                Effect::Confirm(boundary) => {
                    let accepted = confirm_continue(
                        terminal,
                        events,
                        boundary,
                        session.study_time(),
                        session.break_time(),
                    )?;
                    let follow = session.step(if accepted {
                        SessionEvent::ConfirmContinue
                    } else {
                        SessionEvent::ConfirmDecline
                    });
                    queue.extend(follow);
                }
                Effect::Terminate => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo::runtime::TestEventSource;
    use pomo::session::{Phase, RunState};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc::{self, Sender};
    use std::time::Duration;

    fn key(code: KeyCode) -> PomoEvent {
        PomoEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn send_ticks(tx: &Sender<PomoEvent>, count: u32) {
        for _ in 0..count {
            tx.send(PomoEvent::Tick).unwrap();
        }
    }

    fn test_harness() -> (
        Terminal<TestBackend>,
        Runner<TestEventSource, FixedTicker>,
        Sender<PomoEvent>,
    ) {
        let (tx, rx) = mpsc::channel();
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        (terminal, runner, tx)
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["pomo"]);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["pomo", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_tolerates_unknown_arguments() {
        // Unrecognized flags are skipped rather than rejected
        let cli = Cli::parse_from(["pomo", "--bogus", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_map_key_bindings() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)),
            Some(Command::StartPause)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Command::Reset)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Command::Quit)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_map_key_ignores_unbound_keys() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_select_time_returns_chosen_duration() {
        let (mut terminal, runner, tx) = test_harness();
        tx.send(key(KeyCode::Down)).unwrap();
        tx.send(key(KeyCode::Enter)).unwrap();

        let options = catalog::study_options(false);
        let chosen = select_time(&mut terminal, &runner, "Select Study Time:", &options)
            .unwrap()
            .unwrap();
        assert_eq!(chosen, SessionTime::new(50, 0));
    }

    #[test]
    fn test_select_time_quit_slot_cancels() {
        let (mut terminal, runner, tx) = test_harness();
        // Up from the first entry wraps straight onto the Quit slot
        tx.send(key(KeyCode::Up)).unwrap();
        tx.send(key(KeyCode::Enter)).unwrap();

        let options = catalog::break_options(false);
        let chosen = select_time(&mut terminal, &runner, "Select Break Time:", &options).unwrap();
        assert_eq!(chosen, None);
    }

    #[test]
    fn test_confirm_continue_any_key_accepts() {
        let (mut terminal, runner, tx) = test_harness();
        tx.send(PomoEvent::Tick).unwrap(); // ignored by the blocking prompt
        tx.send(key(KeyCode::Char('x'))).unwrap();

        let accepted = confirm_continue(
            &mut terminal,
            &runner,
            Boundary::StudyComplete,
            SessionTime::new(25, 0),
            SessionTime::new(5, 0),
        )
        .unwrap();
        assert!(accepted);
    }

    #[test]
    fn test_confirm_continue_q_declines() {
        let (mut terminal, runner, tx) = test_harness();
        tx.send(key(KeyCode::Char('q'))).unwrap();

        let accepted = confirm_continue(
            &mut terminal,
            &runner,
            Boundary::BreakComplete,
            SessionTime::new(25, 0),
            SessionTime::new(5, 0),
        )
        .unwrap();
        assert!(!accepted);
    }

    #[test]
    fn test_run_session_quits_on_q() {
        let (mut terminal, runner, tx) = test_harness();
        tx.send(key(KeyCode::Char('s'))).unwrap();
        tx.send(key(KeyCode::Char('q'))).unwrap();

        let mut session = Pomodoro::new(SessionTime::new(25, 0), SessionTime::new(5, 0));
        run_session(&mut terminal, &runner, &mut session).unwrap();
        assert_eq!(session.run_state(), RunState::Running);
    }

    #[test]
    fn test_run_session_full_cycle_with_confirmations() {
        let (mut terminal, runner, tx) = test_harness();

        // Start, run the 0:10 study out (1_100 ticks), dismiss the prompt,
        // run the 0:05 break out (600 ticks), dismiss again, then quit from
        // the reloaded study phase. Extra ticks are swallowed by the
        // blocking prompt, which ignores non-key events.
        tx.send(key(KeyCode::Char('s'))).unwrap();
        send_ticks(&tx, 1_200);
        tx.send(key(KeyCode::Char('x'))).unwrap();
        send_ticks(&tx, 700);
        tx.send(key(KeyCode::Char('x'))).unwrap();
        tx.send(key(KeyCode::Char('q'))).unwrap();

        let mut session = Pomodoro::new(SessionTime::new(0, 10), SessionTime::new(0, 5));
        run_session(&mut terminal, &runner, &mut session).unwrap();

        // Back in a fresh study phase when the quit landed
        assert_eq!(session.phase(), Phase::Study);
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.remaining_secs(), 10);
    }

    #[test]
    fn test_run_session_decline_terminates() {
        let (mut terminal, runner, tx) = test_harness();

        tx.send(key(KeyCode::Char('s'))).unwrap();
        send_ticks(&tx, 1_200);
        tx.send(key(KeyCode::Char('q'))).unwrap(); // decline the boundary prompt

        let mut session = Pomodoro::new(SessionTime::new(0, 10), SessionTime::new(0, 5));
        run_session(&mut terminal, &runner, &mut session).unwrap();
        assert_eq!(session.phase(), Phase::Break);
    }

    #[test]
    fn test_run_session_reset_during_pause() {
        let (mut terminal, runner, tx) = test_harness();

        tx.send(key(KeyCode::Char('s'))).unwrap();
        send_ticks(&tx, 250);
        tx.send(key(KeyCode::Char('s'))).unwrap(); // pause
        tx.send(key(KeyCode::Char('r'))).unwrap(); // reset
        tx.send(key(KeyCode::Char('q'))).unwrap();

        let mut session = Pomodoro::new(SessionTime::new(0, 10), SessionTime::new(0, 5));
        run_session(&mut terminal, &runner, &mut session).unwrap();
        assert_eq!(session.run_state(), RunState::Stopped);
        assert_eq!(session.remaining_secs(), 10);
    }
}
