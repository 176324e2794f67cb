use crate::catalog::SessionTime;
use crate::clock::{ClockState, TICK_INTERVAL_US};

/// Which kind of session is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Study,
    Break,
}

/// Whether the active phase's countdown is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// User commands decoded from key input by the I/O layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartPause,
    Reset,
    Quit,
}

/// A completed phase waiting on the user's go-ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    StudyComplete,
    BreakComplete,
}

/// Everything the controller reacts to, one event per loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Command(Command),
    Tick,
    ConfirmContinue,
    ConfirmDecline,
}

/// What the I/O layer must do in response to a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Redraw,
    Confirm(Boundary),
    Terminate,
}

/// Controller-computed values consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    pub minutes: u32,
    pub seconds: u32,
    pub status: String,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
}

/// The session state machine: owns the phase, run state, and clock for one
/// study/break cycle. `step` is the entire decision logic; all terminal I/O
/// happens in whoever interprets the returned effects.
#[derive(Debug, Clone)]
pub struct Pomodoro {
    phase: Phase,
    run_state: RunState,
    clock: ClockState,
    study: SessionTime,
    brk: SessionTime,
    awaiting: Option<Boundary>,
}

impl Pomodoro {
    pub fn new(study: SessionTime, brk: SessionTime) -> Self {
        Self {
            phase: Phase::Study,
            run_state: RunState::Stopped,
            clock: ClockState::new(study),
            study,
            brk,
            awaiting: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn study_time(&self) -> SessionTime {
        self.study
    }

    pub fn break_time(&self) -> SessionTime {
        self.brk
    }

    /// Duration of whichever phase is active right now
    fn current_time(&self) -> SessionTime {
        match self.phase {
            Phase::Study => self.study,
            Phase::Break => self.brk,
        }
    }

    /// Advance the machine by one event and report the required effects.
    pub fn step(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Command(Command::Quit) => vec![Effect::Terminate],
            SessionEvent::Command(Command::StartPause) => {
                self.run_state = match self.run_state {
                    RunState::Stopped | RunState::Paused => RunState::Running,
                    RunState::Running => RunState::Paused,
                };
                vec![Effect::Redraw]
            }
            SessionEvent::Command(Command::Reset) => {
                self.run_state = RunState::Stopped;
                self.clock = ClockState::new(self.current_time());
                vec![Effect::Redraw]
            }
            SessionEvent::Tick => self.on_tick(),
            SessionEvent::ConfirmContinue => self.on_confirm(),
            SessionEvent::ConfirmDecline => {
                if self.awaiting.is_some() {
                    vec![Effect::Terminate]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn on_tick(&mut self) -> Vec<Effect> {
        if self.run_state != RunState::Running || self.awaiting.is_some() {
            // Halted: no advancement, but keep the static display fresh
            return vec![Effect::Redraw];
        }

        if self.clock.advance(TICK_INTERVAL_US) {
            self.run_state = RunState::Stopped;
            let boundary = match self.phase {
                Phase::Study => {
                    // The break is loaded before the prompt so the screen
                    // behind it already shows the upcoming countdown
                    self.phase = Phase::Break;
                    self.clock = ClockState::new(self.brk);
                    Boundary::StudyComplete
                }
                // The study reload waits for the confirmation
                Phase::Break => Boundary::BreakComplete,
            };
            self.awaiting = Some(boundary);
            return vec![Effect::Confirm(boundary)];
        }

        vec![Effect::Redraw]
    }

    fn on_confirm(&mut self) -> Vec<Effect> {
        match self.awaiting.take() {
            Some(Boundary::StudyComplete) => {
                self.run_state = RunState::Running;
                vec![Effect::Redraw]
            }
            Some(Boundary::BreakComplete) => {
                self.phase = Phase::Study;
                self.clock = ClockState::new(self.study);
                self.run_state = RunState::Running;
                vec![Effect::Redraw]
            }
            None => Vec::new(),
        }
    }

    /// Status line derived from phase and run state
    pub fn status(&self) -> String {
        if self.awaiting == Some(Boundary::StudyComplete) {
            return "Break Ready".to_string();
        }
        match self.phase {
            Phase::Study => self.run_state.to_string(),
            Phase::Break => format!("Break {}", self.run_state),
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn view(&self) -> TimerView {
        let (minutes, seconds) = if self.run_state == RunState::Running && self.awaiting.is_none() {
            self.clock.display_time_running()
        } else {
            self.clock.display_time()
        };
        TimerView {
            minutes,
            seconds,
            status: self.status(),
            total_seconds: self.current_time().total_seconds(),
            remaining_seconds: self.clock.remaining_secs(),
        }
    }
}
