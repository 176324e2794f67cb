/// Wall-clock length of one study or break session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl SessionTime {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}

/// One selectable entry in the duration menus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerOption {
    pub label: String,
    pub time: SessionTime,
}

impl TimerOption {
    fn new(label: &str, minutes: u32, seconds: u32) -> Self {
        Self {
            label: label.to_string(),
            time: SessionTime::new(minutes, seconds),
        }
    }
}

/// Study durations offered at startup. `debug` appends a 10-second entry
/// for exercising the full session cycle quickly.
pub fn study_options(debug: bool) -> Vec<TimerOption> {
    let mut options = vec![
        TimerOption::new("25:00 (Short Study)", 25, 0),
        TimerOption::new("50:00 (Long Study)", 50, 0),
    ];
    if debug {
        options.push(TimerOption::new("0:10 (Debug Study)", 0, 10));
    }
    options
}

/// Break durations offered at startup. `debug` appends a 5-second entry.
pub fn break_options(debug: bool) -> Vec<TimerOption> {
    let mut options = vec![
        TimerOption::new("5:00 (Short Break)", 5, 0),
        TimerOption::new("10:00 (Long Break)", 10, 0),
    ];
    if debug {
        options.push(TimerOption::new("0:05 (Debug Break)", 0, 5));
    }
    options
}

/// Menu labels for a set of options, in catalog order
pub fn labels(options: &[TimerOption]) -> Vec<String> {
    options.iter().map(|o| o.label.clone()).collect()
}
