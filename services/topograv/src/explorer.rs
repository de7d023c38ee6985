//! State and command loop of the LWE explorer.
//!
//! The explorer holds two controls, a quantity choice and a time index.
//! Every change re-renders the view through a caller-supplied callback.

use std::io::{BufRead, Write};

use anyhow::Result;
use gravimetry::Quantity;
use tracing::{debug, warn};

/// The quantity selected in the explorer.
pub type PlotChoice = Quantity;

/// Labels of the two choice buttons.
pub const CHOICE_LABELS: [&str; 2] = ["LWE", "Gravity from LWE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerState {
    pub choice: PlotChoice,
    pub time_index: usize,
    pub n_times: usize,
}

impl ExplorerState {
    /// LWE at the first time step.
    pub fn new(n_times: usize) -> Self {
        Self {
            choice: Quantity::Lwe,
            time_index: 0,
            n_times,
        }
    }

    /// `"LWE"` selects LWE; any other label selects gravity.
    pub fn on_choice_selected(&mut self, label: &str) {
        self.choice = if label == CHOICE_LABELS[0] {
            Quantity::Lwe
        } else {
            Quantity::Gravity
        };
    }

    /// Move to time step `value`, clamped to `[0, n_times - 1]`.
    pub fn on_time_changed(&mut self, value: i64) {
        let last = self.n_times.saturating_sub(1) as i64;
        self.time_index = value.clamp(0, last) as usize;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Choose(PlotChoice),
    Time(i64),
    Next,
    Prev,
    Show,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("").to_ascii_lowercase();
        let command = match head.as_str() {
            "lwe" => Command::Choose(Quantity::Lwe),
            "gravity" | "grav" => Command::Choose(Quantity::Gravity),
            "time" | "t" => {
                let value = words
                    .next()
                    .ok_or_else(|| "time needs an index".to_string())?;
                let index = value
                    .parse::<i64>()
                    .map_err(|_| format!("invalid time index '{}'", value))?;
                Command::Time(index)
            }
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "show" | "s" => Command::Show,
            "quit" | "q" | "exit" => Command::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{}'", other)),
        };
        if words.next().is_some() {
            return Err(format!("unexpected arguments after '{}'", head));
        }
        Ok(command)
    }
}

/// Apply `command`; returns whether the state changed.
pub fn apply(state: &mut ExplorerState, command: Command) -> bool {
    let before = *state;
    match command {
        Command::Choose(Quantity::Lwe) => state.on_choice_selected(CHOICE_LABELS[0]),
        Command::Choose(Quantity::Gravity) => state.on_choice_selected(CHOICE_LABELS[1]),
        Command::Time(index) => state.on_time_changed(index),
        Command::Next => state.on_time_changed(state.time_index as i64 + 1),
        Command::Prev => state.on_time_changed(state.time_index as i64 - 1),
        Command::Show | Command::Quit => {}
    }
    *state != before
}

/// Read commands line by line until `quit` or end of input.
///
/// `render` runs once for the initial state, after every change, and on
/// `show`. Unparseable lines are reported to `output` and skipped.
pub fn run_session<R, W, F>(
    mut state: ExplorerState,
    input: R,
    output: &mut W,
    mut render: F,
) -> Result<ExplorerState>
where
    R: BufRead,
    W: Write,
    F: FnMut(&ExplorerState) -> Result<()>,
{
    render(&state)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(input = %line.trim(), "Ignoring explorer command");
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let changed = apply(&mut state, command);
        debug!(?command, changed, time_index = state.time_index, choice = %state.choice, "Explorer command");
        if changed || command == Command::Show {
            render(&state)?;
        }
        writeln!(
            output,
            "{} @ {}/{}",
            state.choice.tag(),
            state.time_index,
            state.n_times.saturating_sub(1)
        )?;
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_labels() {
        let mut state = ExplorerState::new(10);
        state.on_choice_selected("Gravity from LWE");
        assert_eq!(state.choice, Quantity::Gravity);
        state.on_choice_selected("LWE");
        assert_eq!(state.choice, Quantity::Lwe);
        // anything but the exact label falls through to gravity
        state.on_choice_selected("lwe");
        assert_eq!(state.choice, Quantity::Gravity);
    }

    #[test]
    fn test_time_clamped() {
        let mut state = ExplorerState::new(5);
        state.on_time_changed(3);
        assert_eq!(state.time_index, 3);
        state.on_time_changed(99);
        assert_eq!(state.time_index, 4);
        state.on_time_changed(-2);
        assert_eq!(state.time_index, 0);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("time 7".parse::<Command>(), Ok(Command::Time(7)));
        assert_eq!(" Gravity ".parse::<Command>(), Ok(Command::Choose(Quantity::Gravity)));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert!("time".parse::<Command>().is_err());
        assert!("time x".parse::<Command>().is_err());
        assert!("next 2".parse::<Command>().is_err());
        assert!("zoom".parse::<Command>().is_err());
    }

    #[test]
    fn test_session_renders_on_change_only() {
        let mut renders = Vec::new();
        let mut out = Vec::new();
        let input = "next\nnext\nlwe\nbogus\nshow\nprev\nquit\nnext\n";
        let state = run_session(ExplorerState::new(3), input.as_bytes(), &mut out, |s| {
            renders.push(s.time_index);
            Ok(())
        })
        .unwrap();

        // initial, next, next, show, prev; `lwe` is a no-op and input stops at quit
        assert_eq!(renders, vec![0, 1, 2, 2, 1]);
        assert_eq!(state.time_index, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command 'bogus'"));
    }
}
