//! Line-oriented machine description files.
//!
//! ```text
//! F...                      marker, first character must be 'F'
//! <label> <numStates>
//! <label> <numInputs>
//! <label> <numOutputs>
//! <label> <initialState>
//! <label> <numTransitions>
//! <from> <input> <to> <output>   (numTransitions lines)
//! ```
//!
//! Labels are free-form single tokens. Trailing blank lines are ignored; any
//! other line beyond the declared transitions is a count mismatch.

use crate::core::{FormatError, Machine, Transition};
use crate::error::Error;
use std::fs;
use std::path::Path;

const HEADER_LINES: usize = 6;

/// Parse a description into a validated machine.
///
/// # Example
///
/// ```rust
/// use mealy_mutant::description::parse_description;
///
/// let text = "FSM\nstates 2\ninputs 1\noutputs 2\ninitial 0\ntransitions 2\n0 0 1 0\n1 0 0 1\n";
/// let machine = parse_description(text).unwrap();
/// assert_eq!(machine.transition_for(1, 0), Some((0, 1)));
/// ```
pub fn parse_description(text: &str) -> Result<Machine, FormatError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let marker = lines.first().ok_or(FormatError::MissingLine {
        line: 0,
        expected: "marker line",
    })?;
    if !marker.starts_with('F') {
        return Err(FormatError::MissingMarker);
    }

    let num_states = header_value(&lines, 1, "state count")?;
    let num_inputs = header_value(&lines, 2, "input count")?;
    let num_outputs = header_value(&lines, 3, "output count")?;
    let initial_state = header_value(&lines, 4, "initial state")?;
    let declared = header_value(&lines, 5, "transition count")?;

    let body = &lines[HEADER_LINES..];
    if body.len() != declared {
        return Err(FormatError::TransitionCountMismatch {
            declared,
            found: body.len(),
        });
    }

    let transitions = body
        .iter()
        .enumerate()
        .map(|(i, line)| parse_transition(line, HEADER_LINES + i))
        .collect::<Result<Vec<_>, _>>()?;

    Machine::build(num_states, num_inputs, num_outputs, initial_state, transitions)
}

/// Write `machine` in description format. Parsing the result yields an equal
/// machine.
pub fn to_description(machine: &Machine) -> String {
    let header = format!(
        "FSM\nstates {}\ninputs {}\noutputs {}\ninitial {}\ntransitions {}\n",
        machine.num_states(),
        machine.num_inputs(),
        machine.num_outputs(),
        machine.initial_state(),
        machine.transition_count()
    );
    machine.transitions().iter().fold(header, |mut out, t| {
        out.push_str(&format!("{} {} {} {}\n", t.from, t.input, t.to, t.output));
        out
    })
}

/// Read and parse a description file.
pub fn load_description(path: impl AsRef<Path>) -> Result<Machine, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_description(&text)?)
}

/// Write `machine` to a description file.
pub fn save_description(machine: &Machine, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, to_description(machine)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn header_value(lines: &[&str], line: usize, expected: &'static str) -> Result<usize, FormatError> {
    let text = lines
        .get(line)
        .ok_or(FormatError::MissingLine { line, expected })?;
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(FormatError::FieldCount {
            line,
            expected: 2,
            found: fields.len(),
        });
    }
    parse_field(fields[1], line, 1)
}

fn parse_transition(text: &str, line: usize) -> Result<Transition, FormatError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(FormatError::FieldCount {
            line,
            expected: 4,
            found: fields.len(),
        });
    }
    Ok(Transition::new(
        parse_field(fields[0], line, 0)?,
        parse_field(fields[1], line, 1)?,
        parse_field(fields[2], line, 2)?,
        parse_field(fields[3], line, 3)?,
    ))
}

fn parse_field(value: &str, line: usize, field: usize) -> Result<usize, FormatError> {
    value.parse().map_err(|_| FormatError::InvalidInteger {
        line,
        field,
        value: value.to_string(),
    })
}
