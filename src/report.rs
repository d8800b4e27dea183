//! Human-readable rendering of runs: a streaming trace of every visited configuration
//! and a grid table summarizing several runs.

use crate::configuration::Configuration;
use crate::machine::Machine;
use crate::observer::Observer;
use crate::simulator::{Outcome, RunResult};
use std::fmt;
use std::io::{self, Write};

/// An observer that writes the trace of a run to `W`.
///
/// Write errors do not interrupt the run; the first one is kept and returned by
/// [`TraceWriter::finish`].
pub struct TraceWriter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flushes and returns the writer, or the first write error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn line(&mut self, args: fmt::Arguments) {
        if self.error.is_some() {
            return;
        }
        let written = self
            .writer
            .write_fmt(args)
            .and_then(|_| self.writer.write_all(b"\n"));
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}

impl<W: Write> Observer for TraceWriter<W> {
    fn on_start(&mut self, machine: &Machine, input: &str) {
        self.line(format_args!("\nMachine: {}", machine.name()));
        self.line(format_args!("Initial string: '{}'", input));
    }

    fn on_visit(&mut self, _depth: usize, configuration: &Configuration) {
        self.line(format_args!("{}", configuration));
    }

    fn on_conclude(&mut self, result: &RunResult, path: Option<&[Configuration]>) {
        match result.outcome {
            Outcome::Accepted => {
                self.line(format_args!(
                    "String accepted in {} transitions.",
                    result.depth
                ));
            }
            Outcome::Rejected => {
                self.line(format_args!(
                    "String rejected in {} transitions.",
                    result.depth
                ));
            }
            Outcome::DepthExhausted => {
                self.line(format_args!(
                    "Execution stopped after {} transitions.",
                    result.depth
                ));
            }
        }

        if let Some(path) = path {
            self.line(format_args!("\nTrace Path of Accepting Configurations:"));
            for configuration in path {
                self.line(format_args!("{}", configuration));
            }
            self.line(format_args!(""));
        }
    }
}

const HEADERS: [&str; 5] = [
    "String",
    "Accepted",
    "Depth",
    "Configurations",
    "Nondeterminism",
];

/// Renders results as a grid table, one row per run.
pub fn summary_table(results: &[RunResult]) -> String {
    summary_table_with_comments(results, &[])
}

/// Renders results as a grid table with a trailing Comments column.
///
/// `comments` pairs with `results` by position; rows without one get an empty cell. The
/// column is omitted when `comments` is empty.
pub fn summary_table_with_comments(results: &[RunResult], comments: &[String]) -> String {
    let with_comments = !comments.is_empty();

    let mut headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    if with_comments {
        headers.push("Comments".to_string());
    }

    let rows: Vec<Vec<String>> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut row = vec![
                r.input.clone(),
                r.accepted().to_string(),
                r.depth.to_string(),
                r.transitions.to_string(),
                format!("{:.2}", r.nondeterminism),
            ];
            if with_comments {
                row.push(comments.get(i).cloned().unwrap_or_default());
            }
            row
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '-'));
    out.push_str(&row_line(&widths, &headers, false));
    out.push_str(&border(&widths, '='));
    for row in &rows {
        out.push_str(&row_line(&widths, row, true));
        out.push_str(&border(&widths, '-'));
    }
    out
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for &width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

/// Depth, Configurations and Nondeterminism.
const NUMERIC_COLUMNS: std::ops::Range<usize> = 2..5;

/// Text columns are left aligned; numeric columns are right aligned in data rows.
fn row_line(widths: &[usize], cells: &[String], align_numbers: bool) -> String {
    let mut line = String::from("|");
    for (column, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if align_numbers && NUMERIC_COLUMNS.contains(&column) {
            line.push_str(&format!(" {:>width$} |", cell, width = width));
        } else {
            line.push_str(&format!(" {:<width$} |", cell, width = width));
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::Simulator;
    use crate::types::Direction;

    fn create_a_plus_machine() -> Machine {
        Machine::builder("a plus")
            .start_state("q1")
            .accept_state("qacc")
            .reject_state("qrej")
            .transition("q1", 'a', "q2", 'a', Direction::Right)
            .transition("q2", 'a', "q2", 'a', Direction::Right)
            .transition("q2", '_', "qacc", '_', Direction::Right)
            .build()
            .unwrap()
    }

    fn trace(input: &str, max_depth: usize) -> String {
        let machine = create_a_plus_machine();
        let mut writer = TraceWriter::new(Vec::new());
        Simulator::new(&machine).run_with_observer(input, max_depth, &mut writer);

        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_trace_of_accepted_run() {
        let expected = "\nMachine: a plus\n\
                        Initial string: 'a'\n\
                        \u{20}[q1] a _\n\
                        a [q2] _ \n\
                        a_ [qacc] _ \n\
                        String accepted in 2 transitions.\n\
                        \n\
                        Trace Path of Accepting Configurations:\n\
                        \u{20}[q1] a _\n\
                        a [q2] _ \n\
                        a_ [qacc] _ \n\
                        \n";

        assert_eq!(trace("a", 15), expected);
    }

    #[test]
    fn test_trace_of_rejected_run() {
        let output = trace("", 15);

        assert!(output.contains("Initial string: ''"));
        assert!(output.ends_with("String rejected in 1 transitions.\n"));
        assert!(!output.contains("Trace Path"));
    }

    #[test]
    fn test_trace_of_exhausted_run() {
        let output = trace("aaaa", 2);

        assert!(output.ends_with("Execution stopped after 2 transitions.\n"));
    }

    #[test]
    fn test_summary_table() {
        let machine = create_a_plus_machine();
        let simulator = Simulator::new(&machine);
        let results: Vec<RunResult> = ["", "a"]
            .iter()
            .map(|input| simulator.run(input, 15))
            .collect();

        let table = summary_table(&results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[0],
            "+--------+----------+-------+----------------+----------------+"
        );
        assert_eq!(
            lines[1],
            "| String | Accepted | Depth | Configurations | Nondeterminism |"
        );
        assert!(lines[2].starts_with("+===="));
        assert_eq!(
            lines[3],
            "|        | false    |     1 |              0 |           1.00 |"
        );
        assert_eq!(
            lines[5],
            "| a      | true     |     2 |              2 |           1.00 |"
        );
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_summary_table_with_comments() {
        let machine = create_a_plus_machine();
        let simulator = Simulator::new(&machine);
        let results: Vec<RunResult> = ["", "a"]
            .iter()
            .map(|input| simulator.run(input, 15))
            .collect();

        let table = summary_table_with_comments(&results, &["empty tape".to_string()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[1],
            "| String | Accepted | Depth | Configurations | Nondeterminism | Comments   |"
        );
        assert_eq!(
            lines[3],
            "|        | false    |     1 |              0 |           1.00 | empty tape |"
        );
        assert_eq!(
            lines[5],
            "| a      | true     |     2 |              2 |           1.00 |            |"
        );
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_summary_table_without_comments_has_no_comments_column() {
        let machine = create_a_plus_machine();
        let results = vec![Simulator::new(&machine).run("a", 15)];

        assert_eq!(
            summary_table_with_comments(&results, &[]),
            summary_table(&results)
        );
        assert!(!summary_table(&results).contains("Comments"));
    }
}
