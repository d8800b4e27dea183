//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//! The grammar lives in `grammar.pest`; this module turns the parse tree into a `Machine`.

use crate::{
    machine::Machine,
    types::{Direction, NtmError, Transition, BLANK_SYMBOL},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the machine description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineParser;

/// Parses a machine description into a `Machine`.
///
/// The description is a seven line header (name, three reserved lines, then the start,
/// accept and reject states) followed by one `state,read,next,write,direction` record
/// per line. Records sharing a `(state, read)` pair keep their order.
///
/// # Returns
///
/// * `Ok(Machine)` if the description is well formed.
/// * `Err(NtmError::ParseError)` on syntax errors or unsupported directions.
pub fn parse(input: &str) -> Result<Machine, NtmError> {
    let root = MachineParser::parse(Rule::program, input.trim_end())
        .map_err(|e| NtmError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| NtmError::ValidationError("Empty machine description".to_string()))?;

    parse_machine(root)
}

/// Walks the top-level pairs of a `Rule::program`.
fn parse_machine(pair: Pair<Rule>) -> Result<Machine, NtmError> {
    let mut name = String::new();
    let mut start_state = None;
    let mut accept_state = None;
    let mut reject_state = None;
    let mut transitions = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::name => name = p.as_str().trim().to_string(),
            Rule::start_state => start_state = Some(parse_inner_string(p)),
            Rule::accept_state => accept_state = Some(parse_inner_string(p)),
            Rule::reject_state => reject_state = Some(parse_inner_string(p)),
            Rule::transition => transitions.push(parse_transition(p)?),
            _ => {} // Reserved header lines and EOI
        }
    }

    let mut builder = Machine::builder(name);
    for (state, read, transition) in transitions {
        builder.add_transition(state, read, transition);
    }

    let builder = match start_state {
        Some(state) => builder.start_state(state),
        None => builder,
    };
    let builder = match accept_state {
        Some(state) => builder.accept_state(state),
        None => builder,
    };
    let builder = match reject_state {
        Some(state) => builder.reject_state(state),
        None => builder,
    };

    builder.build()
}

/// Parses one `state,read,next,write,direction` record.
fn parse_transition(pair: Pair<Rule>) -> Result<(String, char, Transition), NtmError> {
    let mut pairs = pair.into_inner();
    let state = parse_string(&mut pairs)?;
    let read = parse_symbol(&parse_string(&mut pairs)?);
    let next_state = parse_string(&mut pairs)?;
    let write = parse_symbol(&parse_string(&mut pairs)?);

    let direction = pairs
        .next()
        .ok_or_else(|| NtmError::ValidationError("Missing direction".to_string()))?;
    let direction = parse_direction(direction)?;

    Ok((state, read, Transition::new(next_state, write, direction)))
}

/// Parses a single direction from a `Pair<Rule::direction>`.
///
/// Supports 'L' for Left and 'R' for Right.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, NtmError> {
    let span = pair.as_span();
    match pair.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(parse_error(
            &format!("Unsupported direction: {other}"),
            span,
        )),
    }
}

/// Parses a single character symbol.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Extracts the inner string content from a `Pair`.
fn parse_inner_string(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

/// Extracts the string content from the current `Pair` in a `Pairs` iterator.
fn parse_string(pairs: &mut Pairs<Rule>) -> Result<String, NtmError> {
    pairs
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| NtmError::ValidationError("Incomplete transition record".to_string()))
}

/// Creates a `NtmError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> NtmError {
    NtmError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_PLUS: &str = "a plus
q1,q2,qacc,qrej
a
a,_
q1
qacc
qrej
q1,a,q2,a,R
q2,a,q2,a,R
q2,_,qacc,_,R
";

    #[test]
    fn test_parse_simple_machine() {
        let machine = parse(A_PLUS).unwrap();

        assert_eq!(machine.name(), "a plus");
        assert_eq!(machine.start_state(), "q1");
        assert_eq!(machine.accept_state(), "qacc");
        assert_eq!(machine.reject_state(), "qrej");
        assert_eq!(machine.transition_count(), 3);
        assert_eq!(
            machine.transitions_for("q2", '_'),
            &[Transition::new("qacc", '_', Direction::Right)]
        );
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let input = "guess
q0,q1
a
a,_
q0
qa
qr
q0,a,q1,x,R
q0,b,q0,b,R
q0,a,q0,y,L
";
        let machine = parse(input).unwrap();

        assert_eq!(
            machine.transitions_for("q0", 'a'),
            &[
                Transition::new("q1", 'x', Direction::Right),
                Transition::new("q0", 'y', Direction::Left),
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_spacing_and_blank_lines() {
        let input = "spaced\r\n\r\n\r\n\r\n  q0 \r\nqa\r\nqr\r\nq0 , a , qa , a , R\r\n\r\n  q0,_,qr,_,L\r\n";
        let machine = parse(input).unwrap();

        assert_eq!(machine.start_state(), "q0");
        assert_eq!(machine.transition_count(), 2);
        assert_eq!(
            machine.transitions_for("q0", 'a'),
            &[Transition::new("qa", 'a', Direction::Right)]
        );
    }

    #[test]
    fn test_parse_header_only() {
        let machine = parse("empty\n\n\n\nq0\nqa\nqr").unwrap();

        assert_eq!(machine.transition_count(), 0);
        assert!(machine.transitions_for("q0", '_').is_empty());
    }

    #[test]
    fn test_parse_unsupported_direction() {
        let input = "bad\n\n\n\nq0\nqa\nqr\nq0,a,qa,a,X\n";
        let error = parse(input).unwrap_err();

        assert!(matches!(error, NtmError::ParseError(_)));
        assert!(error.to_string().contains("Unsupported direction: X"));
    }

    #[test]
    fn test_parse_incomplete_record() {
        let input = "bad\n\n\n\nq0\nqa\nqr\nq0,a,qa\n";
        let error = parse(input).unwrap_err();

        assert!(matches!(error, NtmError::ParseError(_)));
    }

    #[test]
    fn test_parse_multi_character_symbol() {
        let input = "bad\n\n\n\nq0\nqa\nqr\nq0,ab,qa,a,R\n";

        assert!(matches!(parse(input), Err(NtmError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty_name_keeps_header_positions() {
        let input = "\nq0\na\na,_\nq0\nqa\nqr\nq0,a,qa,a,R\n";
        let machine = parse(input).unwrap();

        assert_eq!(machine.name(), "");
        assert_eq!(machine.start_state(), "q0");
        assert_eq!(machine.accept_state(), "qa");
        assert_eq!(machine.reject_state(), "qr");
        assert_eq!(
            machine.transitions_for("q0", 'a'),
            &[Transition::new("qa", 'a', Direction::Right)]
        );
    }

    #[test]
    fn test_parse_missing_header() {
        let error = parse("only a name\nq0\nqa").unwrap_err();

        assert!(matches!(error, NtmError::ParseError(_)));
    }
}
