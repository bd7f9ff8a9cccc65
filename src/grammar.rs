// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Recursive-descent parser for interval literals.
//!
//! ```text
//! literal  := blanks '[' blanks quoted blanks quoted blanks ']' EOF
//!           | blanks "Undefined Range" blanks EOF
//! quoted   := '"' ( "Undefined Range" ... | <abstime text> '"' )
//! blanks   := ASCII whitespace*
//! ```
//!
//! `Undefined Range` directly after the first opening quote stands for the
//! whole undefined interval and ends parsing there. Every other deviation is
//! a syntax error naming the complete input.

use crate::abstime::AbsoluteTime;
use crate::config::DateTimeConfig;
use crate::error::{Error, Result};

/// Text of the undefined interval, inside and outside the brackets.
pub(crate) const UNDEFINED_RANGE: &str = "Undefined Range";

const QUOTE: char = '"';

/// A successfully parsed literal, endpoints still in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Undefined,
    Range(AbsoluteTime, AbsoluteTime),
}

struct Parser<'a> {
    input: &'a str,
    rest: &'a str,
    config: &'a DateTimeConfig,
}

impl<'a> Parser<'a> {
    fn syntax_error(&self) -> Error {
        log::debug!("rejected tinterval literal {:?} at {:?}", self.input, self.rest);
        Error::syntax("tinterval", self.input)
    }

    fn skip_blanks(&mut self) {
        self.rest = self.rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    }

    /// Blanks, then exactly `c`.
    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_blanks();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.syntax_error()),
        }
    }

    /// Text up to the next quote, consuming the quote.
    fn until_quote(&mut self) -> Result<&'a str> {
        let end = self.rest.find(QUOTE).ok_or_else(|| self.syntax_error())?;
        let text = &self.rest[..end];
        self.rest = &self.rest[end + QUOTE.len_utf8()..];
        Ok(text)
    }

    fn endpoint(&self, text: &str) -> Result<AbsoluteTime> {
        AbsoluteTime::decode_text(text, self.config).map_err(|source| Error::InvalidEndpoint {
            input: self.input.to_owned(),
            source: Box::new(source),
        })
    }

    fn literal(&mut self) -> Result<Literal> {
        if self.rest.trim_matches(|c: char| c.is_ascii_whitespace()) == UNDEFINED_RANGE {
            return Ok(Literal::Undefined);
        }

        self.expect('[')?;
        self.expect(QUOTE)?;
        if self.rest.starts_with(UNDEFINED_RANGE) {
            return Ok(Literal::Undefined);
        }
        let first = self.until_quote()?;
        let start = self.endpoint(first)?;

        self.expect(QUOTE)?;
        let second = self.until_quote()?;
        let end = self.endpoint(second)?;

        self.expect(']')?;
        if !self.rest.is_empty() {
            return Err(self.syntax_error());
        }
        Ok(Literal::Range(start, end))
    }
}

/// Parse an interval literal, decoding both endpoints with `config`.
pub(crate) fn parse_literal(input: &str, config: &DateTimeConfig) -> Result<Literal> {
    Parser {
        input,
        rest: input,
        config,
    }
    .literal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Literal> {
        parse_literal(input, &DateTimeConfig::default())
    }

    #[test]
    fn accepts_blanks_between_tokens() {
        assert_eq!(
            parse(r#"  [  "epoch"   "infinity"  ]"#),
            Ok(Literal::Range(AbsoluteTime::Real(0), AbsoluteTime::NoEnd))
        );
        assert_eq!(
            parse(r#"["Jan 2 1970" "epoch"]"#),
            Ok(Literal::Range(AbsoluteTime::Real(86_400), AbsoluteTime::Real(0)))
        );
    }

    #[test]
    fn any_ascii_whitespace_is_a_blank() {
        assert_eq!(
            parse("\t[\t\"epoch\"\t\"epoch\" ]\r\n"),
            Err(Error::syntax("tinterval", "\t[\t\"epoch\"\t\"epoch\" ]\r\n"))
        );
        assert_eq!(
            parse("\t[\t\"epoch\"\n\"infinity\"\x0c]"),
            Ok(Literal::Range(AbsoluteTime::Real(0), AbsoluteTime::NoEnd))
        );
        assert_eq!(parse("\tUndefined Range\n"), Ok(Literal::Undefined));
    }

    #[test]
    fn undefined_range_forms() {
        assert_eq!(parse("Undefined Range"), Ok(Literal::Undefined));
        assert_eq!(parse("  Undefined Range "), Ok(Literal::Undefined));
        assert_eq!(parse(r#"["Undefined Range"]"#), Ok(Literal::Undefined));
        assert_eq!(parse(r#"[ "Undefined Range" anything"#), Ok(Literal::Undefined));
        assert!(parse("undefined range").is_err());
    }

    #[test]
    fn structural_errors_name_the_whole_input() {
        for input in [
            "",
            "   ",
            r#""epoch" "epoch"]"#,
            r#"[epoch "epoch"]"#,
            r#"["epoch" "epoch""#,
            r#"["epoch" "epoch"] x"#,
            r#"["epoch" "epoch"]]"#,
            r#"["epoch"]"#,
            r#"["epoch" "epoch"#,
        ] {
            assert_eq!(parse(input), Err(Error::syntax("tinterval", input)), "{input:?}");
        }
    }

    #[test]
    fn endpoint_errors_keep_their_cause() {
        let input = r#"[ "bad" "Jan 1 1970" ]"#;
        match parse(input) {
            Err(Error::InvalidEndpoint { input: whole, source }) => {
                assert_eq!(whole, input);
                assert!(matches!(*source, Error::InvalidSyntax { type_name: "abstime", .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
