//! Character-level scanning over a cron expression.

use std::fmt;

use super::error::{ParseError, ParseErrorKind};

/// The lexical class of the character under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `-`
    Hyphen,
    /// `,`
    Comma,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `0`–`9`
    Digit,
    /// `@`
    At,
    /// `a`–`z`
    LowerChar,
    /// `A`–`Z`
    UpperChar,
    /// Space or tab.
    Whitespace,
    /// Any character outside the cron alphabet.
    Other,
    /// Past the last character.
    End,
}

impl Symbol {
    fn of(c: char) -> Self {
        match c {
            '-' => Symbol::Hyphen,
            ',' => Symbol::Comma,
            '*' => Symbol::Asterisk,
            '/' => Symbol::Slash,
            '0'..='9' => Symbol::Digit,
            '@' => Symbol::At,
            'a'..='z' => Symbol::LowerChar,
            'A'..='Z' => Symbol::UpperChar,
            ' ' | '\t' => Symbol::Whitespace,
            _ => Symbol::Other,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::Hyphen => "'-'",
            Symbol::Comma => "','",
            Symbol::Asterisk => "'*'",
            Symbol::Slash => "'/'",
            Symbol::Digit => "digit",
            Symbol::At => "'@'",
            Symbol::LowerChar => "lowercase letter",
            Symbol::UpperChar => "uppercase letter",
            Symbol::Whitespace => "whitespace",
            Symbol::Other => "unrecognized character",
            Symbol::End => "end of input",
        };
        f.write_str(name)
    }
}

/// Owns the expression text and the scan position.
///
/// The position counts characters from the start of the (already trimmed)
/// input and is what parse errors report.
pub(crate) struct ParseCursor {
    chars: Vec<char>,
    position: usize,
}

impl ParseCursor {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
        }
    }

    /// Character offset of the cursor.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// The class of the current character, [`Symbol::End`] past the input.
    pub(crate) fn symbol(&self) -> Symbol {
        match self.chars.get(self.position) {
            Some(&c) => Symbol::of(c),
            None => Symbol::End,
        }
    }

    /// Step over the current character.
    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    /// Greedily consume a run of one symbol class.
    fn read_run(&mut self, symbol: Symbol) -> String {
        let mut run = String::new();
        while self.symbol() == symbol {
            run.push(self.chars[self.position]);
            self.advance();
        }
        run
    }

    /// Consume a digit run and parse it as a number.
    ///
    /// A run too large for `u32` is a positioned error.
    pub(crate) fn read_digits(&mut self) -> Result<u32, ParseError> {
        let start = self.position;
        self.read_run(Symbol::Digit)
            .parse()
            .map_err(|_| ParseError::new(start, ParseErrorKind::NumberTooLarge))
    }

    /// Consume a run of uppercase letters.
    pub(crate) fn read_upper(&mut self) -> String {
        self.read_run(Symbol::UpperChar)
    }

    /// Consume a run of lowercase letters.
    pub(crate) fn read_lower(&mut self) -> String {
        self.read_run(Symbol::LowerChar)
    }

    /// Consume a run of spaces and tabs.
    pub(crate) fn skip_whitespace(&mut self) {
        while self.symbol() == Symbol::Whitespace {
            self.advance();
        }
    }
}
