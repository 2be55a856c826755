use counter::Counter;
use indexmap::IndexMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;

use crate::compound::Compound;

/// Syntax errors raised while reading a formula.
///
/// Every variant points back into the input so callers can report where the
/// formula went wrong. A failed parse never yields a partial [`Compound`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("count at position {position} does not follow an element or a group")]
    UnexpectedCount { position: usize },

    #[error("unmatched ')' at position {position}")]
    UnmatchedClose { position: usize },

    #[error("group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("count '{value}' at position {position} is out of range")]
    InvalidCount { value: String, position: usize },

    #[error("atom count for '{symbol}' overflows")]
    CountOverflow { symbol: String },
}

#[derive(EnumIter, Debug, Display, AsRefStr, PartialEq, Eq, Clone, Copy)]
pub enum TokenType {
    Element,
    Number,
    LParen,
    RParen,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenType,
    value: String,
    position: usize,
}

impl Token {
    fn new(kind: TokenType, value: &str, position: usize) -> Self {
        Token {
            kind,
            value: value.to_string(),
            position,
        }
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte offset of the token in the original formula.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl TokenType {
    const fn regex(&self) -> &'static str {
        match self {
            TokenType::Element => r"[A-Z][a-z]*",
            TokenType::Number => r"[0-9]+",
            TokenType::LParen => r"\(",
            TokenType::RParen => r"\)",
            // (?s) so that newlines are reported instead of skipped
            TokenType::Mismatch => r"(?s:.)",
        }
    }
}

// ----- Tokenization -----

static TOKEN_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    let regex_str = TokenType::iter()
        .map(|t| format!("(?P<{}>{})", t.as_ref(), t.regex()))
        .collect::<Vec<_>>()
        .join("|");
    regex::Regex::new(&regex_str).expect("token patterns are valid")
});

/// Splits a formula into element, number and parenthesis tokens.
///
/// Anything else (whitespace, lowercase-initial symbols, brackets, charges)
/// is rejected with [`ParseError::InvalidCharacter`].
pub fn tokenize(formula: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();

    for caps in TOKEN_REGEX.captures_iter(formula) {
        let Some((kind, mat)) = TokenType::iter()
            .find_map(|token_type| caps.name(token_type.as_ref()).map(|m| (token_type, m)))
        else {
            continue;
        };

        if kind == TokenType::Mismatch {
            let character = mat.as_str().chars().next().unwrap_or_default();
            return Err(ParseError::InvalidCharacter {
                character,
                position: mat.start(),
            });
        }
        tokens.push(Token::new(kind, mat.as_str(), mat.start()));
    }
    Ok(tokens)
}

// ----- Parsing -----

/// Atom counts of one nesting level, remembering first-appearance order.
struct Frame {
    counts: Counter<String, u32>,
    order: Vec<String>,
}

impl Frame {
    fn new() -> Self {
        Frame {
            counts: Counter::new(),
            order: Vec::new(),
        }
    }

    fn add(&mut self, symbol: &str, qty: u32) -> Result<(), ParseError> {
        match self.counts.get_mut(symbol) {
            Some(total) => {
                *total = total
                    .checked_add(qty)
                    .ok_or_else(|| ParseError::CountOverflow {
                        symbol: symbol.to_string(),
                    })?;
            }
            None => {
                self.counts.insert(symbol.to_string(), qty);
                self.order.push(symbol.to_string());
            }
        }
        Ok(())
    }

    fn scale(&mut self, multiplier: u32) -> Result<(), ParseError> {
        for symbol in &self.order {
            if let Some(total) = self.counts.get_mut(symbol) {
                *total = total
                    .checked_mul(multiplier)
                    .ok_or_else(|| ParseError::CountOverflow {
                        symbol: symbol.clone(),
                    })?;
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: Frame) -> Result<(), ParseError> {
        for symbol in &other.order {
            let qty = other.counts.get(symbol).copied().unwrap_or(0);
            self.add(symbol, qty)?;
        }
        Ok(())
    }

    /// Composition in first-appearance order, without zero counts.
    fn into_composition(self) -> IndexMap<String, u32> {
        let Frame { counts, order } = self;
        order
            .into_iter()
            .filter_map(|symbol| match counts.get(&symbol) {
                Some(&count) if count > 0 => Some((symbol, count)),
                _ => None,
            })
            .collect()
    }
}

/// Single left-to-right pass over the tokens with one [`Frame`] per open group.
struct Parser {
    tokens: Vec<Token>,
    position: usize,
    root: Frame,
    /// Open groups with the position of their '('.
    groups: Vec<(Frame, usize)>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            root: Frame::new(),
            groups: Vec::new(),
        }
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn top(&mut self) -> &mut Frame {
        match self.groups.last_mut() {
            Some((frame, _)) => frame,
            None => &mut self.root,
        }
    }

    fn run(mut self) -> Result<IndexMap<String, u32>, ParseError> {
        while let Some(token) = self.current_token() {
            let (kind, position) = (token.kind, token.position);
            match kind {
                TokenType::Element => {
                    let symbol = token.value.clone();
                    self.parse_element_unit(&symbol)?;
                }
                TokenType::LParen => {
                    self.advance(); // Consume LPAREN
                    self.groups.push((Frame::new(), position));
                }
                TokenType::RParen => self.close_group(position)?,
                TokenType::Number => return Err(ParseError::UnexpectedCount { position }),
                TokenType::Mismatch => {
                    let character = token.value.chars().next().unwrap_or_default();
                    return Err(ParseError::InvalidCharacter {
                        character,
                        position,
                    });
                }
            }
        }

        if let Some((_, opened_at)) = self.groups.last() {
            return Err(ParseError::UnclosedGroup {
                position: *opened_at,
            });
        }
        Ok(self.root.into_composition())
    }

    /// element_unit -> ELEMENT \[NUMBER\]
    fn parse_element_unit(&mut self, symbol: &str) -> Result<(), ParseError> {
        self.advance(); // Consume ELEMENT
        let count = self.parse_count()?;
        self.top().add(symbol, count)
    }

    /// RPAREN \[NUMBER\]: scales the innermost group and folds it into its parent.
    fn close_group(&mut self, position: usize) -> Result<(), ParseError> {
        let Some((mut frame, _)) = self.groups.pop() else {
            return Err(ParseError::UnmatchedClose { position });
        };
        self.advance(); // Consume RPAREN

        let multiplier = self.parse_count()?;
        frame.scale(multiplier)?;
        self.top().merge(frame)
    }

    /// Optional trailing multiplier; absent means 1.
    fn parse_count(&mut self) -> Result<u32, ParseError> {
        let Some(
            token @ Token {
                kind: TokenType::Number,
                ..
            },
        ) = self.current_token()
        else {
            return Ok(1);
        };

        let count = token.value.parse().map_err(|_| ParseError::InvalidCount {
            value: token.value.clone(),
            position: token.position,
        })?;
        self.advance(); // Consume NUMBER
        Ok(count)
    }
}

/// Parses a chemical formula into a [`Compound`].
///
/// Counts of a symbol that appears more than once, at any nesting depth,
/// are summed. The composition keeps the order in which symbols first appear
/// in the formula. Nesting depth is limited only by memory.
///
/// A symbol whose total count is zero is dropped, so `"H0"` yields the same
/// empty composition as `""` and contributes no weight.
///
/// # Examples
/// ```
/// let compound = molar_mass::parse("Mg(OH)2").unwrap();
/// assert_eq!(compound.count("Mg"), 1);
/// assert_eq!(compound.count("O"), 2);
/// assert_eq!(compound.count("H"), 2);
/// assert_eq!(compound.symbols().collect::<Vec<_>>(), ["Mg", "O", "H"]);
/// ```
pub fn parse(formula: &str) -> Result<Compound, ParseError> {
    let tokens = tokenize(formula)?;
    let composition = Parser::new(tokens).run()?;
    Ok(Compound::new(formula, composition))
}
