//! Button actions: parsed command calls bound against a registered table
//!
//! An action string names a command and passes literal arguments:
//!
//! ```text
//! audio_manager.play_music("bgm_theme")
//! window_manager.toggle_fullscreen
//! debug(42, 1.5, 'text', true)
//! ```
//!
//! Strings are parsed when configuration is loaded. Binding against a
//! [`CommandTable`] rejects names that were never registered, so a typo fails
//! at startup instead of on the first click.

use std::collections::HashMap;
use std::fmt;

use logos::Logos;

use crate::error::ResourceError;

/// A literal argument in an action string
#[derive(Debug, Clone, PartialEq)]
pub enum ActionArg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ActionArg {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A parsed action: command name plus arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    pub command: String,
    pub args: Vec<ActionArg>,
}

impl fmt::Display for ActionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.command)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                ActionArg::Str(s) => write!(f, "{:?}", s)?,
                ActionArg::Int(v) => write!(f, "{}", v)?,
                ActionArg::Float(v) => write!(f, "{}", v)?,
                ActionArg::Bool(v) => write!(f, "{}", v)?,
            }
        }
        f.write_str(")")
    }
}

/// Tokens of an action string
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token("true", |_| true)]
    #[token("True", |_| true)]
    #[token("false", |_| false)]
    #[token("False", |_| false)]
    Bool(bool),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    Str(String),

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),
}

/// Strip the quotes of a string literal and resolve its escapes
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => {}
        }
    }
    value
}

/// Byte range in an action string
pub type Span = std::ops::Range<usize>;

/// Lex an action string into tokens with spans; fails with the span of the
/// first unrecognized input
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Span> {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(span),
        })
        .collect()
}

/// Parse an action string; empty strings mean "no action"
pub fn parse_action(action: &str) -> Result<Option<ActionCall>, ResourceError> {
    let action = action.trim();
    if action.is_empty() {
        return Ok(None);
    }

    let fail = |msg: String| ResourceError::configuration(format!("action '{}': {}", action, msg));
    let tokens = lex(action).map_err(|span| {
        let rest = &action[span.start..];
        if rest.starts_with('"') || rest.starts_with('\'') {
            fail("unterminated string".to_string())
        } else {
            fail(format!("unexpected '{}'", &action[span]))
        }
    })?;

    ActionParser::new(&tokens).parse().map_err(fail).map(Some)
}

/// Recursive descent over lexed tokens:
/// `command := ident ("." ident)*`, `call := command ("(" args? ")")?`
struct ActionParser<'t> {
    tokens: &'t [(Token, Span)],
    pos: usize,
}

impl<'t> ActionParser<'t> {
    fn new(tokens: &'t [(Token, Span)]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn parse(mut self) -> Result<ActionCall, String> {
        let command = self.command()?;
        let args = match self.peek() {
            None => Vec::new(),
            Some(Token::LParen) => {
                self.pos += 1;
                self.args()?
            }
            Some(other) => return Err(format!("unexpected {} after command name", describe(other))),
        };
        if let Some(extra) = self.peek() {
            return Err(format!("unexpected {} after ')'", describe(extra)));
        }
        Ok(ActionCall { command, args })
    }

    fn command(&mut self) -> Result<String, String> {
        let mut command = self.ident()?;
        while self.peek() == Some(&Token::Dot) {
            self.pos += 1;
            command.push('.');
            command.push_str(&self.ident()?);
        }
        Ok(command)
    }

    fn ident(&mut self) -> Result<String, String> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(name.clone()),
            Some(other) => Err(format!("expected a name, found {}", describe(other))),
            None => Err("expected a name".to_string()),
        }
    }

    /// Arguments after `(`, through the closing `)`
    fn args(&mut self) -> Result<Vec<ActionArg>, String> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.literal()?);
            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RParen) => return Ok(args),
                Some(other) => return Err(format!("unexpected {} after argument", describe(other))),
                None => return Err("missing ')'".to_string()),
            }
        }
    }

    fn literal(&mut self) -> Result<ActionArg, String> {
        match self.advance() {
            Some(Token::Str(s)) => Ok(ActionArg::Str(s.clone())),
            Some(Token::Int(i)) => Ok(ActionArg::Int(*i)),
            Some(Token::Float(f)) => Ok(ActionArg::Float(*f)),
            Some(Token::Bool(b)) => Ok(ActionArg::Bool(*b)),
            Some(Token::RParen) => Err("trailing comma".to_string()),
            Some(other) => Err(format!("unsupported argument {}", describe(other))),
            None => Err("missing ')'".to_string()),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("'{}'", name),
        Token::Dot => "'.'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Str(s) => format!("{:?}", s),
        Token::Int(i) => i.to_string(),
        Token::Float(f) => f.to_string(),
        Token::Bool(b) => b.to_string(),
    }
}

type Handler<C> = Box<dyn Fn(&mut C, &[ActionArg])>;

/// Registered commands, invoked against a context `C`
pub struct CommandTable<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> Default for CommandTable<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for CommandTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.names())
            .finish()
    }
}

impl<C> CommandTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a command
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut C, &[ActionArg]) + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check a parsed call against the table
    pub fn check(&self, call: &ActionCall) -> Result<(), ResourceError> {
        if self.contains(&call.command) {
            Ok(())
        } else {
            Err(ResourceError::configuration(format!(
                "unknown command '{}'",
                call.command
            )))
        }
    }

    /// Parse an action string and check it; `None` for an empty action
    pub fn bind(&self, action: &str) -> Result<Option<ActionCall>, ResourceError> {
        let call = parse_action(action)?;
        if let Some(call) = &call {
            self.check(call)?;
        }
        Ok(call)
    }

    /// Run a call against `context`
    pub fn invoke(&self, call: &ActionCall, context: &mut C) -> Result<(), ResourceError> {
        let handler = self.handlers.get(&call.command).ok_or_else(|| {
            ResourceError::configuration(format!("unknown command '{}'", call.command))
        })?;
        handler(context, &call.args);
        Ok(())
    }
}
