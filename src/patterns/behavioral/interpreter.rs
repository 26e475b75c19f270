//! Interpreter: turn text into tokens, tokens into an expression tree, and
//! evaluate the tree against a context.

use std::collections::HashMap;

use thiserror::Error;

use crate::console;
use crate::error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("number '{0}' does not fit in an i32")]
    InvalidNumber(String),
    #[error("variable names are a single letter, got '{0}'")]
    InvalidVariableName(String),
    #[error("variable '{0}' has no value")]
    UnknownVariable(char),
    #[error("expected a number or variable")]
    MissingOperand,
}

// =============================================================================
// Context and expression tree
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct Context {
    variables: HashMap<String, i32>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&mut self, name: &str, value: i32) {
        self.variables.insert(name.to_string(), value);
    }

    /// Unset variables read as zero.
    pub fn variable(&self, name: &str) -> i32 {
        self.variables.get(name).copied().unwrap_or(0)
    }
}

pub trait Expression {
    fn interpret(&self, context: &Context) -> i32;
}

pub struct Number(pub i32);

impl Expression for Number {
    fn interpret(&self, _context: &Context) -> i32 {
        self.0
    }
}

pub struct Variable(pub String);

impl Variable {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl Expression for Variable {
    fn interpret(&self, context: &Context) -> i32 {
        context.variable(&self.0)
    }
}

pub struct Add {
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl Add {
    pub fn new(left: impl Expression + 'static, right: impl Expression + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Expression for Add {
    fn interpret(&self, context: &Context) -> i32 {
        self.left
            .interpret(context)
            .wrapping_add(self.right.interpret(context))
    }
}

pub struct Subtract {
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl Subtract {
    pub fn new(left: impl Expression + 'static, right: impl Expression + 'static) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Expression for Subtract {
    fn interpret(&self, context: &Context) -> i32 {
        self.left
            .interpret(context)
            .wrapping_sub(self.right.interpret(context))
    }
}

// =============================================================================
// Lexing and parsing
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(i32),
    Variable(char),
    Plus,
    Minus,
}

fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                }
                let value = digits
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(digits.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() => {
                let mut name = String::new();
                while let Some(&l) = chars.peek().filter(|l| l.is_alphabetic()) {
                    name.push(l);
                    chars.next();
                }
                let mut letters = name.chars();
                match (letters.next(), letters.next()) {
                    (Some(letter), None) => tokens.push(Token::Variable(letter)),
                    _ => return Err(ParseError::InvalidVariableName(name)),
                }
            }
            other => return Err(ParseError::UnexpectedCharacter(other)),
        }
    }
    Ok(tokens)
}

/// Evaluates `+`/`-` expressions over integers and single-letter variables.
#[derive(Debug, Default)]
pub struct ExpressionProcessor {
    variables: HashMap<char, i32>,
}

impl ExpressionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&mut self, name: char, value: i32) {
        self.variables.insert(name, value);
    }

    fn operand(&self, token: Option<Token>) -> Result<Box<dyn Expression>, ParseError> {
        match token {
            Some(Token::Number(n)) => Ok(Box::new(Number(n))),
            Some(Token::Variable(v)) => {
                let value = self
                    .variables
                    .get(&v)
                    .copied()
                    .ok_or(ParseError::UnknownVariable(v))?;
                Ok(Box::new(Number(value)))
            }
            _ => Err(ParseError::MissingOperand),
        }
    }

    /// Builds the expression tree, folding left to right.
    pub fn parse(&self, input: &str) -> Result<Box<dyn Expression>, ParseError> {
        let mut tokens = lex(input)?.into_iter();
        let mut tree = self.operand(tokens.next())?;

        while let Some(op) = tokens.next() {
            let right = self.operand(tokens.next())?;
            tree = match op {
                Token::Plus => Box::new(Add { left: tree, right }),
                Token::Minus => Box::new(Subtract { left: tree, right }),
                Token::Number(_) | Token::Variable(_) => return Err(ParseError::MissingOperand),
            };
        }
        Ok(tree)
    }

    pub fn try_calculate(&self, input: &str) -> Result<i32, ParseError> {
        let tree = self.parse(input)?;
        Ok(tree.interpret(&Context::new()))
    }

    /// Any parse failure yields 0.
    pub fn calculate(&self, input: &str) -> i32 {
        self.try_calculate(input).unwrap_or_else(|err| {
            log::debug!("cannot evaluate {input:?}: {err}");
            0
        })
    }
}

pub fn run() -> error::Result<()> {
    console::demo("Interpreter");

    let mut context = Context::new();
    context.set_variable("x", 2);
    context.set_variable("y", 4);
    context.set_variable("z", 8);

    let expression = Subtract::new(
        Add::new(Variable::new("y"), Variable::new("z")),
        Variable::new("x"),
    );
    println!("Expression result: {}", expression.interpret(&context));

    let mut processor = ExpressionProcessor::new();
    processor.set_variable('x', 3);
    for input in ["1+2+3", "10-2-x"] {
        println!("{input} = {}", processor.try_calculate(input)?);
    }
    println!("1+2+xy = {}", processor.calculate("1+2+xy"));
    Ok(())
}
