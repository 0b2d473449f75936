//! Recursive-descent parser over a token cursor
//!
//! One method per grammar rule. Every stage is type-checked as soon as its closing
//! brace is consumed, so the first error in source order decides the outcome. There is
//! no recovery: any error abandons the parse.
//!
//! Nesting is bounded. Folding stacks every stage's expression into a single tree, so
//! besides the per-expression limit [MAX_NESTING] the combined nesting of all stages is
//! capped by [MAX_CHAIN_WEIGHT]. Input over either limit is a syntax error.

use crate::chain::ast::{Call, CallChain, Expression, Op};
use crate::chain::error::CompileError;
use crate::chain::token::Token;

/// Deepest expression nesting a single stage may use
pub const MAX_NESTING: usize = 256;

/// Budget for the summed nesting of every stage in a chain, one unit extra per stage
pub const MAX_CHAIN_WEIGHT: usize = 2048;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    deepest: usize,
    weight: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
            deepest: 0,
            weight: 0,
        }
    }

    /// Parse the whole token sequence as one call chain.
    ///
    /// Leftover tokens after a complete chain are a syntax error.
    pub fn parse(&mut self) -> Result<CallChain, CompileError> {
        let chain = self.parse_call_chain()?;
        if !self.is_at_end() {
            return Err(CompileError::Syntax);
        }
        Ok(chain)
    }

    fn parse_call_chain(&mut self) -> Result<CallChain, CompileError> {
        let mut calls = vec![self.parse_call()?];
        while self.peek() == Some(&Token::Pipe) {
            self.advance();
            calls.push(self.parse_call()?);
        }
        CallChain::from_calls(calls).ok_or(CompileError::Syntax)
    }

    fn parse_call(&mut self) -> Result<Call, CompileError> {
        let make_call: fn(Expression) -> Call = match self.advance() {
            Some(Token::MapOpen) => Call::Map,
            Some(Token::FilterOpen) => Call::Filter,
            _ => return Err(CompileError::Syntax),
        };
        self.deepest = 0;
        let expr = self.parse_expression()?;
        self.expect(&Token::CloseBrace)?;

        self.weight += self.deepest + 1;
        if self.weight > MAX_CHAIN_WEIGHT {
            return Err(CompileError::Syntax);
        }

        let call = make_call(expr);
        if !call.is_well_typed() {
            return Err(CompileError::Type);
        }
        Ok(call)
    }

    fn parse_expression(&mut self) -> Result<Expression, CompileError> {
        self.enter()?;
        let left = self.parse_element()?;
        let expr = match self.peek().and_then(operator_for) {
            Some(op) => {
                self.advance();
                let right = self.parse_expression()?;
                Expression::binary(left, op, right)
            }
            None => left,
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn parse_element(&mut self) -> Result<Expression, CompileError> {
        match self.advance() {
            Some(Token::Element) => Ok(Expression::Element),
            Some(Token::Minus) => match self.advance() {
                Some(Token::Number(digits)) => {
                    // parsed with its sign so that i32::MIN is representable
                    let value = format!("-{}", digits)
                        .parse::<i32>()
                        .map_err(|_| CompileError::Syntax)?;
                    Ok(Expression::Constant(value))
                }
                _ => Err(CompileError::Syntax),
            },
            Some(Token::Number(digits)) => digits
                .parse::<i32>()
                .map(Expression::Constant)
                .map_err(|_| CompileError::Syntax),
            Some(Token::OpenParen) => {
                let inner = self.parse_expression()?;
                self.expect(&Token::CloseParen)?;
                Ok(inner)
            }
            _ => Err(CompileError::Syntax),
        }
    }

    fn enter(&mut self) -> Result<(), CompileError> {
        if self.depth >= MAX_NESTING {
            return Err(CompileError::Syntax);
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), CompileError> {
        match self.advance() {
            Some(ref token) if token == expected => Ok(()),
            _ => Err(CompileError::Syntax),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }
}

fn operator_for(token: &Token) -> Option<Op> {
    let op = match token {
        Token::Plus => Op::PLUS,
        Token::Minus => Op::MINUS,
        Token::Times => Op::TIMES,
        Token::Greater => Op::GT,
        Token::Less => Op::LT,
        Token::And => Op::AND,
        Token::Or => Op::OR,
        Token::Equals => Op::EQ,
        _ => return None,
    };
    Some(op)
}
