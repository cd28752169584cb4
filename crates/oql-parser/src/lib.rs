//! Parser front end for the OQL object-query dialect (an HQL/JPQL-style
//! language).
//!
//! Three layers, composed linearly: [`Lexer`] (text → tokens), [`Parser`]
//! (tokens → CST), and the renderer living on the CST types themselves
//! (`oql_ast::render` / `fmt::Display`). The round-trip law is the core
//! contract: for a whitespace-normalized query `q`,
//! `render(&parse(q)?) == q`.
//!
//! Parsing is all-or-nothing: the first mismatch aborts with a
//! [`ParseError`] and no partial tree is ever returned. Each invocation owns
//! its own state, so concurrent callers need no synchronization.

mod expr;
mod lexer;
mod parser;

use tracing::{debug, trace};

pub use lexer::{LexError, Lexer};
pub use oql_ast as ast;
pub use parser::{ParseError, Parser};

use oql_ast::{Expr, Statement};

/// Any failure produced by [`parse`]: either the character stream was
/// malformed (lexing) or the token stream matched no grammar rule (syntax).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
}

/// Parse a single query statement.
///
/// The entire input must be consumed; trailing tokens are a syntax error.
pub fn parse(query: &str) -> Result<Statement, Error> {
    let tokens = Lexer::tokenize(query)?;
    trace!(tokens = tokens.len(), "lexed query");
    let mut parser = Parser::new(tokens);
    let statement = parser.parse_statement().inspect_err(|e| {
        debug!(line = e.line, col = e.col, "parse failed");
    })?;
    parser.expect_eof()?;
    Ok(statement)
}

/// Parse a standalone expression, e.g. a sort key to splice into an
/// existing tree.
pub fn parse_expression(text: &str) -> Result<Expr, Error> {
    let tokens = Lexer::tokenize(text)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}
