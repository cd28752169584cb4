//! Recursive-descent parser: statements and clauses.
//!
//! Expression parsing lives in `expr.rs`. The parser consumes the token
//! stream with bounded lookahead only (`peek_nth`); the first mismatch
//! aborts with a [`ParseError`] carrying the accepted token kinds. There is
//! no recovery and no partial tree.
//!
//! Keyword-vs-identifier ambiguity is resolved uniformly: every rule tries
//! its keyword production first (with whatever lookahead it needs) and
//! falls back to reading the token as a name. No reserved-word list exists.

use oql_ast::{
    Alias, Assignment, CollectionJoin, ConflictAction, ConflictTarget, Cte, DeleteStatement,
    DottedName, EntityRef, FetchClause, FetchMode, FromClause, FromRoot, GroupByClause,
    HavingClause, InsertSource, InsertStatement, Join, JoinKind, JoinRestriction, LimitClause,
    OffsetClause, OnConflictClause, OrderByClause, OrderedQuery, PathExpression, PathRoot,
    QualifiedJoin, QueryBody, QueryExpression, SelectClause, SelectItem, SelectValue, SetClause,
    SetOperator, SortSpec, Span, Statement, Token, TokenKind, UpdateStatement, WhereClause,
    WithClause, AliasedExpr, NewExpr, NewTarget, SourceRef,
};

use crate::lexer::LexError;
use crate::Lexer;

/// The token sequence matched no grammar alternative at `span`.
///
/// `expected` is the set of token kinds that would have been accepted at the
/// failure position; `found` is the token actually there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: expected one of {expected:?}, found {found:?}")]
pub struct ParseError {
    pub span: Span,
    pub line: u32,
    pub col: u32,
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
}

pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Lex and wrap in one step.
    pub fn from_query(query: &str) -> Result<Self, LexError> {
        Ok(Self::new(Lexer::tokenize(query)?))
    }

    /// Parse exactly one statement. The caller decides whether trailing
    /// input is acceptable; see [`Parser::expect_eof`].
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek() {
            TokenKind::KwSelect | TokenKind::KwFrom | TokenKind::KwWith => {
                Ok(Statement::Select(self.parse_query_expression()?))
            }
            TokenKind::KwUpdate => Ok(Statement::Update(self.parse_update()?)),
            TokenKind::KwDelete => Ok(Statement::Delete(self.parse_delete()?)),
            TokenKind::KwInsert => Ok(Statement::Insert(self.parse_insert()?)),
            _ => Err(self.err_expected(&[
                TokenKind::KwSelect,
                TokenKind::KwFrom,
                TokenKind::KwWith,
                TokenKind::KwUpdate,
                TokenKind::KwDelete,
                TokenKind::KwInsert,
            ])),
        }
    }

    pub fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.err_expected(&[TokenKind::Eof]))
        }
    }

    // -----------------------------------------------------------------------
    // Token navigation
    // -----------------------------------------------------------------------

    pub(crate) fn peek(&self) -> TokenKind {
        self.tokens.get(self.pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn peek_nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek() == TokenKind::Eof
    }

    /// Consume and return the current token. Never moves past EOF.
    pub(crate) fn advance(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                let tok = tok.clone();
                if tok.kind != TokenKind::Eof {
                    self.pos += 1;
                }
                tok
            }
            None => Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span: Span::ZERO,
                line: 0,
                col: 0,
            },
        }
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek() == kind {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(self.err_expected(&[kind]))
        }
    }

    pub(crate) fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        if kinds.contains(&self.peek()) {
            Ok(self.advance())
        } else {
            Err(self.err_expected(kinds))
        }
    }

    pub(crate) fn err_expected(&self, expected: &[TokenKind]) -> ParseError {
        let (span, line, col, found) = self.current().map_or(
            (Span::ZERO, 0, 0, TokenKind::Eof),
            |t| (t.span, t.line, t.col, t.kind),
        );
        ParseError {
            span,
            line,
            col,
            expected: expected.to_vec(),
            found,
        }
    }

    // -----------------------------------------------------------------------
    // Names and aliases
    // -----------------------------------------------------------------------

    /// Accept a name: a plain identifier or any keyword token. This is the
    /// identifier fallback every grammar rule shares.
    pub(crate) fn parse_identifier_like(&mut self) -> Result<Token, ParseError> {
        if self.peek().is_identifier_like() {
            Ok(self.advance())
        } else {
            Err(self.err_expected(&[TokenKind::Ident]))
        }
    }

    /// A dotted name chain: `Person`, `org.acme.Gender`. Keywords are legal
    /// in any segment (`com.company.case.Thing`).
    pub(crate) fn parse_dotted_name(&mut self) -> Result<DottedName, ParseError> {
        let mut segments = vec![self.parse_identifier_like()?];
        while self.peek() == TokenKind::Dot && self.peek_nth(1).is_identifier_like() {
            self.advance(); // dot
            segments.push(self.advance());
        }
        Ok(DottedName { segments })
    }

    /// Optional alias: `AS name` (any name), or a bare plain identifier.
    /// A bare keyword is never an alias — its own production wins first.
    pub(crate) fn try_alias(&mut self) -> Result<Option<Alias>, ParseError> {
        if let Some(as_kw) = self.eat(TokenKind::KwAs) {
            let name = self.parse_identifier_like()?;
            return Ok(Some(Alias {
                as_kw: Some(as_kw),
                name,
            }));
        }
        if self.peek() == TokenKind::Ident {
            return Ok(Some(Alias {
                as_kw: None,
                name: self.advance(),
            }));
        }
        Ok(None)
    }

    // -----------------------------------------------------------------------
    // Query expressions
    // -----------------------------------------------------------------------

    pub(crate) fn parse_query_expression(&mut self) -> Result<QueryExpression, ParseError> {
        let with = if self.peek() == TokenKind::KwWith {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        let first = self.parse_ordered_query()?;
        let mut rest = Vec::new();
        while matches!(
            self.peek(),
            TokenKind::KwUnion | TokenKind::KwIntersect | TokenKind::KwExcept
        ) {
            let op = self.advance();
            let qualifier = self
                .eat(TokenKind::KwAll)
                .or_else(|| self.eat(TokenKind::KwDistinct));
            let branch = self.parse_ordered_query()?;
            rest.push((SetOperator { op, qualifier }, branch));
        }
        Ok(QueryExpression { with, first, rest })
    }

    fn parse_with_clause(&mut self) -> Result<WithClause, ParseError> {
        let with = self.expect(TokenKind::KwWith)?;
        let mut ctes = vec![self.parse_cte()?];
        while self.eat(TokenKind::Comma).is_some() {
            ctes.push(self.parse_cte()?);
        }
        Ok(WithClause { with, ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let name = self.parse_identifier_like()?;
        let as_kw = self.expect(TokenKind::KwAs)?;
        self.expect(TokenKind::LeftParen)?;
        let query = Box::new(self.parse_query_expression()?);
        self.expect(TokenKind::RightParen)?;
        Ok(Cte { name, as_kw, query })
    }

    fn parse_ordered_query(&mut self) -> Result<OrderedQuery, ParseError> {
        let body = match self.peek() {
            TokenKind::KwSelect => {
                let select = self.parse_select_clause()?;
                let from = if self.peek() == TokenKind::KwFrom {
                    Some(self.parse_from_clause()?)
                } else {
                    None
                };
                let where_clause = self.try_where_clause()?;
                let group_by = self.try_group_by_clause()?;
                let having = self.try_having_clause()?;
                QueryBody::SelectFirst {
                    select,
                    from,
                    where_clause,
                    group_by,
                    having,
                }
            }
            TokenKind::KwFrom => {
                let from = self.parse_from_clause()?;
                let where_clause = self.try_where_clause()?;
                let group_by = self.try_group_by_clause()?;
                let having = self.try_having_clause()?;
                let select = if self.peek() == TokenKind::KwSelect {
                    Some(self.parse_select_clause()?)
                } else {
                    None
                };
                QueryBody::FromFirst {
                    from,
                    where_clause,
                    group_by,
                    having,
                    select,
                }
            }
            _ => return Err(self.err_expected(&[TokenKind::KwSelect, TokenKind::KwFrom])),
        };

        let order_by = if self.peek() == TokenKind::KwOrder {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };

        // LIMIT / OFFSET / FETCH are independently optional, in any order.
        let mut limit = None;
        let mut offset = None;
        let mut fetch = None;
        loop {
            match self.peek() {
                TokenKind::KwLimit if limit.is_none() => {
                    let kw = self.advance();
                    let value = self.parse_expr()?;
                    limit = Some(LimitClause { limit: kw, value });
                }
                TokenKind::KwOffset if offset.is_none() => {
                    let kw = self.advance();
                    let value = self.parse_expr()?;
                    let rows = self
                        .eat(TokenKind::KwRows)
                        .or_else(|| self.eat(TokenKind::KwRow));
                    offset = Some(OffsetClause {
                        offset: kw,
                        value,
                        rows,
                    });
                }
                TokenKind::KwFetch if fetch.is_none() => {
                    let kw = self.advance();
                    let first = self.expect_one_of(&[TokenKind::KwFirst, TokenKind::KwNext])?;
                    let count = self.parse_expr()?;
                    let rows = self.expect_one_of(&[TokenKind::KwRows, TokenKind::KwRow])?;
                    let mode = if let Some(only) = self.eat(TokenKind::KwOnly) {
                        FetchMode::Only(only)
                    } else {
                        let with = self.expect(TokenKind::KwWith)?;
                        let ties = self.expect(TokenKind::KwTies)?;
                        FetchMode::WithTies { with, ties }
                    };
                    fetch = Some(FetchClause {
                        fetch: kw,
                        first,
                        count,
                        rows,
                        mode,
                    });
                }
                _ => break,
            }
        }

        Ok(OrderedQuery {
            body,
            order_by,
            limit,
            offset,
            fetch,
        })
    }

    // -----------------------------------------------------------------------
    // SELECT clause
    // -----------------------------------------------------------------------

    fn parse_select_clause(&mut self) -> Result<SelectClause, ParseError> {
        let select = self.expect(TokenKind::KwSelect)?;
        let distinct = self.eat(TokenKind::KwDistinct);
        let mut items = vec![self.parse_select_item()?];
        while self.eat(TokenKind::Comma).is_some() {
            items.push(self.parse_select_item()?);
        }
        Ok(SelectClause {
            select,
            distinct,
            items,
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.peek() == TokenKind::KwNew && self.peek_nth(1).is_identifier_like() {
            let value = SelectValue::New(self.parse_new_expr()?);
            let alias = self.try_alias()?;
            return Ok(SelectItem { value, alias });
        }
        let expr = self.parse_expr()?;
        let alias = self.try_alias()?;
        Ok(SelectItem {
            value: SelectValue::Expr(expr),
            alias,
        })
    }

    fn parse_new_expr(&mut self) -> Result<NewExpr, ParseError> {
        let new = self.expect(TokenKind::KwNew)?;
        let target = match self.peek() {
            TokenKind::KwMap if self.peek_nth(1) == TokenKind::LeftParen => {
                NewTarget::Map(self.advance())
            }
            TokenKind::KwList if self.peek_nth(1) == TokenKind::LeftParen => {
                NewTarget::List(self.advance())
            }
            _ => NewTarget::Class(self.parse_dotted_name()?),
        };
        self.expect(TokenKind::LeftParen)?;
        let mut args = vec![self.parse_aliased_expr()?];
        while self.eat(TokenKind::Comma).is_some() {
            args.push(self.parse_aliased_expr()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(NewExpr { new, target, args })
    }

    fn parse_aliased_expr(&mut self) -> Result<AliasedExpr, ParseError> {
        let expr = self.parse_expr()?;
        let alias = self.try_alias()?;
        Ok(AliasedExpr { expr, alias })
    }

    // -----------------------------------------------------------------------
    // FROM clause and joins
    // -----------------------------------------------------------------------

    fn parse_from_clause(&mut self) -> Result<FromClause, ParseError> {
        let from = self.expect(TokenKind::KwFrom)?;
        let mut roots = vec![self.parse_from_root()?];
        while self.eat(TokenKind::Comma).is_some() {
            roots.push(self.parse_from_root()?);
        }
        Ok(FromClause { from, roots })
    }

    fn parse_from_root(&mut self) -> Result<FromRoot, ParseError> {
        let source = self.parse_source_ref()?;
        let alias = self.try_alias()?;
        let joins = self.parse_joins()?;
        Ok(FromRoot {
            source,
            alias,
            joins,
        })
    }

    /// A joinable source: derived table, set-returning function, or path.
    pub(crate) fn parse_source_ref(&mut self) -> Result<SourceRef, ParseError> {
        if self.eat(TokenKind::LeftParen).is_some() {
            let query = Box::new(self.parse_query_expression()?);
            self.expect(TokenKind::RightParen)?;
            return Ok(SourceRef::Subquery(query));
        }
        let PathExpression { root, segments } = self.parse_path_expression()?;
        match root {
            PathRoot::Function(call) if segments.is_empty() => Ok(SourceRef::Function(*call)),
            root => Ok(SourceRef::Path(PathExpression { root, segments })),
        }
    }

    fn parse_joins(&mut self) -> Result<Vec<Join>, ParseError> {
        let mut joins = Vec::new();
        loop {
            match self.peek() {
                TokenKind::KwJoin
                | TokenKind::KwInner
                | TokenKind::KwLeft
                | TokenKind::KwRight
                | TokenKind::KwFull
                | TokenKind::KwCross => {
                    joins.push(Join::Qualified(self.parse_qualified_join()?));
                }
                // Legacy comma-join: `, IN(path) alias`.
                TokenKind::Comma
                    if self.peek_nth(1) == TokenKind::KwIn
                        && self.peek_nth(2) == TokenKind::LeftParen =>
                {
                    self.advance(); // comma
                    let in_kw = self.advance();
                    self.expect(TokenKind::LeftParen)?;
                    let path = self.parse_path_expression()?;
                    self.expect(TokenKind::RightParen)?;
                    let alias = self.try_alias()?;
                    joins.push(Join::CollectionIn(CollectionJoin { in_kw, path, alias }));
                }
                _ => break,
            }
        }
        Ok(joins)
    }

    fn parse_qualified_join(&mut self) -> Result<QualifiedJoin, ParseError> {
        let mut kind_tokens = Vec::new();
        let kind = match self.peek() {
            TokenKind::KwInner => {
                kind_tokens.push(self.advance());
                JoinKind::Inner
            }
            TokenKind::KwLeft => {
                kind_tokens.push(self.advance());
                if let Some(outer) = self.eat(TokenKind::KwOuter) {
                    kind_tokens.push(outer);
                }
                JoinKind::Left
            }
            TokenKind::KwRight => {
                kind_tokens.push(self.advance());
                if let Some(outer) = self.eat(TokenKind::KwOuter) {
                    kind_tokens.push(outer);
                }
                JoinKind::Right
            }
            TokenKind::KwFull => {
                kind_tokens.push(self.advance());
                if let Some(outer) = self.eat(TokenKind::KwOuter) {
                    kind_tokens.push(outer);
                }
                JoinKind::Full
            }
            TokenKind::KwCross => {
                kind_tokens.push(self.advance());
                JoinKind::Cross
            }
            _ => JoinKind::Inner,
        };
        let join = self.expect(TokenKind::KwJoin)?;
        let fetch = self.eat(TokenKind::KwFetch);
        let lateral = self.eat(TokenKind::KwLateral);
        let target = self.parse_source_ref()?;
        let alias = self.try_alias()?;
        let restriction = match self.peek() {
            TokenKind::KwOn => {
                let on = self.advance();
                let predicate = self.parse_expr()?;
                Some(JoinRestriction::On { on, predicate })
            }
            TokenKind::KwWith => {
                let with = self.advance();
                let predicate = self.parse_expr()?;
                Some(JoinRestriction::With { with, predicate })
            }
            _ => None,
        };
        Ok(QualifiedJoin {
            kind,
            kind_tokens,
            join,
            fetch,
            lateral,
            target,
            alias,
            restriction,
        })
    }

    // -----------------------------------------------------------------------
    // WHERE / GROUP BY / HAVING / ORDER BY
    // -----------------------------------------------------------------------

    fn try_where_clause(&mut self) -> Result<Option<WhereClause>, ParseError> {
        if self.peek() != TokenKind::KwWhere {
            return Ok(None);
        }
        let where_kw = self.advance();
        let predicate = self.parse_expr()?;
        Ok(Some(WhereClause {
            where_kw,
            predicate,
        }))
    }

    fn try_group_by_clause(&mut self) -> Result<Option<GroupByClause>, ParseError> {
        if self.peek() != TokenKind::KwGroup {
            return Ok(None);
        }
        let group = self.advance();
        let by = self.expect(TokenKind::KwBy)?;
        let mut items = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma).is_some() {
            items.push(self.parse_expr()?);
        }
        Ok(Some(GroupByClause { group, by, items }))
    }

    fn try_having_clause(&mut self) -> Result<Option<HavingClause>, ParseError> {
        if self.peek() != TokenKind::KwHaving {
            return Ok(None);
        }
        let having = self.advance();
        let predicate = self.parse_expr()?;
        Ok(Some(HavingClause { having, predicate }))
    }

    pub(crate) fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParseError> {
        let order = self.expect(TokenKind::KwOrder)?;
        let by = self.expect(TokenKind::KwBy)?;
        let mut items = vec![self.parse_sort_spec()?];
        while self.eat(TokenKind::Comma).is_some() {
            items.push(self.parse_sort_spec()?);
        }
        Ok(OrderByClause { order, by, items })
    }

    fn parse_sort_spec(&mut self) -> Result<SortSpec, ParseError> {
        let expr = self.parse_expr()?;
        let direction = self
            .eat(TokenKind::KwAsc)
            .or_else(|| self.eat(TokenKind::KwDesc));
        let nulls = if self.peek() == TokenKind::KwNulls {
            let nulls_kw = self.advance();
            let which = self.expect_one_of(&[TokenKind::KwFirst, TokenKind::KwLast])?;
            Some((nulls_kw, which))
        } else {
            None
        };
        Ok(SortSpec {
            expr,
            direction,
            nulls,
        })
    }

    // -----------------------------------------------------------------------
    // UPDATE / DELETE / INSERT
    // -----------------------------------------------------------------------

    fn parse_entity_ref(&mut self) -> Result<EntityRef, ParseError> {
        let name = self.parse_dotted_name()?;
        let alias = self.try_alias()?;
        Ok(EntityRef { name, alias })
    }

    fn parse_update(&mut self) -> Result<UpdateStatement, ParseError> {
        let update = self.expect(TokenKind::KwUpdate)?;
        let versioned = self.eat(TokenKind::KwVersioned);
        let target = self.parse_entity_ref()?;
        let set = self.parse_set_clause()?;
        let where_clause = self.try_where_clause()?;
        Ok(UpdateStatement {
            update,
            versioned,
            target,
            set,
            where_clause,
        })
    }

    fn parse_set_clause(&mut self) -> Result<SetClause, ParseError> {
        let set = self.expect(TokenKind::KwSet)?;
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(TokenKind::Comma).is_some() {
            assignments.push(self.parse_assignment()?);
        }
        Ok(SetClause { set, assignments })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let target = self.parse_path_expression()?;
        let eq = self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, eq, value })
    }

    fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        let delete = self.expect(TokenKind::KwDelete)?;
        let from = self.eat(TokenKind::KwFrom);
        let target = self.parse_entity_ref()?;
        let where_clause = self.try_where_clause()?;
        Ok(DeleteStatement {
            delete,
            from,
            target,
            where_clause,
        })
    }

    fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        let insert = self.expect(TokenKind::KwInsert)?;
        let into = self.eat(TokenKind::KwInto);
        let name = self.parse_dotted_name()?;
        let target = EntityRef { name, alias: None };

        let mut columns = Vec::new();
        if self.eat(TokenKind::LeftParen).is_some() {
            columns.push(self.parse_identifier_like()?);
            while self.eat(TokenKind::Comma).is_some() {
                columns.push(self.parse_identifier_like()?);
            }
            self.expect(TokenKind::RightParen)?;
        }

        let source = match self.peek() {
            TokenKind::KwValues => {
                let values = self.advance();
                let mut rows = vec![self.parse_values_row()?];
                while self.eat(TokenKind::Comma).is_some() {
                    rows.push(self.parse_values_row()?);
                }
                InsertSource::Values { values, rows }
            }
            TokenKind::KwSelect | TokenKind::KwFrom | TokenKind::KwWith => {
                InsertSource::Query(Box::new(self.parse_query_expression()?))
            }
            _ => {
                return Err(self.err_expected(&[
                    TokenKind::KwValues,
                    TokenKind::KwSelect,
                    TokenKind::KwFrom,
                    TokenKind::KwWith,
                ]))
            }
        };

        let on_conflict = if self.peek() == TokenKind::KwOn {
            Some(self.parse_on_conflict()?)
        } else {
            None
        };

        Ok(InsertStatement {
            insert,
            into,
            target,
            columns,
            source,
            on_conflict,
        })
    }

    fn parse_values_row(&mut self) -> Result<Vec<oql_ast::Expr>, ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let mut row = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma).is_some() {
            row.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(row)
    }

    fn parse_on_conflict(&mut self) -> Result<OnConflictClause, ParseError> {
        let on = self.expect(TokenKind::KwOn)?;
        let conflict = self.expect(TokenKind::KwConflict)?;
        let target = match self.peek() {
            TokenKind::LeftParen => {
                self.advance();
                let mut cols = vec![self.parse_identifier_like()?];
                while self.eat(TokenKind::Comma).is_some() {
                    cols.push(self.parse_identifier_like()?);
                }
                self.expect(TokenKind::RightParen)?;
                Some(ConflictTarget::Columns(cols))
            }
            TokenKind::KwOn => {
                let on_kw = self.advance();
                let constraint = self.expect(TokenKind::KwConstraint)?;
                let name = self.parse_identifier_like()?;
                Some(ConflictTarget::Constraint {
                    on: on_kw,
                    constraint,
                    name,
                })
            }
            _ => None,
        };
        let do_kw = self.expect(TokenKind::KwDo)?;
        let action = match self.peek() {
            TokenKind::KwNothing => ConflictAction::Nothing(self.advance()),
            TokenKind::KwUpdate => {
                let update = self.advance();
                let set = self.parse_set_clause()?;
                let where_clause = self.try_where_clause()?;
                ConflictAction::Update {
                    update,
                    set,
                    where_clause,
                }
            }
            _ => return Err(self.err_expected(&[TokenKind::KwNothing, TokenKind::KwUpdate])),
        };
        Ok(OnConflictClause {
            on,
            conflict,
            target,
            do_kw,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oql_ast::{Expr, PathSegment};

    fn parse_one(query: &str) -> Statement {
        crate::parse(query).expect("query should parse")
    }

    fn select_body(stmt: &Statement) -> &QueryBody {
        match stmt {
            Statement::Select(q) => &q.first.body,
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn select_from_where() {
        let stmt = parse_one("SELECT c FROM Customer c WHERE c.status = :stat");
        let QueryBody::SelectFirst {
            select,
            from,
            where_clause,
            ..
        } = select_body(&stmt)
        else {
            panic!("expected select-first body");
        };
        assert_eq!(select.items.len(), 1);
        assert!(from.is_some());
        assert!(where_clause.is_some());
    }

    #[test]
    fn from_without_select() {
        let stmt = parse_one("from Person p");
        assert!(matches!(
            select_body(&stmt),
            QueryBody::FromFirst { select: None, .. }
        ));
    }

    #[test]
    fn from_with_trailing_select() {
        let stmt = parse_one("from Person p select p.name");
        assert!(matches!(
            select_body(&stmt),
            QueryBody::FromFirst {
                select: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn select_without_from() {
        let stmt = parse_one("select local datetime");
        assert!(matches!(
            select_body(&stmt),
            QueryBody::SelectFirst { from: None, .. }
        ));
    }

    #[test]
    fn missing_projection_fails_at_from() {
        let err = crate::parse("SELECT FROM").unwrap_err();
        let crate::Error::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.found, TokenKind::KwFrom);
        assert_eq!(err.col, 8);
    }

    #[test]
    fn left_outer_join_with_fetch() {
        let stmt = parse_one("select d from Department d left outer join fetch d.employees e");
        let QueryBody::SelectFirst { from, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let root = &from.as_ref().unwrap().roots[0];
        let Join::Qualified(join) = &root.joins[0] else {
            panic!("expected qualified join");
        };
        assert_eq!(join.kind, JoinKind::Left);
        assert_eq!(join.kind_tokens.len(), 2);
        assert!(join.fetch.is_some());
        assert!(join.alias.is_some());
    }

    #[test]
    fn join_with_restriction_kinds() {
        let stmt = parse_one(
            "select pr.name from Person pr left join pr.phones ph with ph.type = :phoneType",
        );
        let QueryBody::SelectFirst { from, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let Join::Qualified(join) = &from.as_ref().unwrap().roots[0].joins[0] else {
            panic!("expected qualified join");
        };
        assert!(matches!(
            join.restriction,
            Some(JoinRestriction::With { .. })
        ));
    }

    #[test]
    fn legacy_collection_join() {
        let stmt = parse_one("SELECT c FROM Customer c, IN(c.orders) o WHERE c.status = 1");
        let QueryBody::SelectFirst { from, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let roots = &from.as_ref().unwrap().roots;
        assert_eq!(roots.len(), 1);
        assert!(matches!(roots[0].joins[0], Join::CollectionIn(_)));
    }

    #[test]
    fn comma_keeps_separate_roots() {
        let stmt = parse_one("SELECT c FROM Customer c, Employee e WHERE c.hatsize = e.shoesize");
        let QueryBody::SelectFirst { from, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        assert_eq!(from.as_ref().unwrap().roots.len(), 2);
    }

    #[test]
    fn srf_join_with_on_restriction() {
        let stmt =
            parse_one("from EntityClass e join some_function(:date) d on (e.id = d.idFunction)");
        let QueryBody::FromFirst { from, .. } = select_body(&stmt) else {
            panic!("expected from-first body");
        };
        let Join::Qualified(join) = &from.roots[0].joins[0] else {
            panic!("expected qualified join");
        };
        let SourceRef::Function(call) = &join.target else {
            panic!("expected function join target, got {:?}", join.target);
        };
        let oql_ast::FunctionCall::Generic { args, .. } = call else {
            panic!("expected generic call");
        };
        assert_eq!(args.len(), 1);
        assert!(matches!(args[0], Expr::Param(_)));
        assert_eq!(join.alias.as_ref().unwrap().name.text, "d");
        assert!(matches!(join.restriction, Some(JoinRestriction::On { .. })));
    }

    #[test]
    fn lateral_subquery_join() {
        let stmt = parse_one(
            "select longest.duration from Phone p left join lateral \
             (select c.duration as duration from p.calls c order by c.duration desc limit 1) \
             longest where p.number = :phoneNumber",
        );
        let QueryBody::SelectFirst { from, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let Join::Qualified(join) = &from.as_ref().unwrap().roots[0].joins[0] else {
            panic!("expected qualified join");
        };
        assert!(join.lateral.is_some());
        assert!(matches!(join.target, SourceRef::Subquery(_)));
        assert_eq!(join.alias.as_ref().unwrap().name.text, "longest");
    }

    #[test]
    fn cte_then_main_query() {
        let stmt = parse_one(
            "WITH maxId AS (select max(sr.snapshot.id) snapshotId from SnapshotReference sr \
             group by sr.userId) select sr from maxId m join SnapshotReference sr \
             on sr.snapshot.id = m.snapshotId",
        );
        let Statement::Select(q) = &stmt else {
            panic!("expected select");
        };
        let with = q.with.as_ref().expect("with clause");
        assert_eq!(with.ctes.len(), 1);
        assert_eq!(with.ctes[0].name.text, "maxId");
    }

    #[test]
    fn set_operators_are_left_associative() {
        let stmt = parse_one(
            "select e from Employee e intersect select e from Employee e \
             union select e from Employee e except select e from Employee e",
        );
        let Statement::Select(q) = &stmt else {
            panic!("expected select");
        };
        assert_eq!(q.rest.len(), 3);
        assert_eq!(q.rest[0].0.op.kind, TokenKind::KwIntersect);
        assert_eq!(q.rest[1].0.op.kind, TokenKind::KwUnion);
        assert_eq!(q.rest[2].0.op.kind, TokenKind::KwExcept);
    }

    #[test]
    fn pagination_clauses_are_independent() {
        let stmt = parse_one(
            "SELECT si FROM StockItem si ORDER BY si.id LIMIT 10 OFFSET 10 FETCH FIRST 10 ROWS ONLY",
        );
        let Statement::Select(q) = &stmt else {
            panic!("expected select");
        };
        assert!(q.first.order_by.is_some());
        assert!(q.first.limit.is_some());
        assert!(q.first.offset.is_some());
        assert!(q.first.fetch.is_some());

        // Each trailing clause can be cleared on a clone and the subtree
        // still renders (structural splice, no re-parse).
        let mut trimmed = q.first.clone();
        trimmed.limit = None;
        trimmed.offset = None;
        assert!(oql_ast::render(&trimmed).ends_with("FETCH FIRST 10 ROWS ONLY"));
        let mut no_fetch = q.first.clone();
        no_fetch.fetch = None;
        assert!(oql_ast::render(&no_fetch).ends_with("LIMIT 10 OFFSET 10"));
    }

    #[test]
    fn offset_rows_spelling() {
        let stmt = parse_one(
            "select c from Call c order by p.number offset 10 rows fetch first 50 rows with ties",
        );
        let Statement::Select(q) = &stmt else {
            panic!("expected select");
        };
        assert!(q.first.offset.as_ref().unwrap().rows.is_some());
        assert!(matches!(
            q.first.fetch.as_ref().unwrap().mode,
            FetchMode::WithTies { .. }
        ));
    }

    #[test]
    fn update_versioned() {
        let stmt = parse_one("update versioned Person set name = :newName where name = :oldName");
        let Statement::Update(u) = &stmt else {
            panic!("expected update");
        };
        assert!(u.versioned.is_some());
        assert_eq!(u.set.assignments.len(), 1);
        assert!(u.where_clause.is_some());
    }

    #[test]
    fn update_with_alias_and_nested_path() {
        let stmt = parse_one("UPDATE Employee e SET e.address.building = 22");
        let Statement::Update(u) = &stmt else {
            panic!("expected update");
        };
        assert_eq!(u.target.alias.as_ref().unwrap().name.text, "e");
        let target = &u.set.assignments[0].target;
        assert_eq!(target.segments.len(), 2);
        assert!(matches!(target.segments[1], PathSegment::Attribute(_)));
    }

    #[test]
    fn delete_without_from_keyword() {
        let stmt = parse_one("delete Person p where p.name = 'x'");
        let Statement::Delete(d) = &stmt else {
            panic!("expected delete");
        };
        assert!(d.from.is_none());
    }

    #[test]
    fn insert_values_multi_row() {
        let stmt = parse_one(
            "insert Person (id, name) values (101L, 'J A Doe III'), (102L, 'J X Doe')",
        );
        let Statement::Insert(i) = &stmt else {
            panic!("expected insert");
        };
        assert!(i.into.is_none());
        assert_eq!(i.columns.len(), 2);
        let InsertSource::Values { rows, .. } = &i.source else {
            panic!("expected values source");
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn insert_from_select() {
        let stmt = parse_one("insert into Partner (id, name) select p.id, p.name from Person p");
        let Statement::Insert(i) = &stmt else {
            panic!("expected insert");
        };
        assert!(matches!(i.source, InsertSource::Query(_)));
    }

    #[test]
    fn insert_on_conflict_do_update() {
        let stmt = parse_one(
            "INSERT INTO AggregationPrice (range, price, type) VALUES (:range, :price, :priceType) \
             ON CONFLICT (range) DO UPDATE SET price = :price, type = :priceType",
        );
        let Statement::Insert(i) = &stmt else {
            panic!("expected insert");
        };
        let oc = i.on_conflict.as_ref().expect("on conflict clause");
        assert!(matches!(oc.target, Some(ConflictTarget::Columns(_))));
        assert!(matches!(oc.action, ConflictAction::Update { .. }));
    }

    #[test]
    fn insert_on_conflict_constraint_do_nothing() {
        let stmt = parse_one(
            "INSERT INTO AggregationPrice (range, price, type) VALUES (:range, :price, :priceType) \
             ON CONFLICT ON CONSTRAINT foo DO NOTHING",
        );
        let Statement::Insert(i) = &stmt else {
            panic!("expected insert");
        };
        let oc = i.on_conflict.as_ref().expect("on conflict clause");
        assert!(matches!(oc.target, Some(ConflictTarget::Constraint { .. })));
        assert!(matches!(oc.action, ConflictAction::Nothing(_)));
    }

    #[test]
    fn new_constructor_projection() {
        let stmt = parse_one(
            "SELECT NEW com.acme.example.CustomerDetails(c.id, c.status) FROM Customer c",
        );
        let QueryBody::SelectFirst { select, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let SelectValue::New(new) = &select.items[0].value else {
            panic!("expected constructor projection");
        };
        assert!(matches!(new.target, NewTarget::Class(_)));
        assert_eq!(new.args.len(), 2);
    }

    #[test]
    fn new_map_with_aliased_args() {
        let stmt = parse_one(
            "select new map(p.number as phoneNumber, sum(c.duration) as totalDuration) \
             from Call c join c.phone p group by p.number",
        );
        let QueryBody::SelectFirst { select, .. } = select_body(&stmt) else {
            panic!("expected select-first body");
        };
        let SelectValue::New(new) = &select.items[0].value else {
            panic!("expected constructor projection");
        };
        assert!(matches!(new.target, NewTarget::Map(_)));
        assert!(new.args[0].alias.is_some());
    }

    #[test]
    fn constructor_package_may_contain_keywords() {
        // `case` inside the package path reads as a name, not a keyword.
        parse_one("select new com.company.case.thing.stuff.ClassName(e.id) from Experience e");
        parse_one("select new com.company.else.thing.stuff.ClassName(e.id) from Experience e");
    }

    #[test]
    fn keyword_named_attributes_and_aliases() {
        parse_one("select t.sign from TestEntity t");
        parse_one("select t.value from TestEntity t");
        parse_one("select te from TestEntity te where te.type = :type");
        parse_one("select e from Employee e where e.lateral = :_lateral");
        parse_one("select f from Floor f where f.name = :name");
        parse_one("select ie from ItemExample ie left join ie.object io where io.object = :externalId");
    }

    #[test]
    fn order_by_nulls_and_direction() {
        let stmt = parse_one("select a from Element a order by a.x desc nulls first, a.y asc");
        let Statement::Select(q) = &stmt else {
            panic!("expected select");
        };
        let items = &q.first.order_by.as_ref().unwrap().items;
        assert_eq!(items.len(), 2);
        assert!(items[0].nulls.is_some());
        assert_eq!(items[1].direction.as_ref().unwrap().kind, TokenKind::KwAsc);
        assert!(items[1].nulls.is_none());
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(crate::parse("select p from Person p p p").is_err());
    }

    #[test]
    fn group_by_rollup_and_having() {
        let stmt = parse_one(
            "select c.callerId from Call c GROUP BY ROLLUP(state, province) HAVING COUNT(c) > 30",
        );
        let QueryBody::SelectFirst {
            group_by, having, ..
        } = select_body(&stmt)
        else {
            panic!("expected select-first body");
        };
        assert_eq!(group_by.as_ref().unwrap().items.len(), 1);
        assert!(having.is_some());
    }
}
