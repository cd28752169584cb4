//! Pratt expression parser with HQL-style operator precedence.
//!
//! Precedence, lowest to highest:
//!   OR
//!   AND
//!   NOT (prefix)
//!   comparison / IS / LIKE / BETWEEN / IN / MEMBER OF
//!   + - ||
//!   * / %
//!   - + (unary sign)
//!   duration unit, BY unit, RESPECT/IGNORE NULLS (postfix)

use oql_ast::{
    CaseArm, CaseExpression, CastSep, DottedName, Expr, FilterClause, FrameBound, FrameClause,
    FrameExtent, FunctionCall, InSource, IsTarget, Literal, LiteralKind, OverClause, PartitionBy,
    PathExpression, PathRoot, PathSegment, QuantifiedBody, SubstringRest, TemporalExpr, TokenKind,
    WithinGroupClause,
};

use crate::parser::{ParseError, Parser};

// Binding powers: higher = tighter. Left BP is checked against min_bp;
// right BP is passed to the recursive call.
mod bp {
    pub const OR: (u8, u8) = (1, 2);
    pub const AND: (u8, u8) = (3, 4);
    pub const NOT_PREFIX: u8 = 5;
    pub const COMPARISON: (u8, u8) = (7, 8);
    pub const ADD: (u8, u8) = (11, 12);
    pub const MUL: (u8, u8) = (13, 14);
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 17;
}

/// Navigation wrapper functions that root a path expression.
fn is_wrapper_kw(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KwKey
            | TokenKind::KwValue
            | TokenKind::KwValues
            | TokenKind::KwIndex
            | TokenKind::KwIndices
            | TokenKind::KwElement
            | TokenKind::KwElements
            | TokenKind::KwEntry
            | TokenKind::KwId
            | TokenKind::KwFk
            | TokenKind::KwNaturalid
            | TokenKind::KwVersion
            | TokenKind::KwType
            | TokenKind::KwObject
    )
}

impl Parser {
    /// Parse a single expression or predicate.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            // Tightest-binding postfixes: `5 DAY`, `expr BY unit`,
            // `expr RESPECT NULLS`.
            if bp::POSTFIX >= min_bp {
                if self.peek().is_datetime_unit() {
                    let unit = self.advance();
                    lhs = Expr::Duration {
                        value: Box::new(lhs),
                        unit,
                    };
                    continue;
                }
                if self.peek() == TokenKind::KwBy && self.peek_nth(1).is_datetime_unit() {
                    let by = self.advance();
                    let unit = self.advance();
                    lhs = Expr::By {
                        value: Box::new(lhs),
                        by,
                        unit,
                    };
                    continue;
                }
                if matches!(self.peek(), TokenKind::KwRespect | TokenKind::KwIgnore)
                    && self.peek_nth(1) == TokenKind::KwNulls
                {
                    let handling = self.advance();
                    let nulls = self.advance();
                    lhs = Expr::NullHandling {
                        value: Box::new(lhs),
                        handling,
                        nulls,
                    };
                    continue;
                }
            }

            let Some((l_bp, r_bp)) = self.infix_bp() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            lhs = self.parse_infix(lhs, r_bp)?;
        }

        Ok(lhs)
    }

    fn infix_bp(&self) -> Option<(u8, u8)> {
        match self.peek() {
            TokenKind::KwOr => Some(bp::OR),
            TokenKind::KwAnd => Some(bp::AND),

            TokenKind::Eq
            | TokenKind::BangEq
            | TokenKind::LtGt
            | TokenKind::CaretEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::KwIs
            | TokenKind::KwLike
            | TokenKind::KwIlike
            | TokenKind::KwBetween
            | TokenKind::KwIn
            | TokenKind::KwMember => Some(bp::COMPARISON),

            // NOT LIKE / NOT ILIKE / NOT BETWEEN / NOT IN / NOT MEMBER
            TokenKind::KwNot
                if matches!(
                    self.peek_nth(1),
                    TokenKind::KwLike
                        | TokenKind::KwIlike
                        | TokenKind::KwBetween
                        | TokenKind::KwIn
                        | TokenKind::KwMember
                ) =>
            {
                Some(bp::COMPARISON)
            }

            TokenKind::Plus | TokenKind::Minus | TokenKind::PipePipe => Some(bp::ADD),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(bp::MUL),

            _ => None,
        }
    }

    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::KwOr
            | TokenKind::KwAnd
            | TokenKind::Eq
            | TokenKind::BangEq
            | TokenKind::LtGt
            | TokenKind::CaretEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::PipePipe
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent => {
                let rhs = self.parse_expr_bp(r_bp)?;
                Ok(Expr::Binary {
                    lhs: Box::new(lhs),
                    op: tok,
                    rhs: Box::new(rhs),
                })
            }

            TokenKind::KwIs => self.parse_is(lhs, tok),
            TokenKind::KwLike | TokenKind::KwIlike => self.parse_like(lhs, None, tok),
            TokenKind::KwBetween => self.parse_between(lhs, None, tok),
            TokenKind::KwIn => self.parse_in(lhs, None, tok),
            TokenKind::KwMember => self.parse_member(lhs, None, tok),

            TokenKind::KwNot => {
                let not = tok;
                let op = self.advance();
                match op.kind {
                    TokenKind::KwLike | TokenKind::KwIlike => self.parse_like(lhs, Some(not), op),
                    TokenKind::KwBetween => self.parse_between(lhs, Some(not), op),
                    TokenKind::KwIn => self.parse_in(lhs, Some(not), op),
                    TokenKind::KwMember => self.parse_member(lhs, Some(not), op),
                    _ => Err(self.err_expected(&[
                        TokenKind::KwLike,
                        TokenKind::KwIlike,
                        TokenKind::KwBetween,
                        TokenKind::KwIn,
                        TokenKind::KwMember,
                    ])),
                }
            }

            _ => Err(self.err_expected(&[TokenKind::Eof])),
        }
    }

    // -----------------------------------------------------------------------
    // Predicates
    // -----------------------------------------------------------------------

    fn parse_is(&mut self, lhs: Expr, is: oql_ast::Token) -> Result<Expr, ParseError> {
        let not = self.eat(TokenKind::KwNot);
        let target = match self.peek() {
            TokenKind::KwNull => IsTarget::Null(self.advance()),
            TokenKind::KwTrue => IsTarget::True(self.advance()),
            TokenKind::KwFalse => IsTarget::False(self.advance()),
            TokenKind::KwEmpty => IsTarget::Empty(self.advance()),
            TokenKind::KwDistinct => {
                let distinct = self.advance();
                let from = self.expect(TokenKind::KwFrom)?;
                let rhs = self.parse_expr_bp(bp::COMPARISON.1)?;
                IsTarget::DistinctFrom {
                    distinct,
                    from,
                    rhs: Box::new(rhs),
                }
            }
            _ => {
                return Err(self.err_expected(&[
                    TokenKind::KwNull,
                    TokenKind::KwTrue,
                    TokenKind::KwFalse,
                    TokenKind::KwEmpty,
                    TokenKind::KwDistinct,
                ]))
            }
        };
        Ok(Expr::Is {
            lhs: Box::new(lhs),
            is,
            not,
            target,
        })
    }

    fn parse_like(
        &mut self,
        lhs: Expr,
        not: Option<oql_ast::Token>,
        op: oql_ast::Token,
    ) -> Result<Expr, ParseError> {
        let pattern = self.parse_expr_bp(bp::COMPARISON.1)?;
        let escape = if let Some(esc) = self.eat(TokenKind::KwEscape) {
            let ch = self.parse_expr_bp(bp::COMPARISON.1)?;
            Some((esc, Box::new(ch)))
        } else {
            None
        };
        Ok(Expr::Like {
            lhs: Box::new(lhs),
            not,
            op,
            pattern: Box::new(pattern),
            escape,
        })
    }

    fn parse_between(
        &mut self,
        lhs: Expr,
        not: Option<oql_ast::Token>,
        between: oql_ast::Token,
    ) -> Result<Expr, ParseError> {
        let low = self.parse_expr_bp(bp::COMPARISON.1)?;
        let and = self.expect(TokenKind::KwAnd)?;
        let high = self.parse_expr_bp(bp::COMPARISON.1)?;
        Ok(Expr::Between {
            lhs: Box::new(lhs),
            not,
            between,
            low: Box::new(low),
            and,
            high: Box::new(high),
        })
    }

    fn parse_in(
        &mut self,
        lhs: Expr,
        not: Option<oql_ast::Token>,
        in_kw: oql_ast::Token,
    ) -> Result<Expr, ParseError> {
        let source = if self.eat(TokenKind::LeftParen).is_some() {
            if self.at_subquery_start() {
                let query = Box::new(self.parse_query_expression()?);
                self.expect(TokenKind::RightParen)?;
                InSource::Subquery(query)
            } else {
                let mut items = vec![self.parse_expr()?];
                while self.eat(TokenKind::Comma).is_some() {
                    items.push(self.parse_expr()?);
                }
                self.expect(TokenKind::RightParen)?;
                InSource::List(items)
            }
        } else {
            InSource::Expr(Box::new(self.parse_expr_bp(bp::COMPARISON.1)?))
        };
        Ok(Expr::In {
            lhs: Box::new(lhs),
            not,
            in_kw,
            source,
        })
    }

    fn parse_member(
        &mut self,
        lhs: Expr,
        not: Option<oql_ast::Token>,
        member: oql_ast::Token,
    ) -> Result<Expr, ParseError> {
        let of = self.eat(TokenKind::KwOf);
        let path = self.parse_path_expression()?;
        Ok(Expr::MemberOf {
            lhs: Box::new(lhs),
            not,
            member,
            of,
            path,
        })
    }

    // -----------------------------------------------------------------------
    // Prefix (nud)
    // -----------------------------------------------------------------------

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        // Literal tokens, including TRUE/FALSE/NULL keyword literals.
        if let Some(kind) = LiteralKind::from_token_kind(self.peek()) {
            let token = self.advance();
            return Ok(Expr::Literal(Literal { token, kind }));
        }

        match self.peek() {
            TokenKind::NamedParam | TokenKind::PositionalParam => Ok(Expr::Param(self.advance())),

            TokenKind::Minus | TokenKind::Plus => {
                let op = self.advance();
                let operand = self.parse_expr_bp(bp::UNARY)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }

            TokenKind::KwNot => {
                let op = self.advance();
                let operand = self.parse_expr_bp(bp::NOT_PREFIX)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }

            TokenKind::KwExists => {
                let exists = self.advance();
                let operand = self.parse_exists_operand()?;
                Ok(Expr::Exists {
                    exists,
                    operand: Box::new(operand),
                })
            }

            TokenKind::KwCase => self.parse_case(),

            TokenKind::LeftParen => {
                self.advance();
                if self.at_subquery_start() {
                    let query = Box::new(self.parse_query_expression()?);
                    self.expect(TokenKind::RightParen)?;
                    return Ok(Expr::Subquery(query));
                }
                let first = self.parse_expr()?;
                if self.eat(TokenKind::Comma).is_some() {
                    let mut items = vec![first, self.parse_expr()?];
                    while self.eat(TokenKind::Comma).is_some() {
                        items.push(self.parse_expr()?);
                    }
                    self.expect(TokenKind::RightParen)?;
                    Ok(Expr::Tuple(items))
                } else {
                    self.expect(TokenKind::RightParen)?;
                    Ok(Expr::Grouping(Box::new(first)))
                }
            }

            TokenKind::LeftBracket => {
                self.advance();
                let mut items = Vec::new();
                if self.peek() != TokenKind::RightBracket {
                    items.push(self.parse_expr()?);
                    while self.eat(TokenKind::Comma).is_some() {
                        items.push(self.parse_expr()?);
                    }
                }
                self.expect(TokenKind::RightBracket)?;
                Ok(Expr::ArrayLit(items))
            }

            TokenKind::KwAll | TokenKind::KwAny | TokenKind::KwSome | TokenKind::KwEvery => {
                self.parse_quantified()
            }

            TokenKind::KwCast if self.peek_nth(1) == TokenKind::LeftParen => self.parse_cast(),

            TokenKind::KwExtract
                if self.peek_nth(1) == TokenKind::LeftParen
                    && self.peek_nth(2).is_extract_field_start()
                    && matches!(self.peek_nth(3), TokenKind::KwFrom | TokenKind::KwOf) =>
            {
                self.parse_extract()
            }

            TokenKind::KwSubstring if self.peek_nth(1) == TokenKind::LeftParen => {
                self.parse_substring()
            }
            TokenKind::KwOverlay if self.peek_nth(1) == TokenKind::LeftParen => {
                self.parse_overlay()
            }
            TokenKind::KwPad if self.peek_nth(1) == TokenKind::LeftParen => self.parse_pad(),
            TokenKind::KwPosition if self.peek_nth(1) == TokenKind::LeftParen => {
                self.parse_position()
            }
            TokenKind::KwTrim if self.peek_nth(1) == TokenKind::LeftParen => self.parse_trim(),
            TokenKind::KwFormat if self.peek_nth(1) == TokenKind::LeftParen => self.parse_format(),
            TokenKind::KwCollate if self.peek_nth(1) == TokenKind::LeftParen => {
                self.parse_collate()
            }
            TokenKind::KwFunction
                if self.peek_nth(1) == TokenKind::LeftParen
                    && self.peek_nth(2) == TokenKind::StrLit =>
            {
                self.parse_jpa_function()
            }
            TokenKind::KwCube | TokenKind::KwRollup
                if self.peek_nth(1) == TokenKind::LeftParen =>
            {
                self.parse_grouping_fn()
            }

            TokenKind::KwCurrent
                if matches!(
                    self.peek_nth(1),
                    TokenKind::KwDate | TokenKind::KwTime | TokenKind::KwTimestamp
                ) =>
            {
                let first = self.advance();
                let second = self.advance();
                Ok(Expr::Temporal(TemporalExpr::Words { first, second }))
            }
            TokenKind::KwLocal
                if matches!(
                    self.peek_nth(1),
                    TokenKind::KwDate | TokenKind::KwTime | TokenKind::KwDatetime
                ) =>
            {
                let first = self.advance();
                let second = self.advance();
                Ok(Expr::Temporal(TemporalExpr::Words { first, second }))
            }
            TokenKind::KwOffset if self.peek_nth(1) == TokenKind::KwDatetime => {
                let offset = self.advance();
                let datetime = self.advance();
                if self.peek() == TokenKind::DateLit {
                    let date = self.advance();
                    let time = self.eat(TokenKind::TimeLit);
                    Ok(Expr::Temporal(TemporalExpr::OffsetLiteral {
                        offset,
                        datetime,
                        date,
                        time,
                    }))
                } else {
                    Ok(Expr::Temporal(TemporalExpr::Words {
                        first: offset,
                        second: datetime,
                    }))
                }
            }
            TokenKind::KwInstant => Ok(Expr::Temporal(TemporalExpr::Instant(self.advance()))),

            // A keyword with no viable production here reads as a name —
            // unless a clause production is waiting for it.
            k if k.is_identifier_like() && !k.is_clause_boundary() => {
                let PathExpression { root, segments } = self.parse_path_expression()?;
                match root {
                    PathRoot::Function(call) if segments.is_empty() => Ok(Expr::Function(call)),
                    root => Ok(Expr::Path(PathExpression { root, segments })),
                }
            }

            _ => Err(self.err_expected(&[TokenKind::Ident])),
        }
    }

    pub(crate) fn at_subquery_start(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::KwSelect | TokenKind::KwFrom | TokenKind::KwWith
        )
    }

    fn parse_exists_operand(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::LeftParen).is_some() {
            if self.at_subquery_start() {
                let query = Box::new(self.parse_query_expression()?);
                self.expect(TokenKind::RightParen)?;
                return Ok(Expr::Subquery(query));
            }
            let inner = self.parse_expr()?;
            self.expect(TokenKind::RightParen)?;
            return Ok(Expr::Grouping(Box::new(inner)));
        }
        self.parse_expr_bp(bp::COMPARISON.1)
    }

    fn parse_quantified(&mut self) -> Result<Expr, ParseError> {
        let quantifier = self.advance();
        let body = if self.eat(TokenKind::LeftParen).is_some() {
            if self.at_subquery_start() {
                let query = Box::new(self.parse_query_expression()?);
                self.expect(TokenKind::RightParen)?;
                QuantifiedBody::Subquery(query)
            } else {
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                QuantifiedBody::Paren(Box::new(inner))
            }
        } else {
            QuantifiedBody::Expr(Box::new(self.parse_expr_bp(bp::COMPARISON.1)?))
        };
        let over = if self.peek() == TokenKind::KwOver && self.peek_nth(1) == TokenKind::LeftParen
        {
            Some(self.parse_over_clause()?)
        } else {
            None
        };
        Ok(Expr::Quantified {
            quantifier,
            body,
            over,
        })
    }

    // -----------------------------------------------------------------------
    // CASE
    // -----------------------------------------------------------------------

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        let case = self.advance();
        if self.peek() == TokenKind::KwWhen {
            let arms = self.parse_case_arms()?;
            let else_arm = self.parse_else_arm()?;
            let end = self.expect(TokenKind::KwEnd)?;
            Ok(Expr::Case(Box::new(CaseExpression::Searched {
                case,
                arms,
                else_arm,
                end,
            })))
        } else {
            let operand = self.parse_expr()?;
            let arms = self.parse_case_arms()?;
            let else_arm = self.parse_else_arm()?;
            let end = self.expect(TokenKind::KwEnd)?;
            Ok(Expr::Case(Box::new(CaseExpression::Simple {
                case,
                operand,
                arms,
                else_arm,
                end,
            })))
        }
    }

    fn parse_case_arms(&mut self) -> Result<Vec<CaseArm>, ParseError> {
        let mut arms = Vec::new();
        while let Some(when) = self.eat(TokenKind::KwWhen) {
            let condition = self.parse_expr()?;
            let then = self.expect(TokenKind::KwThen)?;
            let result = self.parse_expr()?;
            arms.push(CaseArm {
                when,
                condition,
                then,
                result,
            });
        }
        if arms.is_empty() {
            return Err(self.err_expected(&[TokenKind::KwWhen]));
        }
        Ok(arms)
    }

    fn parse_else_arm(&mut self) -> Result<Option<(oql_ast::Token, Expr)>, ParseError> {
        if let Some(kw) = self.eat(TokenKind::KwElse) {
            let expr = self.parse_expr()?;
            Ok(Some((kw, expr)))
        } else {
            Ok(None)
        }
    }

    // -----------------------------------------------------------------------
    // Paths
    // -----------------------------------------------------------------------

    /// Parse a navigation path: wrapper/TREAT/function/identifier root plus
    /// attribute, index, and slice segments.
    pub(crate) fn parse_path_expression(&mut self) -> Result<PathExpression, ParseError> {
        let (root, mut segments): (PathRoot, Vec<PathSegment>) = match self.peek() {
            TokenKind::KwTreat if self.peek_nth(1) == TokenKind::LeftParen => {
                let treat = self.advance();
                self.expect(TokenKind::LeftParen)?;
                let path = Box::new(self.parse_path_expression()?);
                let as_kw = self.expect(TokenKind::KwAs)?;
                let ty = self.parse_dotted_name()?;
                self.expect(TokenKind::RightParen)?;
                (
                    PathRoot::Treat {
                        treat,
                        path,
                        as_kw,
                        ty,
                    },
                    Vec::new(),
                )
            }
            k if is_wrapper_kw(k) && self.peek_nth(1) == TokenKind::LeftParen => {
                let kw = self.advance();
                self.expect(TokenKind::LeftParen)?;
                let arg = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                (
                    PathRoot::Wrapper {
                        kw,
                        arg: Box::new(arg),
                    },
                    Vec::new(),
                )
            }
            k if k.is_identifier_like() => {
                let first = self.advance();
                let mut attrs = Vec::new();
                while self.peek() == TokenKind::Dot && self.peek_nth(1).is_identifier_like() {
                    self.advance(); // dot
                    attrs.push(self.advance());
                }
                if self.peek() == TokenKind::LeftParen {
                    let mut name_segments = vec![first];
                    name_segments.append(&mut attrs);
                    let call = self.parse_call_tail(DottedName {
                        segments: name_segments,
                    })?;
                    (PathRoot::Function(Box::new(call)), Vec::new())
                } else {
                    (
                        PathRoot::Ident(first),
                        attrs.into_iter().map(PathSegment::Attribute).collect(),
                    )
                }
            }
            _ => return Err(self.err_expected(&[TokenKind::Ident])),
        };

        loop {
            match self.peek() {
                TokenKind::Dot if self.peek_nth(1).is_identifier_like() => {
                    self.advance(); // dot
                    segments.push(PathSegment::Attribute(self.advance()));
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let first = self.parse_expr()?;
                    if self.eat(TokenKind::Colon).is_some() {
                        let second = self.parse_expr()?;
                        self.expect(TokenKind::RightBracket)?;
                        segments.push(PathSegment::Slice(first, second));
                    } else {
                        self.expect(TokenKind::RightBracket)?;
                        segments.push(PathSegment::Index(first));
                    }
                }
                _ => break,
            }
        }

        Ok(PathExpression { root, segments })
    }

    // -----------------------------------------------------------------------
    // Function calls
    // -----------------------------------------------------------------------

    /// Parse the argument list and trailing clauses of a generic call whose
    /// (possibly dotted) name has already been consumed.
    pub(crate) fn parse_call_tail(&mut self, name: DottedName) -> Result<FunctionCall, ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let distinct = self.eat(TokenKind::KwDistinct);
        let mut args = Vec::new();
        if self.peek() == TokenKind::Star && self.peek_nth(1) == TokenKind::RightParen {
            args.push(Expr::Star(self.advance()));
        } else if self.peek() != TokenKind::RightParen {
            args.push(self.parse_expr()?);
            while self.eat(TokenKind::Comma).is_some() {
                args.push(self.parse_expr()?);
            }
        }
        self.expect(TokenKind::RightParen)?;

        let filter = if self.peek() == TokenKind::KwFilter
            && self.peek_nth(1) == TokenKind::LeftParen
        {
            let filter = self.advance();
            self.expect(TokenKind::LeftParen)?;
            let where_kw = self.expect(TokenKind::KwWhere)?;
            let predicate = self.parse_expr()?;
            self.expect(TokenKind::RightParen)?;
            Some(FilterClause {
                filter,
                where_kw,
                predicate,
            })
        } else {
            None
        };

        let within_group =
            if self.peek() == TokenKind::KwWithin && self.peek_nth(1) == TokenKind::KwGroup {
                let within = self.advance();
                let group = self.advance();
                self.expect(TokenKind::LeftParen)?;
                let order_by = self.parse_order_by_clause()?;
                self.expect(TokenKind::RightParen)?;
                Some(WithinGroupClause {
                    within,
                    group,
                    order_by,
                })
            } else {
                None
            };

        let over = if self.peek() == TokenKind::KwOver && self.peek_nth(1) == TokenKind::LeftParen
        {
            Some(self.parse_over_clause()?)
        } else {
            None
        };

        Ok(FunctionCall::Generic {
            name,
            distinct,
            args,
            filter,
            within_group,
            over,
        })
    }

    fn parse_over_clause(&mut self) -> Result<OverClause, ParseError> {
        let over = self.expect(TokenKind::KwOver)?;
        self.expect(TokenKind::LeftParen)?;
        let partition_by = if self.peek() == TokenKind::KwPartition {
            let partition = self.advance();
            let by = self.expect(TokenKind::KwBy)?;
            let mut items = vec![self.parse_expr()?];
            while self.eat(TokenKind::Comma).is_some() {
                items.push(self.parse_expr()?);
            }
            Some(PartitionBy {
                partition,
                by,
                items,
            })
        } else {
            None
        };
        let order_by = if self.peek() == TokenKind::KwOrder {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };
        let frame = if matches!(
            self.peek(),
            TokenKind::KwRows | TokenKind::KwRange | TokenKind::KwGroups
        ) {
            let units = self.advance();
            let extent = if let Some(between) = self.eat(TokenKind::KwBetween) {
                let low = self.parse_frame_bound()?;
                let and = self.expect(TokenKind::KwAnd)?;
                let high = self.parse_frame_bound()?;
                FrameExtent::Between {
                    between,
                    low,
                    and,
                    high,
                }
            } else {
                FrameExtent::Single(self.parse_frame_bound()?)
            };
            Some(FrameClause { units, extent })
        } else {
            None
        };
        self.expect(TokenKind::RightParen)?;
        Ok(OverClause {
            over,
            partition_by,
            order_by,
            frame,
        })
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        match self.peek() {
            TokenKind::KwUnbounded => {
                let unbounded = self.advance();
                let edge =
                    self.expect_one_of(&[TokenKind::KwPreceding, TokenKind::KwFollowing])?;
                Ok(FrameBound::Unbounded { unbounded, edge })
            }
            TokenKind::KwCurrent => {
                let current = self.advance();
                let row = self.expect(TokenKind::KwRow)?;
                Ok(FrameBound::CurrentRow { current, row })
            }
            _ => {
                let value = self.parse_expr_bp(bp::COMPARISON.1)?;
                let edge =
                    self.expect_one_of(&[TokenKind::KwPreceding, TokenKind::KwFollowing])?;
                Ok(FrameBound::Offset { value: Box::new(value), edge })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Special function argument syntaxes
    // -----------------------------------------------------------------------

    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let cast = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let expr = Box::new(self.parse_expr()?);
        let sep = if let Some(as_kw) = self.eat(TokenKind::KwAs) {
            let ty = self.parse_dotted_name()?;
            CastSep::As { as_kw, ty }
        } else {
            self.expect(TokenKind::Comma)?;
            let ty = self.parse_dotted_name()?;
            CastSep::Comma { ty }
        };
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Cast {
            cast,
            expr,
            sep,
        })))
    }

    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        let extract = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let mut field = vec![self.advance()];
        if let Some(of) = self.eat(TokenKind::KwOf) {
            field.push(of);
            field.push(self.parse_identifier_like()?);
        }
        let from = self.expect(TokenKind::KwFrom)?;
        let expr = Box::new(self.parse_expr()?);
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Extract {
            extract,
            field,
            from,
            expr,
        })))
    }

    fn parse_substring(&mut self) -> Result<Expr, ParseError> {
        let substring = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let source = Box::new(self.parse_expr()?);
        let rest = if self.peek() == TokenKind::Comma {
            let mut args = Vec::new();
            while self.eat(TokenKind::Comma).is_some() {
                args.push(self.parse_expr()?);
            }
            SubstringRest::Comma(args)
        } else {
            let from = self.expect(TokenKind::KwFrom)?;
            let start = Box::new(self.parse_expr()?);
            let for_len = if let Some(kw) = self.eat(TokenKind::KwFor) {
                Some((kw, Box::new(self.parse_expr()?)))
            } else {
                None
            };
            SubstringRest::FromFor {
                from,
                start,
                for_len,
            }
        };
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Substring {
            substring,
            source,
            rest,
        })))
    }

    fn parse_overlay(&mut self) -> Result<Expr, ParseError> {
        let overlay = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let value = Box::new(self.parse_expr()?);
        let placing = self.expect(TokenKind::KwPlacing)?;
        let replacement = Box::new(self.parse_expr()?);
        let from = self.expect(TokenKind::KwFrom)?;
        let start = Box::new(self.parse_expr()?);
        let for_len = if let Some(kw) = self.eat(TokenKind::KwFor) {
            Some((kw, Box::new(self.parse_expr()?)))
        } else {
            None
        };
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Overlay {
            overlay,
            value,
            placing,
            replacement,
            from,
            start,
            for_len,
        })))
    }

    fn parse_pad(&mut self) -> Result<Expr, ParseError> {
        let pad = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let value = Box::new(self.parse_expr()?);
        let with = self.expect(TokenKind::KwWith)?;
        let length = Box::new(self.parse_expr()?);
        let direction = self.expect_one_of(&[TokenKind::KwLeading, TokenKind::KwTrailing])?;
        let pad_char = if self.peek() == TokenKind::RightParen {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Pad {
            pad,
            value,
            with,
            length,
            direction,
            pad_char,
        })))
    }

    fn parse_position(&mut self) -> Result<Expr, ParseError> {
        let position = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let needle = Box::new(self.parse_expr_bp(bp::COMPARISON.1)?);
        let in_kw = self.expect(TokenKind::KwIn)?;
        let haystack = Box::new(self.parse_expr()?);
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Position {
            position,
            needle,
            in_kw,
            haystack,
        })))
    }

    fn parse_trim(&mut self) -> Result<Expr, ParseError> {
        let trim = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let spec = self
            .eat(TokenKind::KwLeading)
            .or_else(|| self.eat(TokenKind::KwTrailing))
            .or_else(|| self.eat(TokenKind::KwBoth));
        let (trim_char, from, source) = if let Some(from) = self.eat(TokenKind::KwFrom) {
            (None, Some(from), Box::new(self.parse_expr()?))
        } else {
            let first = self.parse_expr()?;
            if let Some(from) = self.eat(TokenKind::KwFrom) {
                (
                    Some(Box::new(first)),
                    Some(from),
                    Box::new(self.parse_expr()?),
                )
            } else {
                (None, None, Box::new(first))
            }
        };
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Trim {
            trim,
            spec,
            trim_char,
            from,
            source,
        })))
    }

    fn parse_format(&mut self) -> Result<Expr, ParseError> {
        let format = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let expr = Box::new(self.parse_expr()?);
        let as_kw = self.expect(TokenKind::KwAs)?;
        let pattern = Box::new(self.parse_expr()?);
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Format {
            format,
            expr,
            as_kw,
            pattern,
        })))
    }

    fn parse_collate(&mut self) -> Result<Expr, ParseError> {
        let collate = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let expr = Box::new(self.parse_expr()?);
        let as_kw = self.expect(TokenKind::KwAs)?;
        let collation = self.parse_dotted_name()?;
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Collate {
            collate,
            expr,
            as_kw,
            collation,
        })))
    }

    fn parse_jpa_function(&mut self) -> Result<Expr, ParseError> {
        let function = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let name = self.expect(TokenKind::StrLit)?;
        let mut args = Vec::new();
        while self.eat(TokenKind::Comma).is_some() {
            args.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::JpaFunction {
            function,
            name,
            args,
        })))
    }

    fn parse_grouping_fn(&mut self) -> Result<Expr, ParseError> {
        let kw = self.advance();
        self.expect(TokenKind::LeftParen)?;
        let mut args = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma).is_some() {
            args.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::Function(Box::new(FunctionCall::Grouping { kw, args })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expression;

    fn parse(text: &str) -> Expr {
        parse_expression(text).expect("expression should parse")
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("a + b * c");
        let Expr::Binary { op, rhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op.kind, TokenKind::Plus);
        assert!(matches!(*rhs, Expr::Binary { .. }));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse("a = 1 or b = 2 and c = 3");
        let Expr::Binary { op, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op.kind, TokenKind::KwOr);
    }

    #[test]
    fn signed_literal_attaches_to_sign() {
        let expr = parse("-1");
        let Expr::Unary { op, operand } = expr else {
            panic!("expected unary expression");
        };
        assert_eq!(op.kind, TokenKind::Minus);
        assert!(matches!(*operand, Expr::Literal(_)));
    }

    #[test]
    fn keyword_named_path_segment_is_an_identifier() {
        let expr = parse("t.sign");
        let Expr::Path(path) = expr else {
            panic!("expected path, got something else");
        };
        let PathSegment::Attribute(seg) = &path.segments[0] else {
            panic!("expected attribute segment");
        };
        assert_eq!(seg.kind, TokenKind::Ident);
        assert_eq!(seg.text, "sign");
    }

    #[test]
    fn keyword_root_falls_back_to_identifier() {
        // `type` has a wrapper production, but only when a `(` follows.
        let expr = parse("type");
        assert!(matches!(expr, Expr::Path(_)));
        let expr = parse("type(p)");
        let Expr::Path(path) = expr else {
            panic!("expected wrapper path");
        };
        assert!(matches!(path.root, PathRoot::Wrapper { .. }));
    }

    #[test]
    fn indexed_and_sliced_paths() {
        let expr = parse("e.names[0]");
        let Expr::Path(path) = expr else {
            panic!("expected path");
        };
        assert!(matches!(path.segments[1], PathSegment::Index(_)));

        let expr = parse("e.payments[1:2].id");
        let Expr::Path(path) = expr else {
            panic!("expected path");
        };
        assert!(matches!(path.segments[1], PathSegment::Slice(_, _)));
        assert!(matches!(path.segments[2], PathSegment::Attribute(_)));
    }

    #[test]
    fn function_result_path_continuation() {
        let expr = parse("some_function()[1].id");
        let Expr::Path(path) = expr else {
            panic!("expected path");
        };
        assert!(matches!(path.root, PathRoot::Function(_)));
        assert_eq!(path.segments.len(), 2);
    }

    #[test]
    fn bare_function_call_is_not_a_path() {
        let expr = parse("count(c)");
        assert!(matches!(expr, Expr::Function(_)));
    }

    #[test]
    fn treat_path_with_continuation() {
        let expr = parse("TREAT(p AS LargeProject).budget");
        let Expr::Path(path) = expr else {
            panic!("expected path");
        };
        assert!(matches!(path.root, PathRoot::Treat { .. }));
        assert_eq!(path.segments.len(), 1);
    }

    #[test]
    fn dotted_function_name() {
        let expr = parse("utl_raw.cast_to_varchar2(b.nome)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Generic { name, .. } = *call else {
            panic!("expected generic call");
        };
        assert_eq!(name.segments.len(), 2);
    }

    #[test]
    fn is_predicates() {
        assert!(matches!(
            parse("p.nickName is not null"),
            Expr::Is {
                not: Some(_),
                target: IsTarget::Null(_),
                ..
            }
        ));
        assert!(matches!(
            parse("o.lineItems IS EMPTY"),
            Expr::Is {
                not: None,
                target: IsTarget::Empty(_),
                ..
            }
        ));
        assert!(matches!(
            parse("c.orders IS DISTINCT FROM c.payments"),
            Expr::Is {
                target: IsTarget::DistinctFrom { .. },
                ..
            }
        ));
    }

    #[test]
    fn like_with_escape() {
        let expr = parse("p.name like 'Dr|_%' escape '|'");
        let Expr::Like { escape, .. } = expr else {
            panic!("expected like");
        };
        assert!(escape.is_some());
    }

    #[test]
    fn ilike_is_its_own_spelling() {
        let expr = parse("p.name ilike 'Joe'");
        let Expr::Like { op, .. } = expr else {
            panic!("expected like");
        };
        assert_eq!(op.kind, TokenKind::KwIlike);
    }

    #[test]
    fn not_in_list() {
        let expr = parse("type(p) not in (CreditCardPayment, WireTransferPayment)");
        let Expr::In { not, source, .. } = expr else {
            panic!("expected in");
        };
        assert!(not.is_some());
        assert!(matches!(source, InSource::List(items) if items.len() == 2));
    }

    #[test]
    fn in_collection_expression() {
        let expr = parse("1 in indices(p.phones)");
        let Expr::In { source, .. } = expr else {
            panic!("expected in");
        };
        assert!(matches!(source, InSource::Expr(_)));
    }

    #[test]
    fn in_subquery() {
        let expr = parse("p.person.id in (select py.person.id from Payment py)");
        let Expr::In { source, .. } = expr else {
            panic!("expected in");
        };
        assert!(matches!(source, InSource::Subquery(_)));
    }

    #[test]
    fn tuple_in_tuple_list() {
        let expr = parse("(p.amount, p.completed) in ((50, true), (100, true))");
        let Expr::In { lhs, source, .. } = expr else {
            panic!("expected in");
        };
        assert!(matches!(*lhs, Expr::Tuple(_)));
        let InSource::List(items) = source else {
            panic!("expected list");
        };
        assert!(matches!(items[0], Expr::Tuple(_)));
    }

    #[test]
    fn member_of() {
        let expr = parse("'Joe' MEMBER OF p.nicknames");
        assert!(matches!(expr, Expr::MemberOf { of: Some(_), .. }));
        let expr = parse("'Home address' not member of p.addresses");
        assert!(matches!(expr, Expr::MemberOf { not: Some(_), .. }));
    }

    #[test]
    fn between_keeps_conjunction_outside() {
        let expr = parse("INDEX(t) BETWEEN 0 AND 9 AND c.x = 1");
        let Expr::Binary { op, lhs, .. } = expr else {
            panic!("expected binary");
        };
        assert_eq!(op.kind, TokenKind::KwAnd);
        assert!(matches!(*lhs, Expr::Between { .. }));
    }

    #[test]
    fn quantified_subquery_and_collection() {
        let expr = parse("emp.salary > ALL (SELECT m.salary FROM Manager m)");
        let Expr::Binary { rhs, .. } = expr else {
            panic!("expected comparison");
        };
        assert!(matches!(
            *rhs,
            Expr::Quantified {
                body: QuantifiedBody::Subquery(_),
                ..
            }
        ));

        let expr = parse("local date > all elements(p.repairTimestamps)");
        let Expr::Binary { rhs, .. } = expr else {
            panic!("expected comparison");
        };
        assert!(matches!(
            *rhs,
            Expr::Quantified {
                body: QuantifiedBody::Expr(_),
                ..
            }
        ));
    }

    #[test]
    fn quantified_predicate_with_window() {
        let expr = parse("ALL (foo > 1) OVER (PARTITION BY bar)");
        let Expr::Quantified { body, over, .. } = expr else {
            panic!("expected quantified");
        };
        assert!(matches!(body, QuantifiedBody::Paren(_)));
        assert!(over.is_some());
    }

    #[test]
    fn exists_collection_expression() {
        let expr = parse("exists elements(p.phones)");
        let Expr::Exists { operand, .. } = expr else {
            panic!("expected exists");
        };
        assert!(matches!(*operand, Expr::Path(_)));
    }

    #[test]
    fn nested_case_in_then_branch() {
        let expr = parse(
            "case when p.nickName is null then case p.name when 'x' then 1 else 2 end \
             else p.nickName end",
        );
        let Expr::Case(outer) = expr else {
            panic!("expected case");
        };
        let CaseExpression::Searched { arms, .. } = *outer else {
            panic!("expected searched case");
        };
        let Expr::Case(inner) = &arms[0].result else {
            panic!("expected nested case in THEN");
        };
        assert!(matches!(**inner, CaseExpression::Simple { .. }));
    }

    #[test]
    fn duration_and_by_arithmetic() {
        let expr = parse("1 week - 1 day");
        let Expr::Binary { lhs, rhs, .. } = expr else {
            panic!("expected binary");
        };
        assert!(matches!(*lhs, Expr::Duration { .. }));
        assert!(matches!(*rhs, Expr::Duration { .. }));

        let expr = parse("f.start BY DAY - 2");
        let Expr::Binary { lhs, .. } = expr else {
            panic!("expected binary");
        };
        assert!(matches!(*lhs, Expr::By { .. }));

        let expr = parse("f.birthday - local date day");
        let Expr::Binary { rhs, .. } = expr else {
            panic!("expected binary");
        };
        let Expr::Duration { value, .. } = *rhs else {
            panic!("expected duration");
        };
        assert!(matches!(*value, Expr::Temporal(_)));
    }

    #[test]
    fn temporal_forms() {
        assert!(matches!(
            parse("CURRENT TIMESTAMP"),
            Expr::Temporal(TemporalExpr::Words { .. })
        ));
        assert!(matches!(
            parse("OFFSET DATETIME 2012-01-03 09:00:00+1:01"),
            Expr::Temporal(TemporalExpr::OffsetLiteral { time: Some(_), .. })
        ));
        assert!(matches!(
            parse("INSTANT"),
            Expr::Temporal(TemporalExpr::Instant(_))
        ));
        // The underscore spellings are ordinary function calls.
        assert!(matches!(parse("CURRENT_DATE()"), Expr::Function(_)));
    }

    #[test]
    fn extract_multi_word_field() {
        let expr = parse("extract(day of week from departureTime)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Extract { field, .. } = *call else {
            panic!("expected extract");
        };
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn substring_both_forms() {
        let expr = parse("substring(c.number, 1, 2)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        assert!(matches!(
            *call,
            FunctionCall::Substring {
                rest: SubstringRest::Comma(_),
                ..
            }
        ));

        let expr = parse("substring(c.number FROM 1 FOR position('/0' in c.number))");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        assert!(matches!(
            *call,
            FunctionCall::Substring {
                rest: SubstringRest::FromFor { for_len: Some(_), .. },
                ..
            }
        ));
    }

    #[test]
    fn cast_both_forms() {
        let expr = parse("CAST(:userId AS java.util.UUID)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Cast { sep: CastSep::As { ty, .. }, .. } = *call else {
            panic!("expected cast-as");
        };
        assert_eq!(ty.segments.len(), 3);

        let expr = parse("cast(e.distance_from_home, int)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        assert!(matches!(
            *call,
            FunctionCall::Cast {
                sep: CastSep::Comma { .. },
                ..
            }
        ));
    }

    #[test]
    fn jpa_function_escape_hatch() {
        let expr = parse("FUNCTION('hasGoodCredit', c.balance, c.creditLimit)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::JpaFunction { args, .. } = *call else {
            panic!("expected FUNCTION call");
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn aggregate_with_filter_and_distinct() {
        let expr = parse("count(distinct c.phone) filter (where c.duration < 30)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Generic {
            distinct, filter, ..
        } = *call
        else {
            panic!("expected generic call");
        };
        assert!(distinct.is_some());
        assert!(filter.is_some());
    }

    #[test]
    fn listagg_within_group() {
        let expr = parse("listagg(p.number, ', ') within group (order by p.type, p.number)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Generic { within_group, .. } = *call else {
            panic!("expected generic call");
        };
        assert_eq!(within_group.expect("within group").order_by.items.len(), 2);
    }

    #[test]
    fn window_with_frame() {
        let expr = parse("sum(x) OVER (PARTITION BY y ORDER BY z ROWS BETWEEN 1 PRECEDING AND CURRENT ROW)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Generic { over: Some(over), .. } = *call else {
            panic!("expected windowed call");
        };
        assert!(over.partition_by.is_some());
        assert!(over.order_by.is_some());
        assert!(matches!(
            over.frame.expect("frame").extent,
            FrameExtent::Between { .. }
        ));
    }

    #[test]
    fn count_star_argument() {
        let expr = parse("count(*)");
        let Expr::Function(call) = expr else {
            panic!("expected function");
        };
        let FunctionCall::Generic { args, .. } = *call else {
            panic!("expected generic call");
        };
        assert!(matches!(args[0], Expr::Star(_)));
    }

    #[test]
    fn respect_nulls_postfix() {
        let expr = parse("FOO(x).bar RESPECT NULLS");
        let Expr::NullHandling { value, .. } = expr else {
            panic!("expected null-handling postfix");
        };
        assert!(matches!(*value, Expr::Path(_)));
    }

    #[test]
    fn array_literal() {
        let expr = parse("[e.firstName, e.lastName]");
        assert!(matches!(expr, Expr::ArrayLit(items) if items.len() == 2));
    }

    #[test]
    fn literal_type_tags_follow_suffixes() {
        for (text, kind) in [
            ("1", LiteralKind::Integer),
            ("1L", LiteralKind::Long),
            ("1bi", LiteralKind::BigInteger),
            ("1.1f", LiteralKind::Float),
            ("3.14e32D", LiteralKind::Double),
            ("2.2bd", LiteralKind::BigDecimal),
            ("'x'", LiteralKind::String),
            ("true", LiteralKind::Boolean),
            ("null", LiteralKind::Null),
            ("{d'2012-01-03'}", LiteralKind::Date),
            ("{ts'2012-01-03 09:00:00'}", LiteralKind::Timestamp),
            ("X'DEADBEEF'", LiteralKind::Binary),
            ("{0xDE, 0xAD}", LiteralKind::Binary),
        ] {
            let Expr::Literal(lit) = parse(text) else {
                panic!("expected literal for {text}");
            };
            assert_eq!(lit.kind, kind, "wrong tag for {text}");
        }
    }

    #[test]
    fn concat_operator() {
        let expr = parse("'Customer ' || p.name");
        let Expr::Binary { op, .. } = expr else {
            panic!("expected binary");
        };
        assert_eq!(op.kind, TokenKind::PipePipe);
    }

    #[test]
    fn alternate_inequality_spellings_are_kept() {
        for (text, spelling) in [("a != b", "!="), ("a <> b", "<>"), ("a ^= b", "^=")] {
            let Expr::Binary { op, .. } = parse(text) else {
                panic!("expected binary");
            };
            assert_eq!(op.text, spelling);
        }
    }
}
