//! Concrete syntax tree for the OQL object-query dialect (an HQL/JPQL-style
//! language).
//!
//! Unlike a conventional AST, every node here keeps the tokens it consumed:
//! keyword case, operator spelling (`!=` vs `<>` vs `^=`), literal quoting
//! and numeric suffixes all survive a parse. Rendering a tree back to text
//! (see [`display`]) therefore reproduces the whitespace-normalized input
//! exactly, which is what lets consumers rewrite queries (count projection,
//! injected sort, pagination) by splicing subtrees instead of re-parsing.
//!
//! Tokens with exactly one legal spelling — `(`, `)`, `,`, `.` — are the one
//! exception: the renderer re-derives those from structure, which cannot
//! lose text.

mod display;

use std::fmt;

pub use display::render;

// ---------------------------------------------------------------------------
// Span — source location tracking
// ---------------------------------------------------------------------------

/// A byte-offset range into the original query text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character (inclusive).
    pub start: u32,
    /// Byte offset one past the last character (exclusive).
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at position 0, used as a placeholder.
    pub const ZERO: Self = Self { start: 0, end: 0 };

    /// Merge two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A single lexical unit.
///
/// `text` is the verbatim source slice — `'Joe''s'` keeps its quotes and
/// doubled-quote escape, `1_000L` keeps its separator and suffix, `Select`
/// keeps its case. Tokens are immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token discriminant.
    pub kind: TokenKind,
    /// Verbatim source text.
    pub text: String,
    /// Byte-offset span into the original source.
    pub span: Span,
    /// Line number (1-based) at the start of the token.
    pub line: u32,
    /// Column number (1-based) at the start of the token.
    pub col: u32,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Token discriminant.
///
/// Payload-free: the raw text lives on [`Token`]. Keywords get one variant
/// each; every keyword token remains usable as an identifier (see
/// [`TokenKind::is_identifier_like`]), which is what makes the
/// keyword-as-identifier fallback uniform instead of list-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// Integer literal: `42`, `1_000`.
    IntLit,
    /// Long literal: `1L`.
    LongLit,
    /// Big-integer literal: `1bi`.
    BigIntLit,
    /// Float literal: `1.1f`, `1e+2F`.
    FloatLit,
    /// Double literal: `3.14`, `3.14e32D`, `100.5`.
    DoubleLit,
    /// Big-decimal literal: `2.2bd`.
    BigDecimalLit,
    /// Hex integer literal: `0xFF`.
    HexIntLit,
    /// Single-quoted string: `'Joe''s'`.
    StrLit,
    /// Double-quoted string: `"cost overrun"`.
    JavaStrLit,
    /// Hex-string binary literal: `X'DEADBEEF'`.
    BinaryLit,
    /// Brace-wrapped JDBC date: `{d'2012-01-03'}`.
    JdbcDateLit,
    /// Brace-wrapped JDBC time: `{t'09:00:00'}`.
    JdbcTimeLit,
    /// Brace-wrapped JDBC timestamp: `{ts'…'}` or `{ts2012-01-03 09:00:00+1}`.
    JdbcTimestampLit,
    /// Brace-wrapped byte list: `{0xDE, 0xAD}`.
    BraceBinaryLit,
    /// Bare date: `2012-01-03`.
    DateLit,
    /// Bare time with optional zone offset: `09:00:00`, `09:00:00+1:01`.
    TimeLit,

    // === Parameters ===
    /// `:name`.
    NamedParam,
    /// `?` or `?1`.
    PositionalParam,

    // === Identifiers ===
    Ident,

    // === Operators ===
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PipePipe, // `||`
    Eq,
    BangEq,   // `!=`
    LtGt,     // `<>`
    CaretEq,  // `^=`
    Lt,
    LtEq,
    Gt,
    GtEq,

    // === Punctuation ===
    Dot,
    Comma,
    Colon,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    // === Keywords ===
    KwAll,
    KwAnd,
    KwAny,
    KwAs,
    KwAsc,
    KwBetween,
    KwBoth,
    KwBy,
    KwCase,
    KwCast,
    KwCollate,
    KwConflict,
    KwConstraint,
    KwCross,
    KwCube,
    KwCurrent,
    KwDate,
    KwDatetime,
    KwDay,
    KwDelete,
    KwDesc,
    KwDistinct,
    KwDo,
    KwElement,
    KwElements,
    KwElse,
    KwEmpty,
    KwEnd,
    KwEntry,
    KwEpoch,
    KwEscape,
    KwEvery,
    KwExcept,
    KwExists,
    KwExtract,
    KwFalse,
    KwFetch,
    KwFilter,
    KwFirst,
    KwFk,
    KwFollowing,
    KwFor,
    KwFormat,
    KwFrom,
    KwFull,
    KwFunction,
    KwGroup,
    KwGroups,
    KwHaving,
    KwHour,
    KwId,
    KwIgnore,
    KwIlike,
    KwIn,
    KwIndex,
    KwIndices,
    KwInner,
    KwInsert,
    KwInstant,
    KwIntersect,
    KwInto,
    KwIs,
    KwJoin,
    KwKey,
    KwLast,
    KwLateral,
    KwLeading,
    KwLeft,
    KwLike,
    KwLimit,
    KwList,
    KwLocal,
    KwMap,
    KwMember,
    KwMinute,
    KwMonth,
    KwNanosecond,
    KwNaturalid,
    KwNew,
    KwNext,
    KwNot,
    KwNothing,
    KwNull,
    KwNulls,
    KwObject,
    KwOf,
    KwOffset,
    KwOn,
    KwOnly,
    KwOr,
    KwOrder,
    KwOuter,
    KwOver,
    KwOverlay,
    KwPad,
    KwPartition,
    KwPlacing,
    KwPosition,
    KwPreceding,
    KwQuarter,
    KwRange,
    KwRespect,
    KwRight,
    KwRollup,
    KwRow,
    KwRows,
    KwSecond,
    KwSelect,
    KwSet,
    KwSome,
    KwSubstring,
    KwThen,
    KwTies,
    KwTime,
    KwTimestamp,
    KwTrailing,
    KwTreat,
    KwTrim,
    KwTrue,
    KwType,
    KwUnbounded,
    KwUnion,
    KwUpdate,
    KwValue,
    KwValues,
    KwVersion,
    KwVersioned,
    KwWeek,
    KwWhen,
    KwWhere,
    KwWith,
    KwWithin,
    KwYear,

    // === Special ===
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Look up an identifier string to see if it's a keyword.
    /// Returns the keyword variant if so, else `None`.
    #[must_use]
    pub fn lookup_keyword(s: &str) -> Option<Self> {
        // Keywords compare case-insensitively; the token keeps the raw case.
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Some(Self::KwAll),
            "AND" => Some(Self::KwAnd),
            "ANY" => Some(Self::KwAny),
            "AS" => Some(Self::KwAs),
            "ASC" => Some(Self::KwAsc),
            "BETWEEN" => Some(Self::KwBetween),
            "BOTH" => Some(Self::KwBoth),
            "BY" => Some(Self::KwBy),
            "CASE" => Some(Self::KwCase),
            "CAST" => Some(Self::KwCast),
            "COLLATE" => Some(Self::KwCollate),
            "CONFLICT" => Some(Self::KwConflict),
            "CONSTRAINT" => Some(Self::KwConstraint),
            "CROSS" => Some(Self::KwCross),
            "CUBE" => Some(Self::KwCube),
            "CURRENT" => Some(Self::KwCurrent),
            "DATE" => Some(Self::KwDate),
            "DATETIME" => Some(Self::KwDatetime),
            "DAY" => Some(Self::KwDay),
            "DELETE" => Some(Self::KwDelete),
            "DESC" => Some(Self::KwDesc),
            "DISTINCT" => Some(Self::KwDistinct),
            "DO" => Some(Self::KwDo),
            "ELEMENT" => Some(Self::KwElement),
            "ELEMENTS" => Some(Self::KwElements),
            "ELSE" => Some(Self::KwElse),
            "EMPTY" => Some(Self::KwEmpty),
            "END" => Some(Self::KwEnd),
            "ENTRY" => Some(Self::KwEntry),
            "EPOCH" => Some(Self::KwEpoch),
            "ESCAPE" => Some(Self::KwEscape),
            "EVERY" => Some(Self::KwEvery),
            "EXCEPT" => Some(Self::KwExcept),
            "EXISTS" => Some(Self::KwExists),
            "EXTRACT" => Some(Self::KwExtract),
            "FALSE" => Some(Self::KwFalse),
            "FETCH" => Some(Self::KwFetch),
            "FILTER" => Some(Self::KwFilter),
            "FIRST" => Some(Self::KwFirst),
            "FK" => Some(Self::KwFk),
            "FOLLOWING" => Some(Self::KwFollowing),
            "FOR" => Some(Self::KwFor),
            "FORMAT" => Some(Self::KwFormat),
            "FROM" => Some(Self::KwFrom),
            "FULL" => Some(Self::KwFull),
            "FUNCTION" => Some(Self::KwFunction),
            "GROUP" => Some(Self::KwGroup),
            "GROUPS" => Some(Self::KwGroups),
            "HAVING" => Some(Self::KwHaving),
            "HOUR" => Some(Self::KwHour),
            "ID" => Some(Self::KwId),
            "IGNORE" => Some(Self::KwIgnore),
            "ILIKE" => Some(Self::KwIlike),
            "IN" => Some(Self::KwIn),
            "INDEX" => Some(Self::KwIndex),
            "INDICES" => Some(Self::KwIndices),
            "INNER" => Some(Self::KwInner),
            "INSERT" => Some(Self::KwInsert),
            "INSTANT" => Some(Self::KwInstant),
            "INTERSECT" => Some(Self::KwIntersect),
            "INTO" => Some(Self::KwInto),
            "IS" => Some(Self::KwIs),
            "JOIN" => Some(Self::KwJoin),
            "KEY" => Some(Self::KwKey),
            "LAST" => Some(Self::KwLast),
            "LATERAL" => Some(Self::KwLateral),
            "LEADING" => Some(Self::KwLeading),
            "LEFT" => Some(Self::KwLeft),
            "LIKE" => Some(Self::KwLike),
            "LIMIT" => Some(Self::KwLimit),
            "LIST" => Some(Self::KwList),
            "LOCAL" => Some(Self::KwLocal),
            "MAP" => Some(Self::KwMap),
            "MEMBER" => Some(Self::KwMember),
            "MINUTE" => Some(Self::KwMinute),
            "MONTH" => Some(Self::KwMonth),
            "NANOSECOND" => Some(Self::KwNanosecond),
            "NATURALID" => Some(Self::KwNaturalid),
            "NEW" => Some(Self::KwNew),
            "NEXT" => Some(Self::KwNext),
            "NOT" => Some(Self::KwNot),
            "NOTHING" => Some(Self::KwNothing),
            "NULL" => Some(Self::KwNull),
            "NULLS" => Some(Self::KwNulls),
            "OBJECT" => Some(Self::KwObject),
            "OF" => Some(Self::KwOf),
            "OFFSET" => Some(Self::KwOffset),
            "ON" => Some(Self::KwOn),
            "ONLY" => Some(Self::KwOnly),
            "OR" => Some(Self::KwOr),
            "ORDER" => Some(Self::KwOrder),
            "OUTER" => Some(Self::KwOuter),
            "OVER" => Some(Self::KwOver),
            "OVERLAY" => Some(Self::KwOverlay),
            "PAD" => Some(Self::KwPad),
            "PARTITION" => Some(Self::KwPartition),
            "PLACING" => Some(Self::KwPlacing),
            "POSITION" => Some(Self::KwPosition),
            "PRECEDING" => Some(Self::KwPreceding),
            "QUARTER" => Some(Self::KwQuarter),
            "RANGE" => Some(Self::KwRange),
            "RESPECT" => Some(Self::KwRespect),
            "RIGHT" => Some(Self::KwRight),
            "ROLLUP" => Some(Self::KwRollup),
            "ROW" => Some(Self::KwRow),
            "ROWS" => Some(Self::KwRows),
            "SECOND" => Some(Self::KwSecond),
            "SELECT" => Some(Self::KwSelect),
            "SET" => Some(Self::KwSet),
            "SOME" => Some(Self::KwSome),
            "SUBSTRING" => Some(Self::KwSubstring),
            "THEN" => Some(Self::KwThen),
            "TIES" => Some(Self::KwTies),
            "TIME" => Some(Self::KwTime),
            "TIMESTAMP" => Some(Self::KwTimestamp),
            "TRAILING" => Some(Self::KwTrailing),
            "TREAT" => Some(Self::KwTreat),
            "TRIM" => Some(Self::KwTrim),
            "TRUE" => Some(Self::KwTrue),
            "TYPE" => Some(Self::KwType),
            "UNBOUNDED" => Some(Self::KwUnbounded),
            "UNION" => Some(Self::KwUnion),
            "UPDATE" => Some(Self::KwUpdate),
            "VALUE" => Some(Self::KwValue),
            "VALUES" => Some(Self::KwValues),
            "VERSION" => Some(Self::KwVersion),
            "VERSIONED" => Some(Self::KwVersioned),
            "WEEK" => Some(Self::KwWeek),
            "WHEN" => Some(Self::KwWhen),
            "WHERE" => Some(Self::KwWhere),
            "WITH" => Some(Self::KwWith),
            "WITHIN" => Some(Self::KwWithin),
            "YEAR" => Some(Self::KwYear),
            _ => None,
        }
    }

    /// True for keyword variants. Everything that is not a literal, operator,
    /// punctuation, parameter, identifier, or EOF is a keyword.
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            Self::IntLit
                | Self::LongLit
                | Self::BigIntLit
                | Self::FloatLit
                | Self::DoubleLit
                | Self::BigDecimalLit
                | Self::HexIntLit
                | Self::StrLit
                | Self::JavaStrLit
                | Self::BinaryLit
                | Self::JdbcDateLit
                | Self::JdbcTimeLit
                | Self::JdbcTimestampLit
                | Self::BraceBinaryLit
                | Self::DateLit
                | Self::TimeLit
                | Self::NamedParam
                | Self::PositionalParam
                | Self::Ident
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
                | Self::PipePipe
                | Self::Eq
                | Self::BangEq
                | Self::LtGt
                | Self::CaretEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::Dot
                | Self::Comma
                | Self::Colon
                | Self::LeftParen
                | Self::RightParen
                | Self::LeftBracket
                | Self::RightBracket
                | Self::Eof
        )
    }

    /// True if the token may serve as a name: a plain identifier or any
    /// keyword. The grammar decides per position whether the keyword reading
    /// wins; there is no reserved-word list.
    #[must_use]
    pub fn is_identifier_like(&self) -> bool {
        matches!(self, Self::Ident) || self.is_keyword()
    }

    /// Date/time arithmetic units (`5 DAY`, `expr BY WEEK`).
    #[must_use]
    pub fn is_datetime_unit(&self) -> bool {
        matches!(
            self,
            Self::KwDay
                | Self::KwWeek
                | Self::KwMonth
                | Self::KwQuarter
                | Self::KwYear
                | Self::KwHour
                | Self::KwMinute
                | Self::KwSecond
                | Self::KwNanosecond
                | Self::KwEpoch
        )
    }

    /// Keywords that can begin an `EXTRACT` field designator.
    #[must_use]
    pub fn is_extract_field_start(&self) -> bool {
        self.is_datetime_unit() || matches!(self, Self::KwDate | Self::KwTime | Self::KwTimestamp)
    }

    /// Tokens that open a structural clause and therefore end any expression
    /// list in progress. This is how "try the keyword production first" is
    /// decided at expression-start positions: a keyword in this set always
    /// has a clause production waiting for it, so it never degrades to an
    /// identifier there (it still can after a dot or `AS`).
    #[must_use]
    pub fn is_clause_boundary(&self) -> bool {
        matches!(
            self,
            Self::KwSelect
                | Self::KwFrom
                | Self::KwWhere
                | Self::KwGroup
                | Self::KwHaving
                | Self::KwOrder
                | Self::KwUnion
                | Self::KwIntersect
                | Self::KwExcept
                | Self::KwLimit
                | Self::KwOffset
                | Self::KwFetch
                | Self::KwJoin
                | Self::KwInner
                | Self::KwOuter
                | Self::KwFull
                | Self::KwCross
                | Self::KwOn
                | Self::KwAs
                | Self::KwWhen
                | Self::KwThen
                | Self::KwElse
                | Self::KwEnd
                | Self::KwSet
                | Self::KwAnd
                | Self::KwOr
                | Self::KwIs
                | Self::KwEscape
                | Self::KwAsc
                | Self::KwDesc
                | Self::KwNulls
                | Self::KwOnly
                | Self::KwTies
                | Self::KwRow
                | Self::KwRows
                | Self::KwInto
                | Self::KwDo
                | Self::KwBy
                | Self::KwWith
        )
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// A dotted identifier chain: `Person`, `org.acme.Gender`, `utl_raw.cast_to_varchar2`.
///
/// Used for entity names, constructor targets, cast/treat type names, and
/// function names. Each segment keeps its token (any keyword is legal here).
#[derive(Debug, Clone, PartialEq)]
pub struct DottedName {
    pub segments: Vec<Token>,
}

/// An alias with its optional `AS`: `AS addr` or bare `addr`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub as_kw: Option<Token>,
    pub name: Token,
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A single parsed query statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(QueryExpression),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Insert(InsertStatement),
}

/// A full query expression: optional CTEs, then one or more ordered query
/// branches combined left-associatively by set operators.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    pub with: Option<WithClause>,
    pub first: OrderedQuery,
    pub rest: Vec<(SetOperator, OrderedQuery)>,
}

/// `UNION | INTERSECT | EXCEPT`, optionally qualified by `ALL`/`DISTINCT`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperator {
    pub op: Token,
    pub qualifier: Option<Token>,
}

/// One query branch plus its independently-optional trailing clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedQuery {
    pub body: QueryBody,
    pub order_by: Option<OrderByClause>,
    pub limit: Option<LimitClause>,
    pub offset: Option<OffsetClause>,
    pub fetch: Option<FetchClause>,
}

/// The clause body of a query branch. Both clause orders are legal
/// (`select … from …` and `from … select …`); the variant records which one
/// was written so rendering reproduces it.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    SelectFirst {
        select: SelectClause,
        from: Option<FromClause>,
        where_clause: Option<WhereClause>,
        group_by: Option<GroupByClause>,
        having: Option<HavingClause>,
    },
    FromFirst {
        from: FromClause,
        where_clause: Option<WhereClause>,
        group_by: Option<GroupByClause>,
        having: Option<HavingClause>,
        select: Option<SelectClause>,
    },
}

/// `WITH name AS (query) [, …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub with: Token,
    pub ctes: Vec<Cte>,
}

/// One common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: Token,
    pub as_kw: Token,
    pub query: Box<QueryExpression>,
}

/// `UPDATE [VERSIONED] entity [alias] SET … [WHERE …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub update: Token,
    pub versioned: Option<Token>,
    pub target: EntityRef,
    pub set: SetClause,
    pub where_clause: Option<WhereClause>,
}

/// `DELETE [FROM] entity [alias] [WHERE …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub delete: Token,
    pub from: Option<Token>,
    pub target: EntityRef,
    pub where_clause: Option<WhereClause>,
}

/// `INSERT [INTO] entity (columns) {VALUES (…)[, …] | query} [ON CONFLICT …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub insert: Token,
    pub into: Option<Token>,
    pub target: EntityRef,
    pub columns: Vec<Token>,
    pub source: InsertSource,
    pub on_conflict: Option<OnConflictClause>,
}

/// The row source of an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values { values: Token, rows: Vec<Vec<Expr>> },
    Query(Box<QueryExpression>),
}

/// `ON CONFLICT [(cols) | ON CONSTRAINT name] DO {NOTHING | UPDATE SET … [WHERE …]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflictClause {
    pub on: Token,
    pub conflict: Token,
    pub target: Option<ConflictTarget>,
    pub do_kw: Token,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictTarget {
    Columns(Vec<Token>),
    Constraint {
        on: Token,
        constraint: Token,
        name: Token,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    Nothing(Token),
    Update {
        update: Token,
        set: SetClause,
        where_clause: Option<WhereClause>,
    },
}

/// An entity reference with an optional alias: `Employee e`, `Person`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef {
    pub name: DottedName,
    pub alias: Option<Alias>,
}

/// `SET path = expr [, …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub set: Token,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: PathExpression,
    pub eq: Token,
    pub value: Expr,
}

// ---------------------------------------------------------------------------
// SELECT / FROM clauses
// ---------------------------------------------------------------------------

/// `SELECT [DISTINCT] item [, …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub select: Token,
    pub distinct: Option<Token>,
    pub items: Vec<SelectItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub value: SelectValue,
    pub alias: Option<Alias>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectValue {
    Expr(Expr),
    New(NewExpr),
}

/// `NEW com.acme.Dto(args)`, `NEW map(…)`, `NEW list(…)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub new: Token,
    pub target: NewTarget,
    pub args: Vec<AliasedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewTarget {
    Class(DottedName),
    Map(Token),
    List(Token),
}

/// An expression with an optional alias, as allowed inside `NEW map(…)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpr {
    pub expr: Expr,
    pub alias: Option<Alias>,
}

/// `FROM root [joins] [, root [joins] …]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub from: Token,
    pub roots: Vec<FromRoot>,
}

/// One FROM-list entry: a source, its alias, and the joins hanging off it.
#[derive(Debug, Clone, PartialEq)]
pub struct FromRoot {
    pub source: SourceRef,
    pub alias: Option<Alias>,
    pub joins: Vec<Join>,
}

/// A joinable source: an entity/path, a derived table, or a set-returning
/// function call. Shared by FROM roots and join targets.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRef {
    Path(PathExpression),
    Subquery(Box<QueryExpression>),
    Function(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Join {
    Qualified(QualifiedJoin),
    /// Legacy comma-join: `, IN(path) alias`.
    CollectionIn(CollectionJoin),
}

/// Semantic join kind; the spelling lives in `kind_tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedJoin {
    pub kind: JoinKind,
    /// Kind words as written, e.g. `[left, outer]`; empty for a bare `JOIN`.
    pub kind_tokens: Vec<Token>,
    pub join: Token,
    pub fetch: Option<Token>,
    pub lateral: Option<Token>,
    pub target: SourceRef,
    pub alias: Option<Alias>,
    pub restriction: Option<JoinRestriction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionJoin {
    pub in_kw: Token,
    pub path: PathExpression,
    pub alias: Option<Alias>,
}

/// At most one restriction per join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinRestriction {
    On { on: Token, predicate: Expr },
    With { with: Token, predicate: Expr },
}

// ---------------------------------------------------------------------------
// Filtering / grouping / ordering clauses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub where_kw: Token,
    pub predicate: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub group: Token,
    pub by: Token,
    pub items: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    pub having: Token,
    pub predicate: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub order: Token,
    pub by: Token,
    pub items: Vec<SortSpec>,
}

/// `expr [ASC|DESC] [NULLS {FIRST|LAST}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub expr: Expr,
    pub direction: Option<Token>,
    pub nulls: Option<(Token, Token)>,
}

/// `LIMIT n`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub limit: Token,
    pub value: Expr,
}

/// `OFFSET n [ROWS]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetClause {
    pub offset: Token,
    pub value: Expr,
    pub rows: Option<Token>,
}

/// `FETCH {FIRST|NEXT} n {ROWS|ROW} {ONLY | WITH TIES}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchClause {
    pub fetch: Token,
    pub first: Token,
    pub count: Expr,
    pub rows: Token,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchMode {
    Only(Token),
    WithTies { with: Token, ties: Token },
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression or predicate. Predicates are expressions here, the way the
/// grammar treats them; no separate predicate hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `lhs op rhs` for arithmetic, comparison, logical and `||` operators.
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// Signed prefix (`-x`, `+1`) or `NOT expr`.
    Unary { op: Token, operand: Box<Expr> },
    /// A parenthesized expression.
    Grouping(Box<Expr>),
    /// A parenthesized expression list: `(a, b)`.
    Tuple(Vec<Expr>),
    /// `[e1, e2, …]`.
    ArrayLit(Vec<Expr>),
    Literal(Literal),
    /// `:name`, `?1`, `?`.
    Param(Token),
    /// `*` as a sole aggregate argument.
    Star(Token),
    Path(PathExpression),
    Case(Box<CaseExpression>),
    Function(Box<FunctionCall>),
    /// `(SELECT …)` used as a value.
    Subquery(Box<QueryExpression>),
    /// `{ALL|ANY|SOME|EVERY} operand`, optionally windowed.
    Quantified {
        quantifier: Token,
        body: QuantifiedBody,
        over: Option<OverClause>,
    },
    /// `EXISTS operand` (subquery or collection expression).
    Exists { exists: Token, operand: Box<Expr> },
    /// `lhs IS [NOT] {NULL|TRUE|FALSE|EMPTY|DISTINCT FROM rhs}`.
    Is {
        lhs: Box<Expr>,
        is: Token,
        not: Option<Token>,
        target: IsTarget,
    },
    /// `lhs [NOT] BETWEEN low AND high`.
    Between {
        lhs: Box<Expr>,
        not: Option<Token>,
        between: Token,
        low: Box<Expr>,
        and: Token,
        high: Box<Expr>,
    },
    /// `lhs [NOT] {LIKE|ILIKE} pattern [ESCAPE ch]`.
    Like {
        lhs: Box<Expr>,
        not: Option<Token>,
        op: Token,
        pattern: Box<Expr>,
        escape: Option<(Token, Box<Expr>)>,
    },
    /// `lhs [NOT] IN source`.
    In {
        lhs: Box<Expr>,
        not: Option<Token>,
        in_kw: Token,
        source: InSource,
    },
    /// `lhs [NOT] MEMBER [OF] path`.
    MemberOf {
        lhs: Box<Expr>,
        not: Option<Token>,
        member: Token,
        of: Option<Token>,
        path: PathExpression,
    },
    /// `value unit` duration: `5 DAY`, `1 week`.
    Duration { value: Box<Expr>, unit: Token },
    /// `value BY unit` date-difference scaling.
    By {
        value: Box<Expr>,
        by: Token,
        unit: Token,
    },
    /// `CURRENT DATE`, `LOCAL DATETIME`, `INSTANT`, `OFFSET DATETIME [lit]`.
    Temporal(TemporalExpr),
    /// `expr {RESPECT|IGNORE} NULLS`.
    NullHandling {
        value: Box<Expr>,
        handling: Token,
        nulls: Token,
    },
}

/// Right-hand side of an `IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum InSource {
    /// `(e1, e2, …)`.
    List(Vec<Expr>),
    /// `(SELECT …)`.
    Subquery(Box<QueryExpression>),
    /// A parameter, path, or collection expression without parentheses.
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IsTarget {
    Null(Token),
    True(Token),
    False(Token),
    Empty(Token),
    DistinctFrom {
        distinct: Token,
        from: Token,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuantifiedBody {
    /// `(SELECT …)`.
    Subquery(Box<QueryExpression>),
    /// `(predicate)`.
    Paren(Box<Expr>),
    /// `elements(…)`, `indices(…)`, `values(…)` or any plain expression.
    Expr(Box<Expr>),
}

/// Temporal value expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalExpr {
    /// `CURRENT DATE`, `CURRENT TIME`, `CURRENT TIMESTAMP`,
    /// `LOCAL DATE`, `LOCAL TIME`, `LOCAL DATETIME`, `OFFSET DATETIME`.
    Words { first: Token, second: Token },
    /// `OFFSET DATETIME 2012-01-03 09:00:00+1:01`.
    OffsetLiteral {
        offset: Token,
        datetime: Token,
        date: Token,
        time: Option<Token>,
    },
    /// `INSTANT`.
    Instant(Token),
}

/// A literal with its lexical token and the type tag derived from
/// suffix/syntax alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub token: Token,
    pub kind: LiteralKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    String,
    Boolean,
    Null,
    Date,
    Time,
    Timestamp,
    Binary,
}

impl LiteralKind {
    /// Derive the tag from a token kind, if the kind is a literal.
    #[must_use]
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntLit | TokenKind::HexIntLit => Some(Self::Integer),
            TokenKind::LongLit => Some(Self::Long),
            TokenKind::BigIntLit => Some(Self::BigInteger),
            TokenKind::FloatLit => Some(Self::Float),
            TokenKind::DoubleLit => Some(Self::Double),
            TokenKind::BigDecimalLit => Some(Self::BigDecimal),
            TokenKind::StrLit | TokenKind::JavaStrLit => Some(Self::String),
            TokenKind::KwTrue | TokenKind::KwFalse => Some(Self::Boolean),
            TokenKind::KwNull => Some(Self::Null),
            TokenKind::JdbcDateLit | TokenKind::DateLit => Some(Self::Date),
            TokenKind::JdbcTimeLit | TokenKind::TimeLit => Some(Self::Time),
            TokenKind::JdbcTimestampLit => Some(Self::Timestamp),
            TokenKind::BinaryLit | TokenKind::BraceBinaryLit => Some(Self::Binary),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// A navigation path: a root followed by attribute / index / slice segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub root: PathRoot,
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathRoot {
    /// A plain (possibly keyword-spelled) identifier.
    Ident(Token),
    /// `TREAT(path AS Type)`.
    Treat {
        treat: Token,
        path: Box<PathExpression>,
        as_kw: Token,
        ty: DottedName,
    },
    /// `KEY(x)`, `VALUE(x)`, `INDEX(x)`, `ELEMENT(x)`, `ELEMENTS(x)`,
    /// `INDICES(x)`, `VALUES(x)`, `ENTRY(x)`, `ID(x)`, `FK(x)`,
    /// `NATURALID(x)`, `VERSION(x)`, `TYPE(x)`, `OBJECT(x)`.
    Wrapper { kw: Token, arg: Box<Expr> },
    /// A function call continued as a path: `some_function().foo`.
    Function(Box<FunctionCall>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `.name`.
    Attribute(Token),
    /// `[expr]`.
    Index(Expr),
    /// `[from:to]`.
    Slice(Expr, Expr),
}

// ---------------------------------------------------------------------------
// CASE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CaseExpression {
    /// `CASE operand WHEN val THEN res … [ELSE e] END`.
    Simple {
        case: Token,
        operand: Expr,
        arms: Vec<CaseArm>,
        else_arm: Option<(Token, Expr)>,
        end: Token,
    },
    /// `CASE WHEN pred THEN res … [ELSE e] END`.
    Searched {
        case: Token,
        arms: Vec<CaseArm>,
        else_arm: Option<(Token, Expr)>,
        end: Token,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub when: Token,
    pub condition: Expr,
    pub then: Token,
    pub result: Expr,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// A function invocation. One variant per special argument syntax; anything
/// with ordinary comma-separated arguments is `Generic`.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionCall {
    Generic {
        name: DottedName,
        distinct: Option<Token>,
        args: Vec<Expr>,
        filter: Option<FilterClause>,
        within_group: Option<WithinGroupClause>,
        over: Option<OverClause>,
    },
    /// `FUNCTION('name', args…)`.
    JpaFunction {
        function: Token,
        name: Token,
        args: Vec<Expr>,
    },
    /// `CAST(expr AS type)` or the comma form `CAST(expr, type)`.
    Cast {
        cast: Token,
        expr: Box<Expr>,
        sep: CastSep,
    },
    /// `EXTRACT(field FROM expr)` with multi-word fields.
    Extract {
        extract: Token,
        field: Vec<Token>,
        from: Token,
        expr: Box<Expr>,
    },
    /// `SUBSTRING(src, start [, len])` or `SUBSTRING(src FROM start [FOR len])`.
    Substring {
        substring: Token,
        source: Box<Expr>,
        rest: SubstringRest,
    },
    /// `OVERLAY(value PLACING repl FROM start [FOR len])`.
    Overlay {
        overlay: Token,
        value: Box<Expr>,
        placing: Token,
        replacement: Box<Expr>,
        from: Token,
        start: Box<Expr>,
        for_len: Option<(Token, Box<Expr>)>,
    },
    /// `PAD(value WITH length {LEADING|TRAILING} [char])`.
    Pad {
        pad: Token,
        value: Box<Expr>,
        with: Token,
        length: Box<Expr>,
        direction: Token,
        pad_char: Option<Box<Expr>>,
    },
    /// `POSITION(needle IN haystack)`.
    Position {
        position: Token,
        needle: Box<Expr>,
        in_kw: Token,
        haystack: Box<Expr>,
    },
    /// `TRIM([LEADING|TRAILING|BOTH] [char] [FROM] source)`.
    Trim {
        trim: Token,
        spec: Option<Token>,
        trim_char: Option<Box<Expr>>,
        from: Option<Token>,
        source: Box<Expr>,
    },
    /// `FORMAT(expr AS pattern)`.
    Format {
        format: Token,
        expr: Box<Expr>,
        as_kw: Token,
        pattern: Box<Expr>,
    },
    /// `COLLATE(expr AS collation)`.
    Collate {
        collate: Token,
        expr: Box<Expr>,
        as_kw: Token,
        collation: DottedName,
    },
    /// `CUBE(args)` / `ROLLUP(args)`.
    Grouping { kw: Token, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CastSep {
    As { as_kw: Token, ty: DottedName },
    Comma { ty: DottedName },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubstringRest {
    Comma(Vec<Expr>),
    FromFor {
        from: Token,
        start: Box<Expr>,
        for_len: Option<(Token, Box<Expr>)>,
    },
}

/// `FILTER (WHERE predicate)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub filter: Token,
    pub where_kw: Token,
    pub predicate: Expr,
}

/// `WITHIN GROUP (ORDER BY …)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithinGroupClause {
    pub within: Token,
    pub group: Token,
    pub order_by: OrderByClause,
}

/// `OVER ([PARTITION BY …] [ORDER BY …] [frame])`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverClause {
    pub over: Token,
    pub partition_by: Option<PartitionBy>,
    pub order_by: Option<OrderByClause>,
    pub frame: Option<FrameClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionBy {
    pub partition: Token,
    pub by: Token,
    pub items: Vec<Expr>,
}

/// `{ROWS|RANGE|GROUPS} {bound | BETWEEN bound AND bound}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClause {
    pub units: Token,
    pub extent: FrameExtent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameExtent {
    Single(FrameBound),
    Between {
        between: Token,
        low: FrameBound,
        and: Token,
        high: FrameBound,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    /// `UNBOUNDED PRECEDING` / `UNBOUNDED FOLLOWING`.
    Unbounded { unbounded: Token, edge: Token },
    /// `CURRENT ROW`.
    CurrentRow { current: Token, row: Token },
    /// `expr PRECEDING` / `expr FOLLOWING`.
    Offset { value: Box<Expr>, edge: Token },
}
