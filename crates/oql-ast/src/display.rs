//! Query rendering via `fmt::Display` for CST nodes.
//!
//! Every node implements `Display` by emitting its stored tokens verbatim,
//! in the order the parser recorded them, with canonical separators: one
//! space between words, none after `(`, before `)` or `,`, or around `.`.
//! Rendering is total — a parsed tree always renders — and any subtree
//! renders standalone, which is what consumers splice on.

#[allow(clippy::wildcard_imports)]
use crate::*;
use std::fmt;

/// Render any node (or subtree) to text.
#[must_use]
pub fn render<T: fmt::Display + ?Sized>(node: &T) -> String {
    node.to_string()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn space_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref as_kw) = self.as_kw {
            write!(f, "{as_kw} ")?;
        }
        write!(f, "{}", self.name)
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(q) => write!(f, "{q}"),
            Self::Update(u) => write!(f, "{u}"),
            Self::Delete(d) => write!(f, "{d}"),
            Self::Insert(i) => write!(f, "{i}"),
        }
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref with) = self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.first)?;
        for (op, branch) in &self.rest {
            write!(f, " {op} {branch}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(ref q) = self.qualifier {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)?;
        if let Some(ref o) = self.order_by {
            write!(f, " {o}")?;
        }
        if let Some(ref l) = self.limit {
            write!(f, " {l}")?;
        }
        if let Some(ref o) = self.offset {
            write!(f, " {o}")?;
        }
        if let Some(ref fe) = self.fetch {
            write!(f, " {fe}")?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectFirst {
                select,
                from,
                where_clause,
                group_by,
                having,
            } => {
                write!(f, "{select}")?;
                if let Some(fr) = from {
                    write!(f, " {fr}")?;
                }
                if let Some(w) = where_clause {
                    write!(f, " {w}")?;
                }
                if let Some(g) = group_by {
                    write!(f, " {g}")?;
                }
                if let Some(h) = having {
                    write!(f, " {h}")?;
                }
                Ok(())
            }
            Self::FromFirst {
                from,
                where_clause,
                group_by,
                having,
                select,
            } => {
                write!(f, "{from}")?;
                if let Some(w) = where_clause {
                    write!(f, " {w}")?;
                }
                if let Some(g) = group_by {
                    write!(f, " {g}")?;
                }
                if let Some(h) = having {
                    write!(f, " {h}")?;
                }
                if let Some(s) = select {
                    write!(f, " {s}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.with)?;
        comma_list(f, &self.ctes)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.as_kw, self.query)
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.update)?;
        if let Some(ref v) = self.versioned {
            write!(f, " {v}")?;
        }
        write!(f, " {} {}", self.target, self.set)?;
        if let Some(ref w) = self.where_clause {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.delete)?;
        if let Some(ref from) = self.from {
            write!(f, " {from}")?;
        }
        write!(f, " {}", self.target)?;
        if let Some(ref w) = self.where_clause {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.insert)?;
        if let Some(ref into) = self.into {
            write!(f, " {into}")?;
        }
        write!(f, " {}", self.target)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " {}", self.source)?;
        if let Some(ref oc) = self.on_conflict {
            write!(f, " {oc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values { values, rows } => {
                write!(f, "{values} ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Query(q) => write!(f, "{q}"),
        }
    }
}

impl fmt::Display for OnConflictClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.on, self.conflict)?;
        if let Some(ref t) = self.target {
            write!(f, " {t}")?;
        }
        write!(f, " {} {}", self.do_kw, self.action)
    }
}

impl fmt::Display for ConflictTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns(cols) => {
                f.write_str("(")?;
                comma_list(f, cols)?;
                f.write_str(")")
            }
            Self::Constraint {
                on,
                constraint,
                name,
            } => write!(f, "{on} {constraint} {name}"),
        }
    }
}

impl fmt::Display for ConflictAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing(t) => write!(f, "{t}"),
            Self::Update {
                update,
                set,
                where_clause,
            } => {
                write!(f, "{update} {set}")?;
                if let Some(w) = where_clause {
                    write!(f, " {w}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.set)?;
        comma_list(f, &self.assignments)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.eq, self.value)
    }
}

// ---------------------------------------------------------------------------
// SELECT / FROM
// ---------------------------------------------------------------------------

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.select)?;
        if let Some(ref d) = self.distinct {
            write!(f, "{d} ")?;
        }
        comma_list(f, &self.items)
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(e) => write!(f, "{e}"),
            Self::New(n) => write!(f, "{n}"),
        }
    }
}

impl fmt::Display for NewExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.new, self.target)?;
        comma_list(f, &self.args)?;
        f.write_str(")")
    }
}

impl fmt::Display for NewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(n) => write!(f, "{n}"),
            Self::Map(t) | Self::List(t) => write!(f, "{t}"),
        }
    }
}

impl fmt::Display for AliasedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.from)?;
        comma_list(f, &self.roots)
    }
}

impl fmt::Display for FromRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        for join in &self.joins {
            match join {
                Join::Qualified(j) => write!(f, " {j}")?,
                Join::CollectionIn(j) => write!(f, ", {j}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{p}"),
            Self::Subquery(q) => write!(f, "({q})"),
            Self::Function(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for QualifiedJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.kind_tokens {
            write!(f, "{t} ")?;
        }
        write!(f, "{}", self.join)?;
        if let Some(ref fe) = self.fetch {
            write!(f, " {fe}")?;
        }
        if let Some(ref l) = self.lateral {
            write!(f, " {l}")?;
        }
        write!(f, " {}", self.target)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        if let Some(ref r) = self.restriction {
            write!(f, " {r}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CollectionJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.in_kw, self.path)?;
        if let Some(ref a) = self.alias {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl fmt::Display for JoinRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On { on, predicate } => write!(f, "{on} {predicate}"),
            Self::With { with, predicate } => write!(f, "{with} {predicate}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering / grouping / ordering
// ---------------------------------------------------------------------------

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.where_kw, self.predicate)
    }
}

impl fmt::Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.group, self.by)?;
        comma_list(f, &self.items)
    }
}

impl fmt::Display for HavingClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.having, self.predicate)
    }
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.order, self.by)?;
        comma_list(f, &self.items)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(ref d) = self.direction {
            write!(f, " {d}")?;
        }
        if let Some((ref n0, ref n1)) = self.nulls {
            write!(f, " {n0} {n1}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.limit, self.value)
    }
}

impl fmt::Display for OffsetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.offset, self.value)?;
        if let Some(ref r) = self.rows {
            write!(f, " {r}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FetchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.fetch, self.first, self.count, self.rows, self.mode
        )
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Only(t) => write!(f, "{t}"),
            Self::WithTies { with, ties } => write!(f, "{with} {ties}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { lhs, op, rhs } => write!(f, "{lhs} {op} {rhs}"),
            Self::Unary { op, operand } => {
                if op.kind == TokenKind::KwNot {
                    write!(f, "{op} {operand}")
                } else {
                    // Signs attach directly: `-1`, `+x`.
                    write!(f, "{op}{operand}")
                }
            }
            Self::Grouping(e) => write!(f, "({e})"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::ArrayLit(items) => {
                f.write_str("[")?;
                comma_list(f, items)?;
                f.write_str("]")
            }
            Self::Literal(l) => write!(f, "{l}"),
            Self::Param(t) | Self::Star(t) => write!(f, "{t}"),
            Self::Path(p) => write!(f, "{p}"),
            Self::Case(c) => write!(f, "{c}"),
            Self::Function(c) => write!(f, "{c}"),
            Self::Subquery(q) => write!(f, "({q})"),
            Self::Quantified {
                quantifier,
                body,
                over,
            } => {
                write!(f, "{quantifier} {body}")?;
                if let Some(o) = over {
                    write!(f, " {o}")?;
                }
                Ok(())
            }
            Self::Exists { exists, operand } => write!(f, "{exists} {operand}"),
            Self::Is {
                lhs,
                is,
                not,
                target,
            } => {
                write!(f, "{lhs} {is}")?;
                if let Some(n) = not {
                    write!(f, " {n}")?;
                }
                write!(f, " {target}")
            }
            Self::Between {
                lhs,
                not,
                between,
                low,
                and,
                high,
            } => {
                write!(f, "{lhs}")?;
                if let Some(n) = not {
                    write!(f, " {n}")?;
                }
                write!(f, " {between} {low} {and} {high}")
            }
            Self::Like {
                lhs,
                not,
                op,
                pattern,
                escape,
            } => {
                write!(f, "{lhs}")?;
                if let Some(n) = not {
                    write!(f, " {n}")?;
                }
                write!(f, " {op} {pattern}")?;
                if let Some((esc, ch)) = escape {
                    write!(f, " {esc} {ch}")?;
                }
                Ok(())
            }
            Self::In {
                lhs,
                not,
                in_kw,
                source,
            } => {
                write!(f, "{lhs}")?;
                if let Some(n) = not {
                    write!(f, " {n}")?;
                }
                write!(f, " {in_kw} {source}")
            }
            Self::MemberOf {
                lhs,
                not,
                member,
                of,
                path,
            } => {
                write!(f, "{lhs}")?;
                if let Some(n) = not {
                    write!(f, " {n}")?;
                }
                write!(f, " {member}")?;
                if let Some(o) = of {
                    write!(f, " {o}")?;
                }
                write!(f, " {path}")
            }
            Self::Duration { value, unit } => write!(f, "{value} {unit}"),
            Self::By { value, by, unit } => write!(f, "{value} {by} {unit}"),
            Self::Temporal(t) => write!(f, "{t}"),
            Self::NullHandling {
                value,
                handling,
                nulls,
            } => write!(f, "{value} {handling} {nulls}"),
        }
    }
}

impl fmt::Display for InSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::Subquery(q) => write!(f, "({q})"),
            Self::Expr(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for IsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null(t) | Self::True(t) | Self::False(t) | Self::Empty(t) => write!(f, "{t}"),
            Self::DistinctFrom {
                distinct,
                from,
                rhs,
            } => write!(f, "{distinct} {from} {rhs}"),
        }
    }
}

impl fmt::Display for QuantifiedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subquery(q) => write!(f, "({q})"),
            Self::Paren(e) => write!(f, "({e})"),
            Self::Expr(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for TemporalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Words { first, second } => write!(f, "{first} {second}"),
            Self::OffsetLiteral {
                offset,
                datetime,
                date,
                time,
            } => {
                write!(f, "{offset} {datetime} {date}")?;
                if let Some(t) = time {
                    write!(f, " {t}")?;
                }
                Ok(())
            }
            Self::Instant(t) => write!(f, "{t}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for seg in &self.segments {
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(t) => write!(f, "{t}"),
            Self::Treat {
                treat,
                path,
                as_kw,
                ty,
            } => write!(f, "{treat}({path} {as_kw} {ty})"),
            Self::Wrapper { kw, arg } => write!(f, "{kw}({arg})"),
            Self::Function(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(t) => write!(f, ".{t}"),
            Self::Index(e) => write!(f, "[{e}]"),
            Self::Slice(a, b) => write!(f, "[{a}:{b}]"),
        }
    }
}

// ---------------------------------------------------------------------------
// CASE
// ---------------------------------------------------------------------------

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple {
                case,
                operand,
                arms,
                else_arm,
                end,
            } => {
                write!(f, "{case} {operand} ")?;
                space_list(f, arms)?;
                if let Some((kw, e)) = else_arm {
                    write!(f, " {kw} {e}")?;
                }
                write!(f, " {end}")
            }
            Self::Searched {
                case,
                arms,
                else_arm,
                end,
            } => {
                write!(f, "{case} ")?;
                space_list(f, arms)?;
                if let Some((kw, e)) = else_arm {
                    write!(f, " {kw} {e}")?;
                }
                write!(f, " {end}")
            }
        }
    }
}

impl fmt::Display for CaseArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.when, self.condition, self.then, self.result
        )
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic {
                name,
                distinct,
                args,
                filter,
                within_group,
                over,
            } => {
                write!(f, "{name}(")?;
                if let Some(d) = distinct {
                    write!(f, "{d} ")?;
                }
                comma_list(f, args)?;
                f.write_str(")")?;
                if let Some(fc) = filter {
                    write!(f, " {fc}")?;
                }
                if let Some(wg) = within_group {
                    write!(f, " {wg}")?;
                }
                if let Some(o) = over {
                    write!(f, " {o}")?;
                }
                Ok(())
            }
            Self::JpaFunction {
                function,
                name,
                args,
            } => {
                write!(f, "{function}({name}")?;
                for arg in args {
                    write!(f, ", {arg}")?;
                }
                f.write_str(")")
            }
            Self::Cast { cast, expr, sep } => match sep {
                CastSep::As { as_kw, ty } => write!(f, "{cast}({expr} {as_kw} {ty})"),
                CastSep::Comma { ty } => write!(f, "{cast}({expr}, {ty})"),
            },
            Self::Extract {
                extract,
                field,
                from,
                expr,
            } => {
                write!(f, "{extract}(")?;
                space_list(f, field)?;
                write!(f, " {from} {expr})")
            }
            Self::Substring {
                substring,
                source,
                rest,
            } => {
                write!(f, "{substring}({source}")?;
                match rest {
                    SubstringRest::Comma(args) => {
                        for arg in args {
                            write!(f, ", {arg}")?;
                        }
                    }
                    SubstringRest::FromFor {
                        from,
                        start,
                        for_len,
                    } => {
                        write!(f, " {from} {start}")?;
                        if let Some((kw, len)) = for_len {
                            write!(f, " {kw} {len}")?;
                        }
                    }
                }
                f.write_str(")")
            }
            Self::Overlay {
                overlay,
                value,
                placing,
                replacement,
                from,
                start,
                for_len,
            } => {
                write!(f, "{overlay}({value} {placing} {replacement} {from} {start}")?;
                if let Some((kw, len)) = for_len {
                    write!(f, " {kw} {len}")?;
                }
                f.write_str(")")
            }
            Self::Pad {
                pad,
                value,
                with,
                length,
                direction,
                pad_char,
            } => {
                write!(f, "{pad}({value} {with} {length} {direction}")?;
                if let Some(c) = pad_char {
                    write!(f, " {c}")?;
                }
                f.write_str(")")
            }
            Self::Position {
                position,
                needle,
                in_kw,
                haystack,
            } => write!(f, "{position}({needle} {in_kw} {haystack})"),
            Self::Trim {
                trim,
                spec,
                trim_char,
                from,
                source,
            } => {
                write!(f, "{trim}(")?;
                if let Some(s) = spec {
                    write!(f, "{s} ")?;
                }
                if let Some(c) = trim_char {
                    write!(f, "{c} ")?;
                }
                if let Some(fr) = from {
                    write!(f, "{fr} ")?;
                }
                write!(f, "{source})")
            }
            Self::Format {
                format,
                expr,
                as_kw,
                pattern,
            } => write!(f, "{format}({expr} {as_kw} {pattern})"),
            Self::Collate {
                collate,
                expr,
                as_kw,
                collation,
            } => write!(f, "{collate}({expr} {as_kw} {collation})"),
            Self::Grouping { kw, args } => {
                write!(f, "{kw}(")?;
                comma_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.filter, self.where_kw, self.predicate)
    }
}

impl fmt::Display for WithinGroupClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.within, self.group, self.order_by)
    }
}

impl fmt::Display for OverClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.over)?;
        let mut first = true;
        if let Some(ref p) = self.partition_by {
            write!(f, "{p}")?;
            first = false;
        }
        if let Some(ref o) = self.order_by {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{o}")?;
            first = false;
        }
        if let Some(ref fr) = self.frame {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{fr}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for PartitionBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.partition, self.by)?;
        comma_list(f, &self.items)
    }
}

impl fmt::Display for FrameClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.units, self.extent)
    }
}

impl fmt::Display for FrameExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(b) => write!(f, "{b}"),
            Self::Between {
                between,
                low,
                and,
                high,
            } => write!(f, "{between} {low} {and} {high}"),
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded { unbounded, edge } => write!(f, "{unbounded} {edge}"),
            Self::CurrentRow { current, row } => write!(f, "{current} {row}"),
            Self::Offset { value, edge } => write!(f, "{value} {edge}"),
        }
    }
}
