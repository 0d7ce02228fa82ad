//! Row filters
//!
//! PostgREST encodes row filters as query-string pairs of the form
//! `column=operator.value`, e.g. `id=eq.123` or `age=gte.18`. A
//! [`FilterSet`] preserves insertion order so the rendered query string is
//! deterministic.

/// Filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    Is,
    In,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Like => "like",
            Op::Ilike => "ilike",
            Op::Is => "is",
            Op::In => "in",
        }
    }
}

/// One column filter, rendered as `column=op.value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    op: Op,
    value: String,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Eq, value)
    }

    pub fn neq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Neq, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Gte, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Lte, value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(column, Op::Like, pattern)
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(column, Op::Ilike, pattern)
    }

    /// `IS` comparison, for `true`, `false`, and `null`.
    pub fn is(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, Op::Is, value)
    }

    /// Membership filter, rendered as `column=in.(a,b,c)`.
    pub fn is_in<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = values
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        Self::new(column, Op::In, format!("({joined})"))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn op(&self) -> Op {
        self.op
    }

    /// The right-hand side of the query pair: `op.value`.
    pub fn rhs(&self) -> String {
        format!("{}.{}", self.op.as_str(), self.value)
    }
}

/// An ordered collection of filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Render one query pair per filter, in insertion order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|f| (f.column.clone(), f.rhs()))
            .collect()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}
