use std::fmt;

/// Represents a runtime value produced by literal materialization or returned
/// by a callable.
///
/// Composite variants keep their elements in source order; object members
/// keep insertion order and may repeat a key (the last one wins on lookup).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value. Returned by callables that only have side
    /// effects and used for identifiers that have no bound value.
    Undefined,
    /// The explicit `null` keyword.
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A string, already stripped of its quotes and with escapes resolved.
    Str(String),
    /// A parenthesized, comma separated list such as an argument list.
    Tuple(Vec<Self>),
    /// A bracketed, comma separated list.
    Array(Vec<Self>),
    /// A braced list of `key: value` members.
    Object(Vec<(String, Self)>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// Returns the elements of a tuple, or `None` for any other variant.
    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up an object member by key. Later members shadow earlier ones.
    ///
    /// # Example
    /// ```
    /// use shellexpr::interpreter::value::core::Value;
    ///
    /// let object = Value::Object(vec![("a".into(), Value::Integer(1)),
    ///                                 ("a".into(), Value::Integer(2))]);
    /// assert_eq!(object.member("a"), Some(&Value::Integer(2)));
    /// assert_eq!(object.member("b"), None);
    /// ```
    #[must_use]
    pub fn member(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(members) => members.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Writes a value that sits inside a composite. Strings are quoted there
    /// so that `["a, b"]` and `["a", "b"]` print differently.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

fn fmt_sequence(f: &mut fmt::Formatter<'_>,
                open: &str,
                items: &[Value],
                close: &str)
                -> fmt::Result {
    write!(f, "{open}")?;

    for (index, value) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }

        value.fmt_nested(f)?;
    }

    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Tuple(items) => fmt_sequence(f, "(", items, ")"),
            Self::Array(items) => fmt_sequence(f, "[", items, "]"),
            Self::Object(members) => {
                write!(f, "{{")?;

                for (index, (key, value)) in members.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{key}: ")?;
                    value.fmt_nested(f)?;
                }

                write!(f, "}}")
            },
        }
    }
}
