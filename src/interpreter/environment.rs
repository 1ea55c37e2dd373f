use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{host::Sink, value::core::Value},
};

/// Result type used by callables and the reducer.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Type alias for native callable handlers.
///
/// A handler receives the evaluated argument list, the sink it may write to
/// and the position of the argument tuple for error reporting.
pub type NativeFn = fn(&[Value], &mut dyn Sink, usize) -> EvalResult<Value>;

/// A named procedure reachable through an entry's `references`.
#[derive(Clone, Copy)]
pub struct Callable {
    /// The member name the callable is registered under.
    pub name: &'static str,
    /// The procedure itself.
    pub func: NativeFn,
}

impl Callable {
    /// Invokes the callable.
    pub fn call(&self, args: &[Value], sink: &mut dyn Sink, position: usize) -> EvalResult<Value> {
        (self.func)(args, sink, position)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

/// Two callables are equal when they share both the name and the procedure.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     environment::{Callable, EvalResult},
///     host::{Sink, console_log},
///     value::core::Value,
/// };
///
/// fn silent(_: &[Value], _: &mut dyn Sink, _: usize) -> EvalResult<Value> {
///     Ok(Value::Undefined)
/// }
///
/// let log = Callable { name: "log",
///                      func: console_log };
/// let other = Callable { name: "log",
///                        func: silent };
///
/// assert_eq!(log, log);
/// assert_ne!(log, other);
/// ```
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::fn_addr_eq(self.func, other.func)
    }
}

/// What a member name inside an entry's `references` resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A nested entry, which may itself expose members.
    Entry(Rc<Entry>),
    /// A callable.
    Callable(Callable),
}

/// A named binding in the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    /// The value or host handle behind the binding, if it has one.
    pub source:     Option<Value>,
    /// Members reachable through dotted access.
    pub references: HashMap<String, Member>,
}

impl Entry {
    /// Creates an entry that carries a value and exposes no members.
    #[must_use]
    pub fn with_source(source: Value) -> Self {
        Self { source:     Some(source),
               references: HashMap::new(), }
    }

    /// Adds a callable member, replacing any member of the same name.
    #[must_use]
    pub fn with_callable(mut self, callable: Callable) -> Self {
        self.references.insert(callable.name.to_string(), Member::Callable(callable));
        self
    }

    /// Adds a nested entry member, replacing any member of the same name.
    #[must_use]
    pub fn with_member(mut self, name: &str, entry: Self) -> Self {
        self.references.insert(name.to_string(), Member::Entry(Rc::new(entry)));
        self
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.references.get(name)
    }
}

/// Stores the runtime environment.
///
/// Maps names to shared entries. Lookups hand out clones of the `Rc`, so an
/// entry observed by a running scan stays intact even if the name is
/// reassigned; [`Environment::assign`] is the only way to change a binding.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: HashMap<String, Rc<Entry>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a name. Surrounding whitespace is ignored.
    ///
    /// Looking up the same name twice without an intervening assignment
    /// returns the same entry.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use shellexpr::interpreter::{
    ///     environment::{Entry, Environment},
    ///     value::core::Value,
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.assign("x", Entry::with_source(Value::Integer(1)));
    ///
    /// let first = env.resolve("x").unwrap();
    /// let second = env.resolve(" x ").unwrap();
    /// assert!(Rc::ptr_eq(&first, &second));
    /// assert!(env.resolve("y").is_none());
    /// ```
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Rc<Entry>> {
        self.entries.get(name.trim()).cloned()
    }

    /// Binds `name` to `entry`, returning the entry it replaced.
    pub fn assign(&mut self, name: &str, entry: Entry) -> Option<Rc<Entry>> {
        self.assign_shared(name, Rc::new(entry))
    }

    /// Binds `name` to an already shared entry, returning the entry it
    /// replaced. Used when one name is assigned the entry of another.
    pub fn assign_shared(&mut self, name: &str, entry: Rc<Entry>) -> Option<Rc<Entry>> {
        tracing::debug!(name = name.trim(), "assign");
        self.entries.insert(name.trim().to_string(), entry)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name.trim())
    }

    /// Returns all bound names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.entries.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}
