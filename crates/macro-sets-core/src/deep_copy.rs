//! Deep copy over nested key/value tables.
//!
//! The host persists addon state as untyped nested tables, where any table may also carry a
//! metatable (a prototype table consulted for missing keys). This module models that shape as a
//! closed set of node kinds:
//!
//! - [`Value::Scalar`] - an atom (boolean, number, string). Copies are plain value copies.
//! - [`Value::Table`] - a shared, mutable mapping with an optional metatable link.
//!
//! Cloning a [`Value`] is *shallow*: the clone shares the same table (same identity, see
//! [`Value::ptr_eq`]). [`DeepCopy::deep_copy`] produces a structurally equal value that shares no
//! mutable table with its source, including the metatable chain.
//!
//! # Cycles
//!
//! Deep copy recurses structurally and does not track visited tables. Feeding it a table that
//! (directly or through its metatable) contains itself will recurse until the stack overflows.
//! The same holds for the structural `PartialEq` implementation.
//!
//! # Example
//!
//! ```rust
//! use macro_sets_core::{DeepCopy, Table, Value};
//!
//! let mut inner = Table::new();
//! inner.set("x", 10);
//! let mut outer = Table::new();
//! outer.set("nested", Value::table(inner));
//! let original = Value::table(outer);
//!
//! let copy = original.deep_copy();
//! assert_eq!(copy, original);
//! assert!(!copy.ptr_eq(&original));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Produce a fully independent copy of `self`.
///
/// Implementations must guarantee that mutating the copy never affects the original and vice
/// versa.
pub trait DeepCopy {
    /// Copy `self` without sharing any mutable substructure.
    fn deep_copy(&self) -> Self;
}

/// Convenience free function mirroring [`DeepCopy::deep_copy`].
pub fn deep_copy<T: DeepCopy>(value: &T) -> T {
    value.deep_copy()
}

/// An atomic (non-composite) value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Floating point number.
    Number(f64),
    /// String.
    Str(String),
}

/// A table key. Keys are always copied by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Integer key (array-like part).
    Int(i64),
    /// String key (record-like part).
    Str(String),
    /// Boolean key.
    Bool(bool),
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value.into())
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
            Key::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Shared handle to a table. Two handles are the *same* table iff `Rc::ptr_eq` holds.
pub type TableRef = Rc<RefCell<Table>>;

/// A nested mapping with an optional metatable.
#[derive(Debug, Default, PartialEq)]
pub struct Table {
    entries: BTreeMap<Key, Value>,
    metatable: Option<TableRef>,
}

impl Table {
    /// Create an empty table without a metatable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value if any.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a (shallow) handle to the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Number of entries (the metatable is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// The attached metatable, if any.
    pub fn metatable(&self) -> Option<TableRef> {
        self.metatable.clone()
    }

    /// Attach (or detach, with `None`) a metatable.
    pub fn set_metatable(&mut self, metatable: Option<TableRef>) {
        self.metatable = metatable;
    }

    /// Attach `metatable` and return `self`.
    pub fn with_metatable(mut self, metatable: Table) -> Self {
        self.metatable = Some(Rc::new(RefCell::new(metatable)));
        self
    }
}

impl DeepCopy for Table {
    fn deep_copy(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.deep_copy()))
            .collect();
        let metatable = self
            .metatable
            .as_ref()
            .map(|meta| Rc::new(RefCell::new(meta.borrow().deep_copy())));
        Self { entries, metatable }
    }
}

/// A node in a nested table structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Atomic value.
    Scalar(Scalar),
    /// Composite value (shared handle).
    Table(TableRef),
}

impl Value {
    /// Wrap a table into a new shared handle.
    pub fn table(table: Table) -> Self {
        Value::Table(Rc::new(RefCell::new(table)))
    }

    /// Whether this value is a composite.
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// Borrow the table handle, if this is a composite.
    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Value::Table(table) => Some(table),
            Value::Scalar(_) => None,
        }
    }

    /// The scalar, if this is an atom.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Table(_) => None,
        }
    }

    /// Identity comparison.
    ///
    /// Tables are identical iff they are the same allocation. Scalars have no identity, so two
    /// scalars are "identical" when they are equal.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            _ => false,
        }
    }
}

impl DeepCopy for Value {
    fn deep_copy(&self) -> Self {
        match self {
            Value::Scalar(scalar) => Value::Scalar(scalar.clone()),
            Value::Table(table) => Value::table(table.borrow().deep_copy()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Number(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Str(value))
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::table(value)
    }
}
