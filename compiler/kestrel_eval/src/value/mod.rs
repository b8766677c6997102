//! Runtime values.
//!
//! Scalars are stored inline; strings, arrays and objects live behind
//! [`Heap`], a shared immutable pointer. Values are never mutated in place:
//! natives such as `push` build a new value and leave the original untouched.

mod function;

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use kestrel_ir::Name;
use rustc_hash::FxHashMap;

use crate::errors::{not_callable, type_mismatch, EvalError};

pub use function::{FunctionValue, NativeFn, NativeFunction, NativeFuture, UserFunction};

/// Key/value storage behind an object value.
pub type ObjectMap = FxHashMap<Name, Value>;

/// Shared pointer to immutable heap data.
///
/// Construction goes through the `Value` factories so every heap value is
/// allocated in one place.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Heap<T> {
    #[inline]
    fn from_rc(inner: Rc<T>) -> Self {
        Heap(inner)
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(self, other) || *self.0 == *other.0
    }
}

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(Heap<str>),
    Arr(Heap<Vec<Value>>),
    Obj(Heap<ObjectMap>),
    Fn(FunctionValue),
}

impl Value {
    // Factories

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from_rc(Rc::from(s.as_ref())))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Arr(Heap::from_rc(Rc::new(items)))
    }

    pub fn object(entries: ObjectMap) -> Self {
        Value::Obj(Heap::from_rc(Rc::new(entries)))
    }

    /// Build an object from `(key, value)` pairs; later keys overwrite earlier ones.
    pub fn object_from<K: Into<Name>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn native(native: NativeFunction) -> Self {
        Value::Fn(FunctionValue::Native(native))
    }

    pub fn user(function: UserFunction) -> Self {
        Value::Fn(FunctionValue::User(function))
    }

    // Inspection

    /// Lowercase variant label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Num(_) => "num",
            Value::Str(_) => "str",
            Value::Arr(_) => "arr",
            Value::Obj(_) => "obj",
            Value::Fn(_) => "fn",
        }
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Fn(_))
    }

    // Typed access. Each fails with `TypeMismatch` on the wrong variant.

    pub fn as_bool(&self) -> Result<bool, EvalError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("bool", other.type_name())),
        }
    }

    pub fn as_num(&self) -> Result<f64, EvalError> {
        match self {
            Value::Num(n) => Ok(*n),
            other => Err(type_mismatch("num", other.type_name())),
        }
    }

    pub fn as_str(&self) -> Result<&str, EvalError> {
        match self {
            Value::Str(s) => Ok(&**s),
            other => Err(type_mismatch("str", other.type_name())),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], EvalError> {
        match self {
            Value::Arr(items) => Ok(items.as_slice()),
            other => Err(type_mismatch("arr", other.type_name())),
        }
    }

    pub fn as_object(&self) -> Result<&ObjectMap, EvalError> {
        match self {
            Value::Obj(map) => Ok(&**map),
            other => Err(type_mismatch("obj", other.type_name())),
        }
    }

    /// Fails with `NotCallable` rather than `TypeMismatch`.
    pub fn as_function(&self) -> Result<&FunctionValue, EvalError> {
        match self {
            Value::Fn(func) => Ok(func),
            other => Err(not_callable(other.type_name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Arr(a), Value::Arr(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => FunctionValue::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Num(n) => f.debug_tuple("Num").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(&&**s).finish(),
            Value::Arr(items) => f.debug_tuple("Arr").field(&**items).finish(),
            Value::Obj(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                f.debug_map().entries(entries).finish()
            }
            Value::Fn(func) => fmt::Debug::fmt(func, f),
        }
    }
}

/// Renders values the way `print` and template interpolation show them.
///
/// Whole numbers print without a fractional part; strings nested in arrays or
/// objects are quoted; object keys are sorted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => write_nested(other, f),
        }
    }
}

fn write_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Num(n) => write!(f, "{n}"),
        Value::Str(s) => write!(f, "{:?}", &**s),
        Value::Arr(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_nested(item, f)?;
            }
            f.write_str("]")
        }
        Value::Obj(map) => {
            let mut keys: Vec<&Name> = map.keys().collect();
            keys.sort();
            f.write_str("{")?;
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                if let Some(item) = map.get(key) {
                    write_nested(item, f)?;
                }
            }
            f.write_str("}")
        }
        Value::Fn(func) => write!(f, "{func}"),
    }
}
