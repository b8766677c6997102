//! Error types for evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the typed category; `EvalError` adds the rendered
//! message and the node the error surfaced in. Factory functions at the bottom
//! of this module are the only way the evaluator and natives construct errors.
//!
//! Every error is fatal to the current run: nothing in the language catches
//! them, they propagate with `?` to `run` / `call_function`.

use std::fmt;

use kestrel_ir::Name;

use crate::Value;

/// Result of evaluating an expression or calling a function.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    /// A value of the wrong variant reached a construct that needs a specific one.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// A call target is not a function.
    NotCallable { type_name: &'static str },
    /// Read or assignment of a name that no frame in the chain binds.
    UndefinedVariable { name: Name },
    /// `def` of a name already bound in the same frame.
    DuplicateDeclaration { name: Name },
    /// The session ran more nodes than its configured ceiling.
    StepLimitExceeded { limit: u64 },
    /// 1-based index outside `1..=len`, or not a whole number.
    IndexOutOfBounds { index: f64, len: usize },
    /// A native was called with the wrong number of arguments.
    WrongArgCount {
        function: Name,
        expected: usize,
        got: usize,
    },
    /// A native reported a failure of its own.
    Native { function: Name, message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::DuplicateDeclaration { name } => {
                write!(f, "duplicate declaration: {name} is already defined in this scope")
            }
            Self::StepLimitExceeded { limit } => {
                write!(f, "step limit exceeded (limit: {limit})")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for array of length {len}")
            }
            Self::WrongArgCount {
                function,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{function} expects {expected} {arg_word}, got {got}")
            }
            Self::Native { function, message } => write!(f, "{function}: {message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Kind label of the innermost node the error passed through.
    pub node: Option<&'static str>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            node: None,
        }
    }

    /// Record the node the error surfaced in, unless one is already recorded.
    ///
    /// The innermost node wins: callers further up the tree leave it alone.
    #[must_use]
    pub fn with_node_if_absent(mut self, node: &'static str) -> Self {
        if self.node.is_none() {
            self.node = Some(node);
        }
        self
    }

    /// Whether this is the step-limit safety trip.
    pub fn is_step_limit(&self) -> bool {
        matches!(self.kind, EvalErrorKind::StepLimitExceeded { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(node) = self.node {
            write!(f, " (in {node})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factories

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn undefined_variable(name: impl Into<Name>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable { name: name.into() })
}

#[cold]
pub fn duplicate_declaration(name: impl Into<Name>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration { name: name.into() })
}

#[cold]
pub fn step_limit_exceeded(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepLimitExceeded { limit })
}

#[cold]
pub fn index_out_of_bounds(index: f64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn wrong_arg_count(function: impl Into<Name>, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        function: function.into(),
        expected,
        got,
    })
}

#[cold]
pub fn native_error(function: impl Into<Name>, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Native {
        function: function.into(),
        message: message.into(),
    })
}
