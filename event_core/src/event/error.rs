// event_core/src/event/error.rs
use crate::event::value::ValueKind;
use crate::scene::node::NodeId;
use thiserror::Error;

/// A literal did not match the grammar for its kind. The stored literal
/// is left unchanged when this is returned from an edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("`{text}` is not a valid {kind} literal")]
    Scalar { kind: ValueKind, text: String },
    #[error("expected {expected} comma-separated numbers, got {got}")]
    ComponentCount { expected: usize, got: usize },
    #[error("unexpected label `{label}`, expected `{expected}`")]
    Label { label: String, expected: &'static str },
    #[error("`{name}` is not a member of enum `{type_path}`")]
    EnumName { name: String, type_path: String },
    #[error("enum index {index} is out of range for `{type_path}`")]
    EnumIndex { index: usize, type_path: String },
    #[error("`{text}` is not a valid node handle")]
    ObjectRef { text: String },
    #[error("invalid curve literal: {reason}")]
    Curve { reason: String },
    #[error("the member's type is not representable as a literal")]
    UnsupportedKind,
}

/// Why a single listener was skipped during an event invocation.
/// Never aborts the rest of the invocation list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvokeError {
    #[error("no member is selected")]
    NothingSelected,
    #[error("listener has no target node")]
    TargetUnset,
    #[error("target node {0} no longer exists")]
    TargetMissing(NodeId),
    #[error("component `{0}` is missing from the target node")]
    ComponentMissing(String),
    #[error("type `{0}` is not registered")]
    TypeNotRegistered(String),
    #[error("`{type_name}` has no {kind} named `{name}`")]
    MemberNotFound {
        type_name: String,
        name: String,
        kind: &'static str,
    },
    #[error("expected a {expected} argument, got {got}")]
    SignatureMismatch { expected: ValueKind, got: ValueKind },
    #[error("expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("enum index {0} is out of range")]
    EnumIndexOutOfRange(usize),
    #[error("member `{0}` has an unsupported type and cannot be invoked")]
    Unsupported(String),
    #[error("target object has an unexpected concrete type")]
    TargetType,
    #[error(transparent)]
    Parse(#[from] ParseError),
}
