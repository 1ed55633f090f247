// event_core/src/event/value.rs
use crate::event::error::InvokeError;
use crate::math::{AnimationCurve, Bounds, Color, Rect};
use crate::scene::node::NodeId;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Every value shape the event system can edit and invoke with.
/// Derived once from a member's type when its schema is registered;
/// `Unsupported` is a valid terminal kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ValueKind {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "char")]
    Char,
    #[strum(serialize = "i8")]
    I8,
    #[strum(serialize = "u8")]
    U8,
    #[strum(serialize = "i16")]
    I16,
    #[strum(serialize = "u16")]
    U16,
    #[strum(serialize = "i32")]
    I32,
    #[strum(serialize = "u32")]
    U32,
    #[strum(serialize = "i64")]
    I64,
    #[strum(serialize = "u64")]
    U64,
    #[strum(serialize = "f32")]
    F32,
    #[strum(serialize = "f64")]
    F64,
    #[strum(serialize = "String")]
    Str,
    #[strum(serialize = "Vec2")]
    Vec2,
    #[strum(serialize = "Vec3")]
    Vec3,
    #[strum(serialize = "Vec4")]
    Vec4,
    #[strum(serialize = "Quat")]
    Quat,
    #[strum(serialize = "Color")]
    Color,
    #[strum(serialize = "Rect")]
    Rect,
    #[strum(serialize = "Bounds")]
    Bounds,
    #[strum(serialize = "Mat4")]
    Mat4,
    #[strum(serialize = "Curve")]
    Curve,
    #[strum(serialize = "enum")]
    Enum,
    #[strum(serialize = "object")]
    ObjectRef,
    #[strum(serialize = "unsupported")]
    Unsupported,
}

/// A parsed argument or member value, one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    Color(Color),
    Rect(Rect),
    Bounds(Bounds),
    Mat4(Mat4),
    Curve(AnimationCurve),
    /// Index into the enum type's name table, never a raw discriminant.
    Enum(usize),
    ObjectRef(NodeId),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::I8(_) => ValueKind::I8,
            Value::U8(_) => ValueKind::U8,
            Value::I16(_) => ValueKind::I16,
            Value::U16(_) => ValueKind::U16,
            Value::I32(_) => ValueKind::I32,
            Value::U32(_) => ValueKind::U32,
            Value::I64(_) => ValueKind::I64,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Str(_) => ValueKind::Str,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
            Value::Color(_) => ValueKind::Color,
            Value::Rect(_) => ValueKind::Rect,
            Value::Bounds(_) => ValueKind::Bounds,
            Value::Mat4(_) => ValueKind::Mat4,
            Value::Curve(_) => ValueKind::Curve,
            Value::Enum(_) => ValueKind::Enum,
            Value::ObjectRef(_) => ValueKind::ObjectRef,
        }
    }
}

/// Serializable identity of a member's static type, captured at schema
/// registration so the live type never has to be held across a save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTypeInfo {
    pub kind: ValueKind,
    /// Fully qualified Rust path of the type.
    pub type_path: &'static str,
    /// Name table for `Enum` kinds, `None` for everything else.
    pub enum_names: Option<&'static [&'static str]>,
}

impl ValueTypeInfo {
    pub fn unsupported(type_path: &'static str) -> Self {
        Self {
            kind: ValueKind::Unsupported,
            type_path,
            enum_names: None,
        }
    }
}

/// Conversion seam between concrete member types and [`Value`].
/// Implemented for every supported kind; the `#[scene_component]` and
/// `#[scene_methods]` macros call through it from their generated shims.
pub trait ValueTyped: Sized {
    const KIND: ValueKind;

    fn type_info() -> ValueTypeInfo {
        ValueTypeInfo {
            kind: Self::KIND,
            type_path: std::any::type_name::<Self>(),
            enum_names: None,
        }
    }

    fn to_value(&self) -> Value;
    fn from_value(value: &Value) -> Result<Self, InvokeError>;
}

/// Editor-facing enum support: a fixed name table plus index mapping.
/// Literal values for enum members store the index, and parse/format go
/// through this table, never through a raw discriminant.
pub trait ScriptEnum: Sized {
    fn names() -> &'static [&'static str];
    fn from_index(index: usize) -> Option<Self>;
    fn index(&self) -> usize;
}

macro_rules! impl_value_typed {
    ($ty:ty, $kind:ident, $from:pat => $to:expr) => {
        impl ValueTyped for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn to_value(&self) -> Value {
                Value::$kind(self.clone())
            }

            fn from_value(value: &Value) -> Result<Self, InvokeError> {
                match value {
                    $from => Ok($to),
                    other => Err(InvokeError::SignatureMismatch {
                        expected: ValueKind::$kind,
                        got: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_value_typed!(bool, Bool, Value::Bool(v) => *v);
impl_value_typed!(char, Char, Value::Char(v) => *v);
impl_value_typed!(i8, I8, Value::I8(v) => *v);
impl_value_typed!(u8, U8, Value::U8(v) => *v);
impl_value_typed!(i16, I16, Value::I16(v) => *v);
impl_value_typed!(u16, U16, Value::U16(v) => *v);
impl_value_typed!(i32, I32, Value::I32(v) => *v);
impl_value_typed!(u32, U32, Value::U32(v) => *v);
impl_value_typed!(i64, I64, Value::I64(v) => *v);
impl_value_typed!(u64, U64, Value::U64(v) => *v);
impl_value_typed!(f32, F32, Value::F32(v) => *v);
impl_value_typed!(f64, F64, Value::F64(v) => *v);
impl_value_typed!(String, Str, Value::Str(v) => v.clone());
impl_value_typed!(Vec2, Vec2, Value::Vec2(v) => *v);
impl_value_typed!(Vec3, Vec3, Value::Vec3(v) => *v);
impl_value_typed!(Vec4, Vec4, Value::Vec4(v) => *v);
impl_value_typed!(Quat, Quat, Value::Quat(v) => *v);
impl_value_typed!(Color, Color, Value::Color(v) => *v);
impl_value_typed!(Rect, Rect, Value::Rect(v) => *v);
impl_value_typed!(Bounds, Bounds, Value::Bounds(v) => *v);
impl_value_typed!(Mat4, Mat4, Value::Mat4(v) => *v);
impl_value_typed!(AnimationCurve, Curve, Value::Curve(v) => v.clone());
impl_value_typed!(NodeId, ObjectRef, Value::ObjectRef(v) => *v);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_reports_its_kind() {
        assert_eq!(Value::F32(1.0).kind(), ValueKind::F32);
        assert_eq!(Value::Str("a".into()).kind(), ValueKind::Str);
        assert_eq!(Value::Enum(2).kind(), ValueKind::Enum);
    }

    #[test]
    fn kind_labels_match_rust_spelling() {
        assert_eq!(ValueKind::F32.to_string(), "f32");
        assert_eq!(ValueKind::Str.to_string(), "String");
        assert_eq!(ValueKind::Vec2.to_string(), "Vec2");
        assert_eq!(ValueKind::Unsupported.to_string(), "unsupported");
    }

    #[test]
    fn from_value_rejects_wrong_variant() {
        let err = f32::from_value(&Value::Bool(true)).unwrap_err();
        assert_eq!(
            err,
            InvokeError::SignatureMismatch {
                expected: ValueKind::F32,
                got: ValueKind::Bool,
            }
        );
    }

    #[test]
    fn round_trips_through_value_typed() {
        let v = Vec2::new(1.5, -2.0);
        assert_eq!(Vec2::from_value(&v.to_value()).unwrap(), v);
        let s = String::from("hello");
        assert_eq!(String::from_value(&s.to_value()).unwrap(), s);
    }
}
