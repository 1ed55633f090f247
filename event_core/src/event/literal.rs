// event_core/src/event/literal.rs
//! Converts between native member values and the flat text literals the
//! inspector edits. `parse(format(v)) == v` holds for every supported
//! kind, and `format(parse(s))` normalizes any accepted grammar variant
//! to one canonical string.
use crate::event::error::ParseError;
use crate::event::value::{Value, ValueKind};
use crate::math::{AnimationCurve, Bounds, Color, Rect};
use crate::scene::node::NodeId;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use std::fmt::Write;
use std::str::FromStr;
use uuid::Uuid;

/// Parses `text` into the native value for `kind`.
/// `Enum` literals carry a per-type name table and go through
/// [`parse_enum`] instead.
pub fn parse(kind: ValueKind, text: &str) -> Result<Value, ParseError> {
    match kind {
        ValueKind::Bool => Ok(Value::Bool(parse_scalar(kind, text)?)),
        ValueKind::Char => parse_char(text),
        ValueKind::I8 => Ok(Value::I8(parse_scalar(kind, text)?)),
        ValueKind::U8 => Ok(Value::U8(parse_scalar(kind, text)?)),
        ValueKind::I16 => Ok(Value::I16(parse_scalar(kind, text)?)),
        ValueKind::U16 => Ok(Value::U16(parse_scalar(kind, text)?)),
        ValueKind::I32 => Ok(Value::I32(parse_scalar(kind, text)?)),
        ValueKind::U32 => Ok(Value::U32(parse_scalar(kind, text)?)),
        ValueKind::I64 => Ok(Value::I64(parse_scalar(kind, text)?)),
        ValueKind::U64 => Ok(Value::U64(parse_scalar(kind, text)?)),
        ValueKind::F32 => Ok(Value::F32(parse_scalar(kind, text)?)),
        ValueKind::F64 => Ok(Value::F64(parse_scalar(kind, text)?)),
        ValueKind::Str => Ok(Value::Str(text.to_string())),
        ValueKind::Vec2 => {
            let c = parse_floats(text, 2)?;
            Ok(Value::Vec2(Vec2::new(c[0], c[1])))
        }
        ValueKind::Vec3 => {
            let c = parse_floats(text, 3)?;
            Ok(Value::Vec3(Vec3::new(c[0], c[1], c[2])))
        }
        ValueKind::Vec4 => {
            let c = parse_floats(text, 4)?;
            Ok(Value::Vec4(Vec4::new(c[0], c[1], c[2], c[3])))
        }
        ValueKind::Quat => {
            let c = parse_floats(text, 4)?;
            Ok(Value::Quat(Quat::from_xyzw(c[0], c[1], c[2], c[3])))
        }
        ValueKind::Color => {
            let c = parse_labeled(text, &["r", "g", "b", "a"])?;
            Ok(Value::Color(Color::new(c[0], c[1], c[2], c[3])))
        }
        ValueKind::Rect => {
            let c = parse_labeled(text, &["x", "y", "width", "height"])?;
            Ok(Value::Rect(Rect::new(c[0], c[1], c[2], c[3])))
        }
        ValueKind::Bounds => parse_bounds(text),
        ValueKind::Mat4 => {
            let c = parse_floats(text, 16)?;
            let mut cols = [0.0f32; 16];
            cols.copy_from_slice(&c);
            Ok(Value::Mat4(Mat4::from_cols_array(&cols)))
        }
        ValueKind::Curve => parse_curve(text),
        ValueKind::ObjectRef => {
            let id = Uuid::parse_str(text.trim()).map_err(|_| ParseError::ObjectRef {
                text: text.to_string(),
            })?;
            Ok(Value::ObjectRef(NodeId(id)))
        }
        ValueKind::Enum | ValueKind::Unsupported => Err(ParseError::UnsupportedKind),
    }
}

/// Parses an enum literal, accepting either a member name or an index
/// into `names`. The produced value always stores the index.
pub fn parse_enum(names: &[String], type_path: &str, text: &str) -> Result<Value, ParseError> {
    let text = text.trim();
    if let Ok(index) = text.parse::<usize>() {
        if index < names.len() {
            return Ok(Value::Enum(index));
        }
        return Err(ParseError::EnumIndex {
            index,
            type_path: type_path.to_string(),
        });
    }
    names
        .iter()
        .position(|n| n == text)
        .map(Value::Enum)
        .ok_or_else(|| ParseError::EnumName {
            name: text.to_string(),
            type_path: type_path.to_string(),
        })
}

/// Renders `value` in the canonical grammar that [`parse`] accepts.
pub fn format(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::Char(v) => v.to_string(),
        Value::I8(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::Str(v) => v.clone(),
        Value::Vec2(v) => format_tuple(&[v.x, v.y]),
        Value::Vec3(v) => format_tuple(&[v.x, v.y, v.z]),
        Value::Vec4(v) => format_tuple(&[v.x, v.y, v.z, v.w]),
        Value::Quat(v) => format_tuple(&[v.x, v.y, v.z, v.w]),
        Value::Color(v) => format_tuple(&[v.r, v.g, v.b, v.a]),
        Value::Rect(v) => format!(
            "(x:{}, y:{}, width:{}, height:{})",
            v.x, v.y, v.w, v.h
        ),
        Value::Bounds(v) => format!(
            "(center: ({}, {}, {}), extents: ({}, {}, {}))",
            v.center.x, v.center.y, v.center.z, v.extents.x, v.extents.y, v.extents.z
        ),
        Value::Mat4(v) => format_tuple(&v.to_cols_array()),
        Value::Curve(v) => ron::ser::to_string(v).unwrap_or_default(),
        Value::Enum(i) => i.to_string(),
        Value::ObjectRef(id) => id.to_string(),
    }
}

/// Renders an enum index through its name table; falls back to the bare
/// index when the table does not cover it.
pub fn format_enum(names: &[String], index: usize) -> String {
    names
        .get(index)
        .cloned()
        .unwrap_or_else(|| index.to_string())
}

fn parse_scalar<T: FromStr>(kind: ValueKind, text: &str) -> Result<T, ParseError> {
    text.trim().parse::<T>().map_err(|_| ParseError::Scalar {
        kind,
        text: text.to_string(),
    })
}

fn parse_char(text: &str) -> Result<Value, ParseError> {
    // A lone character is taken verbatim so whitespace chars survive
    // the round trip; trimming only applies to longer input.
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Value::Char(c));
    }
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        _ => Err(ParseError::Scalar {
            kind: ValueKind::Char,
            text: text.to_string(),
        }),
    }
}

/// Strips one matching pair of outer parentheses, if present.
fn strip_parens(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => inner,
        None => trimmed,
    }
}

/// Comma-separated bare floats, parentheses optional and ignored.
fn parse_floats(text: &str, expected: usize) -> Result<Vec<f32>, ParseError> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();
    let parts: Vec<&str> = cleaned.split(',').collect();
    if parts.len() != expected {
        return Err(ParseError::ComponentCount {
            expected,
            got: parts.len(),
        });
    }
    parts
        .iter()
        .map(|part| {
            part.trim().parse::<f32>().map_err(|_| ParseError::Scalar {
                kind: ValueKind::F32,
                text: part.trim().to_string(),
            })
        })
        .collect()
}

/// Comma-separated floats where each component may carry a
/// case-insensitive `label:` prefix that must match its position.
fn parse_labeled(text: &str, labels: &[&'static str]) -> Result<Vec<f32>, ParseError> {
    let inner = strip_parens(text);
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != labels.len() {
        return Err(ParseError::ComponentCount {
            expected: labels.len(),
            got: parts.len(),
        });
    }
    parts
        .iter()
        .zip(labels)
        .map(|(part, expected)| {
            let value = match part.split_once(':') {
                Some((label, v)) => {
                    if !label.trim().eq_ignore_ascii_case(expected) {
                        return Err(ParseError::Label {
                            label: label.trim().to_string(),
                            expected,
                        });
                    }
                    v
                }
                None => part,
            };
            value.trim().parse::<f32>().map_err(|_| ParseError::Scalar {
                kind: ValueKind::F32,
                text: value.trim().to_string(),
            })
        })
        .collect()
}

/// Bounds: either six bare floats or two `(x, y, z)` groups whose
/// optional `center:`/`extents:` labels must match their position.
fn parse_bounds(text: &str) -> Result<Value, ParseError> {
    let inner = strip_parens(text);
    let groups = split_top_level(inner);
    if groups.len() == 6 {
        let c = parse_floats(inner, 6)?;
        return Ok(Value::Bounds(Bounds::new(
            Vec3::new(c[0], c[1], c[2]),
            Vec3::new(c[3], c[4], c[5]),
        )));
    }
    if groups.len() != 2 {
        return Err(ParseError::ComponentCount {
            expected: 6,
            got: groups.len(),
        });
    }
    let center = parse_bounds_group(groups[0], "center")?;
    let extents = parse_bounds_group(groups[1], "extents")?;
    Ok(Value::Bounds(Bounds::new(center, extents)))
}

fn parse_bounds_group(text: &str, expected: &'static str) -> Result<Vec3, ParseError> {
    let trimmed = text.trim();
    let body = match trimmed.split_once(':') {
        Some((label, rest)) => {
            if !label.trim().eq_ignore_ascii_case(expected) {
                return Err(ParseError::Label {
                    label: label.trim().to_string(),
                    expected,
                });
            }
            rest
        }
        None => trimmed,
    };
    let c = parse_floats(body, 3)?;
    Ok(Vec3::new(c[0], c[1], c[2]))
}

/// Splits on commas outside any parenthesized group.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&text[start..]);
    out
}

fn parse_curve(text: &str) -> Result<Value, ParseError> {
    let curve: AnimationCurve =
        ron::de::from_str(text.trim()).map_err(|e| ParseError::Curve {
            reason: e.to_string(),
        })?;
    Ok(Value::Curve(curve))
}

fn format_tuple(components: &[f32]) -> String {
    let mut out = String::from("(");
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", c);
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn round_trip(value: Value) {
        let text = format(&value);
        assert_eq!(parse(value.kind(), &text).unwrap(), value, "{text}");
    }

    #[test]
    fn scalars_round_trip() {
        round_trip(Value::Bool(true));
        round_trip(Value::Char('x'));
        round_trip(Value::I8(-5));
        round_trip(Value::U64(u64::MAX));
        round_trip(Value::F32(2.5));
        round_trip(Value::F64(-0.125));
        round_trip(Value::Str("hello world".into()));
    }

    #[test]
    fn compound_values_round_trip() {
        round_trip(Value::Vec2(Vec2::new(1.0, -2.5)));
        round_trip(Value::Vec3(Vec3::new(0.5, 1.5, 2.5)));
        round_trip(Value::Vec4(Vec4::new(1.0, 2.0, 3.0, 4.0)));
        round_trip(Value::Quat(Quat::from_xyzw(0.0, 0.0, 0.0, 1.0)));
        round_trip(Value::Color(Color::new(0.25, 0.5, 0.75, 1.0)));
        round_trip(Value::Rect(Rect::new(0.0, 0.0, 10.0, 20.0)));
        round_trip(Value::Bounds(Bounds::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.5, 0.5, 0.5),
        )));
        round_trip(Value::Mat4(Mat4::IDENTITY));
        round_trip(Value::Curve(AnimationCurve::linear(0.0, 1.0)));
        round_trip(Value::ObjectRef(NodeId::new()));
    }

    #[test]
    fn rect_labels_are_optional_and_case_insensitive() {
        let canonical = parse(ValueKind::Rect, "(x:0, y:0, width:10, height:20)").unwrap();
        assert_eq!(parse(ValueKind::Rect, "0,0,10,20").unwrap(), canonical);
        assert_eq!(
            parse(ValueKind::Rect, "(X:0, Y:0, WIDTH:10, Height:20)").unwrap(),
            canonical
        );
        assert_eq!(format(&canonical), "(x:0, y:0, width:10, height:20)");
    }

    #[test]
    fn rect_rejects_misplaced_labels() {
        let err = parse(ValueKind::Rect, "(y:0, x:0, width:10, height:20)").unwrap_err();
        assert!(matches!(err, ParseError::Label { .. }));
    }

    #[test]
    fn accepted_grammar_variants_normalize() {
        for text in ["(1, 2)", "1,2", " 1 , 2 ", "(1,2)"] {
            let value = parse(ValueKind::Vec2, text).unwrap();
            assert_eq!(format(&value), "(1, 2)");
        }
    }

    #[test]
    fn bounds_accepts_labeled_and_bare_forms() {
        let labeled = parse(
            ValueKind::Bounds,
            "(center: (1, 2, 3), extents: (0.5, 0.5, 0.5))",
        )
        .unwrap();
        let bare = parse(ValueKind::Bounds, "1,2,3,0.5,0.5,0.5").unwrap();
        assert_eq!(labeled, bare);
        let upper = parse(
            ValueKind::Bounds,
            "(CENTER: (1, 2, 3), Extents: (0.5, 0.5, 0.5))",
        )
        .unwrap();
        assert_eq!(upper, bare);
    }

    #[test]
    fn bounds_rejects_misplaced_or_unknown_labels() {
        let swapped = parse(
            ValueKind::Bounds,
            "(extents: (1, 2, 3), center: (0, 0, 0))",
        )
        .unwrap_err();
        assert_eq!(
            swapped,
            ParseError::Label {
                label: "extents".into(),
                expected: "center",
            }
        );
        let unknown = parse(ValueKind::Bounds, "(foo: (1, 2, 3), bar: (4, 5, 6))").unwrap_err();
        assert!(matches!(unknown, ParseError::Label { .. }));
    }

    #[test]
    fn whitespace_char_round_trips() {
        round_trip(Value::Char(' '));
        round_trip(Value::Char('\t'));
        assert_eq!(parse(ValueKind::Char, " x ").unwrap(), Value::Char('x'));
    }

    #[test]
    fn parse_failure_reports_the_bad_text() {
        let err = parse(ValueKind::F32, "fast").unwrap_err();
        assert_eq!(
            err,
            ParseError::Scalar {
                kind: ValueKind::F32,
                text: "fast".into(),
            }
        );
        assert!(parse(ValueKind::Vec3, "1,2").is_err());
    }

    #[test]
    fn enum_literals_go_through_the_name_table() {
        let names: Vec<String> = vec!["Once".into(), "Loop".into(), "PingPong".into()];
        assert_eq!(parse_enum(&names, "PlayMode", "Loop").unwrap(), Value::Enum(1));
        assert_eq!(parse_enum(&names, "PlayMode", "2").unwrap(), Value::Enum(2));
        assert!(parse_enum(&names, "PlayMode", "Backwards").is_err());
        assert!(parse_enum(&names, "PlayMode", "7").is_err());
        assert_eq!(format_enum(&names, 1), "Loop");
        assert_eq!(format_enum(&names, 9), "9");
    }

    #[test]
    fn unsupported_kind_is_inert() {
        assert_eq!(
            parse(ValueKind::Unsupported, "anything").unwrap_err(),
            ParseError::UnsupportedKind
        );
    }
}
