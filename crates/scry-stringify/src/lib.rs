//! Debuggee value stringification
//!
//! Renders a value mirror the way the debuggee's own string coercion would:
//! errors as `Name: message`, arrays as comma-joined elements, builtin
//! wrappers through their native coercion, everything else as
//! `[object Kind]`. All reflection is read-only and every anomaly is
//! absorbed: the entry points always return a string, because one malformed
//! value must never abort the surrounding inspection display.

#![warn(missing_docs)]

use rustc_hash::FxHashSet;
use scry_mirror::{
    get_property_with, DiagnosticSink, MirrorError, MirrorId, MirrorValue, NullSink, ObjectHandle,
    ObjectKind, Primitive,
};

/// Ids of arrays currently being rendered anywhere in one top-level call.
///
/// Created fresh per call and threaded through the recursion, so concurrent
/// top-level calls never share guard state.
type Seen = FxHashSet<MirrorId>;

/// Render a mirror value as a display string, discarding diagnostics.
pub fn stringify(value: &MirrorValue) -> String {
    stringify_with(value, &NullSink)
}

/// Render a mirror value as a display string, reporting anomalies to `sink`.
///
/// Never fails and never runs debuggee code. Dead objects, out-of-domain
/// DOMException status codes, and malformed prototype chains are reported;
/// every other malformed read silently defaults.
pub fn stringify_with(value: &MirrorValue, sink: &dyn DiagnosticSink) -> String {
    let mut seen = Seen::default();
    render(value, sink, &mut seen)
}

fn render(value: &MirrorValue, sink: &dyn DiagnosticSink, seen: &mut Seen) -> String {
    match value {
        MirrorValue::Primitive(p) => p.to_string(),
        MirrorValue::Object(obj) => render_object(obj, sink, seen),
    }
}

fn render_object(obj: &ObjectHandle, sink: &dyn DiagnosticSink, seen: &mut Seen) -> String {
    match obj.kind() {
        ObjectKind::DeadObject => {
            sink.report("stringify", &MirrorError::DeadObject);
            "<dead object>".to_string()
        }
        kind @ (ObjectKind::Error
        | ObjectKind::EvalError
        | ObjectKind::RangeError
        | ObjectKind::ReferenceError
        | ObjectKind::SyntaxError
        | ObjectKind::TypeError
        | ObjectKind::UriError) => render_error(obj, &kind, sink, seen),
        ObjectKind::Boolean
        | ObjectKind::Function
        | ObjectKind::Number
        | ObjectKind::RegExp
        | ObjectKind::String => render_builtin(obj),
        ObjectKind::Array => render_array(obj, sink, seen),
        ObjectKind::DomException => render_dom_exception(obj, sink, seen),
        kind => format!("[object {}]", kind.name()),
    }
}

/// Builtin wrappers defer to the backend's safe coercion. A backend without
/// the capability degrades to the generic object form.
fn render_builtin(obj: &ObjectHandle) -> String {
    obj.native_coercion()
        .unwrap_or_else(|| format!("[object {}]", obj.kind().name()))
}

fn render_error(
    obj: &ObjectHandle,
    kind: &ObjectKind,
    sink: &dyn DiagnosticSink,
    seen: &mut Seen,
) -> String {
    let name = match get_property_with(obj, "name", sink) {
        MirrorValue::Primitive(Primitive::Undefined) => kind.name().to_string(),
        MirrorValue::Primitive(Primitive::String(s)) if s.is_empty() => kind.name().to_string(),
        MirrorValue::Object(o) => render_object(&o, sink, seen),
        MirrorValue::Primitive(p) => p.to_string(),
    };

    let message = match get_property_with(obj, "message", sink) {
        MirrorValue::Primitive(Primitive::Undefined) => String::new(),
        MirrorValue::Object(o) => render_object(&o, sink, seen),
        MirrorValue::Primitive(p) => p.to_string(),
    };

    if message.is_empty() {
        name
    } else {
        format!("{}: {}", name, message)
    }
}

fn render_array(obj: &ObjectHandle, sink: &dyn DiagnosticSink, seen: &mut Seen) -> String {
    // Already being rendered by an ancestor frame, or repeated within this
    // call: contribute nothing at this slot.
    if !seen.insert(obj.id()) {
        return String::new();
    }

    let len = array_length(&get_property_with(obj, "length", sink));
    let mut out = String::new();
    for i in 0..len {
        if let Some(descriptor) = obj.own_element(i) {
            match descriptor.value {
                Some(MirrorValue::Object(o)) => out.push_str(&render_object(&o, sink, seen)),
                Some(MirrorValue::Primitive(Primitive::Null | Primitive::Undefined)) | None => {}
                Some(MirrorValue::Primitive(p)) => out.push_str(&p.to_string()),
            }
        }
        // holes still produce their separating comma
        if i + 1 < len {
            out.push(',');
        }
    }
    out
}

/// Element count from a debuggee-reported `length`.
///
/// A proxy can report anything here: non-numbers, negatives, NaN and the
/// infinities count as zero elements, fractional lengths truncate, and
/// values past the 2^32 - 1 array ceiling clamp to it.
fn array_length(value: &MirrorValue) -> u32 {
    match value {
        MirrorValue::Primitive(Primitive::Number(n)) if n.is_finite() => *n as u32,
        _ => 0,
    }
}

fn render_dom_exception(
    obj: &ObjectHandle,
    sink: &dyn DiagnosticSink,
    seen: &mut Seen,
) -> String {
    let message = truthy_or(get_property_with(obj, "message", sink), "<no message>", sink, seen);
    let result = hex_status(get_property_with(obj, "result", sink).to_number(), sink);
    let code = render(&get_property_with(obj, "code", sink), sink, seen);
    let name = truthy_or(get_property_with(obj, "name", sink), "<unknown>", sink, seen);

    format!(
        "[Exception... \"{}\" code: \"{}\" nsresult: \"0x{} ({})\"]",
        message, code, result, name
    )
}

fn truthy_or(
    value: MirrorValue,
    fallback: &str,
    sink: &dyn DiagnosticSink,
    seen: &mut Seen,
) -> String {
    if value.is_truthy() {
        render(&value, sink, seen)
    } else {
        fallback.to_string()
    }
}

/// Largest f64 that still represents every integer below it exactly (2^53).
const MAX_EXACT_STATUS: f64 = 9_007_199_254_740_992.0;

/// Lowercase hex rendering of a DOMException `result`.
///
/// Status codes are non-negative integers. Absent ones coerce to NaN and
/// keep the literal `NaN` spelling. Anything else outside the domain clamps
/// to the nearest representable value and is reported.
fn hex_status(n: f64, sink: &dyn DiagnosticSink) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n >= 0.0 && n.fract() == 0.0 && n <= MAX_EXACT_STATUS {
        return format!("{:x}", n as u64);
    }
    sink.report("stringify", &MirrorError::ResultOutOfRange { value: n });
    format!("{:x}", n.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scry_mirror::CollectSink;

    #[test]
    fn test_array_length_defaults() {
        assert_eq!(array_length(&MirrorValue::from(3.0)), 3);
        assert_eq!(array_length(&MirrorValue::from(2.5)), 2);
        assert_eq!(array_length(&MirrorValue::from(-5.0)), 0);
        assert_eq!(array_length(&MirrorValue::from(f64::NAN)), 0);
        assert_eq!(array_length(&MirrorValue::from(f64::INFINITY)), 0);
        assert_eq!(array_length(&MirrorValue::from("3")), 0);
        assert_eq!(array_length(&MirrorValue::undefined()), 0);
        assert_eq!(array_length(&MirrorValue::from(1e12)), u32::MAX);
    }

    #[test]
    fn test_hex_status_in_domain() {
        let sink = CollectSink::new();
        assert_eq!(hex_status(20.0, &sink), "14");
        assert_eq!(hex_status(0.0, &sink), "0");
        assert_eq!(hex_status(2147500036.0, &sink), "80004004");
        assert_eq!(hex_status(f64::NAN, &sink), "NaN");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_hex_status_clamps_and_reports() {
        let sink = CollectSink::new();
        assert_eq!(hex_status(-1.0, &sink), "0");
        assert_eq!(hex_status(2.5, &sink), "2");
        let reports = sink.take();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].error, MirrorError::ResultOutOfRange { value: -1.0 });
        assert_eq!(reports[1].error, MirrorError::ResultOutOfRange { value: 2.5 });
    }
}
