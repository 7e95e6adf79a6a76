use serde_json::Value;

use crate::records::{Fields, PointEntry};
use crate::state::PopupState;

/// Ordered `(label, value)` pairs shown for a hovered record.
pub trait DisplayFields {
    fn display_fields(&self) -> Vec<(String, String)>;
}

impl DisplayFields for Fields {
    fn display_fields(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect()
    }
}

impl DisplayFields for PointEntry {
    fn display_fields(&self) -> Vec<(String, String)> {
        self.fields().display_fields()
    }
}

/// What the rendering host reports under the pointer.
///
/// `object` is `None` when the pointer is over empty map.
#[derive(Clone, Copy)]
pub struct PickInfo<'a> {
    pub x: f64,
    pub y: f64,
    pub object: Option<&'a dyn DisplayFields>,
}

impl<'a> PickInfo<'a> {
    pub fn new(x: f64, y: f64, object: Option<&'a dyn DisplayFields>) -> Self {
        Self { x, y, object }
    }
}

impl std::fmt::Debug for PickInfo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickInfo")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("object", &self.object.map(|o| o.display_fields()))
            .finish()
    }
}

/// `"key: value"` lines joined by `\n`, in field order.
pub fn popup_text(object: &dyn DisplayFields) -> String {
    object
        .display_fields()
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Popup for the current hover. Anything but a picked record clears it.
pub fn popup_for_pick(pick: Option<PickInfo<'_>>) -> PopupState {
    match pick {
        Some(PickInfo {
            x,
            y,
            object: Some(object),
        }) => PopupState::populated(x, y, popup_text(object)),
        _ => PopupState::Empty,
    }
}

/// Formats a JSON value the way the map host prints it: bare strings,
/// shortest numbers, comma-joined arrays without brackets.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                display_f64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits; exponent form outside `[1e-6, 1e21)`.
fn display_f64(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        // Includes -0.0.
        return "0".to_string();
    }
    let sci = format!("{f:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{f}");
    };
    match exp.parse::<i32>() {
        Ok(exp) if exp >= 21 => format!("{mantissa}e+{exp}"),
        Ok(exp) if exp <= -7 => format!("{mantissa}e{exp}"),
        _ => format!("{f}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayFields, PickInfo, display_value, popup_for_pick, popup_text};
    use crate::records::{Fields, PointEntry};
    use crate::state::PopupState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields(v: serde_json::Value) -> Fields {
        match v {
            serde_json::Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn popup_lists_fields_in_record_order() {
        let record = fields(json!({ "a": 1, "b": "x" }));
        assert_eq!(popup_text(&record), "a: 1\nb: x");

        let reversed = fields(json!({ "b": "x", "a": 1 }));
        assert_eq!(popup_text(&reversed), "b: x\na: 1");
    }

    #[test]
    fn values_format_like_the_host() {
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(2.0)), "2");
        assert_eq!(display_value(&json!(-0.0)), "0");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!([136.9, 35.1, 0, null])), "136.9,35.1,0,");
        assert_eq!(display_value(&json!([[1, 2], [3]])), "1,2,3");
        assert_eq!(display_value(&json!({ "k": 1 })), "[object Object]");
    }

    #[test]
    fn extreme_magnitudes_switch_to_exponent_form() {
        assert_eq!(display_value(&json!(1e21)), "1e+21");
        assert_eq!(display_value(&json!(-2.5e22)), "-2.5e+22");
        assert_eq!(display_value(&json!(1e-7)), "1e-7");
        assert_eq!(display_value(&json!(1.5e-7)), "1.5e-7");
        assert_eq!(display_value(&json!(1e20)), "100000000000000000000");
        assert_eq!(display_value(&json!(0.000001)), "0.000001");
        assert_eq!(display_value(&json!(123.456)), "123.456");
    }

    #[test]
    fn point_entries_show_every_source_field() {
        let p = PointEntry::from(json!({
            "position": [136.9, 35.1, 0, 50],
            "color": [10, 20, 30, 40],
            "label": "lidar"
        }));
        assert_eq!(
            p.display_fields(),
            vec![
                ("position".to_string(), "136.9,35.1,0,50".to_string()),
                ("color".to_string(), "10,20,30,40".to_string()),
                ("label".to_string(), "lidar".to_string()),
            ]
        );
    }

    #[test]
    fn hover_over_record_populates_and_nothing_clears() {
        let record = fields(json!({ "a": 1, "b": "x" }));
        let popup = popup_for_pick(Some(PickInfo::new(100.0, 50.0, Some(&record))));
        assert_eq!(popup, PopupState::populated(100.0, 50.0, "a: 1\nb: x"));

        assert_eq!(popup_for_pick(None), PopupState::Empty);
        assert_eq!(
            popup_for_pick(Some(PickInfo::new(3.0, 4.0, None))),
            PopupState::Empty
        );
    }

    #[test]
    fn hover_does_not_touch_the_record() {
        let record = fields(json!({ "a": 1 }));
        let before = record.clone();
        let _ = popup_for_pick(Some(PickInfo::new(0.0, 0.0, Some(&record))));
        assert_eq!(record, before);
    }

    #[test]
    fn empty_record_reads_as_no_popup() {
        let record = Fields::new();
        assert_eq!(
            popup_for_pick(Some(PickInfo::new(1.0, 1.0, Some(&record)))),
            PopupState::Empty
        );
    }
}
