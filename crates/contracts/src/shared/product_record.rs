use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Запись товара произвольной формы (поле -> значение).
///
/// Набор полей определяется строкой заголовка (CSV/TSV) или ключами
/// объекта (JSON). Аксессоры `get_*` выполняют приведение "по возможности":
/// если значение не удаётся привести, возвращается `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Map<String, Value>);

impl ProductRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Строковое представление значения. `null` и отсутствие поля дают `None`
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Первое непустое строковое значение из списка ключей (значение как есть)
    pub fn first_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.get_str(k))
            .find(|v| !v.is_empty())
    }

    /// Числовое значение: числа как есть, строки вида "9.99" / "$1,299.50"
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// Логическое значение: bool, число (не ноль = true) или строка
    /// `true/false`, `yes/no`, `y/n`, `1/0`, `on/off`
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            Value::String(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Дата: RFC 3339, `YYYY-MM-DD` или unix timestamp (секунды либо миллисекунды)
    pub fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.0.get(key)? {
            Value::String(s) => parse_date(s),
            Value::Number(n) => {
                let raw = n.as_i64()?;
                // Всё, что больше 10^11, считаем миллисекундами
                if raw.abs() > 100_000_000_000 {
                    Utc.timestamp_millis_opt(raw).single()
                } else {
                    Utc.timestamp_opt(raw, 0).single()
                }
            }
            _ => None,
        }
    }
}

impl FromIterator<(String, Value)> for ProductRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "NaN", "inf" и переполнение не считаются числом
    if let Ok(v) = trimmed.parse::<f64>() {
        return v.is_finite().then_some(v);
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_str_coerces_scalars() {
        let r = record(json!({ "id": 42, "name": "Widget", "flag": true, "gone": null }));
        assert_eq!(r.get_str("id").as_deref(), Some("42"));
        assert_eq!(r.get_str("name").as_deref(), Some("Widget"));
        assert_eq!(r.get_str("flag").as_deref(), Some("true"));
        assert_eq!(r.get_str("gone"), None);
        assert_eq!(r.get_str("missing"), None);
    }

    #[test]
    fn test_first_str_skips_empty_only() {
        let r = record(json!({ "product_id": "", "id": "P7" }));
        assert_eq!(r.first_str(&["product_id", "id"]).as_deref(), Some("P7"));

        let r = record(json!({ "product_id": null, "id": "P7" }));
        assert_eq!(r.first_str(&["product_id", "id"]).as_deref(), Some("P7"));

        let r = record(json!({ "product_id": "  ", "id": "P7" }));
        assert_eq!(r.first_str(&["product_id", "id"]).as_deref(), Some("  "));
    }

    #[test]
    fn test_get_f64() {
        let r = record(json!({ "a": 9.99, "b": "12.5", "c": "$1,299.50", "d": "n/a", "e": "" }));
        assert_eq!(r.get_f64("a"), Some(9.99));
        assert_eq!(r.get_f64("b"), Some(12.5));
        assert_eq!(r.get_f64("c"), Some(1299.5));
        assert_eq!(r.get_f64("d"), None);
        assert_eq!(r.get_f64("e"), None);
    }

    #[test]
    fn test_get_f64_rejects_non_finite() {
        let r = record(json!({
            "nan": "NaN",
            "inf": "inf",
            "neg": "-Infinity",
            "huge": "9".repeat(400)
        }));
        assert_eq!(r.get_f64("nan"), None);
        assert_eq!(r.get_f64("inf"), None);
        assert_eq!(r.get_f64("neg"), None);
        assert_eq!(r.get_f64("huge"), None);
    }

    #[test]
    fn test_get_bool() {
        let r = record(json!({ "a": "Yes", "b": 0, "c": "false", "d": "maybe", "e": true }));
        assert_eq!(r.get_bool("a"), Some(true));
        assert_eq!(r.get_bool("b"), Some(false));
        assert_eq!(r.get_bool("c"), Some(false));
        assert_eq!(r.get_bool("d"), None);
        assert_eq!(r.get_bool("e"), Some(true));
    }

    #[test]
    fn test_get_date() {
        let r = record(json!({
            "iso": "2024-03-01T10:00:00Z",
            "day": "2024-03-01",
            "secs": 1_709_287_200,
            "bad": "yesterday"
        }));
        let iso = r.get_date("iso").unwrap();
        assert_eq!(iso.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(r.get_date("day").unwrap().to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(r.get_date("secs").unwrap(), iso);
        assert_eq!(r.get_date("bad"), None);
    }
}
