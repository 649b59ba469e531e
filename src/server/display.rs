// Report list normalization for the demo API
//
// Before a report list leaves the server every row gets the same key set
// (union of all keys, first-seen order, missing values null), the download
// URL is dropped, and snake_case keys become readable titles.

use serde_json::{Map, Value};

/// Internal field never exposed to clients
const HIDDEN_FIELD: &str = "download_url";

/// Give every row the union of all keys, in first-seen order
pub fn normalize_table(rows: &[Map<String, Value>]) -> Vec<Map<String, Value>> {
    let mut keys: Vec<&String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    rows.iter()
        .map(|row| {
            keys.iter()
                .map(|&key| (key.clone(), row.get(key).cloned().unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}

/// Drop hidden fields and rename keys to readable titles
pub fn readable_row(row: &Map<String, Value>) -> Map<String, Value> {
    row.iter()
        .filter(|(key, _)| key.as_str() != HIDDEN_FIELD)
        .map(|(key, value)| (readable_key(key), value.clone()))
        .collect()
}

/// `report_id` -> `Report Id`, `_start_date` -> `Start Date`
pub fn readable_key(key: &str) -> String {
    title_case(key.replace('_', " ").trim())
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// `sp_campaign` -> `SP Campaign`
pub fn report_display_name(snake: &str) -> String {
    let words: Vec<String> = snake
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    let readable = words.join(" ");

    // Ad type prefix is an acronym
    let split = readable
        .char_indices()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(readable.len());
    let (prefix, rest) = readable.split_at(split);
    format!("{}{}", prefix.to_uppercase(), rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn readable_keys() {
        assert_eq!(readable_key("report_id"), "Report Id");
        assert_eq!(readable_key("_start_date"), "Start Date");
        assert_eq!(readable_key("status"), "Status");
        assert_eq!(readable_key("PROFILE_ID"), "Profile Id");
    }

    #[test]
    fn normalize_fills_missing_keys_in_first_seen_order() {
        let rows = vec![
            map(json!({"report_id": "a", "status": "PENDING"})),
            map(json!({"report_id": "b", "data_path": "x.json"})),
        ];

        let table = normalize_table(&rows);
        let keys: Vec<_> = table[0].keys().cloned().collect();
        assert_eq!(keys, vec!["report_id", "status", "data_path"]);
        assert_eq!(table[0]["data_path"], Value::Null);
        assert_eq!(table[1]["status"], Value::Null);
    }

    #[test]
    fn readable_row_hides_download_url() {
        let row = map(json!({"report_id": "a", "download_url": "https://x", "status": "COMPLETED"}));
        let readable = readable_row(&row);
        let keys: Vec<_> = readable.keys().cloned().collect();
        assert_eq!(keys, vec!["Report Id", "Status"]);
    }

    #[test]
    fn report_names_capitalize_ad_type() {
        assert_eq!(report_display_name("sp_campaign"), "SP Campaign");
        assert_eq!(report_display_name("sb_ad_group"), "SB Ad Group");
        assert_eq!(report_display_name("sd_purchased_products"), "SD Purchased Products");
    }
}
