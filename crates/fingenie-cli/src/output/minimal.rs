use serde_json::Value;

/// Headline figure for each calculation, checked in order.
const HEADLINE_FIELDS: [&str; 5] = [
    "emi",
    "interest_saved",
    "max_affordable_emi",
    "monthly_payment",
    "best_emi",
];

/// Print only the headline number of a result, for use in shell pipelines.
pub fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);
    println!("{}", headline(result));
}

fn headline(result: &Value) -> String {
    let Value::Object(map) = result else {
        return scalar(result);
    };

    HEADLINE_FIELDS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
        .map(scalar)
        .or_else(|| map.iter().next().map(|(key, val)| format!("{}: {}", key, scalar(val))))
        .unwrap_or_default()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // best_emi is a whole loan record; its EMI is the answer
        Value::Object(map) if map.contains_key("emi") => scalar(&map["emi"]),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
