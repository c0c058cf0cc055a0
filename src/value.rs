/// Serializable node tree handed to the YAML writer.
///
/// `Map` uses `Vec<(String, Value)>` so callers control key order; the
/// document and records emit their keys already sorted.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    String(String),
    Seq(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_strings() {
        assert_eq!(Value::from("8h"), Value::String("8h".into()));
        assert_eq!(Value::from(format!("{}h", 12)), Value::String("12h".into()));
    }
}
