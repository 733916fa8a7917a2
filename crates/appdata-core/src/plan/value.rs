use chrono::{DateTime, Utc};

/// A single bind parameter value, independent of the store driver
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl BindValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BindValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BindValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Integer(v)
    }
}

/// Stores have no boolean column type; flags travel as 0/1.
impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Integer(i64::from(v))
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(v: DateTime<Utc>) -> Self {
        BindValue::Timestamp(v)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(BindValue::Null, Into::into)
    }
}

/// One row of a batch: named binds in insert-statement order
///
/// Names are bind parameter names without the leading `:`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    binds: Vec<(&'static str, BindValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, name: &'static str, value: impl Into<BindValue>) -> Self {
        self.binds.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&BindValue> {
        self.binds
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.binds.iter().map(|(n, _)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BindValue)> {
        self.binds.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }
}
