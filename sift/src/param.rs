//! Conversion of typed parameter values into their wire form.

use std::time::Duration;

/// A value that can be placed in a path segment or query string.
pub trait ParamValue {
    /// Renders the value the way the engine expects it on the wire.
    fn to_param(&self) -> String;
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

macro_rules! numeric_param {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_param!(i32, i64, u32, u64, usize);

/// Durations use the engine's time units: whole milliseconds, or
/// nanoseconds below one millisecond.
impl ParamValue for Duration {
    fn to_param(&self) -> String {
        if *self < Duration::from_millis(1) {
            format!("{}nanos", self.as_nanos())
        } else {
            format!("{}ms", self.as_millis())
        }
    }
}

/// A comma-separated list parameter (index names, fields, sort keys).
///
/// ## Examples
///
/// ```rust
/// use sift::{List, ParamValue};
///
/// let indices = List::from(["logs-2024", "logs-2025"]);
/// assert_eq!(indices.to_param(), "logs-2024,logs-2025");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List(Vec<String>);

impl List {
    /// Returns the items in order.
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ParamValue for List {
    fn to_param(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for List {
    fn from(item: &str) -> Self {
        Self(vec![item.to_string()])
    }
}

impl From<String> for List {
    fn from(item: String) -> Self {
        Self(vec![item])
    }
}

impl From<Vec<String>> for List {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl From<Vec<&str>> for List {
    fn from(items: Vec<&str>) -> Self {
        Self(items.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for List {
    fn from(items: &[&str]) -> Self {
        Self(items.iter().map(|item| item.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for List {
    fn from(items: [&str; N]) -> Self {
        Self(items.iter().map(|item| item.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_millis() {
        assert_eq!(Duration::from_secs(5).to_param(), "5000ms");
        assert_eq!(Duration::from_millis(1).to_param(), "1ms");
    }

    #[test]
    fn test_duration_sub_millisecond() {
        assert_eq!(Duration::from_micros(250).to_param(), "250000nanos");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(true.to_param(), "true");
        assert_eq!(42u32.to_param(), "42");
        assert_eq!((-1i64).to_param(), "-1");
        assert_eq!("green".to_string().to_param(), "green");
    }

    #[test]
    fn test_list_conversions() {
        assert_eq!(List::from("a").to_param(), "a");
        assert_eq!(List::from(vec!["a", "b"]).to_param(), "a,b");
        assert_eq!(List::from(["x", "y", "z"]).items().len(), 3);
        assert!(List::default().is_empty());
    }
}
