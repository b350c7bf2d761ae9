//! Field ranges for `--nth`/`--with-nth`: split a line into whitespace- (or
//! delimiter-) separated fields and project a subset of them to form the
//! text handed to the matcher or the renderer.

use std::fmt;
use std::str::FromStr;

/// One `a`, `a..b`, `..b` or `a..` component of a `--nth`/`--with-nth` spec.
/// Indices are 1-based; negative indices count from the last field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldRange {
    start: Option<i32>,
    end: Option<i32>,
}

impl FieldRange {
    fn resolve(self, field_count: usize) -> std::ops::Range<usize> {
        let resolve_bound = |idx: i32| -> usize {
            if idx > 0 {
                (idx as usize - 1).min(field_count)
            } else if idx < 0 {
                field_count.saturating_sub((-idx) as usize)
            } else {
                0
            }
        };
        let start = self.start.map_or(0, resolve_bound);
        let end = self.end.map_or(field_count, |idx| resolve_bound(idx) + 1).min(field_count);
        start..end.max(start)
    }
}

impl FromStr for FieldRange {
    type Err = FieldSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_idx = |s: &str| -> Result<i32, FieldSpecError> {
            s.parse().map_err(|_| FieldSpecError(s.to_owned()))
        };
        if let Some((start, end)) = s.split_once("..") {
            let start = if start.is_empty() { None } else { Some(parse_idx(start)?) };
            let end = if end.is_empty() { None } else { Some(parse_idx(end)?) };
            Ok(FieldRange { start, end })
        } else {
            let idx = parse_idx(s)?;
            Ok(FieldRange { start: Some(idx), end: Some(idx) })
        }
    }
}

/// A parsed `--nth`/`--with-nth` value: a comma-separated list of
/// [`FieldRange`]s applied in order and concatenated with a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec(Vec<FieldRange>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpecError(String);

impl fmt::Display for FieldSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid field index `{}`", self.0)
    }
}

impl std::error::Error for FieldSpecError {}

impl FieldSpec {
    pub fn parse(spec: &str) -> Result<Self, FieldSpecError> {
        spec.split(',').map(str::parse).collect::<Result<_, _>>().map(FieldSpec)
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }

    /// Projects `fields` (already split by the configured delimiter) into a
    /// single string, fields separated by one space, in spec order.
    pub fn project(&self, fields: &[&str]) -> String {
        if self.0.is_empty() {
            return fields.join(" ");
        }
        let mut out = String::new();
        for range in &self.0 {
            for field in &fields[range.resolve(fields.len())] {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(field);
            }
        }
        out
    }
}

/// Splits `line` on `delimiter` (whitespace runs if `None`), matching the
/// `awk`-like convention `--delimiter` uses.
pub fn split_fields(line: &str, delimiter: Option<char>) -> Vec<&str> {
    match delimiter {
        Some(d) => line.split(d).collect(),
        None => line.split_whitespace().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_index_selects_one_field() {
        let spec = FieldSpec::parse("2").unwrap();
        let fields = split_fields("one two three four", None);
        assert_eq!(spec.project(&fields), "two");
    }

    #[test]
    fn range_selects_contiguous_fields() {
        let spec = FieldSpec::parse("2..3").unwrap();
        let fields = split_fields("one two three four", None);
        assert_eq!(spec.project(&fields), "two three");
    }

    #[test]
    fn open_ranges_extend_to_the_edge() {
        let fields = split_fields("one two three four", None);
        assert_eq!(FieldSpec::parse("..2").unwrap().project(&fields), "one two");
        assert_eq!(FieldSpec::parse("3..").unwrap().project(&fields), "three four");
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let fields = split_fields("one two three four", None);
        assert_eq!(FieldSpec::parse("-1").unwrap().project(&fields), "four");
        assert_eq!(FieldSpec::parse("-2..-1").unwrap().project(&fields), "three four");
    }

    #[test]
    fn comma_list_concatenates_each_component() {
        let fields = split_fields("one two three four", None);
        assert_eq!(FieldSpec::parse("1,3").unwrap().project(&fields), "one three");
    }

    #[test]
    fn custom_delimiter_splits_instead_of_whitespace() {
        let fields = split_fields("a:b:c", Some(':'));
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn rejects_non_numeric_index() {
        assert!(FieldSpec::parse("x").is_err());
    }
}
