//! Comparable artifact versions
//!
//! Versions are split into numeric and qualifier items on `.`, `-` and on every
//! transition between digits and letters. A `-` (or a digit/letter transition)
//! opens a nested sub list, so `1.0-rc1` becomes `[1, [rc, [1]]]`. Trailing
//! "null" items (`0`, the release qualifier, empty lists) are dropped, which
//! makes `1`, `1.0`, `1.0.0` and `1-ga` all equal.
//!
//! Numbers compare numerically with arbitrary precision, so `1.10 > 1.2`, and
//! a number always wins over a qualifier: `1.0.1 > 1.0-sp`.

use crate::domain::Qualifier;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits without leading zeros, zero is `"0"`
    Int(String),
    Str(Qualifier),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    }

    fn parse(is_digit: bool, token: &str) -> Self {
        if is_digit {
            Item::int(token)
        } else {
            Item::Str(Qualifier::parse(token, false))
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits == "0",
            Item::Str(qualifier) => qualifier.is_release(),
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compare against another item, `None` standing for a missing item (padding)
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(_), None) => {
                if self.is_null() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(q), None) => q.cmp(&Qualifier::Release),
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(a), Some(Item::Str(b))) => a.cmp(b),
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => items
                .first()
                .map_or(Ordering::Equal, |first| first.compare(None)),
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => compare_lists(left, right),
        }
    }
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    for i in 0..left.len().max(right.len()) {
        let result = match (left.get(i), right.get(i)) {
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if result != Ordering::Equal {
            return result;
        }
    }
    Ordering::Equal
}

/// Drop trailing null items; stops at the first non-null item that is not a list
fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

/// A version string with release-oriented ordering
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    original: String,
    items: Vec<Item>,
}

impl ArtifactVersion {
    /// Parse a version. Parsing never fails; anything unrecognised becomes a qualifier.
    pub fn parse(version: &str) -> Self {
        let lower = version.to_lowercase();

        // innermost list is last; every list is the trailing element of its parent
        let mut stack: Vec<Vec<Item>> = vec![Vec::new()];
        let mut is_digit = false;
        let mut start = 0;

        for (i, c) in lower.char_indices() {
            let list = stack.len() - 1;
            if c == '.' || c == '-' {
                if i == start {
                    stack[list].push(Item::int("0"));
                } else {
                    stack[list].push(Item::parse(is_digit, &lower[start..i]));
                }
                start = i + c.len_utf8();
                if c == '-' {
                    stack.push(Vec::new());
                }
            } else if c.is_ascii_digit() {
                if !is_digit && i > start {
                    stack[list].push(Item::Str(Qualifier::parse(&lower[start..i], true)));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = true;
            } else {
                if is_digit && i > start {
                    stack[list].push(Item::int(&lower[start..i]));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = false;
            }
        }

        if lower.len() > start {
            let list = stack.len() - 1;
            stack[list].push(Item::parse(is_digit, &lower[start..]));
        }

        let mut items = Vec::new();
        while let Some(mut list) = stack.pop() {
            normalize(&mut list);
            match stack.last_mut() {
                Some(parent) => {
                    parent.push(Item::List(list));
                }
                None => items = list,
            }
        }

        ArtifactVersion {
            original: version.to_string(),
            items,
        }
    }

    /// The version exactly as it was parsed
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl PartialEq for ArtifactVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ArtifactVersion {}

impl PartialOrd for ArtifactVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArtifactVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
