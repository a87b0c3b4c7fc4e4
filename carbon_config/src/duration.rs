use std::ops::Deref;

use serde::{de, Deserialize};

/// A duration written as whitespace separated parts with a unit suffix
/// (`s`, `m`, `h` or `d`), e.g. `"1h 30m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn parse_part(part: &str) -> Option<u64> {
    let (split, _) = part.char_indices().last()?;
    let (value, unit) = part.split_at(split);
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let factor = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };
    value.parse::<u64>().ok()?.checked_mul(factor)
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(0u64, |acc, part| acc.checked_add(parse_part(part)?))
            .map(|secs| Self(std::time::Duration::from_secs(secs)))
            .ok_or_else(|| de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        for (input, expected) in [
            ("10s", Some(10)),
            ("5m", Some(5 * 60)),
            ("2h", Some(2 * 60 * 60)),
            ("3d", Some(3 * 24 * 60 * 60)),
            ("1h 30m", Some(90 * 60)),
            ("", Some(0)),
            ("s", None),
            ("10", None),
            ("10x", None),
            ("1hh", None),
            ("-5s", None),
        ] {
            let output = serde_json::from_value::<Duration>(input.into())
                .ok()
                .map(|x| x.as_secs());
            assert_eq!(output, expected, "{input}");
        }
    }
}
