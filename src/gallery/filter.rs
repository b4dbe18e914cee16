//! Client-side image filtering.
//!
//! Filtering is a pure function over the fetched snapshot, recomputed
//! whenever a criterion changes. Criteria compose conjunctively and each one
//! is an explicit `Option`; the all-`None` filter is the identity.

use crate::gallery::types::Image;

/// Image filter criteria; `None` switches a criterion off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFilter {
  /// Case-insensitive name substring
  pub name: Option<String>,
  /// Exact category id
  pub category: Option<u64>,
  /// Inclusive size range in megabytes
  pub size_mb: Option<(f64, f64)>,
}

impl ImageFilter {
  pub fn is_active(&self) -> bool {
    self.name.is_some() || self.category.is_some() || self.size_mb.is_some()
  }

  /// Check a single image against every active criterion.
  pub fn matches(&self, image: &Image) -> bool {
    let matches_name = match &self.name {
      Some(term) => image.name.to_lowercase().contains(&term.to_lowercase()),
      None => true,
    };

    let matches_category = match self.category {
      Some(id) => image.category_id == id,
      None => true,
    };

    // An unparseable size fails an active size criterion
    let matches_size = match self.size_mb {
      Some((lo, hi)) => match parse_size(&image.metadata.size) {
        Some(bytes) => {
          let mb = bytes / (1024.0 * 1024.0);
          mb >= lo && mb <= hi
        }
        None => false,
      },
      None => true,
    };

    matches_name && matches_category && matches_size
  }

  /// Apply the filter, preserving input order.
  pub fn apply<'a>(&self, images: &'a [Image]) -> Vec<&'a Image> {
    images.iter().filter(|image| self.matches(image)).collect()
  }
}

/// Parse a unit-suffixed size string into bytes.
///
/// The numeric prefix is read leniently (leading float, ignoring whatever
/// follows); a `kb` or `mb` anywhere in the string, case-insensitively,
/// scales it, with `kb` taking precedence. Values without a unit are raw
/// bytes. Returns `None` when no leading number exists.
pub fn parse_size(size: &str) -> Option<f64> {
  let value = leading_float(size)?;

  let lower = size.to_lowercase();
  if lower.contains("kb") {
    Some(value * 1024.0)
  } else if lower.contains("mb") {
    Some(value * 1024.0 * 1024.0)
  } else {
    Some(value)
  }
}

/// Longest numeric prefix of the input, after leading whitespace. A
/// digit-backed exponent (`2e3`) extends the prefix.
fn leading_float(s: &str) -> Option<f64> {
  let s = s.trim_start();

  let mut end = 0;
  let mut seen_digit = false;
  let mut seen_dot = false;
  for (i, c) in s.char_indices() {
    match c {
      '+' | '-' if i == 0 => end = i + 1,
      '0'..='9' => {
        seen_digit = true;
        end = i + 1;
      }
      '.' if !seen_dot => {
        seen_dot = true;
        end = i + 1;
      }
      _ => break,
    }
  }

  if !seen_digit {
    return None;
  }
  end += exponent_len(&s[end..]);
  s[..end].parse().ok()
}

/// Length of a digit-backed exponent (`e3`, `E-2`) at the start of `rest`;
/// zero when no digit follows the `e`, as in `2eMB`.
fn exponent_len(rest: &str) -> usize {
  let mut chars = rest.chars();
  if !matches!(chars.next(), Some('e') | Some('E')) {
    return 0;
  }
  let mut len = 1;
  let mut next = chars.next();
  if matches!(next, Some('+') | Some('-')) {
    len += 1;
    next = chars.next();
  }
  let mut digits = 0;
  while let Some(c) = next {
    if !c.is_ascii_digit() {
      break;
    }
    digits += 1;
    len += 1;
    next = chars.next();
  }
  if digits == 0 {
    0
  } else {
    len
  }
}
