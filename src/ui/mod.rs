pub mod components;
pub mod view;
pub mod views;

use ratatui::widgets::ListState;

/// Clamp a list selection to the current item count.
///
/// Queries refetch in the background, so a list can shrink underneath its
/// selection (or start empty before the first load completes).
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    Some(_) => {}
    None => state.select(Some(0)),
  }
}

/// Truncate to a maximum number of characters, adding "..." if truncated.
///
/// Measures characters rather than bytes: names and descriptions are
/// user-entered and often non-ASCII, and a byte cut can land inside a
/// multi-byte character.
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    return s.to_string();
  }
  let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
  format!("{}...", head)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_counts_chars_not_bytes() {
    // 16 characters but 18 bytes; must come back whole
    assert_eq!(truncate("Fotografía aérea", 16), "Fotografía aérea");
  }

  #[test]
  fn test_truncate_cuts_multibyte_name_cleanly() {
    assert_eq!(truncate("Café del mar", 7), "Café...");
  }

  #[test]
  fn test_selection_clamped_to_shrunken_list() {
    let mut state = ListState::default();
    state.select(Some(5));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));
  }

  #[test]
  fn test_selection_cleared_when_empty() {
    let mut state = ListState::default();
    state.select(Some(0));
    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }

  #[test]
  fn test_selection_defaults_to_first() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 4);
    assert_eq!(state.selected(), Some(0));
  }
}
