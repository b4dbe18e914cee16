//! Verb table for the `:` prompt and its autocomplete ranking.

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

pub const COMMANDS: &[Command] = &[
  Command {
    name: "categories",
    aliases: &["c", "cat", "cats"],
    description: "Manage gallery categories",
  },
  Command {
    name: "images",
    aliases: &["i", "img", "gallery"],
    description: "Browse and filter images",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit g9s",
  },
];

/// Match quality for autocomplete ranking, lower is better.
/// Exact name beats exact alias beats prefixes beats substring matches.
fn match_score(cmd: &Command, input: &str) -> Option<u32> {
  if cmd.name == input {
    return Some(0);
  }
  if cmd.aliases.contains(&input) {
    return Some(1);
  }
  if cmd.name.starts_with(input) {
    return Some(2);
  }
  if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    return Some(3);
  }
  if cmd.name.contains(input) {
    return Some(4);
  }
  if cmd.aliases.iter().any(|a| a.contains(input)) {
    return Some(5);
  }
  None
}

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input = input.to_lowercase();
  if input.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(u32, &'static Command)> = COMMANDS
    .iter()
    .filter_map(|cmd| match_score(cmd, &input).map(|score| (score, cmd)))
    .collect();

  // Stable sort keeps declaration order within a score tier
  matches.sort_by_key(|(score, _)| *score);
  matches.into_iter().map(|(_, cmd)| cmd).collect()
}
