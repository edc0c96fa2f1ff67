/// Avatars offered at session start, selected by 1-based number.
pub const AVATAR_CHOICES: [&str; 7] = ["🧠", "🐉", "⚔️", "🦸", "👽", "🤖", "🎓"];

/// Avatar used when the player skips the choice.
pub const DEFAULT_AVATAR: &str = "👤";

/// The person playing this session. Fixed once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    nickname: String,
    avatar: String,
}

impl Player {
    pub fn new(nickname: String, avatar: String) -> Self {
        Self { nickname, avatar }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }
}

/// Validates a nickname and normalizes it for display.
///
/// The input is trimmed; each word gets an upper-case first letter and a
/// lower-case remainder. Returns `Err` with a message if nothing is left.
pub fn normalize_nickname(input: &str) -> Result<String, &'static str> {
    let words: Vec<String> = input.split_whitespace().map(title_case).collect();

    if words.is_empty() {
        return Err("Nickname cannot be empty.");
    }

    Ok(words.join(" "))
}

/// Resolves an avatar choice: empty means the default, `1..=7` a preset.
pub fn parse_avatar(input: &str) -> Result<&'static str, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_AVATAR);
    }

    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| AVATAR_CHOICES.get(i).copied())
        .ok_or("Invalid choice. Please enter a number between 1-7 or press Enter.")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nickname() {
        assert_eq!(normalize_nickname("  alice ").unwrap(), "Alice");
        assert_eq!(normalize_nickname("bOB   smith").unwrap(), "Bob Smith");
        assert!(normalize_nickname("").is_err());
        assert!(normalize_nickname("   ").is_err());
    }

    #[test]
    fn test_parse_avatar() {
        assert_eq!(parse_avatar("").unwrap(), DEFAULT_AVATAR);
        assert_eq!(parse_avatar("1").unwrap(), "🧠");
        assert_eq!(parse_avatar(" 7 ").unwrap(), "🎓");
        assert!(parse_avatar("0").is_err());
        assert!(parse_avatar("8").is_err());
        assert!(parse_avatar("dragon").is_err());
    }
}
