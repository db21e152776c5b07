use serde::{Deserialize, Serialize};

/// Game difficulty as exposed to the operator and encoded on the wire.
///
/// The device expects the numeric level (`D:0` .. `D:2`); the web UI shows
/// the human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Moderate),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Outbound command sent to the device as a single ASCII line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PowerOn,
    PowerOff,
    LockIn,
    SetDifficulty(Difficulty),
}

impl Command {
    /// Encode the command as the line payload (no terminator).
    pub fn encode(&self) -> String {
        match self {
            Command::PowerOn => "P".to_string(),
            Command::PowerOff => "O".to_string(),
            Command::LockIn => "L".to_string(),
            Command::SetDifficulty(d) => format!("D:{}", d.level()),
        }
    }
}

/// Classified inbound line from the device.
///
/// Classification is prefix-based, first match wins. Anything that does not
/// match a known prefix (or fails numeric parsing) is opaque debug text and
/// only ends up in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLine<'a> {
    /// `STATUS:<text>` - replaces the game status verbatim
    Status(&'a str),
    /// `SCORE:<n>` / `TOTAL_SCORE:<n>` - running score update
    Score(u32),
    /// `FINAL_SCORE:<n>` - score at end of game
    FinalScore(u32),
    /// `ATTEMPTS:<n>` - attempts remaining this round
    Attempts(u32),
    /// `DIFFICULTY:<n>` - device-side difficulty echo
    Difficulty(Difficulty),
    /// Anything else, logged verbatim
    Debug(&'a str),
}

/// Classify one inbound line from the device.
pub fn parse_device_line(line: &str) -> DeviceLine<'_> {
    if let Some(text) = line.strip_prefix("STATUS:") {
        return DeviceLine::Status(text);
    }
    if let Some(rest) = line.strip_prefix("FINAL_SCORE:") {
        if let Ok(score) = rest.trim().parse::<u32>() {
            return DeviceLine::FinalScore(score);
        }
        return DeviceLine::Debug(line);
    }
    if let Some(rest) = line.strip_prefix("TOTAL_SCORE:").or_else(|| line.strip_prefix("SCORE:")) {
        if let Ok(score) = rest.trim().parse::<u32>() {
            return DeviceLine::Score(score);
        }
        return DeviceLine::Debug(line);
    }
    if let Some(rest) = line.strip_prefix("ATTEMPTS:") {
        if let Ok(attempts) = rest.trim().parse::<u32>() {
            return DeviceLine::Attempts(attempts);
        }
        return DeviceLine::Debug(line);
    }
    if let Some(rest) = line.strip_prefix("DIFFICULTY:") {
        if let Some(difficulty) = rest.trim().parse::<i64>().ok().and_then(Difficulty::from_level) {
            return DeviceLine::Difficulty(difficulty);
        }
        return DeviceLine::Debug(line);
    }
    DeviceLine::Debug(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_encoding() {
        assert_eq!(Command::PowerOn.encode(), "P");
        assert_eq!(Command::PowerOff.encode(), "O");
        assert_eq!(Command::LockIn.encode(), "L");
        assert_eq!(Command::SetDifficulty(Difficulty::Hard).encode(), "D:2");
    }

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(Difficulty::from_level(0), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_level(1), Some(Difficulty::Moderate));
        assert_eq!(Difficulty::from_level(2), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_level(3), None);
        assert_eq!(Difficulty::from_level(-1), None);
        assert_eq!(Difficulty::Moderate.label(), "Moderate");
    }

    #[test]
    fn test_parse_status_line() {
        assert_eq!(parse_device_line("STATUS:RUNNING"), DeviceLine::Status("RUNNING"));
        // Substring after the prefix is taken verbatim, including empty
        assert_eq!(parse_device_line("STATUS:"), DeviceLine::Status(""));
    }

    #[test]
    fn test_parse_score_lines() {
        assert_eq!(parse_device_line("SCORE:150"), DeviceLine::Score(150));
        assert_eq!(parse_device_line("TOTAL_SCORE:300"), DeviceLine::Score(300));
        assert_eq!(parse_device_line("FINAL_SCORE:450"), DeviceLine::FinalScore(450));
    }

    #[test]
    fn test_parse_attempts_and_difficulty() {
        assert_eq!(parse_device_line("ATTEMPTS:3"), DeviceLine::Attempts(3));
        assert_eq!(parse_device_line("DIFFICULTY:2"), DeviceLine::Difficulty(Difficulty::Hard));
    }

    #[test]
    fn test_malformed_numeric_falls_through_to_debug() {
        assert_eq!(parse_device_line("SCORE:abc"), DeviceLine::Debug("SCORE:abc"));
        assert_eq!(parse_device_line("ATTEMPTS:"), DeviceLine::Debug("ATTEMPTS:"));
        assert_eq!(parse_device_line("DIFFICULTY:9"), DeviceLine::Debug("DIFFICULTY:9"));
    }

    #[test]
    fn test_unknown_line_is_debug() {
        assert_eq!(
            parse_device_line("RECEIVED COMMAND: P"),
            DeviceLine::Debug("RECEIVED COMMAND: P")
        );
        // Case-sensitive: lowercase prefix is not a status update
        assert_eq!(parse_device_line("status:RUNNING"), DeviceLine::Debug("status:RUNNING"));
    }
}
