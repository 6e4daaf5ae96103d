use serde::{Deserialize, Serialize};

/// How hard the roast hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Gentle,
    #[default]
    Savage,
    Toxic,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[Mode::Gentle, Mode::Savage, Mode::Toxic]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Gentle => "gentle",
            Mode::Savage => "savage",
            Mode::Toxic => "toxic",
        }
    }

    /// Parse a mode name. Anything unrecognized is `Savage`.
    pub fn from_name(name: &str) -> Mode {
        match name.trim().to_ascii_lowercase().as_str() {
            "gentle" => Mode::Gentle,
            "toxic" => Mode::Toxic,
            _ => Mode::Savage,
        }
    }

    pub fn is_known(name: &str) -> bool {
        Mode::all().iter().any(|m| m.as_str() == name)
    }

    /// Sampling temperature sent to chat backends.
    pub fn temperature(self) -> f32 {
        match self {
            Mode::Gentle => 0.5,
            Mode::Savage => 0.7,
            Mode::Toxic => 0.9,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_is_savage() {
        assert_eq!(Mode::from_name("nuclear"), Mode::Savage);
        assert_eq!(Mode::from_name(""), Mode::Savage);
        assert_eq!(Mode::from_name("TOXIC"), Mode::Toxic);
        assert_eq!(Mode::from_name(" gentle "), Mode::Gentle);
    }

    #[test]
    fn temperature_rises_with_intensity() {
        assert!(Mode::Gentle.temperature() < Mode::Savage.temperature());
        assert!(Mode::Savage.temperature() < Mode::Toxic.temperature());
    }
}
