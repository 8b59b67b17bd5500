// src/persona/mod.rs
// Persona system for Solace's companion voice.
// Currently only the Default persona is implemented.

pub mod default;

pub use default::DEFAULT_PERSONA_PROMPT;

/// Persona overlays define the companion's voice for prompt framing.
/// Currently only Default is implemented. Additional personas can be
/// added here if persona switching becomes a desired feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaOverlay {
    Default, // Primary persona - warm, steady, validating, unhurried
}

impl PersonaOverlay {
    /// Returns the framing prompt for this persona overlay.
    pub fn prompt(&self) -> &'static str {
        match self {
            PersonaOverlay::Default => DEFAULT_PERSONA_PROMPT,
        }
    }
}

impl std::fmt::Display for PersonaOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PersonaOverlay::Default => "default",
            }
        )
    }
}

impl std::str::FromStr for PersonaOverlay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PersonaOverlay::Default),
            _ => Err(()),
        }
    }
}
