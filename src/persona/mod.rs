//! Persona classification — onboarding answers to a structured profile and
//! presentation theme.

pub mod classifier;
pub mod content;
pub mod model;
pub mod routes;
pub mod theme;

pub use classifier::{OnboardingInput, ProfilePatch, classify, update};
pub use model::PersonaProfile;
pub use theme::{ThemeConfig, ThemeName, get_theme, select_theme, theme_config};
