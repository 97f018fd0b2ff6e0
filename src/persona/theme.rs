//! Presentation themes and the theme-selection rule table.
//!
//! Themes are a fixed catalog; selection is an ordered first-match-wins rule
//! list over persona attributes. The ordering is load-bearing: acute
//! emotional distress overrides journey type, journey type overrides general
//! emotional tone, and everything else falls back to the default. Profiles
//! can satisfy several rules at once, so the rules must stay an explicit
//! ordered list, not a lookup map.

use serde::{Deserialize, Serialize};

use crate::persona::model::{AgeGroup, EmotionalState, JourneyType};

/// Identifier of a presentation theme in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    SanctuaryOrange,
    ClinicalBlue,
    NurturingGreen,
    GentlePurple,
    StrengthGray,
}

impl ThemeName {
    /// The fallback theme used when a stored name no longer resolves.
    pub const DEFAULT: ThemeName = ThemeName::SanctuaryOrange;
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SanctuaryOrange => "sanctuary_orange",
            Self::ClinicalBlue => "clinical_blue",
            Self::NurturingGreen => "nurturing_green",
            Self::GentlePurple => "gentle_purple",
            Self::StrengthGray => "strength_gray",
        };
        write!(f, "{s}")
    }
}

/// Color tokens for a theme.
#[derive(Debug, Clone, Serialize)]
pub struct ColorTokens {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
}

/// Typography tokens for a theme.
#[derive(Debug, Clone, Serialize)]
pub struct TypographyTokens {
    pub heading_font: &'static str,
    pub body_font: &'static str,
}

/// A named bundle of presentation tokens.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    pub name: &'static str,
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
    pub mood: &'static str,
}

const INTER: TypographyTokens = TypographyTokens {
    heading_font: "Inter",
    body_font: "Inter",
};

static SANCTUARY_ORANGE: ThemeConfig = ThemeConfig {
    name: "Sanctuary Orange",
    colors: ColorTokens {
        primary: "hsl(24, 100%, 50%)",
        secondary: "hsl(24, 85%, 95%)",
        accent: "hsl(45, 100%, 65%)",
        background: "hsl(0, 0%, 100%)",
        foreground: "hsl(24, 15%, 15%)",
        muted: "hsl(24, 10%, 85%)",
        border: "hsl(24, 20%, 90%)",
    },
    typography: INTER,
    mood: "warm, nurturing, optimistic",
};

static CLINICAL_BLUE: ThemeConfig = ThemeConfig {
    name: "Clinical Blue",
    colors: ColorTokens {
        primary: "hsl(210, 100%, 50%)",
        secondary: "hsl(210, 85%, 95%)",
        accent: "hsl(190, 100%, 65%)",
        background: "hsl(0, 0%, 100%)",
        foreground: "hsl(210, 15%, 15%)",
        muted: "hsl(210, 10%, 85%)",
        border: "hsl(210, 20%, 90%)",
    },
    typography: INTER,
    mood: "professional, trustworthy, clinical",
};

static NURTURING_GREEN: ThemeConfig = ThemeConfig {
    name: "Nurturing Green",
    colors: ColorTokens {
        primary: "hsl(140, 70%, 45%)",
        secondary: "hsl(140, 60%, 95%)",
        accent: "hsl(120, 80%, 60%)",
        background: "hsl(0, 0%, 100%)",
        foreground: "hsl(140, 15%, 15%)",
        muted: "hsl(140, 10%, 85%)",
        border: "hsl(140, 20%, 90%)",
    },
    typography: INTER,
    mood: "natural, growth-oriented, calming",
};

static GENTLE_PURPLE: ThemeConfig = ThemeConfig {
    name: "Gentle Purple",
    colors: ColorTokens {
        primary: "hsl(270, 70%, 55%)",
        secondary: "hsl(270, 60%, 95%)",
        accent: "hsl(290, 80%, 70%)",
        background: "hsl(0, 0%, 100%)",
        foreground: "hsl(270, 15%, 15%)",
        muted: "hsl(270, 10%, 85%)",
        border: "hsl(270, 20%, 90%)",
    },
    typography: INTER,
    mood: "compassionate, supportive, gentle",
};

static STRENGTH_GRAY: ThemeConfig = ThemeConfig {
    name: "Strength Gray",
    colors: ColorTokens {
        primary: "hsl(220, 10%, 35%)",
        secondary: "hsl(220, 10%, 95%)",
        accent: "hsl(210, 50%, 65%)",
        background: "hsl(0, 0%, 100%)",
        foreground: "hsl(220, 10%, 15%)",
        muted: "hsl(220, 5%, 85%)",
        border: "hsl(220, 10%, 90%)",
    },
    typography: INTER,
    mood: "resilient, determined, grounded",
};

/// Look up a theme's config by its catalog name.
pub fn theme_config(name: ThemeName) -> &'static ThemeConfig {
    match name {
        ThemeName::SanctuaryOrange => &SANCTUARY_ORANGE,
        ThemeName::ClinicalBlue => &CLINICAL_BLUE,
        ThemeName::NurturingGreen => &NURTURING_GREEN,
        ThemeName::GentlePurple => &GENTLE_PURPLE,
        ThemeName::StrengthGray => &STRENGTH_GRAY,
    }
}

/// Look up a theme config by raw string name.
///
/// Unknown names fall back to the default theme — this lookup never fails,
/// so stale stored names still render.
pub fn get_theme(name: &str) -> &'static ThemeConfig {
    let parsed = match name {
        "sanctuary_orange" => ThemeName::SanctuaryOrange,
        "clinical_blue" => ThemeName::ClinicalBlue,
        "nurturing_green" => ThemeName::NurturingGreen,
        "gentle_purple" => ThemeName::GentlePurple,
        "strength_gray" => ThemeName::StrengthGray,
        _ => ThemeName::DEFAULT,
    };
    theme_config(parsed)
}

type ThemePredicate = fn(JourneyType, EmotionalState, AgeGroup) -> bool;

/// The selection rules, in precedence order. First match wins.
static THEME_RULES: &[(ThemePredicate, ThemeName)] = &[
    // Acute emotional distress overrides everything else.
    (
        |_, state, _| matches!(state, EmotionalState::Anxious | EmotionalState::Overwhelmed),
        ThemeName::NurturingGreen,
    ),
    (
        |journey, _, age| {
            journey == JourneyType::Ivf
                && matches!(age, AgeGroup::From36To40 | AgeGroup::From41To45)
        },
        ThemeName::StrengthGray,
    ),
    (
        |journey, state, _| {
            journey == JourneyType::NaturalConception && state == EmotionalState::Optimistic
        },
        ThemeName::SanctuaryOrange,
    ),
    (
        |journey, _, _| {
            matches!(
                journey,
                JourneyType::DomesticAdoption | JourneyType::InternationalAdoption
            )
        },
        ThemeName::GentlePurple,
    ),
    (
        |_, state, _| matches!(state, EmotionalState::Determined | EmotionalState::Cautious),
        ThemeName::ClinicalBlue,
    ),
];

/// Select the presentation theme for a persona.
///
/// Walks [`THEME_RULES`] in order and returns the first match, falling back
/// to the default when no rule fires.
pub fn select_theme(
    journey_type: JourneyType,
    emotional_state: EmotionalState,
    age_group: AgeGroup,
) -> ThemeName {
    THEME_RULES
        .iter()
        .find(|(predicate, _)| predicate(journey_type, emotional_state, age_group))
        .map(|(_, theme)| *theme)
        .unwrap_or(ThemeName::DEFAULT)
}
