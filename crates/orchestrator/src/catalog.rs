//! Fixed subject and difficulty choices.
//!
//! Each choice has a stable numeric code (what the profile stores), a label
//! (what the user types or taps) and the instruction text spliced into the
//! system prompt.

/// Subject the tutor helps with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    English,
    Chemistry,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::English, Subject::Chemistry];

    pub fn code(self) -> i64 {
        match self {
            Subject::Math => 0,
            Subject::English => 1,
            Subject::Chemistry => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Button label. Input must match it exactly.
    pub fn label(self) -> &'static str {
        match self {
            Subject::Math => "математика",
            Subject::English => "английский",
            Subject::Chemistry => "химия",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// System prompt fragment.
    pub fn prompt(self) -> &'static str {
        match self {
            Subject::Math => "You MUST help with math subject.",
            Subject::English => "You MUST help with english subject.",
            Subject::Chemistry => "You MUST help with chemistry subject.",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

/// How the explanation should be pitched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Hard];

    pub fn code(self) -> i64 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Hard => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "простая",
            Difficulty::Hard => "хард",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "You MUST answer in accordance with the level of the novice user, explain everything simply."
            }
            Difficulty::Hard => {
                "You MUST answer at a professional user level, advanced terms may be used."
            }
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|d| d.label()).collect()
    }
}
