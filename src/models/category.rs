#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Category {
    Food,
    Shopping,
    HealthFitness,
    Transport,
    Education,
    Entertainment,
    #[default]
    Other,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::HealthFitness => "Health & Fitness",
            Self::Transport => "Transport",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Normalize free text to a known category. Anything unrecognised is `Other`.
    pub(crate) fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "food" => Self::Food,
            "shopping" => Self::Shopping,
            "health & fitness" | "health and fitness" | "health" | "fitness" => {
                Self::HealthFitness
            }
            "transport" | "transportation" => Self::Transport,
            "education" => Self::Education,
            "entertainment" => Self::Entertainment,
            _ => Self::Other,
        }
    }

    pub(crate) fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Shopping => "🛍️",
            Self::HealthFitness => "💪",
            Self::Transport => "🚗",
            Self::Education => "📚",
            Self::Entertainment => "🎮",
            Self::Other => "📦",
        }
    }

    pub(crate) fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Shopping,
            Self::HealthFitness,
            Self::Transport,
            Self::Education,
            Self::Entertainment,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ExpenseKind {
    #[default]
    Debit,
    Credit,
}

impl ExpenseKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }

    pub(crate) fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
