// Run phases & end-of-run fortune (omikuji) tiers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fortune {
    Misfortune,
    FutureBlessing,
    SmallBlessing,
    MiddleBlessing,
    GreatBlessing,
}

impl Fortune {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Fortune::Misfortune,
            1..=3 => Fortune::FutureBlessing,
            4..=6 => Fortune::SmallBlessing,
            7..=9 => Fortune::MiddleBlessing,
            _ => Fortune::GreatBlessing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Fortune::Misfortune => "凶",
            Fortune::FutureBlessing => "末吉",
            Fortune::SmallBlessing => "小吉",
            Fortune::MiddleBlessing => "中吉",
            Fortune::GreatBlessing => "大吉",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Fortune::Misfortune => "Misfortune",
            Fortune::FutureBlessing => "Future Blessing",
            Fortune::SmallBlessing => "Small Blessing",
            Fortune::MiddleBlessing => "Middle Blessing",
            Fortune::GreatBlessing => "Great Blessing",
        }
    }
}
