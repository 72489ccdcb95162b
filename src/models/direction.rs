use rand::Rng;

/// Which side of an item is shown and which side must be typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Show the Spanish gloss, ask for the English forms.
    PromptIsTranslation,
    /// Show an English form, ask for the rest (including the gloss).
    PromptIsTargetForm,
}

impl Direction {
    /// Pick a direction with even odds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::PromptIsTranslation
        } else {
            Self::PromptIsTargetForm
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PromptIsTranslation => "ES → EN",
            Self::PromptIsTargetForm => "EN → ES",
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        let a: Vec<Direction> = (0..32).map(|_| Direction::random(&mut first)).collect();
        let b: Vec<Direction> = (0..32).map(|_| Direction::random(&mut second)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_produces_both_directions() {
        let mut rng = StdRng::seed_from_u64(42);
        let rolls: Vec<Direction> = (0..200).map(|_| Direction::random(&mut rng)).collect();

        assert!(rolls.contains(&Direction::PromptIsTranslation));
        assert!(rolls.contains(&Direction::PromptIsTargetForm));
    }
}
