/// An answer slot the user can be asked to fill in.
///
/// `s-form` is the third-person `-s/-es/-ies` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Base,
    Past,
    Participle,
    SForm,
    IngForm,
    Spanish,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Base,
        Field::Past,
        Field::Participle,
        Field::SForm,
        Field::IngForm,
        Field::Spanish,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Base => "base",
            Field::Past => "past",
            Field::Participle => "participle",
            Field::SForm => "s-form",
            Field::IngForm => "ing-form",
            Field::Spanish => "spanish",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Base => "Base form",
            Field::Past => "Past simple",
            Field::Participle => "Past participle",
            Field::SForm => "-s / -es / -ies",
            Field::IngForm => "-ing form",
            Field::Spanish => "Spanish",
        }
    }

    pub fn is_spanish(self) -> bool {
        matches!(self, Field::Spanish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Field::ALL.iter().map(|field| field.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Field::ALL.len());
    }

    #[test]
    fn test_only_spanish_is_spanish() {
        let spanish: Vec<_> = Field::ALL.into_iter().filter(|field| field.is_spanish()).collect();
        assert_eq!(spanish, vec![Field::Spanish]);
    }
}
