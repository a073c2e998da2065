/// A single flashcard: an English word and its Turkish translation.
///
/// Both fields are trimmed and guaranteed non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    english: String,
    turkish: String,
}

impl Card {
    /// Returns `None` when either side is blank after trimming.
    pub fn new(english: &str, turkish: &str) -> Option<Self> {
        let english = english.trim();
        let turkish = turkish.trim();

        if english.is_empty() || turkish.is_empty() {
            return None;
        }

        Some(Self {
            english: english.to_string(),
            turkish: turkish.to_string(),
        })
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn turkish(&self) -> &str {
        &self.turkish
    }

    /// Exact string comparison against the Turkish side.
    pub fn check_answer(&self, selected: &str) -> bool {
        selected == self.turkish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let card = Card::new("  cat ", " kedi  ").unwrap();

        assert_eq!(card.english(), "cat");
        assert_eq!(card.turkish(), "kedi");
    }

    #[test]
    fn test_new_rejects_blank_sides() {
        assert!(Card::new("", "kedi").is_none());
        assert!(Card::new("cat", "").is_none());
        assert!(Card::new("   ", "kedi").is_none());
        assert!(Card::new("cat", "  ").is_none());
    }

    #[test]
    fn test_check_answer() {
        let card = Card::new("cat", "kedi").unwrap();

        assert!(card.check_answer("kedi"));
        assert!(!card.check_answer("köpek"));
        assert!(!card.check_answer("Kedi"));
        assert!(!card.check_answer(""));
    }
}
