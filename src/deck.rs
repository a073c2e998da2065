use crate::card::Card;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Number of answer choices shown per round.
pub const OPTION_COUNT: usize = 4;

// Cap on random draws when filling an option set, so decks with few
// distinct translations cannot spin forever.
const OPTION_ATTEMPT_FACTOR: usize = 50;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no valid flashcards found in the source")]
    Empty,

    #[error("could not read flashcards from {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The full set of loaded cards plus the running score for one game.
///
/// The deck is never consumed: `advance` draws with replacement, so the
/// quiz itself is inexhaustible and round counting is the session's job.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    current: usize,
    score: u32,
}

impl Deck {
    /// Builds a deck from already-parsed `(english, turkish)` pairs,
    /// dropping any pair with a blank side. Fails when nothing survives.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let cards: Vec<Card> = pairs
            .into_iter()
            .filter_map(|(english, turkish)| Card::new(&english, &turkish))
            .collect();

        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let current = rand::thread_rng().gen_range(0..cards.len());

        Ok(Self {
            cards,
            current,
            score: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current)
    }

    /// Picks the next card uniformly at random, with replacement.
    pub fn advance(&mut self) {
        if !self.cards.is_empty() {
            self.current = rand::thread_rng().gen_range(0..self.cards.len());
        }
    }

    /// Translations in deck order with duplicates removed.
    pub fn distinct_translations(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.turkish()).unique().collect()
    }

    /// Builds the option set for the current card: the correct translation
    /// plus up to three distinct others, shuffled.
    ///
    /// Random draws are capped; when the deck holds fewer than four
    /// distinct translations the result degrades to however many exist.
    pub fn generate_options(&self) -> Vec<String> {
        let Some(card) = self.current_card() else {
            return Vec::new();
        };

        let distinct = self.distinct_translations();
        let target = OPTION_COUNT.min(distinct.len());
        let max_attempts = distinct.len().max(OPTION_COUNT) * OPTION_ATTEMPT_FACTOR;

        let mut options = vec![card.turkish().to_string()];
        let mut rng = rand::thread_rng();
        let mut attempts = 0;

        while options.len() < OPTION_COUNT && attempts < max_attempts {
            attempts += 1;
            let pick = &self.cards[rng.gen_range(0..self.cards.len())];
            if !options.iter().any(|o| o == pick.turkish()) {
                options.push(pick.turkish().to_string());
            }
        }

        // Random draws exhausted; top up from the distinct list in order.
        if options.len() < target {
            for translation in distinct {
                if options.len() >= target {
                    break;
                }
                if !options.iter().any(|o| o == translation) {
                    options.push(translation.to_string());
                }
            }
        }

        options.shuffle(&mut rng);
        options
    }

    /// Scores one answer against the current card. Does not advance;
    /// the session advances separately after showing feedback.
    pub fn submit_answer(&mut self, selected: &str) -> bool {
        let correct = self
            .current_card()
            .map(|card| card.check_answer(selected))
            .unwrap_or(false);

        if correct {
            self.score += 1;
        }

        correct
    }

    /// Zeroes the score, reshuffles and picks a fresh current card.
    pub fn reset(&mut self) {
        self.score = 0;
        let mut rng = rand::thread_rng();
        self.cards.shuffle(&mut rng);
        self.current = rng.gen_range(0..self.cards.len());
    }
}
