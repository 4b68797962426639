//! Slide deck registry
//!
//! A `Deck` is the ordered, immutable list of slides for one presentation.
//! It is built once (from the bundled deck or a TOML file) and never mutated;
//! everything else refers to slides by index.

pub mod navigation;
pub mod progress;
pub mod toml_format;
pub mod transition;

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Deck shipped with the binary
const BUNDLED_DECK: &str = include_str!("../../decks/neurobotix.toml");

/// What a slide renders besides its body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideKind {
    /// Title, subtitle and markdown body only
    #[default]
    Content,
    /// Body plus the interactive contact form
    Contact,
}

/// A single slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Stable identifier, unique within a deck
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Markdown source
    pub body: String,
    pub kind: SlideKind,
}

impl Slide {
    pub fn is_contact(&self) -> bool {
        self.kind == SlideKind::Contact
    }
}

/// Errors raised while building a deck
#[derive(Debug)]
pub enum DeckError {
    /// A deck needs at least one slide
    Empty,
    /// Slide at this position has a blank id
    MissingId(usize),
    /// Two slides share an id
    DuplicateId(String),
    /// Deck file is not valid TOML or misses required keys
    Parse(String),
    /// Deck file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Empty => write!(f, "deck has no slides"),
            DeckError::MissingId(pos) => write!(f, "slide #{} has an empty id", pos + 1),
            DeckError::DuplicateId(id) => write!(f, "duplicate slide id '{}'", id),
            DeckError::Parse(msg) => write!(f, "invalid deck file: {}", msg),
            DeckError::Io { path, source } => {
                write!(f, "cannot read deck {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Ordered, non-empty sequence of slides
#[derive(Debug, Clone)]
pub struct Deck {
    title: String,
    footer: Option<String>,
    slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck, checking it is non-empty and ids are unique
    pub fn new(
        title: impl Into<String>,
        footer: Option<String>,
        slides: Vec<Slide>,
    ) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::with_capacity(slides.len());
        for (pos, slide) in slides.iter().enumerate() {
            if slide.id.trim().is_empty() {
                return Err(DeckError::MissingId(pos));
            }
            if !seen.insert(slide.id.as_str()) {
                return Err(DeckError::DuplicateId(slide.id.clone()));
            }
        }

        Ok(Self {
            title: title.into(),
            footer,
            slides,
        })
    }

    /// The deck compiled into the binary
    pub fn bundled() -> Result<Self, DeckError> {
        toml_format::parse(BUNDLED_DECK)
    }

    /// Load a deck from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml_format::parse(&contents)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Number of slides (never zero)
    pub fn len(&self) -> NonZeroUsize {
        // Constructor rejects empty decks
        NonZeroUsize::new(self.slides.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Position of a slide by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(id: &str) -> Slide {
        Slide {
            id: id.to_string(),
            title: id.to_uppercase(),
            subtitle: None,
            body: String::new(),
            kind: SlideKind::Content,
        }
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(Deck::new("t", None, vec![]), Err(DeckError::Empty)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Deck::new("t", None, vec![slide("a"), slide("b"), slide("a")]).unwrap_err();
        assert!(matches!(err, DeckError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = Deck::new("t", None, vec![slide("a"), slide("  ")]).unwrap_err();
        assert!(matches!(err, DeckError::MissingId(1)));
    }

    #[test]
    fn insertion_order_is_display_order() {
        let deck = Deck::new("t", None, vec![slide("a"), slide("b"), slide("c")]).unwrap();
        assert_eq!(deck.len().get(), 3);
        assert_eq!(deck.get(1).unwrap().id, "b");
        assert_eq!(deck.position("c"), Some(2));
        assert!(deck.get(3).is_none());
    }

    #[test]
    fn bundled_deck_loads() {
        let deck = Deck::bundled().expect("bundled deck should parse");
        assert_eq!(deck.len().get(), 16);
        assert_eq!(deck.title(), "Neurobotix Tech");
        assert_eq!(deck.get(0).unwrap().id, "intro");

        // Contact form lives on the final slide
        let last = deck.slides().last().unwrap();
        assert!(last.is_contact());
        assert_eq!(deck.slides().iter().filter(|s| s.is_contact()).count(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Deck::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
