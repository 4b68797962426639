// TOML deck format parser
//
// A deck file has a [meta] table and one [[slides]] entry per slide, in
// display order. Slide bodies are markdown.
//
// [meta]
// title = "Neurobotix Tech"
// footer = "© 2025 ..."
//
// [[slides]]
// id = "intro"
// title = "Neurobotix Tech"
// subtitle = "..."
// body = """..."""
// kind = "content"   # or "contact"

use serde::Deserialize;

use super::{Deck, DeckError, Slide, SlideKind};

/// Root structure for TOML deck files
#[derive(Debug, Clone, Deserialize)]
pub struct TomlDeck {
    pub meta: DeckMeta,
    #[serde(default)]
    pub slides: Vec<TomlSlide>,
}

/// Deck metadata
#[derive(Debug, Clone, Deserialize)]
pub struct DeckMeta {
    pub title: String,
    #[serde(default)]
    pub footer: Option<String>,
}

/// One [[slides]] entry
#[derive(Debug, Clone, Deserialize)]
pub struct TomlSlide {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub kind: TomlSlideKind,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TomlSlideKind {
    #[default]
    Content,
    Contact,
}

impl From<TomlSlideKind> for SlideKind {
    fn from(kind: TomlSlideKind) -> Self {
        match kind {
            TomlSlideKind::Content => SlideKind::Content,
            TomlSlideKind::Contact => SlideKind::Contact,
        }
    }
}

impl From<TomlSlide> for Slide {
    fn from(entry: TomlSlide) -> Self {
        Slide {
            id: entry.id,
            title: entry.title,
            subtitle: entry.subtitle.filter(|s| !s.trim().is_empty()),
            body: entry.body.trim().to_string(),
            kind: entry.kind.into(),
        }
    }
}

/// Parse a deck from TOML source
pub fn parse(src: &str) -> Result<Deck, DeckError> {
    let raw: TomlDeck = toml::from_str(src).map_err(|e| DeckError::Parse(e.to_string()))?;
    let slides = raw.slides.into_iter().map(Slide::from).collect();
    Deck::new(raw.meta.title, raw.meta.footer, slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_deck() {
        let deck = parse(
            r#"
[meta]
title = "Demo"

[[slides]]
id = "one"
title = "First"

[[slides]]
id = "two"
title = "Second"
subtitle = "sub"
body = """
- a
- b
"""
kind = "contact"
"#,
        )
        .unwrap();

        assert_eq!(deck.title(), "Demo");
        assert_eq!(deck.footer(), None);
        assert_eq!(deck.len().get(), 2);

        let first = deck.get(0).unwrap();
        assert_eq!(first.kind, SlideKind::Content);
        assert_eq!(first.body, "");

        let second = deck.get(1).unwrap();
        assert_eq!(second.subtitle.as_deref(), Some("sub"));
        assert_eq!(second.body, "- a\n- b");
        assert!(second.is_contact());
    }

    #[test]
    fn blank_subtitle_becomes_none() {
        let deck = parse(
            r#"
[meta]
title = "Demo"
[[slides]]
id = "one"
title = "First"
subtitle = "  "
"#,
        )
        .unwrap();
        assert_eq!(deck.get(0).unwrap().subtitle, None);
    }

    #[test]
    fn deck_without_slides_is_empty_error() {
        let err = parse("[meta]\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, DeckError::Empty));
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let err = parse(
            r#"
[meta]
title = "x"
[[slides]]
id = "a"
title = "A"
kind = "video"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn missing_meta_is_parse_error() {
        let err = parse("[[slides]]\nid = \"a\"\ntitle = \"A\"\n").unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }
}
