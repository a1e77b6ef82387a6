use serde::{Deserialize, Serialize};

use crate::settings::TokenSettings;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

const DELIMITERS: [char; 3] = ['\n', ',', ';'];

/// A candidate piece of text cut out of the OCR blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Position of a token in the current token list.
///
/// Duplicate texts are distinct tokens, so drag sessions are keyed by index.
pub type TokenKey = usize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OcrPayload {
    raw_text: String,
}

/// Splits raw OCR output into draggable tokens.
#[derive(Debug, Clone)]
pub struct TokenSource {
    denylist: Vec<String>,
    min_token_chars: usize,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self::new(&TokenSettings::default())
    }
}

impl TokenSource {
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            denylist: settings
                .denylist
                .iter()
                .map(|label| label.trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
            min_token_chars: settings.min_token_chars.max(1),
        }
    }

    pub fn normalize(&self, raw: &str) -> Vec<Token> {
        raw.split(DELIMITERS.as_slice())
            .map(str::trim)
            .filter(|piece| self.keep(piece))
            .map(|piece| Token(piece.to_string()))
            .collect()
    }

    /// Tokens from the OCR service response, `{ "rawText": "..." }`.
    ///
    /// Anything unreadable yields no tokens; the screen reports upstream OCR
    /// failures on its own.
    pub fn from_payload(&self, payload: &str) -> Vec<Token> {
        match serde_json::from_str::<OcrPayload>(payload) {
            Ok(parsed) => self.normalize(&parsed.raw_text),
            Err(err) => {
                log_warn!("ignoring unreadable OCR payload: {err}");
                Vec::new()
            }
        }
    }

    fn keep(&self, piece: &str) -> bool {
        if piece.chars().count() < self.min_token_chars {
            return false;
        }

        let lowered = piece.to_lowercase();
        !self.denylist.iter().any(|label| *label == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn drops_denylisted_labels() {
        let source = TokenSource::default();
        let tokens = source.normalize("Mobile\nJohn Smith\nTel\nAcme Corp");
        assert_eq!(texts(&tokens), vec!["John Smith", "Acme Corp"]);
    }

    #[test]
    fn denylist_is_case_insensitive() {
        let source = TokenSource::default();
        let tokens = source.normalize("MOBILE;e-mail;EMAIL;ext.;Ext;NS.;el;office");
        assert!(tokens.is_empty());
    }

    #[test]
    fn denylist_matches_whole_piece_only() {
        let source = TokenSource::default();
        let tokens = source.normalize("Tel: 555 0100\nMobile Phone");
        assert_eq!(texts(&tokens), vec!["Tel: 555 0100", "Mobile Phone"]);
    }

    #[test]
    fn single_characters_are_dropped() {
        let source = TokenSource::default();
        let tokens = source.normalize("A\nJo\n \n\n,;");
        assert_eq!(texts(&tokens), vec!["Jo"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let source = TokenSource::default();
        assert!(source.normalize("é").is_empty());
        assert_eq!(texts(&source.normalize("Zoë")), vec!["Zoë"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let source = TokenSource::default();
        let tokens = source.normalize("555-0100, Acme; 555-0100\r\nAcme");
        assert_eq!(texts(&tokens), vec!["555-0100", "Acme", "555-0100", "Acme"]);
    }

    #[test]
    fn normalizing_output_again_is_stable() {
        let source = TokenSource::default();
        let first = source.normalize("  Jane Doe ,Office\n+1 555 0100;Ext. \nx\njane@acme.io");
        let joined = texts(&first).join("\n");
        assert_eq!(source.normalize(&joined), first);
    }

    #[test]
    fn custom_settings_apply() {
        let source = TokenSource::new(&TokenSettings {
            denylist: vec!["Fax".into()],
            min_token_chars: 4,
        });
        let tokens = source.normalize("fax\nJoe\nJohn\nMobile");
        assert_eq!(texts(&tokens), vec!["John", "Mobile"]);
    }

    #[test]
    fn payload_is_unwrapped() {
        let source = TokenSource::default();
        let tokens = source.from_payload(r#"{"rawText":"Tel\nJane Doe"}"#);
        assert_eq!(texts(&tokens), vec!["Jane Doe"]);
    }

    #[test]
    fn malformed_payload_gives_no_tokens() {
        let source = TokenSource::default();
        assert!(source.from_payload("not json").is_empty());
        assert!(source.from_payload(r#"{"rawText": 42}"#).is_empty());
        assert!(source.from_payload(r#"{"text": "Jane"}"#).is_empty());
    }
}
