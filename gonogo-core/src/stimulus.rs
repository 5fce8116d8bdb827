use serde::{Deserialize, Serialize};

/// The closed set of word stimuli shown during the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StimulusWord {
    Blauw,
    Groen,
    Rood,
    Geel,
}

/// Words that call for a keypress.
pub const GO_WORDS: [StimulusWord; 2] = [StimulusWord::Blauw, StimulusWord::Groen];

/// Words that call for withholding the keypress.
pub const NO_GO_WORDS: [StimulusWord; 2] = [StimulusWord::Rood, StimulusWord::Geel];

impl StimulusWord {
    pub const ALL: [StimulusWord; 4] = [
        StimulusWord::Blauw,
        StimulusWord::Groen,
        StimulusWord::Rood,
        StimulusWord::Geel,
    ];

    /// Text shown on screen.
    pub fn label(&self) -> &'static str {
        match self {
            StimulusWord::Blauw => "BLAUW",
            StimulusWord::Groen => "GROEN",
            StimulusWord::Rood => "ROOD",
            StimulusWord::Geel => "GEEL",
        }
    }

    /// Go/no-go polarity is fixed per word.
    pub fn is_go(&self) -> bool {
        matches!(self, StimulusWord::Blauw | StimulusWord::Groen)
    }

    /// Display color as RGBA.
    pub fn color(&self) -> [u8; 4] {
        match self {
            StimulusWord::Blauw => [0, 0, 255, 255],
            StimulusWord::Groen => [0, 128, 0, 255],
            StimulusWord::Rood => [255, 0, 0, 255],
            StimulusWord::Geel => [255, 255, 0, 255],
        }
    }
}

impl std::fmt::Display for StimulusWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_matches_word_pools() {
        assert!(GO_WORDS.iter().all(StimulusWord::is_go));
        assert!(NO_GO_WORDS.iter().all(|w| !w.is_go()));
    }

    #[test]
    fn serializes_as_uppercase_label() {
        for word in StimulusWord::ALL {
            let json = serde_json::to_string(&word).unwrap();
            assert_eq!(json, format!("\"{}\"", word.label()));
        }
    }
}
