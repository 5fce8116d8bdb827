//! Correctness scoring shared by practice feedback, aggregation and export.

use crate::trial::{GO_KEY, Key, TrialRecord};

/// A go trial is correct when the go key was pressed, a no-go trial when
/// nothing was pressed. Any other key counts as a wrong response.
pub fn is_correct(record: &TrialRecord) -> bool {
    classify(record.is_go, record.response)
}

pub fn classify(is_go: bool, response: Option<Key>) -> bool {
    match response {
        Some(key) => is_go && key == GO_KEY,
        None => !is_go,
    }
}

/// `1` for go trials, `0` for no-go trials.
pub fn trial_type_code(record: &TrialRecord) -> u8 {
    u8::from(record.is_go)
}

/// `1` when the go key was the captured response.
pub fn response_code(record: &TrialRecord) -> u8 {
    u8::from(record.response == Some(GO_KEY))
}

/// Practice feedback shown after the response window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn for_response(is_go: bool, response: Option<Key>) -> Self {
        if classify(is_go, response) {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Incorrect!",
        }
    }

    pub fn color(&self) -> [u8; 4] {
        match self {
            Feedback::Correct => [0, 128, 0, 255],
            Feedback::Incorrect => [255, 0, 0, 255],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stimulus::StimulusWord;
    use crate::trial::TrialSpec;

    fn record(word: StimulusWord, response: Option<Key>) -> TrialRecord {
        TrialRecord::new(&TrialSpec::main(word), response, None)
    }

    #[test]
    fn truth_table() {
        let other = Some(Key::Char('x'));
        assert!(is_correct(&record(StimulusWord::Blauw, Some(GO_KEY))));
        assert!(!is_correct(&record(StimulusWord::Blauw, None)));
        assert!(!is_correct(&record(StimulusWord::Blauw, other)));
        assert!(is_correct(&record(StimulusWord::Rood, None)));
        assert!(!is_correct(&record(StimulusWord::Rood, Some(GO_KEY))));
        assert!(!is_correct(&record(StimulusWord::Rood, other)));
    }

    #[test]
    fn codes() {
        let go_hit = record(StimulusWord::Groen, Some(GO_KEY));
        let nogo_pass = record(StimulusWord::Geel, None);
        assert_eq!((trial_type_code(&go_hit), response_code(&go_hit)), (1, 1));
        assert_eq!(
            (trial_type_code(&nogo_pass), response_code(&nogo_pass)),
            (0, 0)
        );
        let stray = record(StimulusWord::Groen, Some(Key::Enter));
        assert_eq!(response_code(&stray), 0);
    }

    #[test]
    fn feedback_uses_same_predicate() {
        assert_eq!(Feedback::for_response(true, Some(GO_KEY)), Feedback::Correct);
        assert_eq!(Feedback::for_response(true, None), Feedback::Incorrect);
        assert_eq!(Feedback::for_response(false, None), Feedback::Correct);
        assert_eq!(
            Feedback::for_response(false, Some(GO_KEY)),
            Feedback::Incorrect
        );
    }
}
