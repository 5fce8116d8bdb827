//! Participant-facing text for the non-trial phases.

use crate::summary::SessionSummary;

pub const PARTICIPANT_PROMPT: &str = "Voer hier je deelnemer ID in:";

pub const WELCOME: &str =
    "Welkom bij dit experiment, druk op een willekeurige toets om te beginnen.";

pub const INSTRUCTIONS: &str = "\
In dit experiment zie je steeds verschillende woorden.
Als je op het scherm 'BLAUW' of 'GROEN' ziet, druk dan zo snel mogelijk op spatie.
Als je het woord 'ROOD' of 'GEEL' ziet, druk NIET op spatie en wacht op het volgende woord.
Je krijgt eerst 10 oefenrondes.
In dit experiment is zowel snelheid als nauwkeurigheid van belang!
Druk op een willekeurige toets om met het experiment te beginnen.";

pub const PRACTICE_END: &str = "\
Je hebt de oefenrondes voltooid.
Het hoofdexperiment zal nu beginnen.
Druk op een willekeurige toets om te beginnen.";

pub fn debrief(summary: &SessionSummary) -> String {
    format!(
        "Bedankt voor het meedoen!\n\
         Het experiment is nu voltooid.\n\
         Wacht tot de data is gedownload, daarna kan je dit tabblad sluiten.\n\
         Gemiddelde RT voor GO-trials: {:.2} ms\n\
         Gemiddelde nauwkeurigheid: {:.2}%",
        summary.mean_go_rt_ms,
        summary.accuracy_percent()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debrief_formats_two_decimals() {
        let summary = SessionSummary {
            trials: 4,
            correct: 3,
            go_trials: 2,
            mean_go_rt_ms: 300.0,
            accuracy: 0.75,
        };
        let text = debrief(&summary);
        assert!(text.contains("Gemiddelde RT voor GO-trials: 300.00 ms"));
        assert!(text.contains("Gemiddelde nauwkeurigheid: 75.00%"));
    }
}
