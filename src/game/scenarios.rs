//! Scenario catalog and selection
//!
//! Six fixed clinical-encounter prompts, three scripted responses each. The
//! catalog is compiled in and never edited by users.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// One scripted response to a scenario.
#[derive(Debug, Clone, Copy)]
pub struct Choice {
    pub text: &'static str,
    /// Point delta applied to the score, -1..2.
    pub delta: i8,
    pub feedback: &'static str,
}

/// A fixed clinical-encounter prompt with three scripted responses.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub id: &'static str,
    pub prompt: &'static str,
    pub choices: [Choice; 3],
}

/// All practice scenarios.
pub static SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "s1",
        prompt: "Clinician: \"It is probably just stress. Let us not overreact.\" You have had recurrent chest pain with palpitations.",
        choices: [
            Choice {
                text: "Describe a concrete episode with duration and impact, and request a specific test.",
                delta: 2,
                feedback: "Specifics and a clear ask increase the chance of action.",
            },
            Choice {
                text: "Say you will wait it out and come back later.",
                delta: -1,
                feedback: "Delays can prolong harm when red flags exist.",
            },
            Choice {
                text: "Repeat that it feels serious, without details.",
                delta: 0,
                feedback: "Feelings matter, and pairing them with concrete data is stronger.",
            },
        ],
    },
    Scenario {
        id: "s2",
        prompt: "Clinician: \"You are too young for heart issues.\" You had a fainting episode last week.",
        choices: [
            Choice {
                text: "State your risk factors and ask for an EKG referral.",
                delta: 2,
                feedback: "Naming risks plus a specific test is assertive and reasonable.",
            },
            Choice {
                text: "Ask if drinking more water will fix it.",
                delta: -1,
                feedback: "Hydration can help some issues but does not exclude cardiac causes.",
            },
            Choice {
                text: "Request documentation that concerns were raised and declined.",
                delta: 1,
                feedback: "Creating a paper trail can prompt reconsideration.",
            },
        ],
    },
    Scenario {
        id: "s3",
        prompt: "Clinician: \"Maybe you are just sensitive.\"",
        choices: [
            Choice {
                text: "Share symptom logs with timestamps and severity, and ask to review patterns.",
                delta: 2,
                feedback: "Evidence counters minimization.",
            },
            Choice {
                text: "Stay silent to avoid conflict.",
                delta: -1,
                feedback: "Silence can be interpreted as acceptance.",
            },
            Choice {
                text: "Ask to speak with a different provider or patient advocate.",
                delta: 1,
                feedback: "Escalation pathways exist; using them is valid.",
            },
        ],
    },
    Scenario {
        id: "s4",
        prompt: "Clinician interrupts you repeatedly.",
        choices: [
            Choice {
                text: "Calmly say you want two uninterrupted minutes to summarize key symptoms.",
                delta: 2,
                feedback: "Setting boundaries can improve information flow.",
            },
            Choice {
                text: "Talk faster and accept interruptions.",
                delta: -1,
                feedback: "Important details may be missed.",
            },
            Choice {
                text: "Hand over a written one-page summary.",
                delta: 1,
                feedback: "Structured summaries can help when time is tight.",
            },
        ],
    },
    Scenario {
        id: "s5",
        prompt: "Clinician: \"Online forums exaggerate.\" You have found many similar cases.",
        choices: [
            Choice {
                text: "Cite a guideline or study and ask how your case fits it.",
                delta: 2,
                feedback: "Grounding in literature reframes the discussion.",
            },
            Choice {
                text: "Argue about social media credibility.",
                delta: 0,
                feedback: "It may not move the clinical plan.",
            },
            Choice {
                text: "Ask for a second opinion referral.",
                delta: 1,
                feedback: "Getting fresh eyes can help.",
            },
        ],
    },
    Scenario {
        id: "s6",
        prompt: "Discharge plan omits your primary concern.",
        choices: [
            Choice {
                text: "Request the concern be added to the discharge summary.",
                delta: 1,
                feedback: "Documentation matters for continuity.",
            },
            Choice {
                text: "Accept the plan unchanged.",
                delta: -1,
                feedback: "Unaddressed concerns can persist.",
            },
            Choice {
                text: "Ask for clear return precautions and thresholds.",
                delta: 2,
                feedback: "Knowing when to return can prevent harm.",
            },
        ],
    },
];

impl Scenario {
    /// Look up a scenario by id.
    pub fn get(id: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|s| s.id == id)
    }

    /// Total number of scenarios in the catalog.
    pub fn total_count() -> usize {
        SCENARIOS.len()
    }

    /// The highest point delta among this scenario's choices.
    pub fn best_delta(&self) -> i8 {
        self.choices.iter().map(|c| c.delta).max().unwrap_or(0)
    }
}

/// Pick a scenario uniformly at random among those not yet played.
///
/// Returns `None` once every scenario has been played - a terminal state for
/// the current play-through until the record is reset.
pub fn next_scenario<R: Rng + ?Sized>(
    played: &BTreeSet<String>,
    rng: &mut R,
) -> Option<&'static Scenario> {
    let pool: Vec<&'static Scenario> = SCENARIOS
        .iter()
        .filter(|s| !played.contains(s.id))
        .collect();
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(Scenario::get("s3").unwrap().id, "s3");
        assert!(Scenario::get("nope").is_none());
        assert_eq!(Scenario::total_count(), 6);
    }

    #[test]
    fn test_every_scenario_has_a_best_choice() {
        for s in SCENARIOS {
            assert_eq!(s.best_delta(), 2, "scenario {}", s.id);
        }
    }

    #[test]
    fn test_next_scenario_skips_played() {
        let mut rng = StdRng::seed_from_u64(7);
        let played: BTreeSet<String> = ["s1", "s2", "s3", "s4", "s5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for _ in 0..20 {
            let s = next_scenario(&played, &mut rng).unwrap();
            assert_eq!(s.id, "s6");
        }
    }

    #[test]
    fn test_next_scenario_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        let played: BTreeSet<String> = SCENARIOS.iter().map(|s| s.id.to_string()).collect();
        assert!(next_scenario(&played, &mut rng).is_none());
    }
}
