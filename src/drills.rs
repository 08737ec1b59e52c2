// ============================================
// src/drills.rs
// Practice activities built on the sequencer
// ============================================

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::SequencerResult;
use crate::filter::{ConstraintFilter, DEFAULT_MAX_ATTEMPTS};
use crate::loader::{conversation_or_fallback, load_or_fallback};
use crate::questions::{
    ConversationContent, MEXICAN_STATES, MexicanState, Scenario, ThenAndNow, capital_index,
    fallback_conversation, fallback_courtesy, fallback_then_and_now, find_state,
};
use crate::sampler::NonRepeatingSampler;
use crate::session::Session;
use crate::verbs::{InterruptionSource, Verb, fallback_interruptions, fallback_verbs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Activity {
    /// Expresiones de cortesía
    Courtesy,
    /// Scenario practice from a custom document
    Scenarios,
    /// Imperfect tense, "antes y ahora"
    ThenAndNow,
    /// Imperfect tense, interrupted actions
    Interruptions,
    /// Conversation starters
    Conversation,
    /// States of Mexico
    States,
}

impl Activity {
    pub const ALL: [Activity; 6] = [
        Activity::Courtesy,
        Activity::Scenarios,
        Activity::ThenAndNow,
        Activity::Interruptions,
        Activity::Conversation,
        Activity::States,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Activity::Courtesy => "Expresiones de cortesía",
            Activity::Scenarios => "Escenarios",
            Activity::ThenAndNow => "Antes y ahora",
            Activity::Interruptions => "Interrupciones",
            Activity::Conversation => "Para iniciar una conversación",
            Activity::States => "Estados de México",
        }
    }

    /// The activity after this one, wrapping around.
    pub fn cycle(self) -> Activity {
        let i = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Where the content documents live.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub data_dir: PathBuf,
    pub scenarios_file: Option<PathBuf>, // overrides the generic scenario document
}

impl ContentPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            scenarios_file: None,
        }
    }

    fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn courtesy(&self) -> PathBuf {
        self.file("courtesy-expressions.json")
    }

    pub fn scenarios(&self) -> PathBuf {
        self.scenarios_file
            .clone()
            .unwrap_or_else(|| self.file("scenario-practice.json"))
    }

    pub fn then_and_now(&self) -> PathBuf {
        self.file("imperfect-then-now.json")
    }

    pub fn conversation(&self) -> PathBuf {
        self.file("conversation-starters.json")
    }

    pub fn verbs(&self) -> PathBuf {
        self.file("ESP-verbs.json")
    }

    pub fn interruptions(&self) -> PathBuf {
        self.file("imperfect-interruptions.json")
    }
}

/// Everything loaded at startup. Never changes afterwards.
#[derive(Debug, Clone)]
pub struct Library {
    pub courtesy: Vec<Scenario>,
    pub scenarios: Vec<Scenario>,
    pub then_and_now: Vec<ThenAndNow>,
    pub conversation: ConversationContent,
    pub verbs: Vec<Verb>,
    pub interruptions: Vec<String>,
}

impl Library {
    pub fn load(paths: &ContentPaths) -> Self {
        Self {
            courtesy: load_or_fallback(&paths.courtesy(), "scenarios", fallback_courtesy),
            scenarios: load_or_fallback(&paths.scenarios(), "scenarios", fallback_courtesy),
            then_and_now: load_or_fallback(
                &paths.then_and_now(),
                "scenarios",
                fallback_then_and_now,
            ),
            conversation: conversation_or_fallback(&paths.conversation(), fallback_conversation),
            verbs: load_or_fallback(&paths.verbs(), "verbs", fallback_verbs),
            interruptions: load_or_fallback(
                &paths.interruptions(),
                "interruptions",
                fallback_interruptions,
            ),
        }
    }

    /// Built-in content only.
    pub fn builtin() -> Self {
        Self {
            courtesy: fallback_courtesy(),
            scenarios: fallback_courtesy(),
            then_and_now: fallback_then_and_now(),
            conversation: fallback_conversation(),
            verbs: fallback_verbs(),
            interruptions: fallback_interruptions(),
        }
    }
}

/// What the host shows for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub prompt: String,
    pub answer: String,
}

/// Result of naming a state in the states drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Correct { name: &'static str },
    /// `guessed` is the state that was named instead, if it exists.
    Incorrect { guessed: Option<&'static str> },
}

impl Guess {
    pub fn feedback(self) -> String {
        match self {
            Guess::Correct { name } => format!("¡Correcto! That's {name}!"),
            Guess::Incorrect { guessed: Some(name) } => format!("That's {name}. Try again!"),
            Guess::Incorrect { guessed: None } => "No such state. Try again!".to_string(),
        }
    }
}

type Sampled<T> = Session<NonRepeatingSampler<T, StdRng>>;

/// One running activity.
pub enum Drill {
    Courtesy(Sampled<Scenario>),
    Scenarios(Sampled<Scenario>),
    ThenAndNow(Sampled<ThenAndNow>),
    Interruptions(Session<InterruptionSource<StdRng>>),
    Conversation(Session<ConstraintFilter<String, StdRng>>),
    States(Sampled<MexicanState>),
}

fn sampled<T: Clone>(
    pool: Vec<T>,
    pin: Option<usize>,
    rng: StdRng,
) -> SequencerResult<Sampled<T>> {
    let mut session = Session::new(NonRepeatingSampler::new(rng));
    session.start_or_reset(pool, pin)?;
    Ok(session)
}

impl Drill {
    /// Starts a fresh run of `activity` and draws its first item.
    pub fn start(
        activity: Activity,
        library: &Library,
        rng: StdRng,
        max_attempts: u32,
    ) -> SequencerResult<Self> {
        tracing::debug!(?activity, "starting drill");
        let drill = match activity {
            Activity::Courtesy => {
                Drill::Courtesy(sampled(library.courtesy.clone(), None, rng)?)
            }
            Activity::Scenarios => {
                Drill::Scenarios(sampled(library.scenarios.clone(), None, rng)?)
            }
            Activity::ThenAndNow => {
                Drill::ThenAndNow(sampled(library.then_and_now.clone(), None, rng)?)
            }
            Activity::Interruptions => {
                let source = InterruptionSource::new(
                    library.verbs.clone(),
                    library.interruptions.clone(),
                    rng,
                );
                let mut session = Session::new(source);
                session.start()?;
                Drill::Interruptions(session)
            }
            Activity::Conversation => {
                let content = library.conversation.clone();
                let filter = ConstraintFilter::new(content.pools, content.rules, rng)
                    .with_max_attempts(max_attempts);
                let mut session = Session::new(filter);
                session.start()?;
                Drill::Conversation(session)
            }
            Activity::States => {
                Drill::States(sampled(MEXICAN_STATES.to_vec(), capital_index(), rng)?)
            }
        };
        Ok(drill)
    }

    /// Same as `start` with the default attempt budget and a seeded generator.
    pub fn seeded(activity: Activity, library: &Library, seed: u64) -> SequencerResult<Self> {
        Self::start(activity, library, StdRng::seed_from_u64(seed), DEFAULT_MAX_ATTEMPTS)
    }

    pub fn activity(&self) -> Activity {
        match self {
            Drill::Courtesy(_) => Activity::Courtesy,
            Drill::Scenarios(_) => Activity::Scenarios,
            Drill::ThenAndNow(_) => Activity::ThenAndNow,
            Drill::Interruptions(_) => Activity::Interruptions,
            Drill::Conversation(_) => Activity::Conversation,
            Drill::States(_) => Activity::States,
        }
    }

    pub fn advance(&mut self) -> SequencerResult<()> {
        match self {
            Drill::Courtesy(s) | Drill::Scenarios(s) => s.advance().map(|_| ()),
            Drill::ThenAndNow(s) => s.advance().map(|_| ()),
            Drill::Interruptions(s) => s.advance().map(|_| ()),
            Drill::Conversation(s) => s.advance().map(|_| ()),
            Drill::States(s) => s.advance().map(|_| ()),
        }
    }

    pub fn card(&self) -> Option<Card> {
        match self {
            Drill::Courtesy(s) | Drill::Scenarios(s) => s.current().map(|item| Card {
                prompt: item.scenario.clone(),
                answer: item.responses.clone(),
            }),
            Drill::ThenAndNow(s) => s.current().map(|item| Card {
                prompt: format!("{} ______", item.scenario),
                answer: format!("{}...", item.response),
            }),
            Drill::Interruptions(s) => s.current().map(|item| Card {
                prompt: item.prompt(),
                answer: match item.answer() {
                    Some(answer) => format!(
                        "{answer}...\nInfinitivo: {}\nSignificado: {}",
                        item.verb.infinitive, item.verb.english
                    ),
                    None => format!("Sin conjugación para {}", item.subject),
                },
            }),
            Drill::Conversation(s) => s.current().map(|combo| Card {
                prompt: format!("Persona 1: Hola. {}", combo.question),
                answer: format!(
                    "Persona 2: {} {}\nPersona 1: {}",
                    combo.answer, combo.follow_up, combo.follow_up_reply
                ),
            }),
            Drill::States(s) => s.current().map(|state| Card {
                prompt: state.name.to_string(),
                answer: format!("¡Correcto! Es {} ({}).", state.name, state.id),
            }),
        }
    }

    /// Checks a state id or name against the state being asked.
    ///
    /// `None` outside the states drill.
    pub fn guess_state(&self, guess: &str) -> Option<Guess> {
        let Drill::States(s) = self else {
            return None;
        };
        let target = s.current()?;
        let named = find_state(guess);
        let result = match named {
            Some(state) if state.id == target.id => Guess::Correct { name: target.name },
            _ => Guess::Incorrect {
                guessed: named.map(|state| state.name),
            },
        };
        tracing::debug!(guess, ?result, "state guess");
        Some(result)
    }

    /// `(asked, total)` for activities that run through a fixed set once.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self {
            Drill::States(s) => Some((s.source().lap_position(), s.source().len())),
            _ => None,
        }
    }

    /// True when a run-through activity has asked every item.
    pub fn finished(&self) -> bool {
        match self {
            Drill::States(s) => s.source().lap_complete(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn activities_cycle_through_all() {
        let mut seen = HashSet::new();
        let mut a = Activity::Courtesy;
        for _ in 0..Activity::ALL.len() {
            seen.insert(a);
            a = a.cycle();
        }
        assert_eq!(seen.len(), Activity::ALL.len());
        assert_eq!(a, Activity::Courtesy);
    }

    #[test]
    fn every_activity_starts_with_builtin_content() {
        let library = Library::builtin();
        for activity in Activity::ALL {
            let drill = Drill::seeded(activity, &library, 1).unwrap();
            assert_eq!(drill.activity(), activity);
            assert!(drill.card().is_some());
        }
    }

    #[test]
    fn states_start_with_the_capital_and_finish() {
        let library = Library::builtin();
        let mut drill = Drill::seeded(Activity::States, &library, 9).unwrap();
        assert_eq!(drill.card().unwrap().prompt, "Ciudad de México");
        assert_eq!(drill.progress(), Some((1, 32)));

        let mut names = HashSet::new();
        names.insert(drill.card().unwrap().prompt);
        while !drill.finished() {
            drill.advance().unwrap();
            names.insert(drill.card().unwrap().prompt);
        }
        assert_eq!(names.len(), 32);
        assert_eq!(drill.progress(), Some((32, 32)));
    }

    #[test]
    fn courtesy_shows_every_scenario_before_repeating() {
        let library = Library::builtin();
        let mut drill = Drill::seeded(Activity::Courtesy, &library, 3).unwrap();
        let mut prompts = vec![drill.card().unwrap().prompt];
        for _ in 1..library.courtesy.len() {
            drill.advance().unwrap();
            prompts.push(drill.card().unwrap().prompt);
        }
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), library.courtesy.len());
    }

    #[test]
    fn states_check_guesses_by_id_or_name() {
        let library = Library::builtin();
        let drill = Drill::seeded(Activity::States, &library, 9).unwrap();
        let capital = Guess::Correct {
            name: "Ciudad de México",
        };
        assert_eq!(drill.guess_state("MXCMX"), Some(capital));
        assert_eq!(drill.guess_state("ciudad de méxico"), Some(capital));

        let wrong = drill.guess_state("Jalisco").unwrap();
        assert_eq!(wrong, Guess::Incorrect { guessed: Some("Jalisco") });
        assert_eq!(wrong.feedback(), "That's Jalisco. Try again!");
        assert_eq!(
            drill.guess_state("Atlantis"),
            Some(Guess::Incorrect { guessed: None })
        );
    }

    #[test]
    fn only_the_states_drill_takes_guesses() {
        let library = Library::builtin();
        let drill = Drill::seeded(Activity::Courtesy, &library, 9).unwrap();
        assert_eq!(drill.guess_state("Jalisco"), None);
    }

    #[test]
    fn interruptions_show_the_conjugated_answer() {
        let library = Library::builtin();
        let mut drill = Drill::seeded(Activity::Interruptions, &library, 4).unwrap();
        for _ in 0..20 {
            let card = drill.card().unwrap();
            assert!(card.prompt.starts_with("_______ cuando"));
            assert!(card.prompt.ends_with("Verbo: bailar"));
            assert!(card.answer.to_lowercase().contains("bail"));
            assert!(card.answer.ends_with("Significado: to dance"));
            drill.advance().unwrap();
        }
    }

    #[test]
    fn interruptions_need_verbs() {
        let mut library = Library::builtin();
        library.verbs.clear();
        assert!(Drill::seeded(Activity::Interruptions, &library, 4).is_err());
    }

    #[test]
    fn conversation_respects_builtin_rule() {
        let library = Library::builtin();
        let mut drill = Drill::seeded(Activity::Conversation, &library, 5).unwrap();
        for _ in 0..100 {
            let card = drill.card().unwrap();
            assert!(!(card.prompt.contains("¿Qué tal?") && card.answer.contains("¿Y usted?")));
            drill.advance().unwrap();
        }
    }
}
