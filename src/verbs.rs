// ============================================
// src/verbs.rs
// Verb + subject drill for the imperfect tense ("interrupciones")
// ============================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SequencerError, SequencerResult};
use crate::rng::RandomSource;
use crate::session::Draw;

/// One entry of `ESP-verbs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    pub infinitive: String,
    pub english: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub conjugations_imperfect: HashMap<String, String>, // pronoun -> form
}

/// Subject pronouns, including the gender-neutral ones.
pub const SUBJECTS: &[&str] = &[
    "yo", "tú", "él", "ella", "elle", "usted", "nosotros", "nosotras", "nosotres", "vosotros",
    "vosotras", "ellos", "ellas", "elles", "ustedes",
];

impl Verb {
    /// Imperfect form for `pronoun`. Content without a `nosotres` form
    /// borrows the `nosotros` one.
    pub fn imperfect(&self, pronoun: &str) -> Option<&str> {
        let forms = &self.conjugations_imperfect;
        forms
            .get(pronoun)
            .or_else(|| match pronoun {
                "nosotres" => forms.get("nosotros"),
                _ => None,
            })
            .map(String::as_str)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sentence start for the answer: "Bailaba" for yo, "Ellos bailaban" otherwise.
pub fn format_answer(pronoun: &str, conjugation: &str) -> String {
    if pronoun == "yo" {
        capitalize(conjugation)
    } else {
        format!("{} {}", capitalize(pronoun), conjugation)
    }
}

/// A verb and subject to conjugate, cut off by an interruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interruption {
    pub verb: Verb,
    pub subject: &'static str,
    pub interruption: String,
}

impl Interruption {
    pub fn prompt(&self) -> String {
        format!(
            "_______ {}.\nSujeto: {} | Verbo: {}",
            self.interruption, self.subject, self.verb.infinitive
        )
    }

    /// `None` when the content has no form for the subject.
    pub fn answer(&self) -> Option<String> {
        self.verb
            .imperfect(self.subject)
            .map(|form| format_answer(self.subject, form))
    }
}

/// Fresh uniform picks of verb, subject and interruption on every draw.
#[derive(Debug, Clone)]
pub struct InterruptionSource<R> {
    verbs: Vec<Verb>,
    interruptions: Vec<String>,
    rng: R,
}

impl<R: RandomSource> InterruptionSource<R> {
    pub fn new(verbs: Vec<Verb>, interruptions: Vec<String>, rng: R) -> Self {
        Self {
            verbs,
            interruptions,
            rng,
        }
    }
}

impl<R: RandomSource> Draw for InterruptionSource<R> {
    type Item = Interruption;

    fn draw(&mut self) -> SequencerResult<Interruption> {
        if self.verbs.is_empty() || self.interruptions.is_empty() {
            return Err(SequencerError::EmptyPool);
        }
        let verb = self.verbs[self.rng.index(self.verbs.len())].clone();
        let subject = SUBJECTS[self.rng.index(SUBJECTS.len())];
        let interruption = self.interruptions[self.rng.index(self.interruptions.len())].clone();
        Ok(Interruption {
            verb,
            subject,
            interruption,
        })
    }
}

// MARK: fallback content

pub fn fallback_verbs() -> Vec<Verb> {
    let forms = [
        ("yo", "bailaba"),
        ("tú", "bailabas"),
        ("él", "bailaba"),
        ("ella", "bailaba"),
        ("elle", "bailaba"),
        ("usted", "bailaba"),
        ("nosotros", "bailábamos"),
        ("nosotras", "bailábamos"),
        ("nosotres", "bailábamos"),
        ("vosotros", "bailabais"),
        ("vosotras", "bailabais"),
        ("ellos", "bailaban"),
        ("ellas", "bailaban"),
        ("elles", "bailaban"),
        ("ustedes", "bailaban"),
    ];
    vec![Verb {
        infinitive: "bailar".to_string(),
        english: "to dance".to_string(),
        categories: vec!["regular ar verbs".to_string()],
        conjugations_imperfect: forms
            .iter()
            .map(|(p, f)| (p.to_string(), f.to_string()))
            .collect(),
    }]
}

pub fn fallback_interruptions() -> Vec<String> {
    ["cuando sonó el teléfono", "cuando llegaron mis amigos", "cuando empezó a llover"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
