// ============================================
// src/filter.rs
// Constraint filter: random four-part combos minus disallowed ones
// ============================================

use serde::{Deserialize, Serialize};

use crate::error::{SequencerError, SequencerResult};
use crate::rng::RandomSource;

/// Attempt budget used by the conversation drill.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// One generated exchange: question, answer, follow-up and its reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combo<T> {
    pub question: T,
    pub answer: T,
    pub follow_up: T,
    pub follow_up_reply: T,
}

/// The four independent pools a combo is drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboPools<T> {
    pub questions: Vec<T>,
    pub answers: Vec<T>,
    pub follow_ups: Vec<T>,
    pub follow_up_replies: Vec<T>,
}

impl<T> ComboPools<T> {
    fn any_empty(&self) -> bool {
        self.questions.is_empty()
            || self.answers.is_empty()
            || self.follow_ups.is_empty()
            || self.follow_up_replies.is_empty()
    }
}

/// A disallowed combination.
///
/// Each field lists the values it matches; `None` matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule<T> {
    #[serde(rename = "questions", skip_serializing_if = "Option::is_none")]
    pub question: Option<Vec<T>>,
    #[serde(rename = "answers", skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<T>>,
    #[serde(rename = "throwbacks", skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<Vec<T>>,
    #[serde(rename = "throwback-answers", skip_serializing_if = "Option::is_none")]
    pub follow_up_reply: Option<Vec<T>>,
}

impl<T> Default for Rule<T> {
    fn default() -> Self {
        Self {
            question: None,
            answer: None,
            follow_up: None,
            follow_up_reply: None,
        }
    }
}

fn field_matches<T: PartialEq>(allowed: &Option<Vec<T>>, value: &T) -> bool {
    allowed.as_ref().is_none_or(|set| set.contains(value))
}

impl<T: PartialEq> Rule<T> {
    pub fn questions(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.question = Some(values.into_iter().collect());
        self
    }

    pub fn answers(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.answer = Some(values.into_iter().collect());
        self
    }

    pub fn follow_ups(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.follow_up = Some(values.into_iter().collect());
        self
    }

    pub fn follow_up_replies(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.follow_up_reply = Some(values.into_iter().collect());
        self
    }

    /// True when every field the rule names contains the combo's value.
    pub fn matches(&self, combo: &Combo<T>) -> bool {
        field_matches(&self.question, &combo.question)
            && field_matches(&self.answer, &combo.answer)
            && field_matches(&self.follow_up, &combo.follow_up)
            && field_matches(&self.follow_up_reply, &combo.follow_up_reply)
    }
}

/// A set of disallowed combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T: PartialEq> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// True when any rule matches the combo.
    pub fn rejects(&self, combo: &Combo<T>) -> bool {
        self.rules.iter().any(|rule| rule.matches(combo))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Draws combos uniformly from four pools until one passes the rule set.
///
/// Draws are plain uniform picks, so the same combo can come up twice in a
/// row. After `max_attempts` rejected draws the filter gives up instead of
/// returning a disallowed combo.
#[derive(Debug, Clone)]
pub struct ConstraintFilter<T, R> {
    pools: ComboPools<T>,
    rules: RuleSet<T>,
    max_attempts: u32,
    rng: R,
}

impl<T: Clone + PartialEq, R: RandomSource> ConstraintFilter<T, R> {
    pub fn new(pools: ComboPools<T>, rules: RuleSet<T>, rng: R) -> Self {
        Self {
            pools,
            rules,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng,
        }
    }

    /// Overrides the attempt budget. Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn pools(&self) -> &ComboPools<T> {
        &self.pools
    }

    pub fn rules(&self) -> &RuleSet<T> {
        &self.rules
    }

    fn pick(rng: &mut R, pool: &[T]) -> T {
        pool[rng.index(pool.len())].clone()
    }

    fn draw_once(&mut self) -> Combo<T> {
        Combo {
            question: Self::pick(&mut self.rng, &self.pools.questions),
            answer: Self::pick(&mut self.rng, &self.pools.answers),
            follow_up: Self::pick(&mut self.rng, &self.pools.follow_ups),
            follow_up_reply: Self::pick(&mut self.rng, &self.pools.follow_up_replies),
        }
    }

    /// Draws the first allowed combo within the attempt budget.
    pub fn generate(&mut self) -> SequencerResult<Combo<T>> {
        if self.pools.any_empty() {
            return Err(SequencerError::EmptyPool);
        }

        for attempt in 1..=self.max_attempts {
            let combo = self.draw_once();
            if !self.rules.rejects(&combo) {
                return Ok(combo);
            }
            tracing::trace!(attempt, "combination rejected");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            rules = self.rules.len(),
            "no allowed combination within the attempt budget"
        );
        Err(SequencerError::ConstraintExhausted {
            attempts: self.max_attempts,
        })
    }
}
