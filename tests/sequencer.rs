//! End-to-end behaviour of the sampler, filter and session through the
//! public API.

use std::collections::HashSet;

use practica::rng::seeded;
use practica::{
    Combo, ComboPools, ConstraintFilter, DEFAULT_MAX_ATTEMPTS, NonRepeatingSampler, Rule, RuleSet,
    SequencerError, Session,
};

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn laps_cover_the_pool_for_many_seeds() {
    for seed in 0..20 {
        for n in [2usize, 3, 7, 32] {
            let pool: Vec<usize> = (0..n).collect();
            let mut sampler = NonRepeatingSampler::with_pool(pool, seeded(seed));
            for _lap in 0..4 {
                let lap: Vec<usize> = (0..n).map(|_| sampler.next_index().unwrap()).collect();
                // consecutive draws inside a lap differ
                for pair in lap.windows(2) {
                    assert_ne!(pair[0], pair[1]);
                }
                let distinct: HashSet<_> = lap.iter().copied().collect();
                assert_eq!(distinct.len(), n);
            }
        }
    }
}

#[test]
fn single_item_pool_always_returns_it() {
    let mut sampler = NonRepeatingSampler::with_pool(strings(&["¡Buen provecho!"]), seeded(2));
    for _ in 0..10 {
        assert_eq!(sampler.next().unwrap(), "¡Buen provecho!");
    }
}

#[test]
fn pinned_first_for_every_index() {
    let pool = strings(&["Jalisco", "Oaxaca", "Ciudad de México", "Sonora"]);
    for i in 0..pool.len() {
        let mut sampler = NonRepeatingSampler::new(seeded(i as u64));
        sampler.reset(pool.clone(), Some(i)).unwrap();
        assert_eq!(sampler.next().unwrap(), &pool[i]);
    }
}

#[test]
fn empty_pool_is_reported() {
    let mut sampler = NonRepeatingSampler::<String, _>::new(seeded(0));
    assert_eq!(sampler.next().unwrap_err(), SequencerError::EmptyPool);
}

#[test]
fn fully_covering_rule_exhausts_the_budget() {
    let pools = ComboPools {
        questions: strings(&["A"]),
        answers: strings(&["B", "C"]),
        follow_ups: strings(&["D"]),
        follow_up_replies: strings(&["E"]),
    };
    let rules = RuleSet::new(vec![Rule::default().questions(strings(&["A"]))]);
    let mut filter = ConstraintFilter::new(pools, rules, seeded(11));
    assert_eq!(
        filter.generate().unwrap_err(),
        SequencerError::ConstraintExhausted {
            attempts: DEFAULT_MAX_ATTEMPTS
        }
    );
}

#[test]
fn no_rules_never_needs_a_retry() {
    let pools = ComboPools {
        questions: strings(&["Q1", "Q2", "Q3"]),
        answers: strings(&["A1", "A2"]),
        follow_ups: strings(&["F1"]),
        follow_up_replies: strings(&["R1"]),
    };
    let mut filter =
        ConstraintFilter::new(pools, RuleSet::default(), seeded(3)).with_max_attempts(1);
    for _ in 0..100 {
        filter.generate().unwrap();
    }
}

#[test]
fn disallowed_tuple_is_never_generated() {
    let pools = ComboPools {
        questions: strings(&["Q1", "Q2"]),
        answers: strings(&["A1", "A2"]),
        follow_ups: strings(&["F1"]),
        follow_up_replies: strings(&["R1"]),
    };
    let rules: RuleSet<String> =
        serde_json::from_str(r#"[{"questions": ["Q1"], "answers": ["A1"]}]"#).unwrap();
    let mut filter = ConstraintFilter::new(pools, rules, seeded(2024));

    let banned = Combo {
        question: "Q1".to_string(),
        answer: "A1".to_string(),
        follow_up: "F1".to_string(),
        follow_up_reply: "R1".to_string(),
    };
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let combo = filter.generate().unwrap();
        assert_ne!(combo, banned);
        seen.insert((combo.question, combo.answer));
    }
    let expected: HashSet<(String, String)> = [("Q1", "A2"), ("Q2", "A1"), ("Q2", "A2")]
        .into_iter()
        .map(|(q, a)| (q.to_string(), a.to_string()))
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn session_current_matches_start() {
    let mut session = Session::new(NonRepeatingSampler::new(seeded(77)));
    let started = session
        .start_or_reset(strings(&["ayer", "hoy", "mañana"]), None)
        .unwrap()
        .clone();
    assert_eq!(session.current(), Some(&started));

    let next = session.advance().unwrap().clone();
    assert_ne!(next, started);
    assert_eq!(session.current(), Some(&next));
}
