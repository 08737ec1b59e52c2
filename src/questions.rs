// ============================================
// src/questions.rs
// Practice content: document models and built-in fallback content
// ============================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::{ComboPools, Rule, RuleSet};

/// A situation and the expressions that fit it
/// (courtesy expressions and the generic scenario drills).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario: String,
    pub responses: String, // alternatives separated by " | "
}

/// "Antes y ahora" prompt for the imperfect tense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThenAndNow {
    pub scenario: String,
    pub response: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// A state on the map of Mexico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MexicanState {
    pub id: &'static str,   // map id
    pub name: &'static str, // display name
}

/// Map id of Ciudad de México, always asked first.
pub const CAPITAL_ID: &str = "MXCMX";

/// All 32 federal entities.
pub const MEXICAN_STATES: &[MexicanState] = &[
    MexicanState { id: "MXAGU", name: "Aguascalientes" },
    MexicanState { id: "MXBCN", name: "Baja California" },
    MexicanState { id: "MXBCS", name: "Baja California Sur" },
    MexicanState { id: "MXCAM", name: "Campeche" },
    MexicanState { id: "MXCOA", name: "Coahuila" },
    MexicanState { id: "MXCOL", name: "Colima" },
    MexicanState { id: "MXCHP", name: "Chiapas" },
    MexicanState { id: "MXCHH", name: "Chihuahua" },
    MexicanState { id: "MXCMX", name: "Ciudad de México" },
    MexicanState { id: "MXDUR", name: "Durango" },
    MexicanState { id: "MXGUA", name: "Guanajuato" },
    MexicanState { id: "MXGRO", name: "Guerrero" },
    MexicanState { id: "MXHID", name: "Hidalgo" },
    MexicanState { id: "MXJAL", name: "Jalisco" },
    MexicanState { id: "MXMEX", name: "Estado de México" },
    MexicanState { id: "MXMIC", name: "Michoacán" },
    MexicanState { id: "MXMOR", name: "Morelos" },
    MexicanState { id: "MXNAY", name: "Nayarit" },
    MexicanState { id: "MXNLE", name: "Nuevo León" },
    MexicanState { id: "MXOAX", name: "Oaxaca" },
    MexicanState { id: "MXPUE", name: "Puebla" },
    MexicanState { id: "MXQUE", name: "Querétaro" },
    MexicanState { id: "MXROO", name: "Quintana Roo" },
    MexicanState { id: "MXSLP", name: "San Luis Potosí" },
    MexicanState { id: "MXSIN", name: "Sinaloa" },
    MexicanState { id: "MXSON", name: "Sonora" },
    MexicanState { id: "MXTAB", name: "Tabasco" },
    MexicanState { id: "MXTAM", name: "Tamaulipas" },
    MexicanState { id: "MXTLA", name: "Tlaxcala" },
    MexicanState { id: "MXVER", name: "Veracruz" },
    MexicanState { id: "MXYUC", name: "Yucatán" },
    MexicanState { id: "MXZAC", name: "Zacatecas" },
];

/// Index of the capital in `MEXICAN_STATES`.
pub fn capital_index() -> Option<usize> {
    MEXICAN_STATES.iter().position(|s| s.id == CAPITAL_ID)
}

/// Looks a state up by map id or by name, ignoring case.
pub fn find_state(guess: &str) -> Option<&'static MexicanState> {
    let guess = guess.trim();
    let lowered = guess.to_lowercase();
    MEXICAN_STATES
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(guess) || s.name.to_lowercase() == lowered)
}

/// Shape of `conversation-starters.json`.
///
/// `elements` holds four single-key objects, one per part of the exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDocument {
    pub elements: Vec<HashMap<String, Vec<String>>>,
    #[serde(default, rename = "inappropriate-combinations")]
    pub inappropriate_combinations: RuleSet<String>,
}

/// Pools and rules ready for the constraint filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContent {
    pub pools: ComboPools<String>,
    pub rules: RuleSet<String>,
}

impl ConversationDocument {
    fn collect(&self, key: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|element| element.get(key))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn into_content(self) -> ConversationContent {
        let pools = ComboPools {
            questions: self.collect("questions"),
            answers: self.collect("answers"),
            follow_ups: self.collect("throwbacks"),
            follow_up_replies: self.collect("throwback-answers"),
        };
        ConversationContent {
            pools,
            rules: self.inappropriate_combinations,
        }
    }
}

// MARK: fallback content used when a document cannot be loaded

fn scenario(scenario: &str, responses: &str) -> Scenario {
    Scenario {
        scenario: scenario.to_string(),
        responses: responses.to_string(),
    }
}

pub fn fallback_courtesy() -> Vec<Scenario> {
    vec![
        scenario("You'd like another slice of dessert.", "Sí por favor | Con permiso"),
        scenario("Someone thanks you", "De nada | No hay de que"),
        scenario("Someone gave you a gift.", "Gracias | Muchas gracias"),
    ]
}

pub fn fallback_then_and_now() -> Vec<ThenAndNow> {
    vec![
        ThenAndNow {
            scenario: "Ahora vivo en Milwaukee, pero antes...".to_string(),
            response: "...vivía en otra ciudad. ¿Y tú? ¿Dónde vivías antes?".to_string(),
            context: Some("location".to_string()),
        },
        ThenAndNow {
            scenario: "Hoy en día trabajo en una oficina, pero antes...".to_string(),
            response: "...trabajaba en un restaurante. Era muy diferente.".to_string(),
            context: Some("work".to_string()),
        },
    ]
}

pub fn fallback_conversation() -> ConversationContent {
    fn owned(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    ConversationContent {
        pools: ComboPools {
            questions: owned(&["¿Cómo estás?", "¿Qué tal?"]),
            answers: owned(&["Muy bien.", "Más o menos."]),
            follow_ups: owned(&["¿Y tú?", "¿Y usted?"]),
            follow_up_replies: owned(&["Bien, gracias.", "Muy bien."]),
        },
        rules: RuleSet::new(vec![
            Rule::default()
                .follow_ups(owned(&["¿Y usted?"]))
                .questions(owned(&["¿Qué tal?"])),
        ]),
    }
}
