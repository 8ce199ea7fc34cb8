//! Dependency labels relevant to predicate assembly
//!
//! Labels are parsed once into a closed set of variants. Everything the
//! extractor does not care about is kept verbatim in `DepRel::Other`.

use std::fmt;

/// A dependency relation label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DepRel {
    Aux,
    AuxPass,
    /// UD `aux:pass`
    UdAuxPass,
    Prep,
    Agent,
    Prt,
    /// UD `compound:prt`
    UdPrt,
    Neg,
    Other(String),
}

/// Grouping of labels into the kinds of words that travel with a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepClass {
    Auxiliary,
    Preposition,
    Agent,
    Particle,
    Negation,
}

/// Components bound tightly enough to be part of the verb's identity
pub static CORE_COMPONENTS: &[DepClass] = &[DepClass::Particle, DepClass::Negation];

/// Components gathered into the full predicate span
pub static FELLOW_COMPONENTS: &[DepClass] = &[
    DepClass::Auxiliary,
    DepClass::Preposition,
    DepClass::Agent,
    DepClass::Particle,
    DepClass::Negation,
];

impl DepRel {
    /// The class of this label, if it is one the extractor recognises
    pub fn class(&self) -> Option<DepClass> {
        match self {
            DepRel::Aux | DepRel::AuxPass | DepRel::UdAuxPass => Some(DepClass::Auxiliary),
            DepRel::Prep => Some(DepClass::Preposition),
            DepRel::Agent => Some(DepClass::Agent),
            DepRel::Prt | DepRel::UdPrt => Some(DepClass::Particle),
            DepRel::Neg => Some(DepClass::Negation),
            DepRel::Other(_) => None,
        }
    }

    #[inline]
    pub fn in_group(&self, group: &[DepClass]) -> bool {
        self.class().is_some_and(|class| group.contains(&class))
    }

    #[inline]
    pub fn is_core_component(&self) -> bool {
        self.in_group(CORE_COMPONENTS)
    }

    #[inline]
    pub fn is_fellow_component(&self) -> bool {
        self.in_group(FELLOW_COMPONENTS)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DepRel::Aux => "aux",
            DepRel::AuxPass => "auxpass",
            DepRel::UdAuxPass => "aux:pass",
            DepRel::Prep => "prep",
            DepRel::Agent => "agent",
            DepRel::Prt => "prt",
            DepRel::UdPrt => "compound:prt",
            DepRel::Neg => "neg",
            DepRel::Other(label) => label,
        }
    }
}

impl From<&str> for DepRel {
    fn from(label: &str) -> Self {
        match label {
            "aux" => DepRel::Aux,
            "auxpass" => DepRel::AuxPass,
            "aux:pass" => DepRel::UdAuxPass,
            "prep" => DepRel::Prep,
            "agent" => DepRel::Agent,
            "prt" => DepRel::Prt,
            "compound:prt" => DepRel::UdPrt,
            "neg" => DepRel::Neg,
            other => DepRel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DepRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
