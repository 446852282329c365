//! Static lookup tables backing the reaction form selectors.

use serde::{Deserialize, Serialize};

macro_rules! keyed_enum {
    ($name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in selector order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keyed_enum!(ReactionType {
    Oxidation => ("oxidation", "Oxidation"),
    Dehydration => ("dehydration", "Dehydration"),
    Halogenation => ("halogenation", "Halogenation"),
    Esterification => ("esterification", "Esterification"),
});

keyed_enum!(Catalyst {
    H2so4 => ("h2so4", "Sulfuric Acid (H₂SO₄)"),
    H3po4 => ("h3po4", "Phosphoric Acid (H₃PO₄)"),
    Kmno4 => ("kmno4", "Potassium Permanganate (KMnO₄)"),
    K2cr2o7 => ("k2cr2o7", "Potassium Dichromate (K₂Cr₂O₇)"),
    Pcc => ("pcc", "Pyridinium Chlorochromate (PCC)"),
    Hcl => ("hcl", "Hydrochloric Acid (HCl)"),
    Hbr => ("hbr", "Hydrobromic Acid (HBr)"),
    Hi => ("hi", "Hydroiodic Acid (HI)"),
    Socl2 => ("socl2", "Thionyl Chloride (SOCl₂)"),
    Heat => ("heat", "Heat"),
    Naoh => ("naoh", "Sodium Hydroxide (NaOH)"),
});

/// Shortcut entries for the compound input. Not checked against any chemistry.
pub const EXAMPLE_COMPOUNDS: &[&str] = &[
    "methanol",
    "ethanol",
    "propanol",
    "isopropanol",
    "butanol",
    "tert-butanol",
    "phenol",
    "benzyl alcohol",
    "cyclohexanol",
    "glycerol",
];

impl ReactionType {
    /// Catalysts offered once this reaction type is selected, in display order.
    pub fn catalysts(self) -> &'static [Catalyst] {
        match self {
            ReactionType::Oxidation => &[Catalyst::Kmno4, Catalyst::K2cr2o7, Catalyst::Pcc],
            ReactionType::Dehydration => &[Catalyst::H2so4, Catalyst::H3po4, Catalyst::Heat],
            ReactionType::Halogenation => {
                &[Catalyst::Hcl, Catalyst::Hbr, Catalyst::Hi, Catalyst::Socl2]
            }
            ReactionType::Esterification => &[Catalyst::H2so4, Catalyst::H3po4],
        }
    }
}

/// Catalysts for a raw select value. Empty or unknown keys offer nothing.
pub fn catalysts_for_key(reaction_type: &str) -> &'static [Catalyst] {
    match ReactionType::from_key(reaction_type) {
        Some(reaction_type) => reaction_type.catalysts(),
        None => &[],
    }
}

pub fn reaction_type_label_or_raw(raw: &str) -> &str {
    ReactionType::from_key(raw).map_or(raw, |r| r.label())
}

pub fn catalyst_label_or_raw(raw: &str) -> &str {
    Catalyst::from_key(raw).map_or(raw, |c| c.label())
}
