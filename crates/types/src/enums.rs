//! Closed value sets used by the register rows.
//!
//! Each set declares its allowed literals and the fallback used when a model
//! reply carries something outside the set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of lower-case literals with a documented fallback member.
pub trait ClosedSet: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALLOWED: &'static [Self];
    /// The member substituted for missing or unknown values.
    const FALLBACK: Self;

    fn as_str(self) -> &'static str;

    /// Looks up an exact (already lower-cased) literal.
    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALLOWED.iter().copied().find(|m| m.as_str() == literal)
    }
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $literal:literal),+ $(,)? } fallback $fallback:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $literal)] $variant),+
        }

        impl ClosedSet for $name {
            const ALLOWED: &'static [Self] = &[$($name::$variant),+];
            const FALLBACK: Self = $name::$fallback;

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <$name as ClosedSet>::FALLBACK
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Likelihood of a risk materializing.
    Probability { Alta => "alta", Media => "media", Baja => "baja" } fallback Media
}

closed_set! {
    /// Consequence of a risk on the project.
    Impact { Alto => "alto", Medio => "medio", Bajo => "bajo" } fallback Medio
}

closed_set! {
    /// Combined rating of probability and impact.
    Severity { Critico => "critico", Alto => "alto", Medio => "medio", Bajo => "bajo" } fallback Medio
}

closed_set! {
    RiskStatus { Abierto => "abierto", Mitigado => "mitigado", Cerrado => "cerrado" } fallback Abierto
}

closed_set! {
    /// How much a stakeholder can sway project decisions.
    Influence { Alta => "alta", Media => "media", Baja => "baja" } fallback Media
}
