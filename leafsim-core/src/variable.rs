//! Status variables.
//!
//! Every quantity a strategy can read from or write to a [`Status`](crate::status::Status)
//! is a member of the closed [`Variable`] enumeration. Variables are declared with the
//! `define_variables!` macro which also generates their metadata.
//!
//! # Variable Naming Conventions
//!
//! Names use `|` as a hierarchical separator:
//! - `Temperature|Leaf` - leaf temperature
//! - `Conductance|Stomatal` - stomatal conductance to CO2
//! - `Heat Flux|Latent` - latent heat flux

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata attached to a [`Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Hierarchical name
    pub name: &'static str,
    /// Short symbol used in the literature
    pub symbol: &'static str,
    /// Canonical unit
    pub unit: &'static str,
    /// Description
    pub description: &'static str,
}

/// Declare the closed set of status variables.
///
/// Generates the [`Variable`] enum along with `Variable::ALL`, `Variable::COUNT`
/// and [`Variable::definition`].
macro_rules! define_variables {
    (
        $(
            $variant:ident {
                name = $name:expr,
                symbol = $symbol:expr,
                unit = $unit:expr,
                description = $desc:expr $(,)?
            }
        ),+ $(,)?
    ) => {
        /// A quantity stored in a [`Status`](crate::status::Status).
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum Variable {
            $(
                #[doc = $desc]
                $variant,
            )+
        }

        impl Variable {
            /// All variables, in declaration order.
            pub const ALL: &'static [Variable] = &[$(Variable::$variant),+];

            /// Number of variables.
            pub const COUNT: usize = Self::ALL.len();

            /// Metadata for this variable.
            pub const fn definition(self) -> VariableDefinition {
                match self {
                    $(
                        Variable::$variant => VariableDefinition {
                            name: $name,
                            symbol: $symbol,
                            unit: $unit,
                            description: $desc,
                        },
                    )+
                }
            }
        }
    };
}

define_variables!(
    AbsorbedShortwave {
        name = "Radiation|Absorbed Shortwave",
        symbol = "Rₛ",
        unit = "W m-2",
        description = "Shortwave radiation absorbed by the organ",
    },
    SkyFraction {
        name = "Geometry|Sky Fraction",
        symbol = "sky_fraction",
        unit = "-",
        description = "Fraction of the organ view factor that sees the sky",
    },
    Dimension {
        name = "Geometry|Characteristic Dimension",
        symbol = "d",
        unit = "m",
        description = "Characteristic dimension of the organ in the wind direction",
    },
    AbsorbedPpfd {
        name = "Radiation|Absorbed PPFD",
        symbol = "PPFD",
        unit = "μmol m-2 s-1",
        description = "Absorbed photosynthetic photon flux density",
    },
    LeafTemperature {
        name = "Temperature|Leaf",
        symbol = "Tₗ",
        unit = "°C",
        description = "Organ surface temperature",
    },
    NetRadiation {
        name = "Radiation|Net",
        symbol = "Rn",
        unit = "W m-2",
        description = "Net radiation of the organ",
    },
    NetLongwave {
        name = "Radiation|Net Longwave",
        symbol = "Rₗₗ",
        unit = "W m-2",
        description = "Net longwave radiation, positive when the organ gains energy",
    },
    SensibleHeat {
        name = "Heat Flux|Sensible",
        symbol = "H",
        unit = "W m-2",
        description = "Sensible heat flux from the organ to the air",
    },
    LatentHeat {
        name = "Heat Flux|Latent",
        symbol = "λE",
        unit = "W m-2",
        description = "Latent heat flux from the organ to the air",
    },
    SurfaceCo2 {
        name = "Concentration|CO2 Surface",
        symbol = "Cₛ",
        unit = "ppm",
        description = "CO2 concentration at the organ surface",
    },
    IntercellularCo2 {
        name = "Concentration|CO2 Intercellular",
        symbol = "Cᵢ",
        unit = "ppm",
        description = "Intercellular CO2 concentration",
    },
    Assimilation {
        name = "Assimilation|Net",
        symbol = "A",
        unit = "μmol m-2 s-1",
        description = "Net CO2 assimilation rate",
    },
    StomatalConductance {
        name = "Conductance|Stomatal",
        symbol = "Gₛ",
        unit = "mol m-2 s-1",
        description = "Stomatal conductance to CO2",
    },
    BoundaryConductanceHeat {
        name = "Conductance|Boundary Layer Heat",
        symbol = "Gbₕ",
        unit = "mol m-2 s-1",
        description = "Boundary-layer conductance for heat",
    },
    BoundaryConductanceCo2 {
        name = "Conductance|Boundary Layer CO2",
        symbol = "Gbc",
        unit = "mol m-2 s-1",
        description = "Boundary-layer conductance for CO2",
    },
    SurfaceVpd {
        name = "Vapor Pressure Deficit|Leaf Surface",
        symbol = "Dₗ",
        unit = "kPa",
        description = "Vapour pressure deficit between the organ surface and the air",
    },
);

const _: () = assert!(Variable::COUNT <= u32::BITS as usize);

impl Variable {
    /// Position of the variable in dense storage.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn unit(self) -> &'static str {
        self.definition().unit
    }

    /// Look a variable up by its hierarchical name or its symbol.
    pub fn from_name(name: &str) -> Option<Variable> {
        Variable::ALL.iter().copied().find(|v| {
            let definition = v.definition();
            definition.name == name || definition.symbol == name
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition().name)
    }
}

/// A set of [`Variable`]s stored as a bitset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VariableSet(u32);

impl VariableSet {
    pub const fn empty() -> Self {
        VariableSet(0)
    }

    pub fn all() -> Self {
        Variable::ALL.iter().copied().collect()
    }

    pub fn insert(&mut self, variable: Variable) {
        self.0 |= 1 << variable.index();
    }

    pub fn remove(&mut self, variable: Variable) {
        self.0 &= !(1 << variable.index());
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.0 & (1 << variable.index()) != 0
    }

    pub fn union(&self, other: &VariableSet) -> VariableSet {
        VariableSet(self.0 | other.0)
    }

    /// Variables in `self` that are not in `other`.
    pub fn difference(&self, other: &VariableSet) -> VariableSet {
        VariableSet(self.0 & !other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        Variable::ALL.iter().copied().filter(|v| self.contains(*v))
    }
}

impl FromIterator<Variable> for VariableSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut set = VariableSet::empty();
        for variable in iter {
            set.insert(variable);
        }
        set
    }
}

impl Extend<Variable> for VariableSet {
    fn extend<I: IntoIterator<Item = Variable>>(&mut self, iter: I) {
        for variable in iter {
            self.insert(variable);
        }
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|v| v.definition().symbol).collect();
        write!(f, "{}", names.join(", "))
    }
}
