//! The 19 Bravais lattice classes: 5 in the plane and 14 in space. Each class has a stable
//! integer code (0 is reserved for "invalid") so that callers speaking the numeric enumeration
//! can still address them.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::lattice::LatticeError;

/// One of the canonical Bravais lattice classes.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum LatticeType {
    // 2D Bravais lattices
    PrimitiveSquare = 1,
    PrimitiveHexagonal,
    PrimitiveRectangular,
    CenteredRectangular,
    PrimitiveOblique,
    // 3D Bravais lattices
    PrimitiveCubic,
    FaceCenteredCubic,
    BodyCenteredCubic,
    PrimitiveTetragonal,
    BodyCenteredTetragonal,
    PrimitiveOrthorhombic,
    FaceCenteredOrthorhombic,
    BodyCenteredOrthorhombic,
    BaseCenteredOrthorhombic,
    PrimitiveHexagonalPrism,
    PrimitiveRhombohedral,
    PrimitiveMonoclinic,
    BaseCenteredMonoclinic,
    PrimitiveTriclinic,
}

/// Every name a lattice type can be written as in a descriptor: the enumeration name, the
/// Pearson-style symbol and the usual short name. Lookups are made on the lowercased input.
static TYPE_NAMES: phf::Map<&'static str, LatticeType> = phf::phf_map! {
    "primitive_square" => LatticeType::PrimitiveSquare,
    "tp2" => LatticeType::PrimitiveSquare,
    "sqr" => LatticeType::PrimitiveSquare,
    "square" => LatticeType::PrimitiveSquare,
    "primitive_hexagonal" => LatticeType::PrimitiveHexagonal,
    "hp2" => LatticeType::PrimitiveHexagonal,
    "hex2d" => LatticeType::PrimitiveHexagonal,
    "hexagonal" => LatticeType::PrimitiveHexagonal,
    "primitive_rectangular" => LatticeType::PrimitiveRectangular,
    "op2" => LatticeType::PrimitiveRectangular,
    "rect" => LatticeType::PrimitiveRectangular,
    "rectangular" => LatticeType::PrimitiveRectangular,
    "centered_rectangular" => LatticeType::CenteredRectangular,
    "oc2" => LatticeType::CenteredRectangular,
    "crect" => LatticeType::CenteredRectangular,
    "primitive_oblique" => LatticeType::PrimitiveOblique,
    "mp2" => LatticeType::PrimitiveOblique,
    "obl" => LatticeType::PrimitiveOblique,
    "oblique" => LatticeType::PrimitiveOblique,
    "primitive_cubic" => LatticeType::PrimitiveCubic,
    "cp" => LatticeType::PrimitiveCubic,
    "cub" => LatticeType::PrimitiveCubic,
    "sc" => LatticeType::PrimitiveCubic,
    "face_centered_cubic" => LatticeType::FaceCenteredCubic,
    "cf" => LatticeType::FaceCenteredCubic,
    "fcc" => LatticeType::FaceCenteredCubic,
    "body_centered_cubic" => LatticeType::BodyCenteredCubic,
    "ci" => LatticeType::BodyCenteredCubic,
    "bcc" => LatticeType::BodyCenteredCubic,
    "primitive_tetragonal" => LatticeType::PrimitiveTetragonal,
    "tp" => LatticeType::PrimitiveTetragonal,
    "tet" => LatticeType::PrimitiveTetragonal,
    "body_centered_tetragonal" => LatticeType::BodyCenteredTetragonal,
    "ti" => LatticeType::BodyCenteredTetragonal,
    "bct" => LatticeType::BodyCenteredTetragonal,
    "primitive_orthorhombic" => LatticeType::PrimitiveOrthorhombic,
    "op" => LatticeType::PrimitiveOrthorhombic,
    "orc" => LatticeType::PrimitiveOrthorhombic,
    "face_centered_orthorhombic" => LatticeType::FaceCenteredOrthorhombic,
    "of" => LatticeType::FaceCenteredOrthorhombic,
    "orcf" => LatticeType::FaceCenteredOrthorhombic,
    "fco" => LatticeType::FaceCenteredOrthorhombic,
    "body_centered_orthorhombic" => LatticeType::BodyCenteredOrthorhombic,
    "oi" => LatticeType::BodyCenteredOrthorhombic,
    "orci" => LatticeType::BodyCenteredOrthorhombic,
    "bco" => LatticeType::BodyCenteredOrthorhombic,
    "base_centered_orthorhombic" => LatticeType::BaseCenteredOrthorhombic,
    "oc" => LatticeType::BaseCenteredOrthorhombic,
    "os" => LatticeType::BaseCenteredOrthorhombic,
    "orcc" => LatticeType::BaseCenteredOrthorhombic,
    "primitive_hexagonal_prism" => LatticeType::PrimitiveHexagonalPrism,
    "hp" => LatticeType::PrimitiveHexagonalPrism,
    "hex" => LatticeType::PrimitiveHexagonalPrism,
    "primitive_rhombohedral" => LatticeType::PrimitiveRhombohedral,
    "hr" => LatticeType::PrimitiveRhombohedral,
    "rhl" => LatticeType::PrimitiveRhombohedral,
    "primitive_monoclinic" => LatticeType::PrimitiveMonoclinic,
    "mp" => LatticeType::PrimitiveMonoclinic,
    "mcl" => LatticeType::PrimitiveMonoclinic,
    "base_centered_monoclinic" => LatticeType::BaseCenteredMonoclinic,
    "mc" => LatticeType::BaseCenteredMonoclinic,
    "ms" => LatticeType::BaseCenteredMonoclinic,
    "mclc" => LatticeType::BaseCenteredMonoclinic,
    "primitive_triclinic" => LatticeType::PrimitiveTriclinic,
    "ap" => LatticeType::PrimitiveTriclinic,
    "tri" => LatticeType::PrimitiveTriclinic,
};

impl LatticeType {
    /// All lattice types, planar first, in code order.
    pub const ALL: [LatticeType; 19] = [
        Self::PrimitiveSquare,
        Self::PrimitiveHexagonal,
        Self::PrimitiveRectangular,
        Self::CenteredRectangular,
        Self::PrimitiveOblique,
        Self::PrimitiveCubic,
        Self::FaceCenteredCubic,
        Self::BodyCenteredCubic,
        Self::PrimitiveTetragonal,
        Self::BodyCenteredTetragonal,
        Self::PrimitiveOrthorhombic,
        Self::FaceCenteredOrthorhombic,
        Self::BodyCenteredOrthorhombic,
        Self::BaseCenteredOrthorhombic,
        Self::PrimitiveHexagonalPrism,
        Self::PrimitiveRhombohedral,
        Self::PrimitiveMonoclinic,
        Self::BaseCenteredMonoclinic,
        Self::PrimitiveTriclinic,
    ];

    /// Looks a type up by its integer code. Code 0 is the reserved invalid type.
    pub fn from_code(code: i32) -> Result<Self, LatticeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(LatticeError::InvalidType(code))
    }

    /// The integer code of the type.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// The dimension of the space the lattice lives in.
    pub fn dim(&self) -> usize {
        if self.code() <= Self::PrimitiveOblique.code() {
            2
        } else {
            3
        }
    }

    /// The human-readable name of the lattice type.
    pub fn label(&self) -> &'static str {
        match *self {
            Self::PrimitiveSquare => "Primitive Square",
            Self::PrimitiveHexagonal => "Primitive Hexagonal",
            Self::PrimitiveRectangular => "Primitive Rectangular",
            Self::CenteredRectangular => "Centered Rectangular",
            Self::PrimitiveOblique => "Primitive Oblique",
            Self::PrimitiveCubic => "Primitive Cubic",
            Self::FaceCenteredCubic => "Face-Centered Cubic",
            Self::BodyCenteredCubic => "Body-Centered Cubic",
            Self::PrimitiveTetragonal => "Primitive Tetragonal",
            Self::BodyCenteredTetragonal => "Body-Centered Tetragonal",
            Self::PrimitiveOrthorhombic => "Primitive Orthorhombic",
            Self::FaceCenteredOrthorhombic => "Face-Centered Orthorhombic",
            Self::BodyCenteredOrthorhombic => "Body-Centered Orthorhombic",
            Self::BaseCenteredOrthorhombic => "Base-Centered Orthorhombic",
            Self::PrimitiveHexagonalPrism => "Primitive Hexagonal Prism",
            Self::PrimitiveRhombohedral => "Primitive Rhombohedral",
            Self::PrimitiveMonoclinic => "Primitive Monoclinic",
            Self::BaseCenteredMonoclinic => "Base-Centered Monoclinic",
            Self::PrimitiveTriclinic => "Primitive Triclinic",
        }
    }
}

impl Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LatticeType {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        TYPE_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| LatticeError::UnknownTypeName(s.to_string()))
    }
}

impl TryFrom<i32> for LatticeType {
    type Error = LatticeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
