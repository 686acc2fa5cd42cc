//! Geometric parameters of a lattice: the axial lengths a, b, c and the interaxial angles α
//! (between b and c), β (between c and a) and γ (between a and b), in radians.
//!
//! Every lattice type consults only some of the six values. Consulted values that are negative
//! are replaced by a per-type default, then the set is normalized to the conventional setting
//! (e.g. a ≤ b ≤ c for the orthorhombic family) and validated.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{lattice::LatticeError, lattice_type::LatticeType};

/// One of the six lattice parameters.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Param {
    A,
    B,
    C,
    Alpha,
    Beta,
    Gamma,
}

impl Param {
    pub fn name(&self) -> &'static str {
        match *self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
        }
    }

    pub fn is_angle(&self) -> bool {
        matches!(self, Self::Alpha | Self::Beta | Self::Gamma)
    }
}

/// The six parameters (a, b, c, α, β, γ). Angles are in radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for LatticeParams {
    /// All parameters unset. Every consulted value will be replaced by the type default.
    fn default() -> Self {
        Self::new(-1., -1., -1., -1., -1., -1.)
    }
}

impl LatticeParams {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    pub fn get(&self, p: Param) -> f64 {
        match p {
            Param::A => self.a,
            Param::B => self.b,
            Param::C => self.c,
            Param::Alpha => self.alpha,
            Param::Beta => self.beta,
            Param::Gamma => self.gamma,
        }
    }

    pub fn set(&mut self, p: Param, value: f64) {
        match p {
            Param::A => self.a = value,
            Param::B => self.b = value,
            Param::C => self.c = value,
            Param::Alpha => self.alpha = value,
            Param::Beta => self.beta = value,
            Param::Gamma => self.gamma = value,
        }
    }

    /// The default parameters of a lattice type. Parameters the type does not consult are fixed
    /// by its symmetry: lengths copy `a` and angles are right angles, except for the hexagonal
    /// γ and the rhombohedral β, γ.
    pub fn default_for(kind: LatticeType) -> Self {
        use LatticeType::*;
        let right = 0.5 * PI;
        let (a, b, c, alpha, beta, gamma) = match kind {
            PrimitiveSquare => (1.0, 1.0, 1.0, right, right, right),
            PrimitiveHexagonal => (1.0, 1.0, 1.0, right, right, 2.0 * PI / 3.0),
            PrimitiveRectangular => (0.5, 1.0, 1.0, right, right, right),
            CenteredRectangular => (0.5, 1.0, 1.0, right, right, right),
            PrimitiveOblique => (1.0, 1.2, 1.0, right, right, 0.4 * PI),
            PrimitiveCubic | FaceCenteredCubic | BodyCenteredCubic => {
                (1.0, 1.0, 1.0, right, right, right)
            }
            PrimitiveTetragonal | BodyCenteredTetragonal => (1.0, 1.0, 0.5, right, right, right),
            PrimitiveOrthorhombic => (0.5, 0.8, 1.0, right, right, right),
            FaceCenteredOrthorhombic | BodyCenteredOrthorhombic => {
                (1.0, 1.2, 1.6, right, right, right)
            }
            BaseCenteredOrthorhombic => (0.5, 1.0, 1.0, right, right, right),
            PrimitiveHexagonalPrism => (1.0, 1.0, 1.0, right, right, 2.0 * PI / 3.0),
            PrimitiveRhombohedral => (1.0, 1.0, 1.0, 0.25 * PI, 0.25 * PI, 0.25 * PI),
            PrimitiveMonoclinic | BaseCenteredMonoclinic => (1.0, 1.0, 1.2, 0.4 * PI, right, right),
            PrimitiveTriclinic => (1.0, 1.2, 1.4, 0.6 * PI, 0.55 * PI, 0.52 * PI),
        };
        Self::new(a, b, c, alpha, beta, gamma)
    }

    /// The parameters a lattice type actually reads. All others are ignored.
    pub fn consulted(kind: LatticeType) -> &'static [Param] {
        use LatticeType::*;
        use Param::*;
        match kind {
            PrimitiveSquare | PrimitiveHexagonal | PrimitiveCubic | FaceCenteredCubic
            | BodyCenteredCubic => &[A],
            PrimitiveRectangular | CenteredRectangular => &[A, B],
            PrimitiveOblique => &[A, B, Gamma],
            PrimitiveTetragonal | BodyCenteredTetragonal | PrimitiveHexagonalPrism => &[A, C],
            PrimitiveOrthorhombic
            | FaceCenteredOrthorhombic
            | BodyCenteredOrthorhombic
            | BaseCenteredOrthorhombic => &[A, B, C],
            PrimitiveRhombohedral => &[A, Alpha],
            PrimitiveMonoclinic | BaseCenteredMonoclinic => &[A, B, C, Alpha],
            PrimitiveTriclinic => &[A, B, C, Alpha, Beta, Gamma],
        }
    }

    /// Starts from the type defaults and copies over every consulted parameter that is not
    /// negative. Negative (or omitted) values keep the default.
    pub fn with_defaults(kind: LatticeType, raw: &LatticeParams) -> Self {
        let mut out = Self::default_for(kind);
        for &p in Self::consulted(kind) {
            let v = raw.get(p);
            // NaN is kept so that validation reports it
            if v >= 0.0 || v.is_nan() {
                out.set(p, v);
            }
        }
        out.tie_unconsulted(kind);
        out
    }

    /// Re-derives the parameters a type fixes by symmetry from the consulted ones.
    fn tie_unconsulted(&mut self, kind: LatticeType) {
        use LatticeType::*;
        match kind {
            PrimitiveSquare | PrimitiveHexagonal | PrimitiveCubic | FaceCenteredCubic
            | BodyCenteredCubic => {
                self.b = self.a;
                self.c = self.a;
            }
            PrimitiveTetragonal | BodyCenteredTetragonal | PrimitiveHexagonalPrism => {
                self.b = self.a;
            }
            PrimitiveRhombohedral => {
                self.b = self.a;
                self.c = self.a;
                self.beta = self.alpha;
                self.gamma = self.alpha;
            }
            _ => {}
        }
    }

    /// Brings the parameters into the conventional setting of the type without changing the
    /// lattice they describe.
    pub fn normalized(mut self, kind: LatticeType) -> Self {
        use LatticeType::*;
        match kind {
            PrimitiveRectangular | CenteredRectangular | BaseCenteredOrthorhombic => {
                if self.b < self.a {
                    std::mem::swap(&mut self.a, &mut self.b);
                }
            }
            PrimitiveOrthorhombic | FaceCenteredOrthorhombic | BodyCenteredOrthorhombic => {
                let mut lens = [self.a, self.b, self.c];
                lens.sort_by(|x, y| x.total_cmp(y));
                [self.a, self.b, self.c] = lens;
            }
            PrimitiveMonoclinic => {
                // b and c are interchangeable, the centering of the C-centered type is not
                if self.c < self.b {
                    std::mem::swap(&mut self.b, &mut self.c);
                }
                if self.alpha > 0.5 * PI {
                    self.alpha = PI - self.alpha;
                }
            }
            BaseCenteredMonoclinic => {
                if self.alpha > 0.5 * PI {
                    self.alpha = PI - self.alpha;
                }
            }
            _ => {}
        }
        self
    }

    /// Checks the parameters against the constraint table of the type. Monoclinic cells must be
    /// in the reduced setting `c ≥ b`, `2c cos α < b`, in which their point tables are valid.
    pub fn validate(&self, kind: LatticeType) -> Result<(), LatticeError> {
        for &p in Self::consulted(kind) {
            let v = self.get(p);
            if p.is_angle() {
                if !v.is_finite() || v <= 0.0 || v >= PI {
                    return Err(LatticeError::InvalidAngle {
                        name: p.name(),
                        value: v,
                    });
                }
            } else if !v.is_finite() || v <= 0.0 {
                return Err(LatticeError::InvalidLength {
                    name: p.name(),
                    value: v,
                });
            }
        }

        match kind {
            LatticeType::PrimitiveRhombohedral if self.alpha >= 2.0 * PI / 3.0 => {
                Err(LatticeError::InvalidAngle {
                    name: Param::Alpha.name(),
                    value: self.alpha,
                })
            }
            LatticeType::PrimitiveMonoclinic | LatticeType::BaseCenteredMonoclinic
                if self.c < self.b || 2.0 * self.c * self.alpha.cos() >= self.b =>
            {
                Err(LatticeError::UnreducedMonoclinic {
                    b: self.b,
                    c: self.c,
                    alpha: self.alpha,
                })
            }
            LatticeType::PrimitiveTriclinic => {
                let (alpha, beta, gamma) = (self.alpha, self.beta, self.gamma);
                // the three angles must be realizable as the corner of a parallelepiped
                for expr in &[
                    alpha + beta + gamma,
                    alpha + beta - gamma,
                    alpha - beta + gamma,
                    -alpha + beta + gamma,
                ] {
                    if !(*expr > 0.0 && *expr < 2.0 * PI) {
                        return Err(LatticeError::InvalidAngles(alpha, beta, gamma));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Substitutes defaults, normalizes and validates in one step.
    pub fn resolve(kind: LatticeType, raw: &LatticeParams) -> Result<Self, LatticeError> {
        let params = Self::with_defaults(kind, raw).normalized(kind);
        params.validate(kind)?;
        Ok(params)
    }

    /// Like [`Self::resolve`], but every consulted value is taken as given: a negative length is
    /// an error rather than a request for the default.
    pub fn exact(kind: LatticeType, raw: &LatticeParams) -> Result<Self, LatticeError> {
        let mut params = Self::default_for(kind);
        for &p in Self::consulted(kind) {
            params.set(p, raw.get(p));
        }
        params.tie_unconsulted(kind);
        let params = params.normalized(kind);
        params.validate(kind)?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_negative_takes_default() {
        let raw = LatticeParams::new(-1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let p = LatticeParams::resolve(LatticeType::PrimitiveCubic, &raw).unwrap();
        assert_eq!((p.a, p.b, p.c), (1.0, 1.0, 1.0));
        assert_relative_eq!(p.alpha, 0.5 * PI);
    }

    #[test]
    fn test_unconsulted_ignored() {
        // c and the angles are garbage, but a tetragonal lattice never reads them except c
        let raw = LatticeParams::new(2.0, 7.0, -1.0, 100.0, -5.0, 0.0);
        let p = LatticeParams::resolve(LatticeType::PrimitiveTetragonal, &raw).unwrap();
        assert_eq!((p.a, p.b, p.c), (2.0, 2.0, 0.5));
    }

    #[test]
    fn test_orthorhombic_sorted() {
        let raw = LatticeParams::new(3.0, 1.0, 2.0, -1.0, -1.0, -1.0);
        let p = LatticeParams::resolve(LatticeType::FaceCenteredOrthorhombic, &raw).unwrap();
        assert_eq!((p.a, p.b, p.c), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_monoclinic_obtuse_folded() {
        let raw = LatticeParams::new(1.0, 1.5, 1.0, 0.6 * PI, -1.0, -1.0);
        let p = LatticeParams::resolve(LatticeType::PrimitiveMonoclinic, &raw).unwrap();
        assert_eq!((p.b, p.c), (1.0, 1.5));
        assert_relative_eq!(p.alpha, 0.4 * PI, epsilon = 1e-12);

        // the centered type never swaps b and c, so this setting is rejected
        assert!(matches!(
            LatticeParams::resolve(LatticeType::BaseCenteredMonoclinic, &raw),
            Err(LatticeError::UnreducedMonoclinic { .. })
        ));
        let raw = LatticeParams::new(1.0, 1.0, 1.5, 0.6 * PI, -1.0, -1.0);
        let p = LatticeParams::resolve(LatticeType::BaseCenteredMonoclinic, &raw).unwrap();
        assert_eq!((p.b, p.c), (1.0, 1.5));
        assert_relative_eq!(p.alpha, 0.4 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_monoclinic_must_be_reduced() {
        use LatticeType::*;
        for (kind, raw) in [
            // c cos α is more than b / 2
            (PrimitiveMonoclinic, LatticeParams::new(1.0, 1.0, 1.2, 0.15 * PI, -1.0, -1.0)),
            (BaseCenteredMonoclinic, LatticeParams::new(1.0, 1.0, 3.0, 0.2 * PI, -1.0, -1.0)),
            (BaseCenteredMonoclinic, LatticeParams::new(1.0, 1.2, 1.0, 0.45 * PI, -1.0, -1.0)),
        ] {
            assert!(
                matches!(
                    LatticeParams::resolve(kind, &raw),
                    Err(LatticeError::UnreducedMonoclinic { .. })
                ),
                "{:?} {:?}",
                kind,
                raw
            );
        }
        // on the boundary 2c cos α = b
        let alpha = (1.0f64 / 2.4).acos();
        let raw = LatticeParams::new(1.0, 1.0, 1.2, alpha + 1e-9, -1.0, -1.0);
        assert!(LatticeParams::resolve(PrimitiveMonoclinic, &raw).is_ok());
        let raw = LatticeParams::new(1.0, 1.0, 1.2, alpha - 1e-9, -1.0, -1.0);
        assert!(LatticeParams::resolve(PrimitiveMonoclinic, &raw).is_err());
        let raw = LatticeParams::new(1.0, 1.0, 1.2, 0.5 * PI, -1.0, -1.0);
        assert!(LatticeParams::resolve(BaseCenteredMonoclinic, &raw).is_ok());
    }

    #[test]
    fn test_rejects_invalid() {
        let zero = LatticeParams::new(0.0, -1.0, -1.0, -1.0, -1.0, -1.0);
        assert!(matches!(
            LatticeParams::resolve(LatticeType::PrimitiveSquare, &zero),
            Err(LatticeError::InvalidLength { name: "a", .. })
        ));

        let flat = LatticeParams::new(1.0, -1.0, -1.0, 0.7 * PI, -1.0, -1.0);
        assert!(matches!(
            LatticeParams::resolve(LatticeType::PrimitiveRhombohedral, &flat),
            Err(LatticeError::InvalidAngle { name: "alpha", .. })
        ));

        let impossible = LatticeParams::new(1.0, 1.0, 1.0, 0.2 * PI, 0.2 * PI, 0.9 * PI);
        assert!(matches!(
            LatticeParams::resolve(LatticeType::PrimitiveTriclinic, &impossible),
            Err(LatticeError::InvalidAngles(..))
        ));

        let nan = LatticeParams::new(f64::NAN, -1.0, -1.0, -1.0, -1.0, -1.0);
        assert!(LatticeParams::resolve(LatticeType::FaceCenteredCubic, &nan).is_err());
    }

    #[test]
    fn test_exact_keeps_negatives() {
        let raw = LatticeParams::new(-1.0, -1.0, -1.0, -1.0, -1.0, -1.0);
        assert!(LatticeParams::exact(LatticeType::PrimitiveCubic, &raw).is_err());
        let raw = LatticeParams::new(2.0, -1.0, 1.0, -1.0, -1.0, -1.0);
        let p = LatticeParams::exact(LatticeType::PrimitiveTetragonal, &raw).unwrap();
        assert_eq!((p.a, p.b, p.c), (2.0, 2.0, 1.0));
    }

    #[test]
    fn test_defaults_valid() {
        for kind in LatticeType::ALL {
            let p = LatticeParams::resolve(kind, &LatticeParams::default());
            assert!(p.is_ok(), "{:?}: {:?}", kind, p);
        }
    }
}
