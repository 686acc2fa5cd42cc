//! Parsing of lattice descriptors from a standard ASCII syntax that is easy to type:
//! a type name followed by parameter assignments, e.g. `bct a=1 c=0.5` or `hR alpha=45deg`.
//! Angles are in radians unless suffixed with `deg`. Unassigned parameters take the type default.

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::multispace0;
use nom::combinator::{all_consuming, fail, map_res, opt, value};
use nom::error::ParseError;
use nom::multi::many0;
use nom::number::complete::double;
use nom::sequence::{delimited, tuple};
use nom::IResult;
use serde::{Deserialize, Serialize};

use crate::{
    factory::bravais_lattice_factory,
    lattice::{BravaisLattice, LatticeError},
    lattice_type::LatticeType,
    params::{LatticeParams, Param},
};

/// A parsed descriptor: the type and the raw parameters, with unassigned ones negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeDescriptor {
    pub kind: LatticeType,
    pub params: LatticeParams,
}

impl LatticeDescriptor {
    /// Builds the lattice through [`bravais_lattice_factory`], so unassigned parameters take
    /// their defaults.
    pub fn build(&self, logging: i32) -> Result<BravaisLattice, LatticeError> {
        let p = &self.params;
        bravais_lattice_factory(
            self.kind, p.a, p.b, p.c, p.alpha, p.beta, p.gamma, logging,
        )
    }
}

impl FromStr for LatticeDescriptor {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_descriptor(s)
    }
}

/// Parses a whole descriptor string.
pub fn parse_descriptor(s: &str) -> Result<LatticeDescriptor, LatticeError> {
    all_consuming(lattice_descriptor)(s)
        .map(|(_, d)| d)
        .map_err(|e| LatticeError::Parse(e.to_string()))
}

/// Parses a descriptor: a lattice type name and any number of assignments.
pub fn lattice_descriptor(input: &str) -> IResult<&str, LatticeDescriptor> {
    let (o, (kind, assignments)) =
        tuple((ws(lattice_type_name), many0(ws(assignment))))(input)?;

    let mut params = LatticeParams::default();
    for (p, v) in assignments {
        params.set(p, v);
    }
    Ok((o, LatticeDescriptor { kind, params }))
}

/// Parses a lattice type name in any of the spellings [`LatticeType`] accepts.
pub fn lattice_type_name(input: &str) -> IResult<&str, LatticeType> {
    map_res(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        str::parse::<LatticeType>,
    )(input)
}

/// Parses a parameter name. Greek letters are accepted for the angles.
pub fn param_name(input: &str) -> IResult<&str, Param> {
    // longer names first, so that `alpha` is not read as `a`
    alt((
        value(Param::Alpha, alt((tag("alpha"), tag("α")))),
        value(Param::Beta, alt((tag("beta"), tag("β")))),
        value(Param::Gamma, alt((tag("gamma"), tag("γ")))),
        value(Param::A, tag("a")),
        value(Param::B, tag("b")),
        value(Param::C, tag("c")),
    ))(input)
}

/// Parses `name=value`, converting angles given in degrees to radians.
pub fn assignment(input: &str) -> IResult<&str, (Param, f64)> {
    let (o, (p, _, v, deg)) =
        tuple((ws(param_name), tag("="), ws(double), opt(tag("deg"))))(input)?;
    match (deg.is_some(), p.is_angle()) {
        (true, false) => fail(input),
        (true, true) => Ok((o, (p, v.to_radians()))),
        (false, _) => Ok((o, (p, v))),
    }
}

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading
/// and trailing whitespace, returning the output of `inner`.
fn ws<'a, F: 'a, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}
