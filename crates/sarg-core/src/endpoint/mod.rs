//! One bound of a range: a finite coordinate or an infinity, open or closed.
//!
//! `Endpoint` is immutable outside the crate. `EndpointBuilder` is the only
//! way to set a finite coordinate from the outside; it validates the
//! coordinate against the domain and applies exact-numeric rounding, so a
//! frozen endpoint always carries a domain-scaled coordinate.

mod rounding;


use crate::{
    domain::SargDomain,
    error::SargError,
    expr::DynamicParam,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, fmt};

///
/// BoundType
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BoundType {
    Lower,
    Upper,
}

impl BoundType {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

///
/// Strictness
///
/// Open bounds exclude their coordinate; closed bounds include it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strictness {
    Open,
    Closed,
}

impl Strictness {
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

///
/// Infinity
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Infinity {
    Negative,
    Positive,
}

///
/// Coordinate
///
/// Either a literal or a dynamic parameter placeholder.
/// Dynamic parameters only order against themselves and the null literal.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Coordinate {
    Literal(Value),
    Param(DynamicParam),
}

impl Coordinate {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Literal(Value::Null))
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Param(_) => None,
        }
    }

    /// Compare two coordinates; nulls sort lowest.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, SargError> {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => Ok(canonical_cmp(a, b)),
            (Self::Literal(Value::Null), Self::Param(_)) => Ok(Ordering::Less),
            (Self::Param(_), Self::Literal(Value::Null)) => Ok(Ordering::Greater),
            (Self::Param(a), Self::Param(b)) if a.index == b.index => Ok(Ordering::Equal),
            _ => Err(SargError::unordered(self, other)),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Param(param) => write!(f, "{param}"),
        }
    }
}

impl From<Value> for Coordinate {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<DynamicParam> for Coordinate {
    fn from(param: DynamicParam) -> Self {
        Self::Param(param)
    }
}

///
/// Endpoint
///
/// Invariant: an infinite endpoint has no coordinate and is open;
/// negative infinity is a lower bound, positive infinity an upper bound.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    bound: BoundType,
    coordinate: Option<Coordinate>,
    strictness: Strictness,
}

impl Endpoint {
    #[must_use]
    pub const fn negative_infinity() -> Self {
        Self {
            bound: BoundType::Lower,
            coordinate: None,
            strictness: Strictness::Open,
        }
    }

    #[must_use]
    pub const fn positive_infinity() -> Self {
        Self {
            bound: BoundType::Upper,
            coordinate: None,
            strictness: Strictness::Open,
        }
    }

    #[must_use]
    pub const fn infinity(infinity: Infinity) -> Self {
        match infinity {
            Infinity::Negative => Self::negative_infinity(),
            Infinity::Positive => Self::positive_infinity(),
        }
    }

    // Coordinate must already be validated and rounded for its domain.
    pub(crate) const fn finite(
        bound: BoundType,
        strictness: Strictness,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            bound,
            coordinate: Some(coordinate),
            strictness,
        }
    }

    /// Open endpoint at the null coordinate.
    pub(crate) const fn open_null(bound: BoundType) -> Self {
        Self::finite(bound, Strictness::Open, Coordinate::Literal(Value::Null))
    }

    /// Same coordinate seen from the other side: `<= 5` becomes `> 5`.
    pub(crate) fn flipped(&self) -> Self {
        debug_assert!(self.is_finite(), "only finite endpoints can be flipped");

        Self {
            bound: self.bound.opposite(),
            coordinate: self.coordinate.clone(),
            strictness: self.strictness.complement(),
        }
    }

    #[must_use]
    pub const fn bound_type(&self) -> BoundType {
        self.bound
    }

    #[must_use]
    pub const fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    #[must_use]
    pub const fn strictness(&self) -> Strictness {
        self.strictness
    }

    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.coordinate.is_some()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.strictness, Strictness::Closed)
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.strictness, Strictness::Open)
    }

    /// Whether the coordinate is the null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        match &self.coordinate {
            Some(coordinate) => coordinate.is_null(),
            None => false,
        }
    }

    /// -1 for negative infinity, +1 for positive infinity, 0 when finite.
    #[must_use]
    pub const fn infinitude(&self) -> i8 {
        match (&self.coordinate, self.bound) {
            (Some(_), _) => 0,
            (None, BoundType::Lower) => -1,
            (None, BoundType::Upper) => 1,
        }
    }

    /// -1 for infinitesimally below (open upper bound), 0 for a closed
    /// bound, +1 for infinitesimally above (open lower bound).
    #[must_use]
    pub const fn strictness_sign(&self) -> i8 {
        match (self.strictness, self.bound) {
            (Strictness::Closed, _) => 0,
            (Strictness::Open, BoundType::Lower) => 1,
            (Strictness::Open, BoundType::Upper) => -1,
        }
    }

    /// Total order over endpoints of either bound type.
    ///
    /// Infinities order by sign; finite endpoints order by coordinate and
    /// then by strictness sign, so `< 5` < `>= 5` = `<= 5` < `> 5`.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, SargError> {
        let infinitude = self.infinitude().cmp(&other.infinitude());
        if infinitude != Ordering::Equal {
            return Ok(infinitude);
        }

        let (Some(left), Some(right)) = (&self.coordinate, &other.coordinate) else {
            // both are the same infinity
            return Ok(Ordering::Equal);
        };

        let coordinate = left.try_cmp(right)?;
        if coordinate != Ordering::Equal {
            return Ok(coordinate);
        }

        Ok(self.strictness_sign().cmp(&other.strictness_sign()))
    }

    /// Whether this endpoint touches another one without a gap.
    ///
    /// The upper bound of `(1, 10)` touches the lower bound of `[10, 20)`
    /// but not that of `(10, 20)`.
    pub fn is_touching(&self, other: &Self) -> Result<bool, SargError> {
        let (Some(left), Some(right)) = (&self.coordinate, &other.coordinate) else {
            return Ok(false);
        };

        Ok(left.try_cmp(right)? == Ordering::Equal && (self.is_closed() || other.is_closed()))
    }

    /// Position of a point value relative to this endpoint.
    ///
    /// `Less` means the value lies below the endpoint, `Equal` that the
    /// endpoint is closed exactly at the value.
    pub(crate) fn locate(&self, value: &Value) -> Result<Ordering, SargError> {
        let Some(coordinate) = &self.coordinate else {
            return Ok(if self.infinitude() < 0 {
                Ordering::Greater
            } else {
                Ordering::Less
            });
        };

        let point = Coordinate::Literal(value.clone());
        let cmp = point.try_cmp(coordinate)?;
        if cmp != Ordering::Equal {
            return Ok(cmp);
        }

        Ok(0.cmp(&self.strictness_sign()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(coordinate) = &self.coordinate else {
            return match self.bound {
                BoundType::Lower => write!(f, "-infinity"),
                BoundType::Upper => write!(f, "+infinity"),
            };
        };

        let op = match (self.bound, self.strictness) {
            (BoundType::Lower, Strictness::Closed) => ">=",
            (BoundType::Lower, Strictness::Open) => ">",
            (BoundType::Upper, Strictness::Closed) => "<=",
            (BoundType::Upper, Strictness::Open) => "<",
        };

        write!(f, "{op} {coordinate}")
    }
}

///
/// EndpointBuilder
///
/// Mutable endpoint bound to one domain. Finite coordinates are validated
/// against the domain and rounded to its scale before they are stored.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointBuilder {
    domain: SargDomain,
    endpoint: Endpoint,
}

impl EndpointBuilder {
    /// New builder starting at the infinity of the given side.
    #[must_use]
    pub const fn new(domain: SargDomain, bound: BoundType) -> Self {
        let endpoint = match bound {
            BoundType::Lower => Endpoint::negative_infinity(),
            BoundType::Upper => Endpoint::positive_infinity(),
        };

        Self { domain, endpoint }
    }

    #[must_use]
    pub const fn domain(&self) -> SargDomain {
        self.domain
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Set this endpoint to negative or positive infinity.
    ///
    /// The bound type follows the sign, so positive infinity stored in a
    /// lower slot reads back as an upper bound.
    pub fn set_infinity(&mut self, infinity: Infinity) {
        self.endpoint = Endpoint::infinity(infinity);
    }

    /// Set a finite coordinate.
    ///
    /// Exact-numeric literals are rescaled half-up to the domain scale and
    /// the strictness follows the rounding direction.
    pub fn set_finite(
        &mut self,
        bound: BoundType,
        coordinate: Coordinate,
        strictness: Strictness,
    ) -> Result<(), SargError> {
        self.validate(&coordinate)?;

        let (coordinate, strictness) = match coordinate {
            Coordinate::Literal(value) => {
                let (value, strictness) =
                    rounding::apply(self.domain.ty, bound, strictness, value);
                (Coordinate::Literal(value), strictness)
            }
            param @ Coordinate::Param(_) => (param, strictness),
        };

        self.endpoint = Endpoint::finite(bound, strictness, coordinate);

        Ok(())
    }

    /// Copy an already-built endpoint into this builder.
    pub(crate) fn copy_from(&mut self, endpoint: &Endpoint) {
        self.endpoint = endpoint.clone();
    }

    /// Snapshot the current endpoint.
    #[must_use]
    pub fn freeze(&self) -> Endpoint {
        self.endpoint.clone()
    }

    fn validate(&self, coordinate: &Coordinate) -> Result<(), SargError> {
        match coordinate {
            Coordinate::Param(param) => {
                // NOTE: nullability is part of the match; relax if planners
                // start binding nullable parameters against NOT NULL columns.
                if param.domain != self.domain {
                    return Err(SargError::ParamType {
                        index: param.index,
                        domain: self.domain.ty,
                        param: param.domain.ty,
                    });
                }
            }
            Coordinate::Literal(value) => {
                if !self.domain.can_assign_from(value) {
                    return Err(SargError::CoordinateType {
                        domain: self.domain.ty,
                        coordinate: value.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
