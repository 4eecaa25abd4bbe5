use crate::{
    MAX_DECIMAL_SCALE,
    value::{Value, ValueFamily},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// SargType
///
/// Scalar type of the variable a sarg ranges over.
/// Only the properties the algebra needs are modelled: the type family,
/// the declared scale of exact numerics, and the approximate flag.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SargType {
    Boolean,
    Integer,
    Decimal { scale: u32 },
    Float,
    Text,
}

impl SargType {
    /// Declared scale of an exact numeric type.
    #[must_use]
    pub const fn scale(self) -> Option<u32> {
        match self {
            Self::Integer => Some(0),
            Self::Decimal { scale } => Some(if scale > MAX_DECIMAL_SCALE {
                MAX_DECIMAL_SCALE
            } else {
                scale
            }),
            Self::Boolean | Self::Float | Self::Text => None,
        }
    }

    #[must_use]
    pub const fn is_exact_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal { .. })
    }

    #[must_use]
    pub const fn is_approximate(self) -> bool {
        matches!(self, Self::Float)
    }

    /// Whether a literal may be stored into a column of this type.
    ///
    /// The null literal is assignable everywhere; approximate literals are
    /// not assignable to exact numerics.
    #[must_use]
    pub const fn can_assign_from(self, value: &Value) -> bool {
        match value.family() {
            ValueFamily::Null => true,
            ValueFamily::Bool => matches!(self, Self::Boolean),
            ValueFamily::Text => matches!(self, Self::Text),
            ValueFamily::Numeric => match self {
                Self::Integer | Self::Decimal { .. } => !matches!(value, Value::Float64(_)),
                Self::Float => true,
                Self::Boolean | Self::Text => false,
            },
        }
    }
}

impl fmt::Display for SargType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Integer => write!(f, "INTEGER"),
            Self::Decimal { scale } => write!(f, "DECIMAL(_, {scale})"),
            Self::Float => write!(f, "DOUBLE"),
            Self::Text => write!(f, "VARCHAR"),
        }
    }
}

///
/// SargDomain
///
/// Boundary type of one sarg variable: its scalar type plus nullability.
/// Read-only once built; safe to share across concurrent analyses.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SargDomain {
    pub ty: SargType,
    pub nullable: bool,
}

impl SargDomain {
    #[must_use]
    pub const fn new(ty: SargType, nullable: bool) -> Self {
        Self { ty, nullable }
    }

    #[must_use]
    pub const fn nullable(ty: SargType) -> Self {
        Self::new(ty, true)
    }

    #[must_use]
    pub const fn not_null(ty: SargType) -> Self {
        Self::new(ty, false)
    }

    #[must_use]
    pub const fn can_assign_from(&self, value: &Value) -> bool {
        self.ty.can_assign_from(value)
    }
}

impl fmt::Display for SargDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} NOT NULL", self.ty)
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn exact_domains_reject_approximate_literals() {
        let float = Value::float(1.5).expect("finite");

        assert!(!SargType::Integer.can_assign_from(&float));
        assert!(!SargType::Decimal { scale: 2 }.can_assign_from(&float));
        assert!(SargType::Float.can_assign_from(&float));
        assert!(SargType::Integer.can_assign_from(&Value::Decimal(Decimal::new(59, 1))));
    }

    #[test]
    fn null_literal_is_assignable_everywhere() {
        for ty in [
            SargType::Boolean,
            SargType::Integer,
            SargType::Decimal { scale: 3 },
            SargType::Float,
            SargType::Text,
        ] {
            assert!(ty.can_assign_from(&Value::Null), "{ty}");
        }
    }

    #[test]
    fn scale_is_clamped_to_backend_precision() {
        assert_eq!(SargType::Integer.scale(), Some(0));
        assert_eq!(SargType::Decimal { scale: 40 }.scale(), Some(MAX_DECIMAL_SCALE));
        assert_eq!(SargType::Float.scale(), None);
    }

    #[test]
    fn domain_deserializes_from_config_shaped_json() {
        let domain: SargDomain =
            serde_json::from_str(r#"{"ty":{"Decimal":{"scale":2}},"nullable":false}"#)
                .expect("domain json should decode");

        assert_eq!(domain, SargDomain::not_null(SargType::Decimal { scale: 2 }));
        assert_eq!(domain.to_string(), "DECIMAL(_, 2) NOT NULL");
    }
}
