use crate::Family;

/// Which moment a [`QueryError::UndefinedMoment`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Moment {
    #[display("mean")]
    Mean,
    #[display("variance")]
    Variance,
}

/// Errors reported by distribution queries.
///
/// Every variant is an input error: the caller has to fix the spec or the
/// query argument, retrying the same call never succeeds.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum QueryError {
    /// A distribution parameter or a query argument is outside its domain.
    #[display("invalid parameter '{name}' for {family} distribution: {reason}")]
    InvalidParameter {
        family: Family,
        name: String,
        reason: String,
    },
    /// The requested moment does not exist for the given parameters.
    #[display("{moment} of {family} distribution is undefined: {reason}")]
    UndefinedMoment {
        family: Family,
        moment: Moment,
        reason: String,
    },
    /// The query only makes sense on a discrete support.
    #[display("{query} query is not supported for continuous {family} distribution")]
    UnsupportedQuery { family: Family, query: &'static str },
}

impl QueryError {
    pub(crate) fn invalid<N, R>(family: Family, name: N, reason: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self::InvalidParameter {
            family,
            name: name.into(),
            reason: reason.into(),
        }
    }
}
