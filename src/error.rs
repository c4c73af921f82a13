/// Every failure the ranking engine can report.
///
/// Directive errors are raised while a query is being configured, before any
/// storage read. Selection errors are raised when an algorithm runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unknown directive '{0}'")]
    UnknownDirective(String),
    #[error("Unknown attribute '{attribute}' in directive '{directive}'")]
    UnknownAttribute { directive: String, attribute: String },
    #[error("Invalid filter value '{value}' for '{directive}': must be a number")]
    InvalidFilterValue { directive: String, value: String },
    #[error("Invalid sort direction '{value}' for '{directive}': must be 1 or -1")]
    InvalidDirection { directive: String, value: String },
    #[error("Invalid weight '{value}' for '{directive}': must be a non-negative number")]
    InvalidWeight { directive: String, value: String },
    #[error("Invalid ranking flag '{value}' for '{directive}': must be 0 or 1")]
    InvalidFlag { directive: String, value: String },
    #[error("Invalid limit '{0}': must be a non-negative integer")]
    InvalidLimit(String),
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    #[error("score_dev needs at least 2 non-zero weights, got {0}")]
    InsufficientSamples(usize),
    #[error("No ranking attributes selected; set at least one rank_<attribute>=1")]
    EmptyRankingSet,
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl Error {
    /// True for errors caused by bad configuration or directives rather than
    /// by storage or selection.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownDirective(_)
                | Error::UnknownAttribute { .. }
                | Error::InvalidFilterValue { .. }
                | Error::InvalidDirection { .. }
                | Error::InvalidWeight { .. }
                | Error::InvalidFlag { .. }
                | Error::InvalidLimit(_)
                | Error::InvalidCatalog(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
