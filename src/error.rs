use thiserror::Error;

/// Result alias for `survey_cluster`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by encoding, clustering and analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Requested cluster count was zero or negative.
    #[error("invalid cluster count {requested}: must be at least 1")]
    InvalidClusterCount {
        /// Requested count.
        requested: i64,
    },

    /// A question declared a type outside {text, integer, single, multiple}.
    #[error("question '{question_id}' has unknown type '{type_name}'")]
    UnknownQuestionType {
        /// Offending question.
        question_id: String,
        /// Type name as declared.
        type_name: String,
    },

    /// Too few responses for a meaningful analysis.
    #[error("insufficient data: {responses} response(s), at least 2 required")]
    DegenerateInput {
        /// Number of responses supplied.
        responses: usize,
    },

    /// A response belongs to a different survey than the one analyzed.
    #[error("response '{response_id}' belongs to survey '{found}', expected '{expected}'")]
    SurveyMismatch {
        /// Offending response.
        response_id: String,
        /// Survey being analyzed.
        expected: String,
        /// Survey the response points at.
        found: String,
    },

    /// Clustering method name not recognized.
    #[error("unknown clustering method '{0}'")]
    UnknownMethod(String),

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
