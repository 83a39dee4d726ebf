use thiserror::Error;

/// Why a set of orbital elements cannot describe a closed ellipse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitViolation {
    #[error("eccentricity {0} is outside [0, 1)")]
    Eccentricity(f64),

    #[error("semi-major axis {0} must be positive")]
    SemiMajorAxis(f64),

    #[error("inclination {0} is not finite")]
    Inclination(f64),
}

/// Failure of the path sampler. Carries no body name; the engine adds it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("sample count must be positive, got {0}")]
    InvalidResolution(usize),
}

/// Everything that can stop an orrery from being built.
///
/// All variants are construction-time: once an [`Orrery`](crate::Orrery)
/// exists, ticking cannot fail.
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Invalid orbit for body '{body}': {reason}")]
    InvalidOrbit {
        body: String,
        #[source]
        reason: OrbitViolation,
    },

    #[error("Body '{body}' names parent '{parent}', which is not in the catalog")]
    MissingParent { body: String, parent: String },

    #[error("Invalid orbit resolution for body '{body}': {sample_count} samples")]
    InvalidResolution { body: String, sample_count: usize },

    #[error("Body '{0}' appears more than once in the catalog")]
    DuplicateBody(String),

    #[error("Body '{0}' is its own ancestor")]
    CyclicHierarchy(String),

    #[error("Unknown body '{0}'")]
    UnknownBody(String),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrreryError>;

impl OrreryError {
    /// Attach a body name to a sampler failure.
    pub fn for_body(body: &str, err: SampleError) -> Self {
        match err {
            SampleError::InvalidResolution(sample_count) => OrreryError::InvalidResolution {
                body: body.to_string(),
                sample_count,
            },
        }
    }

    /// Name of the body the error is about, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            OrreryError::InvalidOrbit { body, .. }
            | OrreryError::MissingParent { body, .. }
            | OrreryError::InvalidResolution { body, .. } => Some(body),
            OrreryError::DuplicateBody(body)
            | OrreryError::CyclicHierarchy(body)
            | OrreryError::UnknownBody(body) => Some(body),
            OrreryError::Parse(_) => None,
        }
    }
}
