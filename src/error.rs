//! Error taxonomy shared by the math, kinematics and view layers.

/// Failures raised by matrix, vector and kinematics operations.
///
/// Every variant is local and non-retryable: the operation has no valid
/// result, and the receiver is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    /// DH row or joint-angle access outside `1..=6`.
    #[error("invalid joint index {0}: expected 1..=6")]
    InvalidJointIndex(usize),

    /// Projection matrix requested for an empty or inverted viewing volume.
    #[error("degenerate frustum: {0}")]
    DegenerateFrustum(&'static str),

    /// Inverse of a matrix whose determinant is exactly zero.
    #[error("matrix is singular")]
    SingularMatrix,

    /// Homogeneous vector with a `w` other than 0 (direction) or 1 (point).
    #[error("invalid homogeneous coordinate w = {0}: expected 0 or 1")]
    InvalidHomogeneousCoordinate(f32),

    /// Wrist centre outside the annulus the arm can reach.
    #[error("target out of workspace: wrist distance {distance} not in [{min_reach}, {max_reach}]")]
    OutOfWorkspace {
        distance: f32,
        min_reach: f32,
        max_reach: f32,
    },

    /// In-place inverse requested with the source equal to the destination.
    #[error("source and destination are the same matrix: use invert() instead")]
    AliasedOperand,

    /// Look-at with the eye on the centre, or the up vector along the sight line.
    #[error("degenerate view: eye, centre and up do not span a basis")]
    DegenerateView,

    /// Matrix bank slot past the end of the bank.
    #[error("matrix slot {slot} out of range (bank holds {len})")]
    SlotOutOfRange { slot: usize, len: usize },

    /// Configuration or trajectory file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, KinematicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = KinematicsError::InvalidJointIndex(7);
        assert_eq!(e.to_string(), "invalid joint index 7: expected 1..=6");

        let e = KinematicsError::SingularMatrix;
        assert_eq!(e.to_string(), "matrix is singular");

        let e = KinematicsError::DegenerateFrustum("near <= 0");
        assert_eq!(e.to_string(), "degenerate frustum: near <= 0");

        let e = KinematicsError::InvalidHomogeneousCoordinate(2.0);
        assert_eq!(e.to_string(), "invalid homogeneous coordinate w = 2: expected 0 or 1");
    }

    #[test]
    fn out_of_workspace_reports_reach() {
        let e = KinematicsError::OutOfWorkspace {
            distance: 5.0,
            min_reach: 1.3,
            max_reach: 3.9,
        };
        let msg = e.to_string();
        assert!(msg.contains("5"));
        assert!(msg.contains("3.9"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<KinematicsError>();
    }
}
