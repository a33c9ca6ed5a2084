//! Per-item validation against the request constraints.

use std::path::PathBuf;

use super::{Constraints, ResultCode, StagedFile};

/// Outcome of validating one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// File may be placed.
    Accepted {
        /// Staging location of the accepted file.
        temp_path: PathBuf,
    },
    /// File is rejected with the given code.
    Rejected {
        /// Reason for rejection.
        code: ResultCode,
    },
}

impl ValidationOutcome {
    /// Whether the file was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted { .. })
    }
}

/// Check a declared content type and size.
///
/// The type is checked first, so an oversized file of the wrong type
/// reports [`ResultCode::UnsupportedType`].
pub fn check(constraints: &Constraints, declared_type: &str, size: u64) -> Result<(), ResultCode> {
    let declared_type = declared_type.trim();

    if !constraints
        .allowed_types
        .iter()
        .any(|allowed| allowed.trim() == declared_type)
    {
        return Err(ResultCode::UnsupportedType);
    }

    if size > constraints.max_size {
        return Err(ResultCode::FileTooLarge);
    }

    Ok(())
}

/// Classify one staged file.
pub fn validate(constraints: &Constraints, file: &StagedFile) -> ValidationOutcome {
    match check(constraints, &file.declared_type, file.size) {
        Ok(()) => ValidationOutcome::Accepted {
            temp_path: file.temp_path.clone(),
        },
        Err(code) => ValidationOutcome::Rejected { code },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> Constraints {
        Constraints {
            project: "site1".to_string(),
            category: "banner".to_string(),
            max_size: 2_000_000,
            allowed_types: vec!["image/png".to_string(), "image/jpeg".to_string()],
        }
    }

    #[test]
    fn test_accepts_allowed_type_within_limit() {
        let file = StagedFile::new("/tmp/a.png", "image/png", 1_500_000);
        assert_eq!(
            validate(&constraints(), &file),
            ValidationOutcome::Accepted {
                temp_path: PathBuf::from("/tmp/a.png")
            }
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(check(&constraints(), "image/jpeg", 2_000_000), Ok(()));
        assert_eq!(
            check(&constraints(), "image/jpeg", 2_000_001),
            Err(ResultCode::FileTooLarge)
        );
    }

    #[test]
    fn test_rejects_unsupported_type_regardless_of_size() {
        for size in [0, 10, 5_000_000] {
            assert_eq!(
                check(&constraints(), "image/gif", size),
                Err(ResultCode::UnsupportedType)
            );
        }
    }

    #[test]
    fn test_type_match_is_exact() {
        assert_eq!(
            check(&constraints(), "IMAGE/PNG", 1),
            Err(ResultCode::UnsupportedType)
        );
        assert_eq!(
            check(&constraints(), "image/png; charset=binary", 1),
            Err(ResultCode::UnsupportedType)
        );
    }

    #[test]
    fn test_declared_type_is_trimmed() {
        assert_eq!(check(&constraints(), " image/png ", 1), Ok(()));
    }

    #[test]
    fn test_zero_max_only_accepts_empty_files() {
        let mut c = constraints();
        c.max_size = 0;
        assert_eq!(check(&c, "image/png", 0), Ok(()));
        assert_eq!(check(&c, "image/png", 1), Err(ResultCode::FileTooLarge));
    }

    #[test]
    fn test_rejected_outcome() {
        let file = StagedFile::new("/tmp/a.png", "image/png", 3_000_000);
        let outcome = validate(&constraints(), &file);
        assert!(!outcome.is_accepted());
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected {
                code: ResultCode::FileTooLarge
            }
        );
    }
}
