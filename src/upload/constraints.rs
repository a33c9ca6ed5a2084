//! Constraint parsing: turns raw request fields into a validated [`Constraints`].

use super::{RawFields, ResultCode, StagedFile};

/// Validated per-request constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraints {
    /// Project directory segment.
    pub project: String,
    /// Category directory segment.
    pub category: String,
    /// Maximum accepted size in bytes (inclusive).
    pub max_size: u64,
    /// Accepted content types, trimmed, in declared order.
    pub allowed_types: Vec<String>,
}

/// Validate request-level fields.
///
/// Checks run in this order, first failure wins:
/// 1. no field set at all → [`ResultCode::MissingFields`]
/// 2. any of project/category/max/ext absent, blank, or malformed → [`ResultCode::InvalidFields`]
/// 3. no files → [`ResultCode::NoFiles`]
pub fn parse(
    fields: Option<&RawFields>,
    files: Option<&[StagedFile]>,
) -> Result<Constraints, ResultCode> {
    let fields = fields.ok_or(ResultCode::MissingFields)?;

    let project = required(&fields.project)?;
    let category = required(&fields.category)?;
    let max = required(&fields.max)?;
    let ext = required(&fields.ext)?;

    if !is_safe_segment(project) || !is_safe_segment(category) {
        return Err(ResultCode::InvalidFields);
    }

    let max_size = max.parse::<u64>().map_err(|_| ResultCode::InvalidFields)?;

    let allowed_types = split_types(ext);
    if allowed_types.is_empty() {
        return Err(ResultCode::InvalidFields);
    }

    match files {
        Some(files) if !files.is_empty() => {}
        _ => return Err(ResultCode::NoFiles),
    }

    Ok(Constraints {
        project: project.to_string(),
        category: category.to_string(),
        max_size,
        allowed_types,
    })
}

/// Absent or blank after trimming both fail.
fn required(value: &Option<String>) -> Result<&str, ResultCode> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ResultCode::InvalidFields),
    }
}

fn split_types(ext: &str) -> Vec<String> {
    ext.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A segment must name exactly one directory below its parent.
fn is_safe_segment(segment: &str) -> bool {
    segment != "."
        && segment != ".."
        && !segment
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
}
