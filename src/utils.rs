use crate::{
    Error, Result,
    types::{ResourceKind, ResourcePath},
};

/// Parses a `<type>/<id>` value such as `album/123`.
///
/// The type must be one of `allowed`; both parts must be non-empty and the
/// value must contain exactly one `/`.
pub fn parse_resource_path(value: &str, allowed: &[ResourceKind]) -> Result<ResourcePath> {
    let expected = allowed
        .iter()
        .map(|k| format!("'{}/ID'", k))
        .collect::<Vec<_>>()
        .join(" or ");

    let Some((kind, id)) = value.trim().split_once('/') else {
        return Err(Error::Input(format!(
            "invalid format '{}', use {}",
            value, expected
        )));
    };

    if id.is_empty() || id.contains('/') {
        return Err(Error::Input(format!(
            "invalid format '{}', use {}",
            value, expected
        )));
    }

    match ResourceKind::from_name(kind) {
        Some(kind) if allowed.contains(&kind) => Ok(ResourcePath {
            kind,
            id: id.to_string(),
        }),
        _ => Err(Error::Input(format!(
            "invalid item type '{}', use {}",
            kind, expected
        ))),
    }
}

/// Converts an ISO-8601 duration (`PT1H2M3S`, `P1DT2H`, `PT0S`) to whole
/// seconds. Fractional seconds are truncated. Years and months have no fixed
/// length and are rejected.
pub fn parse_iso8601_duration(value: &str) -> Option<u64> {
    let rest = value.strip_prefix('P')?;

    let mut total: u64 = 0;
    let mut number = String::new();
    let mut in_time = false;
    let mut components = 0;

    for c in rest.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'T' if !in_time && number.is_empty() => in_time = true,
            _ => {
                let unit: u64 = match (in_time, c) {
                    (false, 'W') => 604_800,
                    (false, 'D') => 86_400,
                    (true, 'H') => 3_600,
                    (true, 'M') => 60,
                    (true, 'S') => 1,
                    _ => return None,
                };
                let whole = number.split('.').next().unwrap_or_default();
                if whole.is_empty() {
                    return None;
                }
                let amount: u64 = whole.parse().ok()?;
                total = total.checked_add(amount.checked_mul(unit)?)?;
                number.clear();
                components += 1;
            }
        }
    }

    if !number.is_empty() || components == 0 {
        return None;
    }
    Some(total)
}
