use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration regex")
});

/// Converts a `PT#H#M#S` duration into total seconds.
///
/// Any subset of the hour, minute and second parts may be present; absent
/// parts count as zero. Only the prefix has to match, so trailing garbage is
/// ignored. Input that does not start with `PT` (including day-based values
/// such as `P1DT2H` and the live-stream placeholder `P0D`) yields `0`.
/// Parts too large for `u64` saturate.
#[must_use]
pub fn parse_iso8601_duration(duration: &str) -> u64 {
    let Some(caps) = DURATION_RE.captures(duration) else {
        return 0;
    };
    let part = |idx: usize| -> u64 {
        caps.get(idx)
            .map_or(0, |m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
    };
    part(1)
        .saturating_mul(3600)
        .saturating_add(part(2).saturating_mul(60))
        .saturating_add(part(3))
}
