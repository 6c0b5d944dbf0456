use crate::error::DashError;

/// Shallow read-only check for operator-supplied SQL.
///
/// Accepts exactly one statement whose leading keyword is SELECT. This is a
/// deliberate strengthening of a bare prefix check: stacked statements and
/// `SELECT ... INTO` are rejected. It is still not a parser; the database
/// role the dashboard connects as should be read-restricted where that
/// matters.
pub fn ensure_read_only(sql: &str) -> Result<&str, DashError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(DashError::RejectedQuery("empty statement".to_string()));
    }

    let leading = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default();
    if !leading.eq_ignore_ascii_case("select") {
        return Err(DashError::RejectedQuery(
            "only SELECT statements are allowed".to_string(),
        ));
    }

    // A semicolon followed by anything but whitespace is a stacked statement.
    if let Some((_, rest)) = trimmed.split_once(';')
        && !rest.trim().is_empty()
    {
        return Err(DashError::RejectedQuery(
            "multiple statements are not allowed".to_string(),
        ));
    }

    // SELECT ... INTO OUTFILE / INTO @var writes despite the SELECT prefix.
    // The check is token-level, so an identifier literally named `into` must
    // be backtick-quoted to pass.
    if trimmed
        .split_whitespace()
        .any(|word| word.eq_ignore_ascii_case("into"))
    {
        return Err(DashError::RejectedQuery(
            "SELECT ... INTO is not allowed; backtick-quote any identifier named `into` and retry"
                .to_string(),
        ));
    }

    Ok(trimmed.trim_end_matches(';').trim_end())
}
