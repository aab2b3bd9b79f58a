//! Frequency resolution from table identifiers.

use cmor_model::{Result, ValidationError};

/// Known prefix marking primary/experimental tables. Not in capitals, so it
/// would otherwise be swallowed into the frequency token.
const EXPERIMENTAL_TABLE_PREFIX: &str = "Prim";

/// Extracts the frequency code embedded in a table identifier.
///
/// The code is the first maximal run of lowercase ASCII letters and digits
/// in the table name (`Amon` -> `mon`, `6hrPlevPt` -> `6hr`, `Primday` ->
/// `day`). Uppercase letters are schema markers, not part of the token.
/// Pure and total over strings; the only failure is a name with no such
/// run at all.
pub fn resolve_frequency(table_id: &str) -> Result<String> {
    let stripped = table_id
        .strip_prefix(EXPERIMENTAL_TABLE_PREFIX)
        .unwrap_or(table_id);

    let is_token_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let Some(start) = stripped.find(is_token_char) else {
        return Err(ValidationError::UnresolvedFrequency {
            table_id: table_id.to_string(),
        });
    };
    let rest = &stripped[start..];
    let end = rest.find(|c: char| !is_token_char(c)).unwrap_or(rest.len());
    Ok(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_lowercase_run() {
        assert_eq!(resolve_frequency("Amon").unwrap(), "mon");
        assert_eq!(resolve_frequency("day").unwrap(), "day");
        assert_eq!(resolve_frequency("6hrPlev").unwrap(), "6hr");
        assert_eq!(resolve_frequency("CFday").unwrap(), "day");
        assert_eq!(resolve_frequency("Oclim").unwrap(), "clim");
    }

    #[test]
    fn strips_experimental_prefix() {
        assert_eq!(resolve_frequency("Primday").unwrap(), "day");
        assert_eq!(resolve_frequency("PrimdayPt").unwrap(), "day");
        assert_eq!(resolve_frequency("PrimO6hr").unwrap(), "6hr");
        // Prefix only counts at the start of the name.
        assert_eq!(resolve_frequency("monPrim").unwrap(), "mon");
    }

    #[test]
    fn fails_without_any_token() {
        let error = resolve_frequency("LIMO").unwrap_err();
        assert!(matches!(
            error,
            ValidationError::UnresolvedFrequency { ref table_id } if table_id == "LIMO"
        ));
    }
}
