use crate::schema::BRANCH_ID_WIDTH;

/// Left-pad a branch identifier with zeros to the fixed code width.
/// Identifiers already at or past the width are returned as-is.
pub fn normalize_branch_id(raw: &str) -> String {
    let id = raw.trim();
    format!("{id:0>width$}", width = BRANCH_ID_WIDTH)
}

/// Letters-only residue of an account identifier, used to pick the product line.
pub fn classification_tag(account_id: &str) -> String {
    account_id
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}
