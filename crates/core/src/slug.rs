//! URL-safe slug generation for public-facing content routes.
//!
//! Content names are Vietnamese, so generation first folds diacritics to
//! their ASCII base letter ("Trần Hưng Đạo" -> "tran-hung-dao") before the
//! usual lowercase/hyphenate/collapse steps.

use crate::error::CoreError;

/// Maximum slug length accepted by validation.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Generate a URL-safe slug from a human-readable name.
///
/// Folds Vietnamese diacritics to ASCII, converts to lowercase, replaces
/// everything non-alphanumeric with hyphens, collapses consecutive hyphens,
/// and trims leading/trailing hyphens.
pub fn generate_slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(fold_vietnamese)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    // Trim leading/trailing hyphens.
    result.trim_matches('-').to_string()
}

/// Validate a client-supplied slug: non-empty, bounded length, and only
/// lowercase ASCII alphanumerics and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug may only contain lowercase letters, digits, and hyphens".into(),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(CoreError::Validation(
            "Slug must not start or end with a hyphen".into(),
        ));
    }
    Ok(())
}

/// Map a lowercase Vietnamese letter to its ASCII base letter.
///
/// Characters outside the Vietnamese alphabet pass through unchanged.
fn fold_vietnamese(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ'
        | 'ấ' | 'ẩ' | 'ẫ' | 'ậ' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ'
        | 'ớ' | 'ở' | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'đ' => 'd',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_vietnamese_names() {
        assert_eq!(generate_slug("Trần Hưng Đạo"), "tran-hung-dao");
        assert_eq!(generate_slug("Ngô Quyền"), "ngo-quyen");
        assert_eq!(generate_slug("Hai Bà Trưng"), "hai-ba-trung");
    }

    #[test]
    fn collapses_and_trims_hyphens() {
        assert_eq!(generate_slug("  Lý  Thường   Kiệt!! "), "ly-thuong-kiet");
        assert_eq!(generate_slug("--a--b--"), "a-b");
    }

    #[test]
    fn accepts_valid_slug() {
        assert!(validate_slug("tran-hung-dao").is_ok());
        assert!(validate_slug("ao-dai-2024").is_ok());
    }

    #[test]
    fn rejects_invalid_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Trần").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug(&"x".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }
}
