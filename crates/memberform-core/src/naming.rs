//! Field naming contract.
//!
//! Backends consume the submitted pairs by these exact names, so the
//! scheme is fixed: input `i` is `member_number_<i>`, its remove control
//! is `remove_number_<i>`, with `i` ranging over the contiguous live set.

pub const FIELD_NAME_PREFIX: &str = "member_number_";
pub const REMOVE_NAME_PREFIX: &str = "remove_number_";

pub fn field_name(index: usize) -> String {
    format!("{FIELD_NAME_PREFIX}{index}")
}

pub fn remove_name(index: usize) -> String {
    format!("{REMOVE_NAME_PREFIX}{index}")
}

/// Parse `member_number_<i>` back to `i`. Rejects anything the emitter
/// never produces: index 0, leading zeros, non-digits.
pub fn parse_field_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(FIELD_NAME_PREFIX)?;
    parse_index(digits)
}

/// Parse `remove_number_<i>` back to `i`.
pub fn parse_remove_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(REMOVE_NAME_PREFIX)?;
    parse_index(digits)
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    if index == 0 {
        return None;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        assert_eq!(field_name(1), "member_number_1");
        assert_eq!(field_name(10), "member_number_10");
        assert_eq!(remove_name(3), "remove_number_3");
        assert_eq!(parse_field_index("member_number_7"), Some(7));
        assert_eq!(parse_remove_index("remove_number_10"), Some(10));
    }

    #[test]
    fn parse_rejects_foreign_names() {
        assert_eq!(parse_field_index("member_number_"), None);
        assert_eq!(parse_field_index("member_number_0"), None);
        assert_eq!(parse_field_index("member_number_01"), None);
        assert_eq!(parse_field_index("member_number_-1"), None);
        assert_eq!(parse_field_index("member_number_1x"), None);
        assert_eq!(parse_field_index("remove_number_1"), None);
        assert_eq!(parse_field_index("tickets_type"), None);
    }
}
