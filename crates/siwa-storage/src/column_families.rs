//! Column family definitions.

/// User records: `user_<provider_user_id>` → UserRecord
pub const CF_USER_RECORDS: &str = "user_records";

/// Get all column family names
pub fn all_column_families() -> Vec<&'static str> {
    vec![CF_USER_RECORDS]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_column_families() {
        let cfs = all_column_families();
        let mut unique = std::collections::HashSet::new();

        for cf in &cfs {
            assert!(unique.insert(cf), "Duplicate column family: {}", cf);
        }
    }
}
