//! Branch codes offered by the lead form and the pincode each one files under.

use serde::Serialize;

const BRANCH_PINCODES: [(&str, &str); 35] = [
    ("CBE-GANDHIPURAM", "641014"),
    ("MADURAI", "625001"),
    ("agra", "282001"),
    ("akurdi", "411035"),
    ("ambala", "133001"),
    ("bangalore", "560001"),
    ("bhopal", "462001"),
    ("bikaner", "334001"),
    ("bilaspur", "495001"),
    ("chennai", "600001"),
    ("gwalior", "474001"),
    ("hyderabad", "500001"),
    ("indore", "452001"),
    ("itarsi", "461111"),
    ("jabalpur", "482001"),
    ("jaipur", "302001"),
    ("jodhpur", "342001"),
    ("kalyan", "421301"),
    ("lucknow", "226001"),
    ("mumbai", "400001"),
    ("nagpur", "440001"),
    ("nashik", "422001"),
    ("new-delhi", "110001"),
    ("noida", "201301"),
    ("panchkula", "134109"),
    ("pithampur", "454775"),
    ("pune", "411001"),
    ("raipur", "492001"),
    ("ratlam", "457001"),
    ("rohtak", "124001"),
    ("surat", "395001"),
    ("vadodara", "390001"),
    ("vasai", "401202"),
    ("vidisha", "464001"),
    ("vijaywada", "520001"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub code: &'static str,
    pub pincode: &'static str,
}

/// Pincode for a branch code, or an empty string when the code is unmapped.
/// Codes are matched case-sensitively, exactly as the form emits them.
pub fn resolve_pincode(branch_code: &str) -> &'static str {
    BRANCH_PINCODES
        .binary_search_by(|(code, _)| (*code).cmp(branch_code))
        .map(|index| BRANCH_PINCODES[index].1)
        .unwrap_or("")
}

/// All branches, ordered by code.
pub fn branches() -> impl Iterator<Item = Branch> {
    BRANCH_PINCODES
        .iter()
        .map(|&(code, pincode)| Branch { code, pincode })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_lookup() {
        assert!(BRANCH_PINCODES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn resolves_known_branches() {
        assert_eq!(resolve_pincode("mumbai"), "400001");
        assert_eq!(resolve_pincode("CBE-GANDHIPURAM"), "641014");
        assert_eq!(resolve_pincode("vijaywada"), "520001");
    }

    #[test]
    fn unmapped_or_differently_cased_codes_resolve_empty() {
        assert_eq!(resolve_pincode("atlantis"), "");
        assert_eq!(resolve_pincode("Mumbai"), "");
        assert_eq!(resolve_pincode(""), "");
    }

    #[test]
    fn lists_every_branch() {
        let listed: Vec<Branch> = branches().collect();
        assert_eq!(listed.len(), 35);
        assert_eq!(listed[0].code, "CBE-GANDHIPURAM");
    }
}
