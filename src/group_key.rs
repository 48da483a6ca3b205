use super::records::NOT_APPLICABLE;

const SECTION_MARKER: &str = "Section_";
const SECTION_TOKEN: &str = "Section";

/// Cohort and section derived from a group key such as `BAPM_2023_Section_A`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupKey {
    pub cohort: String,
    pub section: String,
}

/// Splits a composite group key into cohort and section.
///
/// Grammar, over the underscore-separated tokens of the key:
///   `<cohort tokens> Section <section token> [ignored tokens]`
///   `<cohort tokens>`
/// The first `Section` token wins when there are several. A key that does not
/// match the first form keeps every token in the cohort and gets `N/A` as its
/// section. Never fails.
pub fn parse(key: &str) -> GroupKey {
    if key.contains(SECTION_MARKER) {
        let tokens: Vec<&str> = key.split('_').collect();
        if let Some(index) = tokens.iter().position(|token| *token == SECTION_TOKEN) {
            let section = match tokens.get(index + 1) {
                Some(token) if !token.is_empty() => token.to_string(),
                // "Section" with nothing after it
                _ => NOT_APPLICABLE.to_string(),
            };
            let prefix = tokens[..index].join(" ");
            // "Section_A", "_Section_A": nothing usable before the marker
            let cohort = if prefix.trim().is_empty() {
                spaced(key)
            } else {
                prefix
            };
            return GroupKey { cohort, section };
        }
    }

    GroupKey {
        cohort: spaced(key),
        section: NOT_APPLICABLE.to_string(),
    }
}

fn spaced(key: &str) -> String {
    key.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(cohort: &str, section: &str) -> GroupKey {
        GroupKey {
            cohort: cohort.to_string(),
            section: section.to_string(),
        }
    }

    #[test]
    fn test_cohort_with_section() {
        assert_eq!(parse("BAPM_2023_Section_A"), group("BAPM 2023", "A"));
        assert_eq!(parse("MSc_Data_Science_2024_Section_B2"), group("MSc Data Science 2024", "B2"));
    }

    #[test]
    fn test_cohort_without_section() {
        assert_eq!(parse("MBA_2024"), group("MBA 2024", "N/A"));
        assert_eq!(parse("Exchange"), group("Exchange", "N/A"));
    }

    #[test]
    fn test_trailing_section_token_has_no_section() {
        assert_eq!(parse("BAPM_2023_Section_"), group("BAPM 2023", "N/A"));
    }

    #[test]
    fn test_trailing_section_without_underscore_is_plain_cohort() {
        // No "Section_" substring, so the fallback rule applies.
        assert_eq!(parse("BAPM_2023_Section"), group("BAPM 2023 Section", "N/A"));
    }

    #[test]
    fn test_first_section_token_wins() {
        assert_eq!(parse("BAPM_Section_A_Section_B"), group("BAPM", "A"));
    }

    #[test]
    fn test_tokens_after_section_are_ignored() {
        assert_eq!(parse("BAPM_2023_Section_A_Evening"), group("BAPM 2023", "A"));
    }

    #[test]
    fn test_marker_without_exact_section_token_falls_back() {
        assert_eq!(parse("XSection_A"), group("XSection A", "N/A"));
    }

    #[test]
    fn test_section_without_cohort_keeps_whole_key_as_cohort() {
        assert_eq!(parse("Section_A"), group("Section A", "A"));
    }

    #[test]
    fn test_blank_cohort_prefix_keeps_whole_key_as_cohort() {
        assert_eq!(parse("_Section_A"), group(" Section A", "A"));
        assert_eq!(parse("__Section_A"), group("  Section A", "A"));
        for key in ["_Section_A", "__Section_A", " _Section_B"] {
            assert!(!parse(key).cohort.trim().is_empty(), "{key}");
        }
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(parse(""), group("", "N/A"));
    }
}
