use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Name of the saved document: `{name_with_underscores}_DietPlan_{YYYY-MM-DD}.pdf`.
///
/// Every run of whitespace in the client name becomes a single underscore. Path
/// separators are replaced as well so the name always stays inside the output directory.
///
/// ```
/// use chrono::NaiveDate;
/// use dietplan_gen::output_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
/// assert_eq!(output_file_name("Asha  Rao", date), "Asha_Rao_DietPlan_2025-11-01.pdf");
/// ```
pub fn output_file_name(client_name: &str, date: NaiveDate) -> String {
    let name = whitespace_runs().replace_all(client_name, "_");
    let name = name.replace(['/', '\\'], "_");
    format!("{name}_DietPlan_{}.pdf", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
    }

    #[test]
    fn matches_expected_pattern() {
        assert_eq!(
            output_file_name("Ravi Kumar", date()),
            "Ravi_Kumar_DietPlan_2026-01-09.pdf"
        );
    }

    #[test]
    fn whitespace_runs_collapse_to_one_underscore() {
        assert_eq!(
            output_file_name("Mary\tJane \n Watson", date()),
            "Mary_Jane_Watson_DietPlan_2026-01-09.pdf"
        );
    }

    #[test]
    fn separators_cannot_escape_the_output_directory() {
        assert_eq!(
            output_file_name("../etc/passwd", date()),
            ".._etc_passwd_DietPlan_2026-01-09.pdf"
        );
    }
}
