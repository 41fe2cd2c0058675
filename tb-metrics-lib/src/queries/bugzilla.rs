use super::{BugQuery, QueryString, Rendering};
use crate::versions::VersionSet;

const REST_PATH: &str = "/rest/bug?include_fields=id,summary,status";
const BROWSABLE_PATH: &str = "/buglist.cgi?";

/// First custom-search field index used for status flags.
const FIRST_STATUS_FIELD: usize = 4;

const SEVERE: [&str; 4] = ["S1", "critical", "S2", "major"];

/// Words excluded from bug summaries and components in every bugzilla query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions {
    pub summary: Vec<String>,
    pub component: Vec<String>,
}

/// Build a bugzilla search URL for open defects affecting any of `status` versions.
///
/// Custom search field 1 excludes summary words, field 2 excludes component words, and
/// fields 4 onward form an OR group matching `cf_status_thunderbird_<version> = affected`.
#[must_use]
pub fn url(base_url: &str, query: BugQuery, status: &VersionSet, exclusions: &Exclusions, rendering: Rendering) -> String {
    let base = match rendering {
        Rendering::Api => format!("{}{REST_PATH}", base_url.trim_end_matches('/')),
        Rendering::Browsable => format!("{}{BROWSABLE_PATH}", base_url.trim_end_matches('/')),
    };

    let status_fields = FIRST_STATUS_FIELD..FIRST_STATUS_FIELD + status.len();
    let close_paren = FIRST_STATUS_FIELD + status.len();

    let mut qs = QueryString::new();
    let _ = qs
        .push("bug_type", "defect")
        .push("chfield", "[Bug creation]")
        .push("f1", "short_desc")
        .push("f2", "component")
        .push("f3", "OP");

    for (index, version) in status_fields.clone().zip(status.iter()) {
        let _ = qs.push(format!("f{index}"), format!("cf_status_thunderbird_{version}"));
    }

    let _ = qs.push(format!("f{close_paren}"), "CP").push("j3", "OR");

    for index in status_fields.clone() {
        let _ = qs.push(format!("o{index}"), "equals");
    }

    let _ = qs
        .push("resolution", "---")
        .push("v1", exclusions.summary.join(" "))
        .push("v2", exclusions.component.join(" "));

    for index in status_fields {
        let _ = qs.push(format!("v{index}"), "affected");
    }

    push_subtype(&mut qs, query);

    qs.render(&base, None)
}

fn push_subtype(qs: &mut QueryString, query: BugQuery) {
    let (keywords, keywords_type, severe) = match query {
        BugQuery::RegressionAll => ("regression", "allwords", false),
        BugQuery::RegressionSevere => ("regression", "allwords", true),
        BugQuery::NonRegressionAll => ("regression", "nowords", false),
        BugQuery::NonRegressionSevere => ("regression", "nowords", true),
        BugQuery::TopCrash => ("topcrash-thunderbird", "allwords", false),
        BugQuery::Performance => ("perf", "allwords", false),
        BugQuery::SecurityHigh => ("sec-crit sec-high", "anywords", false),
        BugQuery::SecurityLow => ("sec-moderate sec-low", "anywords", false),
        BugQuery::DataLoss => ("dataloss", "allwords", false),
    };

    let _ = qs.push("keywords", keywords).push("keywords_type", keywords_type);
    if severe {
        let _ = qs.push_each("bug_severity", SEVERE);
    }

    // fields 1 and 2 only exclude once their operators are set; regression-all leaves them unset
    if query != BugQuery::RegressionAll {
        let _ = qs.push("o1", "nowordssubstr").push("o2", "nowordssubstr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const BASE: &str = "https://bugzilla.mozilla.org";

    fn exclusions() -> Exclusions {
        Exclusions {
            summary: ["intermit", "perma", "assert", "debug", "ews"].map(String::from).to_vec(),
            component: ["add-on", "build", "upstream"].map(String::from).to_vec(),
        }
    }

    fn status() -> VersionSet {
        ["esr128", "128", "129"].into_iter().collect()
    }

    #[test]
    fn test_rest_url() {
        let url = url(BASE, BugQuery::Performance, &status(), &exclusions(), Rendering::Api);
        assert_eq!(
            url,
            "https://bugzilla.mozilla.org/rest/bug?include_fields=id,summary,status\
             &bug_type=defect&chfield=%5BBug%20creation%5D&f1=short_desc&f2=component&f3=OP\
             &f4=cf_status_thunderbird_esr128&f5=cf_status_thunderbird_128&f6=cf_status_thunderbird_129\
             &f7=CP&j3=OR&o4=equals&o5=equals&o6=equals&resolution=---\
             &v1=intermit%20perma%20assert%20debug%20ews&v2=add-on%20build%20upstream\
             &v4=affected&v5=affected&v6=affected\
             &keywords=perf&keywords_type=allwords&o1=nowordssubstr&o2=nowordssubstr"
        );
    }

    #[test]
    fn test_regression_all_rest_url() {
        let url = url(BASE, BugQuery::RegressionAll, &status(), &exclusions(), Rendering::Api);
        assert_eq!(
            url,
            "https://bugzilla.mozilla.org/rest/bug?include_fields=id,summary,status\
             &bug_type=defect&chfield=%5BBug%20creation%5D&f1=short_desc&f2=component&f3=OP\
             &f4=cf_status_thunderbird_esr128&f5=cf_status_thunderbird_128&f6=cf_status_thunderbird_129\
             &f7=CP&j3=OR&o4=equals&o5=equals&o6=equals&resolution=---\
             &v1=intermit%20perma%20assert%20debug%20ews&v2=add-on%20build%20upstream\
             &v4=affected&v5=affected&v6=affected\
             &keywords=regression&keywords_type=allwords"
        );
    }

    #[test]
    fn test_browsable_url() {
        let url = url(BASE, BugQuery::RegressionSevere, &status(), &exclusions(), Rendering::Browsable);
        assert!(url.starts_with("https://bugzilla.mozilla.org/buglist.cgi?bug_type=defect&"), "{url}");
        assert!(url.ends_with(
            "&keywords=regression&keywords_type=allwords\
             &bug_severity=S1&bug_severity=critical&bug_severity=S2&bug_severity=major\
             &o1=nowordssubstr&o2=nowordssubstr"
        ));
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let with_slash = url("https://bugzilla.mozilla.org/", BugQuery::TopCrash, &status(), &exclusions(), Rendering::Api);
        let without = url(BASE, BugQuery::TopCrash, &status(), &exclusions(), Rendering::Api);
        assert_eq!(with_slash, without);
    }

    #[test]
    fn test_each_subtype_has_its_own_block() {
        const EXCLUDE: &str = "&o1=nowordssubstr&o2=nowordssubstr";
        const SEVERITY: &str = "&bug_severity=S1&bug_severity=critical&bug_severity=S2&bug_severity=major";

        let blocks = [
            (BugQuery::RegressionAll, "keywords=regression&keywords_type=allwords".to_string()),
            (
                BugQuery::RegressionSevere,
                format!("keywords=regression&keywords_type=allwords{SEVERITY}{EXCLUDE}"),
            ),
            (BugQuery::NonRegressionAll, format!("keywords=regression&keywords_type=nowords{EXCLUDE}")),
            (
                BugQuery::NonRegressionSevere,
                format!("keywords=regression&keywords_type=nowords{SEVERITY}{EXCLUDE}"),
            ),
            (BugQuery::TopCrash, format!("keywords=topcrash-thunderbird&keywords_type=allwords{EXCLUDE}")),
            (BugQuery::Performance, format!("keywords=perf&keywords_type=allwords{EXCLUDE}")),
            (BugQuery::SecurityHigh, format!("keywords=sec-crit%20sec-high&keywords_type=anywords{EXCLUDE}")),
            (BugQuery::SecurityLow, format!("keywords=sec-moderate%20sec-low&keywords_type=anywords{EXCLUDE}")),
            (BugQuery::DataLoss, format!("keywords=dataloss&keywords_type=allwords{EXCLUDE}")),
        ];

        for query in BugQuery::iter() {
            let url = url(BASE, query, &status(), &exclusions(), Rendering::Api);
            let (_, tail) = url.split_once("&v6=affected&").unwrap();
            for (other, block) in &blocks {
                assert_eq!(tail == block, *other == query, "{query} vs block of {other}: {tail}");
            }
            assert_eq!(url.matches("keywords=").count(), 1);
        }
    }

    #[test]
    fn test_field_numbering_follows_status_length() {
        let status: VersionSet = ["esr128", "128", "129", "130", "131", "132", "133", "134", "135", "136"].into_iter().collect();
        let url = url(BASE, BugQuery::Performance, &status, &exclusions(), Rendering::Api);

        assert!(url.contains("&f13=cf_status_thunderbird_136&f14=CP&j3=OR&o4=equals"));
        assert!(url.contains("&o13=equals&resolution=---"));
        assert!(url.contains("&v13=affected&keywords=perf"));
        assert!(!url.contains("f15="));
    }

    #[test]
    fn test_is_deterministic() {
        for query in BugQuery::iter() {
            assert_eq!(
                url(BASE, query, &status(), &exclusions(), Rendering::Api),
                url(BASE, query, &status(), &exclusions(), Rendering::Api)
            );
        }
    }
}
