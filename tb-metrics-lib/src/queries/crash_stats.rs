use super::{QueryString, Rendering};
use crate::facts::RunDates;
use crate::versions::VersionSet;

const REST_PATH: &str = "/api/SuperSearch/?";
const BROWSABLE_PATH: &str = "/search/?";
const PRODUCT: &str = "Thunderbird";
const COLUMNS: [&str; 6] = ["date", "signature", "product", "version", "build_id", "platform"];

/// Build a crash-stats search URL covering the 24 hours before the report date.
#[must_use]
pub fn url(base_url: &str, versions: &VersionSet, dates: &RunDates, rendering: Rendering) -> String {
    let path = match rendering {
        Rendering::Api => REST_PATH,
        Rendering::Browsable => BROWSABLE_PATH,
    };
    let base = format!("{}{path}", base_url.trim_end_matches('/'));

    let mut qs = QueryString::new();
    let _ = qs
        .push("product", PRODUCT)
        .push_each("version", versions.iter())
        .push("date", format!(">={}T00:00:00.000Z", dates.yesterday()))
        .push("date", format!("<{}T00:00:00.000Z", dates.today()))
        .push("_facets", "platform")
        .push("_facets", "release_channel");

    match rendering {
        Rendering::Api => qs.render(&base, None),
        Rendering::Browsable => {
            let _ = qs.push("_sort", "-date").push_each("_columns", COLUMNS);
            qs.render(&base, Some("facet-release_channel"))
        }
    }
}
