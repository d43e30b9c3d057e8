use std::time::Duration;

/// Bokadirekt serves an interstitial to clients that do not look like a
/// browser, so every outbound request presents a generic browser UA.
const USER_AGENT: &str = "Mozilla/5.0";

/// Upper bound on one outbound request, connect included. The upstream page
/// has no SLA; a stalled fetch must never hang a caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A wrapped [`reqwest::Client`] preconfigured for this pipeline.
///
/// Both sides of the pipeline go through this: the fetcher when it scrapes
/// the listing page, the presenter when it asks the rating endpoint.
pub struct Client(pub reqwest::Client);

impl Default for Client {
    fn default() -> Self {
        Self(
            reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap(),
        )
    }
}

/// Parse a decimal that may use the Swedish comma separator.
///
/// ## Example
/// ```txt
/// "4,8"  -> 4.8
/// "4.95" -> 4.95
/// ```
pub(crate) fn parse_decimal<T: AsRef<str>>(s: T) -> Option<f64> {
    s.as_ref().trim().replace(',', ".").parse::<f64>().ok()
}

/// Parse a plain run of digits. No grouping separators: the upstream widget
/// renders counts as bare digit runs.
pub(crate) fn parse_count<T: AsRef<str>>(s: T) -> Option<u32> {
    s.as_ref().trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_count, parse_decimal};

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("4,8").unwrap(), 4.8);
        assert_eq!(parse_decimal("4.95").unwrap(), 4.95);
        assert_eq!(parse_decimal(" 5,0 ").unwrap(), 5.0);
        assert_eq!(parse_decimal("Betyg"), None);
        assert_eq!(parse_decimal("4,8,1"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1191").unwrap(), 1191);
        assert_eq!(parse_count(" 873 ").unwrap(), 873);
        assert_eq!(parse_count("1 191"), None);
        assert_eq!(parse_count("-3"), None);
    }
}
