use chrono::Utc;
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use lazy_static::lazy_static;

use crate::common::{parse_count, parse_decimal, Client};
use crate::microdata::Scope;
use crate::snapshot::{
    FetchOutcome, RatingSnapshot, FALLBACK_RATING_VALUE, FALLBACK_REVIEW_COUNT,
};

/// The one listing this pipeline serves ratings for.
pub const LISTING_URL: &str = "https://www.bokadirekt.se/places/laserhuset-19356";

lazy_static! {
    /// A "4,8"-style decimal with the word "Betyg" within ~120 characters
    /// of intervening markup. This is the visible widget as rendered today.
    static ref RE_RATING_BETYG: regex::Regex =
        regex::Regex::new(r"(?si)([0-5][.,][0-9])\s*</?[a-z][^>]*?>?\s*.{0,120}Betyg").unwrap();
    /// A "1191 Betyg"-style review counter.
    static ref RE_COUNT_BETYG: regex::Regex =
        regex::Regex::new(r"(?i)([0-9]{2,6})\s+Betyg").unwrap();
}

/// The Bokadirekt listing page for the business.
pub struct Listing;

impl Listing {
    /// Scrape the fixed listing page for a rating snapshot.
    ///
    /// Never fails: any transport error degrades to the compiled-in
    /// fallback snapshot, carried on the [`FetchOutcome::Fallback`] arm.
    pub async fn fetch(client: &Client) -> FetchOutcome {
        Self::fetch_from(client, LISTING_URL).await
    }

    /// Same as [`fetch`](Self::fetch), against an explicit URL. Tests point
    /// this at a local stand-in for the listing page.
    pub async fn fetch_from(client: &Client, url: &str) -> FetchOutcome {
        match Self::scrape(client, url).await {
            Ok(snapshot) => FetchOutcome::Live(snapshot),
            Err(error) => {
                tracing::warn!(%error, "bokadirekt scrape failed, serving fallback rating");
                FetchOutcome::Fallback(RatingSnapshot::fallback())
            }
        }
    }

    async fn scrape(client: &Client, url: &str) -> anyhow::Result<RatingSnapshot> {
        let response = client.0.get(url).send().await?;
        /* upstream status is deliberately not checked: an error page simply
         * fails the matchers below and degrades per field */
        let html = response.text().await?;
        Ok(Self::extract(&html))
    }

    /// Pattern matching over the fetched page.
    ///
    /// Each field tries its matchers in order and takes the first hit; the
    /// compiled-in constant fills in when none of them match. There is no
    /// plausibility check on a matched value.
    pub fn extract(html: &str) -> RatingSnapshot {
        let document = kuchiki::parse_html().one(html);

        RatingSnapshot {
            rating_value: rating_near_betyg(html)
                .or_else(|| rating_microdata(&document))
                .unwrap_or(FALLBACK_RATING_VALUE),
            review_count: count_near_betyg(html)
                .or_else(|| count_microdata(&document))
                .unwrap_or(FALLBACK_REVIEW_COUNT),
            updated_iso: Utc::now(),
        }
    }
}

fn rating_near_betyg(html: &str) -> Option<f64> {
    RE_RATING_BETYG
        .captures(html)
        .and_then(|caps| parse_decimal(caps.get(1)?.as_str()))
}

fn rating_microdata(document: &NodeRef) -> Option<f64> {
    parse_decimal(Scope::from(document.clone()).prop_value("ratingValue")?)
}

fn count_near_betyg(html: &str) -> Option<u32> {
    RE_COUNT_BETYG
        .captures(html)
        .and_then(|caps| parse_count(caps.get(1)?.as_str()))
}

fn count_microdata(document: &NodeRef) -> Option<u32> {
    parse_count(Scope::from(document.clone()).prop_value("reviewCount")?)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::Listing;
    use crate::common::Client;
    use crate::snapshot::{FetchOutcome, RatingSnapshot};

    #[test]
    fn test_widget_with_comma_decimal() {
        let html = r#"<div class="place-rating"><strong>4,8</strong> <span>1191 Betyg</span></div>"#;
        let snapshot = Listing::extract(html);

        assert_eq!(snapshot.rating_value, 4.8);
        assert_eq!(snapshot.review_count, 1191);
    }

    #[test]
    fn test_count_without_decimal_rating() {
        let snapshot = Listing::extract("<p>873 Betyg</p>");

        assert_eq!(snapshot.review_count, 873);
        /* no decimal anywhere: the value falls back on its own */
        assert_eq!(snapshot.rating_value, 4.9);
    }

    #[test]
    fn test_no_recognizable_pattern() {
        let snapshot = Listing::extract("<html><body><h1>Laserhuset</h1></body></html>");

        assert_eq!(snapshot.rating_value, 4.9);
        assert_eq!(snapshot.review_count, 1191);
    }

    #[test]
    fn test_betyg_token_too_far_away() {
        let html = format!("<div><b>4,8</b>{}Betyg</div>", "x".repeat(400));

        assert_eq!(Listing::extract(&html).rating_value, 4.9);
    }

    #[test]
    fn test_microdata_patterns() {
        let html = r#"<span itemprop="ratingValue">4.95</span> något annat <span itemprop="reviewCount">1200</span>"#;
        let snapshot = Listing::extract(html);

        assert_eq!(snapshot.rating_value, 4.95);
        assert_eq!(snapshot.review_count, 1200);
    }

    #[test]
    fn test_visible_widget_beats_microdata() {
        let html = r#"
            <strong>4,7</strong> <span>951 Betyg</span>
            <meta itemprop="ratingValue" content="3.0" />
            <meta itemprop="reviewCount" content="10" />
        "#;
        let snapshot = Listing::extract(html);

        assert_eq!(snapshot.rating_value, 4.7);
        assert_eq!(snapshot.review_count, 951);
    }

    #[tokio::test]
    async fn test_fetch_live() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="place-rating"><strong>4,8</strong> <span>1191 Betyg</span></div>"#,
            ))
            .mount(&server)
            .await;

        let outcome = Listing::fetch_from(&Client::default(), &server.uri()).await;

        assert!(outcome.is_live());
        assert_eq!(outcome.snapshot().rating_value, 4.8);
        assert_eq!(outcome.snapshot().review_count, 1191);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_falls_back() {
        let url = {
            let server = MockServer::start().await;
            server.uri()
            /* server dropped here: the port refuses connections */
        };

        let outcome = Listing::fetch_from(&Client::default(), &url).await;

        assert_eq!(outcome, FetchOutcome::Fallback(RatingSnapshot::fallback()));
    }

    #[tokio::test]
    async fn test_error_page_degrades_per_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<h1>502</h1>"))
            .mount(&server)
            .await;

        /* upstream status is not checked; the body just fails to match */
        let outcome = Listing::fetch_from(&Client::default(), &server.uri()).await;

        assert!(outcome.is_live());
        assert_eq!(outcome.snapshot().rating_value, 4.9);
        assert_eq!(outcome.snapshot().review_count, 1191);
    }
}
