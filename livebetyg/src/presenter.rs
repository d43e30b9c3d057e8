use anyhow::bail;
use chrono::{Locale, SecondsFormat};
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

use crate::common::Client;
use crate::snapshot::RatingSnapshot;

/// Progressive enhancement of a statically rendered page.
///
/// Fetches the live snapshot from `endpoint` and patches it into `html`.
/// On any failure (network, non-success status, malformed body) the input
/// page is returned untouched and the static fallback values baked into the
/// markup stay up. Nothing is retried and no error escapes.
pub async fn enhance(client: &Client, endpoint: &str, html: &str) -> String {
    match try_enhance(client, endpoint, html).await {
        Ok(enhanced) => enhanced,
        Err(error) => {
            tracing::debug!(%error, "no live rating, keeping static markup");
            html.to_string()
        }
    }
}

async fn try_enhance(client: &Client, endpoint: &str, html: &str) -> anyhow::Result<String> {
    let response = client
        .0
        .get(endpoint)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("rating endpoint answered {}", response.status());
    }
    let snapshot: RatingSnapshot = response.json().await?;

    apply(html, &snapshot)
}

/// Patch a parsed copy of `html` with `snapshot` and re-serialize it.
///
/// The three display elements are only touched when all of them exist in
/// the document; the JSON-LD block is updated independently of that.
pub fn apply(html: &str, snapshot: &RatingSnapshot) -> anyhow::Result<String> {
    let document = kuchiki::parse_html().one(html);

    let value = document.select_first("#ratingValue").ok();
    let count = document.select_first("#ratingCount").ok();
    let updated = document.select_first("#ratingUpdated").ok();
    if let (Some(value), Some(count), Some(updated)) = (value, count, updated) {
        set_text(value.as_node(), &snapshot.rating_value.to_string());
        set_text(count.as_node(), &snapshot.review_count.to_string());
        updated.attributes.borrow_mut().insert(
            "datetime",
            snapshot
                .updated_iso
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        set_text(updated.as_node(), &swedish_short_date(snapshot));
    }

    merge_json_ld(&document, snapshot);

    let mut out = Vec::new();
    document.serialize(&mut out)?;
    Ok(String::from_utf8(out)?)
}

/// "24 sep. 2025", the sv-SE short date form the static markup uses.
fn swedish_short_date(snapshot: &RatingSnapshot) -> String {
    snapshot
        .updated_iso
        .format_localized("%d %b %Y", Locale::sv_SE)
        .to_string()
}

/// Mirror the live numbers into the organization JSON-LD block, when the
/// page has one and it holds a JSON object. Attempted even when the visible
/// elements are missing; skipped on its own when the block is absent or
/// unparsable.
fn merge_json_ld(document: &NodeRef, snapshot: &RatingSnapshot) {
    let block = match document.select_first("#org-json") {
        Ok(block) => block,
        Err(()) => return,
    };
    let mut data: serde_json::Value =
        match serde_json::from_str(&block.as_node().text_contents()) {
            Ok(data) => data,
            Err(_) => return,
        };
    let object = match data.as_object_mut() {
        Some(object) => object,
        None => return,
    };

    object.insert(
        "aggregateRating".to_string(),
        serde_json::json!({
            "@type": "AggregateRating",
            "ratingValue": snapshot.rating_value,
            "reviewCount": snapshot.review_count,
        }),
    );
    set_text(block.as_node(), &data.to_string());
}

fn set_text(node: &NodeRef, text: &str) {
    let children: Vec<_> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}
