//! [`ElasticClient`] — async HTTP client for the character search index.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use got_core::{
  Context,
  character::{CharacterEntry, IndexedCharacter},
  search::SearchIndex,
};

use crate::{Error, Result};

/// Index name used when none is configured.
pub const DEFAULT_INDEX: &str = "character_details";

/// Async client for one Elasticsearch index.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ElasticClient {
  client: Client,
  host:   String,
  index:  String,
}

impl ElasticClient {
  pub fn new(host: impl Into<String>, index: impl Into<String>) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, host: host.into(), index: index.into() })
  }

  fn url(&self) -> String {
    format!("{}/{}/_search", self.host.trim_end_matches('/'), self.index)
  }

  /// `GET {host}/{index}/_search`
  async fn query(&self, term: &str) -> Result<Vec<CharacterEntry>> {
    let resp = self.client.get(self.url()).json(&build_query(term)).send().await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
      warn!(%status, "search index rejected query");
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let entries = parse_hits(&body)?;
    debug!(term, hits = entries.len(), "search complete");
    Ok(entries)
  }
}

/// The request body for a fuzzy search on `term`, weighting character names
/// above actor names and siblings.
pub fn build_query(term: &str) -> Value {
  json!({
    "query": {
      "multi_match": {
        "query":     term,
        "fields":    ["character_name^2", "actor_name", "siblings"],
        "fuzziness": "AUTO"
      }
    }
  })
}

// ─── Response shape ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
  hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
  #[serde(default)]
  hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
  #[serde(rename = "_source")]
  source: IndexedCharacter,
}

fn parse_hits(body: &str) -> Result<Vec<CharacterEntry>> {
  let resp: SearchResponse = serde_json::from_str(body)?;
  Ok(resp.hits.hits.into_iter().map(|hit| hit.source.into()).collect())
}

// ─── SearchIndex impl ────────────────────────────────────────────────────────

impl SearchIndex for ElasticClient {
  type Error = Error;

  async fn search(&self, ctx: Context, term: String) -> Result<Vec<CharacterEntry>> {
    ctx.check()?;
    tokio::select! {
      biased;
      reason = ctx.done() => Err(Error::from(reason)),
      result = self.query(&term) => result,
    }
  }
}
