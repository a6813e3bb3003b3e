//! Data element endpoints

use crate::client::DictionaryClient;
use crate::error::ApiResult;
use dictsearch_core::Element;
use serde::{Deserialize, Serialize};

/// Data element API interface
#[derive(Clone)]
pub struct ElementsApi {
    client: DictionaryClient,
}

impl ElementsApi {
    /// Create a new elements API interface
    pub(crate) fn new(client: DictionaryClient) -> Self {
        Self { client }
    }

    /// Fetch one element by exact name
    ///
    /// GET /dataelement/{name}
    pub async fn get(&self, name: &str) -> ApiResult<Element> {
        let url = self.client.endpoint(&["dataelement", name], &[])?;
        let detail: ElementDetail = self.client.get_json(url).await?;
        Ok(detail.into())
    }

    /// Full-text element search, capped at `size` hits
    ///
    /// POST /search/dataelement/full?size={size}
    pub async fn full_text(&self, query: &str, size: usize) -> ApiResult<Vec<FullTextHit>> {
        let size = size.to_string();
        let url = self
            .client
            .endpoint(&["search", "dataelement", "full"], &[("size", size.as_str())])?;
        let response: FullTextResponse = self.client.post_text(url, query.to_string()).await?;
        Ok(response.into_hits())
    }
}

/// A full-text hit with the upstream relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullTextHit {
    /// Matched element
    pub element: Element,
    /// Upstream score; higher is better
    pub score: f64,
}

// ============================================================================
// Wire types
// ============================================================================

/// Element detail as returned by `GET /dataelement/{name}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ElementDetail {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "valueRange", default)]
    pub value_range: Option<String>,
    #[serde(rename = "dataStructures", default)]
    pub data_structures: Vec<StructureRef>,
}

/// Structures are listed either as bare short names or as summary objects
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StructureRef {
    ShortName(String),
    Summary {
        #[serde(rename = "shortName")]
        short_name: String,
    },
}

impl StructureRef {
    fn into_short_name(self) -> String {
        match self {
            Self::ShortName(name) | Self::Summary { short_name: name } => name,
        }
    }
}

impl From<ElementDetail> for Element {
    fn from(detail: ElementDetail) -> Self {
        Element {
            name: detail.name,
            data_type: detail.data_type.unwrap_or_default(),
            description: detail.description.unwrap_or_default(),
            notes: detail.notes.unwrap_or_default(),
            value_range: detail.value_range.unwrap_or_default(),
            structures: detail
                .data_structures
                .into_iter()
                .map(StructureRef::into_short_name)
                .collect(),
        }
    }
}

/// Full-text search responses come either as a bare hit list or as an
/// Elasticsearch-style `{"hits": {"hits": [...]}}` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FullTextResponse {
    // Listed first: a one-element array would otherwise decode as an envelope
    Bare(Vec<Hit>),
    Envelope { hits: HitList },
}

#[derive(Debug, Deserialize)]
struct HitList {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: ElementDetail,
}

impl FullTextResponse {
    fn into_hits(self) -> Vec<FullTextHit> {
        let hits = match self {
            Self::Bare(hits) => hits,
            Self::Envelope { hits } => hits.hits,
        };
        hits.into_iter()
            .map(|hit| FullTextHit {
                element: hit.source.into(),
                score: hit.score.unwrap_or(0.0),
            })
            .collect()
    }
}
