//! Data structure endpoints

use crate::client::DictionaryClient;
use crate::error::ApiResult;
use dictsearch_core::{Element, StructureSummary};
use serde::Deserialize;
use tracing::debug;

/// Data structure API interface
#[derive(Clone)]
pub struct StructuresApi {
    client: DictionaryClient,
}

impl StructuresApi {
    /// Create a new structures API interface
    pub(crate) fn new(client: DictionaryClient) -> Self {
        Self { client }
    }

    /// Keyword structure search
    ///
    /// GET /datastructure?searchTerm={term}
    pub async fn search(&self, term: &str) -> ApiResult<Vec<StructureSummary>> {
        let url = self.client.endpoint(&["datastructure"], &[("searchTerm", term)])?;
        let summaries: Vec<SummaryDto> = self.client.get_json(url).await?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }

    /// All structures in a category
    ///
    /// GET /datastructure?category={category}
    pub async fn by_category(&self, category: &str) -> ApiResult<Vec<StructureSummary>> {
        let url = self.client.endpoint(&["datastructure"], &[("category", category)])?;
        let summaries: Vec<SummaryDto> = self.client.get_json(url).await?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }

    /// Elements of one structure, in upstream position order
    ///
    /// GET /datastructure/{shortName}
    pub async fn elements(&self, short_name: &str) -> ApiResult<Vec<Element>> {
        let url = self.client.endpoint(&["datastructure", short_name], &[])?;
        let detail: StructureDetailDto = self.client.get_json(url).await?;
        let elements = detail.into_elements(short_name);
        debug!(structure = short_name, count = elements.len(), "Fetched structure elements");
        Ok(elements)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SummaryDto {
    #[serde(rename = "shortName")]
    short_name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl From<SummaryDto> for StructureSummary {
    fn from(dto: SummaryDto) -> Self {
        StructureSummary {
            short_name: dto.short_name,
            title: dto.title.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StructureDetailDto {
    #[serde(rename = "dataElements", default)]
    data_elements: Vec<StructureElementDto>,
}

#[derive(Debug, Deserialize)]
struct StructureElementDto {
    name: String,
    #[serde(rename = "type", default)]
    data_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(rename = "valueRange", default)]
    value_range: Option<String>,
    #[serde(default)]
    position: Option<i64>,
}

impl StructureDetailDto {
    fn into_elements(self, short_name: &str) -> Vec<Element> {
        let mut rows = self.data_elements;
        // Missing positions sort last; sort_by_key is stable
        rows.sort_by_key(|row| row.position.unwrap_or(i64::MAX));
        rows.into_iter()
            .map(|row| Element {
                name: row.name,
                data_type: row.data_type.unwrap_or_default(),
                description: row.description.unwrap_or_default(),
                notes: row.notes.unwrap_or_default(),
                value_range: row.value_range.unwrap_or_default(),
                structures: vec![short_name.to_string()],
            })
            .collect()
    }
}
