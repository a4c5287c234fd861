use serde::{Deserialize, Serialize};

use crate::error::{NarrativeError, NarrativeResult};

/// One calendar-year scene and the caption pinned near its peak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearScene {
    pub year: i32,
    pub annotation: String,
}

impl YearScene {
    #[must_use]
    pub fn new(year: i32, annotation: impl Into<String>) -> Self {
        Self {
            year,
            annotation: annotation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    Year(YearScene),
    /// Per-region trend with a selection control.
    RegionExplorer,
}

impl SceneKind {
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::RegionExplorer)
    }
}

/// Which fixed scene list a narrative runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CatalogVariant {
    /// The three yearly scenes only.
    Yearly,
    /// The yearly scenes followed by the region explorer.
    #[default]
    RegionExplorer,
}

/// Fixed, ordered scene list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SceneKind>", into = "Vec<SceneKind>")]
pub struct SceneCatalog {
    pub(super) scenes: Vec<SceneKind>,
}

impl SceneCatalog {
    pub fn new(scenes: Vec<SceneKind>) -> NarrativeResult<Self> {
        if scenes.is_empty() {
            return Err(NarrativeError::InvalidConfig(
                "scene catalog must contain at least one scene".to_owned(),
            ));
        }
        Ok(Self { scenes })
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self {
            scenes: yearly_scenes(),
        }
    }

    #[must_use]
    pub fn with_region_explorer() -> Self {
        let mut scenes = yearly_scenes();
        scenes.push(SceneKind::RegionExplorer);
        Self { scenes }
    }

    #[must_use]
    pub fn from_variant(variant: CatalogVariant) -> Self {
        match variant {
            CatalogVariant::Yearly => Self::yearly(),
            CatalogVariant::RegionExplorer => Self::with_region_explorer(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SceneKind> {
        self.scenes.get(index)
    }

    pub fn scenes(&self) -> impl ExactSizeIterator<Item = &SceneKind> {
        self.scenes.iter()
    }

    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    #[must_use]
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}

impl TryFrom<Vec<SceneKind>> for SceneCatalog {
    type Error = NarrativeError;

    fn try_from(scenes: Vec<SceneKind>) -> NarrativeResult<Self> {
        Self::new(scenes)
    }
}

impl From<SceneCatalog> for Vec<SceneKind> {
    fn from(catalog: SceneCatalog) -> Self {
        catalog.scenes
    }
}

fn yearly_scenes() -> Vec<SceneKind> {
    vec![
        SceneKind::Year(YearScene::new(2020, "Spike in cases in April 2020")),
        SceneKind::Year(YearScene::new(2021, "Surge in January 2021")),
        SceneKind::Year(YearScene::new(2022, "Increase in mid-2022")),
    ]
}

#[cfg(test)]
mod tests {
    use super::{CatalogVariant, SceneCatalog, SceneKind};

    #[test]
    fn variants_have_three_or_four_scenes() {
        assert_eq!(SceneCatalog::from_variant(CatalogVariant::Yearly).len(), 3);
        let explorer = SceneCatalog::from_variant(CatalogVariant::RegionExplorer);
        assert_eq!(explorer.len(), 4);
        assert_eq!(explorer.get(3), Some(&SceneKind::RegionExplorer));
    }

    #[test]
    fn index_arithmetic_wraps_both_ways() {
        let catalog = SceneCatalog::yearly();
        assert_eq!(catalog.next_index(2), 0);
        assert_eq!(catalog.previous_index(0), 2);
        assert_eq!(catalog.previous_index(1), 0);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(SceneCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn deserializing_empty_catalog_is_rejected() {
        assert!(serde_json::from_str::<SceneCatalog>("[]").is_err());
    }

    #[test]
    fn catalog_deserializes_through_validation() {
        let json = serde_json::to_string(&SceneCatalog::with_region_explorer()).expect("serialize");
        let catalog: SceneCatalog = serde_json::from_str(&json).expect("non-empty catalog");
        assert_eq!(catalog, SceneCatalog::with_region_explorer());
    }
}
