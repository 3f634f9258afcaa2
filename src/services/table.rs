use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::grid::TableKey,
};

/// Precomputed recommendations keyed by rendered [`TableKey`].
///
/// Serialized as a single flat JSON object, `{"<key>": [recommendation, ...]}`.
/// Built once offline and never mutated after it is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable {
    entries: BTreeMap<String, Vec<Recommendation>>,
}

impl RecommendationTable {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table: RecommendationTable = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            "Recommendation table loaded"
        );

        Ok(table)
    }

    /// Writes the table next to `path` and renames it into place
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| AppError::Internal(format!("{} is not a file path", path.display())))?;
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        {
            let mut writer = std::io::BufWriter::new(std::fs::File::create(&tmp_path)?);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, path)?;

        tracing::info!(path = %path.display(), entries = self.len(), "Recommendation table saved");
        Ok(())
    }

    pub fn insert(&mut self, key: &TableKey, recommendations: Vec<Recommendation>) {
        self.entries.insert(key.to_string(), recommendations);
    }

    pub fn get(&self, key: &str) -> Option<&[Recommendation]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TableKey, Vec<Recommendation>)> for RecommendationTable {
    fn from_iter<T: IntoIterator<Item = (TableKey, Vec<Recommendation>)>>(iter: T) -> Self {
        let mut table = Self::default();
        for (key, recommendations) in iter {
            table.insert(&key, recommendations);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuntimeCategory;
    use tokio_test::{assert_err, assert_ok};

    fn recommendation(name: &str, rating: f64) -> Recommendation {
        Recommendation {
            name: name.to_string(),
            year: 1994,
            genre: "Drama".to_string(),
            rating,
            runtime_category: RuntimeCategory::Long,
            tagline: Some("Fear can hold you prisoner.".to_string()),
        }
    }

    fn key(genre: &str) -> TableKey {
        TableKey {
            genre: genre.to_string(),
            runtime: RuntimeCategory::Long,
            age: 18,
            min_rating: 8.5,
            top_n: 5,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = RecommendationTable::default();
        table.insert(&key("Drama"), vec![recommendation("The Shawshank Redemption", 9.3)]);

        let found = table.get("Drama_long_18_8.5_5").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "The Shawshank Redemption");
        assert!(table.get("Comedy_long_18_8.5_5").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precomputed_recommendations.json");

        let table: RecommendationTable = vec![
            (key("Drama"), vec![recommendation("The Shawshank Redemption", 9.3)]),
            (key("Crime"), vec![]),
        ]
        .into_iter()
        .collect();

        assert_ok!(table.save(&path));
        let loaded = assert_ok!(RecommendationTable::load(&path));

        assert_eq!(loaded, table);
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["Crime_long_18_8.5_5", "Drama_long_18_8.5_5"]);
        assert!(!dir.path().join(".precomputed_recommendations.json.tmp").exists());
    }

    #[test]
    fn test_persisted_format_is_flat_mapping() {
        let table: RecommendationTable =
            vec![(key("Drama"), vec![recommendation("Forrest Gump", 8.8)])]
                .into_iter()
                .collect();

        let value = serde_json::to_value(&table).unwrap();
        let entry = &value["Drama_long_18_8.5_5"][0];
        assert_eq!(entry["name"], "Forrest Gump");
        assert_eq!(entry["year"], 1994);
        assert_eq!(entry["rating"], 8.8);
        assert_eq!(entry["runtime_category"], "long");
    }

    #[test]
    fn test_load_accepts_null_taglines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"Horror_short_18_7.0_5": [{"name": "Alien", "year": 1979, "genre": "Horror, Sci-Fi",
                "rating": 8.5, "runtime_category": "short", "tagline": null}]}"#,
        )
        .unwrap();

        let table = RecommendationTable::load(&path).unwrap();
        assert_eq!(table.get("Horror_short_18_7.0_5").unwrap()[0].tagline, None);
    }

    #[test]
    fn test_load_errors() {
        assert_err!(RecommendationTable::load("/nonexistent/table.json"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();
        let err = RecommendationTable::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
