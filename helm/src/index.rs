// Copyright (c) The Appstore Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use semver::VersionReq;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::chart::ChartVersion;
use crate::errors::{HelmError, Result};

/// Any score above this is not considered a match.
const SEARCH_MAX_SCORE: usize = 25;

/// The repository configuration file (`repositories.yaml`).
#[derive(Deserialize, Debug, Default)]
pub struct RepositoryFile {
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RepositoryEntry {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A repository's cached chart index (`<name>-index.yaml`).
#[derive(Deserialize, Debug, Default)]
pub struct IndexFile {
    #[serde(rename = "apiVersion", default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<ChartVersion>>,
}

/// A single hit of an index search, keyed `repo/chart`.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub name: String,
    pub score: usize,
    pub chart: ChartVersion,
}

struct Entry {
    key: String,
    text: String,
    chart: ChartVersion,
}

/// In-memory search index over every chart version of the configured
/// repositories.
///
/// Built once at startup and shared read-only afterwards; the index never
/// mutates once the server is serving.
#[derive(Default)]
pub struct SearchIndex {
    entries: Vec<Entry>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the repository file and every repository's cached index.
    ///
    /// A corrupt or missing repository cache is skipped with a warning, the
    /// way `helm search` treats it.
    pub fn load(repository_config: &Path, cache_dir: &Path) -> Result<Self> {
        let raw = fs::read_to_string(repository_config).map_err(|e| HelmError::RepositoryFileError {
            path: repository_config.display().to_string(),
            reason: e.to_string(),
        })?;
        let repo_file: RepositoryFile =
            serde_yaml::from_str(&raw).map_err(|e| HelmError::RepositoryFileError {
                path: repository_config.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut index = Self::new();
        for repo in &repo_file.repositories {
            let cache = cache_dir.join(format!("{}-index.yaml", repo.name));
            let parsed = fs::read_to_string(&cache)
                .map_err(|e| e.to_string())
                .and_then(|raw| serde_yaml::from_str::<IndexFile>(&raw).map_err(|e| e.to_string()));

            match parsed {
                Ok(file) => {
                    index.add_repo(&repo.name, file);
                    debug!(repo = %repo.name, "loaded chart repository index");
                }
                Err(reason) => {
                    warn!(repo = %repo.name, %reason, "repository index is corrupt or missing, skipping");
                }
            }
        }

        Ok(index)
    }

    /// Adds every chart version of a repository index under `repo/chart`.
    pub fn add_repo(&mut self, repo: &str, file: IndexFile) {
        for (name, versions) in file.entries {
            for chart in versions {
                let key = format!("{repo}/{name}");
                let text = format!(
                    "{} {} {}",
                    key,
                    chart.keywords.join(" "),
                    chart.description.as_deref().unwrap_or_default()
                )
                .to_lowercase();
                self.entries.push(Entry { key, text, chart });
            }
        }
    }

    /// Every chart version in the index.
    pub fn all(&self) -> Vec<SearchResult> {
        self.entries
            .iter()
            .map(|e| SearchResult { name: e.key.clone(), score: 0, chart: e.chart.clone() })
            .collect()
    }

    /// Literal substring search over name, keywords and description.
    ///
    /// The score is the match position, so a hit in the chart name ranks
    /// before a hit buried in the description; anything scoring above the
    /// cutoff is not a match.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.to_lowercase();
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .filter_map(|e| {
                let score = e.text.find(&query)?;
                (score <= SEARCH_MAX_SCORE).then(|| SearchResult {
                    name: e.key.clone(),
                    score,
                    chart: e.chart.clone(),
                })
            })
            .collect();
        sort_score(&mut results);
        results
    }

    /// Every version of a single package, newest first.
    pub fn single_package(&self, package: &str) -> Result<Vec<SearchResult>> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|e| e.chart.name == package)
            .map(|e| SearchResult { name: e.key.clone(), score: 0, chart: e.chart.clone() })
            .collect();

        if results.is_empty() {
            return Err(HelmError::PackageNotFound(package.to_string()));
        }

        sort_by_version_desc(&mut results);
        Ok(results)
    }

    /// Resolves a repo/package (and optionally an exact version) to the
    /// chart entry an install or upgrade should use.
    pub fn resolve(&self, repo: &str, package: &str, version: Option<&str>) -> Result<ChartVersion> {
        let key = format!("{repo}/{package}");
        let mut candidates: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|e| e.key == key)
            .map(|e| SearchResult { name: e.key.clone(), score: 0, chart: e.chart.clone() })
            .collect();
        sort_by_version_desc(&mut candidates);

        let found = match version {
            Some(version) if !version.is_empty() => {
                candidates.into_iter().find(|r| r.chart.version == version)
            }
            _ => candidates.into_iter().next(),
        };

        found.map(|r| r.chart).ok_or_else(|| {
            HelmError::PackageNotFound(format!(
                "{package}, version: {}, repo: {repo}",
                version.unwrap_or("latest")
            ))
        })
    }
}

/// Sorts results by ascending score, ties broken by name.
pub fn sort_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.name.cmp(&b.name)));
}

/// Sorts results newest version first, falling back to a lexicographic
/// comparison for versions that are not semver.
pub fn sort_by_version_desc(results: &mut [SearchResult]) {
    results.sort_by(|a, b| match (a.chart.semver(), b.chart.semver()) {
        (Some(va), Some(vb)) => vb.cmp(&va),
        _ => b.chart.version.cmp(&a.chart.version),
    });
}

/// Drops results whose version does not satisfy the requirement.
///
/// Versions that do not parse as semver are retained rather than silently
/// hidden from users.
pub fn apply_constraint(results: Vec<SearchResult>, requirement: &str) -> Result<Vec<SearchResult>> {
    if requirement.is_empty() {
        return Ok(results);
    }

    let requirement = VersionReq::parse(requirement).map_err(HelmError::InvalidVersionConstraint)?;
    Ok(results
        .into_iter()
        .filter(|r| match r.chart.semver() {
            Some(version) => requirement.matches(&version),
            None => true,
        })
        .collect())
}

/// Keeps only results from the given repository.
pub fn filter_by_repo(results: Vec<SearchResult>, repo: &str) -> Vec<SearchResult> {
    if repo.is_empty() {
        return results;
    }
    let prefix = format!("{repo}/");
    results.into_iter().filter(|r| r.name.starts_with(&prefix)).collect()
}

/// Groups results by chart name, names sorted ascending and versions
/// newest-first inside each group.
pub fn group_by_name(results: Vec<SearchResult>) -> Vec<Vec<SearchResult>> {
    let mut groups: BTreeMap<String, Vec<SearchResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.chart.name.clone()).or_default().push(result);
    }

    groups
        .into_values()
        .map(|mut group| {
            sort_by_version_desc(&mut group);
            group
        })
        .collect()
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex").field("entries", &self.entries.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const STABLE_INDEX: &str = r#"
apiVersion: v1
entries:
  mysql:
    - name: mysql
      version: 1.6.9
      appVersion: 5.7.30
      description: Fast, reliable, scalable, and easy to use open-source relational database system.
      keywords: [mysql, database, sql]
    - name: mysql
      version: 1.6.8
      appVersion: 5.7.30
      description: Fast, reliable, scalable, and easy to use open-source relational database system.
      keywords: [mysql, database, sql]
  wordpress:
    - name: wordpress
      version: 9.0.3
      appVersion: 5.3.2
      description: Web publishing platform for building blogs and websites, built on php.
      keywords: [cms]
"#;

    fn index() -> SearchIndex {
        let mut index = SearchIndex::new();
        index.add_repo("stable", serde_yaml::from_str(STABLE_INDEX).unwrap());
        index
    }

    #[test]
    fn test_all_returns_every_version() {
        assert_eq!(index().all().len(), 3);
    }

    #[test]
    fn test_search_by_name() {
        let results = index().search("mysql");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "stable/mysql");
        // "stable/".len()
        assert_eq!(results[0].score, 7);
    }

    #[test]
    fn test_search_by_keyword() {
        let results = index().search("cms");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chart.name, "wordpress");
    }

    #[test]
    fn test_search_cutoff_excludes_deep_description_matches() {
        // "php" only occurs at the tail of the wordpress description, far
        // beyond the score cutoff.
        assert!(index().search("php").is_empty());
        assert!(index().search("no-such-chart").is_empty());
    }

    #[test]
    fn test_single_package_sorted_newest_first() {
        let results = index().single_package("mysql").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chart.version, "1.6.9");
        assert_eq!(results[1].chart.version, "1.6.8");

        assert!(matches!(
            index().single_package("postgres"),
            Err(HelmError::PackageNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_exact_and_newest() {
        let index = index();

        let newest = index.resolve("stable", "mysql", None).unwrap();
        assert_eq!(newest.version, "1.6.9");

        let pinned = index.resolve("stable", "mysql", Some("1.6.8")).unwrap();
        assert_eq!(pinned.version, "1.6.8");

        assert!(index.resolve("stable", "mysql", Some("9.9.9")).is_err());
        assert!(index.resolve("local", "mysql", None).is_err());
    }

    #[test]
    fn test_apply_constraint() {
        let filtered = apply_constraint(index().all(), ">=1.6.9, <2").unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].chart.version, "1.6.9");

        assert!(matches!(
            apply_constraint(index().all(), "not a constraint"),
            Err(HelmError::InvalidVersionConstraint(_))
        ));
    }

    #[test]
    fn test_apply_constraint_keeps_unparseable_versions() {
        let mut index = index();
        let mut file = IndexFile::default();
        file.entries.insert(
            "nightly".into(),
            vec![ChartVersion { name: "nightly".into(), version: "latest".into(), ..Default::default() }],
        );
        index.add_repo("stable", file);

        let filtered = apply_constraint(index.all(), "^1.6").unwrap();
        assert!(filtered.iter().any(|r| r.chart.version == "latest"));
    }

    #[test]
    fn test_group_by_name() {
        let groups = group_by_name(index().all());
        assert_eq!(groups.len(), 2);
        // BTreeMap ordering: mysql before wordpress
        assert_eq!(groups[0][0].chart.name, "mysql");
        assert_eq!(groups[0][0].chart.version, "1.6.9");
        assert_eq!(groups[1][0].chart.name, "wordpress");
    }

    #[test]
    fn test_filter_by_repo() {
        let mut index = index();
        let mut file = IndexFile::default();
        file.entries.insert(
            "mysql".into(),
            vec![ChartVersion { name: "mysql".into(), version: "0.1.0".into(), ..Default::default() }],
        );
        index.add_repo("local", file);

        let filtered = filter_by_repo(index.all(), "local");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "local/mysql");
    }

    #[test]
    fn test_load_skips_corrupt_repository() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("repositories.yaml");
        fs::write(
            &config,
            "repositories:\n  - name: stable\n    url: https://charts.example.org\n  - name: broken\n    url: https://broken.example.org\n",
        )
        .unwrap();
        fs::write(dir.path().join("stable-index.yaml"), STABLE_INDEX).unwrap();
        fs::write(dir.path().join("broken-index.yaml"), "entries: [unterminated").unwrap();

        let index = SearchIndex::load(&config, dir.path()).unwrap();
        assert_eq!(index.all().len(), 3);
    }

    #[test]
    fn test_load_missing_repository_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SearchIndex::load(&dir.path().join("repositories.yaml"), dir.path()).is_err());
    }
}
