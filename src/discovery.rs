use std::path::Path;

use anyhow::Context as _;

/// Lists `.csv` filenames in `dir` whose names contain every keyword as a
/// substring. Returned sorted so downstream splits are reproducible.
///
/// An empty keyword list matches every CSV file. Non-files and non-UTF-8
/// names are skipped.
pub fn find_data_files(dir: &Path, keywords: &[String]) -> anyhow::Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir {}", dir.display()))?;
        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        if keywords.iter().all(|k| name.contains(k.as_str())) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leafprep_discovery_{tag}_{}_{}",
            std::process::id(),
            crate::types::now_ms()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        for name in ["leafA_vis.csv", "leafB_vis.csv", "leafA_nir.csv", "notes.txt"] {
            std::fs::write(dir.join(name), "0.1,0.2,healthy\n").expect("write fixture");
        }
        dir
    }

    #[test]
    fn no_keywords_matches_all_csvs() {
        let dir = fixture_dir("all");
        let names = find_data_files(&dir, &[]).expect("discover");
        assert_eq!(names, ["leafA_nir.csv", "leafA_vis.csv", "leafB_vis.csv"]);
    }

    #[test]
    fn every_result_contains_every_keyword() {
        let dir = fixture_dir("kw");
        let keywords = vec!["leafA".to_string(), "vis".to_string()];
        let names = find_data_files(&dir, &keywords).expect("discover");
        assert_eq!(names, ["leafA_vis.csv"]);
        for name in &names {
            for k in &keywords {
                assert!(name.contains(k.as_str()));
            }
        }
    }

    #[test]
    fn unmatched_keywords_yield_empty_list() {
        let dir = fixture_dir("none");
        let names = find_data_files(&dir, &["swir".to_string()]).expect("discover");
        assert!(names.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("leafprep_discovery_does_not_exist");
        assert!(find_data_files(&dir, &[]).is_err());
    }
}
