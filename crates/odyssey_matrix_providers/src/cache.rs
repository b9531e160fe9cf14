use std::{
    hash::{Hash, Hasher},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::FxHasher64;

use crate::{distance_matrix::DistanceMatrix, error::CacheError, matrix_params::UnreachablePolicy};

const CACHE_FOLDER_ENV_VAR: &str = "ODYSSEY_CACHE_FOLDER";

fn hash_points<H: Hasher>(points: &[geo::Point], hasher: &mut H) {
    points.len().hash(hasher);
    for point in points {
        hasher.write_u64(point.x().to_bits());
        hasher.write_u64(point.y().to_bits());
    }
}

/// Cache key of a matrix: the points, the provider that produced the
/// distances and the unreachable policy that was applied.
pub fn cache_key(points: &[geo::Point], fingerprint: &str, policy: UnreachablePolicy) -> String {
    let mut hasher = FxHasher64::default();

    hash_points(points, &mut hasher);
    fingerprint.hash(&mut hasher);
    policy.hash(&mut hasher);

    format!("{:016x}", hasher.finish())
}

pub trait MatricesCache {
    fn get(&self, key: &str) -> Result<Option<DistanceMatrix>, CacheError>;

    fn put(&self, key: &str, matrix: &DistanceMatrix) -> Result<(), CacheError>;
}

/// Stores one JSON file per matrix in a folder.
pub struct FileCache {
    folder: PathBuf,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, CacheError> {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            return Err(CacheError::NotADirectory(folder.display().to_string()));
        }

        Ok(FileCache {
            folder: folder.to_path_buf(),
        })
    }

    /// Uses the folder from the `ODYSSEY_CACHE_FOLDER` environment variable.
    pub fn from_env() -> Result<Self, CacheError> {
        let folder = std::env::var(CACHE_FOLDER_ENV_VAR)?;
        Self::new(folder)
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.folder.join(format!("{key}.json"))
    }
}

impl MatricesCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<DistanceMatrix>, CacheError> {
        let file_path = self.file_path(key);

        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(file_path)?;
        let matrix: DistanceMatrix = serde_json::from_reader(BufReader::new(file))?;

        Ok(Some(matrix))
    }

    fn put(&self, key: &str, matrix: &DistanceMatrix) -> Result<(), CacheError> {
        let file = std::fs::File::create(self.file_path(key))?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, matrix)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder(name: &str) -> PathBuf {
        let folder = std::env::temp_dir().join(format!(
            "odyssey_cache_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&folder).unwrap();
        folder
    }

    #[test]
    fn test_key_depends_on_inputs() {
        let points = vec![geo::Point::new(1.0, 2.0), geo::Point::new(3.0, 4.0)];

        let key = cache_key(&points, "crow", UnreachablePolicy::Fail);
        assert_eq!(key, cache_key(&points, "crow", UnreachablePolicy::Fail));
        assert_eq!(key.len(), 16);
        assert_ne!(key, cache_key(&points, "road", UnreachablePolicy::Fail));
        assert_ne!(key, cache_key(&points, "crow", UnreachablePolicy::Forbid));
        assert_ne!(key, cache_key(&points[..1], "crow", UnreachablePolicy::Fail));
    }

    #[test]
    fn test_file_cache_roundtrip() {
        let folder = temp_folder("roundtrip");
        let cache = FileCache::new(&folder).unwrap();

        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::INFINITY, 0.0]])
            .unwrap();

        assert!(cache.get("missing").unwrap().is_none());
        cache.put("matrix", &matrix).unwrap();
        assert_eq!(cache.get("matrix").unwrap(), Some(matrix));

        std::fs::remove_dir_all(folder).unwrap();
    }

    #[test]
    fn test_file_cache_requires_directory() {
        let folder = temp_folder("not_a_dir");
        let file = folder.join("file.txt");
        std::fs::write(&file, "").unwrap();

        assert!(matches!(
            FileCache::new(&file),
            Err(CacheError::NotADirectory(_))
        ));

        std::fs::remove_dir_all(folder).unwrap();
    }
}
