use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

/// A single reference sequence as listed in the SAM header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub length: u64,
}

/// Ordered catalog of reference sequences, indexed by reference id.
///
/// Built once before the header is printed; alignment results refer to
/// entries by their position in this list.
#[derive(Debug, Clone, Default)]
pub struct RefCatalog {
    refs: Vec<Reference>,
}

impl RefCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference; returns its id.
    pub fn push(&mut self, name: impl Into<String>, length: u64) -> usize {
        self.refs.push(Reference {
            name: name.into(),
            length,
        });
        self.refs.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<&Reference> {
        self.refs.get(id)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.refs.iter()
    }

    /// Load a reference list from a FASTA index (`.fai`) or chrom-sizes file.
    ///
    /// Each non-blank line is `name<TAB>length`, optionally followed by more
    /// tab-separated columns which are ignored.
    pub fn from_fai<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(e, path))?;
        let reader = BufReader::new(file);

        let mut catalog = Self::new();
        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| Error::io(e, path))?;
            if line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split('\t');
            let name = columns.next().unwrap_or_default();
            let length = columns.next().ok_or_else(|| {
                Error::RefList(format!(
                    "missing length column at {}:{}",
                    path.display(),
                    line_num + 1
                ))
            })?;

            if name.is_empty() {
                return Err(Error::RefList(format!(
                    "empty reference name at {}:{}",
                    path.display(),
                    line_num + 1
                )));
            }
            let length: u64 = length.trim().parse().map_err(|_| {
                Error::RefList(format!(
                    "invalid length '{}' at {}:{}",
                    length,
                    path.display(),
                    line_num + 1
                ))
            })?;

            catalog.push(name, length);
        }

        log::debug!(
            "Loaded {} reference sequences from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl FromIterator<(String, u64)> for RefCatalog {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (name, length) in iter {
            catalog.push(name, length);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn ids_follow_insertion_order() {
        let mut catalog = RefCatalog::new();
        assert_eq!(catalog.push("chrA", 100), 0);
        assert_eq!(catalog.push("chrB", 250), 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(|r| r.length), Some(250));
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn from_fai_reads_first_two_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1\t248956422\t112\t70\t71").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "chrM\t16569").unwrap();

        let catalog = RefCatalog::from_fai(file.path()).unwrap();
        let refs: Vec<_> = catalog.iter().cloned().collect();
        assert_eq!(
            refs,
            vec![
                Reference {
                    name: "chr1".to_string(),
                    length: 248_956_422
                },
                Reference {
                    name: "chrM".to_string(),
                    length: 16569
                },
            ]
        );
    }

    #[test]
    fn from_fai_rejects_bad_length() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1\tten").unwrap();

        let err = RefCatalog::from_fai(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid length 'ten'"));
        assert!(err.to_string().contains(":1"));
    }

    #[test]
    fn from_fai_rejects_missing_length() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1\t10").unwrap();
        writeln!(file, "chr2").unwrap();

        let err = RefCatalog::from_fai(file.path()).unwrap_err();
        assert!(err.to_string().contains("missing length column"));
        assert!(err.to_string().contains(":2"));
    }

    #[test]
    fn from_fai_missing_file_reports_path() {
        let err = RefCatalog::from_fai("/nonexistent/ref.fai").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ref.fai"));
    }
}
