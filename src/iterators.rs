//! Iterators over corpora of parsed sentences
//!
//! Provides collection interfaces for:
//! - Iterating over trees from a string, file, or glob pattern
//! - Extracting patterns across all trees of such a source
//!
//! Iteration is sequential; independent trees can be fanned out with
//! `pariter::IteratorExt::parallel_map`.

use crate::concept::ConceptService;
use crate::conllu::TreeIterator;
use crate::extractor::{Parse, PatternExtractor};
use crate::pattern::Pattern;
use crate::tree::Tree;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Source of trees for a collection
#[derive(Debug, Clone)]
enum TreeSource {
    /// In-memory CoNLL-U text
    String(String),
    /// Multiple file paths (from glob or explicit paths)
    Files(Vec<PathBuf>),
}

/// Collection of trees from a string, file, or glob pattern
///
/// Files ending in `.gz` are decompressed on the fly. Unreadable files and
/// malformed sentences are logged and skipped.
///
/// # Examples
///
/// ```no_run
/// use predex::{PatternExtractor, PatternSet, Treebank};
///
/// let extractor: PatternExtractor = PatternExtractor::default();
/// let treebank = Treebank::from_glob("data/*.conllu.gz").unwrap();
/// for (_tree, pattern) in PatternSet::new(&treebank, extractor) {
///     println!("{}: {}", pattern.key(), pattern.concept);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Treebank {
    source: TreeSource,
}

impl Treebank {
    /// Create from an in-memory CoNLL-U string
    pub fn from_string(text: &str) -> Self {
        Self {
            source: TreeSource::String(text.to_string()),
        }
    }

    /// Create from a single file path
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::from_paths(vec![path.as_ref().to_path_buf()])
    }

    /// Create from a glob pattern
    ///
    /// Files are processed in sorted order for deterministic results.
    pub fn from_glob(pattern: &str) -> Result<Self, glob::PatternError> {
        let mut file_paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        file_paths.sort();
        Ok(Self::from_paths(file_paths))
    }

    /// Create from explicit file paths
    pub fn from_paths(file_paths: Vec<PathBuf>) -> Self {
        Self {
            source: TreeSource::Files(file_paths),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Arc<Tree>> + Send> {
        self.clone().into_iter()
    }
}

impl IntoIterator for Treebank {
    type Item = Arc<Tree>;
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + Send>;

    fn into_iter(self) -> Self::IntoIter {
        match self.source {
            TreeSource::String(text) => {
                Box::new(skip_bad_trees(TreeIterator::from_string(&text), None))
            }
            TreeSource::Files(paths) => Box::new(paths.into_iter().flat_map(open_file_trees)),
        }
    }
}

/// Patterns extracted from every tree of a Treebank
///
/// Yields `(tree, pattern)` pairs in corpus order.
pub struct PatternSet<P, C> {
    tree_bank: Treebank,
    extractor: Arc<PatternExtractor<P, C>>,
}

impl<P, C> PatternSet<P, C>
where
    P: Parse + Send + Sync + 'static,
    C: ConceptService + Send + Sync + 'static,
{
    pub fn new(tree_bank: &Treebank, extractor: PatternExtractor<P, C>) -> Self {
        Self::with_shared(tree_bank, Arc::new(extractor))
    }

    /// Reuse an extractor that is already shared
    pub fn with_shared(tree_bank: &Treebank, extractor: Arc<PatternExtractor<P, C>>) -> Self {
        Self {
            tree_bank: tree_bank.clone(),
            extractor,
        }
    }
}

impl<P, C> IntoIterator for PatternSet<P, C>
where
    P: Parse + Send + Sync + 'static,
    C: ConceptService + Send + Sync + 'static,
{
    type Item = (Arc<Tree>, Pattern);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + Send>;

    fn into_iter(self) -> Self::IntoIter {
        let extractor = self.extractor;
        let iter = self.tree_bank.into_iter().flat_map(move |tree| {
            let patterns = extractor.patterns_for_tree(&tree);
            patterns.into_iter().map(move |p| (Arc::clone(&tree), p))
        });
        Box::new(iter)
    }
}

/// Drop sentences that fail to parse, logging each one
fn skip_bad_trees<I>(trees: I, path: Option<PathBuf>) -> impl Iterator<Item = Arc<Tree>> + Send
where
    I: Iterator<Item = Result<Tree, crate::conllu::ParseError>> + Send,
{
    trees.filter_map(move |result| match result {
        Ok(tree) => Some(Arc::new(tree)),
        Err(e) => {
            warn!(path = ?path, error = %e, "skipping malformed sentence");
            None
        }
    })
}

/// Open a file and return an iterator over its trees
///
/// Logs file open errors and returns an empty iterator on error.
fn open_file_trees(path: PathBuf) -> Box<dyn Iterator<Item = Arc<Tree>> + Send> {
    match TreeIterator::from_file(&path) {
        Ok(reader) => Box::new(skip_bad_trees(reader, Some(path))),
        Err(e) => {
            warn!(path = ?path, error = %e, "failed to open treebank file");
            Box::new(std::iter::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;

    const TWO_TREE_CONLLU: &str = "# text = The dog barked.
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tbarked\tbark\tVERB\tVBD\t_\t0\troot\t_\t_

# text = The cats were fed.
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcats\tcat\tNOUN\tNNS\t_\t4\tnsubjpass\t_\t_
3\twere\tbe\tAUX\tVBD\t_\t4\tauxpass\t_\t_
4\tfed\tfeed\tVERB\tVBN\t_\t0\troot\t_\t_

";

    #[test]
    fn test_tree_bank_from_string() {
        let trees: Vec<_> = Treebank::from_string(TWO_TREE_CONLLU).into_iter().collect();

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].len(), 3);
        assert_eq!(trees[1].len(), 4);
    }

    #[test]
    fn test_pattern_set_from_string() {
        let tree_bank = Treebank::from_string(TWO_TREE_CONLLU);
        let extractor = PatternExtractor::new(ExtractorConfig::default()).unwrap();
        let results: Vec<_> = PatternSet::new(&tree_bank, extractor).into_iter().collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1.concept, "The dog");
        assert!(!results[0].1.is_passive);
        assert_eq!(results[1].1.concept, "The cats");
        assert!(results[1].1.is_passive);
        assert_eq!(results[1].0.sentence_text.as_deref(), Some("The cats were fed."));
    }

    #[test]
    fn test_skips_malformed_sentence() {
        let conllu = "1\tbroken\tline\n\n1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n";
        let trees: Vec<_> = Treebank::from_string(conllu).into_iter().collect();
        assert_eq!(trees.len(), 1);
    }

    mod multi_file {
        use super::*;
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use pariter::IteratorExt as _;
        use std::fs;
        use std::io::Write;
        use tempfile::{TempDir, tempdir};

        /// Helper to create test files with given content
        fn create_test_files(contents: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
            let dir = tempdir().unwrap();
            let mut paths = Vec::new();

            for (filename, content) in contents {
                let path = dir.path().join(filename);
                let mut file = fs::File::create(&path).unwrap();
                write!(file, "{}", content).unwrap();
                paths.push(path);
            }

            (dir, paths)
        }

        const DOG: &str = "1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_\n\
                           2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_\n\
                           3\tbarked\tbark\tVERB\tVBD\t_\t0\troot\t_\t_\n";
        const CAT: &str = "1\tA\ta\tDET\tDT\t_\t2\tdet\t_\t_\n\
                           2\tcat\tcat\tNOUN\tNN\t_\t3\tnsubj\t_\t_\n\
                           3\tslept\tsleep\tVERB\tVBD\t_\t0\troot\t_\t_\n";

        #[test]
        fn test_tree_bank_from_glob() {
            let (dir, _paths) = create_test_files(&[
                ("b.conllu", CAT),
                ("a.conllu", DOG),
                ("other.txt", "ignored"),
            ]);

            let pattern = format!("{}/*.conllu", dir.path().display());
            let results: Vec<_> = Treebank::from_glob(&pattern).unwrap().into_iter().collect();

            assert_eq!(results.len(), 2);
            // sorted: a.conllu first
            assert_eq!(results[0].words[1].form, "dog");
        }

        #[test]
        fn test_skips_bad_files() {
            let (dir, paths) = create_test_files(&[("good.conllu", DOG)]);

            let good_file = paths[0].clone();
            let bad_file = dir.path().join("nonexistent.conllu");
            let paths = vec![good_file.clone(), bad_file, good_file];

            let results: Vec<_> = Treebank::from_paths(paths).into_iter().collect();

            assert_eq!(results.len(), 2);
        }

        #[test]
        fn test_reads_gzip() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("cat.conllu.gz");
            let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
            encoder.write_all(CAT.as_bytes()).unwrap();
            encoder.finish().unwrap();

            let trees: Vec<_> = Treebank::from_file(&path).into_iter().collect();
            assert_eq!(trees.len(), 1);
            assert_eq!(trees[0].words[2].lemma, "sleep");
        }

        #[test]
        fn test_pattern_set_parallel() {
            let (_dir, paths) = create_test_files(&[("a.conllu", DOG), ("b.conllu", CAT)]);

            let extractor = PatternExtractor::new(ExtractorConfig::default()).unwrap();
            let tree_bank = Treebank::from_paths(paths);
            let keys: Vec<_> = PatternSet::new(&tree_bank, extractor)
                .into_iter()
                .parallel_map(|(_, pattern)| pattern.key())
                .collect();

            assert_eq!(keys, vec!["barked.8.dog.4", "slept.6.cat.2"]);
        }
    }
}
