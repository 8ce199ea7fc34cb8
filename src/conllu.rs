//! CoNLL-U file parsing
//!
//! Parses CoNLL-U sentences into Tree structures. Multiword token ranges
//! and empty nodes are skipped; only surface words enter the tree.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::extractor::Parse;
use crate::tree::{Tree, Word, WordId};
use flate2::read::MultiGzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Lines, Read};
use std::path::Path;
use thiserror::Error;

/// Error during CoNLL-U parsing
#[derive(Debug, Error)]
#[error("Parse error at line {line_num}: {message}")]
pub struct ParseError {
    pub line_num: usize,
    pub message: String,
}

impl ParseError {
    fn new(line_num: usize, message: impl Into<String>) -> Self {
        Self {
            line_num,
            message: message.into(),
        }
    }
}

/// Iterator over the sentences of a CoNLL-U source
pub struct TreeIterator<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl TreeIterator<BufReader<Box<dyn Read + Send>>> {
    /// Open a file, transparently decompressing `.gz` files
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let inner: Box<dyn Read + Send> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self::from_reader(BufReader::new(inner)))
    }
}

impl TreeIterator<BufReader<Cursor<String>>> {
    /// Create a reader from a string
    pub fn from_string(text: &str) -> Self {
        Self::from_reader(BufReader::new(Cursor::new(text.to_string())))
    }
}

impl<R: BufRead> TreeIterator<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for TreeIterator<R> {
    type Item = Result<Tree, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut tree_lines = Vec::new();
        let mut metadata = HashMap::new();
        let mut sentence_text = None;

        // Read lines until we hit a blank line (sentence boundary) or EOF
        loop {
            match self.lines.next() {
                None => {
                    if tree_lines.is_empty() && sentence_text.is_none() && metadata.is_empty() {
                        return None;
                    }
                    break;
                }
                Some(Err(e)) => {
                    self.line_num += 1;
                    return Some(Err(ParseError::new(
                        self.line_num,
                        format!("IO error: {}", e),
                    )));
                }
                Some(Ok(line)) => {
                    self.line_num += 1;
                    let line = line.trim();

                    if line.is_empty() {
                        if !tree_lines.is_empty() {
                            break;
                        }
                        continue;
                    }

                    if let Some(comment) = line.strip_prefix('#') {
                        parse_comment(comment, &mut metadata, &mut sentence_text);
                        continue;
                    }

                    tree_lines.push((self.line_num, line.to_string()));
                }
            }
        }

        Some(parse_tree(tree_lines, sentence_text, metadata))
    }
}

/// Parser collaborator reading a CoNLL-U document
///
/// Every sentence block is merged into one tree, in document order; the
/// first malformed block fails the whole parse. An empty input gives an
/// empty tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConlluParser;

impl Parse for ConlluParser {
    fn parse(&self, text: &str) -> Result<Tree, ParseError> {
        let mut document = Tree::new();
        for sentence in TreeIterator::from_string(text) {
            document.append(sentence?);
        }
        Ok(document)
    }
}

/// Parse a comment line (starts with #)
fn parse_comment(
    comment: &str,
    metadata: &mut HashMap<String, String>,
    sentence_text: &mut Option<String>,
) {
    if let Some((key, value)) = comment.trim().split_once('=') {
        let key = key.trim();
        let value = value.trim();
        if key == "text" {
            *sentence_text = Some(value.to_string());
        } else {
            metadata.insert(key.to_string(), value.to_string());
        }
    }
}

/// Parse accumulated lines into a Tree
fn parse_tree(
    lines: Vec<(usize, String)>,
    sentence_text: Option<String>,
    metadata: HashMap<String, String>,
) -> Result<Tree, ParseError> {
    let mut tree = Tree::with_metadata(sentence_text, metadata);
    let mut heads = Vec::new();

    for (line_num, line) in lines {
        if let Some((word, head)) = parse_line(&line, line_num)? {
            heads.push((line_num, head));
            tree.add_word(word);
        }
    }

    // HEAD is 1-indexed in CoNLL-U, 0 marks the root
    let word_count = tree.len();
    for (id, (line_num, head)) in heads.into_iter().enumerate() {
        match head {
            0 => tree.root_id = tree.root_id.or(Some(id)),
            h if h == id + 1 => {
                return Err(ParseError::new(line_num, format!("word {} is its own HEAD", h)));
            }
            h if h <= word_count => tree.set_parent(id, h - 1),
            h => {
                return Err(ParseError::new(
                    line_num,
                    format!("HEAD {} out of range (sentence has {} words)", h, word_count),
                ));
            }
        }
    }

    Ok(tree)
}

/// Parse a single CoNLL-U line into a Word and its raw HEAD value
/// Returns None for multiword tokens and empty nodes
fn parse_line(line: &str, line_num: usize) -> Result<Option<(Word, WordId)>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(ParseError::new(
            line_num,
            format!("Expected 10 fields, found {}", fields.len()),
        ));
    }

    // Skip multiword tokens (1-2) and empty nodes (2.1)
    if fields[0].contains(['-', '.']) {
        return Ok(None);
    }
    fields[0]
        .parse::<usize>()
        .map_err(|_| ParseError::new(line_num, format!("Invalid ID: {}", fields[0])))?;

    let form = fields[1];
    let lemma = if fields[2] == "_" { form } else { fields[2] };
    let mut word = Word::new(0, form, lemma, fields[3], fields[7]);
    word.xpos = (fields[4] != "_").then(|| fields[4].to_string());
    word.space_after = !fields[9].split('|').any(|item| item == "SpaceAfter=No");

    let head = if fields[6] == "_" {
        0
    } else {
        fields[6]
            .parse()
            .map_err(|_| ParseError::new(line_num, format!("Invalid HEAD: {}", fields[6])))?
    };

    Ok(Some((word, head)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprel::DepRel;

    #[test]
    fn test_parse_simple_sentence() {
        let conllu = r#"# text = The dog runs.
1	The	the	DET	DT	_	2	det	_	_
2	dog	dog	NOUN	NN	_	3	nsubj	_	_
3	runs	run	VERB	VBZ	_	0	root	_	SpaceAfter=No
4	.	.	PUNCT	.	_	3	punct	_	_

"#;

        let mut reader = TreeIterator::from_string(conllu);
        let tree = reader.next().unwrap().unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.sentence_text, Some("The dog runs.".to_string()));
        assert_eq!(tree.root_id, Some(2));

        assert_eq!(tree.words[0].form, "The");
        assert_eq!(tree.words[0].lemma, "the");
        assert_eq!(tree.words[0].upos, "DET");
        assert_eq!(tree.words[0].xpos.as_deref(), Some("DT"));
        assert_eq!(tree.words[1].deprel, DepRel::Other("nsubj".to_string()));

        assert_eq!(tree.words[2].head, None);
        assert_eq!(tree.words[2].children, vec![1, 3]);
        assert!(!tree.words[2].space_after);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_skips_multiword_and_empty_nodes() {
        let conllu = "1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_\n\
                      1\tdo\tdo\tAUX\tVBP\t_\t3\taux\t_\t_\n\
                      2\tn't\tnot\tPART\tRB\t_\t3\tneg\t_\t_\n\
                      2.1\tgo\tgo\tVERB\t_\t_\t_\t_\t_\t_\n\
                      3\tgo\tgo\tVERB\tVB\t_\t0\troot\t_\t_\n";

        let tree = TreeIterator::from_string(conllu).next().unwrap().unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.words[1].deprel, DepRel::Neg);
        assert_eq!(tree.words[2].children, vec![0, 1]);
    }

    #[test]
    fn test_multiple_sentences() {
        let conllu = "1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\n\n\
                      1\tsleeps\tsleep\tVERB\tVBZ\t_\t0\troot\t_\t_\n";
        let trees: Vec<_> = TreeIterator::from_string(conllu).collect();
        assert_eq!(trees.len(), 2);
        assert!(trees.iter().all(|t| t.is_ok()));
    }

    #[test]
    fn test_bad_field_count() {
        let conllu = "1\truns\trun\tVERB\n";
        let err = TreeIterator::from_string(conllu).next().unwrap().unwrap_err();
        assert_eq!(err.line_num, 1);
        assert!(err.message.contains("Expected 10 fields"));
    }

    #[test]
    fn test_head_out_of_range() {
        let conllu = "1\truns\trun\tVERB\tVBZ\t_\t7\troot\t_\t_\n";
        let err = TreeIterator::from_string(conllu).next().unwrap().unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_self_head_rejected() {
        let conllu = "1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\
                      2\tfast\tfast\tADV\tRB\t_\t2\tadvmod\t_\t_\n";
        let err = TreeIterator::from_string(conllu).next().unwrap().unwrap_err();
        assert_eq!(err.line_num, 2);
        assert!(err.message.contains("own HEAD"));
    }

    #[test]
    fn test_conllu_parser_merges_sentences() {
        let conllu = "1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_\n\
                      2\tdog\tdog\tNOUN\tNN\t_\t3\tnsubj\t_\t_\n\
                      3\tbarked\tbark\tVERB\tVBD\t_\t0\troot\t_\t_\n\n\
                      1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_\n\
                      2\tcats\tcat\tNOUN\tNNS\t_\t3\tnsubj\t_\t_\n\
                      3\tslept\tsleep\tVERB\tVBD\t_\t0\troot\t_\t_\n";
        let tree = ConlluParser.parse(conllu).unwrap();

        assert_eq!(tree.len(), 6);
        assert_eq!(tree.root_id, Some(2));
        assert_eq!(tree.words[4].head, Some(5));
        assert_eq!(tree.words[5].children, vec![4]);
        assert!(tree.words[5].head.is_none());
    }

    #[test]
    fn test_conllu_parser_reports_later_bad_sentence() {
        let conllu = "1\truns\trun\tVERB\tVBZ\t_\t0\troot\t_\t_\n\n\
                      1\tbroken\n";
        let err = ConlluParser.parse(conllu).unwrap_err();
        assert_eq!(err.line_num, 3);
    }

    #[test]
    fn test_conllu_parser_empty_input() {
        let tree = ConlluParser.parse("").unwrap();
        assert!(tree.is_empty());
    }
}
