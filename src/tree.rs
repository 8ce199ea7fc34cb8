//! Arena-backed dependency trees
//!
//! Words live in a flat vector and refer to each other by index, so the
//! tree can be shared freely and traversed without reference counting.

use crate::deprel::DepRel;
use std::collections::HashMap;

/// Index of a word within its tree (0-based surface position)
pub type WordId = usize;

/// A single word of a parsed sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: WordId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: Option<String>,
    pub deprel: DepRel,
    pub head: Option<WordId>,
    pub children: Vec<WordId>,
    /// False when the word is glued to the next one (CoNLL-U `SpaceAfter=No`)
    pub space_after: bool,
}

impl Word {
    /// Create a new word with the given attributes
    pub fn new(id: WordId, form: &str, lemma: &str, upos: &str, deprel: &str) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: None,
            deprel: DepRel::from(deprel),
            head: None,
            children: Vec::new(),
            space_after: true,
        }
    }

    #[inline]
    pub fn is_verb(&self) -> bool {
        self.upos == "VERB"
    }

    /// Iterate over the children of this word
    pub fn children<'a>(&'a self, tree: &'a Tree) -> impl Iterator<Item = &'a Word> + 'a {
        self.children.iter().filter_map(move |&id| tree.word(id))
    }

    /// Get the parent of this word
    pub fn parent<'a>(&self, tree: &'a Tree) -> Option<&'a Word> {
        self.head.and_then(|id| tree.word(id))
    }
}

/// A dependency tree (sentence)
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub words: Vec<Word>,
    pub root_id: Option<WordId>,
    pub sentence_text: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree carrying sentence text and comment metadata
    pub fn with_metadata(
        sentence_text: Option<String>,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self {
            sentence_text,
            metadata,
            ..Self::default()
        }
    }

    /// Add a word to the tree
    ///
    /// The word's id is reset to its position in the arena.
    pub fn add_word(&mut self, mut word: Word) -> WordId {
        let id = self.words.len();
        word.id = id;
        self.words.push(word);
        id
    }

    /// Get a word by id
    #[inline]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    /// Attach `child_id` under `parent_id`
    ///
    /// Children are kept in ascending surface order.
    pub fn set_parent(&mut self, child_id: WordId, parent_id: WordId) {
        if child_id >= self.words.len() || parent_id >= self.words.len() {
            return;
        }
        if let Some(old) = self.words[child_id].head {
            self.words[old].children.retain(|&c| c != child_id);
        }
        self.words[child_id].head = Some(parent_id);
        let siblings = &mut self.words[parent_id].children;
        if let Err(pos) = siblings.binary_search(&child_id) {
            siblings.insert(pos, child_id);
        }
    }

    /// Get the parent of a word
    pub fn parent(&self, id: WordId) -> Option<&Word> {
        self.word(id).and_then(|word| word.parent(self))
    }

    /// Get the children of a word in surface order
    pub fn children(&self, id: WordId) -> impl Iterator<Item = &Word> + '_ {
        self.word(id)
            .into_iter()
            .flat_map(move |word| word.children(self))
    }

    /// Walk the governors of a word, nearest first, ending at the root
    pub fn ancestors(&self, id: WordId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.word(id).and_then(|w| w.head),
            remaining: self.words.len(),
        }
    }

    /// Character offset of a word in the text rebuilt from the forms,
    /// with a single space after every word not marked `SpaceAfter=No`
    pub fn char_offset(&self, id: WordId) -> Option<usize> {
        self.word(id)?;
        Some(
            self.words[..id]
                .iter()
                .map(|w| w.form.chars().count() + usize::from(w.space_after))
                .sum(),
        )
    }

    /// Append the words of another sentence, shifting its ids past ours
    ///
    /// The first root seen stays the tree's root; later sentence roots
    /// simply have no head.
    pub fn append(&mut self, other: Tree) {
        let offset = self.words.len();
        for mut word in other.words {
            word.head = word.head.map(|h| h + offset);
            for child in &mut word.children {
                *child += offset;
            }
            self.add_word(word);
        }
        self.root_id = self.root_id.or(other.root_id.map(|r| r + offset));
        self.sentence_text = match (self.sentence_text.take(), other.sentence_text) {
            (Some(a), Some(b)) => Some(format!("{} {}", a, b)),
            (a, b) => a.or(b),
        };
        self.metadata.extend(other.metadata);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Iterator over the ancestor chain of a word
///
/// Never yields more than `tree.len()` words, so a malformed head cycle
/// cannot loop forever.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<WordId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Word;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let word = self.tree.word(self.next?)?;
        self.next = word.head;
        Some(word)
    }
}
