use crate::corpus::{Corpus, DocId, Document};
use crate::query::{self, Presence, Term};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub type TermId = u32;

/// Searchable fields. The document id is deliberately not one of them:
/// positions are not searchable, and purely numeric words never become terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Author,
    Category,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Author, Field::Category];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Category => "category",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    fn text(self, doc: &Document) -> &str {
        match self {
            Field::Title => &doc.title,
            Field::Author => &doc.author,
            Field::Category => &doc.category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexOptions {
    pub title_boost: f32,
    pub other_boost: f32,
}

impl Default for IndexOptions {
    fn default() -> Self { Self { title_boost: 10.0, other_boost: 1.0 } }
}

impl IndexOptions {
    pub fn boost(&self, field: Field) -> f32 {
        match field {
            Field::Title => self.title_boost,
            Field::Author | Field::Category => self.other_boost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub field: Field,
    pub tf: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub doc_id: DocId,
    pub score: f32,
}

/// Field-weighted inverted index over a corpus. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    dictionary: BTreeMap<String, TermId>,
    df: Vec<u32>,
    postings: Vec<Vec<Posting>>, // indexed by term id, sorted by (doc_id, field)
    corpus: Corpus,
    options: IndexOptions,
}

/// Build the index. Term ids follow first appearance in corpus order, so two
/// builds of the same corpus are identical.
pub fn build_index(corpus: Corpus, options: IndexOptions) -> SearchIndex {
    let mut dictionary: BTreeMap<String, TermId> = BTreeMap::new();
    let mut df: Vec<u32> = Vec::new();
    let mut postings: Vec<Vec<Posting>> = Vec::new();

    for doc in corpus.iter() {
        let mut seen_in_doc: HashSet<TermId> = HashSet::new();
        for field in Field::ALL {
            let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
            for (term, _pos) in tokenize(field.text(doc)) {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term).or_insert(next_id);
                if tid == next_id && postings.len() <= tid as usize {
                    postings.push(Vec::new());
                    df.push(0);
                }
                *tf_counts.entry(tid).or_insert(0) += 1;
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            for (tid, tf) in tf_counts {
                postings[tid as usize].push(Posting { doc_id: doc.id, field, tf });
            }
        }
    }

    tracing::info!(num_docs = corpus.len(), num_terms = dictionary.len(), "index built");
    SearchIndex { dictionary, df, postings, corpus, options }
}

impl SearchIndex {
    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn options(&self) -> IndexOptions { self.options }
    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.term_id(term).map_or(0, |tid| self.df[tid as usize])
    }

    fn completions<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a String, TermId)> + 'a {
        self.dictionary
            .range(prefix.to_string()..)
            .take_while(move |(t, _)| t.starts_with(prefix))
            .map(|(t, &tid)| (t, tid))
    }

    /// Terms a clause matches, each with a similarity weight. A bare word
    /// matches longer terms at `1 / ln(max(3, extra chars))`.
    fn expand(&self, term: &Term) -> Vec<(TermId, f32)> {
        match term {
            Term::Word(w) => {
                let len = w.chars().count();
                self.completions(w)
                    .map(|(t, tid)| {
                        let extra = t.chars().count() - len;
                        let weight = if extra == 0 { 1.0 } else { 1.0 / (extra.max(3) as f32).ln() };
                        (tid, weight)
                    })
                    .collect()
            }
            Term::Prefix { raw, stemmed } => {
                let mut tids: Vec<TermId> = self.completions(raw).chain(self.completions(stemmed)).map(|(_, tid)| tid).collect();
                tids.sort_unstable();
                tids.dedup();
                tids.into_iter().map(|tid| (tid, 1.0)).collect()
            }
        }
    }

    fn idf(&self, tid: TermId) -> f32 {
        let n = self.corpus.len().max(1) as f32;
        let df_t = self.df[tid as usize].max(1) as f32;
        (1.0 + n / df_t).ln()
    }

    /// Rank documents against `query`, best first. A document must match every
    /// clause except the prohibited ones, which it must not match. Ties go to
    /// the lower doc id.
    pub fn search(&self, query: &str) -> Vec<Hit> {
        let clauses = query::parse(query);
        if clauses.iter().all(|c| c.presence == Presence::Prohibited) {
            return Vec::new();
        }

        let mut scores: HashMap<DocId, f32> = HashMap::new();
        let mut required: Option<HashSet<DocId>> = None;
        let mut prohibited: HashSet<DocId> = HashSet::new();

        for clause in &clauses {
            let mut matched: HashSet<DocId> = HashSet::new();
            for (tid, similarity) in self.expand(&clause.term) {
                let idf = self.idf(tid);
                for p in &self.postings[tid as usize] {
                    if clause.field.is_some_and(|f| f != p.field) { continue; }
                    matched.insert(p.doc_id);
                    if clause.presence == Presence::Required {
                        let tf = 1.0 + (p.tf as f32).ln();
                        *scores.entry(p.doc_id).or_insert(0.0) += similarity * self.options.boost(p.field) * tf * idf;
                    }
                }
            }
            match clause.presence {
                Presence::Required => {
                    required = Some(match required {
                        Some(prev) => prev.intersection(&matched).copied().collect(),
                        None => matched,
                    });
                }
                Presence::Prohibited => prohibited.extend(matched),
            }
        }

        let required = required.unwrap_or_default();
        let mut hits: Vec<Hit> = scores
            .into_iter()
            .filter(|(doc_id, _)| required.contains(doc_id) && !prohibited.contains(doc_id))
            .map(|(doc_id, score)| Hit { doc_id, score })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
        tracing::debug!(query, total_hits = hits.len(), "search");
        hits
    }

    pub fn documents(&self, hits: &[Hit]) -> Vec<&Document> {
        hits.iter().filter_map(|h| self.corpus.get(h.doc_id)).collect()
    }

    pub fn search_documents(&self, query: &str) -> Vec<&Document> {
        self.documents(&self.search(query))
    }
}
