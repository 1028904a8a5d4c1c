//! In-process [`IndexGateway`] that evaluates [`Clause`] trees directly.
//!
//! Text matching approximates the search backend's behaviour: values are
//! lower-cased and split on non-alphanumeric characters, a match succeeds when
//! any query token matches any field token, and fuzzy matches allow the
//! `AUTO` edit distance (0 for terms of 1-2 characters, 1 for 3-5, 2 above).

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use super::{IndexGateway, RawHit};
use crate::error::{InventoryError, Result};
use crate::models::{FieldValue, ProductDocument};
use crate::query::Clause;

/// Documents kept in memory, ordered by id.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    docs: RwLock<BTreeMap<String, ProductDocument>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, ProductDocument>>> {
        self.docs
            .read()
            .map_err(|_| InventoryError::Backend("Memory index lock poisoned".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, ProductDocument>>> {
        self.docs
            .write()
            .map_err(|_| InventoryError::Backend("Memory index lock poisoned".into()))
    }
}

impl IndexGateway for MemoryGateway {
    fn upsert(&self, id: &str, document: &ProductDocument) -> Result<()> {
        self.write()?.insert(id.to_string(), document.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<RawHit>> {
        Ok(self.read()?.get(id).map(|doc| RawHit {
            id: id.to_string(),
            source: doc.clone(),
        }))
    }

    fn search(&self, query: &Clause) -> Result<Vec<RawHit>> {
        let docs = self.read()?;
        let hits: Vec<RawHit> = docs
            .iter()
            .filter(|(_, doc)| matches(query, doc))
            .map(|(id, doc)| RawHit {
                id: id.clone(),
                source: doc.clone(),
            })
            .collect();
        debug!(hits = hits.len(), scanned = docs.len(), "memory search complete");
        Ok(hits)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Whether `doc` satisfies `clause`.
pub fn matches(clause: &Clause, doc: &ProductDocument) -> bool {
    match clause {
        Clause::MatchAll => true,
        Clause::Match {
            field,
            value,
            fuzzy,
        } => match doc.field(field) {
            Some(FieldValue::Text(text)) => text_matches(text, value, *fuzzy),
            Some(FieldValue::Integer(n)) => value.trim().parse::<i64>() == Ok(n),
            None => false,
        },
        Clause::Term { field, value } => match doc.field(field) {
            Some(FieldValue::Text(text)) => text == value,
            Some(FieldValue::Integer(n)) => value.parse::<i64>() == Ok(n),
            None => false,
        },
        Clause::Range { field, gte, lte } => match doc.field(field) {
            Some(FieldValue::Integer(n)) => {
                gte.map_or(true, |min| n >= min) && lte.map_or(true, |max| n <= max)
            }
            _ => false,
        },
        Clause::Bool { must } => must.iter().all(|c| matches(c, doc)),
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn text_matches(text: &str, query: &str, fuzzy: bool) -> bool {
    let field_tokens = tokenize(text);
    tokenize(query).iter().any(|q| {
        let allowed = if fuzzy { auto_fuzziness(q) } else { 0 };
        field_tokens
            .iter()
            .any(|t| edit_distance(q, t) <= allowed)
    })
}

/// Edit distance allowed for a term under `AUTO` fuzziness.
fn auto_fuzziness(term: &str) -> usize {
    match term.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// Optimal string alignment distance over characters: insertions,
/// deletions, substitutions and adjacent transpositions each cost one edit.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut before: Vec<usize> = vec![0; b.len() + 1];
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 0..a.len() {
        curr[0] = i + 1;
        for j in 0..b.len() {
            let substitution = prev[j] + usize::from(a[i] != b[j]);
            let mut best = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
            if i > 0 && j > 0 && a[i] == b[j - 1] && a[i - 1] == b[j] {
                best = best.min(before[j - 1] + 1);
            }
            curr[j + 1] = best;
        }
        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_counts_single_edits() {
        assert_eq!(edit_distance("widget", "widget"), 0);
        assert_eq!(edit_distance("widget", "wdget"), 1);
        assert_eq!(edit_distance("widget", "widgit"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn adjacent_swap_is_one_edit() {
        assert_eq!(edit_distance("widget", "widgte"), 1);
        assert_eq!(edit_distance("amce", "acme"), 1);
        assert_eq!(edit_distance("ab", "ba"), 1);
        // Each character may only be edited once.
        assert_eq!(edit_distance("ca", "abc"), 3);
    }

    #[test]
    fn auto_fuzziness_scales_with_length() {
        assert_eq!(auto_fuzziness("x1"), 0);
        assert_eq!(auto_fuzziness("acme"), 1);
        assert_eq!(auto_fuzziness("widgets"), 2);
    }

    #[test]
    fn short_terms_must_match_exactly_even_when_fuzzy() {
        assert!(text_matches("Acme Widget X1", "x1", true));
        assert!(!text_matches("Acme Widget X1", "x2", true));
    }

    #[test]
    fn fuzzy_match_tolerates_typos() {
        assert!(text_matches("Acme Widget X1", "wigdet", true));
        assert!(!text_matches("Acme Widget X1", "wigdet", false));
    }
}
