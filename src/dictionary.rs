use crate::DictionaryError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt::Debug;
use tracing::debug;

/// Decides which words may be played. Checking may take a network round trip, so it is the one
/// place where applying [turns](crate::Turn) waits.
///
/// # Errors
///
/// The implementor returns [`DictionaryError::InvalidWords`] naming every rejected word, or
/// [`DictionaryError::Unavailable`] when it cannot decide. Either error aborts the whole batch
/// of [turns](crate::Turn) being applied.
#[allow(single_use_lifetimes)]
#[async_trait]
pub trait Dictionary: Debug + Send + Sync {
    /// Checks every word of `words`, which are spelled in upper case as they appear on the
    /// board.
    async fn check_words(&self, words: &[String]) -> Result<(), DictionaryError>;
}

/// Accepts every word.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PermissiveDictionary;

#[allow(single_use_lifetimes)]
#[async_trait]
impl Dictionary for PermissiveDictionary {
    async fn check_words(&self, _words: &[String]) -> Result<(), DictionaryError> {
        Ok(())
    }
}

/// Accepts the words of an in-memory list, ignoring case.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    /// # Returns
    ///
    /// A [`WordListDictionary`] accepting `words`.
    pub fn new<I, S>(words: I) -> WordListDictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        WordListDictionary {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// The number of accepted words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word is accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

#[allow(single_use_lifetimes)]
#[async_trait]
impl Dictionary for WordListDictionary {
    async fn check_words(&self, words: &[String]) -> Result<(), DictionaryError> {
        let invalid: Vec<String> = words
            .iter()
            .filter(|word| !self.contains(word))
            .cloned()
            .collect();

        if !invalid.is_empty() {
            debug!(?invalid, "rejected words");
            return Err(DictionaryError::InvalidWords(invalid));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|&word| word.to_owned()).collect()
    }

    #[test]
    fn permissive_accepts_anything() {
        assert_eq!(
            Ok(()),
            block_on(PermissiveDictionary.check_words(&words(&["QXZ", ""])))
        );
    }

    #[test]
    fn word_list_ignores_case() {
        let dictionary = WordListDictionary::new(["cat", "Dog"]);

        assert_eq!(2, dictionary.len());
        assert_eq!(
            Ok(()),
            block_on(dictionary.check_words(&words(&["CAT", "dog"])))
        );
    }

    #[test]
    fn word_list_reports_every_rejected_word() {
        let dictionary = WordListDictionary::new(["CAT"]);

        assert_eq!(
            Err(DictionaryError::InvalidWords(words(&["CATS", "AX"]))),
            block_on(dictionary.check_words(&words(&["CATS", "CAT", "AX"])))
        );
    }

    #[test]
    fn empty_list_accepts_no_words() {
        let dictionary = WordListDictionary::default();

        assert!(dictionary.is_empty());
        assert!(block_on(dictionary.check_words(&words(&["A"]))).is_err());
        assert_eq!(Ok(()), block_on(dictionary.check_words(&[])));
    }
}
