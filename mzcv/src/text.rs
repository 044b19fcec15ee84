//! Text handling utilities

/// The number of single character edits needed to go from one word to the other
pub(crate) fn levenshtein_distance(word1: &str, word2: &str) -> usize {
    let word2_len = word2.chars().count();
    let mut row1 = (0..=word2_len).collect::<Vec<_>>();
    let mut row2 = vec![0; word2_len + 1];

    for (index1, char1) in word1.chars().enumerate() {
        row2[0] = index1 + 1;

        for (index2, char2) in word2.chars().enumerate() {
            let del = row1[index2 + 1] + 1;
            let ins = row2[index2] + 1;
            let sub = row1[index2] + usize::from(char1 != char2);
            row2[index2 + 1] = del.min(ins).min(sub);
        }

        row1.clone_from_slice(&row2);
    }

    row1[word2_len]
}

#[cfg(test)]
mod tests {
    use super::levenshtein_distance;

    #[test]
    fn distances() {
        assert_eq!(levenshtein_distance("PHOSPHO", "PHOSPHO"), 0);
        assert_eq!(levenshtein_distance("PHOSPO", "PHOSPHO"), 1);
        assert_eq!(levenshtein_distance("KITTEN", "SITTING"), 3);
        assert_eq!(levenshtein_distance("", "ABC"), 3);
        assert_eq!(levenshtein_distance("ABC", ""), 3);
    }
}
