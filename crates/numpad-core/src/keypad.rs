// Keypad tables: digit -> ordered letter group, with a reverse letter -> digit lookup

use hashbrown::HashMap;

/// Letter groups of the predictive (T9) keypad, lowercase before uppercase.
pub const T9_LAYOUT: &[(char, &str)] = &[
    ('2', "abcABC"),
    ('3', "defDEF"),
    ('4', "ghiGHI"),
    ('5', "jklJKL"),
    ('6', "mnoMNO"),
    ('7', "pqrsPQRS"),
    ('8', "tuvTUV"),
    ('9', "wxyzWXYZ"),
];

/// Cycling groups of the multitap keypad. Each group ends with the digit
/// itself so that cycling past the last letter produces the digit.
pub const MULTITAP_LAYOUT: &[(char, &str)] = &[
    ('0', " 0"),
    ('1', ".,?!-1"),
    ('2', "abcABC2"),
    ('3', "defDEF3"),
    ('4', "ghiGHI4"),
    ('5', "jklJKL5"),
    ('6', "mnoMNO6"),
    ('7', "pqrsPQRS7"),
    ('8', "tuvTUV8"),
    ('9', "wxyzWXYZ9"),
];

/// Mapping from a keypad key to the ordered characters it stands for.
///
/// The reverse lookup (character to key) is built once at construction.
/// When a character appears in more than one group, the group defined last
/// wins the reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadMap {
    groups: HashMap<char, Vec<char>>,
    reverse: HashMap<char, char>,
}

impl KeypadMap {
    /// Build a map from `(key, characters)` pairs.
    pub fn from_layout<'a>(layout: impl IntoIterator<Item = (char, &'a str)>) -> Self {
        let mut groups = HashMap::new();
        let mut reverse = HashMap::new();
        for (key, chars) in layout {
            let group: Vec<char> = chars.chars().collect();
            for &c in &group {
                reverse.insert(c, key);
            }
            groups.insert(key, group);
        }
        Self { groups, reverse }
    }

    /// The default predictive keypad (digits 2-9).
    pub fn t9() -> Self {
        Self::from_layout(T9_LAYOUT.iter().copied())
    }

    /// The default multitap keypad (digits 0-9, including punctuation and space).
    pub fn multitap() -> Self {
        Self::from_layout(MULTITAP_LAYOUT.iter().copied())
    }

    /// Characters assigned to `key`, in cycling order.
    pub fn letters(&self, key: char) -> Option<&[char]> {
        self.groups.get(&key).map(Vec::as_slice)
    }

    /// Whether `c` belongs to the group of `key`.
    pub fn contains(&self, key: char, c: char) -> bool {
        self.groups.get(&key).is_some_and(|group| group.contains(&c))
    }

    /// The key that produces `c`, if any.
    pub fn key_for(&self, c: char) -> Option<char> {
        self.reverse.get(&c).copied()
    }

    /// Translate a word back into the key sequence that types it.
    ///
    /// Characters without a key are skipped.
    pub fn word_to_keys(&self, word: &str) -> String {
        word.chars().filter_map(|c| self.key_for(c)).collect()
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for KeypadMap {
    fn default() -> Self {
        Self::t9()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t9_letters() {
        let map = KeypadMap::t9();
        assert_eq!(map.letters('2'), Some(&['a', 'b', 'c', 'A', 'B', 'C'][..]));
        assert_eq!(map.letters('7').map(<[char]>::len), Some(8));
        assert!(map.letters('1').is_none());
        assert!(map.letters('0').is_none());
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn reverse_lookup() {
        let map = KeypadMap::t9();
        assert_eq!(map.key_for('a'), Some('2'));
        assert_eq!(map.key_for('S'), Some('7'));
        assert_eq!(map.key_for('z'), Some('9'));
        assert_eq!(map.key_for('!'), None);
    }

    #[test]
    fn word_to_keys_skips_unmapped() {
        let map = KeypadMap::t9();
        assert_eq!(map.word_to_keys("hello"), "43556");
        assert_eq!(map.word_to_keys("Bad"), "223");
        assert_eq!(map.word_to_keys("don't"), "3668");
        assert_eq!(map.word_to_keys(""), "");
    }

    #[test]
    fn contains_respects_group() {
        let map = KeypadMap::t9();
        assert!(map.contains('3', 'e'));
        assert!(map.contains('3', 'E'));
        assert!(!map.contains('3', 'a'));
        assert!(!map.contains('1', 'a'));
    }

    #[test]
    fn multitap_groups_end_with_digit() {
        let map = KeypadMap::multitap();
        for (key, _) in MULTITAP_LAYOUT {
            let group = map.letters(*key).unwrap();
            assert_eq!(group.last(), Some(key));
        }
        assert_eq!(map.key_for(' '), Some('0'));
        assert_eq!(map.key_for('?'), Some('1'));
    }

    #[test]
    fn later_group_wins_reverse_lookup() {
        let map = KeypadMap::from_layout([('2', "ab"), ('3', "bc")]);
        assert_eq!(map.key_for('a'), Some('2'));
        assert_eq!(map.key_for('b'), Some('3'));
    }

    #[test]
    fn default_is_t9() {
        assert_eq!(KeypadMap::default(), KeypadMap::t9());
    }
}
