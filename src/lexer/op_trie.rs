use super::OperatorTrie;

impl OperatorTrie {
    pub fn new() -> Self {
        Self {
            terminal: false,
            children: Vec::new(),
        }
    }

    /// Build a trie over a fixed operator set.
    pub fn with_operators(operators: &[&str]) -> Self {
        let mut trie = Self::new();
        for operator in operators {
            trie.insert(operator.as_bytes());
        }
        trie
    }

    fn insert(&mut self, value: &[u8]) {
        if let Some((head, rest)) = value.split_first() {
            match self.children.binary_search_by_key(head, |child| child.0) {
                Ok(index) => self.children[index].1.insert(rest),
                Err(index) => {
                    let mut node = OperatorTrie::new();
                    node.insert(rest);
                    self.children.insert(index, (*head, node));
                }
            }
        } else {
            self.terminal = true;
        }
    }

    fn walk(&self, bytes: &[u8]) -> Option<&OperatorTrie> {
        let mut current = self;
        for byte in bytes {
            match current.children.binary_search_by_key(byte, |child| child.0) {
                Ok(index) => current = &current.children[index].1,
                Err(_) => return None,
            }
        }
        Some(current)
    }

    /// Whether some operator of the set starts with `candidate`. The
    /// coalescer keeps extending its pending buffer while this holds.
    pub fn is_prefix(&self, candidate: &[u8]) -> bool {
        self.walk(candidate).is_some()
    }

    /// Whether `candidate` is itself an operator of the set.
    pub fn contains(&self, candidate: &[u8]) -> bool {
        self.walk(candidate).map_or(false, |node| node.terminal)
    }

    /// Whether a lexeme beginning with `first` can open a multi-character
    /// operator.
    pub fn opens_with(&self, first: u8) -> bool {
        self.children
            .binary_search_by_key(&first, |child| child.0)
            .is_ok()
    }
}

impl Default for OperatorTrie {
    fn default() -> Self {
        Self::new()
    }
}
