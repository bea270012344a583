use crate::serialization::{MoleculeType, Signature};

/// Selectors applied while signature files are read in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadParams {
    pub ksize: Option<u32>,
    pub moltype: Option<MoleculeType>,
}

impl LoadParams {
    pub fn matches(&self, signature: &Signature) -> bool {
        self.ksize.map_or(true, |k| k == signature.ksize)
            && self.moltype.map_or(true, |m| m == signature.moltype)
    }
}

/// Substring predicates on signature metadata. A signature is selected only
/// if it satisfies every predicate that is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectParams {
    pub name: Option<String>,
    pub md5: Option<String>,
}

impl SelectParams {
    pub fn is_active(&self) -> bool {
        self.name.is_some() || self.md5.is_some()
    }

    pub fn selects(&self, signature: &Signature) -> bool {
        let name_ok = match &self.name {
            Some(name) => signature.identifier().contains(name.as_str()),
            None => true,
        };
        let md5_ok = match &self.md5 {
            Some(md5) => signature.md5sum.contains(md5.as_str()),
            None => true,
        };
        name_ok && md5_ok
    }

    pub fn select(&self, signatures: Vec<Signature>) -> Vec<Signature> {
        if !self.is_active() {
            return signatures;
        }
        signatures.into_iter().filter(|s| self.selects(s)).collect()
    }
}

#[cfg(test)]
fn sig(name: &str, md5sum: &str, ksize: u32) -> Signature {
    Signature {
        name: name.to_string(),
        filename: String::new(),
        md5sum: md5sum.to_string(),
        ksize,
        moltype: MoleculeType::Dna,
        hashes: vec![],
    }
}

#[test]
fn test_select_no_predicates() {
    let sigs = vec![sig("a", "111", 31), sig("b", "222", 31)];
    let selected = SelectParams::default().select(sigs.clone());
    assert_eq!(selected, sigs);
}

#[test]
fn test_select_predicates_are_anded() {
    let sigs = vec![
        sig("ecoli K12", "abc123", 31),
        sig("ecoli O157", "def456", 31),
        sig("salmonella", "abc789", 31),
    ];

    let params = SelectParams {
        name: Some("ecoli".to_string()),
        md5: None,
    };
    assert_eq!(params.select(sigs.clone()).len(), 2);

    let params = SelectParams {
        name: None,
        md5: Some("abc".to_string()),
    };
    assert_eq!(params.select(sigs.clone()).len(), 2);

    let params = SelectParams {
        name: Some("ecoli".to_string()),
        md5: Some("abc".to_string()),
    };
    let selected = params.select(sigs.clone());
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "ecoli K12");

    let params = SelectParams {
        name: Some("bacillus".to_string()),
        md5: Some("abc".to_string()),
    };
    assert!(params.select(sigs).is_empty());
}

#[test]
fn test_select_is_idempotent() {
    let sigs = vec![sig("one", "aa", 21), sig("two", "ab", 21), sig("three", "ba", 21)];
    let params = SelectParams {
        name: Some("o".to_string()),
        md5: Some("a".to_string()),
    };
    let once = params.select(sigs);
    let twice = params.select(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_load_params_matches() {
    let s = sig("x", "00", 21);
    assert!(LoadParams::default().matches(&s));
    assert!(LoadParams {
        ksize: Some(21),
        moltype: Some(MoleculeType::Dna)
    }
    .matches(&s));
    assert!(!LoadParams {
        ksize: Some(31),
        moltype: None
    }
    .matches(&s));
    assert!(!LoadParams {
        ksize: None,
        moltype: Some(MoleculeType::Protein)
    }
    .matches(&s));
}
