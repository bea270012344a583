use rayon::prelude::*;

use crate::hashing::{HashMapByHash, ItemHash};
use crate::serialization::Signature;

/// Total abundance of every hash seen across a set of signatures.
///
/// Hashes that never occur have no entry; there are no zero-valued entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbundanceMap {
    counts: HashMapByHash<u64>,
}

impl AbundanceMap {
    pub fn new() -> Self {
        AbundanceMap::default()
    }

    /// Add `count` to the running total for `hash`.
    #[inline]
    pub fn add(&mut self, hash: ItemHash, count: u64) {
        if count == 0 {
            return;
        }
        let total = self.counts.entry(hash).or_insert(0);
        *total = total.saturating_add(count);
    }

    pub fn add_signature(&mut self, signature: &Signature) {
        for kmer in &signature.hashes {
            self.add(kmer.hash, kmer.count);
        }
    }

    /// Entrywise sum of two maps.
    pub fn merge(self, other: AbundanceMap) -> AbundanceMap {
        // fold the smaller map into the larger one
        let (mut base, extra) = if self.counts.len() >= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (hash, count) in extra.counts {
            base.add(hash, count);
        }
        base
    }

    pub fn get(&self, hash: ItemHash) -> Option<u64> {
        self.counts.get(&hash).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every aggregate abundance.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |t, c| t.saturating_add(*c))
    }

    pub fn values(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }

    /// `(hash, abundance)` pairs in ascending hash order.
    pub fn sorted(&self) -> Vec<(ItemHash, u64)> {
        let mut pairs: Vec<(ItemHash, u64)> = self.counts.iter().map(|(h, c)| (*h, *c)).collect();
        pairs.sort_unstable_by_key(|p| p.0);
        pairs
    }
}

/// Sum the abundances of every hash over all `signatures`.
pub fn aggregate(signatures: &[Signature]) -> AbundanceMap {
    let mut abundances = AbundanceMap::new();
    for signature in signatures {
        abundances.add_signature(signature);
    }
    abundances
}

/// Same result as `aggregate`, with the signatures split across the rayon
/// thread pool and the partial maps merged at the end.
pub fn par_aggregate(signatures: &[Signature]) -> AbundanceMap {
    signatures
        .par_iter()
        .fold(AbundanceMap::new, |mut abundances, signature| {
            abundances.add_signature(signature);
            abundances
        })
        .reduce(AbundanceMap::new, AbundanceMap::merge)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::serialization::{KmerCount, MoleculeType};

    fn sig(pairs: &[(u64, u64)]) -> Signature {
        let mut hashes: Vec<KmerCount> = pairs
            .iter()
            .map(|&(hash, count)| KmerCount { hash, count })
            .collect();
        hashes.sort_unstable_by_key(|k| k.hash);
        hashes.dedup_by_key(|k| k.hash);
        Signature {
            name: String::new(),
            filename: String::new(),
            md5sum: String::new(),
            ksize: 31,
            moltype: MoleculeType::Dna,
            hashes,
        }
    }

    #[test]
    fn test_aggregate() {
        let a = sig(&[(1, 3), (2, 5)]);
        let b = sig(&[(1, 2), (3, 1)]);
        let abundances = aggregate(&[a, b]);
        assert_eq!(abundances.len(), 3);
        assert_eq!(abundances.get(1), Some(5));
        assert_eq!(abundances.get(2), Some(5));
        assert_eq!(abundances.get(3), Some(1));
        assert_eq!(abundances.get(4), None);
        assert_eq!(abundances.sorted(), vec![(1, 5), (2, 5), (3, 1)]);
        assert_eq!(abundances.total(), 11);
    }

    #[test]
    fn test_aggregate_empty() {
        let abundances = aggregate(&[]);
        assert!(abundances.is_empty());
        assert!(abundances.values().is_empty());
        assert_eq!(abundances.total(), 0);
    }

    #[test]
    fn test_add_saturates_and_skips_zero() {
        let mut abundances = AbundanceMap::new();
        abundances.add(7, 0);
        assert!(abundances.is_empty());
        abundances.add(7, u64::MAX);
        abundances.add(7, 10);
        assert_eq!(abundances.get(7), Some(u64::MAX));
    }

    fn arb_sigs() -> impl Strategy<Value = Vec<Signature>> {
        prop::collection::vec(
            prop::collection::vec((0u64..64, 1u64..1000), 0..20).prop_map(|p| sig(&p)),
            0..8,
        )
    }

    proptest! {
        #[test]
        fn test_aggregate_is_associative(sigs in arb_sigs(), split in 0usize..8) {
            let split = split.min(sigs.len());
            let (left, right) = sigs.split_at(split);
            prop_assert_eq!(aggregate(left).merge(aggregate(right)), aggregate(&sigs));
        }

        #[test]
        fn test_aggregate_is_order_independent(sigs in arb_sigs()) {
            let mut reversed = sigs.clone();
            reversed.reverse();
            prop_assert_eq!(aggregate(&reversed), aggregate(&sigs));
        }

        #[test]
        fn test_aggregate_conserves_abundance(sigs in arb_sigs()) {
            let expected: u64 = sigs
                .iter()
                .flat_map(|s| s.hashes.iter().map(|k| k.count))
                .sum();
            prop_assert_eq!(aggregate(&sigs).total(), expected);
        }

        #[test]
        fn test_par_aggregate_matches(sigs in arb_sigs()) {
            prop_assert_eq!(par_aggregate(&sigs), aggregate(&sigs));
        }
    }
}
