use std::collections::HashSet;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::bail;
use crate::errors::AbundResult;
use crate::serialization::{KmerCount, MoleculeType, Signature};

/// The top level of a signature file: usually a list of records, but a
/// bare record is accepted too.
#[derive(Debug)]
pub enum SignatureFile {
    Many(Vec<JsonRecord>),
    One(JsonRecord),
}

impl SignatureFile {
    pub fn from_slice(data: &[u8]) -> AbundResult<Self> {
        let first = data.iter().find(|b| !b.is_ascii_whitespace());
        Ok(if first == Some(&b'[') {
            SignatureFile::Many(serde_json::from_slice(data)?)
        } else {
            SignatureFile::One(serde_json::from_slice(data)?)
        })
    }

    pub fn into_records(self) -> Vec<JsonRecord> {
        match self {
            SignatureFile::Many(records) => records,
            SignatureFile::One(record) => vec![record],
        }
    }
}

/// One sample in a signature file; may hold sketches at several k-mer
/// sizes or molecule types.
#[derive(Debug, Deserialize)]
pub struct JsonRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    pub signatures: Vec<JsonSketch>,
}

impl JsonRecord {
    pub fn into_signatures(self) -> AbundResult<Vec<Signature>> {
        let name = self.name.unwrap_or_default();
        let filename = self.filename.unwrap_or_default();
        let mut signatures = Vec::with_capacity(self.signatures.len());
        for sketch in self.signatures {
            let moltype: MoleculeType = sketch.molecule.parse()?;
            // amino acid sketches store their k-mer size in nucleotides
            let ksize = if moltype == MoleculeType::Dna {
                sketch.ksize
            } else {
                if sketch.ksize % 3 != 0 {
                    bail!(
                        "{} sketch has ksize {}, which is not a multiple of 3",
                        moltype,
                        sketch.ksize
                    );
                }
                sketch.ksize / 3
            };
            signatures.push(Signature {
                name: name.clone(),
                filename: filename.clone(),
                md5sum: sketch.md5sum,
                ksize,
                moltype,
                hashes: sketch.hashes,
            });
        }
        Ok(signatures)
    }
}

fn default_molecule() -> String {
    "DNA".to_string()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JsonSketch {
    pub ksize: u32,
    pub molecule: String,
    pub md5sum: String,
    pub hashes: Vec<KmerCount>,
}

impl<'de> Deserialize<'de> for JsonSketch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BaseJsonSketch {
            ksize: u32,
            #[serde(default = "default_molecule")]
            molecule: String,
            #[serde(default)]
            md5sum: String,
            mins: Vec<u64>,
            abundances: Option<Vec<u64>>,
        }

        let jsketch = BaseJsonSketch::deserialize(deserializer)?;

        if let Some(abundances) = &jsketch.abundances {
            if abundances.len() != jsketch.mins.len() {
                return Err(de::Error::custom(format!(
                    "{} hashes but {} abundances",
                    jsketch.mins.len(),
                    abundances.len()
                )));
            }
        }

        let mut seen = HashSet::with_capacity(jsketch.mins.len());
        let mut hashes = Vec::with_capacity(jsketch.mins.len());
        for (i, hash) in jsketch.mins.iter().enumerate() {
            let count = match &jsketch.abundances {
                Some(v) => v[i],
                None => 1,
            };
            if count == 0 {
                continue;
            }
            if !seen.insert(*hash) {
                return Err(de::Error::custom(format!("hash {} is repeated", hash)));
            }
            hashes.push(KmerCount { hash: *hash, count });
        }
        hashes.sort_unstable_by_key(|k| k.hash);

        Ok(JsonSketch {
            ksize: jsketch.ksize,
            molecule: jsketch.molecule,
            md5sum: jsketch.md5sum,
            hashes,
        })
    }
}
