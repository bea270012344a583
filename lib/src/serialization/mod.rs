mod json;

use std::fmt;
use std::fs::File;
use std::str::FromStr;

use log::debug;
use memmap::MmapOptions;

use crate::errors::{AbundError, AbundResult};
use crate::filtering::LoadParams;
use crate::{bail, format_err};
use crate::hashing::ItemHash;
pub use crate::serialization::json::{JsonRecord, JsonSketch, SignatureFile};

/// One hashed k-mer and how often it was seen in a sample.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct KmerCount {
    pub hash: ItemHash,
    pub count: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MoleculeType {
    Dna,
    Protein,
    Dayhoff,
    Hp,
}

impl FromStr for MoleculeType {
    type Err = AbundError;

    fn from_str(s: &str) -> AbundResult<Self> {
        Ok(match &*s.to_ascii_lowercase() {
            "dna" | "rna" => MoleculeType::Dna,
            "protein" => MoleculeType::Protein,
            "dayhoff" => MoleculeType::Dayhoff,
            "hp" => MoleculeType::Hp,
            x => return Err(format_err!("{} is not a known molecule type", x)),
        })
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            MoleculeType::Dna => "DNA",
            MoleculeType::Protein => "protein",
            MoleculeType::Dayhoff => "dayhoff",
            MoleculeType::Hp => "hp",
        })
    }
}

/// A single sample's sketch with per-hash abundances.
///
/// `hashes` is sorted by hash and every hash appears once.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub name: String,
    pub filename: String,
    pub md5sum: String,
    pub ksize: u32,
    pub moltype: MoleculeType,
    pub hashes: Vec<KmerCount>,
}

impl Signature {
    /// The name used to identify this signature: its own name, then the
    /// file it was computed from, then the start of its md5sum.
    pub fn identifier(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.filename.is_empty() {
            &self.filename
        } else {
            self.md5sum.get(..8).unwrap_or(&self.md5sum)
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Parse the contents of a signature file, keeping only the sketches
/// `load_params` asks for.
pub fn parse_signatures(data: &[u8], load_params: &LoadParams) -> AbundResult<Vec<Signature>> {
    let sig_file = SignatureFile::from_slice(data)?;
    let mut signatures = Vec::new();
    for record in sig_file.into_records() {
        for signature in record.into_signatures()? {
            if load_params.matches(&signature) {
                signatures.push(signature);
            }
        }
    }
    Ok(signatures)
}

pub fn open_signature_file(filename: &str, load_params: &LoadParams) -> AbundResult<Vec<Signature>> {
    let file = File::open(filename).map_err(|e| format_err!("Error opening {}: {}", filename, e))?;
    // zero-length files can't be mapped
    if file.metadata()?.len() == 0 {
        bail!("Error parsing {}: file is empty", filename);
    }
    let mapped = unsafe { MmapOptions::new().map(&file)? };
    let signatures = parse_signatures(&mapped, load_params).map_err(|e| match e {
        AbundError::Json(e) => format_err!("Error parsing {}: {}", filename, e),
        e => format_err!("Error parsing {}: {}", filename, e),
    })?;
    debug!("{}: {} signatures after ksize/moltype selection", filename, signatures.len());
    Ok(signatures)
}

/// Load every file in order and concatenate their signatures.
pub fn load_signatures(filenames: &[&str], load_params: &LoadParams) -> AbundResult<Vec<Signature>> {
    let mut signatures = Vec::new();
    for filename in filenames {
        signatures.extend(open_signature_file(filename, load_params)?);
    }
    Ok(signatures)
}
