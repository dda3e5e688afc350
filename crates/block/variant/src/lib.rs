//! Enumeration of alternative header encodings, for chains whose canonical
//! header shape is unknown.
//!
//! Eight independent toggles control which optional fields are included and
//! how ambiguous values are represented. All 256 combinations are ranked by
//! how likely they are to match real-world headers.

mod encode;
mod spec;

pub use self::{
    encode::encode_variant,
    spec::{HeaderVariantSpec, VARIANT_COUNT},
};

use headsmith_block_header::BlockHeaderFields;
use headsmith_primitives::{B256, Bytes, keccak256};

/// A candidate header encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderVariant {
    /// The toggles that produced the encoding
    pub spec: HeaderVariantSpec,
    /// The RLP-encoded header
    pub rlp: Bytes,
}

impl HeaderVariant {
    /// Encodes the header according to the provided toggles.
    pub fn new(fields: &BlockHeaderFields, spec: HeaderVariantSpec) -> Self {
        Self {
            spec,
            rlp: encode_variant(fields, &spec),
        }
    }

    /// The hash of the encoded header.
    pub fn hash(&self) -> B256 {
        keccak256(&self.rlp)
    }
}

/// Returns all variant toggles, most likely first.
///
/// Variants with equal scores keep their enumeration order.
pub fn ranked_specs() -> Vec<HeaderVariantSpec> {
    let mut specs: Vec<HeaderVariantSpec> = HeaderVariantSpec::all().collect();
    // `sort_by_key` is stable
    specs.sort_by_key(|spec| std::cmp::Reverse(spec.score()));
    specs
}

/// Encodes the header in all variants, most likely first.
pub fn ranked_variants(fields: &BlockHeaderFields) -> impl Iterator<Item = HeaderVariant> + '_ {
    ranked_specs()
        .into_iter()
        .map(move |spec| HeaderVariant::new(fields, spec))
}
