use headsmith_block_header::{BlockHeaderFields, push_base_fields};
use headsmith_primitives::{Bytes, U256};
use headsmith_rlp::RlpListBuilder;

use crate::HeaderVariantSpec;

fn push_blob_gas(builder: &mut RlpListBuilder, fields: &BlockHeaderFields) {
    if let Some(blob_gas_used) = fields.blob_gas_used {
        builder.push_int(blob_gas_used);
    }
    if let Some(excess_blob_gas) = fields.excess_blob_gas {
        builder.push_int(excess_blob_gas);
    }
}

/// Encodes the header according to the provided toggles.
///
/// Optional fields are only appended when they are both toggled on and
/// reported by the block. The requests hash follows the parent beacon block
/// root toggle and is always the last field.
pub fn encode_variant(fields: &BlockHeaderFields, spec: &HeaderVariantSpec) -> Bytes {
    let difficulty = if spec.force_difficulty_zero {
        U256::ZERO
    } else {
        fields.difficulty
    };

    let mix_hash = spec
        .prefer_prev_randao
        .then_some(fields.prev_randao)
        .flatten()
        .or(fields.mix_hash)
        .or(fields.prev_randao)
        .unwrap_or_default();

    let mut builder = RlpListBuilder::default();
    push_base_fields(&mut builder, fields, difficulty);
    builder.push_bytes(mix_hash.as_slice());

    if spec.nonce_empty {
        builder.push_bytes(&[]);
    } else {
        builder.push_bytes(fields.nonce.unwrap_or_default().as_slice());
    }

    if spec.include_base_fee {
        if let Some(base_fee) = fields.base_fee_per_gas {
            builder.push_int(base_fee);
        }
    }

    if spec.include_withdrawals {
        if let Some(withdrawals_root) = fields.withdrawals_root {
            builder.push_bytes(withdrawals_root.as_slice());
        }
    }

    let beacon_root = fields
        .parent_beacon_block_root
        .filter(|_root| spec.include_parent_beacon_block_root);

    if spec.parent_beacon_block_root_before_blob {
        if let Some(beacon_root) = beacon_root {
            builder.push_bytes(beacon_root.as_slice());
        }
        if spec.include_blob {
            push_blob_gas(&mut builder, fields);
        }
    } else {
        if spec.include_blob {
            push_blob_gas(&mut builder, fields);
        }
        if let Some(beacon_root) = beacon_root {
            builder.push_bytes(beacon_root.as_slice());
        }
    }

    if spec.include_parent_beacon_block_root {
        if let Some(requests_hash) = fields.requests_hash {
            builder.push_bytes(requests_hash.as_slice());
        }
    }

    builder.finish().into()
}
