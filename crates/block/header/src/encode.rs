use headsmith_primitives::{B64, Bytes, U256};
use headsmith_rlp::RlpListBuilder;

use crate::{BlockHeaderFields, Era};

/// Appends the 13 fields that precede the mix hash in every era, with the
/// provided difficulty.
pub fn push_base_fields(
    builder: &mut RlpListBuilder,
    fields: &BlockHeaderFields,
    difficulty: U256,
) {
    builder
        .push_bytes(fields.parent_hash.as_slice())
        .push_bytes(fields.ommers_hash.as_slice())
        .push_bytes(fields.beneficiary.as_slice())
        .push_bytes(fields.state_root.as_slice())
        .push_bytes(fields.transactions_root.as_slice())
        .push_bytes(fields.receipts_root.as_slice())
        .push_bytes(fields.logs_bloom.as_slice())
        .push_int(difficulty)
        .push_int(fields.number)
        .push_int(fields.gas_limit)
        .push_int(fields.gas_used)
        .push_int(fields.timestamp)
        .push_bytes(&fields.extra_data);
}

/// Encodes the header with exactly the fields of the provided era.
///
/// Fields that the era requires but the block lacks are encoded as zero.
/// Post-merge eras zero the difficulty and nonce, whereas [`Era::PreLondon`]
/// and [`Era::London`] keep the block's proof-of-work values.
pub fn encode_header(fields: &BlockHeaderFields, era: Era) -> Bytes {
    let (difficulty, nonce) = if era.is_post_merge() {
        (U256::ZERO, B64::ZERO)
    } else {
        (fields.difficulty, fields.nonce.unwrap_or_default())
    };

    let mut builder = RlpListBuilder::default();
    push_base_fields(&mut builder, fields, difficulty);
    builder
        .push_bytes(fields.randao_or_mix_hash().as_slice())
        .push_bytes(nonce.as_slice());

    if era.has_base_fee() {
        builder.push_int(fields.base_fee_per_gas.unwrap_or_default());
    }

    if era.has_withdrawals_root() {
        builder.push_bytes(fields.withdrawals_root.unwrap_or_default().as_slice());
    }

    if era.has_blob_gas() {
        builder
            .push_int(fields.blob_gas_used.unwrap_or_default())
            .push_int(fields.excess_blob_gas.unwrap_or_default())
            .push_bytes(
                fields
                    .parent_beacon_block_root
                    .unwrap_or_default()
                    .as_slice(),
            );
    }

    if era.has_requests_hash() {
        builder.push_bytes(fields.requests_hash.unwrap_or_default().as_slice());
    }

    debug_assert_eq!(builder.item_count(), era.field_count());

    builder.finish().into()
}
