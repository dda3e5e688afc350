mod chain_eras;
mod fixtures;
