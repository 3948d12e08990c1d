use std::str::FromStr;

use alloy::{
    contract::Error as ContractError, primitives::Bytes, sol_types::SolInterface,
    transports::TransportError,
};
use eyre::{bail, Context};

/// Ask the user to confirm before sending transactions. Returns an error if they decline.
pub fn request_confirmation() -> eyre::Result<()> {
    let proceed = inquire::Confirm::new("Do you want to continue? (yes/no):")
        .with_default(false)
        .prompt()
        .wrap_err("failed to read confirmation")?;

    if !proceed {
        bail!("aborted by user");
    }

    Ok(())
}

/// Try to decode a contract revert into the given Solidity error interface.
///
/// Returns the original error if the revert data is absent or doesn't match any of
/// the interface's errors.
pub fn try_parse_contract_error<T: SolInterface>(error: ContractError) -> Result<T, ContractError> {
    let revert_data = match &error {
        ContractError::TransportError(TransportError::ErrorResp(err)) => err
            .data
            .as_ref()
            .and_then(|data| Bytes::from_str(data.get().trim_matches('"')).ok()),
        _ => None,
    };

    let Some(data) = revert_data else { return Err(error) };
    T::abi_decode(&data, true).map_err(|_| error)
}
