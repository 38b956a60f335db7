//! Boundary with the ciphertext arithmetic provider.
//!
//! The provider is a separate contract that owns every ciphertext, performs
//! homomorphic addition and keeps the access list that decides who may
//! decrypt a handle. The ledger only stores and forwards handles.

use soroban_sdk::{contractclient, contracttype, panic_with_error, Address, Bytes, Env};

use crate::storage_types::{Ciphertext, CrowdfundError, DataKey};

/// Proof that `requester` may decrypt `ciphertext`, issued by the provider.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct DecryptionGrant {
    pub ciphertext: Ciphertext,
    pub requester: Address,
    pub issued_at: u64,
}

#[contractclient(name = "CiphertextProviderClient")]
pub trait CiphertextProvider {
    /// Fresh encryption of zero, readable by `caller`.
    fn encrypted_zero(env: Env, caller: Address) -> Ciphertext;

    /// Homomorphic sum of two handles `caller` has access to.
    fn add(env: Env, caller: Address, lhs: Ciphertext, rhs: Ciphertext) -> Ciphertext;

    /// Checks that `proof` binds `ciphertext` to `submitter` for use by
    /// `context`; on success `context` gains access to the handle.
    fn verify_input(
        env: Env,
        ciphertext: Ciphertext,
        proof: Bytes,
        submitter: Address,
        context: Address,
    ) -> bool;

    /// Grants `principal` access to a handle `caller` already holds.
    fn allow(env: Env, caller: Address, ciphertext: Ciphertext, principal: Address);

    fn authorize_decryption(env: Env, ciphertext: Ciphertext, requester: Address) -> DecryptionGrant;

    /// Reveals the plaintext. Runs off the ledger, on behalf of an
    /// authorized agent.
    fn decrypt(env: Env, ciphertext: Ciphertext, grant: DecryptionGrant) -> u64;
}

pub fn read_provider(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Provider)
        .unwrap_or_else(|| panic_with_error!(e, CrowdfundError::NotInitialized))
}

fn client(e: &Env) -> CiphertextProviderClient<'_> {
    CiphertextProviderClient::new(e, &read_provider(e))
}

pub fn encrypted_zero(e: &Env) -> Ciphertext {
    client(e).encrypted_zero(&e.current_contract_address())
}

pub fn add(e: &Env, lhs: &Ciphertext, rhs: &Ciphertext) -> Ciphertext {
    client(e).add(&e.current_contract_address(), lhs, rhs)
}

/// Accepts a contributor-supplied ciphertext, or fails the call.
///
/// A provider that errors out while verifying counts as a rejection.
pub fn accept_input(e: &Env, ciphertext: &Ciphertext, proof: &Bytes, submitter: &Address) {
    let verified = client(e).try_verify_input(
        ciphertext,
        proof,
        submitter,
        &e.current_contract_address(),
    );
    if !matches!(verified, Ok(Ok(true))) {
        panic_with_error!(e, CrowdfundError::InvalidCiphertextProof);
    }
}

pub fn allow(e: &Env, ciphertext: &Ciphertext, principal: &Address) {
    client(e).allow(&e.current_contract_address(), ciphertext, principal);
}
