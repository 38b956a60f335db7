//! Test doubles for the contracts the ledger talks to.
//!
//! `MockProvider` keeps plaintexts in the clear behind opaque handles, which
//! is enough to check the ledger's bookkeeping and the access rules it asks
//! for. `MockToken` is a bare balance sheet that can skim or reject
//! transfers.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, xdr::ToXdr, Address,
    Bytes, BytesN, Env,
};

use crate::provider::DecryptionGrant;
use crate::storage_types::Ciphertext;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockProviderError {
    AccessDenied = 1,
    UnknownCiphertext = 2,
}

#[derive(Clone)]
#[contracttype]
enum ProviderKey {
    NextHandle,
    Plaintext(Ciphertext),
    Access(Ciphertext, Address),
    InputProof(Ciphertext),
}

/// Ciphertext and proof as a client would submit them.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct EncryptedInput {
    pub ciphertext: Ciphertext,
    pub proof: Bytes,
}

#[contract]
pub struct MockProvider;

#[contractimpl]
impl MockProvider {
    /// Client-side encryption of `value` for `submitter`.
    pub fn encrypt(env: Env, submitter: Address, value: u64) -> EncryptedInput {
        let ciphertext = issue(&env, value);
        let proof = proof_for(&env, &ciphertext, &submitter);
        env.storage()
            .persistent()
            .set(&ProviderKey::InputProof(ciphertext.clone()), &proof);
        EncryptedInput { ciphertext, proof }
    }

    pub fn encrypted_zero(env: Env, caller: Address) -> Ciphertext {
        caller.require_auth();
        let ciphertext = issue(&env, 0);
        grant(&env, &ciphertext, &caller);
        ciphertext
    }

    /// Wraps on overflow, like the encrypted integer type.
    pub fn add(env: Env, caller: Address, lhs: Ciphertext, rhs: Ciphertext) -> Ciphertext {
        caller.require_auth();
        require_access(&env, &lhs, &caller);
        require_access(&env, &rhs, &caller);

        let sum = plaintext(&env, &lhs).wrapping_add(plaintext(&env, &rhs));
        let ciphertext = issue(&env, sum);
        grant(&env, &ciphertext, &caller);
        ciphertext
    }

    pub fn verify_input(
        env: Env,
        ciphertext: Ciphertext,
        proof: Bytes,
        submitter: Address,
        context: Address,
    ) -> bool {
        let issued: Option<Bytes> = env
            .storage()
            .persistent()
            .get(&ProviderKey::InputProof(ciphertext.clone()));
        let valid = issued == Some(proof.clone()) && proof == proof_for(&env, &ciphertext, &submitter);
        if valid {
            grant(&env, &ciphertext, &context);
        }
        valid
    }

    pub fn allow(env: Env, caller: Address, ciphertext: Ciphertext, principal: Address) {
        caller.require_auth();
        require_access(&env, &ciphertext, &caller);
        grant(&env, &ciphertext, &principal);
    }

    pub fn authorize_decryption(env: Env, ciphertext: Ciphertext, requester: Address) -> DecryptionGrant {
        requester.require_auth();
        require_access(&env, &ciphertext, &requester);
        DecryptionGrant {
            ciphertext,
            requester,
            issued_at: env.ledger().timestamp(),
        }
    }

    pub fn decrypt(env: Env, ciphertext: Ciphertext, grant: DecryptionGrant) -> u64 {
        grant.requester.require_auth();
        if grant.ciphertext != ciphertext {
            panic_with_error!(&env, MockProviderError::AccessDenied);
        }
        require_access(&env, &ciphertext, &grant.requester);
        plaintext(&env, &ciphertext)
    }

    pub fn has_access(env: Env, ciphertext: Ciphertext, principal: Address) -> bool {
        env.storage()
            .persistent()
            .has(&ProviderKey::Access(ciphertext, principal))
    }
}

fn issue(env: &Env, value: u64) -> Ciphertext {
    let next: u64 = env
        .storage()
        .instance()
        .get(&ProviderKey::NextHandle)
        .unwrap_or(1);
    env.storage().instance().set(&ProviderKey::NextHandle, &(next + 1));

    let mut raw = [0u8; 32];
    raw[0] = 0xce;
    raw[24..].copy_from_slice(&next.to_be_bytes());
    let ciphertext = BytesN::from_array(env, &raw);
    env.storage()
        .persistent()
        .set(&ProviderKey::Plaintext(ciphertext.clone()), &value);
    ciphertext
}

fn plaintext(env: &Env, ciphertext: &Ciphertext) -> u64 {
    env.storage()
        .persistent()
        .get(&ProviderKey::Plaintext(ciphertext.clone()))
        .unwrap_or_else(|| panic_with_error!(env, MockProviderError::UnknownCiphertext))
}

fn grant(env: &Env, ciphertext: &Ciphertext, principal: &Address) {
    env.storage()
        .persistent()
        .set(&ProviderKey::Access(ciphertext.clone(), principal.clone()), &true);
}

fn require_access(env: &Env, ciphertext: &Ciphertext, principal: &Address) {
    if !env
        .storage()
        .persistent()
        .has(&ProviderKey::Access(ciphertext.clone(), principal.clone()))
    {
        panic_with_error!(env, MockProviderError::AccessDenied);
    }
}

fn proof_for(env: &Env, ciphertext: &Ciphertext, submitter: &Address) -> Bytes {
    let mut proof = Bytes::from_array(env, &ciphertext.to_array());
    proof.append(&submitter.clone().to_xdr(env));
    proof
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockTokenError {
    InsufficientBalance = 1,
    RecipientBlocked = 2,
}

#[derive(Clone)]
#[contracttype]
enum TokenKey {
    Balance(Address),
    Blocked(Address),
    Skim,
}

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&TokenKey::Balance(to), &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&TokenKey::Balance(id))
            .unwrap_or(0)
    }

    /// Credit recipients `skim` units less than sent.
    pub fn set_skim(env: Env, skim: i128) {
        env.storage().instance().set(&TokenKey::Skim, &skim);
    }

    /// Reject every transfer to `recipient`.
    pub fn block(env: Env, recipient: Address) {
        env.storage()
            .persistent()
            .set(&TokenKey::Blocked(recipient), &true);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        if env.storage().persistent().has(&TokenKey::Blocked(to.clone())) {
            panic_with_error!(&env, MockTokenError::RecipientBlocked);
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic_with_error!(&env, MockTokenError::InsufficientBalance);
        }
        let skim: i128 = env.storage().instance().get(&TokenKey::Skim).unwrap_or(0);

        env.storage()
            .persistent()
            .set(&TokenKey::Balance(from), &(from_balance - amount));
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&TokenKey::Balance(to), &(to_balance + amount - skim));
    }
}
