use soroban_sdk::{contracterror, contracttype, Address, BytesN, Env, String};

/// Opaque handle to a ciphertext held by the provider contract.
pub type Ciphertext = BytesN<32>;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Campaign,
    Totals,
    Token,
    Provider,
    Locked,
    ContributorCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contribution(Address),
}

/// Campaign metadata. `closed` flips false -> true exactly once.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
    pub organizer: Address,
    pub closed: bool,
}

/// Derived lifecycle state, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignState {
    Open,
    Expired,
    Closed,
}

/// Per-contributor stake.
///
/// `clear_amount` mirrors the plaintext behind `encrypted_amount` and must
/// always match it.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct ContributionEntry {
    pub encrypted_amount: Ciphertext,
    pub clear_amount: u64,
    pub last_contribution_at: u64,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct AggregateTotals {
    pub encrypted_total: Ciphertext,
    pub clear_total: u64,
}

/// Public view returned by `get_details`.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignDetails {
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
    pub closed: bool,
    pub clear_total: u64,
    pub organizer: Address,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOrganizer = 3,
    InvalidConfiguration = 4,
    CampaignEnded = 5,
    CampaignClosed = 6,
    InvalidAmount = 7,
    AmountOverflow = 8,
    ValueMismatch = 9,
    InvalidCiphertextProof = 10,
    TransferFailure = 11,
    Reentrancy = 12,
}

// Constants
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
pub const INSTANCE_BUMP_THRESHOLD: u32 = 17280 * 7;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = 17280 * 30;

/// Widest amount the encrypted integer type can hold.
pub const MAX_ENCRYPTED_AMOUNT: i128 = u64::MAX as i128;

/// Handle reported for stakes that were never written.
pub fn unset_ciphertext(e: &Env) -> Ciphertext {
    BytesN::from_array(e, &[0u8; 32])
}
