use soroban_sdk::contracterror;

/// Groups errors by domain for monitoring and off-chain handling.
///
/// Consumers should switch on this value first, then on the specific
/// `Error` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    /// `LockNotFound` lives here: "absent" and "not yours" are deliberately
    /// the same error so callers learn nothing about other compartments.
    Authorization,
    /// Caller-correctable argument errors (codes 200-299).
    Validation,
    /// The requested transition is illegal given current lock state
    /// (codes 300-399).
    State,
    /// The token collaborator reported failure (codes 400-499).
    Collaborator,
    /// Checked-arithmetic errors (codes 500-599).
    Arithmetic,
}

/// Canonical error enum for the lock ledger.
///
/// Codes are wire-stable. Never renumber a variant after deployment; append
/// new variants at the end of their category block only.
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Error {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,
    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    Unauthorized = 100,
    /// No lock with this id exists in the caller's compartment. Also
    /// returned when the id belongs to another account.
    LockNotFound = 101,

    // --- Validation (200-299) ---
    /// Asset identifier is not acceptable for locking.
    InvalidAsset = 200,
    /// Amount must be strictly positive.
    InvalidAmount = 201,
    /// Duration falls outside the configured min/max bounds.
    DurationOutOfRange = 202,
    /// Reward rate must be at most 10000 basis points.
    RateOutOfRange = 203,
    /// Early-exit penalty must be strictly below 10000 basis points.
    PenaltyOutOfRange = 204,
    /// Duration bounds must satisfy 0 < min < max.
    DurationBoundsInvalid = 205,

    // --- State (300-399) ---
    /// New locks are rejected while the ledger is paused.
    Paused = 300,
    /// Lock has already been settled; it can never be mutated again.
    AlreadySettled = 301,
    /// Lock has not matured yet; normal withdrawal is closed.
    NotYetUnlocked = 302,
    /// Lock has matured; the emergency path is closed, use withdraw.
    StillLocked = 303,
    /// No forfeited balance to sweep for this asset.
    NothingToSweep = 304,

    // --- Collaborator (400-499) ---
    /// The token contract rejected a transfer; the operation is rolled back.
    TransferFailed = 400,

    // --- Arithmetic (500-599) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 500,
}

/// Provides `category()` and `description()` on every `Error` variant for
/// structured off-chain display.
pub trait ErrorExt {
    fn category(&self) -> ErrorCategory;
    fn description(&self) -> &'static str;
}

impl ErrorExt for Error {
    fn category(&self) -> ErrorCategory {
        match self {
            Error::NotInitialized | Error::AlreadyInitialized => ErrorCategory::Initialization,

            Error::Unauthorized | Error::LockNotFound => ErrorCategory::Authorization,

            Error::InvalidAsset
            | Error::InvalidAmount
            | Error::DurationOutOfRange
            | Error::RateOutOfRange
            | Error::PenaltyOutOfRange
            | Error::DurationBoundsInvalid => ErrorCategory::Validation,

            Error::Paused
            | Error::AlreadySettled
            | Error::NotYetUnlocked
            | Error::StillLocked
            | Error::NothingToSweep => ErrorCategory::State,

            Error::TransferFailed => ErrorCategory::Collaborator,

            Error::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Error::NotInitialized => "Contract has not been initialized",
            Error::AlreadyInitialized => "Contract has already been initialized",
            Error::Unauthorized => "Caller is not the admin",
            Error::LockNotFound => "No such lock in the caller's compartment",
            Error::InvalidAsset => "Asset identifier is not acceptable for locking",
            Error::InvalidAmount => "Amount must be strictly positive (> 0)",
            Error::DurationOutOfRange => "Duration is outside the configured bounds",
            Error::RateOutOfRange => "Reward rate exceeds 10000 bps",
            Error::PenaltyOutOfRange => "Early-exit penalty must be below 10000 bps",
            Error::DurationBoundsInvalid => "Duration bounds must satisfy 0 < min < max",
            Error::Paused => "Ledger is paused; new locks are rejected",
            Error::AlreadySettled => "Lock has already been settled",
            Error::NotYetUnlocked => "Lock has not matured yet",
            Error::StillLocked => "Lock has matured; emergency exit is closed",
            Error::NothingToSweep => "No forfeited balance for this asset",
            Error::TransferFailed => "Token transfer failed; operation rolled back",
            Error::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
