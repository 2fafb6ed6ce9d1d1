use soroban_sdk::contracterror;

/// Errors shared by the math library, the pool and the registry.
///
/// Codes are grouped by category so that clients can branch on the
/// hundreds digit without matching every variant.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ClmmError {
    // === Validation ===
    InvalidTickRange = 100,
    InvalidTickSpacing = 101,
    InvalidPrice = 102,
    InvalidTokenPair = 103,
    InvalidTickArrayIndex = 104,
    TickNotFound = 105,
    InsufficientInputAmount = 106,
    InvalidLiquidityAmount = 107,
    TickArraySequenceTooLong = 108,
    LiquidityPerTickExceeded = 109,
    AlreadyInitialized = 110,
    NotInitialized = 111,
    PositionNotFound = 112,
    PositionAlreadyExists = 113,
    PoolAlreadyExists = 114,

    // === Arithmetic ===
    ArithmeticOverflow = 200,

    // === Economic ===
    InsufficientLiquidity = 300,
    NoLiquidityToRemove = 301,
    InsufficientPoolLiquidity = 302,
    SlippageExceeded = 303,

    // === Authorization ===
    InvalidPositionOwner = 400,
}

/// Coarse error category
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Input rejected before any state was read for mutation
    Validation,
    /// Overflow, underflow or division by zero in fixed-point math
    Arithmetic,
    /// Request is well-formed but the pool or position cannot honour it
    Economic,
    /// Caller is not allowed to act on the target
    Authorization,
}

impl ClmmError {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            100..=199 => ErrorKind::Validation,
            200..=299 => ErrorKind::Arithmetic,
            300..=399 => ErrorKind::Economic,
            _ => ErrorKind::Authorization,
        }
    }
}
