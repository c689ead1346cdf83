pub const OPEN_GROUP: char = '(';
pub const CLOSE_GROUP: char = ')';
pub const NEGATE: char = '-';

/// Tiers collapsed in order, see `Operator::tier`
pub const PRECEDENCE_TIERS: [u8; 3] = [1, 2, 3];
