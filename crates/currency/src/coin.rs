use serde::{Deserialize, Serialize};

use vendo_core::Cents;

/// Coin denominations the machine recognizes.
///
/// Recognition is not acceptance: all seven denominations can be identified at
/// the slot, but only four are valued. `Dollar` and `SilverDollar` share a
/// face value yet remain distinct identities, which is why acceptance is per
/// variant rather than per amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coin {
    Penny,
    Nickel,
    Dime,
    Quarter,
    HalfDollar,
    Dollar,
    SilverDollar,
}

impl Coin {
    /// Accepted denominations in ascending face value.
    ///
    /// Change dispensing walks this table from the back (largest first), so
    /// the order is load-bearing.
    pub const ACCEPTED: [Coin; 4] = [Coin::Nickel, Coin::Dime, Coin::Quarter, Coin::Dollar];

    /// Face value in cents.
    pub const fn face_value(self) -> Cents {
        match self {
            Coin::Penny => Cents::new(1),
            Coin::Nickel => Cents::new(5),
            Coin::Dime => Cents::new(10),
            Coin::Quarter => Cents::new(25),
            Coin::HalfDollar => Cents::new(50),
            Coin::Dollar => Cents::new(100),
            Coin::SilverDollar => Cents::new(100),
        }
    }

    /// Whether the machine values this denomination.
    pub const fn is_accepted(self) -> bool {
        matches!(self, Coin::Nickel | Coin::Dime | Coin::Quarter | Coin::Dollar)
    }
}

impl core::fmt::Display for Coin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Coin::Penny => "penny",
            Coin::Nickel => "nickel",
            Coin::Dime => "dime",
            Coin::Quarter => "quarter",
            Coin::HalfDollar => "half_dollar",
            Coin::Dollar => "dollar",
            Coin::SilverDollar => "silver_dollar",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_denominations_carry_their_face_value() {
        assert_eq!(Coin::Nickel.face_value(), Cents::new(5));
        assert_eq!(Coin::Dime.face_value(), Cents::new(10));
        assert_eq!(Coin::Quarter.face_value(), Cents::new(25));
        assert_eq!(Coin::Dollar.face_value(), Cents::new(100));
    }

    #[test]
    fn rejected_denominations_are_recognized_but_not_valued() {
        for coin in [Coin::Penny, Coin::HalfDollar, Coin::SilverDollar] {
            assert!(!coin.is_accepted(), "{coin} should be rejected");
        }
    }

    #[test]
    fn silver_dollar_is_distinct_from_dollar_despite_equal_face_value() {
        assert_eq!(Coin::SilverDollar.face_value(), Coin::Dollar.face_value());
        assert_ne!(Coin::SilverDollar, Coin::Dollar);
        assert!(Coin::Dollar.is_accepted());
        assert!(!Coin::SilverDollar.is_accepted());
    }

    #[test]
    fn accepted_table_is_ascending_and_consistent() {
        for pair in Coin::ACCEPTED.windows(2) {
            assert!(pair[0].face_value() < pair[1].face_value());
        }
        for coin in Coin::ACCEPTED {
            assert!(coin.is_accepted());
        }
    }
}
