use crate::discrete_log_cards::Parameters;
use crate::encoding::CardIndex;
use crate::error::CardProtocolError;

use ark_ec::CurveGroup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from encoding-table positions to the cards the game plays with.
pub type CardMappings = HashMap<CardIndex, ClassicPlayingCard>;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Suite {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suite {
    /// Encoding order: index `i` of a 52-card deck has suite `VALUES[i / 13]`.
    pub const VALUES: [Self; 4] = [Self::Spade, Self::Heart, Self::Diamond, Self::Club];

    fn symbol(&self) -> &'static str {
        match self {
            Suite::Club => "♣",
            Suite::Diamond => "♦",
            Suite::Heart => "♥",
            Suite::Spade => "♠",
        }
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Value {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Value {
    /// Encoding order within a suite, ace first.
    pub const VALUES: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    fn symbol(&self) -> &'static str {
        match self {
            Value::Two => "2",
            Value::Three => "3",
            Value::Four => "4",
            Value::Five => "5",
            Value::Six => "6",
            Value::Seven => "7",
            Value::Eight => "8",
            Value::Nine => "9",
            Value::Ten => "10",
            Value::Jack => "J",
            Value::Queen => "Q",
            Value::King => "K",
            Value::Ace => "A",
        }
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct ClassicPlayingCard {
    value: Value,
    suite: Suite,
}

impl ClassicPlayingCard {
    pub fn new(value: Value, suite: Suite) -> Self {
        Self { value, suite }
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn suite(&self) -> Suite {
        self.suite
    }

    /// The card stored at `index` of a standard 52-card encoding.
    pub fn from_index(index: CardIndex) -> Option<Self> {
        let suite = Suite::VALUES.get(index / Value::VALUES.len())?;
        let value = Value::VALUES[index % Value::VALUES.len()];
        Some(Self::new(value, *suite))
    }
}

impl std::fmt::Display for ClassicPlayingCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value.symbol(), self.suite.symbol())
    }
}

impl std::fmt::Debug for ClassicPlayingCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Standard mappings for a 52-card encoding: spades, hearts, diamonds, clubs,
/// each running ace to king. Index 0 is the ace of spades.
pub fn classic_card_mappings<C: CurveGroup>(
    pp: &Parameters<C>,
) -> Result<CardMappings, CardProtocolError> {
    let deck_size = Suite::VALUES.len() * Value::VALUES.len();
    if pp.num_cards() != deck_size {
        return Err(CardProtocolError::InvalidDimension {
            suits: pp.m(),
            ranks: pp.n(),
        });
    }

    Ok((0..deck_size)
        .filter_map(|index| ClassicPlayingCard::from_index(index).map(|card| (index, card)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discrete_log_cards::DLCards;
    use crate::BarnettSmartProtocol;
    use std::collections::HashSet;

    type Curve = ark_bn254::G1Projective;

    #[test]
    fn standard_deck_mapping() {
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mappings = classic_card_mappings(&pp).unwrap();

        assert_eq!(mappings.len(), 52);
        assert_eq!(mappings[&0], ClassicPlayingCard::new(Value::Ace, Suite::Spade));
        assert_eq!(mappings[&51], ClassicPlayingCard::new(Value::King, Suite::Club));

        let distinct: HashSet<_> = mappings.values().collect();
        assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn mapping_needs_a_52_card_deck() {
        let pp = DLCards::<Curve>::setup(2, 5).unwrap();
        assert_eq!(
            classic_card_mappings(&pp),
            Err(CardProtocolError::InvalidDimension { suits: 2, ranks: 5 })
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            ClassicPlayingCard::new(Value::Ten, Suite::Heart).to_string(),
            "10♥"
        );
        assert_eq!(format!("{:?}", ClassicPlayingCard::from_index(0).unwrap()), "A♠");
        assert!(ClassicPlayingCard::from_index(52).is_none());
    }
}
