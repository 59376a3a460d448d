//! Public bijection between card indices and group elements.

use crate::discrete_log_cards::Card;

use ark_ec::CurveGroup;
use ark_std::rand::Rng;
use ark_std::{UniformRand, Zero};
use std::collections::HashMap;

/// Position of a card in the encoding table, `0..m·n`.
pub type CardIndex = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingTable<C: CurveGroup> {
    cards: Vec<Card<C>>,
    indices: HashMap<Card<C>, CardIndex>,
}

impl<C: CurveGroup> EncodingTable<C> {
    /// Sample `size` distinct, non-identity elements from a public-coin stream.
    ///
    /// Elements equal to the identity, to `generator` or to an earlier card are
    /// skipped, so the table is a bijection and the i-th entry only depends on
    /// the stream.
    pub fn derive<R: Rng>(public_randomness: &mut R, size: usize, generator: &C::Affine) -> Self {
        let mut cards = Vec::with_capacity(size);
        let mut indices = HashMap::with_capacity(size);

        while cards.len() < size {
            let card = Card::<C>::rand(public_randomness);
            if card.is_zero() || card.0 == *generator || indices.contains_key(&card) {
                continue;
            }
            indices.insert(card, cards.len());
            cards.push(card);
        }

        Self { cards, indices }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card<C>> {
        self.cards.get(index)
    }

    pub fn index_of(&self, card: &Card<C>) -> Option<CardIndex> {
        self.indices.get(card).copied()
    }

    pub fn cards(&self) -> &[Card<C>] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardIndex, &Card<C>)> {
        self.cards.iter().enumerate()
    }
}
