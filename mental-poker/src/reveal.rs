//! Turning masked cards back into playing cards once every key holder has
//! published a proven reveal token.

use crate::classic::{CardMappings, ClassicPlayingCard};
use crate::discrete_log_cards::{
    AggregatePublicKey, Card, DLCards, MaskedCard, Parameters, PublicKey, RevealToken,
    ZKProofReveal,
};
use crate::error::CardProtocolError;
use crate::BarnettSmartProtocol;

use anyhow::Context;
use ark_ec::CurveGroup;
use std::collections::HashMap;
use tracing::debug;

/// What a player publishes to help reveal one card.
pub type RevealTokenInfo<C> = (RevealToken<C>, ZKProofReveal<C>, PublicKey<C>);

/// Reveal tokens gathered per masked card.
pub type RevealTokenCollection<C> = HashMap<MaskedCard<C>, Vec<RevealTokenInfo<C>>>;

/// Look an unmasked element up in the encoding table and the game's mappings.
pub fn decode<C: CurveGroup>(
    pp: &Parameters<C>,
    card: &Card<C>,
    card_mappings: &CardMappings,
) -> Result<ClassicPlayingCard, CardProtocolError> {
    let index = pp
        .encoding
        .index_of(card)
        .ok_or(CardProtocolError::UnknownCardElement)?;

    card_mappings
        .get(&index)
        .copied()
        .ok_or(CardProtocolError::UnmappedCard(index))
}

/// Verify every token, unmask and decode. Every player runs this for cards in play.
pub fn open_card<C: CurveGroup>(
    pp: &Parameters<C>,
    shared_key: &AggregatePublicKey<C>,
    reveal_tokens: &[RevealTokenInfo<C>],
    card_mappings: &CardMappings,
    card: &MaskedCard<C>,
) -> Result<ClassicPlayingCard, CardProtocolError> {
    let unmasked_card = DLCards::<C>::unmask(pp, shared_key, reveal_tokens, card)?;
    let opened_card = decode(pp, &unmasked_card, card_mappings)?;
    debug!(card = %opened_card, "opened card");

    Ok(opened_card)
}

/// Open `cards` using the tokens gathered in `collection`. A card without
/// any collected token fails as an incomplete reveal set.
pub fn open_cards<C: CurveGroup>(
    pp: &Parameters<C>,
    shared_key: &AggregatePublicKey<C>,
    cards: &[MaskedCard<C>],
    card_mappings: &CardMappings,
    collection: &RevealTokenCollection<C>,
) -> anyhow::Result<HashMap<MaskedCard<C>, ClassicPlayingCard>> {
    let mut opened_cards = HashMap::with_capacity(cards.len());

    for (position, card) in cards.iter().enumerate() {
        let reveal_tokens = collection.get(card).map(Vec::as_slice).unwrap_or(&[]);
        let opened_card = open_card(pp, shared_key, reveal_tokens, card_mappings, card)
            .with_context(|| format!("failed to open card at position {}", position))?;
        opened_cards.insert(*card, opened_card);
    }

    Ok(opened_cards)
}

/// Merge one player's published tokens into `collection`, ignoring cards
/// outside `deck` and tokens already collected.
pub fn collect_reveal_tokens<C: CurveGroup>(
    deck: &[MaskedCard<C>],
    reveal_tokens: HashMap<MaskedCard<C>, RevealTokenInfo<C>>,
    collection: &mut RevealTokenCollection<C>,
) {
    for (card, token) in reveal_tokens {
        if deck.contains(&card) {
            let tokens = collection.entry(card).or_default();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
}
