use crate::classic::{CardMappings, ClassicPlayingCard};
use crate::discrete_log_cards::{
    AggregatePublicKey, DLCards, MaskedCard, Parameters, PlayerSecretKey, PublicKey,
    ZKProofKeyOwnership,
};
use crate::error::{CardProtocolError, GameError};
use crate::reveal::{self, RevealTokenCollection, RevealTokenInfo};
use crate::BarnettSmartProtocol;

use ark_ec::CurveGroup;
use ark_std::rand::Rng;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// One seat at the table. Owns its secret key exclusively; the key is never
/// cloned, serialized or handed out, and is wiped on drop or on
/// `discard_secret_key`.
pub struct Player<C: CurveGroup> {
    name: Vec<u8>,
    sk: Option<PlayerSecretKey<C>>,
    pk: PublicKey<C>,
    proof_key: ZKProofKeyOwnership<C>,
    cards: Vec<MaskedCard<C>>,
    opened_cards: Vec<Option<ClassicPlayingCard>>,
}

impl<C: CurveGroup> Player<C> {
    pub fn new<R: Rng>(rng: &mut R, pp: &Parameters<C>, name: &[u8]) -> anyhow::Result<Self> {
        let (pk, sk) = DLCards::<C>::player_keygen(rng, pp)?;
        let proof_key = DLCards::<C>::prove_key_ownership(rng, pp, &pk, &sk, name)?;
        Ok(Self {
            name: name.to_vec(),
            sk: Some(sk),
            pk,
            proof_key,
            cards: vec![],
            opened_cards: vec![],
        })
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn public_key(&self) -> &PublicKey<C> {
        &self.pk
    }

    pub fn key_ownership_proof(&self) -> &ZKProofKeyOwnership<C> {
        &self.proof_key
    }

    /// What the player publishes so that everyone can build the aggregate key.
    pub fn public_info(&self) -> (PublicKey<C>, ZKProofKeyOwnership<C>, Vec<u8>) {
        (self.pk, self.proof_key, self.name.clone())
    }

    /// Hand in the order cards were received.
    pub fn cards(&self) -> &[MaskedCard<C>] {
        &self.cards
    }

    /// Cards peeked so far, aligned with `cards`.
    pub fn opened_cards(&self) -> &[Option<ClassicPlayingCard>] {
        &self.opened_cards
    }

    pub fn receive_card(&mut self, card: MaskedCard<C>) {
        self.cards.push(card);
        self.opened_cards.push(None);
    }

    /// Privately read a card from the hand. `reveal_tokens` must hold one
    /// token from every other key holder; the player's own share is computed
    /// locally and never published.
    #[instrument(skip_all, fields(player = %String::from_utf8_lossy(&self.name)))]
    pub fn peek_at_card(
        &mut self,
        parameters: &Parameters<C>,
        shared_key: &AggregatePublicKey<C>,
        reveal_tokens: &[RevealTokenInfo<C>],
        card_mappings: &CardMappings,
        card: &MaskedCard<C>,
    ) -> anyhow::Result<ClassicPlayingCard> {
        let i = self
            .cards
            .iter()
            .position(|x| x == card)
            .ok_or(GameError::CardNotFound)?;

        let sk = self.secret_key()?;
        let unmasked_card = DLCards::<C>::unmask_with_own_share(
            parameters,
            shared_key,
            reveal_tokens,
            sk,
            &self.pk,
            card,
        )?;
        let opened_card = reveal::decode(parameters, &unmasked_card, card_mappings)?;

        debug!(position = i, "peeked at card");
        self.opened_cards[i] = Some(opened_card);
        Ok(opened_card)
    }

    /// Peek at every card in the hand using tokens gathered in `collection`.
    /// A card with no collected tokens is checked against an empty set.
    pub fn peek_my_cards(
        &mut self,
        parameters: &Parameters<C>,
        shared_key: &AggregatePublicKey<C>,
        card_mappings: &CardMappings,
        collection: &RevealTokenCollection<C>,
    ) -> anyhow::Result<()> {
        for card in self.cards.clone() {
            let reveal_tokens = collection.get(&card).map(Vec::as_slice).unwrap_or(&[]);
            self.peek_at_card(parameters, shared_key, reveal_tokens, card_mappings, &card)?;
        }
        Ok(())
    }

    pub fn compute_reveal_token<R: Rng>(
        &self,
        rng: &mut R,
        pp: &Parameters<C>,
        card: &MaskedCard<C>,
    ) -> anyhow::Result<RevealTokenInfo<C>> {
        let (reveal_token, reveal_proof) =
            DLCards::<C>::compute_reveal_token(rng, pp, self.secret_key()?, &self.pk, card)?;

        Ok((reveal_token, reveal_proof, self.pk))
    }

    /// Tokens for the player's own hand, published when the hand is shown.
    pub fn compute_my_reveal_tokens<R: Rng>(
        &self,
        rng: &mut R,
        pp: &Parameters<C>,
    ) -> anyhow::Result<HashMap<MaskedCard<C>, RevealTokenInfo<C>>> {
        self.cards
            .iter()
            .map(|card| -> anyhow::Result<_> {
                Ok((*card, self.compute_reveal_token(rng, pp, card)?))
            })
            .collect()
    }

    /// Tokens for every card of `deck` not in this player's hand, so that
    /// their holders can peek.
    pub fn compute_others_reveal_tokens<R: Rng>(
        &self,
        rng: &mut R,
        pp: &Parameters<C>,
        deck: &[MaskedCard<C>],
    ) -> anyhow::Result<HashMap<MaskedCard<C>, RevealTokenInfo<C>>> {
        deck.iter()
            .filter(|card| !self.cards.contains(card))
            .map(|card| -> anyhow::Result<_> {
                Ok((*card, self.compute_reveal_token(rng, pp, card)?))
            })
            .collect()
    }

    /// Drop and wipe the secret key at the end of a game.
    pub fn discard_secret_key(&mut self) {
        self.sk = None;
    }

    fn secret_key(&self) -> Result<&PlayerSecretKey<C>, CardProtocolError> {
        self.sk.as_ref().ok_or(CardProtocolError::SecretKeyMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classic::{classic_card_mappings, Suite, Value};
    use ark_std::test_rng;

    type Curve = ark_bn254::G1Projective;

    #[test]
    fn hand_keeps_insertion_order() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mut player = Player::new(rng, &pp, b"alice").unwrap();
        let shared_key = DLCards::<Curve>::compute_aggregate_key(&pp, &[player.public_info()]).unwrap();

        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();
        for card in deck.iter().rev().take(3) {
            player.receive_card(*card);
        }

        assert_eq!(player.cards(), &[deck[51], deck[50], deck[49]]);
        assert_eq!(player.opened_cards(), &[None, None, None]);
    }

    #[test]
    fn single_player_peeks_alone() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mappings = classic_card_mappings(&pp).unwrap();
        let mut player = Player::new(rng, &pp, b"alice").unwrap();
        let shared_key = DLCards::<Curve>::compute_aggregate_key(&pp, &[player.public_info()]).unwrap();

        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();
        player.receive_card(deck[0]);

        let card = player
            .peek_at_card(&pp, &shared_key, &[], &mappings, &deck[0])
            .unwrap();
        assert_eq!(card, ClassicPlayingCard::new(Value::Ace, Suite::Spade));
        assert_eq!(player.opened_cards(), &[Some(card)]);
    }

    #[test]
    fn solo_player_peeks_whole_hand_without_tokens() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mappings = classic_card_mappings(&pp).unwrap();
        let mut player = Player::new(rng, &pp, b"alice").unwrap();
        let shared_key = DLCards::<Curve>::compute_aggregate_key(&pp, &[player.public_info()]).unwrap();

        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();
        player.receive_card(deck[0]);
        player.receive_card(deck[1]);

        player
            .peek_my_cards(&pp, &shared_key, &mappings, &RevealTokenCollection::default())
            .unwrap();
        assert_eq!(player.opened_cards(), &[Some(mappings[&0]), Some(mappings[&1])]);
    }

    #[test]
    fn missing_tokens_are_reported_as_incomplete() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mappings = classic_card_mappings(&pp).unwrap();
        let mut alice = Player::new(rng, &pp, b"alice").unwrap();
        let bob = Player::new(rng, &pp, b"bob").unwrap();
        let shared_key =
            DLCards::<Curve>::compute_aggregate_key(&pp, &[alice.public_info(), bob.public_info()])
                .unwrap();

        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();
        alice.receive_card(deck[0]);

        let err = alice
            .peek_my_cards(&pp, &shared_key, &mappings, &RevealTokenCollection::default())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CardProtocolError>(),
            Some(&CardProtocolError::IncompleteRevealSet {
                expected: 2,
                received: 1,
                missing: vec![String::from("bob")],
            })
        );
    }

    #[test]
    fn peeking_at_a_foreign_card_fails() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mappings = classic_card_mappings(&pp).unwrap();
        let mut player = Player::new(rng, &pp, b"alice").unwrap();
        let shared_key = DLCards::<Curve>::compute_aggregate_key(&pp, &[player.public_info()]).unwrap();
        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();

        let err = player
            .peek_at_card(&pp, &shared_key, &[], &mappings, &deck[0])
            .unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::CardNotFound));
    }

    #[test]
    fn discarded_key_cannot_reveal() {
        let rng = &mut test_rng();
        let pp = DLCards::<Curve>::setup(4, 13).unwrap();
        let mut player = Player::new(rng, &pp, b"alice").unwrap();
        let shared_key = DLCards::<Curve>::compute_aggregate_key(&pp, &[player.public_info()]).unwrap();
        let deck = DLCards::<Curve>::mask_initial_deck(&pp, &shared_key).unwrap();

        assert!(player.compute_reveal_token(rng, &pp, &deck[0]).is_ok());
        player.discard_secret_key();

        let err = player.compute_reveal_token(rng, &pp, &deck[0]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CardProtocolError>(),
            Some(&CardProtocolError::SecretKeyMissing)
        );
    }
}
